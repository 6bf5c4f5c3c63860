use commitbrute::RecordBuffer;
use honggfuzz::fuzz;

/// The length in the `commit <len>\0` header must match what follows it.
fn header_matches(framed: &[u8]) -> bool {
    let Some(nul) = framed.iter().position(|&b| b == 0) else {
        return false;
    };
    let declared = std::str::from_utf8(&framed[b"commit ".len()..nul])
        .ok()
        .and_then(|s| s.parse::<usize>().ok());
    declared == Some(framed.len() - nul - 1)
}

fn main() {
    loop {
        fuzz!(|data: &[u8]| {
            if let Ok(mut record) = RecordBuffer::new(data) {
                assert!(header_matches(record.as_bytes()));
                let original = record.as_bytes().to_vec();
                let a = record.author().seconds;
                let c = record.committer().seconds;
                record.set_dates(a.saturating_sub(123_456), c.saturating_sub(7));
                assert!(header_matches(record.as_bytes()));
                record.set_dates(a, c);
                assert_eq!(record.as_bytes(), &original[..]);
            }
        });
    }
}
