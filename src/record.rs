//! Framed commit object with rewritable date seconds.
//!
//! Git hashes a commit as `commit <body len>\0<body>`. A [`RecordBuffer`]
//! keeps that framed form and rewrites the two seconds runs in place. When a
//! new value has a different digit count than the one it replaces, the whole
//! buffer is laid out again from the untouched body, header length included,
//! so the bytes always match what git itself would hash for those dates.

use sha1::{Digest, Sha1};

use crate::date::{find_date, DateField, Timestamp};
use crate::hex_buf::{HexBuf, DIGEST_LEN};
use crate::BruteError;

/// Decimal rendering of an `i64` on the stack.
struct Digits {
    buf: [u8; 20],
    len: usize,
}

impl Digits {
    fn new(n: i64) -> Self {
        let mut buf = [0u8; 20];
        let mut len = 0;
        let mut v = n.unsigned_abs();
        loop {
            buf[len] = b'0' + (v % 10) as u8;
            len += 1;
            v /= 10;
            if v == 0 {
                break;
            }
        }
        if n < 0 {
            buf[len] = b'-';
            len += 1;
        }
        buf[..len].reverse();
        Self { buf, len }
    }

    fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }
}

/// Location of a seconds run inside the body.
#[derive(Debug, Clone, Copy)]
struct Slot {
    at: usize,
    len: usize,
}

#[derive(Debug, Clone)]
pub struct RecordBuffer {
    body: Vec<u8>,
    author: Timestamp,
    committer: Timestamp,
    author_slot: Slot,
    committer_slot: Slot,
    buf: Vec<u8>,
    author_pos: usize,
    author_width: usize,
    committer_pos: usize,
    committer_width: usize,
}

impl RecordBuffer {
    /// Parse the dates out of a bare commit object and frame it.
    pub fn new(body: &[u8]) -> Result<Self, BruteError> {
        let (author, a_at) = find_date(body, DateField::Author)?;
        let (committer, c_at) = find_date(body, DateField::Committer)?;
        let author_slot = Slot {
            at: a_at,
            len: seconds_len(body, a_at),
        };
        let committer_slot = Slot {
            at: c_at,
            len: seconds_len(body, c_at),
        };

        let mut buf = Vec::with_capacity(body.len() + 32);
        let [author_pos, committer_pos] = layout(
            &mut buf,
            body,
            (author_slot, &body[a_at..a_at + author_slot.len]),
            (committer_slot, &body[c_at..c_at + committer_slot.len]),
        );

        Ok(Self {
            body: body.to_vec(),
            author,
            committer,
            author_slot,
            committer_slot,
            buf,
            author_pos,
            author_width: author_slot.len,
            committer_pos,
            committer_width: committer_slot.len,
        })
    }

    /// Original author date.
    pub fn author(&self) -> &Timestamp {
        &self.author
    }

    /// Original committer date.
    pub fn committer(&self) -> &Timestamp {
        &self.committer
    }

    /// The bare object as supplied.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Framed bytes as currently rewritten.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Replace the seconds of both dates.
    pub fn set_dates(&mut self, author_secs: i64, committer_secs: i64) {
        let a = Digits::new(author_secs);
        let c = Digits::new(committer_secs);
        if a.len == self.author_width && c.len == self.committer_width {
            self.buf[self.author_pos..self.author_pos + a.len].copy_from_slice(a.as_bytes());
            self.buf[self.committer_pos..self.committer_pos + c.len]
                .copy_from_slice(c.as_bytes());
            return;
        }

        log::debug!(
            "digit width changed ({} -> {}, {} -> {}), relaying out object",
            self.author_width,
            a.len,
            self.committer_width,
            c.len
        );
        let [author_pos, committer_pos] = layout(
            &mut self.buf,
            &self.body,
            (self.author_slot, a.as_bytes()),
            (self.committer_slot, c.as_bytes()),
        );
        self.author_pos = author_pos;
        self.author_width = a.len;
        self.committer_pos = committer_pos;
        self.committer_width = c.len;
    }

    /// SHA-1 of the framed bytes.
    pub fn digest(&self) -> [u8; DIGEST_LEN] {
        Sha1::digest(&self.buf).into()
    }
}

fn seconds_len(body: &[u8], at: usize) -> usize {
    // find_date only succeeds when a space follows the seconds.
    body[at..]
        .iter()
        .position(|&b| b == b' ')
        .unwrap_or(body.len() - at)
}

/// Write `commit <len>\0` plus `body` into `buf`, substituting the two
/// seconds runs. Returns the positions of the new runs in `buf`, author first.
fn layout(
    buf: &mut Vec<u8>,
    body: &[u8],
    author: (Slot, &[u8]),
    committer: (Slot, &[u8]),
) -> [usize; 2] {
    let body_len =
        body.len() - author.0.len - committer.0.len + author.1.len() + committer.1.len();
    buf.clear();
    buf.extend_from_slice(b"commit ");
    buf.extend_from_slice(Digits::new(body_len as i64).as_bytes());
    buf.push(0);

    let mut runs = [(author, 0usize), (committer, 1usize)];
    runs.sort_by_key(|((slot, _), _)| slot.at);

    let mut positions = [0usize; 2];
    let mut cursor = 0;
    for ((slot, digits), which) in runs {
        buf.extend_from_slice(&body[cursor..slot.at]);
        positions[which] = buf.len();
        buf.extend_from_slice(digits);
        cursor = slot.at + slot.len;
    }
    buf.extend_from_slice(&body[cursor..]);
    positions
}

/// Prefix a bare object with its `commit <len>\0` header.
pub fn frame(body: &[u8]) -> Vec<u8> {
    let mut out = format!("commit {}\0", body.len()).into_bytes();
    out.extend_from_slice(body);
    out
}

/// Git object id of a bare commit object.
pub fn object_id(body: &[u8]) -> String {
    let digest: [u8; DIGEST_LEN] = Sha1::digest(frame(body)).into();
    HexBuf::new().encode_str(&digest).to_string()
}

/// Object id the commit would have with its dates' seconds replaced.
pub fn object_id_with_dates(
    body: &[u8],
    author: &Timestamp,
    committer: &Timestamp,
) -> Result<String, BruteError> {
    let mut record = RecordBuffer::new(body)?;
    record.set_dates(author.seconds, committer.seconds);
    Ok(HexBuf::new().encode_str(&record.digest()).to_string())
}

/// The commit message: everything after the first blank line.
pub fn message_body(body: &[u8]) -> Result<&[u8], BruteError> {
    body.windows(2)
        .position(|w| w == b"\n\n")
        .map(|i| &body[i + 2..])
        .ok_or(BruteError::MissingMessage)
}

/// Case-insensitive hex prefix test.
pub fn has_prefix(hash: &str, prefix: &str) -> bool {
    let (hash, prefix) = (hash.as_bytes(), prefix.as_bytes());
    hash.len() >= prefix.len() && hash[..prefix.len()].eq_ignore_ascii_case(prefix)
}
