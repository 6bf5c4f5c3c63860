use quickcheck::quickcheck;
use std::collections::HashSet;
use commitbrute::{candidate_index, nth_candidate, Candidate, Explorer};

quickcheck! {
    fn index_roundtrip(idx: u64) -> bool {
        candidate_index(nth_candidate(idx)) == idx
    }
}

quickcheck! {
    fn candidate_roundtrip(commit_behind: u32, author_behind: u32) -> bool {
        let c = Candidate::new(commit_behind, author_behind);
        nth_candidate(candidate_index(c)) == c
    }
}

quickcheck! {
    fn index_lands_in_its_shell(idx: u64) -> bool {
        let m = u64::from(nth_candidate(idx).level());
        let lo = m * m;
        // Level m spans [m^2, (m+1)^2).
        idx >= lo && idx - lo <= 2 * m
    }
}

#[test]
fn shells_cover_square_boundaries_once() {
    const K: u32 = 64;
    let mut seen = HashSet::new();
    let mut it = Explorer::new();
    for m in 0..K {
        let shell: Vec<Candidate> = it.by_ref().take(2 * m as usize + 1).collect();
        assert!(shell.iter().all(|c| c.level() == m));
        for c in shell {
            assert!(seen.insert(c), "{c:?} repeated");
        }
    }
    for x in 0..K {
        for y in 0..K {
            assert!(seen.contains(&Candidate::new(x, y)));
        }
    }
}

#[test]
fn last_index_is_the_far_corner() {
    assert_eq!(nth_candidate(u64::MAX), Candidate::new(u32::MAX, u32::MAX));
    assert_eq!(candidate_index(Candidate::new(u32::MAX, u32::MAX)), u64::MAX);
}
