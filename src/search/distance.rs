//! Edit-Distance Matcher
//!
//! Levenshtein distance over Unicode scalar values. Inputs are short tokens
//! (entity names, single words), so the plain O(n×m) table is used, kept as
//! two rolling rows.

/// Minimum number of single-character insertions, deletions and
/// substitutions needed to turn `a` into `b`
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    if a_chars.is_empty() {
        return b_chars.len();
    }
    if b_chars.is_empty() {
        return a_chars.len();
    }

    let mut prev: Vec<usize> = (0..=b_chars.len()).collect();
    let mut curr = vec![0usize; b_chars.len() + 1];

    for (i, ca) in a_chars.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b_chars.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_chars.len()]
}

/// Distance between `a` and `b` when it does not exceed `max`
pub fn within(a: &str, b: &str, max: usize) -> Option<usize> {
    // The length difference is a lower bound on the distance
    let (la, lb) = (a.chars().count(), b.chars().count());
    if la.abs_diff(lb) > max {
        return None;
    }

    let distance = levenshtein(a, b);
    (distance <= max).then_some(distance)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity() {
        assert_eq!(levenshtein("gandalf", "gandalf"), 0);
        assert_eq!(levenshtein("", ""), 0);
    }

    #[test]
    fn test_empty_side() {
        assert_eq!(levenshtein("", "elf"), 3);
        assert_eq!(levenshtein("ranger", ""), 6);
    }

    #[test]
    fn test_classic_pairs() {
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("flaw", "lawn"), 2);
        assert_eq!(levenshtein("gandlf", "gandalf"), 1);
        assert_eq!(levenshtein("elf", "dwarf"), 4);
    }

    #[test]
    fn test_counts_chars_not_bytes() {
        assert_eq!(levenshtein("müller", "muller"), 1);
        assert_eq!(levenshtein("дракон", "драконы"), 1);
    }

    #[test]
    fn test_symmetric() {
        assert_eq!(levenshtein("tavern", "taverns"), levenshtein("taverns", "tavern"));
        assert_eq!(levenshtein("abc", "yabd"), levenshtein("yabd", "abc"));
    }

    #[test]
    fn test_within_boundary() {
        assert_eq!(within("gandlf", "gandalf", 1), Some(1));
        assert_eq!(within("gandlf", "gandalf", 0), None);
        // Length difference alone rules this out
        assert_eq!(within("elf", "dwarf", 1), None);
        assert_eq!(within("elf", "dwarf", 3), None);
        assert_eq!(within("elf", "dwarf", 4), Some(4));
    }
}
