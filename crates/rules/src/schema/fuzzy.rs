//! Levenshtein-based "did you mean" suggestions for unknown rule names.

/// Closest candidate by case-insensitive edit distance, ties going to the earlier
/// candidate. None when even the best one differs in more than half its characters.
pub(crate) fn fuzzy_match<'a>(input: &str, candidates: &[&'a str]) -> Option<&'a str> {
    let needle = input.to_lowercase();
    let (name, distance) = candidates
        .iter()
        .map(|&name| (name, levenshtein(&needle, &name.to_lowercase())))
        .min_by_key(|&(_, distance)| distance)?;
    (distance <= input.len().max(name.len()) / 2).then_some(name)
}

/// Levenshtein edit distance between two strings.
pub(crate) fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let n = b.len();

    let mut prev = (0..=n).collect::<Vec<_>>();
    let mut curr = vec![0; n + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

#[cfg(test)]
mod tests {
    use super::*;

    const RULE_NAMES: &[&str] = &["required", "integer", "dateBefore", "dateAfter"];

    #[test]
    fn levenshtein_basic() {
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("abc", "abc"), 0);
    }

    #[test]
    fn fuzzy_match_finds_close() {
        assert_eq!(fuzzy_match("datebefore", RULE_NAMES), Some("dateBefore"));
        assert_eq!(fuzzy_match("integr", RULE_NAMES), Some("integer"));
        assert_eq!(fuzzy_match("dateAftr", RULE_NAMES), Some("dateAfter"));
    }

    #[test]
    fn fuzzy_match_rejects_distant() {
        assert_eq!(fuzzy_match("zzzzzzzzzzzzz", RULE_NAMES), None);
        assert_eq!(fuzzy_match("anything", &[]), None);
    }
}
