//! Shared text assembly helpers

use rustc_hash::FxHashSet;

/// Drop exact duplicates from `items`, keeping the first occurrence of each.
///
/// The original tool collected per-row cells and per-cell tokens into a
/// uniqueness container, silently collapsing repeated content. The collapse
/// is intentional, so it lives here as a visible step instead of being a
/// side effect of the container choice.
pub fn dedup_preserving<I>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = FxHashSet::default();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

/// Collapse every run of whitespace to a single space and trim the ends.
pub fn normalize_spaces(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedup_keeps_first_occurrence() {
        let items = vec!["a".to_string(), "b".to_string(), "a".to_string()];
        assert_eq!(dedup_preserving(items), vec!["a", "b"]);
    }

    #[test]
    fn test_dedup_preserves_order() {
        let items = vec!["z".to_string(), "a".to_string(), "z".to_string(), "m".to_string()];
        assert_eq!(dedup_preserving(items), vec!["z", "a", "m"]);
    }

    #[test]
    fn test_normalize_spaces() {
        assert_eq!(normalize_spaces("  a   b\t c  "), "a b c");
        assert_eq!(normalize_spaces(""), "");
        assert_eq!(normalize_spaces("   "), "");
    }
}
