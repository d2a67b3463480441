//! File name sanitization and collision suffixes

/// Extension given to every output file
pub(crate) const EXTENSION: &str = "txt";

/// Make `raw` safe as a file stem
///
/// Spaces and path separators become `_`; colons and NUL bytes are removed.
pub fn sanitize_stem(raw: &str) -> String {
    raw.chars()
        .filter(|c| !matches!(c, ':' | '\0'))
        .map(|c| match c {
            ' ' | '/' | '\\' => '_',
            other => other,
        })
        .collect()
}

/// Candidate name for collision attempt `n`: `stem.txt`, `stem_1.txt`, ...
pub(crate) fn candidate(stem: &str, n: usize) -> String {
    if n == 0 {
        format!("{}.{}", stem, EXTENSION)
    } else {
        format!("{}_{}.{}", stem, n, EXTENSION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spaces_become_underscores() {
        assert_eq!(sanitize_stem("Topic_Side Effects"), "Topic_Side_Effects");
    }

    #[test]
    fn test_colons_are_removed() {
        assert_eq!(sanitize_stem("Topic_1: Scope"), "Topic_1_Scope");
    }

    #[test]
    fn test_path_separators_are_replaced() {
        assert_eq!(sanitize_stem("Topic_A/B\\C"), "Topic_A_B_C");
        assert_eq!(sanitize_stem("../etc/passwd"), ".._etc_passwd");
    }

    #[test]
    fn test_nul_bytes_are_removed() {
        assert_eq!(sanitize_stem("Topic_Bad\0Name"), "Topic_BadName");
    }

    #[test]
    fn test_candidates() {
        assert_eq!(candidate("Topic_A", 0), "Topic_A.txt");
        assert_eq!(candidate("Topic_A", 1), "Topic_A_1.txt");
        assert_eq!(candidate("Topic_A", 12), "Topic_A_12.txt");
    }
}
