//! Text matching shared by the ledger search filters

/// Case-insensitive substring match. An empty or missing needle matches
/// everything, so unset search boxes never filter.
pub fn text_matches(haystack: &str, needle: Option<&str>) -> bool {
    match needle.map(str::trim) {
        None | Some("") => true,
        Some(needle) => haystack.to_lowercase().contains(&needle.to_lowercase()),
    }
}

/// Match a needle against any of several fields (e.g. cargo owner OR pickup party).
pub fn any_text_matches(haystacks: &[&str], needle: Option<&str>) -> bool {
    match needle.map(str::trim) {
        None | Some("") => true,
        Some(_) => haystacks.iter().any(|h| text_matches(h, needle)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_needle_matches() {
        assert!(text_matches("anything", None));
        assert!(text_matches("anything", Some("   ")));
    }

    #[test]
    fn match_ignores_case() {
        assert!(text_matches("Fengtu Ltd", Some("fengTU")));
        assert!(!text_matches("Fengtu Ltd", Some("jianfa")));
    }

    #[test]
    fn any_match_checks_every_field() {
        let parties = ["Jianfa Paper", "Fengtu Ltd"];
        assert!(any_text_matches(&parties, Some("fengtu")));
        assert!(!any_text_matches(&parties, Some("oji")));
        assert!(any_text_matches(&[], None));
    }
}
