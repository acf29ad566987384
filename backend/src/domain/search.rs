//! Predicate helpers for the catalogue's derived queries.
//!
//! Keyword searches take two keywords and match a row when either keyword
//! occurs, case-insensitively, in any of the searched fields. A blank keyword
//! is not a wildcard: if either keyword is blank the search matches nothing.

/// A pair of non-blank, trimmed search keywords.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordPair {
    first: String,
    second: String,
}

impl KeywordPair {
    /// Build a pair, returning `None` when either keyword is blank.
    ///
    /// # Examples
    /// ```
    /// use course_catalogue::domain::KeywordPair;
    ///
    /// assert!(KeywordPair::parse("Java", "Spring").is_some());
    /// assert!(KeywordPair::parse("", "Spring").is_none());
    /// assert!(KeywordPair::parse("Java", "  ").is_none());
    /// ```
    #[must_use]
    pub fn parse(first: &str, second: &str) -> Option<Self> {
        let first = first.trim();
        let second = second.trim();
        if first.is_empty() || second.is_empty() {
            return None;
        }
        Some(Self {
            first: first.to_owned(),
            second: second.to_owned(),
        })
    }

    /// First keyword, trimmed.
    #[must_use]
    pub fn first_keyword(&self) -> &str {
        &self.first
    }

    /// Second keyword, trimmed.
    #[must_use]
    pub fn second_keyword(&self) -> &str {
        &self.second
    }

    /// Return true when either keyword occurs in any of `fields`.
    #[must_use]
    pub fn matches_any(&self, fields: &[Option<&str>]) -> bool {
        fields.iter().flatten().any(|field| {
            contains_ignore_case(field, &self.first) || contains_ignore_case(field, &self.second)
        })
    }
}

/// Case-insensitive substring test.
#[must_use]
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Return true when any tag contains `needle`, ignoring case.
///
/// Blank needles match nothing.
#[must_use]
pub fn tags_contain(tags: &[String], needle: &str) -> bool {
    let needle = needle.trim();
    if needle.is_empty() {
        return false;
    }
    tags.iter().any(|tag| contains_ignore_case(tag, needle))
}

/// Escape `%`, `_` and `\` so user input matches literally inside a
/// `LIKE`/`ILIKE` pattern using `\` as the escape character.
#[must_use]
pub fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// Wrap an escaped term in `%` wildcards for substring matching.
#[must_use]
pub fn like_contains_pattern(raw: &str) -> String {
    format!("%{}%", escape_like(raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "Spring")]
    #[case("Java", "")]
    #[case(" ", " ")]
    fn blank_keywords_yield_no_pair(#[case] first: &str, #[case] second: &str) {
        assert!(KeywordPair::parse(first, second).is_none());
    }

    #[rstest]
    fn surrounding_whitespace_is_trimmed() {
        let pair = KeywordPair::parse(" Java ", "\tSpring Boot\n").expect("non-blank keywords");
        assert_eq!(pair.first_keyword(), "Java");
        assert_eq!(pair.second_keyword(), "Spring Boot");
        assert!(pair.matches_any(&[Some("java basics")]));
        assert!(!pair.matches_any(&[Some("SpringBoot"), Some("Python")]));
    }

    #[rstest]
    fn either_keyword_in_either_field_matches() {
        let pair = KeywordPair::parse("java", "SPRING").expect("non-blank keywords");
        assert!(pair.matches_any(&[Some("Java Basics"), None]));
        assert!(pair.matches_any(&[Some("Intro"), Some("all about spring boot")]));
        assert!(!pair.matches_any(&[Some("Python"), Some("Django")]));
        assert!(!pair.matches_any(&[None, None]));
    }

    #[rstest]
    fn tag_containment_ignores_case() {
        let tags = vec!["Java".to_owned(), "Spring".to_owned()];
        assert!(tags_contain(&tags, "spring"));
        assert!(tags_contain(&tags, "PRI"));
        assert!(!tags_contain(&tags, "kotlin"));
        assert!(!tags_contain(&tags, "  "));
    }

    #[rstest]
    #[case("50%", "%50\\%%")]
    #[case("snake_case", "%snake\\_case%")]
    #[case("back\\slash", "%back\\\\slash%")]
    #[case("plain", "%plain%")]
    fn like_patterns_escape_metacharacters(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(like_contains_pattern(raw), expected);
    }
}
