//! Noise filter deciding whether a keyword could be a build target.

use crate::rules::{RuleSet, builtin_rules, contains_any};

/// Reason a keyword was classified as noise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Rejection {
    /// Contains a brand name.
    Brand,
    /// Equals a term too broad to build against.
    Generic,
    /// Mentions a news event.
    News,
    /// Mentions a sporting fixture.
    Sports,
    /// Mentions film, television or music.
    Entertainment,
    /// Looks like a headline or quiz artefact rather than a search term.
    Headline,
    /// Looks like a first and last name.
    PersonName,
}

impl Rejection {
    /// Return the reason as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Brand => "brand",
            Self::Generic => "generic",
            Self::News => "news",
            Self::Sports => "sports",
            Self::Entertainment => "entertainment",
            Self::Headline => "headline",
            Self::PersonName => "person-name",
        }
    }
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl RuleSet {
    /// Classify `keyword`, returning the first rule that rejects it.
    ///
    /// Checks run in a fixed order: brand, generic, news, sports,
    /// entertainment, headline shape, then the two-word name shape.
    ///
    /// # Errors
    /// Returns the [`Rejection`] describing why the keyword is noise.
    pub fn classify(&self, keyword: &str) -> Result<(), Rejection> {
        let lowered = keyword.to_lowercase();
        if self.matches_brand(&lowered) {
            return Err(Rejection::Brand);
        }
        if self.matches_generic(&lowered) {
            return Err(Rejection::Generic);
        }
        if contains_any(&lowered, &self.news) {
            return Err(Rejection::News);
        }
        if contains_any(&lowered, &self.sports) {
            return Err(Rejection::Sports);
        }
        if contains_any(&lowered, &self.entertainment) {
            return Err(Rejection::Entertainment);
        }
        if self.looks_like_headline(&lowered) {
            return Err(Rejection::Headline);
        }
        if looks_like_name(&lowered) && !contains_any(&lowered, &self.high_buildability) {
            return Err(Rejection::PersonName);
        }
        Ok(())
    }

    /// Return `true` when `keyword` survives every noise rule.
    #[must_use]
    pub fn is_buildable(&self, keyword: &str) -> bool {
        self.classify(keyword).is_ok()
    }

    fn looks_like_headline(&self, lowered: &str) -> bool {
        lowered.chars().count() > self.max_keyword_chars
            || lowered.contains("__")
            || lowered.ends_with('.')
            || lowered.ends_with('?')
    }
}

/// Two whitespace-separated words, both purely alphabetic.
fn looks_like_name(lowered: &str) -> bool {
    let words: Vec<&str> = lowered.split_whitespace().collect();
    words.len() == 2
        && words
            .iter()
            .all(|word| word.chars().all(char::is_alphabetic))
}

/// Classify `keyword` against the built-in rules.
///
/// # Examples
/// ```
/// use trendscout_core::is_buildable;
///
/// assert!(is_buildable("invoice generator tool"));
/// assert!(!is_buildable("ai"));
/// assert!(!is_buildable("jane doe"));
/// ```
#[must_use]
pub fn is_buildable(keyword: &str) -> bool {
    builtin_rules().is_buildable(keyword)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case("ChatGPT prompt helper", Rejection::Brand)]
    #[case("metadata scrubber", Rejection::Brand)]
    #[case("AI", Rejection::Generic)]
    #[case("personal finance", Rejection::Generic)]
    #[case("school closings map", Rejection::News)]
    #[case("lakers vs celtics", Rejection::Sports)]
    #[case("season 2 release date", Rejection::Entertainment)]
    #[case("what is the best way to organise a very long list of errands quickly", Rejection::Headline)]
    #[case("the ______ principle", Rejection::Headline)]
    #[case("why are receipts faded?", Rejection::Headline)]
    #[case("receipts faded.", Rejection::Headline)]
    #[case("jane doe", Rejection::PersonName)]
    fn rejects_noise(#[case] keyword: &str, #[case] expected: Rejection) {
        assert_eq!(builtin_rules().classify(keyword), Err(expected));
        assert!(!is_buildable(keyword));
    }

    #[rstest]
    #[case("invoice generator tool")]
    #[case("budget tracker app")]
    #[case("receipt scanner")]
    #[case("ai prompt library for lawyers")]
    #[case("pdf to csv")]
    fn accepts_tool_shaped_keywords(#[case] keyword: &str) {
        assert_eq!(builtin_rules().classify(keyword), Ok(()));
    }

    #[rstest]
    fn every_builtin_brand_and_generic_term_is_rejected() {
        let rules = builtin_rules();
        for term in rules.brand_terms() {
            assert_eq!(rules.classify(term), Err(Rejection::Brand), "brand term {term:?}");
            assert!(!is_buildable(&term.to_uppercase()), "brand term {term:?}");
        }
        for term in rules.generic_terms() {
            assert!(
                matches!(rules.classify(term), Err(Rejection::Brand | Rejection::Generic)),
                "generic term {term:?}"
            );
            assert!(!is_buildable(&term.to_uppercase()), "generic term {term:?}");
        }
    }

    #[rstest]
    fn generic_terms_only_reject_exact_matches() {
        assert!(!is_buildable("ai"));
        assert!(is_buildable("ai receipt parser"));
    }

    #[rstest]
    fn two_word_names_are_kept_when_they_carry_a_build_signal() {
        assert!(is_buildable("invoice generator"));
        assert!(is_buildable("habit tracker"));
        assert!(!is_buildable("invoice paperwork"));
    }

    #[rstest]
    fn two_word_keywords_with_digits_are_not_names() {
        assert!(is_buildable("pomodoro 25"));
    }

    #[rstest]
    fn length_limit_counts_characters() {
        let at_limit = "é".repeat(60);
        let over_limit = "é".repeat(61);
        assert!(is_buildable(&at_limit));
        assert!(!is_buildable(&over_limit));
    }

    proptest! {
        #[test]
        fn overlong_keywords_never_survive(keyword in "[a-z ]{61,120}") {
            prop_assert!(!is_buildable(&keyword));
        }

        #[test]
        fn classification_ignores_case(keyword in "[a-zA-Z ]{1,40}") {
            let rules = builtin_rules();
            prop_assert_eq!(
                rules.classify(&keyword),
                rules.classify(&keyword.to_uppercase()),
            );
        }
    }
}
