//! Versioned word lists driving the noise filter and buildability heuristic.
//!
//! Rules are data, not code: a [`RuleSet`] is loaded from a JSON document and
//! can be replaced without rebuilding. The built-in set mirrors
//! `rules/default.json` shipped with this crate.
//!
//! Every list is an ordered sequence of lowercase terms. Brand, news, sports,
//! entertainment and both buildability lists match as substrings; the generic
//! list matches whole keywords only.

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rule document version understood by this crate.
pub const RULES_VERSION: u32 = 1;

/// Keywords longer than this many characters are treated as headlines.
pub const DEFAULT_MAX_KEYWORD_CHARS: usize = 60;

const BRAND: &[&str] = &[
    "claude", "chatgpt", "gemini", "openai", "copilot", "midjourney", "perplexity", "grok",
    "openclaw", "notion", "figma", "github", "slack", "zapier", "xbox", "playstation",
    "nintendo", "steam", "cash app", "venmo", "paypal", "robinhood", "coinbase", "pennymac",
    "johnson and johnson", "tesla", "apple", "amazon", "google", "microsoft", "meta", "netflix",
];

const GENERIC: &[&str] = &[
    "artificial intelligence", "machine learning", "ai", "technology", "health tips",
    "fitness tips", "health", "fitness", "wellness", "productivity", "how to be productive",
    "personal finance", "make money online", "work from home", "5g", "internet", "beer", "holi",
    "oil prices today", "gasbuddy",
];

const NEWS: &[&str] = &[
    "shooting", "killed", "died", "death", "arrested", "trial", "crash", "fire", "earthquake",
    "hurricane", "flood", "tornado", "election", "vote", "president", "congress", "senate", "war",
    "attack", "bomb", "explosion", "hostage", "university", "college", "school",
];

const SPORTS: &[&str] = &[
    "vs", "score", "game", "match", "nfl", "nba", "nhl", "mlb", "fifa", "ufc", "boxing",
    "playoff", "championship", "tournament", "league", "roster", "draft", "trade", "coach",
];

const ENTERTAINMENT: &[&str] = &[
    "movie", "show", "episode", "trailer", "season", "premiere", "concert", "album", "song",
    "actress", "actor",
];

const HIGH_BUILDABILITY: &[&str] = &[
    "tool", "app", "tracker", "generator", "checker", "calculator", "finder", "manager",
    "planner", "dashboard", "monitor", "assistant", "bot", "extension", "plugin", "automation",
    "converter", "analyzer", "summarizer", "scheduler", "writer", "builder", "scanner",
];

const LOW_BUILDABILITY: &[&str] = &[
    "stock", "invest", "market", "fund", "insurance", "regulation", "policy", "research",
    "enterprise", "infrastructure", "hardware",
];

static BUILTIN: LazyLock<RuleSet> = LazyLock::new(RuleSet::builtin);

/// Errors raised while loading a rule document.
#[derive(Debug, Error)]
pub enum RuleSetError {
    /// The document was not valid JSON or did not match the rule shape.
    #[error("failed to parse rule set")]
    Parse {
        /// Source error from `serde_json`.
        #[source]
        source: serde_json::Error,
    },
    /// The document declares a version this crate does not understand.
    #[error("unsupported rule set version {found} (expected {RULES_VERSION})")]
    UnsupportedVersion {
        /// Version declared by the document.
        found: u32,
    },
    /// A list contained an empty or whitespace-only term.
    #[error("rule list '{list}' contains an empty term")]
    EmptyTerm {
        /// Name of the offending list.
        list: &'static str,
    },
    /// The headline length limit was zero.
    #[error("max_keyword_chars must be positive")]
    InvalidLengthLimit,
}

/// Serialised shape of a rule document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct RuleDocument {
    version: u32,
    #[serde(default = "default_max_keyword_chars")]
    max_keyword_chars: usize,
    brand: Vec<String>,
    generic: Vec<String>,
    news: Vec<String>,
    sports: Vec<String>,
    entertainment: Vec<String>,
    high_buildability: Vec<String>,
    low_buildability: Vec<String>,
}

const fn default_max_keyword_chars() -> usize {
    DEFAULT_MAX_KEYWORD_CHARS
}

/// Curated keyword lists used to classify trends.
///
/// # Examples
/// ```
/// use trendscout_core::RuleSet;
///
/// let rules = RuleSet::from_json_str(
///     r#"{"version":1,"brand":["acme"],"generic":[],"news":[],"sports":[],
///         "entertainment":[],"high_buildability":["tool"],"low_buildability":[]}"#,
/// )?;
/// assert!(!rules.is_buildable("Acme Widgets"));
/// # Ok::<(), trendscout_core::RuleSetError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RuleDocument", into = "RuleDocument")]
pub struct RuleSet {
    pub(crate) max_keyword_chars: usize,
    pub(crate) brand: Vec<String>,
    pub(crate) generic: Vec<String>,
    pub(crate) news: Vec<String>,
    pub(crate) sports: Vec<String>,
    pub(crate) entertainment: Vec<String>,
    pub(crate) high_buildability: Vec<String>,
    pub(crate) low_buildability: Vec<String>,
}

impl RuleSet {
    /// The rule set compiled into the crate.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            max_keyword_chars: DEFAULT_MAX_KEYWORD_CHARS,
            brand: owned(BRAND),
            generic: owned(GENERIC),
            news: owned(NEWS),
            sports: owned(SPORTS),
            entertainment: owned(ENTERTAINMENT),
            high_buildability: owned(HIGH_BUILDABILITY),
            low_buildability: owned(LOW_BUILDABILITY),
        }
    }

    /// Parse and validate a JSON rule document.
    ///
    /// Terms are trimmed and lower-cased; their order is preserved.
    ///
    /// # Errors
    /// Returns [`RuleSetError`] when the JSON is malformed, the version is not
    /// [`RULES_VERSION`], or a list contains an empty term.
    pub fn from_json_str(json: &str) -> Result<Self, RuleSetError> {
        serde_json::from_str::<RuleDocument>(json)
            .map_err(|source| RuleSetError::Parse { source })
            .and_then(Self::try_from)
    }

    /// Render the rule set as a pretty-printed JSON document.
    ///
    /// # Errors
    /// Propagates serialisation failures from `serde_json`.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Brand terms matched as substrings.
    #[must_use]
    pub fn brand_terms(&self) -> &[String] {
        &self.brand
    }

    /// Generic terms matched as whole keywords.
    #[must_use]
    pub fn generic_terms(&self) -> &[String] {
        &self.generic
    }

    /// Terms signalling a tool-shaped keyword.
    #[must_use]
    pub fn high_buildability_terms(&self) -> &[String] {
        &self.high_buildability
    }

    /// Terms signalling a hard-to-ship domain.
    #[must_use]
    pub fn low_buildability_terms(&self) -> &[String] {
        &self.low_buildability
    }

    /// Headline length limit in characters.
    #[must_use]
    pub const fn max_keyword_chars(&self) -> usize {
        self.max_keyword_chars
    }

    /// True when any brand term occurs in the lower-cased keyword.
    #[must_use]
    pub fn matches_brand(&self, lowered: &str) -> bool {
        contains_any(lowered, &self.brand)
    }

    /// True when the lower-cased keyword equals a generic term.
    #[must_use]
    pub fn matches_generic(&self, lowered: &str) -> bool {
        self.generic.iter().any(|term| term == lowered)
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        builtin_rules().clone()
    }
}

impl TryFrom<RuleDocument> for RuleSet {
    type Error = RuleSetError;

    fn try_from(document: RuleDocument) -> Result<Self, Self::Error> {
        if document.version != RULES_VERSION {
            return Err(RuleSetError::UnsupportedVersion {
                found: document.version,
            });
        }
        if document.max_keyword_chars == 0 {
            return Err(RuleSetError::InvalidLengthLimit);
        }
        Ok(Self {
            max_keyword_chars: document.max_keyword_chars,
            brand: normalise("brand", document.brand)?,
            generic: normalise("generic", document.generic)?,
            news: normalise("news", document.news)?,
            sports: normalise("sports", document.sports)?,
            entertainment: normalise("entertainment", document.entertainment)?,
            high_buildability: normalise("high_buildability", document.high_buildability)?,
            low_buildability: normalise("low_buildability", document.low_buildability)?,
        })
    }
}

impl From<RuleSet> for RuleDocument {
    fn from(rules: RuleSet) -> Self {
        Self {
            version: RULES_VERSION,
            max_keyword_chars: rules.max_keyword_chars,
            brand: rules.brand,
            generic: rules.generic,
            news: rules.news,
            sports: rules.sports,
            entertainment: rules.entertainment,
            high_buildability: rules.high_buildability,
            low_buildability: rules.low_buildability,
        }
    }
}

/// Shared reference to the built-in rule set.
#[must_use]
pub fn builtin_rules() -> &'static RuleSet {
    &BUILTIN
}

pub(crate) fn contains_any(haystack: &str, terms: &[String]) -> bool {
    terms.iter().any(|term| haystack.contains(term.as_str()))
}

fn owned(terms: &[&str]) -> Vec<String> {
    terms.iter().map(|&term| term.to_owned()).collect()
}

fn normalise(list: &'static str, terms: Vec<String>) -> Result<Vec<String>, RuleSetError> {
    terms
        .into_iter()
        .map(|term| {
            let cleaned = term.trim().to_lowercase();
            if cleaned.is_empty() {
                Err(RuleSetError::EmptyTerm { list })
            } else {
                Ok(cleaned)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const SHIPPED: &str = include_str!("../rules/default.json");

    #[rstest]
    fn shipped_document_matches_builtin() {
        let parsed = RuleSet::from_json_str(SHIPPED).expect("shipped rules parse");
        assert_eq!(parsed, RuleSet::builtin());
    }

    #[rstest]
    fn rendering_round_trips() {
        let rendered = RuleSet::builtin().to_json_pretty().expect("render rules");
        let parsed = RuleSet::from_json_str(&rendered).expect("re-parse rules");
        assert_eq!(parsed, RuleSet::builtin());
    }

    #[rstest]
    fn terms_are_normalised() {
        let rules = RuleSet::from_json_str(
            r#"{"version":1,"brand":["  Acme "],"generic":["AI"],"news":[],"sports":[],
                "entertainment":[],"high_buildability":[],"low_buildability":[]}"#,
        )
        .expect("parse rules");
        assert_eq!(rules.brand_terms(), ["acme"]);
        assert_eq!(rules.generic_terms(), ["ai"]);
        assert_eq!(rules.max_keyword_chars(), DEFAULT_MAX_KEYWORD_CHARS);
    }

    #[rstest]
    fn unknown_versions_are_rejected() {
        let err = RuleSet::from_json_str(
            r#"{"version":2,"brand":[],"generic":[],"news":[],"sports":[],
                "entertainment":[],"high_buildability":[],"low_buildability":[]}"#,
        )
        .expect_err("version 2 should be rejected");
        assert!(matches!(err, RuleSetError::UnsupportedVersion { found: 2 }));
    }

    #[rstest]
    fn empty_terms_are_rejected() {
        let err = RuleSet::from_json_str(
            r#"{"version":1,"brand":[],"generic":[],"news":[" "],"sports":[],
                "entertainment":[],"high_buildability":[],"low_buildability":[]}"#,
        )
        .expect_err("blank term should be rejected");
        assert!(matches!(err, RuleSetError::EmptyTerm { list: "news" }));
    }

    #[rstest]
    fn unknown_lists_are_rejected() {
        let err = RuleSet::from_json_str(
            r#"{"version":1,"brand":[],"generic":[],"news":[],"sports":[],"weather":[],
                "entertainment":[],"high_buildability":[],"low_buildability":[]}"#,
        )
        .expect_err("unknown list should be rejected");
        assert!(matches!(err, RuleSetError::Parse { .. }));
    }

    #[rstest]
    fn generic_terms_match_whole_keywords_only() {
        let rules = RuleSet::builtin();
        assert!(rules.matches_generic("ai"));
        assert!(!rules.matches_generic("ai invoice generator"));
    }
}
