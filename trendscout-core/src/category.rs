//! Categories tracked by the trend pipeline.
//!
//! The enum offers compile-time safety for category lookups and fixes the
//! set of categories a run may process.
//!
//! # Examples
//! ```
//! use trendscout_core::Category;
//!
//! assert_eq!(Category::AiTools.as_str(), "ai-tools");
//! assert_eq!(Category::Finance.to_string(), "finance");
//! ```

use serde::{Deserialize, Serialize};

/// A tracked trend category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    /// Task, tab and workload management.
    Productivity,
    /// AI workflow and prompt tooling.
    AiTools,
    /// Tooling aimed at software developers.
    DeveloperTools,
    /// Budgeting and spending.
    Finance,
    /// Sleep, fitness and nutrition tracking.
    Health,
    /// Content repurposing and scheduling.
    CreatorTools,
}

impl Category {
    /// Every tracked category in processing order.
    pub const ALL: [Self; 6] = [
        Self::Productivity,
        Self::AiTools,
        Self::DeveloperTools,
        Self::Finance,
        Self::Health,
        Self::CreatorTools,
    ];

    /// Return the category as its kebab-case identifier.
    ///
    /// # Examples
    /// ```
    /// use trendscout_core::Category;
    ///
    /// assert_eq!(Category::DeveloperTools.as_str(), "developer-tools");
    /// ```
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Productivity => "productivity",
            Self::AiTools => "ai-tools",
            Self::DeveloperTools => "developer-tools",
            Self::Finance => "finance",
            Self::Health => "health",
            Self::CreatorTools => "creator-tools",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == wanted)
            .ok_or_else(|| {
                let valid: Vec<&str> = Self::ALL.iter().map(|c| c.as_str()).collect();
                format!("unknown category '{s}' (valid: {})", valid.join(", "))
            })
    }
}
