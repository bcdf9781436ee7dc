//! Seed phrases sent to the related-queries endpoint.
//!
//! Seeds are phrased as frictions rather than category names: pain-point
//! phrasing surfaces rising queries from people with a problem, while
//! category phrasing surfaces informational queries with no product behind
//! them.

use trendscout_core::Category;

const PRODUCTIVITY: &[&str] = &[
    "too many browser tabs",
    "can't keep track of tasks",
    "overwhelmed at work",
    "project falling through cracks",
];

const AI_TOOLS: &[&str] = &[
    "AI workflow automation",
    "AI prompt tool",
    "AI data extraction",
    "LLM API wrapper",
];

const DEVELOPER_TOOLS: &[&str] = &[
    "API keeps breaking",
    "command line tool",
    "local dev environment setup",
    "developer productivity tool",
];

const FINANCE: &[&str] = &[
    "personal finance app",
    "budgeting spreadsheet not working",
    "track spending automatically",
    "fintech tool",
];

const HEALTH: &[&str] = &[
    "sleep tracker app",
    "waterproof fitness tracker",
    "mental health check in app",
    "nutrition logging app",
];

const CREATOR_TOOLS: &[&str] = &[
    "repurpose content automatically",
    "newsletter tool",
    "short form video scheduler",
    "social media content tool",
];

/// Seed phrases for `category`.
#[must_use]
pub const fn category_seeds(category: Category) -> &'static [&'static str] {
    match category {
        Category::Productivity => PRODUCTIVITY,
        Category::AiTools => AI_TOOLS,
        Category::DeveloperTools => DEVELOPER_TOOLS,
        Category::Finance => FINANCE,
        Category::Health => HEALTH,
        Category::CreatorTools => CREATOR_TOOLS,
    }
}
