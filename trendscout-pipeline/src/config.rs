//! Run-level pipeline settings.

use std::time::Duration;

use trendscout_core::ScoringRegime;

use crate::PipelineError;

/// Trends kept per category after scoring.
pub const DEFAULT_TOP_N: usize = 15;
/// Wall-clock budget for one category.
pub const DEFAULT_CATEGORY_TIMEOUT: Duration = Duration::from_secs(90);

/// Settings shared by every category of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Regime the run scores with; records of the other shape are dropped.
    pub regime: ScoringRegime,
    /// Trends kept per category, highest score first.
    pub top_n: usize,
    /// Re-score kept metadata trends with interest series.
    pub enrich: bool,
    /// Hard budget for one category, enforced by aborting its unit.
    pub category_timeout: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            regime: ScoringRegime::Metadata,
            top_n: DEFAULT_TOP_N,
            enrich: true,
            category_timeout: DEFAULT_CATEGORY_TIMEOUT,
        }
    }
}

impl PipelineConfig {
    /// Set the scoring regime.
    #[must_use]
    pub const fn with_regime(mut self, regime: ScoringRegime) -> Self {
        self.regime = regime;
        self
    }

    /// Set the number of trends kept per category.
    #[must_use]
    pub const fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    /// Enable or disable enrichment.
    #[must_use]
    pub const fn with_enrichment(mut self, enrich: bool) -> Self {
        self.enrich = enrich;
        self
    }

    /// Set the per-category budget.
    #[must_use]
    pub const fn with_category_timeout(mut self, timeout: Duration) -> Self {
        self.category_timeout = timeout;
        self
    }

    /// Whether kept trends are re-scored with interest series.
    ///
    /// Series records already carry their own series, so only metadata runs
    /// enrich.
    #[must_use]
    pub const fn enriches(&self) -> bool {
        self.enrich && matches!(self.regime, ScoringRegime::Metadata)
    }

    /// Validate the settings and return a copy.
    ///
    /// # Errors
    /// Returns [`PipelineError::InvalidTopN`] or
    /// [`PipelineError::ZeroTimeout`].
    pub const fn validate(self) -> Result<Self, PipelineError> {
        if self.top_n == 0 {
            return Err(PipelineError::InvalidTopN);
        }
        if self.category_timeout.is_zero() {
            return Err(PipelineError::ZeroTimeout);
        }
        Ok(self)
    }
}
