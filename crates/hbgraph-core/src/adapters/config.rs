//! Analysis Configuration
//!
//! Pure data read by [`CausalAnalyzer`](super::CausalAnalyzer). Every field
//! has a default, so a JSON file only needs the keys it overrides:
//!
//! ```json
//! { "parallel": true, "max_events": 5000, "duplicate_clock_policy": "reject" }
//! ```

use crate::domain::safety::CheckMode;
use crate::error::{ConfigError, ExportError};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Duplicate Clock Policy
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Treatment of events on different processes with identical clocks
///
/// A correct trace source never produces them; the comparison alone treats
/// them as concurrent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateClockPolicy {
    /// Log a warning and build the graph with no edge between them
    #[default]
    Concurrent,
    /// Fail the analysis with [`TraceError::DuplicateClock`](crate::error::TraceError::DuplicateClock)
    Reject,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Analysis Configuration
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Knobs for one analysis run
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Build rows and check triggers on the rayon pool
    ///
    /// Results are identical to the sequential path.
    pub parallel: bool,

    /// See [`DuplicateClockPolicy`]
    pub duplicate_clock_policy: DuplicateClockPolicy,

    /// Fail-fast or exhaustive safety checking
    pub check_mode: CheckMode,

    /// Reject traces longer than this
    ///
    /// Construction is quadratic in the trace length; `None` means no limit.
    pub max_events: Option<usize>,
}

impl AnalysisConfig {
    /// Reject configurations that can never admit a trace
    ///
    /// # Errors
    ///
    /// [`ConfigError::ZeroEventBudget`] if `max_events` is `Some(0)`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_events == Some(0) {
            return Err(ConfigError::ZeroEventBudget);
        }
        Ok(())
    }

    /// Load a configuration from a JSON file
    ///
    /// Missing keys take their defaults. The result is not validated.
    ///
    /// # Errors
    ///
    /// [`ExportError`] if the file cannot be read or parsed.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ExportError> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }
}
