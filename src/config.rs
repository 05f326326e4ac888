use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Radixes above this are not supported by the Slim Fly search program.
pub const DEFAULT_RADIX_CAP: u64 = 51;

/// Smallest terminal count assumed feasible for every radix.
pub const DEFAULT_LOW_BOUND: u64 = 2;

/// Dimensions used for the unreachable ceiling `radix^(dimensions + 1)`.
pub const DEFAULT_DIMENSIONS: u32 = 2;

/// Output format of the sweep records
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Comma-separated values with a header line
    #[default]
    Csv,
    /// One JSON object per line
    Jsonl,
}

/// Constants steering the per-radix binary search
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct SearchBounds {
    /// Terminal count taken as feasible without probing
    #[serde(default = "default_low_bound")]
    pub low_bound: u64,
    /// Exponent base for the ceiling, which is `radix^(dimensions + 1)`
    #[serde(default = "default_dimensions")]
    pub dimensions: u32,
    /// Largest radix ever searched, regardless of the requested maximum
    #[serde(default = "default_radix_cap")]
    pub radix_cap: u64,
}

/// Run parameters for one radix sweep.
///
/// Built once from the command line or a YAML file and never mutated
/// afterwards. The driver only ever sees it by shared reference.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SweepConfig {
    pub evaluator: PathBuf,
    pub min_radix: u64,
    pub max_radix: u64,
    pub min_bandwidth: f64,
    #[serde(default)]
    pub verbose: bool,
    #[serde(default)]
    pub bounds: SearchBounds,
    /// Number of monotonicity spot-check probes per radix (0 disables)
    #[serde(default)]
    pub verify_points: u32,
    #[serde(default)]
    pub format: OutputFormat,
}

/// Configuration validation errors
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ValidationError {
    #[error("Invalid radix range: {0}")]
    InvalidRadixRange(String),
    #[error("Invalid bandwidth: {0}")]
    InvalidBandwidth(String),
    #[error("Invalid search bounds: {0}")]
    InvalidBounds(String),
    #[error("Invalid evaluator: {0}")]
    InvalidEvaluator(String),
}

impl SweepConfig {
    /// Build a configuration with default search bounds
    pub fn new(evaluator: impl Into<PathBuf>, min_radix: u64, max_radix: u64, min_bandwidth: f64) -> Self {
        Self {
            evaluator: evaluator.into(),
            min_radix,
            max_radix,
            min_bandwidth,
            verbose: false,
            bounds: SearchBounds::default(),
            verify_points: 0,
            format: OutputFormat::default(),
        }
    }

    /// Validate the configuration
    ///
    /// Runs before any oracle call so that a bad invocation produces no output.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.evaluator.as_os_str().is_empty() {
            return Err(ValidationError::InvalidEvaluator(
                "evaluator path cannot be empty".to_string(),
            ));
        }

        if self.min_radix < 1 {
            return Err(ValidationError::InvalidRadixRange(
                "minimum radix must be at least 1".to_string(),
            ));
        }

        if self.min_radix > self.max_radix {
            return Err(ValidationError::InvalidRadixRange(format!(
                "minimum radix {} is greater than maximum radix {}",
                self.min_radix, self.max_radix
            )));
        }

        if !self.min_bandwidth.is_finite() || self.min_bandwidth < 0.0 {
            return Err(ValidationError::InvalidBandwidth(format!(
                "minimum bandwidth must be a finite non-negative number, got {}",
                self.min_bandwidth
            )));
        }

        if self.bounds.low_bound < 1 {
            return Err(ValidationError::InvalidBounds(
                "low bound must be at least 1".to_string(),
            ));
        }

        if self.bounds.radix_cap < 1 {
            return Err(ValidationError::InvalidBounds(
                "radix cap must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    /// Largest radix the sweep will actually visit
    pub fn effective_max_radix(&self) -> u64 {
        self.max_radix.min(self.bounds.radix_cap)
    }

    /// Radixes visited by the sweep, in ascending order
    pub fn radixes(&self) -> std::ops::RangeInclusive<u64> {
        self.min_radix..=self.effective_max_radix()
    }
}

impl SearchBounds {
    /// Unreachable terminal count for `radix`, or `None` on overflow
    pub fn ceiling(&self, radix: u64) -> Option<u64> {
        radix.checked_pow(self.dimensions.checked_add(1)?)
    }
}

fn default_low_bound() -> u64 {
    DEFAULT_LOW_BOUND
}

fn default_dimensions() -> u32 {
    DEFAULT_DIMENSIONS
}

fn default_radix_cap() -> u64 {
    DEFAULT_RADIX_CAP
}

/// Default implementations
impl Default for SearchBounds {
    fn default() -> Self {
        Self {
            low_bound: DEFAULT_LOW_BOUND,
            dimensions: DEFAULT_DIMENSIONS,
            radix_cap: DEFAULT_RADIX_CAP,
        }
    }
}
