//! Request and verdict types exchanged with feasibility oracles.

use std::fmt;

/// One oracle query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchRequest {
    /// Upper bound on router radix
    pub radix: u64,
    /// Lower bound on attached terminals
    pub candidate_terminals: u64,
    /// Minimum bisection bandwidth per terminal
    pub min_bandwidth: f64,
}

impl SearchRequest {
    pub fn new(radix: u64, candidate_terminals: u64, min_bandwidth: f64) -> Self {
        Self {
            radix,
            candidate_terminals,
            min_bandwidth,
        }
    }
}

/// Verdict for a single request
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FeasibilityResult {
    /// No configuration satisfies the request
    Infeasible,
    /// Best configuration found for the request
    Feasible { routers: f64, channels: f64 },
}

impl FeasibilityResult {
    /// Returns true if a configuration was found
    pub fn is_feasible(&self) -> bool {
        matches!(self, Self::Feasible { .. })
    }
}

impl fmt::Display for FeasibilityResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeasibilityResult::Infeasible => write!(f, "infeasible"),
            FeasibilityResult::Feasible { routers, channels } => {
                write!(f, "feasible (routers={}, channels={})", routers, channels)
            }
        }
    }
}

/// Errors raised while querying an oracle.
///
/// All of these are fatal for a sweep. An evaluator that prints no result
/// line is not an error; it is reported as `FeasibilityResult::Infeasible`.
#[derive(Debug, thiserror::Error)]
pub enum OracleError {
    #[error("Failed to start evaluator '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Evaluator '{program}' exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: String,
        stderr: String,
    },

    #[error("Malformed evaluator output: {reason} (line: {line:?})")]
    MalformedOutput { reason: String, line: String },
}
