//! Side-effect-free oracle with a fixed feasibility threshold per radix.

use std::collections::BTreeMap;

use super::types::{FeasibilityResult, OracleError, SearchRequest};
use super::FeasibilityOracle;

/// Feasible exactly when the candidate terminal count is at or below the
/// threshold for the requested radix.
///
/// Router and channel counts are derived from the request so that records
/// are predictable: two terminals per router (rounded up) and
/// `routers * radix / 2` channels. Every request is recorded in `calls`.
#[derive(Debug, Clone, Default)]
pub struct ThresholdOracle {
    default_threshold: u64,
    thresholds: BTreeMap<u64, u64>,
    calls: Vec<SearchRequest>,
}

impl ThresholdOracle {
    /// Same threshold for every radix
    pub fn new(threshold: u64) -> Self {
        Self {
            default_threshold: threshold,
            ..Self::default()
        }
    }

    /// Override the threshold for one radix
    pub fn with_threshold(mut self, radix: u64, threshold: u64) -> Self {
        self.thresholds.insert(radix, threshold);
        self
    }

    pub fn threshold(&self, radix: u64) -> u64 {
        self.thresholds
            .get(&radix)
            .copied()
            .unwrap_or(self.default_threshold)
    }

    /// Every request seen so far, in order
    pub fn calls(&self) -> &[SearchRequest] {
        &self.calls
    }

    /// Number of requests made for one radix
    pub fn calls_for(&self, radix: u64) -> usize {
        self.calls.iter().filter(|c| c.radix == radix).count()
    }

    /// Router and channel counts reported for a feasible request
    pub fn configuration(radix: u64, terminals: u64) -> (f64, f64) {
        let routers = (terminals as f64 / 2.0).ceil();
        let channels = routers * radix as f64 / 2.0;
        (routers, channels)
    }
}

impl FeasibilityOracle for ThresholdOracle {
    fn evaluate(&mut self, request: &SearchRequest) -> Result<FeasibilityResult, OracleError> {
        self.calls.push(*request);

        if request.candidate_terminals > self.threshold(request.radix) {
            return Ok(FeasibilityResult::Infeasible);
        }

        let (routers, channels) = Self::configuration(request.radix, request.candidate_terminals);
        Ok(FeasibilityResult::Feasible { routers, channels })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_boundary() {
        let mut oracle = ThresholdOracle::new(12);
        assert!(oracle.evaluate(&SearchRequest::new(3, 12, 0.5)).unwrap().is_feasible());
        assert!(!oracle.evaluate(&SearchRequest::new(3, 13, 0.5)).unwrap().is_feasible());
        assert_eq!(oracle.calls().len(), 2);
    }

    #[test]
    fn test_per_radix_override() {
        let mut oracle = ThresholdOracle::new(10).with_threshold(4, 40);
        assert!(oracle.evaluate(&SearchRequest::new(4, 40, 0.5)).unwrap().is_feasible());
        assert!(!oracle.evaluate(&SearchRequest::new(5, 40, 0.5)).unwrap().is_feasible());
        assert_eq!(oracle.calls_for(4), 1);
        assert_eq!(oracle.calls_for(5), 1);
    }

    #[test]
    fn test_configuration_values() {
        let mut oracle = ThresholdOracle::new(100);
        let result = oracle.evaluate(&SearchRequest::new(6, 13, 0.5)).unwrap();
        assert_eq!(
            result,
            FeasibilityResult::Feasible {
                routers: 7.0,
                channels: 21.0
            }
        );
    }
}
