//! Optional monotonicity spot-check.
//!
//! The binary search trusts that fewer terminals never turn a feasible
//! configuration infeasible. When `verify_points` is set, a few terminal
//! counts below the optimum are probed after convergence and any
//! infeasible one aborts the sweep.

use log::debug;

use crate::config::SweepConfig;
use crate::oracle::FeasibilityOracle;
use crate::sweep::{probe, SweepError};

/// Terminal counts probed below `terminals`, evenly spaced from the low
/// bound and without duplicates
pub fn spot_check_points(low_bound: u64, terminals: u64, count: u32) -> Vec<u64> {
    if count == 0 || terminals <= low_bound {
        return Vec::new();
    }

    let span = (terminals - low_bound) as u128;
    let mut points: Vec<u64> = (0..count as u128)
        .map(|i| low_bound + (span * i / count as u128) as u64)
        .collect();
    points.dedup();
    points
}

/// Probe the spot-check points for one converged radix
pub fn spot_check<O: FeasibilityOracle>(
    oracle: &mut O,
    config: &SweepConfig,
    radix: u64,
    terminals: u64,
) -> Result<(), SweepError> {
    for point in spot_check_points(config.bounds.low_bound, terminals, config.verify_points) {
        let feasible = probe(oracle, config, radix, point)?.is_feasible();
        debug!("spot-check radix={} terminals={} solution={}", radix, point, feasible);

        if !feasible {
            return Err(SweepError::NonMonotone {
                radix,
                terminals,
                probe: point,
            });
        }
    }
    Ok(())
}
