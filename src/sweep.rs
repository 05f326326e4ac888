//! Radix sweep driver.
//!
//! For every radix in the configured range, a binary search over terminal
//! counts finds the largest count the oracle still accepts. Radixes are
//! visited one at a time in ascending order and each search starts from
//! fresh bounds, so a record depends only on the calls made for its radix.

use std::ops::RangeInclusive;

use log::{debug, info};
use serde::Serialize;

use crate::config::SweepConfig;
use crate::oracle::{FeasibilityOracle, FeasibilityResult, OracleError, SearchRequest};
use crate::verify::spot_check;

/// Best configuration found for one radix
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RadixRecord {
    pub radix: u64,
    pub terminals: u64,
    pub routers: f64,
    pub channels: f64,
    pub terminals_per_router: f64,
    pub channels_per_terminal: f64,
}

impl RadixRecord {
    pub fn new(radix: u64, terminals: u64, routers: f64, channels: f64) -> Self {
        Self {
            radix,
            terminals,
            routers,
            channels,
            terminals_per_router: terminals as f64 / routers,
            channels_per_terminal: channels / terminals as f64,
        }
    }
}

/// Fatal sweep errors. None of them are retried.
#[derive(Debug, thiserror::Error)]
pub enum SweepError {
    #[error("Oracle failed at radix {radix} with {terminals} terminals: {source}")]
    Oracle {
        radix: u64,
        terminals: u64,
        #[source]
        source: OracleError,
    },

    #[error("Ceiling of {ceiling} terminals is feasible at radix {radix}; the search range is unsound")]
    CeilingReachable { radix: u64, ceiling: u64 },

    #[error("Ceiling {radix}^({dimensions}+1) overflows")]
    CeilingOverflow { radix: u64, dimensions: u32 },

    #[error("Empty search range at radix {radix}: low bound {low} is not below ceiling {ceiling}")]
    EmptySearchRange { radix: u64, low: u64, ceiling: u64 },

    #[error("Search at radix {radix} converged on {terminals} terminals, which is infeasible")]
    InfeasibleAtConvergence { radix: u64, terminals: u64 },

    #[error("Feasibility is not monotone at radix {radix}: {terminals} terminals is feasible but {probe} is not")]
    NonMonotone { radix: u64, terminals: u64, probe: u64 },
}

/// Probe the oracle for one terminal count at `radix`
pub(crate) fn probe<O: FeasibilityOracle>(
    oracle: &mut O,
    config: &SweepConfig,
    radix: u64,
    terminals: u64,
) -> Result<FeasibilityResult, SweepError> {
    oracle
        .evaluate(&SearchRequest::new(radix, terminals, config.min_bandwidth))
        .map_err(|source| SweepError::Oracle {
            radix,
            terminals,
            source,
        })
}

/// Find the largest feasible terminal count for a single radix.
///
/// `low` starts at the configured low bound and is never probed as a bound;
/// `high` starts at the ceiling, which must be infeasible. Throughout the
/// loop `low` is feasible and `high` is infeasible. The midpoint rounds
/// toward `low`, so the loop converges when `low == mid`, and that final
/// probe must come back feasible.
pub fn search_radix<O: FeasibilityOracle>(
    oracle: &mut O,
    config: &SweepConfig,
    radix: u64,
) -> Result<RadixRecord, SweepError> {
    let bounds = &config.bounds;
    let ceiling = bounds.ceiling(radix).ok_or(SweepError::CeilingOverflow {
        radix,
        dimensions: bounds.dimensions,
    })?;

    if ceiling <= bounds.low_bound {
        return Err(SweepError::EmptySearchRange {
            radix,
            low: bounds.low_bound,
            ceiling,
        });
    }

    if probe(oracle, config, radix, ceiling)?.is_feasible() {
        return Err(SweepError::CeilingReachable { radix, ceiling });
    }

    let mut low = bounds.low_bound;
    let mut high = ceiling;

    let (terminals, routers, channels) = loop {
        debug_assert!(low < high);
        let mid = low + (high - low) / 2;
        let result = probe(oracle, config, radix, mid)?;

        debug!(
            "low={} high={} mid={} solution={}",
            low,
            high,
            mid,
            result.is_feasible()
        );

        if low == mid {
            match result {
                FeasibilityResult::Feasible { routers, channels } => break (mid, routers, channels),
                FeasibilityResult::Infeasible => {
                    return Err(SweepError::InfeasibleAtConvergence {
                        radix,
                        terminals: mid,
                    })
                }
            }
        }

        if result.is_feasible() {
            low = mid;
        } else {
            high = mid;
        }
    };

    if config.verify_points > 0 {
        spot_check(oracle, config, radix, terminals)?;
    }

    Ok(RadixRecord::new(radix, terminals, routers, channels))
}

/// Lazy sweep over the configured radix range.
///
/// Yields one record per radix as soon as its search converges. After the
/// first error the iterator is exhausted.
pub struct Sweep<'a, O> {
    config: &'a SweepConfig,
    oracle: O,
    radixes: RangeInclusive<u64>,
    failed: bool,
}

impl<'a, O: FeasibilityOracle> Sweep<'a, O> {
    pub fn new(config: &'a SweepConfig, oracle: O) -> Self {
        Self {
            config,
            oracle,
            radixes: config.radixes(),
            failed: false,
        }
    }

    /// Give back the oracle, e.g. to inspect a synthetic oracle's call log
    pub fn into_oracle(self) -> O {
        self.oracle
    }
}

impl<O: FeasibilityOracle> Iterator for Sweep<'_, O> {
    type Item = Result<RadixRecord, SweepError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        let radix = self.radixes.next()?;
        info!("Working on radix {}", radix);

        let result = search_radix(&mut self.oracle, self.config, radix);
        if result.is_err() {
            self.failed = true;
        }
        Some(result)
    }
}

impl<O: FeasibilityOracle> std::iter::FusedIterator for Sweep<'_, O> {}

/// Start a sweep over `config`'s radix range using `oracle`
pub fn run<O: FeasibilityOracle>(config: &SweepConfig, oracle: O) -> Sweep<'_, O> {
    Sweep::new(config, oracle)
}
