//! # sfscale - Largest Slim Fly network per router radix
//!
//! For every radix in a range, this crate finds the largest number of
//! terminals a Slim Fly network can attach while still meeting a minimum
//! bisection bandwidth, and reports the router and channel counts of that
//! configuration.
//!
//! ## Overview
//!
//! Topology design is delegated to an external Slim Fly search program,
//! treated as a monotone feasibility oracle: if a terminal count is
//! feasible at a radix, every smaller count is too. A binary search over
//! terminal counts then finds the boundary with a logarithmic number of
//! oracle calls per radix.
//!
//! ## Architecture
//!
//! - `config`: Run parameters, search bounds and validation
//! - `config_loader`: YAML configuration loading
//! - `oracle`: The oracle trait, the process-backed evaluator and a
//!   synthetic threshold oracle
//! - `sweep`: Per-radix binary search and the lazy radix sweep
//! - `verify`: Optional monotonicity spot-check
//! - `report`: csv and JSON-lines record output
//! - `utils`: Evaluator path resolution
//!
//! ## Example Usage
//!
//! ```rust
//! use sfscale::config::SweepConfig;
//! use sfscale::oracle::ThresholdOracle;
//! use sfscale::sweep;
//!
//! let config = SweepConfig::new("slimflysearch", 3, 3, 0.5);
//! let records: Vec<_> = sweep::run(&config, ThresholdOracle::new(12))
//!     .collect::<Result<_, _>>()?;
//!
//! assert_eq!(records.len(), 1);
//! assert_eq!(records[0].terminals, 12);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Error Handling
//!
//! Library errors are `thiserror` enums (`ValidationError`, `OracleError`,
//! `SweepError`, `BinaryError`). Every one of them is fatal for a sweep;
//! records already yielded stay valid. The binary reports errors through
//! `color_eyre`.

pub mod config;
pub mod config_loader;
pub mod oracle;
pub mod report;
pub mod sweep;
pub mod utils;
pub mod verify;

pub use config::{SearchBounds, SweepConfig, ValidationError};
pub use oracle::{FeasibilityOracle, FeasibilityResult, SearchRequest};
pub use sweep::{RadixRecord, SweepError};
