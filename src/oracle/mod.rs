//! Feasibility oracles.
//!
//! The sweep driver never designs topologies itself. It asks an oracle
//! whether a (radix, terminal count, bandwidth floor) combination admits a
//! Slim Fly, and how many routers and channels the best one needs.
//!
//! - `evaluator`: spawns the external Slim Fly search program
//! - `synthetic`: threshold oracle with no side effects, used by tests

pub mod evaluator;
pub mod synthetic;
pub mod types;

pub use evaluator::{evaluator_args, parse_evaluator_output, EvaluatorOracle};
pub use synthetic::ThresholdOracle;
pub use types::{FeasibilityResult, OracleError, SearchRequest};

/// A monotone feasibility oracle.
///
/// Implementations must answer each request independently. The driver
/// assumes that feasibility only ever improves as the terminal count drops.
pub trait FeasibilityOracle {
    fn evaluate(&mut self, request: &SearchRequest) -> Result<FeasibilityResult, OracleError>;
}

impl<O: FeasibilityOracle + ?Sized> FeasibilityOracle for &mut O {
    fn evaluate(&mut self, request: &SearchRequest) -> Result<FeasibilityResult, OracleError> {
        (**self).evaluate(request)
    }
}
