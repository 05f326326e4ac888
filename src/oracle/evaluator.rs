//! Oracle backed by the external Slim Fly search program.
//!
//! Every query spawns one process:
//!
//! ```text
//! slimflysearch --maxradix <R> --minterminals <T> --minbandwidth <B> --maxresults 1
//! ```
//!
//! The program prints a header line followed by at most one result line.
//! The result line is whitespace-delimited; the 6th field is the router
//! count and the 8th field is the channel count.

use std::path::{Path, PathBuf};
use std::process::Command;

use log::trace;

use super::types::{FeasibilityResult, OracleError, SearchRequest};
use super::FeasibilityOracle;

/// Zero-based index of the router count in a result line
const ROUTERS_FIELD: usize = 5;

/// Zero-based index of the channel count in a result line
const CHANNELS_FIELD: usize = 7;

/// Spawns the evaluator once per request
#[derive(Debug, Clone)]
pub struct EvaluatorOracle {
    program: PathBuf,
}

impl EvaluatorOracle {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl FeasibilityOracle for EvaluatorOracle {
    fn evaluate(&mut self, request: &SearchRequest) -> Result<FeasibilityResult, OracleError> {
        let program = self.program.display().to_string();
        let args = evaluator_args(request);
        trace!("Running {} {}", program, args.join(" "));

        let output = Command::new(&self.program)
            .args(&args)
            .output()
            .map_err(|source| OracleError::Spawn {
                program: program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(OracleError::Failed {
                program,
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_evaluator_output(&stdout)
    }
}

/// Build the evaluator argument vector for a request
pub fn evaluator_args(request: &SearchRequest) -> Vec<String> {
    vec![
        "--maxradix".to_string(),
        request.radix.to_string(),
        "--minterminals".to_string(),
        request.candidate_terminals.to_string(),
        "--minbandwidth".to_string(),
        format!("{:?}", request.min_bandwidth),
        "--maxresults".to_string(),
        "1".to_string(),
    ]
}

/// Interpret the evaluator's standard output.
///
/// The evaluator terminates every line, so a result is present only when
/// splitting on `\n` yields at least three pieces: header, result line and
/// the remainder after the last newline. Fewer pieces, or a blank second
/// line, means no configuration was found. A result line whose router or
/// channel field is absent or not a number is a format violation, not an
/// infeasible verdict.
pub fn parse_evaluator_output(stdout: &str) -> Result<FeasibilityResult, OracleError> {
    let pieces: Vec<&str> = stdout.split('\n').collect();
    if pieces.len() < 3 {
        return Ok(FeasibilityResult::Infeasible);
    }

    let line = pieces[1];
    if line.trim().is_empty() {
        return Ok(FeasibilityResult::Infeasible);
    }

    let fields: Vec<&str> = line.split_whitespace().collect();
    let routers = parse_field(&fields, ROUTERS_FIELD, "routers", line)?;
    let channels = parse_field(&fields, CHANNELS_FIELD, "channels", line)?;

    Ok(FeasibilityResult::Feasible { routers, channels })
}

fn parse_field(fields: &[&str], index: usize, name: &str, line: &str) -> Result<f64, OracleError> {
    let raw = fields.get(index).ok_or_else(|| OracleError::MalformedOutput {
        reason: format!("missing {} field (expected at least {} fields, found {})", name, index + 1, fields.len()),
        line: line.to_string(),
    })?;

    raw.parse::<f64>().map_err(|e| OracleError::MalformedOutput {
        reason: format!("{} field '{}' is not a number: {}", name, raw, e),
        line: line.to_string(),
    })
}
