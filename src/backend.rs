use std::time::Duration;

use crate::{Model, Status};

/// Options forwarded to a solver backend.
#[derive(Debug, Clone, Default)]
pub struct SolveOptions {
    /// Wall-clock limit for the solve. Backends without timeout support may
    /// ignore it; they log that they do.
    pub time_limit: Option<Duration>,
}

impl SolveOptions {
    /// Options with a wall-clock limit.
    pub fn with_time_limit(time_limit: Duration) -> Self {
        SolveOptions {
            time_limit: Some(time_limit),
        }
    }
}

/// Raw outcome of a backend solve, before normalization into a
/// [`SolutionReport`](crate::SolutionReport).
#[derive(Debug, Clone)]
pub struct RawSolution {
    /// Terminal status of the solve.
    pub status: Status,
    /// Value of every declared variable, indexed by variable id. Empty unless
    /// the status is [`Status::Optimal`].
    pub values: Vec<f64>,
    /// Achieved objective value, if optimal.
    pub objective_value: Option<f64>,
    /// Elapsed solve time, if the backend measured it.
    pub runtime: Option<Duration>,
    /// Simplex-iteration or branch-and-bound-node count, if the backend
    /// exposes one.
    pub iteration_count: Option<u64>,
}

impl RawSolution {
    /// A terminal outcome carrying nothing but its status.
    pub fn status_only(status: Status) -> Self {
        RawSolution {
            status,
            values: Vec::new(),
            objective_value: None,
            runtime: None,
            iteration_count: None,
        }
    }
}

/// Contract fulfilled by a pluggable solving engine.
///
/// Given a fully assembled model, a backend produces a terminal status and,
/// when optimal, a value for every declared variable along with the achieved
/// objective. Backends never panic on infeasible or unbounded models; those
/// are ordinary statuses.
pub trait Solver {
    /// Solves the model, blocking until a terminal status is reached.
    fn solve(&self, model: &Model, options: &SolveOptions) -> RawSolution;
}
