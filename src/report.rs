use std::time::Duration;

use crate::backend::RawSolution;
use crate::{Model, Status, VarType, Variable};

/// One variable assignment in a solution report.
#[derive(Debug, Clone, PartialEq)]
pub struct VarAssignment {
    /// The symbol of the variable, e.g. `Travel[1,2]`.
    pub symbol: String,
    /// The value of the variable in the solution.
    pub value: f64,
    /// The domain kind of the variable, used by rendering thresholds.
    pub var_type: VarType,
}

/// Immutable summary of one solve attempt.
///
/// Produced once per solve and never mutated afterward. For any non-optimal
/// status every field besides [`status`](SolutionReport::status) is absent.
#[derive(Debug, Clone)]
pub struct SolutionReport {
    status: Status,
    objective_value: Option<f64>,
    assignments: Vec<VarAssignment>,
    runtime: Option<Duration>,
    iteration_count: Option<u64>,
}

impl SolutionReport {
    pub(crate) fn from_raw(model: &Model, raw: RawSolution) -> Self {
        if raw.status != Status::Optimal {
            return SolutionReport {
                status: raw.status,
                objective_value: None,
                assignments: Vec::new(),
                runtime: None,
                iteration_count: None,
            };
        }

        let assignments = model
            .var_data()
            .iter()
            .zip(&raw.values)
            .map(|(data, &value)| VarAssignment {
                symbol: data.name().to_string(),
                value,
                var_type: data.var_type(),
            })
            .collect();

        SolutionReport {
            status: raw.status,
            objective_value: raw.objective_value,
            assignments,
            runtime: raw.runtime,
            iteration_count: raw.iteration_count,
        }
    }

    /// Terminal status of the solve.
    pub fn status(&self) -> Status {
        self.status
    }

    /// Achieved objective value; absent unless optimal.
    pub fn objective_value(&self) -> Option<f64> {
        self.objective_value
    }

    /// All variable assignments in declaration order; empty unless optimal.
    pub fn assignments(&self) -> &[VarAssignment] {
        &self.assignments
    }

    /// Elapsed solve time; absent unless optimal and measured.
    pub fn runtime(&self) -> Option<Duration> {
        self.runtime
    }

    /// Backend iteration or node count; absent unless the backend exposes one.
    pub fn iteration_count(&self) -> Option<u64> {
        self.iteration_count
    }

    /// Value of a variable of the model this report was produced from.
    ///
    /// Returns `None` for non-optimal reports or foreign handles.
    pub fn value_of(&self, var: Variable) -> Option<f64> {
        self.assignments.get(var.id()).map(|a| a.value)
    }
}
