use std::time::Instant;

use log::debug;
use microlp::{ComparisonOp, OptimizationDirection, Problem};

use crate::backend::{RawSolution, SolveOptions, Solver};
use crate::{Model, ObjSense, Relation, Status, VarType};

/// The bundled solver backend, built on the pure-Rust `microlp`
/// simplex + branch-and-bound engine.
///
/// Limitations of the engine surface as follows: integer bounds are clamped
/// to the `i32` range, time limits are not supported (a set limit is ignored
/// and logged), and no iteration count is exposed.
#[derive(Debug, Clone, Copy, Default)]
pub struct MicrolpSolver;

impl Solver for MicrolpSolver {
    fn solve(&self, model: &Model, options: &SolveOptions) -> RawSolution {
        if options.time_limit.is_some() {
            debug!("microlp does not support time limits; ignoring the requested limit");
        }

        let start = Instant::now();

        let direction = match model.obj_sense() {
            ObjSense::Minimize => OptimizationDirection::Minimize,
            ObjSense::Maximize => OptimizationDirection::Maximize,
        };
        let mut problem = Problem::new(direction);

        let obj_coeffs = model.objective_coefficients();
        let mut engine_vars = Vec::with_capacity(model.n_vars());
        for (data, &obj) in model.var_data().iter().zip(&obj_coeffs) {
            let engine_var = match data.var_type() {
                VarType::Binary => problem.add_binary_var(obj),
                VarType::Integer => {
                    problem.add_integer_var(obj, (clamp_int(data.lb()), clamp_int(data.ub())))
                }
                VarType::Continuous => problem.add_var(obj, (data.lb(), data.ub())),
            };
            engine_vars.push(engine_var);
        }

        for cons in model.conss() {
            let op = match cons.relation() {
                Relation::Le => ComparisonOp::Le,
                Relation::Ge => ComparisonOp::Ge,
                Relation::Eq => ComparisonOp::Eq,
            };
            let terms: Vec<_> = cons
                .terms()
                .iter()
                .map(|&(var, coeff)| (engine_vars[var.id()], coeff))
                .collect();
            problem.add_constraint(terms, op, cons.rhs());
        }

        match problem.solve() {
            Ok(solution) => {
                let values = engine_vars
                    .iter()
                    .map(|&engine_var| *solution.var_value(engine_var))
                    .collect();
                let objective_value = solution.objective() + model.objective().constant();
                debug!(
                    "microlp found an optimal solution with objective {}",
                    objective_value
                );
                RawSolution {
                    status: Status::Optimal,
                    values,
                    objective_value: Some(objective_value),
                    runtime: Some(start.elapsed()),
                    iteration_count: None,
                }
            }
            Err(err) => {
                let status = match err {
                    microlp::Error::Infeasible => Status::Infeasible,
                    microlp::Error::Unbounded => Status::Unbounded,
                    microlp::Error::InternalError(msg) => {
                        debug!("microlp internal error: {}", msg);
                        Status::Error
                    }
                };
                RawSolution::status_only(status)
            }
        }
    }
}

fn clamp_int(bound: f64) -> i32 {
    bound.clamp(i32::MIN as f64, i32::MAX as f64) as i32
}
