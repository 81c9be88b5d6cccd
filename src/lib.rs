//! A backend-agnostic formulation layer for linear and mixed-integer programs.
//!
//! `mipform` separates *formulating* an optimization model (declaring typed
//! variables over index sets, registering named linear constraints, setting an
//! objective) from *solving* it, which is delegated to a pluggable
//! [`Solver`] backend. A bundled backend over the pure-Rust `microlp` engine
//! is provided as [`MicrolpSolver`]; every solve produces an immutable
//! [`SolutionReport`].
//!
//! Encoders for six classic combinatorial problem families live in
//! [`problems`]: knapsack, cutting stock, capacitated facility location, bin
//! packing, TSP, and capacitated vehicle routing.
//!
//! ```
//! use mipform::prelude::*;
//!
//! let mut model = Model::new("toy");
//! let x = model.add(var().binary().name("x"))?;
//! let y = model.add(var().binary().name("y"))?;
//! model.add(cons().name("pick_one").le(1.0).coef(x, 1.0).coef(y, 1.0))?;
//! model.set_objective(Expr::sum([(x, 2.0), (y, 3.0)]), ObjSense::Maximize)?;
//!
//! let report = model.solve(&MicrolpSolver, &SolveOptions::default());
//! assert_eq!(report.status(), Status::Optimal);
//! assert!((report.objective_value().unwrap() - 3.0).abs() < 1e-6);
//! # Ok::<(), mipform::Error>(())
//! ```

pub mod backend;
pub mod builder;
mod constraint;
pub mod data;
mod error;
mod expr;
mod model;
pub mod problems;
mod render;
mod report;
mod solvers;
mod status;
mod variable;

pub use backend::{RawSolution, SolveOptions, Solver};
pub use builder::{cons, var, CanBeAddedToModel, ConsBuilder, VarBuilder};
pub use constraint::{Constraint, Relation};
pub use error::Error;
pub use expr::Expr;
pub use model::{Model, ObjSense};
pub use render::{render, render_to_string};
pub use report::{SolutionReport, VarAssignment};
pub use solvers::MicrolpSolver;
pub use status::Status;
pub use variable::{FamilyIndex, VarData, VarFamily, VarId, VarType, Variable};

/// Re-exports of the types and builder entry points most models need.
pub mod prelude {
    pub use crate::backend::{SolveOptions, Solver};
    pub use crate::builder::{cons, var};
    pub use crate::{
        Expr, MicrolpSolver, Model, ObjSense, Relation, SolutionReport, Status, VarType,
    };
}
