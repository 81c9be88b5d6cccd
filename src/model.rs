use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

use log::debug;

use crate::backend::{SolveOptions, Solver};
use crate::builder::{CanBeAddedToModel, VarBuilder};
use crate::{
    Constraint, Error, Expr, Relation, SolutionReport, VarData, VarFamily, VarType, Variable,
};

/// Brands every model so variable handles cannot cross models undetected.
static NEXT_MODEL_ID: AtomicUsize = AtomicUsize::new(0);

/// Direction of optimization for the objective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjSense {
    /// Minimize the objective expression.
    Minimize,
    /// Maximize the objective expression.
    Maximize,
}

/// An optimization model: declared variables, named constraints, and one
/// objective, assembled independently of any solver backend.
///
/// Each instance owns its registries exclusively; distinct models share no
/// mutable state and may be built and solved concurrently on separate threads.
#[derive(Debug)]
pub struct Model {
    id: usize,
    name: String,
    vars: Vec<VarData>,
    conss: Vec<Constraint>,
    names: HashSet<String>,
    objective: Expr,
    obj_sense: ObjSense,
}

impl Default for Model {
    fn default() -> Self {
        Model::new("model")
    }
}

impl Model {
    /// Creates a new empty model.
    pub fn new(name: &str) -> Self {
        Model {
            id: NEXT_MODEL_ID.fetch_add(1, Ordering::Relaxed),
            name: name.to_string(),
            vars: Vec::new(),
            conss: Vec::new(),
            names: HashSet::new(),
            objective: Expr::new(),
            obj_sense: ObjSense::Minimize,
        }
    }

    /// The name of the model.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Registers a built item (variable or constraint) in the model.
    pub fn add<T: CanBeAddedToModel>(&mut self, item: T) -> Result<T::Return, Error> {
        item.add(self)
    }

    /// Declares a family of variables over an index set.
    ///
    /// One variable is created per index tuple of `dims`, row-major, with
    /// symbols `name[i]`, `name[i,j]`, ... The `template` supplies the domain
    /// and bounds; its own name, if any, is ignored in favor of `name`.
    pub fn add_vars(
        &mut self,
        name: &str,
        dims: &[usize],
        template: VarBuilder,
    ) -> Result<VarFamily, Error> {
        self.claim_name(name)?;

        let family = VarFamily {
            name: name.to_string(),
            dims: dims.to_vec(),
            model_id: self.id,
            first: self.vars.len(),
        };

        let count = family.len();
        for flat in 0..count {
            let symbol = format!("{}[{}]", name, format_index(flat, dims));
            self.add_var(template.lb, template.ub, symbol, template.var_type)?;
        }

        Ok(family)
    }

    pub(crate) fn add_var(
        &mut self,
        lb: f64,
        ub: f64,
        name: String,
        var_type: VarType,
    ) -> Result<Variable, Error> {
        self.claim_name(&name)?;

        let id = self.vars.len();
        self.vars.push(VarData {
            name,
            lb,
            ub,
            var_type,
        });
        Ok(Variable {
            model_id: self.id,
            id,
        })
    }

    pub(crate) fn add_cons(
        &mut self,
        terms: Vec<(Variable, f64)>,
        relation: Relation,
        rhs: f64,
        name: String,
    ) -> Result<(), Error> {
        for &(var, _) in &terms {
            self.check_owned(var, &name)?;
        }
        self.claim_name(&name)?;

        // Merge repeated variables; downstream engines reject duplicate terms.
        let mut merged: BTreeMap<usize, f64> = BTreeMap::new();
        for (var, coeff) in terms {
            *merged.entry(var.id).or_insert(0.0) += coeff;
        }
        let terms = merged
            .into_iter()
            .filter(|&(_, coeff)| coeff != 0.0)
            .map(|(id, coeff)| {
                (
                    Variable {
                        model_id: self.id,
                        id,
                    },
                    coeff,
                )
            })
            .collect();

        self.conss.push(Constraint {
            name,
            terms,
            relation,
            rhs,
        });
        Ok(())
    }

    /// Sets the objective, overwriting any previously set one (last write wins).
    pub fn set_objective(&mut self, expr: impl Into<Expr>, sense: ObjSense) -> Result<(), Error> {
        let expr = expr.into();
        for (var, _) in expr.terms() {
            self.check_owned(var, "objective")?;
        }
        self.objective = expr;
        self.obj_sense = sense;
        Ok(())
    }

    /// The current objective expression.
    pub fn objective(&self) -> &Expr {
        &self.objective
    }

    /// The direction of optimization.
    pub fn obj_sense(&self) -> ObjSense {
        self.obj_sense
    }

    /// Objective coefficients as a dense vector indexed by variable id.
    pub fn objective_coefficients(&self) -> Vec<f64> {
        let mut coeffs = vec![0.0; self.vars.len()];
        for (var, coeff) in self.objective.terms() {
            coeffs[var.id] = coeff;
        }
        coeffs
    }

    /// Number of declared variables.
    pub fn n_vars(&self) -> usize {
        self.vars.len()
    }

    /// Number of registered constraints.
    pub fn n_conss(&self) -> usize {
        self.conss.len()
    }

    /// Data of all declared variables, in declaration order.
    pub fn var_data(&self) -> &[VarData] {
        &self.vars
    }

    /// Handles of all declared variables, in declaration order.
    pub fn variables(&self) -> impl Iterator<Item = Variable> + '_ {
        (0..self.vars.len()).map(|id| Variable {
            model_id: self.id,
            id,
        })
    }

    /// All registered constraints, in registration order.
    pub fn conss(&self) -> &[Constraint] {
        &self.conss
    }

    /// Delegates the assembled model to a solver backend and normalizes the
    /// outcome into a [`SolutionReport`].
    ///
    /// Non-optimal terminal statuses are reported, never retried.
    pub fn solve(&self, solver: &dyn Solver, options: &SolveOptions) -> SolutionReport {
        debug!(
            "solving model '{}': {} variables, {} constraints",
            self.name,
            self.n_vars(),
            self.n_conss()
        );
        let raw = solver.solve(self, options);
        debug!("model '{}' finished with status {}", self.name, raw.status);
        SolutionReport::from_raw(self, raw)
    }

    fn claim_name(&mut self, name: &str) -> Result<(), Error> {
        if !self.names.insert(name.to_string()) {
            return Err(Error::DuplicateName(name.to_string()));
        }
        Ok(())
    }

    fn check_owned(&self, var: Variable, context: &str) -> Result<(), Error> {
        if var.model_id != self.id || var.id >= self.vars.len() {
            return Err(Error::UnknownVariable {
                context: context.to_string(),
                var: var.id,
            });
        }
        Ok(())
    }
}

fn format_index(flat: usize, dims: &[usize]) -> String {
    let mut components = vec![0usize; dims.len()];
    let mut rest = flat;
    for (axis, &dim) in dims.iter().enumerate().rev() {
        components[axis] = rest % dim;
        rest /= dim;
    }
    components
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(",")
}
