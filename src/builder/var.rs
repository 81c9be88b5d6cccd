use std::ops::{Bound, RangeBounds};

use crate::builder::CanBeAddedToModel;
use crate::{Error, Model, VarType, Variable};

/// A builder for variables.
#[derive(Debug, Clone, Copy)]
pub struct VarBuilder<'a> {
    pub(crate) name: Option<&'a str>,
    pub(crate) lb: f64,
    pub(crate) ub: f64,
    pub(crate) var_type: VarType,
}

/// Creates a new default `VarBuilder` (continuous, bounds `[0, +inf)`).
pub fn var<'a>() -> VarBuilder<'a> {
    VarBuilder::default()
}

impl Default for VarBuilder<'_> {
    fn default() -> Self {
        VarBuilder {
            name: None,
            lb: 0.0,
            ub: f64::INFINITY,
            var_type: VarType::Continuous,
        }
    }
}

impl<'a> VarBuilder<'a> {
    /// Sets the variable to be a binary variable.
    pub fn binary(mut self) -> Self {
        self.lb = 0.0;
        self.ub = 1.0;
        self.var_type = VarType::Binary;
        self
    }

    /// Sets the variable to be an integer variable with the given bounds.
    pub fn integer(mut self, lb: isize, ub: isize) -> Self {
        self.lb = lb as f64;
        self.ub = ub as f64;
        self.var_type = VarType::Integer;
        self
    }

    /// Sets the variable to be an integer variable over a range, e.g. `int(0..)`
    /// for the non-negative integers.
    pub fn int(mut self, bounds: impl RangeBounds<isize>) -> Self {
        self.lb = match bounds.start_bound() {
            Bound::Included(&lb) => lb as f64,
            Bound::Excluded(&lb) => (lb + 1) as f64,
            Bound::Unbounded => f64::NEG_INFINITY,
        };
        self.ub = match bounds.end_bound() {
            Bound::Included(&ub) => ub as f64,
            Bound::Excluded(&ub) => (ub - 1) as f64,
            Bound::Unbounded => f64::INFINITY,
        };
        self.var_type = VarType::Integer;
        self
    }

    /// Sets the variable to be a continuous variable with the given bounds.
    pub fn continuous(mut self, lb: f64, ub: f64) -> Self {
        self.lb = lb;
        self.ub = ub;
        self.var_type = VarType::Continuous;
        self
    }

    /// Sets the name of the variable.
    pub fn name(mut self, name: &'a str) -> Self {
        self.name = Some(name);
        self
    }
}

impl CanBeAddedToModel for VarBuilder<'_> {
    type Return = Variable;

    fn add(self, model: &mut Model) -> Result<Variable, Error> {
        let name = self.name.map(|s| s.to_string()).unwrap_or_else(|| {
            let n_vars = model.n_vars();
            format!("x{}", n_vars)
        });

        model.add_var(self.lb, self.ub, name, self.var_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn var_builder_fields() {
        let builder = var().name("x").continuous(0.0, 1.0);

        assert_eq!(builder.name, Some("x"));
        assert_eq!(builder.lb, 0.0);
        assert_eq!(builder.ub, 1.0);
        assert_eq!(builder.var_type, VarType::Continuous);
    }

    #[test]
    fn int_range_bounds() {
        let builder = var().int(0..);
        assert_eq!(builder.lb, 0.0);
        assert_eq!(builder.ub, f64::INFINITY);
        assert_eq!(builder.var_type, VarType::Integer);

        let builder = var().int(1..=5);
        assert_eq!(builder.lb, 1.0);
        assert_eq!(builder.ub, 5.0);
    }

    #[test]
    fn var_builder_add() {
        let mut model = Model::default();
        let x = model.add(var().name("x").binary()).unwrap();

        assert_eq!(model.n_vars(), 1);
        assert_eq!(model.var_data()[x.id()].name(), "x");
        assert_eq!(model.var_data()[x.id()].var_type(), VarType::Binary);
    }

    #[test]
    fn unnamed_vars_get_fallback_names() {
        let mut model = Model::default();
        model.add(var()).unwrap();
        let x1 = model.add(var()).unwrap();

        assert_eq!(model.var_data()[x1.id()].name(), "x1");
    }
}
