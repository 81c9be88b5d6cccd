use crate::builder::CanBeAddedToModel;
use crate::{Error, Model, Relation, Variable};

/// A builder for creating constraints.
#[derive(Debug, Clone)]
pub struct ConsBuilder<'a> {
    pub(crate) name: Option<&'a str>,
    pub(crate) coefs: Vec<(Variable, f64)>,
    pub(crate) relation: Relation,
    pub(crate) rhs: f64,
}

/// Creates a new default `ConsBuilder`.
pub fn cons<'a>() -> ConsBuilder<'a> {
    ConsBuilder::default()
}

impl Default for ConsBuilder<'_> {
    fn default() -> Self {
        ConsBuilder {
            name: None,
            coefs: Vec::new(),
            relation: Relation::Le,
            rhs: f64::INFINITY,
        }
    }
}

impl<'a> ConsBuilder<'a> {
    /// Creates a constraint of the form `expr <= val`.
    pub fn le(mut self, val: f64) -> Self {
        self.relation = Relation::Le;
        self.rhs = val;
        self
    }

    /// Creates a constraint of the form `expr >= val`.
    pub fn ge(mut self, val: f64) -> Self {
        self.relation = Relation::Ge;
        self.rhs = val;
        self
    }

    /// Creates a constraint of the form `expr == val`.
    pub fn eq(mut self, val: f64) -> Self {
        self.relation = Relation::Eq;
        self.rhs = val;
        self
    }

    /// Sets the name of the constraint.
    pub fn name(mut self, name: &'a str) -> Self {
        self.name = Some(name);
        self
    }

    /// Adds a coefficient to the constraint.
    pub fn coef(mut self, var: Variable, coef: f64) -> Self {
        self.coefs.push((var, coef));
        self
    }

    /// Adds multiple coefficients to the constraint.
    pub fn expr<I>(mut self, iter: I) -> Self
    where
        I: IntoIterator<Item = (Variable, f64)>,
    {
        self.coefs.extend(iter);
        self
    }
}

impl CanBeAddedToModel for ConsBuilder<'_> {
    type Return = ();

    fn add(self, model: &mut Model) -> Result<(), Error> {
        let name = self.name.map(|s| s.to_string()).unwrap_or_else(|| {
            let n_conss = model.n_conss();
            format!("cons{}", n_conss)
        });

        model.add_cons(self.coefs, self.relation, self.rhs, name)
    }
}
