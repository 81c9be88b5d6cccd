use std::collections::HashMap;
use std::ops::{Add, Mul, Neg, Sub};

use crate::Variable;

/// A linear expression over model variables plus a constant term.
#[derive(Debug, Clone, Default)]
pub struct Expr {
    pub(crate) coeffs: HashMap<Variable, f64>,
    pub(crate) constant: f64,
}

impl Expr {
    /// The empty expression.
    pub fn new() -> Self {
        Expr::default()
    }

    /// A single-term expression `coeff * var`.
    pub fn term(var: Variable, coeff: f64) -> Self {
        let mut coeffs = HashMap::new();
        coeffs.insert(var, coeff);
        Expr {
            coeffs,
            constant: 0.0,
        }
    }

    /// Sums an iterator of `(variable, coefficient)` terms into one expression.
    ///
    /// Coefficients of repeated variables are accumulated.
    pub fn sum<I: IntoIterator<Item = (Variable, f64)>>(terms: I) -> Self {
        terms.into_iter().collect()
    }

    /// Adds `coeff * var` to the expression, merging with any existing term.
    pub fn add_term(&mut self, var: Variable, coeff: f64) {
        self.coeffs
            .entry(var)
            .and_modify(|c| *c += coeff)
            .or_insert(coeff);
    }

    /// The constant term of the expression.
    pub fn constant(&self) -> f64 {
        self.constant
    }

    /// The coefficient of `var`, or zero if absent.
    pub fn coeff(&self, var: Variable) -> f64 {
        self.coeffs.get(&var).copied().unwrap_or(0.0)
    }

    /// Number of variables with a registered coefficient.
    pub fn n_terms(&self) -> usize {
        self.coeffs.len()
    }

    /// Iterates over the `(variable, coefficient)` terms.
    pub fn terms(&self) -> impl Iterator<Item = (Variable, f64)> + '_ {
        self.coeffs.iter().map(|(&var, &coeff)| (var, coeff))
    }
}

impl From<f64> for Expr {
    fn from(constant: f64) -> Self {
        Expr {
            coeffs: HashMap::new(),
            constant,
        }
    }
}

impl From<Variable> for Expr {
    fn from(var: Variable) -> Self {
        Expr::term(var, 1.0)
    }
}

impl FromIterator<(Variable, f64)> for Expr {
    fn from_iter<I: IntoIterator<Item = (Variable, f64)>>(iter: I) -> Self {
        let mut expr = Expr::new();
        for (var, coeff) in iter {
            expr.add_term(var, coeff);
        }
        expr
    }
}

impl Add for Expr {
    type Output = Expr;

    fn add(self, other: Expr) -> Expr {
        let mut expr = self;
        for (var, coeff) in other.coeffs {
            expr.add_term(var, coeff);
        }
        expr.constant += other.constant;
        expr
    }
}

impl Neg for Expr {
    type Output = Expr;

    fn neg(self) -> Self::Output {
        let mut coeffs = self.coeffs;
        for coeff in coeffs.values_mut() {
            *coeff = -*coeff;
        }
        Expr {
            coeffs,
            constant: -self.constant,
        }
    }
}

impl Sub for Expr {
    type Output = Expr;

    fn sub(self, other: Expr) -> Self::Output {
        self + (-other)
    }
}

impl Mul<f64> for Expr {
    type Output = Expr;

    fn mul(self, scalar: f64) -> Self::Output {
        Expr {
            coeffs: self
                .coeffs
                .into_iter()
                .map(|(var, coeff)| (var, coeff * scalar))
                .collect(),
            constant: self.constant * scalar,
        }
    }
}
