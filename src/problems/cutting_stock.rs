//! Cutting stock: cover per-type demand by repeating cutting patterns while
//! minimizing the material consumed.
//!
//! This is the direct pattern-usage formulation over a fixed pattern set;
//! generating new patterns on the fly (column generation) is a solver-side
//! technique outside this layer.

use serde::Deserialize;

use crate::builder::{cons, var};
use crate::problems::{ensure_matrix, ensure_vec};
use crate::{Error, Expr, Model, ObjSense, SolutionReport, VarFamily};

/// A cutting-stock instance over a fixed set of cutting patterns.
#[derive(Debug, Clone, Deserialize)]
pub struct CuttingStockInstance {
    /// Number of cutting patterns.
    #[serde(rename = "P")]
    pub p: usize,
    /// Number of material types demanded.
    #[serde(rename = "T")]
    pub t: usize,
    /// `pattern[t][p]`: how many pieces of type `t` pattern `p` yields.
    #[serde(rename = "Pattern")]
    pub pattern: Vec<Vec<f64>>,
    /// Demanded pieces per material type.
    #[serde(rename = "Demand")]
    pub demand: Vec<f64>,
    /// Raw material consumed by one use of each pattern.
    #[serde(rename = "MaterialUsedForPattern")]
    pub material_used: Vec<f64>,
}

/// The encoded model plus the variable handles needed to read a solution back.
#[derive(Debug)]
pub struct CuttingStockModel {
    /// The populated model.
    pub model: Model,
    /// Integer usage counts, `TimesPatternUsed[p]`.
    pub usage: VarFamily,
}

/// Pattern usage counts of an optimal solve.
#[derive(Debug, Clone, PartialEq)]
pub struct CuttingStockSolution {
    /// How often each pattern is used.
    pub usage: Vec<u64>,
    /// Total material consumed.
    pub material: f64,
}

impl CuttingStockInstance {
    /// Rejects negative pattern yields, demands, or material costs.
    pub fn validate(&self) -> Result<(), Error> {
        ensure_matrix("Pattern", self.t, self.p, &self.pattern)?;
        ensure_vec("Demand", self.t, &self.demand)?;
        ensure_vec("MaterialUsedForPattern", self.p, &self.material_used)?;
        Ok(())
    }

    /// Encodes the instance as an integer program.
    pub fn encode(&self) -> Result<CuttingStockModel, Error> {
        self.validate()?;

        let mut model = Model::new("cutting_stock");
        let usage = model.add_vars("TimesPatternUsed", &[self.p], var().int(0..))?;

        for (t, row) in self.pattern.iter().enumerate() {
            let name = format!("demand_constraint_type_{}", t);
            model.add(
                cons()
                    .name(&name)
                    .ge(self.demand[t])
                    .expr((0..self.p).map(|p| (usage.at(p), row[p]))),
            )?;
        }

        model.set_objective(
            Expr::sum((0..self.p).map(|p| (usage.at(p), self.material_used[p]))),
            ObjSense::Minimize,
        )?;

        Ok(CuttingStockModel { model, usage })
    }
}

impl CuttingStockModel {
    /// Maps an optimal report back to pattern usage counts.
    pub fn extract(&self, report: &SolutionReport) -> Option<CuttingStockSolution> {
        if !report.status().is_optimal() {
            return None;
        }
        let usage = (0..self.usage.len())
            .map(|p| report.value_of(self.usage.at(p)).unwrap_or(0.0).round() as u64)
            .collect();
        Some(CuttingStockSolution {
            usage,
            material: report.objective_value()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::SolveOptions;
    use crate::{MicrolpSolver, Status};

    fn identity_instance() -> CuttingStockInstance {
        CuttingStockInstance {
            p: 3,
            t: 3,
            pattern: vec![
                vec![1.0, 0.0, 0.0],
                vec![0.0, 1.0, 0.0],
                vec![0.0, 0.0, 1.0],
            ],
            demand: vec![2.0, 3.0, 4.0],
            material_used: vec![1.0, 1.0, 1.0],
        }
    }

    #[test]
    fn identity_patterns_reproduce_demand() {
        let encoded = identity_instance().encode().unwrap();
        let report = encoded
            .model
            .solve(&MicrolpSolver, &SolveOptions::default());

        assert_eq!(report.status(), Status::Optimal);
        let solution = encoded.extract(&report).unwrap();
        assert_eq!(solution.usage, vec![2, 3, 4]);
        assert!((solution.material - 9.0).abs() < 1e-6);
    }

    #[test]
    fn richer_pattern_reduces_material() {
        // A combined pattern covering one piece of every type at the cost of
        // one unit of material dominates the single-piece patterns.
        let instance = CuttingStockInstance {
            p: 3,
            t: 2,
            pattern: vec![vec![1.0, 0.0, 1.0], vec![0.0, 1.0, 1.0]],
            demand: vec![2.0, 2.0],
            material_used: vec![1.0, 1.0, 1.0],
        };
        let encoded = instance.encode().unwrap();
        let report = encoded
            .model
            .solve(&MicrolpSolver, &SolveOptions::default());

        let solution = encoded.extract(&report).unwrap();
        assert!((solution.material - 2.0).abs() < 1e-6);
        assert_eq!(solution.usage[2], 2);
    }

    #[test]
    fn negative_demand_is_rejected() {
        let mut bad = identity_instance();
        bad.demand[2] = -1.0;
        let err = bad.encode().unwrap_err();
        assert!(matches!(
            err,
            Error::DataValidation { param, index, .. } if param == "Demand" && index == vec![2]
        ));
    }

    #[test]
    fn ragged_pattern_matrix_is_rejected() {
        let mut bad = identity_instance();
        bad.pattern[1].pop();
        let err = bad.encode().unwrap_err();
        assert!(matches!(err, Error::DimensionMismatch { param, .. } if param == "Pattern"));
    }

    #[test]
    fn encoding_is_idempotent() {
        let instance = identity_instance();
        let first = instance.encode().unwrap();
        let second = instance.encode().unwrap();
        assert_eq!(first.model.n_vars(), second.model.n_vars());
        assert_eq!(first.model.n_conss(), second.model.n_conss());
    }
}
