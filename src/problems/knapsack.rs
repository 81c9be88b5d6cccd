//! 0-1 knapsack: pick a subset of items maximizing value within a weight
//! capacity.

use serde::Deserialize;

use crate::builder::{cons, var};
use crate::problems::{ensure_scalar, ensure_vec};
use crate::{Error, Expr, Model, ObjSense, SolutionReport, VarFamily};

/// A 0-1 knapsack instance.
#[derive(Debug, Clone, Deserialize)]
pub struct KnapsackInstance {
    /// Number of items.
    #[serde(rename = "N")]
    pub n: usize,
    /// Weight of each item.
    #[serde(rename = "Weights")]
    pub weights: Vec<f64>,
    /// Value of each item.
    #[serde(rename = "Values")]
    pub values: Vec<f64>,
    /// Capacity of the knapsack.
    #[serde(rename = "MaxCapacity")]
    pub max_capacity: f64,
}

/// The encoded model plus the variable handles needed to read a solution back.
#[derive(Debug)]
pub struct KnapsackModel {
    /// The populated model.
    pub model: Model,
    /// Binary selection variables, `Select[i]`.
    pub select: VarFamily,
}

/// Items chosen by an optimal solve.
#[derive(Debug, Clone, PartialEq)]
pub struct KnapsackSolution {
    /// Indices of the selected items.
    pub items: Vec<usize>,
    /// Total value of the selection.
    pub value: f64,
}

impl KnapsackInstance {
    /// Rejects negative weights, values, or capacity before any model exists.
    pub fn validate(&self) -> Result<(), Error> {
        ensure_vec("Weights", self.n, &self.weights)?;
        ensure_vec("Values", self.n, &self.values)?;
        ensure_scalar("MaxCapacity", self.max_capacity)?;
        Ok(())
    }

    /// Encodes the instance as an integer program.
    pub fn encode(&self) -> Result<KnapsackModel, Error> {
        self.validate()?;

        let mut model = Model::new("knapsack");
        let select = model.add_vars("Select", &[self.n], var().binary())?;

        let mut capacity = cons().name("weight_capacity").le(self.max_capacity);
        for (i, &weight) in self.weights.iter().enumerate() {
            capacity = capacity.coef(select.at(i), weight);
        }
        model.add(capacity)?;

        model.set_objective(
            Expr::sum((0..self.n).map(|i| (select.at(i), self.values[i]))),
            ObjSense::Maximize,
        )?;

        Ok(KnapsackModel { model, select })
    }
}

impl KnapsackModel {
    /// Maps an optimal report back to the selected items.
    pub fn extract(&self, report: &SolutionReport) -> Option<KnapsackSolution> {
        if !report.status().is_optimal() {
            return None;
        }
        let items = (0..self.select.len())
            .filter(|&i| report.value_of(self.select.at(i)).unwrap_or(0.0) > 0.5)
            .collect();
        Some(KnapsackSolution {
            items,
            value: report.objective_value()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::SolveOptions;
    use crate::{MicrolpSolver, Status};

    fn instance() -> KnapsackInstance {
        KnapsackInstance {
            n: 3,
            weights: vec![2.0, 3.0, 4.0],
            values: vec![3.0, 4.0, 5.0],
            max_capacity: 5.0,
        }
    }

    #[test]
    fn optimal_selection() {
        let encoded = instance().encode().unwrap();
        let report = encoded
            .model
            .solve(&MicrolpSolver, &SolveOptions::default());

        assert_eq!(report.status(), Status::Optimal);
        let solution = encoded.extract(&report).unwrap();
        assert!((solution.value - 7.0).abs() < 1e-6);
        assert_eq!(solution.items, vec![0, 1]);
    }

    #[test]
    fn encoding_is_idempotent() {
        let instance = instance();
        let first = instance.encode().unwrap();
        let second = instance.encode().unwrap();
        assert_eq!(first.model.n_vars(), second.model.n_vars());
        assert_eq!(first.model.n_conss(), second.model.n_conss());
    }

    #[test]
    fn negative_weight_is_rejected() {
        let mut bad = instance();
        bad.weights[1] = -3.0;
        let err = bad.encode().unwrap_err();
        assert!(matches!(
            err,
            Error::DataValidation { param, index, .. } if param == "Weights" && index == vec![1]
        ));
    }

    #[test]
    fn length_mismatch_is_rejected() {
        let mut bad = instance();
        bad.values.pop();
        let err = bad.encode().unwrap_err();
        assert!(matches!(err, Error::DimensionMismatch { param, .. } if param == "Values"));
    }

    #[test]
    fn random_instances_match_brute_force() {
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};

        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..5 {
            let n = 8;
            let weights: Vec<f64> = (0..n).map(|_| rng.gen_range(1..10) as f64).collect();
            let values: Vec<f64> = (0..n).map(|_| rng.gen_range(1..10) as f64).collect();
            let instance = KnapsackInstance {
                n,
                weights: weights.clone(),
                values: values.clone(),
                max_capacity: 15.0,
            };

            let mut best = 0.0f64;
            for mask in 0u32..(1 << n) {
                let weight: f64 = (0..n)
                    .filter(|i| mask & (1 << i) != 0)
                    .map(|i| weights[i])
                    .sum();
                if weight <= 15.0 {
                    let value: f64 = (0..n)
                        .filter(|i| mask & (1 << i) != 0)
                        .map(|i| values[i])
                        .sum();
                    best = best.max(value);
                }
            }

            let encoded = instance.encode().unwrap();
            let report = encoded
                .model
                .solve(&MicrolpSolver, &SolveOptions::default());
            let solution = encoded.extract(&report).unwrap();
            assert!((solution.value - best).abs() < 1e-6);
        }
    }

    #[test]
    fn no_extraction_from_non_optimal_report() {
        use crate::backend::{RawSolution, Solver};

        struct AlwaysInfeasible;
        impl Solver for AlwaysInfeasible {
            fn solve(&self, _model: &Model, _options: &SolveOptions) -> RawSolution {
                RawSolution::status_only(Status::Infeasible)
            }
        }

        let encoded = instance().encode().unwrap();
        let report = encoded
            .model
            .solve(&AlwaysInfeasible, &SolveOptions::default());
        assert_eq!(report.status(), Status::Infeasible);
        assert!(encoded.extract(&report).is_none());
    }
}
