//! Bin packing: assign every item to a bin without exceeding capacity, using
//! as few bins as possible.

use serde::Deserialize;

use crate::builder::{cons, var};
use crate::problems::{ensure_scalar, ensure_vec};
use crate::{Error, Expr, Model, ObjSense, SolutionReport, VarFamily};

/// A bin packing instance. As many bins as items are provisioned; the
/// objective drives the count actually used down.
#[derive(Debug, Clone, Deserialize)]
pub struct BppInstance {
    /// Number of items.
    #[serde(rename = "N")]
    pub n: usize,
    /// Size of each item.
    #[serde(rename = "ItemSizes")]
    pub item_sizes: Vec<f64>,
    /// Capacity of every bin.
    #[serde(rename = "BinCapacity")]
    pub bin_capacity: f64,
}

/// The encoded model plus the variable handles needed to read a solution back.
#[derive(Debug)]
pub struct BppModel {
    /// The populated model.
    pub model: Model,
    /// Binary assignments, `ItemInBin[i,b]`.
    pub assign: VarFamily,
    /// Binary bin-usage indicators, `BinUsed[b]`.
    pub used: VarFamily,
}

/// Bin contents of an optimal solve.
#[derive(Debug, Clone, PartialEq)]
pub struct BppSolution {
    /// Item indices per used bin, in bin order.
    pub bins: Vec<Vec<usize>>,
    /// Number of bins used.
    pub bins_used: usize,
}

impl BppInstance {
    /// Rejects negative item sizes or capacity before any model exists.
    pub fn validate(&self) -> Result<(), Error> {
        ensure_vec("ItemSizes", self.n, &self.item_sizes)?;
        ensure_scalar("BinCapacity", self.bin_capacity)?;
        Ok(())
    }

    /// Encodes the instance as an integer program.
    pub fn encode(&self) -> Result<BppModel, Error> {
        self.validate()?;

        let bins = self.n;
        let mut model = Model::new("bin_packing");
        let assign = model.add_vars("ItemInBin", &[self.n, bins], var().binary())?;
        let used = model.add_vars("BinUsed", &[bins], var().binary())?;

        for b in 0..bins {
            let name = format!("bin_capacity_{}", b);
            model.add(
                cons()
                    .name(&name)
                    .le(0.0)
                    .expr((0..self.n).map(|i| (assign.at((i, b)), self.item_sizes[i])))
                    .coef(used.at(b), -self.bin_capacity),
            )?;
        }

        for i in 0..self.n {
            let name = format!("assign_item_{}_to_one_bin", i);
            model.add(
                cons()
                    .name(&name)
                    .eq(1.0)
                    .expr((0..bins).map(|b| (assign.at((i, b)), 1.0))),
            )?;
        }

        model.set_objective(
            Expr::sum((0..bins).map(|b| (used.at(b), 1.0))),
            ObjSense::Minimize,
        )?;

        Ok(BppModel {
            model,
            assign,
            used,
        })
    }
}

impl BppModel {
    /// Maps an optimal report back to bin contents.
    pub fn extract(&self, report: &SolutionReport) -> Option<BppSolution> {
        if !report.status().is_optimal() {
            return None;
        }

        let bins_total = self.used.len();
        let items = self.assign.len() / bins_total.max(1);
        let mut bins = Vec::new();
        for b in 0..bins_total {
            if report.value_of(self.used.at(b)).unwrap_or(0.0) <= 0.5 {
                continue;
            }
            let contents: Vec<usize> = (0..items)
                .filter(|&i| report.value_of(self.assign.at((i, b))).unwrap_or(0.0) > 0.5)
                .collect();
            bins.push(contents);
        }
        Some(BppSolution {
            bins_used: bins.len(),
            bins,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::SolveOptions;
    use crate::{MicrolpSolver, Status};

    fn instance() -> BppInstance {
        BppInstance {
            n: 3,
            item_sizes: vec![4.0, 5.0, 6.0],
            bin_capacity: 10.0,
        }
    }

    #[test]
    fn three_items_fit_in_two_bins() {
        let encoded = instance().encode().unwrap();
        let report = encoded
            .model
            .solve(&MicrolpSolver, &SolveOptions::default());

        assert_eq!(report.status(), Status::Optimal);
        let solution = encoded.extract(&report).unwrap();
        assert_eq!(solution.bins_used, 2);

        // Every item placed exactly once, and bin loads stay within capacity.
        let mut placed: Vec<usize> = solution.bins.iter().flatten().copied().collect();
        placed.sort_unstable();
        assert_eq!(placed, vec![0, 1, 2]);
        for bin in &solution.bins {
            let load: f64 = bin.iter().map(|&i| 4.0 + i as f64).sum();
            assert!(load <= 10.0 + 1e-6);
        }
    }

    #[test]
    fn single_oversized_item_is_infeasible() {
        let bad = BppInstance {
            n: 1,
            item_sizes: vec![12.0],
            bin_capacity: 10.0,
        };
        let encoded = bad.encode().unwrap();
        let report = encoded
            .model
            .solve(&MicrolpSolver, &SolveOptions::default());
        assert_eq!(report.status(), Status::Infeasible);
    }

    #[test]
    fn negative_item_size_is_rejected() {
        let mut bad = instance();
        bad.item_sizes[0] = -4.0;
        let err = bad.encode().unwrap_err();
        assert!(matches!(
            err,
            Error::DataValidation { param, index, .. } if param == "ItemSizes" && index == vec![0]
        ));
    }

    #[test]
    fn encoding_is_idempotent() {
        let instance = instance();
        let first = instance.encode().unwrap();
        let second = instance.encode().unwrap();
        assert_eq!(first.model.n_vars(), second.model.n_vars());
        assert_eq!(first.model.n_conss(), second.model.n_conss());
    }
}
