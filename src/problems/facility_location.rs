//! Capacitated facility location: open facilities and route shipments to
//! satisfy customer demand at minimum opening-plus-transport cost.

use serde::Deserialize;

use crate::builder::{cons, var};
use crate::problems::{ensure_matrix, ensure_vec};
use crate::{Error, Expr, Model, ObjSense, SolutionReport, VarFamily};

/// A capacitated facility location instance.
#[derive(Debug, Clone, Deserialize)]
pub struct CflpInstance {
    /// Number of candidate facility locations.
    #[serde(rename = "L")]
    pub l: usize,
    /// Number of customers.
    #[serde(rename = "C")]
    pub c: usize,
    /// One-time cost of opening each facility.
    #[serde(rename = "OpeningCost")]
    pub opening_cost: Vec<f64>,
    /// Shipping capacity of each facility, once open.
    #[serde(rename = "Capacity")]
    pub capacity: Vec<f64>,
    /// Demand of each customer.
    #[serde(rename = "Demand")]
    pub demand: Vec<f64>,
    /// `transport_cost[l][c]`: per-unit cost of shipping from `l` to `c`.
    #[serde(rename = "TransportCost")]
    pub transport_cost: Vec<Vec<f64>>,
}

/// The encoded model plus the variable handles needed to read a solution back.
#[derive(Debug)]
pub struct CflpModel {
    /// The populated model.
    pub model: Model,
    /// Binary opening decisions, `OpenFacility[l]`.
    pub open: VarFamily,
    /// Continuous shipped quantities, `UnitsShipped[l,c]`.
    pub ship: VarFamily,
}

/// Opening decisions and shipments of an optimal solve.
#[derive(Debug, Clone, PartialEq)]
pub struct CflpSolution {
    /// Indices of the opened facilities.
    pub open_facilities: Vec<usize>,
    /// Positive shipments as `(facility, customer, units)`.
    pub shipments: Vec<(usize, usize, f64)>,
    /// Total opening plus transport cost.
    pub cost: f64,
}

impl CflpInstance {
    /// Rejects negative costs, capacities, or demands before any model exists.
    pub fn validate(&self) -> Result<(), Error> {
        ensure_vec("OpeningCost", self.l, &self.opening_cost)?;
        ensure_vec("Capacity", self.l, &self.capacity)?;
        ensure_vec("Demand", self.c, &self.demand)?;
        ensure_matrix("TransportCost", self.l, self.c, &self.transport_cost)?;
        Ok(())
    }

    /// Encodes the instance as a mixed-integer program.
    ///
    /// Shipping from a closed facility is cut off twice: by the aggregate
    /// capacity coupling and by a per-pair linking constraint with the
    /// customer's demand as big-M.
    pub fn encode(&self) -> Result<CflpModel, Error> {
        self.validate()?;

        let mut model = Model::new("cflp");
        let ship = model.add_vars("UnitsShipped", &[self.l, self.c], var())?;
        let open = model.add_vars("OpenFacility", &[self.l], var().binary())?;

        for c in 0..self.c {
            let name = format!("demand_fulfillment_customer_{}", c);
            model.add(
                cons()
                    .name(&name)
                    .eq(self.demand[c])
                    .expr((0..self.l).map(|l| (ship.at((l, c)), 1.0))),
            )?;
        }

        for l in 0..self.l {
            let name = format!("capacity_constraint_{}", l);
            model.add(
                cons()
                    .name(&name)
                    .le(0.0)
                    .expr((0..self.c).map(|c| (ship.at((l, c)), 1.0)))
                    .coef(open.at(l), -self.capacity[l]),
            )?;
        }

        for l in 0..self.l {
            for c in 0..self.c {
                let name = format!("demand_assignment_{}_{}", l, c);
                model.add(
                    cons()
                        .name(&name)
                        .le(0.0)
                        .coef(ship.at((l, c)), 1.0)
                        .coef(open.at(l), -self.demand[c]),
                )?;
            }
        }

        let mut objective = Expr::sum((0..self.l).map(|l| (open.at(l), self.opening_cost[l])));
        for l in 0..self.l {
            for c in 0..self.c {
                objective.add_term(ship.at((l, c)), self.transport_cost[l][c]);
            }
        }
        model.set_objective(objective, ObjSense::Minimize)?;

        Ok(CflpModel { model, ship, open })
    }
}

impl CflpModel {
    /// Maps an optimal report back to opening decisions and shipments.
    pub fn extract(&self, report: &SolutionReport) -> Option<CflpSolution> {
        if !report.status().is_optimal() {
            return None;
        }

        let (l, c) = (self.open.len(), self.ship.len() / self.open.len().max(1));
        let open_facilities = (0..l)
            .filter(|&i| report.value_of(self.open.at(i)).unwrap_or(0.0) > 0.5)
            .collect();
        let mut shipments = Vec::new();
        for i in 0..l {
            for j in 0..c {
                let units = report.value_of(self.ship.at((i, j))).unwrap_or(0.0);
                if units > 1e-6 {
                    shipments.push((i, j, units));
                }
            }
        }
        Some(CflpSolution {
            open_facilities,
            shipments,
            cost: report.objective_value()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::SolveOptions;
    use crate::{MicrolpSolver, Status};

    fn instance() -> CflpInstance {
        CflpInstance {
            l: 2,
            c: 2,
            opening_cost: vec![1.0, 100.0],
            capacity: vec![20.0, 20.0],
            demand: vec![5.0, 7.0],
            transport_cost: vec![vec![1.0, 1.0], vec![1.0, 1.0]],
        }
    }

    #[test]
    fn cheap_facility_serves_everyone() {
        let encoded = instance().encode().unwrap();
        let report = encoded
            .model
            .solve(&MicrolpSolver, &SolveOptions::default());

        assert_eq!(report.status(), Status::Optimal);
        let solution = encoded.extract(&report).unwrap();
        assert_eq!(solution.open_facilities, vec![0]);
        // 1 opening + 12 units shipped at unit cost.
        assert!((solution.cost - 13.0).abs() < 1e-6);
    }

    #[test]
    fn shipping_implies_open() {
        let encoded = instance().encode().unwrap();
        let report = encoded
            .model
            .solve(&MicrolpSolver, &SolveOptions::default());

        let solution = encoded.extract(&report).unwrap();
        for &(l, _, units) in &solution.shipments {
            assert!(units > 0.0);
            let open_val = report.value_of(encoded.open.at(l)).unwrap();
            assert!(open_val > 0.5, "facility {} ships while closed", l);
        }
    }

    #[test]
    fn tight_capacity_forces_second_facility() {
        let mut tight = instance();
        tight.capacity = vec![7.0, 7.0];
        let encoded = tight.encode().unwrap();
        let report = encoded
            .model
            .solve(&MicrolpSolver, &SolveOptions::default());

        let solution = encoded.extract(&report).unwrap();
        assert_eq!(solution.open_facilities, vec![0, 1]);
    }

    #[test]
    fn negative_transport_cost_names_the_cell() {
        let mut bad = instance();
        bad.transport_cost[1][0] = -2.0;
        let err = bad.encode().unwrap_err();
        assert!(matches!(
            err,
            Error::DataValidation { param, index, value }
                if param == "TransportCost" && index == vec![1, 0] && value == -2.0
        ));
    }

    #[test]
    fn oversubscribed_demand_is_infeasible() {
        let mut bad = instance();
        bad.demand = vec![30.0, 30.0];
        let encoded = bad.encode().unwrap();
        let report = encoded
            .model
            .solve(&MicrolpSolver, &SolveOptions::default());
        assert_eq!(report.status(), Status::Infeasible);
        assert!(encoded.extract(&report).is_none());
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
