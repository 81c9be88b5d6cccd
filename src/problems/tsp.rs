//! Traveling salesman: visit every city exactly once on one closed tour of
//! minimum total distance.

use itertools::Itertools;
use log::warn;
use serde::Deserialize;

use crate::builder::{cons, var};
use crate::problems::ensure_matrix;
use crate::{Error, Expr, Model, ObjSense, SolutionReport, VarFamily};

/// City count above which subset enumeration is warned about; the constraint
/// count doubles with every additional city.
const SUBSET_ENUMERATION_LIMIT: usize = 12;

/// How subtours are excluded from the TSP model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubtourElimination {
    /// Miller-Tucker-Zemlin order variables: one continuous `Order[i]` per
    /// city and one constraint per non-depot city pair. Scales linearly and is
    /// the default.
    #[default]
    MillerTuckerZemlin,
    /// One constraint per vertex subset of size `2..N-1`. Exponential in the
    /// city count; viable only for small instances.
    SubsetEnumeration,
    /// No elimination constraints. Optimal solutions may decompose into
    /// several disjoint cycles; retained to make that gap observable.
    Off,
}

/// A TSP instance over a distance matrix.
#[derive(Debug, Clone, Deserialize)]
pub struct TspInstance {
    /// Number of cities.
    #[serde(rename = "N")]
    pub n: usize,
    /// `distance[i][j]`: travel distance from city `i` to city `j`.
    #[serde(rename = "Distance", alias = "Distances")]
    pub distance: Vec<Vec<f64>>,
}

/// The encoded model plus the variable handles needed to read a solution back.
#[derive(Debug)]
pub struct TspModel {
    /// The populated model.
    pub model: Model,
    /// Binary arc decisions, `Travel[i,j]`.
    pub travel: VarFamily,
    /// MTZ order variables; present only under
    /// [`SubtourElimination::MillerTuckerZemlin`].
    pub order: Option<VarFamily>,
}

/// Arcs of an optimal tour.
#[derive(Debug, Clone, PartialEq)]
pub struct TspSolution {
    /// Selected arcs `(from, to)`.
    pub arcs: Vec<(usize, usize)>,
    /// Total distance traveled.
    pub length: f64,
}

impl TspInstance {
    /// Rejects negative distances or a malformed matrix before any model exists.
    pub fn validate(&self) -> Result<(), Error> {
        ensure_matrix("Distance", self.n, self.n, &self.distance)
    }

    /// Encodes the instance with the default subtour elimination (MTZ).
    pub fn encode(&self) -> Result<TspModel, Error> {
        self.encode_with(SubtourElimination::default())
    }

    /// Encodes the instance with the given subtour elimination technique.
    pub fn encode_with(&self, subtour: SubtourElimination) -> Result<TspModel, Error> {
        self.validate()?;

        let n = self.n;
        if subtour == SubtourElimination::SubsetEnumeration && n > SUBSET_ENUMERATION_LIMIT {
            warn!(
                "subset enumeration over {} cities generates ~2^{} constraints; \
                 prefer Miller-Tucker-Zemlin at this size",
                n, n
            );
        }

        let mut model = Model::new("tsp");
        let travel = model.add_vars("Travel", &[n, n], var().binary())?;

        for i in 0..n {
            let name = format!("out_degree_{}", i);
            model.add(
                cons()
                    .name(&name)
                    .eq(1.0)
                    .expr((0..n).filter(|&j| j != i).map(|j| (travel.at((i, j)), 1.0))),
            )?;
        }
        for j in 0..n {
            let name = format!("in_degree_{}", j);
            model.add(
                cons()
                    .name(&name)
                    .eq(1.0)
                    .expr((0..n).filter(|&i| i != j).map(|i| (travel.at((i, j)), 1.0))),
            )?;
        }
        for i in 0..n {
            let name = format!("no_self_visit_{}", i);
            model.add(cons().name(&name).eq(0.0).coef(travel.at((i, i)), 1.0))?;
        }

        let order = match subtour {
            SubtourElimination::MillerTuckerZemlin => {
                let order =
                    model.add_vars("Order", &[n], var().continuous(0.0, (n as f64) - 1.0))?;
                for i in 1..n {
                    for j in 1..n {
                        if i == j {
                            continue;
                        }
                        let name = format!("subtour_elimination_{}_{}", i, j);
                        model.add(
                            cons()
                                .name(&name)
                                .le((n as f64) - 1.0)
                                .coef(order.at(i), 1.0)
                                .coef(order.at(j), -1.0)
                                .coef(travel.at((i, j)), n as f64),
                        )?;
                    }
                }
                Some(order)
            }
            SubtourElimination::SubsetEnumeration => {
                for size in 2..n {
                    for subset in (0..n).combinations(size) {
                        let name = format!("subtour_{}", subset.iter().join("_"));
                        let arcs = subset
                            .iter()
                            .cartesian_product(subset.iter())
                            .filter(|(i, j)| i != j)
                            .map(|(&i, &j)| (travel.at((i, j)), 1.0));
                        model.add(cons().name(&name).le((size as f64) - 1.0).expr(arcs))?;
                    }
                }
                None
            }
            SubtourElimination::Off => None,
        };

        let mut objective = Expr::new();
        for i in 0..n {
            for j in 0..n {
                objective.add_term(travel.at((i, j)), self.distance[i][j]);
            }
        }
        model.set_objective(objective, ObjSense::Minimize)?;

        Ok(TspModel {
            model,
            travel,
            order,
        })
    }
}

impl TspModel {
    /// Maps an optimal report back to the selected arcs.
    pub fn extract(&self, report: &SolutionReport) -> Option<TspSolution> {
        if !report.status().is_optimal() {
            return None;
        }
        let n = (self.travel.len() as f64).sqrt() as usize;
        let mut arcs = Vec::with_capacity(n);
        for i in 0..n {
            for j in 0..n {
                if report.value_of(self.travel.at((i, j))).unwrap_or(0.0) > 0.5 {
                    arcs.push((i, j));
                }
            }
        }
        Some(TspSolution {
            arcs,
            length: report.objective_value()?,
        })
    }
}
