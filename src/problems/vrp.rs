//! Capacitated vehicle routing: a fleet of vehicles leaves the depot (city 0),
//! jointly visits every other city exactly once within per-vehicle capacity,
//! and returns, minimizing total travel cost.

use serde::Deserialize;

use crate::builder::{cons, var};
use crate::problems::{ensure_matrix, ensure_scalar, ensure_vec};
use crate::{Error, Expr, Model, ObjSense, SolutionReport, VarFamily};

/// A capacitated vehicle routing instance. City 0 is the depot.
#[derive(Debug, Clone, Deserialize)]
pub struct VrpInstance {
    /// Number of cities, including the depot.
    #[serde(rename = "C", alias = "N")]
    pub c: usize,
    /// Number of vehicles; each one is dispatched.
    #[serde(rename = "V", alias = "P")]
    pub v: usize,
    /// Demand of each city; the depot's entry is ignored by the capacity
    /// constraints.
    #[serde(rename = "CityDemand", alias = "Demand")]
    pub city_demand: Vec<f64>,
    /// Carrying capacity of every vehicle.
    #[serde(rename = "VehicleCapacity", alias = "Q")]
    pub vehicle_capacity: f64,
    /// `city_distances[i][j]`: travel cost from city `i` to city `j`.
    #[serde(rename = "CityDistances", alias = "Distance")]
    pub city_distances: Vec<Vec<f64>>,
}

/// The encoded model plus the variable handles needed to read a solution back.
#[derive(Debug)]
pub struct VrpModel {
    /// The populated model.
    pub model: Model,
    /// Binary arc decisions, `Travel[v,i,j]`.
    pub route: VarFamily,
    /// Continuous MTZ order variables, `Order[i]`, shared across vehicles.
    pub order: VarFamily,
}

/// Vehicle routes of an optimal solve.
#[derive(Debug, Clone, PartialEq)]
pub struct VrpSolution {
    /// Visiting sequence per vehicle, starting and ending at the depot.
    pub routes: Vec<Vec<usize>>,
    /// Total travel cost over all vehicles.
    pub total_cost: f64,
}

impl VrpInstance {
    /// Rejects negative demands, capacity, or distances before any model exists.
    pub fn validate(&self) -> Result<(), Error> {
        ensure_vec("CityDemand", self.c, &self.city_demand)?;
        ensure_scalar("VehicleCapacity", self.vehicle_capacity)?;
        ensure_matrix("CityDistances", self.c, self.c, &self.city_distances)?;
        Ok(())
    }

    /// Encodes the instance as a mixed-integer program.
    ///
    /// Subtours among the non-depot cities are excluded with shared MTZ order
    /// variables, applied per vehicle to non-depot city pairs only; depot
    /// arcs stay unconstrained so every route can close.
    pub fn encode(&self) -> Result<VrpModel, Error> {
        self.validate()?;

        let (c, v) = (self.c, self.v);
        let mut model = Model::new("vrp");
        let route = model.add_vars("Travel", &[v, c, c], var().binary())?;
        let order = model.add_vars("Order", &[c], var().continuous(0.0, (c as f64) - 1.0))?;

        for k in 0..v {
            let name = format!("vehicle_{}_start", k);
            model.add(
                cons()
                    .name(&name)
                    .eq(1.0)
                    .expr((1..c).map(|j| (route.at((k, 0, j)), 1.0))),
            )?;
            let name = format!("vehicle_{}_end", k);
            model.add(
                cons()
                    .name(&name)
                    .eq(1.0)
                    .expr((1..c).map(|j| (route.at((k, j, 0)), 1.0))),
            )?;
        }

        for i in 1..c {
            let name = format!("visit_once_{}", i);
            let incoming = (0..v)
                .flat_map(move |k| (0..c).filter(move |&j| j != i).map(move |j| (k, j)))
                .map(|(k, j)| (route.at((k, j, i)), 1.0));
            model.add(cons().name(&name).eq(1.0).expr(incoming))?;
        }

        for k in 0..v {
            for i in 0..c {
                let name = format!("flow_conservation_v{}_i{}", k, i);
                let outgoing = (0..c).filter(|&j| j != i).map(|j| (route.at((k, i, j)), 1.0));
                let incoming = (0..c)
                    .filter(|&j| j != i)
                    .map(|j| (route.at((k, j, i)), -1.0));
                model.add(cons().name(&name).eq(0.0).expr(outgoing.chain(incoming)))?;
            }
        }

        for k in 0..v {
            let name = format!("capacity_constraint_veh_{}", k);
            let load = (1..c)
                .flat_map(|i| (0..c).filter(move |&j| j != i).map(move |j| (i, j)))
                .map(|(i, j)| (route.at((k, i, j)), self.city_demand[i]));
            model.add(cons().name(&name).le(self.vehicle_capacity).expr(load))?;
        }

        for k in 0..v {
            for i in 1..c {
                for j in 1..c {
                    if i == j {
                        continue;
                    }
                    let name = format!("subtour_elimination_{}_{}_{}", k, i, j);
                    model.add(
                        cons()
                            .name(&name)
                            .le((c as f64) - 1.0)
                            .coef(order.at(i), 1.0)
                            .coef(order.at(j), -1.0)
                            .coef(route.at((k, i, j)), c as f64),
                    )?;
                }
            }
        }

        for k in 0..v {
            for i in 0..c {
                let name = format!("no_self_loop_{}_{}", k, i);
                model.add(cons().name(&name).eq(0.0).coef(route.at((k, i, i)), 1.0))?;
            }
        }

        let mut objective = Expr::new();
        for k in 0..v {
            for i in 0..c {
                for j in 0..c {
                    objective.add_term(route.at((k, i, j)), self.city_distances[i][j]);
                }
            }
        }
        model.set_objective(objective, ObjSense::Minimize)?;

        Ok(VrpModel {
            model,
            route,
            order,
        })
    }
}

impl VrpModel {
    /// Maps an optimal report back to per-vehicle routes.
    pub fn extract(&self, report: &SolutionReport) -> Option<VrpSolution> {
        if !report.status().is_optimal() {
            return None;
        }

        let c = self.order.len();
        let vehicles = self.route.len() / (c * c).max(1);
        let mut routes = Vec::with_capacity(vehicles);
        for k in 0..vehicles {
            let mut successor = vec![None; c];
            for i in 0..c {
                for j in 0..c {
                    if report.value_of(self.route.at((k, i, j))).unwrap_or(0.0) > 0.5 {
                        successor[i] = Some(j);
                    }
                }
            }

            let mut route = vec![0];
            let mut current = 0;
            for _ in 0..c {
                match successor[current] {
                    Some(next) => {
                        route.push(next);
                        current = next;
                        if current == 0 {
                            break;
                        }
                    }
                    None => break,
                }
            }
            routes.push(route);
        }

        Some(VrpSolution {
            routes,
            total_cost: report.objective_value()?,
        })
    }
}
