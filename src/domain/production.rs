// Production mix optimizer.
//
// Chooses how many units of each product to make so that total profit is maximal
// while no resource is used beyond its availability:
//
// maximize    Σ profit_j · x_j
// subject to  Σ usage_ij · x_j ≤ available_i   for every resource i
//             x_j ≥ 0
//
// The default input is the classic two-product, two-machine problem whose optimum
// is x = (20, 20) with a profit of 1400.

use super::chart::Chart;
use super::model_error::{ModelError, ModelResult};
use super::models::{
    Constraint, ObjectiveFunction, OptimizationProblem, SolverConfig, SolverStatistics, Variable,
};
use super::solver_service::SolverService;
use super::value_objects::{ConstraintType, OptimizationType};

/// Slack below which a resource counts as fully used
const BINDING_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub name: String,
    pub unit_profit: f64,
}

impl Product {
    pub fn new(name: impl Into<String>, unit_profit: f64) -> Self {
        Self {
            name: name.into(),
            unit_profit,
        }
    }
}

/// A limited resource; `usage[j]` is consumed per unit of product `j`
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    pub name: String,
    pub usage: Vec<f64>,
    pub available: f64,
}

impl Resource {
    pub fn new(name: impl Into<String>, usage: Vec<f64>, available: f64) -> Self {
        Self {
            name: name.into(),
            usage,
            available,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProductionInput {
    pub products: Vec<Product>,
    pub resources: Vec<Resource>,
    pub solver_config: SolverConfig,
}

impl Default for ProductionInput {
    fn default() -> Self {
        Self {
            products: vec![Product::new("Product A", 40.0), Product::new("Product B", 30.0)],
            resources: vec![
                Resource::new("Machine 1 time", vec![1.0, 1.0], 40.0),
                Resource::new("Machine 2 time", vec![2.0, 1.0], 60.0),
            ],
            solver_config: SolverConfig::default(),
        }
    }
}

impl ProductionInput {
    /// Express the production mix as a linear program
    pub fn to_problem(&self) -> OptimizationProblem {
        let objective = ObjectiveFunction::new(
            OptimizationType::Maximize,
            self.products.iter().map(|p| p.unit_profit).collect(),
        );

        let variables = self
            .products
            .iter()
            .map(|p| Variable::continuous(p.name.clone()))
            .collect();

        self.resources
            .iter()
            .fold(
                OptimizationProblem::new(objective)
                    .with_name("production mix")
                    .with_variables(variables)
                    .with_config(self.solver_config.clone()),
                |problem, r| {
                    problem.add_constraint(
                        Constraint::new(
                            ConstraintType::LessThanOrEqual,
                            r.usage.clone(),
                            r.available,
                        )
                        .with_name(r.name.clone()),
                    )
                },
            )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductQuantity {
    pub name: String,
    pub quantity: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResourceUsage {
    pub name: String,
    pub used: f64,
    pub available: f64,
}

impl ResourceUsage {
    pub fn slack(&self) -> f64 {
        self.available - self.used
    }

    pub fn is_binding(&self) -> bool {
        self.slack().abs() <= BINDING_TOLERANCE * self.available.abs().max(1.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductionOutput {
    pub quantities: Vec<ProductQuantity>,
    pub total_profit: f64,
    pub resources: Vec<ResourceUsage>,
    pub solver: String,
    pub statistics: SolverStatistics,
}

impl ProductionOutput {
    pub fn binding_resources(&self) -> impl Iterator<Item = &ResourceUsage> {
        self.resources.iter().filter(|r| r.is_binding())
    }

    pub fn chart(&self) -> Chart {
        self.quantities.iter().fold(
            Chart::bar("Optimal Production").with_axes("Product", "Quantity"),
            |chart, q| chart.with_bar(q.name.clone(), q.quantity),
        )
    }
}

/// Solve the production mix with `solver`
///
/// Infeasible or unbounded problems yield [`ModelError::OptimizationFailed`]; there is
/// no partial result.
pub fn optimize_production(
    input: &ProductionInput,
    solver: &dyn SolverService,
) -> ModelResult<ProductionOutput> {
    let problem = input.to_problem();
    let solution = solver.solve(&problem)?;

    if !solution.is_optimal() {
        return Err(ModelError::OptimizationFailed {
            status: solution.status,
            message: solution.message,
        });
    }

    let x = &solution.variable_values;
    let quantities = input
        .products
        .iter()
        .zip(x)
        .map(|(p, &quantity)| ProductQuantity {
            name: p.name.clone(),
            quantity,
        })
        .collect();

    let resources = problem
        .constraints
        .iter()
        .map(|c| ResourceUsage {
            name: c.name.clone(),
            used: c.lhs(x),
            available: c.bound,
        })
        .collect();

    Ok(ProductionOutput {
        quantities,
        total_profit: solution
            .optimal_value
            .unwrap_or_else(|| problem.objective.evaluate(x)),
        resources,
        solver: solver.name().to_string(),
        statistics: solution.statistics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::SolutionStatus;
    use crate::solver::MicroLpSolver;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn default_problem_reaches_known_vertex() {
        let out = optimize_production(&ProductionInput::default(), &MicroLpSolver::new()).unwrap();
        assert!(close(out.quantities[0].quantity, 20.0));
        assert!(close(out.quantities[1].quantity, 20.0));
        assert!(close(out.total_profit, 1400.0));
        assert_eq!(out.quantities[0].name, "Product A");
        assert_eq!(out.solver, "microlp");
        assert_eq!(out.statistics.num_variables, 2);
        assert_eq!(out.statistics.num_constraints, 2);
        assert!(out.statistics.solve_time_ms >= 0.0);
    }

    #[test]
    fn both_machine_constraints_bind_at_optimum() {
        let out = optimize_production(&ProductionInput::default(), &MicroLpSolver::new()).unwrap();
        let binding: Vec<_> = out.binding_resources().map(|r| r.name.as_str()).collect();
        assert_eq!(binding, ["Machine 1 time", "Machine 2 time"]);
    }

    #[test]
    fn to_problem_maps_products_and_resources() {
        let problem = ProductionInput::default().to_problem();
        assert_eq!(problem.objective.coefficients, vec![40.0, 30.0]);
        assert_eq!(problem.objective.optimization_type, OptimizationType::Maximize);
        assert_eq!(problem.constraints.len(), 2);
        assert_eq!(problem.constraints[1].coefficients, vec![2.0, 1.0]);
        assert_eq!(problem.constraints[1].bound, 60.0);
        assert_eq!(problem.variables[1].name, "Product B");
    }

    #[test]
    fn three_product_mix() {
        let input = ProductionInput {
            products: vec![
                Product::new("Chairs", 30.0),
                Product::new("Tables", 50.0),
                Product::new("Stools", 10.0),
            ],
            resources: vec![
                Resource::new("Labor hours", vec![2.0, 3.0, 1.0], 100.0),
                Resource::new("Storage", vec![1.0, 1.0, 1.0], 40.0),
            ],
            ..ProductionInput::default()
        };
        let out = optimize_production(&input, &MicroLpSolver::new()).unwrap();
        // Tables dominate labour: 100/3 tables → 1666.67
        assert!(close(out.total_profit, 5000.0 / 3.0));
        assert_eq!(out.chart().bars.len(), 3);
    }

    #[test]
    fn infeasible_resources_fail_without_partial_result() {
        let input = ProductionInput {
            resources: vec![Resource::new("Overdrawn", vec![1.0, 1.0], -10.0)],
            ..ProductionInput::default()
        };
        match optimize_production(&input, &MicroLpSolver::new()) {
            Err(ModelError::OptimizationFailed { status, .. }) => {
                assert_eq!(status, SolutionStatus::Infeasible)
            }
            other => panic!("expected infeasible outcome, got {:?}", other),
        }
    }

    #[test]
    fn unconstrained_product_fails() {
        let input = ProductionInput {
            resources: vec![Resource::new("Machine 1 time", vec![1.0, 0.0], 40.0)],
            ..ProductionInput::default()
        };
        let err = optimize_production(&input, &MicroLpSolver::new()).unwrap_err();
        assert!(matches!(
            err,
            ModelError::OptimizationFailed { .. } | ModelError::Solver(_)
        ));
    }

    #[test]
    fn malformed_resource_row_is_a_solver_error() {
        let input = ProductionInput {
            resources: vec![Resource::new("Short row", vec![1.0], 40.0)],
            ..ProductionInput::default()
        };
        let err = optimize_production(&input, &MicroLpSolver::new()).unwrap_err();
        assert!(matches!(err, ModelError::Solver(_)));
    }
}
