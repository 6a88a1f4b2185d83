// Dashboard use cases: run one calculator per request and turn the outcome into a report
// This is the only place figures are formatted for display

use std::sync::Arc;

use crate::domain::{
    break_even, economic_order_quantity, mm1, optimize_production, BreakEvenInput, Chart,
    InventoryInput, ModelError, ModelResult, ProductionInput, QueueInput, SolverError,
    SolverService, SolverStatistics, Tab,
};
use crate::solver::SolverFactory;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportStatus {
    Success,
    Error,
}

/// Which backend solved a production problem, and how long it took
#[derive(Debug, Clone, PartialEq)]
pub struct SolveSummary {
    pub solver: String,
    pub statistics: SolverStatistics,
}

/// What a host shows for one tab: a status line and, on success, a chart
#[derive(Debug, Clone, PartialEq)]
pub struct TabReport {
    pub tab: Tab,
    pub status: ReportStatus,
    pub message: String,
    pub chart: Option<Chart>,
    /// Set on successful production reports only
    pub solve: Option<SolveSummary>,
}

impl TabReport {
    pub fn success(tab: Tab, message: impl Into<String>, chart: Chart) -> Self {
        Self {
            tab,
            status: ReportStatus::Success,
            message: message.into(),
            chart: Some(chart),
            solve: None,
        }
    }

    pub fn error(tab: Tab, message: impl Into<String>) -> Self {
        Self {
            tab,
            status: ReportStatus::Error,
            message: message.into(),
            chart: None,
            solve: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == ReportStatus::Success
    }

    fn from_outcome<T>(
        tab: Tab,
        outcome: ModelResult<T>,
        render: impl FnOnce(&T) -> (String, Chart),
    ) -> Self {
        match outcome {
            Ok(output) => {
                let (message, chart) = render(&output);
                tracing::debug!(%tab, "evaluation succeeded");
                Self::success(tab, message, chart)
            }
            Err(err) => {
                tracing::debug!(%tab, error = %err, "model precondition not met");
                Self::error(tab, error_message(&err))
            }
        }
    }
}

fn error_message(err: &ModelError) -> String {
    match err {
        ModelError::OptimizationFailed { status, .. } => {
            format!("Optimization failed: {}.", status)
        }
        ModelError::UnstableQueue { .. } => {
            "Invalid model: λ must be smaller than μ.".to_string()
        }
        ModelError::UnprofitablePrice { .. } => {
            "Selling price must be greater than variable cost.".to_string()
        }
        other => other.to_string(),
    }
}

/// Default inputs for every tab
#[derive(Debug, Clone, Default)]
pub struct DashboardDefaults {
    pub production: ProductionInput,
    pub inventory: InventoryInput,
    pub queue: QueueInput,
    pub break_even: BreakEvenInput,
}

/// Evaluates dashboard tabs
///
/// Holds no per-session state: every method takes its inputs explicitly and returns
/// a fresh report, so one `Dashboard` can serve any number of sessions.
#[derive(Clone)]
pub struct Dashboard {
    solver: Option<Arc<dyn SolverService>>,
}

impl Dashboard {
    /// Pick the LP backend from each production request's solver config
    pub fn new() -> Self {
        Self { solver: None }
    }

    /// Always solve production problems with `solver`
    pub fn with_solver(solver: Arc<dyn SolverService>) -> Self {
        Self {
            solver: Some(solver),
        }
    }

    /// Production report; malformed problems and backend failures become error reports
    pub fn production(&self, input: &ProductionInput) -> TabReport {
        self.try_production(input)
            .unwrap_or_else(|err| TabReport::error(Tab::Production, err.to_string()))
    }

    /// Like [`production`](Self::production), but a problem the solver refuses or crashes
    /// on is returned as the [`SolverError`] rather than folded into a report
    pub fn try_production(&self, input: &ProductionInput) -> Result<TabReport, SolverError> {
        let solver = match &self.solver {
            Some(solver) => Arc::clone(solver),
            None => SolverFactory::create_from_backend(input.solver_config.backend),
        };
        tracing::info!(
            products = input.products.len(),
            resources = input.resources.len(),
            solver = solver.name(),
            "optimizing production"
        );

        let outcome = match optimize_production(input, solver.as_ref()) {
            Err(ModelError::Solver(err)) => {
                tracing::warn!(error = %err, "solver rejected production problem");
                return Err(err);
            }
            other => other,
        };
        let solve = outcome.as_ref().ok().map(|out| SolveSummary {
            solver: out.solver.clone(),
            statistics: out.statistics.clone(),
        });

        let mut report = TabReport::from_outcome(Tab::Production, outcome, |out| {
            let quantities = out
                .quantities
                .iter()
                .map(|q| format!("{} = {:.2}", q.name, q.quantity))
                .collect::<Vec<_>>()
                .join(", ");
            (
                format!(
                    "Optimal production: {}, Total Profit = {:.2}",
                    quantities, out.total_profit
                ),
                out.chart(),
            )
        });
        report.solve = solve;
        Ok(report)
    }

    pub fn inventory(&self, input: &InventoryInput) -> TabReport {
        tracing::info!(
            demand = input.annual_demand,
            ordering_cost = input.ordering_cost,
            holding_cost = input.holding_cost,
            "computing EOQ"
        );
        TabReport::from_outcome(Tab::Inventory, economic_order_quantity(input), |out| {
            (
                format!("Economic Order Quantity (EOQ): {:.2} units", out.eoq),
                out.chart(),
            )
        })
    }

    pub fn queue(&self, input: &QueueInput) -> TabReport {
        tracing::info!(
            arrival_rate = input.arrival_rate,
            service_rate = input.service_rate,
            "evaluating M/M/1 queue"
        );
        TabReport::from_outcome(Tab::Queue, mm1(input), |out| {
            (
                format!(
                    "Utilization (ρ): {:.2}\nAverage number in system (L): {:.2}\nAverage time in system (W): {:.2} hours",
                    out.utilization, out.mean_in_system, out.mean_time_in_system
                ),
                out.chart(),
            )
        })
    }

    pub fn break_even(&self, input: &BreakEvenInput) -> TabReport {
        tracing::info!(
            fixed_cost = input.fixed_cost,
            variable_cost = input.variable_cost,
            price = input.price,
            "analyzing break-even"
        );
        TabReport::from_outcome(Tab::BreakEven, break_even(input), |out| {
            (
                format!("Break-even Quantity: {:.2} units", out.quantity),
                out.chart(),
            )
        })
    }

    pub fn defaults(&self) -> DashboardDefaults {
        DashboardDefaults::default()
    }
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{solver_service, OptimizationProblem, Product, Resource, Solution};
    use crate::solver::MicroLpSolver;

    fn dashboard() -> Dashboard {
        Dashboard::with_solver(Arc::new(MicroLpSolver::new()))
    }

    #[test]
    fn production_default_message() {
        let report = dashboard().production(&ProductionInput::default());
        assert!(report.is_success());
        assert_eq!(
            report.message,
            "Optimal production: Product A = 20.00, Product B = 20.00, Total Profit = 1400.00"
        );
        assert_eq!(report.chart.unwrap().bars.len(), 2);
        let solve = report.solve.unwrap();
        assert_eq!(solve.solver, "microlp");
        assert_eq!(solve.statistics.num_constraints, 2);
    }

    struct CrashingSolver;

    impl SolverService for CrashingSolver {
        fn solve(&self, _: &OptimizationProblem) -> solver_service::Result<Solution> {
            Err(SolverError::ExecutionFailed("backend crashed".to_string()))
        }

        fn name(&self) -> &str {
            "crashing"
        }
    }

    #[test]
    fn non_finite_profit_is_a_solver_error_not_a_report() {
        let input = ProductionInput {
            products: vec![
                Product::new("Product A", f64::NAN),
                Product::new("Product B", 30.0),
            ],
            ..ProductionInput::default()
        };
        let err = dashboard().try_production(&input).unwrap_err();
        assert!(matches!(err, SolverError::InvalidProblem(_)));

        let report = dashboard().production(&input);
        assert_eq!(report.status, ReportStatus::Error);
        assert!(report.message.starts_with("Invalid problem:"));
        assert!(report.solve.is_none());
    }

    #[test]
    fn backend_failure_propagates_from_try_production() {
        let dashboard = Dashboard::with_solver(Arc::new(CrashingSolver));
        let err = dashboard
            .try_production(&ProductionInput::default())
            .unwrap_err();
        assert!(matches!(err, SolverError::ExecutionFailed(_)));
    }

    #[test]
    fn infeasible_production_stays_a_report() {
        let input = ProductionInput {
            resources: vec![Resource::new("Overdrawn", vec![1.0, 1.0], -10.0)],
            ..ProductionInput::default()
        };
        let report = dashboard().try_production(&input).unwrap();
        assert_eq!(report.message, "Optimization failed: Infeasible.");
        assert!(report.solve.is_none());
    }

    #[test]
    fn queue_error_has_no_chart() {
        let report = dashboard().queue(&QueueInput {
            arrival_rate: 5.0,
            service_rate: 3.0,
        });
        assert_eq!(report.status, ReportStatus::Error);
        assert_eq!(report.message, "Invalid model: λ must be smaller than μ.");
        assert!(report.chart.is_none());
    }

    #[test]
    fn inventory_guard_message_names_parameter() {
        let report = dashboard().inventory(&InventoryInput {
            holding_cost: 0.0,
            ..InventoryInput::default()
        });
        assert_eq!(
            report.message,
            "Invalid parameters: holding cost (H) must be positive"
        );
    }
}
