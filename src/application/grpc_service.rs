use tonic::{Request, Response, Status};

use super::mappers::{self, or_dashboard};
use super::Dashboard;
use crate::domain::SolverBackend;
use crate::solver::SolverFactory;

use or_dashboard::operations_dashboard_server::OperationsDashboard;

/// gRPC service implementation
///
/// Every RPC maps its request to fresh domain inputs and evaluates one tab; no
/// state survives between calls.
pub struct GrpcDashboardService {
    dashboard: Dashboard,
}

impl GrpcDashboardService {
    pub fn new(dashboard: Dashboard) -> Self {
        Self { dashboard }
    }
}

impl Default for GrpcDashboardService {
    fn default() -> Self {
        Self::new(Dashboard::new())
    }
}

#[tonic::async_trait]
impl OperationsDashboard for GrpcDashboardService {
    async fn optimize_production(
        &self,
        request: Request<or_dashboard::ProductionRequest>,
    ) -> Result<Response<or_dashboard::TabReport>, Status> {
        let input = mappers::proto_to_domain_production(request.into_inner()).map_err(|e| *e)?;
        let report = self
            .dashboard
            .try_production(&input)
            .map_err(mappers::solver_error_to_status)?;
        tracing::info!(status = ?report.status, "production report ready");
        Ok(Response::new(mappers::domain_to_proto_report(report)))
    }

    async fn compute_eoq(
        &self,
        request: Request<or_dashboard::InventoryRequest>,
    ) -> Result<Response<or_dashboard::TabReport>, Status> {
        let input = mappers::proto_to_domain_inventory(request.get_ref());
        let report = self.dashboard.inventory(&input);
        Ok(Response::new(mappers::domain_to_proto_report(report)))
    }

    async fn evaluate_queue(
        &self,
        request: Request<or_dashboard::QueueRequest>,
    ) -> Result<Response<or_dashboard::TabReport>, Status> {
        let input = mappers::proto_to_domain_queue(request.get_ref());
        let report = self.dashboard.queue(&input);
        Ok(Response::new(mappers::domain_to_proto_report(report)))
    }

    async fn analyze_break_even(
        &self,
        request: Request<or_dashboard::BreakEvenRequest>,
    ) -> Result<Response<or_dashboard::TabReport>, Status> {
        let input = mappers::proto_to_domain_break_even(request.get_ref());
        let report = self.dashboard.break_even(&input);
        Ok(Response::new(mappers::domain_to_proto_report(report)))
    }

    async fn get_defaults(
        &self,
        _request: Request<or_dashboard::Empty>,
    ) -> Result<Response<or_dashboard::DashboardDefaults>, Status> {
        let defaults = self.dashboard.defaults();
        Ok(Response::new(mappers::domain_to_proto_defaults(&defaults)))
    }

    async fn list_solvers(
        &self,
        _request: Request<or_dashboard::Empty>,
    ) -> Result<Response<or_dashboard::AvailableSolvers>, Status> {
        let solvers = vec![
            or_dashboard::SolverInfo {
                name: SolverBackend::MicroLp.to_string(),
                available: SolverFactory::is_available(SolverBackend::MicroLp),
                capabilities: vec![
                    "Linear Programming".to_string(),
                    "Primal/Dual Simplex".to_string(),
                ],
            },
            or_dashboard::SolverInfo {
                name: SolverBackend::Highs.to_string(),
                available: SolverFactory::is_available(SolverBackend::Highs),
                capabilities: vec![
                    "Linear Programming".to_string(),
                    "Primal/Dual Simplex".to_string(),
                    "Interior Point Method".to_string(),
                    "Presolve".to_string(),
                    "Time Limit".to_string(),
                ],
            },
        ];

        Ok(Response::new(or_dashboard::AvailableSolvers { solvers }))
    }
}
