// Infrastructure: Server setup and configuration

use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use tonic::transport::Server;

use crate::application::mappers::or_dashboard::operations_dashboard_server::OperationsDashboardServer;
use crate::application::{Dashboard, GrpcDashboardService};
use crate::domain::{SolverBackend, SolverService};
use crate::solver::SolverFactory;

/// Command-line / environment configuration for `opsdash-server`
#[derive(Debug, Parser)]
#[command(about = "Serve the operations-research dashboard over gRPC.")]
pub struct ServerArgs {
    /// Address to listen on.
    #[arg(long, env = "OPSDASH_ADDRESS", default_value = "0.0.0.0:50051")]
    pub address: SocketAddr,

    /// Pin every production request to one LP backend (auto, microlp, highs).
    ///
    /// Without it each request's own solver config decides.
    #[arg(long, env = "OPSDASH_SOLVER")]
    pub solver: Option<SolverBackend>,
}

pub struct ServerConfig {
    pub address: SocketAddr,
    pub solver: Option<Arc<dyn SolverService>>,
}

impl ServerConfig {
    pub fn new(address: SocketAddr, solver: Option<Arc<dyn SolverService>>) -> Self {
        Self { address, solver }
    }

    pub fn from_args(args: &ServerArgs) -> Self {
        Self::new(args.address, args.solver.map(SolverFactory::create_from_backend))
    }

    fn dashboard(&self) -> Dashboard {
        match &self.solver {
            Some(solver) => Dashboard::with_solver(Arc::clone(solver)),
            None => Dashboard::new(),
        }
    }
}

pub async fn start_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let service = GrpcDashboardService::new(config.dashboard());

    tracing::info!(
        address = %config.address,
        solver = config.solver.as_ref().map(|s| s.name()).unwrap_or("per-request"),
        "opsdash gRPC server listening"
    );

    Server::builder()
        .add_service(OperationsDashboardServer::new(service))
        .serve(config.address)
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_default_to_all_interfaces() {
        let args = ServerArgs::try_parse_from(["opsdash-server"]).unwrap();
        assert_eq!(args.address, "0.0.0.0:50051".parse::<SocketAddr>().unwrap());
        assert!(ServerConfig::from_args(&args).solver.is_none());
    }

    #[test]
    fn solver_flag_pins_backend() {
        let args = ServerArgs::try_parse_from([
            "opsdash-server",
            "--address",
            "127.0.0.1:6000",
            "--solver",
            "microlp",
        ])
        .unwrap();
        let config = ServerConfig::from_args(&args);
        assert_eq!(config.address.port(), 6000);
        assert_eq!(config.solver.unwrap().name(), "microlp");
    }
}
