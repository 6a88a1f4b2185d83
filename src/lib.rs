// Domain layer: calculators, LP models and the solver contract
pub mod domain;

// Application layer: dashboard use cases and the gRPC service
pub mod application;

// Infrastructure layer: gRPC server and its configuration
#[cfg(feature = "server")]
pub mod infrastructure;

// Solver adapters: Concrete implementations of SolverService
pub mod solver;

pub mod cli;
pub mod logging;

// Re-export commonly used types
pub use domain::{
    break_even, economic_order_quantity, mm1, optimize_production, BreakEvenInput,
    BreakEvenOutput, Chart, ChartKind, InventoryInput, InventoryOutput, ModelError,
    OptimizationProblem, ProductionInput, ProductionOutput, QueueInput, QueueOutput, Solution,
    SolutionStatus, SolverBackend, SolverError, SolverService, Tab,
};

pub use application::{Dashboard, DashboardDefaults, ReportStatus, SolveSummary, TabReport};

#[cfg(feature = "server")]
pub use application::GrpcDashboardService;

#[cfg(feature = "server")]
pub use infrastructure::{start_server, ServerArgs, ServerConfig};

pub use solver::{MicroLpSolver, SolverFactory};

#[cfg(feature = "highs")]
pub use solver::HighsSolver;
