pub mod dashboard;

#[cfg(feature = "server")]
pub mod grpc_service;

#[cfg(feature = "server")]
pub mod mappers;

pub use dashboard::{Dashboard, DashboardDefaults, ReportStatus, SolveSummary, TabReport};

#[cfg(feature = "server")]
pub use grpc_service::GrpcDashboardService;
