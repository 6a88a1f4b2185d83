use super::solver_service::SolverError;
use super::value_objects::SolutionStatus;

/// A calculator's precondition was violated or its solver gave up
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("Optimization failed: {status} ({message})")]
    OptimizationFailed {
        status: SolutionStatus,
        message: String,
    },

    #[error(transparent)]
    Solver(#[from] SolverError),

    #[error("Invalid model: arrival rate λ ({arrival_rate}) must be smaller than service rate μ ({service_rate})")]
    UnstableQueue {
        arrival_rate: f64,
        service_rate: f64,
    },

    #[error("Selling price ({price}) must be greater than variable cost ({variable_cost})")]
    UnprofitablePrice { price: f64, variable_cost: f64 },

    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),
}

pub type ModelResult<T> = std::result::Result<T, ModelError>;
