// Solver adapters module

pub mod factory;
#[cfg(feature = "highs")]
pub mod highs_solver;
pub mod microlp_solver;

pub use factory::SolverFactory;
#[cfg(feature = "highs")]
pub use highs_solver::HighsSolver;
pub use microlp_solver::MicroLpSolver;
