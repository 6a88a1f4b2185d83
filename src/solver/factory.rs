use crate::domain::{solver_service::SolverService, value_objects::SolverBackend};
use crate::solver::MicroLpSolver;
use std::sync::Arc;

#[cfg(feature = "highs")]
use crate::solver::HighsSolver;

/// Factory for creating solver instances based on configuration
pub struct SolverFactory;

impl SolverFactory {
    /// Create a solver for a specific backend
    ///
    /// Asking for HiGHS in a build without the `highs` feature falls back to microlp.
    pub fn create_from_backend(backend: SolverBackend) -> Arc<dyn SolverService> {
        match backend {
            SolverBackend::Auto => Self::default_solver(),
            SolverBackend::MicroLp => Arc::new(MicroLpSolver::new()),
            SolverBackend::Highs => Self::highs(),
        }
    }

    /// HiGHS when compiled in, microlp otherwise
    pub fn default_solver() -> Arc<dyn SolverService> {
        if Self::is_available(SolverBackend::Highs) {
            Self::highs()
        } else {
            Arc::new(MicroLpSolver::new())
        }
    }

    pub fn is_available(backend: SolverBackend) -> bool {
        match backend {
            SolverBackend::Auto | SolverBackend::MicroLp => true,
            SolverBackend::Highs => cfg!(feature = "highs"),
        }
    }

    #[cfg(feature = "highs")]
    fn highs() -> Arc<dyn SolverService> {
        Arc::new(HighsSolver::new())
    }

    #[cfg(not(feature = "highs"))]
    fn highs() -> Arc<dyn SolverService> {
        tracing::warn!("HiGHS requested but not compiled in; falling back to microlp");
        Arc::new(MicroLpSolver::new())
    }
}
