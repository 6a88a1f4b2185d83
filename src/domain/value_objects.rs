// Domain value objects shared by the calculators and the solver adapters

use std::fmt;

/// Type of constraint comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintType {
    /// Less than or equal (≤)
    LessThanOrEqual,
    /// Equal (=)
    Equal,
    /// Greater than or equal (≥)
    GreaterThanOrEqual,
}

/// Direction of optimization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptimizationType {
    /// Minimize the objective function
    Minimize,
    /// Maximize the objective function
    Maximize,
}

/// Status of the optimization solution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolutionStatus {
    /// Found optimal solution
    Optimal,
    /// Problem has no feasible solution
    Infeasible,
    /// Objective can be improved infinitely
    Unbounded,
    /// Time limit reached before optimality was proven
    TimeLimit,
}

impl fmt::Display for SolutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolutionStatus::Optimal => write!(f, "Optimal"),
            SolutionStatus::Infeasible => write!(f, "Infeasible"),
            SolutionStatus::Unbounded => write!(f, "Unbounded"),
            SolutionStatus::TimeLimit => write!(f, "Time Limit Reached"),
        }
    }
}

/// Solver backend to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SolverBackend {
    /// Automatically select best available solver
    #[default]
    Auto,
    /// Pure-Rust simplex via good_lp's microlp backend
    MicroLp,
    /// HiGHS (requires the `highs` feature)
    Highs,
}

impl fmt::Display for SolverBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverBackend::Auto => write!(f, "Auto"),
            SolverBackend::MicroLp => write!(f, "microlp"),
            SolverBackend::Highs => write!(f, "HiGHS"),
        }
    }
}

impl std::str::FromStr for SolverBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(SolverBackend::Auto),
            "microlp" | "micro-lp" => Ok(SolverBackend::MicroLp),
            "highs" => Ok(SolverBackend::Highs),
            other => Err(format!("unknown solver backend '{}'", other)),
        }
    }
}

/// The four dashboard tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Production,
    Inventory,
    Queue,
    BreakEven,
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tab::Production => write!(f, "Production Optimization (Linear Programming)"),
            Tab::Inventory => write!(f, "Inventory Model (EOQ)"),
            Tab::Queue => write!(f, "Queueing Model (M/M/1)"),
            Tab::BreakEven => write!(f, "Break-even Analysis"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solver_backend_parses_case_insensitively() {
        assert_eq!("HiGHS".parse::<SolverBackend>(), Ok(SolverBackend::Highs));
        assert_eq!("microlp".parse::<SolverBackend>(), Ok(SolverBackend::MicroLp));
        assert_eq!("AUTO".parse::<SolverBackend>(), Ok(SolverBackend::Auto));
        assert!("cplex".parse::<SolverBackend>().is_err());
    }
}
