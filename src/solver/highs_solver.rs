// HiGHS Solver Adapter
// Translates domain problems to the HiGHS row-wise API

use crate::domain::{
    models::{OptimizationProblem, Solution as DomainSolution, SolverStatistics},
    solver_service::{Result, SolverError, SolverService},
    value_objects::{ConstraintType, OptimizationType, SolutionStatus as DomainSolutionStatus},
};
use highs::{HighsModelStatus, RowProblem, Sense};
use std::time::Instant;

pub struct HighsSolver;

impl HighsSolver {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HighsSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SolverService for HighsSolver {
    fn solve(&self, problem: &OptimizationProblem) -> Result<DomainSolution> {
        self.validate(problem)?;

        let start_time = Instant::now();
        let num_vars = problem.num_variables();

        let mut pb = RowProblem::default();
        let cols: Vec<_> = problem
            .objective
            .coefficients
            .iter()
            .enumerate()
            .map(|(i, &coeff)| {
                let (lower, upper) = problem.bounds(i);
                pb.add_column(coeff, lower..upper)
            })
            .collect();

        for constraint in &problem.constraints {
            let terms: Vec<_> = constraint
                .coefficients
                .iter()
                .enumerate()
                .filter(|(_, coeff)| **coeff != 0.0)
                .map(|(i, &coeff)| (cols[i], coeff))
                .collect();

            match constraint.constraint_type {
                ConstraintType::LessThanOrEqual => {
                    pb.add_row(..=constraint.bound, &terms);
                }
                ConstraintType::Equal => {
                    pb.add_row(constraint.bound..=constraint.bound, &terms);
                }
                ConstraintType::GreaterThanOrEqual => {
                    pb.add_row(constraint.bound.., &terms);
                }
            }
        }

        let sense = if problem.objective.optimization_type == OptimizationType::Maximize {
            Sense::Maximise
        } else {
            Sense::Minimise
        };

        let mut model = pb.optimise(sense);
        model.set_option("output_flag", problem.solver_config.verbose);
        if let Some(limit) = problem.solver_config.time_limit {
            model.set_option("time_limit", limit);
        }

        let solved = model.solve();
        let statistics = SolverStatistics {
            solve_time_ms: start_time.elapsed().as_secs_f64() * 1000.0,
            num_variables: num_vars as u32,
            num_constraints: problem.constraints.len() as u32,
        };

        tracing::debug!(
            problem = %problem.name,
            status = ?solved.status(),
            elapsed_ms = statistics.solve_time_ms,
            "HiGHS finished"
        );

        match solved.status() {
            HighsModelStatus::Optimal => {
                let variable_values = solved.get_solution().columns().to_vec();
                let actual_obj = problem.objective.evaluate(&variable_values);

                let mut solution = DomainSolution::optimal(actual_obj, variable_values)
                    .with_statistics(statistics);
                solution.message = format!("Optimal solution found for '{}'", problem.name);
                Ok(solution)
            }
            HighsModelStatus::Infeasible => Ok(DomainSolution::new(
                DomainSolutionStatus::Infeasible,
                "Problem is infeasible: no solution satisfies all constraints",
            )
            .with_statistics(statistics)),
            HighsModelStatus::Unbounded | HighsModelStatus::UnboundedOrInfeasible => {
                Ok(DomainSolution::new(
                    DomainSolutionStatus::Unbounded,
                    "Problem is unbounded: objective can be improved infinitely",
                )
                .with_statistics(statistics))
            }
            HighsModelStatus::ReachedTimeLimit => Ok(DomainSolution::new(
                DomainSolutionStatus::TimeLimit,
                "Time limit reached before an optimal solution was proven",
            )
            .with_statistics(statistics)),
            status => Err(SolverError::ExecutionFailed(format!(
                "HiGHS solver returned status: {:?}",
                status
            ))),
        }
    }

    fn name(&self) -> &str {
        "HiGHS"
    }
}
