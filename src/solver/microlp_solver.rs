// good_lp adapter backed by microlp, a pure-Rust simplex implementation

use crate::domain::{
    models::{OptimizationProblem, Solution as DomainSolution, SolverStatistics},
    solver_service::{Result, SolverError, SolverService},
    value_objects::{ConstraintType, OptimizationType, SolutionStatus as DomainSolutionStatus},
};
use good_lp::{
    solvers::microlp, variable, variables, Expression, ResolutionError,
    Solution as GoodLpSolutionTrait, SolverModel, Variable as GoodLpVariable,
};
use std::time::Instant;

pub struct MicroLpSolver;

impl MicroLpSolver {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MicroLpSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SolverService for MicroLpSolver {
    fn solve(&self, problem: &OptimizationProblem) -> Result<DomainSolution> {
        self.validate(problem)?;

        let start_time = Instant::now();
        let num_vars = problem.num_variables();

        let mut vars = variables!();
        let lp_variables: Vec<GoodLpVariable> = (0..num_vars)
            .map(|i| {
                let (lower, upper) = problem.bounds(i);
                vars.add(variable().min(lower).max(upper))
            })
            .collect();

        // good_lp minimises, so negate for maximization
        let is_maximize = problem.objective.optimization_type == OptimizationType::Maximize;
        let mut obj_expr: Expression = 0.into();
        for (i, &coeff) in problem.objective.coefficients.iter().enumerate() {
            if coeff != 0.0 {
                let c = if is_maximize { -coeff } else { coeff };
                obj_expr += c * lp_variables[i];
            }
        }

        let mut lp_model = vars.minimise(obj_expr).using(microlp::microlp);

        for constraint in &problem.constraints {
            let mut lhs: Expression = 0.into();
            for (i, &coeff) in constraint.coefficients.iter().enumerate() {
                if coeff != 0.0 {
                    lhs += coeff * lp_variables[i];
                }
            }

            lp_model = match constraint.constraint_type {
                ConstraintType::LessThanOrEqual => lp_model.with(lhs.leq(constraint.bound)),
                ConstraintType::Equal => lp_model.with(lhs.eq(constraint.bound)),
                ConstraintType::GreaterThanOrEqual => lp_model.with(lhs.geq(constraint.bound)),
            };
        }

        let solution_result = lp_model.solve();
        let statistics = SolverStatistics {
            solve_time_ms: start_time.elapsed().as_secs_f64() * 1000.0,
            num_variables: num_vars as u32,
            num_constraints: problem.constraints.len() as u32,
        };

        tracing::debug!(
            problem = %problem.name,
            elapsed_ms = statistics.solve_time_ms,
            "microlp finished"
        );

        match solution_result {
            Ok(sol) => {
                let variable_values: Vec<f64> =
                    lp_variables.iter().map(|&var| sol.value(var)).collect();

                // Report the objective in the caller's sense, not the negated one
                let actual_obj = problem.objective.evaluate(&variable_values);

                let mut solution = DomainSolution::optimal(actual_obj, variable_values)
                    .with_statistics(statistics);
                solution.message = format!("Optimal solution found for '{}'", problem.name);
                Ok(solution)
            }
            Err(ResolutionError::Infeasible) => Ok(DomainSolution::new(
                DomainSolutionStatus::Infeasible,
                "Problem is infeasible: no solution satisfies all constraints",
            )
            .with_statistics(statistics)),
            Err(ResolutionError::Unbounded) => Ok(DomainSolution::new(
                DomainSolutionStatus::Unbounded,
                "Problem is unbounded: objective can be improved infinitely",
            )
            .with_statistics(statistics)),
            Err(e) => Err(SolverError::ExecutionFailed(format!("{:?}", e))),
        }
    }

    fn name(&self) -> &str {
        "microlp"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Constraint, ObjectiveFunction, Variable};

    #[test]
    fn minimization_with_lower_bounds() {
        // minimize x + y  s.t.  x + 2y ≥ 4,  x ≥ 1
        let problem = OptimizationProblem::new(ObjectiveFunction::new(
            OptimizationType::Minimize,
            vec![1.0, 1.0],
        ))
        .with_name("diet")
        .with_variables(vec![
            Variable::continuous("x").with_bounds(1.0, None),
            Variable::continuous("y"),
        ])
        .add_constraint(Constraint::new(
            ConstraintType::GreaterThanOrEqual,
            vec![1.0, 2.0],
            4.0,
        ));

        let solution = MicroLpSolver::new().solve(&problem).unwrap();
        assert!(solution.is_optimal());
        assert!((solution.optimal_value.unwrap() - 2.5).abs() < 1e-6);
        assert!((solution.variable_values[0] - 1.0).abs() < 1e-6);
        assert!(solution.message.contains("diet"));
        assert_eq!(solution.statistics.num_constraints, 1);
    }

    #[test]
    fn equality_constraint_is_honoured() {
        let problem = OptimizationProblem::new(ObjectiveFunction::new(
            OptimizationType::Maximize,
            vec![3.0, 1.0],
        ))
        .add_constraint(Constraint::new(ConstraintType::Equal, vec![1.0, 1.0], 5.0))
        .add_constraint(Constraint::new(
            ConstraintType::LessThanOrEqual,
            vec![1.0, 0.0],
            2.0,
        ));

        let solution = MicroLpSolver::new().solve(&problem).unwrap();
        assert!((solution.variable_values[0] - 2.0).abs() < 1e-6);
        assert!((solution.variable_values[1] - 3.0).abs() < 1e-6);
        assert!((solution.optimal_value.unwrap() - 9.0).abs() < 1e-6);
    }

    #[test]
    fn invalid_problem_is_rejected_before_solving() {
        let problem = OptimizationProblem::new(ObjectiveFunction::new(
            OptimizationType::Maximize,
            vec![1.0, 1.0],
        ))
        .add_constraint(Constraint::new(
            ConstraintType::LessThanOrEqual,
            vec![1.0],
            1.0,
        ));
        assert!(matches!(
            MicroLpSolver::new().solve(&problem),
            Err(SolverError::InvalidProblem(_))
        ));
    }
}
