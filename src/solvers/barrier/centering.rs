#![allow(non_snake_case)]
use ndarray::Array1;
use tracing::{debug, trace};

use crate::error::QuadraticProgramError;
use crate::float::Float;
use crate::quadratic_program::QuadraticProgram;

use super::line_search::BacktrackingLineSearch;
use super::newton_equations::EquationSolverType;

/// Damped Newton method minimizing the barrier-augmented objective for one fixed barrier parameter `t`.
///
/// Each iteration solves `H step = -g` and stops once half the Newton decrement `lambda^2 = -g' step` drops to
/// `tol` or below. Otherwise the [`BacktrackingLineSearch`] picks the step length.
///
/// At large `t` the center can sit closer to a constraint than the spacing of floating point numbers around `v`
/// allows, and the decrement no longer reaches `tol`. The step then also stops once the Newton step is below
/// `4 eps ||v||_inf` in every coordinate.
#[derive(PartialEq, Debug, Clone, Copy)]
pub struct CenteringStep<F> {
    pub(crate) tol: F,
    pub(crate) max_iter: usize,
    pub(crate) solver_type: EquationSolverType,
    pub(crate) line_search: BacktrackingLineSearch<F>,
}

/// Outcome of a converged centering step.
#[derive(Debug, Clone)]
pub struct CenteringResult<F> {
    /// Minimizer of the barrier-augmented objective, up to the tolerance
    pub point: Array1<F>,
    /// The running Newton iteration counter passed in, plus the Newton steps taken
    pub iterations: usize,
    /// Every Newton decrement `lambda^2` computed, the last one being the accepted one
    pub decrements: Vec<F>,
}

impl<F: Float> CenteringStep<F> {
    pub fn new(
        tol: F,
        max_iter: usize,
        solver_type: EquationSolverType,
        line_search: BacktrackingLineSearch<F>,
    ) -> Self {
        CenteringStep {
            tol,
            max_iter,
            solver_type,
            line_search,
        }
    }

    /// Run Newton's method from the strictly feasible point `v0`, counting iterations from `n_iter`.
    pub fn run(
        &self,
        problem: &QuadraticProgram<F>,
        t: F,
        v0: &Array1<F>,
        n_iter: usize,
    ) -> Result<CenteringResult<F>, QuadraticProgramError<F>> {
        let mut v = v0.clone();
        let mut iterations = n_iter;
        let mut decrements = Vec::new();
        loop {
            let gradient = problem.gradient(&v, t);
            let H = problem.hessian(&v, t);
            let step = self
                .solver_type
                .newton_direction(H, &gradient)
                .or(Err(QuadraticProgramError::SingularSystem {
                    iteration: iterations,
                }))?;

            let lambda_square = -gradient.dot(&step);
            if !lambda_square.is_finite() {
                return Err(QuadraticProgramError::SingularSystem {
                    iteration: iterations,
                });
            }
            decrements.push(lambda_square);
            trace!(iteration = iterations, ?t, ?lambda_square, "newton step");

            let converged = lambda_square / F::cast(2) <= self.tol;
            if converged || is_below_resolution(&step, &v) {
                if !converged {
                    debug!(
                        iteration = iterations,
                        ?t,
                        ?lambda_square,
                        "newton step below the resolution of the iterate"
                    );
                }
                return Ok(CenteringResult {
                    point: v,
                    iterations,
                    decrements,
                });
            }
            if iterations - n_iter >= self.max_iter {
                return Err(QuadraticProgramError::IterationLimitExceeded(v));
            }

            v = self
                .line_search
                .search(problem, t, &v, &gradient, &step)
                .map_err(|err| err.at_iteration(iterations))?
                .point;
            iterations += 1;
        }
    }
}

fn is_below_resolution<F: Float>(step: &Array1<F>, v: &Array1<F>) -> bool {
    let scale = v.fold(F::zero(), |acc, &e| acc.max(e.abs()));
    let threshold = F::cast(4) * F::epsilon() * scale;
    step.iter().all(|&e| e.abs() <= threshold)
}

#[allow(non_snake_case)]
#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::{array, Array2};

    fn centering(tol: f64) -> CenteringStep<f64> {
        CenteringStep::new(
            tol,
            100,
            EquationSolverType::Cholesky,
            BacktrackingLineSearch::default(),
        )
    }

    fn interval() -> QuadraticProgram<f64> {
        // minimize x^2 on [-1, 1]
        let Q = array![[1.]];
        let p = array![0.];
        let A = array![[1.], [-1.]];
        let b = array![1., 1.];
        QuadraticProgram::target(&Q, &p).ub(&A, &b).build().unwrap()
    }

    #[test]
    fn test_interval_center_is_origin() {
        // By symmetry the barrier minimizer is 0 for every t
        let problem = interval();
        for t in [1., 10., 1000.] {
            let res = centering(1e-10).run(&problem, t, &array![0.9], 0).unwrap();
            assert_abs_diff_eq!(res.point[0], 0., epsilon = 1e-5);
            assert!(res.iterations > 0);
            assert_eq!(res.decrements.len(), res.iterations + 1);
        }
    }

    #[test]
    fn test_decrement_non_increasing_near_convergence() {
        let problem = interval();
        let res = centering(1e-12).run(&problem, 1., &array![0.9], 0).unwrap();
        assert!(res.decrements.len() >= 3);
        for pair in res.decrements.windows(2) {
            if pair[0] < 0.1 {
                assert!(pair[1] <= pair[0], "{:?}", res.decrements);
            }
        }
        assert!(res.decrements.last().unwrap() / 2. <= 1e-12);
    }

    #[test]
    fn test_counter_accumulates() {
        let problem = interval();
        let fresh = centering(1e-8).run(&problem, 1., &array![0.5], 0).unwrap();
        let continued = centering(1e-8).run(&problem, 1., &array![0.5], 7).unwrap();
        assert_eq!(continued.iterations, fresh.iterations + 7);
        assert_eq!(continued.point, fresh.point);
    }

    #[test]
    fn test_already_centered_takes_no_steps() {
        let problem = interval();
        let res = centering(1e-8).run(&problem, 1., &array![0.], 3).unwrap();
        assert_eq!(res.iterations, 3);
        assert_eq!(res.point, array![0.]);
    }

    #[test]
    fn test_box_center_with_linear_term() {
        // minimize x^2 + y^2 - x on the unit box, t = 100: the center is close to (0.5, 0)
        let Q = Array2::<f64>::eye(2);
        let p = array![-1., 0.];
        let A = array![[1., 0.], [0., 1.], [-1., 0.], [0., -1.]];
        let b = array![1., 1., 1., 1.];
        let problem = QuadraticProgram::target(&Q, &p).ub(&A, &b).build().unwrap();
        let res = centering(1e-10).run(&problem, 100., &array![-0.5, 0.5], 0).unwrap();
        assert_abs_diff_eq!(problem.gradient(&res.point, 100.), array![0., 0.], epsilon = 1e-3);
        assert_abs_diff_eq!(res.point, array![0.5, 0.], epsilon = 2e-2);
    }

    #[test]
    fn test_singular_hessian() {
        // The constraints leave the second coordinate unbounded and Q adds no curvature
        let Q = Array2::<f64>::zeros((2, 2));
        let p = array![0., 1.];
        let A = array![[1., 0.], [-1., 0.]];
        let b = array![1., 1.];
        let problem = QuadraticProgram::target(&Q, &p).ub(&A, &b).build().unwrap();
        assert!(matches!(
            centering(1e-8).run(&problem, 1., &array![0., 0.], 4),
            Err(QuadraticProgramError::SingularSystem { iteration: 4 })
        ));
    }

    #[test]
    fn test_line_search_stall_reports_newton_iteration() {
        // minimize x^2 + 5x on [-1, 1] at t = 100. The first step from 0.9 needs one backtrack and lands near -0.25,
        // where the second step overshoots -1 even at half length.
        let Q = array![[1.]];
        let p = array![5.];
        let A = array![[1.], [-1.]];
        let b = array![1., 1.];
        let problem = QuadraticProgram::target(&Q, &p).ub(&A, &b).build().unwrap();
        let centering = CenteringStep::new(
            1e-8,
            100,
            EquationSolverType::Cholesky,
            BacktrackingLineSearch::new(0.01, 0.5, 1).unwrap(),
        );
        match centering.run(&problem, 100., &array![0.9], 5) {
            Err(QuadraticProgramError::LineSearchStall {
                iteration,
                backtracks,
                step_length,
            }) => {
                assert_eq!(iteration, 6);
                assert_eq!(backtracks, 1);
                assert_eq!(step_length, 0.5);
            }
            other => panic!("expected LineSearchStall, got {other:?}"),
        }
    }

    #[test]
    fn test_stops_at_the_resolution_of_the_iterate() {
        // minimize x^2 - 4x on [-1, 1] at t = 1e13. The slack of the center is about 5e-14, only a few hundred ulps
        // of x, so the decrement stays above 2e-16 at every representable point next to it.
        let Q = array![[1.]];
        let p = array![-4.];
        let A = array![[1.], [-1.]];
        let b = array![1., 1.];
        let problem = QuadraticProgram::target(&Q, &p).ub(&A, &b).build().unwrap();
        let res = centering(1e-16).run(&problem, 1e13, &array![0.5], 0).unwrap();
        assert!(res.point[0] < 1.);
        assert_abs_diff_eq!(res.point[0], 1., epsilon = 1e-12);
        assert!(res.decrements.last().unwrap() / 2. > 1e-16);
        assert!(res.iterations < 100);
    }

    #[test]
    fn test_iteration_limit() {
        let problem = interval();
        let centering = CenteringStep::new(
            1e-12,
            1,
            EquationSolverType::Cholesky,
            BacktrackingLineSearch::default(),
        );
        assert!(matches!(
            centering.run(&problem, 1., &array![0.9], 0),
            Err(QuadraticProgramError::IterationLimitExceeded(_))
        ));
    }
}
