#![allow(non_snake_case)]
use ndarray::Array1;
use tracing::trace;

use crate::error::QuadraticProgramError;
use crate::float::Float;
use crate::quadratic_program::QuadraticProgram;

/// Backtracking line search on the barrier-augmented objective.
///
/// Starting from `initial_step`, the step length is multiplied by `beta` while the trial point is not strictly
/// feasible, or while it does not satisfy the sufficient decrease condition
/// ```text
/// g(v + s d) <= g(v) + alpha s grad' d
/// ```
/// Feasibility is tested first, so the barrier is never evaluated outside the polyhedron.
///
/// Close to a center at large `t` the decrease can be smaller than the rounding error of `g(v)`. A trial point whose
/// value is within that resolution of `g(v)` is then accepted on the slope instead:
/// ```text
/// grad(v + s d)' d <= (2 alpha - 1) grad' d
/// ```
/// A step that leaves `v` unchanged is never accepted.
#[derive(PartialEq, Debug, Clone, Copy)]
pub struct BacktrackingLineSearch<F> {
    pub(crate) alpha: F,
    pub(crate) beta: F,
    pub(crate) initial_step: F,
    pub(crate) max_backtracks: usize,
}

/// An accepted step of the line search.
#[derive(Debug, Clone)]
pub struct LineSearchStep<F> {
    /// The new iterate `v + length * direction`
    pub point: Array1<F>,
    /// The accepted step length
    pub length: F,
    /// How often the step length was shrunk
    pub backtracks: usize,
}

impl<F: Float> Default for BacktrackingLineSearch<F> {
    fn default() -> Self {
        BacktrackingLineSearch {
            alpha: F::cast(1e-2),
            beta: F::cast(0.5),
            initial_step: F::one(),
            max_backtracks: 100,
        }
    }
}

impl<F: Float> BacktrackingLineSearch<F> {
    /// Create a line search with sufficient decrease constant `0 < alpha < 0.5` and shrink factor `0 < beta < 1`.
    pub fn new(alpha: F, beta: F, max_backtracks: usize) -> Result<Self, QuadraticProgramError<F>> {
        if alpha <= F::zero() || alpha >= F::cast(0.5) {
            return Err(QuadraticProgramError::InvalidParameter(
                "alpha must be between 0 and 0.5 (exclusive)",
            ));
        }
        if beta <= F::zero() || beta >= F::one() {
            return Err(QuadraticProgramError::InvalidParameter(
                "beta must be between 0 and 1 (exclusive)",
            ));
        }
        if max_backtracks == 0 {
            return Err(QuadraticProgramError::InvalidParameter(
                "max_backtracks must be at least 1",
            ));
        }
        Ok(BacktrackingLineSearch {
            alpha,
            beta,
            initial_step: F::one(),
            max_backtracks,
        })
    }

    /// Search along `direction` from the strictly feasible point `v` for the barrier problem with parameter `t`.
    ///
    /// `gradient` is the gradient of the barrier-augmented objective at `v`.
    /// Returns a `LineSearchStall` error if no acceptable step is found within `max_backtracks` shrinks, which happens
    /// when `direction` is not a descent direction, or as soon as the step no longer changes `v`. An `InfeasibleStart` error is returned if `v` itself is not
    /// strictly feasible. The `iteration` of a stall is filled in by the caller.
    pub fn search(
        &self,
        problem: &QuadraticProgram<F>,
        t: F,
        v: &Array1<F>,
        gradient: &Array1<F>,
        direction: &Array1<F>,
    ) -> Result<LineSearchStep<F>, QuadraticProgramError<F>> {
        problem.check_strictly_feasible(v)?;
        // Only an overflowing objective is left to reject here
        let Some(value) = problem.barrier_objective(v, t) else {
            return Err(QuadraticProgramError::LineSearchStall {
                iteration: 0,
                backtracks: 0,
                step_length: F::zero(),
            });
        };
        let slope = gradient.dot(direction);
        let resolution = F::cast(1000) * F::epsilon() * value.abs();

        let mut length = self.initial_step;
        let mut backtracks = 0;
        loop {
            let trial = v + &(direction * length);
            if trial == *v {
                // Shorter steps cannot move the point either
                break;
            }
            if self.is_acceptable(problem, t, &trial, direction, value, slope, length, resolution) {
                trace!(?length, backtracks, "line search accepted step");
                return Ok(LineSearchStep {
                    point: trial,
                    length,
                    backtracks,
                });
            }
            if backtracks == self.max_backtracks {
                break;
            }
            length *= self.beta;
            backtracks += 1;
        }
        trace!(?length, backtracks, "line search stalled");
        Err(QuadraticProgramError::LineSearchStall {
            iteration: 0,
            backtracks,
            step_length: length,
        })
    }

    #[allow(clippy::too_many_arguments)]
    fn is_acceptable(
        &self,
        problem: &QuadraticProgram<F>,
        t: F,
        trial: &Array1<F>,
        direction: &Array1<F>,
        value: F,
        slope: F,
        length: F,
        resolution: F,
    ) -> bool {
        if !problem.is_strictly_feasible(trial) {
            return false;
        }
        let Some(trial_value) = problem.barrier_objective(trial, t) else {
            return false;
        };
        if trial_value <= value + self.alpha * length * slope {
            return true;
        }
        trial_value <= value + resolution
            && problem.gradient(trial, t).dot(direction) <= (F::cast(2) * self.alpha - F::one()) * slope
    }
}
