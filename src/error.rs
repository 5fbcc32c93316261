use ndarray::Array1;
use std::fmt::Debug;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuadraticProgramError<F: Debug> {
    #[error("The problem has no inequality constraints. The barrier method needs at least one constraint to build a barrier from.")]
    Unconstrained,
    #[error("The dimensions of your objective- and constraint arrays or of the starting point do not align.")]
    IncompatibleInputDimensions,
    #[error("The quadratic term is not symmetric: Q[{row}, {col}] differs from Q[{col}, {row}].")]
    AsymmetricQuadraticTerm { row: usize, col: usize },
    #[error("A parameter was set to an invalid value: {0}")]
    InvalidParameter(&'static str),
    #[error("The stopping rule m / t < tol can never be met with tol = {tol:?} and mu = {mu:?}. The tolerance must be positive and mu must be larger than one.")]
    NonTerminatingParameters { tol: F, mu: F },
    #[error("The starting point is not strictly feasible: constraint {row} has slack {slack:?}, but b - Av must be strictly positive.")]
    InfeasibleStart { row: usize, slack: F },
    #[error("The Newton system could not be solved at Newton iteration {iteration}. The Hessian is singular, which usually means Q is not positive semi-definite or the constraints do not bound every direction.")]
    SingularSystem { iteration: usize },
    #[error("The line search did not find an acceptable step at Newton iteration {iteration} after {backtracks} backtracks (last step length {step_length:?}).")]
    LineSearchStall {
        iteration: usize,
        backtracks: usize,
        step_length: F,
    },
    #[error("The centering step failed to converge within the maximum number of Newton iterations. Last iterate:\n{0:#?}")]
    IterationLimitExceeded(Array1<F>),
}

impl<F: Debug> QuadraticProgramError<F> {
    /// Attach the Newton iteration at which an error surfaced.
    pub(crate) fn at_iteration(self, iteration: usize) -> Self {
        match self {
            QuadraticProgramError::SingularSystem { .. } => {
                QuadraticProgramError::SingularSystem { iteration }
            }
            QuadraticProgramError::LineSearchStall {
                backtracks,
                step_length,
                ..
            } => QuadraticProgramError::LineSearchStall {
                iteration,
                backtracks,
                step_length,
            },
            other => other,
        }
    }
}
