#![allow(non_snake_case)]
use linfa_linalg::{cholesky::SolveCInplace, qr::QR, LinalgError};
use ndarray::prelude::*;

use crate::float::Float;

/// Indicator which direct solver computes the Newton direction.
///
/// Every centering iteration solves `H step = -g` for the Hessian `H` and gradient `g` of the barrier-augmented
/// objective. The Hessian is symmetric positive definite at every strictly feasible point of a well posed problem, so
/// the default is a Cholesky factorization. A QR factorization is slower but tolerates worse conditioning.
///
/// Neither solver forms an inverse, and a failed factorization is reported rather than retried with another solver.
#[derive(PartialEq, Eq, Debug, Clone, Copy, Default)]
pub enum EquationSolverType {
    #[default]
    Cholesky,
    Qr,
}

impl EquationSolverType {
    /// Solve `H step = -g`, consuming the Hessian.
    ///
    /// Fails if the factorization breaks down or the solution contains NaN.
    pub(crate) fn newton_direction<F: Float>(
        &self,
        mut H: Array2<F>,
        g: &Array1<F>,
    ) -> Result<Array1<F>, LinalgError> {
        let rhs = g.mapv(|e| -e).insert_axis(Axis(1));
        let solved = match self {
            EquationSolverType::Cholesky => H.solvec_into(rhs)?,
            EquationSolverType::Qr => H.qr()?.solve_into(rhs)?,
        };
        let step = solved.remove_axis(Axis(1));
        if step.iter().any(|e| !e.is_finite()) {
            return Err(LinalgError::NonInvertible);
        }
        Ok(step)
    }
}
