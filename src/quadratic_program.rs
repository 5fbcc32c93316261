#![allow(non_snake_case)]
//! Definition of a convex quadratic program with linear inequality constraints.
//!
//! To get started, see the documentation of [`QuadraticProgram`] on how to build a problem through the builder pattern.
use ndarray::{Array1, Array2};

use crate::{error::QuadraticProgramError, float::Float, oracles};

/// A convex quadratic program with strict linear inequality constraints.
///
/// Variables throughout this crate use the following naming convention:
/// ```text
/// min_v v'Qv + p'v
/// st    A v < b
/// ```
/// With `Q` a symmetric positive semi-definite matrix, `p` the linear cost vector, and constraints given by matrix `A`
/// and vector `b`. The inequalities are strict: the barrier method only ever visits the interior of the polyhedron.
///
/// To construct a problem, use [`QuadraticProgram::target`].
#[derive(Debug, Clone)]
pub struct QuadraticProgram<F> {
    Q: Array2<F>,
    p: Array1<F>,
    A: Array2<F>,
    b: Array1<F>,
}

impl<F: Float> QuadraticProgram<F> {
    /// Build a quadratic program using the builder pattern.
    ///
    /// Specify the quadratic term `Q` and linear term `p` of the objective `v'Qv + p'v`.
    /// Returns a [`QuadraticProgramBuilder`] that must be given inequality constraints before it can be built.
    pub fn target<'a>(Q: &'a Array2<F>, p: &'a Array1<F>) -> QuadraticProgramBuilder<'a, F> {
        QuadraticProgramBuilder::new(Q, p)
    }

    /// Return the quadratic term of the objective
    pub fn Q(&self) -> &Array2<F> {
        &self.Q
    }

    /// Return the linear term of the objective
    pub fn p(&self) -> &Array1<F> {
        &self.p
    }

    /// Return the constraint matrix
    pub fn A(&self) -> &Array2<F> {
        &self.A
    }

    /// Return the constraint vector
    pub fn b(&self) -> &Array1<F> {
        &self.b
    }

    /// Number of variables
    pub fn n(&self) -> usize {
        self.p.len()
    }

    /// Number of inequality constraints
    pub fn m(&self) -> usize {
        self.b.len()
    }

    /// See [`oracles::objective`].
    pub fn objective(&self, v: &Array1<F>) -> F {
        oracles::objective(&self.Q, &self.p, v)
    }

    /// See [`oracles::barrier_objective`].
    pub fn barrier_objective(&self, v: &Array1<F>, t: F) -> Option<F> {
        oracles::barrier_objective(&self.Q, &self.p, &self.A, &self.b, v, t)
    }

    /// See [`oracles::gradient`].
    pub fn gradient(&self, v: &Array1<F>, t: F) -> Array1<F> {
        oracles::gradient(&self.Q, &self.p, &self.A, &self.b, v, t)
    }

    /// See [`oracles::hessian`].
    pub fn hessian(&self, v: &Array1<F>, t: F) -> Array2<F> {
        oracles::hessian(&self.Q, &self.A, &self.b, v, t)
    }

    /// Verify that `v` has the right dimension and satisfies `Av < b` strictly.
    ///
    /// Returns an `InfeasibleStart` error naming the first constraint whose slack is not strictly positive.
    pub fn check_strictly_feasible(&self, v: &Array1<F>) -> Result<(), QuadraticProgramError<F>> {
        if v.len() != self.n() {
            return Err(QuadraticProgramError::IncompatibleInputDimensions);
        }
        let s = oracles::slacks(&self.A, &self.b, v);
        match s.iter().position(|&e| !(e > F::zero())) {
            Some(row) => Err(QuadraticProgramError::InfeasibleStart { row, slack: s[row] }),
            None => Ok(()),
        }
    }

    pub(crate) fn is_strictly_feasible(&self, v: &Array1<F>) -> bool {
        oracles::slacks(&self.A, &self.b, v)
            .iter()
            .all(|&e| e > F::zero())
    }
}

/// Construct a quadratic program from an objective and inequality constraints.
pub struct QuadraticProgramBuilder<'a, F> {
    Q: &'a Array2<F>,
    p: &'a Array1<F>,
    ub: Option<(&'a Array2<F>, &'a Array1<F>)>,
}

impl<'a, F: Float> QuadraticProgramBuilder<'a, F> {
    /// Start building a problem. Takes the quadratic term `Q` and linear term `p` of the objective `v'Qv + p'v`.
    pub fn new(Q: &'a Array2<F>, p: &'a Array1<F>) -> QuadraticProgramBuilder<'a, F> {
        QuadraticProgramBuilder { Q, p, ub: None }
    }

    /// Set the inequality constraints of the problem, such that `A v < b`.
    /// To prevent numerical problems, it is advisable to remove redundant constraints and to scale all constraints to
    /// roughly the same order of magnitude.
    pub fn ub(mut self, A: &'a Array2<F>, b: &'a Array1<F>) -> Self {
        self.ub = Some((A, b));
        self
    }

    /// Construct a quadratic program from the provided inputs, validating the input values.
    ///
    /// Returns an error if no constraints were given, if any of the dimensions do not conform to
    /// `Q: n x n, p: n, A: m x n, b: m`, or if `Q` is not symmetric.
    pub fn build(self) -> Result<QuadraticProgram<F>, QuadraticProgramError<F>> {
        let (A, b) = self.ub.ok_or(QuadraticProgramError::Unconstrained)?;
        let n = self.p.len();
        let (m, ncols) = A.dim();
        if m == 0 {
            return Err(QuadraticProgramError::Unconstrained);
        }
        if self.Q.dim() != (n, n) || ncols != n || b.len() != m {
            return Err(QuadraticProgramError::IncompatibleInputDimensions);
        }

        let tol = F::sqrt_epsilon();
        for row in 0..n {
            for col in (row + 1)..n {
                let (upper, lower) = (self.Q[[row, col]], self.Q[[col, row]]);
                let scale = upper.abs().max(lower.abs()).max(F::one());
                if (upper - lower).abs() > tol * scale {
                    return Err(QuadraticProgramError::AsymmetricQuadraticTerm { row, col });
                }
            }
        }

        Ok(QuadraticProgram {
            Q: self.Q.to_owned(),
            p: self.p.to_owned(),
            A: A.to_owned(),
            b: b.to_owned(),
        })
    }
}

#[allow(non_snake_case)]
#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn test_build_unit_box() {
        let Q = Array2::<f64>::eye(2);
        let p = array![0., 0.];
        let A = array![[1., 0.], [0., 1.], [-1., 0.], [0., -1.]];
        let b = array![1., 1., 1., 1.];
        let problem = QuadraticProgram::target(&Q, &p).ub(&A, &b).build().unwrap();
        assert_eq!(problem.n(), 2);
        assert_eq!(problem.m(), 4);
        assert_abs_diff_eq!(problem.objective(&array![0.5, -0.5]), 0.5);
    }

    #[test]
    fn test_build_without_constraints() {
        let Q = Array2::<f64>::eye(2);
        let p = array![0., 0.];
        let res = QuadraticProgram::target(&Q, &p).build();
        assert!(matches!(res, Err(QuadraticProgramError::Unconstrained)));

        let A = Array2::zeros((0, 2));
        let b = Array1::zeros(0);
        let res = QuadraticProgram::target(&Q, &p).ub(&A, &b).build();
        assert!(matches!(res, Err(QuadraticProgramError::Unconstrained)));
    }

    #[test]
    fn test_build_incompatible_dimensions() {
        let Q = Array2::<f64>::eye(2);
        let p = array![0., 0.];
        let A = array![[1., 0., 0.]];
        let b = array![1.];
        let res = QuadraticProgram::target(&Q, &p).ub(&A, &b).build();
        assert!(matches!(
            res,
            Err(QuadraticProgramError::IncompatibleInputDimensions)
        ));

        let A = array![[1., 0.]];
        let b = array![1., 2.];
        let res = QuadraticProgram::target(&Q, &p).ub(&A, &b).build();
        assert!(matches!(
            res,
            Err(QuadraticProgramError::IncompatibleInputDimensions)
        ));

        let p = array![0.];
        let b = array![1.];
        let res = QuadraticProgram::target(&Q, &p).ub(&A, &b).build();
        assert!(matches!(
            res,
            Err(QuadraticProgramError::IncompatibleInputDimensions)
        ));
    }

    #[test]
    fn test_build_asymmetric_quadratic_term() {
        let Q = array![[1., 2.], [0., 1.]];
        let p = array![0., 0.];
        let A = array![[1., 0.]];
        let b = array![1.];
        let res = QuadraticProgram::target(&Q, &p).ub(&A, &b).build();
        assert!(matches!(
            res,
            Err(QuadraticProgramError::AsymmetricQuadraticTerm { row: 0, col: 1 })
        ));
    }

    #[test]
    fn test_check_strictly_feasible() {
        let Q = array![[1.]];
        let p = array![0.];
        let A = array![[1.], [-1.]];
        let b = array![1., 1.];
        let problem = QuadraticProgram::target(&Q, &p).ub(&A, &b).build().unwrap();

        assert!(problem.check_strictly_feasible(&array![0.99]).is_ok());
        match problem.check_strictly_feasible(&array![-1.]) {
            Err(QuadraticProgramError::InfeasibleStart { row, slack }) => {
                assert_eq!(row, 1);
                assert_abs_diff_eq!(slack, 0.);
            }
            other => panic!("expected InfeasibleStart, got {other:?}"),
        }
        match problem.check_strictly_feasible(&array![3.]) {
            Err(QuadraticProgramError::InfeasibleStart { row, slack }) => {
                assert_eq!(row, 0);
                assert_abs_diff_eq!(slack, -2.);
            }
            other => panic!("expected InfeasibleStart, got {other:?}"),
        }
        assert!(matches!(
            problem.check_strictly_feasible(&array![0., 0.]),
            Err(QuadraticProgramError::IncompatibleInputDimensions)
        ));
    }
}
