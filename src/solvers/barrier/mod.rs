#![allow(non_snake_case)]
//! Implementation of the logarithmic barrier method \[1\] for convex quadratic programs.
//!
//! The inequality constraints `Av < b` are replaced by the barrier `-sum_i log(b_i - A_i v)`, and the resulting
//! smooth problem `min t f0(v) - sum_i log(b_i - A_i v)` is solved with Newton's method (the centering step) for an
//! increasing sequence of barrier parameters `t_k = t0 mu^k`. Every center is within `m / t_k` of the optimum, so the
//! outer loop stops as soon as this bound drops below the tolerance.
//!
//! .. \[1\] Boyd, Stephen, and Lieven Vandenberghe. "Convex optimization", chapter 11.3.
//!        Cambridge University Press, 2004.
//!
mod centering;
mod line_search;
mod newton_equations;

use ndarray::{Array1, Array2};
use tracing::{debug, debug_span, warn};

pub use centering::{CenteringResult, CenteringStep};
pub use line_search::{BacktrackingLineSearch, LineSearchStep};
pub use newton_equations::EquationSolverType;

use crate::error::QuadraticProgramError;
use crate::float::Float;
use crate::quadratic_program::QuadraticProgram;
use crate::solvers::{Solver, Trajectory};

/// Builder struct to customize the [`BarrierMethod`] solver.
///
/// After constructing the default solver with [`BarrierMethod::custom`],
/// use the other methods to update specific settings, and finally call [`build`](BarrierMethodBuilder::build) to
/// validate the customized settings and create the solver.
pub struct BarrierMethodBuilder<F> {
    tol: F,
    mu: F,
    t0: F,
    alpha: F,
    beta: F,
    max_backtracks: usize,
    max_newton_iter: usize,
    solver_type: EquationSolverType,
    disp: bool,
}

impl<F: Float> BarrierMethodBuilder<F> {
    pub(crate) fn new() -> BarrierMethodBuilder<F> {
        BarrierMethodBuilder {
            tol: F::cast(1e-6),
            mu: F::cast(10),
            t0: F::one(),
            alpha: F::cast(1e-2),
            beta: F::cast(0.5),
            max_backtracks: 100,
            max_newton_iter: 100,
            solver_type: EquationSolverType::Cholesky,
            disp: false,
        }
    }

    /// Set the convergence tolerance. It bounds both half the Newton decrement at the end of every centering step and
    /// the duality gap bound `m / t` at termination. Should be a small positive value.
    pub fn tol(mut self, tol: F) -> Self {
        self.tol = tol;
        self
    }

    /// Growth factor of the barrier parameter, `t <- mu t` after every outer iteration. Must be larger than one.
    ///
    /// A large `mu` needs few outer iterations, but every centering step starts further from its center and needs
    /// more Newton iterations. Values between 10 and 100 usually work well.
    pub fn mu(mut self, mu: F) -> Self {
        self.mu = mu;
        self
    }

    /// Barrier parameter of the first outer iteration. Must be positive.
    pub fn t0(mut self, t0: F) -> Self {
        self.t0 = t0;
        self
    }

    /// Sufficient decrease constant of the backtracking line search, between 0 and 0.5 (exclusive).
    pub fn alpha(mut self, alpha: F) -> Self {
        self.alpha = alpha;
        self
    }

    /// Shrink factor of the backtracking line search, between 0 and 1 (exclusive).
    pub fn beta(mut self, beta: F) -> Self {
        self.beta = beta;
        self
    }

    /// Maximum number of times the line search shrinks a step before giving up.
    pub fn max_backtracks(mut self, max_backtracks: usize) -> Self {
        self.max_backtracks = max_backtracks;
        self
    }

    /// Maximum number of Newton iterations in a single centering step before we give up on the problem.
    pub fn max_newton_iter(mut self, max_newton_iter: usize) -> Self {
        self.max_newton_iter = max_newton_iter;
        self
    }

    /// Indicator which direct solver computes the Newton direction. See [`EquationSolverType`].
    pub fn solver_type(mut self, solver_type: EquationSolverType) -> Self {
        self.solver_type = solver_type;
        self
    }

    /// Set to true to print the barrier parameter, Newton iteration count, duality gap bound and objective value to
    /// stdout at every outer iteration.
    pub fn disp(mut self, disp: bool) -> Self {
        self.disp = disp;
        self
    }

    /// Construct the solver, validating the settings.
    ///
    /// Returns a `NonTerminatingParameters` error if the tolerance is not positive or `mu` is not larger than one,
    /// and an `InvalidParameter` error if one of the other settings is out of range.
    pub fn build(self) -> Result<BarrierMethod<F>, QuadraticProgramError<F>> {
        if !(self.tol > F::zero()) || !(self.mu > F::one()) {
            return Err(QuadraticProgramError::NonTerminatingParameters {
                tol: self.tol,
                mu: self.mu,
            });
        }
        if !(self.t0 > F::zero()) || !self.t0.is_finite() {
            return Err(QuadraticProgramError::InvalidParameter(
                "The initial barrier parameter t0 must be positive and finite.",
            ));
        }
        if self.max_newton_iter == 0 {
            return Err(QuadraticProgramError::InvalidParameter(
                "max_newton_iter must be at least 1",
            ));
        }
        let line_search = BacktrackingLineSearch::new(self.alpha, self.beta, self.max_backtracks)?;
        Ok(BarrierMethod {
            tol: self.tol,
            mu: self.mu,
            t0: self.t0,
            disp: self.disp,
            centering: CenteringStep::new(
                self.tol,
                self.max_newton_iter,
                self.solver_type,
                line_search,
            ),
        })
    }
}

#[derive(PartialEq, Debug)]
/// Barrier method solver for convex quadratic programs.
///
/// To get started quickly, use the [`default`](BarrierMethod::default()) method to initialize the solver with default parameters.
/// See the [`custom`](BarrierMethod::custom()) for customization options through the builder pattern.
pub struct BarrierMethod<F> {
    tol: F,
    mu: F,
    t0: F,
    disp: bool,
    centering: CenteringStep<F>,
}

impl<F: Float> Default for BarrierMethod<F> {
    /// The barrier method with default configuration.
    fn default() -> Self {
        BarrierMethodBuilder::new().build().unwrap()
    }
}

impl<F: Float> Solver<F> for BarrierMethod<F> {
    fn solve(
        &self,
        problem: &QuadraticProgram<F>,
        v0: &Array1<F>,
    ) -> Result<Trajectory<F>, QuadraticProgramError<F>> {
        let _span = debug_span!("barrier_method", n = problem.n(), m = problem.m()).entered();
        problem.check_strictly_feasible(v0)?;

        let m = F::cast(problem.m());
        let mut trajectory = Trajectory::new(v0.clone(), problem.objective(v0));
        let mut v = v0.clone();
        let mut t = self.t0;
        let mut n_iter = 0;

        if self.disp {
            println!("t         \tnewton    \tgap       \tobj       ");
        }
        loop {
            let centered = self.centering.run(problem, t, &v, 0).map_err(|err| {
                warn!(?t, newton_iterations = n_iter, "centering step failed: {err}");
                err
            })?;
            v = centered.point;
            let gap = m / t;
            let objective = problem.objective(&v);
            trajectory.push(n_iter, v.clone(), objective, t, gap);
            n_iter += centered.iterations;

            debug!(?t, ?gap, ?objective, newton_iterations = n_iter, "outer iteration");
            if self.disp {
                println!("{t:<10.3e}\t{n_iter:<10}\t{gap:<10.3e}\t{objective:.8}");
            }

            if gap < self.tol {
                trajectory.set_newton_iterations(n_iter);
                return Ok(trajectory);
            }
            t *= self.mu;
        }
    }
}

impl<F: Float> BarrierMethod<F> {
    /// Construct a new barrier method solver, to be customized through the builder pattern.
    ///
    /// ```rust
    /// use approx::assert_abs_diff_eq;
    /// use qp::prelude::*;
    /// use ndarray::array;
    ///
    ///
    /// // minimize x^2 + y^2 - 4x - y on the unit box
    /// let Q = array![[1f64, 0.], [0., 1.]];
    /// let p = array![-4., -1.];
    /// let A = array![[1., 0.], [0., 1.], [-1., 0.], [0., -1.]];
    /// let b = array![1., 1., 1., 1.];
    ///
    /// let problem = QuadraticProgram::target(&Q, &p)
    ///     .ub(&A, &b)
    ///     .build()
    ///     .unwrap();
    /// let solver = BarrierMethod::custom().tol(1e-6).mu(20.).build().unwrap();
    /// let res = solver.solve(&problem, &array![0., 0.]).unwrap();
    ///
    /// assert_abs_diff_eq!(*res.x(), array![1., 0.5], epsilon = 1e-4);
    ///
    /// ```
    pub fn custom() -> BarrierMethodBuilder<F> {
        BarrierMethodBuilder::new()
    }

    /// The Newton method used for every centering step.
    pub fn centering_step(&self) -> &CenteringStep<F> {
        &self.centering
    }
}

/// Solve `min v'Qv + p'v st Av < b` from the strictly feasible point `v0` with tolerance `eps` and barrier growth
/// factor `mu`, using default settings for everything else.
///
/// Returns the full [`Trajectory`] of the solve, or an error if the problem, starting point or parameters are invalid.
pub fn solve<F: Float>(
    Q: &Array2<F>,
    p: &Array1<F>,
    A: &Array2<F>,
    b: &Array1<F>,
    v0: &Array1<F>,
    eps: F,
    mu: F,
) -> Result<Trajectory<F>, QuadraticProgramError<F>> {
    let problem = QuadraticProgram::target(Q, p).ub(A, b).build()?;
    let solver = BarrierMethod::custom().tol(eps).mu(mu).build()?;
    solver.solve(&problem, v0)
}
