//! Solvers for quadratic programs.
pub mod barrier;

pub use barrier::BarrierMethod;
use ndarray::{Array1, ArrayView1};

use std::fmt::Debug;

use crate::{error::QuadraticProgramError, quadratic_program::QuadraticProgram};

/// Solver trait that any solver should implement to make experimentation with different solvers more easy.
pub trait Solver<F: Debug> {
    /// Solve a quadratic program from the strictly feasible starting point `v0`. Returns a
    /// [`QuadraticProgramError`] if the solver runs into problems.
    /// The possible error values depend on the specific solver.
    fn solve(
        &self,
        problem: &QuadraticProgram<F>,
        v0: &Array1<F>,
    ) -> Result<Trajectory<F>, QuadraticProgramError<F>>;
}

/// The sequence of iterates visited by a successful solve.
///
/// Entry 0 is the starting point, every further entry is the center computed in one outer iteration.
#[derive(Debug, Clone)]
pub struct Trajectory<F> {
    iterations: Vec<usize>,
    points: Vec<Array1<F>>,
    objective_values: Vec<F>,
    barrier_parameters: Vec<F>,
    duality_gaps: Vec<F>,
    newton_iterations: usize,
}

impl<F> Trajectory<F> {
    pub(crate) fn new(v0: Array1<F>, objective: F) -> Self {
        Trajectory {
            iterations: vec![0],
            points: vec![v0],
            objective_values: vec![objective],
            barrier_parameters: Vec::new(),
            duality_gaps: Vec::new(),
            newton_iterations: 0,
        }
    }

    pub(crate) fn push(&mut self, iteration: usize, point: Array1<F>, objective: F, t: F, gap: F) {
        self.iterations.push(iteration);
        self.points.push(point);
        self.objective_values.push(objective);
        self.barrier_parameters.push(t);
        self.duality_gaps.push(gap);
    }

    pub(crate) fn set_newton_iterations(&mut self, newton_iterations: usize) {
        self.newton_iterations = newton_iterations;
    }

    /// Cumulative Newton iteration count at the start of each outer iteration, one entry per point.
    pub fn iterations(&self) -> &[usize] {
        &self.iterations
    }

    /// The starting point followed by the center found in each outer iteration.
    pub fn points(&self) -> &[Array1<F>] {
        &self.points
    }

    /// Objective value `v'Qv + p'v` of every point.
    pub fn objective_values(&self) -> ArrayView1<'_, F> {
        ArrayView1::from(self.objective_values.as_slice())
    }

    /// The barrier parameter of each outer iteration. Has one entry less than [`points`](Trajectory::points).
    pub fn barrier_parameters(&self) -> &[F] {
        &self.barrier_parameters
    }

    /// The duality gap bound `m / t` of each outer iteration. Has one entry less than [`points`](Trajectory::points).
    pub fn duality_gaps(&self) -> &[F] {
        &self.duality_gaps
    }

    /// Total number of Newton iterations over all outer iterations
    pub fn newton_iterations(&self) -> usize {
        self.newton_iterations
    }

    /// Number of outer (centering) iterations
    pub fn outer_iterations(&self) -> usize {
        self.points.len() - 1
    }

    /// The solution vector
    pub fn x(&self) -> &Array1<F> {
        // Never empty, the starting point is always present
        &self.points[self.points.len() - 1]
    }

    /// The objective value at the solution
    pub fn fun(&self) -> &F {
        &self.objective_values[self.objective_values.len() - 1]
    }
}
