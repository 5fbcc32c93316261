//! A pure-Rust logarithmic barrier solver for convex quadratic programs with linear inequality constraints.
//!
//! # Quadratic programs
//!
//! The problems solved by this crate are defined as:
//!
//! ```text
//!    min_v v'Qv + p'v
//!    st    A v < b
//! ```
//!
//! with `Q` symmetric positive semi-definite. The solver needs a strictly feasible starting point and returns the
//! whole trajectory of iterates, one per barrier parameter, so that the progress of the method can be inspected.
//!
//! # Example
//! ```
//! use approx::assert_abs_diff_eq;
//! use ndarray::array;
//!
//! use qp::QuadraticProgram;
//! use qp::solvers::{BarrierMethod, Solver};
//! use qp::solvers::barrier::EquationSolverType;
//!
//!
//! let Q = array![[1f64, 0.], [0., 1.]];
//! let p = array![0., 0.];
//! let A = array![[1., 0.], [0., 1.], [-1., 0.], [0., -1.]];
//! let b = array![1., 1., 1., 1.];
//!
//! let problem = QuadraticProgram::target(&Q, &p)
//!     // The barrier method needs at least one inequality constraint.
//!     .ub(&A, &b)
//!     .build()
//!     .unwrap();
//!
//!     // These are the default values you can overwrite.
//!     // You may omit any option for which the default is good enough for you
//! let solver = BarrierMethod::custom()
//!     .tol(1e-6)
//!     .mu(10.)
//!     .t0(1.)
//!     .alpha(0.01)
//!     .beta(0.5)
//!     .max_backtracks(100)
//!     .max_newton_iter(100)
//!     .solver_type(EquationSolverType::Cholesky)
//!     .disp(false)
//!     .build()
//!     .unwrap();
//!
//! let res = solver.solve(&problem, &array![0.5, -0.5]).unwrap();
//!
//! assert_abs_diff_eq!(*res.x(), array![0., 0.], epsilon = 1e-3);
//! assert_abs_diff_eq!(*res.fun(), 0., epsilon = 1e-6);
//! ```
//!
//! # Logging
//! Progress is reported through [`tracing`](https://docs.rs/tracing) at the `debug` and `trace` levels. The crate
//! never installs a subscriber. For a quick look at the iterations, enable `disp` on the solver instead.

pub mod error;
pub(crate) mod float;
pub mod oracles;
pub mod prelude;
pub mod quadratic_program;
pub mod solvers;

pub use quadratic_program::{QuadraticProgram, QuadraticProgramBuilder};
pub use solvers::barrier::solve;
pub use solvers::Trajectory;
