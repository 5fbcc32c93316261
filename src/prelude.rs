#[doc(no_inline)]
pub use crate::error::QuadraticProgramError;
#[doc(no_inline)]
pub use crate::quadratic_program::QuadraticProgram;
#[doc(no_inline)]
pub use crate::solvers::barrier::EquationSolverType;
#[doc(no_inline)]
pub use crate::solvers::BarrierMethod;
#[doc(no_inline)]
pub use crate::solvers::Solver;
#[doc(no_inline)]
pub use crate::solvers::Trajectory;
