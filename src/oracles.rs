#![allow(non_snake_case)]
//! The objective and the barrier-augmented objective of a quadratic program, with its first and second derivatives.
//!
//! All functions are pure and take the problem data explicitly, using the naming convention
//! ```text
//! min_v v'Qv + p'v
//! st    Av < b
//! ```
//! The barrier-augmented objective for barrier parameter `t` is
//! ```text
//! g(v) = t (v'Qv + p'v) - sum_i log(b_i - A_i v)
//! ```
//! which is only finite on the interior of the feasible polyhedron.
use ndarray::{Array1, Array2, Axis};

use crate::float::Float;

/// The quadratic objective `v'Qv + p'v`. Defined everywhere.
pub fn objective<F: Float>(Q: &Array2<F>, p: &Array1<F>, v: &Array1<F>) -> F {
    v.dot(&Q.dot(v)) + p.dot(v)
}

/// Constraint slacks `b - Av`. A point is strictly feasible when every slack is strictly positive.
pub fn slacks<F: Float>(A: &Array2<F>, b: &Array1<F>, v: &Array1<F>) -> Array1<F> {
    b - &A.dot(v)
}

/// The barrier-augmented objective `t f0(v) - sum_i log(b_i - A_i v)`.
///
/// Returns `None` when `v` is not strictly feasible, in which case the log barrier is undefined.
pub fn barrier_objective<F: Float>(
    Q: &Array2<F>,
    p: &Array1<F>,
    A: &Array2<F>,
    b: &Array1<F>,
    v: &Array1<F>,
    t: F,
) -> Option<F> {
    let s = slacks(A, b, v);
    // `!(e > 0)` also rejects NaN slacks
    if s.iter().any(|&e| !(e > F::zero())) {
        return None;
    }
    let barrier = s.fold(F::zero(), |acc, &e| acc + e.ln());
    let value = t * objective(Q, p, v) - barrier;
    value.is_finite().then_some(value)
}

/// Gradient of the barrier-augmented objective, `t (2Qv + p) + sum_i A_i' / (b_i - A_i v)`.
pub fn gradient<F: Float>(
    Q: &Array2<F>,
    p: &Array1<F>,
    A: &Array2<F>,
    b: &Array1<F>,
    v: &Array1<F>,
    t: F,
) -> Array1<F> {
    let inv_s = slacks(A, b, v).mapv(F::recip);
    (&(&Q.dot(v) * F::cast(2)) + p) * t + A.t().dot(&inv_s)
}

/// Hessian of the barrier-augmented objective, `t (Q + Q') + A' diag(1 / (b - Av)^2) A`.
///
/// Positive definite whenever `Q` is positive semi-definite, `A` has full column rank and `v` is strictly feasible.
pub fn hessian<F: Float>(
    Q: &Array2<F>,
    A: &Array2<F>,
    b: &Array1<F>,
    v: &Array1<F>,
    t: F,
) -> Array2<F> {
    let w = slacks(A, b, v).mapv(|e| (e * e).recip());
    let weighted_A = A * &w.insert_axis(Axis(1));
    A.t().dot(&weighted_A) + (Q + &Q.t()) * t
}
