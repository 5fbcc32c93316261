#![allow(non_snake_case)]
//! A separable problem on the unit cube, `min sum_i (v_i - c_i)^2` with every target `c_i` outside the cube.
//! Due to the separability you can verify by hand that the optimum is `c` clamped to the cube.
//!
//! Run with `RUST_LOG=qp=debug` to see the tracing output next to the `disp` table.

use approx::assert_abs_diff_eq;
use ndarray::{concatenate, prelude::*};
use qp::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let problem_size = 20;

    // (v - c)'(v - c) = v'v - 2c'v + c'c, the constant is dropped
    let c = Array1::from_shape_fn(problem_size, |i| if i % 2 == 0 { 2.0 } else { -3.0 });
    let Q = Array2::<f64>::eye(problem_size);
    let p = &c * -2.0;
    let A = concatenate(
        Axis(0),
        &[
            Array2::<f64>::eye(problem_size).view(),
            (Array2::<f64>::eye(problem_size) * -1.0).view(),
        ],
    )
    .unwrap();
    let b = Array1::ones(2 * problem_size);

    let problem = QuadraticProgram::target(&Q, &p).ub(&A, &b).build().unwrap();
    let solver = BarrierMethod::custom().tol(1e-4).disp(true).build().unwrap();

    let trajectory = solver
        .solve(&problem, &Array1::zeros(problem_size))
        .unwrap();

    println!("solution found, minimal cost: {}", trajectory.fun());
    println!(
        "required number of iterations: {} outer, {} Newton",
        trajectory.outer_iterations(),
        trajectory.newton_iterations()
    );

    let expected = c.mapv(|e| e.clamp(-1.0, 1.0));
    assert_abs_diff_eq!(trajectory.x(), &expected, epsilon = 1e-4);
}
