use ndarray::NdFloat;
use num_traits::NumCast;

/// Scalar types the barrier solver runs on.
pub trait Float: NdFloat {
    fn cast<T: NumCast>(x: T) -> Self {
        NumCast::from(x).unwrap()
    }

    /// Relative tolerance for entries that agree in exact arithmetic, such as `Q[i, j]` and `Q[j, i]`.
    fn sqrt_epsilon() -> Self {
        Self::epsilon().sqrt()
    }
}

impl Float for f64 {}
impl Float for f32 {}
