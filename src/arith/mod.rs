//! Rational arithmetic kernel.
//!
//! Every solver is written once against [`Scalar`] and instantiated per
//! call with either [`Exact`] (arbitrary-precision fractions) or [`Float`]
//! (`f64`). Comparisons go through a [`Field`], which carries the
//! configured [`Precision`] and refuses to be built for the other mode.

mod exact;
mod field;
mod float;
mod precision;

pub use exact::*;
pub use field::*;
pub use float::*;
pub use precision::*;

use num_rational::BigRational;
use num_traits::Signed;
use std::fmt::Debug;
use std::fmt::Display;

/// Which family of numbers a [`Scalar`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Exact,
    Floating,
}

impl Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exact => write!(f, "exact"),
            Self::Floating => write!(f, "floating"),
        }
    }
}

/// Arithmetic capability required by the linear algebra and the solvers.
///
/// Ring operations, `abs` and sign queries come from [`Signed`]. Raw `/`
/// is available too, but solver code divides through [`Field::divide`]
/// so that a zero divisor surfaces as [`crate::Error::DivisionByZero`].
pub trait Scalar: Signed + Clone + PartialOrd + Debug + Display + Send + Sync + 'static {
    /// the mode this type computes in
    const MODE: Mode;
    /// lift a game payoff or probability into this number type
    fn from_rational(r: &BigRational) -> Self;
    /// lift a configuration constant into this number type
    fn from_f64(x: f64) -> Self;
    /// lossy view for display and diagnostics
    fn to_f64(&self) -> f64;
    fn from_usize(n: usize) -> Self;
}
