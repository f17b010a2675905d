//! Dense linear algebra over any [`Scalar`](crate::Scalar).
//!
//! - [`Matrix`]: row-major dense storage
//! - [`solve_linear_system`]: Gauss-Jordan elimination with classification
//! - [`Tableau`]: basis bookkeeping and lexicographic pivoting
//! - [`LinearProgram`]: two-phase simplex with Bland's rule

mod gauss;
mod matrix;
mod simplex;
mod tableau;

pub use gauss::*;
pub use matrix::*;
pub use simplex::*;
pub use tableau::*;
