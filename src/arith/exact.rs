use super::*;
use num_bigint::BigInt;
use num_traits::ToPrimitive;
use num_traits::Zero;

/// Arbitrary-precision fraction.
pub type Exact = BigRational;

impl Scalar for BigRational {
    const MODE: Mode = Mode::Exact;
    fn from_rational(r: &BigRational) -> Self {
        r.clone()
    }
    fn from_f64(x: f64) -> Self {
        BigRational::from_float(x).unwrap_or_else(Self::zero)
    }
    fn to_f64(&self) -> f64 {
        ToPrimitive::to_f64(self).unwrap_or(f64::NAN)
    }
    fn from_usize(n: usize) -> Self {
        BigRational::from_integer(BigInt::from(n))
    }
}

/// `n / d` as an exact fraction, reduced.
///
/// # Panics
///
/// If `d` is zero.
pub fn rational(n: i64, d: i64) -> BigRational {
    BigRational::new(BigInt::from(n), BigInt::from(d))
}

/// `n` as an exact fraction.
pub fn integer(n: i64) -> BigRational {
    BigRational::from_integer(BigInt::from(n))
}
