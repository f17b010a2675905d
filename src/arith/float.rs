use super::*;
use num_traits::ToPrimitive;

/// Machine double, compared through a [`Field`] with a configured epsilon.
pub type Float = f64;

impl Scalar for f64 {
    const MODE: Mode = Mode::Floating;
    fn from_rational(r: &BigRational) -> Self {
        ToPrimitive::to_f64(r).unwrap_or(f64::NAN)
    }
    fn from_f64(x: f64) -> Self {
        x
    }
    fn to_f64(&self) -> f64 {
        *self
    }
    fn from_usize(n: usize) -> Self {
        n as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifts_rationals() {
        assert_eq!(<Float as Scalar>::from_rational(&rational(1, 4)), 0.25);
        assert_eq!(<Float as Scalar>::from_rational(&integer(-3)), -3.0);
        assert_eq!(<Float as Scalar>::from_usize(4), 4.0);
    }
}
