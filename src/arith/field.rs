use super::*;
use crate::Error;
use crate::Result;
use std::cmp::Ordering;

/// Comparison and division context for one solve run.
///
/// Built once from the configured [`Precision`] for a concrete [`Scalar`].
/// Exact fields compare with zero tolerance; floating fields treat any
/// magnitude at or below epsilon as zero. A field for one mode cannot be
/// built from the other mode's precision, which is what keeps a run from
/// mixing exact and floating values.
#[derive(Debug, Clone)]
pub struct Field<S> {
    precision: Precision,
    epsilon: S,
}

impl<S: Scalar> Field<S> {
    pub fn new(precision: Precision) -> Result<Self> {
        if precision.mode() != S::MODE {
            return Err(Error::PrecisionMismatch {
                expected: precision.mode().to_string(),
                found: S::MODE.to_string(),
            });
        }
        let epsilon = match precision {
            Precision::Exact => S::zero(),
            Precision::Floating { epsilon } if epsilon.is_finite() && epsilon >= 0.0 => {
                S::from_f64(epsilon)
            }
            Precision::Floating { epsilon } => {
                return Err(Error::InvalidConfig(format!("epsilon {} is not a tolerance", epsilon)));
            }
        };
        Ok(Self { precision, epsilon })
    }

    pub fn precision(&self) -> Precision {
        self.precision
    }
    pub fn epsilon(&self) -> &S {
        &self.epsilon
    }
    /// reject work that was configured for the other mode
    pub fn ensure(&self, precision: Precision) -> Result<()> {
        match precision.mode() == self.precision.mode() {
            true => Ok(()),
            false => Err(Error::PrecisionMismatch {
                expected: self.precision.mode().to_string(),
                found: precision.mode().to_string(),
            }),
        }
    }

    pub fn is_zero(&self, x: &S) -> bool {
        x.abs() <= self.epsilon
    }
    pub fn is_positive(&self, x: &S) -> bool {
        *x > self.epsilon
    }
    pub fn is_negative(&self, x: &S) -> bool {
        *x < -self.epsilon.clone()
    }
    pub fn compare(&self, a: &S, b: &S) -> Ordering {
        let ref delta = a.clone() - b.clone();
        if self.is_zero(delta) {
            Ordering::Equal
        } else if delta.is_positive() {
            Ordering::Greater
        } else {
            Ordering::Less
        }
    }
    pub fn equals(&self, a: &S, b: &S) -> bool {
        self.compare(a, b) == Ordering::Equal
    }
    pub fn divide(&self, a: &S, b: &S) -> Result<S> {
        match self.is_zero(b) {
            true => Err(Error::DivisionByZero),
            false => Ok(a.clone() / b.clone()),
        }
    }
    /// snap values inside the tolerance band to an exact zero
    pub fn clean(&self, x: S) -> S {
        match self.is_zero(&x) {
            true => S::zero(),
            false => x,
        }
    }
    pub fn lift(&self, r: &BigRational) -> S {
        S::from_rational(r)
    }
    pub fn sum<'a, I>(&self, values: I) -> S
    where
        I: IntoIterator<Item = &'a S>,
    {
        values
            .into_iter()
            .fold(S::zero(), |acc, x| acc + x.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_field_has_no_tolerance() {
        let field = Field::<Exact>::new(Precision::Exact).unwrap();
        assert!(field.is_zero(&integer(0)));
        assert!(!field.is_zero(&rational(1, 1_000_000_000)));
        assert!(field.is_positive(&rational(1, 1_000_000_000)));
        assert_eq!(field.compare(&rational(1, 3), &rational(2, 6)), Ordering::Equal);
    }

    #[test]
    fn floating_field_absorbs_noise() {
        let field = Field::<Float>::new(Precision::Floating { epsilon: 1e-9 }).unwrap();
        assert!(field.is_zero(&1e-12));
        assert!(!field.is_positive(&1e-12));
        assert!(field.is_negative(&-1e-6));
        assert!(field.equals(&(0.1 + 0.2), &0.3));
        assert_eq!(field.clean(-1e-15), 0.0);
    }

    #[test]
    fn division_by_zero_is_typed() {
        let exact = Field::<Exact>::new(Precision::Exact).unwrap();
        assert_eq!(exact.divide(&integer(1), &integer(0)), Err(Error::DivisionByZero));
        assert_eq!(exact.divide(&integer(1), &integer(4)), Ok(rational(1, 4)));
        let float = Field::<Float>::new(Precision::floating()).unwrap();
        assert_eq!(float.divide(&1.0, &0.0), Err(Error::DivisionByZero));
    }

    #[test]
    fn modes_do_not_mix() {
        assert!(matches!(
            Field::<Exact>::new(Precision::floating()),
            Err(Error::PrecisionMismatch { .. })
        ));
        assert!(matches!(
            Field::<Float>::new(Precision::Exact),
            Err(Error::PrecisionMismatch { .. })
        ));
        let field = Field::<Float>::new(Precision::floating()).unwrap();
        assert!(field.ensure(Precision::Floating { epsilon: 1e-3 }).is_ok());
        assert!(field.ensure(Precision::Exact).is_err());
    }

    #[test]
    fn rejects_bad_epsilon() {
        assert!(matches!(
            Field::<Float>::new(Precision::Floating { epsilon: -1.0 }),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            Field::<Float>::new(Precision::Floating { epsilon: f64::NAN }),
            Err(Error::InvalidConfig(_))
        ));
    }
}
