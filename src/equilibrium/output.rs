use crate::*;
use std::fmt::Display;
use std::fmt::Formatter;

/// A profile tagged with the algorithm and precision that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Equilibrium<S> {
    pub algorithm: Algorithm,
    pub precision: Precision,
    pub profile: Profile<S>,
}

/// Results of one solve run, in the number type it was configured for.
#[derive(Debug, Clone, PartialEq)]
pub enum Solutions {
    Exact(Vec<Equilibrium<Exact>>),
    Float(Vec<Equilibrium<Float>>),
}

impl Solutions {
    pub fn len(&self) -> usize {
        match self {
            Self::Exact(found) => found.len(),
            Self::Float(found) => found.len(),
        }
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
    pub fn exact(&self) -> Option<&[Equilibrium<Exact>]> {
        match self {
            Self::Exact(found) => Some(found),
            Self::Float(_) => None,
        }
    }
    pub fn float(&self) -> Option<&[Equilibrium<Float>]> {
        match self {
            Self::Exact(_) => None,
            Self::Float(found) => Some(found),
        }
    }
}

fn vector<S: Display>(f: &mut Formatter<'_>, weights: &[S]) -> std::fmt::Result {
    write!(f, "(")?;
    for (i, w) in weights.iter().enumerate() {
        match i {
            0 => write!(f, "{}", w)?,
            _ => write!(f, ", {}", w)?,
        }
    }
    write!(f, ")")
}

impl<S: Scalar> Display for Equilibrium<S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}]", self.algorithm, self.precision)?;
        match &self.profile {
            Profile::Mixed(mixed) => {
                for (p, weights) in mixed.strategies.iter().enumerate() {
                    write!(f, "\n  P{} ", p)?;
                    vector(f, weights)?;
                }
            }
            Profile::Behavior(behavior) => {
                for (p, sets) in behavior.behavior.iter().enumerate() {
                    write!(f, "\n  P{}", p)?;
                    for (h, dist) in sets.iter().enumerate() {
                        write!(f, " I{}:", h)?;
                        vector(f, dist)?;
                    }
                }
            }
        }
        Ok(())
    }
}

impl Display for Solutions {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let lines = match self {
            Self::Exact(found) => found.iter().map(|e| e.to_string()).collect::<Vec<_>>(),
            Self::Float(found) => found.iter().map(|e| e.to_string()).collect::<Vec<_>>(),
        };
        match lines.is_empty() {
            true => write!(f, "no equilibrium found"),
            false => write!(f, "{}", lines.join("\n")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_fractions_per_player() {
        let found = Equilibrium {
            algorithm: Algorithm::LemkeHowson { start: 0 },
            precision: Precision::Exact,
            profile: Profile::Mixed(MixedProfile {
                strategies: vec![vec![rational(3, 5), rational(2, 5)], vec![integer(1)]],
            }),
        };
        assert_eq!(found.to_string(), "lemke_howson [exact]\n  P0 (3/5, 2/5)\n  P1 (1)");
        let solutions = Solutions::Exact(vec![found]);
        assert_eq!(solutions.len(), 1);
        assert!(solutions.float().is_none());
        assert_eq!(Solutions::Float(vec![]).to_string(), "no equilibrium found");
    }
}
