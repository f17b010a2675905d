//! Typed failures shared by every layer of the crate.

use thiserror::Error;

/// Everything that can go wrong while building a game or solving one.
///
/// Input validation failures are fatal to the call. Linear-system
/// classifications and [`Error::Timeout`] are recoverable: solvers branch
/// on the former, callers may retry the latter with a larger budget.
/// The remaining variants signal arithmetic misuse or an internal fault.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    // input validation
    #[error("payoff entries do not cover every profile exactly once: {0}")]
    ShapeMismatch(String),
    #[error("information set {infoset} of player {player} violates perfect recall")]
    ImperfectRecall { player: usize, infoset: usize },
    #[error("chance node {node} does not carry a probability distribution: {reason}")]
    InvalidDistribution { node: usize, reason: String },
    #[error("malformed game: {0}")]
    MalformedGame(String),
    #[error("not a probability vector: {0}")]
    InvalidProfile(String),

    // linear-system classification
    #[error("coefficient matrix is singular")]
    Singular,
    #[error("linear system is inconsistent")]
    NoSolution,
    #[error("linear system is underdetermined")]
    InfiniteSolutions,

    // internal consistency
    #[error("linear program is unbounded")]
    Unbounded,
    #[error("linear program is infeasible")]
    Infeasible,
    #[error("complementary pivoting revisited basis after {pivots} pivots")]
    CycleDetected { pivots: u64 },
    #[error("complementary pivoting hit a secondary ray after {pivots} pivots")]
    RayTermination { pivots: u64 },

    // budget
    #[error("budget exhausted after {steps} steps")]
    Timeout { steps: u64 },

    // arithmetic misuse
    #[error("arithmetic mode {found} used where {expected} was configured")]
    PrecisionMismatch { expected: String, found: String },
    #[error("division by zero")]
    DivisionByZero,

    // scope
    #[error("unsupported: {0}")]
    Unsupported(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// whether a caller can reasonably branch on or retry this failure
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Singular | Self::NoSolution | Self::InfiniteSolutions | Self::Timeout { .. }
        )
    }
    /// whether this is one of the three linear-system classifications
    pub fn is_classification(&self) -> bool {
        matches!(self, Self::Singular | Self::NoSolution | Self::InfiniteSolutions)
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recoverable_taxonomy() {
        assert!(Error::Singular.is_recoverable());
        assert!(Error::NoSolution.is_recoverable());
        assert!(Error::InfiniteSolutions.is_recoverable());
        assert!(Error::Timeout { steps: 3 }.is_recoverable());
        assert!(!Error::CycleDetected { pivots: 9 }.is_recoverable());
        assert!(!Error::DivisionByZero.is_recoverable());
        assert!(!Error::Unbounded.is_recoverable());
        assert!(!Error::MalformedGame(String::new()).is_recoverable());
    }

    #[test]
    fn messages_name_the_fault() {
        let e = Error::ImperfectRecall { player: 1, infoset: 4 };
        assert_eq!(e.to_string(), "information set 4 of player 1 violates perfect recall");
        assert_eq!(Error::Timeout { steps: 10 }.to_string(), "budget exhausted after 10 steps");
    }
}
