use super::*;
use crate::DEFAULT_EPSILON;
use serde::Deserialize;
use serde::Serialize;

/// The single precision switch shared by every solver in one run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Precision {
    #[default]
    Exact,
    Floating {
        epsilon: f64,
    },
}

impl Precision {
    /// floating mode at the crate default tolerance
    pub fn floating() -> Self {
        Self::Floating {
            epsilon: DEFAULT_EPSILON,
        }
    }
    pub fn mode(&self) -> Mode {
        match self {
            Self::Exact => Mode::Exact,
            Self::Floating { .. } => Mode::Floating,
        }
    }
}

impl Display for Precision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exact => write!(f, "exact"),
            Self::Floating { epsilon } => write!(f, "floating({:e})", epsilon),
        }
    }
}
