use crate::*;
use serde::Deserialize;
use serde::Serialize;

/// Which algorithm to run, with its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    /// `size` fixes the support size of both players; `balanced` pairs only
    /// equal sizes, otherwise every size pair is tried by total size.
    SupportEnumeration { size: Option<usize>, balanced: bool },
    /// `start` is the label missing on the initial path.
    LemkeHowson { start: usize },
    LpZeroSum,
    PureEnumeration,
}

impl Default for Algorithm {
    fn default() -> Self {
        Self::LemkeHowson { start: 0 }
    }
}

impl Algorithm {
    pub fn support_enumeration() -> Self {
        Self::SupportEnumeration {
            size: None,
            balanced: true,
        }
    }
    pub fn name(&self) -> &'static str {
        match self {
            Self::SupportEnumeration { .. } => "support_enumeration",
            Self::LemkeHowson { .. } => "lemke_howson",
            Self::LpZeroSum => "lp_zero_sum",
            Self::PureEnumeration => "pure_enumeration",
        }
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Stop at the first equilibrium or keep going.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Enumeration {
    #[default]
    First,
    All,
}

/// Everything one solve run needs besides the game.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub algorithm: Algorithm,
    pub precision: Precision,
    pub enumeration: Enumeration,
    pub budget: Budget,
}

impl Config {
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            ..Self::default()
        }
    }
    pub fn precision(self, precision: Precision) -> Self {
        Self { precision, ..self }
    }
    pub fn enumeration(self, enumeration: Enumeration) -> Self {
        Self { enumeration, ..self }
    }
    pub fn budget(self, budget: Budget) -> Self {
        Self { budget, ..self }
    }
    pub fn all(self) -> Self {
        self.enumeration(Enumeration::All)
    }
    pub fn floating(self) -> Self {
        self.precision(Precision::floating())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn config_round_trips_through_json() {
        let config = Config::new(Algorithm::SupportEnumeration {
            size: Some(2),
            balanced: false,
        })
        .precision(Precision::Floating { epsilon: 1e-7 })
        .all()
        .budget(Budget {
            steps: Some(1000),
            time: Some(Duration::from_millis(250)),
        });
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(serde_json::from_str::<Config>(&json).unwrap(), config);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config = serde_json::from_str::<Config>(r#"{"algorithm":"lp_zero_sum"}"#).unwrap();
        assert_eq!(config.algorithm, Algorithm::LpZeroSum);
        assert_eq!(config.precision, Precision::Exact);
        assert_eq!(config.enumeration, Enumeration::First);
        assert_eq!(config.budget, Budget::default());
    }

    #[test]
    fn names_match_serde_tags() {
        for algorithm in [
            Algorithm::support_enumeration(),
            Algorithm::LemkeHowson { start: 3 },
            Algorithm::LpZeroSum,
            Algorithm::PureEnumeration,
        ] {
            let json = serde_json::to_value(algorithm).unwrap();
            let tag = match json {
                serde_json::Value::String(s) => s,
                serde_json::Value::Object(map) => map.keys().next().unwrap().clone(),
                _ => unreachable!(),
            };
            assert_eq!(tag, algorithm.name());
        }
    }
}
