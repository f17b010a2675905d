//! Equilibrium solvers and algorithm selection.
//!
//! - [`SupportEnumeration`]: indifference systems over support pairs
//! - [`LemkeHowson`]: complementary pivoting on bimatrix games
//! - [`SequenceLemke`]: Lemke's method on the sequence-form LCP
//! - [`ZeroSum`]: maximin linear program, normal or sequence form
//! - [`PureEnumeration`]: exhaustive pure-profile check
//!
//! [`solve`] picks the number type from the configured precision, builds
//! one [`Field`] and one [`Meter`] for the run, and dispatches on
//! [`Algorithm`].

mod budget;
mod config;
mod lemke;
mod lemke_howson;
mod pure;
mod support;
mod zerosum;

pub use budget::*;
pub use config::*;
pub use lemke::*;
pub use lemke_howson::*;
pub use pure::*;
pub use support::*;
pub use zerosum::*;

use crate::*;

/// An algorithm that turns a game into zero or more equilibrium profiles.
pub trait Solve {
    fn solve<S: Scalar>(&self, game: &Game, field: &Field<S>, config: &Config, meter: &Meter) -> Result<Vec<Profile<S>>>;
}

/// Solve `game` as configured, in the configured number type.
pub fn solve(game: &Game, config: &Config) -> Result<Solutions> {
    match config.precision {
        Precision::Exact => equilibria::<Exact>(game, config).map(Solutions::Exact),
        Precision::Floating { .. } => equilibria::<Float>(game, config).map(Solutions::Float),
    }
}

/// Solve `game` in a caller-chosen number type, which must match the
/// configured precision.
pub fn equilibria<S: Scalar>(game: &Game, config: &Config) -> Result<Vec<Equilibrium<S>>> {
    let ref field = Field::<S>::new(config.precision)?;
    let ref meter = Meter::new(&config.budget);
    let players = game.players();
    log::debug!(
        "solving {}-player {} game with {} [{}]",
        players,
        match game {
            Game::Normal(_) => "normal-form",
            Game::Extensive(_) => "extensive-form",
        },
        config.algorithm,
        config.precision
    );
    let profiles = match (config.algorithm, game) {
        (Algorithm::PureEnumeration, _) => PureEnumeration.solve(game, field, config, meter),
        (_, _) if players != 2 => Err(Error::Unsupported(format!(
            "{} needs exactly two players, game has {}",
            config.algorithm, players
        ))),
        (Algorithm::SupportEnumeration { size, balanced }, _) => {
            SupportEnumeration { size, balanced }.solve(game, field, config, meter)
        }
        (Algorithm::LemkeHowson { start }, Game::Normal(_)) => LemkeHowson { start }.solve(game, field, config, meter),
        (Algorithm::LemkeHowson { .. }, Game::Extensive(_)) => SequenceLemke.solve(game, field, config, meter),
        (Algorithm::LpZeroSum, _) => ZeroSum.solve(game, field, config, meter),
    }?;
    log::debug!("found {} equilibria in {} steps", profiles.len(), meter.steps());
    Ok(profiles
        .into_iter()
        .map(|profile| Equilibrium {
            algorithm: config.algorithm,
            precision: config.precision,
            profile,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mixing_number_types_is_refused() {
        let game = Game::from(matching_pennies());
        let config = Config::new(Algorithm::LpZeroSum);
        assert!(matches!(
            equilibria::<Float>(&game, &config),
            Err(Error::PrecisionMismatch { .. })
        ));
    }

    #[test]
    fn two_player_algorithms_refuse_three_players() {
        let game = Game::from(coordination_three());
        for algorithm in [
            Algorithm::support_enumeration(),
            Algorithm::LemkeHowson { start: 0 },
            Algorithm::LpZeroSum,
        ] {
            assert!(matches!(
                solve(&game, &Config::new(algorithm)),
                Err(Error::Unsupported(_))
            ));
        }
    }

    #[test]
    fn support_enumeration_rejects_trees() {
        let game = Game::from(kuhn_poker());
        let config = Config::new(Algorithm::support_enumeration());
        assert!(matches!(solve(&game, &config), Err(Error::Unsupported(_))));
    }

    #[test]
    fn results_are_tagged() {
        let config = Config::new(Algorithm::LpZeroSum).floating();
        let found = solve(&Game::from(matching_pennies()), &config).unwrap();
        let found = found.float().unwrap();
        assert_eq!(found[0].algorithm, Algorithm::LpZeroSum);
        assert_eq!(found[0].precision, Precision::floating());
    }
}
