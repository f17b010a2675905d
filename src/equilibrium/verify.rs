use crate::*;

/// Each player's best deviation gain under a mixed profile.
pub fn normal_regrets<S: Scalar>(field: &Field<S>, game: &NormalForm, profile: &MixedProfile<S>) -> Vec<S> {
    (0..game.players())
        .map(|p| {
            let ref current = game.expected_payoff(&profile.strategies, p);
            game.strategy_values(&profile.strategies, p)
                .into_iter()
                .map(|v| v - current.clone())
                .reduce(|a, b| match field.compare(&b, &a) {
                    std::cmp::Ordering::Greater => b,
                    _ => a,
                })
                .unwrap_or_else(S::zero)
        })
        .collect()
}

/// Each player's best deviation gain under a tuple of realization plans.
pub fn sequence_regrets<S: Scalar>(field: &Field<S>, form: &SequenceForm, plans: &[Vec<S>]) -> Vec<S> {
    let current = form.expected_payoffs(plans);
    (0..form.players())
        .map(|p| form.best_response_value(field, p, plans) - current[p].clone())
        .collect()
}

/// Regrets of a profile against the game it claims to solve.
pub fn regrets<S: Scalar>(field: &Field<S>, game: &Game, profile: &Profile<S>) -> Result<Vec<S>> {
    match (game, profile) {
        (Game::Normal(game), Profile::Mixed(mixed)) => {
            check_shape(game.players(), mixed.strategies.len())?;
            if let Some(p) = (0..game.players()).find(|&p| mixed.strategies[p].len() != game.strategies(p)) {
                return Err(Error::ShapeMismatch(format!("player {} strategy count differs", p)));
            }
            Ok(normal_regrets(field, game, mixed))
        }
        (Game::Extensive(game), Profile::Behavior(behavior)) => {
            check_shape(game.players(), behavior.realization.len())?;
            let ref form = to_sequence_form(game);
            if let Some(p) = (0..form.players()).find(|&p| behavior.realization[p].len() != form.sequences(p)) {
                return Err(Error::ShapeMismatch(format!("player {} sequence count differs", p)));
            }
            Ok(sequence_regrets(field, form, &behavior.realization))
        }
        _ => Err(Error::ShapeMismatch("profile kind does not match game kind".to_string())),
    }
}

/// Whether no player gains more than the field tolerance by deviating.
pub fn is_nash<S: Scalar>(field: &Field<S>, game: &Game, profile: &Profile<S>) -> Result<bool> {
    Ok(regrets(field, game, profile)?
        .iter()
        .all(|r| !field.is_positive(r)))
}

fn check_shape(expected: usize, found: usize) -> Result<()> {
    match expected == found {
        true => Ok(()),
        false => Err(Error::ShapeMismatch(format!("{} players in profile, {} in game", found, expected))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pennies_regrets() {
        let game = Game::from(matching_pennies());
        let field = Field::<Exact>::new(Precision::Exact).unwrap();
        let half = vec![rational(1, 2), rational(1, 2)];
        let fair = Profile::Mixed(MixedProfile {
            strategies: vec![half.clone(), half.clone()],
        });
        assert_eq!(regrets(&field, &game, &fair).unwrap(), vec![integer(0), integer(0)]);
        assert!(is_nash(&field, &game, &fair).unwrap());
        let skewed = Profile::Mixed(MixedProfile {
            strategies: vec![vec![integer(1), integer(0)], half],
        });
        assert_eq!(regrets(&field, &game, &skewed).unwrap(), vec![integer(0), integer(1)]);
        assert!(!is_nash(&field, &game, &skewed).unwrap());
    }

    #[test]
    fn mismatched_profiles_are_rejected() {
        let game = Game::from(matching_pennies());
        let field = Field::<Exact>::new(Precision::Exact).unwrap();
        let short = Profile::Mixed(MixedProfile {
            strategies: vec![vec![integer(1)], vec![integer(1), integer(0)]],
        });
        assert!(matches!(regrets(&field, &game, &short), Err(Error::ShapeMismatch(_))));
        let wrong = Profile::Behavior(BehaviorProfile::<Exact> {
            behavior: vec![],
            realization: vec![],
        });
        assert!(matches!(is_nash(&field, &game, &wrong), Err(Error::ShapeMismatch(_))));
    }
}
