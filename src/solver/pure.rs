use crate::*;

/// Exhaustive search over pure profiles, any number of players.
///
/// Normal-form contingencies are checked against every unilateral pure
/// deviation. Pure behavior profiles of an extensive game are checked
/// against each player's full best response in the sequence form, not
/// only deviations at a single information set.
#[derive(Debug, Clone, Copy, Default)]
pub struct PureEnumeration;

impl PureEnumeration {
    fn normal<S: Scalar>(
        field: &Field<S>,
        meter: &Meter,
        game: &NormalForm,
        enumeration: Enumeration,
    ) -> Result<Vec<Profile<S>>> {
        let mut found = Vec::new();
        for c in 0..game.contingencies() {
            meter.tick()?;
            let ref profile = game.profile(c);
            let stable = (0..game.players()).all(|p| {
                let ref current = S::from_rational(game.payoff(profile, p));
                (0..game.strategies(p)).all(|s| {
                    let mut deviation = profile.clone();
                    deviation[p] = s;
                    !field.is_positive(&(S::from_rational(game.payoff(&deviation, p)) - current.clone()))
                })
            });
            if stable {
                log::debug!("pure profile {:?} is an equilibrium", profile);
                let strategies = profile
                    .iter()
                    .enumerate()
                    .map(|(p, &s)| unit(game.strategies(p), s))
                    .collect();
                found.push(Profile::Mixed(MixedProfile { strategies }));
                if enumeration == Enumeration::First {
                    break;
                }
            }
        }
        Ok(found)
    }

    fn extensive<S: Scalar>(
        field: &Field<S>,
        meter: &Meter,
        game: &ExtensiveForm,
        enumeration: Enumeration,
    ) -> Result<Vec<Profile<S>>> {
        let ref form = to_sequence_form(game);
        let radices = (0..form.players())
            .flat_map(|p| (0..form.infosets(p)).map(move |h| (p, h)))
            .map(|(p, h)| form.range(p, h).len())
            .collect::<Vec<usize>>();
        let total = radices
            .iter()
            .try_fold(1usize, |acc, &r| acc.checked_mul(r))
            .ok_or_else(|| Error::Unsupported("too many pure behavior profiles to enumerate".to_string()))?;
        let mut found = Vec::new();
        for index in 0..total {
            meter.tick()?;
            let choices = digits(index, &radices);
            let mut offset = 0;
            let behavior = (0..form.players())
                .map(|p| {
                    let local = (0..form.infosets(p))
                        .map(|h| unit(form.range(p, h).len(), choices[offset + h]))
                        .collect::<Vec<Vec<S>>>();
                    offset += form.infosets(p);
                    local
                })
                .collect::<Vec<_>>();
            let realization = behavior
                .iter()
                .enumerate()
                .map(|(p, local)| form.realization_plan(p, local))
                .collect::<Vec<_>>();
            let stable = sequence_regrets(field, form, &realization)
                .iter()
                .all(|r| !field.is_positive(r));
            if stable {
                log::debug!("pure behavior profile {:?} is an equilibrium", choices);
                found.push(Profile::Behavior(BehaviorProfile {
                    behavior,
                    realization,
                }));
                if enumeration == Enumeration::First {
                    break;
                }
            }
        }
        Ok(found)
    }
}

fn unit<S: Scalar>(size: usize, hot: usize) -> Vec<S> {
    (0..size)
        .map(|i| if i == hot { S::one() } else { S::zero() })
        .collect()
}

/// mixed-radix digits of `index`, last digit fastest
fn digits(mut index: usize, radices: &[usize]) -> Vec<usize> {
    let mut digits = vec![0; radices.len()];
    for (d, &r) in digits.iter_mut().zip(radices).rev() {
        *d = index % r;
        index /= r;
    }
    digits
}

impl Solve for PureEnumeration {
    fn solve<S: Scalar>(&self, game: &Game, field: &Field<S>, config: &Config, meter: &Meter) -> Result<Vec<Profile<S>>> {
        match game {
            Game::Normal(game) => Self::normal(field, meter, game, config.enumeration),
            Game::Extensive(game) => Self::extensive(field, meter, game, config.enumeration),
        }
    }
}
