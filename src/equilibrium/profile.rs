use crate::*;

/// One probability vector per player over their pure strategies.
#[derive(Debug, Clone, PartialEq)]
pub struct MixedProfile<S> {
    pub strategies: Vec<Vec<S>>,
}

/// Per player: a distribution per information set, and the realization
/// plan over sequences it induces.
#[derive(Debug, Clone, PartialEq)]
pub struct BehaviorProfile<S> {
    pub behavior: Vec<Vec<Vec<S>>>,
    pub realization: Vec<Vec<S>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Profile<S> {
    Mixed(MixedProfile<S>),
    Behavior(BehaviorProfile<S>),
}

impl<S: Scalar> Profile<S> {
    pub fn players(&self) -> usize {
        match self {
            Self::Mixed(mixed) => mixed.strategies.len(),
            Self::Behavior(behavior) => behavior.behavior.len(),
        }
    }
    pub fn mixed(&self) -> Option<&MixedProfile<S>> {
        match self {
            Self::Mixed(mixed) => Some(mixed),
            Self::Behavior(_) => None,
        }
    }
    pub fn behavioral(&self) -> Option<&BehaviorProfile<S>> {
        match self {
            Self::Mixed(_) => None,
            Self::Behavior(behavior) => Some(behavior),
        }
    }
}

/// Clamp tolerance-level negatives to zero and scale to total one.
pub fn normalize<S: Scalar>(field: &Field<S>, weights: Vec<S>) -> Result<Vec<S>> {
    let weights = weights
        .into_iter()
        .map(|w| field.clean(w))
        .collect::<Vec<S>>();
    if let Some(w) = weights.iter().find(|w| field.is_negative(w)) {
        return Err(Error::InvalidProfile(format!("negative weight {}", w)));
    }
    let ref total = field.sum(weights.iter());
    weights
        .iter()
        .map(|w| field.divide(w, total))
        .collect()
}

/// Normalize raw per-player weight vectors into a mixed profile.
pub fn assemble_mixed<S: Scalar>(field: &Field<S>, raw: Vec<Vec<S>>) -> Result<MixedProfile<S>> {
    let strategies = raw
        .into_iter()
        .map(|weights| normalize(field, weights))
        .collect::<Result<Vec<Vec<S>>>>()?;
    Ok(MixedProfile { strategies })
}

/// Turn raw realization plans into behavior strategies, normalizing each
/// information set, and rebuild the plans from the normalized behavior so
/// that flow conservation holds exactly.
pub fn assemble_behavior<S: Scalar>(
    field: &Field<S>,
    form: &SequenceForm,
    plans: Vec<Vec<S>>,
) -> Result<BehaviorProfile<S>> {
    let mut behavior = Vec::with_capacity(plans.len());
    let mut realization = Vec::with_capacity(plans.len());
    for (player, plan) in plans.into_iter().enumerate() {
        let plan = plan.into_iter().map(|w| field.clean(w)).collect::<Vec<S>>();
        let local = form
            .behavior(field, player, &plan)?
            .into_iter()
            .map(|dist| normalize(field, dist))
            .collect::<Result<Vec<Vec<S>>>>()?;
        realization.push(form.realization_plan(player, &local));
        behavior.push(local);
    }
    Ok(BehaviorProfile {
        behavior,
        realization,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizing_sums_to_exactly_one() {
        let field = Field::<Exact>::new(Precision::Exact).unwrap();
        let weights = normalize(&field, vec![integer(1), integer(0), integer(2)]).unwrap();
        assert_eq!(weights, vec![rational(1, 3), integer(0), rational(2, 3)]);
        assert_eq!(field.sum(weights.iter()), integer(1));
    }

    #[test]
    fn floating_noise_is_clamped() {
        let field = Field::<Float>::new(Precision::floating()).unwrap();
        let weights = normalize(&field, vec![0.5, -1e-13, 0.5]).unwrap();
        assert_eq!(weights, vec![0.5, 0.0, 0.5]);
        assert!(normalize(&field, vec![1.0, -0.5]).is_err());
        assert_eq!(normalize(&field, vec![0.0, 0.0]), Err(Error::DivisionByZero));
    }

    #[test]
    fn profile_views() {
        let field = Field::<Exact>::new(Precision::Exact).unwrap();
        let mixed = assemble_mixed(&field, vec![vec![integer(2), integer(2)], vec![integer(5)]]).unwrap();
        let profile = Profile::Mixed(mixed);
        assert_eq!(profile.players(), 2);
        assert_eq!(profile.mixed().unwrap().strategies[0], vec![rational(1, 2), rational(1, 2)]);
        assert!(profile.behavioral().is_none());
    }
}
