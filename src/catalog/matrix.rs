use crate::*;
use num_rational::BigRational;

fn table(rows: &[&[i64]]) -> Vec<Vec<BigRational>> {
    rows.iter()
        .map(|row| row.iter().map(|&x| integer(x)).collect())
        .collect()
}

fn negated(rows: &[&[i64]]) -> Vec<Vec<BigRational>> {
    table(rows)
        .into_iter()
        .map(|row| row.into_iter().map(|x| -x).collect())
        .collect()
}

/// Catalog tables are well-formed by construction.
fn bimatrix(a: Vec<Vec<BigRational>>, b: Vec<Vec<BigRational>>) -> NormalForm {
    match NormalForm::bimatrix(a, b) {
        Ok(game) => game,
        Err(e) => unreachable!("catalog game rejected: {}", e),
    }
}

/// Two pure equilibria and one mixed `((3/5, 2/5), (2/5, 3/5))`.
pub fn battle_of_the_sexes() -> NormalForm {
    bimatrix(table(&[&[3, 0], &[0, 2]]), table(&[&[2, 0], &[0, 3]]))
}

pub fn matching_pennies() -> NormalForm {
    let a: &[&[i64]] = &[&[1, -1], &[-1, 1]];
    bimatrix(table(a), negated(a))
}

/// Strategies are (cooperate, defect); mutual defection is the unique equilibrium.
pub fn prisoners_dilemma() -> NormalForm {
    bimatrix(table(&[&[-1, -3], &[0, -2]]), table(&[&[-1, 0], &[-3, -2]]))
}

pub fn rock_paper_scissors() -> NormalForm {
    let a: &[&[i64]] = &[&[0, -1, 1], &[1, 0, -1], &[-1, 1, 0]];
    bimatrix(table(a), negated(a))
}

/// Three players each pick one of two meeting points; everyone is paid
/// only if all three agree, and the second point pays more.
pub fn coordination_three() -> NormalForm {
    let payoffs = (0..8)
        .map(|c| match c {
            0 => vec![integer(1); 3],
            7 => vec![integer(2); 3],
            _ => vec![integer(0); 3],
        })
        .collect();
    match NormalForm::from_array(vec![2, 2, 2], payoffs) {
        Ok(game) => game,
        Err(e) => unreachable!("catalog game rejected: {}", e),
    }
}

/// Catalog lookup by name, as used by the command line.
pub fn catalog(name: &str) -> Option<Game> {
    match name {
        "battle" | "battle_of_the_sexes" => Some(battle_of_the_sexes().into()),
        "pennies" | "matching_pennies" => Some(matching_pennies().into()),
        "prisoners" | "prisoners_dilemma" => Some(prisoners_dilemma().into()),
        "rps" | "rock_paper_scissors" => Some(rock_paper_scissors().into()),
        "coordination" => Some(coordination_three().into()),
        "kuhn" | "kuhn_poker" => Some(kuhn_poker().into()),
        "one_card" | "one_card_poker" => Some(one_card_poker().into()),
        _ => None,
    }
}

/// Names accepted by [`catalog`].
pub const CATALOG: [&str; 7] = [
    "battle_of_the_sexes",
    "matching_pennies",
    "prisoners_dilemma",
    "rock_paper_scissors",
    "coordination",
    "kuhn_poker",
    "one_card_poker",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_name_resolves() {
        for name in CATALOG {
            assert!(catalog(name).is_some(), "{}", name);
        }
        assert!(catalog("chess").is_none());
    }

    #[test]
    fn zero_sum_entries_are_constant_sum() {
        assert!(matching_pennies().constant_sum().is_some());
        assert!(rock_paper_scissors().constant_sum().is_some());
        assert!(battle_of_the_sexes().constant_sum().is_none());
        assert!(prisoners_dilemma().constant_sum().is_none());
    }
}
