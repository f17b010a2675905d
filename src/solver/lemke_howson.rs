use crate::*;
use std::collections::BTreeSet;

/// Lemke-Howson complementary pivoting on a bimatrix game.
///
/// Labels `0..m` name the row player's strategies, `m..m+n` the column
/// player's. Both tableaux index their columns by label: the row player's
/// tableau holds `x` and the slacks of `B'ᵀ x ≤ 1`, the column player's the
/// slacks of `A' y ≤ 1` and `y`, where `A'` and `B'` are the payoffs
/// shifted to be positive. Dropping label `start` and pivoting the leaving
/// label into the other tableau until `start` leaves traces one path of
/// the almost-complementary graph.
#[derive(Debug, Clone, Copy)]
pub struct LemkeHowson {
    pub start: usize,
}

impl LemkeHowson {
    /// One path from the artificial equilibrium, raw weights unnormalized.
    pub fn path<S: Scalar>(
        field: &Field<S>,
        meter: &Meter,
        a: &Matrix<S>,
        b: &Matrix<S>,
        start: usize,
    ) -> Result<(Vec<S>, Vec<S>)> {
        let (m, n) = (a.rows(), a.cols());
        if start >= m + n {
            return Err(Error::InvalidConfig(format!(
                "start label {} outside 0..{}",
                start,
                m + n
            )));
        }
        let ref a = Self::positive(a);
        let ref b = Self::positive(b);
        let rows = (0..n)
            .map(|j| {
                let mut row = vec![S::zero(); m + n + 1];
                (0..m).for_each(|i| row[i] = b[(i, j)].clone());
                row[m + j] = S::one();
                row[m + n] = S::one();
                row
            })
            .collect();
        let cols = (0..m)
            .map(|i| {
                let mut row = vec![S::zero(); m + n + 1];
                row[i] = S::one();
                (0..n).for_each(|j| row[m + j] = a[(i, j)].clone());
                row[m + n] = S::one();
                row
            })
            .collect();
        // tableaux[0] constrains x, tableaux[1] constrains y
        let mut tableaux = [
            Tableau::new(rows, (m..m + n).collect())?,
            Tableau::new(cols, (0..m).collect())?,
        ];
        let lex = [m..m + n, 0..m];
        let mut seen = BTreeSet::new();
        let mut side = if start < m { 0 } else { 1 };
        let mut entering = start;
        let mut pivots = 0u64;
        loop {
            meter.tick()?;
            let state = (tableaux[0].basis().to_vec(), tableaux[1].basis().to_vec(), entering);
            if !seen.insert(state) {
                return Err(Error::CycleDetected { pivots });
            }
            let Some(row) = tableaux[side].ratio(field, entering, lex[side].clone()) else {
                return Err(Error::RayTermination { pivots });
            };
            let leaving = tableaux[side].pivot(field, row, entering)?;
            pivots += 1;
            log::trace!("lemke-howson pivot {}: label {} in, label {} out", pivots, entering, leaving);
            if leaving == start {
                break;
            }
            entering = leaving;
            side = 1 - side;
        }
        let x = (0..m).map(|i| tableaux[0].value(i)).collect();
        let y = (0..n).map(|j| tableaux[1].value(m + j)).collect();
        Ok((x, y))
    }

    /// shift every entry so that the smallest becomes one
    fn positive<S: Scalar>(payoffs: &Matrix<S>) -> Matrix<S> {
        let ref shift = S::one() - payoffs.min().unwrap_or_else(S::zero);
        payoffs.map(|x| x.clone() + shift.clone())
    }

    fn equilibrium<S: Scalar>(
        field: &Field<S>,
        meter: &Meter,
        a: &Matrix<S>,
        b: &Matrix<S>,
        start: usize,
    ) -> Result<MixedProfile<S>> {
        let (x, y) = Self::path(field, meter, a, b, start)?;
        assemble_mixed(field, vec![x, y])
    }
}

impl Solve for LemkeHowson {
    fn solve<S: Scalar>(&self, game: &Game, field: &Field<S>, config: &Config, meter: &Meter) -> Result<Vec<Profile<S>>> {
        let Game::Normal(game) = game else {
            return Err(Error::Unsupported(
                "lemke-howson runs on normal-form games; extensive games go through the sequence-form LCP".to_string(),
            ));
        };
        let (a, b) = game.matrices::<S>()?;
        let found = match config.enumeration {
            Enumeration::First => vec![Self::equilibrium(field, meter, &a, &b, self.start)?],
            Enumeration::All => {
                let mut found = Vec::<MixedProfile<S>>::new();
                for label in 0..a.rows() + a.cols() {
                    let profile = Self::equilibrium(field, meter, &a, &b, label)?;
                    if !found.iter().any(|known| same_mixed(field, known, &profile)) {
                        log::debug!("label {} reaches a new equilibrium", label);
                        found.push(profile);
                    }
                }
                found
            }
        };
        Ok(found.into_iter().map(Profile::Mixed).collect())
    }
}

/// componentwise equality under the field tolerance
pub fn same_mixed<S: Scalar>(field: &Field<S>, a: &MixedProfile<S>, b: &MixedProfile<S>) -> bool {
    a.strategies.len() == b.strategies.len()
        && a.strategies
            .iter()
            .zip(b.strategies.iter())
            .all(|(x, y)| x.len() == y.len() && x.iter().zip(y).all(|(p, q)| field.equals(p, q)))
}
