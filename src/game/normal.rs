use crate::*;
use num_rational::BigRational;
use num_traits::Zero;
use std::collections::BTreeSet;

/// Finite normal-form game with rational payoffs.
///
/// Contingencies are stored in row-major order: the last player's strategy
/// varies fastest, so a bimatrix entry `(i, j)` lives at `i * n2 + j`.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalForm {
    counts: Vec<usize>,
    payoffs: Vec<Vec<BigRational>>,
}

/// Build a normal-form game from sparse `(profile, payoffs)` entries.
///
/// Entries may arrive in any order but must cover every pure profile
/// exactly once, each carrying one payoff per player.
pub fn build_normal_form(
    counts: Vec<usize>,
    entries: Vec<(Vec<Strategy>, Vec<BigRational>)>,
) -> Result<NormalForm> {
    NormalForm::check(&counts)?;
    let size = counts.iter().product::<usize>();
    let mut seen = BTreeSet::new();
    let mut payoffs = vec![Vec::new(); size];
    for (profile, payoff) in entries {
        if profile.len() != counts.len() || payoff.len() != counts.len() {
            return Err(Error::ShapeMismatch(format!(
                "entry {:?} has {} strategies and {} payoffs for {} players",
                profile,
                profile.len(),
                payoff.len(),
                counts.len()
            )));
        }
        if profile.iter().zip(counts.iter()).any(|(s, n)| s >= n) {
            return Err(Error::ShapeMismatch(format!("profile {:?} out of range", profile)));
        }
        let index = NormalForm::encode(&counts, &profile);
        if !seen.insert(index) {
            return Err(Error::ShapeMismatch(format!("profile {:?} given twice", profile)));
        }
        payoffs[index] = payoff;
    }
    if seen.len() != size {
        return Err(Error::ShapeMismatch(format!(
            "{} of {} profiles have payoffs",
            seen.len(),
            size
        )));
    }
    Ok(NormalForm { counts, payoffs })
}

impl NormalForm {
    /// Dense constructor: one payoff vector per contingency, in row-major order.
    pub fn from_array(counts: Vec<usize>, payoffs: Vec<Vec<BigRational>>) -> Result<Self> {
        Self::check(&counts)?;
        let size = counts.iter().product::<usize>();
        if payoffs.len() != size {
            return Err(Error::ShapeMismatch(format!(
                "{} payoff vectors for {} profiles",
                payoffs.len(),
                size
            )));
        }
        if let Some(bad) = payoffs.iter().position(|p| p.len() != counts.len()) {
            return Err(Error::ShapeMismatch(format!(
                "profile {} has {} payoffs for {} players",
                bad,
                payoffs[bad].len(),
                counts.len()
            )));
        }
        Ok(Self { counts, payoffs })
    }

    /// Two-player game from row-player and column-player payoff matrices.
    pub fn bimatrix(a: Vec<Vec<BigRational>>, b: Vec<Vec<BigRational>>) -> Result<Self> {
        let m = a.len();
        let n = a.first().map(|row| row.len()).unwrap_or(0);
        if b.len() != m || a.iter().chain(b.iter()).any(|row| row.len() != n) {
            return Err(Error::ShapeMismatch(String::from("bimatrix payoff tables differ in shape")));
        }
        let payoffs = a
            .into_iter()
            .zip(b)
            .flat_map(|(ra, rb)| ra.into_iter().zip(rb).map(|(x, y)| vec![x, y]))
            .collect();
        Self::from_array(vec![m, n], payoffs)
    }

    fn check(counts: &[usize]) -> Result<()> {
        if counts.is_empty() {
            return Err(Error::MalformedGame(String::from("a game needs at least one player")));
        }
        if let Some(p) = counts.iter().position(|&n| n == 0) {
            return Err(Error::MalformedGame(format!("player {} has no strategies", p)));
        }
        Ok(())
    }
    fn encode(counts: &[usize], profile: &[Strategy]) -> usize {
        profile
            .iter()
            .zip(counts.iter())
            .fold(0, |index, (s, n)| index * n + s)
    }

    pub fn players(&self) -> usize {
        self.counts.len()
    }
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }
    pub fn strategies(&self, player: Player) -> usize {
        self.counts[player]
    }
    pub fn contingencies(&self) -> usize {
        self.payoffs.len()
    }
    pub fn index(&self, profile: &[Strategy]) -> usize {
        Self::encode(&self.counts, profile)
    }
    /// inverse of [`NormalForm::index`]
    pub fn profile(&self, mut index: usize) -> Vec<Strategy> {
        let mut profile = vec![0; self.players()];
        for p in (0..self.players()).rev() {
            profile[p] = index % self.counts[p];
            index /= self.counts[p];
        }
        profile
    }
    pub fn payoffs(&self, profile: &[Strategy]) -> &[BigRational] {
        &self.payoffs[self.index(profile)]
    }
    pub fn payoff(&self, profile: &[Strategy], player: Player) -> &BigRational {
        &self.payoffs(profile)[player]
    }

    /// Payoff matrices `(A, B)` of a two-player game, lifted into `S`.
    pub fn matrices<S: Scalar>(&self) -> Result<(Matrix<S>, Matrix<S>)> {
        if self.players() != 2 {
            return Err(Error::Unsupported(format!(
                "bimatrix view of a {}-player game",
                self.players()
            )));
        }
        let (m, n) = (self.counts[0], self.counts[1]);
        let a = Matrix::from_fn(m, n, |i, j| S::from_rational(&self.payoffs[i * n + j][0]));
        let b = Matrix::from_fn(m, n, |i, j| S::from_rational(&self.payoffs[i * n + j][1]));
        Ok((a, b))
    }

    /// Expected payoff to `player` under a mixed profile.
    pub fn expected_payoff<S: Scalar>(&self, profile: &[Vec<S>], player: Player) -> S {
        (0..self.contingencies())
            .map(|c| (c, self.profile(c)))
            .map(|(c, pure)| {
                pure.iter()
                    .enumerate()
                    .fold(S::from_rational(&self.payoffs[c][player]), |acc, (p, &s)| {
                        acc * profile[p][s].clone()
                    })
            })
            .fold(S::zero(), |acc, x| acc + x)
    }

    /// Payoff to `player` of each pure strategy against the others' mixture.
    pub fn strategy_values<S: Scalar>(&self, profile: &[Vec<S>], player: Player) -> Vec<S> {
        let mut values = vec![S::zero(); self.counts[player]];
        for c in 0..self.contingencies() {
            let pure = self.profile(c);
            let weight = pure
                .iter()
                .enumerate()
                .filter(|&(p, _)| p != player)
                .fold(S::one(), |acc, (p, &s)| acc * profile[p][s].clone());
            values[pure[player]] =
                values[pure[player]].clone() + weight * S::from_rational(&self.payoffs[c][player]);
        }
        values
    }

    /// The common payoff total, if every contingency sums to the same value.
    pub fn constant_sum(&self) -> Option<BigRational> {
        let mut sums = self
            .payoffs
            .iter()
            .map(|p| p.iter().fold(BigRational::zero(), |acc, x| acc + x));
        let first = sums.next()?;
        sums.all(|s| s == first).then_some(first)
    }
}
