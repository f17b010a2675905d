use crate::*;

/// Support enumeration for bimatrix games.
///
/// For each candidate pair of supports `(I, J)` the indifference system of
/// each player is solved for the other player's weights; the pair is an
/// equilibrium when both systems have a solution strictly positive on the
/// support and no strategy outside the support does better. Systems that
/// leave the weights free (unequal support sizes, degenerate payoffs) are
/// settled by a linear program.
///
/// Balanced search only visits equal-size supports, which is complete for
/// nondegenerate games. Degenerate games need `balanced: false`.
#[derive(Debug, Clone, Copy)]
pub struct SupportEnumeration {
    pub size: Option<usize>,
    pub balanced: bool,
}

/// Lexicographic `k`-subsets of `0..n`.
#[derive(Debug, Clone)]
pub struct Subsets {
    n: usize,
    next: Option<Vec<usize>>,
}

impl Subsets {
    pub fn new(n: usize, k: usize) -> Self {
        Self {
            n,
            next: (k <= n).then(|| (0..k).collect()),
        }
    }
}

impl Iterator for Subsets {
    type Item = Vec<usize>;
    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        let k = current.len();
        let mut successor = current.clone();
        // rightmost slot that can still move right
        if let Some(i) = (0..k).rev().find(|&i| successor[i] < self.n - k + i) {
            successor[i] += 1;
            for j in i + 1..k {
                successor[j] = successor[j - 1] + 1;
            }
            self.next = Some(successor);
        }
        Some(current)
    }
}

impl SupportEnumeration {
    /// support size pairs in the order they are searched
    pub fn levels(&self, m: usize, n: usize) -> Vec<(usize, usize)> {
        match (self.size, self.balanced) {
            (Some(k), _) => vec![(k, k)],
            (None, true) => (1..=m.min(n)).map(|k| (k, k)).collect(),
            (None, false) => {
                let mut levels = (1..=m)
                    .flat_map(|s1| (1..=n).map(move |s2| (s1, s2)))
                    .collect::<Vec<_>>();
                levels.sort_by_key(|&(s1, s2)| (s1 + s2, s1));
                levels
            }
        }
    }

    /// Weights of the opponent that make every strategy in `own` equally
    /// good against `other` under `payoffs` (rows are own strategies), and
    /// that common value. `None` when no such weights exist.
    fn indifference<S: Scalar>(
        field: &Field<S>,
        meter: &Meter,
        payoffs: &Matrix<S>,
        own: &[usize],
        other: &[usize],
    ) -> Result<Option<(Vec<S>, S)>> {
        let unknowns = other.len() + 1;
        let system = Matrix::from_fn(own.len() + 1, unknowns, |r, c| match (own.get(r), other.get(c)) {
            (Some(&i), Some(&j)) => payoffs[(i, j)].clone(),
            (Some(_), None) => -S::one(),
            (None, Some(_)) => S::one(),
            (None, None) => S::zero(),
        });
        let mut rhs = vec![S::zero(); own.len() + 1];
        rhs[own.len()] = S::one();
        match solve_linear_system(field, &system, &rhs) {
            Ok(mut solution) => {
                let value = solution.pop().unwrap_or_else(S::zero);
                Ok(Some((solution, value)))
            }
            Err(Error::NoSolution) => Ok(None),
            Err(Error::Singular | Error::InfiniteSolutions) => Self::widest(field, meter, payoffs, own, other),
            Err(e) => Err(e),
        }
    }

    /// Among the weights on `other` that keep `own` indifferent and no
    /// strategy outside `own` better, the one whose smallest weight is
    /// largest. `None` unless that smallest weight is positive.
    ///
    /// Variables are the weights, the floor `t` under every weight, and the
    /// value split as `v⁺ − v⁻`; the program maximizes `t`.
    fn widest<S: Scalar>(
        field: &Field<S>,
        meter: &Meter,
        payoffs: &Matrix<S>,
        own: &[usize],
        other: &[usize],
    ) -> Result<Option<(Vec<S>, S)>> {
        let k = other.len();
        let (floor, up, down) = (k, k + 1, k + 2);
        let blank = || vec![S::zero(); k + 3];
        let versus = |i: usize, sign: S| {
            let mut row = blank();
            for (c, &j) in other.iter().enumerate() {
                row[c] = sign.clone() * payoffs[(i, j)].clone();
            }
            row[up] = -sign.clone();
            row[down] = sign;
            row
        };
        let mut rows = Vec::new();
        let mut bounds = Vec::new();
        for i in 0..payoffs.rows() {
            rows.push(versus(i, S::one()));
            bounds.push(S::zero());
            if own.contains(&i) {
                rows.push(versus(i, -S::one()));
                bounds.push(S::zero());
            }
        }
        for sign in [S::one(), -S::one()] {
            let mut row = blank();
            row[..k].fill(sign.clone());
            rows.push(row);
            bounds.push(sign);
        }
        for c in 0..k {
            let mut row = blank();
            row[floor] = S::one();
            row[c] = -S::one();
            rows.push(row);
            bounds.push(S::zero());
        }
        let mut objective = blank();
        objective[floor] = S::one();
        let program = LinearProgram::new(objective, Matrix::from_rows(rows)?, bounds)?;
        match program.maximize(field, meter) {
            Ok(optimum) if field.is_positive(&optimum.value) => {
                let value = optimum.primal[up].clone() - optimum.primal[down].clone();
                Ok(Some((optimum.primal[..k].to_vec(), value)))
            }
            Ok(_) | Err(Error::Infeasible) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Full strategy vector if `weights` on `support` are strictly positive.
    fn spread<S: Scalar>(field: &Field<S>, size: usize, support: &[usize], weights: Vec<S>) -> Option<Vec<S>> {
        if !weights.iter().all(|w| field.is_positive(w)) {
            return None;
        }
        let mut full = vec![S::zero(); size];
        for (&i, w) in support.iter().zip(weights) {
            full[i] = w;
        }
        Some(full)
    }

    /// Test one support pair. Unsolvable indifference systems reject the
    /// candidate; any other failure propagates.
    pub fn candidate<S: Scalar>(
        field: &Field<S>,
        meter: &Meter,
        a: &Matrix<S>,
        bt: &Matrix<S>,
        rows: &[usize],
        cols: &[usize],
    ) -> Result<Option<MixedProfile<S>>> {
        let (m, n) = (a.rows(), a.cols());
        let row_side = || Self::indifference(field, meter, a, rows, cols);
        let col_side = || Self::indifference(field, meter, bt, cols, rows);
        // the side with at least as many equations as unknowns rejects cheaply
        let ((y, v), (x, u)) = match rows.len() >= cols.len() {
            true => {
                let Some(row) = row_side()? else { return Ok(None) };
                let Some(col) = col_side()? else { return Ok(None) };
                (row, col)
            }
            false => {
                let Some(col) = col_side()? else { return Ok(None) };
                let Some(row) = row_side()? else { return Ok(None) };
                (row, col)
            }
        };
        let Some(y) = Self::spread(field, n, cols, y) else {
            return Ok(None);
        };
        let Some(x) = Self::spread(field, m, rows, x) else {
            return Ok(None);
        };
        let row_values = a.apply(&y);
        let col_values = bt.apply(&x);
        let stable = (0..m).all(|i| field.compare(&row_values[i], &v).is_le())
            && (0..n).all(|j| field.compare(&col_values[j], &u).is_le());
        match stable {
            true => Ok(Some(MixedProfile {
                strategies: vec![x, y],
            })),
            false => Ok(None),
        }
    }

    fn level<S: Scalar>(
        field: &Field<S>,
        meter: &Meter,
        a: &Matrix<S>,
        bt: &Matrix<S>,
        (s1, s2): (usize, usize),
        first: bool,
    ) -> Result<Vec<MixedProfile<S>>> {
        let pairs = Subsets::new(a.rows(), s1)
            .flat_map(|rows| Subsets::new(a.cols(), s2).map(move |cols| (rows.clone(), cols)))
            .collect::<Vec<(Vec<usize>, Vec<usize>)>>();
        let check = |(rows, cols): &(Vec<usize>, Vec<usize>)| -> Result<Option<MixedProfile<S>>> {
            meter.tick()?;
            let found = Self::candidate(field, meter, a, bt, rows, cols)?;
            if found.is_some() {
                log::debug!("supports {:?} x {:?} form an equilibrium", rows, cols);
            }
            Ok(found)
        };
        #[cfg(feature = "parallel")]
        let checked = {
            use rayon::iter::IntoParallelRefIterator;
            use rayon::iter::ParallelIterator;
            match first {
                true => pairs
                    .par_iter()
                    .map(check)
                    .find_first(|outcome| !matches!(outcome, Ok(None)))
                    .into_iter()
                    .collect::<Vec<_>>(),
                false => pairs.par_iter().map(check).collect::<Vec<_>>(),
            }
        };
        #[cfg(not(feature = "parallel"))]
        let checked = {
            let mut checked = Vec::new();
            for pair in pairs.iter() {
                let outcome = check(pair);
                let done = outcome.is_err() || (first && matches!(outcome, Ok(Some(_))));
                checked.push(outcome);
                if done {
                    break;
                }
            }
            checked
        };
        checked
            .into_iter()
            .filter_map(Result::transpose)
            .collect()
    }
}

impl Solve for SupportEnumeration {
    fn solve<S: Scalar>(&self, game: &Game, field: &Field<S>, config: &Config, meter: &Meter) -> Result<Vec<Profile<S>>> {
        let Game::Normal(game) = game else {
            return Err(Error::Unsupported("support enumeration on an extensive game".to_string()));
        };
        let (a, b) = game.matrices::<S>()?;
        let ref bt = b.transpose();
        let (m, n) = (a.rows(), a.cols());
        if self.size.is_some_and(|k| k == 0 || k > m.min(n)) {
            return Err(Error::InvalidConfig(format!(
                "support size {:?} outside 1..={}",
                self.size,
                m.min(n)
            )));
        }
        let mut found = Vec::new();
        for level in self.levels(m, n) {
            let equilibria = Self::level(field, meter, &a, bt, level, config.enumeration == Enumeration::First)?;
            found.extend(equilibria.into_iter().map(Profile::Mixed));
            if config.enumeration == Enumeration::First && !found.is_empty() {
                found.truncate(1);
                break;
            }
        }
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use std::collections::BTreeSet;

    #[test]
    fn subsets_are_lexicographic() {
        let all = Subsets::new(4, 2).collect::<Vec<_>>();
        assert_eq!(
            all,
            vec![vec![0, 1], vec![0, 2], vec![0, 3], vec![1, 2], vec![1, 3], vec![2, 3]]
        );
        assert_eq!(Subsets::new(3, 3).count(), 1);
        assert_eq!(Subsets::new(2, 3).count(), 0);
    }

    #[test]
    fn level_orders() {
        let balanced = SupportEnumeration {
            size: None,
            balanced: true,
        };
        assert_eq!(balanced.levels(3, 2), vec![(1, 1), (2, 2)]);
        let free = SupportEnumeration {
            size: None,
            balanced: false,
        };
        assert_eq!(free.levels(2, 2), vec![(1, 1), (1, 2), (2, 1), (2, 2)]);
    }

    macro_rules! twins {
        ($name:ident, $body:expr) => {
            paste::paste! {
                #[test]
                fn [<$name _exact>]() {
                    ($body)(Config::new(Algorithm::support_enumeration()));
                }
                #[test]
                fn [<$name _float>]() {
                    ($body)(Config::new(Algorithm::support_enumeration()).floating());
                }
            }
        };
    }

    twins!(battle_of_the_sexes_has_three, |config: Config| {
        let found = solve(&Game::from(battle_of_the_sexes()), &config.all()).unwrap();
        assert_eq!(found.len(), 3);
        if let Solutions::Exact(found) = found {
            let mixed = found[2].profile.mixed().unwrap();
            assert_eq!(
                mixed.strategies,
                vec![vec![rational(3, 5), rational(2, 5)], vec![rational(2, 5), rational(3, 5)]]
            );
        }
    });

    twins!(first_stops_early, |config: Config| {
        let found = solve(&Game::from(battle_of_the_sexes()), &config).unwrap();
        assert_eq!(found.len(), 1);
    });

    #[test]
    fn fixed_size_restricts_the_search() {
        let config = Config::new(Algorithm::SupportEnumeration {
            size: Some(2),
            balanced: true,
        })
        .all();
        let found = equilibria::<Exact>(&Game::from(battle_of_the_sexes()), &config).unwrap();
        assert_eq!(found.len(), 1);
        let config = Config::new(Algorithm::SupportEnumeration {
            size: Some(3),
            balanced: true,
        });
        assert!(matches!(
            solve(&Game::from(battle_of_the_sexes()), &config),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn rock_paper_scissors_needs_full_support() {
        let config = Config::new(Algorithm::support_enumeration()).all();
        let found = equilibria::<Exact>(&Game::from(rock_paper_scissors()), &config).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].profile.mixed().unwrap().strategies[0], vec![rational(1, 3); 3]);
    }

    #[test]
    fn random_six_by_six_all_mode_terminates_without_duplicates() {
        let mut rng = SmallRng::seed_from_u64(7);
        let field = Field::<Exact>::new(Precision::Exact).unwrap();
        for k in 2..=6 {
            let mut draw = || {
                (0..k)
                    .map(|_| (0..k).map(|_| integer(rng.random_range(-9..=9))).collect())
                    .collect::<Vec<Vec<_>>>()
            };
            let a = draw();
            let b = draw();
            let game = Game::from(NormalForm::bimatrix(a, b).unwrap());
            let config = Config::new(Algorithm::SupportEnumeration {
                size: None,
                balanced: false,
            })
            .all();
            let found = equilibria::<Exact>(&game, &config).unwrap();
            let mut supports = BTreeSet::new();
            for eq in found.iter() {
                assert!(is_nash(&field, &game, &eq.profile).unwrap());
                let support = eq
                    .profile
                    .mixed()
                    .unwrap()
                    .strategies
                    .iter()
                    .map(|s| s.iter().map(|w| !field.is_zero(w)).collect::<Vec<_>>())
                    .collect::<Vec<_>>();
                assert!(supports.insert(support));
            }
        }
    }

    /// Row strategy 0 is a best reply to every column mix with both weights
    /// in `[1/3, 2/3]`, so the only equilibria pair a pure row with a mixed
    /// column.
    fn flat_reply() -> Game {
        let a = vec![
            vec![integer(2), integer(2)],
            vec![integer(3), integer(0)],
            vec![integer(0), integer(3)],
        ];
        let b = vec![
            vec![integer(1), integer(1)],
            vec![integer(0), integer(1)],
            vec![integer(1), integer(0)],
        ];
        Game::from(NormalForm::bimatrix(a, b).unwrap())
    }

    #[test]
    fn unequal_supports_settle_degenerate_games() {
        let field = Field::<Exact>::new(Precision::Exact).unwrap();
        let ref game = flat_reply();
        let config = Config::new(Algorithm::SupportEnumeration {
            size: None,
            balanced: false,
        })
        .all();
        let found = equilibria::<Exact>(game, &config).unwrap();
        assert_eq!(found.len(), 1);
        assert!(is_nash(&field, game, &found[0].profile).unwrap());
        assert_eq!(
            found[0].profile.mixed().unwrap().strategies,
            vec![
                vec![integer(1), integer(0), integer(0)],
                vec![rational(1, 2), rational(1, 2)]
            ]
        );
    }

    #[test]
    fn unequal_supports_settle_degenerate_games_in_floating_point() {
        let field = Field::<Float>::new(Precision::floating()).unwrap();
        let ref game = flat_reply();
        let config = Config::new(Algorithm::SupportEnumeration {
            size: None,
            balanced: false,
        })
        .floating();
        let found = equilibria::<Float>(game, &config).unwrap();
        assert_eq!(found.len(), 1);
        assert!(is_nash(&field, game, &found[0].profile).unwrap());
    }

    #[test]
    #[cfg(not(feature = "parallel"))]
    fn first_mode_stops_inside_a_level() {
        // (0, 0) is the first candidate and already an equilibrium
        let config = Config::new(Algorithm::support_enumeration()).budget(Budget {
            steps: Some(1),
            time: None,
        });
        let found = solve(&Game::from(battle_of_the_sexes()), &config).unwrap();
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn budget_interrupts_enumeration() {
        let config = Config::new(Algorithm::support_enumeration()).all().budget(Budget {
            steps: Some(3),
            time: None,
        });
        assert!(matches!(
            solve(&Game::from(rock_paper_scissors()), &config),
            Err(Error::Timeout { .. })
        ));
    }
}
