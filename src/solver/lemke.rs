use crate::*;
use num_rational::BigRational;
use num_traits::One;
use std::collections::BTreeSet;

/// Linear complementarity problem: find `z ≥ 0` with `w = q + M z ≥ 0`
/// and `wᵀz = 0`.
#[derive(Debug, Clone)]
pub struct Lcp<S> {
    m: Matrix<S>,
    q: Vec<S>,
}

impl<S: Scalar> Lcp<S> {
    pub fn new(m: Matrix<S>, q: Vec<S>) -> Result<Self> {
        if m.rows() != m.cols() || m.rows() != q.len() {
            return Err(Error::ShapeMismatch(format!(
                "{}x{} LCP matrix with {} constants",
                m.rows(),
                m.cols(),
                q.len()
            )));
        }
        Ok(Self { m, q })
    }
    pub fn dimension(&self) -> usize {
        self.q.len()
    }

    /// Lemke's method with covering vector of ones.
    ///
    /// Columns are `w` (0..n), `z` (n..2n) and the artificial `z0` (2n).
    /// Ratio ties are broken lexicographically over the `w` columns, which
    /// hold the basis inverse.
    pub fn solve(&self, field: &Field<S>, meter: &Meter) -> Result<Vec<S>> {
        let n = self.dimension();
        if self.q.iter().all(|q| !field.is_negative(q)) {
            return Ok(vec![S::zero(); n]);
        }
        let artificial = 2 * n;
        let cells = (0..n)
            .map(|i| {
                let mut row = vec![S::zero(); 2 * n + 2];
                row[i] = S::one();
                (0..n).for_each(|j| row[n + j] = -self.m[(i, j)].clone());
                row[artificial] = -S::one();
                row[2 * n + 1] = self.q[i].clone();
                row
            })
            .collect();
        let mut tableau = Tableau::new(cells, (0..n).collect())?;
        let candidates = (0..n).map(|r| (r, S::one())).collect();
        let Some(row) = tableau.lexmin(field, candidates, 0..n) else {
            return Err(Error::RayTermination { pivots: 0 });
        };
        meter.tick()?;
        let mut leaving = tableau.pivot(field, row, artificial)?;
        let mut seen = BTreeSet::new();
        while leaving != artificial {
            meter.tick()?;
            let entering = match leaving < n {
                true => leaving + n,
                false => leaving - n,
            };
            if !seen.insert((tableau.basis().to_vec(), entering)) {
                return Err(Error::CycleDetected {
                    pivots: tableau.pivots(),
                });
            }
            let Some(row) = tableau.ratio(field, entering, 0..n) else {
                return Err(Error::RayTermination {
                    pivots: tableau.pivots(),
                });
            };
            leaving = tableau.pivot(field, row, entering)?;
            log::trace!("lemke pivot {}: {} in, {} out", tableau.pivots(), entering, leaving);
        }
        log::debug!("lemke finished after {} pivots", tableau.pivots());
        Ok((0..n).map(|j| tableau.value(n + j)).collect())
    }
}

/// Sequence-form LCP of a two-player extensive game, solved by Lemke.
///
/// With `z = (x, y, p, q)` the problem is
/// `M = [[0, -A, -Eᵀ, 0], [-Bᵀ, 0, 0, -Fᵀ], [E, 0, 0, 0], [0, F, 0, 0]]`
/// and constants `(0, 0, -e, -f)`, where leaf payoffs are first shifted
/// strictly negative so the flow equalities may be relaxed to `Ex ≥ e`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequenceLemke;

impl SequenceLemke {
    pub fn lcp<S: Scalar>(form: &SequenceForm) -> Result<Lcp<S>> {
        let offsets = [
            -(form.ceiling(0).clone() + BigRational::one()),
            -(form.ceiling(1).clone() + BigRational::one()),
        ];
        let (a, b) = form.shifted_matrices::<S>(&offsets)?;
        let e = form.constraints::<S>(0);
        let f = form.constraints::<S>(1);
        let (n1, n2) = (form.sequences(0), form.sequences(1));
        let (k1, k2) = (e.rows(), f.rows());
        let size = n1 + n2 + k1 + k2;
        let mut m = Matrix::zeros(size, size);
        for i in 0..n1 {
            for j in 0..n2 {
                m[(i, n1 + j)] = -a[(i, j)].clone();
                m[(n1 + j, i)] = -b[(i, j)].clone();
            }
        }
        for r in 0..k1 {
            for s in 0..n1 {
                m[(s, n1 + n2 + r)] = -e[(r, s)].clone();
                m[(n1 + n2 + r, s)] = e[(r, s)].clone();
            }
        }
        for r in 0..k2 {
            for s in 0..n2 {
                m[(n1 + s, n1 + n2 + k1 + r)] = -f[(r, s)].clone();
                m[(n1 + n2 + k1 + r, n1 + s)] = f[(r, s)].clone();
            }
        }
        let q = std::iter::repeat_n(S::zero(), n1 + n2)
            .chain(form.bounds::<S>(0).into_iter().map(|x| -x))
            .chain(form.bounds::<S>(1).into_iter().map(|x| -x))
            .collect();
        Lcp::new(m, q)
    }

    /// realization plans of both players
    pub fn plans<S: Scalar>(field: &Field<S>, meter: &Meter, form: &SequenceForm) -> Result<Vec<Vec<S>>> {
        let z = Self::lcp::<S>(form)?.solve(field, meter)?;
        let (n1, n2) = (form.sequences(0), form.sequences(1));
        Ok(vec![z[..n1].to_vec(), z[n1..n1 + n2].to_vec()])
    }
}

impl Solve for SequenceLemke {
    fn solve<S: Scalar>(&self, game: &Game, field: &Field<S>, _: &Config, meter: &Meter) -> Result<Vec<Profile<S>>> {
        let Game::Extensive(game) = game else {
            return Err(Error::Unsupported("sequence-form LCP needs an extensive game".to_string()));
        };
        if game.players() != 2 {
            return Err(Error::Unsupported(format!(
                "sequence-form LCP on a {}-player game",
                game.players()
            )));
        }
        let ref form = to_sequence_form(game);
        let plans = Self::plans(field, meter, form)?;
        let behavior = assemble_behavior(field, form, plans)?;
        Ok(vec![Profile::Behavior(behavior)])
    }
}
