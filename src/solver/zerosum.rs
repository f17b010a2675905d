use crate::*;

/// Maximin linear program for two-player constant-sum games.
///
/// Player one solves `max f·v` subject to `Fᵀv − Aᵀx ≤ 0`, `Ex = e`,
/// `x ≥ 0` with `v` free, written as `v = v⁺ − v⁻` and the equality as a
/// pair of inequalities. Player two's strategy is the dual of the first
/// block. A normal-form game is the case where `E` and `F` are single rows
/// of ones.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroSum;

/// Optimal strategies of both players and the value to player one.
#[derive(Debug, Clone, PartialEq)]
pub struct Maximin<S> {
    pub x: Vec<S>,
    pub y: Vec<S>,
    pub value: S,
}

impl ZeroSum {
    /// Solve the program for payoffs `a` to player one.
    pub fn maximin<S: Scalar>(
        field: &Field<S>,
        meter: &Meter,
        a: &Matrix<S>,
        e: &Matrix<S>,
        e_bounds: &[S],
        f: &Matrix<S>,
        f_bounds: &[S],
    ) -> Result<Maximin<S>> {
        let (n1, n2) = (a.rows(), a.cols());
        let (k1, k2) = (e.rows(), f.rows());
        if e.cols() != n1 || f.cols() != n2 || e_bounds.len() != k1 || f_bounds.len() != k2 {
            return Err(Error::ShapeMismatch("constraint blocks disagree with payoffs".to_string()));
        }
        let width = n1 + 2 * k2;
        let constraints = Matrix::from_fn(n2 + 2 * k1, width, |r, c| match (r, c) {
            (r, c) if r < n2 && c < n1 => -a[(c, r)].clone(),
            (r, c) if r < n2 && c < n1 + k2 => f[(c - n1, r)].clone(),
            (r, c) if r < n2 => -f[(c - n1 - k2, r)].clone(),
            (r, c) if r < n2 + k1 && c < n1 => e[(r - n2, c)].clone(),
            (r, c) if c < n1 => -e[(r - n2 - k1, c)].clone(),
            _ => S::zero(),
        });
        let bounds = std::iter::repeat_n(S::zero(), n2)
            .chain(e_bounds.iter().cloned())
            .chain(e_bounds.iter().map(|x| -x.clone()))
            .collect();
        let objective = std::iter::repeat_n(S::zero(), n1)
            .chain(f_bounds.iter().cloned())
            .chain(f_bounds.iter().map(|x| -x.clone()))
            .collect();
        let optimum = LinearProgram::new(objective, constraints, bounds)?.maximize(field, meter)?;
        log::debug!("maximin value {}", optimum.value);
        Ok(Maximin {
            x: optimum.primal[..n1].to_vec(),
            y: optimum.dual[..n2].to_vec(),
            value: optimum.value,
        })
    }

    /// Normal-form matrix game.
    pub fn matrix<S: Scalar>(field: &Field<S>, meter: &Meter, a: &Matrix<S>) -> Result<Maximin<S>> {
        let e = Matrix::from_fn(1, a.rows(), |_, _| S::one());
        let f = Matrix::from_fn(1, a.cols(), |_, _| S::one());
        Self::maximin(field, meter, a, &e, &[S::one()], &f, &[S::one()])
    }

    /// Sequence-form game.
    pub fn sequence<S: Scalar>(field: &Field<S>, meter: &Meter, form: &SequenceForm) -> Result<Maximin<S>> {
        let (a, _) = form.matrices::<S>()?;
        Self::maximin(
            field,
            meter,
            &a,
            &form.constraints::<S>(0),
            &form.bounds::<S>(0),
            &form.constraints::<S>(1),
            &form.bounds::<S>(1),
        )
    }
}

/// Optimal mixed strategies and value of the matrix game `a`, where the
/// row player receives `a` and the column player pays it.
pub fn solve_zero_sum_lp<S: Scalar>(field: &Field<S>, meter: &Meter, a: &Matrix<S>) -> Result<Maximin<S>> {
    ZeroSum::matrix(field, meter, a)
}

impl Solve for ZeroSum {
    fn solve<S: Scalar>(&self, game: &Game, field: &Field<S>, _: &Config, meter: &Meter) -> Result<Vec<Profile<S>>> {
        if game.players() != 2 {
            return Err(Error::Unsupported(format!("zero-sum LP on a {}-player game", game.players())));
        }
        match game {
            Game::Normal(game) => {
                if game.constant_sum().is_none() {
                    return Err(Error::Unsupported("zero-sum LP on a general-sum game".to_string()));
                }
                let (a, _) = game.matrices::<S>()?;
                let solution = Self::matrix(field, meter, &a)?;
                Ok(vec![Profile::Mixed(assemble_mixed(field, vec![solution.x, solution.y])?)])
            }
            Game::Extensive(game) => {
                let ref form = to_sequence_form(game);
                if form.constant_sum().is_none() {
                    return Err(Error::Unsupported("zero-sum LP on a general-sum game".to_string()));
                }
                let solution = Self::sequence(field, meter, form)?;
                let behavior = assemble_behavior(field, form, vec![solution.x, solution.y])?;
                Ok(vec![Profile::Behavior(behavior)])
            }
        }
    }
}
