use crate::Error;
use crate::Field;
use crate::Result;
use crate::Scalar;
use std::cmp::Ordering;
use std::ops::Range;

/// Dense pivoting tableau: one row per constraint, one column per
/// variable, plus a trailing constant column. Each row has exactly one
/// basic variable, whose value is that row's constant.
///
/// Shared by the simplex method and both complementary pivoting engines.
#[derive(Debug, Clone)]
pub struct Tableau<S> {
    cells: Vec<Vec<S>>,
    basis: Vec<usize>,
    width: usize,
    pivots: u64,
}

impl<S: Scalar> Tableau<S> {
    /// `cells[r]` holds `width` coefficients followed by the constant.
    pub fn new(cells: Vec<Vec<S>>, basis: Vec<usize>) -> Result<Self> {
        let width = cells.first().map(|row| row.len().saturating_sub(1)).unwrap_or(0);
        if cells.len() != basis.len() || cells.iter().any(|row| row.len() != width + 1) {
            return Err(Error::ShapeMismatch("tableau rows and basis disagree".to_string()));
        }
        Ok(Self {
            cells,
            basis,
            width,
            pivots: 0,
        })
    }

    pub fn rows(&self) -> usize {
        self.cells.len()
    }
    pub fn width(&self) -> usize {
        self.width
    }
    pub fn pivots(&self) -> u64 {
        self.pivots
    }
    pub fn basis(&self) -> &[usize] {
        &self.basis
    }
    pub fn cell(&self, row: usize, col: usize) -> &S {
        &self.cells[row][col]
    }
    pub fn rhs(&self, row: usize) -> &S {
        &self.cells[row][self.width]
    }
    pub fn is_basic(&self, var: usize) -> bool {
        self.basis.contains(&var)
    }
    /// value of a variable in the current basic solution
    pub fn value(&self, var: usize) -> S {
        self.basis
            .iter()
            .position(|&b| b == var)
            .map(|r| self.rhs(r).clone())
            .unwrap_or_else(S::zero)
    }

    /// Bring `col` into the basis at `row`, returning the variable that leaves.
    pub fn pivot(&mut self, field: &Field<S>, row: usize, col: usize) -> Result<usize> {
        let pivot = self.cells[row][col].clone();
        for k in 0..=self.width {
            self.cells[row][k] = field.divide(&self.cells[row][k], &pivot)?;
        }
        self.cells[row][col] = S::one();
        for i in (0..self.cells.len()).filter(|&i| i != row) {
            let factor = self.cells[i][col].clone();
            if factor.is_zero() {
                continue;
            }
            for k in 0..=self.width {
                let delta = factor.clone() * self.cells[row][k].clone();
                self.cells[i][k] = field.clean(self.cells[i][k].clone() - delta);
            }
            self.cells[i][col] = S::zero();
        }
        self.pivots += 1;
        Ok(std::mem::replace(&mut self.basis[row], col))
    }

    /// Minimum-ratio test for `col` entering the basis.
    ///
    /// Candidates are rows with a positive coefficient in `col`. Ratios are
    /// compared lexicographically on `(rhs, cells[lex])` scaled by that
    /// coefficient; when `lex` spans the columns of the starting identity
    /// basis, no two rows compare equal in exact arithmetic. Rows that do
    /// compare equal fall back to the smallest row index.
    pub fn ratio(&self, field: &Field<S>, col: usize, lex: Range<usize>) -> Option<usize> {
        let candidates = (0..self.rows())
            .filter(|&r| field.is_positive(&self.cells[r][col]))
            .map(|r| (r, self.cells[r][col].clone()))
            .collect::<Vec<_>>();
        self.lexmin(field, candidates, lex)
    }

    /// Lexicographic minimum of `(rhs, cells[lex]) / divisor` over the
    /// candidate rows. Divisors must be positive.
    pub fn lexmin(&self, field: &Field<S>, candidates: Vec<(usize, S)>, lex: Range<usize>) -> Option<usize> {
        candidates
            .into_iter()
            .reduce(|best, next| match self.versus(field, &next, &best, lex.clone()) {
                Ordering::Less => next,
                _ => best,
            })
            .map(|(r, _)| r)
    }

    /// compare a/da against b/db entrywise by cross-multiplication
    fn versus(&self, field: &Field<S>, (a, da): &(usize, S), (b, db): &(usize, S), lex: Range<usize>) -> Ordering {
        std::iter::once(self.width)
            .chain(lex)
            .map(|k| {
                let lhs = self.cells[*a][k].clone() * db.clone();
                let rhs = self.cells[*b][k].clone() * da.clone();
                field.compare(&lhs, &rhs)
            })
            .find(|o| *o != Ordering::Equal)
            .unwrap_or_else(|| a.cmp(b))
    }
}
