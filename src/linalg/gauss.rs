use super::*;
use crate::Error;
use crate::Field;
use crate::Mode;
use crate::Result;
use crate::Scalar;

/// Solve `A x = b` by Gauss-Jordan elimination with partial pivoting.
///
/// Pivot choice depends on the field's mode: floating fields take the
/// largest magnitude in the column, exact fields take the first non-zero
/// entry so that results are reproducible.
///
/// # Classification
///
/// - square and rank-deficient → [`Error::Singular`]
/// - otherwise inconsistent → [`Error::NoSolution`]
/// - otherwise rank-deficient → [`Error::InfiniteSolutions`]
pub fn solve_linear_system<S: Scalar>(field: &Field<S>, a: &Matrix<S>, b: &[S]) -> Result<Vec<S>> {
    if b.len() != a.rows() {
        return Err(Error::ShapeMismatch(format!(
            "{} right-hand sides for {} equations",
            b.len(),
            a.rows()
        )));
    }
    let n = a.rows();
    let m = a.cols();
    let mut rows = (0..n)
        .map(|i| {
            let mut row = a.row(i).to_vec();
            row.push(b[i].clone());
            row
        })
        .collect::<Vec<Vec<S>>>();
    let mut pivots = Vec::<usize>::with_capacity(m.min(n));
    let mut r = 0;
    for c in 0..m {
        if r == n {
            break;
        }
        let Some(p) = select(field, &rows, r, c) else {
            continue;
        };
        rows.swap(r, p);
        let pivot = rows[r][c].clone();
        for k in c..=m {
            rows[r][k] = field.divide(&rows[r][k], &pivot)?;
        }
        for i in (0..n).filter(|&i| i != r) {
            let factor = rows[i][c].clone();
            if factor.is_zero() {
                continue;
            }
            for k in c..=m {
                let delta = factor.clone() * rows[r][k].clone();
                rows[i][k] = field.clean(rows[i][k].clone() - delta);
            }
        }
        pivots.push(c);
        r += 1;
    }
    let rank = pivots.len();
    let consistent = rows[rank..].iter().all(|row| field.is_zero(&row[m]));
    match (n == m, consistent, rank == m) {
        (true, _, false) => Err(Error::Singular),
        (false, false, _) => Err(Error::NoSolution),
        (false, true, false) => Err(Error::InfiniteSolutions),
        (_, false, true) => Err(Error::NoSolution),
        (_, true, true) => {
            let mut x = vec![S::zero(); m];
            for (row, &c) in pivots.iter().enumerate() {
                x[c] = rows[row][m].clone();
            }
            Ok(x)
        }
    }
}

/// row index of the pivot for column `c`, searching rows `r..`
fn select<S: Scalar>(field: &Field<S>, rows: &[Vec<S>], r: usize, c: usize) -> Option<usize> {
    let candidates = (r..rows.len()).filter(|&i| !field.is_zero(&rows[i][c]));
    match S::MODE {
        Mode::Exact => candidates.min(),
        Mode::Floating => candidates.reduce(|best, i| {
            if rows[i][c].abs() > rows[best][c].abs() {
                i
            } else {
                best
            }
        }),
    }
}
