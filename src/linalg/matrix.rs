use crate::Error;
use crate::Result;
use crate::Scalar;
use std::ops::Index;
use std::ops::IndexMut;

/// Row-major dense matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<S> {
    rows: usize,
    cols: usize,
    data: Vec<S>,
}

impl<S: Scalar> Matrix<S> {
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![S::zero(); rows * cols],
        }
    }
    pub fn from_fn<F>(rows: usize, cols: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> S,
    {
        Self {
            rows,
            cols,
            data: (0..rows)
                .flat_map(|i| (0..cols).map(move |j| (i, j)))
                .map(|(i, j)| f(i, j))
                .collect(),
        }
    }
    /// fails on ragged input
    pub fn from_rows(rows: Vec<Vec<S>>) -> Result<Self> {
        let cols = rows.first().map(Vec::len).unwrap_or(0);
        match rows.iter().all(|row| row.len() == cols) {
            false => Err(Error::ShapeMismatch("ragged matrix rows".to_string())),
            true => Ok(Self {
                rows: rows.len(),
                cols,
                data: rows.into_iter().flatten().collect(),
            }),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }
    pub fn cols(&self) -> usize {
        self.cols
    }
    pub fn row(&self, i: usize) -> &[S] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }
    pub fn transpose(&self) -> Self {
        Self::from_fn(self.cols, self.rows, |i, j| self[(j, i)].clone())
    }
    /// M v
    pub fn apply(&self, v: &[S]) -> Vec<S> {
        (0..self.rows)
            .map(|i| {
                self.row(i)
                    .iter()
                    .zip(v)
                    .fold(S::zero(), |acc, (m, x)| acc + m.clone() * x.clone())
            })
            .collect()
    }
    /// vᵀ M
    pub fn apply_left(&self, v: &[S]) -> Vec<S> {
        (0..self.cols)
            .map(|j| {
                (0..self.rows)
                    .zip(v)
                    .fold(S::zero(), |acc, (i, x)| acc + self[(i, j)].clone() * x.clone())
            })
            .collect()
    }
    pub fn min(&self) -> Option<S> {
        self.data
            .iter()
            .cloned()
            .reduce(|a, b| if b < a { b } else { a })
    }
    pub fn max(&self) -> Option<S> {
        self.data
            .iter()
            .cloned()
            .reduce(|a, b| if b > a { b } else { a })
    }
    pub fn map<T, F>(&self, f: F) -> Matrix<T>
    where
        F: FnMut(&S) -> T,
    {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(f).collect(),
        }
    }
}

impl<S> Index<(usize, usize)> for Matrix<S> {
    type Output = S;
    fn index(&self, (i, j): (usize, usize)) -> &S {
        &self.data[i * self.cols + j]
    }
}
impl<S> IndexMut<(usize, usize)> for Matrix<S> {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut S {
        &mut self.data[i * self.cols + j]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::*;

    #[test]
    fn products_match_by_hand() {
        let m = Matrix::from_rows(vec![
            vec![integer(1), integer(2)],
            vec![integer(3), integer(4)],
            vec![integer(5), integer(6)],
        ])
        .unwrap();
        assert_eq!(m.apply(&[integer(1), integer(-1)]), vec![integer(-1); 3]);
        assert_eq!(
            m.apply_left(&[integer(1), integer(0), integer(1)]),
            vec![integer(6), integer(8)]
        );
        assert_eq!(m.transpose()[(1, 2)], integer(6));
        assert_eq!(m.min(), Some(integer(1)));
        assert_eq!(m.max(), Some(integer(6)));
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let ragged = Matrix::<Float>::from_rows(vec![vec![1.0, 2.0], vec![3.0]]);
        assert!(matches!(ragged, Err(Error::ShapeMismatch(_))));
    }
}
