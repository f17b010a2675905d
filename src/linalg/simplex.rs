use super::*;
use crate::Error;
use crate::Field;
use crate::Meter;
use crate::Result;
use crate::Scalar;

/// Linear program in canonical form: maximize `c·x` subject to
/// `G x ≤ h` and `x ≥ 0`. Right-hand sides may have any sign.
#[derive(Debug, Clone)]
pub struct LinearProgram<S> {
    objective: Vec<S>,
    constraints: Matrix<S>,
    bounds: Vec<S>,
}

/// Optimal primal point, constraint duals, and objective value.
#[derive(Debug, Clone, PartialEq)]
pub struct Optimum<S> {
    pub primal: Vec<S>,
    pub dual: Vec<S>,
    pub value: S,
}

impl<S: Scalar> LinearProgram<S> {
    pub fn new(objective: Vec<S>, constraints: Matrix<S>, bounds: Vec<S>) -> Result<Self> {
        if objective.len() != constraints.cols() || bounds.len() != constraints.rows() {
            return Err(Error::ShapeMismatch(format!(
                "{} costs and {} bounds for a {}x{} constraint matrix",
                objective.len(),
                bounds.len(),
                constraints.rows(),
                constraints.cols()
            )));
        }
        Ok(Self {
            objective,
            constraints,
            bounds,
        })
    }

    /// Two-phase simplex with Bland's rule.
    ///
    /// Rows with a negative bound are negated and given an artificial
    /// variable; phase one drives the artificials to zero, phase two
    /// optimizes the real objective with artificials barred from entering.
    /// Duals are read from the slack columns of the final tableau.
    pub fn maximize(&self, field: &Field<S>, meter: &Meter) -> Result<Optimum<S>> {
        let n = self.constraints.cols();
        let m = self.constraints.rows();
        let negated = self
            .bounds
            .iter()
            .map(|h| field.is_negative(h))
            .collect::<Vec<bool>>();
        let artificials = negated.iter().filter(|&&b| b).count();
        let width = n + m + artificials;
        let mut basis = Vec::with_capacity(m);
        let mut cells = Vec::with_capacity(m);
        let mut next = n + m;
        for i in 0..m {
            let sign = if negated[i] { -S::one() } else { S::one() };
            let mut row = vec![S::zero(); width + 1];
            for j in 0..n {
                row[j] = sign.clone() * self.constraints[(i, j)].clone();
            }
            row[n + i] = sign.clone();
            row[width] = sign * self.bounds[i].clone();
            if negated[i] {
                row[next] = S::one();
                basis.push(next);
                next += 1;
            } else {
                basis.push(n + i);
            }
            cells.push(row);
        }
        let mut tableau = Tableau::new(cells, basis)?;

        if artificials > 0 {
            let costs = (0..width)
                .map(|j| if j >= n + m { -S::one() } else { S::zero() })
                .collect::<Vec<S>>();
            Self::iterate(field, meter, &mut tableau, &costs, width)?;
            let infeasibility = Self::objective(&tableau, &costs);
            if field.is_negative(&infeasibility) {
                return Err(Error::Infeasible);
            }
            for r in 0..tableau.rows() {
                if tableau.basis()[r] < n + m {
                    continue;
                }
                if let Some(j) = (0..n + m).find(|&j| !field.is_zero(tableau.cell(r, j))) {
                    tableau.pivot(field, r, j)?;
                }
            }
        }

        let costs = (0..width)
            .map(|j| match j < n {
                true => self.objective[j].clone(),
                false => S::zero(),
            })
            .collect::<Vec<S>>();
        Self::iterate(field, meter, &mut tableau, &costs, n + m)?;
        let primal = (0..n).map(|j| tableau.value(j)).collect::<Vec<S>>();
        let dual = (0..m)
            .map(|i| Self::priced(&tableau, &costs, n + i))
            .collect::<Vec<S>>();
        let value = Self::objective(&tableau, &costs);
        log::trace!("simplex optimum after {} pivots", tableau.pivots());
        Ok(Optimum {
            primal,
            dual,
            value,
        })
    }

    /// pivot until no column below `allowed` has a positive reduced cost
    fn iterate(field: &Field<S>, meter: &Meter, tableau: &mut Tableau<S>, costs: &[S], allowed: usize) -> Result<()> {
        loop {
            meter.tick()?;
            let entering = (0..allowed)
                .filter(|&j| !tableau.is_basic(j))
                .find(|&j| field.is_positive(&(costs[j].clone() - Self::priced(tableau, costs, j))));
            let Some(col) = entering else {
                return Ok(());
            };
            let leaving = (0..tableau.rows())
                .filter(|&r| field.is_positive(tableau.cell(r, col)))
                .reduce(|best, r| {
                    let lhs = tableau.rhs(r).clone() * tableau.cell(best, col).clone();
                    let rhs = tableau.rhs(best).clone() * tableau.cell(r, col).clone();
                    match field.compare(&lhs, &rhs) {
                        std::cmp::Ordering::Less => r,
                        std::cmp::Ordering::Greater => best,
                        std::cmp::Ordering::Equal if tableau.basis()[r] < tableau.basis()[best] => r,
                        std::cmp::Ordering::Equal => best,
                    }
                });
            let Some(row) = leaving else {
                return Err(Error::Unbounded);
            };
            tableau.pivot(field, row, col)?;
        }
    }

    /// c_B · B⁻¹ a_j
    fn priced(tableau: &Tableau<S>, costs: &[S], j: usize) -> S {
        (0..tableau.rows()).fold(S::zero(), |acc, r| {
            acc + costs[tableau.basis()[r]].clone() * tableau.cell(r, j).clone()
        })
    }

    fn objective(tableau: &Tableau<S>, costs: &[S]) -> S {
        (0..tableau.rows()).fold(S::zero(), |acc, r| {
            acc + costs[tableau.basis()[r]].clone() * tableau.rhs(r).clone()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::*;

    fn exact() -> Field<Exact> {
        Field::new(Precision::Exact).unwrap()
    }
    fn m(rows: &[&[i64]]) -> Matrix<Exact> {
        Matrix::from_rows(rows.iter().map(|r| r.iter().map(|&x| integer(x)).collect()).collect())
            .unwrap()
    }
    fn v(xs: &[i64]) -> Vec<Exact> {
        xs.iter().map(|&x| integer(x)).collect()
    }

    #[test]
    fn textbook_maximum_and_duals() {
        // max 3x + 5y st x ≤ 4, 2y ≤ 12, 3x + 2y ≤ 18
        let lp = LinearProgram::new(v(&[3, 5]), m(&[&[1, 0], &[0, 2], &[3, 2]]), v(&[4, 12, 18])).unwrap();
        let opt = lp.maximize(&exact(), &Meter::unbounded()).unwrap();
        assert_eq!(opt.primal, v(&[2, 6]));
        assert_eq!(opt.value, integer(36));
        assert_eq!(opt.dual, vec![integer(0), rational(3, 2), integer(1)]);
    }

    #[test]
    fn negative_bounds_go_through_phase_one() {
        // max -x - y st -x - y ≤ -2, x ≤ 3  →  x + y = 2
        let lp = LinearProgram::new(v(&[-1, -1]), m(&[&[-1, -1], &[1, 0]]), v(&[-2, 3])).unwrap();
        let opt = lp.maximize(&exact(), &Meter::unbounded()).unwrap();
        assert_eq!(opt.value, integer(-2));
        assert_eq!(opt.primal.iter().cloned().fold(integer(0), |a, b| a + b), integer(2));
        assert_eq!(opt.dual[0], integer(1));
    }

    #[test]
    fn unbounded_and_infeasible_are_typed() {
        let lp = LinearProgram::new(v(&[1, 0]), m(&[&[-1, 1]]), v(&[1])).unwrap();
        assert_eq!(lp.maximize(&exact(), &Meter::unbounded()), Err(Error::Unbounded));
        let lp = LinearProgram::new(v(&[1]), m(&[&[1], &[-1]]), v(&[1, -2])).unwrap();
        assert_eq!(lp.maximize(&exact(), &Meter::unbounded()), Err(Error::Infeasible));
    }

    #[test]
    fn budget_interrupts_pivoting() {
        let lp = LinearProgram::new(v(&[3, 5]), m(&[&[1, 0], &[0, 2], &[3, 2]]), v(&[4, 12, 18])).unwrap();
        let meter = Meter::new(&Budget {
            steps: Some(1),
            time: None,
        });
        assert!(matches!(lp.maximize(&exact(), &meter), Err(Error::Timeout { .. })));
    }
}
