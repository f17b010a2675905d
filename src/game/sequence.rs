use crate::*;
use num_rational::BigRational;
use num_traits::One;
use num_traits::Zero;
use petgraph::graph::NodeIndex;
use std::collections::BTreeMap;
use std::ops::Range;

/// One sequence of a player: the empty sequence, or the last own move
/// `(infoset, action)` on the path that reaches it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sequence {
    Empty,
    Move { infoset: usize, action: Action },
}

/// Sequence-form view of a perfect-recall game.
///
/// Per player, sequence 0 is the empty sequence and the sequences of one
/// information set are contiguous, allocated when the set is first met in
/// pre-order. Payoffs are sparse: each reachable tuple of sequences maps
/// to the chance-weighted sum of its leaves' payoff vectors.
#[derive(Debug, Clone)]
pub struct SequenceForm {
    players: usize,
    sequences: Vec<Vec<Sequence>>,
    parents: Vec<Vec<usize>>,
    starts: Vec<Vec<usize>>,
    widths: Vec<Vec<usize>>,
    payoffs: BTreeMap<Vec<usize>, Vec<BigRational>>,
    reach: BTreeMap<Vec<usize>, BigRational>,
    ceilings: Vec<BigRational>,
    constant: Option<BigRational>,
}

pub fn to_sequence_form(game: &ExtensiveForm) -> SequenceForm {
    let players = game.players();
    let mut sequences = vec![vec![Sequence::Empty]; players];
    let mut parents = vec![Vec::new(); players];
    let mut starts = vec![Vec::new(); players];
    let mut widths = vec![Vec::new(); players];
    let mut payoffs = BTreeMap::<Vec<usize>, Vec<BigRational>>::new();
    let mut chance = BTreeMap::<Vec<usize>, BigRational>::new();
    let mut ceilings = Vec::<Option<BigRational>>::new();
    let mut sums = Vec::new();

    // node order is pre-order, so parents are settled before their children
    let mut current = vec![vec![0; players]; game.nodes()];
    let mut reach = vec![BigRational::one(); game.nodes()];
    for n in 0..game.nodes() {
        let node = NodeIndex::new(n);
        if let Some((parent, branch)) = game.parent(node) {
            current[n] = current[parent.index()].clone();
            reach[n] = reach[parent.index()].clone();
            match game.vertex(parent) {
                Vertex::Chance => {
                    reach[n] *= branch.probability.clone().unwrap_or_else(BigRational::zero);
                }
                Vertex::Decision { player, infoset } => {
                    current[n][*player] = starts[*player][*infoset] + branch.action;
                }
                Vertex::Terminal { .. } => {}
            }
        }
        match game.vertex(node) {
            Vertex::Decision { player, infoset } if *infoset == starts[*player].len() => {
                let p = *player;
                let width = game.infoset(p, *infoset).actions.len();
                parents[p].push(current[n][p]);
                starts[p].push(sequences[p].len());
                widths[p].push(width);
                sequences[p].extend((0..width).map(|action| Sequence::Move {
                    infoset: *infoset,
                    action,
                }));
            }
            Vertex::Terminal { payoffs: leaf } => {
                sums.push(leaf.iter().fold(BigRational::zero(), |acc, x| acc + x));
                ceilings.resize(players, None);
                for (ceiling, x) in ceilings.iter_mut().zip(leaf) {
                    if ceiling.as_ref().is_none_or(|c| x > c) {
                        *ceiling = Some(x.clone());
                    }
                }
                *chance.entry(current[n].clone()).or_insert_with(BigRational::zero) += reach[n].clone();
                let entry = payoffs
                    .entry(current[n].clone())
                    .or_insert_with(|| vec![BigRational::zero(); players]);
                for (total, x) in entry.iter_mut().zip(leaf) {
                    *total += reach[n].clone() * x;
                }
            }
            _ => {}
        }
    }
    let constant = match sums.split_first() {
        Some((first, rest)) if rest.iter().all(|s| s == first) => Some(first.clone()),
        _ => None,
    };
    log::debug!(
        "sequence form with {:?} sequences and {} payoff entries",
        sequences.iter().map(Vec::len).collect::<Vec<_>>(),
        payoffs.len()
    );
    SequenceForm {
        players,
        sequences,
        parents,
        starts,
        widths,
        payoffs,
        reach: chance,
        ceilings: ceilings
            .into_iter()
            .map(|c| c.unwrap_or_else(BigRational::zero))
            .collect(),
        constant,
    }
}

impl SequenceForm {
    pub fn players(&self) -> usize {
        self.players
    }
    pub fn sequences(&self, player: Player) -> usize {
        self.sequences[player].len()
    }
    pub fn sequence(&self, player: Player, s: usize) -> Sequence {
        self.sequences[player][s]
    }
    pub fn infosets(&self, player: Player) -> usize {
        self.starts[player].len()
    }
    /// the sequence that leads into `infoset`
    pub fn parent(&self, player: Player, infoset: usize) -> usize {
        self.parents[player][infoset]
    }
    /// the sequences that extend `parent` at `infoset`
    pub fn range(&self, player: Player, infoset: usize) -> Range<usize> {
        let start = self.starts[player][infoset];
        start..start + self.widths[player][infoset]
    }
    pub fn payoffs(&self) -> &BTreeMap<Vec<usize>, Vec<BigRational>> {
        &self.payoffs
    }
    /// chance probability of reaching each payoff entry
    pub fn reach(&self) -> &BTreeMap<Vec<usize>, BigRational> {
        &self.reach
    }
    /// largest leaf payoff of `player`
    pub fn ceiling(&self, player: Player) -> &BigRational {
        &self.ceilings[player]
    }
    pub fn constant_sum(&self) -> Option<BigRational> {
        self.constant.clone()
    }

    /// Flow constraints `E x = e`: row 0 fixes the empty sequence at one,
    /// row `h + 1` balances infoset `h` against its parent sequence.
    pub fn constraints<S: Scalar>(&self, player: Player) -> Matrix<S> {
        let mut e = Matrix::zeros(self.infosets(player) + 1, self.sequences(player));
        e[(0, 0)] = S::one();
        for h in 0..self.infosets(player) {
            e[(h + 1, self.parent(player, h))] = -S::one();
            for s in self.range(player, h) {
                e[(h + 1, s)] = S::one();
            }
        }
        e
    }
    pub fn bounds<S: Scalar>(&self, player: Player) -> Vec<S> {
        let mut e = vec![S::zero(); self.infosets(player) + 1];
        e[0] = S::one();
        e
    }

    /// Sequence payoff matrices `(A, B)` of a two-player game.
    pub fn matrices<S: Scalar>(&self) -> Result<(Matrix<S>, Matrix<S>)> {
        self.shifted_matrices(&[BigRational::zero(), BigRational::zero()])
    }

    /// Payoff matrices after adding `offsets[p]` to every leaf payoff of
    /// player `p`; each entry moves by the offset times its chance reach.
    pub fn shifted_matrices<S: Scalar>(&self, offsets: &[BigRational; 2]) -> Result<(Matrix<S>, Matrix<S>)> {
        if self.players != 2 {
            return Err(Error::Unsupported(format!(
                "sequence-form matrices of a {}-player game",
                self.players
            )));
        }
        let mut a = Matrix::zeros(self.sequences(0), self.sequences(1));
        let mut b = Matrix::zeros(self.sequences(0), self.sequences(1));
        for (key, payoff) in self.payoffs.iter() {
            let ref reach = self.reach[key];
            a[(key[0], key[1])] = S::from_rational(&(payoff[0].clone() + offsets[0].clone() * reach));
            b[(key[0], key[1])] = S::from_rational(&(payoff[1].clone() + offsets[1].clone() * reach));
        }
        Ok((a, b))
    }

    /// Realization plan induced by a behavior strategy
    /// (`behavior[h][a]` is the probability of action `a` at infoset `h`).
    pub fn realization_plan<S: Scalar>(&self, player: Player, behavior: &[Vec<S>]) -> Vec<S> {
        let mut plan = vec![S::zero(); self.sequences(player)];
        plan[0] = S::one();
        for h in 0..self.infosets(player) {
            let ref weight = plan[self.parent(player, h)].clone();
            for (s, p) in self.range(player, h).zip(behavior[h].iter()) {
                plan[s] = weight.clone() * p.clone();
            }
        }
        plan
    }

    /// Behavior strategy recovered from a realization plan. Infosets whose
    /// parent sequence has zero weight are unreached and get the uniform
    /// distribution.
    pub fn behavior<S: Scalar>(&self, field: &Field<S>, player: Player, plan: &[S]) -> Result<Vec<Vec<S>>> {
        (0..self.infosets(player))
            .map(|h| {
                let ref weight = plan[self.parent(player, h)];
                let range = self.range(player, h);
                match field.is_zero(weight) {
                    true => {
                        let ref uniform = S::one() / S::from_usize(range.len());
                        Ok(range.map(|_| uniform.clone()).collect())
                    }
                    false => range.map(|s| field.divide(&plan[s], weight)).collect(),
                }
            })
            .collect()
    }

    /// Expected payoff vector when every player follows their plan.
    pub fn expected_payoffs<S: Scalar>(&self, plans: &[Vec<S>]) -> Vec<S> {
        let mut totals = vec![S::zero(); self.players];
        for (key, payoff) in self.payoffs.iter() {
            let ref weight = Self::weight(plans, key, None);
            for (total, x) in totals.iter_mut().zip(payoff) {
                *total = total.clone() + weight.clone() * S::from_rational(x);
            }
        }
        totals
    }

    /// Value of `player`'s best response to the others' plans, by backward
    /// induction over the player's infosets.
    pub fn best_response_value<S: Scalar>(&self, field: &Field<S>, player: Player, plans: &[Vec<S>]) -> S {
        let mut values = vec![S::zero(); self.sequences(player)];
        for (key, payoff) in self.payoffs.iter() {
            let s = key[player];
            values[s] = values[s].clone() + Self::weight(plans, key, Some(player)) * S::from_rational(&payoff[player]);
        }
        for h in (0..self.infosets(player)).rev() {
            let best = self
                .range(player, h)
                .map(|s| values[s].clone())
                .reduce(|a, b| match field.compare(&b, &a) {
                    std::cmp::Ordering::Greater => b,
                    _ => a,
                })
                .unwrap_or_else(S::zero);
            let parent = self.parent(player, h);
            values[parent] = values[parent].clone() + best;
        }
        values[0].clone()
    }

    fn weight<S: Scalar>(plans: &[Vec<S>], key: &[usize], skip: Option<Player>) -> S {
        key.iter()
            .enumerate()
            .filter(|&(p, _)| Some(p) != skip)
            .fold(S::one(), |acc, (p, &s)| acc * plans[p][s].clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(a: i64) -> Owner {
        Owner::Terminal {
            payoffs: vec![integer(a), integer(-a)],
        }
    }

    /// player 0 picks l/r; after r, chance flips and player 0 picks again
    /// without seeing the flip; player 1 guesses blind throughout
    fn game() -> ExtensiveForm {
        let mut tree = TreeSpec::new(2);
        let root = tree.root(Owner::Player { player: 0, infoset: 0 });
        let l = tree.child(root, "l", Owner::Player { player: 1, infoset: 0 });
        tree.child(l, "u", leaf(2));
        tree.child(l, "d", leaf(0));
        let r = tree.child(root, "r", Owner::Chance);
        for (coin, scale) in [("h", 1), ("t", -1)] {
            let again = tree.chance(r, coin, rational(1, 2), Owner::Player { player: 0, infoset: 1 });
            for (act, base) in [("a", 4), ("b", 0)] {
                let guess = tree.child(again, act, Owner::Player { player: 1, infoset: 1 });
                tree.child(guess, "u", leaf(scale * base));
                tree.child(guess, "d", leaf(scale * base - 1));
            }
        }
        build_extensive_form(tree).unwrap()
    }

    #[test]
    fn sequences_in_preorder_with_flow_constraints() {
        let sf = to_sequence_form(&game());
        assert_eq!(sf.sequences(0), 5);
        assert_eq!(sf.sequences(1), 5);
        assert_eq!(sf.parent(0, 1), 2);
        assert_eq!(sf.range(0, 1), 3..5);
        assert_eq!(sf.sequence(0, 4), Sequence::Move { infoset: 1, action: 1 });
        let e = sf.constraints::<Exact>(0);
        assert_eq!(e.row(0), &[integer(1), integer(0), integer(0), integer(0), integer(0)]);
        assert_eq!(e.row(1), &[integer(-1), integer(1), integer(1), integer(0), integer(0)]);
        assert_eq!(e.row(2), &[integer(0), integer(0), integer(-1), integer(1), integer(1)]);
        assert_eq!(sf.bounds::<Exact>(1), vec![integer(1), integer(0), integer(0)]);
        assert_eq!(sf.constant_sum(), Some(integer(0)));
    }

    #[test]
    fn chance_weights_fold_into_payoffs() {
        let sf = to_sequence_form(&game());
        // heads and tails cancel on (r,a) against (u): 1/2 * 4 - 1/2 * 4
        assert_eq!(sf.payoffs().get(&vec![3, 3]), Some(&vec![integer(0), integer(0)]));
        assert_eq!(sf.payoffs().get(&vec![3, 4]), Some(&vec![integer(-1), integer(1)]));
        assert_eq!(sf.payoffs().get(&vec![1, 1]), Some(&vec![integer(2), integer(-2)]));
        assert_eq!(sf.reach().get(&vec![3, 4]), Some(&integer(1)));
        assert_eq!(sf.ceiling(0), &integer(4));
        let (a, _) = sf.matrices::<Exact>().unwrap();
        assert_eq!(a[(1, 1)], integer(2));
        assert_eq!(a[(2, 3)], integer(0));
        let (a, b) = sf.shifted_matrices::<Exact>(&[integer(-5), integer(-6)]).unwrap();
        assert_eq!(a[(3, 4)], integer(-6));
        assert_eq!(b[(1, 1)], integer(-8));
        assert_eq!(b[(2, 3)], integer(0));
    }

    #[test]
    fn behavior_round_trips_through_realization() {
        let sf = to_sequence_form(&game());
        let field = Field::<Exact>::new(Precision::Exact).unwrap();
        let behavior = vec![
            vec![rational(1, 3), rational(2, 3)],
            vec![rational(1, 4), rational(3, 4)],
        ];
        let plan = sf.realization_plan(0, &behavior);
        assert_eq!(plan[3], rational(1, 6));
        assert_eq!(sf.behavior(&field, 0, &plan).unwrap(), behavior);
    }

    #[test]
    fn unreached_infosets_become_uniform() {
        let sf = to_sequence_form(&game());
        let field = Field::<Exact>::new(Precision::Exact).unwrap();
        let plan = sf.realization_plan(0, &[vec![integer(1), integer(0)], vec![integer(1), integer(0)]]);
        let behavior = sf.behavior(&field, 0, &plan).unwrap();
        assert_eq!(behavior[1], vec![rational(1, 2), rational(1, 2)]);
    }

    #[test]
    fn best_response_beats_any_fixed_plan() {
        let sf = to_sequence_form(&game());
        let field = Field::<Exact>::new(Precision::Exact).unwrap();
        let x = sf.realization_plan(0, &[vec![rational(1, 2), rational(1, 2)], vec![integer(1), integer(0)]]);
        let y = sf.realization_plan(1, &[vec![integer(1), integer(0)], vec![integer(0), integer(1)]]);
        let plans = vec![x, y];
        let payoffs = sf.expected_payoffs(&plans);
        assert_eq!(payoffs[0], rational(1, 2));
        assert_eq!(payoffs[0].clone() + payoffs[1].clone(), integer(0));
        assert_eq!(sf.best_response_value(&field, 0, &plans), integer(2));
        assert_eq!(sf.best_response_value(&field, 1, &plans), rational(1, 2));
    }
}
