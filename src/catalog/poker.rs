use crate::*;

fn chips(p0: i64) -> Owner {
    Owner::Terminal {
        payoffs: vec![integer(p0), integer(-p0)],
    }
}

fn tree(spec: TreeSpec) -> ExtensiveForm {
    match build_extensive_form(spec) {
        Ok(game) => game,
        Err(e) => unreachable!("catalog tree rejected: {}", e),
    }
}

/// Three-card Kuhn poker with an ante of one chip and a single bet size.
/// The first player's equilibrium value is -1/18.
pub fn kuhn_poker() -> ExtensiveForm {
    const CARDS: [&str; 3] = ["J", "Q", "K"];
    let mut spec = TreeSpec::new(2);
    let deal = spec.root(Owner::Chance);
    for (a, first) in CARDS.iter().enumerate() {
        for (b, second) in CARDS.iter().enumerate().filter(|&(b, _)| b != a) {
            let ref label = format!("{}{}", first, second);
            let showdown = if a > b { 1 } else { -1 };
            let open = spec.chance(deal, label, rational(1, 6), Owner::Player { player: 0, infoset: 2 * a });
            let checked = spec.child(open, "check", Owner::Player { player: 1, infoset: 2 * b });
            spec.child(checked, "check", chips(showdown));
            let raised = spec.child(checked, "bet", Owner::Player { player: 0, infoset: 2 * a + 1 });
            spec.child(raised, "fold", chips(-1));
            spec.child(raised, "call", chips(2 * showdown));
            let bet = spec.child(open, "bet", Owner::Player { player: 1, infoset: 2 * b + 1 });
            spec.child(bet, "fold", chips(1));
            spec.child(bet, "call", chips(2 * showdown));
        }
    }
    tree(spec)
}

/// One card to the first player only, high or low with equal odds. The
/// first player bets or checks; the second folds or calls a bet blind.
pub fn one_card_poker() -> ExtensiveForm {
    let mut spec = TreeSpec::new(2);
    let deal = spec.root(Owner::Chance);
    for (card, (infoset, showdown)) in [("low", (0, -1)), ("high", (1, 1))] {
        let me = spec.chance(deal, card, rational(1, 2), Owner::Player { player: 0, infoset });
        spec.child(me, "check", chips(showdown));
        let you = spec.child(me, "bet", Owner::Player { player: 1, infoset: 0 });
        spec.child(you, "fold", chips(1));
        spec.child(you, "call", chips(2 * showdown));
    }
    tree(spec)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kuhn_shape() {
        let game = kuhn_poker();
        assert_eq!(game.nodes(), 1 + 6 * 9);
        assert_eq!(game.infosets(0).len(), 6);
        assert_eq!(game.infosets(1).len(), 6);
        let form = to_sequence_form(&game);
        assert_eq!(form.sequences(0), 13);
        assert_eq!(form.sequences(1), 13);
        assert_eq!(form.constant_sum(), Some(integer(0)));
    }

    #[test]
    fn one_card_poker_value_by_pure_check() {
        // bluffing makes the game strictly mixed
        let game = Game::from(one_card_poker());
        let config = Config::new(Algorithm::PureEnumeration).all();
        assert!(equilibria::<Exact>(&game, &config).unwrap().is_empty());
        let found = equilibria::<Exact>(&game, &Config::new(Algorithm::LpZeroSum)).unwrap();
        let Game::Extensive(tree) = &game else { unreachable!() };
        let realization = &found[0].profile.behavioral().unwrap().realization;
        assert_eq!(to_sequence_form(tree).expected_payoffs(realization)[0], rational(1, 3));
    }
}
