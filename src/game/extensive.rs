use crate::*;
use num_rational::BigRational;
use num_traits::One;
use num_traits::Signed;
use num_traits::Zero;
use petgraph::graph::DiGraph;
use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;
use std::collections::BTreeMap;

/// Who moves at a node of an input tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Owner {
    Chance,
    /// `infoset` is a caller-chosen label, unique per player.
    Player {
        player: Player,
        infoset: usize,
    },
    Terminal {
        payoffs: Vec<BigRational>,
    },
}

/// One node of an input tree. `action` and `probability` describe the
/// edge from `parent`; `probability` is required exactly when the parent
/// is a chance node.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeSpec {
    pub parent: Option<usize>,
    pub action: String,
    pub probability: Option<BigRational>,
    pub owner: Owner,
}

/// Flat node list with parent links, as handed over by a loader.
/// Children keep the order in which they appear in `nodes`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TreeSpec {
    pub players: usize,
    pub nodes: Vec<NodeSpec>,
}

impl TreeSpec {
    pub fn new(players: usize) -> Self {
        Self {
            players,
            nodes: Vec::new(),
        }
    }
    pub fn root(&mut self, owner: Owner) -> usize {
        self.push(None, "", None, owner)
    }
    pub fn child(&mut self, parent: usize, action: &str, owner: Owner) -> usize {
        self.push(Some(parent), action, None, owner)
    }
    pub fn chance(&mut self, parent: usize, action: &str, probability: BigRational, owner: Owner) -> usize {
        self.push(Some(parent), action, Some(probability), owner)
    }
    fn push(&mut self, parent: Option<usize>, action: &str, probability: Option<BigRational>, owner: Owner) -> usize {
        self.nodes.push(NodeSpec {
            parent,
            action: action.to_string(),
            probability,
            owner,
        });
        self.nodes.len() - 1
    }
}

/// Node weight of the validated arena.
#[derive(Debug, Clone, PartialEq)]
pub enum Vertex {
    Chance,
    Decision { player: Player, infoset: usize },
    Terminal { payoffs: Vec<BigRational> },
}

/// Edge weight of the validated arena.
#[derive(Debug, Clone, PartialEq)]
pub struct Branch {
    pub action: Action,
    pub label: String,
    pub probability: Option<BigRational>,
}

/// Information set after renumbering: members and actions in pre-order.
#[derive(Debug, Clone, PartialEq)]
pub struct Infoset {
    pub player: Player,
    pub actions: Vec<String>,
    pub members: Vec<NodeIndex>,
}

/// Validated game tree with perfect recall.
///
/// Nodes are stored in depth-first pre-order, so node index order is tree
/// order and the root is index zero. Information sets are numbered per
/// player by the pre-order position of their first member.
#[derive(Debug, Clone)]
pub struct ExtensiveForm {
    players: usize,
    graph: DiGraph<Vertex, Branch>,
    infosets: Vec<Vec<Infoset>>,
}

pub fn build_extensive_form(tree: TreeSpec) -> Result<ExtensiveForm> {
    let TreeSpec { players, nodes } = tree;
    if players == 0 {
        return Err(Error::MalformedGame("a game needs at least one player".to_string()));
    }
    let order = preorder(&nodes)?;
    let mut children = vec![Vec::new(); nodes.len()];
    for (i, node) in nodes.iter().enumerate() {
        if let Some(p) = node.parent {
            children[p].push(i);
        }
    }
    for &i in order.iter() {
        validate(i, players, &nodes, &children[i])?;
    }

    let mut position = vec![0; nodes.len()];
    for (k, &i) in order.iter().enumerate() {
        position[i] = k;
    }
    let mut labels = vec![BTreeMap::<usize, usize>::new(); players];
    let mut infosets = vec![Vec::<Infoset>::new(); players];
    let mut graph = DiGraph::with_capacity(nodes.len(), nodes.len().saturating_sub(1));
    for &i in order.iter() {
        let actions = children[i]
            .iter()
            .map(|&c| nodes[c].action.clone())
            .collect::<Vec<String>>();
        let vertex = match &nodes[i].owner {
            Owner::Chance => Vertex::Chance,
            Owner::Terminal { payoffs } => Vertex::Terminal {
                payoffs: payoffs.clone(),
            },
            Owner::Player { player, infoset } => {
                let next = infosets[*player].len();
                let h = *labels[*player].entry(*infoset).or_insert(next);
                if h == next {
                    infosets[*player].push(Infoset {
                        player: *player,
                        actions: actions.clone(),
                        members: Vec::new(),
                    });
                }
                if infosets[*player][h].actions != actions {
                    return Err(Error::MalformedGame(format!(
                        "information set {} of player {} offers different actions at node {}",
                        h, player, i
                    )));
                }
                infosets[*player][h].members.push(NodeIndex::new(graph.node_count()));
                Vertex::Decision {
                    player: *player,
                    infoset: h,
                }
            }
        };
        let index = graph.add_node(vertex);
        if let Some(p) = nodes[i].parent {
            let action = children[p].iter().position(|&c| c == i).unwrap_or(0);
            let branch = Branch {
                action,
                label: nodes[i].action.clone(),
                probability: nodes[i].probability.clone(),
            };
            graph.add_edge(NodeIndex::new(position[p]), index, branch);
        }
    }
    let game = ExtensiveForm {
        players,
        graph,
        infosets,
    };
    game.check_recall()?;
    log::debug!(
        "built extensive form with {} nodes and {:?} information sets",
        game.nodes(),
        (0..players).map(|p| game.infosets(p).len()).collect::<Vec<_>>()
    );
    Ok(game)
}

/// depth-first pre-order of the input list, rejecting forests and cycles
fn preorder(nodes: &[NodeSpec]) -> Result<Vec<usize>> {
    let roots = nodes
        .iter()
        .enumerate()
        .filter(|(_, n)| n.parent.is_none())
        .map(|(i, _)| i)
        .collect::<Vec<usize>>();
    let [root] = roots[..] else {
        return Err(Error::MalformedGame(format!("expected one root, found {}", roots.len())));
    };
    let mut children = vec![Vec::new(); nodes.len()];
    for (i, node) in nodes.iter().enumerate() {
        match node.parent {
            Some(p) if p >= nodes.len() || p == i => {
                return Err(Error::MalformedGame(format!("node {} has invalid parent {}", i, p)));
            }
            Some(p) => children[p].push(i),
            None => {}
        }
    }
    let mut order = Vec::with_capacity(nodes.len());
    let mut stack = vec![root];
    while let Some(i) = stack.pop() {
        order.push(i);
        stack.extend(children[i].iter().rev());
    }
    match order.len() == nodes.len() {
        true => Ok(order),
        false => Err(Error::MalformedGame(format!(
            "{} nodes are not reachable from the root",
            nodes.len() - order.len()
        ))),
    }
}

fn validate(i: usize, players: usize, nodes: &[NodeSpec], children: &[usize]) -> Result<()> {
    match &nodes[i].owner {
        Owner::Terminal { payoffs } => {
            if !children.is_empty() {
                return Err(Error::MalformedGame(format!("terminal node {} has children", i)));
            }
            if payoffs.len() != players {
                return Err(Error::MalformedGame(format!(
                    "terminal node {} has {} payoffs for {} players",
                    i,
                    payoffs.len(),
                    players
                )));
            }
        }
        Owner::Player { player, .. } if *player >= players => {
            return Err(Error::MalformedGame(format!("node {} owned by unknown player {}", i, player)));
        }
        _ if children.is_empty() => {
            return Err(Error::MalformedGame(format!("non-terminal node {} has no actions", i)));
        }
        Owner::Chance => {
            let mut total = BigRational::zero();
            for &c in children {
                let Some(p) = nodes[c].probability.as_ref() else {
                    return Err(Error::InvalidDistribution {
                        node: i,
                        reason: format!("branch to node {} has no probability", c),
                    });
                };
                if p.is_negative() {
                    return Err(Error::InvalidDistribution {
                        node: i,
                        reason: format!("branch to node {} has probability {}", c, p),
                    });
                }
                total += p;
            }
            if !total.is_one() {
                return Err(Error::InvalidDistribution {
                    node: i,
                    reason: format!("probabilities sum to {}", total),
                });
            }
        }
        Owner::Player { .. } => {
            if let Some(&c) = children.iter().find(|&&c| nodes[c].probability.is_some()) {
                return Err(Error::MalformedGame(format!(
                    "decision node {} gives a probability to node {}",
                    i, c
                )));
            }
            let mut labels = children.iter().map(|&c| &nodes[c].action).collect::<Vec<_>>();
            labels.sort();
            if labels.windows(2).any(|w| w[0] == w[1]) {
                return Err(Error::MalformedGame(format!("decision node {} repeats an action label", i)));
            }
        }
    }
    Ok(())
}

impl ExtensiveForm {
    pub fn players(&self) -> usize {
        self.players
    }
    pub fn nodes(&self) -> usize {
        self.graph.node_count()
    }
    pub fn root(&self) -> NodeIndex {
        NodeIndex::new(0)
    }
    pub fn graph(&self) -> &DiGraph<Vertex, Branch> {
        &self.graph
    }
    pub fn vertex(&self, node: NodeIndex) -> &Vertex {
        &self.graph[node]
    }
    pub fn infosets(&self, player: Player) -> &[Infoset] {
        &self.infosets[player]
    }
    pub fn infoset(&self, player: Player, infoset: usize) -> &Infoset {
        &self.infosets[player][infoset]
    }
    /// children with their incoming branches, in action order
    pub fn children(&self, node: NodeIndex) -> Vec<(NodeIndex, &Branch)> {
        let mut children = self
            .graph
            .edges_directed(node, petgraph::Direction::Outgoing)
            .map(|e| (e.target(), e.weight()))
            .collect::<Vec<_>>();
        children.sort_by_key(|(_, b)| b.action);
        children
    }
    pub fn parent(&self, node: NodeIndex) -> Option<(NodeIndex, &Branch)> {
        self.graph
            .edges_directed(node, petgraph::Direction::Incoming)
            .next()
            .map(|e| (e.source(), e.weight()))
    }
    /// `(infoset, action)` moves of `player` on the path from the root to `node`
    pub fn history(&self, node: NodeIndex, player: Player) -> Vec<(usize, Action)> {
        let mut history = Vec::new();
        let mut cursor = node;
        while let Some((parent, branch)) = self.parent(cursor) {
            if let Vertex::Decision { player: p, infoset } = self.vertex(parent) {
                if *p == player {
                    history.push((*infoset, branch.action));
                }
            }
            cursor = parent;
        }
        history.reverse();
        history
    }

    fn check_recall(&self) -> Result<()> {
        for (player, sets) in self.infosets.iter().enumerate() {
            for (h, set) in sets.iter().enumerate() {
                let first = self.history(set.members[0], player);
                if set.members[1..].iter().any(|&n| self.history(n, player) != first) {
                    return Err(Error::ImperfectRecall { player, infoset: h });
                }
            }
        }
        Ok(())
    }
}
