//! The private search tree.
//!
//! Nodes live in one arena and refer to each other by [`NodeId`]. A parent
//! owns its children through the arena; the `parent` index is only followed
//! upward during backpropagation.

use super::heuristic::Heuristic;
use super::policy::SelectionPolicy;
use super::stats::NodeStats;
use crate::game::{GameState, PlayerId};
use std::fmt::{self, Write};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

#[derive(Clone, Debug)]
pub struct Node<M> {
    /// Move that produced this node, `None` for the root.
    pub mv: Option<M>,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub untried: Vec<M>,
    pub player_just_moved: PlayerId,
    pub stats: NodeStats,
}

impl<M: Clone> Node<M> {
    fn new<G>(mv: Option<M>, parent: Option<NodeId>, state: &G) -> Self
    where
        G: GameState<Move = M>,
    {
        Node {
            mv,
            parent,
            children: Vec::new(),
            untried: state.moves(),
            player_just_moved: state.player_just_moved(),
            stats: NodeStats::default(),
        }
    }

    pub fn is_fully_expanded(&self) -> bool {
        self.untried.is_empty()
    }

    pub fn is_terminal(&self) -> bool {
        self.untried.is_empty() && self.children.is_empty()
    }
}

impl<M: fmt::Debug> fmt::Display for Node<M> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.mv {
            Some(ref mv) => write!(f, "[M:{:?}", mv)?,
            None => write!(f, "[M:None")?,
        }
        write!(f, " W/V:{} U:{:?}]", self.stats, self.untried)
    }
}

#[derive(Clone, Debug)]
pub struct Tree<M> {
    nodes: Vec<Node<M>>,
}

impl<M: Clone + PartialEq + fmt::Debug> Tree<M> {
    pub fn new<G>(root_state: &G) -> Self
    where
        G: GameState<Move = M>,
    {
        Tree {
            nodes: vec![Node::new(None, None, root_state)],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn get(&self, id: NodeId) -> &Node<M> {
        &self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Node<M>> {
        self.nodes.iter()
    }

    pub fn children(&self, id: NodeId) -> impl Iterator<Item = &Node<M>> {
        self.get(id).children.iter().map(move |&c| self.get(c))
    }

    /// The child of `id` with the highest blended score. Ties go to the child
    /// expanded last.
    ///
    /// # Panics
    /// If `id` has no children.
    pub fn select<H>(&self, id: NodeId, policy: &SelectionPolicy<H>) -> NodeId
    where
        H: Heuristic + ?Sized,
    {
        let node = self.get(id);
        let parent_visits = node.stats.visits;
        node.children
            .iter()
            .map(|&c| (c, policy.score(parent_visits, &self.get(c).stats)))
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(c, _)| c)
            .unwrap_or_else(|| panic!("select called on a node without children"))
    }

    /// Adds the child reached by playing `mv` from `id`, given the resulting
    /// `state`.
    ///
    /// # Panics
    /// If `mv` is not among the untried moves of `id`.
    pub fn expand<G>(&mut self, id: NodeId, mv: M, state: &G) -> NodeId
    where
        G: GameState<Move = M>,
    {
        let pos = match self.nodes[id.0].untried.iter().position(|m| *m == mv) {
            Some(pos) => pos,
            None => panic!("expand called with {:?}, which is not an untried move", mv),
        };
        self.nodes[id.0].untried.remove(pos);
        let child = NodeId(self.nodes.len());
        self.nodes.push(Node::new(Some(mv), Some(id), state));
        self.nodes[id.0].children.push(child);
        child
    }

    pub fn update(&mut self, id: NodeId, result: f64) {
        self.nodes[id.0].stats.update(result);
    }

    /// Walks from `leaf` up to the root, crediting each node with the
    /// terminal result seen by the player who moved into it.
    pub fn backpropagate<G>(&mut self, leaf: NodeId, terminal: &G)
    where
        G: GameState<Move = M>,
    {
        let mut current = Some(leaf);
        while let Some(id) = current {
            let result = terminal.result(self.get(id).player_just_moved);
            self.update(id, result);
            current = self.get(id).parent;
        }
    }

    /// The root child with the most visits, ties going to the child expanded
    /// last.
    pub fn most_visited_child(&self) -> Option<&Node<M>> {
        self.children(self.root()).max_by_key(|c| c.stats.visits)
    }

    pub fn tree_to_string(&self) -> String {
        let mut s = String::new();
        self.write_subtree(&mut s, self.root(), 0);
        s
    }

    fn write_subtree(&self, s: &mut String, id: NodeId, indent: usize) {
        s.push('\n');
        for _ in 0..indent {
            s.push_str("| ");
        }
        let _ = write!(s, "{}", self.get(id));
        for &c in &self.get(id).children {
            self.write_subtree(s, c, indent + 1);
        }
    }

    pub fn children_to_string(&self) -> String {
        let mut s = String::new();
        for child in self.children(self.root()) {
            let _ = writeln!(s, "{}", child);
        }
        s
    }
}
