//! Relation Graph - the vector-labelled graph that answers relative-position queries.
//!
//! The graph consists of:
//! - **Nodes**: tokens, interned to dense indices
//! - **Edges**: directed, labelled with the lattice displacement from source to target
//!
//! Every inserted relation adds an edge and its mirror, so the graph is
//! effectively undirected. Because every edge is derived from one consistent
//! coordinate assignment, any two paths between the same pair of tokens sum
//! to the same vector.

mod intern;

pub use intern::*;

use lattice_rules::{Direction, Premise, PuzzleState, Token, Vector};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// A directed edge: stepping to `target` moves by `vector`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub target: usize,
    pub vector: Vector,
}

/// The per-round relation graph.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RelationGraph {
    interner: TokenInterner,

    /// Outgoing edges by node index.
    adjacency: Vec<Vec<Edge>>,
}

impl RelationGraph {
    /// Create a new empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph holding only the given premises.
    pub fn from_premises<'a>(premises: impl IntoIterator<Item = &'a Premise>) -> Self {
        let mut graph = Self::new();
        for premise in premises {
            graph.add_premise(premise);
        }
        graph
    }

    /// Build the densified graph of a round.
    ///
    /// Every ordered pair of distinct live tokens whose coordinate difference
    /// is one of the eight table vectors becomes a relation; pairs further
    /// apart are only reachable through paths.
    pub fn build_dense(state: &PuzzleState) -> Self {
        let mut graph = Self::new();
        for (item_a, item_b) in state.ordered_pairs() {
            let Some(offset) = state.displacement(item_b, item_a) else {
                continue;
            };
            if let Some(direction) = Direction::from_vector(offset) {
                graph.add_relation(item_a, direction, item_b);
            }
        }
        tracing::debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "built dense relation graph"
        );
        graph
    }

    /// Record that `item_a` lies in `direction` from `item_b`.
    ///
    /// Inserts `item_b -> item_a` with the direction vector and the mirror
    /// edge with its negation. Repeated inserts add parallel edges and leave
    /// query results unchanged.
    pub fn add_relation(&mut self, item_a: &Token, direction: Direction, item_b: &Token) {
        let a = self.node(item_a);
        let b = self.node(item_b);
        let vector = direction.vector();

        self.adjacency[b].push(Edge { target: a, vector });
        self.adjacency[a].push(Edge {
            target: b,
            vector: -vector,
        });
    }

    pub fn add_premise(&mut self, premise: &Premise) {
        self.add_relation(&premise.item_a, premise.direction, &premise.item_b);
    }

    /// Displacement of `end` relative to `start`, found by breadth-first search.
    ///
    /// Returns `None` when either token is absent or no path joins them.
    pub fn relative_vector(&self, start: &Token, end: &Token) -> Option<Vector> {
        let start_id = self.interner.get(start)?;
        let end_id = self.interner.get(end)?;

        let mut visited = vec![false; self.adjacency.len()];
        let mut queue = VecDeque::new();
        visited[start_id] = true;
        queue.push_back((start_id, Vector::ZERO));

        while let Some((node, offset)) = queue.pop_front() {
            if node == end_id {
                return Some(offset);
            }
            for edge in &self.adjacency[node] {
                if !visited[edge.target] {
                    visited[edge.target] = true;
                    queue.push_back((edge.target, offset + edge.vector));
                }
            }
        }

        tracing::trace!(%start, %end, "no relation path");
        None
    }

    /// Direction in which `item_a` lies from `item_b`, if the two are
    /// connected and exactly one step apart.
    pub fn direction_between(&self, item_a: &Token, item_b: &Token) -> Option<Direction> {
        self.relative_vector(item_b, item_a)
            .and_then(Direction::from_vector)
    }

    /// Whether some path joins the two tokens.
    pub fn is_connected(&self, a: &Token, b: &Token) -> bool {
        self.relative_vector(a, b).is_some()
    }

    /// Direct neighbours of a token with the step to each.
    pub fn neighbors(&self, token: &Token) -> Vec<(&Token, Vector)> {
        let Some(id) = self.interner.get(token) else {
            return Vec::new();
        };
        self.adjacency[id]
            .iter()
            .filter_map(|edge| self.interner.resolve(edge.target).map(|t| (t, edge.vector)))
            .collect()
    }

    pub fn contains(&self, token: &Token) -> bool {
        self.interner.get(token).is_some()
    }

    /// Number of tokens with at least one relation.
    pub fn node_count(&self) -> usize {
        self.interner.len()
    }

    /// Number of directed edges, mirrors included.
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }

    pub fn tokens(&self) -> &[Token] {
        self.interner.tokens()
    }

    fn node(&mut self, token: &Token) -> usize {
        let id = self.interner.intern(token);
        if id == self.adjacency.len() {
            self.adjacency.push(Vec::new());
        }
        id
    }
}
