//! Puzzle state - the live token window and where each token sits on the lattice.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

use crate::entities::Token;
use crate::geometry::Vector;

/// Unique identifier for a play session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Absolute lattice position of every live token.
pub type CoordinateMap = HashMap<Token, Vector>;

/// Violations of the puzzle state invariants.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    #[error("token {0} is already live")]
    DuplicateToken(Token),

    #[error("lattice cell {0} is already occupied")]
    Occupied(Vector),

    #[error("token {0} has no coordinate")]
    MissingCoordinate(Token),

    #[error("coordinate map holds {coordinates} entries for {nodes} live tokens")]
    Mismatch { nodes: usize, coordinates: usize },
}

/// Inclusive bounding box of the occupied cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Vector,
    pub max: Vector,
}

impl Bounds {
    pub fn width(&self) -> u32 {
        self.max.dx.abs_diff(self.min.dx) + 1
    }

    pub fn height(&self) -> u32 {
        self.max.dy.abs_diff(self.min.dy) + 1
    }
}

/// The active node window plus its coordinate map.
///
/// Invariants:
/// - `nodes` is ordered oldest first and holds no duplicates
/// - every live token has exactly one coordinate
/// - no two live tokens share a coordinate
///
/// Deserialization goes through [`PuzzleState::from_parts`], so a decoded
/// state upholds the same invariants.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "RawPuzzleState")]
pub struct PuzzleState {
    nodes: Vec<Token>,
    coordinates: CoordinateMap,
}

/// Unchecked wire form of [`PuzzleState`].
#[derive(Deserialize)]
struct RawPuzzleState {
    nodes: Vec<Token>,
    coordinates: CoordinateMap,
}

impl TryFrom<RawPuzzleState> for PuzzleState {
    type Error = StateError;

    fn try_from(raw: RawPuzzleState) -> Result<Self, Self::Error> {
        Self::from_parts(raw.nodes, raw.coordinates)
    }
}

impl PuzzleState {
    /// Create a new empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a state from a window and coordinate map, checking the invariants.
    pub fn from_parts(nodes: Vec<Token>, coordinates: CoordinateMap) -> Result<Self, StateError> {
        let state = Self { nodes, coordinates };
        state.validate()?;
        Ok(state)
    }

    /// Check every invariant of the window.
    pub fn validate(&self) -> Result<(), StateError> {
        let mut seen_tokens = HashSet::new();
        let mut seen_cells = HashSet::new();

        for token in &self.nodes {
            if !seen_tokens.insert(token) {
                return Err(StateError::DuplicateToken(token.clone()));
            }
            let cell = self
                .coordinates
                .get(token)
                .ok_or_else(|| StateError::MissingCoordinate(token.clone()))?;
            if !seen_cells.insert(*cell) {
                return Err(StateError::Occupied(*cell));
            }
        }

        if self.coordinates.len() != self.nodes.len() {
            return Err(StateError::Mismatch {
                nodes: self.nodes.len(),
                coordinates: self.coordinates.len(),
            });
        }

        Ok(())
    }

    /// Append a token at the newest end of the window.
    pub fn place(&mut self, token: Token, position: Vector) -> Result<(), StateError> {
        if self.coordinates.contains_key(&token) {
            return Err(StateError::DuplicateToken(token));
        }
        if self.is_occupied(position) {
            return Err(StateError::Occupied(position));
        }
        self.coordinates.insert(token.clone(), position);
        self.nodes.push(token);
        Ok(())
    }

    /// Remove the oldest token and its coordinate.
    ///
    /// Leaves the state untouched when the oldest token has no coordinate.
    pub fn evict_oldest(&mut self) -> Option<(Token, Vector)> {
        let oldest = self.nodes.first()?;
        let position = self.coordinates.remove(oldest)?;
        Some((self.nodes.remove(0), position))
    }

    /// Live tokens, oldest first.
    pub fn nodes(&self) -> &[Token] {
        &self.nodes
    }

    pub fn coordinates(&self) -> &CoordinateMap {
        &self.coordinates
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, token: &Token) -> bool {
        self.coordinates.contains_key(token)
    }

    pub fn oldest(&self) -> Option<&Token> {
        self.nodes.first()
    }

    pub fn newest(&self) -> Option<&Token> {
        self.nodes.last()
    }

    pub fn coordinate(&self, token: &Token) -> Option<Vector> {
        self.coordinates.get(token).copied()
    }

    /// Displacement of `to` measured from `from`: `coordinate(to) - coordinate(from)`.
    pub fn displacement(&self, from: &Token, to: &Token) -> Option<Vector> {
        Some(self.coordinate(to)? - self.coordinate(from)?)
    }

    pub fn is_occupied(&self, position: Vector) -> bool {
        self.coordinates.values().any(|c| *c == position)
    }

    /// Tokens with their positions, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = (&Token, Vector)> {
        self.nodes
            .iter()
            .filter_map(|t| self.coordinates.get(t).map(|c| (t, *c)))
    }

    /// Every ordered pair of distinct live tokens, in window order.
    pub fn ordered_pairs(&self) -> impl Iterator<Item = (&Token, &Token)> {
        self.nodes.iter().flat_map(move |a| {
            self.nodes
                .iter()
                .filter(move |b| *b != a)
                .map(move |b| (a, b))
        })
    }

    /// Bounding box of the occupied cells, `None` when the window is empty.
    pub fn bounds(&self) -> Option<Bounds> {
        let mut cells = self.coordinates.values();
        let first = *cells.next()?;
        let (min, max) = cells.fold((first, first), |(min, max), c| {
            (
                Vector::new(min.dx.min(c.dx), min.dy.min(c.dy)),
                Vector::new(max.dx.max(c.dx), max.dy.max(c.dy)),
            )
        });
        Some(Bounds { min, max })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PuzzleState {
        let mut state = PuzzleState::new();
        state.place("A".into(), Vector::new(0, 0)).unwrap();
        state.place("B".into(), Vector::new(1, 1)).unwrap();
        state.place("C".into(), Vector::new(-1, 0)).unwrap();
        state
    }

    #[test]
    fn test_place_keeps_window_order() {
        let state = sample();
        let names: Vec<_> = state.nodes().iter().map(Token::as_str).collect();
        assert_eq!(names, ["A", "B", "C"]);
        assert_eq!(state.oldest(), Some(&Token::new("A")));
        assert_eq!(state.newest(), Some(&Token::new("C")));
    }

    #[test]
    fn test_place_rejects_collisions() {
        let mut state = sample();
        assert_eq!(
            state.place("D".into(), Vector::new(1, 1)),
            Err(StateError::Occupied(Vector::new(1, 1)))
        );
        assert_eq!(
            state.place("A".into(), Vector::new(5, 5)),
            Err(StateError::DuplicateToken("A".into()))
        );
        assert_eq!(state.len(), 3);
    }

    #[test]
    fn test_evict_oldest() {
        let mut state = sample();
        let (token, position) = state.evict_oldest().unwrap();

        assert_eq!(token, Token::new("A"));
        assert_eq!(position, Vector::ZERO);
        assert!(!state.contains(&token));
        assert!(!state.is_occupied(Vector::ZERO));
        assert_eq!(state.oldest(), Some(&Token::new("B")));
    }

    #[test]
    fn test_displacement() {
        let state = sample();
        assert_eq!(
            state.displacement(&"A".into(), &"B".into()),
            Some(Vector::new(1, 1))
        );
        assert_eq!(
            state.displacement(&"B".into(), &"C".into()),
            Some(Vector::new(-2, -1))
        );
        assert_eq!(state.displacement(&"A".into(), &"Z".into()), None);
    }

    #[test]
    fn test_ordered_pairs() {
        let state = sample();
        let pairs: Vec<_> = state.ordered_pairs().collect();
        assert_eq!(pairs.len(), 6);
        assert!(pairs.iter().all(|(a, b)| a != b));
    }

    #[test]
    fn test_from_parts_validates() {
        let mut coordinates = CoordinateMap::new();
        coordinates.insert("A".into(), Vector::ZERO);
        coordinates.insert("B".into(), Vector::ZERO);

        let result = PuzzleState::from_parts(vec!["A".into(), "B".into()], coordinates);
        assert_eq!(result, Err(StateError::Occupied(Vector::ZERO)));

        let result = PuzzleState::from_parts(vec!["A".into()], CoordinateMap::new());
        assert_eq!(result, Err(StateError::MissingCoordinate("A".into())));
    }

    #[test]
    fn test_evict_keeps_window_on_missing_coordinate() {
        let mut state = PuzzleState {
            nodes: vec!["A".into(), "B".into()],
            coordinates: CoordinateMap::from([(Token::new("B"), Vector::ZERO)]),
        };

        assert_eq!(state.evict_oldest(), None);
        assert_eq!(state.len(), 2);
        assert_eq!(state.coordinate(&"B".into()), Some(Vector::ZERO));
    }

    #[test]
    fn test_deserialize_validates() {
        let state = sample();
        let json = serde_json::to_string(&state).unwrap();
        assert_eq!(serde_json::from_str::<PuzzleState>(&json).unwrap(), state);

        let duplicate = r#"{"nodes":["A","B","A"],"coordinates":{"A":{"dx":0,"dy":0}}}"#;
        let err = serde_json::from_str::<PuzzleState>(duplicate).unwrap_err();
        assert!(err.to_string().contains("no coordinate"), "{err}");

        let stacked = r#"{"nodes":["A","B"],"coordinates":{"A":{"dx":0,"dy":0},"B":{"dx":0,"dy":0}}}"#;
        assert!(serde_json::from_str::<PuzzleState>(stacked).is_err());

        let extra = r#"{"nodes":["A"],"coordinates":{"A":{"dx":0,"dy":0},"B":{"dx":1,"dy":0}}}"#;
        assert!(serde_json::from_str::<PuzzleState>(extra).is_err());
    }

    #[test]
    fn test_bounds() {
        let state = sample();
        let bounds = state.bounds().unwrap();
        assert_eq!(bounds.min, Vector::new(-1, 0));
        assert_eq!(bounds.max, Vector::new(1, 1));
        assert_eq!(bounds.width(), 3);
        assert_eq!(bounds.height(), 2);
        assert!(PuzzleState::new().bounds().is_none());
    }
}
