//! # Relational Core
//!
//! The reasoning engine behind the spatial recall puzzle. It turns a window of
//! tokens on the lattice into a direction graph, evolves the window round by
//! round, and derives true/false challenges that the graph can verify.
//!
//! ## Core Components
//!
//! - **relation_graph**: vector-labelled graph answering "where is B from A"
//! - **generator**: token words and non-colliding lattice layouts
//! - **challenge**: conclusion and analogy statements plus answer checking
//! - **driver**: one-call round transitions
//! - **session**: a headless game loop with scoring and a caller-driven clock
//!
//! ## Design Philosophy
//!
//! - **Pure rounds**: each round is a function of the previous state plus fresh randomness
//! - **Bounded sampling**: every reject-and-retry loop has a cap and a defined fallback
//! - **Caller-owned randomness**: any `rand::Rng` drives generation, so seeded runs replay

pub mod challenge;
pub mod driver;
pub mod error;
pub mod generator;
pub mod relation_graph;
pub mod session;

pub use challenge::*;
pub use driver::*;
pub use error::*;
pub use generator::*;
pub use relation_graph::*;
pub use session::*;
