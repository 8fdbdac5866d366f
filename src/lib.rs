//! Exhaustive enumeration of creatable shapes in a factory-automation
//! puzzle game's circular-layer playfield.
//!
//! The hard core is [`enumerator`]: a two-frontier BFS over bit-packed
//! [`shape::Shape`] values, built on the physics operators in [`physics`]
//! and the dihedral symmetry normalization in [`symmetry`]. Everything
//! else in this crate is plumbing around that core — configuration,
//! persistence, textual I/O, and summary reporting.

pub mod config;
pub mod enumerator;
pub mod halves;
pub mod persist;
pub mod physics;
pub mod quarters;
pub mod sets;
pub mod shape;
pub mod summary;
pub mod symmetry;
pub mod textual;
