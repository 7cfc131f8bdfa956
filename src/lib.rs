//! Seeded growing-tree maze generation with bridges, over square and hex lattices.
//!
//! [`maze::Maze`] carves a spanning tree one passage per step; [`draw::render`] turns the
//! carved state into draw primitives; [`app`] previews those in a terminal.

pub mod app;
pub mod draw;
pub mod error;
pub mod grid;
pub mod maze;
pub mod rng;

pub use error::{MazeError, Result};
