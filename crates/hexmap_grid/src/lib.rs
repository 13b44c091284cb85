//! Grid state and algorithms over [`hexmap_data`] coordinates.
//!
//! A [`grid::HexGrid`] owns the cells of one map, queues a [`grid::CellChange`]
//! for every write, and answers path queries through [`path::PathFinder`].

pub use hexmap_data;

pub mod cell;
pub mod config;
pub mod grid;
pub mod path;
pub mod ron;
