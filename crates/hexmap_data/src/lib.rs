//! Value types and pure math for hexagonal grids.
//!
//! Everything in this crate is plain data: cube coordinates and directions,
//! the mapping between cells and world space, offset coordinates for
//! rectangular storage, and the shapes a map can be bounded by.

pub mod bounds;
pub mod coord;
pub mod layout;
pub mod math;
