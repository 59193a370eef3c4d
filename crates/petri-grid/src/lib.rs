//! Grid engine for the Petri Game of Life simulator.
//!
//! This is the leaf crate with no internal dependencies. It owns the cell
//! matrix and the rule evaluation: neighbor counting over the 8-connected
//! (Moore) neighborhood with a non-wrapping boundary, and the synchronous
//! `step` that produces each generation from the previous one.
//!
//! The engine is stateless with respect to timing — [`Grid::step`] is a pure
//! function of the current grid. Scheduling, run/pause state, and the
//! generation counter live in `petri-sim`.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod cell;
mod error;
mod grid;

pub use cell::Cell;
pub use error::GridError;
pub use grid::{Grid, NEIGHBOR_OFFSETS};
