#![warn(missing_docs)]

//! # `capillary`
//!
//! A solver for flow-connection puzzles in the style of
//! [Numberlink](https://en.wikipedia.org/wiki/Numberlink) and the mobile game Flow Free:
//! on a rectangular grid, every pair of same-colored endpoints must be joined by one
//! continuous orthogonal path, and no two paths may share a cell.
//! Begin by building a board object with a [`BoardBuilder`].
//! Convert it to a board object, then call [`solve()`](Board::solve) (or
//! [`solve_with()`](Board::solve_with) to pick an execution strategy), consuming the board
//! and yielding a solved version of the board.
//!
//! A flow is complete as soon as its path touches its second endpoint, so boards whose
//! solutions leave some cells unused are accepted; the solver does not insist on full
//! grid coverage.
//!
//! # Internals
//! This crate is driven by a pruned depth-first search over the grid, growing one flow
//! at a time, cell by cell.
//!
//! A high level overview is as follows:
//!
//! Flows are first ordered by the Manhattan distance between their endpoints, shortest
//! first. A tightly spanned flow admits few viable routes, so its failures are
//! discovered after the fewest recursive steps, and the cells it claims constrain the
//! sprawling flows solved after it.
//!
//! The engine grows the current flow outward from its first endpoint, attempting the
//! four orthogonal directions in a fixed priority order. After every tentative
//! placement a feasibility sweep runs for every color: a quick scan for endpoints whose
//! four neighbors are all claimed by foreign colors, then a flood-fill from each
//! color's start toward its far endpoint over empty or same-colored cells. Any color
//! cut off by the placement kills that branch immediately. This pruning is what keeps
//! the otherwise exponential search tractable.
//!
//! Two interchangeable execution strategies drive the engine: a sequential one that
//! mutates a single shared grid and unwinds dead placements, and a speculative one that
//! hands each direction attempt a private copy of the grid and joins the four attempts
//! on the rayon thread pool. Both pick results by the same direction priority, so they
//! return identical solutions.

pub use board::Board;
pub use builder::{BoardBuilder, BuilderInvalidReason};
pub use cell::Flow;
pub use color::ColorId;
pub use location::Location;
pub use solver::{SolveError, Strategy};

pub(crate) mod board;
mod tests;
pub(crate) mod builder;
pub(crate) mod cell;
pub(crate) mod color;
pub(crate) mod direction;
pub(crate) mod feasibility;
pub(crate) mod location;
pub(crate) mod solver;
