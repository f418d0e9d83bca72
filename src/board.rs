use std::fmt::{Display, Formatter};

use log::debug;

use crate::cell::{Flow, Matrix};
use crate::color::ColorId;
use crate::location::{Dimension, Location};
use crate::solver;
use crate::solver::{SolveError, Strategy};

/// A pair of same-colored endpoints the solver must join with a path.
///
/// Registered once at build time and never mutated afterwards.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct EndpointPair {
    pub(crate) color: ColorId,
    pub(crate) start: Location,
    pub(crate) end: Location,
}

impl EndpointPair {
    /// Manhattan distance between the two endpoints; the sort key of the
    /// solve-order heuristic.
    pub(crate) fn span(&self) -> usize {
        self.start.manhattan_distance(self.end)
    }
}

/// A rectangular flow-connection board.
///
/// [`Board`]s should be built using a [`BoardBuilder`](crate::BoardBuilder),
/// which enforces the input invariants (in-bounds endpoints, distinct display
/// characters) before a board exists at all.
pub struct Board {
    pub(crate) cells: Matrix,
    pub(crate) dims: (Dimension, Dimension),
    pub(crate) pairs: Vec<EndpointPair>,
    pub(crate) color_displays: Vec<char>,
}

impl Board {
    /// Solves this board with the default [`Sequential`](Strategy::Sequential)
    /// strategy. See [`solve_with`](Self::solve_with).
    pub fn solve(self) -> Result<Self, SolveError> {
        self.solve_with(Strategy::Sequential)
    }

    /// Solves this board, consuming it and returning the solved version.
    ///
    /// Both strategies explore directions in the same fixed priority order and
    /// therefore return the same solved layout for the same input. Returns
    /// [`SolveError::Unsolvable`] once every branch of the search is
    /// exhausted; an unsatisfiable board is an expected outcome, not a fault.
    pub fn solve_with(mut self, strategy: Strategy) -> Result<Self, SolveError> {
        debug!(
            "solving {}x{} board with {} flows using {:?}",
            self.dims.0,
            self.dims.1,
            self.pairs.len(),
            strategy
        );

        solver::run(&mut self.cells, &self.pairs, strategy)?;
        Ok(self)
    }

    /// The cell at `location`, if occupied. Out-of-bounds locations are never
    /// occupied.
    pub fn cell_at(&self, location: Location) -> Option<&Flow> {
        self.cells.get(location.as_index()).and_then(|slot| slot.as_ref())
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut out = String::with_capacity((self.dims.0.get() + 1) * self.dims.1.get());

        for row in self.cells.rows() {
            for cell in row {
                out.push(match cell {
                    Some(flow) => {
                        let display = *self.color_displays.get(flow.color).unwrap();
                        if flow.is_endpoint() {
                            display.to_ascii_uppercase()
                        } else {
                            display.to_ascii_lowercase()
                        }
                    }
                    None => '.',
                });
            }
            out.push('\n');
        }

        write!(f, "{}", out)
    }
}
