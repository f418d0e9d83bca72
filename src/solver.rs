use itertools::Itertools;
use log::trace;
use strum::VariantArray;

use crate::board::EndpointPair;
use crate::cell::{Flow, Matrix};
use crate::direction::Direction;
use crate::feasibility;

/// Reasons a solve may fail.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SolveError {
    /// Every branch of the search was exhausted without connecting all flows.
    /// This is the expected outcome for an unsatisfiable board.
    Unsolvable,
}

/// How the engine schedules its four-way branch exploration.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Strategy {
    /// One shared grid, mutated in place; dead placements are unwound before
    /// the next direction is tried. Single-threaded and allocation-light.
    Sequential,
    /// Every direction attempt explores a private copy of the grid; the four
    /// attempts run as independent rayon tasks and are joined. Dead copies
    /// are discarded instead of unwound.
    Speculative,
}

/// Outcome of one speculative branch of the search.
#[derive(Debug)]
pub(crate) enum Branch {
    /// The branch's grid, with every flow connected.
    Solved(Matrix),
    /// No continuation of this branch connects every flow.
    Dead,
}

/// Entry point used by [`Board::solve_with`](crate::Board::solve_with):
/// orders the flows, runs the selected engine and leaves the solved layout in
/// `cells` on success.
pub(crate) fn run(
    cells: &mut Matrix,
    pairs: &[EndpointPair],
    strategy: Strategy,
) -> Result<(), SolveError> {
    if pairs.is_empty() {
        // nothing to connect
        return Ok(());
    }

    let order = solve_order(pairs);
    let engine = Engine { order: &order, pairs };
    let head = cells[order[0].start.as_index()].unwrap();

    let solved = match strategy {
        Strategy::Sequential => engine.extend_in_place(cells, head, 0),
        Strategy::Speculative => match engine.extend_speculative(cells, head, 0) {
            Branch::Solved(solution) => {
                *cells = solution;
                true
            }
            Branch::Dead => false,
        },
    };

    if solved {
        Ok(())
    } else {
        Err(SolveError::Unsolvable)
    }
}

/// Flows sorted ascending on endpoint span; ties keep registration order.
///
/// Tightly spanned flows have the fewest viable routes, so growing them first
/// surfaces dead ends after far fewer recursive steps than if a sprawling
/// flow claimed cells before them.
pub(crate) fn solve_order(pairs: &[EndpointPair]) -> Vec<EndpointPair> {
    pairs
        .iter()
        .copied()
        .sorted_by_key(|pair| pair.span())
        .collect_vec()
}

/// The path-extension engine's shared, read-only context.
///
/// `order` decides which flow grows when; `pairs` stays in registration order
/// and drives the feasibility sweep across every color.
pub(crate) struct Engine<'a> {
    pub(crate) order: &'a [EndpointPair],
    pub(crate) pairs: &'a [EndpointPair],
}

impl Engine<'_> {
    /// Grow the flow at `head` one cell at a time, mutating `cells` in place.
    ///
    /// Returns whether the whole board was solved down this branch. On a dead
    /// branch every placement made below this call has been unwound by the
    /// time it returns, leaving `cells` exactly as passed in.
    pub(crate) fn extend_in_place(&self, cells: &mut Matrix, head: Flow, color_index: usize) -> bool {
        if head.location == self.order[color_index].end {
            return self.advance_in_place(cells, color_index);
        }

        trace!("extending color {} at {:?}", head.color, head.location);

        Direction::VARIANTS
            .iter()
            .any(|&direction| self.attempt_in_place(cells, head, color_index, direction))
    }

    fn advance_in_place(&self, cells: &mut Matrix, color_index: usize) -> bool {
        match self.order.get(color_index + 1) {
            // every flow has reached its far endpoint
            None => true,
            Some(next) => {
                let head = cells[next.start.as_index()].unwrap();
                self.extend_in_place(cells, head, color_index + 1)
            }
        }
    }

    fn attempt_in_place(
        &self,
        cells: &mut Matrix,
        head: Flow,
        color_index: usize,
        direction: Direction,
    ) -> bool {
        let pair = self.order[color_index];
        let target = direction.attempt_from(head.location);

        // the far endpoint is already on the board; touching it completes
        // this flow
        if target == pair.end {
            return self.advance_in_place(cells, color_index);
        }

        // a path may not double back onto the cell it just left
        if head.entry.is_some_and(|entry| direction == entry.invert()) {
            return false;
        }

        match cells.get(target.as_index()) {
            None | Some(Some(_)) => return false,
            Some(None) => {}
        }

        let placed = Flow {
            location: target,
            color: pair.color,
            entry: Some(direction),
        };
        cells[target.as_index()] = Some(placed);

        if feasibility::puzzle_feasible(cells, self.pairs)
            && self.extend_in_place(cells, placed, color_index)
        {
            return true;
        }

        // unwind the tentative placement before the next direction is tried
        cells[target.as_index()] = None;
        false
    }

    /// Speculative counterpart of [`extend_in_place`](Self::extend_in_place):
    /// the four direction attempts run as independent rayon tasks, each over
    /// its own copy of the grid.
    ///
    /// All four siblings are joined before a result is picked, and the pick
    /// follows the fixed direction priority, so completion timing never
    /// changes which solution is returned.
    pub(crate) fn extend_speculative(&self, cells: &Matrix, head: Flow, color_index: usize) -> Branch {
        if head.location == self.order[color_index].end {
            return self.advance_speculative(cells, color_index);
        }

        trace!("speculating on color {} at {:?}", head.color, head.location);

        let ((up, down), (left, right)) = rayon::join(
            || {
                rayon::join(
                    || self.attempt_speculative(cells, head, color_index, Direction::Up),
                    || self.attempt_speculative(cells, head, color_index, Direction::Down),
                )
            },
            || {
                rayon::join(
                    || self.attempt_speculative(cells, head, color_index, Direction::Left),
                    || self.attempt_speculative(cells, head, color_index, Direction::Right),
                )
            },
        );

        [up, down, left, right]
            .into_iter()
            .find(|branch| !matches!(branch, Branch::Dead))
            .unwrap_or(Branch::Dead)
    }

    fn advance_speculative(&self, cells: &Matrix, color_index: usize) -> Branch {
        match self.order.get(color_index + 1) {
            None => Branch::Solved(cells.clone()),
            Some(next) => {
                let head = cells[next.start.as_index()].unwrap();
                self.extend_speculative(cells, head, color_index + 1)
            }
        }
    }

    fn attempt_speculative(
        &self,
        cells: &Matrix,
        head: Flow,
        color_index: usize,
        direction: Direction,
    ) -> Branch {
        let pair = self.order[color_index];
        let target = direction.attempt_from(head.location);

        if target == pair.end {
            return self.advance_speculative(cells, color_index);
        }

        if head.entry.is_some_and(|entry| direction == entry.invert()) {
            return Branch::Dead;
        }

        match cells.get(target.as_index()) {
            None | Some(Some(_)) => return Branch::Dead,
            Some(None) => {}
        }

        // copy-on-write: this branch owns its grid, siblings never observe
        // the placement
        let mut speculated = cells.clone();
        let placed = Flow {
            location: target,
            color: pair.color,
            entry: Some(direction),
        };
        speculated[target.as_index()] = Some(placed);

        if !feasibility::puzzle_feasible(&speculated, self.pairs) {
            return Branch::Dead;
        }

        self.extend_speculative(&speculated, placed, color_index)
    }
}
