use ndarray::Array2;
use strum::VariantArray;

use crate::board::EndpointPair;
use crate::cell::Matrix;
use crate::color::ColorId;
use crate::direction::Direction;
use crate::location::Location;

/// Whether every registered flow can still be completed on `cells`.
///
/// A placement that leaves any color's endpoints sealed off or mutually
/// unreachable can never lead to a solution, so the branch that produced it
/// must be abandoned. For each pair this runs the cheap scan of the cells
/// around both endpoints first, then the authoritative flood-fill.
pub(crate) fn puzzle_feasible(cells: &Matrix, pairs: &[EndpointPair]) -> bool {
    pairs.iter().all(|pair| {
        !endpoint_sealed(cells, pair.color, pair.start)
            && !endpoint_sealed(cells, pair.color, pair.end)
            && endpoints_connected(cells, pair)
    })
}

// A cell is blocked for `color` if it is out of bounds or occupied by a
// different color.
fn cell_blocked(cells: &Matrix, color: ColorId, location: Location) -> bool {
    match cells.get(location.as_index()) {
        None => true,
        Some(Some(flow)) => flow.color != color,
        Some(None) => false,
    }
}

/// Whether all four cells around `location` are blocked for `color`.
///
/// NOTE: this doesn't cover the case of a flow walling itself in; the
/// flood-fill in [`endpoints_connected`] does.
pub(crate) fn endpoint_sealed(cells: &Matrix, color: ColorId, location: Location) -> bool {
    Direction::VARIANTS
        .iter()
        .all(|direction| cell_blocked(cells, color, direction.attempt_from(location)))
}

/// Whether a path of empty or same-colored cells still joins `pair`'s
/// endpoints. The destination counts as reached regardless of its contents.
///
/// Depth-first flood from `pair.start` with a visited matrix allocated per
/// call, so repeated invocations on the same grid return the same verdict.
pub(crate) fn endpoints_connected(cells: &Matrix, pair: &EndpointPair) -> bool {
    let mut visited = Array2::from_elem(cells.raw_dim(), false);
    let mut pending = vec![pair.start];

    while let Some(location) = pending.pop() {
        if location == pair.end {
            return true;
        }

        let Some(slot) = cells.get(location.as_index()) else {
            // walked off the board
            continue;
        };

        let seen = &mut visited[location.as_index()];
        if *seen {
            continue;
        }
        *seen = true;

        if matches!(slot, Some(flow) if flow.color != pair.color) {
            continue;
        }

        pending.extend(
            Direction::VARIANTS
                .iter()
                .map(|direction| direction.attempt_from(location)),
        );
    }

    false
}
