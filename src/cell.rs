use ndarray::Array2;

use crate::color::ColorId;
use crate::direction::Direction;
use crate::location::Location;

/// The cell matrix backing a board, indexed `[row][col]`.
pub(crate) type Matrix = Array2<Option<Flow>>;

/// One occupied cell: a segment of some color's path, or one of that color's
/// two original endpoints.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Flow {
    pub(crate) location: Location,
    pub(crate) color: ColorId,
    // direction of travel when the path entered this cell; None marks an
    // original endpoint
    pub(crate) entry: Option<Direction>,
}

impl Flow {
    /// The color whose path occupies this cell.
    pub fn color(&self) -> ColorId {
        self.color
    }

    /// Where on the board this cell sits.
    pub fn location(&self) -> Location {
        self.location
    }

    /// Whether this cell is one of its color's two original endpoints.
    pub fn is_endpoint(&self) -> bool {
        self.entry.is_none()
    }
}
