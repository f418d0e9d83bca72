use strum::VariantArray;

use crate::location::Location;

/// An orthogonal direction of travel across the board.
///
/// The declaration order doubles as the engine's fixed search priority:
/// [`Up`](Self::Up) is tried before [`Down`](Self::Down), which precedes
/// [`Left`](Self::Left) and then [`Right`](Self::Right).
#[derive(Copy, Clone, VariantArray, Eq, PartialEq, Hash, Debug, Ord, PartialOrd)]
pub(crate) enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Attempt the step from `location` in the direction specified by `self`
    /// and return the resultant [`Location`].
    pub(crate) fn attempt_from(&self, location: Location) -> Location {
        match self {
            Self::Up => location.offset_by((0, -1)),
            Self::Down => location.offset_by((0, 1)),
            Self::Left => location.offset_by((-1, 0)),
            Self::Right => location.offset_by((1, 0)),
        }
    }

    /// Invert the direction specified by `self`.
    pub(crate) fn invert(&self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}
