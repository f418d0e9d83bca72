/// Identifies one flow: an endpoint pair and the path connecting it.
///
/// Color 0 is reserved for the unoccupied display slot; registered colors
/// start at 1, in registration order.
pub type ColorId = usize;
