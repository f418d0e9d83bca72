use std::num::NonZero;

use itertools::Itertools;
use ndarray::Array2;

use crate::board::{Board, EndpointPair};
use crate::cell::Flow;
use crate::location::{Dimension, Location};

/// Reasons a builder may become invalid while building.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum BuilderInvalidReason {
    /// A flow endpoint was placed outside the bounds specified by `dims` on a
    /// builder.
    FeatureOutOfBounds,
    /// A flow was registered under a display character already taken by an
    /// earlier flow.
    DuplicateColorKey,
}

/// A builder for rectangular flow-connection boards.
///
/// Builders mutate themselves while building but can be [`Clone`]d to save
/// their state at some point.
#[derive(Clone, Debug)]
pub struct BoardBuilder {
    // width, height
    dims: (Dimension, Dimension),
    termini: Vec<(Location, Location)>,
    color_displays: Vec<char>,
    invalid_reasons: Vec<BuilderInvalidReason>,
}

impl Default for BoardBuilder {
    fn default() -> Self {
        Self::with_dims((NonZero::new(5).unwrap(), NonZero::new(5).unwrap()))
    }
}

impl BoardBuilder {
    /// Construct a new builder with the specified dimensions, specified in
    /// `(x, y)` order.
    pub fn with_dims(dims: (Dimension, Dimension)) -> Self {
        Self {
            dims,
            termini: Default::default(),
            color_displays: Default::default(),
            invalid_reasons: Default::default(),
        }
    }

    /// Add a flow: two endpoint cells to be joined by a path of one color,
    /// displayed as `display`. The order in which `endpoints` are specified
    /// decides which end the solver grows the path from, not whether the
    /// board is solvable.
    ///
    /// May cause the builder to enter a
    /// [`FeatureOutOfBounds`](BuilderInvalidReason::FeatureOutOfBounds)
    /// invalid state if either location is out of bounds, or a
    /// [`DuplicateColorKey`](BuilderInvalidReason::DuplicateColorKey) invalid
    /// state if `display` already identifies another flow.
    /// If the builder is already in an invalid state, this function does
    /// nothing.
    pub fn add_flow(&mut self, display: char, endpoints: (Location, Location)) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        for location in [endpoints.0, endpoints.1] {
            if location.0 >= self.dims.0.get() || location.1 >= self.dims.1.get() {
                self.invalid_reasons.push(BuilderInvalidReason::FeatureOutOfBounds);
                return self;
            }
        }

        if self.color_displays.contains(&display) {
            self.invalid_reasons.push(BuilderInvalidReason::DuplicateColorKey);
            return self;
        }

        self.color_displays.push(display);
        self.termini.push(endpoints);

        self
    }

    /// Check the validity of this builder, ensuring no
    /// [`BuilderInvalidReason`] condition has arisen.
    ///
    /// Returns `None` if the builder is valid,
    /// `Some(&Vec<BuilderInvalidReason>)` otherwise.
    pub fn is_valid(&self) -> Option<&Vec<BuilderInvalidReason>> {
        if self.invalid_reasons.is_empty() {
            None
        } else {
            Some(&self.invalid_reasons)
        }
    }

    /// Convert the state of this builder into a [`Board`].
    /// If the builder is invalid for any reason, a reference to a [`Vec`] of
    /// [`BuilderInvalidReason`] will indicate why.
    pub fn build(&self) -> Result<Board, &Vec<BuilderInvalidReason>> {
        if !self.invalid_reasons.is_empty() {
            return Err(&self.invalid_reasons);
        }

        let mut cells = Array2::from_shape_simple_fn(
            (self.dims.1.get(), self.dims.0.get()),
            Option::default,
        );

        let pairs = self
            .termini
            .iter()
            .enumerate()
            .map(|(index, &(start, end))| {
                // color 0 stays reserved for the unoccupied display
                let color = index + 1;
                for location in [start, end] {
                    cells[location.as_index()] = Some(Flow { location, color, entry: None });
                }

                EndpointPair { color, start, end }
            })
            .collect_vec();

        let mut color_displays = Vec::with_capacity(self.color_displays.len() + 1);
        // color 0 is unoccupied and will display as empty
        color_displays.push('.');
        color_displays.extend(self.color_displays.iter().copied());

        Ok(Board {
            cells,
            dims: self.dims,
            pairs,
            color_displays,
        })
    }
}
