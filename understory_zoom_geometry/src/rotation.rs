// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use crate::GeometryError;

/// A clockwise quarter-turn rotation.
///
/// Content placement only ever rotates by whole quarter turns, so the set is
/// closed. Arbitrary angles are rejected by [`Rotation::from_degrees`] rather
/// than approximated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Rotation {
    /// No rotation.
    #[default]
    Deg0,
    /// A quarter turn clockwise.
    Deg90,
    /// A half turn.
    Deg180,
    /// Three quarter turns clockwise.
    Deg270,
}

impl Rotation {
    /// All four rotations in increasing order.
    pub const ALL: [Self; 4] = [Self::Deg0, Self::Deg90, Self::Deg180, Self::Deg270];

    /// Builds a rotation from degrees.
    ///
    /// Any multiple of 90 is accepted, including negative values and values
    /// outside `0..360`; they are normalized into a quarter turn.
    pub fn from_degrees(degrees: i32) -> Result<Self, GeometryError> {
        if degrees % 90 != 0 {
            return Err(GeometryError::InvalidRotation { degrees });
        }
        Ok(Self::from_quarter_turns(degrees.rem_euclid(360) / 90))
    }

    /// Snaps an arbitrary angle to the nearest quarter turn.
    #[must_use]
    pub fn nearest(degrees: f64) -> Self {
        if !degrees.is_finite() {
            return Self::Deg0;
        }
        #[expect(
            clippy::cast_possible_truncation,
            reason = "the value is an integer in 0..4 after rem_euclid"
        )]
        let turns = (degrees / 90.0).round().rem_euclid(4.0) as i32;
        Self::from_quarter_turns(turns)
    }

    fn from_quarter_turns(turns: i32) -> Self {
        match turns.rem_euclid(4) {
            0 => Self::Deg0,
            1 => Self::Deg90,
            2 => Self::Deg180,
            _ => Self::Deg270,
        }
    }

    /// The rotation in degrees, one of 0, 90, 180 or 270.
    #[must_use]
    pub const fn degrees(self) -> i32 {
        match self {
            Self::Deg0 => 0,
            Self::Deg90 => 90,
            Self::Deg180 => 180,
            Self::Deg270 => 270,
        }
    }

    /// Returns `true` for 90 and 270 degrees, where width and height swap.
    #[must_use]
    pub const fn swaps_axes(self) -> bool {
        matches!(self, Self::Deg90 | Self::Deg270)
    }

    /// Sum of two rotations, modulo a full turn.
    #[must_use]
    pub fn plus(self, other: Self) -> Self {
        Self::from_quarter_turns((self.degrees() + other.degrees()) / 90)
    }

    /// The rotation that undoes `self`.
    #[must_use]
    pub fn inverse(self) -> Self {
        Self::from_quarter_turns(-self.degrees() / 90)
    }
}

impl TryFrom<i32> for Rotation {
    type Error = GeometryError;

    fn try_from(degrees: i32) -> Result<Self, Self::Error> {
        Self::from_degrees(degrees)
    }
}

impl From<Rotation> for f64 {
    fn from(rotation: Rotation) -> Self {
        Self::from(rotation.degrees())
    }
}
