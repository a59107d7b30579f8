// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Error returned when a geometry value is built from malformed input.
///
/// These are caller errors: they are reported at construction time so that a
/// malformed value never reaches transform math.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum GeometryError {
    /// A size had a negative width or height.
    #[error("size {width}x{height} has a negative dimension")]
    NegativeSize {
        /// Offending width.
        width: f64,
        /// Offending height.
        height: f64,
    },
    /// A size had a NaN or infinite width or height.
    #[error("size {width}x{height} is not finite")]
    NonFiniteSize {
        /// Offending width.
        width: f64,
        /// Offending height.
        height: f64,
    },
    /// A rotation was not a multiple of 90 degrees.
    #[error("rotation {degrees} is not a multiple of 90 degrees")]
    InvalidRotation {
        /// Offending rotation, in degrees.
        degrees: i32,
    },
    /// A transform was built from [`ScaleFactor::UNSPECIFIED`](crate::ScaleFactor::UNSPECIFIED).
    #[error("scale factor is unspecified")]
    UnspecifiedScale,
    /// A transform was built from [`Offset::UNSPECIFIED`](crate::Offset::UNSPECIFIED).
    #[error("offset is unspecified")]
    UnspecifiedOffset,
    /// A scale factor component was zero or infinite.
    #[error("scale factor ({scale_x}, {scale_y}) must be finite and non-zero")]
    InvalidScale {
        /// Horizontal component.
        scale_x: f64,
        /// Vertical component.
        scale_y: f64,
    },
    /// An offset component was infinite.
    #[error("offset ({x}, {y}) must be finite")]
    InvalidOffset {
        /// Horizontal component.
        x: f64,
        /// Vertical component.
        y: f64,
    },
}
