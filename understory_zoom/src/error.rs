// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use understory_zoom_geometry::GeometryError;

/// Errors reported by the zoom engine's entry points.
///
/// Every failing call leaves the engine state unchanged.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum ZoomError {
    /// A size, rotation, scale or offset failed geometric validation.
    #[error(transparent)]
    Geometry(#[from] GeometryError),
    /// A target scale was not finite and positive.
    #[error("scale {0} must be finite and positive")]
    InvalidScale(f64),
    /// A gesture zoom multiplier was not finite and positive.
    #[error("zoom multiplier {0} must be finite and positive")]
    InvalidZoomChange(f64),
    /// A gesture rotation delta was not finite.
    #[error("rotation delta {0} must be finite")]
    InvalidRotationChange(f64),
    /// A point or offset had a non-finite component.
    #[error("offset ({x}, {y}) must be finite")]
    InvalidOffset {
        /// Horizontal component.
        x: f64,
        /// Vertical component.
        y: f64,
    },
    /// A fling velocity had a non-finite component.
    #[error("velocity ({x}, {y}) must be finite")]
    InvalidVelocity {
        /// Horizontal component.
        x: f64,
        /// Vertical component.
        y: f64,
    },
    /// A scales policy multiple was not finite or below 1.
    #[error("scale multiple {0} must be finite and at least 1")]
    InvalidScaleMultiple(f64),
    /// A container whitespace multiple was not finite or negative.
    #[error("container whitespace multiple {0} must be finite and non-negative")]
    InvalidWhitespaceMultiple(f64),
    /// A read mode length multiple was not finite and positive.
    #[error("read mode multiple {0} must be finite and positive")]
    InvalidReadModeMultiple(f64),
    /// Rubber band parameters were out of range.
    #[error(
        "rubber band overshoot {max_overshoot} must be finite and non-negative, resistance {resistance} finite and positive"
    )]
    InvalidRubberBand {
        /// Maximum overshoot fraction.
        max_overshoot: f64,
        /// Resistance factor.
        resistance: f64,
    },
    /// Fling parameters were out of range.
    #[error(
        "fling friction {friction} and stop velocity {stop_velocity} must be finite and positive"
    )]
    InvalidFlingSpec {
        /// Exponential decay rate per second.
        friction: f64,
        /// Speed below which a fling stops.
        stop_velocity: f64,
    },
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn geometry_errors_convert_and_display() {
        let err: ZoomError = GeometryError::InvalidRotation { degrees: 45 }.into();
        assert!(matches!(
            err,
            ZoomError::Geometry(GeometryError::InvalidRotation { degrees: 45 })
        ));
        assert_eq!(
            err.to_string(),
            GeometryError::InvalidRotation { degrees: 45 }.to_string()
        );
        assert_eq!(
            ZoomError::InvalidScale(-1.0).to_string(),
            "scale -1 must be finite and positive"
        );
    }
}
