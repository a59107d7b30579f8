// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::time::Duration;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use understory_zoom_geometry::Offset;

use crate::ZoomError;

/// Longest fling the engine will run.
const MAX_FLING_SECONDS: f64 = 10.0;

/// Exponential-decay fling parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlingSpec {
    /// Decay rate per second: velocity is `v0 * exp(-friction * t)`.
    pub friction: f64,
    /// Speed, in pixels per second, below which a fling stops.
    pub stop_velocity: f64,
}

impl Default for FlingSpec {
    fn default() -> Self {
        Self {
            friction: 4.2,
            stop_velocity: 50.0,
        }
    }
}

impl FlingSpec {
    /// Rejects non-finite or non-positive parameters.
    pub fn validate(self) -> Result<Self, ZoomError> {
        if self.friction.is_finite()
            && self.friction > 0.0
            && self.stop_velocity.is_finite()
            && self.stop_velocity > 0.0
        {
            Ok(self)
        } else {
            Err(ZoomError::InvalidFlingSpec {
                friction: self.friction,
                stop_velocity: self.stop_velocity,
            })
        }
    }
}

/// A fling trajectory starting at `start` with `velocity`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fling {
    start: Offset,
    velocity: Offset,
    spec: FlingSpec,
}

impl Fling {
    /// Creates a fling from a start offset and an initial velocity in pixels per second.
    #[must_use]
    pub fn new(start: Offset, velocity: Offset, spec: FlingSpec) -> Self {
        Self {
            start,
            velocity,
            spec,
        }
    }

    /// Time until the speed decays below the stop velocity.
    #[must_use]
    pub fn duration(&self) -> Duration {
        let speed = self.velocity.length();
        if speed.is_nan() || speed <= self.spec.stop_velocity {
            return Duration::ZERO;
        }
        let seconds = ((speed / self.spec.stop_velocity).ln() / self.spec.friction)
            .min(MAX_FLING_SECONDS);
        Duration::try_from_secs_f64(seconds).unwrap_or(Duration::ZERO)
    }

    /// Offset reached after `elapsed`.
    #[must_use]
    pub fn offset_at(&self, elapsed: Duration) -> Offset {
        let k = self.spec.friction;
        let travelled = (1.0 - decay(k, elapsed)) / k;
        self.start + self.velocity.times(travelled)
    }

    /// Velocity after `elapsed`.
    #[must_use]
    pub fn velocity_at(&self, elapsed: Duration) -> Offset {
        self.velocity.times(decay(self.spec.friction, elapsed))
    }
}

/// `e^(-friction * t)`.
fn decay(friction: f64, elapsed: Duration) -> f64 {
    core::f64::consts::E.powf(-friction * elapsed.as_secs_f64())
}
