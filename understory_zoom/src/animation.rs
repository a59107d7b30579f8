// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Animation adapter.
//!
//! The engine never owns a clock. When it wants to animate, it asks an
//! [`AnimationDriver`] to start producing frames for an [`AnimationHandle`];
//! the host then calls [`Zoomable::step_animation`](crate::Zoomable::step_animation)
//! with the time elapsed since the start until the step reports completion.
//!
//! [`ManualDriver`] records the active requests and their elapsed time, for
//! hosts that drive everything from a single frame loop.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::time::Duration;

use smallvec::SmallVec;

/// Identifies one animation run.
///
/// Handles are never reused by an engine, so a late step for a cancelled run
/// is reported as [`AnimationStatus::Stale`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnimationHandle(u64);

impl AnimationHandle {
    pub(crate) const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Raw identifier, unique per engine.
    #[must_use]
    pub const fn id(self) -> u64 {
        self.0
    }
}

/// Independent animation channels. Starting an animation cancels the
/// previous one in the same group only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnimationGroup {
    /// Scale and offset changes, including flings.
    Transform,
    /// Settling of the displayed rotation.
    Rotation,
}

/// Result of stepping an animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnimationStatus {
    /// More frames are needed.
    Running,
    /// The animation reached its end on this step.
    Finished,
    /// The handle no longer refers to a running animation.
    Stale,
}

impl AnimationStatus {
    /// Returns `true` if no more frames are needed.
    #[must_use]
    pub fn is_done(self) -> bool {
        !matches!(self, Self::Running)
    }
}

/// Timing curve of an animation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Easing {
    /// Constant speed.
    Linear,
    /// Cubic Bezier (0.4, 0, 0.2, 1): quick start, long settle.
    #[default]
    FastOutSlowIn,
    /// Cubic Bezier (0, 0, 0.58, 1): full speed at the start.
    EaseOut,
}

impl Easing {
    /// Maps a linear fraction in `[0, 1]` to an eased fraction.
    #[must_use]
    pub fn transform(self, fraction: f64) -> f64 {
        let fraction = fraction.clamp(0.0, 1.0);
        match self {
            Self::Linear => fraction,
            Self::FastOutSlowIn => cubic_bezier(0.4, 0.0, 0.2, 1.0, fraction),
            Self::EaseOut => cubic_bezier(0.0, 0.0, 0.58, 1.0, fraction),
        }
    }
}

/// One coordinate of a cubic Bezier with endpoints 0 and 1.
fn bezier_coordinate(p1: f64, p2: f64, t: f64) -> f64 {
    let c = 3.0 * p1;
    let b = 3.0 * (p2 - p1) - c;
    let a = 1.0 - c - b;
    ((a * t + b) * t + c) * t
}

fn bezier_slope(p1: f64, p2: f64, t: f64) -> f64 {
    let c = 3.0 * p1;
    let b = 3.0 * (p2 - p1) - c;
    let a = 1.0 - c - b;
    (3.0 * a * t + 2.0 * b) * t + c
}

/// Solves the curve for `x` (Newton first, bisection as a fallback) and returns its `y`.
fn cubic_bezier(x1: f64, y1: f64, x2: f64, y2: f64, x: f64) -> f64 {
    const EPSILON: f64 = 1e-7;
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }
    let mut t = x;
    for _ in 0..8 {
        let error = bezier_coordinate(x1, x2, t) - x;
        if error.abs() < EPSILON {
            return bezier_coordinate(y1, y2, t);
        }
        let slope = bezier_slope(x1, x2, t);
        if slope.abs() < 1e-6 {
            break;
        }
        t -= error / slope;
    }
    let (mut low, mut high) = (0.0, 1.0);
    t = x;
    for _ in 0..64 {
        let value = bezier_coordinate(x1, x2, t);
        if (value - x).abs() < EPSILON {
            break;
        }
        if value < x {
            low = t;
        } else {
            high = t;
        }
        t = (low + high) / 2.0;
    }
    bezier_coordinate(y1, y2, t)
}

/// Duration and easing of an animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AnimationSpec {
    /// Total run time.
    pub duration: Duration,
    /// Timing curve.
    pub easing: Easing,
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(300),
            easing: Easing::FastOutSlowIn,
        }
    }
}

impl AnimationSpec {
    /// Linear progress after `elapsed`, clamped to `[0, 1]`.
    ///
    /// A zero duration is complete immediately.
    #[must_use]
    pub fn fraction(&self, elapsed: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    /// Eased progress after `elapsed`.
    #[must_use]
    pub fn eased_fraction(&self, elapsed: Duration) -> f64 {
        self.easing.transform(self.fraction(elapsed))
    }
}

/// Frame source for engine animations.
pub trait AnimationDriver {
    /// Begin delivering frames for `handle`.
    fn start(&mut self, handle: AnimationHandle, group: AnimationGroup, spec: &AnimationSpec);

    /// Stop delivering frames for `handle`; it was interrupted.
    fn cancel(&mut self, handle: AnimationHandle);

    /// Stop delivering frames for `handle`; it ran to completion.
    fn finished(&mut self, handle: AnimationHandle) {
        self.cancel(handle);
    }
}

impl<D: AnimationDriver + ?Sized> AnimationDriver for Box<D> {
    fn start(&mut self, handle: AnimationHandle, group: AnimationGroup, spec: &AnimationSpec) {
        (**self).start(handle, group, spec);
    }

    fn cancel(&mut self, handle: AnimationHandle) {
        (**self).cancel(handle);
    }

    fn finished(&mut self, handle: AnimationHandle) {
        (**self).finished(handle);
    }
}

/// An animation the engine asked a [`ManualDriver`] to run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnimationRequest {
    /// Handle to pass back to the engine.
    pub handle: AnimationHandle,
    /// Channel the animation runs on.
    pub group: AnimationGroup,
    /// Requested timing.
    pub spec: AnimationSpec,
    /// Time accumulated by [`ManualDriver::advance`].
    pub elapsed: Duration,
}

/// A driver that records requests for a host-owned frame loop.
#[derive(Clone, Debug, Default)]
pub struct ManualDriver {
    requests: Vec<AnimationRequest>,
}

impl ManualDriver {
    /// Creates a driver with no active requests.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Active requests, oldest first.
    #[must_use]
    pub fn requests(&self) -> &[AnimationRequest] {
        &self.requests
    }

    /// Returns `true` when no animation is running.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.requests.is_empty()
    }

    /// Adds `delta` to every active request and returns the handles with their new elapsed time.
    pub fn advance(&mut self, delta: Duration) -> SmallVec<[(AnimationHandle, Duration); 2]> {
        self.requests
            .iter_mut()
            .map(|request| {
                request.elapsed = request.elapsed.saturating_add(delta);
                (request.handle, request.elapsed)
            })
            .collect()
    }
}

impl AnimationDriver for ManualDriver {
    fn start(&mut self, handle: AnimationHandle, group: AnimationGroup, spec: &AnimationSpec) {
        self.requests.push(AnimationRequest {
            handle,
            group,
            spec: *spec,
            elapsed: Duration::ZERO,
        });
    }

    fn cancel(&mut self, handle: AnimationHandle) {
        self.requests.retain(|request| request.handle != handle);
    }
}
