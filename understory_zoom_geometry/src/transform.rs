// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Affine, Point, Vec2};

use crate::{GeometryError, Offset, ScaleFactor, Size, TransformOrigin};

/// A graphics-layer style transform.
///
/// A point is mapped by:
/// 1. rotating clockwise by [`rotation`](Self::rotation) degrees about
///    [`rotation_origin`](Self::rotation_origin),
/// 2. scaling about [`scale_origin`](Self::scale_origin),
/// 3. translating by [`offset`](Self::offset).
///
/// Both origins are fractions of the container size, so mapping needs the
/// container size; see [`Transform::map_point`].
///
/// The scale is always finite and non-zero. Use [`Transform::try_new`] for
/// values that come from outside the program.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    scale: ScaleFactor,
    offset: Offset,
    rotation: f64,
    scale_origin: TransformOrigin,
    rotation_origin: TransformOrigin,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    /// The transform that maps every point onto itself.
    pub const IDENTITY: Self = Self {
        scale: ScaleFactor::ONE,
        offset: Offset::ZERO,
        rotation: 0.0,
        scale_origin: TransformOrigin::TOP_START,
        rotation_origin: TransformOrigin::TOP_START,
    };

    /// Creates a transform from a scale and an offset, validating both.
    ///
    /// Fails for the unspecified sentinels, zero or non-finite scale
    /// components and non-finite offsets.
    pub fn try_new(scale: ScaleFactor, offset: Offset) -> Result<Self, GeometryError> {
        if !scale.is_specified() {
            return Err(GeometryError::UnspecifiedScale);
        }
        if !offset.is_specified() {
            return Err(GeometryError::UnspecifiedOffset);
        }
        if !scale.is_valid() {
            return Err(GeometryError::InvalidScale {
                scale_x: scale.scale_x,
                scale_y: scale.scale_y,
            });
        }
        if !offset.is_finite() {
            return Err(GeometryError::InvalidOffset {
                x: offset.x,
                y: offset.y,
            });
        }
        Ok(Self::new(scale, offset))
    }

    /// Creates a transform from values already known to be valid.
    #[must_use]
    pub fn new(scale: ScaleFactor, offset: Offset) -> Self {
        debug_assert!(scale.is_valid(), "invalid scale {scale:?}");
        debug_assert!(offset.is_finite(), "invalid offset {offset:?}");
        Self {
            scale,
            offset,
            ..Self::IDENTITY
        }
    }

    /// Returns a copy with a different scale.
    #[must_use]
    pub fn with_scale(self, scale: ScaleFactor) -> Self {
        debug_assert!(scale.is_valid(), "invalid scale {scale:?}");
        Self { scale, ..self }
    }

    /// Returns a copy with a different offset.
    #[must_use]
    pub fn with_offset(self, offset: Offset) -> Self {
        debug_assert!(offset.is_finite(), "invalid offset {offset:?}");
        Self { offset, ..self }
    }

    /// Returns a copy rotated to `degrees`, normalized into `[0, 360)`.
    #[must_use]
    pub fn with_rotation(self, degrees: f64) -> Self {
        Self {
            rotation: normalize_degrees(degrees),
            ..self
        }
    }

    /// Returns a copy with a different scale origin.
    #[must_use]
    pub fn with_scale_origin(self, scale_origin: TransformOrigin) -> Self {
        Self {
            scale_origin,
            ..self
        }
    }

    /// Returns a copy with a different rotation origin.
    #[must_use]
    pub fn with_rotation_origin(self, rotation_origin: TransformOrigin) -> Self {
        Self {
            rotation_origin,
            ..self
        }
    }

    /// Scale factor.
    #[must_use]
    pub fn scale(&self) -> ScaleFactor {
        self.scale
    }

    /// Horizontal scale component.
    #[must_use]
    pub fn scale_x(&self) -> f64 {
        self.scale.scale_x
    }

    /// Vertical scale component.
    #[must_use]
    pub fn scale_y(&self) -> f64 {
        self.scale.scale_y
    }

    /// Translation.
    #[must_use]
    pub fn offset(&self) -> Offset {
        self.offset
    }

    /// Horizontal translation.
    #[must_use]
    pub fn offset_x(&self) -> f64 {
        self.offset.x
    }

    /// Vertical translation.
    #[must_use]
    pub fn offset_y(&self) -> f64 {
        self.offset.y
    }

    /// Clockwise rotation in degrees, within `[0, 360)`.
    #[must_use]
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Pivot for scaling.
    #[must_use]
    pub fn scale_origin(&self) -> TransformOrigin {
        self.scale_origin
    }

    /// Pivot for rotation.
    #[must_use]
    pub fn rotation_origin(&self) -> TransformOrigin {
        self.rotation_origin
    }

    /// Returns the transform that applies `self` and then `next`.
    ///
    /// `next` scales and translates in container space after `self`; its
    /// rotation joins `self`'s rotation about the same pivot. The result has
    /// scale `self.scale * next.scale`, rotation `self.rotation + next.rotation`
    /// (mod 360) and offset `next.offset + self.offset * next.scale`. The
    /// origins are taken from `self`.
    ///
    /// This is not commutative: `base.compose(&user)` is the render transform
    /// of a zoomed view, `user.compose(&base)` is meaningless.
    #[must_use]
    pub fn compose(&self, next: &Self) -> Self {
        Self {
            scale: self.scale.times(next.scale),
            offset: next.offset + self.offset.scale_by(next.scale),
            rotation: normalize_degrees(self.rotation + next.rotation),
            scale_origin: self.scale_origin,
            rotation_origin: self.rotation_origin,
        }
    }

    /// Exact inverse of [`Transform::compose`]: recovers `next` from
    /// `first.compose(&next)` and `first`.
    ///
    /// The origins of the result are taken from `self`.
    #[must_use]
    pub fn decompose(&self, first: &Self) -> Self {
        let scale = self.scale.divide_by(first.scale);
        Self {
            scale,
            offset: self.offset - first.offset.scale_by(scale),
            rotation: normalize_degrees(self.rotation - first.rotation),
            scale_origin: self.scale_origin,
            rotation_origin: self.rotation_origin,
        }
    }

    /// Maps `point` through this transform inside a container of `container_size`.
    ///
    /// Quarter-turn rotations are computed exactly.
    #[must_use]
    pub fn map_point(&self, point: Offset, container_size: Size) -> Offset {
        (self.to_affine(container_size) * Point::from(point)).into()
    }

    /// Returns the Kurbo affine equivalent to [`Transform::map_point`] in a
    /// container of `container_size`.
    ///
    /// Quarter-turn rotations produce exact matrix coefficients.
    #[must_use]
    pub fn to_affine(&self, container_size: Size) -> Affine {
        let rotation_pivot = Vec2::from(self.rotation_origin.pivot_in(container_size));
        let scale_pivot = Vec2::from(self.scale_origin.pivot_in(container_size));
        let (sin, cos) = sin_cos_degrees(self.rotation);
        Affine::translate(Vec2::from(self.offset) + scale_pivot)
            * Affine::scale_non_uniform(self.scale.scale_x, self.scale.scale_y)
            * Affine::translate(rotation_pivot - scale_pivot)
            * Affine::new([cos, sin, -sin, cos, 0.0, 0.0])
            * Affine::translate(-rotation_pivot)
    }

    /// Linear interpolation towards `target` at fraction `t`.
    ///
    /// Rotation takes the shorter way around; origins jump to `target`'s.
    #[must_use]
    pub fn lerp(&self, target: &Self, t: f64) -> Self {
        let mix = |a: f64, b: f64| a + (b - a) * t;
        let delta = (target.rotation - self.rotation + 540.0).rem_euclid(360.0) - 180.0;
        Self {
            scale: ScaleFactor::new(
                mix(self.scale.scale_x, target.scale.scale_x),
                mix(self.scale.scale_y, target.scale.scale_y),
            ),
            offset: Offset::new(
                mix(self.offset.x, target.offset.x),
                mix(self.offset.y, target.offset.y),
            ),
            rotation: normalize_degrees(self.rotation + delta * t),
            scale_origin: target.scale_origin,
            rotation_origin: target.rotation_origin,
        }
    }
}

fn normalize_degrees(degrees: f64) -> f64 {
    let normalized = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    if normalized >= 360.0 { 0.0 } else { normalized }
}

fn sin_cos_degrees(degrees: f64) -> (f64, f64) {
    let normalized = normalize_degrees(degrees);
    if normalized == 0.0 {
        (0.0, 1.0)
    } else if normalized == 90.0 {
        (1.0, 0.0)
    } else if normalized == 180.0 {
        (0.0, -1.0)
    } else if normalized == 270.0 {
        (-1.0, 0.0)
    } else {
        normalized.to_radians().sin_cos()
    }
}
