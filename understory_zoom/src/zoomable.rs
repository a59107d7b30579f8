// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The stateful zoom engine.

use alloc::boxed::Box;
use core::fmt;
use core::time::Duration;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use tracing::{debug, trace};
use understory_zoom_geometry::{Insets, Offset, Rect, Rotation, ScaleFactor, Size, Transform};

use crate::animation::{
    AnimationDriver, AnimationGroup, AnimationHandle, AnimationSpec, AnimationStatus, Easing,
    ManualDriver,
};
use crate::bounds::{Axis, OffsetPolicy, ScrollDirection, ScrollEdges};
use crate::continuous::ContinuousTransformType;
use crate::fling::{Fling, FlingSpec};
use crate::initial::InitialZoom;
use crate::placement::Placement;
use crate::read_mode::ReadMode;
use crate::reconcile;
use crate::reset::{ResetParams, ResetStrategy, StrategyContext};
use crate::rubber_band::RubberBand;
use crate::scales::{ScaleBounds, ScalesPolicy, calculate_next_step_scale};
use crate::settings::ZoomSettings;
use crate::{Alignment, FitMode, LayoutDirection, ZoomError};

/// Callback invoked with the render transform and the continuous flags.
pub type TransformListener = Box<dyn FnMut(&Transform, ContinuousTransformType)>;

/// Two scales closer than this count as the same step.
const SWITCH_SCALE_RANGE_OF_ERROR: f64 = 0.01;

/// Relative slack before a scale counts as outside its bounds.
const ROLLBACK_TOLERANCE: f64 = 1e-9;

/// Rotation offsets below this many degrees settle without animating.
const ROTATION_SETTLE_TOLERANCE: f64 = 1e-3;

#[derive(Clone, Copy, Debug)]
enum Motion {
    Tween { from: Transform, to: Transform },
    Fling {
        fling: Fling,
        locked_x: bool,
        locked_y: bool,
    },
}

#[derive(Clone, Copy, Debug)]
struct TransformAnimation {
    handle: AnimationHandle,
    motion: Motion,
    spec: AnimationSpec,
}

#[derive(Clone, Copy, Debug)]
struct RotationAnimation {
    handle: AnimationHandle,
    from_offset: f64,
    spec: AnimationSpec,
}

/// Pan, zoom and rotate state of one piece of content inside a container.
///
/// The engine owns the user transform. Every change of size or configuration
/// goes through [`reset`](Self::reset), which decides how much of the user
/// transform survives. Gestures and commands move the user transform within
/// the scale and offset bounds; animated commands run through the
/// [`AnimationDriver`] `D`.
///
/// ```
/// use understory_zoom::{Zoomable, ManualDriver};
/// use understory_zoom::geometry::{Offset, Size};
///
/// let mut zoomable = Zoomable::new(ManualDriver::new());
/// zoomable.set_container_size(Size::new(1080.0, 1656.0)).unwrap();
/// zoomable.set_content_size(Size::new(551.0, 1038.0)).unwrap();
/// assert_eq!(zoomable.content_base_display_rect().left, 101.0);
///
/// let medium = zoomable.medium_scale();
/// zoomable.scale(medium, Some(Offset::new(540.0, 828.0)), false).unwrap();
/// assert!((zoomable.transform().scale_x() - medium).abs() < 1e-9);
/// ```
pub struct Zoomable<D = ManualDriver> {
    settings: ZoomSettings,
    container_size: Size,
    content_size: Size,
    content_origin_size: Size,
    reset_params: Option<ResetParams>,
    initial: InitialZoom,
    user_transform: Transform,
    continuous: ContinuousTransformType,
    last_centroid: Option<Offset>,
    rotation_offset: f64,
    transform_animation: Option<TransformAnimation>,
    rotation_animation: Option<RotationAnimation>,
    next_handle: u64,
    driver: D,
    listener: Option<TransformListener>,
    emitted: Option<(Transform, ContinuousTransformType)>,
}

impl<D: fmt::Debug> fmt::Debug for Zoomable<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Zoomable")
            .field("settings", &self.settings)
            .field("container_size", &self.container_size)
            .field("content_size", &self.content_size)
            .field("content_origin_size", &self.content_origin_size)
            .field("initial", &self.initial)
            .field("user_transform", &self.user_transform)
            .field("continuous", &self.continuous)
            .field("rotation_offset", &self.rotation_offset)
            .field("driver", &self.driver)
            .finish_non_exhaustive()
    }
}

impl<D: AnimationDriver + Default> Default for Zoomable<D> {
    fn default() -> Self {
        Self::new(D::default())
    }
}

impl<D: AnimationDriver> Zoomable<D> {
    /// Creates an engine with default settings and empty sizes.
    #[must_use]
    pub fn new(driver: D) -> Self {
        Self {
            settings: ZoomSettings::default(),
            container_size: Size::ZERO,
            content_size: Size::ZERO,
            content_origin_size: Size::ZERO,
            reset_params: None,
            initial: InitialZoom::ORIGIN,
            user_transform: Transform::IDENTITY,
            continuous: ContinuousTransformType::empty(),
            last_centroid: None,
            rotation_offset: 0.0,
            transform_animation: None,
            rotation_animation: None,
            next_handle: 0,
            driver,
            listener: None,
            emitted: None,
        }
    }

    /// Creates an engine with `settings`, rejecting invalid ones.
    pub fn with_settings(settings: ZoomSettings, driver: D) -> Result<Self, ZoomError> {
        settings
            .validate()
            .map_err(|err| reject("settings", err))?;
        let mut zoomable = Self::new(driver);
        zoomable.settings = settings;
        Ok(zoomable)
    }

    /// Installs the transform-changed callback, replacing any previous one.
    ///
    /// The callback fires whenever the render transform or the continuous
    /// flags change, starting with the next change.
    pub fn set_listener(
        &mut self,
        listener: impl FnMut(&Transform, ContinuousTransformType) + 'static,
    ) {
        self.listener = Some(Box::new(listener));
    }

    /// Removes the transform-changed callback.
    pub fn clear_listener(&mut self) {
        self.listener = None;
    }

    /// The animation driver.
    #[must_use]
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Mutable access to the animation driver.
    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Current configuration.
    #[must_use]
    pub fn settings(&self) -> &ZoomSettings {
        &self.settings
    }

    // --- Sizes ---------------------------------------------------------------

    /// Sets the viewport size.
    pub fn set_container_size(&mut self, size: Size) -> Result<(), ZoomError> {
        self.container_size = size
            .validate()
            .map_err(|err| reject("container size", err))?;
        self.reset("container size changed");
        Ok(())
    }

    /// Sets the size of the displayed content, possibly a placeholder.
    pub fn set_content_size(&mut self, size: Size) -> Result<(), ZoomError> {
        self.content_size = size
            .validate()
            .map_err(|err| reject("content size", err))?;
        self.reset("content size changed");
        Ok(())
    }

    /// Sets the full-resolution size of the content, [`Size::ZERO`] when unknown.
    pub fn set_content_origin_size(&mut self, size: Size) -> Result<(), ZoomError> {
        self.content_origin_size = size
            .validate()
            .map_err(|err| reject("content origin size", err))?;
        self.reset("content origin size changed");
        Ok(())
    }

    // --- Settings ------------------------------------------------------------

    /// Sets the fit mode.
    pub fn set_fit_mode(&mut self, fit_mode: FitMode) {
        self.settings.fit_mode = fit_mode;
        self.reset("fit mode changed");
    }

    /// Sets the alignment.
    pub fn set_alignment(&mut self, alignment: Alignment) {
        self.settings.alignment = alignment;
        self.reset("alignment changed");
    }

    /// Sets the layout direction.
    pub fn set_layout_direction(&mut self, layout_direction: LayoutDirection) {
        self.settings.layout_direction = layout_direction;
        self.reset("layout direction changed");
    }

    /// Sets the settled rotation without animating. See [`rotate`](Self::rotate).
    pub fn set_rotation(&mut self, degrees: i32) -> Result<(), ZoomError> {
        self.rotate(degrees, false)
    }

    /// Enables or disables read mode.
    pub fn set_read_mode(&mut self, read_mode: Option<ReadMode>) -> Result<(), ZoomError> {
        if let Some(read_mode) = read_mode {
            read_mode
                .validate()
                .map_err(|err| reject("read mode", err))?;
        }
        self.settings.read_mode = read_mode;
        self.reset("read mode changed");
        Ok(())
    }

    /// Sets how medium and maximum scales are derived.
    pub fn set_scales_policy(&mut self, scales_policy: ScalesPolicy) -> Result<(), ZoomError> {
        self.settings.scales_policy = scales_policy
            .validate()
            .map_err(|err| reject("scales policy", err))?;
        self.reset("scales policy changed");
        Ok(())
    }

    /// Includes the maximum scale in [`switch_scale`](Self::switch_scale) cycling.
    pub fn set_three_step_scale(&mut self, three_step_scale: bool) {
        self.settings.three_step_scale = three_step_scale;
    }

    /// Enables or disables rubber-banding of gesture scale.
    pub fn set_rubber_band_scale(&mut self, rubber_band_scale: bool) {
        self.settings.rubber_band_scale = rubber_band_scale;
    }

    /// Sets the rubber band curve.
    pub fn set_rubber_band(&mut self, rubber_band: RubberBand) -> Result<(), ZoomError> {
        self.settings.rubber_band = rubber_band
            .validate()
            .map_err(|err| reject("rubber band", err))?;
        Ok(())
    }

    /// Limits offsets to the part of the base display rect inside the container.
    pub fn set_limit_offset_within_base_visible_rect(&mut self, limit: bool) {
        self.settings.limit_offset_within_base_visible_rect = limit;
        self.reset("offset limit changed");
    }

    /// Sets the whitespace allowed around zoomed content, as a multiple of the container size.
    pub fn set_container_whitespace_multiple(&mut self, multiple: f64) -> Result<(), ZoomError> {
        let policy = OffsetPolicy {
            container_whitespace_multiple: multiple,
            ..self.settings.offset_policy()
        };
        policy
            .validate()
            .map_err(|err| reject("container whitespace multiple", err))?;
        self.settings.container_whitespace_multiple = multiple;
        self.reset("container whitespace changed");
        Ok(())
    }

    /// Sets the explicit whitespace allowed around zoomed content.
    pub fn set_container_whitespace(&mut self, whitespace: Insets) -> Result<(), ZoomError> {
        self.settings.container_whitespace = whitespace
            .validate()
            .map_err(|err| reject("container whitespace", err))?;
        self.reset("container whitespace changed");
        Ok(())
    }

    /// Keeps the zoom when content is replaced by a same-aspect version.
    pub fn set_keep_transform_when_same_aspect_ratio_content_size_changed(&mut self, keep: bool) {
        self.settings
            .keep_transform_when_same_aspect_ratio_content_size_changed = keep;
    }

    /// Sets the timing of scale, offset and rotation animations.
    pub fn set_animation_spec(&mut self, animation_spec: AnimationSpec) {
        self.settings.animation_spec = animation_spec;
    }

    /// Sets the fling physics.
    pub fn set_fling_spec(&mut self, fling_spec: FlingSpec) -> Result<(), ZoomError> {
        self.settings.fling_spec = fling_spec
            .validate()
            .map_err(|err| reject("fling spec", err))?;
        Ok(())
    }

    // --- Reset ---------------------------------------------------------------

    fn current_params(&self) -> ResetParams {
        ResetParams {
            container_size: self.container_size,
            content_size: self.content_size,
            content_origin_size: self.content_origin_size,
            rotation: self.settings.rotation,
            fit_mode: self.settings.fit_mode,
            alignment: self.settings.alignment,
            layout_direction: self.settings.layout_direction,
            read_mode: self.settings.read_mode,
            scales_policy: self.settings.scales_policy,
            limit_offset_within_base_visible_rect: self
                .settings
                .limit_offset_within_base_visible_rect,
            container_whitespace_multiple: self.settings.container_whitespace_multiple,
            container_whitespace: self.settings.container_whitespace,
        }
    }

    fn is_user_transform_initial(&self) -> bool {
        let initial = self.initial.user_transform;
        self.user_transform.scale() == initial.scale()
            && self.user_transform.offset() == initial.offset()
    }

    /// Recomputes placement, scale bounds and the user transform from the
    /// current sizes and settings.
    ///
    /// Compares the new parameters with those of the previous reset and keeps
    /// as much of the user transform as the change allows. Setters call this
    /// themselves; `reason` only shows up in logs.
    pub fn reset(&mut self, reason: &str) {
        let params = self.current_params();
        let previous = self.reset_params;
        let strategy = match &previous {
            None => ResetStrategy::Full,
            Some(previous) => {
                let diff = params.diff(previous);
                let strategy = diff.strategy(
                    previous,
                    &params,
                    StrategyContext {
                        keep_transform_when_same_aspect_ratio_content_size_changed: self
                            .settings
                            .keep_transform_when_same_aspect_ratio_content_size_changed,
                        user_transform_is_initial: self.is_user_transform_initial(),
                    },
                );
                debug!(reason, ?diff, ?strategy, "zoom reset");
                strategy
            }
        };
        if strategy == ResetStrategy::NoOp {
            return;
        }
        if previous.is_none() {
            debug!(reason, ?strategy, "first zoom reset");
        }

        self.cancel_transform_animation();
        let initial = InitialZoom::calculate(&params);
        let placement = params.placement();
        let policy = params.offset_policy();
        let bounds = initial.scale_bounds();
        let last_user = self.user_transform;
        let user = match (strategy, previous.map(|previous| previous.placement())) {
            (ResetStrategy::RestoreVisibleCenter, Some(previous)) => {
                reconcile::restore_visible_center(
                    &previous,
                    &placement,
                    &last_user,
                    &bounds,
                    &policy,
                )
            }
            (ResetStrategy::RescaleForContentSize, Some(previous)) => {
                let rescaled =
                    reconcile::rescale_for_content_size(&previous, &placement, &last_user, &policy);
                reconcile::clamp_user_transform(&placement, &bounds, &policy, &rescaled)
            }
            (ResetStrategy::UpdateBounds, Some(_)) => {
                reconcile::clamp_user_transform(&placement, &bounds, &policy, &last_user)
            }
            _ => initial.user_transform,
        };
        if strategy == ResetStrategy::Full {
            self.last_centroid = None;
        }
        self.initial = initial;
        self.reset_params = Some(params);
        self.user_transform = user;
        self.refresh_animation_flags();
        self.notify();
    }

    // --- Gestures ------------------------------------------------------------

    /// Applies one frame of a multi-touch gesture.
    ///
    /// `zoom` multiplies the current scale about `centroid`, `pan` moves the
    /// content and `rotation` adds degrees to the displayed rotation until
    /// [`end_gesture`](Self::end_gesture) settles it. Scales outside the bounds
    /// are rubber-banded when enabled and clamped otherwise.
    pub fn gesture_transform(
        &mut self,
        centroid: Offset,
        pan: Offset,
        zoom: f64,
        rotation: f64,
    ) -> Result<(), ZoomError> {
        check_offset("gesture centroid", centroid)?;
        check_offset("gesture pan", pan)?;
        if !(zoom.is_finite() && zoom > 0.0) {
            return Err(reject("gesture zoom", ZoomError::InvalidZoomChange(zoom)));
        }
        if !rotation.is_finite() {
            return Err(reject(
                "gesture rotation",
                ZoomError::InvalidRotationChange(rotation),
            ));
        }

        self.cancel_transform_animation();
        let mut flags = ContinuousTransformType::empty();
        flags.set(ContinuousTransformType::GESTURE_SCALE, zoom != 1.0);
        flags.set(ContinuousTransformType::GESTURE_OFFSET, pan != Offset::ZERO);
        flags.set(ContinuousTransformType::GESTURE_ROTATE, rotation != 0.0);
        self.continuous |= flags;
        self.last_centroid = Some(centroid);

        let user = self.user_transform;
        let user_scale = if zoom == 1.0 {
            user.scale_x()
        } else {
            let bounds = self.scale_bounds();
            let current = self.base_scale() * user.scale_x();
            let target = if self.settings.rubber_band_scale {
                let band = self.settings.rubber_band;
                band.apply(
                    band.release(current, bounds.min, bounds.max) * zoom,
                    bounds.min,
                    bounds.max,
                )
            } else {
                bounds.clamp(current * zoom)
            };
            target / self.base_scale()
        };
        self.user_transform = self.anchored_user(&user, user_scale, centroid, pan);

        if rotation != 0.0 {
            self.cancel_rotation_animation();
            self.rotation_offset += rotation;
        }
        trace!(
            ?centroid,
            ?pan,
            zoom,
            rotation,
            user = ?self.user_transform,
            "gesture"
        );
        self.notify();
        Ok(())
    }

    /// Ends the current gesture.
    ///
    /// Gesture rotation snaps to the nearest quarter turn, which becomes the
    /// settled rotation, and the remainder animates away. A scale left outside
    /// the bounds by rubber-banding animates back.
    pub fn end_gesture(&mut self) {
        self.continuous.remove(ContinuousTransformType::GESTURE);
        if self.rotation_animation.is_none() && self.rotation_offset != 0.0 {
            let turn = Rotation::nearest(self.rotation_offset);
            let remaining = signed_degrees(self.rotation_offset - f64::from(turn));
            self.rotation_offset = remaining;
            if turn != Rotation::Deg0 {
                self.settings.rotation = self.settings.rotation.plus(turn);
                self.reset("rotation gesture settled");
            }
            self.start_rotation_animation(remaining);
        }
        if !self.rollback_scale_to_bounds(self.last_centroid) {
            self.notify();
        }
    }

    // --- Commands ------------------------------------------------------------

    /// Scales to the composed scale `target`, clamped into the scale bounds,
    /// keeping `centroid` (the container center by default) fixed.
    pub fn scale(
        &mut self,
        target: f64,
        centroid: Option<Offset>,
        animated: bool,
    ) -> Result<(), ZoomError> {
        let target = check_scale("scale", target)?;
        if let Some(centroid) = centroid {
            check_offset("scale centroid", centroid)?;
        }
        let target = self.scale_bounds().clamp(target);
        let centroid = centroid.unwrap_or_else(|| self.container_size.center());
        self.scale_about(target, centroid, animated);
        Ok(())
    }

    /// Moves the content so the render transform has offset `target`,
    /// clamped into the offset bounds.
    pub fn offset(&mut self, target: Offset, animated: bool) -> Result<(), ZoomError> {
        check_offset("offset", target)?;
        let user = self.user_transform;
        let user_offset = target - self.initial.base_transform.offset().scale_by(user.scale());
        let clamped = user_offset.clamp_to_rect(self.user_offset_bounds_at(user.scale_x()));
        self.apply_user(user.with_offset(clamped), animated);
        Ok(())
    }

    /// Changes the settled rotation to `degrees`, a multiple of 90.
    ///
    /// The change resets the engine. When `animated`, the displayed rotation
    /// turns from the old angle to the new one the short way round.
    pub fn rotate(&mut self, degrees: i32, animated: bool) -> Result<(), ZoomError> {
        let target = Rotation::from_degrees(degrees).map_err(|err| reject("rotation", err))?;
        let current = self.settings.rotation;
        if target == current {
            return Ok(());
        }
        let delta = signed_degrees(f64::from(target.degrees() - current.degrees()));
        self.cancel_rotation_animation();
        self.rotation_offset = if animated { -delta } else { 0.0 };
        self.settings.rotation = target;
        self.reset("rotation changed");
        if animated {
            self.start_rotation_animation(-delta);
        } else {
            self.refresh_animation_flags();
            self.notify();
        }
        Ok(())
    }

    /// Centers `content_point` (clamped to the content) in the container,
    /// at composed scale `target_scale` or the current scale.
    pub fn locate(
        &mut self,
        content_point: Offset,
        target_scale: Option<f64>,
        animated: bool,
    ) -> Result<(), ZoomError> {
        check_offset("locate point", content_point)?;
        let current = self.base_scale() * self.user_transform.scale_x();
        let target_scale = match target_scale {
            Some(scale) => check_scale("locate scale", scale)?,
            None => current,
        };
        let placement = self.placement();
        let user_scale = self.scale_bounds().clamp(target_scale) / self.base_scale();
        let anchor =
            placement.content_point_to_base_point(content_point.clamp_to_size(self.content_size));
        let offset = (self.container_size.center() - anchor.times(user_scale))
            .clamp_to_rect(self.user_offset_bounds_at(user_scale));
        self.apply_user(
            Transform::new(ScaleFactor::uniform(user_scale), offset),
            animated,
        );
        Ok(())
    }

    /// Moves to the next scale step, as for a double tap, and returns it.
    ///
    /// Steps are min and medium, plus max with three-step scaling. The zoom
    /// is anchored at `centroid`, the last gesture centroid or the container
    /// center, in that order. During an animation the step after the
    /// animation's target is chosen.
    pub fn switch_scale(
        &mut self,
        centroid: Option<Offset>,
        animated: bool,
    ) -> Result<f64, ZoomError> {
        if let Some(centroid) = centroid {
            check_offset("switch scale centroid", centroid)?;
        }
        let steps = self.scale_bounds().steps(self.settings.three_step_scale);
        let current = self.base_scale() * self.target_user_transform().scale_x();
        let next = calculate_next_step_scale(&steps, current, SWITCH_SCALE_RANGE_OF_ERROR);
        let centroid = centroid
            .or(self.last_centroid)
            .unwrap_or_else(|| self.container_size.center());
        self.scale_about(next, centroid, animated);
        Ok(next)
    }

    /// Starts a fling with `velocity` in pixels per second.
    ///
    /// Returns `false` when the fling would not move: the speed is below
    /// the stop velocity or no moving axis can scroll.
    pub fn fling(&mut self, velocity: Offset) -> Result<bool, ZoomError> {
        if !velocity.is_finite() {
            return Err(reject(
                "fling velocity",
                ZoomError::InvalidVelocity {
                    x: velocity.x,
                    y: velocity.y,
                },
            ));
        }
        self.cancel_transform_animation();
        let user = self.user_transform;
        let fling = Fling::new(user.offset(), velocity, self.settings.fling_spec);
        let duration = fling.duration();
        let bounds = self.user_offset_bounds_at(user.scale_x());
        let locked_x = velocity.x == 0.0 || bounds.width() <= 0.0;
        let locked_y = velocity.y == 0.0 || bounds.height() <= 0.0;
        if duration.is_zero() || (locked_x && locked_y) {
            self.refresh_animation_flags();
            self.notify();
            return Ok(false);
        }
        self.start_transform_animation(
            Motion::Fling {
                fling,
                locked_x,
                locked_y,
            },
            AnimationSpec {
                duration,
                easing: Easing::Linear,
            },
        );
        Ok(true)
    }

    /// Animates the scale back into the bounds if it is outside them.
    ///
    /// Returns `true` if an animation was started.
    pub fn rollback_scale(&mut self, centroid: Option<Offset>) -> Result<bool, ZoomError> {
        if let Some(centroid) = centroid {
            check_offset("rollback centroid", centroid)?;
        }
        Ok(self.rollback_scale_to_bounds(centroid))
    }

    fn rollback_scale_to_bounds(&mut self, centroid: Option<Offset>) -> bool {
        let bounds = self.scale_bounds();
        let current = self.base_scale() * self.user_transform.scale_x();
        let target = if current < bounds.min * (1.0 - ROLLBACK_TOLERANCE) {
            bounds.min
        } else if current > bounds.max * (1.0 + ROLLBACK_TOLERANCE) {
            bounds.max
        } else {
            return false;
        };
        let centroid = centroid.unwrap_or_else(|| self.container_size.center());
        debug!(current, target, "rolling back scale");
        self.scale_about(target, centroid, true);
        true
    }

    /// Stops every running animation where it is.
    ///
    /// The user transform keeps its last stepped value and the displayed
    /// rotation jumps to the settled rotation.
    pub fn stop_all_animation(&mut self) {
        self.cancel_transform_animation();
        self.cancel_rotation_animation();
        self.rotation_offset = 0.0;
        self.refresh_animation_flags();
        self.notify();
    }

    // --- Animation -----------------------------------------------------------

    /// Advances the animation behind `handle` to `elapsed` since its start.
    ///
    /// Hosts call this from their frame clock for every handle the driver
    /// was asked to start, until the status is done.
    pub fn step_animation(&mut self, handle: AnimationHandle, elapsed: Duration) -> AnimationStatus {
        if self
            .transform_animation
            .is_some_and(|animation| animation.handle == handle)
        {
            self.step_transform_animation(elapsed)
        } else if self
            .rotation_animation
            .is_some_and(|animation| animation.handle == handle)
        {
            self.step_rotation_animation(elapsed)
        } else {
            AnimationStatus::Stale
        }
    }

    /// Returns `true` while any animation or fling is running.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.transform_animation.is_some() || self.rotation_animation.is_some()
    }

    fn step_transform_animation(&mut self, elapsed: Duration) -> AnimationStatus {
        let Some(mut animation) = self.transform_animation.take() else {
            return AnimationStatus::Stale;
        };
        let done = match &mut animation.motion {
            Motion::Tween { from, to } => {
                let fraction = animation.spec.fraction(elapsed);
                if fraction >= 1.0 {
                    self.user_transform = *to;
                    true
                } else {
                    self.user_transform = from.lerp(to, animation.spec.eased_fraction(elapsed));
                    false
                }
            }
            Motion::Fling {
                fling,
                locked_x,
                locked_y,
            } => {
                let user = self.user_transform;
                let raw = fling.offset_at(elapsed.min(animation.spec.duration));
                let clamped = raw.clamp_to_rect(self.user_offset_bounds_at(user.scale_x()));
                let x = fling_axis(locked_x, user.offset_x(), raw.x, clamped.x);
                let y = fling_axis(locked_y, user.offset_y(), raw.y, clamped.y);
                self.user_transform = user.with_offset(Offset::new(x, y));
                (*locked_x && *locked_y) || elapsed >= animation.spec.duration
            }
        };
        trace!(
            handle = animation.handle.id(),
            ?elapsed,
            user = ?self.user_transform,
            "transform animation frame"
        );
        let status = if done {
            self.driver.finished(animation.handle);
            debug!(handle = animation.handle.id(), "transform animation finished");
            AnimationStatus::Finished
        } else {
            self.transform_animation = Some(animation);
            AnimationStatus::Running
        };
        self.refresh_animation_flags();
        self.notify();
        status
    }

    fn step_rotation_animation(&mut self, elapsed: Duration) -> AnimationStatus {
        let Some(animation) = self.rotation_animation.take() else {
            return AnimationStatus::Stale;
        };
        let fraction = animation.spec.fraction(elapsed);
        let status = if fraction >= 1.0 {
            self.rotation_offset = 0.0;
            self.driver.finished(animation.handle);
            debug!(handle = animation.handle.id(), "rotation animation finished");
            AnimationStatus::Finished
        } else {
            self.rotation_offset =
                animation.from_offset * (1.0 - animation.spec.eased_fraction(elapsed));
            self.rotation_animation = Some(animation);
            AnimationStatus::Running
        };
        trace!(?elapsed, rotation_offset = self.rotation_offset, "rotation animation frame");
        self.refresh_animation_flags();
        self.notify();
        status
    }

    fn next_handle(&mut self) -> AnimationHandle {
        self.next_handle += 1;
        AnimationHandle::new(self.next_handle)
    }

    fn apply_user(&mut self, target: Transform, animated: bool) {
        self.cancel_transform_animation();
        let spec = self.settings.animation_spec;
        if !animated || spec.duration.is_zero() || target == self.user_transform {
            self.user_transform = target;
            self.refresh_animation_flags();
            self.notify();
            return;
        }
        self.start_transform_animation(
            Motion::Tween {
                from: self.user_transform,
                to: target,
            },
            spec,
        );
    }

    fn start_transform_animation(&mut self, motion: Motion, spec: AnimationSpec) {
        self.cancel_transform_animation();
        let handle = self.next_handle();
        debug!(
            handle = handle.id(),
            duration = ?spec.duration,
            fling = matches!(motion, Motion::Fling { .. }),
            "transform animation started"
        );
        self.transform_animation = Some(TransformAnimation {
            handle,
            motion,
            spec,
        });
        self.driver.start(handle, AnimationGroup::Transform, &spec);
        self.refresh_animation_flags();
        self.notify();
    }

    fn cancel_transform_animation(&mut self) {
        if let Some(animation) = self.transform_animation.take() {
            debug!(handle = animation.handle.id(), "transform animation cancelled");
            self.driver.cancel(animation.handle);
        }
    }

    fn start_rotation_animation(&mut self, from_offset: f64) {
        self.cancel_rotation_animation();
        let spec = self.settings.animation_spec;
        if from_offset.abs() < ROTATION_SETTLE_TOLERANCE || spec.duration.is_zero() {
            self.rotation_offset = 0.0;
            self.refresh_animation_flags();
            self.notify();
            return;
        }
        let handle = self.next_handle();
        debug!(handle = handle.id(), from_offset, "rotation animation started");
        self.rotation_offset = from_offset;
        self.rotation_animation = Some(RotationAnimation {
            handle,
            from_offset,
            spec,
        });
        self.driver.start(handle, AnimationGroup::Rotation, &spec);
        self.refresh_animation_flags();
        self.notify();
    }

    fn cancel_rotation_animation(&mut self) {
        if let Some(animation) = self.rotation_animation.take() {
            debug!(handle = animation.handle.id(), "rotation animation cancelled");
            self.driver.cancel(animation.handle);
        }
    }

    fn refresh_animation_flags(&mut self) {
        let flinging = matches!(
            self.transform_animation,
            Some(TransformAnimation {
                motion: Motion::Fling { .. },
                ..
            })
        );
        let tweening = self.rotation_animation.is_some()
            || matches!(
                self.transform_animation,
                Some(TransformAnimation {
                    motion: Motion::Tween { .. },
                    ..
                })
            );
        self.continuous
            .set(ContinuousTransformType::FLING, flinging);
        self.continuous
            .set(ContinuousTransformType::ANIMATION, tweening);
    }

    fn notify(&mut self) {
        let emitted = (self.transform(), self.continuous);
        if self.emitted == Some(emitted) {
            return;
        }
        self.emitted = Some(emitted);
        if let Some(listener) = self.listener.as_mut() {
            listener(&emitted.0, emitted.1);
        }
    }

    // --- Helpers -------------------------------------------------------------

    fn placement(&self) -> Placement {
        self.current_params().placement()
    }

    fn base_scale(&self) -> f64 {
        self.initial.base_transform.scale_x()
    }

    fn user_offset_bounds_at(&self, user_scale: f64) -> Rect {
        self.settings
            .offset_policy()
            .user_offset_bounds(&self.placement(), user_scale)
    }

    /// The user transform a running tween ends at, or the current one.
    fn target_user_transform(&self) -> Transform {
        match self.transform_animation {
            Some(TransformAnimation {
                motion: Motion::Tween { to, .. },
                ..
            }) => to,
            _ => self.user_transform,
        }
    }

    /// Rescales `user` to `user_scale` keeping the content under `centroid`
    /// fixed, then pans by `pan` and clamps the offset.
    fn anchored_user(
        &self,
        user: &Transform,
        user_scale: f64,
        centroid: Offset,
        pan: Offset,
    ) -> Transform {
        let anchor = (centroid - user.offset()).divide_by(user.scale());
        let offset = centroid - anchor.times(user_scale) + pan;
        let offset = offset.clamp_to_rect(self.user_offset_bounds_at(user_scale));
        Transform::new(ScaleFactor::uniform(user_scale), offset)
    }

    fn scale_about(&mut self, final_scale: f64, centroid: Offset, animated: bool) {
        let user = self.user_transform;
        let target = self.anchored_user(&user, final_scale / self.base_scale(), centroid, Offset::ZERO);
        self.apply_user(target, animated);
    }

    // --- Queries -------------------------------------------------------------

    /// Maps a point in container coordinates to unrotated content coordinates.
    ///
    /// The result is not clamped to the content.
    #[must_use]
    pub fn touch_point_to_content_point(&self, point: Offset) -> Offset {
        self.placement()
            .container_point_to_content_point(&self.user_transform, point)
    }

    /// Maps a content point to container coordinates.
    #[must_use]
    pub fn content_point_to_touch_point(&self, point: Offset) -> Offset {
        self.placement()
            .content_point_to_container_point(&self.user_transform, point)
    }

    /// Which content edges are reached on each axis.
    #[must_use]
    pub fn scroll_edge(&self) -> ScrollEdges {
        ScrollEdges::new(self.user_transform.offset(), self.user_offset_bounds())
    }

    /// Returns `true` if a scroll in `direction` along `axis` would move the content.
    #[must_use]
    pub fn can_scroll(&self, axis: Axis, direction: ScrollDirection) -> bool {
        self.scroll_edge().can_scroll(axis, direction)
    }

    /// The render transform: base composed with user, plus any unsettled rotation.
    #[must_use]
    pub fn transform(&self) -> Transform {
        let composed = self.initial.base_transform.compose(&self.user_transform);
        if self.rotation_offset == 0.0 {
            composed
        } else {
            composed.with_rotation(composed.rotation() + self.rotation_offset)
        }
    }

    /// The user transform.
    #[must_use]
    pub fn user_transform(&self) -> Transform {
        self.user_transform
    }

    /// The base placement transform.
    #[must_use]
    pub fn base_transform(&self) -> Transform {
        self.initial.base_transform
    }

    /// Current scale bounds in composed scale units.
    #[must_use]
    pub fn scale_bounds(&self) -> ScaleBounds {
        self.initial.scale_bounds()
    }

    /// Smallest settled composed scale.
    #[must_use]
    pub fn min_scale(&self) -> f64 {
        self.initial.min_scale
    }

    /// Double-tap composed scale.
    #[must_use]
    pub fn medium_scale(&self) -> f64 {
        self.initial.medium_scale
    }

    /// Largest settled composed scale.
    #[must_use]
    pub fn max_scale(&self) -> f64 {
        self.initial.max_scale
    }

    /// Where the content lands at the base transform.
    #[must_use]
    pub fn content_base_display_rect(&self) -> Rect {
        self.placement().base_display_rect()
    }

    /// Content region visible at the base transform.
    #[must_use]
    pub fn content_base_visible_rect(&self) -> Rect {
        self.placement().base_visible_rect()
    }

    /// Where the content lands under the current user transform.
    #[must_use]
    pub fn content_display_rect(&self) -> Rect {
        self.placement().display_rect(&self.user_transform)
    }

    /// Content region visible under the current user transform.
    #[must_use]
    pub fn content_visible_rect(&self) -> Rect {
        self.placement().visible_rect(&self.user_transform)
    }

    /// Legal range of the user offset at the current scale.
    #[must_use]
    pub fn user_offset_bounds(&self) -> Rect {
        self.user_offset_bounds_at(self.user_transform.scale_x())
    }

    /// Kinds of continuous change in progress.
    #[must_use]
    pub fn continuous_transform_type(&self) -> ContinuousTransformType {
        self.continuous
    }

    /// Container size.
    #[must_use]
    pub fn container_size(&self) -> Size {
        self.container_size
    }

    /// Content size.
    #[must_use]
    pub fn content_size(&self) -> Size {
        self.content_size
    }

    /// Full-resolution content size, [`Size::ZERO`] when unknown.
    #[must_use]
    pub fn content_origin_size(&self) -> Size {
        self.content_origin_size
    }

    /// Settled rotation.
    #[must_use]
    pub fn rotation(&self) -> Rotation {
        self.settings.rotation
    }
}

impl Zoomable<ManualDriver> {
    /// Advances every animation requested from the [`ManualDriver`] by `delta`.
    ///
    /// Returns `true` while any of them still needs frames.
    pub fn advance_animations(&mut self, delta: Duration) -> bool {
        let mut running = false;
        for (handle, elapsed) in self.driver.advance(delta) {
            running |= !self.step_animation(handle, elapsed).is_done();
        }
        running
    }
}

fn reject(what: &'static str, err: impl Into<ZoomError>) -> ZoomError {
    let err = err.into();
    debug!(what, %err, "rejected input");
    err
}

fn check_scale(what: &'static str, scale: f64) -> Result<f64, ZoomError> {
    if scale.is_finite() && scale > 0.0 {
        Ok(scale)
    } else {
        Err(reject(what, ZoomError::InvalidScale(scale)))
    }
}

fn check_offset(what: &'static str, offset: Offset) -> Result<Offset, ZoomError> {
    if offset.is_finite() {
        Ok(offset)
    } else {
        Err(reject(
            what,
            ZoomError::InvalidOffset {
                x: offset.x,
                y: offset.y,
            },
        ))
    }
}

/// One axis of a fling frame. An axis locks once it hits its bound.
fn fling_axis(locked: &mut bool, current: f64, raw: f64, clamped: f64) -> f64 {
    if *locked {
        return current;
    }
    if clamped != raw {
        *locked = true;
    }
    clamped
}

/// Normalizes degrees into `[-180, 180)`.
fn signed_degrees(degrees: f64) -> f64 {
    (degrees + 180.0).rem_euclid(360.0) - 180.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounds::ScrollEdge;
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    const CONTAINER: Size = Size::new(1080.0, 1656.0);
    const CONTENT: Size = Size::new(551.0, 1038.0);
    const FRAME: Duration = Duration::from_millis(16);

    fn zoomable() -> Zoomable {
        let mut zoomable = Zoomable::new(ManualDriver::new());
        zoomable.set_container_size(CONTAINER).unwrap();
        zoomable.set_content_size(CONTENT).unwrap();
        zoomable
    }

    fn composed_scale(zoomable: &Zoomable) -> f64 {
        zoomable.transform().scale_x()
    }

    fn run_animations(zoomable: &mut Zoomable) {
        for _ in 0..2000 {
            if zoomable.driver().is_idle() {
                return;
            }
            zoomable.advance_animations(FRAME);
        }
        panic!("animations did not finish");
    }

    fn assert_close(a: Offset, b: Offset, tolerance: f64) {
        assert!(
            (a.x - b.x).abs() < tolerance && (a.y - b.y).abs() < tolerance,
            "{a:?} != {b:?}"
        );
    }

    #[test]
    fn opens_at_the_fitted_placement() {
        let zoomable = zoomable();
        assert_eq!(
            zoomable.content_base_display_rect(),
            Rect::new(101.0, 0.0, 980.0, 1656.0)
        );
        assert_eq!(zoomable.user_transform(), Transform::IDENTITY);
        assert_eq!(zoomable.transform(), zoomable.base_transform());
        let fit = 1656.0 / 1038.0;
        assert!((zoomable.min_scale() - fit).abs() < 1e-12);
        assert!((zoomable.medium_scale() - 3.0 * fit).abs() < 1e-12);
        assert!((zoomable.max_scale() - 9.0 * fit).abs() < 1e-12);
    }

    #[test]
    fn container_changes_keep_the_centered_content_point() {
        let mut zoomable = zoomable();
        let point = Offset::new(200.0, 400.0);
        let medium = zoomable.medium_scale();
        zoomable.locate(point, Some(medium), false).unwrap();
        assert_close(
            zoomable.touch_point_to_content_point(CONTAINER.center()),
            point,
            1e-6,
        );
        for size in [
            Size::new(1656.0, 1080.0),
            Size::new(800.0, 800.0),
            Size::new(1200.0, 2000.0),
            Size::new(500.0, 900.0),
        ] {
            zoomable.set_container_size(size).unwrap();
            assert_close(
                zoomable.touch_point_to_content_point(size.center()),
                point,
                1.0,
            );
            assert!((composed_scale(&zoomable) - medium).abs() < 1e-9, "{size:?}");
        }
    }

    #[test]
    fn shrinking_origin_size_pulls_the_scale_into_the_new_bounds() {
        let mut zoomable = zoomable();
        zoomable
            .set_content_origin_size(Size::new(5510.0, 10380.0))
            .unwrap();
        let old_max = zoomable.max_scale();
        assert!((old_max - 30.0).abs() < 1e-9, "{old_max}");
        zoomable.scale(old_max, None, false).unwrap();
        let centered = zoomable.touch_point_to_content_point(CONTAINER.center());

        zoomable.set_content_origin_size(Size::ZERO).unwrap();
        let max = zoomable.max_scale();
        assert!((max - 9.0 * 1656.0 / 1038.0).abs() < 1e-9, "{max}");
        let scale = composed_scale(&zoomable);
        assert!(scale <= max * (1.0 + 1e-12), "{scale} > {max}");
        assert!((scale - max).abs() < 1e-9 * max, "{scale}");
        assert!(!zoomable.is_animating());
        assert_close(
            zoomable.touch_point_to_content_point(CONTAINER.center()),
            centered,
            1e-6,
        );
    }

    #[test]
    fn extreme_sizes_keep_the_transform_finite() {
        let huge = Size::new(1e200, 1e200);
        let tiny = Size::new(1e-200, 1e-200);
        for (container, content) in [(huge, tiny), (tiny, huge)] {
            let mut zoomable = Zoomable::new(ManualDriver::new());
            zoomable.set_container_size(container).unwrap();
            zoomable.set_content_size(content).unwrap();
            let bounds = zoomable.scale_bounds();
            assert!(bounds.min > 0.0 && bounds.max.is_finite(), "{bounds:?}");
            let transform = zoomable.transform();
            assert!(transform.scale().is_valid(), "{transform:?}");
            assert!(transform.offset().is_finite(), "{transform:?}");

            zoomable.switch_scale(None, false).unwrap();
            let transform = zoomable.transform();
            assert!(transform.scale().is_valid(), "{transform:?}");
            assert!(transform.offset().is_finite(), "{transform:?}");
        }
    }

    #[test]
    fn same_aspect_content_swap_keeps_the_visible_region() {
        let mut zoomable = zoomable();
        let medium = zoomable.medium_scale();
        zoomable
            .locate(Offset::new(200.0, 400.0), Some(medium), false)
            .unwrap();
        let before = zoomable.content_visible_rect();
        zoomable
            .set_content_size(Size::new(551.0 * 2.0, 1038.0 * 2.0))
            .unwrap();
        let after = zoomable.content_visible_rect();
        for (a, b) in [
            (after.left, before.left),
            (after.top, before.top),
            (after.right, before.right),
            (after.bottom, before.bottom),
        ] {
            assert!((a - 2.0 * b).abs() < 1e-6, "{after:?} vs {before:?}");
        }
    }

    #[test]
    fn aspect_change_resets_to_the_new_base() {
        let mut zoomable = zoomable();
        let medium = zoomable.medium_scale();
        zoomable
            .locate(Offset::new(200.0, 400.0), Some(medium), false)
            .unwrap();
        zoomable.set_content_size(Size::new(1038.0, 551.0)).unwrap();
        assert_eq!(zoomable.user_transform(), Transform::IDENTITY);
        assert_eq!(
            zoomable.content_visible_rect(),
            zoomable.content_base_visible_rect()
        );
    }

    #[test]
    fn gesture_overshoot_is_banded_then_rolled_back() {
        let mut zoomable = zoomable();
        let max = zoomable.max_scale();
        zoomable
            .gesture_transform(CONTAINER.center(), Offset::ZERO, 20.0, 0.0)
            .unwrap();
        let overshoot = composed_scale(&zoomable);
        assert!(overshoot > max && overshoot < max * 1.5, "{overshoot}");
        assert!(
            zoomable
                .continuous_transform_type()
                .contains(ContinuousTransformType::GESTURE_SCALE)
        );

        zoomable.end_gesture();
        assert_eq!(
            zoomable.continuous_transform_type(),
            ContinuousTransformType::ANIMATION
        );
        run_animations(&mut zoomable);
        assert!((composed_scale(&zoomable) - max).abs() < 1e-9 * max);
        assert!(zoomable.continuous_transform_type().is_empty());
    }

    #[test]
    fn gesture_undershoot_rolls_back_to_min() {
        let mut zoomable = zoomable();
        let min = zoomable.min_scale();
        zoomable
            .gesture_transform(CONTAINER.center(), Offset::ZERO, 0.2, 0.0)
            .unwrap();
        let undershoot = composed_scale(&zoomable);
        assert!(undershoot < min && undershoot > min / 1.5, "{undershoot}");
        zoomable.end_gesture();
        run_animations(&mut zoomable);
        assert!((composed_scale(&zoomable) - min).abs() < 1e-9 * min);
    }

    #[test]
    fn without_rubber_band_gestures_clamp() {
        let mut zoomable = zoomable();
        zoomable.set_rubber_band_scale(false);
        let max = zoomable.max_scale();
        zoomable
            .gesture_transform(CONTAINER.center(), Offset::ZERO, 20.0, 0.0)
            .unwrap();
        assert!((composed_scale(&zoomable) - max).abs() < 1e-9 * max);
        zoomable.end_gesture();
        assert!(zoomable.driver().is_idle());
    }

    #[test]
    fn touch_mapping_inverts_in_a_rotated_zoomed_panned_state() {
        let mut zoomable = zoomable();
        zoomable.rotate(90, false).unwrap();
        let medium = zoomable.medium_scale();
        zoomable
            .locate(Offset::new(100.0, 700.0), Some(medium), false)
            .unwrap();
        zoomable
            .gesture_transform(CONTAINER.center(), Offset::new(30.0, -20.0), 1.0, 0.0)
            .unwrap();
        zoomable.end_gesture();
        let transform = zoomable.transform();
        for point in [
            Offset::ZERO,
            Offset::new(100.0, 700.0),
            Offset::new(551.0, 1038.0),
            Offset::new(320.5, 12.25),
        ] {
            let touch = zoomable.content_point_to_touch_point(point);
            assert_close(transform.map_point(point, CONTAINER), touch, 1e-6);
            assert_close(zoomable.touch_point_to_content_point(touch), point, 1e-9);
        }
    }

    #[test]
    fn scroll_edges_follow_the_offset() {
        let mut zoomable = zoomable();
        let edges = zoomable.scroll_edge();
        assert_eq!(edges.horizontal, ScrollEdge::Both);
        assert_eq!(edges.vertical, ScrollEdge::Both);
        assert!(!zoomable.can_scroll(Axis::Horizontal, ScrollDirection::Forward));

        let medium = zoomable.medium_scale();
        zoomable.scale(medium, None, false).unwrap();
        zoomable
            .gesture_transform(
                CONTAINER.center(),
                Offset::new(10_000.0, 10_000.0),
                1.0,
                0.0,
            )
            .unwrap();
        let edges = zoomable.scroll_edge();
        assert_eq!(edges.horizontal, ScrollEdge::Start);
        assert_eq!(edges.vertical, ScrollEdge::Start);
        assert!(!zoomable.can_scroll(Axis::Vertical, ScrollDirection::Backward));
        assert!(zoomable.can_scroll(Axis::Vertical, ScrollDirection::Forward));
    }

    #[test]
    fn fling_travels_the_decay_distance() {
        let mut zoomable = zoomable();
        let medium = zoomable.medium_scale();
        zoomable
            .locate(Offset::new(275.5, 519.0), Some(medium), false)
            .unwrap();
        let start = zoomable.user_transform().offset();
        assert!(zoomable.fling(Offset::new(-1000.0, 0.0)).unwrap());
        assert!(
            zoomable
                .continuous_transform_type()
                .contains(ContinuousTransformType::FLING)
        );
        run_animations(&mut zoomable);
        let end = zoomable.user_transform().offset();
        let expected = start.x - 1000.0 / 4.2 * (1.0 - 50.0 / 1000.0);
        assert!((end.x - expected).abs() < 1e-3, "{} vs {expected}", end.x);
        assert_eq!(end.y, start.y);
        assert!(zoomable.continuous_transform_type().is_empty());
    }

    #[test]
    fn fling_stops_at_the_bound() {
        let mut zoomable = zoomable();
        let medium = zoomable.medium_scale();
        zoomable
            .locate(Offset::new(275.5, 519.0), Some(medium), false)
            .unwrap();
        assert!(zoomable.fling(Offset::new(-20_000.0, 0.0)).unwrap());
        run_animations(&mut zoomable);
        let bounds = zoomable.user_offset_bounds();
        assert_eq!(zoomable.user_transform().offset_x(), bounds.left);
        assert_eq!(zoomable.scroll_edge().horizontal, ScrollEdge::End);
    }

    #[test]
    fn fling_without_room_does_not_start() {
        let mut zoomable = zoomable();
        assert!(!zoomable.fling(Offset::new(3000.0, 3000.0)).unwrap());
        assert!(zoomable.driver().is_idle());
        let medium = zoomable.medium_scale();
        zoomable.scale(medium, None, false).unwrap();
        assert!(!zoomable.fling(Offset::new(10.0, 0.0)).unwrap());
    }

    #[test]
    fn animated_scale_reaches_its_target() {
        let mut zoomable = zoomable();
        let max = zoomable.max_scale();
        let min = zoomable.min_scale();
        zoomable.scale(max, None, true).unwrap();
        assert_eq!(composed_scale(&zoomable), min);
        assert!(zoomable.is_animating());
        assert!(zoomable.advance_animations(Duration::from_millis(100)));
        let halfway = composed_scale(&zoomable);
        assert!(halfway > min && halfway < max, "{halfway}");
        let eased = AnimationSpec::default().eased_fraction(Duration::from_millis(100));
        assert!(
            (halfway - (min + (max - min) * eased)).abs() < 1e-9 * max,
            "{halfway} at {eased}"
        );
        assert!(!zoomable.advance_animations(Duration::from_millis(300)));
        assert!((composed_scale(&zoomable) - max).abs() < 1e-9 * max);
        assert!(!zoomable.is_animating());
        assert!(zoomable.driver().is_idle());
    }

    #[test]
    fn stale_handles_are_ignored() {
        let mut zoomable = zoomable();
        let max = zoomable.max_scale();
        zoomable.scale(max, None, true).unwrap();
        let handle = zoomable.driver().requests()[0].handle;
        zoomable.stop_all_animation();
        assert!(zoomable.driver().is_idle());
        let before = zoomable.transform();
        assert_eq!(
            zoomable.step_animation(handle, Duration::from_secs(1)),
            AnimationStatus::Stale
        );
        assert_eq!(zoomable.transform(), before);
    }

    #[test]
    fn listener_sees_each_change_once() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut zoomable = Zoomable::new(ManualDriver::new());
        let sink = Rc::clone(&events);
        zoomable.set_listener(move |transform, flags| {
            sink.borrow_mut().push((*transform, flags));
        });
        zoomable.set_container_size(CONTAINER).unwrap();
        assert_eq!(events.borrow().len(), 1);
        zoomable.set_content_size(CONTENT).unwrap();
        assert_eq!(events.borrow().len(), 2);
        zoomable.set_content_size(CONTENT).unwrap();
        assert_eq!(events.borrow().len(), 2);

        zoomable
            .gesture_transform(CONTAINER.center(), Offset::ZERO, 2.0, 0.0)
            .unwrap();
        assert_eq!(events.borrow().len(), 3);
        assert_eq!(
            events.borrow()[2].1,
            ContinuousTransformType::GESTURE_SCALE
        );
        zoomable.end_gesture();
        assert_eq!(events.borrow().len(), 4);
        assert!(events.borrow()[3].1.is_empty());

        zoomable.set_three_step_scale(true);
        assert_eq!(events.borrow().len(), 4);
        for (transform, _) in events.borrow().iter() {
            assert!(transform.scale_x().is_finite() && transform.offset().is_finite());
        }
    }

    #[test]
    fn invalid_input_leaves_state_unchanged() {
        let mut zoomable = zoomable();
        let medium = zoomable.medium_scale();
        zoomable
            .locate(Offset::new(200.0, 400.0), Some(medium), false)
            .unwrap();
        let before = zoomable.transform();
        let settings = *zoomable.settings();

        assert!(
            zoomable
                .set_container_size(Size::new(-1.0, 5.0))
                .is_err()
        );
        assert!(
            zoomable
                .set_content_size(Size::new(f64::NAN, 5.0))
                .is_err()
        );
        assert!(matches!(
            zoomable.scale(f64::NAN, None, false),
            Err(ZoomError::InvalidScale(_))
        ));
        assert!(zoomable.scale(-2.0, None, true).is_err());
        assert!(zoomable.rotate(45, true).is_err());
        assert!(
            zoomable
                .gesture_transform(CONTAINER.center(), Offset::ZERO, 0.0, 0.0)
                .is_err()
        );
        assert!(
            zoomable
                .gesture_transform(CONTAINER.center(), Offset::ZERO, 1.0, f64::INFINITY)
                .is_err()
        );
        assert!(zoomable.offset(Offset::UNSPECIFIED, false).is_err());
        assert!(
            zoomable
                .fling(Offset::new(f64::INFINITY, 0.0))
                .is_err()
        );
        assert!(zoomable.set_container_whitespace_multiple(-1.0).is_err());
        assert!(
            zoomable
                .set_scales_policy(ScalesPolicy::Fixed { multiple: 0.0 })
                .is_err()
        );

        assert_eq!(zoomable.transform(), before);
        assert_eq!(*zoomable.settings(), settings);
        assert_eq!(zoomable.container_size(), CONTAINER);
        assert_eq!(zoomable.content_size(), CONTENT);
        assert!(zoomable.continuous_transform_type().is_empty());
    }

    #[test]
    fn switch_scale_cycles_through_the_steps() {
        let mut zoomable = zoomable();
        let (min, medium, max) = (
            zoomable.min_scale(),
            zoomable.medium_scale(),
            zoomable.max_scale(),
        );
        assert_eq!(zoomable.switch_scale(None, false).unwrap(), medium);
        assert!((composed_scale(&zoomable) - medium).abs() < 1e-9);
        assert_eq!(zoomable.switch_scale(None, false).unwrap(), min);
        assert!((composed_scale(&zoomable) - min).abs() < 1e-9);

        zoomable.set_three_step_scale(true);
        let visited: Vec<f64> = (0..3)
            .map(|_| zoomable.switch_scale(None, false).unwrap())
            .collect();
        assert_eq!(visited, [medium, max, min]);
    }

    #[test]
    fn switch_scale_during_an_animation_targets_the_following_step() {
        let mut zoomable = zoomable();
        zoomable.set_three_step_scale(true);
        let medium = zoomable.medium_scale();
        let max = zoomable.max_scale();
        assert_eq!(zoomable.switch_scale(None, true).unwrap(), medium);
        zoomable.advance_animations(FRAME);
        assert_eq!(zoomable.switch_scale(None, true).unwrap(), max);
    }

    #[test]
    fn offset_is_clamped_into_bounds() {
        let mut zoomable = zoomable();
        let medium = zoomable.medium_scale();
        zoomable.scale(medium, None, false).unwrap();
        zoomable.offset(Offset::new(1e6, -1e6), false).unwrap();
        let bounds = zoomable.user_offset_bounds();
        let user = zoomable.user_transform().offset();
        assert_eq!(user, Offset::new(bounds.right, bounds.top));
    }

    #[test]
    fn read_mode_opens_long_content_at_its_start() {
        let settings = ZoomSettings {
            read_mode: Some(ReadMode::default()),
            ..ZoomSettings::default()
        };
        let mut zoomable = Zoomable::with_settings(settings, ManualDriver::new()).unwrap();
        zoomable.set_container_size(CONTAINER).unwrap();
        zoomable.set_content_size(Size::new(1000.0, 10_000.0)).unwrap();
        assert!((composed_scale(&zoomable) - 1.08).abs() < 1e-9);
        let visible = zoomable.content_visible_rect();
        assert!(visible.left.abs() < 1e-6 && visible.top.abs() < 1e-6, "{visible:?}");
        assert!(zoomable.medium_scale() >= 1.08);
    }

    #[test]
    fn rotate_replaces_the_placement() {
        let mut zoomable = zoomable();
        zoomable.rotate(90, false).unwrap();
        assert_eq!(zoomable.rotation(), Rotation::Deg90);
        assert_eq!(
            zoomable.content_base_display_rect(),
            Rect::new(0.0, 542.0, 1080.0, 1115.0)
        );
        assert_eq!(zoomable.transform().rotation(), 90.0);

        zoomable.rotate(180, true).unwrap();
        assert_eq!(zoomable.rotation(), Rotation::Deg180);
        assert!((zoomable.transform().rotation() - 90.0).abs() < 1e-9);
        assert!(
            zoomable
                .continuous_transform_type()
                .contains(ContinuousTransformType::ANIMATION)
        );
        run_animations(&mut zoomable);
        assert_eq!(zoomable.transform().rotation(), 180.0);
        assert!(zoomable.continuous_transform_type().is_empty());
    }

    #[test]
    fn gesture_rotation_settles_to_a_quarter_turn() {
        let mut zoomable = zoomable();
        zoomable
            .gesture_transform(CONTAINER.center(), Offset::ZERO, 1.0, 70.0)
            .unwrap();
        assert!((zoomable.transform().rotation() - 70.0).abs() < 1e-9);
        zoomable.end_gesture();
        assert_eq!(zoomable.rotation(), Rotation::Deg90);
        assert!((zoomable.transform().rotation() - 70.0).abs() < 1e-9);
        run_animations(&mut zoomable);
        assert_eq!(zoomable.transform().rotation(), 90.0);
    }

    #[test]
    fn empty_content_degrades_to_identity() {
        let mut zoomable = Zoomable::new(ManualDriver::new());
        zoomable.set_container_size(CONTAINER).unwrap();
        assert_eq!(zoomable.transform(), Transform::IDENTITY);
        assert_eq!(zoomable.scale_bounds(), ScaleBounds::ONE);
        zoomable
            .gesture_transform(CONTAINER.center(), Offset::new(5.0, 5.0), 2.0, 0.0)
            .unwrap();
        assert!(zoomable.transform().offset().is_finite());
        zoomable.end_gesture();
        run_animations(&mut zoomable);
        assert_eq!(zoomable.user_offset_bounds(), Rect::ZERO);
    }
}
