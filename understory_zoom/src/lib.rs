// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_zoom --heading-base-level=0

//! Understory Zoom: a headless pan, zoom and rotate engine for content viewers.
//!
//! Given a container (viewport) size, a content (image) size, a fit mode, an
//! alignment, a layout direction and a quarter-turn rotation, this crate
//! computes where the content is placed, which scales are legal, and keeps a
//! user transform that composes with the placement into the render transform.
//!
//! It is split in two layers:
//! - Pure functions: [`Placement`] for the base transform and its rectangles,
//!   [`ScaleBounds`] and [`ReadMode`] for scale stops, [`ResetParams`] for
//!   deciding what a change invalidates, [`reconcile`] for carrying a user
//!   transform across such changes, [`OffsetPolicy`] for pan limits.
//! - [`Zoomable`], the stateful engine that accepts gesture deltas and
//!   commands, rubber-bands and clamps them, and preserves what the user was
//!   looking at when sizes or settings change.
//!
//! It does **not** recognize gestures, own a clock, decode images or render.
//! Callers feed decoded gesture deltas (centroid, pan, zoom, rotation) into
//! [`Zoomable::gesture_transform`], drive animations through an
//! [`AnimationDriver`], and apply [`Zoomable::transform`] to their content.
//!
//! ## Placement
//!
//! ```rust
//! use understory_zoom::{Alignment, FitMode, Placement};
//! use understory_zoom::geometry::{Rect, Size};
//!
//! let placement = Placement::new(Size::new(1080.0, 1656.0), Size::new(551.0, 1038.0))
//!     .with_fit_mode(FitMode::Fit)
//!     .with_alignment(Alignment::CENTER);
//! assert_eq!(placement.base_display_rect(), Rect::new(101.0, 0.0, 980.0, 1656.0));
//! ```
//!
//! ## Driving the engine
//!
//! ```rust
//! use core::time::Duration;
//! use understory_zoom::{ManualDriver, Zoomable};
//! use understory_zoom::geometry::{Offset, Size};
//!
//! let mut zoomable = Zoomable::new(ManualDriver::new());
//! zoomable.set_container_size(Size::new(1080.0, 1656.0)).unwrap();
//! zoomable.set_content_size(Size::new(551.0, 1038.0)).unwrap();
//!
//! // A pinch far past the maximum is rubber-banded...
//! let center = Offset::new(540.0, 828.0);
//! zoomable.gesture_transform(center, Offset::ZERO, 20.0, 0.0).unwrap();
//! assert!(zoomable.transform().scale_x() > zoomable.max_scale());
//!
//! // ...and animates back when the gesture ends.
//! zoomable.end_gesture();
//! while !zoomable.driver().is_idle() {
//!     zoomable.advance_animations(Duration::from_millis(16));
//! }
//! assert!((zoomable.transform().scale_x() - zoomable.max_scale()).abs() < 1e-9);
//! ```
//!
//! ## Logging
//!
//! The engine emits [`tracing`] events: `debug` for reset decisions,
//! animation lifecycles and rejected input, `trace` for gesture and frame
//! updates. It never installs a subscriber.
//!
//! This crate is `no_std` and uses `alloc`. Enable the `libm` feature when
//! building without `std`.

#![no_std]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

mod alignment;
mod animation;
mod bounds;
mod continuous;
mod error;
mod fit;
mod fling;
mod initial;
mod placement;
mod read_mode;
pub mod reconcile;
mod reset;
mod rubber_band;
mod scales;
mod settings;
mod zoomable;

pub use understory_zoom_geometry as geometry;

pub use alignment::{Alignment, HorizontalAlignment, LayoutDirection, VerticalAlignment};
pub use animation::{
    AnimationDriver, AnimationGroup, AnimationHandle, AnimationRequest, AnimationSpec,
    AnimationStatus, Easing, ManualDriver,
};
pub use bounds::{Axis, OffsetPolicy, ScrollDirection, ScrollEdge, ScrollEdges};
pub use continuous::ContinuousTransformType;
pub use error::ZoomError;
pub use fit::FitMode;
pub use fling::{Fling, FlingSpec};
pub use initial::InitialZoom;
pub use placement::Placement;
pub use read_mode::{ReadMode, ReadModeDecider, ReadModeSizeType};
pub use reset::{
    ResetParams, ResetParamsDiff, ResetStrategy, SAME_ASPECT_RATIO_DELTA, StrategyContext,
};
pub use rubber_band::RubberBand;
pub use scales::{DEFAULT_SCALE_MULTIPLE, ScaleBounds, ScalesPolicy, calculate_next_step_scale};
pub use settings::ZoomSettings;
pub use zoomable::{TransformListener, Zoomable};
