// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_zoom_geometry --heading-base-level=0

//! Understory Zoom Geometry: value types for zoomable content placement.
//!
//! This crate provides the small, immutable geometry vocabulary used by
//! `understory_zoom`:
//! - [`Size`], [`Offset`], [`Rect`] and [`Insets`] in container pixels.
//! - [`ScaleFactor`] with independent horizontal and vertical components.
//! - [`Rotation`], a closed set of quarter turns.
//! - [`TransformOrigin`], a pivot expressed as a fraction of the container.
//! - [`Transform`], a graphics-layer style transform (rotate about a pivot,
//!   scale about a pivot, then translate) with exact [`Transform::compose`]
//!   and [`Transform::decompose`].
//!
//! All types are plain `Copy` values. Arithmetic that is sensitive to order is
//! exposed as named methods rather than operators.
//!
//! ## Rotating within a space
//!
//! Quarter-turn rotations map a point inside a `width x height` space into the
//! rotated `height x width` space, and back again exactly:
//!
//! ```rust
//! use understory_zoom_geometry::{Offset, Rotation, Size};
//!
//! let space = Size::new(100.0, 50.0);
//! let point = Offset::new(10.0, 20.0);
//!
//! let rotated = point.rotate_in_space(space, Rotation::Deg90);
//! assert_eq!(rotated, Offset::new(30.0, 10.0));
//! assert_eq!(rotated.reverse_rotate_in_space(space, Rotation::Deg90), point);
//! ```
//!
//! ## Composing transforms
//!
//! ```rust
//! use understory_zoom_geometry::{Offset, ScaleFactor, Transform};
//!
//! let base = Transform::try_new(ScaleFactor::uniform(2.0), Offset::new(10.0, 0.0)).unwrap();
//! let user = Transform::try_new(ScaleFactor::uniform(3.0), Offset::new(-5.0, 4.0)).unwrap();
//!
//! let combined = base.compose(&user);
//! assert_eq!(combined.scale(), ScaleFactor::uniform(6.0));
//! assert_eq!(combined.offset(), Offset::new(25.0, 4.0));
//! assert_eq!(combined.decompose(&base), user);
//! ```
//!
//! Rect algebra and point mapping are computed with [Kurbo](kurbo). The value
//! types convert to and from Kurbo's geometry, and [`Transform::to_affine`]
//! produces the equivalent `kurbo::Affine` for rendering backends.
//!
//! This crate is `no_std`. Enable the `libm` feature when building without
//! `std`.

#![no_std]

#[cfg(feature = "std")]
extern crate std;

mod error;
mod insets;
mod kurbo_interop;
mod offset;
mod origin;
mod rect;
mod rotation;
mod scale;
mod size;
mod transform;

pub use error::GeometryError;
pub use insets::Insets;
pub use offset::Offset;
pub use origin::TransformOrigin;
pub use rect::Rect;
pub use rotation::Rotation;
pub use scale::ScaleFactor;
pub use size::Size;
pub use transform::Transform;
