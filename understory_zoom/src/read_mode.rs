// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Read mode: open long content zoomed to fill the container, starting at its leading edge.

use understory_zoom_geometry::{Size, Transform};

use crate::placement::Placement;
use crate::{Alignment, FitMode, HorizontalAlignment, VerticalAlignment, ZoomError};

bitflags::bitflags! {
    /// Content orientations that may enter read mode.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ReadModeSizeType: u8 {
        /// Content wider than tall.
        const HORIZONTAL = 1 << 0;
        /// Content taller than wide, or square.
        const VERTICAL = 1 << 1;
    }
}

impl Default for ReadModeSizeType {
    fn default() -> Self {
        Self::all()
    }
}

/// Decides whether content is long enough to be read rather than fitted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ReadModeDecider {
    /// Accept content whose aspect ratio differs from the container's by a multiple.
    LongImage {
        /// Required ratio when content and container are oriented the same way.
        same_direction_multiple: f64,
        /// Required ratio when they are oriented differently.
        not_same_direction_multiple: f64,
    },
    /// Accept all content.
    Always,
    /// Reject all content.
    Never,
}

impl Default for ReadModeDecider {
    fn default() -> Self {
        Self::LONG_IMAGE
    }
}

impl ReadModeDecider {
    /// [`ReadModeDecider::LongImage`] with multiples 2.5 and 5.0.
    pub const LONG_IMAGE: Self = Self::LongImage {
        same_direction_multiple: 2.5,
        not_same_direction_multiple: 5.0,
    };

    /// Returns `true` if `content` (already rotated) should be read inside `container`.
    #[must_use]
    pub fn should(self, content: Size, container: Size) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::LongImage {
                same_direction_multiple,
                not_same_direction_multiple,
            } => {
                let content_ratio = content.aspect_ratio();
                let container_ratio = container.aspect_ratio();
                if content_ratio <= 0.0 || container_ratio <= 0.0 {
                    return false;
                }
                let same_direction = content_ratio == 1.0
                    || container_ratio == 1.0
                    || (content_ratio > 1.0) == (container_ratio > 1.0);
                let multiple = if same_direction {
                    same_direction_multiple
                } else {
                    not_same_direction_multiple
                };
                content_ratio.max(container_ratio) / content_ratio.min(container_ratio)
                    >= multiple
            }
        }
    }
}

/// Read-mode configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ReadMode {
    /// Orientations that qualify.
    pub size_type: ReadModeSizeType,
    /// Length test applied to qualifying content.
    pub decider: ReadModeDecider,
}

impl ReadMode {
    /// Creates a read mode from its parts.
    #[must_use]
    pub const fn new(size_type: ReadModeSizeType, decider: ReadModeDecider) -> Self {
        Self { size_type, decider }
    }

    /// Rejects non-finite or non-positive multiples.
    pub fn validate(self) -> Result<Self, ZoomError> {
        if let ReadModeDecider::LongImage {
            same_direction_multiple,
            not_same_direction_multiple,
        } = self.decider
        {
            for multiple in [same_direction_multiple, not_same_direction_multiple] {
                if !multiple.is_finite() || multiple <= 0.0 {
                    return Err(ZoomError::InvalidReadModeMultiple(multiple));
                }
            }
        }
        Ok(self)
    }

    /// Returns `true` if `content` (already rotated) is read inside `container`.
    #[must_use]
    pub fn accept(&self, content: Size, container: Size) -> bool {
        if content.is_empty() || container.is_empty() {
            return false;
        }
        let orientation = if content.width > content.height {
            ReadModeSizeType::HORIZONTAL
        } else {
            ReadModeSizeType::VERTICAL
        };
        self.size_type.contains(orientation) && self.decider.should(content, container)
    }

    /// Returns the user transform that shows `placement` in read mode, if it applies.
    ///
    /// The content is zoomed to the crop scale and the overflowing axis starts
    /// at its leading edge, or its trailing edge for `End`/`Bottom` alignment.
    #[must_use]
    pub fn user_transform(&self, placement: &Placement) -> Option<Transform> {
        if placement.is_empty()
            || placement.fit_mode == FitMode::FillBounds
            || !self.accept(placement.rotated_content_size(), placement.container_size)
        {
            return None;
        }
        let read_alignment = Alignment::new(
            match placement.alignment.horizontal {
                HorizontalAlignment::End => HorizontalAlignment::End,
                _ => HorizontalAlignment::Start,
            },
            match placement.alignment.vertical {
                VerticalAlignment::Bottom => VerticalAlignment::Bottom,
                _ => VerticalAlignment::Top,
            },
        );
        let read = placement
            .with_fit_mode(FitMode::Crop)
            .with_alignment(read_alignment)
            .base_transform();
        let user = read.decompose(&placement.base_transform());
        Some(Transform::new(user.scale(), user.offset()))
    }
}
