// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

bitflags::bitflags! {
    /// Kinds of continuous transform change in progress.
    ///
    /// Consumers use these to suppress conflicting input, for example to
    /// defer tile loading while a gesture is scaling.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ContinuousTransformType: u8 {
        /// A gesture is changing the scale.
        const GESTURE_SCALE = 1 << 0;
        /// A gesture is panning.
        const GESTURE_OFFSET = 1 << 1;
        /// A gesture is rotating.
        const GESTURE_ROTATE = 1 << 2;
        /// A fling is running.
        const FLING = 1 << 3;
        /// A scale, offset or rotation animation is running.
        const ANIMATION = 1 << 4;
        /// Any gesture.
        const GESTURE = Self::GESTURE_SCALE.bits()
            | Self::GESTURE_OFFSET.bits()
            | Self::GESTURE_ROTATE.bits();
    }
}

impl Default for ContinuousTransformType {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gesture_covers_all_gesture_kinds() {
        let gesture = ContinuousTransformType::GESTURE;
        assert!(gesture.contains(ContinuousTransformType::GESTURE_SCALE));
        assert!(gesture.contains(ContinuousTransformType::GESTURE_OFFSET));
        assert!(gesture.contains(ContinuousTransformType::GESTURE_ROTATE));
        assert!(!gesture.intersects(
            ContinuousTransformType::FLING | ContinuousTransformType::ANIMATION
        ));
        assert!(ContinuousTransformType::default().is_empty());
    }
}
