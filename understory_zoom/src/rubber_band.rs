// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::ZoomError;

/// Resistance applied when a gesture scales past the scale bounds.
///
/// An overshoot of `x` (as a fraction of the bound) is displayed as
/// `m * (1 - 1 / (1 + r * x / m))`, where `m` is [`max_overshoot`](Self::max_overshoot)
/// and `r` is [`resistance`](Self::resistance). The curve starts with slope
/// `r`, approaches `m` without reaching it, and is invertible so successive
/// gesture deltas compose.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RubberBand {
    /// Asymptotic overshoot as a fraction of the bound.
    pub max_overshoot: f64,
    /// Initial slope of the curve.
    pub resistance: f64,
}

impl Default for RubberBand {
    fn default() -> Self {
        Self {
            max_overshoot: 0.5,
            resistance: 0.55,
        }
    }
}

impl RubberBand {
    /// Rejects a negative or non-finite overshoot and a non-positive or non-finite resistance.
    pub fn validate(self) -> Result<Self, ZoomError> {
        let overshoot_ok = self.max_overshoot.is_finite() && self.max_overshoot >= 0.0;
        let resistance_ok = self.resistance.is_finite() && self.resistance > 0.0;
        if overshoot_ok && resistance_ok {
            Ok(self)
        } else {
            Err(ZoomError::InvalidRubberBand {
                max_overshoot: self.max_overshoot,
                resistance: self.resistance,
            })
        }
    }

    fn band(&self, overshoot: f64) -> f64 {
        let m = self.max_overshoot;
        if m <= 0.0 || overshoot <= 0.0 {
            return 0.0;
        }
        m * (1.0 - 1.0 / (1.0 + self.resistance * overshoot / m))
    }

    fn unband(&self, banded: f64) -> f64 {
        let m = self.max_overshoot;
        if m <= 0.0 || banded <= 0.0 {
            return 0.0;
        }
        let banded = banded.min(m * (1.0 - f64::EPSILON));
        (m / self.resistance) * (1.0 / (1.0 - banded / m) - 1.0)
    }

    /// Maps a raw scale to the displayed scale, resisting beyond `[min, max]`.
    #[must_use]
    pub fn apply(&self, raw: f64, min: f64, max: f64) -> f64 {
        if raw > max {
            max * (1.0 + self.band(raw / max - 1.0))
        } else if raw < min {
            min / (1.0 + self.band(min / raw - 1.0))
        } else {
            raw
        }
    }

    /// Inverse of [`apply`](Self::apply): recovers the raw scale behind a displayed one.
    #[must_use]
    pub fn release(&self, displayed: f64, min: f64, max: f64) -> f64 {
        if displayed > max {
            max * (1.0 + self.unband(displayed / max - 1.0))
        } else if displayed < min {
            min / (1.0 + self.unband(min / displayed - 1.0))
        } else {
            displayed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIN: f64 = 1.0;
    const MAX: f64 = 10.0;

    #[test]
    fn inside_bounds_is_untouched() {
        let band = RubberBand::default();
        for raw in [1.0, 2.5, 10.0] {
            assert_eq!(band.apply(raw, MIN, MAX), raw);
            assert_eq!(band.release(raw, MIN, MAX), raw);
        }
    }

    #[test]
    fn overshoot_is_resisted_but_never_reaches_the_limit() {
        let band = RubberBand::default();
        let mut previous = MAX;
        for raw in [10.5, 12.0, 20.0, 100.0, 1e6] {
            let displayed = band.apply(raw, MIN, MAX);
            assert!(displayed > previous, "{raw}: {displayed}");
            assert!(displayed < raw, "{raw}: {displayed}");
            assert!(displayed < MAX * 1.5, "{raw}: {displayed}");
            previous = displayed;
        }
        let mut previous = MIN;
        for raw in [0.9, 0.5, 0.1, 1e-6] {
            let displayed = band.apply(raw, MIN, MAX);
            assert!(displayed < previous, "{raw}: {displayed}");
            assert!(displayed > MIN / 1.5, "{raw}: {displayed}");
            previous = displayed;
        }
    }

    #[test]
    fn release_inverts_apply() {
        let band = RubberBand::default();
        for raw in [0.2, 0.7, 11.0, 25.0, 60.0] {
            let back = band.release(band.apply(raw, MIN, MAX), MIN, MAX);
            assert!((back - raw).abs() < 1e-9 * raw.max(1.0), "{raw}: {back}");
        }
    }

    #[test]
    fn zero_overshoot_clamps() {
        let stiff = RubberBand {
            max_overshoot: 0.0,
            ..RubberBand::default()
        };
        assert_eq!(stiff.apply(20.0, MIN, MAX), MAX);
        assert_eq!(stiff.apply(0.1, MIN, MAX), MIN);
    }

    #[test]
    fn validate_rejects_out_of_range_parameters() {
        assert!(RubberBand::default().validate().is_ok());
        for (max_overshoot, resistance) in [(-0.1, 0.5), (f64::NAN, 0.5), (0.5, 0.0)] {
            let band = RubberBand {
                max_overshoot,
                resistance,
            };
            assert!(
                matches!(band.validate(), Err(ZoomError::InvalidRubberBand { .. })),
                "{band:?}"
            );
        }
    }
}
