//! Tilt-to-pointer arithmetic.
//!
//! Maps raw accelerometer samples (milli-g, nominally −1000..=1000 per axis)
//! onto pointer deltas and scroll amounts. This is the one place in the stack
//! that owns sign conventions: holding the board like a steering wheel, tilting
//! away from you must move the pointer up, so the Y axis flips here. The
//! encoders below stay axis-neutral.
//!
//! All arithmetic is integer. The linear map from `[-1000, 1000]` onto
//! `[-range, range]` reduces to `value * range / 1000`, truncating toward
//! zero; samples beyond ±1000 (the accelerometer delivers up to ±2 g)
//! extrapolate rather than clamp, matching the pass-through looseness of the
//! move command itself.

/// Scroll amounts map onto `[-3, 3]`.
const SCROLL_RANGE: i32 = 3;

/// Pure tilt-to-delta mapper, configured once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TiltMapper {
    speed: i32,
    move_threshold: i32,
    scroll_threshold: i32,
}

impl TiltMapper {
    /// Creates a mapper.
    ///
    /// `speed` bounds the per-sample pointer delta; tilt magnitudes at or
    /// below `move_threshold` (respectively `scroll_threshold`) count as the
    /// dead zone and produce nothing.
    pub fn new(speed: i32, move_threshold: i32, scroll_threshold: i32) -> TiltMapper {
        TiltMapper {
            speed,
            move_threshold,
            scroll_threshold,
        }
    }

    /// Maps one tilt sample to a pointer delta.
    ///
    /// Each axis applies its dead zone independently; a sample inside both
    /// dead zones yields `None` and no command should be sent. The Y
    /// component comes back inverted, ready for the wire.
    pub fn pointer_delta(&self, ax: i32, ay: i32) -> Option<(i32, i32)> {
        let dx = if ax.abs() > self.move_threshold {
            scale(ax, self.speed)
        } else {
            0
        };
        let dy = if ay.abs() > self.move_threshold {
            -scale(ay, self.speed)
        } else {
            0
        };
        if dx == 0 && dy == 0 {
            None
        } else {
            Some((dx, dy))
        }
    }

    /// Maps one tilt sample to a scroll amount, inverted like the Y axis.
    ///
    /// Yields `None` inside the dead zone and also when the mapped amount
    /// truncates to zero; a `SCROLL:0` line would reach the wire otherwise
    /// and scroll nothing.
    pub fn scroll_delta(&self, ay: i32) -> Option<i32> {
        if ay.abs() <= self.scroll_threshold {
            return None;
        }
        let amount = -scale(ay, SCROLL_RANGE);
        (amount != 0).then_some(amount)
    }
}

/// `[-1000, 1000] → [-range, range]`, truncating toward zero.
fn scale(value: i32, range: i32) -> i32 {
    value * range / 1000
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn mapper() -> TiltMapper {
        TiltMapper::new(4, 150, 200)
    }

    #[test]
    fn test_full_tilt_maps_to_full_speed() {
        assert_eq!(mapper().pointer_delta(1000, 0), Some((4, 0)));
        assert_eq!(mapper().pointer_delta(-1000, 0), Some((-4, 0)));
    }

    #[test]
    fn test_y_axis_is_inverted() {
        assert_eq!(mapper().pointer_delta(0, 1000), Some((0, -4)));
        assert_eq!(mapper().pointer_delta(0, -500), Some((0, 2)));
    }

    #[test]
    fn test_x_axis_is_not_inverted() {
        assert_eq!(mapper().pointer_delta(500, 0), Some((2, 0)));
    }

    #[test]
    fn test_dead_zone_applies_per_axis() {
        // X inside the dead zone, Y outside: only Y contributes.
        assert_eq!(mapper().pointer_delta(100, 1000), Some((0, -4)));
        assert_eq!(mapper().pointer_delta(1000, -100), Some((4, 0)));
    }

    #[test]
    fn test_sample_inside_both_dead_zones_yields_nothing() {
        assert_eq!(mapper().pointer_delta(0, 0), None);
        assert_eq!(mapper().pointer_delta(150, -150), None);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        assert_eq!(mapper().pointer_delta(150, 0), None);
        // 151 clears the threshold but 151 * 4 / 1000 truncates to 0.
        assert_eq!(mapper().pointer_delta(151, 0), None);
        // The first sample big enough to move one pixel:
        assert_eq!(mapper().pointer_delta(250, 0), Some((1, 0)));
    }

    #[test]
    fn test_samples_beyond_nominal_range_extrapolate() {
        assert_eq!(mapper().pointer_delta(2000, 0), Some((8, 0)));
    }

    #[test]
    fn test_scroll_inverts_and_truncates() {
        assert_eq!(mapper().scroll_delta(-1000), Some(3));
        assert_eq!(mapper().scroll_delta(1000), Some(-3));
        assert_eq!(mapper().scroll_delta(500), Some(-1));
    }

    #[test]
    fn test_scroll_dead_zone_and_zero_truncation() {
        assert_eq!(mapper().scroll_delta(200), None);
        assert_eq!(mapper().scroll_delta(-150), None);
        // Above the threshold but maps to zero: suppressed.
        assert_eq!(mapper().scroll_delta(250), None);
        assert_eq!(mapper().scroll_delta(-333), None);
        assert_eq!(mapper().scroll_delta(-334), Some(1));
    }
}
