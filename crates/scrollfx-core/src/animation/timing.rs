//! Time calculation utilities for tweens
//!
//! Pure functions: callers pass the frame's `now` snapshot instead of reading
//! the clock, so every tween advanced in one frame sees the same instant.

use std::time::{Duration, Instant};

/// Calculate tween progress (0.0 to 1.0)
///
/// Time before `start + delay` counts as zero progress.
///
/// # Returns
/// Progress value clamped to [0.0, 1.0]
#[inline]
pub fn progress(start: Instant, delay: Duration, duration: Duration, now: Instant) -> f64 {
    let elapsed = now.saturating_duration_since(start);
    let Some(active) = elapsed.checked_sub(delay) else {
        return 0.0;
    };
    if duration.is_zero() {
        return 1.0;
    }
    let ratio = active.as_secs_f64() / duration.as_secs_f64();
    ratio.clamp(0.0, 1.0)
}

/// Linear interpolation between two values
///
/// # Arguments
/// * `from` - Start value
/// * `to` - End value
/// * `t` - Interpolation factor, usually [0.0, 1.0]; overshooting eases go past it
#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// Interpolate with exact endpoints
///
/// `lerp` can be off by one ulp at `t = 1`; tweens must land on `to` exactly.
#[inline]
pub fn lerp_exact(from: f64, to: f64, t: f64) -> f64 {
    if t <= 0.0 {
        from
    } else if t >= 1.0 {
        to
    } else {
        lerp(from, to, t)
    }
}

/// Map `value` from `input` onto `output`, clamped to the input range
#[inline]
pub fn map_range(value: f64, input: (f64, f64), output: (f64, f64)) -> f64 {
    let (in_start, in_end) = input;
    let span = in_end - in_start;
    if span.abs() < f64::EPSILON {
        return if value >= in_end { output.1 } else { output.0 };
    }
    let t = ((value - in_start) / span).clamp(0.0, 1.0);
    lerp_exact(output.0, output.1, t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp() {
        assert!((lerp(0.0, 100.0, 0.0) - 0.0).abs() < 0.001);
        assert!((lerp(0.0, 100.0, 0.5) - 50.0).abs() < 0.001);
        assert!((lerp(0.0, 100.0, 1.0) - 100.0).abs() < 0.001);
    }

    #[test]
    fn test_lerp_exact_endpoints() {
        assert_eq!(lerp_exact(0.1, 0.3, 1.0), 0.3);
        assert_eq!(lerp_exact(0.1, 0.3, 0.0), 0.1);
    }

    #[test]
    fn test_progress_zero_duration() {
        let start = Instant::now();
        assert!((progress(start, Duration::ZERO, Duration::ZERO, start) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_progress_respects_delay() {
        let start = Instant::now();
        let delay = Duration::from_millis(300);
        let duration = Duration::from_millis(1000);
        assert_eq!(progress(start, delay, duration, start + Duration::from_millis(200)), 0.0);
        let mid = progress(start, delay, duration, start + Duration::from_millis(800));
        assert!((mid - 0.5).abs() < 1e-9);
        assert_eq!(progress(start, delay, duration, start + Duration::from_secs(5)), 1.0);
    }

    #[test]
    fn test_map_range_clamps() {
        assert_eq!(map_range(-1.0, (0.0, 1.0), (1.0, 0.8)), 1.0);
        assert_eq!(map_range(2.0, (0.0, 1.0), (1.0, 0.8)), 0.8);
        assert!((map_range(0.5, (0.0, 1.0), (1.0, 0.8)) - 0.9).abs() < 1e-12);
    }

    #[test]
    fn test_map_range_degenerate_input() {
        assert_eq!(map_range(0.5, (1.0, 1.0), (1.0, 0.5)), 1.0);
        assert_eq!(map_range(1.0, (1.0, 1.0), (1.0, 0.5)), 0.5);
    }
}
