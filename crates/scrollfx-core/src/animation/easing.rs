//! Pure easing functions
//!
//! Map normalized time [0, 1] to normalized progress. Every curve starts at 0
//! and ends at 1; the `back` family overshoots in between.

pub use crate::config::EasingType;

/// Extension trait for EasingType with calculation methods
pub trait EasingTypeExt {
    /// Apply the easing function to a progress value
    ///
    /// # Arguments
    /// * `t` - Progress value in range [0, 1]
    ///
    /// # Returns
    /// Eased value, 0 at `t = 0` and 1 at `t = 1`
    fn apply(&self, t: f64) -> f64;
}

impl EasingTypeExt for EasingType {
    #[inline]
    fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match *self {
            EasingType::Step => {
                if t < 1.0 {
                    0.0
                } else {
                    1.0
                }
            }
            EasingType::Linear => t,
            EasingType::PowerIn(n) => power_in(t, n),
            EasingType::PowerOut(n) => power_out(t, n),
            EasingType::PowerInOut(n) => power_in_out(t, n),
            EasingType::ExpoOut => exponential_ease_out(t),
            EasingType::BackIn(strength) => back_in(t, strength),
            EasingType::BackOut(strength) => back_out(t, strength),
        }
    }
}

/// powerN.in: f(t) = t^(N+1)
#[inline]
fn power_in(t: f64, degree: u8) -> f64 {
    t.powi(degree as i32 + 1)
}

/// powerN.out: f(t) = 1 - (1-t)^(N+1)
#[inline]
fn power_out(t: f64, degree: u8) -> f64 {
    1.0 - (1.0 - t).powi(degree as i32 + 1)
}

#[inline]
fn power_in_out(t: f64, degree: u8) -> f64 {
    let exponent = degree as i32 + 1;
    if t < 0.5 {
        (2.0 * t).powi(exponent) / 2.0
    } else {
        1.0 - (2.0 * (1.0 - t)).powi(exponent) / 2.0
    }
}

/// Exponential ease-out: f(t) = 1 - 2^(-10t)
#[inline]
fn exponential_ease_out(t: f64) -> f64 {
    if t >= 1.0 {
        1.0
    } else {
        1.0 - 2.0_f64.powf(-10.0 * t)
    }
}

#[inline]
fn back_in(t: f64, strength: f64) -> f64 {
    t * t * ((strength + 1.0) * t - strength)
}

#[inline]
fn back_out(t: f64, strength: f64) -> f64 {
    let u = t - 1.0;
    u * u * ((strength + 1.0) * u + strength) + 1.0
}
