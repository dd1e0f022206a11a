//! Tween descriptions and live tween state

use std::fmt;
use std::time::{Duration, Instant};

use super::easing::{EasingType, EasingTypeExt};
use super::property::{Property, TargetId};
use super::scheduler::Scheduler;
use super::timing::{lerp, progress};

/// Handle to a started tween
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TweenHandle(pub(crate) u64);

impl fmt::Display for TweenHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tween#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TweenState {
    /// Started, waiting for the next frame to stamp its start time
    Pending,
    Running,
    Completed,
    Cancelled,
}

impl TweenState {
    pub fn is_active(self) -> bool {
        matches!(self, TweenState::Pending | TweenState::Running)
    }
}

/// Callback run once when a tween completes
pub type CompletionFn = Box<dyn FnOnce(&mut Scheduler)>;

/// A property interpolation with both endpoints resolved
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropertyDelta {
    pub property: Property,
    pub from: f64,
    pub to: f64,
}

/// Endpoint request before resolution; `from: None` reads the current value
#[derive(Debug, Clone, Copy)]
pub(crate) struct DeltaRequest {
    pub property: Property,
    pub from: Option<f64>,
    pub to: f64,
}

/// Builder describing a tween to start
///
/// ```ignore
/// let spec = TweenSpec::new(Duration::from_millis(400), EasingType::PowerIn(2))
///     .to(Property::Opacity, 0.0)
///     .from_to(Property::Scale, 1.0, 0.3);
/// ```
pub struct TweenSpec {
    pub(crate) duration: Duration,
    pub(crate) easing: EasingType,
    pub(crate) delay: Duration,
    pub(crate) deltas: Vec<DeltaRequest>,
    pub(crate) on_complete: Option<CompletionFn>,
}

impl TweenSpec {
    pub fn new(duration: Duration, easing: EasingType) -> Self {
        Self {
            duration,
            easing,
            delay: Duration::ZERO,
            deltas: Vec::new(),
            on_complete: None,
        }
    }

    /// Shorthand for millisecond durations
    pub fn millis(duration_ms: u64, easing: EasingType) -> Self {
        Self::new(Duration::from_millis(duration_ms), easing)
    }

    /// Animate `property` between explicit endpoints
    pub fn from_to(mut self, property: Property, from: f64, to: f64) -> Self {
        self.push(property, Some(from), to);
        self
    }

    /// Animate `property` from wherever it currently is
    pub fn to(mut self, property: Property, to: f64) -> Self {
        self.push(property, None, to);
        self
    }

    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn on_complete<F>(mut self, callback: F) -> Self
    where
        F: FnOnce(&mut Scheduler) + 'static,
    {
        self.on_complete = Some(Box::new(callback));
        self
    }

    pub fn properties(&self) -> impl Iterator<Item = Property> + '_ {
        self.deltas.iter().map(|d| d.property)
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    // A later request for the same property replaces the earlier one
    fn push(&mut self, property: Property, from: Option<f64>, to: f64) {
        self.deltas.retain(|d| d.property != property);
        self.deltas.push(DeltaRequest { property, from, to });
    }
}

impl fmt::Debug for TweenSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TweenSpec")
            .field("duration", &self.duration)
            .field("easing", &self.easing)
            .field("delay", &self.delay)
            .field("deltas", &self.deltas)
            .field("has_on_complete", &self.on_complete.is_some())
            .finish()
    }
}

/// A tween owned by the scheduler
pub(crate) struct Tween {
    pub handle: TweenHandle,
    pub target: TargetId,
    pub deltas: Vec<PropertyDelta>,
    pub duration: Duration,
    pub delay: Duration,
    pub easing: EasingType,
    pub start: Option<Instant>,
    pub state: TweenState,
    pub on_complete: Option<CompletionFn>,
}

impl Tween {
    /// True if this tween animates any of `properties`
    pub fn overlaps(&self, target: TargetId, properties: &[Property]) -> bool {
        self.target == target && self.deltas.iter().any(|d| properties.contains(&d.property))
    }

    /// Advance to `now` and return the raw progress
    ///
    /// The first call stamps the start time. `snap` jumps straight to the end.
    pub fn advance(&mut self, now: Instant, snap: bool) -> f64 {
        let start = *self.start.get_or_insert(now);
        self.state = TweenState::Running;

        if snap {
            1.0
        } else {
            progress(start, self.delay, self.duration, now)
        }
    }

    /// Property values at raw progress `t`
    ///
    /// Endpoints are exact; in between the eased value may overshoot.
    pub fn values(&self, t: f64) -> impl Iterator<Item = (Property, f64)> + '_ {
        let eased = self.easing.apply(t);
        self.deltas.iter().map(move |d| {
            let value = if t <= 0.0 {
                d.from
            } else if t >= 1.0 {
                d.to
            } else {
                lerp(d.from, d.to, eased)
            };
            (d.property, value)
        })
    }
}

impl fmt::Debug for Tween {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tween")
            .field("handle", &self.handle)
            .field("target", &self.target)
            .field("deltas", &self.deltas)
            .field("duration", &self.duration)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_later_request_replaces_earlier() {
        let spec = TweenSpec::millis(100, EasingType::Linear)
            .to(Property::Opacity, 0.0)
            .from_to(Property::Opacity, 0.2, 1.0);
        let props: Vec<_> = spec.properties().collect();
        assert_eq!(props, vec![Property::Opacity]);
        assert_eq!(spec.deltas[0].from, Some(0.2));
    }

    #[test]
    fn test_state_activity() {
        assert!(TweenState::Pending.is_active());
        assert!(TweenState::Running.is_active());
        assert!(!TweenState::Completed.is_active());
        assert!(!TweenState::Cancelled.is_active());
    }
}
