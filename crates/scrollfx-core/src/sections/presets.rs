//! Entrance animations revealed by viewport triggers
//!
//! Each preset lists the values an element is parked at while mounted but not
//! yet revealed. The reveal tweens every listed property back to its resting
//! value.

use std::time::Duration;

use crate::animation::{EasingType, Property, Scheduler, TargetId, TweenSpec, ViewId};
use crate::runtime::Runtime;
use crate::viewport::{Threshold, TriggerHandle};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealPreset {
    pub from: &'static [(Property, f64)],
    pub duration_ms: u64,
    pub delay_ms: u64,
    /// Extra delay per item index
    pub stagger_ms: u64,
    pub easing: EasingType,
    /// Viewport fraction the element's top must cross; `None` uses the
    /// configured default
    pub threshold: Option<f64>,
}

pub const SERVICES_TITLE: RevealPreset = RevealPreset {
    from: &[(Property::Y, 100.0), (Property::Opacity, 0.0)],
    duration_ms: 1500,
    delay_ms: 0,
    stagger_ms: 0,
    easing: EasingType::PowerOut(4),
    threshold: Some(0.9),
};

pub const SERVICES_SUBTITLE: RevealPreset = RevealPreset {
    from: &[(Property::Y, 50.0), (Property::Opacity, 0.0)],
    duration_ms: 1200,
    delay_ms: 300,
    stagger_ms: 0,
    easing: EasingType::PowerOut(3),
    threshold: None,
};

pub const SERVICE_ROW: RevealPreset = RevealPreset {
    from: &[(Property::Y, 50.0), (Property::Opacity, 0.0)],
    duration_ms: 800,
    delay_ms: 0,
    stagger_ms: 100,
    easing: EasingType::PowerOut(3),
    threshold: Some(0.9),
};

pub const REVIEWS_TITLE: RevealPreset = RevealPreset {
    from: &[(Property::Y, 60.0), (Property::Opacity, 0.0)],
    duration_ms: 1200,
    delay_ms: 0,
    stagger_ms: 0,
    easing: EasingType::PowerOut(3),
    threshold: None,
};

pub const REVIEW_CARD: RevealPreset = RevealPreset {
    from: &[(Property::Y, 80.0), (Property::Opacity, 0.0), (Property::Scale, 0.95)],
    duration_ms: 900,
    delay_ms: 0,
    stagger_ms: 150,
    easing: EasingType::PowerOut(3),
    threshold: Some(0.9),
};

pub const REVIEW_HIGHLIGHT: RevealPreset = RevealPreset {
    from: &[(Property::WidthPercent, 0.0)],
    duration_ms: 1500,
    delay_ms: 800,
    stagger_ms: 300,
    easing: EasingType::PowerInOut(2),
    threshold: None,
};

impl RevealPreset {
    /// Park `target` at the preset's from values
    pub fn prime(&self, scheduler: &mut Scheduler, target: TargetId) {
        for (property, value) in self.from {
            scheduler.set(target, *property, *value);
        }
    }

    pub fn delay_for(&self, index: usize) -> Duration {
        Duration::from_millis(self.delay_ms + self.stagger_ms * index as u64)
    }

    pub fn threshold_or(&self, default: Threshold) -> Threshold {
        self.threshold.map(Threshold::fraction).unwrap_or(default)
    }

    /// Reveal tween for the `index`-th element sharing this preset
    pub fn spec(&self, index: usize) -> TweenSpec {
        self.from
            .iter()
            .fold(
                TweenSpec::millis(self.duration_ms, self.easing).delay(self.delay_for(index)),
                |spec, (property, from)| spec.from_to(*property, *from, property.resting_value()),
            )
    }

    /// Prime `target` and register its one-shot reveal
    pub fn register(
        &self,
        rt: &mut Runtime,
        view: ViewId,
        target: TargetId,
        index: usize,
        default: Threshold,
    ) -> Option<TriggerHandle> {
        self.prime(rt.scheduler_mut(), target);
        let spec = self.spec(index);
        rt.register_trigger(
            view,
            target,
            self.threshold_or(default),
            Box::new(move |scheduler: &mut Scheduler| {
                scheduler.start(target, spec);
            }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stagger() {
        assert_eq!(SERVICE_ROW.delay_for(3), Duration::from_millis(300));
        assert_eq!(REVIEW_HIGHLIGHT.delay_for(2), Duration::from_millis(1400));
    }

    #[test]
    fn test_spec_targets_resting_values() {
        let spec = REVIEW_CARD.spec(0);
        let props: Vec<Property> = spec.properties().collect();
        assert_eq!(props, vec![Property::Y, Property::Opacity, Property::Scale]);
        assert_eq!(spec.duration(), Duration::from_millis(900));
    }

    #[test]
    fn test_threshold_fallback() {
        let default = Threshold::fraction(0.85);
        assert_eq!(SERVICES_SUBTITLE.threshold_or(default), default);
        assert_eq!(SERVICES_TITLE.threshold_or(default), Threshold::fraction(0.9));
    }

    #[test]
    fn test_prime_parks_element() {
        let mut scheduler = Scheduler::default();
        let el = scheduler.target(ViewId::new(), "title");
        SERVICES_TITLE.prime(&mut scheduler, el);
        assert_eq!(scheduler.value(el, Property::Y), Some(100.0));
        assert_eq!(scheduler.value(el, Property::Opacity), Some(0.0));
    }
}
