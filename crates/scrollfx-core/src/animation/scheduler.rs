//! Tween scheduler
//!
//! Owns every live tween and the property values they drive. Starting a tween
//! cancels any active tween on the same target that shares a property before
//! the new tween's from-values are resolved, so two interpolations never write
//! the same property in one frame.

use std::collections::VecDeque;
use std::time::Instant;

use tracing::{debug, trace};

use super::property::{Property, TargetId, Targets, ViewId};
use super::tween::{PropertyDelta, Tween, TweenHandle, TweenSpec, TweenState};
use crate::config::AnimationConfig;

pub struct Scheduler {
    targets: Targets,
    active: Vec<Tween>,
    next_handle: u64,
    /// Final states of recently retired tweens, oldest first
    retired: VecDeque<(TweenHandle, TweenState)>,
    history_len: usize,
    reduced_motion: bool,
    /// Timestamp of the last frame tick
    clock: Option<Instant>,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new(&AnimationConfig::default())
    }
}

impl Scheduler {
    pub fn new(config: &AnimationConfig) -> Self {
        Self {
            targets: Targets::default(),
            active: Vec::new(),
            next_handle: 0,
            retired: VecDeque::with_capacity(config.history_len),
            history_len: config.history_len,
            reduced_motion: config.reduced_motion,
            clock: None,
        }
    }

    /// Get or create the target `key` owned by `view`
    pub fn target(&mut self, view: ViewId, key: &str) -> TargetId {
        self.targets.resolve(view, key)
    }

    #[inline]
    pub fn is_live(&self, target: TargetId) -> bool {
        self.targets.is_live(target)
    }

    pub fn target_key(&self, target: TargetId) -> Option<&str> {
        self.targets.key(target)
    }

    /// Current value of a property, `None` once the target is retired
    #[inline]
    pub fn value(&self, target: TargetId, property: Property) -> Option<f64> {
        self.targets.value(target, property)
    }

    /// Write a value without animating
    ///
    /// An active tween on the same property overwrites it on the next frame.
    pub fn set(&mut self, target: TargetId, property: Property, value: f64) -> bool {
        self.targets.set(target, property, value)
    }

    /// Timestamp of the last frame tick
    pub fn now(&self) -> Option<Instant> {
        self.clock
    }

    /// Start a tween on `target`
    ///
    /// Returns `None` without side effects when the target's view is gone.
    pub fn start(&mut self, target: TargetId, spec: TweenSpec) -> Option<TweenHandle> {
        if !self.targets.is_live(target) {
            debug!(%target, "Ignoring tween start on retired target");
            return None;
        }

        let TweenSpec {
            duration,
            easing,
            delay,
            deltas: requests,
            on_complete,
        } = spec;

        let properties: Vec<Property> = requests.iter().map(|r| r.property).collect();
        let cancelled = self.cancel_overlapping(target, &properties);
        if cancelled > 0 {
            debug!(%target, cancelled, "Cancelled overlapping tweens");
        }

        // Resolved after the cancel, so `to`-only deltas start where the
        // interrupted tween left the property
        let deltas: Vec<PropertyDelta> = requests
            .iter()
            .map(|request| PropertyDelta {
                property: request.property,
                from: request.from.unwrap_or_else(|| {
                    self.targets
                        .value(target, request.property)
                        .unwrap_or(request.property.resting_value())
                }),
                to: request.to,
            })
            .collect();

        for delta in &deltas {
            self.targets.set(target, delta.property, delta.from);
        }

        self.next_handle += 1;
        let handle = TweenHandle(self.next_handle);
        trace!(%handle, %target, ?duration, ?easing, "Starting tween");

        self.active.push(Tween {
            handle,
            target,
            deltas,
            duration,
            delay,
            easing,
            start: None,
            state: TweenState::Pending,
            on_complete,
        });

        Some(handle)
    }

    /// Cancel a single tween, leaving its properties where they are
    pub fn cancel(&mut self, handle: TweenHandle) -> bool {
        match self.active.iter().position(|t| t.handle == handle) {
            Some(pos) => {
                let tween = self.active.remove(pos);
                self.retire(tween.handle, TweenState::Cancelled);
                true
            }
            None => false,
        }
    }

    /// Cancel every tween on `target`; returns how many were cancelled
    pub fn cancel_all_for(&mut self, target: TargetId) -> usize {
        self.cancel_where(|tween| tween.target == target)
    }

    fn cancel_overlapping(&mut self, target: TargetId, properties: &[Property]) -> usize {
        self.cancel_where(|tween| tween.overlaps(target, properties))
    }

    fn cancel_where<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(&Tween) -> bool,
    {
        let mut cancelled = Vec::new();
        self.active.retain(|tween| {
            if predicate(tween) {
                cancelled.push(tween.handle);
                false
            } else {
                true
            }
        });
        for handle in &cancelled {
            self.retire(*handle, TweenState::Cancelled);
        }
        cancelled.len()
    }

    /// State of a tween, `None` once it has aged out of the history
    pub fn state(&self, handle: TweenHandle) -> Option<TweenState> {
        self.active
            .iter()
            .find(|t| t.handle == handle)
            .map(|t| t.state)
            .or_else(|| {
                self.retired
                    .iter()
                    .rev()
                    .find(|(h, _)| *h == handle)
                    .map(|(_, state)| *state)
            })
    }

    #[inline]
    pub fn is_active(&self, handle: TweenHandle) -> bool {
        self.active.iter().any(|t| t.handle == handle)
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn active_for(&self, target: TargetId) -> usize {
        self.active.iter().filter(|t| t.target == target).count()
    }

    /// Resolved deltas of an active tween
    pub fn deltas(&self, handle: TweenHandle) -> Option<&[PropertyDelta]> {
        self.active
            .iter()
            .find(|t| t.handle == handle)
            .map(|t| t.deltas.as_slice())
    }

    /// Advance every active tween to `now`
    ///
    /// All tweens see the same `now`. Completion callbacks run after every
    /// tween has been written, in completion order. Returns completed handles.
    pub fn tick(&mut self, now: Instant) -> Vec<TweenHandle> {
        self.clock = Some(now);
        let snap = self.reduced_motion;

        let mut completed = Vec::new();
        for tween in &mut self.active {
            let t = tween.advance(now, snap);
            for (property, value) in tween.values(t) {
                self.targets.set(tween.target, property, value);
            }
            if t >= 1.0 {
                tween.state = TweenState::Completed;
                completed.push(tween.handle);
            }
        }

        if completed.is_empty() {
            return completed;
        }

        let mut callbacks = Vec::new();
        self.active.retain_mut(|tween| {
            if tween.state == TweenState::Completed {
                if let Some(callback) = tween.on_complete.take() {
                    callbacks.push(callback);
                }
                false
            } else {
                true
            }
        });
        for handle in &completed {
            self.retire(*handle, TweenState::Completed);
        }

        for callback in callbacks {
            callback(self);
        }

        completed
    }

    /// Cancel all tweens of `view` and retire its targets
    pub(crate) fn retire_view(&mut self, view: ViewId) -> (usize, usize) {
        let owned = self.targets.owned_by(view);
        let cancelled = self.cancel_where(|tween| owned.contains(&tween.target));
        let retired = self.targets.retire_view(view);
        (cancelled, retired)
    }

    fn retire(&mut self, handle: TweenHandle, state: TweenState) {
        if self.history_len == 0 {
            return;
        }
        if self.retired.len() == self.history_len {
            self.retired.pop_front();
        }
        self.retired.push_back((handle, state));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EasingType;
    use std::cell::Cell;
    use std::rc::Rc;
    use std::time::Duration;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn setup() -> (Scheduler, TargetId, Instant) {
        let mut scheduler = Scheduler::default();
        let target = scheduler.target(ViewId::new(), "box");
        (scheduler, target, Instant::now())
    }

    #[test]
    fn test_from_values_render_on_start() {
        let (mut s, t, _) = setup();
        s.start(t, TweenSpec::millis(100, EasingType::Linear).from_to(Property::Y, 100.0, 0.0));
        assert_eq!(s.value(t, Property::Y), Some(100.0));
    }

    #[test]
    fn test_first_tick_stamps_start() {
        let (mut s, t, t0) = setup();
        let h = s
            .start(t, TweenSpec::millis(100, EasingType::Linear).from_to(Property::Opacity, 0.0, 1.0))
            .unwrap();
        assert_eq!(s.state(h), Some(TweenState::Pending));

        s.tick(t0);
        assert_eq!(s.state(h), Some(TweenState::Running));
        assert_eq!(s.value(t, Property::Opacity), Some(0.0));

        s.tick(t0 + ms(50));
        assert!((s.value(t, Property::Opacity).unwrap() - 0.5).abs() < 1e-9);

        let done = s.tick(t0 + ms(100));
        assert_eq!(done, vec![h]);
        assert_eq!(s.value(t, Property::Opacity), Some(1.0));
        assert_eq!(s.state(h), Some(TweenState::Completed));
        assert_eq!(s.active_count(), 0);
    }

    #[test]
    fn test_to_reads_current_value() {
        let (mut s, t, t0) = setup();
        s.set(t, Property::Scale, 0.4);
        let h = s.start(t, TweenSpec::millis(100, EasingType::Linear).to(Property::Scale, 1.0)).unwrap();
        assert_eq!(s.deltas(h).unwrap()[0].from, 0.4);
        s.tick(t0);
        assert_eq!(s.value(t, Property::Scale), Some(0.4));
    }

    #[test]
    fn test_overlap_cancels_and_interrupts_in_place() {
        let (mut s, t, t0) = setup();
        let a = s
            .start(t, TweenSpec::millis(100, EasingType::Linear).from_to(Property::Y, 0.0, -12.0))
            .unwrap();
        s.tick(t0);
        s.tick(t0 + ms(50));
        let mid = s.value(t, Property::Y).unwrap();
        assert!((mid + 6.0).abs() < 1e-9);

        let b = s.start(t, TweenSpec::millis(100, EasingType::Linear).to(Property::Y, 0.0)).unwrap();
        assert_eq!(s.state(a), Some(TweenState::Cancelled));
        assert_eq!(s.deltas(b).unwrap()[0].from, mid);
        assert_eq!(s.value(t, Property::Y), Some(mid));
    }

    #[test]
    fn test_disjoint_properties_coexist() {
        let (mut s, t, _) = setup();
        let a = s.start(t, TweenSpec::millis(100, EasingType::Linear).to(Property::Opacity, 0.0)).unwrap();
        let b = s.start(t, TweenSpec::millis(100, EasingType::Linear).to(Property::Y, 10.0)).unwrap();
        assert!(s.is_active(a));
        assert!(s.is_active(b));
        assert_eq!(s.active_for(t), 2);
    }

    #[test]
    fn test_cancel_keeps_value() {
        let (mut s, t, t0) = setup();
        let h = s
            .start(t, TweenSpec::millis(200, EasingType::Linear).from_to(Property::Width, 0.0, 200.0))
            .unwrap();
        s.tick(t0);
        s.tick(t0 + ms(100));
        assert!(s.cancel(h));
        assert!(!s.cancel(h));
        s.tick(t0 + ms(200));
        assert!((s.value(t, Property::Width).unwrap() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_on_complete_runs_once_and_can_chain() {
        let (mut s, t, t0) = setup();
        let calls = Rc::new(Cell::new(0));
        let seen = calls.clone();
        s.start(
            t,
            TweenSpec::millis(100, EasingType::Linear)
                .to(Property::Scale, 0.8)
                .on_complete(move |s: &mut Scheduler| {
                    seen.set(seen.get() + 1);
                    s.start(t, TweenSpec::millis(100, EasingType::Linear).to(Property::Scale, 1.0));
                }),
        );
        s.tick(t0);
        s.tick(t0 + ms(100));
        assert_eq!(calls.get(), 1);
        assert_eq!(s.active_count(), 1);

        s.tick(t0 + ms(150));
        s.tick(t0 + ms(250));
        assert_eq!(calls.get(), 1);
        assert_eq!(s.value(t, Property::Scale), Some(1.0));
    }

    #[test]
    fn test_cancelled_tween_drops_callback() {
        let (mut s, t, t0) = setup();
        let calls = Rc::new(Cell::new(0));
        let seen = calls.clone();
        let h = s
            .start(
                t,
                TweenSpec::millis(100, EasingType::Linear)
                    .to(Property::Opacity, 0.0)
                    .on_complete(move |_| seen.set(seen.get() + 1)),
            )
            .unwrap();
        s.cancel(h);
        s.tick(t0 + ms(500));
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_delay_holds_from_values() {
        let (mut s, t, t0) = setup();
        s.start(
            t,
            TweenSpec::millis(100, EasingType::Linear)
                .from_to(Property::Y, 50.0, 0.0)
                .delay(ms(300)),
        );
        s.tick(t0);
        s.tick(t0 + ms(200));
        assert_eq!(s.value(t, Property::Y), Some(50.0));
        s.tick(t0 + ms(350));
        assert!((s.value(t, Property::Y).unwrap() - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_reduced_motion_snaps() {
        let config = AnimationConfig {
            reduced_motion: true,
            ..Default::default()
        };
        let mut s = Scheduler::new(&config);
        let t = s.target(ViewId::new(), "box");
        let h = s
            .start(t, TweenSpec::millis(1000, EasingType::Linear).from_to(Property::Opacity, 0.0, 1.0))
            .unwrap();
        assert_eq!(s.tick(Instant::now()), vec![h]);
        assert_eq!(s.value(t, Property::Opacity), Some(1.0));
    }

    #[test]
    fn test_retired_target_is_noop() {
        let mut s = Scheduler::default();
        let view = ViewId::new();
        let t = s.target(view, "box");
        s.start(t, TweenSpec::millis(100, EasingType::Linear).to(Property::Opacity, 0.0));

        let (cancelled, retired) = s.retire_view(view);
        assert_eq!((cancelled, retired), (1, 1));
        assert!(s.start(t, TweenSpec::millis(100, EasingType::Linear).to(Property::Opacity, 1.0)).is_none());
        assert_eq!(s.cancel_all_for(t), 0);
        assert!(s.tick(Instant::now()).is_empty());
    }

    #[test]
    fn test_history_is_bounded() {
        let config = AnimationConfig {
            history_len: 1,
            ..Default::default()
        };
        let mut s = Scheduler::new(&config);
        let t = s.target(ViewId::new(), "box");
        let handles: Vec<_> = (0..3)
            .map(|_| s.start(t, TweenSpec::millis(10, EasingType::Linear).to(Property::X, 1.0)).unwrap())
            .collect();
        // Each start cancelled the previous one
        assert_eq!(s.state(handles[0]), None);
        assert_eq!(s.state(handles[1]), Some(TweenState::Cancelled));
        assert_eq!(s.state(handles[2]), Some(TweenState::Pending));
    }
}
