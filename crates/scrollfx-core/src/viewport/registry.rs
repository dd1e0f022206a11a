//! One-shot viewport triggers
//!
//! A registration fires its `on_enter` the first time its threshold is
//! crossed and is removed in the same step. The callback is an `FnOnce`, so a
//! registration cannot fire twice.

use std::fmt;

use tracing::debug;

use super::geometry::{ElementGeometry, ScrollState};
use super::threshold::Threshold;
use crate::animation::{Scheduler, TargetId, ViewId};

/// Callback run when a trigger's threshold is first crossed
pub type OnEnter = Box<dyn FnOnce(&mut Scheduler)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TriggerHandle(u64);

impl fmt::Display for TriggerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "trigger#{}", self.0)
    }
}

struct Registration {
    handle: TriggerHandle,
    view: ViewId,
    element: TargetId,
    threshold: Threshold,
    on_enter: OnEnter,
}

#[derive(Default)]
pub struct TriggerRegistry {
    next_id: u64,
    registrations: Vec<Registration>,
}

impl TriggerRegistry {
    pub fn register(
        &mut self,
        view: ViewId,
        element: TargetId,
        threshold: Threshold,
        on_enter: OnEnter,
    ) -> TriggerHandle {
        self.next_id += 1;
        let handle = TriggerHandle(self.next_id);
        self.registrations.push(Registration {
            handle,
            view,
            element,
            threshold,
            on_enter,
        });
        handle
    }

    /// Remove a registration; unknown or already fired handles return false
    pub fn unregister(&mut self, handle: TriggerHandle) -> bool {
        let before = self.registrations.len();
        self.registrations.retain(|r| r.handle != handle);
        before != self.registrations.len()
    }

    pub fn unregister_view(&mut self, view: ViewId) -> usize {
        let before = self.registrations.len();
        self.registrations.retain(|r| r.view != view);
        before - self.registrations.len()
    }

    pub fn unregister_all(&mut self) -> usize {
        let count = self.registrations.len();
        self.registrations.clear();
        count
    }

    #[inline]
    pub fn is_registered(&self, handle: TriggerHandle) -> bool {
        self.registrations.iter().any(|r| r.handle == handle)
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    /// Fire every registration crossed at `state`
    ///
    /// Elements not yet laid out stay registered. When several thresholds are
    /// crossed by one notification they fire in the order a continuous scroll
    /// would have crossed them. Returns the fired handles in that order.
    pub fn evaluate(
        &mut self,
        state: ScrollState,
        geometry: &dyn ElementGeometry,
        scheduler: &mut Scheduler,
    ) -> Vec<TriggerHandle> {
        let mut crossed: Vec<(f64, usize)> = self
            .registrations
            .iter()
            .enumerate()
            .filter_map(|(i, r)| {
                let bounds = geometry.bounds(r.element)?;
                r.threshold
                    .is_crossed(bounds, state)
                    .then(|| (r.threshold.crossing_offset(bounds, state.viewport_height), i))
            })
            .collect();

        if crossed.is_empty() {
            return Vec::new();
        }

        crossed.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

        // Detach fired registrations before running any callback
        let order: Vec<usize> = crossed.into_iter().map(|(_, i)| i).collect();
        let mut slots: Vec<Option<Registration>> = std::mem::take(&mut self.registrations)
            .into_iter()
            .map(Some)
            .collect();
        let fired: Vec<Registration> = order.iter().filter_map(|i| slots[*i].take()).collect();
        self.registrations = slots.into_iter().flatten().collect();

        fired
            .into_iter()
            .map(|registration| {
                debug!(
                    trigger = %registration.handle,
                    element = %registration.element,
                    threshold = %registration.threshold,
                    "Viewport trigger fired"
                );
                (registration.on_enter)(scheduler);
                registration.handle
            })
            .collect()
    }
}

impl fmt::Debug for TriggerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TriggerRegistry")
            .field("registrations", &self.registrations.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewport::geometry::{Bounds, StaticLayout};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recorder(log: &Rc<RefCell<Vec<&'static str>>>, name: &'static str) -> OnEnter {
        let log = log.clone();
        Box::new(move |_: &mut Scheduler| log.borrow_mut().push(name))
    }

    #[test]
    fn test_fires_once_then_unregisters() {
        let mut scheduler = Scheduler::default();
        let view = ViewId::new();
        let el = scheduler.target(view, "title");
        let mut layout = StaticLayout::new();
        layout.place(el, Bounds::new(1000.0, 100.0));

        let log = Rc::new(RefCell::new(Vec::new()));
        let mut registry = TriggerRegistry::default();
        let h = registry.register(view, el, Threshold::fraction(0.5), recorder(&log, "title"));

        assert!(registry.evaluate(ScrollState::new(0.0, 800.0), &layout, &mut scheduler).is_empty());
        assert_eq!(registry.evaluate(ScrollState::new(700.0, 800.0), &layout, &mut scheduler), vec![h]);
        assert!(!registry.is_registered(h));

        // Scrolling back and forth again never re-fires
        registry.evaluate(ScrollState::new(0.0, 800.0), &layout, &mut scheduler);
        registry.evaluate(ScrollState::new(900.0, 800.0), &layout, &mut scheduler);
        assert_eq!(*log.borrow(), vec!["title"]);
    }

    #[test]
    fn test_crossing_order_within_one_notification() {
        let mut scheduler = Scheduler::default();
        let view = ViewId::new();
        let low = scheduler.target(view, "low");
        let high = scheduler.target(view, "high");
        let mut layout = StaticLayout::new();
        layout.place(low, Bounds::new(1500.0, 100.0));
        layout.place(high, Bounds::new(1200.0, 100.0));

        let log = Rc::new(RefCell::new(Vec::new()));
        let mut registry = TriggerRegistry::default();
        registry.register(view, low, Threshold::fraction(0.5), recorder(&log, "low"));
        registry.register(view, high, Threshold::fraction(0.5), recorder(&log, "high"));

        registry.evaluate(ScrollState::new(3000.0, 800.0), &layout, &mut scheduler);
        assert_eq!(*log.borrow(), vec!["high", "low"]);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_unlaid_elements_wait() {
        let mut scheduler = Scheduler::default();
        let view = ViewId::new();
        let el = scheduler.target(view, "card");
        let mut layout = StaticLayout::new();
        let mut registry = TriggerRegistry::default();
        let h = registry.register(view, el, Threshold::fraction(0.9), Box::new(|_: &mut Scheduler| {}));

        assert!(registry.evaluate(ScrollState::new(5000.0, 800.0), &layout, &mut scheduler).is_empty());
        layout.place(el, Bounds::new(100.0, 10.0));
        assert_eq!(registry.evaluate(ScrollState::new(0.0, 800.0), &layout, &mut scheduler), vec![h]);
    }

    #[test]
    fn test_unregister_before_fire_is_safe() {
        let mut registry = TriggerRegistry::default();
        let mut scheduler = Scheduler::default();
        let view = ViewId::new();
        let el = scheduler.target(view, "x");
        let h = registry.register(view, el, Threshold::fraction(0.5), Box::new(|_: &mut Scheduler| {}));
        assert!(registry.unregister(h));
        assert!(!registry.unregister(h));
        assert_eq!(registry.unregister_view(view), 0);
        assert_eq!(registry.unregister_all(), 0);
    }
}
