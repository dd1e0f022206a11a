//! Animation runtime
//!
//! One explicit instance owns the tween scheduler, grace timers, viewport
//! triggers and scroll bindings. Views mount into it and receive a `ViewId`;
//! everything a view creates is torn down with it.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::animation::{Scheduler, TargetId, TimerHandle, Timers, TweenHandle, ViewId};
use crate::config::AnimationConfig;
use crate::scroll::{BindingHandle, ScrollBinding, ScrollBindings, ScrollRange};
use crate::viewport::{
    ElementGeometry, OnEnter, ScrollState, Threshold, TriggerHandle, TriggerRegistry,
};

/// What happened during one frame
#[derive(Debug, Clone, Default)]
pub struct FrameReport {
    pub now: Option<Instant>,
    /// Timers found due, earliest deadline first
    pub fired_timers: Vec<TimerHandle>,
    /// Tweens that reached their end this frame
    pub completed: Vec<TweenHandle>,
}

impl FrameReport {
    #[inline]
    pub fn timer_fired(&self, handle: TimerHandle) -> bool {
        self.fired_timers.contains(&handle)
    }

    pub fn is_idle(&self) -> bool {
        self.fired_timers.is_empty() && self.completed.is_empty()
    }
}

pub struct Runtime {
    scheduler: Scheduler,
    timers: Timers,
    triggers: TriggerRegistry,
    bindings: ScrollBindings,
    views: HashSet<ViewId>,
    last_scroll: Option<ScrollState>,
    clock: Option<Instant>,
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new(&AnimationConfig::default())
    }
}

impl Runtime {
    pub fn new(config: &AnimationConfig) -> Self {
        Self {
            scheduler: Scheduler::new(config),
            timers: Timers::default(),
            triggers: TriggerRegistry::default(),
            bindings: ScrollBindings::default(),
            views: HashSet::new(),
            last_scroll: None,
            clock: None,
        }
    }

    pub fn mount_view(&mut self) -> ViewId {
        let view = ViewId::new();
        self.views.insert(view);
        info!(%view, "View mounted");
        view
    }

    #[inline]
    pub fn is_mounted(&self, view: ViewId) -> bool {
        self.views.contains(&view)
    }

    pub fn view_count(&self) -> usize {
        self.views.len()
    }

    /// Cancel and unregister everything `view` owns
    ///
    /// Returns false if the view was not mounted.
    pub fn teardown(&mut self, view: ViewId) -> bool {
        if !self.views.remove(&view) {
            debug!(%view, "Ignoring teardown of unknown view");
            return false;
        }
        let timers = self.timers.cancel_view(view);
        let triggers = self.triggers.unregister_view(view);
        let bindings = self.bindings.unbind_view(view);
        let (tweens, targets) = self.scheduler.retire_view(view);
        info!(
            %view,
            tweens,
            timers,
            triggers,
            bindings,
            targets,
            "View torn down"
        );
        true
    }

    /// Tear down every mounted view
    pub fn shutdown(&mut self) {
        let views: Vec<ViewId> = self.views.iter().copied().collect();
        for view in views {
            self.teardown(view);
        }
        self.unregister_all_triggers();
        info!("Animation runtime drained");
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut Scheduler {
        &mut self.scheduler
    }

    /// Time of the last frame, or the wall clock before the first one
    pub fn now(&self) -> Instant {
        self.clock.unwrap_or_else(Instant::now)
    }

    pub fn last_scroll(&self) -> Option<ScrollState> {
        self.last_scroll
    }

    /// Schedule a one-shot timer `delay` after the current frame
    pub fn schedule_timer(&mut self, view: ViewId, delay: Duration) -> Option<TimerHandle> {
        if !self.is_mounted(view) {
            debug!(%view, "Ignoring timer for unmounted view");
            return None;
        }
        let deadline = self.now() + delay;
        Some(self.timers.schedule(view, deadline))
    }

    pub fn cancel_timer(&mut self, handle: TimerHandle) -> bool {
        self.timers.cancel(handle)
    }

    #[inline]
    pub fn is_timer_pending(&self, handle: TimerHandle) -> bool {
        self.timers.is_pending(handle)
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn register_trigger(
        &mut self,
        view: ViewId,
        element: TargetId,
        threshold: Threshold,
        on_enter: OnEnter,
    ) -> Option<TriggerHandle> {
        if !self.is_mounted(view) || !self.scheduler.is_live(element) {
            debug!(%view, %element, "Ignoring trigger for unmounted view");
            return None;
        }
        Some(self.triggers.register(view, element, threshold, on_enter))
    }

    pub fn unregister_trigger(&mut self, handle: TriggerHandle) -> bool {
        self.triggers.unregister(handle)
    }

    #[inline]
    pub fn is_trigger_registered(&self, handle: TriggerHandle) -> bool {
        self.triggers.is_registered(handle)
    }

    pub fn trigger_count(&self) -> usize {
        self.triggers.len()
    }

    /// Drop every viewport trigger, whichever view registered it
    pub fn unregister_all_triggers(&mut self) -> usize {
        let count = self.triggers.unregister_all();
        debug!(count, "Unregistered all triggers");
        count
    }

    /// Bind scroll progress over `range`
    ///
    /// Named ranges are resolved against `container`'s bounds on every
    /// notification. An invalid absolute range is reported here, once.
    pub fn bind_scroll(
        &mut self,
        view: ViewId,
        container: Option<TargetId>,
        range: ScrollRange,
    ) -> Option<BindingHandle> {
        if !self.is_mounted(view) {
            debug!(%view, "Ignoring scroll binding for unmounted view");
            return None;
        }
        Some(self.bindings.bind(view, ScrollBinding::new(container, range)))
    }

    pub fn unbind_scroll(&mut self, handle: BindingHandle) -> bool {
        self.bindings.unbind(handle)
    }

    /// Current progress of a binding, `None` once it is gone
    #[inline]
    pub fn progress(&self, handle: BindingHandle) -> Option<f64> {
        self.bindings.progress(handle)
    }

    pub fn binding(&self, handle: BindingHandle) -> Option<&ScrollBinding> {
        self.bindings.get(handle)
    }

    /// Scroll notification: fire crossed triggers, recompute bindings
    pub fn on_scroll(
        &mut self,
        state: ScrollState,
        geometry: &dyn ElementGeometry,
    ) -> Vec<TriggerHandle> {
        self.last_scroll = Some(state);
        let fired = self.triggers.evaluate(state, geometry, &mut self.scheduler);
        self.bindings.update_all(state, geometry);
        fired
    }

    /// Resize notification: named ranges re-resolve against the new layout
    pub fn on_resize(
        &mut self,
        state: ScrollState,
        geometry: &dyn ElementGeometry,
    ) -> Vec<TriggerHandle> {
        debug!(viewport_height = state.viewport_height, "Viewport resized");
        self.on_scroll(state, geometry)
    }

    /// Advance one frame
    ///
    /// `now` is read once: due timers fire first, then every tween advances
    /// with the same timestamp.
    pub fn frame(&mut self, now: Instant) -> FrameReport {
        self.clock = Some(now);
        let fired_timers = self.timers.fire_due(now);
        let completed = self.scheduler.tick(now);
        FrameReport {
            now: Some(now),
            fired_timers,
            completed,
        }
    }
}

impl std::fmt::Debug for Runtime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runtime")
            .field("views", &self.views.len())
            .field("tweens", &self.scheduler.active_count())
            .field("timers", &self.timers.len())
            .field("triggers", &self.triggers.len())
            .field("bindings", &self.bindings.len())
            .finish()
    }
}
