//! Hover/focus debounce for the shared floating preview
//!
//! ```text
//! Idle ──enter(i)──▶ Showing(i) ──leave──▶ PendingHide(i, timer)
//!   ▲                    ▲                       │
//!   │                    └──enter / target_enter─┤
//!   └──────────── timer fires, pointer away ─────┘
//! ```
//!
//! Only one grace timer is alive at a time; arming a new one cancels the
//! previous. The preview is a single target, so every enter cancels whatever
//! tween is driving it before starting the shrink→grow morph.

use std::time::Duration;

use tracing::debug;

use crate::animation::{
    EasingType, Property, TargetId, TimerHandle, TweenHandle, TweenSpec, ViewId,
};
use crate::config::HoverConfig;
use crate::runtime::{FrameReport, Runtime};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverPhase {
    Idle,
    Showing(usize),
    PendingHide { index: usize, timer: TimerHandle },
}

#[derive(Debug)]
pub struct HoverIntent {
    view: ViewId,
    preview: TargetId,
    config: HoverConfig,
    phase: HoverPhase,
    /// Pointer is on the preview itself
    on_preview: bool,
    /// Content the preview shows; kept after hide so it fades with it
    content_index: Option<usize>,
    last_hide: Option<TweenHandle>,
}

impl HoverIntent {
    /// Register the preview target under `key` and park it hidden
    pub fn new(rt: &mut Runtime, view: ViewId, key: &str, config: HoverConfig) -> Self {
        let scheduler = rt.scheduler_mut();
        let preview = scheduler.target(view, key);
        scheduler.set(preview, Property::Opacity, 0.0);
        scheduler.set(preview, Property::Scale, config.hide_scale);
        scheduler.set(preview, Property::Width, config.collapsed_size);
        scheduler.set(preview, Property::Height, config.collapsed_size);

        Self {
            view,
            preview,
            config,
            phase: HoverPhase::Idle,
            on_preview: false,
            content_index: None,
            last_hide: None,
        }
    }

    pub fn phase(&self) -> HoverPhase {
        self.phase
    }

    /// Index the preview is showing, including during the grace window
    pub fn shown_index(&self) -> Option<usize> {
        match self.phase {
            HoverPhase::Idle => None,
            HoverPhase::Showing(index) | HoverPhase::PendingHide { index, .. } => Some(index),
        }
    }

    pub fn content_index(&self) -> Option<usize> {
        self.content_index
    }

    pub fn preview(&self) -> TargetId {
        self.preview
    }

    pub fn is_on_preview(&self) -> bool {
        self.on_preview
    }

    /// Handle of the most recent hide tween
    pub fn last_hide(&self) -> Option<TweenHandle> {
        self.last_hide
    }

    /// Pointer or focus entered row `index`
    pub fn on_enter(&mut self, rt: &mut Runtime, index: usize) {
        self.disarm(rt);
        let cancelled = rt.scheduler_mut().cancel_all_for(self.preview);
        debug!(index, cancelled, "Hover enter");

        self.phase = HoverPhase::Showing(index);
        self.content_index = Some(index);

        let c = &self.config;
        let grow = TweenSpec::millis(c.grow_ms, c.grow_easing)
            .from_to(Property::Opacity, 0.0, 1.0)
            .from_to(Property::Scale, c.shrink_scale, 1.0)
            .from_to(Property::Width, c.collapsed_size, c.expanded_size)
            .from_to(Property::Height, c.collapsed_size, c.expanded_size);
        let preview = self.preview;
        let shrink = TweenSpec::millis(c.shrink_ms, EasingType::default())
            .to(Property::Opacity, 0.0)
            .to(Property::Scale, c.shrink_scale)
            .on_complete(move |scheduler| {
                scheduler.start(preview, grow);
            });
        rt.scheduler_mut().start(self.preview, shrink);
    }

    /// Pointer or focus left the row
    pub fn on_leave(&mut self, rt: &mut Runtime) {
        if let Some(index) = self.shown_index() {
            self.arm(rt, index, self.config.leave_grace_ms);
        }
    }

    /// Pointer moved onto the preview itself
    pub fn on_target_enter(&mut self, rt: &mut Runtime) {
        self.on_preview = true;
        if let HoverPhase::PendingHide { index, .. } = self.phase {
            self.disarm(rt);
            self.phase = HoverPhase::Showing(index);
        }
    }

    /// Pointer left the preview
    pub fn on_target_leave(&mut self, rt: &mut Runtime) {
        self.on_preview = false;
        if let Some(index) = self.shown_index() {
            self.arm(rt, index, self.config.target_grace_ms);
        }
    }

    /// React to a frame: hide once our grace timer fires
    pub fn on_frame(&mut self, rt: &mut Runtime, report: &FrameReport) {
        let HoverPhase::PendingHide { index, timer } = self.phase else {
            return;
        };
        if !report.timer_fired(timer) {
            return;
        }
        if self.on_preview {
            debug!(index, "Grace window elapsed on preview, hide suppressed");
            self.phase = HoverPhase::Showing(index);
        } else {
            self.hide(rt);
        }
    }

    fn hide(&mut self, rt: &mut Runtime) {
        self.phase = HoverPhase::Idle;
        let c = &self.config;
        let spec = TweenSpec::millis(c.hide_ms, c.hide_easing)
            .to(Property::Opacity, 0.0)
            .to(Property::Scale, c.hide_scale)
            .to(Property::Width, c.collapsed_size)
            .to(Property::Height, c.collapsed_size);
        self.last_hide = rt.scheduler_mut().start(self.preview, spec);
        debug!(hide = ?self.last_hide, "Hiding preview");
    }

    // Replaces any pending timer
    fn arm(&mut self, rt: &mut Runtime, index: usize, grace_ms: u64) {
        self.disarm(rt);
        match rt.schedule_timer(self.view, Duration::from_millis(grace_ms)) {
            Some(timer) => self.phase = HoverPhase::PendingHide { index, timer },
            None => self.phase = HoverPhase::Idle,
        }
    }

    fn disarm(&mut self, rt: &mut Runtime) {
        if let HoverPhase::PendingHide { index, timer } = self.phase {
            rt.cancel_timer(timer);
            self.phase = HoverPhase::Showing(index);
        }
    }
}
