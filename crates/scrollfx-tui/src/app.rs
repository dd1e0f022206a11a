use std::time::Instant;

use anyhow::Result;
use tracing::debug;

use scrollfx_core::animation::{EasingType, Property, TargetId, TweenHandle, TweenSpec, ViewId};
use scrollfx_core::sections::{Page, SiteContent};
use scrollfx_core::{AppConfig, FrameReport, Runtime};

use crate::input::Action;

/// Document pixels per terminal row
pub const PX_PER_ROW: f64 = 20.0;
/// Document pixels per terminal column
pub const PX_PER_COL: f64 = 10.0;

const SCROLL_STEP_PX: f64 = 60.0;
const SCROLL_MS: u64 = 250;
const SCROLL_EASING: EasingType = EasingType::PowerOut(3);

/// Terminal preview state: the animated page plus a simulated pointer
pub struct App {
    pub config: AppConfig,
    pub runtime: Runtime,
    pub page: Page,
    /// Service row under the pointer
    pub focus: Option<usize>,
    /// Review card under the pointer
    pub card_focus: Option<usize>,
    pub on_preview: bool,
    pub pending_g: bool,
    pub status_message: Option<String>,
    pub should_quit: bool,
    pub last_report: FrameReport,
    scroll_view: ViewId,
    scroll_target: TargetId,
    scroll_dest: f64,
    scroll_tween: Option<TweenHandle>,
}

impl App {
    pub fn new(config: AppConfig, content: SiteContent, viewport_rows: u16) -> Result<Self> {
        let mut runtime = Runtime::new(&config.animation);
        let viewport_height = rows_to_px(viewport_rows);
        let mut page = Page::mount(&mut runtime, &config, content, viewport_height)?;

        // Smooth scrolling rides on the same scheduler as the page
        let scroll_view = runtime.mount_view();
        let scroll_target = runtime.scheduler_mut().target(scroll_view, "app.scroll");
        runtime.scheduler_mut().set(scroll_target, Property::Y, 0.0);
        page.scroll_to(&mut runtime, 0.0);

        Ok(Self {
            config,
            runtime,
            page,
            focus: None,
            card_focus: None,
            on_preview: false,
            pending_g: false,
            status_message: None,
            should_quit: false,
            last_report: FrameReport::default(),
            scroll_view,
            scroll_target,
            scroll_dest: 0.0,
            scroll_tween: None,
        })
    }

    /// Advance one frame and follow the scroll tween
    pub fn tick(&mut self, now: Instant) {
        self.last_report = self.page.frame(&mut self.runtime, now);
        let Some(y) = self.runtime.scheduler().value(self.scroll_target, Property::Y) else {
            return;
        };
        if (y - self.page.scroll_top()).abs() > f64::EPSILON {
            self.page.scroll_to(&mut self.runtime, y);
        }
    }

    pub fn is_scrolling(&self) -> bool {
        self.scroll_tween
            .is_some_and(|h| self.runtime.scheduler().is_active(h))
    }

    pub fn scroll_dest(&self) -> f64 {
        self.scroll_dest
    }

    pub fn scroll_by(&mut self, delta_px: f64) {
        self.scroll_to(self.scroll_dest + delta_px);
    }

    /// Ease towards `scroll_top`, retargeting any scroll in flight
    pub fn scroll_to(&mut self, scroll_top: f64) {
        let dest = scroll_top.clamp(0.0, self.page.max_scroll(&self.runtime));
        self.scroll_dest = dest;
        let spec = TweenSpec::millis(SCROLL_MS, SCROLL_EASING).to(Property::Y, dest);
        self.scroll_tween = self.runtime.scheduler_mut().start(self.scroll_target, spec);
    }

    pub fn resize(&mut self, rows: u16) {
        self.page.resize(&mut self.runtime, rows_to_px(rows));
        self.scroll_dest = self.scroll_dest.min(self.page.max_scroll(&self.runtime));
        let top = self.page.scroll_top();
        self.runtime.scheduler_mut().set(self.scroll_target, Property::Y, top);
    }

    pub fn apply(&mut self, action: Action) {
        if action != Action::PendingG {
            self.pending_g = false;
        }
        let half_page = self.page.viewport_height() / 2.0;

        match action {
            Action::Quit => self.should_quit = true,
            Action::ScrollDown => self.scroll_by(SCROLL_STEP_PX),
            Action::ScrollUp => self.scroll_by(-SCROLL_STEP_PX),
            Action::ScrollHalfPageDown => self.scroll_by(half_page),
            Action::ScrollHalfPageUp => self.scroll_by(-half_page),
            Action::JumpToTop => self.scroll_to(0.0),
            Action::JumpToBottom => self.scroll_to(f64::MAX),
            Action::PendingG => self.pending_g = true,
            Action::FocusNext => self.move_focus(1),
            Action::FocusPrev => self.move_focus(-1),
            Action::Blur => {
                if self.focus.take().is_some() {
                    self.page.services.hover_leave(&mut self.runtime);
                }
            }
            Action::TogglePreviewPointer => {
                self.on_preview = !self.on_preview;
                if self.on_preview {
                    self.page.services.preview_enter(&mut self.runtime);
                } else {
                    self.page.services.preview_leave(&mut self.runtime);
                }
            }
            Action::ToggleAccordion => {
                let index = self.focus.unwrap_or(0);
                self.page.toggle(&mut self.runtime, index);
            }
            Action::Open => {
                let index = self.focus.unwrap_or(0);
                self.status_message = self
                    .page
                    .services
                    .select(index)
                    .map(|req| format!(" Navigate to {}", req.path));
            }
            Action::NextCard => self.move_card_focus(),
            Action::ClearStatus => self.status_message = None,
            Action::None => {}
        }
    }

    fn move_focus(&mut self, step: isize) {
        let count = self.page.content().services.len();
        if count == 0 {
            return;
        }
        let next = match self.focus {
            Some(i) => (i as isize + step).rem_euclid(count as isize) as usize,
            None if step < 0 => count - 1,
            None => 0,
        };
        debug!(from = ?self.focus, next, "Hover focus moved");
        self.focus = Some(next);
        self.page.services.hover_enter(&mut self.runtime, next);
    }

    fn move_card_focus(&mut self) {
        let count = self.page.content().reviews.len();
        if let Some(i) = self.card_focus {
            self.page.reviews.card_leave(&mut self.runtime, i);
        }
        self.card_focus = match self.card_focus {
            Some(i) if i + 1 < count => Some(i + 1),
            Some(_) => None,
            None if count > 0 => Some(0),
            None => None,
        };
        if let Some(i) = self.card_focus {
            self.page.reviews.card_enter(&mut self.runtime, i);
        }
    }

    /// Tear down the page and the scroll view
    pub fn shutdown(&mut self) {
        self.page.unmount(&mut self.runtime);
        self.runtime.teardown(self.scroll_view);
    }
}

pub fn rows_to_px(rows: u16) -> f64 {
    f64::from(rows) * PX_PER_ROW
}

#[cfg(test)]
mod tests {
    use super::*;
    use scrollfx_core::HoverPhase;
    use std::time::Duration;

    fn app() -> (App, Instant) {
        let mut app = App::new(AppConfig::default(), SiteContent::demo(), 40).unwrap();
        let t0 = Instant::now();
        app.tick(t0);
        (app, t0)
    }

    #[test]
    fn test_scroll_eases_to_destination() {
        let (mut app, t0) = app();
        app.apply(Action::ScrollHalfPageDown);
        assert_eq!(app.scroll_dest(), 400.0);
        app.tick(t0 + Duration::from_millis(16));
        assert!(app.is_scrolling());
        app.tick(t0 + Duration::from_millis(300));
        assert_eq!(app.page.scroll_top(), 400.0);
        assert!(!app.is_scrolling());
    }

    #[test]
    fn test_scroll_clamps_at_top() {
        let (mut app, _) = app();
        app.apply(Action::ScrollUp);
        assert_eq!(app.scroll_dest(), 0.0);
    }

    #[test]
    fn test_focus_wraps_and_drives_hover() {
        let (mut app, _) = app();
        app.apply(Action::FocusPrev);
        let last = app.page.content().services.len() - 1;
        assert_eq!(app.focus, Some(last));
        app.apply(Action::FocusNext);
        assert_eq!(app.focus, Some(0));
        assert_eq!(app.page.services.hover().phase(), HoverPhase::Showing(0));

        app.apply(Action::Blur);
        assert_eq!(app.focus, None);
        assert!(matches!(
            app.page.services.hover().phase(),
            HoverPhase::PendingHide { index: 0, .. }
        ));
    }

    #[test]
    fn test_open_reports_navigation_path() {
        let (mut app, _) = app();
        app.apply(Action::Open);
        assert_eq!(
            app.status_message.as_deref(),
            Some(" Navigate to /subservice/website-development/subservices")
        );
    }

    #[test]
    fn test_card_focus_cycles_off_the_end() {
        let (mut app, _) = app();
        let count = app.page.content().reviews.len();
        for i in 0..count {
            app.apply(Action::NextCard);
            assert_eq!(app.card_focus, Some(i));
        }
        app.apply(Action::NextCard);
        assert_eq!(app.card_focus, None);
    }

    #[test]
    fn test_shutdown_tears_down_every_view() {
        let (mut app, _) = app();
        app.shutdown();
        assert_eq!(app.runtime.view_count(), 0);
    }
}
