//! The whole page: services, reviews and portfolio stacked vertically
//!
//! Lays the sections out in document pixels, feeds scroll and frame
//! notifications through the runtime and routes them to each section.

use std::time::Instant;

use tracing::info;

use crate::animation::Property;
use crate::config::AppConfig;
use crate::runtime::{FrameReport, Runtime};
use crate::viewport::{Bounds, ElementGeometry, ScrollState, StaticLayout, Threshold};

use super::content::SiteContent;
use super::portfolio::PortfolioSection;
use super::reviews::ReviewsSection;
use super::services::ServicesSection;

const SECTION_PADDING: f64 = 128.0;
const SERVICES_TITLE_HEIGHT: f64 = 160.0;
const SERVICES_SUBTITLE_HEIGHT: f64 = 60.0;
const SERVICE_ROW_HEIGHT: f64 = 120.0;
const SUBSERVICE_HEIGHT: f64 = 56.0;
const REVIEWS_TITLE_HEIGHT: f64 = 140.0;
const REVIEW_CARD_HEIGHT: f64 = 360.0;
const REVIEW_CARD_GAP: f64 = 32.0;
const HIGHLIGHT_OFFSET: f64 = 200.0;
const HIGHLIGHT_HEIGHT: f64 = 40.0;

#[derive(Debug)]
pub struct Page {
    content: SiteContent,
    pub services: ServicesSection,
    pub reviews: ReviewsSection,
    pub portfolio: PortfolioSection,
    scroll_top: f64,
    viewport_height: f64,
    mounted: bool,
}

impl Page {
    pub fn mount(
        rt: &mut Runtime,
        config: &AppConfig,
        content: SiteContent,
        viewport_height: f64,
    ) -> crate::Result<Self> {
        let default_threshold: Threshold = config.viewport.default_threshold.parse()?;
        let services = ServicesSection::mount(rt, &content.services, config, default_threshold);
        let reviews = ReviewsSection::mount(rt, &content.reviews, default_threshold);
        let portfolio = PortfolioSection::mount(rt, content.projects.len(), config.stack.clone());
        info!(
            services = content.services.len(),
            reviews = content.reviews.len(),
            projects = content.projects.len(),
            "Page mounted"
        );

        Ok(Self {
            content,
            services,
            reviews,
            portfolio,
            scroll_top: 0.0,
            viewport_height,
            mounted: true,
        })
    }

    pub fn content(&self) -> &SiteContent {
        &self.content
    }

    pub fn scroll_top(&self) -> f64 {
        self.scroll_top
    }

    pub fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn scroll_state(&self) -> ScrollState {
        ScrollState::new(self.scroll_top, self.viewport_height)
    }

    /// Natural height of a service's expanded content
    pub fn natural_height(&self, index: usize) -> Option<f64> {
        self.content
            .services
            .get(index)
            .map(|s| s.subservices.len() as f64 * SUBSERVICE_HEIGHT + 48.0)
    }

    /// Document geometry for the current animated state
    ///
    /// Rows below an expanding accordion item move down with its height.
    pub fn layout(&self, rt: &Runtime) -> StaticLayout {
        let scheduler = rt.scheduler();
        let mut layout = StaticLayout::new();

        // Services
        let mut y = SECTION_PADDING;
        layout.place(self.services.title(), Bounds::new(y, SERVICES_TITLE_HEIGHT));
        y += SERVICES_TITLE_HEIGHT + 48.0;
        layout.place(self.services.subtitle(), Bounds::new(y, SERVICES_SUBTITLE_HEIGHT));
        y += SERVICES_SUBTITLE_HEIGHT + 80.0;
        let accordion = self.services.accordion();
        for (i, row) in self.services.rows().iter().enumerate() {
            layout.place(*row, Bounds::new(y, SERVICE_ROW_HEIGHT));
            y += SERVICE_ROW_HEIGHT;
            if let Some(content) = accordion.content(i) {
                let height = scheduler.value(content, Property::Height).unwrap_or(0.0);
                layout.place(content, Bounds::new(y, height));
                if let Some(natural) = self.natural_height(i) {
                    layout.set_natural_height(content, natural);
                }
                y += height;
            }
        }
        y += SECTION_PADDING;

        // Reviews
        y += SECTION_PADDING;
        layout.place(self.reviews.title(), Bounds::new(y, REVIEWS_TITLE_HEIGHT));
        y += REVIEWS_TITLE_HEIGHT + 64.0;
        let cards = self.reviews.cards().iter().zip(self.reviews.highlights());
        for (card, highlight) in cards {
            layout.place(*card, Bounds::new(y, REVIEW_CARD_HEIGHT));
            layout.place(*highlight, Bounds::new(y + HIGHLIGHT_OFFSET, HIGHLIGHT_HEIGHT));
            y += REVIEW_CARD_HEIGHT + REVIEW_CARD_GAP;
        }
        y += SECTION_PADDING;

        // Portfolio: one viewport of scroll per stacked item
        let items = self.portfolio.items();
        let container_height = items.len() as f64 * self.viewport_height;
        layout.place(self.portfolio.container(), Bounds::new(y, container_height));
        for (i, item) in items.iter().enumerate() {
            layout.place(*item, Bounds::new(y + i as f64 * self.viewport_height, self.viewport_height));
        }

        layout
    }

    /// Total scrollable height
    pub fn document_height(&self, rt: &Runtime) -> f64 {
        let layout = self.layout(rt);
        [
            self.portfolio.container(),
            self.reviews.title(),
            self.services.title(),
        ]
        .iter()
        .filter_map(|t| layout.bounds(*t))
        .map(|b| b.bottom())
        .fold(0.0, f64::max)
    }

    pub fn max_scroll(&self, rt: &Runtime) -> f64 {
        (self.document_height(rt) - self.viewport_height).max(0.0)
    }

    /// Scroll to `scroll_top` and notify the runtime
    pub fn scroll_to(&mut self, rt: &mut Runtime, scroll_top: f64) {
        self.scroll_top = scroll_top.clamp(0.0, self.max_scroll(rt));
        let layout = self.layout(rt);
        rt.on_scroll(self.scroll_state(), &layout);
        self.portfolio.apply(rt);
    }

    pub fn resize(&mut self, rt: &mut Runtime, viewport_height: f64) {
        self.viewport_height = viewport_height;
        self.scroll_top = self.scroll_top.clamp(0.0, self.max_scroll(rt));
        let layout = self.layout(rt);
        rt.on_resize(self.scroll_state(), &layout);
        self.portfolio.apply(rt);
    }

    pub fn toggle(&mut self, rt: &mut Runtime, index: usize) -> bool {
        let layout = self.layout(rt);
        self.services.toggle(rt, index, &layout)
    }

    /// Advance one frame and let each section react
    pub fn frame(&mut self, rt: &mut Runtime, now: Instant) -> FrameReport {
        let report = rt.frame(now);
        let layout = self.layout(rt);
        self.services.on_frame(rt, &report, &layout);
        self.portfolio.apply(rt);
        report
    }

    /// Tear down every section
    pub fn unmount(&mut self, rt: &mut Runtime) {
        if !self.mounted {
            return;
        }
        self.services.unmount(rt);
        self.reviews.unmount(rt);
        self.portfolio.unmount(rt);
        self.mounted = false;
        info!("Page unmounted");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hover::HoverPhase;
    use std::time::Duration;

    fn mount() -> (Runtime, Page, Instant) {
        let mut rt = Runtime::default();
        let t0 = Instant::now();
        rt.frame(t0);
        let page = Page::mount(&mut rt, &AppConfig::default(), SiteContent::demo(), 800.0).unwrap();
        (rt, page, t0)
    }

    #[test]
    fn test_initial_scroll_reveals_heading() {
        let (mut rt, mut page, t0) = mount();
        page.scroll_to(&mut rt, 0.0);
        // Heading and the first three rows (tops 476, 596, 716) sit above 90% of 800
        assert_eq!(page.services.pending_reveals(&rt), 3);
        page.frame(&mut rt, t0 + Duration::from_millis(16));
        page.frame(&mut rt, t0 + Duration::from_millis(2000));
        let title = page.services.title();
        assert_eq!(rt.scheduler().value(title, Property::Opacity), Some(1.0));
        assert_eq!(rt.scheduler().value(title, Property::Y), Some(0.0));
    }

    #[test]
    fn test_scroll_to_bottom_fires_everything() {
        let (mut rt, mut page, _) = mount();
        page.scroll_to(&mut rt, f64::MAX);
        assert_eq!(page.scroll_top(), page.max_scroll(&rt));
        assert_eq!(page.services.pending_reveals(&rt), 0);
        assert_eq!(page.reviews.pending_reveals(&rt), 0);
        assert_eq!(page.portfolio.progress(&rt), Some(1.0));
    }

    #[test]
    fn test_toggle_measures_content() {
        let (mut rt, mut page, t0) = mount();
        assert!(page.toggle(&mut rt, 0));
        page.frame(&mut rt, t0 + Duration::from_millis(16));
        page.frame(&mut rt, t0 + Duration::from_millis(600));
        let content = page.services.accordion().content(0).unwrap();
        assert_eq!(
            rt.scheduler().value(content, Property::Height),
            page.natural_height(0)
        );
    }

    #[test]
    fn test_unmount_makes_everything_inert() {
        let (mut rt, mut page, t0) = mount();
        page.services.hover_enter(&mut rt, 0);
        page.services.hover_leave(&mut rt);
        page.unmount(&mut rt);
        page.unmount(&mut rt);
        assert_eq!(rt.view_count(), 0);

        let report = page.frame(&mut rt, t0 + Duration::from_millis(500));
        assert!(report.is_idle());
        assert!(matches!(page.services.hover().phase(), HoverPhase::PendingHide { .. }));
        assert_eq!(rt.scheduler().value(page.services.hover().preview(), Property::Opacity), None);
    }
}
