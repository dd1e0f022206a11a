//! Accordion expand/collapse manager
//!
//! At most one item is expanded. The expand height is measured from the
//! content before any property is written; while the content cannot be
//! measured the expand waits, retrying once per frame up to a bound before
//! falling back to a configured height.

use serde::Serialize;
use tracing::{debug, warn};

use crate::animation::{Property, TargetId, TweenHandle, TweenSpec, ViewId};
use crate::config::AccordionConfig;
use crate::runtime::Runtime;
use crate::viewport::ContentMeasure;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemPhase {
    Collapsed,
    Expanding,
    Expanded,
    Collapsing,
}

/// Route change requested by selecting an item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationRequest {
    pub item_id: String,
    pub path: String,
}

#[derive(Debug, Clone)]
struct AccordionItem {
    id: String,
    content: TargetId,
    tween: Option<TweenHandle>,
}

#[derive(Debug, Clone, Copy)]
struct PendingMeasure {
    index: usize,
    attempts: u32,
}

#[derive(Debug)]
pub struct AccordionManager {
    config: AccordionConfig,
    items: Vec<AccordionItem>,
    expanded: Option<usize>,
    pending: Option<PendingMeasure>,
}

impl AccordionManager {
    /// Register one collapsed content block per item id
    pub fn new<I, S>(rt: &mut Runtime, view: ViewId, ids: I, config: AccordionConfig) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let scheduler = rt.scheduler_mut();
        let items = ids
            .into_iter()
            .map(|id| {
                let id = id.into();
                let content = scheduler.target(view, &format!("accordion.{}.content", id));
                scheduler.set(content, Property::Height, 0.0);
                scheduler.set(content, Property::Opacity, 0.0);
                AccordionItem {
                    id,
                    content,
                    tween: None,
                }
            })
            .collect();

        Self {
            config,
            items,
            expanded: None,
            pending: None,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn expanded_index(&self) -> Option<usize> {
        self.expanded
    }

    /// Content block of item `index`
    pub fn content(&self, index: usize) -> Option<TargetId> {
        self.items.get(index).map(|item| item.content)
    }

    pub fn item_id(&self, index: usize) -> Option<&str> {
        self.items.get(index).map(|item| item.id.as_str())
    }

    /// Latest tween issued for item `index`
    pub fn tween(&self, index: usize) -> Option<TweenHandle> {
        self.items.get(index).and_then(|item| item.tween)
    }

    pub fn phase(&self, rt: &Runtime, index: usize) -> ItemPhase {
        let animating = self
            .tween(index)
            .is_some_and(|handle| rt.scheduler().is_active(handle));
        let awaiting_measure = self.pending.is_some_and(|p| p.index == index);

        match (self.expanded == Some(index), animating || awaiting_measure) {
            (true, true) => ItemPhase::Expanding,
            (true, false) => ItemPhase::Expanded,
            (false, true) => ItemPhase::Collapsing,
            (false, false) => ItemPhase::Collapsed,
        }
    }

    /// Toggle item `index`; returns false for an unknown index
    ///
    /// Toggling the expanded item collapses it. Toggling another item
    /// collapses the expanded one and expands the new one.
    pub fn toggle(&mut self, rt: &mut Runtime, index: usize, measure: &dyn ContentMeasure) -> bool {
        if index >= self.items.len() {
            return false;
        }

        if self.expanded == Some(index) {
            self.pending = None;
            self.collapse(rt, index);
            self.expanded = None;
            return true;
        }

        if let Some(previous) = self.expanded.take() {
            self.collapse(rt, previous);
        }
        self.expanded = Some(index);
        self.pending = None;

        match measure.natural_height(self.items[index].content) {
            Some(height) => self.expand(rt, index, height),
            None => {
                debug!(index, "Content not measurable yet, deferring expand");
                self.pending = Some(PendingMeasure { index, attempts: 0 });
            }
        }
        true
    }

    /// Retry a deferred measurement
    pub fn on_frame(&mut self, rt: &mut Runtime, measure: &dyn ContentMeasure) {
        let Some(mut pending) = self.pending else {
            return;
        };
        let content = self.items[pending.index].content;

        if let Some(height) = measure.natural_height(content) {
            self.pending = None;
            self.expand(rt, pending.index, height);
            return;
        }

        pending.attempts += 1;
        if pending.attempts >= self.config.measure_retries {
            warn!(
                index = pending.index,
                attempts = pending.attempts,
                fallback = self.config.fallback_height,
                "Content never measured, expanding to fallback height"
            );
            self.pending = None;
            self.expand(rt, pending.index, self.config.fallback_height);
        } else {
            self.pending = Some(pending);
        }
    }

    /// Navigation event for item `index`
    pub fn select(&self, index: usize) -> Option<NavigationRequest> {
        self.items.get(index).map(|item| NavigationRequest {
            item_id: item.id.clone(),
            path: format!("/subservice/{}/subservices", item.id),
        })
    }

    // Always grows from closed, even over a collapse in flight
    fn expand(&mut self, rt: &mut Runtime, index: usize, height: f64) {
        let spec = TweenSpec::millis(self.config.expand_ms, self.config.expand_easing)
            .from_to(Property::Height, 0.0, height)
            .from_to(Property::Opacity, 0.0, 1.0);
        let item = &mut self.items[index];
        item.tween = rt.scheduler_mut().start(item.content, spec);
        debug!(index, height, "Expanding accordion item");
    }

    fn collapse(&mut self, rt: &mut Runtime, index: usize) {
        let spec = TweenSpec::millis(self.config.collapse_ms, self.config.collapse_easing)
            .to(Property::Height, 0.0)
            .to(Property::Opacity, 0.0);
        let item = &mut self.items[index];
        item.tween = rt.scheduler_mut().start(item.content, spec);
        debug!(index, "Collapsing accordion item");
    }
}
