//! Services section: revealed heading and rows, the floating hover preview
//! and the expandable row accordion.

use tracing::debug;

use crate::accordion::{AccordionManager, NavigationRequest};
use crate::animation::{TargetId, ViewId};
use crate::config::AppConfig;
use crate::hover::HoverIntent;
use crate::runtime::{FrameReport, Runtime};
use crate::viewport::{ContentMeasure, Threshold, TriggerHandle};

use super::content::Service;
use super::presets::{SERVICES_SUBTITLE, SERVICES_TITLE, SERVICE_ROW};

#[derive(Debug)]
pub struct ServicesSection {
    view: ViewId,
    title: TargetId,
    subtitle: TargetId,
    rows: Vec<TargetId>,
    hover: HoverIntent,
    accordion: AccordionManager,
    reveals: Vec<TriggerHandle>,
}

impl ServicesSection {
    pub fn mount(
        rt: &mut Runtime,
        services: &[Service],
        config: &AppConfig,
        default_threshold: Threshold,
    ) -> Self {
        let view = rt.mount_view();
        let scheduler = rt.scheduler_mut();
        let title = scheduler.target(view, "services.title");
        let subtitle = scheduler.target(view, "services.subtitle");
        let rows: Vec<TargetId> = services
            .iter()
            .map(|s| scheduler.target(view, &format!("services.row.{}", s.id)))
            .collect();

        let mut reveals = Vec::with_capacity(rows.len() + 2);
        reveals.extend(SERVICES_TITLE.register(rt, view, title, 0, default_threshold));
        reveals.extend(SERVICES_SUBTITLE.register(rt, view, subtitle, 0, default_threshold));
        for (i, row) in rows.iter().enumerate() {
            reveals.extend(SERVICE_ROW.register(rt, view, *row, i, default_threshold));
        }

        let hover = HoverIntent::new(rt, view, "services.preview", config.hover.clone());
        let accordion = AccordionManager::new(
            rt,
            view,
            services.iter().map(|s| s.id.clone()),
            config.accordion.clone(),
        );

        debug!(%view, rows = rows.len(), "Services section mounted");
        Self {
            view,
            title,
            subtitle,
            rows,
            hover,
            accordion,
            reveals,
        }
    }

    pub fn view(&self) -> ViewId {
        self.view
    }

    pub fn title(&self) -> TargetId {
        self.title
    }

    pub fn subtitle(&self) -> TargetId {
        self.subtitle
    }

    pub fn rows(&self) -> &[TargetId] {
        &self.rows
    }

    pub fn hover(&self) -> &HoverIntent {
        &self.hover
    }

    pub fn accordion(&self) -> &AccordionManager {
        &self.accordion
    }

    /// Reveal triggers that have not fired yet
    pub fn pending_reveals(&self, rt: &Runtime) -> usize {
        self.reveals
            .iter()
            .filter(|h| rt.is_trigger_registered(**h))
            .count()
    }

    pub fn hover_enter(&mut self, rt: &mut Runtime, index: usize) {
        if index < self.rows.len() {
            self.hover.on_enter(rt, index);
        }
    }

    pub fn hover_leave(&mut self, rt: &mut Runtime) {
        self.hover.on_leave(rt);
    }

    pub fn preview_enter(&mut self, rt: &mut Runtime) {
        self.hover.on_target_enter(rt);
    }

    pub fn preview_leave(&mut self, rt: &mut Runtime) {
        self.hover.on_target_leave(rt);
    }

    pub fn toggle(&mut self, rt: &mut Runtime, index: usize, measure: &dyn ContentMeasure) -> bool {
        self.accordion.toggle(rt, index, measure)
    }

    pub fn select(&self, index: usize) -> Option<NavigationRequest> {
        self.accordion.select(index)
    }

    pub fn on_frame(&mut self, rt: &mut Runtime, report: &FrameReport, measure: &dyn ContentMeasure) {
        self.hover.on_frame(rt, report);
        self.accordion.on_frame(rt, measure);
    }

    /// Tear down everything this section registered
    pub fn unmount(&mut self, rt: &mut Runtime) -> bool {
        self.reveals.clear();
        rt.teardown(self.view)
    }
}
