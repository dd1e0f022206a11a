//! Scripted interaction scenarios replayed on a virtual clock
//!
//! ```toml
//! fps = 60
//! viewport_height = 800
//!
//! [[steps]]
//! action = "scroll"
//! to = 600
//!
//! [[steps]]
//! action = "hover"
//! index = 2
//!
//! [[steps]]
//! action = "wait_ms"
//! ms = 500
//! ```

use std::path::Path;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::animation::Property;
use crate::config::AppConfig;
use crate::hover::HoverPhase;
use crate::runtime::Runtime;

use super::content::SiteContent;
use super::page::Page;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default = "default_fps")]
    pub fps: u32,
    #[serde(default = "default_viewport_height")]
    pub viewport_height: f64,
    /// Sampling period while waiting
    #[serde(default = "default_sample_every")]
    pub sample_every_ms: u64,
    #[serde(default)]
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    Scroll { to: f64 },
    Resize { viewport_height: f64 },
    Hover { index: usize },
    Leave,
    PreviewEnter,
    PreviewLeave,
    Toggle { index: usize },
    Select { index: usize },
    CardEnter { index: usize },
    CardLeave { index: usize },
    WaitMs { ms: u64 },
    Unmount,
}

/// Highest frame rate a replay accepts; one frame per millisecond
pub const MAX_FPS: u32 = 1000;

fn default_fps() -> u32 {
    60
}

fn default_viewport_height() -> f64 {
    800.0
}

fn default_sample_every() -> u64 {
    100
}

impl Scenario {
    pub fn load(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> crate::Result<Self> {
        let scenario: Scenario =
            toml::from_str(content).map_err(|e| crate::Error::Scenario(e.to_string()))?;
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn validate(&self) -> crate::Result<()> {
        if self.fps == 0 {
            return Err(crate::Error::Scenario("fps must be positive".to_string()));
        }
        if self.fps > MAX_FPS {
            return Err(crate::Error::Scenario(format!(
                "fps must be at most {}, got {}",
                MAX_FPS, self.fps
            )));
        }
        if self.viewport_height <= 0.0 {
            return Err(crate::Error::Scenario(
                "viewport_height must be positive".to_string(),
            ));
        }
        if self.sample_every_ms == 0 {
            return Err(crate::Error::Scenario(
                "sample_every_ms must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn frame_duration(&self) -> Duration {
        Duration::from_micros(1_000_000 / self.fps.max(1) as u64)
    }

    /// Total virtual time spent waiting
    pub fn duration(&self) -> Duration {
        self.steps
            .iter()
            .map(|step| match step {
                Step::WaitMs { ms } => Duration::from_millis(*ms),
                _ => Duration::ZERO,
            })
            .sum()
    }
}

/// Preview state at one instant
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreviewSample {
    pub phase: String,
    pub content_index: Option<usize>,
    pub opacity: Option<f64>,
    pub scale: Option<f64>,
    pub size: Option<f64>,
}

/// Observable state at one instant
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sample {
    pub t_ms: u64,
    /// Step applied right before this sample, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<String>,
    pub scroll_top: f64,
    pub title_opacity: Option<f64>,
    pub preview: PreviewSample,
    pub expanded: Option<usize>,
    pub content_heights: Vec<Option<f64>>,
    pub card_y: Vec<Option<f64>>,
    pub highlight_width: Vec<Option<f64>>,
    pub stack_progress: Option<f64>,
    pub stack_scales: Vec<Option<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub navigation: Option<String>,
    pub active_tweens: usize,
    pub pending_timers: usize,
}

pub struct Simulator {
    rt: Runtime,
    page: Page,
    scenario: Scenario,
    base: Instant,
    elapsed: Duration,
    next_sample: Duration,
}

impl Simulator {
    pub fn new(scenario: Scenario, config: &AppConfig, content: SiteContent) -> crate::Result<Self> {
        scenario.validate()?;
        let mut animation = config.animation.clone();
        animation.fps = scenario.fps;

        let mut rt = Runtime::new(&animation);
        let base = Instant::now();
        rt.frame(base);
        let mut page = Page::mount(&mut rt, config, content, scenario.viewport_height)?;
        page.scroll_to(&mut rt, 0.0);

        info!(
            steps = scenario.steps.len(),
            fps = scenario.fps,
            "Scenario loaded"
        );
        Ok(Self {
            rt,
            page,
            next_sample: Duration::from_millis(scenario.sample_every_ms),
            scenario,
            base,
            elapsed: Duration::ZERO,
        })
    }

    pub fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    pub fn runtime(&self) -> &Runtime {
        &self.rt
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Replay every step, returning all samples
    pub fn run(&mut self) -> Vec<Sample> {
        let steps = self.scenario.steps.clone();
        let mut samples = vec![self.sample(None)];
        for step in &steps {
            samples.extend(self.apply(step));
        }
        samples
    }

    /// Apply one step; waits advance the clock frame by frame
    pub fn apply(&mut self, step: &Step) -> Vec<Sample> {
        if let Step::WaitMs { ms } = step {
            let until = self.elapsed + Duration::from_millis(*ms);
            let mut samples = Vec::new();
            while self.elapsed < until {
                samples.extend(self.advance_frame());
            }
            return samples;
        }

        debug!(?step, t_ms = self.elapsed.as_millis() as u64, "Applying step");
        let rt = &mut self.rt;
        let page = &mut self.page;
        let mut navigation = None;
        match step {
            Step::Scroll { to } => page.scroll_to(rt, *to),
            Step::Resize { viewport_height } => page.resize(rt, *viewport_height),
            Step::Hover { index } => page.services.hover_enter(rt, *index),
            Step::Leave => page.services.hover_leave(rt),
            Step::PreviewEnter => page.services.preview_enter(rt),
            Step::PreviewLeave => page.services.preview_leave(rt),
            Step::Toggle { index } => {
                page.toggle(rt, *index);
            }
            Step::Select { index } => {
                navigation = page.services.select(*index).map(|nav| nav.path);
            }
            Step::CardEnter { index } => {
                page.reviews.card_enter(rt, *index);
            }
            Step::CardLeave { index } => {
                page.reviews.card_leave(rt, *index);
            }
            Step::Unmount => page.unmount(rt),
            Step::WaitMs { .. } => {}
        }

        let mut sample = self.sample(Some(step_label(step)));
        sample.navigation = navigation;
        vec![sample]
    }

    /// Advance one frame; returns a sample when one is due
    pub fn advance_frame(&mut self) -> Option<Sample> {
        self.elapsed += self.scenario.frame_duration();
        self.page.frame(&mut self.rt, self.base + self.elapsed);
        if self.elapsed >= self.next_sample {
            self.next_sample += Duration::from_millis(self.scenario.sample_every_ms);
            Some(self.sample(None))
        } else {
            None
        }
    }

    pub fn sample(&self, step: Option<String>) -> Sample {
        let s = self.rt.scheduler();
        let page = &self.page;
        let hover = page.services.hover();
        let preview = hover.preview();
        let accordion = page.services.accordion();

        Sample {
            t_ms: self.elapsed.as_millis() as u64,
            step,
            scroll_top: page.scroll_top(),
            title_opacity: s.value(page.services.title(), Property::Opacity),
            preview: PreviewSample {
                phase: phase_label(hover.phase()),
                content_index: hover.content_index(),
                opacity: s.value(preview, Property::Opacity),
                scale: s.value(preview, Property::Scale),
                size: s.value(preview, Property::Width),
            },
            expanded: accordion.expanded_index(),
            content_heights: (0..accordion.len())
                .map(|i| accordion.content(i).and_then(|c| s.value(c, Property::Height)))
                .collect(),
            card_y: page
                .reviews
                .cards()
                .iter()
                .map(|c| s.value(*c, Property::Y))
                .collect(),
            highlight_width: page
                .reviews
                .highlights()
                .iter()
                .map(|h| s.value(*h, Property::WidthPercent))
                .collect(),
            stack_progress: page.portfolio.progress(&self.rt),
            stack_scales: page
                .portfolio
                .items()
                .iter()
                .map(|i| s.value(*i, Property::Scale))
                .collect(),
            navigation: None,
            active_tweens: s.active_count(),
            pending_timers: self.rt.pending_timers(),
        }
    }
}

fn step_label(step: &Step) -> String {
    match step {
        Step::Scroll { to } => format!("scroll {}", to),
        Step::Resize { viewport_height } => format!("resize {}", viewport_height),
        Step::Hover { index } => format!("hover {}", index),
        Step::Leave => "leave".to_string(),
        Step::PreviewEnter => "preview_enter".to_string(),
        Step::PreviewLeave => "preview_leave".to_string(),
        Step::Toggle { index } => format!("toggle {}", index),
        Step::Select { index } => format!("select {}", index),
        Step::CardEnter { index } => format!("card_enter {}", index),
        Step::CardLeave { index } => format!("card_leave {}", index),
        Step::WaitMs { ms } => format!("wait {}ms", ms),
        Step::Unmount => "unmount".to_string(),
    }
}

fn phase_label(phase: HoverPhase) -> String {
    match phase {
        HoverPhase::Idle => "idle".to_string(),
        HoverPhase::Showing(i) => format!("showing({})", i),
        HoverPhase::PendingHide { index, .. } => format!("pending_hide({})", index),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENARIO: &str = r#"
        fps = 50
        viewport_height = 800
        sample_every_ms = 100

        [[steps]]
        action = "hover"
        index = 1

        [[steps]]
        action = "wait_ms"
        ms = 800

        [[steps]]
        action = "leave"

        [[steps]]
        action = "wait_ms"
        ms = 600

        [[steps]]
        action = "toggle"
        index = 0

        [[steps]]
        action = "select"
        index = 0
    "#;

    #[test]
    fn test_parse_steps() {
        let scenario = Scenario::parse(SCENARIO).unwrap();
        assert_eq!(scenario.fps, 50);
        assert_eq!(scenario.steps[0], Step::Hover { index: 1 });
        assert_eq!(scenario.steps[2], Step::Leave);
        assert_eq!(scenario.duration(), Duration::from_millis(1400));
        assert_eq!(scenario.frame_duration(), Duration::from_millis(20));
    }

    #[test]
    fn test_rejects_bad_scenarios() {
        assert!(Scenario::parse("fps = 0").is_err());
        assert!(Scenario::parse("[[steps]]\naction = \"fly\"").is_err());
        assert!(Scenario::parse("viewport_height = -1.0").is_err());
    }

    #[test]
    fn test_rejects_frame_rate_above_limit() {
        let err = Scenario::parse("fps = 2000000").unwrap_err();
        assert!(err.to_string().contains("fps must be at most 1000"));
        let top = Scenario::parse("fps = 1000").unwrap();
        assert_eq!(top.frame_duration(), Duration::from_millis(1));
    }

    #[test]
    fn test_replay_hover_then_hide() {
        let scenario = Scenario::parse(SCENARIO).unwrap();
        let mut sim = Simulator::new(scenario, &AppConfig::default(), SiteContent::demo()).unwrap();
        let samples = sim.run();

        let after_grow = samples
            .iter()
            .find(|s| s.t_ms == 800 && s.step.is_none())
            .unwrap();
        assert_eq!(after_grow.preview.phase, "showing(1)");
        assert_eq!(after_grow.preview.opacity, Some(1.0));
        assert_eq!(after_grow.preview.size, Some(300.0));

        let end = samples.iter().rev().find(|s| s.step.is_none()).unwrap();
        assert_eq!(end.t_ms, 1400);
        assert_eq!(end.preview.phase, "idle");
        assert_eq!(end.preview.opacity, Some(0.0));
        assert_eq!(end.preview.content_index, Some(1));

        let last = samples.last().unwrap();
        assert_eq!(last.navigation.as_deref(), Some("/subservice/website-development/subservices"));
        assert_eq!(last.expanded, Some(0));
        assert_eq!(sim.elapsed(), Duration::from_millis(1400));
    }
}
