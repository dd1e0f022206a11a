use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::info;

use scrollfx_core::sections::{Sample, Scenario, SiteContent, Simulator};
use scrollfx_core::AppConfig;

pub async fn run(config: &AppConfig, path: &Path, json: bool, realtime: bool) -> Result<()> {
    let scenario = Scenario::load(path)
        .with_context(|| format!("Failed to load scenario {}", path.display()))?;
    info!(
        path = %path.display(),
        steps = scenario.steps.len(),
        duration_ms = scenario.duration().as_millis() as u64,
        "Simulating scenario"
    );

    let samples = simulate(scenario, config)?;
    emit(&samples, json, realtime, |line| println!("{}", line)).await
}

pub fn simulate(scenario: Scenario, config: &AppConfig) -> Result<Vec<Sample>> {
    let mut simulator = Simulator::new(scenario, config, SiteContent::demo())?;
    Ok(simulator.run())
}

/// Write each sample, optionally waiting until its virtual timestamp
pub async fn emit<F>(samples: &[Sample], json: bool, realtime: bool, mut out: F) -> Result<()>
where
    F: FnMut(String),
{
    let start = tokio::time::Instant::now();
    for sample in samples {
        if realtime {
            tokio::time::sleep_until(start + Duration::from_millis(sample.t_ms)).await;
        }
        let line = if json {
            serde_json::to_string(sample)?
        } else {
            format_sample(sample)
        };
        out(line);
    }
    Ok(())
}

fn opt(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.2}", v))
}

fn format_sample(sample: &Sample) -> String {
    let heights: Vec<String> = sample
        .content_heights
        .iter()
        .map(|h| format!("{:.0}", h.unwrap_or(0.0)))
        .collect();
    let mut line = format!(
        "{:>6}ms scroll {:>6.0} title {} preview {:<12} op {} sc {} open {} h [{}] stack {} tweens {} timers {}",
        sample.t_ms,
        sample.scroll_top,
        opt(sample.title_opacity),
        sample.preview.phase,
        opt(sample.preview.opacity),
        opt(sample.preview.scale),
        sample
            .expanded
            .map_or_else(|| "-".to_string(), |i| i.to_string()),
        heights.join(" "),
        opt(sample.stack_progress),
        sample.active_tweens,
        sample.pending_timers,
    );
    if let Some(step) = &sample.step {
        line.push_str(&format!("  <- {}", step));
    }
    if let Some(path) = &sample.navigation {
        line.push_str(&format!(" => {}", path));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENARIO: &str = r#"
fps = 60
viewport_height = 800.0
sample_every_ms = 100

[[steps]]
action = "hover"
index = 0

[[steps]]
action = "wait_ms"
ms = 300

[[steps]]
action = "select"
index = 0
"#;

    fn samples() -> Vec<Sample> {
        let scenario = Scenario::parse(SCENARIO).unwrap();
        simulate(scenario, &AppConfig::default()).unwrap()
    }

    #[test]
    fn test_text_output_marks_steps() {
        let samples = samples();
        let first_step = samples.iter().find(|s| s.step.is_some()).unwrap();
        assert!(format_sample(first_step).contains("<- "));

        let last = samples.last().unwrap();
        assert!(format_sample(last).contains("=> /subservice/website-development/subservices"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_realtime_replay_waits_for_timestamps() {
        let samples = samples();
        let last_ms = samples.last().map(|s| s.t_ms).unwrap();
        assert!(last_ms >= 300);

        let start = tokio::time::Instant::now();
        let mut lines = Vec::new();
        emit(&samples, true, true, |line| lines.push(line)).await.unwrap();

        assert_eq!(lines.len(), samples.len());
        assert!(start.elapsed() >= Duration::from_millis(last_ms));
        let parsed: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
        assert_eq!(parsed["t_ms"], 0);
    }
}
