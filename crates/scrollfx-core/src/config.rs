use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub animation: AnimationConfig,
    #[serde(default)]
    pub viewport: ViewportConfig,
    #[serde(default)]
    pub hover: HoverConfig,
    #[serde(default)]
    pub accordion: AccordionConfig,
    #[serde(default)]
    pub stack: StackConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level used when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimationConfig {
    /// Frame ticks per second
    #[serde(default = "default_fps")]
    pub fps: u32,
    /// Snap every tween to its final values on the first frame
    #[serde(default)]
    pub reduced_motion: bool,
    /// How many retired tweens keep a queryable final state
    #[serde(default = "default_history_len")]
    pub history_len: usize,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            fps: default_fps(),
            reduced_motion: false,
            history_len: default_history_len(),
        }
    }
}

impl AnimationConfig {
    /// Duration of a single frame tick
    pub fn frame_duration(&self) -> Duration {
        if self.fps == 0 {
            Duration::from_millis(16) // ~60fps fallback
        } else {
            Duration::from_micros(1_000_000 / self.fps as u64)
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewportConfig {
    /// Reveal threshold used when a section does not name one
    #[serde(default = "default_threshold")]
    pub default_threshold: String,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            default_threshold: default_threshold(),
        }
    }
}

/// Timings and geometry of the floating hover preview
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HoverConfig {
    /// Grace window after the pointer leaves a row
    #[serde(default = "default_leave_grace")]
    pub leave_grace_ms: u64,
    /// Grace window after the pointer leaves the preview itself
    #[serde(default = "default_target_grace")]
    pub target_grace_ms: u64,
    #[serde(default = "default_shrink_ms")]
    pub shrink_ms: u64,
    #[serde(default = "default_shrink_scale")]
    pub shrink_scale: f64,
    #[serde(default = "default_grow_ms")]
    pub grow_ms: u64,
    #[serde(default = "default_grow_easing")]
    pub grow_easing: EasingType,
    /// Preview edge length while collapsed
    #[serde(default = "default_collapsed_size")]
    pub collapsed_size: f64,
    /// Preview edge length while fully shown
    #[serde(default = "default_expanded_size")]
    pub expanded_size: f64,
    #[serde(default = "default_hide_ms")]
    pub hide_ms: u64,
    #[serde(default = "default_hide_scale")]
    pub hide_scale: f64,
    #[serde(default = "default_hide_easing")]
    pub hide_easing: EasingType,
}

impl Default for HoverConfig {
    fn default() -> Self {
        Self {
            leave_grace_ms: default_leave_grace(),
            target_grace_ms: default_target_grace(),
            shrink_ms: default_shrink_ms(),
            shrink_scale: default_shrink_scale(),
            grow_ms: default_grow_ms(),
            grow_easing: default_grow_easing(),
            collapsed_size: default_collapsed_size(),
            expanded_size: default_expanded_size(),
            hide_ms: default_hide_ms(),
            hide_scale: default_hide_scale(),
            hide_easing: default_hide_easing(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccordionConfig {
    #[serde(default = "default_expand_ms")]
    pub expand_ms: u64,
    #[serde(default = "default_expand_easing")]
    pub expand_easing: EasingType,
    #[serde(default = "default_collapse_ms")]
    pub collapse_ms: u64,
    #[serde(default = "default_collapse_easing")]
    pub collapse_easing: EasingType,
    /// Frames to wait for a content measurement before falling back
    #[serde(default = "default_measure_retries")]
    pub measure_retries: u32,
    /// Height used when content never reports a measurement
    #[serde(default = "default_fallback_height")]
    pub fallback_height: f64,
}

impl Default for AccordionConfig {
    fn default() -> Self {
        Self {
            expand_ms: default_expand_ms(),
            expand_easing: default_expand_easing(),
            collapse_ms: default_collapse_ms(),
            collapse_easing: default_collapse_easing(),
            measure_retries: default_measure_retries(),
            fallback_height: default_fallback_height(),
        }
    }
}

/// Pinned stack scaling
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StackConfig {
    /// Scale removed per item remaining above in the stack
    #[serde(default = "default_scale_step")]
    pub scale_step: f64,
    /// Lowest scale any item recedes to
    #[serde(default = "default_min_scale")]
    pub min_scale: f64,
    #[serde(default = "default_sticky_base")]
    pub sticky_base_px: f64,
    #[serde(default = "default_sticky_step")]
    pub sticky_step_px: f64,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            scale_step: default_scale_step(),
            min_scale: default_min_scale(),
            sticky_base_px: default_sticky_base(),
            sticky_step_px: default_sticky_step(),
        }
    }
}

/// Easing curve, written the GSAP way (`"power3.out"`, `"back.out(1.7)"`)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum EasingType {
    /// Holds the start value until the very end
    Step,
    Linear,
    /// `powerN.in`, N in 1..=4
    PowerIn(u8),
    /// `powerN.out`
    PowerOut(u8),
    /// `powerN.inOut`
    PowerInOut(u8),
    /// Exponential ease-out
    ExpoOut,
    /// Overshooting ease-in with the given strength
    BackIn(f64),
    /// Overshooting ease-out with the given strength
    BackOut(f64),
}

impl EasingType {
    /// GSAP's default overshoot for `back` eases
    pub const DEFAULT_OVERSHOOT: f64 = 1.70158;
}

impl Default for EasingType {
    fn default() -> Self {
        EasingType::PowerOut(1)
    }
}

impl fmt::Display for EasingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EasingType::Step => f.write_str("step"),
            EasingType::Linear => f.write_str("linear"),
            EasingType::PowerIn(n) => write!(f, "power{}.in", n),
            EasingType::PowerOut(n) => write!(f, "power{}.out", n),
            EasingType::PowerInOut(n) => write!(f, "power{}.inOut", n),
            EasingType::ExpoOut => f.write_str("expo.out"),
            EasingType::BackIn(s) => write!(f, "back.in({})", s),
            EasingType::BackOut(s) => write!(f, "back.out({})", s),
        }
    }
}

impl FromStr for EasingType {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        let invalid = || crate::Error::InvalidEasing(raw.to_string());

        let (family, variant) = match raw.split_once('.') {
            Some((family, variant)) => (family, variant),
            None => (raw, "out"),
        };

        // "back.out(1.7)" carries its strength in parentheses
        let (variant, argument) = match variant.split_once('(') {
            Some((name, rest)) => {
                let value = rest
                    .strip_suffix(')')
                    .ok_or_else(invalid)?
                    .trim()
                    .parse::<f64>()
                    .map_err(|_| invalid())?;
                (name, Some(value))
            }
            None => (variant, None),
        };

        match family {
            "step" | "steps" => Ok(EasingType::Step),
            "linear" | "none" | "power0" => Ok(EasingType::Linear),
            "expo" if variant == "out" => Ok(EasingType::ExpoOut),
            "back" => {
                let strength = argument.unwrap_or(Self::DEFAULT_OVERSHOOT);
                match variant {
                    "in" => Ok(EasingType::BackIn(strength)),
                    "out" => Ok(EasingType::BackOut(strength)),
                    _ => Err(invalid()),
                }
            }
            power if power.starts_with("power") => {
                let degree: u8 = power["power".len()..].parse().map_err(|_| invalid())?;
                if !(1..=4).contains(&degree) {
                    return Err(invalid());
                }
                match variant {
                    "in" => Ok(EasingType::PowerIn(degree)),
                    "out" => Ok(EasingType::PowerOut(degree)),
                    "inOut" | "inout" => Ok(EasingType::PowerInOut(degree)),
                    _ => Err(invalid()),
                }
            }
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for EasingType {
    type Error = crate::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<EasingType> for String {
    fn from(value: EasingType) -> Self {
        value.to_string()
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_fps() -> u32 {
    60
}

fn default_history_len() -> usize {
    64
}

fn default_threshold() -> String {
    "top 85%".to_string()
}

fn default_leave_grace() -> u64 {
    100
}

fn default_target_grace() -> u64 {
    150
}

fn default_shrink_ms() -> u64 {
    100
}

fn default_shrink_scale() -> f64 {
    0.8
}

fn default_grow_ms() -> u64 {
    600
}

fn default_grow_easing() -> EasingType {
    EasingType::BackOut(1.7)
}

fn default_collapsed_size() -> f64 {
    100.0
}

fn default_expanded_size() -> f64 {
    300.0
}

fn default_hide_ms() -> u64 {
    400
}

fn default_hide_scale() -> f64 {
    0.3
}

fn default_hide_easing() -> EasingType {
    EasingType::PowerIn(2)
}

fn default_expand_ms() -> u64 {
    500
}

fn default_expand_easing() -> EasingType {
    EasingType::PowerOut(2)
}

fn default_collapse_ms() -> u64 {
    400
}

fn default_collapse_easing() -> EasingType {
    EasingType::PowerInOut(2)
}

fn default_measure_retries() -> u32 {
    3
}

fn default_fallback_height() -> f64 {
    320.0
}

fn default_scale_step() -> f64 {
    0.1
}

fn default_min_scale() -> f64 {
    0.5
}

fn default_sticky_base() -> f64 {
    250.0
}

fn default_sticky_step() -> f64 {
    20.0
}

impl AppConfig {
    /// Load configuration from the default location or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from an explicit path, defaults when it does not exist
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to the default location
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&config_path, self.to_toml()?)?;

        Ok(())
    }

    /// Render as pretty TOML
    pub fn to_toml(&self) -> crate::Result<String> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Get the configuration file path
    /// Always uses ~/.config/scrollfx/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("scrollfx")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_gsap_names() {
        assert_eq!("power2.out".parse::<EasingType>().unwrap(), EasingType::PowerOut(2));
        assert_eq!("power4.in".parse::<EasingType>().unwrap(), EasingType::PowerIn(4));
        assert_eq!("power2.inOut".parse::<EasingType>().unwrap(), EasingType::PowerInOut(2));
        assert_eq!("power3".parse::<EasingType>().unwrap(), EasingType::PowerOut(3));
        assert_eq!("back.out(1.7)".parse::<EasingType>().unwrap(), EasingType::BackOut(1.7));
        assert_eq!(
            "back.out".parse::<EasingType>().unwrap(),
            EasingType::BackOut(EasingType::DEFAULT_OVERSHOOT)
        );
        assert_eq!("none".parse::<EasingType>().unwrap(), EasingType::Linear);
        assert_eq!("expo.out".parse::<EasingType>().unwrap(), EasingType::ExpoOut);
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert!("bounce.out".parse::<EasingType>().is_err());
        assert!("power9.out".parse::<EasingType>().is_err());
        assert!("back.out(abc)".parse::<EasingType>().is_err());
        assert!("power2.sideways".parse::<EasingType>().is_err());
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.hover.leave_grace_ms, 100);
        assert_eq!(config.hover.target_grace_ms, 150);
        assert_eq!(config.accordion.expand_ms, 500);
        assert_eq!(config.accordion.collapse_ms, 400);
        assert_eq!(config.stack.min_scale, 0.5);
        assert_eq!(config.animation.fps, 60);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [hover]
            leave_grace_ms = 250
            grow_easing = "power3.out"

            [animation]
            reduced_motion = true
            "#,
        )
        .unwrap();

        assert_eq!(config.hover.leave_grace_ms, 250);
        assert_eq!(config.hover.target_grace_ms, 150);
        assert_eq!(config.hover.grow_easing, EasingType::PowerOut(3));
        assert!(config.animation.reduced_motion);
        assert_eq!(config.accordion.collapse_easing, EasingType::PowerInOut(2));
    }

    #[test]
    fn test_toml_round_trip_keeps_easing_names() {
        let rendered = AppConfig::default().to_toml().unwrap();
        assert!(rendered.contains("grow_easing = \"back.out(1.7)\""));
        let parsed: AppConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed.hover.grow_easing, EasingType::BackOut(1.7));
    }

    #[test]
    fn test_frame_duration() {
        let mut config = AnimationConfig::default();
        assert_eq!(config.frame_duration(), Duration::from_micros(16_666));
        config.fps = 0;
        assert_eq!(config.frame_duration(), Duration::from_millis(16));
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let config = AppConfig::load_from(Path::new("/nonexistent/scrollfx/config.toml")).unwrap();
        assert_eq!(config.general.log_level, "info");
    }
}
