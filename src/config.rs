use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use anyhow::{Context, Result, anyhow};
use tracing::warn;

use crate::demo::DemoTimings;
use crate::profile::{Profile, SocialLinks};
use crate::responder::{CannedResponder, DelayRange};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct DemoConfig {
    pub question_speed_ms: u64,
    pub question_delay_ms: u64,
    pub answer_speed_ms: u64,
    pub restart_pause_ms: u64,
    pub cursor_blink_ms: u64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            question_speed_ms: 50,
            question_delay_ms: 800,
            answer_speed_ms: 20,
            restart_pause_ms: 6000,
            cursor_blink_ms: 530,
        }
    }
}

impl DemoConfig {
    pub fn timings(&self) -> DemoTimings {
        DemoTimings {
            question_interval: Duration::from_millis(self.question_speed_ms),
            question_delay: Duration::from_millis(self.question_delay_ms),
            answer_interval: Duration::from_millis(self.answer_speed_ms),
            restart_pause: Duration::from_millis(self.restart_pause_ms),
            cursor_blink: Duration::from_millis(self.cursor_blink_ms),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub profile: Profile,
    pub links: SocialLinks,
    /// Accent colour name or hex, e.g. "cyan" or "#ff8800".
    pub accent: Option<String>,
    pub tick_ms: u64,
    pub demo: DemoConfig,
    pub reply_delay_min_ms: u64,
    pub reply_delay_max_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            profile: Profile::default(),
            links: SocialLinks::default(),
            accent: None,
            tick_ms: 16,
            demo: DemoConfig::default(),
            reply_delay_min_ms: 800,
            reply_delay_max_ms: 2000,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    /// Like [`Config::load`], but a broken file only costs a warning.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|err| {
            warn!(error = %err, "could not read config, using defaults");
            Self::new()
        })
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let config_content = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: Config = serde_json::from_str(&config_content)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;
        self.save_to(&config_path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let config_content = serde_json::to_string_pretty(self)?;
        fs::write(path, config_content)
            .with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }

    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("folio").join("config.json"))
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(1))
    }

    pub fn reply_delay(&self) -> DelayRange {
        DelayRange::new(
            Duration::from_millis(self.reply_delay_min_ms),
            Duration::from_millis(self.reply_delay_max_ms),
        )
    }

    pub fn responder(&self) -> CannedResponder {
        CannedResponder::new(self.reply_delay())
    }
}
