use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const SETTINGS_FILE_NAME: &str = "clock_settings.json";
const MIN_TICK_INTERVAL_MS: u64 = 100;

/// Startup configuration. Colors and font are user preferences and live in
/// the preference store instead.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClockSettings {
    /// When enabled the logger starts at debug level and honours `RUST_LOG`.
    #[serde(default)]
    pub debug_logging: bool,
    /// Write logs to this file instead of stderr.
    #[serde(default)]
    pub log_file: Option<PathBuf>,
    /// Initial outer window size.
    #[serde(default = "default_window_size")]
    pub window_size: (i32, i32),
    /// Initial window position. `None` lets the window manager choose.
    #[serde(default)]
    pub initial_position: Option<(i32, i32)>,
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
    /// End a drag when pointer capture is taken by another window.
    #[serde(default = "default_release_drag_on_capture_loss")]
    pub release_drag_on_capture_loss: bool,
}

fn default_window_size() -> (i32, i32) {
    (300, 150)
}

fn default_tick_interval_ms() -> u64 {
    1000
}

fn default_release_drag_on_capture_loss() -> bool {
    true
}

impl Default for ClockSettings {
    fn default() -> Self {
        Self {
            debug_logging: false,
            log_file: None,
            window_size: default_window_size(),
            initial_position: None,
            tick_interval_ms: default_tick_interval_ms(),
            release_drag_on_capture_loss: default_release_drag_on_capture_loss(),
        }
    }
}

impl ClockSettings {
    /// Missing or blank files yield the defaults; malformed JSON is an error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read clock settings file {}", path.display()))?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(&content)
            .with_context(|| format!("deserialize clock settings file {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("serialize clock settings")?;
        std::fs::write(path, json)
            .with_context(|| format!("write clock settings file {}", path.display()))
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(MIN_TICK_INTERVAL_MS))
    }

    pub fn window_size(&self) -> (i32, i32) {
        (self.window_size.0.max(1), self.window_size.1.max(1))
    }
}

pub fn settings_path_from_exe_path(exe_path: &Path) -> Result<PathBuf> {
    let parent = exe_path
        .parent()
        .ok_or_else(|| anyhow!("executable path has no parent: {}", exe_path.display()))?;
    Ok(parent.join(SETTINGS_FILE_NAME))
}

pub fn resolve_settings_path() -> Result<PathBuf> {
    let exe_path = std::env::current_exe().context("resolve current executable")?;
    settings_path_from_exe_path(&exe_path)
}
