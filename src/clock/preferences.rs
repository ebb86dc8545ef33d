use crate::clock::appearance::{AppearanceState, FontDescriptor};
use crate::clock::color::ClockColor;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const PREFERENCES_KEY_PATH: &str = r"Software\TimeDisplaySettings";
pub const TEXT_COLOR_VALUE: &str = "TextColor";
pub const BACKGROUND_COLOR_VALUE: &str = "BgColor";
pub const FONT_FACE_VALUE: &str = "FontFace";

pub const PREFERENCES_FILE_NAME: &str = "preferences.json";
const PREFERENCES_DIR_NAME: &str = "desk_clock";

/// Raw persisted values. Colors are `COLORREF` (`0x00BBGGRR`) and every
/// field is optional so a partially written store still loads.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredPreferences {
    #[serde(rename = "TextColor", default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<u32>,
    #[serde(rename = "BgColor", default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<u32>,
    #[serde(rename = "FontFace", default, skip_serializing_if = "Option::is_none")]
    pub font_face: Option<String>,
}

impl StoredPreferences {
    pub fn from_appearance(appearance: &AppearanceState) -> Self {
        Self {
            text_color: Some(appearance.text_color.to_colorref()),
            background_color: Some(appearance.background_color.to_colorref()),
            font_face: Some(appearance.font.face.clone()),
        }
    }

    /// Overwrites only the fields that were present in the store.
    pub fn apply_to(&self, appearance: &mut AppearanceState) {
        if let Some(value) = self.text_color {
            appearance.text_color = ClockColor::from_colorref(value);
        }
        if let Some(value) = self.background_color {
            appearance.background_color = ClockColor::from_colorref(value);
        }
        if let Some(face) = self.font_face.as_deref().filter(|face| !face.trim().is_empty()) {
            appearance.font = FontDescriptor::with_face(face);
        }
    }
}

pub trait PreferenceStore {
    fn read(&self) -> Result<StoredPreferences>;
    fn write(&self, preferences: &StoredPreferences) -> Result<()>;
}

/// Best-effort load: any store error is logged and the defaults stand.
pub fn load(store: &dyn PreferenceStore) -> AppearanceState {
    let mut appearance = AppearanceState::default();
    match store.read() {
        Ok(stored) => stored.apply_to(&mut appearance),
        Err(err) => tracing::warn!(?err, "failed to load clock preferences; using defaults"),
    }
    appearance
}

/// Best-effort save. Returns whether the write went through.
pub fn save(store: &dyn PreferenceStore, appearance: &AppearanceState) -> bool {
    match store.write(&StoredPreferences::from_appearance(appearance)) {
        Ok(()) => {
            tracing::debug!(
                text = %appearance.text_color,
                background = %appearance.background_color,
                "clock preferences saved"
            );
            true
        }
        Err(err) => {
            tracing::warn!(?err, "failed to save clock preferences");
            false
        }
    }
}

/// JSON file store using the same field names as the registry values.
#[derive(Debug, Clone)]
pub struct JsonPreferenceStore {
    path: PathBuf,
}

impl JsonPreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config dir>/desk_clock/preferences.json` for the current user.
    pub fn per_user() -> Result<Self> {
        let dir = dirs_next::config_dir()
            .ok_or_else(|| anyhow!("no per-user configuration directory on this system"))?;
        Ok(Self::new(
            dir.join(PREFERENCES_DIR_NAME).join(PREFERENCES_FILE_NAME),
        ))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreferenceStore for JsonPreferenceStore {
    fn read(&self) -> Result<StoredPreferences> {
        if !self.path.exists() {
            return Ok(StoredPreferences::default());
        }
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("read preferences file {}", self.path.display()))?;
        if content.trim().is_empty() {
            return Ok(StoredPreferences::default());
        }
        serde_json::from_str(&content)
            .with_context(|| format!("deserialize preferences file {}", self.path.display()))
    }

    fn write(&self, preferences: &StoredPreferences) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create preferences folder {}", parent.display()))?;
        }
        let json =
            serde_json::to_string_pretty(preferences).context("serialize clock preferences")?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("write preferences file {}", self.path.display()))
    }
}

/// The registry under `HKEY_CURRENT_USER` on Windows, a per-user JSON file
/// elsewhere.
pub fn default_store() -> Result<Box<dyn PreferenceStore>> {
    #[cfg(windows)]
    {
        Ok(Box::new(
            crate::clock::registry::RegistryPreferenceStore::current_user(PREFERENCES_KEY_PATH),
        ))
    }

    #[cfg(not(windows))]
    {
        Ok(Box::new(JsonPreferenceStore::per_user()?))
    }
}
