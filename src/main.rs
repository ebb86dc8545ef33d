#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use anyhow::Context;
use desk_clock::clock::{preferences, window, ClockController};
use desk_clock::logging;
use desk_clock::settings::{resolve_settings_path, ClockSettings};

fn main() -> anyhow::Result<()> {
    let settings_path = resolve_settings_path()?;
    let settings = ClockSettings::load(&settings_path)?;
    logging::init(settings.debug_logging, settings.log_file.clone());
    tracing::debug!(path = %settings_path.display(), "clock settings loaded");

    let store = preferences::default_store().context("open preference store")?;
    let controller = ClockController::from_store(store)
        .with_capture_loss_release(settings.release_drag_on_capture_loss);
    window::run(&settings, controller)
}
