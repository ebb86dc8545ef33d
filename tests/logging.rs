use std::fs;
use std::path::Path;

use desk_clock::logging::build_subscriber;
use serial_test::serial;
use tempfile::tempdir;

fn read_log(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_default()
}

#[test]
#[serial]
fn file_target_receives_events() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("clock.log");

    tracing::subscriber::with_default(build_subscriber(false, Some(path.clone())), || {
        tracing::info!(width = 300, "clock window started");
    });

    assert!(path.exists(), "log file was not created");
    let contents = read_log(&path);
    assert!(contents.contains("clock window started"));
    assert!(contents.contains("width=300"));
    assert!(!contents.contains("\u{1b}["), "file output must not carry ANSI codes");
}

#[test]
#[serial]
fn debug_events_need_debug_logging() {
    let dir = tempdir().unwrap();
    let quiet = dir.path().join("quiet.log");
    let verbose = dir.path().join("verbose.log");
    std::env::remove_var("RUST_LOG");

    tracing::subscriber::with_default(build_subscriber(false, Some(quiet.clone())), || {
        tracing::debug!("frame buffer reallocated");
        tracing::info!("clock preferences saved");
    });
    tracing::subscriber::with_default(build_subscriber(true, Some(verbose.clone())), || {
        tracing::debug!("frame buffer reallocated");
    });

    let quiet = read_log(&quiet);
    assert!(!quiet.contains("frame buffer reallocated"));
    assert!(quiet.contains("clock preferences saved"));
    assert!(read_log(&verbose).contains("frame buffer reallocated"));
}

#[test]
#[serial]
fn rust_log_only_applies_with_debug_logging() {
    let dir = tempdir().unwrap();
    let overridden = dir.path().join("overridden.log");
    let ignored = dir.path().join("ignored.log");
    std::env::set_var("RUST_LOG", "warn");

    tracing::subscriber::with_default(build_subscriber(true, Some(overridden.clone())), || {
        tracing::info!("clock tick");
        tracing::warn!("drag session cancelled");
    });
    tracing::subscriber::with_default(build_subscriber(false, Some(ignored.clone())), || {
        tracing::info!("clock tick");
    });
    std::env::remove_var("RUST_LOG");

    let overridden = read_log(&overridden);
    assert!(!overridden.contains("clock tick"));
    assert!(overridden.contains("drag session cancelled"));
    assert!(read_log(&ignored).contains("clock tick"));
}

#[test]
#[serial]
fn init_without_file_creates_no_log() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("clock.log");

    desk_clock::logging::init(false, None);
    tracing::info!("clock started");

    assert!(!path.exists(), "log file should not be created");
}
