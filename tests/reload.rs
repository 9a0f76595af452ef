//! Applying configuration files to the process-wide logger.

use std::fs;
use std::thread;
use std::time::{Duration, Instant};

use logfacade::config::ConfigWatcher;

mod common;

#[test]
fn test_reload_applies_file() {
    let _guard = common::lock_facade();
    let dir = tempfile::tempdir().unwrap();
    let log = common::log_path(&dir, "app.log");
    let config = dir.path().join("log.toml");
    fs::write(
        &config,
        format!("level = \"info\"\noutput_paths = [{:?}]\n", log.to_string_lossy()),
    )
    .unwrap();

    logfacade::config::reload(&config).unwrap();
    assert_eq!(logfacade::current_level(), "info");

    logfacade::debug("hidden", &[]);
    logfacade::warn("visible", &[]);
    assert_eq!(common::messages(&log), vec!["visible"]);
}

#[test]
fn test_reload_with_invalid_file_keeps_logger() {
    let _guard = common::lock_facade();
    let dir = tempfile::tempdir().unwrap();
    let log = common::log_path(&dir, "app.log");
    logfacade::configure(&common::file_config(&log, "debug")).unwrap();

    let config = dir.path().join("log.toml");
    fs::write(&config, "output_paths = [\"\"]\n").unwrap();

    let err = logfacade::config::reload(&config).unwrap_err();
    assert!(matches!(err, logfacade::Error::Config(_)));

    logfacade::debug("still here", &[]);
    assert_eq!(common::messages(&log), vec!["still here"]);
}

#[test]
fn test_reload_with_unopenable_sink_keeps_logger_and_level() {
    let _guard = common::lock_facade();
    let dir = tempfile::tempdir().unwrap();
    let log = common::log_path(&dir, "app.log");
    logfacade::configure(&common::file_config(&log, "info")).unwrap();

    let missing = dir.path().join("missing").join("x.log");
    let config = dir.path().join("log.toml");
    fs::write(
        &config,
        format!("level = \"debug\"\noutput_paths = [{:?}]\n", missing.to_string_lossy()),
    )
    .unwrap();

    let err = logfacade::config::reload(&config).unwrap_err();
    assert!(matches!(err, logfacade::Error::OpenSink { .. }));
    assert_eq!(logfacade::current_level(), "info");

    let logger = logfacade::facade::logger().unwrap();
    assert_eq!(logger.output_paths(), [log.to_string_lossy().into_owned()]);

    logfacade::debug("filtered", &[]);
    logfacade::warn("after failed reload", &[]);
    assert_eq!(common::messages(&log), vec!["after failed reload"]);
}

#[test]
fn test_watcher_applies_changed_file() {
    let _guard = common::lock_facade();
    let dir = tempfile::tempdir().unwrap();
    let log = common::log_path(&dir, "app.log");
    let config = dir.path().join("log.toml");
    let body = |level: &str| {
        format!("level = \"{level}\"\noutput_paths = [{:?}]\n", log.to_string_lossy())
    };

    fs::write(&config, body("debug")).unwrap();
    logfacade::config::reload(&config).unwrap();
    assert_eq!(logfacade::current_level(), "debug");

    let _watcher = ConfigWatcher::new(&config).run().unwrap();
    fs::write(&config, body("info")).unwrap();

    let deadline = Instant::now() + Duration::from_secs(10);
    while logfacade::current_level() != "info" && Instant::now() < deadline {
        thread::sleep(Duration::from_millis(50));
    }
    assert_eq!(logfacade::current_level(), "info");

    // The reload record is written by the watcher thread right after the swap.
    let deadline = Instant::now() + Duration::from_secs(5);
    let reloaded = loop {
        let found = common::records(&log)
            .into_iter()
            .find(|r| r["message"] == "log config reloaded");
        match found {
            Some(record) => break record,
            None if Instant::now() < deadline => thread::sleep(Duration::from_millis(50)),
            None => panic!("no reload record in {:?}", common::messages(&log)),
        }
    };
    assert_eq!(reloaded["level"], "INFO");
    assert_eq!(reloaded["threshold"], "info");
    assert_eq!(reloaded["path"], config.display().to_string());
}
