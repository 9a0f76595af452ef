//! Configuration file watcher for hot reload.

use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};

use crate::config::reload;
use crate::facade;
use crate::logger::field::Field;

/// Re-applies a configuration file whenever it changes on disk.
pub struct ConfigWatcher {
    path: PathBuf,
}

impl ConfigWatcher {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// Start watching the file in a background thread.
    ///
    /// Watching stops when the returned watcher is dropped.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let path = self.path.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if event.kind.is_modify() || event.kind.is_create() {
                        let display = path.display().to_string();
                        match reload(&path) {
                            Ok(()) => facade::info(
                                "log config reloaded",
                                &[
                                    Field::string("path", display),
                                    Field::string("threshold", facade::current_level()),
                                ],
                            ),
                            Err(e) => facade::error(
                                "failed to reload log config",
                                &[Field::string("path", display), Field::error(&e)],
                            ),
                        }
                    }
                }
                Err(e) => facade::error("config watch error", &[Field::error(&e)]),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&self.path, RecursiveMode::NonRecursive)?;

        facade::info(
            "config watcher started",
            &[Field::string("path", self.path.display().to_string())],
        );
        Ok(watcher)
    }
}
