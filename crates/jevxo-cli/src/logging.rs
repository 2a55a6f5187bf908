// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow};
use std::env;
use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "JEVXO_LOG";

/// `JEVXO_LOG` wins over the configured level when set and non-blank.
pub fn filter_directive(config_level: &str, env_override: Option<String>) -> String {
    env_override
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| config_level.to_owned())
}

/// Installs a file-backed subscriber. The terminal belongs to the UI, so
/// without a log path nothing is installed and events are dropped.
pub fn init(path: Option<&Path>, config_level: &str) -> Result<bool> {
    let Some(path) = path else {
        return Ok(false);
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("create log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {}; fix [log].path", path.display()))?;

    let directive = filter_directive(config_level, env::var(LOG_ENV).ok());
    let filter = EnvFilter::try_new(&directive).with_context(|| {
        format!("invalid log filter {directive:?}; set {LOG_ENV} to error, warn, info, debug or trace")
    })?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|error| anyhow!("install log subscriber: {error}"))?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::{filter_directive, init};
    use anyhow::Result;

    #[test]
    fn env_override_wins_when_present() {
        assert_eq!(filter_directive("info", None), "info");
        assert_eq!(filter_directive("info", Some("debug".to_owned())), "debug");
        assert_eq!(filter_directive("warn", Some("  ".to_owned())), "warn");
        assert_eq!(
            filter_directive("info", Some(" jevxo_store=trace ".to_owned())),
            "jevxo_store=trace"
        );
    }

    #[test]
    fn no_path_installs_nothing() -> Result<()> {
        assert!(!init(None, "info")?);
        Ok(())
    }

    #[test]
    fn log_file_is_created_under_missing_directories() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("logs").join("jevxo.log");
        assert!(init(Some(&path), "info")?);
        assert!(path.exists());
        tracing::info!("log file test");
        Ok(())
    }
}
