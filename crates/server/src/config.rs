use std::{fs, path::Path};

use anyhow::Context;
use serde::Deserialize;
use tracing::warn;

const SETTINGS_FILE: &str = "showcase.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub bind_addr: String,
    /// Capacity of the state-change broadcast channel.
    pub event_buffer: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".into(),
            event_buffer: 256,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    bind_addr: Option<String>,
    event_buffer: Option<usize>,
}

/// Defaults, then `showcase.toml`, then environment variables.
pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Err(error) = apply_file(&mut settings, Path::new(SETTINGS_FILE)) {
        warn!(%error, "ignoring {SETTINGS_FILE}");
    }
    apply_env(&mut settings, |key| std::env::var(key).ok());

    settings
}

fn apply_file(settings: &mut Settings, path: &Path) -> anyhow::Result<()> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(error) => {
            return Err(error).with_context(|| format!("failed to read '{}'", path.display()))
        }
    };
    apply_toml(settings, &raw).with_context(|| format!("failed to parse '{}'", path.display()))
}

fn apply_toml(settings: &mut Settings, raw: &str) -> anyhow::Result<()> {
    let file_cfg: FileSettings = toml::from_str(raw)?;
    if let Some(v) = file_cfg.bind_addr {
        settings.bind_addr = v;
    }
    if let Some(v) = file_cfg.event_buffer {
        set_event_buffer(settings, v, SETTINGS_FILE);
    }
    Ok(())
}

/// A broadcast channel cannot be created with zero capacity.
fn set_event_buffer(settings: &mut Settings, value: usize, source: &str) {
    if value == 0 {
        warn!(source, "ignoring event_buffer of 0");
        return;
    }
    settings.event_buffer = value;
}

fn apply_env(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("SHOWCASE_BIND") {
        settings.bind_addr = v;
    }
    if let Some(v) = lookup("APP__BIND_ADDR") {
        settings.bind_addr = v;
    }

    if let Some(v) = lookup("APP__EVENT_BUFFER") {
        match v.parse::<usize>() {
            Ok(parsed) => set_event_buffer(settings, parsed, "APP__EVENT_BUFFER"),
            Err(_) => warn!(value = %v, "ignoring invalid APP__EVENT_BUFFER"),
        }
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
