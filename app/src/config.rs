//! Settings file handling.
//!
//! Settings live in `mqtt2notif/config.ini` under the per-user config
//! directory, section `[mqtt]`. The file is read once at startup and never
//! reloaded; a missing file means defaults, an unreadable or unparsable
//! one is fatal since nothing can proceed without settings.

use std::path::{Path, PathBuf};

use anyhow::Context;
use ini::Ini;

pub const DEFAULT_BROKER: &str = "localhost";
pub const DEFAULT_PORT: u16 = 1883;
pub const DEFAULT_TOPIC: &str = "notif2mqtt/notifications";

/// Broker connection settings, immutable for the life of the process.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub broker: String,
    pub port: u16,
    pub ssl: bool,
    pub topic: String,
    pub username: String,
    pub password: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            broker: DEFAULT_BROKER.to_owned(),
            port: DEFAULT_PORT,
            ssl: false,
            topic: DEFAULT_TOPIC.to_owned(),
            username: String::new(),
            password: String::new(),
        }
    }
}

/// Resolve the config file path per the XDG base directory convention.
pub fn config_path() -> anyhow::Result<PathBuf> {
    let base = dirs::config_dir().context("no user config directory available")?;
    Ok(base.join("mqtt2notif").join("config.ini"))
}

impl Settings {
    /// Load settings from `path` (or the default location). A missing file
    /// falls back to defaults; individual missing keys fall back per-key.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let path = resolve(path)?;
        if !path.exists() {
            tracing::warn!(path = %path.display(), "No config file found, using defaults");
            return Ok(Self::default());
        }

        let file = Ini::load_from_file(&path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let mut settings = Self::default();
        if let Some(section) = file.section(Some("mqtt")) {
            if let Some(v) = section.get("broker") {
                settings.broker = v.to_owned();
            }
            if let Some(v) = section.get("port") {
                settings.port = v
                    .parse()
                    .with_context(|| format!("invalid port in config: {v:?}"))?;
            }
            if let Some(v) = section.get("ssl") {
                settings.ssl =
                    parse_bool(v).with_context(|| format!("invalid ssl flag in config: {v:?}"))?;
            }
            if let Some(v) = section.get("topic") {
                settings.topic = v.to_owned();
            }
            if let Some(v) = section.get("username") {
                settings.username = v.to_owned();
            }
            if let Some(v) = section.get("password") {
                settings.password = v.to_owned();
            }
        }
        tracing::info!(path = %path.display(), "Loaded configuration");
        Ok(settings)
    }

    /// Write a default config file, creating parent directories. Returns
    /// the path written.
    pub fn write_default(path: Option<&Path>) -> anyhow::Result<PathBuf> {
        let path = resolve(path)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("cannot create config directory {}", parent.display()))?;
        }

        let defaults = Self::default();
        let mut file = Ini::new();
        file.with_section(Some("mqtt"))
            .set("broker", defaults.broker)
            .set("port", defaults.port.to_string())
            .set("ssl", defaults.ssl.to_string())
            .set("topic", defaults.topic)
            .set("username", defaults.username)
            .set("password", defaults.password);
        file.write_to_file(&path)
            .with_context(|| format!("cannot write config file {}", path.display()))?;
        Ok(path)
    }
}

fn resolve(path: Option<&Path>) -> anyhow::Result<PathBuf> {
    match path {
        Some(p) => Ok(p.to_path_buf()),
        None => config_path(),
    }
}

fn parse_bool(v: &str) -> Option<bool> {
    match v.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nanoid::nanoid;

    fn scratch_path() -> PathBuf {
        std::env::temp_dir().join(format!("mqtt2notif-test-{}.ini", nanoid!()))
    }

    #[test]
    fn missing_file_yields_defaults() {
        let settings = Settings::load(Some(scratch_path().as_path())).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.broker, "localhost");
        assert_eq!(settings.port, 1883);
        assert_eq!(settings.topic, "notif2mqtt/notifications");
    }

    #[test]
    fn load_reads_mqtt_section() {
        let path = scratch_path();
        std::fs::write(
            &path,
            "[mqtt]\nbroker=broker.example\nport=8883\nssl=true\nusername=u\npassword=p\n",
        )
        .unwrap();
        let settings = Settings::load(Some(&path)).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(settings.broker, "broker.example");
        assert_eq!(settings.port, 8883);
        assert!(settings.ssl);
        assert_eq!(settings.username, "u");
        // Unlisted keys keep their defaults.
        assert_eq!(settings.topic, DEFAULT_TOPIC);
    }

    #[test]
    fn invalid_port_is_fatal() {
        let path = scratch_path();
        std::fs::write(&path, "[mqtt]\nport=not-a-number\n").unwrap();
        let result = Settings::load(Some(&path));
        std::fs::remove_file(&path).unwrap();
        assert!(result.is_err());
    }

    #[test]
    fn write_default_round_trips() {
        let path = scratch_path();
        let written = Settings::write_default(Some(&path)).unwrap();
        assert_eq!(written, path);
        let settings = Settings::load(Some(&path)).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn parse_bool_variants() {
        assert_eq!(parse_bool("True"), Some(true));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }
}
