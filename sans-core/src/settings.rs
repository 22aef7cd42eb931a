use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::navigation::DEFAULT_URL;

pub const DEFAULT_TITLE: &str = "Sans UI Application";
pub const DEFAULT_WIDTH: i32 = 800;
pub const DEFAULT_HEIGHT: i32 = 600;

/// Shell settings, persisted to `~/.config/sans-ui/settings.json`.
///
/// `#[serde(default)]` fills fields missing from older files with their
/// `Default` values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // ── Window ───────────────────────────────────────────────────────────
    pub window_width: i32,
    pub window_height: i32,
    pub remember_window_size: bool,
    pub title: String,

    // ── Web view ─────────────────────────────────────────────────────────
    pub url: String,
    pub enable_developer_extras: bool,
    pub javascript_can_open_windows: bool,
    pub enable_local_storage: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            window_width: DEFAULT_WIDTH,
            window_height: DEFAULT_HEIGHT,
            remember_window_size: true,
            title: String::from(DEFAULT_TITLE),

            url: String::from(DEFAULT_URL),
            enable_developer_extras: true,
            javascript_can_open_windows: true,
            enable_local_storage: true,
        }
    }
}

pub fn settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("sans-ui").join("settings.json"))
}

pub fn load() -> Settings {
    match settings_path() {
        Some(path) => load_from(&path),
        None => {
            log::warn!("Cannot determine config directory; using default settings");
            Settings::default()
        }
    }
}

/// Read settings from `path`. A missing file yields defaults silently; a
/// corrupt one yields defaults with a warning.
pub fn load_from(path: &Path) -> Settings {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Settings::default(),
        Err(e) => {
            log::warn!("Failed to read settings {:?}: {}", path, e);
            return Settings::default();
        }
    };
    serde_json::from_str(&contents).unwrap_or_else(|e| {
        log::warn!("Ignoring malformed settings {:?}: {}", path, e);
        Settings::default()
    })
}

pub fn save(settings: &Settings) -> Result<(), String> {
    let path =
        settings_path().ok_or_else(|| "Cannot determine config directory".to_string())?;
    save_to(&path, settings)
}

pub fn save_to(path: &Path, settings: &Settings) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create settings directory {:?}: {}", parent, e))?;
    }
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| format!("Failed to serialize settings: {}", e))?;
    std::fs::write(path, json).map_err(|e| format!("Failed to write {:?}: {}", path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(load_from(&dir.path().join("nope.json")), Settings::default());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let settings = Settings {
            window_width: 1024,
            url: "http://localhost:5173".into(),
            enable_developer_extras: false,
            ..Settings::default()
        };
        save_to(&path, &settings).unwrap();
        assert_eq!(load_from(&path), settings);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"window_height": 900}"#).unwrap();
        let settings = load_from(&path);
        assert_eq!(settings.window_height, 900);
        assert_eq!(settings.window_width, DEFAULT_WIDTH);
        assert_eq!(settings.title, DEFAULT_TITLE);
    }

    #[test]
    fn corrupt_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{{{").unwrap();
        assert_eq!(load_from(&path), Settings::default());
    }
}
