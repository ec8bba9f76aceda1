//! Settings for the back office app: defaults, then `back_office.toml`,
//! then environment variables, each layer overriding the previous one.

use std::{collections::HashMap, fs, path::PathBuf};

use client_core::DEFAULT_BASE_URL;

#[derive(Debug, Clone)]
pub struct Settings {
    pub api_url: String,
    /// Where exported CSV reports are written.
    pub export_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_BASE_URL.to_string(),
            export_dir: PathBuf::from("."),
        }
    }
}

pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("back_office.toml") {
        if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(&raw) {
            if let Some(v) = file_cfg.get("api_url") {
                settings.api_url = v.clone();
            }
            if let Some(v) = file_cfg.get("export_dir") {
                settings.export_dir = PathBuf::from(v);
            }
        }
    }

    if let Ok(v) = std::env::var("WO_API_URL") {
        settings.api_url = v;
    }
    if let Ok(v) = std::env::var("WO_EXPORT_DIR") {
        settings.export_dir = PathBuf::from(v);
    }

    settings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_the_hosted_backend() {
        let settings = Settings::default();
        assert!(settings.api_url.starts_with("https://"));
        assert_eq!(settings.export_dir, PathBuf::from("."));
    }
}
