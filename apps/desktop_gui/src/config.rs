//! Client settings loaded from `client.toml` with `APP__*` env overrides.

use std::{collections::HashMap, fs, time::Duration};

use client_core::DEFAULT_POLL_INTERVAL;

#[derive(Debug, Clone)]
pub struct Settings {
    pub server_url: String,
    pub game_id: String,
    pub player_id: String,
    pub poll_interval_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:8000".into(),
            game_id: String::new(),
            player_id: String::new(),
            poll_interval_ms: DEFAULT_POLL_INTERVAL.as_millis() as u64,
        }
    }
}

impl Settings {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

pub fn load_settings() -> Settings {
    let file = fs::read_to_string("client.toml").ok();
    load_settings_from(file.as_deref(), |key| std::env::var(key).ok())
}

fn load_settings_from(
    file: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> Settings {
    let mut settings = Settings::default();

    if let Some(raw) = file {
        if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(raw) {
            if let Some(v) = file_cfg.get("server_url") {
                settings.server_url = v.clone();
            }
            if let Some(v) = file_cfg.get("game_id") {
                settings.game_id = v.clone();
            }
            if let Some(v) = file_cfg.get("player_id") {
                settings.player_id = v.clone();
            }
            if let Some(v) = file_cfg.get("poll_interval_ms") {
                if let Ok(parsed) = v.parse::<u64>() {
                    settings.poll_interval_ms = parsed;
                }
            }
        }
    }

    if let Some(v) = env("APP__SERVER_URL") {
        settings.server_url = v;
    }
    if let Some(v) = env("APP__GAME_ID") {
        settings.game_id = v;
    }
    if let Some(v) = env("APP__PLAYER_ID") {
        settings.player_id = v;
    }
    if let Some(v) = env("APP__POLL_INTERVAL_MS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.poll_interval_ms = parsed;
        }
    }

    settings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_file_or_env() {
        let settings = load_settings_from(None, |_| None);
        assert_eq!(settings.server_url, "http://127.0.0.1:8000");
        assert!(settings.game_id.is_empty());
        assert_eq!(settings.poll_interval_ms, 2000);
        assert_eq!(settings.poll_interval(), Duration::from_millis(2000));
    }

    #[test]
    fn file_values_override_defaults() {
        let file = r#"
server_url = "http://table.example:9000"
game_id = "g-7"
player_id = "p-3"
poll_interval_ms = "500"
"#;
        let settings = load_settings_from(Some(file), |_| None);
        assert_eq!(settings.server_url, "http://table.example:9000");
        assert_eq!(settings.game_id, "g-7");
        assert_eq!(settings.player_id, "p-3");
        assert_eq!(settings.poll_interval_ms, 500);
    }

    #[test]
    fn env_overrides_beat_file_values() {
        let file = r#"server_url = "http://from-file:1""#;
        let settings = load_settings_from(Some(file), |key| match key {
            "APP__SERVER_URL" => Some("http://from-env:2".to_string()),
            "APP__POLL_INTERVAL_MS" => Some("250".to_string()),
            _ => None,
        });
        assert_eq!(settings.server_url, "http://from-env:2");
        assert_eq!(settings.poll_interval_ms, 250);
    }

    #[test]
    fn unparseable_poll_interval_keeps_the_default() {
        let settings = load_settings_from(None, |key| {
            (key == "APP__POLL_INTERVAL_MS").then(|| "soon".to_string())
        });
        assert_eq!(settings.poll_interval_ms, 2000);
    }
}
