use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::core::GestureThresholds;
use crate::intents::AppOptions;
use crate::models::{UserRole, UserSettings, DEFAULT_USER_ID};

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub gesture: GestureSettings,
    #[serde(default)]
    pub match_modal: MatchModalSettings,
    #[serde(default)]
    pub user: UserDefaults,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GestureSettings {
    #[serde(default = "default_commit_threshold")]
    pub commit_threshold: f64,
    #[serde(default = "default_hint_threshold")]
    pub hint_threshold: f64,
}

impl Default for GestureSettings {
    fn default() -> Self {
        Self {
            commit_threshold: default_commit_threshold(),
            hint_threshold: default_hint_threshold(),
        }
    }
}

fn default_commit_threshold() -> f64 { 100.0 }
fn default_hint_threshold() -> f64 { 50.0 }

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchModalSettings {
    /// 0 keeps the modal open until dismissed
    #[serde(default = "default_auto_dismiss_secs")]
    pub auto_dismiss_secs: u64,
}

impl Default for MatchModalSettings {
    fn default() -> Self {
        Self {
            auto_dismiss_secs: default_auto_dismiss_secs(),
        }
    }
}

fn default_auto_dismiss_secs() -> u64 { 5 }

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDefaults {
    /// Recorded on every match
    #[serde(default = "default_user_id")]
    pub id: String,
    #[serde(default = "default_user_name")]
    pub name: String,
    #[serde(default)]
    pub role: UserRole,
}

impl Default for UserDefaults {
    fn default() -> Self {
        Self {
            id: default_user_id(),
            name: default_user_name(),
            role: UserRole::default(),
        }
    }
}

fn default_user_id() -> String { DEFAULT_USER_ID.to_string() }
fn default_user_name() -> String { "田中 太郎".to_string() }

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "warn".to_string() }
fn default_log_format() -> String { "pretty".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with ORANGE_)
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., ORANGE__GESTURE__COMMIT_THRESHOLD -> gesture.commit_threshold
            .add_source(environment())
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?
            .try_deserialize()
    }

    pub fn gesture_thresholds(&self) -> GestureThresholds {
        GestureThresholds {
            commit: self.gesture.commit_threshold,
            hint: self.gesture.hint_threshold,
        }
    }

    pub fn auto_dismiss(&self) -> Option<Duration> {
        match self.match_modal.auto_dismiss_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }

    pub fn app_options(&self) -> AppOptions {
        AppOptions {
            thresholds: self.gesture_thresholds(),
            auto_dismiss: self.auto_dismiss(),
            user: UserSettings {
                id: self.user.id.clone(),
                name: self.user.name.clone(),
                role: self.user.role,
            },
        }
    }

    /// Effective configuration rendered as TOML
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

fn environment() -> Environment {
    Environment::with_prefix("ORANGE")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_gesture() {
        let gesture = GestureSettings::default();
        assert_eq!(gesture.commit_threshold, 100.0);
        assert_eq!(gesture.hint_threshold, 50.0);
    }

    #[test]
    fn test_default_logging() {
        let level = default_log_level();
        let format = default_log_format();
        assert_eq!(level, "warn");
        assert_eq!(format, "pretty");
    }

    #[test]
    fn test_zero_auto_dismiss_disables_timer() {
        let mut settings = Settings::default();
        assert_eq!(settings.auto_dismiss(), Some(Duration::from_secs(5)));

        settings.match_modal.auto_dismiss_secs = 0;
        assert_eq!(settings.auto_dismiss(), None);
    }

    #[test]
    fn test_load_from_file_fills_missing_sections() {
        let path = std::env::temp_dir()
            .join(format!("orange-connect-{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(
            &path,
            r#"
[gesture]
commit_threshold = 140.0

[user]
id = "user-9"
name = "佐々木 花子"
role = "家族"
"#,
        )
        .unwrap();

        let settings = Settings::load_from(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(settings.gesture.commit_threshold, 140.0);
        assert_eq!(settings.gesture.hint_threshold, 50.0);
        assert_eq!(settings.user.role, UserRole::Family);
        assert_eq!(settings.app_options().user.id, "user-9");
        assert_eq!(settings.match_modal.auto_dismiss_secs, 5);
    }

    #[test]
    fn test_to_toml_contains_sections() {
        let rendered = Settings::default().to_toml().unwrap();
        assert!(rendered.contains("[gesture]"));
        assert!(rendered.contains("commit_threshold = 100.0"));
    }
}
