use std::path::{Path, PathBuf};

use crossterm::event::KeyCode;
use serde::Deserialize;
use tracing::warn;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub collector: CollectorConfig,
    pub gauges: GaugesConfig,
    pub keybinds: KeybindsConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub refresh_rate_ms: u64,
    pub refresh_min_ms: u64,
    pub refresh_max_ms: u64,
    pub refresh_step_ms: u64,
    pub theme: String,
    pub color_support: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        GeneralConfig {
            refresh_rate_ms: 1000,
            refresh_min_ms: 100,
            refresh_max_ms: 5000,
            refresh_step_ms: 100,
            theme: "midnight".to_string(),
            color_support: "auto".to_string(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CollectorConfig {
    pub command: Option<String>,
    pub args: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GaugesConfig {
    pub cpu_color: String,
    pub gpu_color: String,
    pub memory_color: String,
    pub graph_color: String,
    pub history_length: usize,
}

impl Default for GaugesConfig {
    fn default() -> Self {
        GaugesConfig {
            cpu_color: "#FF2D71".to_string(),
            gpu_color: "#CC53FF".to_string(),
            memory_color: "#FF9F0D".to_string(),
            graph_color: "#CC53FF".to_string(),
            history_length: 60,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct KeybindsConfig {
    pub quit: String,
    pub help: String,
    pub next_tab: String,
    pub cycle_theme: String,
    pub sort: String,
    pub hide_column: String,
    pub columns_menu: String,
    pub rate_up: String,
    pub rate_down: String,
    pub refresh: String,
}

impl Default for KeybindsConfig {
    fn default() -> Self {
        KeybindsConfig {
            quit: "q".to_string(),
            help: "?".to_string(),
            next_tab: "Tab".to_string(),
            cycle_theme: "t".to_string(),
            sort: "s".to_string(),
            hide_column: "h".to_string(),
            columns_menu: "+".to_string(),
            rate_up: "]".to_string(),
            rate_down: "[".to_string(),
            refresh: "r".to_string(),
        }
    }
}

/// Parses a keybind name from the config file.
pub fn parse_key(s: &str) -> Option<KeyCode> {
    match s {
        "Enter" => Some(KeyCode::Enter),
        "Esc" | "Escape" => Some(KeyCode::Esc),
        "Tab" => Some(KeyCode::Tab),
        "Backspace" => Some(KeyCode::Backspace),
        "Delete" => Some(KeyCode::Delete),
        "Space" => Some(KeyCode::Char(' ')),
        _ => {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Some(KeyCode::Char(c)),
                _ => None,
            }
        }
    }
}

/// Short label for a key, as shown in the help overlay and status bar.
pub fn format_key(code: KeyCode) -> String {
    match code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Backspace => "Bksp".to_string(),
        KeyCode::Delete => "Del".to_string(),
        _ => "?".to_string(),
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("srmon").join("config.toml"))
}

pub fn load_config() -> Config {
    match config_path() {
        Some(path) if path.exists() => load_config_from_path(&path),
        _ => Config::default(),
    }
}

pub fn load_config_from_path(path: &Path) -> Config {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "cannot read config, using defaults");
            return Config::default();
        }
    };
    match toml::from_str(&contents) {
        Ok(config) => config,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "invalid config, using defaults");
            Config::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let config = Config::default();
        assert_eq!(config.general.refresh_rate_ms, 1000);
        assert_eq!(config.general.theme, "midnight");
        assert!(config.collector.command.is_none());
        assert_eq!(config.gauges.cpu_color, "#FF2D71");
        assert_eq!(config.gauges.history_length, 60);
        assert_eq!(config.keybinds.quit, "q");
        assert_eq!(config.keybinds.columns_menu, "+");
    }

    #[test]
    fn parse_partial_toml() {
        let toml_str = r#"
[general]
refresh_rate_ms = 500
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.refresh_rate_ms, 500);
        // Other fields should be defaults
        assert_eq!(config.general.refresh_max_ms, 5000);
        assert_eq!(config.gauges.memory_color, "#FF9F0D");
    }

    #[test]
    fn parse_full_toml() {
        let toml_str = r##"
[general]
refresh_rate_ms = 2000
theme = "nord"
color_support = "256"

[collector]
command = "./resource_monitor_backend"
args = ["--pretty"]

[gauges]
cpu_color = "#00FF00"
history_length = 30

[keybinds]
quit = "x"
next_tab = "Enter"
"##;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.refresh_rate_ms, 2000);
        assert_eq!(config.general.theme, "nord");
        assert_eq!(config.general.color_support, "256");
        assert_eq!(
            config.collector.command.as_deref(),
            Some("./resource_monitor_backend")
        );
        assert_eq!(config.collector.args, vec!["--pretty"]);
        assert_eq!(config.gauges.cpu_color, "#00FF00");
        assert_eq!(config.gauges.history_length, 30);
        assert_eq!(config.keybinds.quit, "x");
        assert_eq!(parse_key(&config.keybinds.next_tab), Some(KeyCode::Enter));
    }

    #[test]
    fn parse_key_names() {
        assert_eq!(parse_key("q"), Some(KeyCode::Char('q')));
        assert_eq!(parse_key("Escape"), Some(KeyCode::Esc));
        assert_eq!(parse_key("Space"), Some(KeyCode::Char(' ')));
        assert_eq!(parse_key("ab"), None);
        assert_eq!(parse_key(""), None);
        assert_eq!(format_key(KeyCode::Char(' ')), "Space");
        assert_eq!(format_key(KeyCode::Tab), "Tab");
        assert_eq!(format_key(KeyCode::F(5)), "?");
    }

    #[test]
    fn missing_file_returns_default() {
        let config = load_config_from_path(Path::new("/nonexistent/path/config.toml"));
        assert_eq!(config.general.refresh_rate_ms, 1000);
    }

    #[test]
    fn invalid_toml_returns_default() {
        let temp = std::env::temp_dir().join("srmon_test_invalid.toml");
        std::fs::write(&temp, "this is not valid toml {{{{").unwrap();
        let config = load_config_from_path(&temp);
        assert_eq!(config.general.refresh_rate_ms, 1000);
        let _ = std::fs::remove_file(&temp);
    }
}
