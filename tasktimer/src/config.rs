use anyhow::{Context, Result};
use directories::ProjectDirs;
use ratatui::style::Color;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tasktimer_core::{DurationInput, DEFAULT_WARNING_PERIOD};

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub dark_mode: bool,
    pub timer: TimerConfig,
    pub notifications: NotificationConfig,
    pub theme: Theme,
    pub light_theme: Theme,
    pub icons: Icons,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct TimerConfig {
    pub task: String,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
    pub warning_period: u64,
    pub tick_interval_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct NotificationConfig {
    pub enabled: bool,
    pub app_name: String,
    pub icon: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Theme {
    #[serde(deserialize_with = "hex_to_color")]
    pub background: Color,
    #[serde(deserialize_with = "hex_to_color")]
    pub foreground: Color,
    #[serde(deserialize_with = "hex_to_color")]
    pub selection: Color,
    #[serde(deserialize_with = "hex_to_color")]
    pub surface: Color,
    #[serde(deserialize_with = "hex_to_color")]
    pub red: Color,
    #[serde(deserialize_with = "hex_to_color")]
    pub green: Color,
    #[serde(deserialize_with = "hex_to_color")]
    pub yellow: Color,
    #[serde(deserialize_with = "hex_to_color")]
    pub blue: Color,
    #[serde(deserialize_with = "hex_to_color")]
    pub magenta: Color,
    #[serde(deserialize_with = "hex_to_color")]
    pub cyan: Color,
    #[serde(deserialize_with = "hex_to_color")]
    pub gray: Color,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Icons {
    pub clock: String,
    pub completed: String,
    pub play: String,
    pub pause: String,
    pub stop: String,
    pub warning: String,
    pub select: String,
    pub input_cursor: String,
    pub separator: String,
    pub header_left: String,
    pub header_right: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dark_mode: false,
            timer: TimerConfig::default(),
            notifications: NotificationConfig::default(),
            theme: Theme::default(),
            light_theme: Theme::light(),
            icons: Icons::default(),
        }
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            task: String::new(),
            hours: 0,
            minutes: 25,
            seconds: 0,
            warning_period: DEFAULT_WARNING_PERIOD,
            tick_interval_ms: 1000,
        }
    }
}

impl TimerConfig {
    pub fn duration(&self) -> DurationInput {
        DurationInput::new(self.hours, self.minutes, self.seconds)
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            app_name: "tasktimer".to_string(),
            icon: Some("alarm-clock".to_string()),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Color::Rgb(9, 14, 19),
            foreground: Color::Rgb(197, 201, 199),
            selection: Color::Rgb(230, 195, 132),
            surface: Color::Rgb(13, 12, 12),
            red: Color::Rgb(228, 104, 118),
            green: Color::Rgb(138, 154, 123),
            yellow: Color::Rgb(196, 178, 138),
            blue: Color::Rgb(127, 180, 202),
            magenta: Color::Rgb(162, 146, 163),
            cyan: Color::Rgb(122, 168, 159),
            gray: Color::Rgb(164, 167, 164),
        }
    }
}

impl Theme {
    pub fn light() -> Self {
        Self {
            background: Color::Rgb(249, 250, 251),
            foreground: Color::Rgb(17, 24, 39),
            selection: Color::Rgb(180, 120, 20),
            surface: Color::Rgb(229, 231, 235),
            red: Color::Rgb(220, 38, 38),
            green: Color::Rgb(22, 163, 74),
            yellow: Color::Rgb(202, 138, 4),
            blue: Color::Rgb(37, 99, 235),
            magenta: Color::Rgb(147, 51, 234),
            cyan: Color::Rgb(8, 145, 178),
            gray: Color::Rgb(107, 114, 128),
        }
    }
}

impl Default for Icons {
    fn default() -> Self {
        Self {
            clock: "◷".to_string(),
            completed: "☑".to_string(),
            play: "▶".to_string(),
            pause: "⏸".to_string(),
            stop: "■".to_string(),
            warning: "⚠".to_string(),
            select: "▸".to_string(),
            input_cursor: "▊".to_string(),
            separator: "│".to_string(),
            header_left: "⟪ ".to_string(),
            header_right: " ⟫".to_string(),
        }
    }
}

impl Config {
    pub fn from_toml(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    pub fn theme(&self, dark_mode: bool) -> &Theme {
        if dark_mode {
            &self.theme
        } else {
            &self.light_theme
        }
    }
}

fn hex_to_color<'de, D>(deserializer: D) -> Result<Color, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: String = serde::Deserialize::deserialize(deserializer)?;
    if !s.starts_with('#') || s.len() != 7 || !s.is_ascii() {
        return Err(serde::de::Error::custom("invalid hex color format"));
    }
    let r = u8::from_str_radix(&s[1..3], 16).map_err(serde::de::Error::custom)?;
    let g = u8::from_str_radix(&s[3..5], 16).map_err(serde::de::Error::custom)?;
    let b = u8::from_str_radix(&s[5..7], 16).map_err(serde::de::Error::custom)?;
    Ok(Color::Rgb(r, g, b))
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "pabloagn", "tasktimer")
}

/// Where the log file goes unless `--log-file` says otherwise.
pub fn default_log_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_local_dir().join("tasktimer.log"))
}

/// Load `path`, or the platform config file when none is given.
/// A missing default file yields the built-in config; a missing explicit file is an error.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => match project_dirs() {
            Some(proj_dirs) => {
                let path = proj_dirs.config_dir().join("tasktimer.toml");
                if !path.exists() {
                    return Ok(Config::default());
                }
                path
            }
            None => return Ok(Config::default()),
        },
    };
    let config_str = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file at {:?}", path))?;
    Config::from_toml(&config_str)
        .with_context(|| format!("Failed to parse config file at {:?}", path))
}
