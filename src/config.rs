use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub gate: GateSettings,
    #[serde(default)]
    pub texts: TextSettings,
    #[serde(default)]
    pub timing: TimingSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct GateSettings {
    #[serde(default = "default_approve_label")]
    pub approve_label: String,
    #[serde(default)]
    pub clear_source_on_init: bool,
    #[serde(default = "default_true")]
    pub copy_content_on_approve: bool,
}

impl Default for GateSettings {
    fn default() -> Self {
        Self {
            approve_label: default_approve_label(),
            clear_source_on_init: false,
            copy_content_on_approve: true,
        }
    }
}

fn default_approve_label() -> String {
    "I have read and agree to the Terms of Service".to_string()
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TextSettings {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_link_text")]
    pub link_text: String,
    #[serde(default = "default_scroll_prompt")]
    pub scroll_prompt: String,
    #[serde(default = "default_end_reached")]
    pub end_reached: String,
    #[serde(default = "default_approve_button")]
    pub approve_button: String,
    #[serde(default = "default_confirm_notice")]
    pub confirm_notice: String,
}

impl Default for TextSettings {
    fn default() -> Self {
        Self {
            title: default_title(),
            link_text: default_link_text(),
            scroll_prompt: default_scroll_prompt(),
            end_reached: default_end_reached(),
            approve_button: default_approve_button(),
            confirm_notice: default_confirm_notice(),
        }
    }
}

fn default_title() -> String {
    "Terms of Service".to_string()
}
fn default_link_text() -> String {
    "Read Terms of Service".to_string()
}
fn default_scroll_prompt() -> String {
    "Please scroll to the bottom of the Terms to enable the approval checkbox".to_string()
}
fn default_end_reached() -> String {
    "You have reached the end of the Terms of Service".to_string()
}
fn default_approve_button() -> String {
    "Approve".to_string()
}
fn default_confirm_notice() -> String {
    "Please check the box to confirm you have read and agree to the Terms of Service."
        .to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TimingSettings {
    /// Delay between showing the modal and measuring its content panel.
    #[serde(default = "default_settle_delay")]
    pub settle_delay_ms: u64,
    /// Rounding buffer when deciding whether the content overflows.
    #[serde(default = "default_epsilon")]
    pub overflow_tolerance: f32,
    /// Distance from the bottom that counts as "reached the end".
    #[serde(default = "default_epsilon")]
    pub bottom_threshold: f32,
}

impl Default for TimingSettings {
    fn default() -> Self {
        Self {
            settle_delay_ms: default_settle_delay(),
            overflow_tolerance: default_epsilon(),
            bottom_threshold: default_epsilon(),
        }
    }
}

impl TimingSettings {
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}

fn default_settle_delay() -> u64 {
    100
}
fn default_epsilon() -> f32 {
    5.0
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_file")]
    pub file: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_file() -> String {
    "data/logs/consent_gate.log".to_string()
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&get_config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .context(format!("Failed to read config.toml at {:?}", path))?;

        let config: Config = toml::from_str(&content).context("Failed to parse config.toml")?;

        Ok(config)
    }

    pub fn try_load() -> Option<Self> {
        let config_path = get_config_path();
        if !config_path.exists() {
            return None;
        }
        Self::load().ok()
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, content).context("Failed to write config.toml")?;

        Ok(())
    }
}

pub fn get_exe_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."))
}

pub fn get_config_path() -> PathBuf {
    let config_path = get_exe_dir().join("config").join("config.toml");

    if config_path.exists() {
        return config_path;
    }

    let cwd_config = PathBuf::from("config/config.toml");
    if cwd_config.exists() {
        return cwd_config;
    }

    config_path
}
