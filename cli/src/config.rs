//! CLI Configuration
//!
//! Stored at `~/.formlogic/config.toml`, or `config.<profile>.toml` for a
//! named profile. Every key is optional; unset keys fall back to the engine
//! defaults.

use anyhow::{anyhow, bail, Context};
use clap::ValueEnum;
use formlogic_engine::{EngineConfig, Locale, ResolutionMode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::output::OutputFormat;

/// Keys accepted by `config get` / `config set`
pub const KEYS: &[&str] = &[
    "locale",
    "resolution_mode",
    "cascade_hidden",
    "strict_schema",
    "pattern_cache_capacity",
    "default_format",
];

#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub locale: Option<Locale>,
    pub resolution_mode: Option<ResolutionMode>,
    pub cascade_hidden: Option<bool>,
    pub strict_schema: Option<bool>,
    pub pattern_cache_capacity: Option<u64>,
    pub default_format: Option<String>,
}

impl Config {
    pub fn load(profile: Option<&str>) -> anyhow::Result<Self> {
        Self::load_from(&Self::config_path(profile)?)
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn save(&self, profile: Option<&str>) -> anyhow::Result<PathBuf> {
        let path = Self::config_path(profile)?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).with_context(|| format!("writing {}", path.display()))
    }

    pub fn config_path(profile: Option<&str>) -> anyhow::Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| anyhow!("cannot find home directory"))?;
        let filename = match profile {
            Some(p) => format!("config.{}.toml", p),
            None => "config.toml".to_string(),
        };
        Ok(home.join(".formlogic").join(filename))
    }

    /// Engine settings with unset keys at their defaults
    pub fn engine_config(&self) -> EngineConfig {
        let defaults = EngineConfig::default();
        EngineConfig {
            resolution_mode: self.resolution_mode.unwrap_or(defaults.resolution_mode),
            cascade_hidden: self.cascade_hidden.unwrap_or(defaults.cascade_hidden),
            locale: self.locale.unwrap_or(defaults.locale),
            pattern_cache_capacity: self
                .pattern_cache_capacity
                .unwrap_or(defaults.pattern_cache_capacity),
            strict_schema: self.strict_schema.unwrap_or(defaults.strict_schema),
            ..defaults
        }
    }

    pub fn output_format(&self) -> anyhow::Result<OutputFormat> {
        match &self.default_format {
            Some(name) => parse_format(name),
            None => Ok(OutputFormat::Table),
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        match key {
            "locale" => self.locale = Some(parse_value(value).map_err(|e| anyhow!(e))?),
            "resolution_mode" => self.resolution_mode = Some(parse_value(value).map_err(|e| anyhow!(e))?),
            "cascade_hidden" => self.cascade_hidden = Some(value.parse().context("expected true or false")?),
            "strict_schema" => self.strict_schema = Some(value.parse().context("expected true or false")?),
            "pattern_cache_capacity" => {
                self.pattern_cache_capacity = Some(value.parse().context("expected a positive integer")?)
            }
            "default_format" => {
                parse_format(value)?;
                self.default_format = Some(value.to_lowercase());
            }
            _ => bail!("unknown config key: {}", key),
        }
        Ok(())
    }

    /// Display value of `key`, `None` when unset
    pub fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        let value = match key {
            "locale" => self.locale.map(|v| display_value(&v)),
            "resolution_mode" => self.resolution_mode.map(|v| display_value(&v)),
            "cascade_hidden" => self.cascade_hidden.map(|v| v.to_string()),
            "strict_schema" => self.strict_schema.map(|v| v.to_string()),
            "pattern_cache_capacity" => self.pattern_cache_capacity.map(|v| v.to_string()),
            "default_format" => self.default_format.clone(),
            _ => bail!("unknown config key: {}", key),
        };
        Ok(value)
    }
}

/// Parse a serde enum from its serialized name (clap value parser)
pub fn parse_value<T: DeserializeOwned>(value: &str) -> Result<T, String> {
    serde_json::from_value(serde_json::Value::String(value.to_string()))
        .map_err(|_| format!("invalid value '{}'", value))
}

fn display_value<T: Serialize>(value: &T) -> String {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::String(s)) => s,
        Ok(other) => other.to_string(),
        Err(_) => String::new(),
    }
}

fn parse_format(name: &str) -> anyhow::Result<OutputFormat> {
    OutputFormat::from_str(name, true).map_err(|_| anyhow!("unknown output format: {}", name))
}
