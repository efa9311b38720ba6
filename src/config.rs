/// External configuration loader.
///
/// Reads `balloon_archer.toml` from the executable's directory, then the
/// current directory, unless `BALLOON_ARCHER_CONFIG` names a file directly.
/// A missing file means defaults; missing keys fall back per field.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::spawn::DEFAULT_SPAWN_CHANCE;

pub const CONFIG_FILE: &str = "balloon_archer.toml";
pub const CONFIG_ENV_VAR: &str = "BALLOON_ARCHER_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid setting: {0}")]
    Invalid(String),
}

// ── Public config struct ──

#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub tick_rate_ms: u64,
    pub spawn_chance: f64,
    /// Fixed RNG seed; entropy when `None`.
    pub seed: Option<u64>,
    /// Log destination; logging is off when `None`.
    pub log_file: Option<PathBuf>,
    pub log_level: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        TomlConfig::default().into()
    }
}

// ── TOML schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct TomlConfig {
    #[serde(default)]
    game: TomlGame,
    #[serde(default)]
    log: TomlLog,
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct TomlGame {
    #[serde(default = "default_tick_rate")]
    tick_rate_ms: u64,
    #[serde(default = "default_spawn_chance")]
    spawn_chance: f64,
    #[serde(default)]
    seed: Option<u64>,
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct TomlLog {
    #[serde(default)]
    file: Option<PathBuf>,
    #[serde(default = "default_log_level")]
    level: String,
}

fn default_tick_rate() -> u64 { 100 } // 10 Hz
fn default_spawn_chance() -> f64 { DEFAULT_SPAWN_CHANCE }
fn default_log_level() -> String { "info".into() }

impl Default for TomlGame {
    fn default() -> Self {
        TomlGame {
            tick_rate_ms: default_tick_rate(),
            spawn_chance: default_spawn_chance(),
            seed: None,
        }
    }
}

impl Default for TomlLog {
    fn default() -> Self {
        TomlLog {
            file: None,
            level: default_log_level(),
        }
    }
}

impl From<TomlConfig> for GameConfig {
    fn from(cfg: TomlConfig) -> Self {
        GameConfig {
            tick_rate_ms: cfg.game.tick_rate_ms,
            spawn_chance: cfg.game.spawn_chance,
            seed: cfg.game.seed,
            log_file: cfg.log.file,
            log_level: cfg.log.level,
        }
    }
}

// ── Loading ──

impl GameConfig {
    /// Locate and load the config file, or return defaults if none exists.
    pub fn load() -> Result<Self, ConfigError> {
        if let Some(path) = std::env::var_os(CONFIG_ENV_VAR) {
            return Self::from_path(Path::new(&path));
        }
        match candidate_dirs()
            .into_iter()
            .map(|d| d.join(CONFIG_FILE))
            .find(|p| p.is_file())
        {
            Some(path) => Self::from_path(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let cfg: TomlConfig = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        GameConfig::from(cfg).validated()
    }

    /// Parse config text directly (no file lookup).
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let cfg: TomlConfig = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: PathBuf::from("<string>"),
            source,
        })?;
        GameConfig::from(cfg).validated()
    }

    fn validated(self) -> Result<Self, ConfigError> {
        if self.tick_rate_ms == 0 {
            return Err(ConfigError::Invalid("game.tick_rate_ms must be positive".into()));
        }
        if !(0.0..=1.0).contains(&self.spawn_chance) {
            return Err(ConfigError::Invalid(format!(
                "game.spawn_chance must be within [0, 1], got {}",
                self.spawn_chance
            )));
        }
        Ok(self)
    }
}

/// Executable directory first, then the current directory (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    dirs
}
