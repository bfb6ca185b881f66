use crate::core::{GapPolicy, SessionOptions};
use crate::errors::{AppError, AppResult};
use crate::utils::path::{dataset_file, expand_tilde};
use crate::utils::time::{minutes, seconds};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    #[serde(default = "default_dataset")]
    pub dataset: String,
    #[serde(default = "default_block_minutes")]
    pub block_minutes: u32,
    #[serde(default = "default_rate_window")]
    pub rate_window_seconds: u32,
    #[serde(default = "default_backfill")]
    pub backfill_gaps: bool,
    #[serde(default = "default_queue_warn_depth")]
    pub queue_warn_depth: usize,
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Explicit log file from the command line; wins over `dataset`.
    #[serde(skip)]
    pub log_file: Option<String>,
}

fn default_data_dir() -> String {
    Config::config_dir().join("data").to_string_lossy().to_string()
}
fn default_dataset() -> String {
    "default".to_string()
}
fn default_block_minutes() -> u32 {
    1
}
fn default_rate_window() -> u32 {
    60
}
fn default_backfill() -> bool {
    true
}
fn default_queue_warn_depth() -> usize {
    64
}
fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            dataset: default_dataset(),
            block_minutes: default_block_minutes(),
            rate_window_seconds: default_rate_window(),
            backfill_gaps: default_backfill(),
            queue_warn_depth: default_queue_warn_depth(),
            log_level: default_log_level(),
            log_file: None,
        }
    }
}

impl Config {
    /// Return the standard configuration directory (`~/.antrecorder`)
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".antrecorder")
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("antrecorder.conf")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn to_yaml(&self) -> AppResult<String> {
        serde_yaml::to_string(self).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Create the config directory and the directory holding the event
    /// log; write the config file unless running in test mode or one
    /// already exists. Returns the event log path.
    pub fn init_all(&self, is_test: bool) -> AppResult<PathBuf> {
        let log_path = self.log_path();
        if let Some(dir) = log_path.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir)?;
        }

        if !is_test {
            fs::create_dir_all(Self::config_dir())?;
            let path = Self::config_file();
            if !path.exists() {
                fs::write(&path, self.to_yaml()?)?;
            }
        }

        Ok(log_path)
    }

    pub fn data_dir_path(&self) -> PathBuf {
        expand_tilde(&self.data_dir)
    }

    /// Event log in use: the `--log` override, else the dataset's file.
    pub fn log_path(&self) -> PathBuf {
        match &self.log_file {
            Some(p) => expand_tilde(p),
            None => dataset_file(&self.data_dir_path(), &self.dataset),
        }
    }

    pub fn gap_policy(&self) -> GapPolicy {
        if self.backfill_gaps {
            GapPolicy::Backfill
        } else {
            GapPolicy::Skip
        }
    }

    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            block: minutes(self.block_minutes.max(1)),
            gap_policy: self.gap_policy(),
            queue_warn_depth: self.queue_warn_depth,
        }
    }

    pub fn rate_window(&self) -> chrono::TimeDelta {
        seconds(self.rate_window_seconds.max(1))
    }
}
