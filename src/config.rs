use crate::error::{Result, SolverError};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub solver: SolverConfig,
    #[serde(default)]
    pub rewards: RewardConfig,
    #[serde(default)]
    pub viewer: ViewerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SolverConfig {
    #[serde(default = "default_discount")]
    pub discount: f64,
    #[serde(default = "default_max_sweeps")]
    pub max_sweeps: usize,
    #[serde(default = "default_intended_probability")]
    pub intended_probability: f64,
    #[serde(default = "default_perpendicular_probability")]
    pub perpendicular_probability: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RewardConfig {
    #[serde(default = "default_food_reward")]
    pub food: f64,
    #[serde(default = "default_capsule_reward")]
    pub capsule: f64,
    #[serde(default = "default_ghost_reward")]
    pub ghost: f64,
    #[serde(default = "default_ghost_neighbor_reward")]
    pub ghost_neighbor: f64,
    #[serde(default = "default_scared_ghost_reward")]
    pub scared_ghost: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ViewerConfig {
    #[serde(default = "default_cell_size")]
    pub cell_size: f32,
    #[serde(default = "default_bg_r")]
    pub background_r: u8,
    #[serde(default = "default_bg_g")]
    pub background_g: u8,
    #[serde(default = "default_bg_b")]
    pub background_b: u8,
    #[serde(default = "default_layout_path")]
    pub layout_path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enable_decision_log: bool,
    #[serde(default = "default_decision_log_path")]
    pub decision_log_path: String,
}

// Default values
fn default_discount() -> f64 { 0.3 }
fn default_max_sweeps() -> usize { 50 }
fn default_intended_probability() -> f64 { 0.8 }
fn default_perpendicular_probability() -> f64 { 0.1 }
fn default_food_reward() -> f64 { 5.0 }
fn default_capsule_reward() -> f64 { 5.0 }
fn default_ghost_reward() -> f64 { -10.0 }
fn default_ghost_neighbor_reward() -> f64 { -5.0 }
fn default_scared_ghost_reward() -> f64 { 20.0 }
fn default_cell_size() -> f32 { 32.0 }
fn default_bg_r() -> u8 { 20 }
fn default_bg_g() -> u8 { 20 }
fn default_bg_b() -> u8 { 28 }
fn default_layout_path() -> String { "test_data/layouts/smallGrid.lay".to_string() }
fn default_decision_log_path() -> String { "decision_log.json".to_string() }

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            discount: default_discount(),
            max_sweeps: default_max_sweeps(),
            intended_probability: default_intended_probability(),
            perpendicular_probability: default_perpendicular_probability(),
        }
    }
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            food: default_food_reward(),
            capsule: default_capsule_reward(),
            ghost: default_ghost_reward(),
            ghost_neighbor: default_ghost_neighbor_reward(),
            scared_ghost: default_scared_ghost_reward(),
        }
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            cell_size: default_cell_size(),
            background_r: default_bg_r(),
            background_g: default_bg_g(),
            background_b: default_bg_b(),
            layout_path: default_layout_path(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_decision_log: false,
            decision_log_path: default_decision_log_path(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            solver: SolverConfig::default(),
            rewards: RewardConfig::default(),
            viewer: ViewerConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from `config.toml`, or use defaults if it is missing or broken
    pub fn load() -> Self {
        let path = Path::new("config.toml");
        if !path.exists() {
            tracing::info!("No config.toml found, using default configuration");
            return Config::default();
        }
        match Self::load_from(path) {
            Ok(config) => {
                tracing::info!("Loaded configuration from config.toml");
                config
            }
            Err(e) => {
                tracing::warn!("Failed to load config.toml: {:?}", e);
                tracing::warn!("Using default configuration");
                Config::default()
            }
        }
    }

    /// Load configuration from a specific file, failing on any error
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| SolverError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&contents, &path.display().to_string())
    }

    /// Parse configuration text; `origin` names the source in errors
    pub fn parse(contents: &str, origin: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|source| SolverError::Config {
            path: origin.to_string(),
            source,
        })
    }
}
