pub mod settings;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    /// Root directory of the last walk, restored on startup.
    pub last_directory: Option<PathBuf>,
    /// Search pattern text as last entered by the user.
    pub last_pattern: String,
    pub auto_load_last_directory: bool,
    pub window_size: (f64, f64),
    pub window_position: (f64, f64),
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        settings::load_config(None)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            last_directory: None,
            last_pattern: String::new(),
            auto_load_last_directory: true,
            window_size: (1000.0, 700.0),
            window_position: (100.0, 100.0),
        }
    }
}
