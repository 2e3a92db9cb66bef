//! Configuration management for huecraft.
//!
//! This module handles the layered configuration system with the following precedence:
//! 1. Command-line arguments (highest priority)
//! 2. Environment variables
//! 3. JSON config file
//! 4. Default values (lowest priority)

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{HueError, Result};
use crate::export::pdf::PAGE_HEIGHT;
use crate::export::ExportConfig;
use crate::grid::PaletteSettings;
use crate::interpolation::{Capabilities, Capability, InterpolationMethod};

/// Command-line arguments for huecraft
#[derive(Parser, Debug)]
#[command(name = "huecraft")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Host address to bind to [default: 127.0.0.1]
    #[arg(short = 'H', long, env = "HUECRAFT_HOST")]
    pub host: Option<String>,

    /// Port to listen on [default: 8000]
    #[arg(short, long, env = "HUECRAFT_PORT")]
    pub port: Option<u16>,

    /// Number of worker threads
    #[arg(short, long, env = "HUECRAFT_WORKERS")]
    pub workers: Option<usize>,

    /// Path to JSON configuration file
    #[arg(short, long, env = "HUECRAFT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Default interpolation method for requests that do not name one
    #[arg(short, long, env = "HUECRAFT_METHOD")]
    pub method: Option<String>,

    /// Switch off a capability (color_space, perceptual, curve); repeatable
    #[arg(long = "disable", env = "HUECRAFT_DISABLE", value_delimiter = ',')]
    pub disable: Vec<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "HUECRAFT_LOG_LEVEL")]
    pub log_level: Option<String>,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Number of worker threads (None = number of CPU cores)
    #[serde(default)]
    pub workers: Option<usize>,

    /// Largest `levels` a request may ask for
    #[serde(default = "default_max_levels")]
    pub max_levels: usize,

    /// Largest `steps` a request may ask for
    #[serde(default = "default_max_steps")]
    pub max_steps: usize,
}

/// Complete configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Palette used when a request leaves values out
    #[serde(default)]
    pub palette: PaletteSettings,

    /// Exporter geometry
    #[serde(default)]
    pub export: ExportConfig,

    /// Color-model support switched on for this process
    #[serde(default)]
    pub capabilities: Capabilities,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn config_error(message: impl Into<String>) -> HueError {
    HueError::Config {
        message: message.into(),
    }
}

impl Config {
    /// Load configuration from all sources with proper precedence
    pub fn load() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    /// Build a configuration from already-parsed arguments
    pub fn from_args(args: Args) -> Result<Self> {
        // Start with defaults
        let mut config = Config::default();

        // Load from JSON file if provided
        if let Some(config_path) = &args.config {
            let json_config = Self::load_from_file(config_path)?;
            config.merge(json_config);
        }

        // Override with command-line arguments and environment
        if let Some(host) = args.host {
            config.server.host = host;
        }
        if let Some(port) = args.port {
            config.server.port = port;
        }
        if args.workers.is_some() {
            config.server.workers = args.workers;
        }
        if let Some(method) = args.method {
            config.palette.method = method
                .parse::<InterpolationMethod>()
                .map_err(|e| config_error(e.to_string()))?;
        }
        for name in &args.disable {
            let capability = name
                .parse::<Capability>()
                .map_err(|e| config_error(e.to_string()))?;
            config.capabilities = config.capabilities.without(capability);
        }
        if let Some(log_level) = args.log_level {
            config.log_level = log_level;
        }

        Ok(config)
    }

    /// Load configuration from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        self.server.host = other.server.host;
        self.server.port = other.server.port;
        if other.server.workers.is_some() {
            self.server.workers = other.server.workers;
        }
        self.server.max_levels = other.server.max_levels;
        self.server.max_steps = other.server.max_steps;
        self.palette = other.palette;
        self.export = other.export;
        self.capabilities = other.capabilities;
        self.log_level = other.log_level;
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.host.is_empty() {
            return Err(config_error("Server host cannot be empty"));
        }

        // Validate port (0 is not a valid port for users)
        if self.server.port == 0 {
            return Err(config_error("Server port cannot be 0"));
        }

        if self.server.workers == Some(0) {
            return Err(config_error("Worker count cannot be 0"));
        }

        // Validate log level
        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(config_error(format!(
                    "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                    self.log_level
                )));
            }
        }

        self.palette
            .validate()
            .map_err(|e| config_error(format!("Invalid default palette: {}", e)))?;

        if self.server.max_levels < self.palette.horizontal_levels {
            return Err(config_error(format!(
                "server.max_levels ({}) is below the default palette's {} levels",
                self.server.max_levels, self.palette.horizontal_levels
            )));
        }
        if self.server.max_steps < 1 {
            return Err(config_error("server.max_steps must be at least 1"));
        }

        let export = &self.export;
        if export.svg_cell_size == 0 || export.png_cell_size == 0 {
            return Err(config_error("Export cell sizes must be greater than 0"));
        }
        if export.pdf_min_cell_size <= 0.0 || export.pdf_gap < 0.0 {
            return Err(config_error(
                "pdf_min_cell_size must be positive and pdf_gap non-negative",
            ));
        }
        if export.pdf_margin < 0.0 || export.pdf_margin * 2.0 >= PAGE_HEIGHT {
            return Err(config_error(format!(
                "pdf_margin must leave room on the page, got {}",
                export.pdf_margin
            )));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            palette: PaletteSettings::default(),
            export: ExportConfig::default(),
            capabilities: Capabilities::default(),
            log_level: default_log_level(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
            max_levels: default_max_levels(),
            max_steps: default_max_steps(),
        }
    }
}

// Default value functions for serde
fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_max_levels() -> usize {
    256
}

fn default_max_steps() -> usize {
    64
}

fn default_log_level() -> String {
    "info".to_string()
}
