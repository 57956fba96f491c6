//! Configuration management for tesla-fleet
//!
//! The library itself only takes [`ClientOption`]s; this module handles the
//! YAML file read by the `tesla-fleet` binary and turns it into options.

use crate::client::{ClientOption, with_base_url, with_http_client};
use crate::error::{FleetError, Result};
use crate::logging::parse_log_level;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

mod defaults;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Fleet API connection settings
    pub api: ApiConfig,

    /// Logging configuration
    pub logging: LoggingConfig,

    /// Vehicles to query
    pub vehicles: Vec<VehicleConfig>,
}

/// Fleet API connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the Fleet API or a vehicle-command proxy
    pub base_url: String,

    /// Transport timeout in seconds (0 disables it)
    pub timeout_seconds: u64,

    /// Bearer token presented to the API
    pub access_token: String,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    pub level: String,

    /// Whether to use JSON format
    pub json_format: bool,
}

/// A single vehicle entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleConfig {
    /// Display name
    #[serde(default)]
    pub name: String,

    /// Vehicle identification number
    pub vin: String,
}

impl ApiConfig {
    /// Parse the configured base URL
    pub fn parsed_base_url(&self) -> Result<Url> {
        Url::parse(&self.base_url).map_err(|e| {
            FleetError::validation("api.base_url".to_string(), format!("invalid URL: {}", e))
        })
    }

    /// Build the client options described by this section
    pub fn client_options(&self) -> Result<Vec<ClientOption>> {
        let mut builder = reqwest::Client::builder();
        if self.timeout_seconds > 0 {
            builder = builder.timeout(Duration::from_secs(self.timeout_seconds));
        }
        let hc = builder
            .build()
            .map_err(|e| FleetError::config(format!("failed to build HTTP client: {}", e)))?;
        Ok(vec![with_http_client(hc), with_base_url(self.parsed_base_url()?)])
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    /// Load from an explicit path, or fall back to [`Config::load`]
    pub fn load_from<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => Self::load(),
        }
    }

    /// Load configuration from the first default location that exists
    pub fn load() -> Result<Self> {
        let default_paths = ["tesla_fleet.yaml", "/etc/tesla-fleet/config.yaml"];

        for path in &default_paths {
            if Path::new(path).exists() {
                return Self::from_file(path);
            }
        }

        // Fall back to default configuration
        Ok(Self::default())
    }

    /// Save configuration to a YAML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let url = self.api.parsed_base_url()?;
        if url.cannot_be_a_base() {
            return Err(FleetError::validation(
                "api.base_url",
                "URL cannot carry a path",
            ));
        }

        parse_log_level(&self.logging.level)?;

        for (idx, vehicle) in self.vehicles.iter().enumerate() {
            if vehicle.vin.trim().is_empty() {
                return Err(FleetError::validation(
                    format!("vehicles[{}].vin", idx),
                    "VIN cannot be empty".to_string(),
                ));
            }
        }

        Ok(())
    }
}
