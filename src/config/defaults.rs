use super::*;

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: crate::client::DEFAULT_BASE_URL.to_string(),
            timeout_seconds: 30,
            access_token: String::new(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "INFO".to_string(),
            json_format: false,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            logging: LoggingConfig::default(),
            vehicles: Vec::new(),
        }
    }
}
