use std::collections::HashSet;
use std::path::Path;

use crate::config::schema::Config;
use crate::error::ConfigError;

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;

    load_config_from_str(&content)
}

pub fn load_config_from_str(content: &str) -> Result<Config, ConfigError> {
    let config: Config = serde_json::from_str(content)?;

    validate_config(&config)?;

    Ok(config)
}

fn validate_config(config: &Config) -> Result<(), ConfigError> {
    // Validate version
    if config.version != "1.0" {
        return Err(ConfigError::Validation {
            message: format!("Unsupported config version: {}", config.version),
        });
    }

    if config.upload.max_files == 0 {
        return Err(ConfigError::Validation {
            message: "upload.max_files must be greater than 0".to_string(),
        });
    }
    if config.upload.max_file_bytes == 0 {
        return Err(ConfigError::Validation {
            message: "upload.max_file_bytes must be greater than 0".to_string(),
        });
    }
    if config.prompt.max_chars == 0 {
        return Err(ConfigError::Validation {
            message: "prompt.max_chars must be greater than 0".to_string(),
        });
    }
    if config.channel.job_interval_ms == 0 || config.channel.fallback_tick_ms == 0 {
        return Err(ConfigError::Validation {
            message: "channel intervals must be greater than 0".to_string(),
        });
    }

    // Validate steps
    if config.steps.is_empty() {
        return Err(ConfigError::Validation {
            message: "at least one processing step must be configured".to_string(),
        });
    }
    let mut step_ids = HashSet::new();
    for step in &config.steps {
        if !step_ids.insert(&step.id) {
            return Err(ConfigError::Validation {
                message: format!("Duplicate step id: {}", step.id),
            });
        }
    }

    Ok(())
}
