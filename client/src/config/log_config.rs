use common::config::Validate;
use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct LogConfig {
    /// `None` logs to stdout, which the board also draws on.
    pub file: Option<String>,
    pub prefix: Option<String>,
}

impl Validate for LogConfig {
    fn validate(&self) -> Result<(), String> {
        if let Some(file) = &self.file
            && file.trim().is_empty()
        {
            return Err("log.file must not be empty when set".to_string());
        }
        Ok(())
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            file: Some("snake_client.log".to_string()),
            prefix: None,
        }
    }
}
