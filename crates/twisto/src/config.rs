//! Transit client configuration

use serde::{Deserialize, Serialize};

/// Configuration for the Timeo transit endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitConfig {
    /// URL of the Timeo relay endpoint
    #[serde(default = "default_endpoint_url")]
    pub endpoint_url: String,

    /// Connection timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_endpoint_url() -> String {
    "http://timeo3.keolis.com/relais/147.php".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

impl Default for TransitConfig {
    fn default() -> Self {
        Self {
            endpoint_url: default_endpoint_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl TransitConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            timeout_secs: 5,
            ..Default::default()
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.endpoint_url.is_empty() {
            return Err("endpoint_url must not be empty".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        Ok(())
    }
}
