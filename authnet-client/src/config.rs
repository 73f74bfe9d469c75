//! Configuration loading from environment.

use std::env;

use crate::ClientError;

/// Transport configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientConfig {
    /// Replaces both the sandbox and the live endpoint when set.
    pub endpoint: Option<String>,
}

impl ClientConfig {
    /// Loads configuration from environment variables.
    ///
    /// `AUTHNET_ENDPOINT` is optional; when set it must be an http(s) URL.
    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_endpoint(env::var("AUTHNET_ENDPOINT").ok())
    }

    pub(crate) fn from_endpoint(endpoint: Option<String>) -> Result<Self, ClientError> {
        let endpoint = endpoint
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty());

        if let Some(url) = &endpoint {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ClientError::Config(format!(
                    "AUTHNET_ENDPOINT must be an http(s) URL, got '{}'",
                    url
                )));
            }
        }

        Ok(Self { endpoint })
    }
}
