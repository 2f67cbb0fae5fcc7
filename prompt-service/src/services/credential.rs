//! Access to the provider API key.
//!
//! The key is resolved once at configuration time and injected here, so
//! gateways never touch the process environment on the request path.

use super::GatewayError;
use secrecy::{ExposeSecret, Secret};

#[derive(Debug, Clone, Default)]
pub struct Credential {
    api_key: Option<Secret<String>>,
}

impl Credential {
    pub fn new(api_key: Option<Secret<String>>) -> Self {
        Self { api_key }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key().is_ok()
    }

    /// The API key, or `MissingCredential` when it is unset or empty.
    pub fn api_key(&self) -> Result<&Secret<String>, GatewayError> {
        self.api_key
            .as_ref()
            .filter(|key| !key.expose_secret().is_empty())
            .ok_or(GatewayError::MissingCredential)
    }
}
