//! Connection credentials for one interactive session

use serde::{Deserialize, Serialize};
use url::Url;

use crate::libs::error::{AdminError, Result};

/// Credentials for one backend project, held for the lifetime of a session.
/// Nothing here is persisted across restarts.
///
/// Every management request authenticates with the privileged key; the
/// public key is carried so a front end can hand it to read-only widgets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Base project URL, e.g. `https://your-project.supabase.co`
    pub endpoint_url: String,
    pub public_key: String,
    pub privileged_key: String,
}

impl ConnectionConfig {
    pub fn new(
        endpoint_url: impl Into<String>,
        public_key: impl Into<String>,
        privileged_key: impl Into<String>,
    ) -> Self {
        let endpoint_url = endpoint_url.into();
        tracing::debug!(endpoint = %endpoint_url, "new connection config");
        Self {
            endpoint_url,
            public_key: public_key.into(),
            privileged_key: privileged_key.into(),
        }
    }

    /// Check the credential fields before any request is dispatched.
    ///
    /// The endpoint must parse as a URL; the keys are opaque strings and
    /// only checked for presence.
    pub fn validate(&self) -> Result<()> {
        if self.endpoint_url.trim().is_empty() {
            return Err(AdminError::Input("endpoint URL is required".into()));
        }
        if self.public_key.trim().is_empty() {
            return Err(AdminError::Input("public key is required".into()));
        }
        if self.privileged_key.trim().is_empty() {
            return Err(AdminError::Input("privileged key is required".into()));
        }
        Url::parse(&self.endpoint_url)
            .map_err(|e| AdminError::Input(format!("invalid endpoint URL: {}", e)))?;
        Ok(())
    }

    /// Base URL with any trailing slash removed, ready for path joining.
    pub(crate) fn base(&self) -> &str {
        self.endpoint_url.trim_end_matches('/')
    }
}

/// Outcome of the initial connection check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionStatus {
    pub connected: bool,
    pub error: Option<String>,
}
