use url::Url;

use crate::api::client::ClientOptions;
use crate::error::{RelayError, Result};
use crate::utils;

pub const ENV_BASE_URL: &str = "BASE_URL";
pub const ENV_DEBUG: &str = "DEBUG";
pub const ENV_LONG_LIVED_ACCESS_TOKEN: &str = "LONG_LIVED_ACCESS_TOKEN";
pub const ENV_NOT_VERIFY_SSL: &str = "NOT_VERIFY_SSL";

/// Settings resolved from the environment at the start of each invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayConfig {
    /// Backend origin, e.g. `https://homeassistant.example.com`.
    pub base_url: Option<String>,
    /// Verbose logging plus the long-lived token fallback.
    pub debug: bool,
    pub long_lived_access_token: Option<String>,
    pub verify_ssl: bool,
    /// Only `https://` backends. Never read from the environment.
    pub require_https: bool,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            debug: false,
            long_lived_access_token: None,
            verify_ssl: true,
            require_https: true,
        }
    }
}

impl RelayConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: Some(base_url.into()),
            ..Self::default()
        }
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the same variables as `from_env` through an arbitrary lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.is_empty());
        Self {
            base_url: non_empty(ENV_BASE_URL),
            debug: lookup(ENV_DEBUG).as_deref() == Some("TRUE"),
            long_lived_access_token: non_empty(ENV_LONG_LIVED_ACCESS_TOKEN),
            verify_ssl: lookup(ENV_NOT_VERIFY_SSL).as_deref() != Some("true"),
            ..Self::default()
        }
    }

    /// Where directives are posted. Fails when `BASE_URL` is unset,
    /// unparsable, or not `https` while `require_https` holds.
    pub fn endpoint(&self) -> Result<Url> {
        let base = self
            .base_url
            .as_deref()
            .filter(|b| !utils::normalize_base_url(b).is_empty())
            .ok_or(RelayError::MissingBaseUrl)?;
        let url = utils::smart_home_url(base)?;
        if self.require_https && url.scheme() != "https" {
            return Err(RelayError::InsecureBaseUrl(url.scheme().to_string()));
        }
        Ok(url)
    }

    /// The long-lived token, only honoured in debug mode.
    pub fn fallback_token(&self) -> Option<&str> {
        if self.debug {
            self.long_lived_access_token.as_deref()
        } else {
            None
        }
    }

    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            verify_ssl: self.verify_ssl,
            https_only: self.require_https,
            ..ClientOptions::default()
        }
    }
}
