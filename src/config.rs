//! Backend connection settings.

use crate::error::Result;
use crate::request::{Login, RpcRequest};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_HOST: &str = "www.lynx-reservations.com";
pub const DEFAULT_SESSION_LIFETIME: Duration = Duration::from_secs(15 * 60);

pub const USERNAME_ENV: &str = "LYNX_USERNAME";
pub const PASSWORD_ENV: &str = "LYNX_PASSWORD";
pub const COMPANY_CODE_ENV: &str = "LYNX_COMPANY_CODE";
pub const HOST_ENV: &str = "LYNX_HOST";
pub const SESSION_MINUTES_ENV: &str = "LYNX_SESSION_MINUTES";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("{name} must be a positive number of minutes, got {value:?}")]
    InvalidMinutes { name: &'static str, value: String },
}

/// Login credentials. `Debug` never prints the password.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub company_code: String,
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("company_code", &self.company_code)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    /// Host name only, no scheme: requests always go over https.
    pub host: String,
    /// How long a session credential stays valid after login.
    pub session_lifetime: Duration,
    pub credentials: Credentials,
}

impl BackendConfig {
    pub fn new(credentials: Credentials) -> Self {
        BackendConfig {
            host: DEFAULT_HOST.to_string(),
            session_lifetime: DEFAULT_SESSION_LIFETIME,
            credentials,
        }
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Read settings from the process environment.
    pub fn from_env() -> std::result::Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read settings through `lookup`. Blank values count as unset.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> std::result::Result<Self, ConfigError> {
        let get = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let required = |name: &'static str| get(name).ok_or(ConfigError::Missing(name));

        let mut config = BackendConfig::new(Credentials {
            username: required(USERNAME_ENV)?,
            password: required(PASSWORD_ENV)?,
            company_code: required(COMPANY_CODE_ENV)?,
        });
        if let Some(host) = get(HOST_ENV) {
            config.host = host;
        }
        if let Some(minutes) = get(SESSION_MINUTES_ENV) {
            config.session_lifetime = match minutes.parse::<u64>() {
                Ok(n) if n > 0 => Duration::from_secs(n.saturating_mul(60)),
                _ => {
                    return Err(ConfigError::InvalidMinutes {
                        name: SESSION_MINUTES_ENV,
                        value: minutes,
                    });
                }
            };
        }
        Ok(config)
    }

    pub fn endpoint_url(&self, path: &str) -> String {
        format!("https://{}{}", self.host, path)
    }

    /// The login call a session provider posts to obtain a credential.
    pub fn login_request(&self) -> Result<RpcRequest> {
        RpcRequest::new(
            &Login {
                company_code: &self.credentials.company_code,
                username: &self.credentials.username,
                password: &self.credentials.password,
            },
            &self.host,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    const REQUIRED: [(&str, &str); 3] = [
        (USERNAME_ENV, "agent"),
        (PASSWORD_ENV, "s3cret"),
        (COMPANY_CODE_ENV, "PPAC"),
    ];

    #[test]
    fn test_defaults() {
        let config = BackendConfig::from_lookup(lookup(&REQUIRED)).unwrap();
        assert_eq!(config.host, DEFAULT_HOST);
        assert_eq!(config.session_lifetime, DEFAULT_SESSION_LIFETIME);
        assert_eq!(config.credentials.company_code, "PPAC");
    }

    #[test]
    fn test_blank_required_is_missing() {
        let pairs = [(USERNAME_ENV, "agent"), (PASSWORD_ENV, "  "), (COMPANY_CODE_ENV, "PPAC")];
        assert_eq!(
            BackendConfig::from_lookup(lookup(&pairs)),
            Err(ConfigError::Missing(PASSWORD_ENV))
        );
    }

    #[test]
    fn test_overrides() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push((HOST_ENV, "test.lynx.example"));
        pairs.push((SESSION_MINUTES_ENV, "30"));
        let config = BackendConfig::from_lookup(lookup(&pairs)).unwrap();
        assert_eq!(config.endpoint_url("/x"), "https://test.lynx.example/x");
        assert_eq!(config.session_lifetime, Duration::from_secs(1800));
    }

    #[test]
    fn test_invalid_minutes() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push((SESSION_MINUTES_ENV, "0"));
        assert!(matches!(
            BackendConfig::from_lookup(lookup(&pairs)),
            Err(ConfigError::InvalidMinutes { .. })
        ));
    }

    #[test]
    fn test_debug_redacts_password() {
        let config = BackendConfig::from_lookup(lookup(&REQUIRED)).unwrap();
        let shown = format!("{config:?}");
        assert!(!shown.contains("s3cret"));
        assert!(shown.contains("<redacted>"));
    }
}
