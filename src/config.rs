//! Configuration supplied by the host application.
//!
//! [`WebSmsConfig`] deserializes from any serde source (`endpoint`, `auth.accessToken`,
//! `auth.username`, `auth.password`) or can be read from `WEBSMS_*` environment variables.
//! Turn it into a client with [`WebSmsClient::from_config`](crate::WebSmsClient::from_config).

use serde::Deserialize;

use crate::client::DEFAULT_ENDPOINT;
use crate::domain::ValidationError;

pub const ENDPOINT_VAR: &str = "WEBSMS_ENDPOINT";
pub const ACCESS_TOKEN_VAR: &str = "WEBSMS_ACCESS_TOKEN";
pub const USERNAME_VAR: &str = "WEBSMS_USERNAME";
pub const PASSWORD_VAR: &str = "WEBSMS_PASSWORD";

#[derive(Debug, thiserror::Error)]
/// Reasons a client cannot be constructed.
pub enum ConfigError {
    #[error("either the access token or the username/password are required")]
    MissingCredentials,

    #[error("invalid endpoint {endpoint:?}: {source}")]
    InvalidEndpoint {
        endpoint: String,
        #[source]
        source: url::ParseError,
    },

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    #[error("invalid credentials: {0}")]
    Validation(#[from] ValidationError),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebSmsConfig {
    /// Base URL of the websms REST API.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default)]
    pub auth: AuthConfig,
}

#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Credentials as configured. Either `access_token` or both `username` and `password`
/// must be set; blank values count as unset.
pub struct AuthConfig {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |value: &Option<String>| value.as_ref().map(|_| "***");
        f.debug_struct("AuthConfig")
            .field("access_token", &redact(&self.access_token))
            .field("username", &self.username)
            .field("password", &redact(&self.password))
            .finish()
    }
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_owned()
}

impl Default for WebSmsConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            auth: AuthConfig::default(),
        }
    }
}

impl WebSmsConfig {
    /// Read `WEBSMS_ENDPOINT`, `WEBSMS_ACCESS_TOKEN`, `WEBSMS_USERNAME` and `WEBSMS_PASSWORD`.
    ///
    /// Missing variables are left unset; credentials are only checked when a client is built.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`WebSmsConfig::from_env`] with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            endpoint: lookup(ENDPOINT_VAR)
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(default_endpoint),
            auth: AuthConfig {
                access_token: lookup(ACCESS_TOKEN_VAR),
                username: lookup(USERNAME_VAR),
                password: lookup(PASSWORD_VAR),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use crate::client::{Auth, WebSmsClient, WebSmsError};

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn deserializes_camel_case_auth_keys() {
        let config: WebSmsConfig = serde_json::from_str(
            r#"{
              "endpoint": "https://example.invalid/rest/",
              "auth": { "accessToken": "token", "username": "user", "password": "pass" }
            }"#,
        )
        .unwrap();

        assert_eq!(config.endpoint, "https://example.invalid/rest/");
        assert_eq!(config.auth.access_token.as_deref(), Some("token"));
        assert_eq!(config.auth.username.as_deref(), Some("user"));
        assert_eq!(config.auth.password.as_deref(), Some("pass"));
    }

    #[test]
    fn endpoint_defaults_to_public_api() {
        let config: WebSmsConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.endpoint, "https://api.websms.com/rest/");
        assert_eq!(config, WebSmsConfig::default());
    }

    #[test]
    fn from_lookup_reads_websms_variables() {
        let config = WebSmsConfig::from_lookup(lookup(&[
            (ENDPOINT_VAR, "https://example.invalid/rest/"),
            (USERNAME_VAR, "user"),
            (PASSWORD_VAR, "pass"),
        ]));

        assert_eq!(config.endpoint, "https://example.invalid/rest/");
        assert_eq!(config.auth.access_token, None);
        assert_eq!(config.auth.username.as_deref(), Some("user"));
        assert_eq!(config.auth.password.as_deref(), Some("pass"));
    }

    #[test]
    fn from_lookup_ignores_blank_endpoint() {
        let config = WebSmsConfig::from_lookup(lookup(&[(ENDPOINT_VAR, "  ")]));
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let auth = AuthConfig {
            access_token: Some("token-value".to_owned()),
            username: Some("user".to_owned()),
            password: Some("password-value".to_owned()),
        };
        let rendered = format!("{auth:?}");
        assert!(!rendered.contains("token-value"));
        assert!(!rendered.contains("password-value"));
        assert!(rendered.contains("user"));
    }

    #[test]
    fn client_from_config_requires_credentials() {
        let err = WebSmsClient::from_config(&WebSmsConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            WebSmsError::Configuration(ConfigError::MissingCredentials)
        ));
    }

    #[test]
    fn client_from_config_requires_both_username_and_password() {
        let mut config = WebSmsConfig::default();
        config.auth.username = Some("user".to_owned());
        config.auth.password = Some(String::new());

        let err = WebSmsClient::from_config(&config).unwrap_err();
        assert!(matches!(
            err,
            WebSmsError::Configuration(ConfigError::MissingCredentials)
        ));
    }

    #[test]
    fn client_from_config_prefers_access_token() {
        let config = WebSmsConfig {
            endpoint: "https://example.invalid/rest/".to_owned(),
            auth: AuthConfig {
                access_token: Some("token".to_owned()),
                username: Some("user".to_owned()),
                password: Some("pass".to_owned()),
            },
        };

        let client = WebSmsClient::from_config(&config).unwrap();
        assert_eq!(client.authorization_header(), "Bearer token");
        assert_eq!(client.endpoint().as_str(), "https://example.invalid/rest/");
    }

    #[test]
    fn client_from_config_falls_back_to_basic_when_token_blank() {
        let config = WebSmsConfig {
            auth: AuthConfig {
                access_token: Some("   ".to_owned()),
                username: Some("user".to_owned()),
                password: Some("pass".to_owned()),
            },
            ..Default::default()
        };

        let client = WebSmsClient::from_config(&config).unwrap();
        assert_eq!(client.auth(), &Auth::basic("user", "pass").unwrap());
        assert_eq!(client.authorization_header(), "Basic dXNlcjpwYXNz");
    }

    #[test]
    fn client_from_config_rejects_invalid_endpoint() {
        let config = WebSmsConfig {
            endpoint: "not a url".to_owned(),
            auth: AuthConfig {
                access_token: Some("token".to_owned()),
                ..Default::default()
            },
        };

        let err = WebSmsClient::from_config(&config).unwrap_err();
        assert!(matches!(
            err,
            WebSmsError::Configuration(ConfigError::InvalidEndpoint { .. })
        ));
    }
}
