//! Authentication strategies and request header application.

use reqwest::RequestBuilder;
use secrecy::{ExposeSecret, SecretString};

/// Header carrying an authorized service token.
pub const SEC_HEADER: &str = "SEC";

/// Strategy for authenticating with the QRadar console.
#[derive(Debug, Clone)]
pub enum AuthStrategy {
    /// Username and password, sent as plain `username`/`password` headers.
    Basic {
        username: String,
        password: SecretString,
    },
    /// Authorized service token, sent in the `SEC` header.
    /// Preferred for automation.
    SecToken { token: SecretString },
}

impl AuthStrategy {
    /// Attach credentials and the JSON `Accept` header to a request.
    pub(crate) fn apply(&self, builder: RequestBuilder) -> RequestBuilder {
        let builder = builder.header(reqwest::header::ACCEPT, "application/json");
        match self {
            Self::Basic { username, password } => builder
                .header("username", username.as_str())
                .header("password", password.expose_secret()),
            Self::SecToken { token } => builder.header(SEC_HEADER, token.expose_secret()),
        }
    }

    /// Short label for logs; never includes secret material.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Basic { .. } => "basic",
            Self::SecToken { .. } => "token",
        }
    }
}

impl From<&qradar_config::AuthStrategy> for AuthStrategy {
    fn from(strategy: &qradar_config::AuthStrategy) -> Self {
        match strategy {
            qradar_config::AuthStrategy::Basic { username, password } => Self::Basic {
                username: username.clone(),
                password: password.clone(),
            },
            qradar_config::AuthStrategy::SecToken { token } => Self::SecToken {
                token: token.clone(),
            },
        }
    }
}
