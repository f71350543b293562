use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::warn;

use crate::session::{IdentityError, IdentityProvider, Session};

/// Resolves sessions through the provider's OIDC userinfo endpoint.
/// Single attempt per request; no caching.
#[derive(Clone)]
pub struct HttpIdentityProvider {
    client: Client,
    userinfo_url: String,
}

#[derive(Debug, Deserialize)]
struct UserInfo {
    sub: String,
    name: Option<String>,
    given_name: Option<String>,
    family_name: Option<String>,
    email: Option<String>,
}

impl UserInfo {
    fn into_session(self) -> Session {
        let name = self.name.filter(|n| !n.trim().is_empty()).unwrap_or_else(|| {
            [self.given_name, self.family_name]
                .into_iter()
                .flatten()
                .filter(|part| !part.trim().is_empty())
                .collect::<Vec<_>>()
                .join(" ")
        });
        Session {
            user_id: self.sub,
            name,
            email: self.email.unwrap_or_default(),
        }
    }
}

impl HttpIdentityProvider {
    pub fn new(userinfo_url: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .context("Failed to build identity HTTP client")?;
        Ok(Self {
            client,
            userinfo_url,
        })
    }
}

#[async_trait]
impl IdentityProvider for HttpIdentityProvider {
    async fn resolve(&self, token: &str) -> Result<Session, IdentityError> {
        let response = self
            .client
            .get(&self.userinfo_url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| IdentityError::Unavailable(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(IdentityError::Rejected);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Identity provider returned {}: {}", status, body);
            return Err(IdentityError::Unavailable(format!("status {status}")));
        }

        let info: UserInfo = response
            .json()
            .await
            .map_err(|e| IdentityError::Malformed(e.to_string()))?;
        if info.sub.trim().is_empty() {
            return Err(IdentityError::Malformed("empty subject".to_string()));
        }
        Ok(info.into_session())
    }
}
