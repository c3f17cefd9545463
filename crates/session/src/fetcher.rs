//! Profile endpoint client.

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use scolaris_auth::EnrichedUser;

/// Failure fetching the profile. Every variant leaves the user
/// unauthorized for the app's purposes; the lifecycle treats them alike.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(String),

    #[error("API error ({0}): {1}")]
    Api(u16, String),

    #[error("parse error: {0}")]
    Parse(String),
}

/// Fetches the enriched profile for a bearer token.
#[async_trait]
pub trait ProfileFetcher: Send + Sync {
    async fn fetch(&self, token: &str) -> Result<EnrichedUser, FetchError>;
}

#[async_trait]
impl<F> ProfileFetcher for std::sync::Arc<F>
where
    F: ProfileFetcher + ?Sized,
{
    async fn fetch(&self, token: &str) -> Result<EnrichedUser, FetchError> {
        (**self).fetch(token).await
    }
}

/// Wire envelope of `GET /me`.
#[derive(Debug, Deserialize)]
struct ProfileEnvelope {
    user: EnrichedUser,
}

/// HTTP client for the profile endpoint.
pub struct HttpProfileFetcher {
    api_url: String,
    client: reqwest::Client,
}

impl HttpProfileFetcher {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl ProfileFetcher for HttpProfileFetcher {
    async fn fetch(&self, token: &str) -> Result<EnrichedUser, FetchError> {
        let url = format!("{}/me", self.api_url);

        let resp = self
            .client
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(FetchError::Api(
                resp.status().as_u16(),
                resp.text().await.unwrap_or_default(),
            ));
        }

        let envelope: ProfileEnvelope = resp
            .json()
            .await
            .map_err(|e| FetchError::Parse(e.to_string()))?;

        Ok(envelope.user)
    }
}
