//! Sources of the identity provider's public signing keys (JWKS).

use std::time::Duration;

use async_trait::async_trait;
use jsonwebtoken::jwk::JwkSet;

#[derive(Debug, thiserror::Error)]
pub enum KeySetError {
    #[error("JWKS request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Supplies the current key set used to verify token signatures.
#[async_trait]
pub trait KeySetSource: Send + Sync {
    async fn fetch(&self) -> Result<JwkSet, KeySetError>;
}

/// Fetches the key set from the issuer's well-known endpoint on every call.
pub struct HttpKeySetSource {
    client: reqwest::Client,
    url: String,
}

impl HttpKeySetSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, KeySetError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl KeySetSource for HttpKeySetSource {
    async fn fetch(&self) -> Result<JwkSet, KeySetError> {
        tracing::debug!(url = %self.url, "Fetching signing keys");
        let keys = self
            .client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .json::<JwkSet>()
            .await?;
        Ok(keys)
    }
}

/// A fixed key set, for tests and offline development.
pub struct StaticKeySet(pub JwkSet);

#[async_trait]
impl KeySetSource for StaticKeySet {
    async fn fetch(&self) -> Result<JwkSet, KeySetError> {
        Ok(self.0.clone())
    }
}
