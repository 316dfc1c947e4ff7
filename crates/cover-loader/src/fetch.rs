//! Remote byte fetching.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{header, Client};
use tracing::{debug, instrument};

use crate::config::LoaderConfig;
use crate::error::CoverLoadFailure;

/// Fetches the raw bytes behind a cover URL.
#[async_trait]
pub trait CoverFetch: Send + Sync {
    /// Download `url`, refusing bodies larger than `max_bytes`.
    async fn fetch(&self, url: &str, max_bytes: u64) -> Result<Bytes, CoverLoadFailure>;
}

/// [`CoverFetch`] over HTTP(S) with reqwest.
pub struct HttpFetch {
    client: Client,
}

impl HttpFetch {
    pub fn new(config: &LoaderConfig) -> Result<Self, CoverLoadFailure> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| CoverLoadFailure::Http(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl CoverFetch for HttpFetch {
    #[instrument(skip(self), fields(url = %url))]
    async fn fetch(&self, url: &str, max_bytes: u64) -> Result<Bytes, CoverLoadFailure> {
        let response = self
            .client
            .get(url)
            .header(header::ACCEPT, "image/*")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CoverLoadFailure::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        if let Some(len) = response.content_length() {
            if len > max_bytes {
                return Err(CoverLoadFailure::TooLarge {
                    size: len,
                    limit: max_bytes,
                });
            }
        }

        let body = response.bytes().await?;
        if body.len() as u64 > max_bytes {
            return Err(CoverLoadFailure::TooLarge {
                size: body.len() as u64,
                limit: max_bytes,
            });
        }

        debug!(bytes = body.len(), "Fetched cover");
        Ok(body)
    }
}
