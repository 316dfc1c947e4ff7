//! Cover loading with placeholder fallback.

use std::path::Path;
use std::sync::Arc;

use bytes::Bytes;
use card_common::{Color, CoverRef};
use image::{Rgba, RgbaImage};
use tracing::{debug, info, instrument, warn};

use crate::config::LoaderConfig;
use crate::error::CoverLoadFailure;
use crate::fetch::{CoverFetch, HttpFetch};

/// Result of a cover load. Failures are carried as a placeholder, never as
/// an error.
#[derive(Debug, Clone, PartialEq)]
pub enum CoverOutcome {
    Loaded(RgbaImage),
    Placeholder { reason: CoverLoadFailure },
}

impl CoverOutcome {
    pub fn is_loaded(&self) -> bool {
        matches!(self, CoverOutcome::Loaded(_))
    }

    pub fn bitmap(&self) -> Option<&RgbaImage> {
        match self {
            CoverOutcome::Loaded(image) => Some(image),
            CoverOutcome::Placeholder { .. } => None,
        }
    }

    /// The decoded cover, or `None` so the renderer draws its placeholder.
    pub fn into_bitmap(self) -> Option<RgbaImage> {
        match self {
            CoverOutcome::Loaded(image) => Some(image),
            CoverOutcome::Placeholder { .. } => None,
        }
    }

    pub fn reason(&self) -> Option<&CoverLoadFailure> {
        match self {
            CoverOutcome::Loaded(_) => None,
            CoverOutcome::Placeholder { reason } => Some(reason),
        }
    }

    /// Solid bitmap standing in for a missing cover.
    pub fn placeholder_bitmap(width: u32, height: u32, color: Color) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba(color.to_array()))
    }
}

/// Loads covers from URLs or local paths.
pub struct CoverLoader {
    fetcher: Arc<dyn CoverFetch>,
    config: LoaderConfig,
}

impl CoverLoader {
    /// Loader that fetches URLs over HTTP.
    pub fn new(config: LoaderConfig) -> Result<Self, CoverLoadFailure> {
        let fetcher = HttpFetch::new(&config)?;
        Ok(Self::with_fetcher(Arc::new(fetcher), config))
    }

    /// Loader with a custom URL fetcher.
    pub fn with_fetcher(fetcher: Arc<dyn CoverFetch>, config: LoaderConfig) -> Self {
        Self { fetcher, config }
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Load and decode a cover. Every failure becomes a placeholder.
    #[instrument(skip(self, cover), fields(cover = %cover))]
    pub async fn load(&self, cover: &CoverRef) -> CoverOutcome {
        match self.try_load(cover).await {
            Ok(image) => {
                info!(width = image.width(), height = image.height(), "Loaded cover");
                CoverOutcome::Loaded(image)
            }
            Err(reason) => {
                warn!(error = %reason, "Cover unavailable, using placeholder");
                CoverOutcome::Placeholder { reason }
            }
        }
    }

    /// [`CoverLoader::load`] for an optional cover.
    pub async fn load_optional(&self, cover: Option<&CoverRef>) -> CoverOutcome {
        match cover {
            Some(cover) => self.load(cover).await,
            None => {
                debug!("No cover requested");
                CoverOutcome::Placeholder {
                    reason: CoverLoadFailure::Missing,
                }
            }
        }
    }

    /// Load and decode a cover, bounded by the configured timeout.
    ///
    /// Dropping the returned future cancels the load.
    pub async fn try_load(&self, cover: &CoverRef) -> Result<RgbaImage, CoverLoadFailure> {
        let timeout = self.config.request_timeout;
        match tokio::time::timeout(timeout, self.load_unbounded(cover)).await {
            Ok(result) => result,
            Err(_) => Err(CoverLoadFailure::Timeout(timeout.as_millis() as u64)),
        }
    }

    async fn load_unbounded(&self, cover: &CoverRef) -> Result<RgbaImage, CoverLoadFailure> {
        let bytes = match cover {
            CoverRef::Url(url) => self.fetcher.fetch(url, self.config.max_bytes).await?,
            CoverRef::Path(path) => read_local(path, self.config.max_bytes).await?,
        };
        decode(bytes).await
    }
}

async fn read_local(path: &Path, max_bytes: u64) -> Result<Bytes, CoverLoadFailure> {
    let metadata = tokio::fs::metadata(path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            CoverLoadFailure::NotFound(path.display().to_string())
        } else {
            CoverLoadFailure::from(e)
        }
    })?;

    if metadata.len() > max_bytes {
        return Err(CoverLoadFailure::TooLarge {
            size: metadata.len(),
            limit: max_bytes,
        });
    }

    let data = tokio::fs::read(path).await?;
    Ok(Bytes::from(data))
}

/// Decode on the blocking pool; large JPEGs take tens of milliseconds.
async fn decode(bytes: Bytes) -> Result<RgbaImage, CoverLoadFailure> {
    tokio::task::spawn_blocking(move || -> Result<RgbaImage, CoverLoadFailure> {
        let image = image::load_from_memory(&bytes)?;
        Ok(image.to_rgba8())
    })
    .await
    .map_err(|e| CoverLoadFailure::Decode(format!("decode task failed: {}", e)))?
}
