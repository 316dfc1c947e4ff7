//! Card generation pipeline: load the cover, render, encode, write.
//!
//! Validation runs before anything else so an invalid request never touches
//! the network or the output path.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use card_common::{CardError, ReviewCardRequest};
use cover_loader::{CoverLoadFailure, CoverLoader, LoaderConfig};
use futures::stream::{self, StreamExt};
use image::RgbaImage;
use rayon::prelude::*;
use renderer::{render_with_style, CardStyle};
use tracing::{error, info, instrument, warn};

use crate::config::{default_output_name, BatchEntry};
use crate::error::{CardgenError, Result};
use crate::output::write_atomic;

/// Covers fetched at once during a batch.
pub const BATCH_FETCH_CONCURRENCY: usize = 8;

/// Options for [`generate`].
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    pub style: CardStyle,
    pub loader: LoaderConfig,
}

/// What a successful generation produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Generated {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub bytes: usize,
    /// Why the placeholder was drawn, if it was
    pub placeholder: Option<CoverLoadFailure>,
}

/// Outcome of one batch entry.
#[derive(Debug)]
pub struct BatchItem {
    pub index: usize,
    pub output: PathBuf,
    pub result: Result<Generated>,
}

/// Per-entry results of a batch run, in input order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub items: Vec<BatchItem>,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.items.iter().filter(|i| i.result.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.items.len() - self.succeeded()
    }

    pub fn all_ok(&self) -> bool {
        self.failed() == 0
    }
}

/// Reusable generator holding the cover loader and layout style.
pub struct Pipeline {
    loader: Arc<CoverLoader>,
    style: Arc<CardStyle>,
}

impl Pipeline {
    pub fn new(options: GenerateOptions) -> Result<Self> {
        let loader = CoverLoader::new(options.loader)?;
        Ok(Self::with_loader(loader, options.style))
    }

    /// Pipeline with an already built loader (e.g. a stubbed fetcher).
    pub fn with_loader(loader: CoverLoader, style: CardStyle) -> Self {
        Self {
            loader: Arc::new(loader),
            style: Arc::new(style),
        }
    }

    pub fn style(&self) -> &CardStyle {
        &self.style
    }

    pub fn loader(&self) -> &CoverLoader {
        &self.loader
    }

    /// Generate one card at `output`.
    #[instrument(skip(self, request, output), fields(title = %request.title, path = %output.display()))]
    pub async fn generate(&self, request: &ReviewCardRequest, output: &Path) -> Result<Generated> {
        request.validate()?;

        let outcome = self.loader.load_optional(request.cover.as_ref()).await;
        let placeholder = outcome.reason().cloned();
        let cover = outcome.into_bitmap();

        let request = request.clone();
        let style = Arc::clone(&self.style);
        let output = output.to_path_buf();
        let generated = tokio::task::spawn_blocking(move || {
            write_card(&request, cover.as_ref(), &style, &output, placeholder)
        })
        .await
        .map_err(|e| CardError::RenderFailure(format!("render task failed: {}", e)))??;

        info!(
            path = %generated.path.display(),
            bytes = generated.bytes,
            placeholder = generated.placeholder.is_some(),
            "Card generated"
        );
        Ok(generated)
    }

    /// Generate every entry of a batch.
    ///
    /// Covers are fetched concurrently, then cards are rendered in parallel.
    /// A failing entry is recorded in the report and does not stop the rest.
    #[instrument(skip(self, entries), fields(count = entries.len()))]
    pub async fn generate_batch(&self, entries: Vec<BatchEntry>) -> BatchReport {
        let jobs: Vec<(usize, PathBuf, ReviewCardRequest)> = entries
            .into_iter()
            .enumerate()
            .map(|(index, entry)| {
                let output = entry
                    .output
                    .unwrap_or_else(|| PathBuf::from(default_output_name(&entry.request.title)));
                (index, output, entry.request)
            })
            .collect();

        // Invalid entries skip the cover fetch
        let loader = &self.loader;
        let loaded: Vec<(usize, PathBuf, ReviewCardRequest, Result<Loaded>)> = stream::iter(jobs)
            .map(|(index, output, request)| async move {
                let loaded = match request.validate() {
                    Ok(()) => {
                        let outcome = loader.load_optional(request.cover.as_ref()).await;
                        let placeholder = outcome.reason().cloned();
                        Ok(Loaded {
                            cover: outcome.into_bitmap(),
                            placeholder,
                        })
                    }
                    Err(e) => Err(CardgenError::from(e)),
                };
                (index, output, request, loaded)
            })
            .buffered(BATCH_FETCH_CONCURRENCY)
            .collect()
            .await;

        let targets: Vec<(usize, PathBuf)> = loaded
            .iter()
            .map(|(index, output, _, _)| (*index, output.clone()))
            .collect();
        let style = Arc::clone(&self.style);
        let rendered = tokio::task::spawn_blocking(move || {
            loaded
                .into_par_iter()
                .map(|(index, output, request, loaded)| {
                    let result = loaded.and_then(|l| {
                        write_card(&request, l.cover.as_ref(), &style, &output, l.placeholder)
                    });
                    BatchItem {
                        index,
                        output,
                        result,
                    }
                })
                .collect::<Vec<_>>()
        })
        .await;

        let items = match rendered {
            Ok(items) => items,
            Err(e) => {
                error!(error = %e, "Batch render task failed");
                failed_items(targets, &format!("batch render task failed: {}", e))
            }
        };

        let report = BatchReport { items };
        for item in &report.items {
            if let Err(e) = &item.result {
                warn!(
                    index = item.index,
                    output = %item.output.display(),
                    error = %e,
                    "Batch entry failed"
                );
            }
        }
        info!(
            success = report.succeeded(),
            failed = report.failed(),
            "Batch complete"
        );
        report
    }
}

/// Mark every entry failed when the render task itself did not complete.
fn failed_items(targets: Vec<(usize, PathBuf)>, message: &str) -> Vec<BatchItem> {
    targets
        .into_iter()
        .map(|(index, output)| BatchItem {
            index,
            output,
            result: Err(CardError::RenderFailure(message.to_string()).into()),
        })
        .collect()
}

struct Loaded {
    cover: Option<RgbaImage>,
    placeholder: Option<CoverLoadFailure>,
}

/// Render, encode and atomically write one card.
pub(crate) fn write_card(
    request: &ReviewCardRequest,
    cover: Option<&RgbaImage>,
    style: &CardStyle,
    output: &Path,
    placeholder: Option<CoverLoadFailure>,
) -> Result<Generated> {
    let card = render_with_style(request, cover, style)?;
    let png = card.encode_png()?;
    write_atomic(output, &png)?;
    Ok(Generated {
        path: output.to_path_buf(),
        width: card.width(),
        height: card.height(),
        bytes: png.len(),
        placeholder,
    })
}

/// Load the cover, render the card and write a PNG at `output_path`.
///
/// Cover failures fall back to the placeholder; validation, render and write
/// failures are returned and leave no file at `output_path`.
pub async fn generate(
    request: &ReviewCardRequest,
    output_path: &Path,
    options: GenerateOptions,
) -> Result<Generated> {
    request.validate()?;
    Pipeline::new(options)?
        .generate(request, output_path)
        .await
}
