//! Live preview: poll a request file and re-render on change.
//!
//! Edits are debounced, then the card is rendered synchronously and the
//! preview PNG rewritten atomically. An edit that does not parse or validate
//! is reported and the last good preview stays on disk.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime};

use card_common::{CardError, CoverRef, ReviewCardRequest};
use cover_loader::{CoverLoader, CoverOutcome};
use renderer::CardStyle;
use tracing::{debug, info, warn};

use crate::config::{parse_request, read_file};
use crate::error::Result;
use crate::pipeline::{write_card, Generated};

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Fires once a burst of changes has been quiet for `delay`.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    pending_since: Option<Instant>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending_since: None,
        }
    }

    /// Record a change at `now`, restarting the quiet period.
    pub fn notify(&mut self, now: Instant) {
        self.pending_since = Some(now);
    }

    pub fn is_pending(&self) -> bool {
        self.pending_since.is_some()
    }

    /// True once per burst, when the quiet period has elapsed.
    pub fn ready(&mut self, now: Instant) -> bool {
        match self.pending_since {
            Some(since) if now.saturating_duration_since(since) >= self.delay => {
                self.pending_since = None;
                true
            }
            _ => false,
        }
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

/// Result of one preview refresh.
#[derive(Debug, Clone, PartialEq)]
pub enum WatchEvent {
    Rendered(Generated),
    /// The edit was rejected; the message is meant for the user
    Rejected(String),
    /// File content is the same as last time
    Unchanged,
}

/// Preview state for one request file.
pub struct Preview {
    request_path: PathBuf,
    output: PathBuf,
    style: Arc<CardStyle>,
    loader: CoverLoader,
    last_source: Option<String>,
    last_good: Option<ReviewCardRequest>,
    cover: Option<(Option<CoverRef>, CoverOutcome)>,
}

impl Preview {
    pub fn new(
        request_path: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
        style: CardStyle,
        loader: CoverLoader,
    ) -> Self {
        Self {
            request_path: request_path.into(),
            output: output.into(),
            style: Arc::new(style),
            loader,
            last_source: None,
            last_good: None,
            cover: None,
        }
    }

    pub fn request_path(&self) -> &Path {
        &self.request_path
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Last request that rendered successfully.
    pub fn last_good(&self) -> Option<&ReviewCardRequest> {
        self.last_good.as_ref()
    }

    /// Re-read the request file and re-render if it changed.
    pub async fn refresh(&mut self) -> WatchEvent {
        let source = match read_file(&self.request_path) {
            Ok(source) => source,
            Err(e) => return WatchEvent::Rejected(e.user_message()),
        };
        if self.last_source.as_deref() == Some(source.as_str()) {
            return WatchEvent::Unchanged;
        }
        self.last_source = Some(source);

        match self.render_current().await {
            Ok(generated) => WatchEvent::Rendered(generated),
            Err(e) => WatchEvent::Rejected(e.user_message()),
        }
    }

    async fn render_current(&mut self) -> Result<Generated> {
        let source = self.last_source.as_deref().unwrap_or_default();
        let request = parse_request(&self.request_path, source)?;
        request.validate()?;

        // Only decoded covers are reused; a placeholder is retried on the next edit
        let cached = matches!(
            &self.cover,
            Some((key, outcome)) if *key == request.cover && outcome.is_loaded()
        );
        if !cached {
            let outcome = self.loader.load_optional(request.cover.as_ref()).await;
            self.cover = Some((request.cover.clone(), outcome));
        }
        let (bitmap, placeholder) = match &self.cover {
            Some((_, outcome)) => (outcome.bitmap().cloned(), outcome.reason().cloned()),
            None => (None, None),
        };

        let style = Arc::clone(&self.style);
        let output = self.output.clone();
        let (request, generated) = tokio::task::spawn_blocking(move || {
            let generated = write_card(&request, bitmap.as_ref(), &style, &output, placeholder);
            (request, generated)
        })
        .await
        .map_err(|e| CardError::RenderFailure(format!("preview task failed: {}", e)))?;

        let generated = generated?;
        self.last_good = Some(request);
        Ok(generated)
    }
}

fn modified(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|m| m.modified()).ok()
}

/// Poll `preview`'s request file until Ctrl-C.
pub async fn run(preview: Preview, debounce: Duration, poll_interval: Duration) -> Result<()> {
    run_until(preview, debounce, poll_interval, async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Could not listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    })
    .await
}

/// Poll `preview`'s request file until `shutdown` resolves.
pub async fn run_until(
    mut preview: Preview,
    debounce: Duration,
    poll_interval: Duration,
    shutdown: impl Future<Output = ()>,
) -> Result<()> {
    info!(
        request = %preview.request_path().display(),
        output = %preview.output().display(),
        debounce_ms = debounce.as_millis() as u64,
        "Watching request file"
    );
    tokio::pin!(shutdown);

    let mut debouncer = Debouncer::new(debounce);
    let mut last_modified = modified(preview.request_path());
    let mut ticker = tokio::time::interval(poll_interval);
    let mut first = true;

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                info!("Stopping watch");
                return Ok(());
            }
            _ = ticker.tick() => {
                let now = Instant::now();
                let current = modified(preview.request_path());
                if current != last_modified {
                    last_modified = current;
                    debouncer.notify(now);
                }
                if std::mem::take(&mut first) || debouncer.ready(now) {
                    // Shutdown stays responsive while a render is in flight
                    tokio::select! {
                        event = preview.refresh() => report(event),
                        _ = &mut shutdown => {
                            info!("Stopping watch");
                            return Ok(());
                        }
                    }
                }
            }
        }
    }
}

fn report(event: WatchEvent) {
    match event {
        WatchEvent::Rendered(generated) => info!(
            path = %generated.path.display(),
            placeholder = generated.placeholder.is_some(),
            "Preview updated"
        ),
        WatchEvent::Rejected(message) => warn!(%message, "Edit rejected, keeping last preview"),
        WatchEvent::Unchanged => debug!("Request file unchanged"),
    }
}
