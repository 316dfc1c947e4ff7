//! Live preview refresh behaviour.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use std::time::Duration;

use cardgen::watch::{run_until, Preview, WatchEvent};
use cover_loader::{CoverFetch, CoverLoadFailure, CoverLoader, LoaderConfig};
use renderer::CardStyle;
use test_utils::{
    png_bytes, solid_cover, temp_test_dir, write_cover_png, write_fixture, SAMPLE_STYLE_YAML,
};

/// Serves a small cover and counts fetches.
struct CountingFetch {
    calls: AtomicUsize,
}

#[async_trait]
impl CoverFetch for CountingFetch {
    async fn fetch(&self, _url: &str, _max_bytes: u64) -> Result<Bytes, CoverLoadFailure> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Bytes::from(png_bytes(&solid_cover(8, 12, [200, 40, 40]))))
    }
}

/// Never answers, like a cover host that has gone quiet.
struct HangingFetch;

#[async_trait]
impl CoverFetch for HangingFetch {
    async fn fetch(&self, _url: &str, _max_bytes: u64) -> Result<Bytes, CoverLoadFailure> {
        std::future::pending().await
    }
}

const GOOD: &str = "title: Celeste\nscore: 8.5\nwidth: 320\nheight: 180\n";
const GOOD_EDITED: &str = "title: Celeste\nscore: 6\nwidth: 320\nheight: 180\n";
const ZERO_WIDTH: &str = "title: Celeste\nscore: 8.5\nwidth: 0\nheight: 180\n";
const WITH_COVER: &str =
    "title: Celeste\nscore: 8.5\nwidth: 320\nheight: 180\ncover: https://covers.example.com/c.png\n";

fn preview(dir: &std::path::Path, fetch: Arc<CountingFetch>) -> Preview {
    let loader = CoverLoader::with_fetcher(fetch, LoaderConfig::default());
    Preview::new(
        dir.join("card.yaml"),
        dir.join("preview.png"),
        CardStyle::default(),
        loader,
    )
}

fn counting() -> Arc<CountingFetch> {
    Arc::new(CountingFetch {
        calls: AtomicUsize::new(0),
    })
}

// ============================================================================
// Refresh
// ============================================================================

#[tokio::test]
async fn test_first_refresh_renders() {
    let dir = temp_test_dir();
    write_fixture(dir.path(), "card.yaml", GOOD);
    let mut preview = preview(dir.path(), counting());

    match preview.refresh().await {
        WatchEvent::Rendered(generated) => {
            assert_eq!((generated.width, generated.height), (320, 180));
        }
        other => panic!("expected a render, got {:?}", other),
    }
    assert!(dir.path().join("preview.png").exists());
    assert_eq!(preview.last_good().map(|r| r.score), Some(8.5));
}

#[tokio::test]
async fn test_unchanged_file_is_skipped() {
    let dir = temp_test_dir();
    write_fixture(dir.path(), "card.yaml", GOOD);
    let mut preview = preview(dir.path(), counting());

    assert!(matches!(preview.refresh().await, WatchEvent::Rendered(_)));
    assert_eq!(preview.refresh().await, WatchEvent::Unchanged);

    write_fixture(dir.path(), "card.yaml", GOOD_EDITED);
    assert!(matches!(preview.refresh().await, WatchEvent::Rendered(_)));
    assert_eq!(preview.last_good().map(|r| r.score), Some(6.0));
}

#[tokio::test]
async fn test_invalid_edit_keeps_last_good_preview() {
    let dir = temp_test_dir();
    write_fixture(dir.path(), "card.yaml", GOOD);
    let mut preview = preview(dir.path(), counting());
    preview.refresh().await;
    let before = std::fs::read(dir.path().join("preview.png")).unwrap();

    write_fixture(dir.path(), "card.yaml", ZERO_WIDTH);
    match preview.refresh().await {
        WatchEvent::Rejected(message) => assert!(message.contains("0x180"), "{}", message),
        other => panic!("expected rejection, got {:?}", other),
    }

    assert_eq!(std::fs::read(dir.path().join("preview.png")).unwrap(), before);
    assert_eq!(preview.last_good().map(|r| r.width), Some(320));
}

#[tokio::test]
async fn test_unparseable_edit_is_rejected() {
    let dir = temp_test_dir();
    write_fixture(dir.path(), "card.yaml", "title: [unclosed\n");
    let mut preview = preview(dir.path(), counting());

    assert!(matches!(preview.refresh().await, WatchEvent::Rejected(_)));
    assert!(preview.last_good().is_none());
    assert!(!dir.path().join("preview.png").exists());
}

#[tokio::test]
async fn test_cover_is_cached_between_edits() {
    let dir = temp_test_dir();
    let fetch = counting();
    write_fixture(dir.path(), "card.yaml", WITH_COVER);
    let mut preview = preview(dir.path(), fetch.clone());

    match preview.refresh().await {
        WatchEvent::Rendered(generated) => assert_eq!(generated.placeholder, None),
        other => panic!("expected a render, got {:?}", other),
    }

    write_fixture(
        dir.path(),
        "card.yaml",
        &WITH_COVER.replace("score: 8.5", "score: 9"),
    );
    assert!(matches!(preview.refresh().await, WatchEvent::Rendered(_)));
    assert_eq!(fetch.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_missing_cover_is_retried_after_it_appears() {
    let dir = temp_test_dir();
    let request = "title: Celeste\nscore: 8.5\nwidth: 320\nheight: 180\ncover: cover.png\n";
    write_fixture(dir.path(), "card.yaml", request);
    let mut preview = preview(dir.path(), counting());

    match preview.refresh().await {
        WatchEvent::Rendered(generated) => assert!(matches!(
            generated.placeholder,
            Some(CoverLoadFailure::NotFound(_))
        )),
        other => panic!("expected a render, got {:?}", other),
    }

    write_cover_png(dir.path(), "cover.png", &solid_cover(8, 12, [40, 40, 200]));
    write_fixture(
        dir.path(),
        "card.yaml",
        &request.replace("title: Celeste", "title: Celeste Farewell"),
    );
    match preview.refresh().await {
        WatchEvent::Rendered(generated) => assert_eq!(generated.placeholder, None),
        other => panic!("expected a render, got {:?}", other),
    }
}

#[tokio::test]
async fn test_style_file_applies() {
    let dir = temp_test_dir();
    let style_path = write_fixture(dir.path(), "style.yaml", SAMPLE_STYLE_YAML);
    let style = CardStyle::from_file(&style_path).unwrap();
    assert_eq!(style.placeholder_text, "No Art");

    write_fixture(dir.path(), "card.yaml", GOOD);
    let loader = CoverLoader::with_fetcher(counting(), LoaderConfig::default());
    let mut preview = Preview::new(
        dir.path().join("card.yaml"),
        dir.path().join("preview.png"),
        style,
        loader,
    );
    assert!(matches!(preview.refresh().await, WatchEvent::Rendered(_)));
}

// ============================================================================
// Watch loop
// ============================================================================

#[tokio::test]
async fn test_shutdown_interrupts_refresh_in_flight() {
    let dir = temp_test_dir();
    write_fixture(dir.path(), "card.yaml", WITH_COVER);
    let config = LoaderConfig::default().with_timeout(Duration::from_secs(3600));
    let preview = Preview::new(
        dir.path().join("card.yaml"),
        dir.path().join("preview.png"),
        CardStyle::default(),
        CoverLoader::with_fetcher(Arc::new(HangingFetch), config),
    );

    let stopped = tokio::time::timeout(
        Duration::from_secs(5),
        run_until(
            preview,
            Duration::from_millis(10),
            Duration::from_millis(10),
            tokio::time::sleep(Duration::from_millis(100)),
        ),
    )
    .await;

    assert!(matches!(stopped, Ok(Ok(()))));
    assert!(!dir.path().join("preview.png").exists());
}

#[tokio::test]
async fn test_watch_renders_before_shutdown() {
    let dir = temp_test_dir();
    write_fixture(dir.path(), "card.yaml", GOOD);
    let preview = preview(dir.path(), counting());

    run_until(
        preview,
        Duration::from_millis(10),
        Duration::from_millis(10),
        tokio::time::sleep(Duration::from_millis(500)),
    )
    .await
    .unwrap();

    assert!(dir.path().join("preview.png").exists());
}
