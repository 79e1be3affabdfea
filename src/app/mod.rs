//! Runtime: terminal lifecycle, background workers and the main event loop.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use crossterm::event::Event as CEvent;
use tokio::sync::mpsc;

use crate::config::Settings;
use crate::favorites::{FavoritesStore, FileSlot, watch_favorites_file};
use crate::logic::query;
use crate::state::{AppState, FetchOutcome, FetchRequest};

mod logging;
mod terminal;
mod workers;

pub use logging::{LOG_FILE_NAME, default_directive, init_logging};
pub use workers::{spawn_fetch_worker, spawn_input_thread};

/// Interval at which the loop re-checks the search debounce window.
const TICK: Duration = Duration::from_millis(50);

/// Startup options assembled by the binary from settings and command line flags.
#[derive(Clone, Debug, Default)]
pub struct RunOptions {
    pub settings: Settings,
    /// Product id to open on startup, as typed (validated like any other id).
    pub start_product: Option<String>,
}

/// Channels the event loop reads from.
struct LoopChannels {
    events: mpsc::UnboundedReceiver<CEvent>,
    outcomes: mpsc::UnboundedReceiver<FetchOutcome>,
    favorites_changed: mpsc::UnboundedReceiver<()>,
}

/// What: Run the application until the user quits.
///
/// Inputs:
/// - `options`: Settings plus an optional product to open first.
///
/// Output:
/// - `Ok(())` on normal exit; terminal I/O errors otherwise.
///
/// Details:
/// - The terminal is restored even when the loop fails.
pub async fn run(options: RunOptions) -> std::io::Result<()> {
    let RunOptions {
        settings,
        start_product,
    } = options;

    let store = FavoritesStore::load(Arc::new(FileSlot::new(crate::config::favorites_path())));
    let (fav_tx, fav_rx) = mpsc::unbounded_channel::<()>();
    let _watcher = store.slot().path().and_then(|path| {
        watch_favorites_file(path, fav_tx)
            .inspect_err(|e| {
                tracing::error!(
                    path = %path.display(),
                    error = %e,
                    "favorites watcher unavailable"
                );
            })
            .ok()
    });
    let mut app = AppState::new(&settings, store);

    let (fetch_tx, fetch_rx) = mpsc::unbounded_channel::<FetchRequest>();
    let (out_tx, out_rx) = mpsc::unbounded_channel::<FetchOutcome>();
    let (event_tx, event_rx) = mpsc::unbounded_channel::<CEvent>();

    let worker = spawn_fetch_worker(settings.api_base.clone(), fetch_rx, out_tx);

    query::request_products(&mut app, &fetch_tx);
    if let Some(raw) = start_product.as_deref() {
        query::open_detail_from_input(&mut app, raw, &fetch_tx);
    }

    let mut term = terminal::setup_terminal()?;
    let stop = Arc::new(AtomicBool::new(false));
    let input = spawn_input_thread(event_tx, Arc::clone(&stop));

    let channels = LoopChannels {
        events: event_rx,
        outcomes: out_rx,
        favorites_changed: fav_rx,
    };
    let result = event_loop(&mut term, &mut app, channels, &fetch_tx).await;

    stop.store(true, Ordering::Relaxed);
    let restored = terminal::restore_terminal(&mut term);
    let _ = input.join();
    worker.abort();
    tracing::info!("product-explorer exited");
    result.and(restored)
}

async fn event_loop(
    term: &mut terminal::Tui,
    app: &mut AppState,
    mut ch: LoopChannels,
    fetch_tx: &mpsc::UnboundedSender<FetchRequest>,
) -> std::io::Result<()> {
    let mut tick = tokio::time::interval(TICK);
    loop {
        term.draw(|f| crate::ui::ui(f, app))?;
        tokio::select! {
            Some(ev) = ch.events.recv() => {
                if crate::events::handle_event(ev, app, fetch_tx) {
                    break;
                }
            }
            Some(outcome) = ch.outcomes.recv() => {
                query::apply_outcome(app, outcome);
            }
            Some(()) = ch.favorites_changed.recv() => {
                query::reload_favorites(app);
            }
            _ = tick.tick() => {
                query::apply_debounced_query(app, Instant::now());
            }
        }
        if app.should_quit {
            break;
        }
    }
    Ok(())
}
