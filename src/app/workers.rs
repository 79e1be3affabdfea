use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crossterm::event::{self, Event as CEvent};
use tokio::sync::mpsc;

use crate::sources;
use crate::state::{FetchOutcome, FetchRequest};

/// What: Serve fetch requests from the event layer.
///
/// Inputs:
/// - `api_base`: API root
/// - `req_rx`: Requests from `logic::query`
/// - `out_tx`: Outcomes back to the event loop
///
/// Details:
/// - Each request runs in its own task so a slow detail fetch never blocks a list reload.
/// - Results are sent even when cancelled; the tracker on the receiving side drops them.
pub fn spawn_fetch_worker(
    api_base: String,
    mut req_rx: mpsc::UnboundedReceiver<FetchRequest>,
    out_tx: mpsc::UnboundedSender<FetchOutcome>,
) -> tokio::task::JoinHandle<()> {
    let api_base: Arc<str> = Arc::from(api_base);
    tokio::spawn(async move {
        while let Some(req) = req_rx.recv().await {
            let base = Arc::clone(&api_base);
            let tx = out_tx.clone();
            tokio::spawn(async move {
                let outcome = match req {
                    FetchRequest::List { request_id, token } => FetchOutcome::List {
                        request_id,
                        result: sources::fetch_products(&base, &token).await,
                    },
                    FetchRequest::Detail {
                        request_id,
                        product_id,
                        token,
                    } => FetchOutcome::Detail {
                        request_id,
                        result: sources::fetch_detail(&base, product_id, &token).await,
                    },
                };
                let _ = tx.send(outcome);
            });
        }
        tracing::debug!("fetch worker stopped");
    })
}

/// What: Read terminal events on a dedicated thread.
///
/// Inputs:
/// - `event_tx`: Channel into the event loop
/// - `stop`: Set to end the thread
///
/// Details:
/// - Polls with a short timeout so `stop` is observed promptly.
pub fn spawn_input_thread(
    event_tx: mpsc::UnboundedSender<CEvent>,
    stop: Arc<AtomicBool>,
) -> std::thread::JoinHandle<()> {
    std::thread::spawn(move || {
        while !stop.load(Ordering::Relaxed) {
            match event::poll(Duration::from_millis(50)) {
                Ok(true) => match event::read() {
                    Ok(ev) => {
                        if event_tx.send(ev).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "terminal read failed");
                        break;
                    }
                },
                Ok(false) => {}
                Err(e) => {
                    tracing::error!(error = %e, "terminal poll failed");
                    break;
                }
            }
        }
    })
}
