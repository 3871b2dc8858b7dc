//! Backend worker: owns the tokio runtime and the HTTP client, consumes
//! queued commands, and reports outcomes back to the UI as events.

use std::thread;

use commerce_api::{CommerceApi, HttpCommerceApi};
use crossbeam_channel::{Receiver, Sender};

use crate::{
    backend_bridge::{commands::BackendCommand, runtime},
    config::Settings,
    controller::events::UiEvent,
};

/// Spawns the worker thread. Startup failures (runtime build, bad base
/// URL) are reported as [`UiEvent::BackendFailed`]; the UI stays
/// interactive with an empty catalog.
pub fn spawn_backend_thread(
    settings: Settings,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) {
    thread::spawn(move || {
        let runtime = match runtime::build_runtime() {
            Ok(runtime) => runtime,
            Err(err) => {
                tracing::error!("backend worker startup failure: {err:#}");
                let _ = ui_tx.try_send(UiEvent::BackendFailed(format!("{err:#}")));
                return;
            }
        };

        runtime.block_on(async move {
            let api = match HttpCommerceApi::new(&settings.api_url, &settings.cdn_url) {
                Ok(api) => api,
                Err(err) => {
                    tracing::error!("backend worker startup failure: {err}");
                    let _ = ui_tx.try_send(UiEvent::BackendFailed(err.to_string()));
                    return;
                }
            };
            run_worker(&api, cmd_rx, ui_tx).await;
        });
    });
}

/// Command loop, generic over the API so tests can drive it with a stub.
/// Exits when the command channel closes.
pub async fn run_worker<A: CommerceApi>(
    api: &A,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) {
    while let Ok(cmd) = cmd_rx.recv() {
        match cmd {
            BackendCommand::FetchCatalog => match api.fetch_products().await {
                Ok(items) => {
                    tracing::debug!(count = items.len(), "catalog fetched");
                    let _ = ui_tx.try_send(UiEvent::CatalogLoaded(items));
                }
                Err(err) => {
                    tracing::warn!("catalog fetch failed: {err}");
                    let _ = ui_tx.try_send(UiEvent::CatalogLoadFailed(err.to_string()));
                }
            },
            BackendCommand::SubmitOrder(order) => match api.place_order(&order).await {
                Ok(response) => {
                    tracing::debug!(order_id = %response.id, total = response.total, "order placed");
                    let _ = ui_tx.try_send(UiEvent::OrderPlaced(response));
                }
                Err(err) => {
                    tracing::warn!("order submission failed: {err}");
                    let _ = ui_tx.try_send(UiEvent::OrderFailed(err.to_string()));
                }
            },
        }
    }
}

#[cfg(test)]
#[path = "tests/worker_tests.rs"]
mod tests;
