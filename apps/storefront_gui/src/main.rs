use std::rc::Rc;

mod backend_bridge;
mod config;
mod controller;
mod ui;

use clap::Parser;
use crossbeam_channel::bounded;
use event_bus::EventBus;
use serde_json::Value;
use stores::{CartStore, CatalogStore, OrderDraft};

use backend_bridge::{commands::BackendCommand, worker};
use controller::{events::UiEvent, orchestration};
use ui::{views::Views, StorefrontApp};

#[derive(Parser)]
#[command(name = "storefront", about = "Desktop storefront client")]
struct Args {
    /// Commerce API base URL (overrides file and environment).
    #[arg(long)]
    api_url: Option<String>,
    /// CDN base URL for product images.
    #[arg(long)]
    cdn_url: Option<String>,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let args = Args::parse();
    let settings = config::load_settings(args.api_url.as_deref(), args.cdn_url.as_deref());
    tracing::info!(api_url = %settings.api_url, cdn_url = %settings.cdn_url, "starting storefront");

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    worker::spawn_backend_thread(settings, cmd_rx, ui_tx);

    let bus = EventBus::new();
    bus.subscribe_all(Rc::new(|event: &str, _payload: &Value| {
        tracing::debug!(event, "bus event");
    }));

    let catalog = Rc::new(CatalogStore::new(bus.clone()));
    let cart = Rc::new(CartStore::new(bus.clone()));
    let draft = Rc::new(OrderDraft::new(bus.clone()));
    let views = Views::new(&bus);
    let wiring = orchestration::Wiring::new(bus, catalog, cart, draft, views, cmd_tx.clone());
    orchestration::wire(&wiring);

    orchestration::dispatch_backend_command(&cmd_tx, BackendCommand::FetchCatalog);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Storefront")
            .with_inner_size([1180.0, 780.0])
            .with_min_inner_size([900.0, 600.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Storefront",
        options,
        Box::new(move |_cc| Ok(Box::new(StorefrontApp::new(wiring, ui_rx)))),
    )
}
