//! The event contract: every cross-component flow in the storefront is a
//! subscription registered here. Views emit, stores mutate and announce,
//! and the handlers below close the loop by re-rendering view state from
//! fresh store snapshots. No component ever calls another directly.

use std::rc::Rc;

use crossbeam_channel::{Sender, TrySendError};
use event_bus::{Callback, EventBus, EventKey};
use serde_json::Value;
use shared::{
    domain::{CatalogItem, ItemId},
    protocol::OrderRequest,
    topics,
};
use stores::{CartStore, CatalogStore, OrderDraft};

use crate::{
    backend_bridge::commands::BackendCommand,
    controller::events::UiEvent,
    ui::views::{ModalContent, Views},
};

/// Everything the handlers need, by shared handle.
#[derive(Clone)]
pub struct Wiring {
    pub bus: EventBus,
    pub catalog: Rc<CatalogStore>,
    pub cart: Rc<CartStore>,
    pub draft: Rc<OrderDraft>,
    pub views: Views,
    pub cmd_tx: Sender<BackendCommand>,
}

impl Wiring {
    pub fn new(
        bus: EventBus,
        catalog: Rc<CatalogStore>,
        cart: Rc<CartStore>,
        draft: Rc<OrderDraft>,
        views: Views,
        cmd_tx: Sender<BackendCommand>,
    ) -> Self {
        Self {
            bus,
            catalog,
            cart,
            draft,
            views,
            cmd_tx,
        }
    }
}

fn on(bus: &EventBus, event: &str, callback: Callback) {
    bus.subscribe(EventKey::name(event), callback);
}

fn on_pattern(bus: &EventBus, pattern: &str, callback: Callback) {
    // The two patterns are compile-time constants from shared::topics.
    match EventKey::pattern(pattern) {
        Ok(key) => bus.subscribe(key, callback),
        Err(err) => tracing::error!(pattern, "invalid event pattern: {err}"),
    }
}

/// Registers the full handler table. Call once at startup, before the
/// first emission.
pub fn wire(w: &Wiring) {
    let bus = &w.bus;

    // catalog:loaded -> one card per item.
    {
        let catalog = Rc::clone(&w.catalog);
        let panel = Rc::clone(&w.views.catalog);
        on(bus, topics::CATALOG_LOADED, Rc::new(move |_: &Value| {
            panel.set_cards(catalog.items());
        }));
    }

    // item:select {id} -> resolve and re-emit with the full item.
    {
        let catalog = Rc::clone(&w.catalog);
        let cart = Rc::clone(&w.cart);
        let chain = bus.clone();
        on(bus, topics::ITEM_SELECT, Rc::new(move |payload: &Value| {
            let Some(id) = payload_id(payload) else {
                tracing::warn!(%payload, "item:select without an id");
                return;
            };
            let Some(item) = catalog.get_item(&id) else {
                tracing::warn!(id = id.as_str(), "item:select for unknown item");
                return;
            };
            chain.emit(
                topics::ITEM_SELECTED,
                selected_payload(&item, cart.has_item(&id)),
            );
        }));
    }

    // item:selected -> detail panel inside the modal.
    {
        let detail = Rc::clone(&w.views.detail);
        let modal = Rc::clone(&w.views.modal);
        on(bus, topics::ITEM_SELECTED, Rc::new(move |payload: &Value| {
            match serde_json::from_value::<SelectedItem>(payload.clone()) {
                Ok(selected) => {
                    detail.set(selected.item, selected.in_cart);
                    modal.open(ModalContent::Detail);
                }
                Err(err) => tracing::warn!("malformed item:selected payload: {err}"),
            }
        }));
    }

    // item:buy {id} -> add to cart, close the modal.
    {
        let catalog = Rc::clone(&w.catalog);
        let cart = Rc::clone(&w.cart);
        let modal = Rc::clone(&w.views.modal);
        on(bus, topics::ITEM_BUY, Rc::new(move |payload: &Value| {
            let Some(id) = payload_id(payload) else {
                tracing::warn!(%payload, "item:buy without an id");
                return;
            };
            if let Some(item) = catalog.get_item(&id) {
                cart.add_item(item);
            } else {
                tracing::warn!(id = id.as_str(), "item:buy for unknown item");
            }
            modal.close();
        }));
    }

    // cart:changed -> cart panel and header counter.
    {
        let cart = Rc::clone(&w.cart);
        let panel = Rc::clone(&w.views.cart);
        let page = Rc::clone(&w.views.page);
        on(bus, topics::CART_CHANGED, Rc::new(move |_: &Value| {
            panel.set(cart.items(), cart.total_price(), !cart.is_empty());
            page.set_counter(cart.count());
        }));
    }

    // cart:open -> show the cart panel.
    {
        let modal = Rc::clone(&w.views.modal);
        on(bus, topics::CART_OPEN, Rc::new(move |_: &Value| {
            modal.open(ModalContent::Cart);
        }));
    }

    // cart-item:delete {id} -> remove from the cart.
    {
        let cart = Rc::clone(&w.cart);
        on(bus, topics::CART_ITEM_DELETE, Rc::new(move |payload: &Value| {
            match payload_id(payload) {
                Some(id) => cart.remove_item(&id),
                None => tracing::warn!(%payload, "cart-item:delete without an id"),
            }
        }));
    }

    // order:open -> blank payment step, show its form.
    {
        let draft = Rc::clone(&w.draft);
        let form = Rc::clone(&w.views.order_form);
        let modal = Rc::clone(&w.views.modal);
        on(bus, topics::ORDER_OPEN, Rc::new(move |_: &Value| {
            draft.reset_order();
            form.reset();
            modal.open(ModalContent::OrderForm);
        }));
    }

    // order.<field>:change -> one pattern subscription for the family.
    {
        let draft = Rc::clone(&w.draft);
        on_pattern(bus, topics::ORDER_FIELD_PATTERN, Rc::new(move |payload: &Value| {
            match payload_field_value(payload) {
                Some((field, value)) => draft.set_order_field(&field, &value),
                None => tracing::warn!(%payload, "malformed order field change"),
            }
        }));
    }

    // order-errors:changed -> form validity plus a joined display string.
    {
        let form = Rc::clone(&w.views.order_form);
        on(bus, topics::ORDER_ERRORS_CHANGED, Rc::new(move |payload: &Value| {
            let (valid, errors) = joined_errors(payload);
            form.set_validity(valid, errors);
        }));
    }

    // order:submit -> blank contact step, show its form.
    {
        let draft = Rc::clone(&w.draft);
        let form = Rc::clone(&w.views.contacts_form);
        let modal = Rc::clone(&w.views.modal);
        on(bus, topics::ORDER_SUBMIT, Rc::new(move |_: &Value| {
            draft.reset_contacts();
            form.reset();
            modal.open(ModalContent::ContactsForm);
        }));
    }

    // contacts.<field>:change -> same family treatment.
    {
        let draft = Rc::clone(&w.draft);
        on_pattern(bus, topics::CONTACTS_FIELD_PATTERN, Rc::new(move |payload: &Value| {
            match payload_field_value(payload) {
                Some((field, value)) => draft.set_contact_field(&field, &value),
                None => tracing::warn!(%payload, "malformed contact field change"),
            }
        }));
    }

    // contacts-errors:changed -> contact form validity.
    {
        let form = Rc::clone(&w.views.contacts_form);
        on(bus, topics::CONTACTS_ERRORS_CHANGED, Rc::new(move |payload: &Value| {
            let (valid, errors) = joined_errors(payload);
            form.set_validity(valid, errors);
        }));
    }

    // contacts:submit -> assemble the order and hand it to the worker.
    {
        let cart = Rc::clone(&w.cart);
        let draft = Rc::clone(&w.draft);
        let cmd_tx = w.cmd_tx.clone();
        on(bus, topics::CONTACTS_SUBMIT, Rc::new(move |_: &Value| {
            let fields = draft.snapshot();
            let order = OrderRequest {
                payment: fields.payment,
                address: fields.address,
                email: fields.email,
                phone: fields.phone,
                total: cart.total_price(),
                items: cart.item_ids(),
            };
            dispatch_backend_command(&cmd_tx, BackendCommand::SubmitOrder(order));
        }));
    }

    // success:submit -> done, close the overlay.
    {
        let modal = Rc::clone(&w.views.modal);
        on(bus, topics::SUCCESS_SUBMIT, Rc::new(move |_: &Value| {
            modal.close();
        }));
    }

    // modal:open / modal:close -> background lock.
    {
        let page = Rc::clone(&w.views.page);
        on(bus, topics::MODAL_OPEN, Rc::new(move |_: &Value| {
            page.set_locked(true);
        }));
    }
    {
        let page = Rc::clone(&w.views.page);
        on(bus, topics::MODAL_CLOSE, Rc::new(move |_: &Value| {
            page.set_locked(false);
        }));
    }
}

/// Applies a worker event. Failures log and leave state untouched: the
/// catalog stays empty on a failed load, and a failed submission keeps
/// the cart and the open form for another attempt.
pub fn handle_ui_event(w: &Wiring, event: UiEvent) {
    match event {
        UiEvent::BackendFailed(reason) => {
            tracing::error!(%reason, "backend worker unavailable");
        }
        UiEvent::CatalogLoaded(items) => {
            w.catalog.set_catalog(items);
        }
        UiEvent::CatalogLoadFailed(reason) => {
            tracing::warn!(%reason, "catalog load failed");
        }
        UiEvent::OrderPlaced(response) => {
            w.cart.clear();
            w.views.success.set_total(response.total);
            w.views.modal.open(ModalContent::Success);
        }
        UiEvent::OrderFailed(reason) => {
            tracing::warn!(%reason, "order submission failed");
        }
    }
}

/// Queues a command for the worker. The queue filling up or the worker
/// being gone is logged and otherwise dropped; nothing here may block the
/// UI thread.
pub fn dispatch_backend_command(cmd_tx: &Sender<BackendCommand>, cmd: BackendCommand) {
    let cmd_name = match &cmd {
        BackendCommand::FetchCatalog => "fetch_catalog",
        BackendCommand::SubmitOrder { .. } => "submit_order",
    };

    match cmd_tx.try_send(cmd) {
        Ok(()) => tracing::debug!(command = cmd_name, "queued ui->backend command"),
        Err(TrySendError::Full(_)) => {
            tracing::error!(command = cmd_name, "backend command queue is full");
        }
        Err(TrySendError::Disconnected(_)) => {
            tracing::error!(command = cmd_name, "backend command processor disconnected");
        }
    }
}

#[derive(serde::Deserialize)]
struct SelectedItem {
    #[serde(flatten)]
    item: CatalogItem,
    #[serde(rename = "inCart")]
    in_cart: bool,
}

fn selected_payload(item: &CatalogItem, in_cart: bool) -> Value {
    let mut payload = serde_json::to_value(item).unwrap_or(Value::Null);
    if let Value::Object(map) = &mut payload {
        map.insert("inCart".to_string(), Value::Bool(in_cart));
    }
    payload
}

fn payload_id(payload: &Value) -> Option<ItemId> {
    payload.get("id")?.as_str().map(ItemId::new)
}

fn payload_field_value(payload: &Value) -> Option<(String, String)> {
    let field = payload.get("field")?.as_str()?.to_string();
    let value = payload.get("value")?.as_str()?.to_string();
    Some((field, value))
}

fn joined_errors(payload: &Value) -> (bool, String) {
    let Some(map) = payload.as_object() else {
        return (false, String::new());
    };
    let messages: Vec<&str> = map.values().filter_map(Value::as_str).collect();
    (map.is_empty(), messages.join("; "))
}

#[cfg(test)]
#[path = "tests/orchestration_tests.rs"]
mod tests;
