use std::{cell::RefCell, rc::Rc};

use event_bus::{EventBus, EventKey};
use serde_json::{json, Value};
use shared::{
    domain::{CatalogItem, ItemId},
    topics,
};

use super::*;

fn item(id: &str, title: &str, price: Option<i64>) -> CatalogItem {
    CatalogItem {
        id: ItemId::new(id),
        category: "soft-skill".to_string(),
        title: title.to_string(),
        description: format!("{title} description"),
        image: format!("/images/{id}.svg"),
        price,
    }
}

fn count_events(bus: &EventBus, event: &str) -> Rc<RefCell<u32>> {
    let count = Rc::new(RefCell::new(0u32));
    let counter = Rc::clone(&count);
    bus.subscribe(
        EventKey::name(event),
        Rc::new(move |_: &Value| *counter.borrow_mut() += 1),
    );
    count
}

fn last_payload(bus: &EventBus, event: &str) -> Rc<RefCell<Option<Value>>> {
    let slot = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&slot);
    bus.subscribe(
        EventKey::name(event),
        Rc::new(move |payload: &Value| *sink.borrow_mut() = Some(payload.clone())),
    );
    slot
}

#[test]
fn catalog_set_emits_loaded_and_serves_lookups() {
    let bus = EventBus::new();
    let loaded = count_events(&bus, topics::CATALOG_LOADED);
    let catalog = CatalogStore::new(bus);
    assert!(catalog.is_empty());

    catalog.set_catalog(vec![item("a", "Widget", Some(100)), item("b", "Gizmo", None)]);

    assert_eq!(*loaded.borrow(), 1);
    assert!(!catalog.is_empty());
    assert_eq!(catalog.len(), 2);
    assert_eq!(
        catalog.get_item(&ItemId::new("a")).map(|i| i.title),
        Some("Widget".to_string())
    );
    assert!(catalog.get_item(&ItemId::new("missing")).is_none());
}

#[test]
fn cart_total_skips_priceless_items() {
    let bus = EventBus::new();
    let cart = CartStore::new(bus);

    cart.add_item(item("a", "Priced", Some(100)));
    cart.add_item(item("b", "Priceless", None));

    assert_eq!(cart.total_price(), 100);
    assert_eq!(cart.count(), 2);
}

#[test]
fn cart_of_only_priceless_items_reads_as_empty() {
    let bus = EventBus::new();
    let cart = CartStore::new(bus);

    cart.add_item(item("b", "Priceless", None));

    assert_eq!(cart.count(), 1);
    assert!(cart.is_empty());
}

#[test]
fn cart_keeps_duplicate_ids_newest_first() {
    let bus = EventBus::new();
    let cart = CartStore::new(bus);

    cart.add_item(item("a", "Widget", Some(100)));
    cart.add_item(item("b", "Gizmo", Some(50)));
    cart.add_item(item("a", "Widget", Some(100)));

    let ids: Vec<String> = cart
        .items()
        .iter()
        .map(|i| i.id.as_str().to_string())
        .collect();
    assert_eq!(ids, ["a", "b", "a"]);
    assert_eq!(cart.total_price(), 250);
}

#[test]
fn removing_a_missing_id_leaves_the_cart_but_still_emits() {
    let bus = EventBus::new();
    let changed = count_events(&bus, topics::CART_CHANGED);
    let cart = CartStore::new(bus);

    cart.add_item(item("a", "Widget", Some(100)));
    assert_eq!(*changed.borrow(), 1);

    cart.remove_item(&ItemId::new("nope"));
    assert_eq!(cart.count(), 1);
    assert_eq!(*changed.borrow(), 2);
}

#[test]
fn remove_drops_every_entry_with_the_id() {
    let bus = EventBus::new();
    let cart = CartStore::new(bus);

    cart.add_item(item("a", "Widget", Some(100)));
    cart.add_item(item("a", "Widget", Some(100)));
    cart.add_item(item("b", "Gizmo", Some(50)));

    cart.remove_item(&ItemId::new("a"));
    assert_eq!(cart.count(), 1);
    assert!(!cart.has_item(&ItemId::new("a")));
    assert!(cart.has_item(&ItemId::new("b")));
}

#[test]
fn malformed_add_is_dropped_without_an_event() {
    let bus = EventBus::new();
    let changed = count_events(&bus, topics::CART_CHANGED);
    let cart = CartStore::new(bus);

    cart.add_item(item("", "No Id", Some(10)));

    assert_eq!(cart.count(), 0);
    assert_eq!(*changed.borrow(), 0);
}

#[test]
fn clear_empties_and_emits() {
    let bus = EventBus::new();
    let changed = count_events(&bus, topics::CART_CHANGED);
    let cart = CartStore::new(bus);

    cart.add_item(item("a", "Widget", Some(100)));
    cart.clear();

    assert_eq!(cart.count(), 0);
    assert_eq!(*changed.borrow(), 2);
}

#[test]
fn order_step_reports_only_the_missing_field() {
    let bus = EventBus::new();
    let errors = last_payload(&bus, topics::ORDER_ERRORS_CHANGED);
    let draft = OrderDraft::new(bus);

    draft.set_order_field("payment", "card");

    assert!(!draft.is_order_valid());
    let payload = errors.borrow().clone().expect("errors event");
    let map = payload.as_object().expect("object payload");
    assert_eq!(map.len(), 1);
    assert!(map.contains_key("address"));
}

#[test]
fn order_step_becomes_valid_with_both_fields_set() {
    let bus = EventBus::new();
    let errors = last_payload(&bus, topics::ORDER_ERRORS_CHANGED);
    let draft = OrderDraft::new(bus);

    draft.set_order_field("payment", "card");
    draft.set_order_field("address", "1 Main St");

    assert!(draft.is_order_valid());
    assert_eq!(errors.borrow().clone().expect("errors event"), json!({}));
    assert!(draft.order_errors().is_empty());
}

#[test]
fn contact_step_validates_independently_of_the_order_step() {
    let bus = EventBus::new();
    let contact_errors = last_payload(&bus, topics::CONTACTS_ERRORS_CHANGED);
    let order_errors = count_events(&bus, topics::ORDER_ERRORS_CHANGED);
    let draft = OrderDraft::new(bus);

    draft.set_contact_field("email", "a@b.c");

    assert_eq!(*order_errors.borrow(), 0);
    assert!(!draft.is_contacts_valid());
    let payload = contact_errors.borrow().clone().expect("errors event");
    let map = payload.as_object().expect("object payload");
    assert_eq!(map.len(), 1);
    assert!(map.contains_key("phone"));

    draft.set_contact_field("phone", "+1 555 0100");
    assert!(draft.is_contacts_valid());
}

#[test]
fn reset_blanks_a_step_and_its_errors() {
    let bus = EventBus::new();
    let draft = OrderDraft::new(bus);

    draft.set_order_field("payment", "card");
    draft.set_order_field("address", "1 Main St");
    assert!(draft.is_order_valid());

    draft.reset_order();
    assert!(!draft.is_order_valid());
    assert!(draft.order_errors().is_empty());
    assert_eq!(draft.snapshot().payment, "");

    draft.set_contact_field("email", "a@b.c");
    draft.reset_contacts();
    assert_eq!(draft.snapshot().email, "");
}

#[test]
fn unknown_field_names_are_ignored() {
    let bus = EventBus::new();
    let order_errors = count_events(&bus, topics::ORDER_ERRORS_CHANGED);
    let draft = OrderDraft::new(bus);

    draft.set_order_field("cardholder", "A. Person");

    assert_eq!(*order_errors.borrow(), 0);
    assert_eq!(draft.snapshot(), Default::default());
}
