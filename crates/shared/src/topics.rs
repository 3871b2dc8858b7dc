//! Event vocabulary shared by stores, views, and the orchestration layer.
//!
//! Every cross-component notification travels over the event bus under one
//! of these names. Form inputs emit per-field names (`order.address:change`,
//! `contacts.email:change`, ...) so the orchestration layer can subscribe to
//! a whole family with a single pattern subscription.

/// Catalog store replaced its item collection.
pub const CATALOG_LOADED: &str = "catalog:loaded";

/// A catalog card was clicked. Payload: `{id}`.
pub const ITEM_SELECT: &str = "item:select";

/// A selected item was resolved. Payload: full item plus an `inCart` flag.
pub const ITEM_SELECTED: &str = "item:selected";

/// Buy was clicked in the detail panel. Payload: `{id}`.
pub const ITEM_BUY: &str = "item:buy";

/// Cart contents changed (add, remove, or clear).
pub const CART_CHANGED: &str = "cart:changed";

/// The header cart button was clicked.
pub const CART_OPEN: &str = "cart:open";

/// A cart row's delete control was clicked. Payload: `{id}`.
pub const CART_ITEM_DELETE: &str = "cart-item:delete";

/// Checkout was started from the cart panel.
pub const ORDER_OPEN: &str = "order:open";

/// Payment-step validation ran. Payload: field name -> message map.
pub const ORDER_ERRORS_CHANGED: &str = "order-errors:changed";

/// The payment/address form was submitted.
pub const ORDER_SUBMIT: &str = "order:submit";

/// Contact-step validation ran. Payload: field name -> message map.
pub const CONTACTS_ERRORS_CHANGED: &str = "contacts-errors:changed";

/// The contact form was submitted.
pub const CONTACTS_SUBMIT: &str = "contacts:submit";

/// The success panel's close button was clicked.
pub const SUCCESS_SUBMIT: &str = "success:submit";

/// Modal host gained content.
pub const MODAL_OPEN: &str = "modal:open";

/// Modal host was cleared.
pub const MODAL_CLOSE: &str = "modal:close";

/// Matches every payment-step field-change event.
pub const ORDER_FIELD_PATTERN: &str = r"^order\.[a-z]+:change$";

/// Matches every contact-step field-change event.
pub const CONTACTS_FIELD_PATTERN: &str = r"^contacts\.[a-z]+:change$";

/// Event name for a payment-step field edit. Payload: `{field, value}`.
pub fn order_field_change(field: &str) -> String {
    format!("order.{field}:change")
}

/// Event name for a contact-step field edit. Payload: `{field, value}`.
pub fn contacts_field_change(field: &str) -> String {
    format!("contacts.{field}:change")
}
