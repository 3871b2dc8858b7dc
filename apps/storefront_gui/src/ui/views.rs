//! View state for every panel, kept free of egui types.
//!
//! Each view holds the last snapshot the orchestration layer rendered
//! into it; the egui shell paints from cloned snapshots each frame and
//! turns interactions into bus emissions. Keeping these structs plain
//! data lets the whole event contract run under test without a display.

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use event_bus::EventBus;
use shared::{domain::CatalogItem, topics};

/// Capability flags for the one product-card renderer. A catalog card, a
/// detail panel, and a cart row are the same renderer with different
/// options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardOptions {
    pub show_category: bool,
    pub show_description: bool,
    pub show_buy_button: bool,
}

impl CardOptions {
    pub fn catalog_card() -> Self {
        Self {
            show_category: true,
            show_description: false,
            show_buy_button: false,
        }
    }

    pub fn detail_panel() -> Self {
        Self {
            show_category: true,
            show_description: true,
            show_buy_button: true,
        }
    }

    pub fn cart_row() -> Self {
        Self {
            show_category: false,
            show_description: false,
            show_buy_button: false,
        }
    }
}

/// Header counter and background-lock flag.
#[derive(Default)]
pub struct PageShell {
    counter: Cell<usize>,
    locked: Cell<bool>,
}

impl PageShell {
    pub fn set_counter(&self, count: usize) {
        self.counter.set(count);
    }

    pub fn counter(&self) -> usize {
        self.counter.get()
    }

    pub fn set_locked(&self, locked: bool) {
        self.locked.set(locked);
    }

    pub fn locked(&self) -> bool {
        self.locked.get()
    }
}

#[derive(Default)]
pub struct CatalogPanel {
    cards: RefCell<Vec<CatalogItem>>,
}

impl CatalogPanel {
    pub fn set_cards(&self, cards: Vec<CatalogItem>) {
        *self.cards.borrow_mut() = cards;
    }

    pub fn cards(&self) -> Vec<CatalogItem> {
        self.cards.borrow().clone()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetailState {
    pub item: CatalogItem,
    pub in_cart: bool,
}

#[derive(Default)]
pub struct DetailPanel {
    state: RefCell<Option<DetailState>>,
}

impl DetailPanel {
    pub fn set(&self, item: CatalogItem, in_cart: bool) {
        *self.state.borrow_mut() = Some(DetailState { item, in_cart });
    }

    pub fn state(&self) -> Option<DetailState> {
        self.state.borrow().clone()
    }
}

/// Cart list, total, and whether checkout may start. `order_enabled`
/// follows the store's zero-total emptiness rule.
#[derive(Default)]
pub struct CartPanel {
    rows: RefCell<Vec<CatalogItem>>,
    total: Cell<i64>,
    order_enabled: Cell<bool>,
}

impl CartPanel {
    pub fn set(&self, rows: Vec<CatalogItem>, total: i64, order_enabled: bool) {
        *self.rows.borrow_mut() = rows;
        self.total.set(total);
        self.order_enabled.set(order_enabled);
    }

    pub fn rows(&self) -> Vec<CatalogItem> {
        self.rows.borrow().clone()
    }

    pub fn total(&self) -> i64 {
        self.total.get()
    }

    pub fn order_enabled(&self) -> bool {
        self.order_enabled.get()
    }
}

/// Payment/address step. `payment` and `address` are edited directly by
/// the shell; validity and the joined error string only ever arrive from
/// the orchestration layer.
#[derive(Default)]
pub struct OrderFormPanel {
    pub payment: RefCell<String>,
    pub address: RefCell<String>,
    errors: RefCell<String>,
    valid: Cell<bool>,
}

impl OrderFormPanel {
    pub fn reset(&self) {
        self.payment.borrow_mut().clear();
        self.address.borrow_mut().clear();
        self.errors.borrow_mut().clear();
        self.valid.set(false);
    }

    pub fn set_validity(&self, valid: bool, errors: String) {
        self.valid.set(valid);
        *self.errors.borrow_mut() = errors;
    }

    pub fn valid(&self) -> bool {
        self.valid.get()
    }

    pub fn errors(&self) -> String {
        self.errors.borrow().clone()
    }
}

/// Email/phone step; same lifecycle as [`OrderFormPanel`].
#[derive(Default)]
pub struct ContactsFormPanel {
    pub email: RefCell<String>,
    pub phone: RefCell<String>,
    errors: RefCell<String>,
    valid: Cell<bool>,
}

impl ContactsFormPanel {
    pub fn reset(&self) {
        self.email.borrow_mut().clear();
        self.phone.borrow_mut().clear();
        self.errors.borrow_mut().clear();
        self.valid.set(false);
    }

    pub fn set_validity(&self, valid: bool, errors: String) {
        self.valid.set(valid);
        *self.errors.borrow_mut() = errors;
    }

    pub fn valid(&self) -> bool {
        self.valid.get()
    }

    pub fn errors(&self) -> String {
        self.errors.borrow().clone()
    }
}

#[derive(Default)]
pub struct SuccessPanel {
    total: Cell<i64>,
}

impl SuccessPanel {
    pub fn set_total(&self, total: i64) {
        self.total.set(total);
    }

    pub fn total(&self) -> i64 {
        self.total.get()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalContent {
    Detail,
    Cart,
    OrderForm,
    ContactsForm,
    Success,
}

/// At most one overlay at a time; opening replaces any previous content.
/// Announces `modal:open` / `modal:close` so the page shell can lock and
/// unlock the background.
pub struct ModalHost {
    bus: EventBus,
    content: RefCell<Option<ModalContent>>,
}

impl ModalHost {
    pub fn new(bus: EventBus) -> Self {
        Self {
            bus,
            content: RefCell::new(None),
        }
    }

    pub fn open(&self, content: ModalContent) {
        *self.content.borrow_mut() = Some(content);
        self.bus.notify(topics::MODAL_OPEN);
    }

    pub fn close(&self) {
        *self.content.borrow_mut() = None;
        self.bus.notify(topics::MODAL_CLOSE);
    }

    pub fn content(&self) -> Option<ModalContent> {
        *self.content.borrow()
    }
}

/// The full set of view handles the orchestration layer renders into.
#[derive(Clone)]
pub struct Views {
    pub page: Rc<PageShell>,
    pub catalog: Rc<CatalogPanel>,
    pub detail: Rc<DetailPanel>,
    pub cart: Rc<CartPanel>,
    pub order_form: Rc<OrderFormPanel>,
    pub contacts_form: Rc<ContactsFormPanel>,
    pub success: Rc<SuccessPanel>,
    pub modal: Rc<ModalHost>,
}

impl Views {
    pub fn new(bus: &EventBus) -> Self {
        Self {
            page: Rc::new(PageShell::default()),
            catalog: Rc::new(CatalogPanel::default()),
            detail: Rc::new(DetailPanel::default()),
            cart: Rc::new(CartPanel::default()),
            order_form: Rc::new(OrderFormPanel::default()),
            contacts_form: Rc::new(ContactsFormPanel::default()),
            success: Rc::new(SuccessPanel::default()),
            modal: Rc::new(ModalHost::new(bus.clone())),
        }
    }
}
