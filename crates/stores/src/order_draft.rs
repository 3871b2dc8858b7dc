use std::{cell::RefCell, collections::BTreeMap};

use event_bus::EventBus;
use serde_json::Value;
use shared::topics;

/// Field values for order assembly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftFields {
    pub payment: String,
    pub address: String,
    pub email: String,
    pub phone: String,
}

const MSG_PAYMENT: &str = "Select a payment method";
const MSG_ADDRESS: &str = "Enter your delivery address";
const MSG_EMAIL: &str = "Enter your email";
const MSG_PHONE: &str = "Enter your phone number";

/// In-progress checkout state, mutated field-by-field as the user types.
///
/// The payment step (payment + address) and the contact step (email +
/// phone) validate independently: each field mutation re-runs its step's
/// validator and emits the step's errors topic with a field -> message
/// map (empty map means the step is valid). A field is invalid iff its
/// value is the empty string.
pub struct OrderDraft {
    bus: EventBus,
    fields: RefCell<DraftFields>,
    order_errors: RefCell<BTreeMap<String, String>>,
    contact_errors: RefCell<BTreeMap<String, String>>,
}

impl OrderDraft {
    pub fn new(bus: EventBus) -> Self {
        Self {
            bus,
            fields: RefCell::new(DraftFields::default()),
            order_errors: RefCell::new(BTreeMap::new()),
            contact_errors: RefCell::new(BTreeMap::new()),
        }
    }

    /// Sets a payment-step field and re-validates that step. Unknown
    /// field names are ignored with a log line.
    pub fn set_order_field(&self, field: &str, value: &str) {
        {
            let mut fields = self.fields.borrow_mut();
            match field {
                "payment" => fields.payment = value.to_string(),
                "address" => fields.address = value.to_string(),
                _ => {
                    tracing::warn!(field, "ignoring unknown order field");
                    return;
                }
            }
        }
        self.validate_order();
    }

    /// Sets a contact-step field and re-validates that step.
    pub fn set_contact_field(&self, field: &str, value: &str) {
        {
            let mut fields = self.fields.borrow_mut();
            match field {
                "email" => fields.email = value.to_string(),
                "phone" => fields.phone = value.to_string(),
                _ => {
                    tracing::warn!(field, "ignoring unknown contact field");
                    return;
                }
            }
        }
        self.validate_contacts();
    }

    /// Blanks the payment step; called when its form opens.
    pub fn reset_order(&self) {
        {
            let mut fields = self.fields.borrow_mut();
            fields.payment.clear();
            fields.address.clear();
        }
        self.order_errors.borrow_mut().clear();
    }

    /// Blanks the contact step; called when its form opens.
    pub fn reset_contacts(&self) {
        {
            let mut fields = self.fields.borrow_mut();
            fields.email.clear();
            fields.phone.clear();
        }
        self.contact_errors.borrow_mut().clear();
    }

    pub fn is_order_valid(&self) -> bool {
        self.order_errors.borrow().is_empty()
            && !self.fields.borrow().payment.is_empty()
            && !self.fields.borrow().address.is_empty()
    }

    pub fn is_contacts_valid(&self) -> bool {
        self.contact_errors.borrow().is_empty()
            && !self.fields.borrow().email.is_empty()
            && !self.fields.borrow().phone.is_empty()
    }

    pub fn order_errors(&self) -> BTreeMap<String, String> {
        self.order_errors.borrow().clone()
    }

    pub fn contact_errors(&self) -> BTreeMap<String, String> {
        self.contact_errors.borrow().clone()
    }

    pub fn snapshot(&self) -> DraftFields {
        self.fields.borrow().clone()
    }

    fn validate_order(&self) {
        let errors = {
            let fields = self.fields.borrow();
            let mut errors = BTreeMap::new();
            if fields.payment.is_empty() {
                errors.insert("payment".to_string(), MSG_PAYMENT.to_string());
            }
            if fields.address.is_empty() {
                errors.insert("address".to_string(), MSG_ADDRESS.to_string());
            }
            errors
        };
        *self.order_errors.borrow_mut() = errors.clone();
        self.bus.emit(topics::ORDER_ERRORS_CHANGED, error_map(errors));
    }

    fn validate_contacts(&self) {
        let errors = {
            let fields = self.fields.borrow();
            let mut errors = BTreeMap::new();
            if fields.email.is_empty() {
                errors.insert("email".to_string(), MSG_EMAIL.to_string());
            }
            if fields.phone.is_empty() {
                errors.insert("phone".to_string(), MSG_PHONE.to_string());
            }
            errors
        };
        *self.contact_errors.borrow_mut() = errors.clone();
        self.bus
            .emit(topics::CONTACTS_ERRORS_CHANGED, error_map(errors));
    }
}

fn error_map(errors: BTreeMap<String, String>) -> Value {
    Value::Object(
        errors
            .into_iter()
            .map(|(field, message)| (field, Value::String(message)))
            .collect(),
    )
}
