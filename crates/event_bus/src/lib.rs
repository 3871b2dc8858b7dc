//! Publish/subscribe bus coordinating storefront components.
//!
//! The bus is the only channel between views, stores, and the
//! orchestration layer; no component holds a reference to another's
//! internals. Delivery is synchronous and depth-first on the UI thread:
//! a handler's own emissions run to completion before control returns to
//! the emitter. The bus never inspects payloads and never catches handler
//! panics; both are the subscribers' responsibility.
//!
//! A bus is constructed once at startup and handed to every component by
//! handle. Handles are cheap clones of one shared subscriber list and are
//! deliberately `!Send` — there is no concurrent emission to guard
//! against.

use std::{cell::RefCell, fmt, rc::Rc};

use regex::Regex;
use serde_json::Value;

/// Targeted subscriber. Receives the emission payload only; pattern
/// subscribers that need the field name get it from the payload.
pub type Callback = Rc<dyn Fn(&Value)>;

/// Tap subscriber registered via [`EventBus::subscribe_all`]. Receives
/// every emission as a `(name, payload)` pair.
pub type TapCallback = Rc<dyn Fn(&str, &Value)>;

/// Subscription key: exact event name or a pattern over event names.
#[derive(Clone)]
pub enum EventKey {
    Name(String),
    Pattern(Regex),
}

impl EventKey {
    pub fn name(event: impl Into<String>) -> Self {
        Self::Name(event.into())
    }

    /// Compiles `pattern` into a pattern key.
    pub fn pattern(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self::Pattern(Regex::new(pattern)?))
    }

    fn matches(&self, event: &str) -> bool {
        match self {
            Self::Name(name) => name == event,
            Self::Pattern(regex) => regex.is_match(event),
        }
    }

    /// Key equality for unsubscription: name equality, or pattern-source
    /// equality for pattern keys.
    fn same_key(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Name(a), Self::Name(b)) => a == b,
            (Self::Pattern(a), Self::Pattern(b)) => a.as_str() == b.as_str(),
            _ => false,
        }
    }
}

impl fmt::Debug for EventKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => f.debug_tuple("Name").field(name).finish(),
            Self::Pattern(regex) => f.debug_tuple("Pattern").field(&regex.as_str()).finish(),
        }
    }
}

struct Subscription {
    key: EventKey,
    callback: Callback,
}

#[derive(Default)]
struct Inner {
    // One linear list so delivery order is global registration order,
    // regardless of whether a subscription is exact or pattern keyed.
    subscriptions: Vec<Subscription>,
    taps: Vec<TapCallback>,
}

/// Cloneable handle to a shared subscriber list.
#[derive(Clone, Default)]
pub struct EventBus {
    inner: Rc<RefCell<Inner>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `callback` for every emission matching `key`. Registering
    /// the same callback twice is allowed; it will fire twice.
    pub fn subscribe(&self, key: EventKey, callback: Callback) {
        self.inner
            .borrow_mut()
            .subscriptions
            .push(Subscription { key, callback });
    }

    /// Removes the exact `(key, callback)` pair; no-op if absent.
    /// Callback identity is pointer identity of the `Rc`.
    pub fn unsubscribe(&self, key: &EventKey, callback: &Callback) {
        self.inner.borrow_mut().subscriptions.retain(|sub| {
            !(sub.key.same_key(key) && Rc::ptr_eq(&sub.callback, callback))
        });
    }

    /// Registers a tap receiving every emission, independent of targeted
    /// subscriptions.
    pub fn subscribe_all(&self, callback: TapCallback) {
        self.inner.borrow_mut().taps.push(callback);
    }

    /// Drops every subscription, taps included.
    pub fn unsubscribe_all(&self) {
        let mut inner = self.inner.borrow_mut();
        inner.subscriptions.clear();
        inner.taps.clear();
    }

    /// Synchronously invokes every matching subscriber in registration
    /// order, then every tap. The matching set is snapshotted before
    /// invocation, so handlers may subscribe, unsubscribe, or emit from
    /// within their own callback; subscriptions added mid-emission do not
    /// see the in-flight event.
    pub fn emit(&self, event: &str, payload: Value) {
        tracing::trace!(event, "bus emit");
        let (matched, taps) = {
            let inner = self.inner.borrow();
            let matched: Vec<Callback> = inner
                .subscriptions
                .iter()
                .filter(|sub| sub.key.matches(event))
                .map(|sub| Rc::clone(&sub.callback))
                .collect();
            (matched, inner.taps.clone())
        };
        for callback in matched {
            callback(&payload);
        }
        for tap in taps {
            tap(event, &payload);
        }
    }

    /// Emits `event` with no payload.
    pub fn notify(&self, event: &str) {
        self.emit(event, Value::Null);
    }

    /// Returns a closure that emits `event` with its argument
    /// shallow-merged over `context`. Adapts interaction callbacks that
    /// only supply a dynamic payload into emissions carrying fixed extra
    /// context (say, the id of the row a control belongs to).
    pub fn trigger(&self, event: impl Into<String>, context: Value) -> impl Fn(Value) {
        let bus = self.clone();
        let event = event.into();
        move |payload| bus.emit(&event, merge_over(&context, payload))
    }
}

/// Shallow merge: `payload`'s object keys win over `context`'s. A
/// non-object, non-null payload replaces the context wholesale; a null
/// payload leaves the context as-is.
fn merge_over(context: &Value, payload: Value) -> Value {
    match (context, payload) {
        (Value::Object(base), Value::Object(overlay)) => {
            let mut merged = base.clone();
            for (key, value) in overlay {
                merged.insert(key, value);
            }
            Value::Object(merged)
        }
        (context, Value::Null) => context.clone(),
        (_, payload) => payload,
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
