//! Shared domain, wire protocol, and event vocabulary for the storefront.

pub mod domain;
pub mod protocol;
pub mod topics;
