//! Bridge between the single-threaded UI and the network-facing worker.

pub mod commands;
pub mod runtime;
pub mod worker;
