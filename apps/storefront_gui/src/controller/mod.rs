//! Controller layer: backend-event intake and event-bus orchestration.

pub mod events;
pub mod orchestration;
