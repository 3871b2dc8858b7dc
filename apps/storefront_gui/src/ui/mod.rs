//! UI layer: egui-free view state and the eframe shell that paints it.

pub mod app;
pub mod views;

pub use app::StorefrontApp;
