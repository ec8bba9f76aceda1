//! UI layer: the egui app shell and its screens.

pub mod app;

pub use app::BackOfficeApp;
