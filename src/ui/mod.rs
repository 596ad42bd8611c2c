//! egui rendering of the dashboard page.

pub mod panels;
pub mod plot;
