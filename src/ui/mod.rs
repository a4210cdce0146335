//! egui widgets: control panels and chart plots.

pub mod panels;
pub mod plot;
