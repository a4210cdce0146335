//! Launch records dashboard.
//!
//! The core pipeline is filter → aggregate → build, run synchronously for
//! each chart whenever a control changes:
//!
//! * [`data`] – loading, filtering and aggregating launch records
//! * [`chart`] – renderer-agnostic chart descriptions
//! * [`dashboard`] – the two recomputation entry points
//! * [`state`], [`app`], [`ui`] – the egui front end that drives them

pub mod app;
pub mod chart;
pub mod color;
pub mod config;
pub mod dashboard;
pub mod data;
pub mod state;
pub mod ui;
