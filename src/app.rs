use eframe::egui::{self, Color32, RichText};

use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct LaunchDashApp {
    pub state: AppState,
    /// Text typed into the site drop-down's search box.
    site_search: String,
}

impl LaunchDashApp {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            site_search: String::new(),
        }
    }
}

impl eframe::App for LaunchDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Central panel: heading, pie, range control, scatter ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.label(
                    RichText::new("SpaceX Launch Records Dashboard")
                        .size(40.0)
                        .color(Color32::from_rgb(0x50, 0x3D, 0x36)),
                );
            });
            ui.add_space(8.0);

            panels::site_selector(ui, &mut self.state, &mut self.site_search);
            ui.add_space(8.0);

            let chart_height = (ui.available_height() * 0.4).max(240.0);
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    plot::success_pie_chart(ui, &self.state, chart_height);
                    ui.add_space(8.0);

                    panels::payload_range(ui, &mut self.state);
                    ui.add_space(8.0);

                    plot::success_payload_scatter_chart(ui, &self.state, chart_height);
                });
        });
    }
}
