use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::model::SiteSelector;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Controls – site selector and payload range
// ---------------------------------------------------------------------------

/// Searchable launch-site drop-down. "All Sites" is always listed first.
pub fn site_selector(ui: &mut Ui, state: &mut AppState, search: &mut String) {
    let current = state.selection.site.clone();
    let mut picked: Option<SiteSelector> = None;

    ui.horizontal(|ui: &mut Ui| {
        ui.strong("Launch Site");
        egui::ComboBox::from_id_salt("site_dropdown")
            .selected_text(current.label())
            .width(260.0)
            .show_ui(ui, |ui: &mut Ui| {
                ui.add(egui::TextEdit::singleline(search).hint_text("Search…"));
                let needle = search.to_lowercase();
                for option in &state.site_options {
                    let matches = option.is_all()
                        || needle.is_empty()
                        || option.label().to_lowercase().contains(&needle);
                    if !matches {
                        continue;
                    }
                    if ui
                        .selectable_label(current == *option, option.label())
                        .clicked()
                    {
                        picked = Some(option.clone());
                    }
                }
            });
    });

    if let Some(site) = picked {
        search.clear();
        state.set_site(site);
    }
}

/// Payload range control: a "from" and a "to" slider over the configured
/// bounds. Neither handle can be dragged past the other.
pub fn payload_range(ui: &mut Ui, state: &mut AppState) {
    let (min, max) = state.payload_bounds;
    let mut low = state.selection.payload_range.low;
    let mut high = state.selection.payload_range.high;

    ui.label("Payload range (Kg):");
    let mut low_changed = false;
    let mut high_changed = false;
    ui.horizontal(|ui: &mut Ui| {
        low_changed = ui
            .add(egui::Slider::new(&mut low, min..=max).step_by(100.0).text("from"))
            .changed();
        high_changed = ui
            .add(egui::Slider::new(&mut high, min..=max).step_by(100.0).text("to"))
            .changed();
    });

    if low_changed {
        state.set_payload_low(low);
    }
    if high_changed {
        state.set_payload_high(high);
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Export charts…").clicked() {
                export_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{} launches loaded, {} in payload range",
            state.dataset.len(),
            state.visible_count()
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open launch records")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path) {
            Ok(dataset) => state.set_dataset(dataset, path),
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                state.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}

pub fn export_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export charts")
        .set_file_name("launch_charts.json")
        .add_filter("JSON", &["json"])
        .save_file();

    let Some(path) = file else {
        return;
    };

    let written = state
        .export_json()
        .map_err(|e| e.to_string())
        .and_then(|json| std::fs::write(&path, json).map_err(|e| e.to_string()));

    match written {
        Ok(()) => {
            log::info!("Exported charts to {}", path.display());
            state.status_message = None;
        }
        Err(e) => {
            log::error!("Failed to export charts to {}: {e}", path.display());
            state.status_message = Some(format!("Export failed: {e}"));
        }
    }
}
