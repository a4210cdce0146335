use anyhow::Context;
use eframe::egui;

use launch_dash::app::LaunchDashApp;
use launch_dash::config::DashboardConfig;
use launch_dash::data::loader::load_file;
use launch_dash::state::AppState;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = DashboardConfig::from_env();
    log::debug!("{config:?}");

    // A dataset that cannot be loaded is fatal: never open the window.
    let dataset = load_file(&config.data_path)
        .with_context(|| format!("loading launch records from {}", config.data_path.display()))?;
    if dataset.is_empty() {
        log::warn!("{} contains no launches", config.data_path.display());
    }
    let state = AppState::new(dataset, config.data_path.clone(), &config);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 900.0])
            .with_min_inner_size([600.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "SpaceX Launch Records Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(LaunchDashApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("running the dashboard window: {e}"))
}
