//! evdash - Electric Vehicle Registration Dashboard
//!
//! Loads a CSV of EV registrations and renders aggregate statistics as
//! interactive charts.

use eframe::egui;
use env_logger::Env;
use evdash::gui::DashboardApp;

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 850.0])
            .with_min_inner_size([1100.0, 700.0])
            .with_title("EV Dashboard"),
        ..Default::default()
    };

    eframe::run_native(
        "EV Dashboard",
        options,
        Box::new(|cc| Ok(Box::new(DashboardApp::new(cc)))),
    )
}
