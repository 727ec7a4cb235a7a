//! Control Panel Widget
//! Left side panel: data source, view settings, exports, progress.

use crate::stats::MIN_SAMPLES_FOR_SPREAD;
use egui::{Color32, RichText};
use std::path::PathBuf;

/// User settings for the dashboard views.
#[derive(Clone)]
pub struct UserSettings {
    pub csv_path: Option<PathBuf>,
    /// Smallest per-model sample size admitted to the range-spread view.
    pub min_spread_samples: usize,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            csv_path: None,
            min_spread_samples: MIN_SAMPLES_FOR_SPREAD,
        }
    }
}

/// Left side control panel with file selection and export controls.
pub struct ControlPanel {
    pub settings: UserSettings,
    pub row_count: usize,
    pub progress: f32,
    pub status: String,
    pub export_enabled: bool,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            settings: UserSettings::default(),
            row_count: 0,
            progress: 0.0,
            status: "Ready".to_string(),
            export_enabled: false,
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw the control panel.
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("⚡ EV Dashboard")
                    .size(22.0)
                    .color(Color32::from_rgb(34, 197, 94)),
            );
            ui.label(
                RichText::new("Electric Vehicle Registrations")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Data Source =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    let path_text = self
                        .settings
                        .csv_path
                        .as_ref()
                        .and_then(|p| p.file_name())
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_else(|| "No file selected".to_string());

                    ui.label(RichText::new(&path_text).size(12.0).color(
                        if self.settings.csv_path.is_some() {
                            Color32::WHITE
                        } else {
                            Color32::GRAY
                        },
                    ));

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("📂 Browse").clicked() {
                            action = ControlPanelAction::BrowseCsv;
                        }
                    });
                });
            });

        if self.row_count > 0 {
            ui.add_space(4.0);
            ui.label(
                RichText::new(format!("{} records loaded", self.row_count))
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== View Settings =====
        ui.label(RichText::new("⚙ View Settings").size(14.0).strong());
        ui.add_space(5.0);

        ui.horizontal(|ui| {
            ui.label("Min samples (spread):");
            let response = ui.add(
                egui::DragValue::new(&mut self.settings.min_spread_samples).range(1..=100),
            );
            if response.changed() {
                action = ControlPanelAction::MinSamplesChanged;
            }
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Export =====
        ui.vertical_centered(|ui| {
            ui.add_enabled_ui(self.export_enabled, |ui| {
                let png_button = egui::Button::new(RichText::new("🖼 Export Charts").size(14.0))
                    .min_size(egui::vec2(180.0, 30.0));
                if ui.add(png_button).clicked() {
                    action = ControlPanelAction::ExportPngs;
                }

                ui.add_space(6.0);

                let json_button = egui::Button::new(RichText::new("📄 Export Summary").size(14.0))
                    .min_size(egui::vec2(180.0, 30.0));
                if ui.add(json_button).clicked() {
                    action = ControlPanelAction::ExportJson;
                }
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Progress =====
        ui.label(RichText::new("📊 Progress").size(14.0).strong());
        ui.add_space(5.0);

        ui.add(
            egui::ProgressBar::new(self.progress / 100.0)
                .show_percentage()
                .animate(self.progress > 0.0 && self.progress < 100.0),
        );

        ui.add_space(5.0);

        let status_color = if self.status.contains("Error") {
            Color32::from_rgb(220, 53, 69)
        } else if self.status.contains("Complete") {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    /// Set progress and status.
    pub fn set_progress(&mut self, progress: f32, status: &str) {
        self.progress = progress;
        self.status = status.to_string();
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    BrowseCsv,
    MinSamplesChanged,
    ExportPngs,
    ExportJson,
}
