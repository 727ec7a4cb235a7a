//! Dashboard Application
//! Main window: control panel on the left, chart dashboard in the center.

use crate::charts::{self, DashboardData};
use crate::data::{self, DataLoader, VehicleRecord};
use crate::gui::{ControlPanel, ControlPanelAction, Dashboard};
use egui::SidePanel;
use log::{error, warn};
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver};
use std::thread;

/// CSV loading result from the background thread.
enum LoadResult {
    Progress(String),
    Complete {
        records: Vec<VehicleRecord>,
        path: PathBuf,
    },
    Error(String),
}

/// Aggregation result from the background thread. Aggregations are total
/// over any record sequence, so there is no error case.
enum CalcResult {
    Progress(f32, String),
    Complete(DashboardData),
}

/// Main application window.
pub struct DashboardApp {
    loader: DataLoader,
    control_panel: ControlPanel,
    dashboard: Dashboard,

    load_rx: Option<Receiver<LoadResult>>,
    is_loading: bool,

    calc_rx: Option<Receiver<CalcResult>>,
    is_calculating: bool,
}

impl DashboardApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self {
            loader: DataLoader::new(),
            control_panel: ControlPanel::new(),
            dashboard: Dashboard::new(),
            load_rx: None,
            is_loading: false,
            calc_rx: None,
            is_calculating: false,
        }
    }

    /// Handle CSV file selection; the load runs on a background thread.
    fn handle_browse_csv(&mut self) {
        if self.is_loading {
            return;
        }

        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        {
            self.dashboard.clear();
            self.control_panel.settings.csv_path = Some(path.clone());
            self.control_panel.export_enabled = false;
            self.control_panel.set_progress(0.0, "Loading CSV file...");
            self.is_loading = true;

            let (tx, rx) = channel();
            self.load_rx = Some(rx);

            let path_str = path.to_string_lossy().to_string();
            thread::spawn(move || {
                let _ = tx.send(LoadResult::Progress("Reading CSV file...".to_string()));
                match data::read_records(&path_str) {
                    Ok(records) => {
                        let _ = tx.send(LoadResult::Complete {
                            records,
                            path: PathBuf::from(path_str),
                        });
                    }
                    Err(e) => {
                        let _ = tx.send(LoadResult::Error(e.to_string()));
                    }
                }
            });
        }
    }

    /// Check for CSV loading results.
    fn check_load_results(&mut self) {
        let rx = self.load_rx.take();
        if let Some(rx) = rx {
            let mut should_keep_receiver = true;

            while let Ok(result) = rx.try_recv() {
                match result {
                    LoadResult::Progress(status) => {
                        self.control_panel.set_progress(10.0, &status);
                    }
                    LoadResult::Complete { records, path } => {
                        self.loader.set_records(records, Some(path));
                        self.control_panel.row_count = self.loader.row_count();
                        self.is_loading = false;
                        should_keep_receiver = false;
                        self.start_aggregation();
                    }
                    LoadResult::Error(message) => {
                        // The load is never retried; the dashboard simply
                        // stays in its no-data state.
                        error!("CSV load failed: {}", message);
                        self.control_panel
                            .set_progress(0.0, &format!("Error: {}", message));
                        self.is_loading = false;
                        should_keep_receiver = false;
                    }
                }
            }

            if should_keep_receiver {
                self.load_rx = Some(rx);
            }
        }
    }

    /// Recompute the full aggregation bundle on a background thread.
    fn start_aggregation(&mut self) {
        let records = self.loader.records();
        let min_samples = self.control_panel.settings.min_spread_samples;

        let (tx, rx) = channel();
        self.calc_rx = Some(rx);
        self.is_calculating = true;
        self.control_panel.set_progress(30.0, "Aggregating...");

        thread::spawn(move || {
            let _ = tx.send(CalcResult::Progress(50.0, "Aggregating...".to_string()));
            let data = DashboardData::compute(&records, min_samples);
            let _ = tx.send(CalcResult::Complete(data));
        });
    }

    /// Check for aggregation results.
    fn check_calc_results(&mut self) {
        let rx = self.calc_rx.take();
        if let Some(rx) = rx {
            let mut should_keep_receiver = true;

            while let Ok(result) = rx.try_recv() {
                match result {
                    CalcResult::Progress(progress, status) => {
                        self.control_panel.set_progress(progress, &status);
                    }
                    CalcResult::Complete(data) => {
                        let total = data.summary.total_records;
                        self.dashboard.set_data(self.loader.records(), data);
                        self.control_panel
                            .set_progress(100.0, &format!("Complete! {} records", total));
                        self.control_panel.export_enabled = true;
                        self.is_calculating = false;
                        should_keep_receiver = false;
                    }
                }
            }

            if should_keep_receiver {
                self.calc_rx = Some(rx);
            }
        }
    }

    fn handle_min_samples_changed(&mut self) {
        if self.loader.row_count() > 0 && !self.is_calculating {
            self.start_aggregation();
        }
    }

    fn handle_export_pngs(&mut self) {
        if self.dashboard.data.is_empty() {
            self.control_panel.set_progress(0.0, "No charts to export");
            return;
        }

        let Some(dir) = rfd::FileDialog::new().pick_folder() else {
            return;
        };

        match charts::export_chart_pngs(&self.dashboard.data, &dir) {
            Ok(written) => {
                self.control_panel
                    .set_progress(100.0, &format!("Exported {} chart(s)", written.len()));
                if let Err(e) = open::that(&dir) {
                    warn!("could not open export folder: {}", e);
                }
            }
            Err(e) => {
                error!("chart export failed: {:#}", e);
                self.control_panel
                    .set_progress(0.0, &format!("Error: {}", e));
            }
        }
    }

    fn handle_export_json(&mut self) {
        if self.dashboard.data.is_empty() {
            self.control_panel.set_progress(0.0, "No data to export");
            return;
        }

        let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .set_file_name("ev_dashboard_summary.json")
            .save_file()
        else {
            return;
        };

        match charts::export_summary_json(&self.dashboard.data, &path) {
            Ok(()) => {
                self.control_panel
                    .set_progress(100.0, "Summary JSON exported");
            }
            Err(e) => {
                error!("summary export failed: {:#}", e);
                self.control_panel
                    .set_progress(0.0, &format!("Error: {}", e));
            }
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_load_results();
        self.check_calc_results();

        if self.is_loading || self.is_calculating {
            ctx.request_repaint();
        }

        SidePanel::left("control_panel")
            .min_width(280.0)
            .max_width(330.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    match self.control_panel.show(ui) {
                        ControlPanelAction::BrowseCsv => self.handle_browse_csv(),
                        ControlPanelAction::MinSamplesChanged => self.handle_min_samples_changed(),
                        ControlPanelAction::ExportPngs => self.handle_export_pngs(),
                        ControlPanelAction::ExportJson => self.handle_export_json(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.dashboard.show(ui);
        });
    }
}
