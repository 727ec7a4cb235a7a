//! Dashboard Widget
//! Central scrollable grid of chart cards. Cards are laid out in fixed-size
//! rows and only the rows scrolled into view are built each frame, so
//! off-screen charts cost nothing until the user reaches them.

use crate::charts::{ChartPlotter, DashboardData, ACCENT, TOP_VEHICLES};
use crate::data::VehicleRecord;
use crate::stats::{self, RangeStats, RangedVehicle};
use egui::{Color32, ComboBox, RichText, ScrollArea};
use std::collections::BTreeMap;
use std::sync::Arc;

const CARD_SPACING: f32 = 15.0;
const CARD_HEIGHT: f32 = 430.0;
const CARD_WIDTH: f32 = 640.0;
/// Bars shown in the spread chart's all-models view.
const SPREAD_BARS: usize = 20;
/// Models shown in the mean-range chart.
const MEAN_RANGE_POINTS: usize = 20;

/// One dashboard card per aggregation view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Card {
    YearLine,
    TopMakes,
    CafvShares,
    TypeByYear,
    TopCities,
    TopModels,
    CafvTopModels,
    CafvTopMakes,
    CityHeatGrid,
    ModelTrend,
    MeanRange,
    RangeSpread,
    CafvTypeSplit,
    TopRangeVehicles,
}

const CARDS: [Card; 14] = [
    Card::YearLine,
    Card::TopMakes,
    Card::CafvShares,
    Card::TypeByYear,
    Card::TopCities,
    Card::TopModels,
    Card::CafvTopModels,
    Card::CafvTopMakes,
    Card::CityHeatGrid,
    Card::ModelTrend,
    Card::MeanRange,
    Card::RangeSpread,
    Card::CafvTypeSplit,
    Card::TopRangeVehicles,
];

/// Scrollable chart area plus the per-card selection state.
///
/// Selections re-run their aggregation synchronously against the shared
/// immutable record sequence; everything else comes precomputed in
/// [`DashboardData`].
pub struct Dashboard {
    pub data: DashboardData,
    records: Arc<Vec<VehicleRecord>>,

    trend_model: Option<String>,
    trend_series: BTreeMap<i32, u64>,

    /// `None` means "all models" in the longest-range view.
    range_model: Option<String>,
    range_vehicles: Vec<RangedVehicle>,
    range_summary: Option<RangeStats>,

    /// `None` means "top models by spread" in the spread view.
    spread_model: Option<String>,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self {
            data: DashboardData::default(),
            records: Arc::new(Vec::new()),
            trend_model: None,
            trend_series: BTreeMap::new(),
            range_model: None,
            range_vehicles: Vec::new(),
            range_summary: None,
            spread_model: None,
        }
    }
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Install a freshly aggregated dataset and reset selections.
    pub fn set_data(&mut self, records: Arc<Vec<VehicleRecord>>, data: DashboardData) {
        self.records = records;
        self.data = data;
        self.trend_model = None;
        self.trend_series = BTreeMap::new();
        self.range_model = None;
        self.range_vehicles = self.data.top_range_vehicles.clone();
        self.range_summary = None;
        self.spread_model = None;

        if let Some(first) = self.data.trend_models.first().cloned() {
            self.select_trend_model(first);
        }
    }

    fn select_trend_model(&mut self, model: String) {
        self.trend_series = stats::model_year_trend(&self.records, &model);
        self.trend_model = Some(model);
    }

    fn select_range_model(&mut self, model: Option<String>) {
        match &model {
            Some(m) => {
                self.range_vehicles =
                    stats::longest_range_vehicles(&self.records, Some(m), TOP_VEHICLES);
                self.range_summary = stats::model_range_summary(&self.records, m);
            }
            None => {
                self.range_vehicles = self.data.top_range_vehicles.clone();
                self.range_summary = None;
            }
        }
        self.range_model = model;
    }

    /// Draw the dashboard: summary strip, then the virtualized card grid.
    pub fn show(&mut self, ui: &mut egui::Ui) {
        if self.data.is_empty() {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return;
        }

        self.draw_summary_strip(ui);
        ui.add_space(CARD_SPACING);

        let avail_width = ui.available_width();
        let columns = ((avail_width / (CARD_WIDTH + CARD_SPACING)).floor() as usize).max(1);
        let rows = CARDS.len().div_ceil(columns);

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show_rows(ui, CARD_HEIGHT + CARD_SPACING, rows, |ui, row_range| {
                for row in row_range {
                    ui.horizontal(|ui| {
                        for col in 0..columns {
                            if let Some(card) = CARDS.get(row * columns + col) {
                                self.draw_card(ui, *card);
                                ui.add_space(CARD_SPACING);
                            }
                        }
                    });
                    ui.add_space(CARD_SPACING);
                }
            });
    }

    fn draw_summary_strip(&self, ui: &mut egui::Ui) {
        let summary = &self.data.summary;
        let avg_range = summary
            .avg_range
            .map(|r| format!("{:.2} mi", r))
            .unwrap_or_else(|| "N/A".to_string());

        ui.horizontal_wrapped(|ui| {
            Self::stat_card(ui, "Total Records", &summary.total_records.to_string());
            Self::stat_card(ui, "EV Types", &summary.ev_types.join("\n"));
            Self::stat_card(ui, "Total BEVs", &summary.bev_count.to_string());
            Self::stat_card(ui, "Total PHEVs", &summary.phev_count.to_string());
            Self::stat_card(ui, "Avg Electric Range", &avg_range);
        });
    }

    fn stat_card(ui: &mut egui::Ui, title: &str, value: &str) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(8.0)
            .inner_margin(10.0)
            .show(ui, |ui| {
                ui.set_min_width(150.0);
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new(title).size(12.0));
                    ui.label(RichText::new(value).size(16.0).strong().color(ACCENT));
                });
            });
    }

    fn card_title(card: Card) -> &'static str {
        match card {
            Card::YearLine => "Model Year Trend",
            Card::TopMakes => "Top EV Makes",
            Card::CafvShares => "CAFV Eligibility",
            Card::TypeByYear => "EV Type Distribution Over Years",
            Card::TopCities => "Top 10 Cities by EV Count",
            Card::TopModels => "Top 10 Models",
            Card::CafvTopModels => "Top 10 Models by CAFV Eligibility",
            Card::CafvTopMakes => "Top 10 Makes by CAFV Eligibility",
            Card::CityHeatGrid => "EV Distribution by Utility City",
            Card::ModelTrend => "Model Popularity Trend by Year",
            Card::MeanRange => "Average Electric Range by Model",
            Card::RangeSpread => "Electric Range Variation by Model",
            Card::CafvTypeSplit => "CAFV-Eligible: BEV vs PHEV",
            Card::TopRangeVehicles => "Top 10 Vehicles by Electric Range",
        }
    }

    fn draw_card(&mut self, ui: &mut egui::Ui, card: Card) {
        let title = Self::card_title(card);

        egui::Frame::none()
            .rounding(8.0)
            .stroke(egui::Stroke::new(1.0, Color32::from_gray(70)))
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.set_width(CARD_WIDTH - 24.0);
                ui.set_height(CARD_HEIGHT - 24.0);

                ui.vertical(|ui| {
                    ui.label(RichText::new(title).size(15.0).strong());
                    ui.add_space(6.0);
                    self.draw_card_body(ui, card, title);
                });
            });
    }

    fn draw_card_body(&mut self, ui: &mut egui::Ui, card: Card, title: &str) {
        match card {
            Card::YearLine => {
                ChartPlotter::draw_year_line(ui, "year_line", &self.data.registrations_by_year);
            }
            Card::TopMakes => {
                ChartPlotter::draw_count_bars(ui, "top_makes", &self.data.top_makes);
            }
            Card::CafvShares => {
                Self::scrolled_table(ui, title, |ui| {
                    ChartPlotter::draw_share_table(ui, "cafv_shares", &self.data.cafv_shares);
                });
            }
            Card::TypeByYear => {
                ChartPlotter::draw_type_year_bars(
                    ui,
                    "type_by_year",
                    &self.data.type_counts_by_year,
                );
            }
            Card::TopCities => {
                ChartPlotter::draw_count_bars_horizontal(ui, "top_cities", &self.data.top_cities);
            }
            Card::TopModels => {
                Self::scrolled_table(ui, title, |ui| {
                    ChartPlotter::draw_ranked_table(ui, "top_models", "Model", &self.data.top_models);
                });
            }
            Card::CafvTopModels => {
                Self::scrolled_table(ui, title, |ui| {
                    ChartPlotter::draw_share_table(
                        ui,
                        "cafv_top_models",
                        &self.data.cafv_top_models,
                    );
                });
            }
            Card::CafvTopMakes => {
                Self::scrolled_table(ui, title, |ui| {
                    ChartPlotter::draw_share_table(ui, "cafv_top_makes", &self.data.cafv_top_makes);
                });
            }
            Card::CityHeatGrid => {
                Self::scrolled_table(ui, title, |ui| {
                    ChartPlotter::draw_city_heat_grid(ui, &self.data.utility_cities);
                });
            }
            Card::ModelTrend => self.draw_model_trend(ui),
            Card::MeanRange => {
                // Most common models only, ordered by mean range.
                let shown: Vec<RangeStats> = self
                    .data
                    .range_by_mean
                    .iter()
                    .filter(|s| self.data.range_models.contains(&s.model))
                    .cloned()
                    .collect();
                ChartPlotter::draw_mean_range_points(ui, "mean_range", &shown, MEAN_RANGE_POINTS);
            }
            Card::RangeSpread => self.draw_range_spread(ui),
            Card::CafvTypeSplit => {
                Self::scrolled_table(ui, title, |ui| {
                    ChartPlotter::draw_share_table(
                        ui,
                        "cafv_type_split",
                        &self.data.cafv_type_split,
                    );
                });
            }
            Card::TopRangeVehicles => self.draw_top_range_vehicles(ui),
        }
    }

    fn scrolled_table(
        ui: &mut egui::Ui,
        id: &str,
        add_contents: impl FnOnce(&mut egui::Ui),
    ) {
        ScrollArea::vertical()
            .id_salt(("card_table", id))
            .max_height(CARD_HEIGHT - 80.0)
            .show(ui, add_contents);
    }

    fn draw_model_trend(&mut self, ui: &mut egui::Ui) {
        let mut selected = None;
        ui.horizontal(|ui| {
            ui.label("Model:");
            ComboBox::from_id_salt("trend_model")
                .width(200.0)
                .selected_text(self.trend_model.as_deref().unwrap_or(""))
                .show_ui(ui, |ui| {
                    for model in &self.data.trend_models {
                        if ui
                            .selectable_label(self.trend_model.as_deref() == Some(model), model)
                            .clicked()
                        {
                            selected = Some(model.clone());
                        }
                    }
                });
        });
        if let Some(model) = selected {
            self.select_trend_model(model);
        }

        ui.add_space(4.0);
        ChartPlotter::draw_year_line(ui, "model_trend", &self.trend_series);
    }

    fn draw_range_spread(&mut self, ui: &mut egui::Ui) {
        // Selection here is a pure filter over precomputed stats, so it is
        // applied directly instead of re-aggregating.
        let mut selected: Option<Option<String>> = None;
        ui.horizontal(|ui| {
            ui.label("Model:");
            ComboBox::from_id_salt("spread_model")
                .width(200.0)
                .selected_text(
                    self.spread_model
                        .as_deref()
                        .unwrap_or("Top models by variation"),
                )
                .show_ui(ui, |ui| {
                    if ui
                        .selectable_label(self.spread_model.is_none(), "Top models by variation")
                        .clicked()
                    {
                        selected = Some(None);
                    }
                    for model in &self.data.range_models {
                        if ui
                            .selectable_label(self.spread_model.as_deref() == Some(model), model)
                            .clicked()
                        {
                            selected = Some(Some(model.clone()));
                        }
                    }
                });
        });
        if let Some(model) = selected {
            self.spread_model = model;
        }

        ui.add_space(4.0);
        match &self.spread_model {
            Some(model) => {
                let filtered: Vec<RangeStats> = self
                    .data
                    .range_by_spread
                    .iter()
                    .filter(|s| &s.model == model)
                    .cloned()
                    .collect();
                ChartPlotter::draw_spread_bars(ui, "range_spread", &filtered, SPREAD_BARS);
            }
            None => {
                ChartPlotter::draw_spread_bars(
                    ui,
                    "range_spread",
                    &self.data.range_by_spread,
                    SPREAD_BARS,
                );
            }
        }
        ui.label(
            RichText::new("Wider bars mean more range variation within one model")
                .size(10.0)
                .color(Color32::GRAY),
        );
    }

    fn draw_top_range_vehicles(&mut self, ui: &mut egui::Ui) {
        let mut selected: Option<Option<String>> = None;
        ui.horizontal(|ui| {
            ui.label("Model:");
            ComboBox::from_id_salt("range_model")
                .width(200.0)
                .selected_text(self.range_model.as_deref().unwrap_or("All models"))
                .show_ui(ui, |ui| {
                    if ui
                        .selectable_label(self.range_model.is_none(), "All models")
                        .clicked()
                    {
                        selected = Some(None);
                    }
                    for model in &self.data.range_models {
                        if ui
                            .selectable_label(self.range_model.as_deref() == Some(model), model)
                            .clicked()
                        {
                            selected = Some(Some(model.clone()));
                        }
                    }
                });
        });
        if let Some(model) = selected {
            self.select_range_model(model);
        }

        if let Some(summary) = &self.range_summary {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                Self::stat_card(ui, "Average Range", &format!("{:.1} mi", summary.mean));
                Self::stat_card(ui, "Cumulative Range", &format!("{:.0} mi", summary.total));
                Self::stat_card(ui, "Vehicle Count", &summary.count.to_string());
            });
        }

        ui.add_space(4.0);
        ChartPlotter::draw_range_with_cumulative(ui, "top_range_vehicles", &self.range_vehicles);
    }
}
