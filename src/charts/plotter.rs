//! Chart Plotter Module
//! Interactive dashboard widgets built on egui_plot, plus the grid tables.
//!
//! Everything here consumes aggregation outputs verbatim; no widget ever
//! touches the raw record sequence.

use crate::charts::palette::{color_for, heat_color, series_color, ACCENT};
use crate::charts::HEAT_GRID_CITIES;
use crate::stats::{RangeStats, RangedVehicle, TypeCounts};
use egui::{Color32, RichText};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints, Points};
use std::collections::BTreeMap;

const CHART_HEIGHT: f32 = 260.0;

/// Draws the dashboard's chart and table widgets.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Line of registrations per model year.
    pub fn draw_year_line(ui: &mut egui::Ui, id: &str, series: &BTreeMap<i32, u64>) {
        let points: PlotPoints = series
            .iter()
            .map(|(year, count)| [*year as f64, *count as f64])
            .collect();

        Plot::new(id.to_string())
            .height(CHART_HEIGHT)
            .allow_scroll(false)
            .x_axis_label("Model Year")
            .y_axis_label("Registrations")
            .x_axis_formatter(|mark, _range| format!("{}", mark.value.round() as i64))
            .show(ui, |plot_ui| {
                plot_ui.line(
                    Line::new(points)
                        .color(ACCENT)
                        .width(2.0)
                        .name("Registrations"),
                );
            });
    }

    /// Vertical bars for a ranked counts list.
    pub fn draw_count_bars(ui: &mut egui::Ui, id: &str, entries: &[(String, u64)]) {
        let labels: Vec<String> = entries.iter().map(|(label, _)| label.clone()).collect();
        let bars: Vec<Bar> = entries
            .iter()
            .enumerate()
            .map(|(i, (label, count))| {
                Bar::new(i as f64, *count as f64)
                    .width(0.6)
                    .name(label)
                    .fill(ACCENT)
            })
            .collect();

        Plot::new(id.to_string())
            .height(CHART_HEIGHT)
            .allow_scroll(false)
            .y_axis_label("Count")
            .x_axis_formatter(move |mark, _range| Self::index_label(&labels, mark.value))
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars));
            });
    }

    /// Horizontal bars for a ranked counts list, highest at the top.
    pub fn draw_count_bars_horizontal(ui: &mut egui::Ui, id: &str, entries: &[(String, u64)]) {
        // Reverse so the largest bar lands at the highest y position.
        let labels: Vec<String> = entries.iter().rev().map(|(l, _)| l.clone()).collect();
        let bars: Vec<Bar> = entries
            .iter()
            .rev()
            .enumerate()
            .map(|(i, (label, count))| {
                Bar::new(i as f64, *count as f64)
                    .width(0.6)
                    .name(label)
                    .fill(ACCENT)
            })
            .collect();

        Plot::new(id.to_string())
            .height(CHART_HEIGHT)
            .allow_scroll(false)
            .x_axis_label("Count")
            .y_axis_formatter(move |mark, _range| Self::index_label(&labels, mark.value))
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).horizontal());
            });
    }

    /// Grouped BEV / PHEV / Other bars per model year.
    pub fn draw_type_year_bars(ui: &mut egui::Ui, id: &str, table: &BTreeMap<i32, TypeCounts>) {
        let year_labels: Vec<String> = table.keys().map(|year| year.to_string()).collect();

        let mut bev = Vec::new();
        let mut phev = Vec::new();
        let mut other = Vec::new();
        for (i, counts) in table.values().enumerate() {
            let x = i as f64;
            bev.push(Bar::new(x - 0.25, counts.bev as f64).width(0.22));
            phev.push(Bar::new(x, counts.phev as f64).width(0.22));
            other.push(Bar::new(x + 0.25, counts.other as f64).width(0.22));
        }

        Plot::new(id.to_string())
            .height(CHART_HEIGHT)
            .allow_scroll(false)
            .legend(Legend::default())
            .x_axis_label("Model Year")
            .y_axis_label("Count")
            .x_axis_formatter(move |mark, _range| Self::index_label(&year_labels, mark.value))
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bev).color(series_color(0)).name("BEV"));
                plot_ui.bar_chart(BarChart::new(phev).color(series_color(1)).name("PHEV"));
                plot_ui.bar_chart(BarChart::new(other).color(series_color(2)).name("Other"));
            });
    }

    /// Mean range per model as sized points, largest fleets drawn biggest.
    pub fn draw_mean_range_points(
        ui: &mut egui::Ui,
        id: &str,
        stats: &[RangeStats],
        max_points: usize,
    ) {
        let labels: Vec<String> = stats
            .iter()
            .take(max_points)
            .map(|s| s.model.clone())
            .collect();

        Plot::new(id.to_string())
            .height(CHART_HEIGHT)
            .allow_scroll(false)
            .legend(Legend::default())
            .y_axis_label("Mean Range (mi)")
            .x_axis_formatter(move |mark, _range| Self::index_label(&labels, mark.value))
            .show(ui, |plot_ui| {
                for (i, s) in stats.iter().take(max_points).enumerate() {
                    let radius = (2.0 + (s.count as f32).sqrt() * 0.35).min(9.0);
                    plot_ui.points(
                        Points::new(vec![[i as f64, s.mean]])
                            .radius(radius)
                            .color(color_for(&s.model))
                            .name(&s.model),
                    );
                }
            });
    }

    /// Horizontal bars of range spread (std dev) per model, widest first.
    pub fn draw_spread_bars(ui: &mut egui::Ui, id: &str, stats: &[RangeStats], max_bars: usize) {
        let shown: Vec<&RangeStats> = stats.iter().take(max_bars).collect();
        let labels: Vec<String> = shown.iter().rev().map(|s| s.model.clone()).collect();
        let bars: Vec<Bar> = shown
            .iter()
            .rev()
            .enumerate()
            .map(|(i, s)| {
                Bar::new(i as f64, s.std_dev)
                    .width(0.6)
                    .name(&s.model)
                    .fill(color_for(&s.model))
            })
            .collect();

        Plot::new(id.to_string())
            .height(CHART_HEIGHT)
            .allow_scroll(false)
            .x_axis_label("Std Dev (mi)")
            .y_axis_formatter(move |mark, _range| Self::index_label(&labels, mark.value))
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).horizontal());
            });
    }

    /// Individual ranges as bars with a cumulative running-total line.
    pub fn draw_range_with_cumulative(ui: &mut egui::Ui, id: &str, vehicles: &[RangedVehicle]) {
        let labels: Vec<String> = vehicles
            .iter()
            .map(|v| {
                format!(
                    "{} {}",
                    v.make.as_deref().unwrap_or("?"),
                    v.model.as_deref().unwrap_or("?")
                )
            })
            .collect();

        let mut bars = Vec::new();
        let mut cumulative = Vec::new();
        let mut running = 0.0;
        for (i, v) in vehicles.iter().enumerate() {
            running += v.electric_range;
            let name = match v.model_year {
                Some(year) => format!("{} ({})", labels[i], year),
                None => labels[i].clone(),
            };
            bars.push(Bar::new(i as f64, v.electric_range).width(0.55).name(name));
            cumulative.push([i as f64, running]);
        }

        Plot::new(id.to_string())
            .height(CHART_HEIGHT)
            .allow_scroll(false)
            .legend(Legend::default())
            .y_axis_label("Range (mi)")
            .x_axis_formatter(move |mark, _range| Self::index_label(&labels, mark.value))
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).color(ACCENT).name("Range"));
                plot_ui.line(
                    Line::new(PlotPoints::from_iter(cumulative))
                        .color(series_color(6))
                        .width(2.0)
                        .name("Cumulative"),
                );
            });
    }

    /// Share table: swatch, category, count, percentage. Stands in for the
    /// pie and donut views.
    pub fn draw_share_table(ui: &mut egui::Ui, id: &str, entries: &[(String, u64)]) {
        let total: u64 = entries.iter().map(|(_, count)| count).sum();

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                egui::Grid::new(ui.make_persistent_id(id))
                    .striped(true)
                    .min_col_width(40.0)
                    .spacing([10.0, 4.0])
                    .show(ui, |ui| {
                        ui.label("");
                        ui.label(RichText::new("Category").strong().size(11.0));
                        ui.label(RichText::new("Count").strong().size(11.0));
                        ui.label(RichText::new("Share").strong().size(11.0));
                        ui.end_row();

                        for (label, count) in entries {
                            Self::color_swatch(ui, color_for(label));
                            ui.label(RichText::new(label).size(11.0));
                            ui.label(RichText::new(count.to_string()).size(11.0));
                            let share = if total > 0 {
                                100.0 * *count as f64 / total as f64
                            } else {
                                0.0
                            };
                            ui.label(RichText::new(format!("{:.1}%", share)).size(11.0));
                            ui.end_row();
                        }
                    });
            });
    }

    /// Two-column ranked table (key, count).
    pub fn draw_ranked_table(
        ui: &mut egui::Ui,
        id: &str,
        key_header: &str,
        entries: &[(String, u64)],
    ) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                egui::Grid::new(ui.make_persistent_id(id))
                    .striped(true)
                    .min_col_width(90.0)
                    .spacing([10.0, 4.0])
                    .show(ui, |ui| {
                        ui.label(RichText::new(key_header).strong().size(11.0));
                        ui.label(RichText::new("Count").strong().size(11.0));
                        ui.end_row();

                        for (key, count) in entries {
                            ui.label(RichText::new(key).size(11.0));
                            ui.label(RichText::new(count.to_string()).size(11.0));
                            ui.end_row();
                        }
                    });
            });
    }

    /// Heat grid of the top utility-derived city buckets, green intensity
    /// scaled to the largest bucket.
    pub fn draw_city_heat_grid(ui: &mut egui::Ui, entries: &[(String, u64)]) {
        let max = entries.first().map(|(_, count)| *count).unwrap_or(0);
        let shown = &entries[..entries.len().min(HEAT_GRID_CITIES)];

        egui::Grid::new(ui.make_persistent_id("city_heat_grid"))
            .spacing([8.0, 8.0])
            .show(ui, |ui| {
                for (i, (city, count)) in shown.iter().enumerate() {
                    egui::Frame::none()
                        .fill(heat_color(*count, max))
                        .rounding(4.0)
                        .inner_margin(8.0)
                        .show(ui, |ui| {
                            ui.set_min_width(130.0);
                            ui.vertical_centered(|ui| {
                                ui.label(
                                    RichText::new(city)
                                        .size(11.0)
                                        .strong()
                                        .color(Color32::BLACK),
                                );
                                ui.label(
                                    RichText::new(count.to_string())
                                        .size(11.0)
                                        .color(Color32::BLACK),
                                );
                            });
                        });
                    if (i + 1) % 4 == 0 {
                        ui.end_row();
                    }
                }
            });

        ui.add_space(6.0);
        ui.horizontal(|ui| {
            for value in [0, max / 4, max / 2, max] {
                Self::color_swatch(ui, heat_color(value, max));
                ui.label(RichText::new(value.to_string()).size(10.0));
                ui.add_space(8.0);
            }
        });
    }

    fn color_swatch(ui: &mut egui::Ui, color: Color32) {
        let (rect, _) = ui.allocate_exact_size(egui::vec2(12.0, 12.0), egui::Sense::hover());
        ui.painter().rect_filled(rect, 2.0, color);
    }

    /// Axis label for integer category positions; off-grid marks get none.
    fn index_label(labels: &[String], value: f64) -> String {
        let rounded = value.round();
        if (value - rounded).abs() > 0.25 || rounded < 0.0 {
            return String::new();
        }
        labels.get(rounded as usize).cloned().unwrap_or_default()
    }
}
