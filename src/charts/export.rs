//! Static Chart Export
//! Renders the headline aggregations to PNG via plotters and writes the
//! full aggregate bundle as JSON.

use crate::charts::DashboardData;
use anyhow::{anyhow, Context, Result};
use log::info;
use plotters::prelude::*;
use std::collections::BTreeMap;
use std::error::Error;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

const EXPORT_SIZE: (u32, u32) = (1280, 720);
/// Spread bars exported per image.
const EXPORT_BARS: usize = 20;

const EXPORT_GREEN: RGBColor = RGBColor(34, 197, 94);

/// Render the headline charts as PNGs under `dir`. Charts whose backing
/// aggregation is empty are skipped. Returns the files written.
pub fn export_chart_pngs(data: &DashboardData, dir: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let mut written = Vec::new();

    if !data.registrations_by_year.is_empty() {
        let path = dir.join("registrations_per_year.png");
        render_year_line(&data.registrations_by_year, &path)
            .map_err(|e| anyhow!("registrations chart: {e}"))?;
        written.push(path);
    }

    for (file, title, axis, entries) in [
        ("top_makes.png", "Top Makes", "Registrations", &data.top_makes),
        ("top_cities.png", "Top Cities", "Registrations", &data.top_cities),
    ] {
        if entries.is_empty() {
            continue;
        }
        let path = dir.join(file);
        let values: Vec<(String, f64)> = entries
            .iter()
            .map(|(label, count)| (label.clone(), *count as f64))
            .collect();
        render_value_bars(title, axis, &values, &path).map_err(|e| anyhow!("{title}: {e}"))?;
        written.push(path);
    }

    if !data.range_by_spread.is_empty() {
        let path = dir.join("range_spread.png");
        let values: Vec<(String, f64)> = data
            .range_by_spread
            .iter()
            .take(EXPORT_BARS)
            .map(|s| (s.model.clone(), s.std_dev))
            .collect();
        render_value_bars("Electric Range Spread by Model", "Std Dev (mi)", &values, &path)
            .map_err(|e| anyhow!("range spread chart: {e}"))?;
        written.push(path);
    }

    info!("exported {} chart(s) to {}", written.len(), dir.display());
    Ok(written)
}

/// Write the full aggregate bundle as pretty-printed JSON.
pub fn export_summary_json(data: &DashboardData, path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), data).context("writing summary JSON")?;
    info!("wrote aggregate summary to {}", path.display());
    Ok(())
}

fn render_year_line(series: &BTreeMap<i32, u64>, path: &Path) -> Result<(), Box<dyn Error>> {
    let root = BitMapBackend::new(path, EXPORT_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let min_year = *series.keys().next().ok_or("empty series")?;
    let max_year = *series.keys().last().ok_or("empty series")?;
    let max_count = series.values().copied().max().unwrap_or(0).max(1);

    let mut chart = ChartBuilder::on(&root)
        .caption("Registrations per Model Year", ("sans-serif", 28))
        .margin(20)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(min_year..max_year + 1, 0u64..max_count + max_count / 10 + 1)?;

    chart
        .configure_mesh()
        .x_desc("Model Year")
        .y_desc("Registrations")
        .draw()?;

    chart.draw_series(LineSeries::new(
        series.iter().map(|(year, count)| (*year, *count)),
        &EXPORT_GREEN,
    ))?;

    root.present()?;
    Ok(())
}

fn render_value_bars(
    title: &str,
    y_desc: &str,
    entries: &[(String, f64)],
    path: &Path,
) -> Result<(), Box<dyn Error>> {
    let root = BitMapBackend::new(path, EXPORT_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let n = entries.len();
    let max_value = entries
        .iter()
        .map(|(_, value)| *value)
        .fold(0.0f64, f64::max)
        .max(1.0);
    let labels: Vec<String> = entries.iter().map(|(label, _)| label.clone()).collect();

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 28))
        .margin(20)
        .x_label_area_size(90)
        .y_label_area_size(60)
        .build_cartesian_2d((0..n).into_segmented(), 0.0..max_value * 1.1)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(n)
        .x_label_formatter(&|seg| match seg {
            SegmentValue::Exact(i) | SegmentValue::CenterOf(i) => {
                labels.get(*i).cloned().unwrap_or_default()
            }
            _ => String::new(),
        })
        .y_desc(y_desc)
        .draw()?;

    chart.draw_series(entries.iter().enumerate().map(|(i, (_, value))| {
        Rectangle::new(
            [
                (SegmentValue::Exact(i), 0.0),
                (SegmentValue::Exact(i + 1), *value),
            ],
            EXPORT_GREEN.filled(),
        )
    }))?;

    root.present()?;
    Ok(())
}
