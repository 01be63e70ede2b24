use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Days, NaiveDate};
use log::{debug, warn};
use plotters::prelude::*;

use crate::data::model::Series;

/// Citation shown as the chart caption.
const SOURCE_URL: &str = "//jessicar.substack.com/p/what-is-going-on-in-new-brunswick";

const CHART_SIZE: (u32, u32) = (1024, 768);

/// Render the (date, count) series as a connected line and save it as a PNG.
///
/// An empty series produces no chart; the location is logged and skipped.
pub fn render(path: &Path, location: &str, series: &Series) -> Result<()> {
    if series.is_empty() {
        warn!("no rows matched for {location}, skipping chart");
        return Ok(());
    }
    debug!("saving graph for {location}");

    let (first, last) = date_range(&series.dates);
    let top = series.counts.iter().copied().max().unwrap_or(0).max(1);

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).context("filling chart background")?;

    let mut chart = ChartBuilder::on(&root)
        .caption(SOURCE_URL, ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(first..last, 0i64..top)
        .context("building chart axes")?;

    chart
        .configure_mesh()
        .x_desc("Date")
        .y_desc(format!("All Cause Deaths in {location}"))
        .x_labels(8)
        .draw()
        .context("drawing axes")?;

    chart
        .draw_series(LineSeries::new(
            series
                .dates
                .iter()
                .copied()
                .zip(series.counts.iter().copied()),
            &BLUE,
        ))
        .context("drawing series")?;

    root.present()
        .with_context(|| format!("saving {}", path.display()))?;
    Ok(())
}

/// Min/max of the plotted dates, widened by a day when they coincide so the
/// x range never collapses to a point.
fn date_range(dates: &[NaiveDate]) -> (NaiveDate, NaiveDate) {
    let mut first = dates[0];
    let mut last = dates[0];
    for &d in dates {
        if d < first {
            first = d;
        }
        if d > last {
            last = d;
        }
    }
    if first == last {
        last = last + Days::new(1);
    }
    (first, last)
}
