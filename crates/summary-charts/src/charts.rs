//! PNG rendering of the quarterly series.
//!
//! Both charts share one quarter axis: bucket `i` occupies the slot
//! `[i, i + 1)` and is labelled at its centre by [`quarter_tick_labels`],
//! with the year spelled out on every fourth tick.

use std::ops::Range;
use std::path::Path;
use std::sync::OnceLock;

use plotters::prelude::*;
use plotters::style::register_font;
use summary_core::formatting::{quarter_range_label, quarter_tick_labels};
use summary_core::models::QuarterlyTable;
use summary_core::{Result, SummaryError};
use tracing::debug;

/// Output resolution in pixels.
pub const CHART_SIZE: (u32, u32) = (1000, 600);

pub const SENT_CHART_TITLE: &str = "Top Senders By Quarter - Emails Sent";
pub const RECEIVED_CHART_TITLE: &str = "Top Senders By Quarter - Unique Emails Received";

const FONT_FAMILY: &str = "sans-serif";
const EMBEDDED_FONT: &[u8] = include_bytes!("../assets/DejaVuSans.ttf");

/// Marker radius for sent-volume data points.
const POINT_RADIUS: u32 = 4;

/// Horizontal gap between a bar and the edge of its slot, in pixels.
const BAR_GAP: u32 = 6;

// ── StackedSegment ────────────────────────────────────────────────────────────

/// One person's slice of one stacked bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackedSegment {
    /// Row index of the bucket.
    pub bucket: usize,
    /// Column index of the person.
    pub person: usize,
    pub bottom: u64,
    pub top: u64,
}

impl StackedSegment {
    /// Opposite corners of the bar: the full width of the bucket's slot.
    pub fn corners(&self) -> [(f64, u64); 2] {
        let left = self.bucket as f64;
        [(left, self.bottom), (left + 1.0, self.top)]
    }
}

/// Lay out stacked bars: for each bucket, persons are stacked in column
/// order starting from zero. Zero-height slices are omitted.
pub fn stacked_segments(table: &QuarterlyTable) -> Vec<StackedSegment> {
    let mut segments = Vec::new();
    for (bucket, row) in table.rows().iter().enumerate() {
        let mut bottom = 0;
        for (person, &count) in row.iter().enumerate() {
            if count > 0 {
                segments.push(StackedSegment {
                    bucket,
                    person,
                    bottom,
                    top: bottom + count,
                });
            }
            bottom += count;
        }
    }
    segments
}

// ── Quarter axis ──────────────────────────────────────────────────────────────

/// Number of slots on the quarter axis; an empty log still gets one.
pub fn slot_count(table: &QuarterlyTable) -> usize {
    table.buckets().len().max(1)
}

/// Horizontal extent of the quarter axis: exactly one unit per slot.
pub fn quarter_axis_range(table: &QuarterlyTable) -> Range<f64> {
    0.0..slot_count(table) as f64
}

/// Centre of slot `index`, where its tick and data point sit.
pub fn slot_center(index: usize) -> f64 {
    index as f64 + 0.5
}

/// Tick positions, one per bucket.
pub fn tick_positions(table: &QuarterlyTable) -> Vec<f64> {
    (0..table.buckets().len()).map(slot_center).collect()
}

/// Data points of one sent-volume line, one per bucket at the slot centre.
pub fn series_points(values: &[u64]) -> Vec<(f64, u64)> {
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| (slot_center(i), v))
        .collect()
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Line chart of messages sent per quarter, one line per top sender.
///
/// Every value also gets a marker so single-quarter logs stay visible.
pub fn draw_sent_volume_chart(table: &QuarterlyTable, path: &Path) -> Result<()> {
    ensure_font()?;
    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;

    let labels = quarter_tick_labels(table.buckets());
    let mut chart = ChartBuilder::on(&root)
        .caption(SENT_CHART_TITLE, (FONT_FAMILY, 28))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(
            quarter_axis_range(table).with_key_points(tick_positions(table)),
            0u64..y_upper_bound(table.max_cell()),
        )
        .map_err(chart_err)?;

    chart
        .configure_mesh()
        .x_label_formatter(&|x: &f64| tick_label(*x, &labels))
        .x_desc(axis_description(table))
        .y_desc("Emails sent")
        .draw()
        .map_err(chart_err)?;

    for (idx, person) in table.persons().iter().enumerate() {
        let color = Palette99::pick(idx).to_rgba();
        let points = series_points(&table.column(person).unwrap_or_default());

        chart
            .draw_series(LineSeries::new(points.iter().copied(), color.stroke_width(2)))
            .map_err(chart_err)?
            .label(person.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
        chart
            .draw_series(
                points
                    .iter()
                    .map(|&point| Circle::new(point, POINT_RADIUS, color.filled())),
            )
            .map_err(chart_err)?;
    }

    if !table.persons().is_empty() {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(chart_err)?;
    }
    root.present().map_err(chart_err)?;

    debug!("Rendered sent-volume chart to {}", path.display());
    Ok(())
}

/// Stacked bar chart of distinct incoming contacts per quarter.
pub fn draw_unique_contacts_chart(table: &QuarterlyTable, path: &Path) -> Result<()> {
    ensure_font()?;
    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;

    let labels = quarter_tick_labels(table.buckets());
    let mut chart = ChartBuilder::on(&root)
        .caption(RECEIVED_CHART_TITLE, (FONT_FAMILY, 28))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(
            quarter_axis_range(table).with_key_points(tick_positions(table)),
            0u64..y_upper_bound(table.max_row_total()),
        )
        .map_err(chart_err)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_label_formatter(&|x: &f64| tick_label(*x, &labels))
        .x_desc(axis_description(table))
        .y_desc("Unique senders")
        .draw()
        .map_err(chart_err)?;

    let segments = stacked_segments(table);
    for (idx, person) in table.persons().iter().enumerate() {
        let color = Palette99::pick(idx).to_rgba();
        let bars = segments.iter().filter(|s| s.person == idx).map(|s| {
            let mut bar = Rectangle::new(s.corners(), color.filled());
            bar.set_margin(0, 0, BAR_GAP, BAR_GAP);
            bar
        });
        chart
            .draw_series(bars)
            .map_err(chart_err)?
            .label(person.as_str())
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));
    }

    if !table.persons().is_empty() {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(chart_err)?;
    }
    root.present().map_err(chart_err)?;

    debug!("Rendered unique-contacts chart to {}", path.display());
    Ok(())
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Upper bound of the count axis: a tenth of headroom, never an empty range.
pub fn y_upper_bound(max: u64) -> u64 {
    max + max / 10 + 1
}

/// Register the bundled font under [`FONT_FAMILY`] once per process.
fn ensure_font() -> Result<()> {
    static REGISTERED: OnceLock<std::result::Result<(), String>> = OnceLock::new();
    REGISTERED
        .get_or_init(|| {
            register_font(FONT_FAMILY, FontStyle::Normal, EMBEDDED_FONT)
                .map_err(|_| "embedded chart font is not a valid font".to_string())
        })
        .clone()
        .map_err(SummaryError::Chart)
}

/// Label for the tick at `x`; blank unless `x` is a slot centre.
fn tick_label(x: f64, labels: &[String]) -> String {
    let index = (x - 0.5).round();
    if index < 0.0 || (x - slot_center(index as usize)).abs() > f64::EPSILON {
        return String::new();
    }
    labels.get(index as usize).cloned().unwrap_or_default()
}

fn axis_description(table: &QuarterlyTable) -> String {
    match (table.buckets().first(), table.buckets().last()) {
        (Some(first), Some(last)) => format!(
            "Quarter ({} to {})",
            quarter_range_label(first),
            quarter_range_label(last)
        ),
        _ => "Quarter".to_string(),
    }
}

fn chart_err(err: impl std::fmt::Display) -> SummaryError {
    SummaryError::Chart(err.to_string())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
