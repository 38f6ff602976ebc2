//! # Line Charts
//!
//! Turns sweep results into 2D line charts. Charts are drawn as typst markup
//! (frame, gridlines, tick labels, one polyline per series, legend) and
//! compiled to PDF through the same typst world the reports use.
//!
//! ## Example
//!
//! ```rust,no_run
//! use conc_core::chart::{render_chart_pdf, ChartSpec};
//! use conc_core::presets;
//!
//! let result = presets::run_preset("shear_vs_depth").unwrap();
//! let pdf = render_chart_pdf(&ChartSpec::from_sweep(&result)).unwrap();
//! std::fs::write("shear_vs_depth.pdf", pdf).unwrap();
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::pdf::{compile_typst, escape_typst};
use crate::sweep::SweepResult;

/// Plot area size in points
const PLOT_WIDTH: f64 = 420.0;
const PLOT_HEIGHT: f64 = 260.0;
/// Room left of the plot for y tick labels and title
const MARGIN_LEFT: f64 = 64.0;
const MARGIN_TOP: f64 = 8.0;
/// Room below the plot for x tick labels and title
const MARGIN_BOTTOM: f64 = 40.0;
const MARGIN_RIGHT: f64 = 16.0;
const TARGET_TICKS: usize = 6;

/// Series colours, cycled
pub const PALETTE: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f", "#bcbd22",
    "#17becf",
];

/// One line on a chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub label: String,
    pub points: Vec<(f64, f64)>,
}

/// Everything needed to draw a chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub title: String,
    /// Footer note, typically the base section
    pub subtitle: Option<String>,
    pub x_title: String,
    pub y_title: String,
    pub series: Vec<ChartSeries>,
}

impl ChartSpec {
    pub fn new(title: impl Into<String>, x_title: impl Into<String>, y_title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subtitle: None,
            x_title: x_title.into(),
            y_title: y_title.into(),
            series: Vec::new(),
        }
    }

    pub fn with_series(mut self, label: impl Into<String>, points: Vec<(f64, f64)>) -> Self {
        self.series.push(ChartSeries { label: label.into(), points });
        self
    }

    /// Build a chart from a sweep: x is the swept parameter, y the quantity
    pub fn from_sweep(result: &SweepResult) -> Self {
        let mut subtitle = format!("Base section: {}", result.base.describe());
        if result.skipped > 0 {
            subtitle.push_str(&format!(" ({} invalid points omitted)", result.skipped));
        }

        Self {
            title: result.title.clone(),
            subtitle: Some(subtitle),
            x_title: result.x_title.clone(),
            y_title: result.y_title.clone(),
            series: result
                .series
                .iter()
                .map(|s| ChartSeries {
                    label: s.label.clone(),
                    points: s.points.clone(),
                })
                .collect(),
        }
    }

    fn x_extent(&self) -> Option<(f64, f64)> {
        extent(self.series.iter().flat_map(|s| s.points.iter().map(|p| p.0)))
    }

    fn y_extent(&self) -> Option<(f64, f64)> {
        extent(self.series.iter().flat_map(|s| s.points.iter().map(|p| p.1)))
    }
}

fn extent(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.filter(|v| v.is_finite()).fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

// ============================================================================
// Axis Scaling
// ============================================================================

/// An axis from `min` to `max` with ticks every `step`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Axis {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl Axis {
    /// Axis covering `[lo, hi]` with a 1, 2 or 5 × 10^n step
    pub fn nice(lo: f64, hi: f64, target_ticks: usize) -> Self {
        let (mut lo, mut hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
        if (hi - lo).abs() < f64::EPSILON * hi.abs().max(1.0) {
            let pad = if lo == 0.0 { 1.0 } else { lo.abs() * 0.1 };
            lo -= pad;
            hi += pad;
        }

        let step = nice_step((hi - lo) / target_ticks.max(1) as f64);
        Self {
            min: (lo / step).floor() * step,
            max: (hi / step).ceil() * step,
            step,
        }
    }

    pub fn ticks(&self) -> Vec<f64> {
        let n = ((self.max - self.min) / self.step).round() as usize;
        (0..=n).map(|i| self.min + i as f64 * self.step).collect()
    }

    /// Fraction of the axis length at `value`
    fn fraction(&self, value: f64) -> f64 {
        (value - self.min) / (self.max - self.min)
    }

    /// Tick label with as many decimals as the step needs
    pub fn format_tick(&self, value: f64) -> String {
        let decimals = if self.step >= 1.0 {
            0
        } else {
            (-self.step.log10().floor()) as usize
        };
        let s = format!("{:.*}", decimals, value);
        // avoid "-0"
        if s.trim_start_matches('-').chars().all(|c| c == '0' || c == '.') {
            s.trim_start_matches('-').to_string()
        } else {
            s
        }
    }
}

/// Round a raw step up to 1, 2 or 5 × 10^n
pub fn nice_step(raw: f64) -> f64 {
    if !raw.is_finite() || raw <= 0.0 {
        return 1.0;
    }
    let magnitude = 10f64.powf(raw.log10().floor());
    let normalized = raw / magnitude;
    let nice = if normalized <= 1.0 {
        1.0
    } else if normalized <= 2.0 {
        2.0
    } else if normalized <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

// ============================================================================
// Typst Rendering
// ============================================================================

/// Render a chart as a standalone typst document.
pub fn to_typst(spec: &ChartSpec) -> CalcResult<String> {
    let (x_lo, x_hi) = spec.x_extent().ok_or_else(|| {
        CalcError::calculation_failed("chart", format!("'{}' has no points to plot", spec.title))
    })?;
    let (y_lo, y_hi) = spec.y_extent().ok_or_else(|| {
        CalcError::calculation_failed("chart", format!("'{}' has no points to plot", spec.title))
    })?;

    let x_axis = Axis::nice(x_lo, x_hi, TARGET_TICKS);
    // Non-negative quantities read best from zero
    let y_axis = Axis::nice(y_lo.min(0.0), y_hi, TARGET_TICKS);

    let px = |x: f64| MARGIN_LEFT + x_axis.fraction(x) * PLOT_WIDTH;
    let py = |y: f64| MARGIN_TOP + (1.0 - y_axis.fraction(y)) * PLOT_HEIGHT;

    let total_width = MARGIN_LEFT + PLOT_WIDTH + MARGIN_RIGHT;
    let total_height = MARGIN_TOP + PLOT_HEIGHT + MARGIN_BOTTOM;
    let bottom = MARGIN_TOP + PLOT_HEIGHT;
    let right = MARGIN_LEFT + PLOT_WIDTH;

    let mut out = String::with_capacity(8_192);
    out.push_str("#set page(width: auto, height: auto, margin: 24pt)\n");
    out.push_str("#set text(size: 9pt)\n\n");
    out.push_str(&format!(
        "#align(center, text(size: 13pt, weight: \"bold\")[{}])\n#v(6pt)\n\n",
        escape_typst(&spec.title)
    ));

    out.push_str(&format!("#box(width: {:.1}pt, height: {:.1}pt)[\n", total_width, total_height));

    // Gridlines and tick labels
    for tick in x_axis.ticks() {
        let x = px(tick);
        out.push_str(&format!(
            "  #place(top + left, line(start: ({x:.2}pt, {top:.2}pt), end: ({x:.2}pt, {bottom:.2}pt), stroke: 0.4pt + luma(215)))\n",
            top = MARGIN_TOP,
        ));
        out.push_str(&format!(
            "  #place(top + left, dx: {:.2}pt, dy: {:.2}pt, box(width: 50pt, align(center, text(size: 8pt)[{}])))\n",
            x - 25.0,
            bottom + 4.0,
            escape_typst(&x_axis.format_tick(tick))
        ));
    }
    for tick in y_axis.ticks() {
        let y = py(tick);
        out.push_str(&format!(
            "  #place(top + left, line(start: ({left:.2}pt, {y:.2}pt), end: ({right:.2}pt, {y:.2}pt), stroke: 0.4pt + luma(215)))\n",
            left = MARGIN_LEFT,
        ));
        out.push_str(&format!(
            "  #place(top + left, dx: {:.2}pt, dy: {:.2}pt, box(width: 40pt, align(right, text(size: 8pt)[{}])))\n",
            MARGIN_LEFT - 44.0,
            y - 5.0,
            escape_typst(&y_axis.format_tick(tick))
        ));
    }

    // Frame
    out.push_str(&format!(
        "  #place(top + left, dx: {:.2}pt, dy: {:.2}pt, rect(width: {:.2}pt, height: {:.2}pt, stroke: 0.8pt))\n",
        MARGIN_LEFT, MARGIN_TOP, PLOT_WIDTH, PLOT_HEIGHT
    ));

    // Series
    for (i, series) in spec.series.iter().enumerate() {
        let color = PALETTE[i % PALETTE.len()];
        let points: Vec<(f64, f64)> = series
            .points
            .iter()
            .filter(|(x, y)| x.is_finite() && y.is_finite())
            .map(|&(x, y)| (px(x), py(y)))
            .collect();

        match points.as_slice() {
            [] => {}
            [(x, y)] => out.push_str(&format!(
                "  #place(top + left, dx: {:.2}pt, dy: {:.2}pt, circle(radius: 2pt, fill: rgb(\"{}\")))\n",
                x - 2.0,
                y - 2.0,
                color
            )),
            [(x0, y0), rest @ ..] => {
                let mut segments = format!("curve.move(({:.2}pt, {:.2}pt))", x0, y0);
                for (x, y) in rest {
                    segments.push_str(&format!(", curve.line(({:.2}pt, {:.2}pt))", x, y));
                }
                out.push_str(&format!(
                    "  #place(top + left, curve(stroke: 1.2pt + rgb(\"{}\"), {}))\n",
                    color, segments
                ));
            }
        }
    }

    // Axis titles
    out.push_str(&format!(
        "  #place(top + left, dx: {:.2}pt, dy: {:.2}pt, box(width: {:.2}pt, align(center)[{}]))\n",
        MARGIN_LEFT,
        bottom + 20.0,
        PLOT_WIDTH,
        escape_typst(&spec.x_title)
    ));
    out.push_str(&format!(
        "  #place(left + horizon, dy: {:.2}pt, rotate(-90deg, reflow: true)[{}])\n",
        (MARGIN_TOP - MARGIN_BOTTOM) / 2.0,
        escape_typst(&spec.y_title)
    ));
    out.push_str("]\n\n");

    // Legend
    if !spec.series.is_empty() {
        let columns = spec.series.len().min(4);
        out.push_str("#v(6pt)\n");
        out.push_str(&format!(
            "#align(center, grid(columns: {}, column-gutter: 14pt, row-gutter: 6pt,\n",
            columns
        ));
        for (i, series) in spec.series.iter().enumerate() {
            let color = PALETTE[i % PALETTE.len()];
            out.push_str(&format!(
                "  [#box(baseline: -3pt, line(length: 16pt, stroke: 1.5pt + rgb(\"{}\"))) #h(4pt) {}],\n",
                color,
                escape_typst(&series.label)
            ));
        }
        out.push_str("))\n");
    }

    if let Some(subtitle) = &spec.subtitle {
        out.push_str(&format!(
            "\n#v(6pt)\n#align(center, text(size: 7pt, fill: luma(100))[{}])\n",
            escape_typst(subtitle)
        ));
    }

    Ok(out)
}

/// Compile a chart to PDF bytes.
pub fn render_chart_pdf(spec: &ChartSpec) -> CalcResult<Vec<u8>> {
    let source = to_typst(spec)?;
    compile_typst(source)
}
