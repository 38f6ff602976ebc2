//! # Parameter Sweeps
//!
//! Vary one `BeamConfig` parameter along the x axis, optionally a second one
//! as a family of series, and evaluate a capacity quantity at every point.
//!
//! Points whose configuration is not a valid section (cover larger than the
//! depth, f'c out of range) are skipped and counted, never emitted.
//!
//! ## Example
//!
//! ```rust
//! use conc_core::section::BeamConfig;
//! use conc_core::sweep::{run, Parameter, Quantity, SeriesValues, Sweep, SweepRange};
//!
//! let sweep = Sweep::new(
//!     "Moment vs depth",
//!     BeamConfig::default(),
//!     Parameter::Depth,
//!     SweepRange::new(150.0, 300.0, 50.0),
//!     Quantity::BendingCapacity,
//! )
//! .with_series(Parameter::Fc, SeriesValues::Values(vec![25.0, 40.0]));
//!
//! let result = run(&sweep).unwrap();
//! assert_eq!(result.series.len(), 2);
//! assert_eq!(result.series[0].label, "f'c = 25 MPa");
//! assert_eq!(result.series[0].points.len(), 3);
//! ```

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::calculations::minimum_steel::{self, MemberType, MinimumSteelInput};
use crate::calculations::{bending, shear};
use crate::errors::{CalcError, CalcResult};
use crate::section::BeamConfig;

/// Upper bound on evaluated points per sweep
pub const MAX_POINTS: usize = 100_000;

// ============================================================================
// Parameters
// ============================================================================

/// A `BeamConfig` field that can be swept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Parameter {
    Depth,
    Width,
    Cover,
    Fc,
    BarDiameter,
    BarSpacing,
    Fsy,
    /// Sets the effective depth override
    EffectiveDepth,
}

impl Parameter {
    /// Copy of `config` with this parameter set to `value`
    pub fn apply(&self, config: BeamConfig, value: f64) -> BeamConfig {
        match self {
            Parameter::Depth => config.with_depth(value),
            Parameter::Width => config.with_width(value),
            Parameter::Cover => config.with_cover(value),
            Parameter::Fc => config.with_fc(value),
            Parameter::BarDiameter => config.with_bar_diameter(value),
            Parameter::BarSpacing => config.with_bar_spacing(value),
            Parameter::Fsy => config.with_fsy(value),
            Parameter::EffectiveDepth => config.with_effective_depth(Some(value)),
        }
    }

    /// Current value of this parameter in `config`
    pub fn value_in(&self, config: &BeamConfig) -> f64 {
        match self {
            Parameter::Depth => config.depth_mm,
            Parameter::Width => config.width_mm,
            Parameter::Cover => config.cover_mm,
            Parameter::Fc => config.fc_mpa,
            Parameter::BarDiameter => config.bar_diameter_mm,
            Parameter::BarSpacing => config.bar_spacing_mm,
            Parameter::Fsy => config.fsy_mpa,
            Parameter::EffectiveDepth => config.effective_depth_mm(),
        }
    }

    /// Short symbol used in series labels
    pub fn symbol(&self) -> &'static str {
        match self {
            Parameter::Depth => "D",
            Parameter::Width => "b",
            Parameter::Cover => "cover",
            Parameter::Fc => "f'c",
            Parameter::BarDiameter => "db",
            Parameter::BarSpacing => "s",
            Parameter::Fsy => "fsy",
            Parameter::EffectiveDepth => "d",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Parameter::Depth => "Overall depth",
            Parameter::Width => "Width",
            Parameter::Cover => "Cover",
            Parameter::Fc => "Concrete strength",
            Parameter::BarDiameter => "Bar diameter",
            Parameter::BarSpacing => "Bar spacing",
            Parameter::Fsy => "Steel yield strength",
            Parameter::EffectiveDepth => "Effective depth",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Parameter::Fc | Parameter::Fsy => "MPa",
            _ => "mm",
        }
    }

    /// Axis title, e.g. "Overall depth D (mm)"
    pub fn axis_title(&self) -> String {
        format!("{} {} ({})", self.display_name(), self.symbol(), self.unit())
    }

    /// Series label for one value, e.g. "cover = 20 mm"
    pub fn value_label(&self, value: f64) -> String {
        format!("{} = {} {}", self.symbol(), format_value(value), self.unit())
    }
}

impl std::fmt::Display for Parameter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for Parameter {
    type Err = CalcError;

    fn from_str(s: &str) -> CalcResult<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "depth" | "d_total" => Ok(Parameter::Depth),
            "width" | "b" => Ok(Parameter::Width),
            "cover" => Ok(Parameter::Cover),
            "fc" | "f'c" => Ok(Parameter::Fc),
            "bar_diameter" | "db" => Ok(Parameter::BarDiameter),
            "bar_spacing" | "spacing" => Ok(Parameter::BarSpacing),
            "fsy" => Ok(Parameter::Fsy),
            "effective_depth" => Ok(Parameter::EffectiveDepth),
            _ => Err(CalcError::invalid_input(
                "parameter",
                s,
                "Expected depth, width, cover, fc, bar_diameter, bar_spacing, fsy or effective_depth",
            )),
        }
    }
}

/// Trim trailing zeros: 20.0 -> "20", 7.6 -> "7.6"
fn format_value(value: f64) -> String {
    let s = format!("{:.3}", value);
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

// ============================================================================
// Quantities
// ============================================================================

/// Result value plotted on the y axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quantity {
    /// φMuo (kN·m)
    BendingCapacity,
    /// φVuc (kN)
    ShearCapacity,
    /// Deemed-to-comply Ast.min (mm²)
    MinimumSteel,
    /// Provided Ast (mm²)
    ProvidedSteel,
    /// d (mm)
    EffectiveDepth,
    /// ku
    NeutralAxisParameter,
}

impl Quantity {
    pub fn symbol(&self) -> &'static str {
        match self {
            Quantity::BendingCapacity => "φMuo",
            Quantity::ShearCapacity => "φVuc",
            Quantity::MinimumSteel => "Ast.min",
            Quantity::ProvidedSteel => "Ast",
            Quantity::EffectiveDepth => "d",
            Quantity::NeutralAxisParameter => "ku",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Quantity::BendingCapacity => "kN·m",
            Quantity::ShearCapacity => "kN",
            Quantity::MinimumSteel | Quantity::ProvidedSteel => "mm²",
            Quantity::EffectiveDepth => "mm",
            Quantity::NeutralAxisParameter => "",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Quantity::BendingCapacity => "Design moment capacity",
            Quantity::ShearCapacity => "Design shear capacity",
            Quantity::MinimumSteel => "Minimum tension steel",
            Quantity::ProvidedSteel => "Provided tension steel",
            Quantity::EffectiveDepth => "Effective depth",
            Quantity::NeutralAxisParameter => "Neutral axis parameter",
        }
    }

    /// Axis title, e.g. "Design moment capacity φMuo (kN·m)"
    pub fn axis_title(&self) -> String {
        if self.unit().is_empty() {
            format!("{} {}", self.display_name(), self.symbol())
        } else {
            format!("{} {} ({})", self.display_name(), self.symbol(), self.unit())
        }
    }

    /// Evaluate this quantity for one section
    pub fn evaluate(&self, config: &BeamConfig, member_type: MemberType) -> CalcResult<f64> {
        match self {
            Quantity::BendingCapacity => Ok(bending::calculate(config)?.design_moment_knm),
            Quantity::ShearCapacity => Ok(shear::calculate(config)?.design_shear_kn),
            Quantity::MinimumSteel => {
                Ok(minimum_steel::calculate(&MinimumSteelInput::new(*config, member_type))?.min_steel_mm2)
            }
            Quantity::ProvidedSteel => {
                config.validate()?;
                Ok(config.steel_area_mm2())
            }
            Quantity::EffectiveDepth => {
                config.validate()?;
                Ok(config.effective_depth_mm())
            }
            Quantity::NeutralAxisParameter => Ok(bending::calculate(config)?.ku),
        }
    }
}

impl FromStr for Quantity {
    type Err = CalcError;

    fn from_str(s: &str) -> CalcResult<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "bending" | "bending_capacity" | "moment" => Ok(Quantity::BendingCapacity),
            "shear" | "shear_capacity" => Ok(Quantity::ShearCapacity),
            "minimum_steel" | "deemed" | "ast_min" => Ok(Quantity::MinimumSteel),
            "provided_steel" | "ast" => Ok(Quantity::ProvidedSteel),
            "effective_depth" => Ok(Quantity::EffectiveDepth),
            "ku" | "neutral_axis_parameter" => Ok(Quantity::NeutralAxisParameter),
            _ => Err(CalcError::invalid_input(
                "quantity",
                s,
                "Expected bending, shear, minimum_steel, provided_steel, effective_depth or ku",
            )),
        }
    }
}

// ============================================================================
// Ranges and Axes
// ============================================================================

/// Half-open range `[start, stop)` with a positive step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepRange {
    pub start: f64,
    pub stop: f64,
    pub step: f64,
}

impl SweepRange {
    pub fn new(start: f64, stop: f64, step: f64) -> Self {
        Self { start, stop, step }
    }

    pub fn validate(&self) -> CalcResult<()> {
        if !self.start.is_finite() || !self.stop.is_finite() {
            return Err(CalcError::invalid_input(
                "range",
                format!("{}..{}", self.start, self.stop),
                "Range bounds must be finite",
            ));
        }
        if !self.step.is_finite() || self.step <= 0.0 {
            return Err(CalcError::invalid_input("step", self.step.to_string(), "Step must be positive"));
        }
        if self.stop <= self.start {
            return Err(CalcError::invalid_input(
                "range",
                format!("{}..{}", self.start, self.stop),
                "Stop must be greater than start",
            ));
        }
        if self.len() > MAX_POINTS {
            return Err(CalcError::invalid_input(
                "step",
                self.step.to_string(),
                format!("Range would produce more than {} values", MAX_POINTS),
            ));
        }
        Ok(())
    }

    /// Number of values in the range
    pub fn len(&self) -> usize {
        let span = (self.stop - self.start) / self.step;
        if span.is_finite() && span > 0.0 {
            (span - 1e-9).ceil() as usize
        } else {
            0
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Values `start, start + step, ...` strictly below `stop`
    pub fn values(&self) -> Vec<f64> {
        (0..self.len()).map(|i| self.start + i as f64 * self.step).collect()
    }
}

/// Values for the series axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesValues {
    Range(SweepRange),
    Values(Vec<f64>),
}

impl SeriesValues {
    pub fn validate(&self) -> CalcResult<()> {
        match self {
            SeriesValues::Range(range) => range.validate(),
            SeriesValues::Values(values) => {
                if values.is_empty() {
                    return Err(CalcError::invalid_input("series", "[]", "Series needs at least one value"));
                }
                if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
                    return Err(CalcError::invalid_input("series", bad.to_string(), "Series values must be finite"));
                }
                Ok(())
            }
        }
    }

    pub fn values(&self) -> Vec<f64> {
        match self {
            SeriesValues::Range(range) => range.values(),
            SeriesValues::Values(values) => values.clone(),
        }
    }
}

/// The x axis of a sweep
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepAxis {
    pub parameter: Parameter,
    pub range: SweepRange,
}

/// The series axis of a sweep: one line per value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesAxis {
    pub parameter: Parameter,
    pub values: SeriesValues,
}

// ============================================================================
// Sweep Definition
// ============================================================================

/// A complete sweep: base section, axes, and the quantity to evaluate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sweep {
    pub title: String,
    pub base: BeamConfig,
    pub x: SweepAxis,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series: Option<SeriesAxis>,
    pub quantity: Quantity,
    #[serde(default)]
    pub member_type: MemberType,
    /// Replaces the x parameter's axis title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_title: Option<String>,
    /// Replaces the quantity's axis title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_title: Option<String>,
}

impl Sweep {
    pub fn new(
        title: impl Into<String>,
        base: BeamConfig,
        parameter: Parameter,
        range: SweepRange,
        quantity: Quantity,
    ) -> Self {
        Self {
            title: title.into(),
            base,
            x: SweepAxis { parameter, range },
            series: None,
            quantity,
            member_type: MemberType::default(),
            x_title: None,
            y_title: None,
        }
    }

    pub fn with_series(mut self, parameter: Parameter, values: SeriesValues) -> Self {
        self.series = Some(SeriesAxis { parameter, values });
        self
    }

    pub fn with_member_type(mut self, member_type: MemberType) -> Self {
        self.member_type = member_type;
        self
    }

    pub fn with_axis_titles(mut self, x_title: impl Into<String>, y_title: impl Into<String>) -> Self {
        self.x_title = Some(x_title.into());
        self.y_title = Some(y_title.into());
        self
    }

    /// Check the sweep definition itself (not the individual points)
    pub fn validate(&self) -> CalcResult<()> {
        self.x.range.validate()?;

        let series_count = match &self.series {
            Some(axis) => {
                axis.values.validate()?;
                if axis.parameter == self.x.parameter {
                    return Err(CalcError::invalid_input(
                        "series",
                        axis.parameter.display_name(),
                        "Series parameter must differ from the x parameter",
                    ));
                }
                axis.values.values().len()
            }
            None => 1,
        };

        let total = series_count.saturating_mul(self.x.range.len());
        if total > MAX_POINTS {
            return Err(CalcError::invalid_input(
                "sweep",
                total.to_string(),
                format!("Sweep would evaluate more than {} points", MAX_POINTS),
            ));
        }
        Ok(())
    }
}

// ============================================================================
// Results
// ============================================================================

/// One line of a sweep
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub label: String,
    /// Series parameter value, absent for a single-series sweep
    pub value: Option<f64>,
    /// `(x, y)` pairs in x order
    pub points: Vec<(f64, f64)>,
}

/// Output of [`run`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepResult {
    pub title: String,
    pub x_title: String,
    pub y_title: String,
    pub x_parameter: Parameter,
    pub series_parameter: Option<Parameter>,
    pub quantity: Quantity,
    pub member_type: MemberType,
    pub base: BeamConfig,
    pub series: Vec<Series>,
    /// Points dropped because their section was invalid
    pub skipped: usize,
}

impl SweepResult {
    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }

    /// `(min, max)` over all y values
    pub fn y_range(&self) -> Option<(f64, f64)> {
        self.series
            .iter()
            .flat_map(|s| s.points.iter().map(|p| p.1))
            .fold(None, |acc, y| match acc {
                None => Some((y, y)),
                Some((lo, hi)) => Some((lo.min(y), hi.max(y))),
            })
    }
}

/// Evaluate every point of a sweep.
pub fn run(sweep: &Sweep) -> CalcResult<SweepResult> {
    sweep.validate()?;

    let xs = sweep.x.range.values();
    let series_values: Vec<Option<f64>> = match &sweep.series {
        Some(axis) => axis.values.values().into_iter().map(Some).collect(),
        None => vec![None],
    };

    let mut series = Vec::with_capacity(series_values.len());
    let mut skipped = 0;

    for value in series_values {
        let (base, label) = match (value, &sweep.series) {
            (Some(v), Some(axis)) => (axis.parameter.apply(sweep.base, v), axis.parameter.value_label(v)),
            _ => (sweep.base, sweep.quantity.symbol().to_string()),
        };

        let mut points = Vec::with_capacity(xs.len());
        for &x in &xs {
            let config = sweep.x.parameter.apply(base, x);
            match sweep.quantity.evaluate(&config, sweep.member_type) {
                Ok(y) if y.is_finite() => points.push((x, y)),
                Ok(y) => {
                    skipped += 1;
                    debug!(x, series = %label, y, "sweep point skipped: non-finite result");
                }
                Err(e) => {
                    skipped += 1;
                    debug!(x, series = %label, error = %e, "sweep point skipped");
                }
            }
        }

        series.push(Series { label, value, points });
    }

    let result = SweepResult {
        title: sweep.title.clone(),
        x_title: sweep.x_title.clone().unwrap_or_else(|| sweep.x.parameter.axis_title()),
        y_title: sweep.y_title.clone().unwrap_or_else(|| sweep.quantity.axis_title()),
        x_parameter: sweep.x.parameter,
        series_parameter: sweep.series.as_ref().map(|s| s.parameter),
        quantity: sweep.quantity,
        member_type: sweep.member_type,
        base: sweep.base,
        series,
        skipped,
    };

    if result.point_count() == 0 {
        return Err(CalcError::calculation_failed(
            "sweep",
            format!("'{}' produced no valid points ({} skipped)", sweep.title, skipped),
        ));
    }

    info!(
        title = %sweep.title,
        series = result.series.len(),
        points = result.point_count(),
        skipped,
        "sweep complete"
    );

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::DuctilityClass;

    #[test]
    fn test_range_values_half_open() {
        let range = SweepRange::new(20.0, 80.0, 5.0);
        let values = range.values();
        assert_eq!(values.len(), 12);
        assert_eq!(values[0], 20.0);
        assert_eq!(values[11], 75.0);
    }

    #[test]
    fn test_range_fractional_step() {
        let values = SweepRange::new(0.5, 1.0, 0.2).values();
        assert_eq!(values.len(), 3);
        assert!((values[2] - 0.9).abs() < 1e-12);
    }

    #[test]
    fn test_range_validation() {
        assert!(SweepRange::new(0.0, 10.0, 0.0).validate().is_err());
        assert!(SweepRange::new(10.0, 10.0, 1.0).validate().is_err());
        assert!(SweepRange::new(0.0, f64::INFINITY, 1.0).validate().is_err());
        assert!(SweepRange::new(0.0, 1.0e9, 1.0).validate().is_err());
        assert!(SweepRange::new(60.0, 750.0, 10.0).validate().is_ok());
    }

    #[test]
    fn test_parameter_apply() {
        let base = BeamConfig::default();
        assert_eq!(Parameter::Cover.apply(base, 40.0).cover_mm, 40.0);
        assert_eq!(Parameter::EffectiveDepth.apply(base, 150.0).effective_depth_mm(), 150.0);
        let all = [
            Parameter::Depth,
            Parameter::Width,
            Parameter::Cover,
            Parameter::Fc,
            Parameter::BarDiameter,
            Parameter::BarSpacing,
            Parameter::Fsy,
            Parameter::EffectiveDepth,
        ];
        for p in all {
            assert_eq!(p.value_in(&p.apply(base, 123.0)), 123.0, "{:?}", p);
        }
    }

    #[test]
    fn test_value_labels() {
        assert_eq!(Parameter::Cover.value_label(20.0), "cover = 20 mm");
        assert_eq!(Parameter::BarDiameter.value_label(7.6), "db = 7.6 mm");
        assert_eq!(Parameter::Fc.value_label(32.0), "f'c = 32 MPa");
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("bar-spacing".parse::<Parameter>().unwrap(), Parameter::BarSpacing);
        assert_eq!("FC".parse::<Parameter>().unwrap(), Parameter::Fc);
        assert!("span".parse::<Parameter>().is_err());
        assert_eq!("deemed".parse::<Quantity>().unwrap(), Quantity::MinimumSteel);
        assert!("torsion".parse::<Quantity>().is_err());
    }

    #[test]
    fn test_single_series_sweep() {
        let sweep = Sweep::new(
            "Depth",
            BeamConfig::default(),
            Parameter::Depth,
            SweepRange::new(150.0, 250.0, 50.0),
            Quantity::EffectiveDepth,
        );
        let result = run(&sweep).unwrap();
        assert_eq!(result.series.len(), 1);
        assert_eq!(result.series[0].label, "d");
        assert_eq!(result.series[0].value, None);
        let xs: Vec<f64> = result.series[0].points.iter().map(|p| p.0).collect();
        assert_eq!(xs, vec![150.0, 200.0]);
        assert!((result.series[0].points[1].1 - 176.2).abs() < 1e-9);
        assert_eq!(result.skipped, 0);
        assert_eq!(result.x_title, "Overall depth D (mm)");
        assert_eq!(result.y_title, "Effective depth d (mm)");
    }

    #[test]
    fn test_axis_title_overrides() {
        let sweep = Sweep::new(
            "Depth",
            BeamConfig::default(),
            Parameter::Depth,
            SweepRange::new(150.0, 250.0, 50.0),
            Quantity::EffectiveDepth,
        )
        .with_axis_titles("Depth, D (mm)", "d (mm)");
        let result = run(&sweep).unwrap();
        assert_eq!(result.x_title, "Depth, D (mm)");
        assert_eq!(result.y_title, "d (mm)");

        let json = serde_json::to_string(&Sweep { x_title: None, y_title: None, ..sweep }).unwrap();
        assert!(!json.contains("x_title"));
    }

    #[test]
    fn test_invalid_points_skipped() {
        // Cover 20..80 against D 60..100: shallow sections with deep cover have no d
        let base = BeamConfig::default().with_ductility(DuctilityClass::N).with_bar_diameter(10.0);
        let sweep = Sweep::new("Deemed", base, Parameter::Depth, SweepRange::new(60.0, 100.0, 10.0), Quantity::MinimumSteel)
            .with_series(Parameter::Cover, SeriesValues::Range(SweepRange::new(20.0, 80.0, 5.0)));
        let result = run(&sweep).unwrap();

        assert_eq!(result.series.len(), 12);
        assert_eq!(result.series[0].label, "cover = 20 mm");
        // cover 20 keeps every depth (d = D - 25 > 0)
        assert_eq!(result.series[0].points.len(), 4);
        // cover 75: only D = 90 leaves a positive d
        assert_eq!(result.series[11].points, vec![(90.0, result.series[11].points[0].1)]);
        assert!(result.skipped > 0);
        assert_eq!(result.point_count() + result.skipped, 12 * 4);
    }

    #[test]
    fn test_all_points_invalid_errors() {
        let sweep = Sweep::new(
            "Bad",
            BeamConfig::default(),
            Parameter::Fc,
            SweepRange::new(1.0, 10.0, 1.0),
            Quantity::BendingCapacity,
        );
        let err = run(&sweep).unwrap_err();
        assert_eq!(err.error_code(), "CALCULATION_FAILED");
    }

    #[test]
    fn test_same_parameter_rejected() {
        let sweep = Sweep::new(
            "Bad",
            BeamConfig::default(),
            Parameter::Depth,
            SweepRange::new(150.0, 300.0, 50.0),
            Quantity::BendingCapacity,
        )
        .with_series(Parameter::Depth, SeriesValues::Values(vec![200.0]));
        assert!(sweep.validate().is_err());
    }

    #[test]
    fn test_empty_series_values_rejected() {
        let values = SeriesValues::Values(vec![]);
        assert!(values.validate().is_err());
        assert!(SeriesValues::Values(vec![f64::NAN]).validate().is_err());
    }

    #[test]
    fn test_member_type_affects_minimum_steel() {
        let base = BeamConfig::default();
        let range = SweepRange::new(200.0, 210.0, 10.0);
        let beam = run(&Sweep::new("a", base, Parameter::Depth, range, Quantity::MinimumSteel)).unwrap();
        let flat = run(
            &Sweep::new("b", base, Parameter::Depth, range, Quantity::MinimumSteel).with_member_type(MemberType::FlatSlab),
        )
        .unwrap();
        let ratio = flat.series[0].points[0].1 / beam.series[0].points[0].1;
        assert!((ratio - 1.2).abs() < 1e-9);
    }

    #[test]
    fn test_y_range() {
        let sweep = Sweep::new(
            "Depth",
            BeamConfig::default(),
            Parameter::Depth,
            SweepRange::new(150.0, 250.0, 50.0),
            Quantity::EffectiveDepth,
        );
        let (lo, hi) = run(&sweep).unwrap().y_range().unwrap();
        assert!((lo - 126.2).abs() < 1e-9);
        assert!((hi - 176.2).abs() < 1e-9);
    }

    #[test]
    fn test_sweep_serialization() {
        let sweep = Sweep::new(
            "Shear",
            BeamConfig::default(),
            Parameter::Depth,
            SweepRange::new(150.0, 300.0, 50.0),
            Quantity::ShearCapacity,
        )
        .with_series(Parameter::Fc, SeriesValues::Values(vec![25.0, 32.0]));
        let json = serde_json::to_string(&sweep).unwrap();
        assert!(json.contains("\"parameter\":\"fc\""));
        assert!(json.contains("\"values\":{\"values\":[25.0,32.0]}"));
        let back: Sweep = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sweep);
    }
}
