//! # Study Files
//!
//! A `Study` is the root container for a set of charts over one base
//! section. Studies serialize to `.ccs` files as human-readable JSON.
//!
//! ## Structure
//!
//! ```text
//! Study
//! ├── meta: StudyMetadata (version, engineer, job info, timestamps)
//! ├── base: BeamConfig (shared by every chart)
//! └── charts: Vec<ChartDefinition> (one sweep each, keyed by UUID)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use conc_core::study::Study;
//!
//! let study = Study::template("Jane Engineer", "25-042", "Slab sizing");
//! let json = serde_json::to_string_pretty(&study).unwrap();
//! assert!(json.contains("deemed"));
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculations::MemberType;
use crate::errors::{CalcError, CalcResult};
use crate::materials::DuctilityClass;
use crate::section::BeamConfig;
use crate::sweep::{Parameter, Quantity, SeriesAxis, SeriesValues, Sweep, SweepAxis, SweepRange};

/// Current schema version for .ccs files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Study file extension
pub const STUDY_EXTENSION: &str = "ccs";

/// Root study container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Study {
    pub meta: StudyMetadata,

    /// Section every chart starts from
    #[serde(default)]
    pub base: BeamConfig,

    /// Charts in output order
    #[serde(default)]
    pub charts: Vec<ChartDefinition>,
}

impl Study {
    /// Create a new study with no charts.
    ///
    /// ```rust
    /// use conc_core::study::Study;
    ///
    /// let study = Study::new("John Doe", "25-001", "Carpark slab");
    /// assert_eq!(study.meta.engineer, "John Doe");
    /// assert!(study.charts.is_empty());
    /// ```
    pub fn new(engineer: impl Into<String>, job_id: impl Into<String>, title: impl Into<String>) -> Self {
        let now = Utc::now();
        Study {
            meta: StudyMetadata {
                version: SCHEMA_VERSION.to_string(),
                engineer: engineer.into(),
                job_id: job_id.into(),
                title: title.into(),
                created: now,
                modified: now,
            },
            base: BeamConfig::default(),
            charts: Vec::new(),
        }
    }

    /// Starter study: the deemed-to-comply chart plus a moment chart.
    pub fn template(engineer: impl Into<String>, job_id: impl Into<String>, title: impl Into<String>) -> Self {
        let mut study = Study::new(engineer, job_id, title);
        study.base = BeamConfig::default()
            .with_ductility(DuctilityClass::N)
            .with_bar_diameter(10.0);

        study.add_chart(
            ChartDefinition::new(
                "Minimum steel (deemed)",
                Parameter::Depth,
                SweepRange::new(60.0, 750.0, 10.0),
                Quantity::MinimumSteel,
            )
            .with_series(Parameter::Cover, SeriesValues::Range(SweepRange::new(20.0, 80.0, 5.0))),
        );
        study.add_chart(
            ChartDefinition::new(
                "Moment capacity vs spacing",
                Parameter::BarSpacing,
                SweepRange::new(50.0, 310.0, 10.0),
                Quantity::BendingCapacity,
            )
            .with_series(Parameter::Depth, SeriesValues::Values(vec![150.0, 200.0, 250.0])),
        );
        study
    }

    /// Add a chart, returning its id
    pub fn add_chart(&mut self, chart: ChartDefinition) -> Uuid {
        let id = chart.id;
        self.charts.push(chart);
        self.touch();
        id
    }

    pub fn chart_count(&self) -> usize {
        self.charts.len()
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    /// Every chart as a runnable sweep over the base section
    pub fn sweeps(&self) -> Vec<(&ChartDefinition, Sweep)> {
        self.charts.iter().map(|c| (c, c.to_sweep(&self.base))).collect()
    }

    /// Check every chart definition
    pub fn validate(&self) -> CalcResult<()> {
        for (chart, sweep) in self.sweeps() {
            sweep.validate().map_err(|e| match e {
                CalcError::InvalidInput { field, value, reason } => CalcError::InvalidInput {
                    field: format!("charts[{}].{}", chart.title, field),
                    value,
                    reason,
                },
                other => other,
            })?;
        }
        Ok(())
    }

    /// File stems for every chart, made unique by suffixing duplicates
    pub fn output_stems(&self) -> Vec<String> {
        let mut stems: Vec<String> = Vec::with_capacity(self.charts.len());
        for chart in &self.charts {
            let base = chart.file_stem();
            let mut stem = base.clone();
            let mut n = 2;
            while stems.contains(&stem) {
                stem = format!("{}-{}", base, n);
                n += 1;
            }
            stems.push(stem);
        }
        stems
    }
}

impl Default for Study {
    fn default() -> Self {
        Study::new("", "", "")
    }
}

/// Study metadata stored in the file header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,
    pub engineer: String,
    pub job_id: String,
    pub title: String,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

/// One chart in a study: a sweep minus the base section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDefinition {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub title: String,
    pub x: SweepAxis,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series: Option<SeriesAxis>,
    pub quantity: Quantity,
    #[serde(default)]
    pub member_type: MemberType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_title: Option<String>,
}

impl ChartDefinition {
    pub fn new(title: impl Into<String>, parameter: Parameter, range: SweepRange, quantity: Quantity) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
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

    pub fn to_sweep(&self, base: &BeamConfig) -> Sweep {
        Sweep {
            title: self.title.clone(),
            base: *base,
            x: self.x,
            series: self.series.clone(),
            quantity: self.quantity,
            member_type: self.member_type,
            x_title: self.x_title.clone(),
            y_title: self.y_title.clone(),
        }
    }

    /// Lowercase slug of the title, or the short id when the title has no letters
    pub fn file_stem(&self) -> String {
        let mut slug = String::new();
        for c in self.title.chars() {
            if c.is_ascii_alphanumeric() {
                slug.push(c.to_ascii_lowercase());
            } else if !slug.is_empty() && !slug.ends_with('_') {
                slug.push('_');
            }
        }
        let slug = slug.trim_end_matches('_').to_string();
        if slug.is_empty() {
            format!("chart_{}", &self.id.simple().to_string()[..8])
        } else {
            slug
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_study_creation() {
        let study = Study::new("John Doe", "25-001", "Carpark");
        assert_eq!(study.meta.job_id, "25-001");
        assert_eq!(study.meta.version, SCHEMA_VERSION);
        assert_eq!(study.base, BeamConfig::default());
    }

    #[test]
    fn test_template_is_valid() {
        let study = Study::template("E", "J", "T");
        assert_eq!(study.chart_count(), 2);
        assert!(study.validate().is_ok());
        assert_eq!(study.output_stems(), vec!["minimum_steel_deemed", "moment_capacity_vs_spacing"]);
    }

    #[test]
    fn test_add_chart() {
        let mut study = Study::new("E", "J", "T");
        let before = study.meta.modified;
        let id = study.add_chart(ChartDefinition::new(
            "d",
            Parameter::Depth,
            SweepRange::new(100.0, 200.0, 10.0),
            Quantity::EffectiveDepth,
        ));
        assert_eq!(study.chart_count(), 1);
        assert_eq!(study.charts[0].id, id);
        assert!(study.meta.modified >= before);
    }

    #[test]
    fn test_validate_names_chart() {
        let mut study = Study::new("E", "J", "T");
        study.add_chart(ChartDefinition::new(
            "Broken",
            Parameter::Depth,
            SweepRange::new(100.0, 50.0, 10.0),
            Quantity::BendingCapacity,
        ));
        match study.validate() {
            Err(CalcError::InvalidInput { field, .. }) => assert!(field.starts_with("charts[Broken]")),
            other => panic!("expected invalid input, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_stems_suffixed() {
        let mut study = Study::new("E", "J", "T");
        for _ in 0..3 {
            study.add_chart(ChartDefinition::new(
                "Shear / depth",
                Parameter::Depth,
                SweepRange::new(100.0, 200.0, 10.0),
                Quantity::ShearCapacity,
            ));
        }
        assert_eq!(study.output_stems(), vec!["shear_depth", "shear_depth-2", "shear_depth-3"]);
    }

    #[test]
    fn test_untitled_chart_stem_uses_id() {
        let chart = ChartDefinition::new("φ", Parameter::Depth, SweepRange::new(1.0, 2.0, 1.0), Quantity::ShearCapacity);
        assert!(chart.file_stem().starts_with("chart_"));
        assert_eq!(chart.file_stem().len(), "chart_".len() + 8);
    }

    #[test]
    fn test_study_serialization_roundtrip() {
        let study = Study::template("Jane Engineer", "25-042", "Slab");
        let json = serde_json::to_string_pretty(&study).unwrap();
        assert!(json.contains("Jane Engineer"));
        assert!(json.contains("\"quantity\": \"minimum_steel\""));

        let roundtrip: Study = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, study);
    }

    #[test]
    fn test_minimal_study_json_defaults() {
        let json = r#"{
            "meta": {
                "version": "0.1.0",
                "engineer": "E",
                "job_id": "J",
                "title": "T",
                "created": "2025-01-01T00:00:00Z",
                "modified": "2025-01-01T00:00:00Z"
            },
            "base": { "depth_mm": 250.0 },
            "charts": [{
                "title": "Moment",
                "x": { "parameter": "bar_spacing", "range": { "start": 100.0, "stop": 300.0, "step": 50.0 } },
                "quantity": "bending_capacity"
            }]
        }"#;
        let study: Study = serde_json::from_str(json).unwrap();
        assert_eq!(study.base.depth_mm, 250.0);
        assert_eq!(study.base.cover_mm, 20.0);
        assert_eq!(study.charts[0].member_type, MemberType::OneWaySlabOrBeam);
        assert_eq!(study.charts[0].x_title, None);
        assert!(study.validate().is_ok());
    }

    #[test]
    fn test_chart_axis_titles_reach_sweep() {
        let mut chart = ChartDefinition::new(
            "Ast",
            Parameter::Depth,
            SweepRange::new(100.0, 200.0, 10.0),
            Quantity::MinimumSteel,
        );
        chart.y_title = Some("Min Ast (mm2/m)".to_string());
        let sweep = chart.to_sweep(&BeamConfig::default());
        assert_eq!(sweep.y_title.as_deref(), Some("Min Ast (mm2/m)"));
        assert_eq!(sweep.x_title, None);
    }
}
