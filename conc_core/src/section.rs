//! # Beam Configuration
//!
//! `BeamConfig` is the single input record for every check: geometry and
//! material scalars for a rectangular reinforced concrete section with one
//! layer of tension bars at uniform spacing.
//!
//! Defaults describe a 200 mm slab strip, 1 m wide, with SL82-sized wire at
//! 100 mm centres in N32 concrete:
//!
//! | field | default |
//! |---|---|
//! | `depth_mm` | 200 |
//! | `width_mm` | 1000 |
//! | `cover_mm` | 20 |
//! | `fc_mpa` | 32 |
//! | `bar_diameter_mm` | 7.6 |
//! | `bar_spacing_mm` | 100 |
//! | `ductility` | L |
//! | `fsy_mpa` | 500 |
//! | `effective_depth_mm` | derived |
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "depth_mm": 250.0,
//!   "width_mm": 1000.0,
//!   "cover_mm": 30.0,
//!   "fc_mpa": 40.0,
//!   "bar_diameter_mm": 12.0,
//!   "bar_spacing_mm": 200.0,
//!   "ductility": "N",
//!   "fsy_mpa": 500.0
//! }
//! ```
//!
//! Any omitted field takes its default. `effective_depth_mm` overrides the
//! derived `D - cover - db/2` when present and non-zero; `0` means "derive".

use serde::{Deserialize, Serialize};

use crate::equations::as3600;
use crate::errors::{CalcError, CalcResult};
use crate::materials::concrete::{FC_MAX_MPA, FC_MIN_MPA};
use crate::materials::{BarDesignation, ConcreteGrade, DuctilityClass};

/// Geometry and material input for a rectangular RC section.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BeamConfig {
    /// Overall depth D (mm)
    pub depth_mm: f64,

    /// Section width b (mm). 1000 for a one-metre slab strip.
    pub width_mm: f64,

    /// Clear cover to the tension bars (mm)
    pub cover_mm: f64,

    /// Characteristic concrete strength f'c (MPa)
    pub fc_mpa: f64,

    /// Tension bar diameter db (mm)
    pub bar_diameter_mm: f64,

    /// Centre-to-centre bar spacing (mm)
    pub bar_spacing_mm: f64,

    /// Reinforcement ductility class
    pub ductility: DuctilityClass,

    /// Reinforcement yield strength fsy (MPa)
    pub fsy_mpa: f64,

    /// Explicit effective depth d (mm), replacing the derived value. Zero
    /// counts as not given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_depth_mm: Option<f64>,
}

impl Default for BeamConfig {
    fn default() -> Self {
        BeamConfig {
            depth_mm: 200.0,
            width_mm: 1000.0,
            cover_mm: 20.0,
            fc_mpa: 32.0,
            bar_diameter_mm: 7.6,
            bar_spacing_mm: 100.0,
            ductility: DuctilityClass::L,
            fsy_mpa: 500.0,
            effective_depth_mm: None,
        }
    }
}

impl BeamConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_depth(mut self, depth_mm: f64) -> Self {
        self.depth_mm = depth_mm;
        self
    }

    pub fn with_width(mut self, width_mm: f64) -> Self {
        self.width_mm = width_mm;
        self
    }

    pub fn with_cover(mut self, cover_mm: f64) -> Self {
        self.cover_mm = cover_mm;
        self
    }

    pub fn with_fc(mut self, fc_mpa: f64) -> Self {
        self.fc_mpa = fc_mpa;
        self
    }

    pub fn with_bar_diameter(mut self, bar_diameter_mm: f64) -> Self {
        self.bar_diameter_mm = bar_diameter_mm;
        self
    }

    pub fn with_bar_spacing(mut self, bar_spacing_mm: f64) -> Self {
        self.bar_spacing_mm = bar_spacing_mm;
        self
    }

    pub fn with_ductility(mut self, ductility: DuctilityClass) -> Self {
        self.ductility = ductility;
        self
    }

    pub fn with_fsy(mut self, fsy_mpa: f64) -> Self {
        self.fsy_mpa = fsy_mpa;
        self
    }

    /// Set (or clear) the effective depth override
    pub fn with_effective_depth(mut self, effective_depth_mm: Option<f64>) -> Self {
        self.effective_depth_mm = effective_depth_mm;
        self
    }

    /// Use a standard concrete grade: sets f'c
    pub fn with_grade(self, grade: ConcreteGrade) -> Self {
        self.with_fc(grade.fc_mpa())
    }

    /// Use a standard bar: sets both diameter and ductility class
    pub fn with_bar(self, bar: BarDesignation) -> Self {
        self.with_bar_diameter(bar.diameter_mm())
            .with_ductility(bar.ductility())
    }

    // === Derived quantities ===

    /// Effective depth d (mm): the override if set, else D - cover - db/2
    pub fn effective_depth_mm(&self) -> f64 {
        self.effective_depth_override().unwrap_or_else(|| {
            as3600::effective_depth(self.depth_mm, self.cover_mm, self.bar_diameter_mm)
        })
    }

    /// Whether d was supplied rather than derived
    pub fn has_effective_depth_override(&self) -> bool {
        self.effective_depth_override().is_some()
    }

    fn effective_depth_override(&self) -> Option<f64> {
        self.effective_depth_mm.filter(|d| *d != 0.0)
    }

    /// Single bar area (mm², truncated)
    pub fn bar_area_mm2(&self) -> f64 {
        as3600::bar_area(self.bar_diameter_mm)
    }

    /// Tension steel area Ast across the section width (mm²)
    pub fn steel_area_mm2(&self) -> f64 {
        as3600::steel_area_per_width(self.bar_area_mm2(), self.width_mm, self.bar_spacing_mm)
    }

    pub fn alpha2(&self) -> f64 {
        as3600::stress_block_alpha2(self.fc_mpa)
    }

    pub fn gamma(&self) -> f64 {
        as3600::stress_block_gamma(self.fc_mpa)
    }

    /// Characteristic flexural tensile strength f'ct.f (MPa)
    pub fn flexural_tensile_strength_mpa(&self) -> f64 {
        as3600::flexural_tensile_strength(self.fc_mpa)
    }

    /// Validate input parameters.
    ///
    /// Every scalar must be finite. Geometry and strengths must be positive
    /// (cover may be zero), f'c must lie within the AS3600 range, and the
    /// effective depth must fall inside the section.
    pub fn validate(&self) -> CalcResult<()> {
        positive("depth_mm", self.depth_mm, "Depth must be positive")?;
        positive("width_mm", self.width_mm, "Width must be positive")?;
        positive("bar_diameter_mm", self.bar_diameter_mm, "Bar diameter must be positive")?;
        positive("bar_spacing_mm", self.bar_spacing_mm, "Bar spacing must be positive")?;
        positive("fsy_mpa", self.fsy_mpa, "Yield strength must be positive")?;

        if !self.cover_mm.is_finite() || self.cover_mm < 0.0 {
            return Err(CalcError::invalid_input(
                "cover_mm",
                self.cover_mm.to_string(),
                "Cover must be zero or positive",
            ));
        }

        if !self.fc_mpa.is_finite() || self.fc_mpa < FC_MIN_MPA || self.fc_mpa > FC_MAX_MPA {
            return Err(CalcError::invalid_input(
                "fc_mpa",
                self.fc_mpa.to_string(),
                format!("f'c must be between {} and {} MPa", FC_MIN_MPA, FC_MAX_MPA),
            ));
        }

        let d = self.effective_depth_mm();
        if !d.is_finite() || d <= 0.0 {
            let reason = if self.has_effective_depth_override() {
                "Effective depth must be positive".to_string()
            } else {
                format!(
                    "Cover ({}) plus half bar diameter ({}) leaves no effective depth in a {} mm section",
                    self.cover_mm,
                    self.bar_diameter_mm / 2.0,
                    self.depth_mm
                )
            };
            return Err(CalcError::invalid_input("effective_depth_mm", d.to_string(), reason));
        }
        if d > self.depth_mm {
            return Err(CalcError::invalid_input(
                "effective_depth_mm",
                d.to_string(),
                "Effective depth cannot exceed overall depth",
            ));
        }

        Ok(())
    }

    /// One-line description for logs and chart footers
    pub fn describe(&self) -> String {
        format!(
            "D={} b={} cover={} f'c={} db={}@{} class {} fsy={}",
            self.depth_mm,
            self.width_mm,
            self.cover_mm,
            self.fc_mpa,
            self.bar_diameter_mm,
            self.bar_spacing_mm,
            self.ductility,
            self.fsy_mpa
        )
    }
}

fn positive(field: &str, value: f64, reason: &str) -> CalcResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(CalcError::invalid_input(field, value.to_string(), reason));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BeamConfig::default();
        assert_eq!(config.depth_mm, 200.0);
        assert_eq!(config.width_mm, 1000.0);
        assert_eq!(config.cover_mm, 20.0);
        assert_eq!(config.fc_mpa, 32.0);
        assert_eq!(config.bar_diameter_mm, 7.6);
        assert_eq!(config.bar_spacing_mm, 100.0);
        assert_eq!(config.ductility, DuctilityClass::L);
        assert_eq!(config.fsy_mpa, 500.0);
        assert!(config.effective_depth_mm.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_derived_effective_depth() {
        let config = BeamConfig::default();
        assert!((config.effective_depth_mm() - 176.2).abs() < 1e-9);
    }

    #[test]
    fn test_effective_depth_override() {
        let config = BeamConfig::default().with_effective_depth(Some(150.0));
        assert_eq!(config.effective_depth_mm(), 150.0);
        assert!(config.has_effective_depth_override());
    }

    #[test]
    fn test_zero_override_derives_depth() {
        let config = BeamConfig::default().with_effective_depth(Some(0.0));
        assert!(!config.has_effective_depth_override());
        assert!((config.effective_depth_mm() - 176.2).abs() < 1e-9);
        assert!(config.validate().is_ok());

        let from_json: BeamConfig = serde_json::from_str(r#"{ "effective_depth_mm": 0.0 }"#).unwrap();
        assert!((from_json.effective_depth_mm() - 176.2).abs() < 1e-9);
    }

    #[test]
    fn test_negative_override_rejected() {
        let err = BeamConfig::default().with_effective_depth(Some(-5.0)).validate().unwrap_err();
        match err {
            CalcError::InvalidInput { field, .. } => assert_eq!(field, "effective_depth_mm"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_steel_area() {
        let config = BeamConfig::default();
        assert_eq!(config.bar_area_mm2(), 45.0);
        assert!((config.steel_area_mm2() - 450.0).abs() < 1e-9);
    }

    #[test]
    fn test_with_bar() {
        let config = BeamConfig::default().with_bar(BarDesignation::N12);
        assert_eq!(config.bar_diameter_mm, 12.0);
        assert_eq!(config.ductility, DuctilityClass::N);
    }

    #[test]
    fn test_with_grade() {
        let config = BeamConfig::default().with_grade(ConcreteGrade::N40);
        assert_eq!(config.fc_mpa, 40.0);
    }

    #[test]
    fn test_negative_depth_rejected() {
        let err = BeamConfig::default().with_depth(-10.0).validate().unwrap_err();
        match err {
            CalcError::InvalidInput { field, .. } => assert_eq!(field, "depth_mm"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_cover_consuming_section_rejected() {
        // d = 60 - 75 - 5 < 0
        let err = BeamConfig::default()
            .with_depth(60.0)
            .with_cover(75.0)
            .with_bar_diameter(10.0)
            .validate()
            .unwrap_err();
        match err {
            CalcError::InvalidInput { field, .. } => assert_eq!(field, "effective_depth_mm"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_zero_cover_allowed() {
        assert!(BeamConfig::default().with_cover(0.0).validate().is_ok());
    }

    #[test]
    fn test_fc_range() {
        assert!(BeamConfig::default().with_fc(15.0).validate().is_err());
        assert!(BeamConfig::default().with_fc(120.0).validate().is_err());
        assert!(BeamConfig::default().with_fc(100.0).validate().is_ok());
    }

    #[test]
    fn test_override_deeper_than_section_rejected() {
        let config = BeamConfig::default().with_effective_depth(Some(250.0));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_nan_rejected() {
        assert!(BeamConfig::default().with_fsy(f64::NAN).validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: BeamConfig = serde_json::from_str(r#"{ "depth_mm": 300.0, "ductility": "N" }"#).unwrap();
        assert_eq!(config.depth_mm, 300.0);
        assert_eq!(config.ductility, DuctilityClass::N);
        assert_eq!(config.cover_mm, 20.0);
        assert!(config.effective_depth_mm.is_none());
    }

    #[test]
    fn test_lowercase_ductility_in_json() {
        let config: BeamConfig = serde_json::from_str(r#"{ "ductility": "n" }"#).unwrap();
        assert_eq!(config.ductility, DuctilityClass::N);
        assert!(serde_json::from_str::<BeamConfig>(r#"{ "ductility": "x" }"#).is_err());
    }

    #[test]
    fn test_override_not_serialized_when_absent() {
        let json = serde_json::to_string(&BeamConfig::default()).unwrap();
        assert!(!json.contains("effective_depth_mm"));
    }
}
