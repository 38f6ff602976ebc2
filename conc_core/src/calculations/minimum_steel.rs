//! # Minimum Reinforcement (Deemed to Comply)
//!
//! Minimum tension reinforcement for strength and crack control per AS3600
//! Cl 8.1.6.1 (beams) and Cl 9.1.1 (slabs). Providing at least this area
//! satisfies the minimum bending strength requirement without calculating
//! the cracking moment.
//!
//! ## Member Factors
//!
//! | member | f |
//! |---|---|
//! | Two-way slab supported by beams or walls | 0.19 |
//! | One-way slab or beam | 0.20 |
//! | Flat slab supported by columns | 0.24 |
//!
//! ## Example
//!
//! ```rust
//! use conc_core::calculations::minimum_steel::{calculate, MemberType, MinimumSteelInput};
//! use conc_core::section::BeamConfig;
//!
//! let input = MinimumSteelInput::new(BeamConfig::default(), MemberType::OneWaySlabOrBeam);
//! let result = calculate(&input).unwrap();
//! assert!((result.min_steel_mm2 - 308.2).abs() < 0.1);
//! assert!(result.satisfies_minimum);
//! ```

use serde::{Deserialize, Serialize};

use crate::equations::as3600;
use crate::errors::{CalcError, CalcResult};
use crate::section::BeamConfig;

/// Member type, which sets the deemed-to-comply factor f
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MemberType {
    /// Two-way slab supported on beams or walls (f = 0.19)
    TwoWaySlab,
    /// One-way slab or beam (f = 0.20)
    #[default]
    OneWaySlabOrBeam,
    /// Flat slab supported by columns (f = 0.24)
    FlatSlab,
    /// Explicit factor
    Custom(f64),
}

impl MemberType {
    pub fn factor(&self) -> f64 {
        match self {
            MemberType::TwoWaySlab => 0.19,
            MemberType::OneWaySlabOrBeam => 0.20,
            MemberType::FlatSlab => 0.24,
            MemberType::Custom(f) => *f,
        }
    }

    pub fn display_name(&self) -> String {
        match self {
            MemberType::TwoWaySlab => "Two-way slab".to_string(),
            MemberType::OneWaySlabOrBeam => "One-way slab / beam".to_string(),
            MemberType::FlatSlab => "Flat slab".to_string(),
            MemberType::Custom(f) => format!("Custom (f = {})", f),
        }
    }

    /// Parse a CLI-style name (`two-way`, `one-way`, `beam`, `flat`) or a bare factor
    pub fn parse(s: &str) -> CalcResult<Self> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "two-way" | "two-way-slab" => Ok(MemberType::TwoWaySlab),
            "one-way" | "one-way-slab" | "beam" => Ok(MemberType::OneWaySlabOrBeam),
            "flat" | "flat-slab" => Ok(MemberType::FlatSlab),
            other => other
                .parse::<f64>()
                .ok()
                .filter(|f| f.is_finite() && *f > 0.0)
                .map(MemberType::Custom)
                .ok_or_else(|| {
                    CalcError::invalid_input(
                        "member_type",
                        s,
                        "Expected two-way, one-way, beam, flat or a positive factor",
                    )
                }),
        }
    }
}

impl std::fmt::Display for MemberType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Input for the minimum reinforcement check
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MinimumSteelInput {
    pub config: BeamConfig,
    #[serde(default)]
    pub member_type: MemberType,
}

impl MinimumSteelInput {
    pub fn new(config: BeamConfig, member_type: MemberType) -> Self {
        Self { config, member_type }
    }
}

/// Results from the minimum reinforcement check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MinimumSteelResult {
    /// Member factor f
    pub factor: f64,

    /// Flexural tensile strength f'ct.f (MPa)
    pub fctf_mpa: f64,

    /// Effective depth d (mm)
    pub effective_depth_mm: f64,

    /// Required minimum area Ast.min (mm² across the section width)
    pub min_steel_mm2: f64,

    /// Provided area Ast (mm² across the section width)
    pub provided_steel_mm2: f64,

    /// Provided ≥ required
    pub satisfies_minimum: bool,
}

impl MinimumSteelResult {
    /// Provided / required; ≥ 1.0 passes
    pub fn ratio(&self) -> f64 {
        self.provided_steel_mm2 / self.min_steel_mm2
    }
}

/// Calculate the deemed-to-comply minimum tension reinforcement.
pub fn calculate(input: &MinimumSteelInput) -> CalcResult<MinimumSteelResult> {
    let config = &input.config;
    config.validate()?;

    let factor = input.member_type.factor();
    if !factor.is_finite() || factor <= 0.0 {
        return Err(CalcError::invalid_input(
            "member_type",
            factor.to_string(),
            "Member factor must be positive",
        ));
    }

    let d = config.effective_depth_mm();
    let fctf = config.flexural_tensile_strength_mpa();
    let min_steel = as3600::minimum_steel_area(config.width_mm, d, config.depth_mm, factor, fctf, config.fsy_mpa);
    let provided = config.steel_area_mm2();

    Ok(MinimumSteelResult {
        factor,
        fctf_mpa: fctf,
        effective_depth_mm: d,
        min_steel_mm2: min_steel,
        provided_steel_mm2: provided,
        satisfies_minimum: provided >= min_steel,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_factors() {
        assert_eq!(MemberType::TwoWaySlab.factor(), 0.19);
        assert_eq!(MemberType::OneWaySlabOrBeam.factor(), 0.20);
        assert_eq!(MemberType::FlatSlab.factor(), 0.24);
        assert_eq!(MemberType::Custom(0.3).factor(), 0.3);
        assert_eq!(MemberType::default(), MemberType::OneWaySlabOrBeam);
    }

    #[test]
    fn test_parse_member_type() {
        assert_eq!(MemberType::parse("flat").unwrap(), MemberType::FlatSlab);
        assert_eq!(MemberType::parse("Two_Way").unwrap(), MemberType::TwoWaySlab);
        assert_eq!(MemberType::parse("beam").unwrap(), MemberType::OneWaySlabOrBeam);
        assert_eq!(MemberType::parse("0.22").unwrap(), MemberType::Custom(0.22));
        assert!(MemberType::parse("-1").is_err());
        assert!(MemberType::parse("wall").is_err());
    }

    #[test]
    fn test_default_section() {
        let input = MinimumSteelInput::new(BeamConfig::default(), MemberType::OneWaySlabOrBeam);
        let result = calculate(&input).unwrap();
        assert!((result.min_steel_mm2 - 308.2055).abs() < 1e-3);
        assert!((result.provided_steel_mm2 - 450.0).abs() < 1e-9);
        assert!(result.satisfies_minimum);
        assert!(result.ratio() > 1.0);
    }

    #[test]
    fn test_flat_slab_factor() {
        // D=300, N40, N12 @ 150: Ast.min = 598.29 for f = 0.24
        let config = BeamConfig::default()
            .with_depth(300.0)
            .with_fc(40.0)
            .with_bar_diameter(12.0)
            .with_bar_spacing(150.0);
        let one_way = calculate(&MinimumSteelInput::new(config, MemberType::OneWaySlabOrBeam)).unwrap();
        let flat = calculate(&MinimumSteelInput::new(config, MemberType::FlatSlab)).unwrap();
        assert!((one_way.min_steel_mm2 - 498.5781).abs() < 1e-3);
        assert!((flat.min_steel_mm2 - 598.2937).abs() < 1e-3);
        // 753 mm² provided passes both
        assert!(flat.satisfies_minimum);
    }

    #[test]
    fn test_light_mesh_fails_minimum() {
        let config = BeamConfig::default().with_bar_spacing(200.0);
        let result = calculate(&MinimumSteelInput::new(config, MemberType::OneWaySlabOrBeam)).unwrap();
        assert!((result.provided_steel_mm2 - 225.0).abs() < 1e-9);
        assert!(!result.satisfies_minimum);
    }

    #[test]
    fn test_custom_factor_rejected_when_nonpositive() {
        let input = MinimumSteelInput::new(BeamConfig::default(), MemberType::Custom(0.0));
        assert!(calculate(&input).is_err());
    }

    #[test]
    fn test_member_type_serialization() {
        let json = serde_json::to_string(&MemberType::FlatSlab).unwrap();
        assert_eq!(json, "\"flat_slab\"");
        let custom: MemberType = serde_json::from_str(r#"{"custom":0.21}"#).unwrap();
        assert_eq!(custom, MemberType::Custom(0.21));
    }
}
