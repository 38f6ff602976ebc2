//! # Bending Capacity
//!
//! Design moment capacity φMuo of a singly reinforced rectangular section
//! per AS3600 Section 8.1, using the rectangular stress block and assuming
//! the tension steel yields.
//!
//! ## Assumptions
//!
//! - Single layer of tension reinforcement, no compression steel
//! - Steel at yield (check `ku_exceeds_limit` for sections where this is doubtful)
//! - Capacity reduction factor per ductility class
//!
//! ## Example
//!
//! ```rust
//! use conc_core::calculations::bending::calculate;
//! use conc_core::section::BeamConfig;
//!
//! let result = calculate(&BeamConfig::default()).unwrap();
//! assert!((result.design_moment_knm - 25.13).abs() < 0.01);
//! ```

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::equations::as3600::{self, KU_LIMIT};
use crate::errors::CalcResult;
use crate::section::BeamConfig;

/// Results from the bending calculation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "effective_depth_mm": 176.2,
///   "steel_area_mm2": 450.0,
///   "alpha2": 0.802,
///   "gamma": 0.89,
///   "neutral_axis_depth_mm": 9.85,
///   "ku": 0.0559,
///   "nominal_moment_knm": 38.66,
///   "phi": 0.65,
///   "design_moment_knm": 25.13,
///   "ku_exceeds_limit": false
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BendingResult {
    /// Effective depth d (mm)
    pub effective_depth_mm: f64,

    /// Tension steel area Ast (mm²)
    pub steel_area_mm2: f64,

    /// Stress block intensity factor α2
    pub alpha2: f64,

    /// Stress block depth factor γ
    pub gamma: f64,

    /// Depth to neutral axis dn (mm)
    pub neutral_axis_depth_mm: f64,

    /// Neutral axis parameter ku = dn/d
    pub ku: f64,

    /// Nominal moment capacity Muo (kN·m)
    pub nominal_moment_knm: f64,

    /// Capacity reduction factor φ
    pub phi: f64,

    /// Design moment capacity φMuo (kN·m)
    pub design_moment_knm: f64,

    /// ku above 0.36: the section is over-reinforced for ductile flexure
    pub ku_exceeds_limit: bool,
}

/// Calculate the design bending capacity of a section.
///
/// # Returns
///
/// * `Ok(BendingResult)` - Capacity and intermediate values
/// * `Err(CalcError)` - If the configuration is invalid
pub fn calculate(config: &BeamConfig) -> CalcResult<BendingResult> {
    config.validate()?;

    let d = config.effective_depth_mm();
    let ast = config.steel_area_mm2();
    let alpha2 = config.alpha2();
    let gamma = config.gamma();

    let dn = as3600::neutral_axis_depth(ast, config.fsy_mpa, alpha2, config.fc_mpa, config.width_mm, gamma);
    let ku = as3600::neutral_axis_parameter(dn, d);
    let muo = as3600::nominal_moment_capacity(ast, config.fsy_mpa, d, gamma, ku);
    let phi = as3600::bending_capacity_factor(config.ductility, ku);

    let ku_exceeds_limit = ku > KU_LIMIT;
    if ku_exceeds_limit {
        warn!(ku, limit = KU_LIMIT, section = %config.describe(), "ku exceeds ductility limit");
    }

    Ok(BendingResult {
        effective_depth_mm: d,
        steel_area_mm2: ast,
        alpha2,
        gamma,
        neutral_axis_depth_mm: dn,
        ku,
        nominal_moment_knm: muo,
        phi,
        design_moment_knm: phi * muo,
        ku_exceeds_limit,
    })
}
