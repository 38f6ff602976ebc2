//! # Shear Capacity
//!
//! Design shear strength φVuc of a section without shear reinforcement per
//! AS3600 Cl 8.2.4 (simplified method). The web width bv is the full section
//! width.
//!
//! ## Example
//!
//! ```rust
//! use conc_core::calculations::shear::calculate;
//! use conc_core::section::BeamConfig;
//!
//! let result = calculate(&BeamConfig::default()).unwrap();
//! assert!((result.design_shear_kn - 67.28).abs() < 0.01);
//! ```

use serde::{Deserialize, Serialize};

use crate::equations::as3600::{self, PHI_SHEAR};
use crate::errors::CalcResult;
use crate::section::BeamConfig;

/// Results from the shear calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShearResult {
    /// Effective depth d (mm)
    pub effective_depth_mm: f64,

    /// Effective shear depth dv = max(0.72D, 0.9d) (mm)
    pub shear_depth_mm: f64,

    /// Effective web width bv (mm)
    pub web_width_mm: f64,

    /// Concrete shear factor kv (≤ 0.10)
    pub kv: f64,

    /// √f'c as used in shear (≤ 8 MPa)
    pub sqrt_fc_mpa: f64,

    /// Concrete shear strength Vuc (kN)
    pub concrete_shear_kn: f64,

    /// Capacity reduction factor φ
    pub phi: f64,

    /// Design shear capacity φVuc (kN)
    pub design_shear_kn: f64,
}

/// Calculate the design shear capacity of a section.
pub fn calculate(config: &BeamConfig) -> CalcResult<ShearResult> {
    config.validate()?;

    let d = config.effective_depth_mm();
    let dv = as3600::shear_depth(config.depth_mm, d);
    let bv = config.width_mm;
    let kv = as3600::shear_kv(dv);
    let vuc = as3600::concrete_shear_capacity(kv, bv, dv, config.fc_mpa);

    Ok(ShearResult {
        effective_depth_mm: d,
        shear_depth_mm: dv,
        web_width_mm: bv,
        kv,
        sqrt_fc_mpa: as3600::shear_sqrt_fc(config.fc_mpa),
        concrete_shear_kn: vuc,
        phi: PHI_SHEAR,
        design_shear_kn: PHI_SHEAR * vuc,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equations::as3600::{KV_MAX, SQRT_FC_SHEAR_CAP};
    use crate::materials::DuctilityClass;

    #[test]
    fn test_default_section() {
        let result = calculate(&BeamConfig::default()).unwrap();
        assert!((result.shear_depth_mm - 158.58).abs() < 1e-9);
        assert_eq!(result.kv, KV_MAX);
        assert_eq!(result.web_width_mm, 1000.0);
        assert!((result.concrete_shear_kn - 89.7064).abs() < 1e-3);
        assert!((result.design_shear_kn - 67.2798).abs() < 1e-3);
    }

    #[test]
    fn test_deep_high_strength_section() {
        // D=1000, N80, N32 @ 100: kv below cap and √f'c capped at 8
        let config = BeamConfig::default()
            .with_depth(1000.0)
            .with_fc(80.0)
            .with_bar_diameter(32.0)
            .with_ductility(DuctilityClass::N);
        let result = calculate(&config).unwrap();
        assert!(result.kv < KV_MAX);
        assert_eq!(result.sqrt_fc_mpa, SQRT_FC_SHEAR_CAP);
        assert!((result.design_shear_kn - 489.2757).abs() < 1e-3);
    }

    #[test]
    fn test_override_changes_shear_depth() {
        // d = 150: 0.9d = 135 < 0.72D = 144
        let config = BeamConfig::default().with_effective_depth(Some(150.0));
        let result = calculate(&config).unwrap();
        assert!((result.shear_depth_mm - 144.0).abs() < 1e-9);
        assert!((result.design_shear_kn - 61.0940).abs() < 1e-3);
    }

    #[test]
    fn test_invalid_config() {
        assert!(calculate(&BeamConfig::default().with_fc(5.0)).is_err());
    }
}
