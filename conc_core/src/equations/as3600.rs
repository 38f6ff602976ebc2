//! # AS3600 Capacity Formulas
//!
//! Closed-form expressions for the flexural and shear strength of rectangular
//! reinforced concrete sections, plus the deemed-to-comply minimum
//! reinforcement check. Every function is a single formula; composition into
//! checks happens in [`crate::calculations`].
//!
//! ## Notation
//!
//! - `D` = Overall depth of section (mm)
//! - `d` = Effective depth to tension steel centroid (mm)
//! - `b` = Width of section (mm)
//! - `db` = Bar diameter (mm)
//! - `f'c` = Characteristic compressive strength of concrete (MPa)
//! - `fsy` = Yield strength of reinforcement (MPa)
//! - `Ast` = Area of tension reinforcement (mm²)
//! - `α2`, `γ` = Rectangular stress block parameters
//! - `dn` = Depth to neutral axis (mm), `ku = dn / d`
//! - `φ` = Capacity reduction factor
//!
//! ## Units
//!
//! Inputs are N and mm throughout. Moment capacity is returned in kN·m and
//! shear capacity in kN.
//!
//! ## References
//!
//! - AS 3600:2018 Concrete structures, Sections 2, 3, 8 and 9

use std::f64::consts::PI;

use crate::materials::DuctilityClass;

/// Lower bound on α2 and γ (AS3600 Cl 8.1.3)
pub const STRESS_BLOCK_FLOOR: f64 = 0.67;

/// Capacity reduction factor for shear (AS3600 Table 2.2.2)
pub const PHI_SHEAR: f64 = 0.75;

/// Minimum φ for bending (class L reinforcement, or class N at high ku)
pub const PHI_BENDING_MIN: f64 = 0.65;

/// Maximum φ for bending with class N reinforcement
pub const PHI_BENDING_MAX: f64 = 0.85;

/// Neutral axis parameter limit for ductile flexure (AS3600 Cl 8.1.5)
pub const KU_LIMIT: f64 = 0.36;

/// Upper limit on √f'c used in shear (AS3600 Cl 8.2.1.9)
pub const SQRT_FC_SHEAR_CAP: f64 = 8.0;

/// Upper limit on kv for members without shear reinforcement
pub const KV_MAX: f64 = 0.10;

// =============================================================================
// GEOMETRY
// =============================================================================

/// Effective depth from overall depth, cover and bar diameter
///
/// ```text
///   ┌───────────────┐  ─┬─
///   │               │   │
///   │               │   d        D
///   │  ●   ●   ●    │  ─┴─ bar centroid
///   └───────────────┘  cover + db/2
/// ```
///
/// # Formula
/// d = D - cover - db/2
///
/// # Example
/// ```rust
/// use conc_core::equations::as3600::effective_depth;
///
/// let d = effective_depth(200.0, 20.0, 7.6);
/// assert!((d - 176.2).abs() < 1e-9);
/// ```
#[inline]
pub fn effective_depth(depth: f64, cover: f64, bar_diameter: f64) -> f64 {
    depth - cover - bar_diameter / 2.0
}

/// Area of a single bar, truncated to a whole mm²
///
/// # Formula
/// A_b = ⌊π db² / 4⌋
///
/// Truncation matches the tabulated areas used for quick hand checks
/// (e.g. 7.6 mm wire → 45 mm², N12 → 113 mm²).
#[inline]
pub fn bar_area(bar_diameter: f64) -> f64 {
    (bar_diameter.powi(2) * PI / 4.0).floor()
}

/// Reinforcement area across a width for bars at uniform spacing
///
/// # Formula
/// Ast = A_b · b / s
#[inline]
pub fn steel_area_per_width(bar_area: f64, width: f64, spacing: f64) -> f64 {
    bar_area * (width / spacing)
}

// =============================================================================
// MATERIAL PARAMETERS
// =============================================================================

/// Stress block intensity factor α2 (AS3600 Cl 8.1.3)
///
/// # Formula
/// α2 = 0.85 - 0.0015 f'c, but not less than 0.67
#[inline]
pub fn stress_block_alpha2(fc: f64) -> f64 {
    (0.85 - 0.0015 * fc).max(STRESS_BLOCK_FLOOR)
}

/// Stress block depth factor γ (AS3600 Cl 8.1.3)
///
/// # Formula
/// γ = 0.97 - 0.0025 f'c, but not less than 0.67
#[inline]
pub fn stress_block_gamma(fc: f64) -> f64 {
    (0.97 - 0.0025 * fc).max(STRESS_BLOCK_FLOOR)
}

/// Characteristic flexural tensile strength (AS3600 Cl 3.1.1.3)
///
/// # Formula
/// f'ct.f = 0.6 √f'c
#[inline]
pub fn flexural_tensile_strength(fc: f64) -> f64 {
    0.6 * fc.sqrt()
}

// =============================================================================
// BENDING
// =============================================================================

/// Depth to neutral axis from horizontal force equilibrium
///
/// Tension steel at yield balances the rectangular stress block:
/// ```text
/// Ast·fsy = α2·f'c·b·γ·dn
/// ```
///
/// # Formula
/// dn = Ast fsy / (α2 f'c b γ)
#[inline]
pub fn neutral_axis_depth(steel_area: f64, fsy: f64, alpha2: f64, fc: f64, width: f64, gamma: f64) -> f64 {
    (steel_area * fsy) / (alpha2 * fc * width * gamma)
}

/// Neutral axis parameter ku = dn / d
#[inline]
pub fn neutral_axis_parameter(dn: f64, d: f64) -> f64 {
    dn / d
}

/// Nominal ultimate moment capacity Muo in kN·m
///
/// Lever arm is measured from the steel to the centroid of the stress block.
///
/// # Formula
/// Muo = Ast fsy (d - 0.5 γ ku d) / 10⁶
#[inline]
pub fn nominal_moment_capacity(steel_area: f64, fsy: f64, d: f64, gamma: f64, ku: f64) -> f64 {
    (steel_area * fsy) * (d - 0.5 * gamma * ku * d) / 1.0e6
}

/// Capacity reduction factor φ for bending (AS3600 Table 2.2.2)
///
/// - Class L: φ = 0.65
/// - Class N: φ = 1.24 - 13ku/12, within [0.65, 0.85]
#[inline]
pub fn bending_capacity_factor(ductility: DuctilityClass, ku: f64) -> f64 {
    match ductility {
        DuctilityClass::L => PHI_BENDING_MIN,
        DuctilityClass::N => (1.24 - 13.0 * ku / 12.0).clamp(PHI_BENDING_MIN, PHI_BENDING_MAX),
    }
}

// =============================================================================
// SHEAR
// =============================================================================

/// Effective shear depth (AS3600 Cl 8.2.1.9)
///
/// # Formula
/// dv = max(0.72 D, 0.9 d)
#[inline]
pub fn shear_depth(depth: f64, d: f64) -> f64 {
    (0.72 * depth).max(0.9 * d)
}

/// Concrete shear factor kv for members without shear reinforcement
/// (AS3600 Cl 8.2.4.3, simplified method)
///
/// # Formula
/// kv = 200 / (1000 + 1.3 dv) ≤ 0.10
#[inline]
pub fn shear_kv(dv: f64) -> f64 {
    (200.0 / (1000.0 + 1.3 * dv)).min(KV_MAX)
}

/// √f'c as used in shear, capped at 8 MPa
#[inline]
pub fn shear_sqrt_fc(fc: f64) -> f64 {
    fc.sqrt().min(SQRT_FC_SHEAR_CAP)
}

/// Concrete contribution to shear strength Vuc in kN (AS3600 Cl 8.2.4.1)
///
/// # Formula
/// Vuc = kv bv dv √f'c / 1000, with √f'c ≤ 8 MPa
#[inline]
pub fn concrete_shear_capacity(kv: f64, bv: f64, dv: f64, fc: f64) -> f64 {
    kv * bv * dv * shear_sqrt_fc(fc) / 1000.0
}

// =============================================================================
// MINIMUM REINFORCEMENT
// =============================================================================

/// Deemed-to-comply minimum tension reinforcement (AS3600 Cl 8.1.6.1 / 9.1.1)
///
/// The factor `f` depends on the member type (0.20 for beams and one-way
/// slabs, 0.19 for two-way slabs, 0.24 for flat slabs).
///
/// # Formula
/// Ast.min = f b d (D/d)² f'ct.f / fsy
///
/// # Example
/// ```rust
/// use conc_core::equations::as3600::{flexural_tensile_strength, minimum_steel_area};
///
/// let fctf = flexural_tensile_strength(32.0);
/// let ast_min = minimum_steel_area(1000.0, 176.2, 200.0, 0.2, fctf, 500.0);
/// assert!((ast_min - 308.2).abs() < 0.1);
/// ```
#[inline]
pub fn minimum_steel_area(width: f64, d: f64, depth: f64, factor: f64, fctf: f64, fsy: f64) -> f64 {
    width * d * factor * (depth / d).powi(2) * fctf / fsy
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-6;

    #[test]
    fn test_effective_depth() {
        assert!((effective_depth(200.0, 20.0, 7.6) - 176.2).abs() < TOL);
        assert!((effective_depth(300.0, 20.0, 12.0) - 274.0).abs() < TOL);
    }

    #[test]
    fn test_bar_area_truncates() {
        // π·7.6²/4 = 45.36
        assert_eq!(bar_area(7.6), 45.0);
        // π·12²/4 = 113.10
        assert_eq!(bar_area(12.0), 113.0);
        // π·32²/4 = 804.25
        assert_eq!(bar_area(32.0), 804.0);
    }

    #[test]
    fn test_steel_area_per_width() {
        assert!((steel_area_per_width(45.0, 1000.0, 100.0) - 450.0).abs() < TOL);
        assert!((steel_area_per_width(113.0, 1000.0, 150.0) - 753.333_333).abs() < 1e-3);
    }

    #[test]
    fn test_stress_block_factors() {
        assert!((stress_block_alpha2(32.0) - 0.802).abs() < TOL);
        assert!((stress_block_gamma(32.0) - 0.89).abs() < TOL);
        // Both floor at 0.67 for high strength concrete
        assert_eq!(stress_block_alpha2(120.0), STRESS_BLOCK_FLOOR);
        assert_eq!(stress_block_gamma(150.0), STRESS_BLOCK_FLOOR);
        assert!((stress_block_gamma(80.0) - 0.77).abs() < TOL);
    }

    #[test]
    fn test_flexural_tensile_strength() {
        assert!((flexural_tensile_strength(25.0) - 3.0).abs() < TOL);
    }

    #[test]
    fn test_neutral_axis() {
        let dn = neutral_axis_depth(450.0, 500.0, 0.802, 32.0, 1000.0, 0.89);
        assert!((dn - 9.850_72).abs() < 1e-4);
        let ku = neutral_axis_parameter(dn, 176.2);
        assert!((ku - 0.055_906).abs() < 1e-5);
    }

    #[test]
    fn test_nominal_moment_capacity() {
        let dn = neutral_axis_depth(450.0, 500.0, 0.802, 32.0, 1000.0, 0.89);
        let ku = neutral_axis_parameter(dn, 176.2);
        let muo = nominal_moment_capacity(450.0, 500.0, 176.2, 0.89, ku);
        assert!((muo - 38.658_70).abs() < 1e-4);
    }

    #[test]
    fn test_bending_phi() {
        assert_eq!(bending_capacity_factor(DuctilityClass::L, 0.05), 0.65);
        assert_eq!(bending_capacity_factor(DuctilityClass::L, 0.5), 0.65);
        // Low ku caps at 0.85
        assert_eq!(bending_capacity_factor(DuctilityClass::N, 0.05), 0.85);
        // High ku floors at 0.65
        assert_eq!(bending_capacity_factor(DuctilityClass::N, 0.6), 0.65);
        // Transition region: 1.24 - 13(0.45)/12 = 0.7525
        assert!((bending_capacity_factor(DuctilityClass::N, 0.45) - 0.7525).abs() < TOL);
    }

    #[test]
    fn test_shear_depth() {
        // 0.9d governs for the default slab
        assert!((shear_depth(200.0, 176.2) - 158.58).abs() < TOL);
        // 0.72D governs when d is small
        assert!((shear_depth(200.0, 150.0) - 144.0).abs() < TOL);
    }

    #[test]
    fn test_kv_capped() {
        // Shallow members hit the 0.10 cap
        assert_eq!(shear_kv(158.58), KV_MAX);
        // Deep members: 200/(1000 + 1.3·900) = 0.0922
        assert!((shear_kv(900.0) - 200.0 / 2170.0).abs() < TOL);
    }

    #[test]
    fn test_sqrt_fc_capped() {
        assert!((shear_sqrt_fc(32.0) - 32.0_f64.sqrt()).abs() < TOL);
        assert_eq!(shear_sqrt_fc(80.0), SQRT_FC_SHEAR_CAP);
    }

    #[test]
    fn test_concrete_shear_capacity() {
        let vuc = concrete_shear_capacity(0.1, 1000.0, 158.58, 32.0);
        // 0.1 · 1000 · 158.58 · 5.657 / 1000 = 89.706
        assert!((vuc - 89.706_39).abs() < 1e-3);
    }

    #[test]
    fn test_minimum_steel_area() {
        let fctf = flexural_tensile_strength(32.0);
        let ast_min = minimum_steel_area(1000.0, 176.2, 200.0, 0.2, fctf, 500.0);
        assert!((ast_min - 308.205_45).abs() < 1e-3);
    }
}
