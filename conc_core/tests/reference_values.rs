//! Hand-checked capacities for a handful of sections.

use approx::{assert_abs_diff_eq, assert_relative_eq};

use conc_core::calculations::{bending, minimum_steel, shear, MinimumSteelInput};
use conc_core::{check_section, BeamConfig, DuctilityClass, MemberType, Quantity};

#[test]
fn default_section_class_l() {
    let summary = check_section(&BeamConfig::default(), MemberType::OneWaySlabOrBeam).unwrap();

    assert_relative_eq!(summary.bending.effective_depth_mm, 176.2, max_relative = 1e-12);
    assert_relative_eq!(summary.bending.steel_area_mm2, 450.0, max_relative = 1e-12);
    assert_relative_eq!(summary.bending.design_moment_knm, 25.128, max_relative = 1e-4);
    assert_relative_eq!(summary.shear.design_shear_kn, 67.280, max_relative = 1e-4);
    assert_relative_eq!(summary.minimum_steel.min_steel_mm2, 308.205, max_relative = 1e-4);
    assert!(summary.passes());
    assert!(summary.warnings().is_empty());
}

#[test]
fn default_section_class_n() {
    let config = BeamConfig::default().with_ductility(DuctilityClass::N);
    let result = bending::calculate(&config).unwrap();
    assert_relative_eq!(result.design_moment_knm, 32.860, max_relative = 1e-4);
}

#[test]
fn deep_n40_section() {
    let config = BeamConfig::default()
        .with_depth(300.0)
        .with_fc(40.0)
        .with_bar_diameter(12.0)
        .with_bar_spacing(150.0)
        .with_ductility(DuctilityClass::N);
    let summary = check_section(&config, MemberType::FlatSlab).unwrap();

    assert_abs_diff_eq!(summary.bending.effective_depth_mm, 274.0, epsilon = 1e-9);
    assert_relative_eq!(summary.bending.design_moment_knm, 85.8175, max_relative = 1e-5);
    assert_relative_eq!(summary.minimum_steel.min_steel_mm2, 598.2937, max_relative = 1e-5);
    // 113 x 1000 / 150 = 753 mm² provided
    assert_relative_eq!(summary.minimum_steel.provided_steel_mm2, 753.3333, max_relative = 1e-5);
    assert!(summary.minimum_steel.satisfies_minimum);
    assert!(summary.passes());
}

#[test]
fn deep_n40_section_at_wide_spacing_fails_minimum() {
    let config = BeamConfig::default()
        .with_depth(300.0)
        .with_fc(40.0)
        .with_bar_diameter(12.0)
        .with_bar_spacing(300.0)
        .with_ductility(DuctilityClass::N);
    let summary = check_section(&config, MemberType::FlatSlab).unwrap();

    assert_relative_eq!(summary.minimum_steel.provided_steel_mm2, 376.6667, max_relative = 1e-5);
    assert!(!summary.minimum_steel.satisfies_minimum);
    assert!(!summary.passes());
}

#[test]
fn shear_caps_on_large_high_strength_section() {
    let config = BeamConfig::default()
        .with_depth(1000.0)
        .with_fc(80.0)
        .with_bar_diameter(32.0)
        .with_ductility(DuctilityClass::N);
    let result = shear::calculate(&config).unwrap();
    assert_abs_diff_eq!(result.sqrt_fc_mpa, 8.0, epsilon = 1e-12);
    assert_relative_eq!(result.design_shear_kn, 489.2757, max_relative = 1e-5);
}

#[test]
fn effective_depth_override() {
    let config = BeamConfig::default().with_effective_depth(Some(150.0));
    let summary = check_section(&config, MemberType::default()).unwrap();
    assert_relative_eq!(summary.bending.design_moment_knm, 21.2964, max_relative = 1e-5);
    assert_relative_eq!(summary.shear.design_shear_kn, 61.0940, max_relative = 1e-5);
}

#[test]
fn two_way_slab_factor() {
    let input = MinimumSteelInput::new(BeamConfig::default(), MemberType::TwoWaySlab);
    let result = minimum_steel::calculate(&input).unwrap();
    assert_abs_diff_eq!(result.factor, 0.19);
    // 0.19 / 0.20 of the one-way value
    assert_relative_eq!(result.min_steel_mm2, 308.205 * 0.95, max_relative = 1e-4);
}

#[test]
fn quantities_agree_with_summary() {
    let config = BeamConfig::default().with_depth(250.0);
    let summary = check_section(&config, MemberType::default()).unwrap();
    let member = MemberType::default();

    assert_relative_eq!(
        Quantity::BendingCapacity.evaluate(&config, member).unwrap(),
        summary.bending.design_moment_knm
    );
    assert_relative_eq!(
        Quantity::ShearCapacity.evaluate(&config, member).unwrap(),
        summary.shear.design_shear_kn
    );
    assert_relative_eq!(
        Quantity::MinimumSteel.evaluate(&config, member).unwrap(),
        summary.minimum_steel.min_steel_mm2
    );
}

#[test]
fn invalid_geometry_names_the_field() {
    let config = BeamConfig::default().with_cover(250.0);
    let err = check_section(&config, MemberType::default()).unwrap_err();
    assert!(err.is_input_error());
    assert_eq!(err.error_code(), "INVALID_INPUT");
}
