//! # Section Summary
//!
//! Runs bending, shear and minimum steel for one section and gathers the
//! results, optionally recording every formula into an [`EquationTracker`]
//! for the report appendix.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::bending::{self, BendingResult};
use crate::calculations::minimum_steel::{self, MemberType, MinimumSteelInput, MinimumSteelResult};
use crate::calculations::shear::{self, ShearResult};
use crate::equations::registry::{Equation, EquationTracker};
use crate::errors::CalcResult;
use crate::section::BeamConfig;
use crate::units::{KilonewtonMetres, Kilonewtons, Millimetres, SquareMillimetres};

/// Combined results of every check on one section.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionSummary {
    pub config: BeamConfig,
    pub member_type: MemberType,
    pub bending: BendingResult,
    pub shear: ShearResult,
    pub minimum_steel: MinimumSteelResult,
}

/// Headline capacities in unit-typed form
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionCapacities {
    pub effective_depth: Millimetres,
    pub provided_steel: SquareMillimetres,
    pub minimum_steel: SquareMillimetres,
    pub design_moment: KilonewtonMetres,
    pub design_shear: Kilonewtons,
}

impl SectionSummary {
    pub fn capacities(&self) -> SectionCapacities {
        SectionCapacities {
            effective_depth: Millimetres(self.bending.effective_depth_mm),
            provided_steel: SquareMillimetres(self.minimum_steel.provided_steel_mm2),
            minimum_steel: SquareMillimetres(self.minimum_steel.min_steel_mm2),
            design_moment: KilonewtonMetres(self.bending.design_moment_knm),
            design_shear: Kilonewtons(self.shear.design_shear_kn),
        }
    }

    /// True when the steel meets the minimum and ku is within the ductility limit
    pub fn passes(&self) -> bool {
        self.minimum_steel.satisfies_minimum && !self.bending.ku_exceeds_limit
    }

    /// Human-readable notes for failed criteria
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.bending.ku_exceeds_limit {
            warnings.push(format!(
                "ku = {:.3} exceeds 0.36: section is over-reinforced",
                self.bending.ku
            ));
        }
        if !self.minimum_steel.satisfies_minimum {
            warnings.push(format!(
                "Ast = {:.0} mm² is below the deemed-to-comply minimum of {:.0} mm²",
                self.minimum_steel.provided_steel_mm2, self.minimum_steel.min_steel_mm2
            ));
        }
        warnings
    }
}

/// Check a section for bending, shear and minimum steel.
///
/// ```rust
/// use conc_core::calculations::summary::check_section;
/// use conc_core::calculations::minimum_steel::MemberType;
/// use conc_core::section::BeamConfig;
///
/// let summary = check_section(&BeamConfig::default(), MemberType::default()).unwrap();
/// assert!(summary.passes());
/// ```
pub fn check_section(config: &BeamConfig, member_type: MemberType) -> CalcResult<SectionSummary> {
    let bending = bending::calculate(config)?;
    let shear = shear::calculate(config)?;
    let minimum_steel = minimum_steel::calculate(&MinimumSteelInput::new(*config, member_type))?;

    debug!(
        design_moment_knm = bending.design_moment_knm,
        design_shear_kn = shear.design_shear_kn,
        min_steel_mm2 = minimum_steel.min_steel_mm2,
        "section checked"
    );

    Ok(SectionSummary {
        config: *config,
        member_type,
        bending,
        shear,
        minimum_steel,
    })
}

/// [`check_section`], recording the formulas used against `label`.
pub fn check_section_tracked(
    config: &BeamConfig,
    member_type: MemberType,
    label: &str,
    tracker: &mut EquationTracker,
) -> CalcResult<SectionSummary> {
    let summary = check_section(config, member_type)?;

    if config.has_effective_depth_override() {
        tracker.record_for_member(Equation::EffectiveDepth, "Effective depth (given)", label);
    } else {
        tracker.record_for_member(Equation::EffectiveDepth, "Effective depth", label);
    }
    tracker.record_for_member(Equation::BarArea, "Bar area", label);
    tracker.record_for_member(Equation::SteelAreaPerWidth, "Tension steel", label);

    tracker.record_for_member(Equation::StressBlockAlpha2, "Stress block", label);
    tracker.record_for_member(Equation::StressBlockGamma, "Stress block", label);
    tracker.record_for_member(Equation::NeutralAxisDepth, "Bending", label);
    tracker.record_for_member(Equation::NeutralAxisParameter, "Bending", label);
    tracker.record_for_member(Equation::NominalMomentCapacity, "Bending", label);
    tracker.record_for_member(Equation::BendingCapacityFactor, "Bending", label);
    tracker.record_for_member(Equation::DesignMomentCapacity, "Bending", label);
    tracker.record_for_member(Equation::DuctilityLimit, "Bending", label);

    tracker.record_for_member(Equation::ShearDepth, "Shear", label);
    tracker.record_for_member(Equation::ShearKv, "Shear", label);
    tracker.record_for_member(Equation::ConcreteShearCapacity, "Shear", label);
    tracker.record_for_member(Equation::DesignShearCapacity, "Shear", label);

    tracker.record_for_member(Equation::FlexuralTensileStrength, "Minimum steel", label);
    tracker.record_for_member(Equation::MinimumSteelArea, "Minimum steel", label);
    tracker.record_for_member(Equation::MinimumSteelCheck, "Minimum steel", label);

    Ok(summary)
}
