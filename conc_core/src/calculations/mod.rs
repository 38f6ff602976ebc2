//! # Capacity Checks
//!
//! Each check follows the pattern:
//!
//! - an input (`BeamConfig`, or `*Input` when more than the section is needed)
//! - `*Result` - JSON-serializable results including intermediate values
//! - `calculate(input) -> Result<*Result, CalcError>` - pure calculation function
//!
//! ## Available Checks
//!
//! - [`bending`] - Design moment capacity φMuo
//! - [`shear`] - Design shear capacity φVuc without shear reinforcement
//! - [`minimum_steel`] - Deemed-to-comply minimum tension reinforcement
//! - [`summary`] - All of the above for one section

pub mod bending;
pub mod minimum_steel;
pub mod shear;
pub mod summary;

pub use bending::BendingResult;
pub use minimum_steel::{MemberType, MinimumSteelInput, MinimumSteelResult};
pub use shear::ShearResult;
pub use summary::{check_section, check_section_tracked, SectionCapacities, SectionSummary};
