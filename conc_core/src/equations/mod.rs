//! # AS3600 Equations
//!
//! Every formula the capacity checks rely on lives here as a pure function,
//! so each can be verified against the standard on its own.
//!
//! ## Modules
//!
//! - [`as3600`] - Formula implementations and code constants
//! - [`registry`] - Equation metadata and tracking for report appendices
//!
//! ## Units
//!
//! Lengths in mm, stresses in MPa, areas in mm², moments in kN·m, and
//! shears in kN.

pub mod as3600;
pub mod registry;

pub use as3600::{
    bar_area,
    bending_capacity_factor,
    concrete_shear_capacity,
    effective_depth,
    flexural_tensile_strength,
    minimum_steel_area,
    neutral_axis_depth,
    neutral_axis_parameter,
    nominal_moment_capacity,
    shear_depth,
    shear_kv,
    shear_sqrt_fc,
    steel_area_per_width,
    stress_block_alpha2,
    stress_block_gamma,
};

pub use registry::{
    CodeReference,
    Equation,
    EquationCategory,
    EquationMetadata,
    EquationTracker,
    EquationUsage,
    Variable,
    ALL_EQUATIONS,
    generate_equations_markdown,
};
