//! # conc_core - AS3600 Section Capacity Engine
//!
//! `conc_core` computes the bending, shear and minimum-steel capacity of a
//! singly reinforced concrete section to AS 3600, sweeps those capacities
//! over any input, and draws the results as PDF charts. All inputs and
//! outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: pure functions from a `BeamConfig` to a result
//! - **JSON-First**: every type implements Serialize/Deserialize
//! - **Rich Errors**: structured error types naming the offending field
//!
//! ## Quick Start
//!
//! ```rust
//! use conc_core::{check_section, BeamConfig, MemberType};
//!
//! let summary = check_section(&BeamConfig::default(), MemberType::default()).unwrap();
//! assert!((summary.bending.design_moment_knm - 25.128).abs() < 0.01);
//! assert!(summary.passes());
//! ```
//!
//! ## Modules
//!
//! - [`section`] - Beam configuration and validation
//! - [`equations`] - AS 3600 formulas and the equation registry
//! - [`calculations`] - Bending, shear and minimum-steel checks
//! - [`sweep`] - Parameter sweeps
//! - [`chart`] - Line charts rendered through typst
//! - [`presets`] - The standard chart set
//! - [`study`] - Study files holding several charts
//! - [`pdf`] - Typst compilation and section reports
//! - [`file_io`] - Atomic saves and chart outputs
//! - [`materials`] - Concrete and reinforcement properties
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod chart;
pub mod equations;
pub mod errors;
pub mod file_io;
pub mod materials;
pub mod pdf;
pub mod presets;
pub mod section;
pub mod study;
pub mod sweep;
pub mod units;

pub use calculations::{check_section, MemberType, SectionSummary};
pub use errors::{CalcError, CalcResult};
pub use file_io::{load_study, save_study, write_chart_outputs, OutputOptions};
pub use materials::DuctilityClass;
pub use section::BeamConfig;
pub use study::{ChartDefinition, Study, StudyMetadata};
pub use sweep::{Parameter, Quantity, Sweep, SweepRange, SweepResult};
