//! # Materials
//!
//! Concrete and reinforcement definitions used by the AS3600 checks.
//!
//! ## Material Types
//!
//! - **Concrete**: Standard strength grades (N20 to N100) and the f'c range
//! - **Reinforcement**: Ductility class (L or N) and standard bar and mesh
//!   wire designations
//!
//! ## Example
//!
//! ```rust
//! use conc_core::materials::{BarDesignation, ConcreteGrade, DuctilityClass};
//!
//! let grade: ConcreteGrade = "N40".parse().unwrap();
//! assert_eq!(grade.fc_mpa(), 40.0);
//!
//! let bar = BarDesignation::N12;
//! assert_eq!(bar.diameter_mm(), 12.0);
//! assert_eq!(bar.ductility(), DuctilityClass::N);
//! ```

pub mod concrete;
pub mod reinforcement;

pub use concrete::ConcreteGrade;
pub use reinforcement::{BarDesignation, DuctilityClass};
