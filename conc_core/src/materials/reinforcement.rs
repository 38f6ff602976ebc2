//! Reinforcing Steel
//!
//! Ductility classes per AS/NZS 4671 and standard bar / mesh wire sizes.
//!
//! ## Ductility
//!
//! - **Class L**: Low ductility (cold-drawn mesh wire). Bending φ is fixed at 0.65.
//! - **Class N**: Normal ductility (hot-rolled deformed bar). Bending φ varies
//!   with ku between 0.65 and 0.85.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::{CalcError, CalcResult};

/// Reinforcement ductility class
///
/// Deserializes through [`FromStr`], so `"n"` in a JSON input reads as class N.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(try_from = "String")]
pub enum DuctilityClass {
    /// Low ductility (mesh)
    #[default]
    L,
    /// Normal ductility (bar)
    N,
}

impl DuctilityClass {
    pub fn display_name(&self) -> &'static str {
        match self {
            DuctilityClass::L => "Class L (low ductility)",
            DuctilityClass::N => "Class N (normal ductility)",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            DuctilityClass::L => "L",
            DuctilityClass::N => "N",
        }
    }
}

impl std::fmt::Display for DuctilityClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for DuctilityClass {
    type Err = CalcError;

    /// Parses `L`/`N` case-insensitively
    fn from_str(s: &str) -> CalcResult<Self> {
        match s.trim() {
            "L" | "l" => Ok(DuctilityClass::L),
            "N" | "n" => Ok(DuctilityClass::N),
            other => Err(CalcError::invalid_input(
                "ductility",
                other,
                "Ductility class must be L or N",
            )),
        }
    }
}

impl TryFrom<String> for DuctilityClass {
    type Error = CalcError;

    fn try_from(s: String) -> CalcResult<Self> {
        s.parse()
    }
}

/// Standard reinforcing bar and mesh wire designations
///
/// Bars (N-prefix) are class N; mesh wires (SL/RL series) are class L.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BarDesignation {
    /// SL62 mesh wire (6.0 mm)
    SL62,
    /// SL72 mesh wire (6.75 mm)
    SL72,
    /// SL82 mesh wire (7.6 mm)
    SL82,
    /// SL92 mesh wire (8.6 mm)
    SL92,
    /// SL102 mesh wire (9.5 mm)
    SL102,
    N10,
    N12,
    N16,
    N20,
    N24,
    N28,
    N32,
    N36,
    N40,
}

impl BarDesignation {
    pub const ALL: [BarDesignation; 14] = [
        BarDesignation::SL62,
        BarDesignation::SL72,
        BarDesignation::SL82,
        BarDesignation::SL92,
        BarDesignation::SL102,
        BarDesignation::N10,
        BarDesignation::N12,
        BarDesignation::N16,
        BarDesignation::N20,
        BarDesignation::N24,
        BarDesignation::N28,
        BarDesignation::N32,
        BarDesignation::N36,
        BarDesignation::N40,
    ];

    /// Nominal diameter in mm
    pub fn diameter_mm(&self) -> f64 {
        match self {
            BarDesignation::SL62 => 6.0,
            BarDesignation::SL72 => 6.75,
            BarDesignation::SL82 => 7.6,
            BarDesignation::SL92 => 8.6,
            BarDesignation::SL102 => 9.5,
            BarDesignation::N10 => 10.0,
            BarDesignation::N12 => 12.0,
            BarDesignation::N16 => 16.0,
            BarDesignation::N20 => 20.0,
            BarDesignation::N24 => 24.0,
            BarDesignation::N28 => 28.0,
            BarDesignation::N32 => 32.0,
            BarDesignation::N36 => 36.0,
            BarDesignation::N40 => 40.0,
        }
    }

    pub fn ductility(&self) -> DuctilityClass {
        if self.is_mesh() {
            DuctilityClass::L
        } else {
            DuctilityClass::N
        }
    }

    pub fn is_mesh(&self) -> bool {
        matches!(
            self,
            BarDesignation::SL62
                | BarDesignation::SL72
                | BarDesignation::SL82
                | BarDesignation::SL92
                | BarDesignation::SL102
        )
    }

    /// Designation as printed on drawings (e.g. "N12", "SL82")
    pub fn code(&self) -> &'static str {
        match self {
            BarDesignation::SL62 => "SL62",
            BarDesignation::SL72 => "SL72",
            BarDesignation::SL82 => "SL82",
            BarDesignation::SL92 => "SL92",
            BarDesignation::SL102 => "SL102",
            BarDesignation::N10 => "N10",
            BarDesignation::N12 => "N12",
            BarDesignation::N16 => "N16",
            BarDesignation::N20 => "N20",
            BarDesignation::N24 => "N24",
            BarDesignation::N28 => "N28",
            BarDesignation::N32 => "N32",
            BarDesignation::N36 => "N36",
            BarDesignation::N40 => "N40",
        }
    }
}

impl std::fmt::Display for BarDesignation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for BarDesignation {
    type Err = CalcError;

    fn from_str(s: &str) -> CalcResult<Self> {
        let wanted = s.trim().to_uppercase();
        BarDesignation::ALL
            .iter()
            .copied()
            .find(|b| b.code() == wanted)
            .ok_or_else(|| {
                CalcError::invalid_input("bar", s, "Unknown bar designation (e.g. N12, N16, SL82)")
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ductility_parse_case_insensitive() {
        assert_eq!("l".parse::<DuctilityClass>().unwrap(), DuctilityClass::L);
        assert_eq!("N".parse::<DuctilityClass>().unwrap(), DuctilityClass::N);
        assert_eq!(" n ".parse::<DuctilityClass>().unwrap(), DuctilityClass::N);
    }

    #[test]
    fn test_ductility_parse_rejects_unknown() {
        let err = "E".parse::<DuctilityClass>().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_ductility_serialization() {
        let json = serde_json::to_string(&DuctilityClass::N).unwrap();
        assert_eq!(json, "\"N\"");
    }

    #[test]
    fn test_ductility_deserialize_case_insensitive() {
        let lower: DuctilityClass = serde_json::from_str("\"n\"").unwrap();
        assert_eq!(lower, DuctilityClass::N);
        let upper: DuctilityClass = serde_json::from_str("\"L\"").unwrap();
        assert_eq!(upper, DuctilityClass::L);
        assert!(serde_json::from_str::<DuctilityClass>("\"E\"").is_err());
    }

    #[test]
    fn test_bar_designation_lookup() {
        let bar: BarDesignation = "n16".parse().unwrap();
        assert_eq!(bar, BarDesignation::N16);
        assert_eq!(bar.diameter_mm(), 16.0);
        assert_eq!(bar.ductility(), DuctilityClass::N);

        let wire: BarDesignation = "SL82".parse().unwrap();
        assert_eq!(wire.diameter_mm(), 7.6);
        assert_eq!(wire.ductility(), DuctilityClass::L);
    }

    #[test]
    fn test_all_codes_roundtrip() {
        for bar in BarDesignation::ALL {
            assert_eq!(bar.code().parse::<BarDesignation>().unwrap(), bar);
        }
    }
}
