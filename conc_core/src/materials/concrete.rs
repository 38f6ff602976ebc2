//! Concrete Strength Grades
//!
//! Standard grades per AS 1379 / AS3600 Table 3.1.2 and the f'c range the
//! capacity formulas accept.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::{CalcError, CalcResult};

/// Lowest characteristic strength covered by AS3600 (MPa)
pub const FC_MIN_MPA: f64 = 20.0;

/// Highest characteristic strength covered by AS3600 (MPa)
pub const FC_MAX_MPA: f64 = 100.0;

/// Standard normal-class concrete strength grade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ConcreteGrade {
    N20,
    N25,
    #[default]
    N32,
    N40,
    N50,
    N65,
    N80,
    N100,
}

impl ConcreteGrade {
    /// All standard grades, weakest first
    pub const ALL: [ConcreteGrade; 8] = [
        ConcreteGrade::N20,
        ConcreteGrade::N25,
        ConcreteGrade::N32,
        ConcreteGrade::N40,
        ConcreteGrade::N50,
        ConcreteGrade::N65,
        ConcreteGrade::N80,
        ConcreteGrade::N100,
    ];

    /// Characteristic compressive strength f'c (MPa)
    pub fn fc_mpa(&self) -> f64 {
        match self {
            ConcreteGrade::N20 => 20.0,
            ConcreteGrade::N25 => 25.0,
            ConcreteGrade::N32 => 32.0,
            ConcreteGrade::N40 => 40.0,
            ConcreteGrade::N50 => 50.0,
            ConcreteGrade::N65 => 65.0,
            ConcreteGrade::N80 => 80.0,
            ConcreteGrade::N100 => 100.0,
        }
    }

    /// Find the standard grade with exactly this strength, if any
    pub fn from_fc(fc_mpa: f64) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|g| (g.fc_mpa() - fc_mpa).abs() < 1e-9)
    }

    pub fn display_name(&self) -> String {
        format!("N{}", self.fc_mpa() as u32)
    }
}

impl std::fmt::Display for ConcreteGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for ConcreteGrade {
    type Err = CalcError;

    fn from_str(s: &str) -> CalcResult<Self> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix('N')
            .or_else(|| trimmed.strip_prefix('n'))
            .unwrap_or(trimmed);
        digits
            .parse::<f64>()
            .ok()
            .and_then(ConcreteGrade::from_fc)
            .ok_or_else(|| {
                CalcError::invalid_input(
                    "grade",
                    s,
                    "Expected a standard grade: N20, N25, N32, N40, N50, N65, N80 or N100",
                )
            })
    }
}
