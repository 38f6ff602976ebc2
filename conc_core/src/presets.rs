//! # Preset Charts
//!
//! The standard chart set, regenerated on demand with `conc presets`.
//!
//! | name | y | x | series |
//! |---|---|---|---|
//! | `deemed_f32` | Ast.min | D 60..750 | cover 20..80 step 5, labelled `d = D - (cover + db/2)` |
//! | `bending_vs_depth` | φMuo | D 100..500 | db 8, 10, 12, 16 |
//! | `shear_vs_depth` | φVuc | D 100..800 | f'c 25, 32, 40, 50 |
//! | `bending_vs_spacing` | φMuo | s 50..300 | D 150, 200, 250, 300 |

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::materials::DuctilityClass;
use crate::section::BeamConfig;
use crate::sweep::{self, Parameter, Quantity, SeriesValues, Sweep, SweepRange, SweepResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    DeemedF32,
    BendingVsDepth,
    ShearVsDepth,
    BendingVsSpacing,
}

impl Preset {
    pub const ALL: [Preset; 4] = [
        Preset::DeemedF32,
        Preset::BendingVsDepth,
        Preset::ShearVsDepth,
        Preset::BendingVsSpacing,
    ];

    /// File stem and CLI name
    pub fn name(&self) -> &'static str {
        match self {
            Preset::DeemedF32 => "deemed_f32",
            Preset::BendingVsDepth => "bending_vs_depth",
            Preset::ShearVsDepth => "shear_vs_depth",
            Preset::BendingVsSpacing => "bending_vs_spacing",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Preset::DeemedF32 => "Deemed-to-comply minimum steel vs depth for a range of covers, f'c 32, N10 bars",
            Preset::BendingVsDepth => "Design moment capacity vs depth for several bar diameters",
            Preset::ShearVsDepth => "Design shear capacity vs depth for several concrete strengths",
            Preset::BendingVsSpacing => "Design moment capacity vs bar spacing for several depths",
        }
    }

    pub fn sweep(&self) -> Sweep {
        let defaults = BeamConfig::default();
        match self {
            Preset::DeemedF32 => Sweep::new(
                "Deemed to comply (where fc = 32 MPa)",
                defaults
                    .with_fc(32.0)
                    .with_ductility(DuctilityClass::N)
                    .with_bar_diameter(10.0),
                Parameter::Depth,
                SweepRange::new(60.0, 750.0, 10.0),
                Quantity::MinimumSteel,
            )
            .with_series(Parameter::Cover, SeriesValues::Range(SweepRange::new(20.0, 80.0, 5.0)))
            .with_axis_titles("Depth, D (mm)", "Min Ast (mm2/m)"),

            Preset::BendingVsDepth => Sweep::new(
                "Design moment capacity vs depth",
                defaults,
                Parameter::Depth,
                SweepRange::new(100.0, 510.0, 10.0),
                Quantity::BendingCapacity,
            )
            .with_series(Parameter::BarDiameter, SeriesValues::Values(vec![8.0, 10.0, 12.0, 16.0])),

            Preset::ShearVsDepth => Sweep::new(
                "Design shear capacity vs depth",
                defaults,
                Parameter::Depth,
                SweepRange::new(100.0, 810.0, 10.0),
                Quantity::ShearCapacity,
            )
            .with_series(Parameter::Fc, SeriesValues::Values(vec![25.0, 32.0, 40.0, 50.0])),

            Preset::BendingVsSpacing => Sweep::new(
                "Design moment capacity vs bar spacing",
                defaults,
                Parameter::BarSpacing,
                SweepRange::new(50.0, 310.0, 10.0),
                Quantity::BendingCapacity,
            )
            .with_series(Parameter::Depth, SeriesValues::Values(vec![150.0, 200.0, 250.0, 300.0])),
        }
    }

    pub fn run(&self) -> CalcResult<SweepResult> {
        let mut result = sweep::run(&self.sweep())?;
        if *self == Preset::DeemedF32 {
            // Label each cover by the depth it removes: d = D - (cover + db/2)
            let half_bar = result.base.bar_diameter_mm / 2.0;
            for series in &mut result.series {
                if let Some(cover) = series.value {
                    series.label = format!("d = D - {}", cover + half_bar);
                }
            }
        }
        Ok(result)
    }
}

impl std::fmt::Display for Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Preset {
    type Err = CalcError;

    fn from_str(s: &str) -> CalcResult<Self> {
        let wanted = s.trim().to_lowercase().replace('-', "_");
        Preset::ALL.iter().copied().find(|p| p.name() == wanted).ok_or_else(|| {
            let names: Vec<&str> = Preset::ALL.iter().map(|p| p.name()).collect();
            CalcError::invalid_input("preset", s, format!("Known presets: {}", names.join(", ")))
        })
    }
}

/// Run a preset by name
pub fn run_preset(name: &str) -> CalcResult<SweepResult> {
    name.parse::<Preset>()?.run()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_roundtrip() {
        for preset in Preset::ALL {
            assert_eq!(preset.name().parse::<Preset>().unwrap(), preset);
        }
        assert_eq!("Shear-Vs-Depth".parse::<Preset>().unwrap(), Preset::ShearVsDepth);
        assert!("torsion".parse::<Preset>().is_err());
    }

    #[test]
    fn test_all_presets_valid() {
        for preset in Preset::ALL {
            assert!(preset.sweep().validate().is_ok(), "{} invalid", preset);
        }
    }

    #[test]
    fn test_deemed_f32_shape() {
        let result = Preset::DeemedF32.run().unwrap();
        assert_eq!(result.series.len(), 12);
        assert_eq!(result.title, "Deemed to comply (where fc = 32 MPa)");
        assert_eq!(result.x_title, "Depth, D (mm)");
        assert_eq!(result.y_title, "Min Ast (mm2/m)");
        assert_eq!(result.series[0].label, "d = D - 25");
        assert_eq!(result.series[11].label, "d = D - 80");
        // D 60..740: 69 depths, shallow ones fail under deep cover
        assert_eq!(result.series[0].points.len(), 69);
        assert!(result.series[11].points.len() < 69);
        assert!(result.skipped > 0);

        // D = 200, cover 20, N10: Ast.min ≈ 310.3 mm²
        let (_, y) = result.series[0]
            .points
            .iter()
            .copied()
            .find(|(x, _)| (*x - 200.0).abs() < 1e-9)
            .unwrap();
        assert!((y - 310.3189).abs() < 1e-3);
    }

    #[test]
    fn test_shear_vs_depth_series() {
        let result = run_preset("shear_vs_depth").unwrap();
        let labels: Vec<&str> = result.series.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["f'c = 25 MPa", "f'c = 32 MPa", "f'c = 40 MPa", "f'c = 50 MPa"]);
        assert_eq!(result.skipped, 0);
    }

    #[test]
    fn test_bending_increases_with_depth() {
        let result = Preset::BendingVsDepth.run().unwrap();
        for series in &result.series {
            assert!(series.points.windows(2).all(|w| w[1].1 > w[0].1), "{}", series.label);
        }
    }
}
