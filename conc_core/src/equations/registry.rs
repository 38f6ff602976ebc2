//! # Equation Registry
//!
//! Central registry of every AS3600 formula the capacity checks use. Each
//! equation carries its clause reference, typst and plain-text formulas, and
//! variable definitions so reports can print an auditable appendix.
//!
//! ## Usage
//!
//! ```rust
//! use conc_core::equations::registry::{Equation, EquationTracker};
//!
//! let mut tracker = EquationTracker::new();
//! tracker.record_for_member(Equation::NominalMomentCapacity, "Bending", "S1");
//!
//! let meta = Equation::NominalMomentCapacity.metadata();
//! assert_eq!(meta.reference.citation(), "AS 3600-2018 Cl 8.1.3");
//! ```

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::pdf::escape_typst;

// ============================================================================
// Code References
// ============================================================================

/// Reference to a standard clause.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CodeReference {
    /// AS 3600 Concrete Structures
    AS3600 {
        year: u16,
        clause: &'static str,
    },
    /// AS/NZS 4671 Steel for the reinforcement of concrete
    ASNZS4671 {
        year: u16,
    },
    /// Geometry or statics, no clause needed
    Mechanics,
}

impl CodeReference {
    /// Format the reference for display in reports
    pub fn citation(&self) -> String {
        match self {
            CodeReference::AS3600 { year, clause } => format!("AS 3600-{} Cl {}", year, clause),
            CodeReference::ASNZS4671 { year } => format!("AS/NZS 4671:{}", year),
            CodeReference::Mechanics => "Fundamental Mechanics".to_string(),
        }
    }
}

const fn as3600(clause: &'static str) -> CodeReference {
    CodeReference::AS3600 { year: 2018, clause }
}

// ============================================================================
// Equation Categories
// ============================================================================

/// Categories for organizing equations in the appendix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquationCategory {
    /// Effective depth and steel areas
    Geometry,
    /// Stress block and tensile strength
    MaterialProperties,
    /// Moment capacity
    Bending,
    /// Concrete shear capacity
    Shear,
    /// Deemed-to-comply minimum steel
    MinimumReinforcement,
    /// Pass/fail criteria
    DesignChecks,
}

impl EquationCategory {
    pub const ALL: [EquationCategory; 6] = [
        EquationCategory::Geometry,
        EquationCategory::MaterialProperties,
        EquationCategory::Bending,
        EquationCategory::Shear,
        EquationCategory::MinimumReinforcement,
        EquationCategory::DesignChecks,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            EquationCategory::Geometry => "Geometry",
            EquationCategory::MaterialProperties => "Material Properties",
            EquationCategory::Bending => "Bending",
            EquationCategory::Shear => "Shear",
            EquationCategory::MinimumReinforcement => "Minimum Reinforcement",
            EquationCategory::DesignChecks => "Design Checks",
        }
    }

    /// Sort order for the appendix (lower = earlier)
    pub fn sort_order(&self) -> u8 {
        match self {
            EquationCategory::Geometry => 1,
            EquationCategory::MaterialProperties => 2,
            EquationCategory::Bending => 3,
            EquationCategory::Shear => 4,
            EquationCategory::MinimumReinforcement => 5,
            EquationCategory::DesignChecks => 6,
        }
    }
}

// ============================================================================
// Variable Definition
// ============================================================================

/// Definition of a variable used in an equation.
///
/// `symbol` is written in typst math notation (`A_"st"`, `f'_c`).
#[derive(Debug, Clone)]
pub struct Variable {
    pub symbol: &'static str,
    pub description: &'static str,
    pub units: &'static str,
}

impl Variable {
    pub const fn new(symbol: &'static str, description: &'static str, units: &'static str) -> Self {
        Self { symbol, description, units }
    }

    /// Symbol with typst string quotes removed, for markdown
    pub fn plain_symbol(&self) -> String {
        self.symbol.replace('"', "")
    }
}

// ============================================================================
// Equation Metadata
// ============================================================================

/// Complete metadata for one formula.
#[derive(Debug, Clone)]
pub struct EquationMetadata {
    /// Human-readable name
    pub name: &'static str,
    pub description: &'static str,
    /// Formula in typst math notation
    pub formula_typst: &'static str,
    /// Formula in plain text for markdown
    pub formula_plain: &'static str,
    pub reference: CodeReference,
    pub variables: Vec<Variable>,
    pub assumptions: Vec<&'static str>,
    pub category: EquationCategory,
    /// Source module where the equation implementation lives
    pub source_module: &'static str,
    /// Function implementing the equation
    pub source_function: &'static str,
}

// ============================================================================
// Equation Enum
// ============================================================================

/// All formulas used by the capacity checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Equation {
    // Geometry
    EffectiveDepth,
    BarArea,
    SteelAreaPerWidth,

    // Material properties
    StressBlockAlpha2,
    StressBlockGamma,
    FlexuralTensileStrength,

    // Bending
    NeutralAxisDepth,
    NeutralAxisParameter,
    NominalMomentCapacity,
    BendingCapacityFactor,
    DesignMomentCapacity,

    // Shear
    ShearDepth,
    ShearKv,
    ConcreteShearCapacity,
    DesignShearCapacity,

    // Minimum reinforcement
    MinimumSteelArea,

    // Checks
    DuctilityLimit,
    MinimumSteelCheck,
}

const AS3600_RS: &str = "equations/as3600.rs";

impl Equation {
    /// Get the full metadata for this equation
    pub fn metadata(&self) -> EquationMetadata {
        match self {
            Equation::EffectiveDepth => EquationMetadata {
                name: "Effective Depth",
                description: "Depth from the extreme compression fibre to the centroid of the tension bars",
                formula_typst: r#"$d = D - c - d_b / 2$"#,
                formula_plain: "d = D - cover - db/2",
                reference: CodeReference::Mechanics,
                variables: vec![
                    Variable::new("d", "Effective depth", "mm"),
                    Variable::new("D", "Overall depth", "mm"),
                    Variable::new("c", "Clear cover to the tension bars", "mm"),
                    Variable::new("d_b", "Bar diameter", "mm"),
                ],
                assumptions: vec!["Single layer of tension bars", "Replaced by an explicit d when one is given"],
                category: EquationCategory::Geometry,
                source_module: AS3600_RS,
                source_function: "effective_depth",
            },

            Equation::BarArea => EquationMetadata {
                name: "Bar Area",
                description: "Cross-sectional area of one bar, truncated to a whole square millimetre",
                formula_typst: r#"$A_b = floor(pi d_b^2 / 4)$"#,
                formula_plain: "Ab = floor(pi * db^2 / 4)",
                reference: CodeReference::Mechanics,
                variables: vec![
                    Variable::new("A_b", "Area of one bar", "mm²"),
                    Variable::new("d_b", "Bar diameter", "mm"),
                ],
                assumptions: vec!["Nominal diameter"],
                category: EquationCategory::Geometry,
                source_module: AS3600_RS,
                source_function: "bar_area",
            },

            Equation::SteelAreaPerWidth => EquationMetadata {
                name: "Tension Steel Area",
                description: "Total tension steel area across the section width",
                formula_typst: r#"$A_"st" = A_b b / s$"#,
                formula_plain: "Ast = Ab * b / s",
                reference: CodeReference::Mechanics,
                variables: vec![
                    Variable::new("A_\"st\"", "Tension steel area", "mm²"),
                    Variable::new("A_b", "Area of one bar", "mm²"),
                    Variable::new("b", "Section width", "mm"),
                    Variable::new("s", "Bar spacing", "mm"),
                ],
                assumptions: vec!["Uniform bar spacing", "Fractional bar counts allowed"],
                category: EquationCategory::Geometry,
                source_module: AS3600_RS,
                source_function: "steel_area_per_width",
            },

            Equation::StressBlockAlpha2 => EquationMetadata {
                name: "Stress Block Intensity Factor",
                description: "Ratio of the uniform stress block intensity to the concrete strength",
                formula_typst: r#"$alpha_2 = max(0.85 - 0.0015 f'_c, 0.67)$"#,
                formula_plain: "alpha2 = max(0.85 - 0.0015 f'c, 0.67)",
                reference: as3600("8.1.3"),
                variables: vec![
                    Variable::new("alpha_2", "Stress block intensity factor", "-"),
                    Variable::new("f'_c", "Characteristic compressive strength", "MPa"),
                ],
                assumptions: vec!["Rectangular stress block"],
                category: EquationCategory::MaterialProperties,
                source_module: AS3600_RS,
                source_function: "stress_block_alpha2",
            },

            Equation::StressBlockGamma => EquationMetadata {
                name: "Stress Block Depth Factor",
                description: "Ratio of the stress block depth to the neutral axis depth",
                formula_typst: r#"$gamma = max(0.97 - 0.0025 f'_c, 0.67)$"#,
                formula_plain: "gamma = max(0.97 - 0.0025 f'c, 0.67)",
                reference: as3600("8.1.3"),
                variables: vec![
                    Variable::new("gamma", "Stress block depth factor", "-"),
                    Variable::new("f'_c", "Characteristic compressive strength", "MPa"),
                ],
                assumptions: vec!["Rectangular stress block"],
                category: EquationCategory::MaterialProperties,
                source_module: AS3600_RS,
                source_function: "stress_block_gamma",
            },

            Equation::FlexuralTensileStrength => EquationMetadata {
                name: "Flexural Tensile Strength",
                description: "Characteristic flexural tensile strength of concrete",
                formula_typst: r#"$f'_"ct.f" = 0.6 sqrt(f'_c)$"#,
                formula_plain: "f'ct.f = 0.6 sqrt(f'c)",
                reference: as3600("3.1.1.3"),
                variables: vec![
                    Variable::new("f'_\"ct.f\"", "Flexural tensile strength", "MPa"),
                    Variable::new("f'_c", "Characteristic compressive strength", "MPa"),
                ],
                assumptions: vec!["28 day strength"],
                category: EquationCategory::MaterialProperties,
                source_module: AS3600_RS,
                source_function: "flexural_tensile_strength",
            },

            Equation::NeutralAxisDepth => EquationMetadata {
                name: "Neutral Axis Depth",
                description: "Depth to the neutral axis from horizontal force equilibrium",
                formula_typst: r#"$d_n = (A_"st" f_"sy") / (alpha_2 f'_c b gamma)$"#,
                formula_plain: "dn = Ast fsy / (alpha2 f'c b gamma)",
                reference: as3600("8.1.3"),
                variables: vec![
                    Variable::new("d_n", "Neutral axis depth", "mm"),
                    Variable::new("A_\"st\"", "Tension steel area", "mm²"),
                    Variable::new("f_\"sy\"", "Steel yield strength", "MPa"),
                    Variable::new("b", "Section width", "mm"),
                ],
                assumptions: vec!["Tension steel yields", "No compression steel"],
                category: EquationCategory::Bending,
                source_module: AS3600_RS,
                source_function: "neutral_axis_depth",
            },

            Equation::NeutralAxisParameter => EquationMetadata {
                name: "Neutral Axis Parameter",
                description: "Neutral axis depth as a fraction of the effective depth",
                formula_typst: r#"$k_u = d_n / d$"#,
                formula_plain: "ku = dn / d",
                reference: as3600("8.1.5"),
                variables: vec![
                    Variable::new("k_u", "Neutral axis parameter", "-"),
                    Variable::new("d_n", "Neutral axis depth", "mm"),
                    Variable::new("d", "Effective depth", "mm"),
                ],
                assumptions: vec![],
                category: EquationCategory::Bending,
                source_module: AS3600_RS,
                source_function: "neutral_axis_parameter",
            },

            Equation::NominalMomentCapacity => EquationMetadata {
                name: "Nominal Moment Capacity",
                description: "Ultimate moment from the steel force times the lever arm to the stress block centroid",
                formula_typst: r#"$M_"uo" = A_"st" f_"sy" (d - 0.5 gamma k_u d)$"#,
                formula_plain: "Muo = Ast fsy (d - 0.5 gamma ku d)",
                reference: as3600("8.1.3"),
                variables: vec![
                    Variable::new("M_\"uo\"", "Nominal moment capacity", "kN·m"),
                    Variable::new("A_\"st\"", "Tension steel area", "mm²"),
                    Variable::new("f_\"sy\"", "Steel yield strength", "MPa"),
                    Variable::new("k_u", "Neutral axis parameter", "-"),
                ],
                assumptions: vec!["Singly reinforced rectangular section", "Tension steel yields"],
                category: EquationCategory::Bending,
                source_module: AS3600_RS,
                source_function: "nominal_moment_capacity",
            },

            Equation::BendingCapacityFactor => EquationMetadata {
                name: "Bending Capacity Reduction Factor",
                description: "Capacity reduction factor for bending, set by reinforcement ductility",
                formula_typst: r#"Class L: $phi = 0.65$. Class N: $phi = 1.24 - 13 k_u / 12$ with $0.65 <= phi <= 0.85$"#,
                formula_plain: "Class L: phi = 0.65; Class N: phi = clamp(1.24 - 13 ku / 12, 0.65, 0.85)",
                reference: as3600("2.2.2"),
                variables: vec![
                    Variable::new("phi", "Capacity reduction factor", "-"),
                    Variable::new("k_u", "Neutral axis parameter", "-"),
                ],
                assumptions: vec!["Members without axial force"],
                category: EquationCategory::Bending,
                source_module: AS3600_RS,
                source_function: "bending_capacity_factor",
            },

            Equation::DesignMomentCapacity => EquationMetadata {
                name: "Design Moment Capacity",
                description: "Nominal moment capacity reduced by the capacity factor",
                formula_typst: r#"$phi M_"uo"$"#,
                formula_plain: "phi Muo",
                reference: as3600("2.2.2"),
                variables: vec![
                    Variable::new("phi", "Capacity reduction factor", "-"),
                    Variable::new("M_\"uo\"", "Nominal moment capacity", "kN·m"),
                ],
                assumptions: vec![],
                category: EquationCategory::Bending,
                source_module: "calculations/bending.rs",
                source_function: "calculate",
            },

            Equation::ShearDepth => EquationMetadata {
                name: "Effective Shear Depth",
                description: "Effective depth used in the shear strength calculation",
                formula_typst: r#"$d_v = max(0.72 D, 0.9 d)$"#,
                formula_plain: "dv = max(0.72 D, 0.9 d)",
                reference: as3600("8.2.1.9"),
                variables: vec![
                    Variable::new("d_v", "Effective shear depth", "mm"),
                    Variable::new("D", "Overall depth", "mm"),
                    Variable::new("d", "Effective depth", "mm"),
                ],
                assumptions: vec![],
                category: EquationCategory::Shear,
                source_module: AS3600_RS,
                source_function: "shear_depth",
            },

            Equation::ShearKv => EquationMetadata {
                name: "Concrete Shear Factor",
                description: "Simplified factor for members without minimum shear reinforcement",
                formula_typst: r#"$k_v = min(0.10, 200 / (1000 + 1.3 d_v))$"#,
                formula_plain: "kv = min(0.10, 200 / (1000 + 1.3 dv))",
                reference: as3600("8.2.4.3"),
                variables: vec![
                    Variable::new("k_v", "Concrete shear factor", "-"),
                    Variable::new("d_v", "Effective shear depth", "mm"),
                ],
                assumptions: vec!["No shear reinforcement", "Aggregate size at least 10 mm"],
                category: EquationCategory::Shear,
                source_module: AS3600_RS,
                source_function: "shear_kv",
            },

            Equation::ConcreteShearCapacity => EquationMetadata {
                name: "Concrete Shear Strength",
                description: "Contribution of the concrete to the ultimate shear strength",
                formula_typst: r#"$V_"uc" = k_v b_v d_v sqrt(f'_c)$ with $sqrt(f'_c) <= 8$ MPa"#,
                formula_plain: "Vuc = kv bv dv min(sqrt(f'c), 8)",
                reference: as3600("8.2.4.1"),
                variables: vec![
                    Variable::new("V_\"uc\"", "Concrete shear strength", "kN"),
                    Variable::new("k_v", "Concrete shear factor", "-"),
                    Variable::new("b_v", "Effective web width", "mm"),
                    Variable::new("d_v", "Effective shear depth", "mm"),
                ],
                assumptions: vec!["Web width equals section width"],
                category: EquationCategory::Shear,
                source_module: AS3600_RS,
                source_function: "concrete_shear_capacity",
            },

            Equation::DesignShearCapacity => EquationMetadata {
                name: "Design Shear Capacity",
                description: "Concrete shear strength reduced by the shear capacity factor",
                formula_typst: r#"$phi V_"uc"$ with $phi = 0.75$"#,
                formula_plain: "phi Vuc, phi = 0.75",
                reference: as3600("2.2.2"),
                variables: vec![
                    Variable::new("phi", "Capacity reduction factor for shear", "-"),
                    Variable::new("V_\"uc\"", "Concrete shear strength", "kN"),
                ],
                assumptions: vec![],
                category: EquationCategory::Shear,
                source_module: "calculations/shear.rs",
                source_function: "calculate",
            },

            Equation::MinimumSteelArea => EquationMetadata {
                name: "Minimum Tension Reinforcement",
                description: "Deemed-to-comply minimum steel area for minimum bending strength",
                formula_typst: r#"$A_"st.min" = f b d (D / d)^2 f'_"ct.f" / f_"sy"$"#,
                formula_plain: "Ast.min = f b d (D/d)^2 f'ct.f / fsy",
                reference: as3600("8.1.6.1, 9.1.1"),
                variables: vec![
                    Variable::new("A_\"st.min\"", "Minimum tension steel area", "mm²"),
                    Variable::new("f", "Member factor (0.19 two-way slab, 0.20 beam or one-way slab, 0.24 flat slab)", "-"),
                    Variable::new("f'_\"ct.f\"", "Flexural tensile strength", "MPa"),
                    Variable::new("f_\"sy\"", "Steel yield strength", "MPa"),
                ],
                assumptions: vec!["Rectangular section"],
                category: EquationCategory::MinimumReinforcement,
                source_module: AS3600_RS,
                source_function: "minimum_steel_area",
            },

            Equation::DuctilityLimit => EquationMetadata {
                name: "Ductility Limit",
                description: "Upper limit on the neutral axis parameter for ductile flexural failure",
                formula_typst: r#"$k_u <= 0.36$"#,
                formula_plain: "ku <= 0.36",
                reference: as3600("8.1.5"),
                variables: vec![Variable::new("k_u", "Neutral axis parameter", "-")],
                assumptions: vec!["Flagged only, capacity is still reported"],
                category: EquationCategory::DesignChecks,
                source_module: "calculations/bending.rs",
                source_function: "calculate",
            },

            Equation::MinimumSteelCheck => EquationMetadata {
                name: "Minimum Steel Check",
                description: "Provided tension steel compared with the deemed-to-comply minimum",
                formula_typst: r#"$A_"st" >= A_"st.min"$"#,
                formula_plain: "Ast >= Ast.min",
                reference: as3600("8.1.6.1"),
                variables: vec![
                    Variable::new("A_\"st\"", "Provided tension steel area", "mm²"),
                    Variable::new("A_\"st.min\"", "Minimum tension steel area", "mm²"),
                ],
                assumptions: vec![],
                category: EquationCategory::DesignChecks,
                source_module: "calculations/minimum_steel.rs",
                source_function: "calculate",
            },
        }
    }

    /// Get all equations in a given category
    pub fn in_category(category: EquationCategory) -> Vec<Equation> {
        ALL_EQUATIONS
            .iter()
            .filter(|eq| eq.metadata().category == category)
            .copied()
            .collect()
    }

    /// Get all categories, sorted for the appendix
    pub fn all_categories() -> Vec<EquationCategory> {
        let mut cats = EquationCategory::ALL.to_vec();
        cats.sort_by_key(|c| c.sort_order());
        cats
    }
}

/// All equations in the registry (for iteration)
pub static ALL_EQUATIONS: &[Equation] = &[
    Equation::EffectiveDepth,
    Equation::BarArea,
    Equation::SteelAreaPerWidth,
    Equation::StressBlockAlpha2,
    Equation::StressBlockGamma,
    Equation::FlexuralTensileStrength,
    Equation::NeutralAxisDepth,
    Equation::NeutralAxisParameter,
    Equation::NominalMomentCapacity,
    Equation::BendingCapacityFactor,
    Equation::DesignMomentCapacity,
    Equation::ShearDepth,
    Equation::ShearKv,
    Equation::ConcreteShearCapacity,
    Equation::DesignShearCapacity,
    Equation::MinimumSteelArea,
    Equation::DuctilityLimit,
    Equation::MinimumSteelCheck,
];

// ============================================================================
// Equation Usage Tracking
// ============================================================================

/// Record of an equation being used in a calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquationUsage {
    pub equation: Equation,
    /// Where it was used (e.g. "Bending")
    pub context: String,
    /// Section or member the equation was applied to
    pub member_label: Option<String>,
}

impl EquationUsage {
    pub fn for_member(equation: Equation, context: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            equation,
            context: context.into(),
            member_label: Some(label.into()),
        }
    }
}

/// Collector for equation usage during a calculation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EquationTracker {
    usages: Vec<EquationUsage>,
}

impl EquationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_for_member(&mut self, equation: Equation, context: impl Into<String>, label: impl Into<String>) {
        self.usages.push(EquationUsage::for_member(equation, context, label));
    }

    pub fn usages(&self) -> &[EquationUsage] {
        &self.usages
    }

    pub fn is_empty(&self) -> bool {
        self.usages.is_empty()
    }

    /// Unique equations in first-use order
    pub fn unique_equations(&self) -> Vec<Equation> {
        let mut seen = HashSet::new();
        self.usages
            .iter()
            .filter(|u| seen.insert(u.equation))
            .map(|u| u.equation)
            .collect()
    }

    pub fn by_equation(&self) -> HashMap<Equation, Vec<&EquationUsage>> {
        let mut map: HashMap<Equation, Vec<&EquationUsage>> = HashMap::new();
        for usage in &self.usages {
            map.entry(usage.equation).or_default().push(usage);
        }
        map
    }

    /// Unique equations grouped by category, categories in appendix order
    pub fn by_category(&self) -> Vec<(EquationCategory, Vec<Equation>)> {
        let mut by_cat: HashMap<EquationCategory, Vec<Equation>> = HashMap::new();
        for eq in self.unique_equations() {
            by_cat.entry(eq.metadata().category).or_default().push(eq);
        }

        let mut result: Vec<_> = by_cat.into_iter().collect();
        result.sort_by_key(|(cat, _)| cat.sort_order());
        result
    }
}

// ============================================================================
// Typst Appendix Generation
// ============================================================================

impl EquationTracker {
    /// Generate typst markup for the "List of Equations" appendix.
    ///
    /// ```rust
    /// use conc_core::equations::registry::{Equation, EquationTracker};
    ///
    /// let mut tracker = EquationTracker::new();
    /// tracker.record_for_member(Equation::ShearKv, "Shear", "S1");
    ///
    /// let typst = tracker.generate_appendix_typst();
    /// assert!(typst.contains("Concrete Shear Factor"));
    /// ```
    pub fn generate_appendix_typst(&self) -> String {
        let mut output = String::new();

        output.push_str(r##"
#pagebreak()

#align(center)[
  #block(width: 100%, fill: rgb("#f0f0f0"), inset: 12pt, radius: 4pt)[
    #text(size: 18pt, weight: "bold")[Appendix: List of Equations]
  ]
]

#v(12pt)

#text(size: 10pt)[
  Formulas applied in this report, grouped by topic, with the AS 3600 clause each one comes from.
]

#v(16pt)
"##);

        let by_category = self.by_category();
        if by_category.is_empty() {
            output.push_str("#text(style: \"italic\")[No equations recorded for this report.]\n");
            return output;
        }

        let usage_by_eq = self.by_equation();

        for (category, equations) in by_category {
            output.push_str(&format!("\n== {}\n\n", category.display_name()));

            for equation in equations {
                let meta = equation.metadata();

                output.push_str(&format!("=== {}\n\n", meta.name));
                output.push_str(&format!("#text(size: 10pt)[{}]\n\n", escape_typst(meta.description)));
                output.push_str(&format!("*Formula:* {}\n\n", meta.formula_typst));
                output.push_str(&format!("*Reference:* {}\n\n", escape_typst(&meta.reference.citation())));

                if !meta.variables.is_empty() {
                    output.push_str("*Variables:*\n");
                    output.push_str("#table(\n");
                    output.push_str("  columns: (auto, 1fr, auto),\n");
                    output.push_str("  inset: 6pt,\n");
                    output.push_str("  stroke: 0.5pt,\n");
                    output.push_str("  table.header([*Symbol*], [*Description*], [*Units*]),\n");
                    for var in &meta.variables {
                        output.push_str(&format!(
                            "  [${}$], [{}], [{}],\n",
                            var.symbol,
                            escape_typst(var.description),
                            escape_typst(var.units)
                        ));
                    }
                    output.push_str(")\n\n");
                }

                if let Some(usages) = usage_by_eq.get(&equation) {
                    let mut labels: Vec<&str> = usages.iter().filter_map(|u| u.member_label.as_deref()).collect();
                    labels.sort();
                    labels.dedup();
                    if !labels.is_empty() {
                        output.push_str(&format!("*Applied to:* {}\n\n", escape_typst(&labels.join(", "))));
                    }
                }

                if !meta.assumptions.is_empty() {
                    output.push_str("*Assumptions:*\n");
                    for assumption in &meta.assumptions {
                        output.push_str(&format!("- {}\n", escape_typst(assumption)));
                    }
                    output.push('\n');
                }

                output.push_str("#v(8pt)\n");
                output.push_str("#line(length: 100%, stroke: 0.25pt + gray)\n");
                output.push_str("#v(8pt)\n\n");
            }
        }

        output
    }
}

// ============================================================================
// Markdown Generation for EQUATIONS.md
// ============================================================================

/// Generate the markdown equations reference.
///
/// ```rust
/// use conc_core::equations::registry::generate_equations_markdown;
///
/// let markdown = generate_equations_markdown();
/// assert!(markdown.contains("Concheck Equations Reference"));
/// assert!(markdown.contains("## Bending"));
/// ```
pub fn generate_equations_markdown() -> String {
    let mut output = String::with_capacity(16_000);

    output.push_str(r#"# Concheck Equations Reference

> **Auto-generated from source code. Do not edit manually.**
>
> Regenerate with: `cargo run --bin gen-equations` or `conc equations`

Every formula behind the Concheck capacity checks, with its AS 3600 clause,
source location and assumptions.

## Units

| Quantity | Unit |
|----------|------|
| Lengths | mm |
| Stresses | MPa |
| Areas | mm² (across the section width) |
| Moments | kN·m |
| Shears | kN |

---

"#);

    let categories = Equation::all_categories();

    for category in &categories {
        let equations = Equation::in_category(*category);
        if equations.is_empty() {
            continue;
        }

        output.push_str(&format!("## {}\n\n", category.display_name()));

        for equation in equations {
            let meta = equation.metadata();

            output.push_str(&format!("### {}\n\n", meta.name));
            output.push_str(&format!("{}\n\n", meta.description));
            output.push_str(&format!("**Formula:** `{}`\n\n", meta.formula_plain));

            if !meta.variables.is_empty() {
                output.push_str("**Variables:**\n\n");
                output.push_str("| Symbol | Description | Units |\n");
                output.push_str("|--------|-------------|-------|\n");
                for var in &meta.variables {
                    output.push_str(&format!(
                        "| {} | {} | {} |\n",
                        var.plain_symbol(),
                        var.description,
                        var.units
                    ));
                }
                output.push('\n');
            }

            output.push_str(&format!("**Reference:** {}\n\n", meta.reference.citation()));
            output.push_str(&format!(
                "**Source:** [`{}`]({})\n\n",
                meta.source_function, meta.source_module
            ));

            if !meta.assumptions.is_empty() {
                output.push_str("**Assumptions:**\n");
                for assumption in &meta.assumptions {
                    output.push_str(&format!("- {}\n", assumption));
                }
                output.push('\n');
            }

            output.push_str("---\n\n");
        }
    }

    output.push_str(&format!(
        "## Statistics\n\n- **Total Equations:** {}\n- **Categories:** {}\n",
        ALL_EQUATIONS.len(),
        categories.len()
    ));

    output
}
