//! # PDF Generation Module
//!
//! Generates PDF section reports and charts using Typst.
//!
//! ## Architecture
//!
//! - Typst templates are embedded as string constants
//! - Data is injected via string replacement before compilation
//! - Fonts come from `typst-assets`, so no system fonts are needed
//! - Output is raw PDF bytes (`Vec<u8>`)
//!
//! ## Example
//!
//! ```rust,no_run
//! use conc_core::calculations::{check_section_tracked, MemberType};
//! use conc_core::equations::EquationTracker;
//! use conc_core::pdf::{render_section_report_pdf, ReportInfo};
//! use conc_core::section::BeamConfig;
//!
//! let mut tracker = EquationTracker::new();
//! let summary = check_section_tracked(&BeamConfig::default(), MemberType::default(), "S1", &mut tracker).unwrap();
//! let info = ReportInfo::new("Jane Engineer", "25-001", "S1 ground floor slab");
//! let pdf = render_section_report_pdf(&summary, &info, &tracker).unwrap();
//! std::fs::write("section_report.pdf", pdf).unwrap();
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;
use typst::diag::{FileError, FileResult};
use typst::foundations::{Bytes, Datetime};
use typst::syntax::{FileId, Source};
use typst::text::{Font, FontBook};
use typst::utils::LazyHash;
use typst::{Library, LibraryExt, World};
use typst_pdf::PdfOptions;

use crate::calculations::SectionSummary;
use crate::equations::registry::EquationTracker;
use crate::errors::{CalcError, CalcResult};

// ============================================================================
// Typst World Implementation
// ============================================================================

/// A minimal Typst world for compiling documents without external files.
struct PdfWorld {
    main: Source,
    book: LazyHash<FontBook>,
    fonts: Vec<Font>,
    library: LazyHash<Library>,
}

impl PdfWorld {
    fn new(source: String) -> Self {
        let fonts = Self::load_fonts();
        let book = FontBook::from_fonts(&fonts);

        PdfWorld {
            main: Source::detached(source),
            book: LazyHash::new(book),
            fonts,
            library: LazyHash::new(Library::default()),
        }
    }

    /// Bundled fonts from typst-assets (Libertinus, New Computer Modern, DejaVu Sans Mono)
    fn load_fonts() -> Vec<Font> {
        typst_assets::fonts()
            .flat_map(|font_bytes| Font::iter(Bytes::new(font_bytes.to_vec())))
            .collect()
    }
}

impl World for PdfWorld {
    fn library(&self) -> &LazyHash<Library> {
        &self.library
    }

    fn book(&self) -> &LazyHash<FontBook> {
        &self.book
    }

    fn main(&self) -> FileId {
        self.main.id()
    }

    fn source(&self, id: FileId) -> FileResult<Source> {
        if id == self.main.id() {
            Ok(self.main.clone())
        } else {
            Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
        }
    }

    fn file(&self, id: FileId) -> FileResult<Bytes> {
        Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
    }

    fn font(&self, index: usize) -> Option<Font> {
        self.fonts.get(index).cloned()
    }

    fn today(&self, _offset: Option<i64>) -> Option<Datetime> {
        let now = Utc::now();
        Datetime::from_ymd(
            now.format("%Y").to_string().parse().ok()?,
            now.format("%m").to_string().parse().ok()?,
            now.format("%d").to_string().parse().ok()?,
        )
    }
}

/// Compile a typst document to PDF bytes.
pub fn compile_typst(source: String) -> CalcResult<Vec<u8>> {
    let world = PdfWorld::new(source);

    let warned = typst::compile(&world);
    for warning in &warned.warnings {
        debug!(message = %warning.message, "typst warning");
    }

    let document = warned.output.map_err(|errors| {
        let error_msgs: Vec<String> = errors.iter().map(|e| e.message.to_string()).collect();
        CalcError::internal(format!("Typst compilation failed: {}", error_msgs.join("; ")))
    })?;

    typst_pdf::pdf(&document, &PdfOptions::default()).map_err(|errors| {
        let error_msgs: Vec<String> = errors.iter().map(|e| e.message.to_string()).collect();
        CalcError::internal(format!("PDF rendering failed: {}", error_msgs.join("; ")))
    })
}

// ============================================================================
// Section Report
// ============================================================================

/// Title block details for a report
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportInfo {
    pub engineer: String,
    pub job_id: String,
    pub title: String,
}

impl ReportInfo {
    pub fn new(engineer: impl Into<String>, job_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            engineer: engineer.into(),
            job_id: job_id.into(),
            title: title.into(),
        }
    }
}

const SECTION_TEMPLATE: &str = r##"
#set page(
  paper: "a4",
  margin: (top: 25mm, bottom: 25mm, left: 20mm, right: 20mm),
  header: align(right)[
    #text(size: 9pt, fill: gray)[Concheck RC Section Check]
  ],
  footer: context [
    #line(length: 100%, stroke: 0.5pt + gray)
    #v(4pt)
    #grid(
      columns: (1fr, 1fr, 1fr),
      align(left)[#text(size: 9pt)[Job: {{JOB_ID}}]],
      align(center)[#text(size: 9pt)[Page #counter(page).display()]],
      align(right)[#text(size: 9pt)[{{DATE}}]],
    )
  ]
)

#set text(size: 10pt)

#align(center)[
  #block(width: 100%, fill: rgb("#f0f0f0"), inset: 12pt, radius: 4pt)[
    #text(size: 18pt, weight: "bold")[Reinforced Concrete Section Capacity]
    #v(4pt)
    #text(size: 14pt)[{{TITLE}}]
  ]
]

#v(12pt)

#grid(
  columns: (1fr, 1fr),
  gutter: 20pt,
  [
    *Project Information*
    #v(4pt)
    #table(
      columns: (auto, 1fr),
      stroke: none,
      row-gutter: 4pt,
      [Engineer:], [{{ENGINEER}}],
      [Job ID:], [{{JOB_ID}}],
      [Date:], [{{DATE}}],
    )
  ],
  [
    *Code Reference*
    #v(4pt)
    AS 3600-2018 Concrete Structures. Singly reinforced rectangular section without shear reinforcement.
  ]
)

#v(12pt)
#line(length: 100%, stroke: 0.5pt)
#v(8pt)

== Input Parameters

#table(
  columns: (1fr, auto, auto),
  inset: 6pt,
  stroke: 0.5pt,
  align: (left, right, left),
  table.header([*Parameter*], [*Value*], [*Unit*]),
  [Overall depth D], [{{DEPTH}}], [mm],
  [Width b], [{{WIDTH}}], [mm],
  [Cover], [{{COVER}}], [mm],
  [Concrete strength f'#sub[c]], [{{FC}}], [MPa],
  [Bar diameter d#sub[b]], [{{DB}}], [mm],
  [Bar spacing s], [{{SPACING}}], [mm],
  [Ductility class], [{{DUCTILITY}}], [],
  [Yield strength f#sub[sy]], [{{FSY}}], [MPa],
  [Member type], [{{MEMBER_TYPE}}], [],
)

#v(12pt)

== Derived Quantities

#table(
  columns: (1fr, auto, auto),
  inset: 6pt,
  stroke: 0.5pt,
  align: (left, right, left),
  table.header([*Quantity*], [*Value*], [*Unit*]),
  [Effective depth d{{D_NOTE}}], [{{D}}], [mm],
  [Bar area A#sub[b]], [{{BAR_AREA}}], [mm²],
  [Tension steel A#sub[st]], [{{AST}}], [mm²],
  [Stress block factor α#sub[2]], [{{ALPHA2}}], [],
  [Stress block factor γ], [{{GAMMA}}], [],
  [Flexural tensile strength f'#sub[ct.f]], [{{FCTF}}], [MPa],
)

#v(12pt)
#line(length: 100%, stroke: 0.5pt)
#v(8pt)

== Bending

$ d_n = (A_"st" f_"sy") / (alpha_2 f'_c b gamma) = {{DN}} "mm" $

$ k_u = d_n / d = {{KU}} $

$ M_"uo" = A_"st" f_"sy" (d - 0.5 gamma k_u d) = {{MUO}} "kN·m" $

$ phi = {{PHI_B}}, quad phi M_"uo" = {{PHI_MUO}} "kN·m" $

== Shear

$ d_v = max(0.72 D, 0.9 d) = {{DV}} "mm", quad k_v = {{KV}} $

$ V_"uc" = k_v b_v d_v sqrt(f'_c) = {{VUC}} "kN" $

$ phi = 0.75, quad phi V_"uc" = {{PHI_VUC}} "kN" $

== Minimum Reinforcement

$ A_"st.min" = f b d (D / d)^2 f'_"ct.f" / f_"sy" = {{AST_MIN}} "mm"^2 quad (f = {{FACTOR}}) $

#v(12pt)

=== Summary

#table(
  columns: (1fr, auto, auto),
  inset: 6pt,
  stroke: 0.5pt,
  align: (left, right, center),
  table.header([*Check*], [*Value*], [*Status*]),
  [Design moment capacity φM#sub[uo]], [{{PHI_MUO}} kN·m], [-],
  [Design shear capacity φV#sub[uc]], [{{PHI_VUC}} kN], [-],
  [Ductility k#sub[u] ≤ 0.36], [{{KU}}], [{{KU_STATUS}}],
  [A#sub[st] ≥ A#sub[st.min]], [{{AST}} ≥ {{AST_MIN}} mm²], [{{MIN_STATUS}}],
)

#v(16pt)

#let pass_status = "{{OVERALL_PASS}}"
#align(center)[
  #block(
    width: auto,
    fill: if pass_status == "PASS" { rgb("#d4edda") } else { rgb("#f8d7da") },
    inset: 16pt,
    radius: 4pt
  )[
    #text(size: 16pt, weight: "bold")[
      #if pass_status == "PASS" [
        CHECKS SATISFIED
      ] else [
        CHECKS NOT SATISFIED
      ]
    ]
  ]
]

{{WARNINGS}}

#v(24pt)
#line(length: 100%, stroke: 0.5pt)
#v(8pt)

#text(size: 9pt, fill: gray)[
  Generated by Concheck. \
  A sanity check only: verify against a complete design before relying on these values.
]
"##;

/// Typst source for a section report, with the equations appendix when
/// `tracker` recorded anything.
pub fn section_report_typst(summary: &SectionSummary, info: &ReportInfo, tracker: &EquationTracker) -> String {
    let config = &summary.config;
    let b = &summary.bending;
    let v = &summary.shear;
    let m = &summary.minimum_steel;
    let status = |ok: bool| if ok { "OK" } else { "FAIL" };

    let warnings = summary.warnings();
    let warnings_markup = if warnings.is_empty() {
        String::new()
    } else {
        let mut out = String::from("#v(8pt)\n*Warnings:*\n");
        for w in &warnings {
            out.push_str(&format!("- {}\n", escape_typst(w)));
        }
        out
    };

    let mut source = SECTION_TEMPLATE
        .replace("{{TITLE}}", &escape_typst(&info.title))
        .replace("{{ENGINEER}}", &escape_typst(&info.engineer))
        .replace("{{JOB_ID}}", &escape_typst(&info.job_id))
        .replace("{{DATE}}", &Utc::now().format("%Y-%m-%d").to_string())
        .replace("{{DEPTH}}", &format!("{:.1}", config.depth_mm))
        .replace("{{WIDTH}}", &format!("{:.0}", config.width_mm))
        .replace("{{COVER}}", &format!("{:.1}", config.cover_mm))
        .replace("{{FC}}", &format!("{:.0}", config.fc_mpa))
        .replace("{{DB}}", &format!("{:.2}", config.bar_diameter_mm))
        .replace("{{SPACING}}", &format!("{:.0}", config.bar_spacing_mm))
        .replace("{{DUCTILITY}}", config.ductility.display_name())
        .replace("{{FSY}}", &format!("{:.0}", config.fsy_mpa))
        .replace("{{MEMBER_TYPE}}", &escape_typst(&summary.member_type.display_name()))
        .replace(
            "{{D_NOTE}}",
            if config.has_effective_depth_override() { " (given)" } else { "" },
        )
        .replace("{{D}}", &format!("{:.1}", b.effective_depth_mm))
        .replace("{{BAR_AREA}}", &format!("{:.0}", config.bar_area_mm2()))
        .replace("{{AST}}", &format!("{:.0}", b.steel_area_mm2))
        .replace("{{ALPHA2}}", &format!("{:.3}", b.alpha2))
        .replace("{{GAMMA}}", &format!("{:.3}", b.gamma))
        .replace("{{FCTF}}", &format!("{:.2}", m.fctf_mpa))
        .replace("{{DN}}", &format!("{:.2}", b.neutral_axis_depth_mm))
        .replace("{{KU}}", &format!("{:.3}", b.ku))
        .replace("{{MUO}}", &format!("{:.2}", b.nominal_moment_knm))
        .replace("{{PHI_B}}", &format!("{:.3}", b.phi))
        .replace("{{PHI_MUO}}", &format!("{:.2}", b.design_moment_knm))
        .replace("{{DV}}", &format!("{:.1}", v.shear_depth_mm))
        .replace("{{KV}}", &format!("{:.3}", v.kv))
        .replace("{{VUC}}", &format!("{:.2}", v.concrete_shear_kn))
        .replace("{{PHI_VUC}}", &format!("{:.2}", v.design_shear_kn))
        .replace("{{AST_MIN}}", &format!("{:.0}", m.min_steel_mm2))
        .replace("{{FACTOR}}", &format!("{:.2}", m.factor))
        .replace("{{KU_STATUS}}", status(!b.ku_exceeds_limit))
        .replace("{{MIN_STATUS}}", status(m.satisfies_minimum))
        .replace("{{OVERALL_PASS}}", if summary.passes() { "PASS" } else { "FAIL" })
        .replace("{{WARNINGS}}", &warnings_markup);

    if !tracker.is_empty() {
        source.push_str(&tracker.generate_appendix_typst());
    }

    source
}

/// Render a single-section calculation report to PDF.
pub fn render_section_report_pdf(
    summary: &SectionSummary,
    info: &ReportInfo,
    tracker: &EquationTracker,
) -> CalcResult<Vec<u8>> {
    compile_typst(section_report_typst(summary, info, tracker))
}

/// Escape user-provided text for use inside typst markup.
///
/// Line breaks become spaces. A leading `=`, `-`, `+` or `1.` would start a
/// heading or list, so the marker is escaped.
pub fn escape_typst(s: &str) -> String {
    let text: String = s.chars().map(|c| if c == '\n' || c == '\r' { ' ' } else { c }).collect();
    let lead = text.len() - text.trim_start().len();
    let digits = text[lead..].chars().take_while(|c| c.is_ascii_digit()).count();
    let enum_dot = (digits > 0 && text[lead + digits..].starts_with('.')).then_some(lead + digits);

    let mut out = String::with_capacity(text.len() + 8);
    for (i, c) in text.char_indices() {
        let marker = (i == lead && matches!(c, '=' | '-' | '+')) || Some(i) == enum_dot;
        if marker || matches!(c, '*' | '_' | '#' | '$' | '@' | '<' | '>' | '[' | ']' | '\\' | '`' | '/' | '~') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::{check_section, check_section_tracked, MemberType};
    use crate::section::BeamConfig;

    #[test]
    fn test_escape_typst() {
        assert_eq!(escape_typst("Job #1 *draft*"), "Job \\#1 \\*draft\\*");
        assert_eq!(escape_typst("a@b [c]"), "a\\@b \\[c\\]");
        assert_eq!(escape_typst("plain text"), "plain text");
        assert_eq!(escape_typst("f'c = 25 MPa"), "f'c = 25 MPa");
    }

    #[test]
    fn test_escape_typst_comments_and_markers() {
        assert_eq!(escape_typst("Shear // depth"), "Shear \\/\\/ depth");
        assert_eq!(escape_typst("a /* b"), "a \\/\\* b");
        assert_eq!(escape_typst("= Level 3"), "\\= Level 3");
        assert_eq!(escape_typst("  - item"), "  \\- item");
        assert_eq!(escape_typst("+ item"), "\\+ item");
        assert_eq!(escape_typst("1. First"), "1\\. First");
        assert_eq!(escape_typst("12.5 kN"), "12\\.5 kN");
        assert_eq!(escape_typst("a\nb"), "a b");
        assert_eq!(escape_typst("x~y"), "x\\~y");
    }

    #[test]
    fn test_report_pdf_with_comment_markers_in_text() {
        let summary = check_section(&BeamConfig::default(), MemberType::default()).unwrap();
        let info = ReportInfo::new("A // B", "J-1 /* draft", "= Slab\n- S1");
        let pdf = render_section_report_pdf(&summary, &info, &EquationTracker::new()).unwrap();
        assert!(pdf.starts_with(b"%PDF"));
    }

    #[test]
    fn test_report_source_filled() {
        let summary = check_section(&BeamConfig::default(), MemberType::default()).unwrap();
        let info = ReportInfo::new("Test Engineer", "T-001", "Slab S1");
        let source = section_report_typst(&summary, &info, &EquationTracker::new());

        assert!(!source.contains("{{"), "unfilled placeholder");
        assert!(source.contains("Slab S1"));
        assert!(source.contains("25.13"));
        assert!(source.contains("67.28"));
        assert!(source.contains("\"PASS\""));
        assert!(!source.contains("Appendix: List of Equations"));
    }

    #[test]
    fn test_report_lists_warnings() {
        let config = BeamConfig::default().with_bar_spacing(300.0);
        let summary = check_section(&config, MemberType::default()).unwrap();
        let source = section_report_typst(&summary, &ReportInfo::default(), &EquationTracker::new());
        assert!(source.contains("*Warnings:*"));
        assert!(source.contains("\"FAIL\""));
    }

    #[test]
    fn test_section_report_pdf() {
        let mut tracker = EquationTracker::new();
        let summary =
            check_section_tracked(&BeamConfig::default(), MemberType::default(), "S1", &mut tracker).unwrap();
        let info = ReportInfo::new("Test Engineer", "T-001", "Slab S1");

        let pdf = render_section_report_pdf(&summary, &info, &tracker);
        assert!(pdf.is_ok(), "PDF generation failed: {:?}", pdf.err());
        let pdf_bytes = pdf.unwrap();
        assert!(pdf_bytes.starts_with(b"%PDF"), "Output is not a valid PDF");
        assert!(pdf_bytes.len() > 1000, "PDF seems too small");
    }

    #[test]
    fn test_compile_error_reported() {
        let err = compile_typst("#let x = ".to_string()).unwrap_err();
        assert_eq!(err.error_code(), "INTERNAL_ERROR");
    }
}
