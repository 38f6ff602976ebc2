//! # conc
//!
//! Command line front end for `conc_core`: single-section checks, an
//! interactive prompt, parameter sweeps from study files, the preset chart
//! set, PDF reports and the equations reference.
//!
//! Logging goes to stderr. The default level is `warn`; `-v` gives `info`,
//! `-vv` gives `debug`, and `RUST_LOG` overrides both.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context};
use clap::{ArgAction, Args, Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use conc_core::calculations::check_section_tracked;
use conc_core::equations::{generate_equations_markdown, EquationTracker};
use conc_core::file_io::{self, OutputOptions};
use conc_core::materials::{BarDesignation, ConcreteGrade};
use conc_core::pdf::{render_section_report_pdf, section_report_typst, ReportInfo};
use conc_core::presets::Preset;
use conc_core::study::Study;
use conc_core::sweep;
use conc_core::{check_section, BeamConfig, CalcError, DuctilityClass, MemberType, SectionSummary};

#[derive(Parser, Debug)]
#[command(
    name = "conc",
    version,
    about = "AS3600 reinforced concrete section capacity checks and charts"
)]
struct Cli {
    /// More log output (-v info, -vv debug).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check one section for bending, shear and minimum steel.
    Check {
        #[command(flatten)]
        section: SectionArgs,

        /// Print the results (or the error) as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Prompt for each input, showing its default, then check the section.
    Interactive {
        /// Print the results as JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Run every chart in a study file and write the outputs.
    Sweep {
        /// Path to the .ccs study file.
        study: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Regenerate the preset chart set.
    Presets {
        #[command(flatten)]
        output: OutputArgs,

        /// Only these presets (repeatable). Defaults to all of them.
        #[arg(long)]
        only: Vec<Preset>,

        /// List the presets and exit.
        #[arg(long)]
        list: bool,
    },

    /// Write a PDF calculation report for one section.
    Report {
        #[command(flatten)]
        section: SectionArgs,

        /// Where to write the PDF.
        #[arg(long, short, default_value = "section_report.pdf")]
        output: PathBuf,

        #[arg(long, default_value = "")]
        engineer: String,

        #[arg(long, default_value = "")]
        job_id: String,

        #[arg(long, default_value = "Section capacity check")]
        title: String,

        /// Also write the typst source next to the PDF.
        #[arg(long)]
        typst: bool,
    },

    /// Print the markdown equations reference.
    Equations {
        /// Write to a file instead of stdout.
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Write a template study file.
    InitStudy {
        /// Path of the new .ccs file.
        path: PathBuf,

        #[arg(long, default_value = "")]
        engineer: String,

        #[arg(long, default_value = "")]
        job_id: String,

        #[arg(long, default_value = "Section study")]
        title: String,

        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

impl Commands {
    fn wants_json(&self) -> bool {
        matches!(self, Commands::Check { json: true, .. } | Commands::Interactive { json: true })
    }
}

/// Section inputs, each defaulted.
#[derive(Args, Debug, Clone)]
struct SectionArgs {
    /// Overall depth D (mm).
    #[arg(long, default_value_t = 200.0)]
    depth: f64,

    /// Section width b (mm).
    #[arg(long, default_value_t = 1000.0)]
    width: f64,

    /// Clear cover to the tension bars (mm).
    #[arg(long, default_value_t = 20.0)]
    cover: f64,

    /// Concrete strength f'c (MPa).
    #[arg(long, default_value_t = 32.0)]
    fc: f64,

    /// Bar diameter db (mm).
    #[arg(long, default_value_t = 7.6)]
    db: f64,

    /// Bar spacing s (mm).
    #[arg(long, default_value_t = 100.0)]
    spacing: f64,

    /// Reinforcement ductility class (L or N).
    #[arg(long, default_value = "L")]
    ductility: DuctilityClass,

    /// Standard bar or mesh wire (N12, SL82, ...), setting db and the ductility class.
    #[arg(long, conflicts_with_all = ["db", "ductility"])]
    bar: Option<BarDesignation>,

    /// Standard concrete grade (N20 to N100), setting f'c.
    #[arg(long, conflicts_with = "fc")]
    grade: Option<ConcreteGrade>,

    /// Steel yield strength fsy (MPa).
    #[arg(long, default_value_t = 500.0)]
    fsy: f64,

    /// Effective depth d (mm), replacing D - cover - db/2.
    #[arg(long)]
    effective_depth: Option<f64>,

    /// Member type for minimum steel: two-way, one-way, beam, flat, or a factor.
    #[arg(long, default_value = "one-way", value_parser = MemberType::parse)]
    member_type: MemberType,
}

impl SectionArgs {
    fn config(&self) -> BeamConfig {
        let mut config = BeamConfig {
            depth_mm: self.depth,
            width_mm: self.width,
            cover_mm: self.cover,
            fc_mpa: self.fc,
            bar_diameter_mm: self.db,
            bar_spacing_mm: self.spacing,
            ductility: self.ductility,
            fsy_mpa: self.fsy,
            effective_depth_mm: self.effective_depth,
        };
        if let Some(bar) = self.bar {
            config = config.with_bar(bar);
        }
        if let Some(grade) = self.grade {
            config = config.with_grade(grade);
        }
        config
    }
}

#[derive(Args, Debug, Clone)]
struct OutputArgs {
    /// Directory for the chart files.
    #[arg(long, default_value = "charts")]
    out_dir: PathBuf,

    /// Also write the sweep data as JSON.
    #[arg(long)]
    json: bool,

    /// Also write the chart typst source.
    #[arg(long)]
    typst: bool,
}

impl OutputArgs {
    fn options(&self) -> OutputOptions {
        OutputOptions {
            json: self.json,
            typst: self.typst,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let json_errors = cli.cmd.wants_json();
    match run(cli.cmd) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let code = ExitCode::from(exit_code(&err));
            if json_errors {
                if let Some(calc) = err.downcast_ref::<CalcError>() {
                    if let Ok(json) = serde_json::to_string_pretty(calc) {
                        println!("{}", json);
                        return code;
                    }
                }
            }
            eprintln!("Error: {:#}", err);
            code
        }
    }
}

/// 2 for bad input, 1 for everything else.
fn exit_code(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<CalcError>() {
        Some(calc) if calc.is_input_error() => 2,
        _ => 1,
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(cmd: Commands) -> anyhow::Result<()> {
    match cmd {
        Commands::Check { section, json } => cmd_check(&section, json),
        Commands::Interactive { json } => cmd_interactive(json),
        Commands::Sweep { study, output } => cmd_sweep(&study, &output),
        Commands::Presets { output, only, list } => cmd_presets(&output, &only, list),
        Commands::Report {
            section,
            output,
            engineer,
            job_id,
            title,
            typst,
        } => cmd_report(&section, &output, ReportInfo::new(engineer, job_id, title), typst),
        Commands::Equations { output } => cmd_equations(output.as_deref()),
        Commands::InitStudy {
            path,
            engineer,
            job_id,
            title,
            force,
        } => cmd_init_study(&path, Study::template(engineer, job_id, title), force),
    }
}

fn cmd_check(section: &SectionArgs, json: bool) -> anyhow::Result<()> {
    let summary = check_section(&section.config(), section.member_type)?;
    print_summary(&summary, json)
}

fn cmd_interactive(json: bool) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();

    let (config, member_type) = prompt_section(&mut input, &mut out)?;
    writeln!(out)?;
    let summary = check_section(&config, member_type)?;
    print_summary(&summary, json)
}

fn cmd_sweep(study_path: &Path, output: &OutputArgs) -> anyhow::Result<()> {
    let study = file_io::load_study(study_path)
        .with_context(|| format!("loading study {}", study_path.display()))?;
    study.validate()?;
    if study.charts.is_empty() {
        bail!("{} has no charts", study_path.display());
    }

    let stems = study.output_stems();
    let mut failed = 0;
    for ((chart, sweep_def), stem) in study.sweeps().into_iter().zip(&stems) {
        let written = sweep::run(&sweep_def)
            .and_then(|result| file_io::write_chart_outputs(&result, &output.out_dir, stem, output.options()));
        match written {
            Ok(paths) => print_written(&paths),
            Err(e) => {
                error!(chart = %chart.title, error = %e, "chart failed");
                failed += 1;
            }
        }
    }

    if failed > 0 {
        bail!("{} of {} charts failed", failed, stems.len());
    }
    info!(charts = stems.len(), out_dir = %output.out_dir.display(), "study complete");
    Ok(())
}

fn cmd_presets(output: &OutputArgs, only: &[Preset], list: bool) -> anyhow::Result<()> {
    if list {
        for preset in Preset::ALL {
            println!("{:<20} {}", preset.name(), preset.description());
        }
        return Ok(());
    }

    let presets: Vec<Preset> = if only.is_empty() {
        Preset::ALL.to_vec()
    } else {
        only.to_vec()
    };

    for preset in presets {
        let result = preset
            .run()
            .with_context(|| format!("running preset {}", preset))?;
        let paths = file_io::write_chart_outputs(&result, &output.out_dir, preset.name(), output.options())?;
        print_written(&paths);
    }
    Ok(())
}

fn cmd_report(section: &SectionArgs, output: &Path, info: ReportInfo, typst: bool) -> anyhow::Result<()> {
    let mut tracker = EquationTracker::new();
    let label = if info.title.is_empty() { "Section" } else { info.title.as_str() };
    let summary = check_section_tracked(&section.config(), section.member_type, label, &mut tracker)?;

    let pdf = render_section_report_pdf(&summary, &info, &tracker)?;
    file_io::write_atomic(output, &pdf).with_context(|| format!("writing {}", output.display()))?;
    let mut written = vec![output.to_path_buf()];

    if typst {
        let source_path = output.with_extension("typ");
        file_io::write_atomic(&source_path, section_report_typst(&summary, &info, &tracker).as_bytes())?;
        written.push(source_path);
    }

    print_written(&written);
    if !summary.passes() {
        for warning in summary.warnings() {
            eprintln!("warning: {}", warning);
        }
    }
    Ok(())
}

fn cmd_equations(output: Option<&Path>) -> anyhow::Result<()> {
    let markdown = generate_equations_markdown();
    match output {
        Some(path) => {
            fs::write(path, &markdown).with_context(|| format!("writing {}", path.display()))?;
            print_written(&[path.to_path_buf()]);
        }
        None => print!("{}", markdown),
    }
    Ok(())
}

fn cmd_init_study(path: &Path, study: Study, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    file_io::save_study(&study, path)?;
    println!("Wrote {} with {} charts", path.display(), study.chart_count());
    Ok(())
}

// ============================================================================
// Interactive prompts
// ============================================================================

/// Prompt for a number; blank or unparsable input keeps the default.
fn prompt_f64<R: BufRead, W: Write>(input: &mut R, out: &mut W, label: &str, default: f64) -> io::Result<f64> {
    write!(out, "{} [{}]: ", label, default)?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(default);
    }
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(default);
    }
    match trimmed.parse() {
        Ok(value) => Ok(value),
        Err(_) => {
            writeln!(out, "  not a number, using {}", default)?;
            Ok(default)
        }
    }
}

/// Prompt for an optional number; blank or unparsable input gives `None`.
fn prompt_optional_f64<R: BufRead, W: Write>(input: &mut R, out: &mut W, label: &str) -> io::Result<Option<f64>> {
    write!(out, "{} [derived]: ", label)?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 || line.trim().is_empty() {
        return Ok(None);
    }
    match line.trim().parse() {
        Ok(value) => Ok(Some(value)),
        Err(_) => {
            writeln!(out, "  not a number, deriving it")?;
            Ok(None)
        }
    }
}

/// Prompt for a value parsed by `parse`; blank input keeps the default.
fn prompt_parsed<R, W, T>(
    input: &mut R,
    out: &mut W,
    label: &str,
    default: T,
    parse: impl Fn(&str) -> Result<T, CalcError>,
) -> io::Result<T>
where
    R: BufRead,
    W: Write,
    T: std::fmt::Display,
{
    write!(out, "{} [{}]: ", label, default)?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 || line.trim().is_empty() {
        return Ok(default);
    }
    match parse(line.trim()) {
        Ok(value) => Ok(value),
        Err(e) => {
            writeln!(out, "  {}; using {}", e, default)?;
            Ok(default)
        }
    }
}

fn prompt_section<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> io::Result<(BeamConfig, MemberType)> {
    let d = BeamConfig::default();

    writeln!(out, "Section inputs (press Enter to keep the default)")?;
    let config = BeamConfig {
        depth_mm: prompt_f64(input, out, "Overall depth D (mm)", d.depth_mm)?,
        width_mm: prompt_f64(input, out, "Width b (mm)", d.width_mm)?,
        cover_mm: prompt_f64(input, out, "Cover (mm)", d.cover_mm)?,
        fc_mpa: prompt_f64(input, out, "f'c (MPa)", d.fc_mpa)?,
        bar_diameter_mm: prompt_f64(input, out, "Bar diameter db (mm)", d.bar_diameter_mm)?,
        bar_spacing_mm: prompt_f64(input, out, "Bar spacing s (mm)", d.bar_spacing_mm)?,
        ductility: prompt_parsed(input, out, "Ductility class (L/N)", d.ductility, str::parse)?,
        fsy_mpa: prompt_f64(input, out, "fsy (MPa)", d.fsy_mpa)?,
        effective_depth_mm: prompt_optional_f64(input, out, "Effective depth d (mm)")?,
    };
    let member_type = prompt_parsed(
        input,
        out,
        "Member type (two-way/one-way/flat or factor)",
        MemberType::default(),
        MemberType::parse,
    )?;
    Ok((config, member_type))
}

// ============================================================================
// Output
// ============================================================================

fn print_summary(summary: &SectionSummary, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(summary)?);
        return Ok(());
    }

    let b = &summary.bending;
    let v = &summary.shear;
    let m = &summary.minimum_steel;

    println!("═══════════════════════════════════════════════");
    println!("  SECTION CAPACITY (AS 3600)");
    println!("═══════════════════════════════════════════════");
    println!();
    println!("Input:    {}", summary.config.describe());
    println!("Member:   {}", summary.member_type.display_name());
    println!();
    println!("Derived:");
    println!("  d      = {:.1} mm", b.effective_depth_mm);
    println!("  Ast    = {:.1} mm²", b.steel_area_mm2);
    println!("  α2     = {:.3}   γ = {:.3}", b.alpha2, b.gamma);
    println!();
    println!("Bending:");
    println!("  dn     = {:.2} mm   ku = {:.3} {}", b.neutral_axis_depth_mm, b.ku, status_icon(!b.ku_exceeds_limit));
    println!("  Muo    = {:.2} kN·m   φ = {:.3}", b.nominal_moment_knm, b.phi);
    println!("  φMuo   = {:.2} kN·m", b.design_moment_knm);
    println!();
    println!("Shear:");
    println!("  dv     = {:.1} mm   kv = {:.4}", v.shear_depth_mm, v.kv);
    println!("  Vuc    = {:.2} kN   φ = {:.2}", v.concrete_shear_kn, v.phi);
    println!("  φVuc   = {:.2} kN", v.design_shear_kn);
    println!();
    println!("Minimum steel:");
    println!("  f'ct.f = {:.3} MPa   f = {:.2}", m.fctf_mpa, m.factor);
    println!(
        "  Ast.min = {:.1} mm² (provided {:.1} mm², ratio {:.2}) {}",
        m.min_steel_mm2,
        m.provided_steel_mm2,
        m.ratio(),
        status_icon(m.satisfies_minimum)
    );
    println!();
    println!("═══════════════════════════════════════════════");
    println!("  RESULT: {}", if summary.passes() { "PASS" } else { "FAIL" });
    println!("═══════════════════════════════════════════════");
    for warning in summary.warnings() {
        println!("  ! {}", warning);
    }
    Ok(())
}

fn print_written(paths: &[PathBuf]) {
    for path in paths {
        println!("wrote {}", path.display());
    }
}

fn status_icon(pass: bool) -> &'static str {
    if pass { "[OK]" } else { "[FAIL]" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_section_args_defaults() {
        let cli = Cli::parse_from(["conc", "check"]);
        match cli.cmd {
            Commands::Check { section, json } => {
                assert!(!json);
                assert_eq!(section.config(), BeamConfig::default());
                assert_eq!(section.member_type, MemberType::OneWaySlabOrBeam);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_section_args_flags() {
        let cli = Cli::parse_from([
            "conc", "-vv", "check", "--depth", "300", "--ductility", "n", "--member-type", "flat", "--json",
        ]);
        assert_eq!(cli.verbose, 2);
        assert!(cli.cmd.wants_json());
        match cli.cmd {
            Commands::Check { section, .. } => {
                let config = section.config();
                assert_eq!(config.depth_mm, 300.0);
                assert_eq!(config.ductility, DuctilityClass::N);
                assert_eq!(section.member_type, MemberType::FlatSlab);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_prompt_defaults_on_blank_and_eof() {
        let mut input = Cursor::new("\n");
        let mut out = Vec::new();
        assert_eq!(prompt_f64(&mut input, &mut out, "D", 200.0).unwrap(), 200.0);
        assert_eq!(prompt_f64(&mut input, &mut out, "b", 1000.0).unwrap(), 1000.0);
        assert!(String::from_utf8(out).unwrap().contains("D [200]: "));
    }

    #[test]
    fn test_prompt_section_reads_values() {
        let mut input = Cursor::new("300\n\n25\nabc\n12\n150\nN\n\n\nflat\n");
        let mut out = Vec::new();
        let (config, member_type) = prompt_section(&mut input, &mut out).unwrap();
        assert_eq!(config.depth_mm, 300.0);
        assert_eq!(config.width_mm, 1000.0);
        assert_eq!(config.cover_mm, 25.0);
        assert_eq!(config.fc_mpa, 32.0);
        assert_eq!(config.bar_diameter_mm, 12.0);
        assert_eq!(config.bar_spacing_mm, 150.0);
        assert_eq!(config.ductility, DuctilityClass::N);
        assert_eq!(config.effective_depth_mm, None);
        assert_eq!(member_type, MemberType::FlatSlab);
        assert!(String::from_utf8(out).unwrap().contains("not a number"));
    }

    #[test]
    fn test_prompt_section_effective_depth() {
        let mut input = Cursor::new("\n\n\n\n\n\n\n\n150\n\n");
        let mut out = Vec::new();
        let (config, _) = prompt_section(&mut input, &mut out).unwrap();
        assert_eq!(config.effective_depth_mm, Some(150.0));
        assert_eq!(config.effective_depth_mm(), 150.0);
        assert!(String::from_utf8(out).unwrap().contains("Effective depth d (mm) [derived]: "));
    }

    #[test]
    fn test_bar_and_grade_flags() {
        let cli = Cli::parse_from(["conc", "check", "--bar", "N12", "--grade", "N40"]);
        match cli.cmd {
            Commands::Check { section, .. } => {
                let config = section.config();
                assert_eq!(config.bar_diameter_mm, 12.0);
                assert_eq!(config.ductility, DuctilityClass::N);
                assert_eq!(config.fc_mpa, 40.0);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_bar_conflicts_with_db() {
        assert!(Cli::try_parse_from(["conc", "check", "--bar", "N12", "--db", "10"]).is_err());
        assert!(Cli::try_parse_from(["conc", "check", "--grade", "N40", "--fc", "25"]).is_err());
    }

    #[test]
    fn test_exit_code_for_input_errors() {
        let input = anyhow::Error::new(CalcError::invalid_input("depth_mm", "-1", "Depth must be positive"));
        assert_eq!(exit_code(&input), 2);
        let file = anyhow::Error::new(CalcError::file_error("read", "a.ccs", "missing"));
        assert_eq!(exit_code(&file), 1);
        let wrapped = anyhow::Error::new(CalcError::missing_field("meta.version")).context("loading study");
        assert_eq!(exit_code(&wrapped), 2);
    }
}
