//! CLI binary for md2report.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `CompileConfig` and prints results.

use anyhow::{Context, Result};
use clap::Parser;
use md2report::{
    compile, normalize, ArtifactFormat, CodeSpec, CompileConfig, ReportManifest, SectionSpec,
};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Compile the stock launchpad layout under ./lite_output
  md2report

  # Custom output path and title
  md2report -o reports/launch.pdf --title "Acme Launch Report"

  # Explicit sections and code appendix
  md2report --section "out/analysis.md:Analysis" \
            --section "out/stack.md:Technology Stack" \
            --code out/skeleton.py

  # HTML artifact, no external engine needed
  md2report --format html -o report.html

  # Alternative PDF engine
  md2report --renderer "weasyprint {input} {output}"

  # Preview the repaired markdown without rendering or deleting anything
  md2report --dry-run

  # Machine-readable result
  md2report --json

RENDERERS:
  PDF output shells out to an HTML-to-PDF engine. The default is
  `wkhtmltopdf --quiet {input} {output}`; override with --renderer or the
  MD2REPORT_RENDERER environment variable. {input} is the staged HTML file,
  {output} the artifact path. Missing placeholders are appended.

CLEANUP:
  On success the consumed section and code files are DELETED — they are
  scratch output of the upstream generator and redundant once the report
  exists. Pass --keep-inputs to retain them. On any failure nothing is
  deleted.

ENVIRONMENT VARIABLES:
  MD2REPORT_OUTPUT       Artifact path (same as -o)
  MD2REPORT_TITLE        Report title
  MD2REPORT_RENDERER     Renderer command template
  MD2REPORT_KEEP_INPUTS  Keep intermediate files on success
"#;

/// Compile generated Markdown section files into one styled report.
#[derive(Parser, Debug)]
#[command(
    name = "md2report",
    version,
    about = "Repair generated Markdown and compile it into one styled report",
    long_about = "Deterministically repair loosely formatted generator output (hard-wrapped \
paragraphs, stray fences, page residue, inconsistent tool lists) and compile the sections \
into a single styled, paginated artifact via an external HTML-to-PDF engine.",
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Directory holding the generated intermediate files.
    #[arg(default_value = "lite_output")]
    dir: PathBuf,

    /// Artifact path.
    #[arg(short, long, env = "MD2REPORT_OUTPUT", default_value = "project_report.pdf")]
    output: PathBuf,

    /// Report title.
    #[arg(long, env = "MD2REPORT_TITLE")]
    title: Option<String>,

    /// Section file as PATH:TITLE; repeatable, replaces the stock layout.
    #[arg(long = "section", value_name = "PATH:TITLE")]
    sections: Vec<String>,

    /// Code file embedded as a preformatted appendix.
    #[arg(long, value_name = "PATH")]
    code: Option<PathBuf>,

    /// Heading for the code appendix.
    #[arg(long, default_value = "MVP Skeleton")]
    code_title: String,

    /// Artifact format: pdf (external engine) or html (direct write).
    #[arg(long, value_enum, default_value = "pdf")]
    format: FormatArg,

    /// Renderer command template, e.g. "weasyprint {input} {output}".
    #[arg(long, env = "MD2REPORT_RENDERER")]
    renderer: Option<String>,

    /// Keep the intermediate files after a successful compile.
    #[arg(long, env = "MD2REPORT_KEEP_INPUTS")]
    keep_inputs: bool,

    /// Print each section's repaired markdown; no render, no deletion.
    #[arg(long)]
    dry_run: bool,

    /// Output the compile result as JSON.
    #[arg(long)]
    json: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long)]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum FormatArg {
    Pdf,
    Html,
}

impl From<FormatArg> for ArtifactFormat {
    fn from(v: FormatArg) -> Self {
        match v {
            FormatArg::Pdf => ArtifactFormat::Pdf,
            FormatArg::Html => ArtifactFormat::Html,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    let manifest = build_manifest(&cli)?;
    let config = build_config(&cli)?;

    // ── Dry-run mode ─────────────────────────────────────────────────────
    if cli.dry_run {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        let mut found = 0usize;
        for spec in &manifest.sections {
            if !spec.path.exists() {
                continue;
            }
            found += 1;
            let raw = std::fs::read_to_string(&spec.path)
                .with_context(|| format!("Failed to read {}", spec.path.display()))?;
            writeln!(handle, "<!-- {} ({}) -->", spec.title, spec.path.display())?;
            handle.write_all(normalize(&raw, &config).as_bytes())?;
            writeln!(handle)?;
        }
        if found == 0 {
            eprintln!("{}", red("No section files found — nothing to preview"));
        }
        return Ok(());
    }

    // ── Compile ──────────────────────────────────────────────────────────
    let output = compile(&manifest, &cli.output, &config).context("Compilation failed")?;

    if cli.json {
        let json = serde_json::to_string_pretty(&output).context("Failed to serialise output")?;
        println!("{json}");
        return Ok(());
    }

    if !cli.quiet {
        eprintln!(
            "{}  {} sections  {}ms  →  {}",
            green("✔"),
            output.stats.sections_compiled,
            output.stats.total_duration_ms,
            bold(&output.artifact.display().to_string()),
        );
        if output.stats.sections_missing > 0 {
            eprintln!(
                "   {}",
                dim(&format!(
                    "{} manifest entries missing (skipped)",
                    output.stats.sections_missing
                ))
            );
        }
        if output.stats.inputs_deleted > 0 {
            eprintln!(
                "   {}",
                dim(&format!(
                    "{} intermediate files deleted",
                    output.stats.inputs_deleted
                ))
            );
        }
    }

    Ok(())
}

/// Build the manifest from `--section`/`--code` flags, falling back to the
/// stock launchpad layout under `dir`.
fn build_manifest(cli: &Cli) -> Result<ReportManifest> {
    let mut manifest = if cli.sections.is_empty() {
        ReportManifest::launchpad(&cli.dir)
    } else {
        let sections = cli
            .sections
            .iter()
            .map(|entry| {
                let (path, title) = entry.split_once(':').with_context(|| {
                    format!("Invalid --section '{entry}': expected PATH:TITLE")
                })?;
                Ok(SectionSpec {
                    path: PathBuf::from(path),
                    title: title.trim().to_string(),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        ReportManifest {
            sections,
            code: None,
        }
    };

    if let Some(ref code) = cli.code {
        manifest.code = Some(CodeSpec {
            path: code.clone(),
            title: cli.code_title.clone(),
        });
    }

    Ok(manifest)
}

/// Map CLI args to `CompileConfig`.
fn build_config(cli: &Cli) -> Result<CompileConfig> {
    let mut builder = CompileConfig::builder()
        .format(cli.format.into())
        .keep_inputs(cli.keep_inputs);

    if let Some(ref title) = cli.title {
        builder = builder.title(title.clone());
    }
    if let Some(ref renderer) = cli.renderer {
        builder = builder.renderer_command(renderer.clone());
    }

    builder.build().context("Invalid configuration")
}
