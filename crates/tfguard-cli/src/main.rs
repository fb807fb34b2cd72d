//! CLI entry point for tfguard.
//!
//! This module is thin: it handles argument parsing, I/O, and exit codes.
//! All business logic lives in the `tfguard-app` crate.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand, ValueEnum};
use tfguard_app::{
    CheckInput, ExplainOutput, format_explanation, format_not_found, format_rule_list,
    list_rules, parse_report_json, render_annotations, render_markdown, run_check, run_explain,
    runtime_error_report, serialize_report, to_renderable, verdict_exit_code,
};
use tfguard_settings::{CONFIG_FILE_NAME, Overrides, TfguardConfigV1};
use tfguard_types::TfguardReport;

/// Exit code when a rule could not check every file, or the run could not start.
const EXIT_TOOL_ERROR: i32 = 1;

#[derive(Parser, Debug)]
#[command(
    name = "tfguard",
    version,
    about = "Declaration-order hygiene linter for Terraform configurations"
)]
struct Cli {
    /// Terraform module root to scan.
    #[arg(long, default_value = ".")]
    repo_root: Utf8PathBuf,

    /// Path to tfguard config TOML, relative to the module root.
    #[arg(long, default_value = CONFIG_FILE_NAME)]
    config: Utf8PathBuf,

    /// Override profile (default|all).
    #[arg(long)]
    profile: Option<String>,

    /// Override maximum findings to emit.
    #[arg(long)]
    max_findings: Option<u32>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the enabled rules and write artifacts.
    Check {
        /// Where to write the JSON report.
        #[arg(long, default_value = "artifacts/tfguard/report.json")]
        report_out: Utf8PathBuf,

        /// Write a Markdown report alongside the JSON.
        #[arg(long)]
        write_markdown: bool,

        /// Where to write the Markdown report (if enabled).
        #[arg(long, default_value = "artifacts/tfguard/comment.md")]
        markdown_out: Utf8PathBuf,
    },

    /// Render markdown from an existing JSON report.
    Md {
        /// Path to the JSON report file.
        #[arg(long, default_value = "artifacts/tfguard/report.json")]
        report: Utf8PathBuf,

        /// Where to write the Markdown output (if not specified, prints to stdout).
        #[arg(long, short)]
        output: Option<Utf8PathBuf>,
    },

    /// Render GitHub Actions annotations from an existing JSON report.
    Annotations {
        /// Path to the JSON report file.
        #[arg(long, default_value = "artifacts/tfguard/report.json")]
        report: Utf8PathBuf,

        /// Maximum number of annotations to emit.
        #[arg(long, default_value = "10")]
        max: usize,
    },

    /// Explain a rule or finding code with remediation guidance.
    Explain {
        /// The rule name (e.g. "terraform_output_order") or code (e.g. "unsorted_outputs").
        identifier: String,
    },

    /// List built-in rules with their default state and severity.
    Rules,

    /// Print a JSON schema.
    Schema {
        /// Which document to describe.
        #[arg(value_enum, default_value_t = SchemaKind::Report)]
        kind: SchemaKind,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SchemaKind {
    /// The JSON report written by `check`.
    Report,
    /// The `tfguard.toml` config file.
    Config,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.cmd {
        Commands::Check {
            ref report_out,
            write_markdown,
            ref markdown_out,
        } => cmd_check(&cli, report_out, write_markdown.then_some(markdown_out.as_path())),
        Commands::Md { report, output } => cmd_md(report, output),
        Commands::Annotations { report, max } => cmd_annotations(report, max),
        Commands::Explain { identifier } => cmd_explain(&identifier),
        Commands::Rules => {
            print!("{}", format_rule_list(&list_rules()));
            Ok(())
        }
        Commands::Schema { kind } => cmd_schema(kind),
    }
}

fn cmd_check(
    cli: &Cli,
    report_out: &Utf8Path,
    markdown_out: Option<&Utf8Path>,
) -> anyhow::Result<()> {
    let repo_root = cli
        .repo_root
        .canonicalize_utf8()
        .unwrap_or_else(|_| cli.repo_root.clone());

    let result = (|| -> anyhow::Result<i32> {
        if !repo_root.is_dir() {
            anyhow::bail!("module root does not exist: {}", repo_root);
        }
        // Missing config file is allowed (defaults apply).
        let cfg_path = repo_root.join(&cli.config);
        let cfg_text = match std::fs::read_to_string(&cfg_path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => String::new(),
            Err(err) => {
                return Err(err).with_context(|| format!("read config: {}", cfg_path));
            }
        };

        let output = run_check(CheckInput {
            repo_root: &repo_root,
            config_text: &cfg_text,
            overrides: Overrides {
                profile: cli.profile.clone(),
                max_findings: cli.max_findings,
            },
        })?;

        write_report_file(report_out, &output.report).context("write report json")?;
        if let Some(markdown_out) = markdown_out {
            let md = render_markdown(&to_renderable(&output.report));
            write_text_file(markdown_out, &md).context("write markdown")?;
        }

        if output.report.data.files_scanned == 0 {
            eprintln!("tfguard: no Terraform files found under {}", repo_root);
        }
        if output.has_tool_errors() {
            for e in &output.report.data.errors {
                eprintln!("tfguard: {}: {}", e.rule, e.message);
            }
            eprintln!(
                "tfguard: {} file(s) could not be checked; see data.errors in {}",
                output.report.data.errors.len(),
                report_out
            );
            return Ok(EXIT_TOOL_ERROR);
        }

        Ok(verdict_exit_code(output.report.verdict.clone()))
    })();

    match result {
        Ok(0) => Ok(()),
        Ok(code) => std::process::exit(code),
        Err(err) => {
            let report = runtime_error_report(&format!("{err:#}"));
            let _ = write_report_file(report_out, &report);
            eprintln!("tfguard error: {err:#}");
            std::process::exit(EXIT_TOOL_ERROR);
        }
    }
}

fn write_report_file(path: &Utf8Path, report: &TfguardReport) -> anyhow::Result<()> {
    let data = serialize_report(report).context("serialize report")?;
    write_bytes(path, &data)
}

fn write_text_file(path: &Utf8Path, text: &str) -> anyhow::Result<()> {
    write_bytes(path, text.as_bytes())
}

fn write_bytes(path: &Utf8Path, data: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_str().is_empty()) {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {}", parent))?;
    }
    std::fs::write(path, data).with_context(|| format!("write {}", path))
}

fn read_report(path: &Utf8Path) -> anyhow::Result<TfguardReport> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("read report: {}", path))?;
    parse_report_json(&text)
}

fn cmd_md(report_path: Utf8PathBuf, output: Option<Utf8PathBuf>) -> anyhow::Result<()> {
    let report = read_report(&report_path)?;
    let md = render_markdown(&to_renderable(&report));

    match output {
        Some(out_path) => write_text_file(&out_path, &md).context("write markdown output")?,
        None => print!("{}", md),
    }
    Ok(())
}

fn cmd_annotations(report_path: Utf8PathBuf, max: usize) -> anyhow::Result<()> {
    let report = read_report(&report_path)?;
    for annotation in render_annotations(&to_renderable(&report), max) {
        println!("{}", annotation);
    }
    Ok(())
}

fn cmd_explain(identifier: &str) -> anyhow::Result<()> {
    match run_explain(identifier) {
        ExplainOutput::Found(exp) => {
            print!("{}", format_explanation(&exp));
            Ok(())
        }
        ExplainOutput::NotFound {
            identifier,
            available_rules,
            available_codes,
        } => {
            eprint!(
                "{}",
                format_not_found(&identifier, available_rules, available_codes)
            );
            std::process::exit(1);
        }
    }
}

fn cmd_schema(kind: SchemaKind) -> anyhow::Result<()> {
    let schema = match kind {
        SchemaKind::Report => schemars::schema_for!(TfguardReport),
        SchemaKind::Config => schemars::schema_for!(TfguardConfigV1),
    };
    let text = serde_json::to_string_pretty(&schema).context("serialize schema")?;
    println!("{}", text);
    Ok(())
}
