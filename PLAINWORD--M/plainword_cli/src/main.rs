use std::{
    fs,
    io::{self, Read, Write},
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use plainword_logging::{read_records, LogLevel};
use plainword_simplifier::{PlainwordConfig, ReplacementTable, Simplifier, SimplifierTelemetry};
use serde_json::json;

#[derive(Parser, Debug)]
#[command(name = "plainword", version, about = "Rewrites prose with simpler words")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Simplifies text from an argument, a file or stdin.
    Simplify(SimplifyArgs),
    /// Prints the effective replacement table.
    Table {
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Validates the replacement table and reports collisions.
    Check {
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Shows the most recent telemetry records.
    Log {
        #[arg(long)]
        path: PathBuf,
        /// Number of records to display.
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
}

#[derive(Parser, Debug)]
struct SimplifyArgs {
    /// Text to simplify; read from --input or stdin when omitted.
    text: Option<String>,
    #[arg(long, conflicts_with = "text")]
    input: Option<PathBuf>,
    #[arg(long)]
    config: Option<PathBuf>,
    /// Print a JSON report instead of the bare text.
    #[arg(long)]
    report: bool,
    #[arg(long)]
    log_path: Option<PathBuf>,
    #[arg(long)]
    log_level: Option<LogLevel>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Simplify(args) => handle_simplify(args, io::stdin(), io::stdout().lock()),
        Commands::Table { config } => {
            let table = load_config(config.as_deref())?.build_table()?;
            print!("{}", render_table(&table));
            Ok(())
        }
        Commands::Check { config } => {
            let table = load_config(config.as_deref())?
                .build_table()
                .context("validating replacement table")?;
            let collisions = collision_lines(&table);
            if !collisions.is_empty() {
                for line in &collisions {
                    eprintln!("{line}");
                }
                bail!("{} replacement(s) feed another rule", collisions.len());
            }
            println!("ok: {} entries, no collisions", table.len());
            Ok(())
        }
        Commands::Log { path, limit } => print_log(&path, limit, io::stdout().lock()),
    }
}

fn print_log(path: &Path, limit: usize, mut out: impl Write) -> Result<()> {
    let records = read_records(path)?;
    let skip = records.len().saturating_sub(limit);
    for record in records.into_iter().skip(skip) {
        writeln!(
            out,
            "{} | {} | {} | {} | {}",
            record.timestamp.to_rfc3339(),
            record.level,
            record.module,
            record.message,
            serde_json::Value::Object(record.metadata)
        )?;
    }
    Ok(())
}

fn handle_simplify(args: SimplifyArgs, stdin: impl Read, mut out: impl Write) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let simplifier = Simplifier::from_table(config.build_table()?)?;

    let mut builder = SimplifierTelemetry::builder("plainword").with_section(&config.telemetry);
    if let Some(path) = &args.log_path {
        builder = builder.log_path(path);
    }
    if let Some(level) = args.log_level {
        builder = builder.min_level(level);
    }
    let telemetry = builder.build()?;

    let text = read_input(args.text, args.input.as_deref(), stdin)?;
    let report = simplifier.simplify_with_report(&text);
    telemetry.record_report(text.chars().count(), &report)?;
    telemetry.log(
        LogLevel::Debug,
        "plainword.cli.completed",
        json!({ "rules": simplifier.table().len(), "report": args.report }),
    )?;

    if args.report {
        writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
    } else {
        writeln!(out, "{}", report.output)?;
    }
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<PlainwordConfig> {
    match path {
        Some(path) => PlainwordConfig::load(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(PlainwordConfig::default()),
    }
}

fn read_input(text: Option<String>, input: Option<&Path>, mut stdin: impl Read) -> Result<String> {
    if let Some(text) = text {
        return Ok(text);
    }
    if let Some(path) = input {
        return fs::read_to_string(path).with_context(|| format!("reading {}", path.display()));
    }
    let mut buffer = String::new();
    stdin
        .read_to_string(&mut buffer)
        .context("reading stdin")?;
    Ok(buffer)
}

fn render_table(table: &ReplacementTable) -> String {
    table
        .iter()
        .map(|entry| format!("{} -> {}\n", entry.complex, entry.simple))
        .collect()
}

fn collision_lines(table: &ReplacementTable) -> Vec<String> {
    table
        .collisions()
        .into_iter()
        .map(|entry| {
            format!(
                "`{}` -> `{}` but `{}` is itself replaced",
                entry.complex, entry.simple, entry.simple
            )
        })
        .collect()
}
