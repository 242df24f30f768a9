use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use skillpack_core::{PackConfig, Packager, UnavailableCheck};

mod console;

use console::ConsoleReporter;

#[derive(Debug, Parser)]
#[command(name = "skillpack", version, about = "Validate and package skill directories")]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Check a skill directory's SKILL.md frontmatter
    Validate { skill_dir: PathBuf },
    /// Validate a skill directory, then write <name>.skill
    Package {
        skill_dir: PathBuf,
        /// Directory for the archive (defaults to the current directory)
        output_dir: Option<PathBuf>,
        /// Archive without validating the manifest
        #[arg(long)]
        no_validate: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_subscriber(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            println!("❌ Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = match &cli.config {
        Some(path) => PackConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => PackConfig::default(),
    };

    match cli.command {
        Command::Validate { skill_dir } => validate(&skill_dir),
        Command::Package {
            skill_dir,
            output_dir,
            no_validate,
        } => Ok(package(&config, &skill_dir, output_dir.as_deref(), no_validate)),
    }
}

fn validate(skill_dir: &Path) -> anyhow::Result<ExitCode> {
    let mut reporter = ConsoleReporter::default();
    let violations = skillpack_core::validate(skill_dir, &mut reporter)?;
    Ok(if violations.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn package(
    config: &PackConfig,
    skill_dir: &Path,
    output_dir: Option<&Path>,
    no_validate: bool,
) -> ExitCode {
    let mut packager = Packager::from_config(config);
    if no_validate {
        packager = packager.with_check(Box::new(UnavailableCheck::new("--no-validate given")));
    }

    let mut reporter = ConsoleReporter::default();
    match packager.package(skill_dir, output_dir, &mut reporter) {
        Ok(outcome) => {
            tracing::debug!(
                archive = %outcome.archive.display(),
                total_bytes = outcome.total_bytes,
                "done"
            );
            ExitCode::SUCCESS
        }
        // Already printed through the reporter's Failed event.
        Err(_) => ExitCode::FAILURE,
    }
}

fn init_subscriber(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
