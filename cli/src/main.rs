//! formcheck
//!
//! Checks form documents and responses from the command line.
//!
//! # Usage
//!
//! ```bash
//! formcheck validate --form demos/vehicle.json --answers demos/answers.json
//! formcheck visibility --form demos/vehicle.json --answers demos/answers.json
//! formcheck lint --form demos/vehicle.yaml
//! formcheck summary --form demos/vehicle.json --answers demos/answers.json --format json
//! formcheck config set locale pt-BR
//! ```

use clap::{Parser, Subcommand};
use colored::Colorize;
use formlogic_engine::{Locale, ResolutionMode};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod output;

#[derive(Parser)]
#[command(name = "formcheck")]
#[command(version)]
#[command(about = "Form visibility and validation checker", long_about = None)]
struct Cli {
    /// Output format (defaults to the configured one, then table)
    #[arg(long, short, env = "FORMLOGIC_FORMAT")]
    format: Option<output::OutputFormat>,

    /// Profile name from config file
    #[arg(long, short, env = "FORMLOGIC_PROFILE")]
    profile: Option<String>,

    /// Message language (en, pt-BR)
    #[arg(long, env = "FORMLOGIC_LOCALE", value_parser = config::parse_value::<Locale>)]
    locale: Option<Locale>,

    /// Which dependencies govern visibility (legacy, all_conditions)
    #[arg(long, env = "FORMLOGIC_MODE", value_parser = config::parse_value::<ResolutionMode>)]
    mode: Option<ResolutionMode>,

    /// Treat answers of hidden fields as absent
    #[arg(long, env = "FORMLOGIC_CASCADE")]
    cascade: bool,

    /// Refuse schemas with problems
    #[arg(long, env = "FORMLOGIC_STRICT")]
    strict: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve visibility and validate the answers
    Validate(FormArgs),
    /// Show which fields are visible
    Visibility(FormArgs),
    /// Check a form document for schema problems
    Lint {
        /// Form document (JSON or YAML)
        #[arg(long)]
        form: PathBuf,
    },
    /// Valid/invalid tally per field
    Summary(FormArgs),
    /// Configure CLI
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(clap::Args)]
struct FormArgs {
    /// Form document (JSON or YAML)
    #[arg(long)]
    form: PathBuf,

    /// Answers keyed by field id (JSON or YAML)
    #[arg(long)]
    answers: PathBuf,
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Set configuration value
    Set { key: String, value: String },
    /// Get configuration value
    Get { key: String },
    /// List all configuration
    List,
    /// Initialize configuration
    Init,
}

fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            process::exit(2);
        }
    }
}

/// `Ok(false)` when the checked input did not pass
fn run(cli: Cli) -> anyhow::Result<bool> {
    let profile = cli.profile.as_deref();
    let config = config::Config::load(profile)?;

    let mut engine_config = config.engine_config();
    if let Some(locale) = cli.locale {
        engine_config.locale = locale;
    }
    if let Some(mode) = cli.mode {
        engine_config.resolution_mode = mode;
    }
    engine_config.cascade_hidden |= cli.cascade;
    engine_config.strict_schema |= cli.strict;

    let format = match cli.format {
        Some(format) => format,
        None => config.output_format()?,
    };
    tracing::debug!(?engine_config, ?format, "starting");

    match cli.command {
        Commands::Validate(args) => commands::validate::handle(&args.form, &args.answers, engine_config, format),
        Commands::Visibility(args) => commands::visibility::handle(&args.form, &args.answers, engine_config, format),
        Commands::Lint { form } => commands::lint::handle(&form, format),
        Commands::Summary(args) => commands::summary::handle(&args.form, &args.answers, engine_config, format),
        Commands::Config { action } => commands::config::handle(action, profile).map(|_| true),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_flags() {
        let cli = Cli::try_parse_from([
            "formcheck",
            "--locale",
            "pt-BR",
            "--mode",
            "all_conditions",
            "validate",
            "--form",
            "form.json",
            "--answers",
            "answers.yaml",
        ])
        .unwrap();
        assert_eq!(cli.locale, Some(Locale::PtBr));
        assert_eq!(cli.mode, Some(ResolutionMode::AllConditions));
        assert!(matches!(cli.command, Commands::Validate(_)));

        assert!(Cli::try_parse_from(["formcheck", "--locale", "fr", "lint", "--form", "f.json"]).is_err());
    }
}
