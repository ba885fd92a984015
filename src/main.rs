use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use revu::cli::commands::scan::ScanOptions;

#[derive(Parser)]
#[command(name = "revu")]
#[command(version, about = "AI-assisted code review for your codebase")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, global = true)]
    verbose: bool,

    #[arg(long, short, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect and manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// List the files a review would consider
    Scan {
        /// File, directory, or glob expression
        target: String,
        /// Only include files with this extension (repeatable)
        #[arg(long = "extension", short = 'e')]
        extensions: Vec<String>,
        /// Only include files matching this glob (repeatable, overrides extensions)
        #[arg(long = "pattern", short = 'p')]
        patterns: Vec<String>,
        /// Exclude files matching this glob (repeatable)
        #[arg(long = "exclude", short = 'x')]
        excludes: Vec<String>,
        /// Prune this directory name (repeatable)
        #[arg(long = "exclude-dir")]
        exclude_dirs: Vec<String>,
        /// Maximum file size in bytes
        #[arg(long)]
        max_file_size: Option<u64>,
        /// Only include files in this language (repeatable)
        #[arg(long = "language", short = 'l')]
        languages: Vec<String>,
        /// Only include files whose content contains this text
        #[arg(long)]
        contains: Option<String>,
        /// Output format
        #[arg(long, default_value = "table")]
        format: String,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the resolved configuration
    Show {
        #[arg(long, default_value = "toml")]
        format: String,
        /// Annotate each key with the source that set it
        #[arg(long)]
        sources: bool,
        /// Override a key for this invocation (repeatable, key=value)
        #[arg(long = "override", short = 'O')]
        overrides: Vec<String>,
    },
    /// Show configuration file paths
    Path,
    /// Write a default config file
    Init {
        /// Initialize the user config instead of the project config
        #[arg(long)]
        user: bool,
        #[arg(long)]
        force: bool,
    },
    /// Print one resolved key
    Get {
        key: String,
        /// Also print which source set the key
        #[arg(long)]
        with_source: bool,
    },
    /// Set a key, persisting it to the user config file
    Set {
        key: String,
        value: String,
        /// Update the live tree only, without writing the user file
        #[arg(long)]
        no_save: bool,
    },
}

fn main() -> ExitCode {
    match run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError:\x1b[0m {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Config { command } => match command {
            ConfigCommands::Show {
                format,
                sources,
                overrides,
            } => {
                revu::cli::commands::config::show(format == "json", sources, &overrides)?;
            }
            ConfigCommands::Path => {
                revu::cli::commands::config::path()?;
            }
            ConfigCommands::Init { user, force } => {
                revu::cli::commands::config::init(user, force)?;
            }
            ConfigCommands::Get { key, with_source } => {
                revu::cli::commands::config::get(&key, with_source)?;
            }
            ConfigCommands::Set {
                key,
                value,
                no_save,
            } => {
                revu::cli::commands::config::set(&key, &value, !no_save)?;
            }
        },
        Commands::Scan {
            target,
            extensions,
            patterns,
            excludes,
            exclude_dirs,
            max_file_size,
            languages,
            contains,
            format,
        } => {
            revu::cli::commands::scan::run(ScanOptions {
                target,
                extensions,
                patterns,
                excludes,
                exclude_dirs,
                max_file_size,
                languages,
                contains,
                as_json: format == "json",
            })?;
        }
    }

    Ok(())
}
