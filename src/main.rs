//! Prajna - dual-language (English/Vietnamese) subtitle tooling.
//!
//! The binary drives the subtitle engine from the terminal: it pairs caption
//! files with media, parses and inspects SubRip/WebVTT files, checks whether
//! two caption tracks line up, indexes a library of captions stored apart from
//! their media, and previews what the player would show over time.

use clap::{CommandFactory, Parser, Subcommand, builder::PossibleValuesParser};
use clap_complete::{Generator, Shell, generate};
use prajna_subs::config::SETTABLE_KEYS;
use std::error::Error;
use std::io;
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "prajna")]
#[command(about = "Dual-language subtitle pairing, diagnostics and preview")]
#[command(version)]
struct Cli {
    /// Log pairing decisions and parser warnings
    #[arg(short, long, global = true)]
    verbose: bool,
    /// Also write a debug log to this file
    #[arg(long, global = true, value_name = "FILE")]
    log_file: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default configuration file
    Init {
        /// Folder indexed for captions kept apart from their media
        #[arg(long)]
        library_root: Option<String>,
    },
    /// Show or change the configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Generate shell completions
    Completions {
        /// The shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
    /// Parse a caption file and list its cues
    Parse {
        /// SubRip (.srt) or WebVTT (.vtt) file
        file: PathBuf,
        /// Print cues as JSON
        #[arg(long)]
        json: bool,
    },
    /// Find the English and Vietnamese captions for a media file
    Pair {
        /// Media file
        media: PathBuf,
        /// Caption library to index (defaults to the configured library_root)
        #[arg(short, long)]
        root: Option<PathBuf>,
    },
    /// Index the dual-language captions under a folder
    Index {
        /// Folder to scan
        root: PathBuf,
        /// Export the index as YAML
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Check whether two caption files share a timeline
    Diagnose {
        /// First caption file (usually English)
        first: PathBuf,
        /// Second caption file (usually Vietnamese)
        second: PathBuf,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print every caption change the player would show
    Preview {
        /// Media file
        media: PathBuf,
        /// Caption library to index (defaults to the configured library_root)
        #[arg(short, long)]
        root: Option<PathBuf>,
        /// Start of the simulated playback, in seconds
        #[arg(long, default_value_t = 0.0)]
        from: f64,
        /// End of the simulated playback, in seconds (defaults to the last cue)
        #[arg(long)]
        to: Option<f64>,
        /// Tick interval in milliseconds
        #[arg(long, default_value_t = prajna_subs::constants::TICK_INTERVAL_MS)]
        step: i64,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// View current configuration
    View,
    /// Set a configuration value
    Set {
        /// Configuration key
        #[arg(value_parser = PossibleValuesParser::new(SETTABLE_KEYS.iter().copied()))]
        key: String,
        /// Configuration value
        value: String,
    },
    /// Edit configuration file in your editor
    Edit,
}

fn print_completions<G: Generator>(generator: G, cmd: &mut clap::Command) {
    generate(
        generator,
        cmd,
        cmd.get_name().to_string(),
        &mut io::stdout(),
    );
}

fn init_logging(verbose: bool, log_file: Option<&PathBuf>) -> Result<(), Box<dyn Error>> {
    use simplelog::*;
    use std::fs::File;

    let term_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        term_level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )];
    if let Some(path) = log_file {
        loggers.push(WriteLogger::new(
            LevelFilter::Debug,
            Config::default(),
            File::create(path)?,
        ));
    }
    CombinedLogger::init(loggers)?;

    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log_file.as_ref())?;

    match cli.command {
        Commands::Init { library_root } => {
            cli::init::handle_init(library_root.as_deref())?;
        }
        Commands::Config { action } => match action {
            ConfigAction::View => {
                cli::config::handle_config_view()?;
            }
            ConfigAction::Set { key, value } => {
                cli::config::handle_config_set(&key, &value)?;
            }
            ConfigAction::Edit => {
                cli::config::handle_config_edit()?;
            }
        },
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            print_completions(shell, &mut cmd);
        }
        Commands::Parse { file, json } => {
            cli::parse::handle_parse(&file, json)?;
        }
        Commands::Pair { media, root } => {
            cli::pair::handle_pair(&media, root.as_deref())?;
        }
        Commands::Index { root, output } => {
            cli::index::handle_index(&root, output.as_deref())?;
        }
        Commands::Diagnose {
            first,
            second,
            json,
        } => {
            cli::diagnose::handle_diagnose(&first, &second, json)?;
        }
        Commands::Preview {
            media,
            root,
            from,
            to,
            step,
        } => {
            cli::preview::handle_preview(&media, root.as_deref(), from, to, step)?;
        }
    }

    Ok(())
}
