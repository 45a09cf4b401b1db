//! taskset CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(
    name = "taskset",
    version,
    about = "Generate randomized assignment copies"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate document copies from an assignment
    Generate {
        /// Path to a .toml or .json assignment
        #[arg(long)]
        assignment: PathBuf,

        /// Number of copies to generate
        #[arg(long)]
        copies: Option<usize>,

        /// Shuffle task pages in every copy
        #[arg(long, overrides_with = "no_shuffle")]
        shuffle: bool,

        /// Keep task pages in authoring order, even if the config shuffles
        #[arg(long, overrides_with = "shuffle")]
        no_shuffle: bool,

        /// Seed for reproducible copies
        #[arg(long)]
        seed: Option<u64>,

        /// Output directory
        #[arg(long)]
        output: Option<PathBuf>,

        /// Output format: html, json, all
        #[arg(long)]
        format: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Render a single question template
    Render {
        /// Template text, e.g. 'x = \[1..10]\'
        template: String,

        /// Seed for reproducible values
        #[arg(long)]
        seed: Option<u64>,

        /// How many renderings to print
        #[arg(long, default_value = "1")]
        times: usize,
    },

    /// Validate an assignment file
    Validate {
        /// Path to a .toml or .json assignment
        #[arg(long)]
        assignment: PathBuf,
    },

    /// Create starter config and example assignment
    Init,
}

/// Combine a `--flag` / `--no-flag` pair; `None` when neither was given.
fn flag_pair(yes: bool, no: bool) -> Option<bool> {
    match (yes, no) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("warn,taskset_core=info,taskset_layout=info,taskset_cli=info")
        }))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate {
            assignment,
            copies,
            shuffle,
            no_shuffle,
            seed,
            output,
            format,
            config,
        } => commands::generate::execute(
            assignment,
            copies,
            flag_pair(shuffle, no_shuffle),
            seed,
            output,
            format,
            config,
        ),
        Commands::Render {
            template,
            seed,
            times,
        } => commands::render::execute(&template, seed, times),
        Commands::Validate { assignment } => commands::validate::execute(assignment),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shuffle_flags() {
        assert_eq!(flag_pair(false, false), None);
        assert_eq!(flag_pair(true, false), Some(true));
        assert_eq!(flag_pair(false, true), Some(false));

        let cli = Cli::try_parse_from([
            "taskset",
            "generate",
            "--assignment",
            "a.toml",
            "--shuffle",
            "--no-shuffle",
        ])
        .unwrap();
        match cli.command {
            Commands::Generate {
                shuffle,
                no_shuffle,
                ..
            } => assert_eq!(flag_pair(shuffle, no_shuffle), Some(false)),
            _ => panic!("expected generate"),
        }
    }
}
