use clap::{ArgAction, Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use crate::config::Config;
use crate::logging::{self, LogTarget};
use crate::output::OutputMode;

pub mod commands;

/// Read one line from stdin after flushing any pending prompt.
fn read_line_from_stdin() -> io::Result<String> {
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().lock().read_line(&mut input)?;
    Ok(input)
}

/// Ask a yes/no question; anything but `y`/`yes` counts as no
pub(crate) fn confirm(prompt: &str) -> io::Result<bool> {
    print!("{} [y/N]: ", prompt);
    let answer = read_line_from_stdin()?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

#[derive(Parser)]
#[command(name = "shelve")]
#[command(version)]
#[command(about = "Browse, search and move files; keep screenshots filed by month")]
#[command(
    long_about = "Shelve is a small terminal tool for putting files where they belong.\n\n\
    Interactive Mode:\n  \
    shelve                           # Pick files and a destination in the TUI\n\n\
    Examples:\n  \
    shelve search invoices --files   # Find files named like 'invoices' here\n  \
    shelve move a.pdf b.pdf --to ~/Documents\n  \
    shelve screenshots --once        # File desktop screenshots once and exit\n  \
    shelve screenshots               # Keep filing them every few seconds"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Increase output verbosity (-v, -vv for more)
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Move screenshots from the desktop into Month_Year folders
    #[command(visible_alias = "shots")]
    Screenshots {
        /// Run a single cycle and exit
        #[arg(long)]
        once: bool,

        /// Folder to watch (default: the desktop)
        #[arg(long, value_name = "DIR")]
        source: Option<PathBuf>,

        /// Root of the Month_Year folders (default: <source>/Screenshots)
        #[arg(long, value_name = "DIR")]
        dest: Option<PathBuf>,

        /// Seconds between cycles
        #[arg(long, value_name = "SECS")]
        interval: Option<u64>,
    },

    /// Search for directories (recursively) or files (in one folder) by name
    #[command(visible_alias = "s")]
    Search {
        /// Text to look for in names (case-insensitive)
        query: String,

        /// Where to search (default: current directory)
        #[arg(long, value_name = "DIR")]
        path: Option<PathBuf>,

        /// Search files directly inside the folder instead of directories
        #[arg(long)]
        files: bool,

        /// Maximum number of results [default: from config]
        #[arg(long, value_name = "N")]
        limit: Option<usize>,

        /// Output results as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Move files into a directory, renaming on conflicts
    #[command(visible_alias = "mv")]
    Move {
        /// Files to move
        #[arg(required = true, value_name = "FILE")]
        files: Vec<PathBuf>,

        /// Destination directory
        #[arg(long, value_name = "DIR")]
        to: PathBuf,

        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,

        /// Output the move report as JSON (implies --yes)
        #[arg(long)]
        json: bool,
    },

    /// View or reset the configuration file
    Config {
        /// Print the current configuration
        #[arg(long)]
        show: bool,

        /// Overwrite the configuration with defaults
        #[arg(long)]
        reset: bool,

        /// Print the configuration file location
        #[arg(long)]
        path: bool,
    },
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn run(self) -> anyhow::Result<()> {
        let output_mode = OutputMode::from_flags(self.quiet, self.verbose);
        let config = Config::load();

        // The TUI owns the terminal, so it only ever logs to the file
        let target = if self.command.is_none() {
            LogTarget::FileOnly
        } else {
            LogTarget::Terminal
        };
        let _log_guard = logging::init_logger(&config.logging, output_mode, target);

        match self.command {
            None => crate::tui::run(config),
            Some(Commands::Screenshots {
                once,
                source,
                dest,
                interval,
            }) => commands::screenshots_command::handle_screenshots(
                config,
                once,
                source,
                dest,
                interval,
                output_mode,
            ),
            Some(Commands::Search {
                query,
                path,
                files,
                limit,
                json,
            }) => commands::search_command::handle_search(
                &config,
                query,
                path,
                files,
                limit,
                json,
                output_mode,
            ),
            Some(Commands::Move {
                files,
                to,
                yes,
                json,
            }) => commands::move_command::handle_move(files, to, yes, json, output_mode),
            Some(Commands::Config { show, reset, path }) => {
                commands::config_command::handle_config(show, reset, path)
            }
        }
    }
}
