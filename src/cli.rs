use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Save shell commands under a name and run them later
#[derive(Parser, Debug)]
#[command(author, version, long_about = None)]
pub struct Cli {
    /// use the given config file instead of the one in the user config folder
    #[arg(short, long, global = true, value_name = "FILE", value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Verbose output, repeat for more
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Add a new bookmark
    Add {
        name: String,
        /// the command line, several words are joined with spaces
        #[arg(required = true, num_args = 1.., allow_hyphen_values = true, trailing_var_arg = true)]
        command: Vec<String>,
    },
    /// Execute a bookmark
    Exec { name: String },
    /// List your saved bookmarks
    List,
    /// Remove a bookmark
    Remove { name: String },
    /// Print the command saved under a bookmark
    Search { name: String },
    /// Print the version of bookmark
    Version,
    /// Show or change the configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum ConfigCommand {
    /// List the current configuration
    List,
    /// Set configuration <KEY> to <VALUE>
    Set { key: String, value: String },
}

impl Cli {
    /// maps the number of -v flags to a log level, warnings are always shown
    pub fn log_level(&self) -> log::Level {
        match self.verbose {
            0 => log::Level::Warn,
            1 => log::Level::Info,
            2 => log::Level::Debug,
            _ => log::Level::Trace,
        }
    }
}
