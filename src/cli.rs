//! Command-line interface definitions and parsing
//!
//! This module defines the CLI structure for search-filters using the `clap`
//! crate.
//!
//! # Commands
//!
//! - **search**: pick a filter and run a search with it (default)
//! - **add / add-folder / add-file-type / combine**: create filters
//! - **edit / append**: change an existing filter
//! - **delete / enable / disable**: remove or toggle filters
//! - **list / show / migrate**: inspect filters and import legacy ones
//! - **config**: read or change application settings
//!
//! # Examples
//!
//! ```no_run
//! use search_filters::cli::{Cli, Commands};
//!
//! let cli = Cli::parse_args();
//! if let Commands::Show { name, .. } = cli.get_command() {
//!     println!("showing {name}");
//! }
//! ```

use crate::filters::FilterScope;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Scope selector accepted on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeArg {
    /// Settings namespace, visible in every workspace
    Global,
    /// `.vscode/custom-search-filters.json` of the workspace
    Workspace,
}

impl From<ScopeArg> for FilterScope {
    fn from(scope: ScopeArg) -> Self {
        match scope {
            ScopeArg::Global => Self::Global,
            ScopeArg::Workspace => Self::Workspace,
        }
    }
}

/// Main CLI structure for parsing command-line arguments
#[derive(Parser, Debug)]
#[command(name = "search-filters")]
#[command(about = "Saved include/exclude filters for file search", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Suppress informational output (only print results)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,

    /// Workspace root holding `.vscode/custom-search-filters.json` (default: current directory)
    #[arg(short = 'w', long = "workspace", value_name = "DIR", global = true)]
    pub workspace: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Pick a filter and run a search with it (default)
    #[command(visible_alias = "s")]
    Search {
        /// Filter to apply (prompted when omitted)
        name: Option<String>,

        /// Only consider filters of this scope
        #[arg(long, value_enum)]
        scope: Option<ScopeArg>,

        /// Shell command to run (overrides config); `{include}`/`{exclude}` expand to one quoted argument each
        #[arg(short = 'x', long = "exec", value_name = "COMMAND")]
        exec: Option<String>,
    },

    /// Create a filter from include/exclude patterns
    #[command(visible_alias = "a")]
    Add {
        /// Filter name (prompted when omitted)
        name: Option<String>,

        /// Comma-separated include globs
        #[arg(short = 'i', long = "include", value_name = "PATTERNS")]
        include: Option<String>,

        /// Comma-separated exclude globs
        #[arg(short = 'e', long = "exclude", value_name = "PATTERNS")]
        exclude: Option<String>,

        /// Where to store the filter (prompted when omitted)
        #[arg(long, value_enum)]
        scope: Option<ScopeArg>,
    },

    /// Create a filter matching everything under a folder
    AddFolder {
        /// Folder to include
        folder: PathBuf,

        /// Filter name (defaults to the folder name)
        #[arg(short = 'n', long = "name")]
        name: Option<String>,

        /// Where to store the filter (prompted when omitted)
        #[arg(long, value_enum)]
        scope: Option<ScopeArg>,
    },

    /// Create a filter for file extensions, or add them to an existing filter
    AddFileType {
        /// Extensions such as `rs`, `.ts` or `*.md` (prompted when omitted)
        extensions: Vec<String>,

        /// Existing filter to update instead of creating a new one
        #[arg(long = "into", value_name = "FILTER")]
        into: Option<String>,

        /// Name of the new filter
        #[arg(short = 'n', long = "name", conflicts_with = "into")]
        name: Option<String>,

        /// Scope of the new filter, or of the filter named by --into
        #[arg(long, value_enum)]
        scope: Option<ScopeArg>,
    },

    /// Append folders or file types to an existing filter
    Append {
        /// Filter to change (prompted when omitted)
        #[arg(long = "to", value_name = "FILTER")]
        target: Option<String>,

        /// Folders to append
        #[arg(short = 'f', long = "folder", value_name = "DIR", num_args = 0..)]
        folders: Vec<PathBuf>,

        /// File extensions to append
        #[arg(short = 't', long = "type", value_name = "EXT", num_args = 0..)]
        extensions: Vec<String>,

        /// Append to the exclude patterns instead of the include patterns
        #[arg(long = "exclude")]
        exclude: bool,

        /// Scope of the target filter
        #[arg(long, value_enum)]
        scope: Option<ScopeArg>,
    },

    /// Combine two or more filters into a new one
    Combine {
        /// Filters to combine (multi-select when omitted)
        filters: Vec<String>,

        /// Name of the combined filter
        #[arg(short = 'n', long = "name")]
        name: Option<String>,

        /// Where to store the combined filter (prompted when omitted)
        #[arg(long, value_enum)]
        scope: Option<ScopeArg>,
    },

    /// Edit a filter's name or patterns
    #[command(visible_alias = "e")]
    Edit {
        /// Filter to edit
        name: String,

        /// Scope of the filter when the name exists in both
        #[arg(long, value_enum)]
        scope: Option<ScopeArg>,

        /// New name
        #[arg(long = "rename", value_name = "NAME")]
        new_name: Option<String>,

        /// New comma-separated include globs
        #[arg(short = 'i', long = "include", value_name = "PATTERNS")]
        include: Option<String>,

        /// New comma-separated exclude globs
        #[arg(short = 'e', long = "exclude", value_name = "PATTERNS")]
        exclude: Option<String>,
    },

    /// Delete a filter
    #[command(visible_alias = "rm")]
    Delete {
        /// Filter to delete
        name: String,

        /// Scope of the filter when the name exists in both
        #[arg(long, value_enum)]
        scope: Option<ScopeArg>,

        /// Skip confirmation
        #[arg(short = 'f', long = "force")]
        force: bool,
    },

    /// Show a disabled global filter in the search picker again
    Enable {
        /// Global filter name
        name: String,
    },

    /// Hide a global filter from the search picker
    Disable {
        /// Global filter name
        name: String,
    },

    /// List saved filters
    #[command(visible_alias = "ls")]
    List {
        /// Include disabled global filters
        #[arg(short = 'a', long = "all")]
        all: bool,
    },

    /// Show one filter in detail
    Show {
        /// Filter to show
        name: String,

        /// Scope of the filter when the name exists in both
        #[arg(long, value_enum)]
        scope: Option<ScopeArg>,
    },

    /// Copy legacy `customSearchFilters` into the global store
    Migrate,

    /// Read or change configuration settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

/// Configuration subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Set a configuration value (an empty value clears optional settings)
    Set {
        /// Configuration key=value (e.g., quiet=true)
        #[arg(value_name = "KEY=VALUE")]
        setting: String,
    },

    /// Get a configuration value
    Get {
        /// Configuration key to retrieve (e.g., search_command)
        #[arg(value_name = "KEY")]
        key: String,
    },
}

impl Cli {
    /// Parse command line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the command, defaulting to Search if none specified
    #[must_use]
    pub fn get_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Search {
            name: None,
            scope: None,
            exec: None,
        })
    }

    /// Log level implied by `--verbose`, if any
    #[must_use]
    pub const fn verbosity(&self) -> Option<tracing::Level> {
        match self.verbose {
            0 => None,
            1 => Some(tracing::Level::DEBUG),
            _ => Some(tracing::Level::TRACE),
        }
    }
}

/// Convert an optional CLI scope into a filter scope
#[must_use]
pub fn scope(arg: Option<ScopeArg>) -> Option<FilterScope> {
    arg.map(FilterScope::from)
}
