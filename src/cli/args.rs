//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueHint};

/// Numbered outline parser: heading hierarchy, section keys and template renumbering
#[derive(Parser, Debug)]
#[command(name = "outliner")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output, repeat for more (-d info, -dd debug, -ddd trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub debug: u8,

    /// Directory holding the local .outliner.toml (default: cwd)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the outline as a tree of keys
    Tree {
        /// Flattened outline text file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// List full number key and content key of every heading
    Keys {
        /// Flattened outline text file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Look up a heading by content key
    Find {
        /// Flattened outline text file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Content key, e.g. "Intro-Background"
        key: String,
    },

    /// Print a section (heading, body, subsections) by content key
    Extract {
        /// Flattened outline text file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Content key, e.g. "Intro-Background"
        key: String,
    },

    /// List every section with its body grouped into text and table blocks
    Sections {
        /// Flattened outline text file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Renumber a report after a template with the same headings
    Reconcile {
        /// Template outline defining canonical numbering
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        template: PathBuf,
        /// Report outline to renumber
        #[arg(value_hint = ValueHint::FilePath)]
        report: PathBuf,
        /// Print only this section of the renumbered report
        #[arg(short, long)]
        extract: Option<String>,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Create config template
    Init {
        /// Create global config
        #[arg(short, long)]
        global: bool,
    },

    /// Show config paths
    Path,
}
