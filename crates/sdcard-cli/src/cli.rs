//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "sdcard",
    version,
    about = "Keep a library of called square dance sequences and review them",
    long_about = "Import sequence transcripts, tag and categorize them, search them,\n\
                  and walk through them in review sessions built from saved queries.\n\n\
                  Queries are comma separated clauses such as\n\
                  \"-tag: weird, difficulty: hard, level: plus, maxscore: 20\"."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Library file (overrides the settings file).
    #[arg(long, value_name = "PATH", global = true)]
    pub library: Option<PathBuf>,

    /// Session file (overrides the settings file).
    #[arg(long, value_name = "PATH", global = true)]
    pub session: Option<PathBuf>,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format.
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Import sequences from transcript files, skipping ones already known.
    Import {
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,
    },

    /// List sequences, optionally narrowed by a query.
    List {
        #[arg(long, short)]
        query: Option<String>,
    },

    /// Show every call of a sequence.
    Show {
        /// Sequence id or a unique prefix of it.
        id: String,
    },

    /// Add or remove a tag on sequences.
    Tag(TagArgs),

    /// Choose or clear a category option on sequences.
    Categorize(CategorizeArgs),

    /// Delete sequences from the library.
    Remove {
        #[arg(value_name = "ID", required = true)]
        ids: Vec<String>,
    },

    /// List tag definitions.
    Tags,

    /// List category definitions.
    Categories,

    /// Define a new tag.
    DefineTag {
        name: String,
        #[arg(long, default_value = "")]
        comment: String,
    },

    /// Define a new category with its options.
    DefineCategory {
        name: String,
        #[arg(value_name = "OPTION", required = true)]
        options: Vec<String>,
        #[arg(long, default_value = "")]
        comment: String,
    },

    /// Manage review stacks.
    #[command(subcommand)]
    Stack(StackCommand),

    /// Manage the review session.
    #[command(subcommand)]
    Session(SessionCommand),

    /// Show the next sequence of a stack (the active one by default).
    Next { stack: Option<String> },

    /// Step back in a stack (the active one by default).
    Prev { stack: Option<String> },

    /// Print the settings in effect, optionally saving them.
    Config {
        /// Save the effective settings to the settings file.
        #[arg(long)]
        save: bool,
    },
}

#[derive(Parser)]
#[command(group = clap::ArgGroup::new("action").required(true).args(["add", "remove"]))]
pub struct TagArgs {
    #[arg(value_name = "ID", required = true)]
    pub ids: Vec<String>,

    /// Tag to add.
    #[arg(long, value_name = "TAG")]
    pub add: Option<String>,

    /// Tag to remove.
    #[arg(long, value_name = "TAG")]
    pub remove: Option<String>,
}

#[derive(Parser)]
pub struct CategorizeArgs {
    #[arg(long = "id", value_name = "ID", required = true)]
    pub ids: Vec<String>,

    pub category: String,

    /// Option to choose. Omit with --clear.
    #[arg(required_unless_present = "clear", conflicts_with = "clear")]
    pub option: Option<String>,

    #[arg(long)]
    pub clear: bool,
}

#[derive(Subcommand)]
pub enum StackCommand {
    /// Add a stack. Without a query it matches everything.
    Add {
        name: String,
        #[arg(long, short)]
        query: Option<String>,
    },
    Remove {
        name: String,
    },
    Rename {
        name: String,
        new_name: String,
    },
    /// Replace a stack's query. Applies from the next session start.
    Query {
        name: String,
        query: Option<String>,
    },
    List,
}

#[derive(Subcommand)]
pub enum SessionCommand {
    /// Fill every stack from the library.
    Start {
        /// Give each sequence to one stack and alternate hard and easy ones.
        #[arg(long)]
        balanced: bool,

        /// Tag every sequence you advance past.
        #[arg(long, value_name = "TAG")]
        auto_tag: Option<String>,
    },
    Status,
    Stop,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
