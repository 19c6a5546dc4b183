use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "ffs", about = "Fast fuzzy file selector", version)]
pub struct Cli {
    /// Search this directory instead of looking for the project root marker
    #[arg(long, global = true, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Ignore case when matching
    #[arg(short = 'i', long, global = true, conflicts_with = "case_sensitive")]
    pub ignore_case: bool,

    /// Match case exactly
    #[arg(short = 's', long, global = true)]
    pub case_sensitive: bool,

    /// Additional file or directory name pattern to skip (repeatable)
    #[arg(long = "ignore", global = true, value_name = "GLOB")]
    pub ignore: Vec<String>,

    /// Write logs to a file instead of stderr (useful with the picker)
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List every candidate file
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the ranked matches for a query
    Query {
        /// Characters to match
        query: String,
        /// Maximum number of matches to print
        #[arg(long)]
        limit: Option<usize>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the resolved project root
    Root,
}
