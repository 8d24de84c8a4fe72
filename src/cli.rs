use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::ActiveChecks;
use crate::output::OutputFormat;

/// Color output control
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal capability
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

#[derive(Parser, Debug)]
#[command(name = "archivetools")]
#[command(author, version, about = "Check and fix file paths for a target file system")]
#[command(long_about = "Validates file paths against a target file system's constraints \
    (invalid characters, maximum path length) and can rename offending entries.\n\n\
    Exit codes:\n  \
    0 - No findings\n  \
    1 - Findings detected (or renames that could not be applied)\n  \
    2 - Configuration or runtime error")]
pub struct Cli {
    /// Increase output verbosity (-v lists every applied rename)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Control color output
    #[arg(long, value_enum, default_value = "auto", global = true)]
    pub color: ColorChoice,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check for file paths that would be invalid on the target file system
    Check(CheckArgs),

    /// Fix file paths to comply with the target file system
    Rename(RenameArgs),
}

#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// File or directory to check
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Target file system for the checks [possible values: windows]
    #[arg(short = 'f', long = "fs", default_value = "windows")]
    pub fs: String,

    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format [possible values: cli, csv]
    #[arg(long, default_value = "cli")]
    pub output: OutputFormat,

    /// Check for empty directories recursively
    #[arg(short = 'e', long = "check-empty-dirs")]
    pub empty_dirs: bool,

    /// Add empty-directory checks to the default selection (also spelled +e)
    #[arg(long = "add-check-empty-dirs")]
    pub add_empty_dirs: bool,

    /// Check for invalid characters in file paths. Active by default
    #[arg(short = 'i', long = "check-invalid-characters")]
    pub invalid_characters: bool,

    /// Check for path lengths exceeding the file system limit. Active by default
    #[arg(short = 'l', long = "check-path-length")]
    pub path_length: bool,
}

impl CheckArgs {
    #[must_use]
    pub const fn active_checks(&self) -> ActiveChecks {
        ActiveChecks::from_flags(
            self.invalid_characters,
            self.path_length,
            self.empty_dirs,
            self.add_empty_dirs,
        )
    }
}

#[derive(Parser, Debug)]
pub struct RenameArgs {
    /// File or directory to fix
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Target file system for the checks [possible values: windows]
    #[arg(short = 'f', long = "fs", default_value = "windows")]
    pub fs: String,

    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Remove empty directories recursively
    #[arg(short = 'e', long = "check-empty-dirs")]
    pub empty_dirs: bool,

    /// Remove empty directories in addition to the default operations (also spelled +e)
    #[arg(long = "add-check-empty-dirs")]
    pub add_empty_dirs: bool,

    /// Replace invalid characters and apply rename rules. Active by default
    #[arg(short = 'i', long = "check-invalid-characters")]
    pub invalid_characters: bool,

    /// Re-check path lengths after renaming. Active by default
    #[arg(short = 'l', long = "check-path-length")]
    pub path_length: bool,
}

impl RenameArgs {
    #[must_use]
    pub const fn active_checks(&self) -> ActiveChecks {
        ActiveChecks::from_flags(
            self.invalid_characters,
            self.path_length,
            self.empty_dirs,
            self.add_empty_dirs,
        )
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
