//! CLI argument parsing using clap.

use clap::ArgAction;
use clap::Parser;
use log::LevelFilter;
use std::path::PathBuf;

/// Extract an archive read from standard input.
///
/// The format (tar, tar.gz, tar.bz2, tar.xz, tar.zst, zip, 7z) is detected
/// from the content. Group and other write permission is removed from every
/// extracted file and directory.
#[derive(Parser, Debug)]
#[command(name = "unarc")]
#[command(author, version, about, long_about)]
pub struct Cli {
    /// Destination directory, created if missing
    #[arg(long, value_name = "PATH", default_value = ".")]
    pub dest: PathBuf,

    /// Skip symlink entries that have no target instead of failing
    #[arg(
        long,
        value_name = "BOOL",
        default_value_t = true,
        num_args = 0..=1,
        default_missing_value = "true",
        action = ArgAction::Set,
        value_parser = clap::builder::BoolishValueParser::new()
    )]
    pub skip_empty_symlink: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Log level selected by the `-v` flags.
    pub const fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}
