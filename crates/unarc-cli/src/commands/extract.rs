//! Extract command implementation.

use crate::cli::Cli;
use crate::error::add_dest_context;
use anyhow::Result;
use log::info;
use std::io::Read;
use unarc_core::ExtractOptions;
use unarc_core::extract_stream;

/// Extracts the archive read from `input` according to `args`.
///
/// Prints nothing on success; a summary is logged at info level.
pub fn execute<R: Read>(args: &Cli, input: R) -> Result<()> {
    let options = ExtractOptions::default().with_skip_empty_symlink(args.skip_empty_symlink);

    let report = add_dest_context(extract_stream(input, &args.dest, &options), &args.dest)?;

    info!(
        "extracted {} files, {} directories, {} symlinks, {} hard links ({} bytes) into {}",
        report.files_extracted,
        report.directories_created,
        report.symlinks_created,
        report.hardlinks_created,
        report.bytes_written,
        args.dest.display()
    );
    if report.entries_skipped > 0 {
        info!("skipped {} symlinks without target", report.entries_skipped);
    }

    Ok(())
}
