//! Plan command implementation.

use crate::cli::PlanArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use std::fs;
use topica_domain::Document;
use topica_extractor::chunk_text;

/// Execute the plan command.
pub fn execute_plan(args: PlanArgs, config: &mut Config, formatter: &Formatter) -> Result<()> {
    config.apply_chunking_overrides(args.preset, args.chunk_size, args.overlap_size);

    let text = fs::read_to_string(&args.file)?;
    let document = Document::from_path(&args.file, text);
    let chunks = chunk_text(
        document.text(),
        config.extractor.chunk_size,
        config.extractor.overlap_size,
    )?;

    println!("{}", formatter.format_plan(document.name(), &chunks)?);
    Ok(())
}
