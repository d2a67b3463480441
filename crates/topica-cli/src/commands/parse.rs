//! Parse command implementation.

use crate::cli::ParseArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use std::fs;
use topica_domain::Document;
use topica_extractor::parse_topics;
use topica_writer::OutputWriter;

/// Execute the parse command.
pub fn execute_parse(args: ParseArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let raw = fs::read_to_string(&args.file)?;
    let topics = parse_topics(&raw);

    println!("{}", formatter.format_topics(&topics)?);

    if let Some(output_dir) = args.output_dir {
        let source_name = match args.source_name {
            Some(name) => name,
            None => Document::from_path(&args.file, "").name().to_string(),
        };
        let writer = OutputWriter::new(config.writer.clone());
        let outcome = writer.write(&topics, &output_dir, &source_name)?;
        println!("{}", formatter.write_result(&outcome));
    }
    Ok(())
}
