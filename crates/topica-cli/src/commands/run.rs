//! Run command implementation.

use crate::cli::RunArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::runner::Runner;
use topica_extractor::Extractor;
use topica_llm::OpenAiProvider;
use topica_writer::OutputWriter;
use tracing::info;

/// Execute the run command.
pub fn execute_run(args: RunArgs, config: &mut Config, formatter: &Formatter) -> Result<()> {
    config.apply_run_overrides(&args)?;
    let service = config.resolve_service()?;

    let mut provider = OpenAiProvider::new(
        service.base_url.as_str(),
        service.model.as_str(),
        config.extractor.request_timeout(),
    )?;
    if let Some(key) = service.api_key {
        provider = provider.with_api_key(key);
    }
    info!("Using model '{}' at {}", provider.model(), service.base_url);

    let extractor = Extractor::new(provider, config.extractor.clone())?;
    let writer = OutputWriter::new(config.writer.clone());
    let runner = Runner::new(extractor, writer, config.paths.output_dir.clone(), config.done_dir());

    let report = runner.run(&config.paths.input_dir)?;
    println!("{}", formatter.format_run_report(&report)?);

    let failed = report.failed();
    if args.fail_fast && failed > 0 {
        return Err(CliError::DocumentsFailed(failed));
    }
    Ok(())
}
