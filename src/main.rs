mod cli;
mod settings;
mod workflow;

use anyhow::Result;
use cli::{OutputFormat, parse_cli, print_json, print_plain};
use kctx::logging;
use settings::ResolvedConfig;
use tracing::info;
use workflow::PickWorkflow;

fn main() -> Result<()> {
	let cli = parse_cli();
	let resolved = settings::load(&cli)?;

	if cli.print_config {
		resolved.print_summary();
		return Ok(());
	}

	if let Some(path) = logging::initialize(&resolved.log) {
		info!(log_file = %path.display(), "logging initialised");
	}

	run_picker(cli.output, resolved)
}

/// Execute the picker workflow and print output in the chosen format.
fn run_picker(format: OutputFormat, settings: ResolvedConfig) -> Result<()> {
	let outcome = PickWorkflow::from_config(settings).run()?;

	match format {
		OutputFormat::Plain => print_plain(&outcome),
		OutputFormat::Json => print_json(&outcome)?,
	}

	Ok(())
}
