use std::fmt::Write;
use std::path::PathBuf;

use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{ArgAction, ColorChoice, Parser, ValueEnum};
use kctx::app_dirs;

/// Produce the full version banner including the config and cache directories.
fn long_version() -> &'static str {
	let config_dir = match app_dirs::get_config_dir() {
		Ok(path) => path.display().to_string(),
		Err(err) => format!("unavailable ({err})"),
	};
	let cache_dir = match app_dirs::get_cache_dir() {
		Ok(path) => path.display().to_string(),
		Err(err) => format!("unavailable ({err})"),
	};

	let mut details = format!("kctx {}", env!("CARGO_PKG_VERSION"));
	let _ = writeln!(details);
	let _ = writeln!(details, "config directory: {config_dir}");
	let _ = writeln!(details, "cache directory: {cache_dir}");

	Box::leak(details.into_boxed_str())
}

fn cli_styles() -> Styles {
	Styles::styled()
		.header(AnsiColor::Green.on_default().effects(Effects::BOLD))
		.usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
		.literal(AnsiColor::Cyan.on_default())
		.placeholder(AnsiColor::Yellow.on_default())
}

/// Parse command line arguments into [`CliArgs`].
pub(crate) fn parse_cli() -> CliArgs {
	CliArgs::parse()
}

/// How the session outcome is printed once the picker closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
	Plain,
	Json,
}

/// Command-line arguments accepted by the `kctx` binary.
#[derive(Parser, Debug)]
#[command(
	name = "kctx",
	version,
	long_version = long_version(),
	about = "Pick and switch Kubernetes contexts interactively",
	color = ColorChoice::Auto,
	styles = cli_styles()
)]
pub(crate) struct CliArgs {
	#[arg(
		short,
		long = "config",
		value_name = "FILE",
		env = "KCTX_CONFIG",
		action = ArgAction::Append,
		help = "Additional configuration file to merge (default: none)"
	)]
	pub(crate) config: Vec<PathBuf>,
	#[arg(
		short = 'n',
		long = "no-config",
		help = "Skip loading default configuration files (default: disabled)"
	)]
	pub(crate) no_config: bool,
	#[arg(
		short = 'q',
		long,
		value_name = "QUERY",
		help = "Start with this filter text (default: empty)"
	)]
	pub(crate) query: Option<String>,
	#[arg(
		short = 'd',
		long,
		help = "Show the diagnostic overlay line (default: disabled)"
	)]
	pub(crate) debug: bool,
	#[arg(
		short = 'x',
		long,
		help = "Quit after a context was switched successfully (default: keep browsing)"
	)]
	pub(crate) exit_on_confirm: bool,
	#[arg(
		long,
		value_name = "PATH",
		help = "kubectl executable to run (default: kubectl)"
	)]
	pub(crate) kubectl: Option<PathBuf>,
	#[arg(
		long,
		value_name = "FILE",
		help = "Kubeconfig passed to kubectl (default: kubectl's own resolution)"
	)]
	pub(crate) kubeconfig: Option<PathBuf>,
	#[arg(
		long,
		value_name = "FILTER",
		help = "Log filter such as warn or kctx_picker=debug (default: warn)"
	)]
	pub(crate) log_level: Option<String>,
	#[arg(
		long,
		value_name = "FILE",
		help = "Append logs to this file (default: kctx.log in the cache directory)"
	)]
	pub(crate) log_file: Option<PathBuf>,
	#[arg(long, help = "Print the effective configuration and exit")]
	pub(crate) print_config: bool,
	#[arg(
		short,
		long,
		value_enum,
		default_value_t = OutputFormat::Plain,
		help = "Format used to report the outcome"
	)]
	pub(crate) output: OutputFormat,
}
