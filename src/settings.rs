mod errors;

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Result, anyhow};
use config::{Config, File};
use kctx::app_dirs;
use kctx::kubectl::KubectlOptions;
use kctx::logging::LogOptions;
use kctx_picker::{ConfirmPolicy, Layout, PickerConfig, Theme};
use ratatui::style::Color;
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use self::errors::ConfigError;
use crate::cli::CliArgs;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct RawConfig {
	picker: PickerSection,
	layout: LayoutSection,
	theme: ThemeSection,
	kubectl: KubectlSection,
	log: LogSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct PickerSection {
	initial_query: Option<String>,
	debug_overlay: Option<bool>,
	confirm: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct LayoutSection {
	origin_x: Option<u16>,
	origin_y: Option<u16>,
	input_width: Option<u16>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ThemeSection {
	foreground: Option<String>,
	background: Option<String>,
	border: Option<String>,
	label: Option<String>,
	highlight: Option<String>,
	error: Option<String>,
	success: Option<String>,
	muted: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct KubectlSection {
	program: Option<PathBuf>,
	kubeconfig: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct LogSection {
	level: Option<String>,
	file: Option<PathBuf>,
}

pub(crate) struct ResolvedConfig {
	pub(crate) picker: PickerConfig,
	pub(crate) kubectl: KubectlOptions,
	pub(crate) log: LogOptions,
}

impl ResolvedConfig {
	pub(crate) fn print_summary(&self) {
		let picker = &self.picker;
		println!("Effective configuration:");
		if picker.initial_query.is_empty() {
			println!("  Initial query: (empty)");
		} else {
			println!("  Initial query: {}", picker.initial_query);
		}
		println!("  Debug overlay: {}", bool_to_word(picker.debug_overlay));
		println!(
			"  On confirm: {}",
			match picker.confirm_policy {
				ConfirmPolicy::Stay => "stay",
				ConfirmPolicy::Exit => "exit",
			}
		);
		println!(
			"  Layout: origin ({}, {}), input width {}",
			picker.layout.origin_x, picker.layout.origin_y, picker.layout.input_width
		);
		println!(
			"  Theme: label {}, highlight {}, error {}",
			picker.theme.label, picker.theme.highlight, picker.theme.error
		);
		println!("  kubectl: {}", self.kubectl.program.display());
		match &self.kubectl.kubeconfig {
			Some(path) => println!("  Kubeconfig: {}", path.display()),
			None => println!("  Kubeconfig: (kubectl default)"),
		}
		println!("  Log level: {}", self.log.level);
		match self.log.resolved_file() {
			Ok(path) => println!("  Log file: {}", path.display()),
			Err(err) => println!("  Log file: unavailable ({err})"),
		}
	}
}

fn bool_to_word(value: bool) -> &'static str {
	if value { "enabled" } else { "disabled" }
}

pub(crate) fn load(cli: &CliArgs) -> Result<ResolvedConfig> {
	let builder = build_config(cli)?;
	let mut raw: RawConfig = builder
		.try_deserialize()
		.map_err(|err| anyhow!("failed to deserialize configuration: {err}"))?;
	raw.apply_cli_overrides(cli);
	raw.resolve()
}

fn build_config(cli: &CliArgs) -> Result<Config> {
	let mut builder = Config::builder();

	if !cli.no_config {
		for path in default_config_files() {
			builder = builder.add_source(File::from(path).required(false));
		}
	}

	for path in &cli.config {
		builder = builder.add_source(File::from(path.clone()).required(true));
	}

	builder = builder.add_source(
		config::Environment::with_prefix("kctx")
			.separator("__")
			.try_parsing(true),
	);

	Ok(builder.build()?)
}

fn default_config_files() -> Vec<PathBuf> {
	let mut files = Vec::new();

	if let Ok(dir) = app_dirs::get_config_dir() {
		files.push(dir.join("config.toml"));
	}

	if let Ok(current_dir) = env::current_dir() {
		files.push(current_dir.join(".kctx.toml"));
	}

	files
}

impl RawConfig {
	fn apply_cli_overrides(&mut self, cli: &CliArgs) {
		if let Some(query) = cli.query.clone() {
			self.picker.initial_query = Some(query);
		}
		if cli.debug {
			self.picker.debug_overlay = Some(true);
		}
		if cli.exit_on_confirm {
			self.picker.confirm = Some("exit".to_string());
		}
		if let Some(program) = cli.kubectl.clone() {
			self.kubectl.program = Some(program);
		}
		if let Some(kubeconfig) = cli.kubeconfig.clone() {
			self.kubectl.kubeconfig = Some(kubeconfig);
		}
		if let Some(level) = cli.log_level.clone() {
			self.log.level = Some(level);
		}
		if let Some(file) = cli.log_file.clone() {
			self.log.file = Some(file);
		}
	}

	fn resolve(self) -> Result<ResolvedConfig> {
		let confirm_policy = match self.picker.confirm {
			Some(value) => parse_confirm_policy(value)?,
			None => ConfirmPolicy::default(),
		};

		let picker = PickerConfig {
			layout: self.layout.resolve()?,
			theme: self.theme.resolve()?,
			debug_overlay: self.picker.debug_overlay.unwrap_or(false),
			confirm_policy,
			initial_query: self.picker.initial_query.unwrap_or_default(),
			..PickerConfig::default()
		};

		let defaults = KubectlOptions::default();
		let kubectl = KubectlOptions {
			program: self.kubectl.program.unwrap_or(defaults.program),
			kubeconfig: self.kubectl.kubeconfig,
		};

		let level = self.log.level.unwrap_or_else(|| LogOptions::default().level);
		if let Err(err) = EnvFilter::try_new(&level) {
			return Err(ConfigError::invalid("log.level", level, err.to_string()).into());
		}
		let log = LogOptions {
			level,
			file: self.log.file,
		};

		Ok(ResolvedConfig {
			picker,
			kubectl,
			log,
		})
	}
}

fn parse_confirm_policy(value: String) -> Result<ConfirmPolicy, ConfigError> {
	match value.trim().to_ascii_lowercase().as_str() {
		"stay" => Ok(ConfirmPolicy::Stay),
		"exit" => Ok(ConfirmPolicy::Exit),
		_ => Err(ConfigError::invalid(
			"picker.confirm",
			value,
			"expected `stay` or `exit`",
		)),
	}
}

impl LayoutSection {
	fn resolve(self) -> Result<Layout, ConfigError> {
		let defaults = Layout::default();
		let layout = Layout {
			origin_x: self.origin_x.unwrap_or(defaults.origin_x),
			origin_y: self.origin_y.unwrap_or(defaults.origin_y),
			input_width: self.input_width.unwrap_or(defaults.input_width),
		};

		if layout.origin_x == 0 {
			return Err(ConfigError::invalid(
				"layout.origin_x",
				"0",
				"the input border needs a column to the left of the origin",
			));
		}
		if layout.input_width == 0 {
			return Err(ConfigError::invalid(
				"layout.input_width",
				"0",
				"the input box needs at least one column",
			));
		}
		Ok(layout)
	}
}

impl ThemeSection {
	fn resolve(self) -> Result<Theme, ConfigError> {
		let defaults = Theme::default();
		Ok(Theme {
			foreground: color("theme.foreground", self.foreground, defaults.foreground)?,
			background: color("theme.background", self.background, defaults.background)?,
			border: color("theme.border", self.border, defaults.border)?,
			label: color("theme.label", self.label, defaults.label)?,
			highlight: color("theme.highlight", self.highlight, defaults.highlight)?,
			error: color("theme.error", self.error, defaults.error)?,
			success: color("theme.success", self.success, defaults.success)?,
			muted: color("theme.muted", self.muted, defaults.muted)?,
		})
	}
}

fn color(key: &'static str, value: Option<String>, default: Color) -> Result<Color, ConfigError> {
	let Some(value) = value else {
		return Ok(default);
	};
	Color::from_str(value.trim()).map_err(|_| {
		ConfigError::invalid(key, value, "expected a colour name, index, or #rrggbb")
	})
}

#[cfg(test)]
mod tests {
	use std::fs;
	use std::path::Path;

	use clap::Parser;

	use super::*;

	fn write_config(dir: &Path, contents: &str) -> PathBuf {
		let path = dir.join("kctx.toml");
		fs::write(&path, contents).expect("write config");
		path
	}

	fn load_args(args: &[&str]) -> Result<ResolvedConfig> {
		let mut argv = vec!["kctx", "--no-config"];
		argv.extend_from_slice(args);
		let cli = CliArgs::try_parse_from(argv).expect("parse cli");
		load(&cli)
	}

	#[test]
	fn defaults_apply_without_any_sources() {
		let resolved = load_args(&[]).expect("load");
		assert_eq!(resolved.picker.layout, Layout::default());
		assert_eq!(resolved.picker.theme, Theme::default());
		assert_eq!(resolved.picker.confirm_policy, ConfirmPolicy::Stay);
		assert!(!resolved.picker.debug_overlay);
		assert_eq!(resolved.kubectl, KubectlOptions::default());
		assert_eq!(resolved.log.level, "warn");
	}

	#[test]
	fn file_values_are_loaded() {
		let dir = tempfile::tempdir().expect("tempdir");
		let path = write_config(
			dir.path(),
			r##"
[picker]
initial_query = "prod"
debug_overlay = true
confirm = "exit"

[layout]
origin_x = 2
input_width = 30

[theme]
highlight = "blue"
label = "#00ff00"

[kubectl]
program = "/opt/bin/kubectl"

[log]
level = "debug"
"##,
		);

		let resolved = load_args(&["--config", path.to_str().expect("utf-8 path")]).expect("load");
		let picker = &resolved.picker;
		assert_eq!(picker.initial_query, "prod");
		assert!(picker.debug_overlay);
		assert_eq!(picker.confirm_policy, ConfirmPolicy::Exit);
		assert_eq!(
			picker.layout,
			Layout {
				origin_x: 2,
				origin_y: 5,
				input_width: 30,
			}
		);
		assert_eq!(picker.theme.highlight, Color::Blue);
		assert_eq!(picker.theme.label, Color::Rgb(0, 255, 0));
		assert_eq!(picker.theme.error, Color::Red);
		assert_eq!(resolved.kubectl.program, PathBuf::from("/opt/bin/kubectl"));
		assert_eq!(resolved.log.level, "debug");
	}

	#[test]
	fn command_line_overrides_files() {
		let dir = tempfile::tempdir().expect("tempdir");
		let path = write_config(
			dir.path(),
			"[picker]\ninitial_query = \"prod\"\n[kubectl]\nprogram = \"kubectl-1.30\"\n",
		);

		let resolved = load_args(&[
			"--config",
			path.to_str().expect("utf-8 path"),
			"--query",
			"staging",
			"--kubectl",
			"/usr/local/bin/kubectl",
			"--kubeconfig",
			"/tmp/kube.yaml",
			"--exit-on-confirm",
			"--log-level",
			"kctx_picker=trace",
		])
		.expect("load");

		assert_eq!(resolved.picker.initial_query, "staging");
		assert_eq!(resolved.picker.confirm_policy, ConfirmPolicy::Exit);
		assert_eq!(
			resolved.kubectl.program,
			PathBuf::from("/usr/local/bin/kubectl")
		);
		assert_eq!(
			resolved.kubectl.kubeconfig,
			Some(PathBuf::from("/tmp/kube.yaml"))
		);
		assert_eq!(resolved.log.level, "kctx_picker=trace");
	}

	#[test]
	fn invalid_values_name_the_offending_key() {
		let dir = tempfile::tempdir().expect("tempdir");

		let path = write_config(dir.path(), "[theme]\nhighlight = \"not-a-colour\"\n");
		let err = load_args(&["--config", path.to_str().expect("utf-8 path")])
			.err()
			.expect("invalid colour");
		assert!(err.to_string().contains("theme.highlight"), "{err}");

		let path = write_config(dir.path(), "[picker]\nconfirm = \"sometimes\"\n");
		let err = load_args(&["--config", path.to_str().expect("utf-8 path")])
			.err()
			.expect("invalid policy");
		assert!(err.to_string().contains("picker.confirm"), "{err}");

		let path = write_config(dir.path(), "[layout]\norigin_x = 0\n");
		let err = load_args(&["--config", path.to_str().expect("utf-8 path")])
			.err()
			.expect("invalid layout");
		assert!(err.to_string().contains("layout.origin_x"), "{err}");
	}

	#[test]
	fn missing_explicit_config_file_is_an_error() {
		let dir = tempfile::tempdir().expect("tempdir");
		let missing = dir.path().join("absent.toml");
		assert!(load_args(&["--config", missing.to_str().expect("utf-8 path")]).is_err());
	}
}
