//! Kubernetes contexts as picker items, switched through the `kubectl` CLI.

use std::io;
use std::path::PathBuf;
use std::process::{Command, ExitStatus};

use kctx_picker::{ActionSink, ItemSource};
use thiserror::Error;
use tracing::debug;

/// How to invoke `kubectl`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KubectlOptions {
	/// Executable name or path.
	pub program: PathBuf,
	/// Passed as `--kubeconfig` when set.
	pub kubeconfig: Option<PathBuf>,
}

impl Default for KubectlOptions {
	fn default() -> Self {
		Self {
			program: PathBuf::from("kubectl"),
			kubeconfig: None,
		}
	}
}

#[derive(Debug, Error)]
pub enum KubectlError {
	#[error("failed to run `{program}`: {source}")]
	Spawn {
		program: String,
		#[source]
		source: io::Error,
	},

	#[error("`{command}` failed ({status}): {stderr}")]
	Failed {
		command: String,
		status: ExitStatus,
		stderr: String,
	},
}

/// Lists and switches contexts of the active kubeconfig.
#[derive(Debug, Clone, Default)]
pub struct Kubectl {
	options: KubectlOptions,
}

impl Kubectl {
	pub fn new(options: KubectlOptions) -> Self {
		Self { options }
	}

	fn run(&self, args: &[&str]) -> Result<String, KubectlError> {
		let program = self.options.program.display().to_string();
		let mut command = Command::new(&self.options.program);
		if let Some(kubeconfig) = &self.options.kubeconfig {
			command.arg("--kubeconfig").arg(kubeconfig);
		}
		command.args(args);

		debug!(%program, ?args, "running kubectl");
		let output = command
			.output()
			.map_err(|source| KubectlError::Spawn {
				program: program.clone(),
				source,
			})?;

		if !output.status.success() {
			return Err(KubectlError::Failed {
				command: format!("{program} {}", args.join(" ")),
				status: output.status,
				stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
			});
		}

		Ok(String::from_utf8_lossy(&output.stdout).into_owned())
	}
}

/// Split `kubectl config get-contexts -o name` output into context names.
pub fn parse_context_names(stdout: &str) -> Vec<String> {
	stdout
		.lines()
		.map(str::trim)
		.filter(|line| !line.is_empty())
		.map(str::to_string)
		.collect()
}

impl ItemSource for Kubectl {
	type Error = KubectlError;

	fn list_items(&mut self) -> Result<Vec<String>, Self::Error> {
		let stdout = self.run(&["config", "get-contexts", "-o", "name"])?;
		Ok(parse_context_names(&stdout))
	}

	fn current(&mut self) -> Result<Option<String>, Self::Error> {
		let stdout = self.run(&["config", "current-context"])?;
		let current = stdout.trim();
		Ok((!current.is_empty()).then(|| current.to_string()))
	}
}

impl ActionSink for Kubectl {
	type Error = KubectlError;

	fn apply_selection(&mut self, chosen: &str) -> Result<String, Self::Error> {
		self.run(&["config", "use-context", chosen])
	}
}
