use anyhow::{Context, Result};
use kctx::kubectl::Kubectl;
use kctx_picker::{Picker, PickerOutcome};

use crate::settings::ResolvedConfig;

/// Coordinates building and running the interactive context picker.
pub(crate) struct PickWorkflow {
	picker: Picker<Kubectl, Kubectl>,
}

impl PickWorkflow {
	pub(crate) fn from_config(config: ResolvedConfig) -> Self {
		let ResolvedConfig {
			picker, kubectl, ..
		} = config;

		let kubectl = Kubectl::new(kubectl);
		let picker = Picker::new(kubectl.clone(), kubectl).with_config(picker);
		Self { picker }
	}

	pub(crate) fn run(self) -> Result<PickerOutcome> {
		self.picker
			.run()
			.context("context picker exited with an error")
	}
}
