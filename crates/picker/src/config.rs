use crate::render::Layout;
use crate::style::Theme;

/// What happens after the action sink accepts a confirmed item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConfirmPolicy {
	/// Keep the picker open so the user can switch again.
	#[default]
	Stay,
	/// Close the picker once an item has been applied successfully.
	Exit,
}

/// Human-readable text rendered around the result list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labels {
	/// Prefix of the current-selection label.
	pub current_prefix: String,
	/// Shown in the result list when nothing matches.
	pub empty: String,
}

impl Default for Labels {
	fn default() -> Self {
		Self {
			current_prefix: "Current: ".to_string(),
			empty: "No matches".to_string(),
		}
	}
}

/// Everything that shapes one picker session besides its collaborators.
#[derive(Debug, Clone, Default)]
pub struct PickerConfig {
	pub layout: Layout,
	pub theme: Theme,
	pub labels: Labels,
	/// Draw a diagnostic line describing the picker state.
	pub debug_overlay: bool,
	pub confirm_policy: ConfirmPolicy,
	/// Filter text the session starts with.
	pub initial_query: String,
}
