//! Colours used when drawing the picker.

use ratatui::style::Color;

/// Foreground/background pairs for every picker region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
	/// Default text colour.
	pub foreground: Color,
	/// Default background colour.
	pub background: Color,
	/// Input box border.
	pub border: Color,
	/// Current-selection label.
	pub label: Color,
	/// Background of the highlighted result row.
	pub highlight: Color,
	/// Status text for failed actions.
	pub error: Color,
	/// Status text for applied actions.
	pub success: Color,
	/// Placeholder text and the debug overlay.
	pub muted: Color,
}

impl Default for Theme {
	fn default() -> Self {
		Self {
			foreground: Color::Reset,
			background: Color::Reset,
			border: Color::Reset,
			label: Color::Magenta,
			highlight: Color::Yellow,
			error: Color::Red,
			success: Color::Green,
			muted: Color::DarkGray,
		}
	}
}
