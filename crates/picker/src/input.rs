//! Classification of raw terminal events into picker inputs.

use ratatui::crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// A terminal event reduced to what the picker cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
	/// A printable character destined for the filter.
	Character(char),
	Backspace,
	MoveUp,
	MoveDown,
	Confirm,
	Cancel,
	/// Reload the candidate list from the item source.
	Refresh,
	/// Anything else: mouse, focus, paste, resize, key releases.
	Ignored,
}

impl From<&Event> for Input {
	fn from(event: &Event) -> Self {
		match event {
			Event::Key(key) => classify_key(key),
			_ => Input::Ignored,
		}
	}
}

/// Classify a single key event.
///
/// Only presses count; control characters never become [`Input::Character`].
pub fn classify_key(key: &KeyEvent) -> Input {
	if key.kind != KeyEventKind::Press {
		return Input::Ignored;
	}

	let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
	let alt = key.modifiers.contains(KeyModifiers::ALT);
	// Ctrl+Alt is how AltGr arrives on some platforms.
	let chord = ctrl && !alt;
	match key.code {
		KeyCode::Char('c') if chord => Input::Cancel,
		KeyCode::Char('r') if chord => Input::Refresh,
		KeyCode::Char('p') if chord => Input::MoveUp,
		KeyCode::Char('n') if chord => Input::MoveDown,
		KeyCode::Char('h') if chord => Input::Backspace,
		KeyCode::Char(ch) if ctrl && alt && !ch.is_control() => Input::Character(ch),
		KeyCode::Char(_) if ctrl || alt => Input::Ignored,
		KeyCode::Char(ch) if ch.is_control() => Input::Ignored,
		KeyCode::Char(ch) => Input::Character(ch),
		KeyCode::Backspace => Input::Backspace,
		KeyCode::Up => Input::MoveUp,
		KeyCode::Down => Input::MoveDown,
		KeyCode::Enter => Input::Confirm,
		KeyCode::Esc => Input::Cancel,
		_ => Input::Ignored,
	}
}
