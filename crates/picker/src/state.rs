//! Picker state and the transitions driven by classified input.
//!
//! [`PickerState`] is the single mutable value owned by the event loop. Every
//! transition that can change either the filtered list or the cursor ends in
//! [`PickerState::clamp_selection`], so the selection is always a valid index
//! into the filtered list (or `None` when nothing matches).

use crate::filter::matching_indices;
use crate::input::Input;

/// What the event loop should do after a transition has been applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
	/// State may have changed; redraw and keep polling.
	Continue,
	/// The user confirmed the highlighted item.
	Confirm(String),
	/// Confirm was pressed while no item matched the filter.
	NothingToConfirm,
	/// The user asked to leave without applying anything.
	Cancel,
	/// The user asked to reload the candidate list.
	Refresh,
}

/// Result of the most recent call into an external collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionReport {
	/// The action sink accepted `item` and returned `output`.
	Applied { item: String, output: String },
	/// The action sink rejected `item`.
	Failed { item: String, error: String },
	/// Reloading the candidate list failed; the previous list was kept.
	RefreshFailed { error: String },
}

impl ActionReport {
	/// Whether the report describes a failure.
	#[must_use]
	pub fn is_error(&self) -> bool {
		!matches!(self, Self::Applied { .. })
	}

	/// Single-line description suitable for a status row.
	#[must_use]
	pub fn summary(&self) -> String {
		match self {
			Self::Applied { item, output } => match first_line(output) {
				Some(line) => line.to_string(),
				None => format!("Applied {item}"),
			},
			Self::Failed { item, error } => {
				format!("{item}: {}", first_line(error).unwrap_or("failed"))
			}
			Self::RefreshFailed { error } => {
				format!("Refresh failed: {}", first_line(error).unwrap_or("unknown error"))
			}
		}
	}
}

fn first_line(text: &str) -> Option<&str> {
	text.lines().map(str::trim).find(|line| !line.is_empty())
}

/// Filter text, candidate items and cursor for one picker session.
#[derive(Debug, Clone, Default)]
pub struct PickerState {
	filter: String,
	items: Vec<String>,
	filtered: Vec<usize>,
	selected: Option<usize>,
	current: Option<String>,
	last_action: Option<ActionReport>,
}

impl PickerState {
	/// Build a state over `items` with an empty filter.
	#[must_use]
	pub fn new(items: Vec<String>) -> Self {
		let mut state = Self {
			items,
			..Self::default()
		};
		state.refilter();
		state
	}

	/// Seed the filter text, dropping any control characters.
	#[must_use]
	pub fn with_filter(mut self, query: &str) -> Self {
		self.filter = query.chars().filter(|ch| !ch.is_control()).collect();
		self.refilter();
		self
	}

	/// Current filter text.
	#[must_use]
	pub fn filter(&self) -> &str {
		&self.filter
	}

	/// Every candidate item, in source order.
	#[must_use]
	pub fn items(&self) -> &[String] {
		&self.items
	}

	/// Number of items matching the filter.
	#[must_use]
	pub fn filtered_len(&self) -> usize {
		self.filtered.len()
	}

	/// Items matching the filter, in source order.
	pub fn filtered_items(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
		self.filtered.iter().map(|&index| self.items[index].as_str())
	}

	/// The filtered item at `position`, if any.
	#[must_use]
	pub fn filtered_item(&self, position: usize) -> Option<&str> {
		self.filtered
			.get(position)
			.map(|&index| self.items[index].as_str())
	}

	/// Cursor position within the filtered items; `None` when nothing matches.
	#[must_use]
	pub fn selected_index(&self) -> Option<usize> {
		self.selected
	}

	/// The highlighted item.
	#[must_use]
	pub fn selected_item(&self) -> Option<&str> {
		self.selected.and_then(|position| self.filtered_item(position))
	}

	/// The item the external system reports as active.
	#[must_use]
	pub fn current(&self) -> Option<&str> {
		self.current.as_deref()
	}

	pub fn set_current(&mut self, current: Option<String>) {
		self.current = current;
	}

	/// Report from the most recent collaborator call.
	#[must_use]
	pub fn last_action(&self) -> Option<&ActionReport> {
		self.last_action.as_ref()
	}

	pub fn record_action(&mut self, report: ActionReport) {
		self.last_action = Some(report);
	}

	/// Apply one classified input and tell the loop how to proceed.
	pub fn apply(&mut self, input: Input) -> Transition {
		match input {
			Input::Character(ch) => self.on_character(ch),
			Input::Backspace => self.on_backspace(),
			Input::MoveUp => self.on_move_up(),
			Input::MoveDown => self.on_move_down(),
			Input::Confirm => return self.on_confirm(),
			Input::Cancel => return self.on_cancel(),
			Input::Refresh => return self.on_refresh(),
			Input::Ignored => {}
		}
		Transition::Continue
	}

	/// Append a printable character to the filter.
	pub fn on_character(&mut self, ch: char) {
		if ch.is_control() {
			return;
		}
		self.filter.push(ch);
		self.refilter();
	}

	/// Remove the last filter character, if there is one.
	pub fn on_backspace(&mut self) {
		if self.filter.pop().is_some() {
			self.refilter();
		}
	}

	pub fn on_move_down(&mut self) {
		self.selected = self.selected.map(|position| position.saturating_add(1));
		self.clamp_selection();
	}

	pub fn on_move_up(&mut self) {
		self.selected = self.selected.map(|position| position.saturating_sub(1));
		self.clamp_selection();
	}

	/// Hand the highlighted item to the caller, or report that there is none.
	pub fn on_confirm(&self) -> Transition {
		match self.selected_item() {
			Some(item) => Transition::Confirm(item.to_string()),
			None => Transition::NothingToConfirm,
		}
	}

	pub fn on_cancel(&self) -> Transition {
		Transition::Cancel
	}

	pub fn on_refresh(&self) -> Transition {
		Transition::Refresh
	}

	/// Replace the candidate list, keeping the filter.
	///
	/// The highlighted item stays highlighted when it survives the reload;
	/// otherwise the previous cursor position is clamped into the new range.
	pub fn set_items(&mut self, items: Vec<String>) {
		let previous = self.selected_item().map(str::to_string);
		self.items = items;
		self.refilter();

		let Some(previous) = previous else {
			return;
		};
		let position = self.filtered_items().position(|item| item == previous);
		if position.is_some() {
			self.selected = position;
		}
	}

	fn refilter(&mut self) {
		self.filtered = matching_indices(&self.items, &self.filter);
		self.clamp_selection();
	}

	/// Force the cursor into `0..filtered_len`, or `None` when nothing matches.
	fn clamp_selection(&mut self) {
		let len = self.filtered.len();
		self.selected = if len == 0 {
			None
		} else {
			Some(self.selected.unwrap_or(0).min(len - 1))
		};
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn contexts() -> PickerState {
		PickerState::new(vec![
			"prod-east".to_string(),
			"prod-west".to_string(),
			"staging".to_string(),
		])
	}

	fn type_str(state: &mut PickerState, text: &str) {
		for ch in text.chars() {
			state.on_character(ch);
		}
	}

	fn filtered(state: &PickerState) -> Vec<&str> {
		state.filtered_items().collect()
	}

	#[test]
	fn starts_with_everything_selected_at_top() {
		let state = contexts();
		assert_eq!(filtered(&state), ["prod-east", "prod-west", "staging"]);
		assert_eq!(state.selected_index(), Some(0));
	}

	#[test]
	fn narrowing_then_moving_clamps_selection() {
		let mut state = contexts();

		type_str(&mut state, "pro");
		assert_eq!(filtered(&state), ["prod-east", "prod-west"]);
		assert_eq!(state.selected_index(), Some(0));

		state.on_move_down();
		assert_eq!(state.selected_index(), Some(1));
		state.on_move_down();
		assert_eq!(state.selected_index(), Some(1));

		type_str(&mut state, "d-west");
		assert_eq!(state.filter(), "prod-west");
		assert_eq!(filtered(&state), ["prod-west"]);
		assert_eq!(state.selected_index(), Some(0));

		assert_eq!(
			state.apply(Input::Confirm),
			Transition::Confirm("prod-west".to_string())
		);
	}

	#[test]
	fn moving_up_at_top_stays_at_top() {
		let mut state = contexts();
		state.on_move_up();
		state.on_move_up();
		assert_eq!(state.selected_index(), Some(0));
	}

	#[test]
	fn backspace_on_empty_filter_changes_nothing() {
		let mut state = contexts();
		state.on_move_down();
		state.on_backspace();
		assert_eq!(state.filter(), "");
		assert_eq!(state.filtered_len(), 3);
		assert_eq!(state.selected_index(), Some(1));
	}

	#[test]
	fn backspace_widens_the_result_set_again() {
		let mut state = contexts();
		type_str(&mut state, "zz");
		assert_eq!(state.selected_index(), None);

		state.on_backspace();
		state.on_backspace();
		assert_eq!(state.filtered_len(), 3);
		assert_eq!(state.selected_index(), Some(0));
	}

	#[test]
	fn control_characters_never_reach_the_filter() {
		let mut state = contexts();
		state.on_character('\u{3}');
		state.on_character('\n');
		state.on_character('\u{7f}');
		assert_eq!(state.filter(), "");

		let seeded = contexts().with_filter("st\tag");
		assert_eq!(seeded.filter(), "stag");
		assert_eq!(filtered(&seeded), ["staging"]);
	}

	#[test]
	fn no_match_leaves_nothing_highlighted() {
		let mut state = contexts();
		type_str(&mut state, "dev");
		assert_eq!(state.filtered_len(), 0);
		assert_eq!(state.selected_index(), None);
		assert_eq!(state.selected_item(), None);

		state.on_move_down();
		state.on_move_up();
		assert_eq!(state.selected_index(), None);
		assert_eq!(state.on_confirm(), Transition::NothingToConfirm);
	}

	#[test]
	fn empty_item_list_never_matches() {
		let mut state = PickerState::new(Vec::new());
		assert_eq!(state.on_confirm(), Transition::NothingToConfirm);
		type_str(&mut state, "prod");
		assert_eq!(state.filtered_len(), 0);
		assert_eq!(state.apply(Input::Confirm), Transition::NothingToConfirm);
	}

	#[test]
	fn cancel_refresh_and_ignored_inputs_map_to_transitions() {
		let mut state = contexts();
		assert_eq!(state.apply(Input::Cancel), Transition::Cancel);
		assert_eq!(state.apply(Input::Refresh), Transition::Refresh);
		assert_eq!(state.apply(Input::Ignored), Transition::Continue);
		assert_eq!(state.selected_index(), Some(0));
	}

	#[test]
	fn reload_keeps_highlighted_item_when_it_survives() {
		let mut state = contexts();
		state.on_move_down();
		assert_eq!(state.selected_item(), Some("prod-west"));

		state.set_items(vec![
			"dev".to_string(),
			"prod-east".to_string(),
			"prod-west".to_string(),
		]);
		assert_eq!(state.selected_item(), Some("prod-west"));
		assert_eq!(state.selected_index(), Some(2));
	}

	#[test]
	fn reload_clamps_when_highlighted_item_disappears() {
		let mut state = contexts();
		state.on_move_down();
		state.on_move_down();

		state.set_items(vec!["only".to_string()]);
		assert_eq!(state.selected_index(), Some(0));

		state.set_items(Vec::new());
		assert_eq!(state.selected_index(), None);
	}

	#[test]
	fn report_summaries_use_the_first_meaningful_line() {
		let applied = ActionReport::Applied {
			item: "prod".into(),
			output: "\nSwitched to context \"prod\".\n".into(),
		};
		assert_eq!(applied.summary(), "Switched to context \"prod\".");
		assert!(!applied.is_error());

		let silent = ActionReport::Applied {
			item: "prod".into(),
			output: String::new(),
		};
		assert_eq!(silent.summary(), "Applied prod");

		let failed = ActionReport::Failed {
			item: "prod".into(),
			error: "no such context\nmore detail".into(),
		};
		assert_eq!(failed.summary(), "prod: no such context");
		assert!(failed.is_error());

		let refresh = ActionReport::RefreshFailed {
			error: "timeout".into(),
		};
		assert_eq!(refresh.summary(), "Refresh failed: timeout");
	}
}
