//! Application runtime and event loop.

use ratatui::crossterm::event::Event;
use tracing::{debug, info, warn};

use crate::config::{ConfirmPolicy, PickerConfig};
use crate::error::PickerError;
use crate::input::Input;
use crate::render::Renderer;
use crate::source::{ActionSink, ItemSource};
use crate::state::{ActionReport, PickerState, Transition};
use crate::surface::{CrosstermSurface, Surface};

/// Why the event loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
	/// The user cancelled.
	Cancelled,
	/// An item was applied and the confirm policy closes the picker.
	Confirmed,
}

/// Summary of a finished picker session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerOutcome {
	pub reason: ExitReason,
	/// Filter text when the loop stopped.
	pub query: String,
	/// The last item the action sink accepted during the session.
	pub applied: Option<String>,
	pub last_action: Option<ActionReport>,
}

/// A picker session wired to its collaborators.
pub struct Picker<S, A> {
	source: S,
	sink: A,
	config: PickerConfig,
}

impl<S: ItemSource, A: ActionSink> Picker<S, A> {
	pub fn new(source: S, sink: A) -> Self {
		Self {
			source,
			sink,
			config: PickerConfig::default(),
		}
	}

	#[must_use]
	pub fn with_config(mut self, config: PickerConfig) -> Self {
		self.config = config;
		self
	}

	/// Run on the controlling terminal until the user leaves.
	///
	/// Items are loaded before the terminal switches modes, so a failing item
	/// source never leaves a half-drawn screen behind.
	pub fn run(mut self) -> Result<PickerOutcome, PickerError> {
		let items = self.load_items()?;
		let mut surface = CrosstermSurface::init()?;
		self.event_loop(items, &mut surface)
	}

	/// Run against an already initialised surface.
	pub fn run_on<T: Surface>(mut self, surface: &mut T) -> Result<PickerOutcome, PickerError> {
		let items = self.load_items()?;
		self.event_loop(items, surface)
	}

	fn load_items(&mut self) -> Result<Vec<String>, PickerError> {
		let items = self.source.list_items().map_err(PickerError::item_source)?;
		info!(count = items.len(), "loaded picker items");
		Ok(items)
	}

	fn event_loop<T: Surface>(
		mut self,
		items: Vec<String>,
		surface: &mut T,
	) -> Result<PickerOutcome, PickerError> {
		let mut state = PickerState::new(items).with_filter(&self.config.initial_query);
		state.set_current(self.lookup_current(None));

		let mut renderer = Renderer::new(&self.config);
		renderer.draw_frame(surface);
		renderer.draw(&state, surface);
		surface.flush()?;

		let mut applied = None;
		let reason = loop {
			let event = surface.poll_event()?;
			if let Event::Resize(width, height) = event {
				debug!(width, height, "surface resized");
				renderer.draw_frame(surface);
			}

			match state.apply(Input::from(&event)) {
				Transition::Continue => {}
				Transition::NothingToConfirm => debug!("confirm ignored: nothing matches the filter"),
				Transition::Cancel => break ExitReason::Cancelled,
				Transition::Refresh => self.refresh(&mut state),
				Transition::Confirm(item) => {
					if self.commit(&mut state, &item) {
						applied = Some(item);
						if self.config.confirm_policy == ConfirmPolicy::Exit {
							break ExitReason::Confirmed;
						}
					}
				}
			}

			renderer.draw(&state, surface);
			surface.flush()?;
		};

		Ok(PickerOutcome {
			reason,
			query: state.filter().to_string(),
			applied,
			last_action: state.last_action().cloned(),
		})
	}

	/// Hand `item` to the action sink; returns whether it was applied.
	fn commit(&mut self, state: &mut PickerState, item: &str) -> bool {
		match self.sink.apply_selection(item) {
			Ok(output) => {
				info!(item, "applied selection");
				let current = self.lookup_current(Some(item));
				state.set_current(current);
				state.record_action(ActionReport::Applied {
					item: item.to_string(),
					output,
				});
				true
			}
			Err(err) => {
				warn!(item, error = %err, "failed to apply selection");
				state.record_action(ActionReport::Failed {
					item: item.to_string(),
					error: err.to_string(),
				});
				false
			}
		}
	}

	fn refresh(&mut self, state: &mut PickerState) {
		match self.source.list_items() {
			Ok(items) => {
				info!(count = items.len(), "reloaded picker items");
				state.set_items(items);
				let fallback = state.current().map(str::to_string);
				state.set_current(self.lookup_current(fallback.as_deref()));
			}
			Err(err) => {
				warn!(error = %err, "failed to reload picker items");
				state.record_action(ActionReport::RefreshFailed {
					error: err.to_string(),
				});
			}
		}
	}

	/// Ask the item source for the active item, falling back to `fallback`.
	fn lookup_current(&mut self, fallback: Option<&str>) -> Option<String> {
		match self.source.current() {
			Ok(Some(current)) => Some(current),
			Ok(None) => fallback.map(str::to_string),
			Err(err) => {
				warn!(error = %err, "failed to query the current item");
				fallback.map(str::to_string)
			}
		}
	}
}
