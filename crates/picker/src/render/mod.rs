//! Maps [`PickerState`] onto cell writes against a [`Surface`].
//!
//! Each region is cleared before it is written, and the result list is
//! cleared down to the rows the previous frame used, so drawing the same
//! state twice always yields the same cells.

mod layout;

pub use layout::Layout;
use ratatui::layout::Rect;
use ratatui::style::Color;
use unicode_width::UnicodeWidthChar;

use crate::config::{Labels, PickerConfig};
use crate::state::PickerState;
use crate::style::Theme;
use crate::surface::Surface;

/// What the previous frame left in the result list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Extent {
	rows: u16,
	offset: usize,
}

/// Draws picker state onto a surface.
#[derive(Debug, Clone)]
pub struct Renderer {
	layout: Layout,
	theme: Theme,
	labels: Labels,
	debug_overlay: bool,
	extent: Extent,
}

impl Renderer {
	#[must_use]
	pub fn new(config: &PickerConfig) -> Self {
		Self {
			layout: config.layout,
			theme: config.theme,
			labels: config.labels.clone(),
			debug_overlay: config.debug_overlay,
			extent: Extent::default(),
		}
	}

	/// Index of the first filtered item shown in the result list.
	#[must_use]
	pub fn scroll_offset(&self) -> usize {
		self.extent.offset
	}

	/// Draw the static input box.
	///
	/// Called once at startup and again whenever the surface was resized;
	/// the next [`Renderer::draw`] then clears the whole result list.
	pub fn draw_frame<S: Surface>(&mut self, surface: &mut S) {
		let regions = self.layout.regions(surface.area());
		let frame = regions.frame;
		let (fg, bg) = (self.theme.border, self.theme.background);
		let right = frame.right().saturating_sub(1);
		let bottom = frame.bottom().saturating_sub(1);

		for x in frame.left() + 1..right {
			surface.set_cell(x, frame.top(), '─', fg, bg);
			surface.set_cell(x, bottom, '─', fg, bg);
		}
		for y in frame.top() + 1..bottom {
			surface.set_cell(frame.left(), y, '│', fg, bg);
			surface.set_cell(right, y, '│', fg, bg);
		}
		surface.set_cell(frame.left(), frame.top(), '┌', fg, bg);
		surface.set_cell(right, frame.top(), '┐', fg, bg);
		surface.set_cell(frame.left(), bottom, '└', fg, bg);
		surface.set_cell(right, bottom, '┘', fg, bg);

		self.extent.rows = regions.list.height;
	}

	/// Redraw every state-dependent region.
	pub fn draw<S: Surface>(&mut self, state: &PickerState, surface: &mut S) {
		let regions = self.layout.regions(surface.area());

		self.draw_input(state, regions.input, surface);
		if let Some(label) = regions.label {
			self.draw_label(state, label, surface);
		}
		self.draw_status(state, regions.status, surface);
		self.draw_list(state, regions.list, surface);
		if self.debug_overlay
			&& let Some(debug) = regions.debug
		{
			self.draw_debug(state, debug, surface);
		}
	}

	fn draw_input<S: Surface>(&self, state: &PickerState, area: Rect, surface: &mut S) {
		let (fg, bg) = (self.theme.foreground, self.theme.background);
		clear(surface, area, fg, bg);
		let text = visible_tail(state.filter(), area.width as usize);
		put_str(surface, area, text, fg, bg);
	}

	fn draw_label<S: Surface>(&self, state: &PickerState, area: Rect, surface: &mut S) {
		clear(surface, area, self.theme.foreground, self.theme.background);
		if let Some(current) = state.current() {
			let text = format!("{}{current}", self.labels.current_prefix);
			put_str(surface, area, &text, self.theme.label, self.theme.background);
		}
	}

	fn draw_status<S: Surface>(&self, state: &PickerState, area: Rect, surface: &mut S) {
		clear(surface, area, self.theme.foreground, self.theme.background);
		if let Some(report) = state.last_action() {
			let fg = if report.is_error() {
				self.theme.error
			} else {
				self.theme.success
			};
			put_str(surface, area, &report.summary(), fg, self.theme.background);
		}
	}

	fn draw_list<S: Surface>(&mut self, state: &PickerState, area: Rect, surface: &mut S) {
		let visible = area.height as usize;
		let len = state.filtered_len();
		let offset = scroll_offset(self.extent.offset, state.selected_index(), len, visible);
		let rows = if len == 0 {
			visible.min(1)
		} else {
			(len - offset).min(visible)
		};

		let stale = self.extent.rows.max(rows as u16).min(area.height);
		let (fg, bg) = (self.theme.foreground, self.theme.background);
		clear(surface, Rect { height: stale, ..area }, fg, bg);

		if len == 0 {
			if rows > 0 {
				put_str(surface, row_of(area, 0), &self.labels.empty, self.theme.muted, bg);
			}
		} else {
			for (row, item) in state.filtered_items().skip(offset).take(visible).enumerate() {
				let highlighted = state.selected_index() == Some(offset + row);
				let bg = if highlighted { self.theme.highlight } else { bg };
				put_str(surface, row_of(area, row as u16), item, fg, bg);
			}
		}

		self.extent = Extent {
			rows: rows as u16,
			offset,
		};
	}

	fn draw_debug<S: Surface>(&self, state: &PickerState, area: Rect, surface: &mut S) {
		clear(surface, area, self.theme.foreground, self.theme.background);
		let selected = state
			.selected_index()
			.map_or_else(|| "-".to_string(), |index| index.to_string());
		let text = format!(
			"filter={:?} selected={selected} matches={}/{} offset={}",
			state.filter(),
			state.filtered_len(),
			state.items().len(),
			self.extent.offset,
		);
		put_str(surface, area, &text, self.theme.muted, self.theme.background);
	}
}

/// Keep `selected` inside a window of `visible` rows, moving as little as possible.
fn scroll_offset(previous: usize, selected: Option<usize>, len: usize, visible: usize) -> usize {
	if visible == 0 || len <= visible {
		return 0;
	}

	let mut offset = previous.min(len - visible);
	if let Some(selected) = selected {
		if selected < offset {
			offset = selected;
		} else if selected >= offset + visible {
			offset = selected + 1 - visible;
		}
	}
	offset
}

fn row_of(area: Rect, row: u16) -> Rect {
	Rect {
		y: area.y + row,
		height: 1,
		..area
	}
}

fn clear<S: Surface>(surface: &mut S, area: Rect, fg: Color, bg: Color) {
	for y in area.top()..area.bottom() {
		for x in area.left()..area.right() {
			surface.set_cell(x, y, ' ', fg, bg);
		}
	}
}

/// Write `text` left-aligned on the first row of `area`, stopping at its edge.
fn put_str<S: Surface>(surface: &mut S, area: Rect, text: &str, fg: Color, bg: Color) {
	let mut x = area.left();
	for ch in text.chars() {
		let width = ch.width().unwrap_or(0) as u16;
		if width == 0 {
			continue;
		}
		if x + width > area.right() {
			break;
		}
		surface.set_cell(x, area.top(), ch, fg, bg);
		x += width;
	}
}

/// The longest suffix of `text` that fits in `width` columns.
fn visible_tail(text: &str, width: usize) -> &str {
	let mut used = 0;
	let mut start = text.len();
	for (index, ch) in text.char_indices().rev() {
		let ch_width = ch.width().unwrap_or(0);
		if used + ch_width > width {
			break;
		}
		used += ch_width;
		start = index;
	}
	&text[start..]
}
