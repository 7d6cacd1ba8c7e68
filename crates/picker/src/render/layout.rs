use ratatui::layout::Rect;

/// Fixed placement of the picker regions, anchored at the input box.
///
/// The input text starts at `(origin_x, origin_y + 1)`; the box border sits
/// one cell outside it. The current-selection label is two rows above the
/// box, the debug overlay two rows above that, the status line directly below
/// the box and the result list two rows further down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
	pub origin_x: u16,
	pub origin_y: u16,
	/// Columns available for the filter text inside the box.
	pub input_width: u16,
}

impl Default for Layout {
	fn default() -> Self {
		Self {
			origin_x: 5,
			origin_y: 5,
			input_width: 40,
		}
	}
}

/// Screen rectangles for one frame, clipped to the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Regions {
	pub debug: Option<Rect>,
	pub label: Option<Rect>,
	/// The input box including its border.
	pub frame: Rect,
	pub input: Rect,
	pub status: Rect,
	pub list: Rect,
}

impl Layout {
	pub(crate) fn regions(&self, area: Rect) -> Regions {
		let row = |y: u16| {
			let width = area.right().saturating_sub(self.origin_x);
			Rect::new(self.origin_x, y, width, 1).intersection(area)
		};

		let frame = Rect::new(
			self.origin_x.saturating_sub(1),
			self.origin_y,
			self.input_width.saturating_add(2),
			3,
		);
		let input = Rect::new(
			self.origin_x,
			self.origin_y.saturating_add(1),
			self.input_width,
			1,
		);

		let list_top = self.origin_y.saturating_add(5);
		let list = Rect::new(
			self.origin_x,
			list_top,
			area.right().saturating_sub(self.origin_x),
			area.bottom().saturating_sub(list_top),
		);

		Regions {
			debug: self.origin_y.checked_sub(4).map(row),
			label: self.origin_y.checked_sub(2).map(row),
			frame,
			input: input.intersection(area),
			status: row(self.origin_y.saturating_add(3)),
			list: list.intersection(area),
		}
	}
}
