//! Character-cell drawing surface the picker renders onto.
//!
//! The renderer only ever talks to [`Surface`]. [`TerminalSurface`] implements
//! it on top of a ratatui [`Terminal`]: cell writes land in a persistent back
//! buffer that survives between flushes, and each flush copies that buffer
//! into a frame so ratatui only emits the cells that actually changed.

use std::collections::VecDeque;
use std::io::{self, Stdout};

use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::buffer::Buffer;
use ratatui::crossterm::event::{self, Event};
use ratatui::layout::Rect;
use ratatui::style::Color;

/// Minimal drawing and input primitives.
pub trait Surface {
	/// Drawable area; writes outside it are dropped.
	fn area(&self) -> Rect;

	/// Place `glyph` at `(x, y)` with the given colours.
	fn set_cell(&mut self, x: u16, y: u16, glyph: char, fg: Color, bg: Color);

	/// Push every pending cell write to the screen.
	fn flush(&mut self) -> io::Result<()>;

	/// Block until the next input event arrives.
	fn poll_event(&mut self) -> io::Result<Event>;
}

/// Blocking producer of terminal events.
pub trait EventSource {
	fn next_event(&mut self) -> io::Result<Event>;
}

/// Reads events from the controlling terminal through crossterm.
#[derive(Debug, Default, Clone, Copy)]
pub struct CrosstermEvents;

impl EventSource for CrosstermEvents {
	fn next_event(&mut self) -> io::Result<Event> {
		event::read()
	}
}

/// A scripted event sequence; fails once the script runs out.
impl EventSource for VecDeque<Event> {
	fn next_event(&mut self) -> io::Result<Event> {
		self.pop_front().ok_or_else(|| {
			io::Error::new(io::ErrorKind::UnexpectedEof, "no more input events")
		})
	}
}

/// [`Surface`] backed by a ratatui terminal and an event source.
pub struct TerminalSurface<B: Backend, E> {
	terminal: Terminal<B>,
	back: Buffer,
	events: E,
	restore_on_drop: bool,
}

/// The surface used by the interactive binary.
pub type CrosstermSurface = TerminalSurface<CrosstermBackend<Stdout>, CrosstermEvents>;

impl CrosstermSurface {
	/// Switch the terminal into raw mode on the alternate screen.
	///
	/// The terminal is restored when the surface is dropped, and ratatui's
	/// panic hook restores it if the process panics first.
	pub fn init() -> io::Result<Self> {
		let terminal = ratatui::try_init()?;
		match Self::new(terminal, CrosstermEvents) {
			Ok(mut surface) => {
				surface.restore_on_drop = true;
				surface.terminal.clear()?;
				Ok(surface)
			}
			Err(err) => {
				ratatui::restore();
				Err(err)
			}
		}
	}
}

impl<B: Backend, E: EventSource> TerminalSurface<B, E> {
	/// Wrap an already initialised terminal.
	pub fn new(terminal: Terminal<B>, events: E) -> io::Result<Self> {
		let size = terminal.size()?;
		Ok(Self {
			terminal,
			back: Buffer::empty(Rect::new(0, 0, size.width, size.height)),
			events,
			restore_on_drop: false,
		})
	}

	/// The wrapped terminal.
	pub fn terminal(&self) -> &Terminal<B> {
		&self.terminal
	}

	/// Cells written so far, flushed or not.
	pub fn back_buffer(&self) -> &Buffer {
		&self.back
	}

	fn resize(&mut self, width: u16, height: u16) {
		self.back = Buffer::empty(Rect::new(0, 0, width, height));
	}
}

impl<B: Backend, E: EventSource> Surface for TerminalSurface<B, E> {
	fn area(&self) -> Rect {
		self.back.area
	}

	fn set_cell(&mut self, x: u16, y: u16, glyph: char, fg: Color, bg: Color) {
		if let Some(cell) = self.back.cell_mut((x, y)) {
			cell.set_char(glyph).set_fg(fg).set_bg(bg);
		}
	}

	fn flush(&mut self) -> io::Result<()> {
		let back = &self.back;
		self.terminal.draw(|frame| {
			let area = frame.area().intersection(back.area);
			let buffer = frame.buffer_mut();
			for y in area.top()..area.bottom() {
				for x in area.left()..area.right() {
					if let (Some(source), Some(target)) = (back.cell((x, y)), buffer.cell_mut((x, y))) {
						*target = source.clone();
					}
				}
			}
		})?;
		Ok(())
	}

	fn poll_event(&mut self) -> io::Result<Event> {
		let event = self.events.next_event()?;
		if let Event::Resize(width, height) = event {
			self.resize(width, height);
		}
		Ok(event)
	}
}

impl<B: Backend, E> Drop for TerminalSurface<B, E> {
	fn drop(&mut self) {
		if self.restore_on_drop {
			ratatui::restore();
		}
	}
}
