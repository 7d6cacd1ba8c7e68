use std::error::Error;
use std::io;

use thiserror::Error;

/// Fatal errors that stop a picker session.
#[derive(Debug, Error)]
pub enum PickerError {
	/// Drawing to or reading from the terminal failed.
	#[error("terminal I/O failed: {0}")]
	Terminal(#[from] io::Error),

	/// The item source could not produce the initial candidate list.
	#[error("failed to load items: {0}")]
	Source(#[source] Box<dyn Error + Send + Sync>),
}

impl PickerError {
	pub(crate) fn item_source<E>(err: E) -> Self
	where
		E: Error + Send + Sync + 'static,
	{
		Self::Source(Box::new(err))
	}
}
