//! Collaborator interfaces for supplying candidates and applying a choice.
//!
//! Both calls are synchronous and block the event loop for their duration.

use std::convert::Infallible;
use std::error::Error;

/// Supplies the full candidate list.
pub trait ItemSource {
	/// Error reported when the list cannot be produced.
	type Error: Error + Send + Sync + 'static;

	/// Return every candidate in display order.
	fn list_items(&mut self) -> Result<Vec<String>, Self::Error>;

	/// Return the item the external system currently treats as active.
	fn current(&mut self) -> Result<Option<String>, Self::Error> {
		Ok(None)
	}
}

/// Performs the external effect of a confirmed choice.
pub trait ActionSink {
	/// Error reported when the choice cannot be applied.
	type Error: Error + Send + Sync + 'static;

	/// Apply `chosen` and return any output text the effect produced.
	fn apply_selection(&mut self, chosen: &str) -> Result<String, Self::Error>;
}

/// A fixed list of candidates.
impl ItemSource for Vec<String> {
	type Error = Infallible;

	fn list_items(&mut self) -> Result<Vec<String>, Self::Error> {
		Ok(self.clone())
	}
}

impl<F, E> ActionSink for F
where
	F: FnMut(&str) -> Result<String, E>,
	E: Error + Send + Sync + 'static,
{
	type Error = E;

	fn apply_selection(&mut self, chosen: &str) -> Result<String, Self::Error> {
		self(chosen)
	}
}
