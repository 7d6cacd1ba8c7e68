//! Substring filtering over the candidate list.

/// Return the indices of `items` containing `query`, in their original order.
///
/// Matching is plain case-sensitive containment. An empty query matches
/// every item.
pub fn matching_indices<S: AsRef<str>>(items: &[S], query: &str) -> Vec<usize> {
	items
		.iter()
		.enumerate()
		.filter(|(_, item)| item.as_ref().contains(query))
		.map(|(index, _)| index)
		.collect()
}
