use anyhow::Result;
use kctx_picker::{ActionReport, ExitReason, PickerOutcome};
use serde_json::{Value, json};

/// Print a plain-text representation of the session outcome.
pub(crate) fn print_plain(outcome: &PickerOutcome) {
	match &outcome.applied {
		Some(context) => println!("{context}"),
		None => println!("No context switched (query: '{}')", outcome.query),
	}
}

/// Format the session outcome as a JSON string.
pub(crate) fn format_outcome_json(outcome: &PickerOutcome) -> Result<String> {
	let reason = match outcome.reason {
		ExitReason::Cancelled => "cancelled",
		ExitReason::Confirmed => "confirmed",
	};
	let last_action = match &outcome.last_action {
		Some(report) => {
			let status = match report {
				ActionReport::Applied { .. } => "applied",
				ActionReport::Failed { .. } => "failed",
				ActionReport::RefreshFailed { .. } => "refresh_failed",
			};
			json!({
				"status": status,
				"message": report.summary(),
			})
		}
		None => Value::Null,
	};

	let payload = json!({
		"reason": reason,
		"query": outcome.query,
		"applied": outcome.applied,
		"last_action": last_action,
	});

	Ok(serde_json::to_string_pretty(&payload)?)
}

/// Print the JSON representation of the session outcome.
pub(crate) fn print_json(outcome: &PickerOutcome) -> Result<()> {
	println!("{}", format_outcome_json(outcome)?);
	Ok(())
}
