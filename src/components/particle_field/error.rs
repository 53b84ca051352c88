//! Errors raised while attaching a particle field.
//!
//! None of these reach the user: the background component logs them and
//! leaves the page with a static backdrop.

use thiserror::Error;

use super::controller::HostEvent;

/// Reasons a field could not be attached.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FieldError {
	/// The drawable surface is not mounted yet. Retry once it is.
	#[error("drawable surface is not available yet")]
	SurfaceUnavailable,

	/// The canvas refused to hand out a 2D context.
	#[error("canvas has no 2d rendering context")]
	ContextUnavailable,

	/// The host rejected an event subscription.
	#[error("host refused subscription to {0:?}")]
	Subscribe(HostEvent),

	/// The host could not schedule the first animation frame.
	#[error("host could not schedule an animation frame")]
	Schedule,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn subscribe_error_names_the_event() {
		let msg = FieldError::Subscribe(HostEvent::TouchStart).to_string();
		assert!(msg.contains("TouchStart"), "got: {msg}");
	}

	#[test]
	fn surface_unavailable_reads_as_retryable() {
		let msg = FieldError::SurfaceUnavailable.to_string();
		assert!(msg.contains("not available yet"), "got: {msg}");
	}
}
