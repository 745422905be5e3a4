//! Construction errors.

use thiserror::Error;

/// Errors surfaced while building a seasonal background.
///
/// Both are fatal to construction and never retried. Once an engine exists,
/// its operations do not fail.
#[derive(Debug, Error)]
pub enum EngineError {
	/// The caller-supplied selector matched no element.
	#[error("target element not found: {0}")]
	TargetNotFound(String),
	/// The host environment cannot provide what the painter needs to draw.
	#[error("rendering unavailable: {0}")]
	RenderingUnavailable(String),
}
