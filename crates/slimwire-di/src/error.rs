//! Container error types.

use thiserror::Error;

/// Result type for container operations.
pub type DiResult<T> = Result<T, DiError>;

/// Errors raised by the service container and its parameter bag.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DiError {
	/// No definition or instance is registered under the id.
	#[error("service not found: {0}")]
	ServiceNotFound(String),

	/// A `%name%` reference points at a parameter that does not exist.
	#[error("parameter not found: {0}")]
	ParameterNotFound(String),

	/// Resolving a parameter led back to itself.
	#[error("circular parameter reference: {}", .0.join(" -> "))]
	ParameterCircularReference(Vec<String>),

	/// Only scalar parameters can be embedded inside a longer string.
	#[error("parameter '{name}' of type {kind} cannot be interpolated into \"{within}\"")]
	NonScalarInterpolation {
		/// Referenced parameter.
		name: String,
		/// JSON kind of its value.
		kind: &'static str,
		/// The string that embedded the reference.
		within: String,
	},

	/// The service exists but is not of the requested type.
	#[error("service '{id}' is not of type {expected}")]
	ServiceTypeMismatch {
		/// Service id.
		id: String,
		/// Requested Rust type.
		expected: &'static str,
	},

	/// A constructor rejected its arguments.
	#[error("invalid argument: {0}")]
	InvalidArgument(String),

	/// Constructing a service from its definition failed.
	#[error("failed to construct service '{id}': {source}")]
	Construction {
		/// Service id.
		id: String,
		/// Underlying failure.
		#[source]
		source: Box<DiError>,
	},
}
