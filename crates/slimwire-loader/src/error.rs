//! Injection error types.

use slimwire_conf::SourceError;
use slimwire_di::DiError;
use thiserror::Error;

/// Result type for injection operations.
pub type InjectResult<T> = Result<T, InjectError>;

/// Errors raised while resolving a container and applying injection units.
///
/// Container and configuration errors pass through unchanged.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum InjectError {
	/// The value handed to the resolver is neither a container of the
	/// expected type nor a reference to that type.
	#[error("container argument must be an instance of {expected} or a reference to that type")]
	InvalidContainerArgument {
		/// Expected container type.
		expected: &'static str,
	},

	/// A loader was asked to load something that cannot inject services.
	#[error("unsupported resource: {0}")]
	UnsupportedResource(String),

	#[error(transparent)]
	Container(#[from] DiError),

	#[error(transparent)]
	Source(#[from] SourceError),
}
