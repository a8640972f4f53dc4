//! Layered settings builder

use crate::collection::Collection;
use crate::sources::{ConfigSource, SourceError};
use indexmap::IndexMap;
use std::fmt;

/// Builds a settings [`Collection`] from several [`ConfigSource`]s.
///
/// Sources are applied from lowest to highest priority; among sources with
/// the same priority the one added last wins.
///
/// ```
/// use slimwire_conf::SettingsBuilder;
/// use slimwire_conf::sources::DefaultSource;
/// use serde_json::json;
///
/// let settings = SettingsBuilder::new()
/// 	.add_source(DefaultSource::new().with_value("displayErrorDetails", json!(true)))
/// 	.build()
/// 	.unwrap();
///
/// assert_eq!(settings.get("displayErrorDetails"), Some(&json!(true)));
/// ```
#[derive(Default)]
pub struct SettingsBuilder {
	sources: Vec<Box<dyn ConfigSource>>,
}

impl SettingsBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn add_source<S: ConfigSource + 'static>(mut self, source: S) -> Self {
		self.sources.push(Box::new(source));
		self
	}

	/// Number of registered sources.
	pub fn len(&self) -> usize {
		self.sources.len()
	}

	pub fn is_empty(&self) -> bool {
		self.sources.is_empty()
	}

	/// Loads and merges every source.
	pub fn build(&self) -> Result<Collection, SourceError> {
		let mut ordered: Vec<&dyn ConfigSource> = self.sources.iter().map(|s| &**s).collect();
		// Stable sort keeps insertion order for equal priorities.
		ordered.sort_by_key(|source| source.priority());

		let mut merged = IndexMap::new();
		for source in ordered {
			let values = source.load()?;
			tracing::debug!(
				source = %source.description(),
				priority = source.priority(),
				keys = values.len(),
				"loaded settings source"
			);
			merged.extend(values);
		}

		Ok(Collection::new(merged))
	}
}

impl fmt::Debug for SettingsBuilder {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("SettingsBuilder")
			.field(
				"sources",
				&self
					.sources
					.iter()
					.map(|source| source.description())
					.collect::<Vec<_>>(),
			)
			.finish()
	}
}
