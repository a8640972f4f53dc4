//! Built-in framework settings and the merge rule applied on top of them.

use indexmap::IndexMap;
use serde_json::Value;

/// A compile-time default value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DefaultValue {
	Str(&'static str),
	Int(i64),
	Bool(bool),
}

impl DefaultValue {
	pub fn to_value(self) -> Value {
		match self {
			DefaultValue::Str(s) => Value::String(s.to_string()),
			DefaultValue::Int(n) => Value::from(n),
			DefaultValue::Bool(b) => Value::Bool(b),
		}
	}
}

/// The framework's default settings, in publication order.
///
/// `routerCacheFile` is `false` when route caching is disabled and a path
/// otherwise.
pub static DEFAULT_SETTINGS: &[(&str, DefaultValue)] = &[
	("httpVersion", DefaultValue::Str("1.1")),
	("responseChunkSize", DefaultValue::Int(4096)),
	("outputBuffering", DefaultValue::Str("append")),
	("determineRouteBeforeAppMiddleware", DefaultValue::Bool(false)),
	("displayErrorDetails", DefaultValue::Bool(false)),
	("addContentLengthHeader", DefaultValue::Bool(true)),
	("routerCacheFile", DefaultValue::Bool(false)),
];

/// Materializes a defaults table.
pub fn to_settings(defaults: &[(&str, DefaultValue)]) -> IndexMap<String, Value> {
	defaults
		.iter()
		.map(|(key, value)| (key.to_string(), value.to_value()))
		.collect()
}

/// [`DEFAULT_SETTINGS`] as a map.
pub fn default_settings() -> IndexMap<String, Value> {
	to_settings(DEFAULT_SETTINGS)
}

/// Merges `existing` settings over `defaults`.
///
/// Values from `existing` win key by key. Keys keep the defaults' order;
/// keys only present in `existing` follow in their own order.
///
/// ```
/// use slimwire_conf::defaults::{DEFAULT_SETTINGS, merge_settings};
/// use indexmap::IndexMap;
/// use serde_json::json;
///
/// let mut existing = IndexMap::new();
/// existing.insert("custom".to_string(), json!(1));
/// existing.insert("httpVersion".to_string(), json!("2"));
///
/// let merged = merge_settings(DEFAULT_SETTINGS, &existing);
/// assert_eq!(merged.get_index(0), Some((&"httpVersion".to_string(), &json!("2"))));
/// assert_eq!(merged.last(), Some((&"custom".to_string(), &json!(1))));
/// assert_eq!(merged.len(), DEFAULT_SETTINGS.len() + 1);
/// ```
pub fn merge_settings(
	defaults: &[(&str, DefaultValue)],
	existing: &IndexMap<String, Value>,
) -> IndexMap<String, Value> {
	let mut merged = to_settings(defaults);
	for (key, value) in existing {
		merged.insert(key.clone(), value.clone());
	}
	merged
}
