//! Settings collection
//!
//! A [`Collection`] is the key/value bundle exposed by the container as the
//! `settings` service. When registered as a deferred definition its single
//! constructor argument is a JSON object, usually a map of `%name%` parameter
//! references, so the collection holds whatever the parameters contain at the
//! time it is built.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use slimwire_di::{Constructible, DiError, DiResult};

/// Service id under which the settings collection is registered.
pub const SETTINGS_SERVICE: &str = "settings";

/// Ordered key/value settings bundle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Collection {
	items: IndexMap<String, Value>,
}

impl Collection {
	/// Creates a collection from existing items.
	///
	/// # Examples
	///
	/// ```
	/// use slimwire_conf::Collection;
	/// use indexmap::IndexMap;
	/// use serde_json::json;
	///
	/// let mut items = IndexMap::new();
	/// items.insert("httpVersion".to_string(), json!("2"));
	///
	/// let settings = Collection::new(items);
	/// assert_eq!(settings.get("httpVersion"), Some(&json!("2")));
	/// ```
	pub fn new(items: IndexMap<String, Value>) -> Self {
		Self { items }
	}

	/// All entries in insertion order.
	pub fn all(&self) -> &IndexMap<String, Value> {
		&self.items
	}

	pub fn get(&self, key: &str) -> Option<&Value> {
		self.items.get(key)
	}

	/// Returns the value for `key`, or `default` when it is missing.
	pub fn get_or<'a>(&'a self, key: &str, default: &'a Value) -> &'a Value {
		self.items.get(key).unwrap_or(default)
	}

	pub fn has(&self, key: &str) -> bool {
		self.items.contains_key(key)
	}

	pub fn set(&mut self, key: impl Into<String>, value: Value) {
		self.items.insert(key.into(), value);
	}

	pub fn remove(&mut self, key: &str) -> Option<Value> {
		self.items.shift_remove(key)
	}

	/// Merges `items` over the current entries.
	pub fn replace(&mut self, items: IndexMap<String, Value>) {
		self.items.extend(items);
	}

	pub fn clear(&mut self) {
		self.items.clear();
	}

	pub fn keys(&self) -> impl Iterator<Item = &String> {
		self.items.keys()
	}

	pub fn len(&self) -> usize {
		self.items.len()
	}

	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	pub fn into_inner(self) -> IndexMap<String, Value> {
		self.items
	}
}

impl Constructible for Collection {
	fn construct(arguments: Vec<Value>) -> DiResult<Self> {
		match arguments.into_iter().next() {
			None | Some(Value::Null) => Ok(Self::default()),
			Some(Value::Object(map)) => Ok(map.into_iter().collect()),
			Some(other) => Err(DiError::InvalidArgument(format!(
				"settings collection expects an object, got {}",
				other
			))),
		}
	}
}

impl FromIterator<(String, Value)> for Collection {
	fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
		Self {
			items: iter.into_iter().collect(),
		}
	}
}

impl IntoIterator for Collection {
	type Item = (String, Value);
	type IntoIter = indexmap::map::IntoIter<String, Value>;

	fn into_iter(self) -> Self::IntoIter {
		self.items.into_iter()
	}
}

impl<'a> IntoIterator for &'a Collection {
	type Item = (&'a String, &'a Value);
	type IntoIter = indexmap::map::Iter<'a, String, Value>;

	fn into_iter(self) -> Self::IntoIter {
		self.items.iter()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	fn test_construct_from_object_keeps_order() {
		let collection =
			Collection::construct(vec![json!({"b": 1, "a": 2, "c": 3})]).unwrap();

		let keys: Vec<_> = collection.keys().cloned().collect();
		assert_eq!(keys, vec!["b", "a", "c"]);
	}

	#[rstest]
	#[case(vec![])]
	#[case(vec![Value::Null])]
	fn test_construct_without_items(#[case] arguments: Vec<Value>) {
		let collection = Collection::construct(arguments).unwrap();
		assert!(collection.is_empty());
	}

	#[rstest]
	#[case(json!("oops"))]
	#[case(json!([1, 2]))]
	fn test_construct_rejects_non_objects(#[case] argument: Value) {
		let result = Collection::construct(vec![argument]);
		assert!(matches!(result, Err(DiError::InvalidArgument(_))));
	}

	#[rstest]
	fn test_replace_merges_over_existing() {
		// Arrange
		let mut collection: Collection = [
			("httpVersion".to_string(), json!("1.1")),
			("responseChunkSize".to_string(), json!(4096)),
		]
		.into_iter()
		.collect();
		let mut update = IndexMap::new();
		update.insert("httpVersion".to_string(), json!("2"));
		update.insert("debug".to_string(), json!(true));

		// Act
		collection.replace(update);

		// Assert
		assert_eq!(collection.len(), 3);
		assert_eq!(collection.get("httpVersion"), Some(&json!("2")));
		assert_eq!(collection.get_or("missing", &json!(0)), &json!(0));
		assert_eq!(collection.remove("debug"), Some(json!(true)));
		assert!(!collection.has("debug"));
	}

	#[rstest]
	fn test_serializes_as_plain_object() {
		let collection: Collection = [("a".to_string(), json!(1))].into_iter().collect();
		assert_eq!(serde_json::to_value(&collection).unwrap(), json!({"a": 1}));
	}
}
