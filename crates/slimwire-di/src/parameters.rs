//! Parameter bag and `%name%` reference resolution.
//!
//! Parameters are named JSON values. Any string handed to the container can
//! point at one with a `%name%` token:
//!
//! - a string that is exactly `%name%` resolves to the raw parameter value,
//!   whatever its JSON type;
//! - a token embedded in a longer string is interpolated, which is only
//!   allowed for scalar values;
//! - `%%` stands for a literal `%`.
//!
//! ```
//! use slimwire_di::ParameterBag;
//! use serde_json::json;
//!
//! let mut bag = ParameterBag::new();
//! bag.set("app.port", json!(8080));
//!
//! assert_eq!(bag.resolve_value(&json!("%app.port%")).unwrap(), json!(8080));
//! assert_eq!(
//! 	bag.resolve_value(&json!("listening on %app.port% (100%%)")).unwrap(),
//! 	json!("listening on 8080 (100%)")
//! );
//! ```

use crate::{DiError, DiResult};
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::{Map, Value};

/// Whole-string reference, e.g. `%slim.settings.httpVersion%`.
static WHOLE_REFERENCE: Lazy<Regex> =
	Lazy::new(|| Regex::new(r"^%([^%\s]+)%$").expect("valid reference pattern"));

/// Escaped percent or embedded reference.
static EMBEDDED_REFERENCE: Lazy<Regex> =
	Lazy::new(|| Regex::new(r"%%|%([^%\s]+)%").expect("valid reference pattern"));

/// Ordered store of named parameters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterBag {
	parameters: IndexMap<String, Value>,
}

impl ParameterBag {
	/// Creates an empty bag.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns true if a parameter is stored under `name`.
	pub fn has(&self, name: &str) -> bool {
		self.parameters.contains_key(name)
	}

	/// Returns the raw, unresolved value of a parameter.
	pub fn get(&self, name: &str) -> DiResult<&Value> {
		self.parameters
			.get(name)
			.ok_or_else(|| DiError::ParameterNotFound(name.to_string()))
	}

	/// Stores a parameter, replacing any previous value.
	pub fn set(&mut self, name: impl Into<String>, value: Value) {
		self.parameters.insert(name.into(), value);
	}

	/// Stores a parameter only if `name` is not set yet.
	///
	/// Returns `true` when the value was stored.
	///
	/// ```
	/// use slimwire_di::ParameterBag;
	/// use serde_json::json;
	///
	/// let mut bag = ParameterBag::new();
	/// assert!(bag.set_if_absent("debug", json!(true)));
	/// assert!(!bag.set_if_absent("debug", json!(false)));
	/// assert_eq!(bag.get("debug").unwrap(), &json!(true));
	/// ```
	pub fn set_if_absent(&mut self, name: impl Into<String>, value: Value) -> bool {
		match self.parameters.entry(name.into()) {
			indexmap::map::Entry::Occupied(_) => false,
			indexmap::map::Entry::Vacant(entry) => {
				entry.insert(value);
				true
			}
		}
	}

	/// Removes a parameter and returns its value.
	pub fn remove(&mut self, name: &str) -> Option<Value> {
		self.parameters.shift_remove(name)
	}

	/// All parameters in insertion order.
	pub fn all(&self) -> &IndexMap<String, Value> {
		&self.parameters
	}

	pub fn len(&self) -> usize {
		self.parameters.len()
	}

	pub fn is_empty(&self) -> bool {
		self.parameters.is_empty()
	}

	/// Resolves every `%name%` reference inside `value`.
	///
	/// Arrays and objects are walked recursively, object keys included.
	pub fn resolve_value(&self, value: &Value) -> DiResult<Value> {
		self.resolve_with_stack(value, &mut Vec::new())
	}

	/// Resolves a single string.
	pub fn resolve_string(&self, value: &str) -> DiResult<Value> {
		self.resolve_str_with_stack(value, &mut Vec::new())
	}

	/// Doubles every `%` so the value survives resolution untouched.
	pub fn escape_value(value: &Value) -> Value {
		match value {
			Value::String(s) => Value::String(s.replace('%', "%%")),
			Value::Array(items) => Value::Array(items.iter().map(Self::escape_value).collect()),
			Value::Object(map) => Value::Object(
				map.iter()
					.map(|(k, v)| (k.replace('%', "%%"), Self::escape_value(v)))
					.collect(),
			),
			other => other.clone(),
		}
	}

	fn resolve_with_stack(&self, value: &Value, stack: &mut Vec<String>) -> DiResult<Value> {
		match value {
			Value::String(s) => self.resolve_str_with_stack(s, stack),
			Value::Array(items) => items
				.iter()
				.map(|item| self.resolve_with_stack(item, stack))
				.collect::<DiResult<Vec<_>>>()
				.map(Value::Array),
			Value::Object(map) => {
				let mut resolved = Map::with_capacity(map.len());
				for (key, item) in map {
					let key = match self.resolve_str_with_stack(key, stack)? {
						Value::String(s) => s,
						other => other.to_string(),
					};
					resolved.insert(key, self.resolve_with_stack(item, stack)?);
				}
				Ok(Value::Object(resolved))
			}
			other => Ok(other.clone()),
		}
	}

	fn resolve_str_with_stack(&self, value: &str, stack: &mut Vec<String>) -> DiResult<Value> {
		if let Some(caps) = WHOLE_REFERENCE.captures(value) {
			return self.resolve_parameter(&caps[1], stack);
		}

		let mut failure = None;
		let interpolated = EMBEDDED_REFERENCE.replace_all(value, |caps: &Captures<'_>| {
			let Some(name) = caps.get(1) else {
				return "%".to_string();
			};
			if failure.is_some() {
				return String::new();
			}
			match self.resolve_parameter(name.as_str(), stack) {
				Ok(Value::String(s)) => s,
				Ok(Value::Null) => String::new(),
				Ok(scalar @ (Value::Bool(_) | Value::Number(_))) => scalar.to_string(),
				Ok(other) => {
					failure = Some(DiError::NonScalarInterpolation {
						name: name.as_str().to_string(),
						kind: kind_of(&other),
						within: value.to_string(),
					});
					String::new()
				}
				Err(e) => {
					failure = Some(e);
					String::new()
				}
			}
		});

		match failure {
			Some(e) => Err(e),
			None => Ok(Value::String(interpolated.into_owned())),
		}
	}

	fn resolve_parameter(&self, name: &str, stack: &mut Vec<String>) -> DiResult<Value> {
		if stack.iter().any(|seen| seen == name) {
			let mut cycle = stack.clone();
			cycle.push(name.to_string());
			return Err(DiError::ParameterCircularReference(cycle));
		}

		let raw = self.get(name)?;
		stack.push(name.to_string());
		let resolved = self.resolve_with_stack(raw, stack);
		stack.pop();
		resolved
	}
}

impl FromIterator<(String, Value)> for ParameterBag {
	fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
		Self {
			parameters: iter.into_iter().collect(),
		}
	}
}

fn kind_of(value: &Value) -> &'static str {
	match value {
		Value::Null => "null",
		Value::Bool(_) => "bool",
		Value::Number(_) => "number",
		Value::String(_) => "string",
		Value::Array(_) => "array",
		Value::Object(_) => "object",
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	fn bag() -> ParameterBag {
		[
			("http.version".to_string(), json!("1.1")),
			("http.chunk".to_string(), json!(4096)),
			("router.cache".to_string(), json!(false)),
			("hosts".to_string(), json!(["a", "b"])),
			("alias".to_string(), json!("%http.version%")),
		]
		.into_iter()
		.collect()
	}

	#[rstest]
	#[case(json!("%http.chunk%"), json!(4096))]
	#[case(json!("%router.cache%"), json!(false))]
	#[case(json!("%hosts%"), json!(["a", "b"]))]
	#[case(json!("HTTP/%http.version%"), json!("HTTP/1.1"))]
	#[case(json!("%alias%"), json!("1.1"))]
	#[case(json!("50%% of %http.chunk%"), json!("50% of 4096"))]
	#[case(json!("no references"), json!("no references"))]
	#[case(json!(12), json!(12))]
	fn test_resolve_value(#[case] input: Value, #[case] expected: Value) {
		assert_eq!(bag().resolve_value(&input).unwrap(), expected);
	}

	#[rstest]
	fn test_resolve_nested_structures() {
		// Arrange
		let input = json!({
			"version": "%http.version%",
			"%http.version%": ["%http.chunk%", {"cache": "%router.cache%"}]
		});

		// Act
		let resolved = bag().resolve_value(&input).unwrap();

		// Assert
		assert_eq!(
			resolved,
			json!({
				"version": "1.1",
				"1.1": [4096, {"cache": false}]
			})
		);
	}

	#[rstest]
	fn test_missing_parameter() {
		let result = bag().resolve_value(&json!("%missing%"));
		assert!(matches!(result, Err(DiError::ParameterNotFound(name)) if name == "missing"));
	}

	#[rstest]
	fn test_non_scalar_interpolation_fails() {
		let result = bag().resolve_value(&json!("hosts: %hosts%"));
		assert!(matches!(
			result,
			Err(DiError::NonScalarInterpolation { kind: "array", .. })
		));
	}

	#[rstest]
	fn test_circular_reference_detected() {
		// Arrange
		let mut bag = ParameterBag::new();
		bag.set("a", json!("%b%"));
		bag.set("b", json!("x-%a%"));

		// Act
		let result = bag.resolve_value(&json!("%a%"));

		// Assert
		match result {
			Err(DiError::ParameterCircularReference(cycle)) => {
				assert_eq!(cycle, vec!["a", "b", "a"]);
			}
			other => panic!("expected circular reference, got {:?}", other),
		}
	}

	#[rstest]
	fn test_same_parameter_twice_is_not_a_cycle() {
		let resolved = bag()
			.resolve_value(&json!(["%http.version%", "%http.version%"]))
			.unwrap();
		assert_eq!(resolved, json!(["1.1", "1.1"]));
	}

	#[rstest]
	fn test_escape_round_trips() {
		let original = json!({"ratio": "100%", "list": ["%not.a.ref%"]});
		let escaped = ParameterBag::escape_value(&original);
		assert_eq!(ParameterBag::new().resolve_value(&escaped).unwrap(), original);
	}

	#[rstest]
	fn test_set_overwrites_and_remove_keeps_order() {
		// Arrange
		let mut bag = bag();

		// Act
		bag.set("http.version", json!("2"));
		bag.remove("http.chunk");

		// Assert
		assert_eq!(bag.get("http.version").unwrap(), &json!("2"));
		let names: Vec<_> = bag.all().keys().cloned().collect();
		assert_eq!(names, vec!["http.version", "router.cache", "hosts", "alias"]);
		assert_eq!(bag.len(), 4);
	}
}
