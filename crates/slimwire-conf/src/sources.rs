//! Configuration sources for the settings collection
//!
//! Sources are merged by [`SettingsBuilder`](crate::builder::SettingsBuilder)
//! in priority order (environment variables > config files > defaults).

use indexmap::IndexMap;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

/// Trait for configuration sources
pub trait ConfigSource: Send + Sync {
	/// Load configuration from this source
	fn load(&self) -> Result<IndexMap<String, Value>, SourceError>;

	/// Get the priority of this source (higher = more important)
	fn priority(&self) -> u8;

	/// Get a description of this source
	fn description(&self) -> String;
}

/// Error type for configuration sources
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	#[error("Parse error: {0}")]
	Parse(String),

	#[error("TOML error: {0}")]
	Toml(#[from] toml::de::Error),

	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),
}

/// Environment variable configuration source
///
/// Variable names are turned into the framework's camel-cased setting keys:
/// with prefix `APP_`, `APP_HTTP_VERSION` becomes `httpVersion`.
pub struct EnvSource {
	prefix: Option<String>,
}

impl EnvSource {
	/// Create a new environment variable configuration source
	///
	/// # Examples
	///
	/// ```
	/// use slimwire_conf::sources::EnvSource;
	///
	/// let source = EnvSource::new();
	// Loads all environment variables
	/// ```
	pub fn new() -> Self {
		Self { prefix: None }
	}

	/// Set a prefix filter for environment variables
	///
	/// # Examples
	///
	/// ```
	/// use slimwire_conf::sources::EnvSource;
	///
	/// let source = EnvSource::new()
	///     .with_prefix("SLIM_");
	// Only loads env vars starting with SLIM_
	/// ```
	pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.prefix = Some(prefix.into());
		self
	}
}

impl Default for EnvSource {
	fn default() -> Self {
		Self::new()
	}
}

impl ConfigSource for EnvSource {
	fn load(&self) -> Result<IndexMap<String, Value>, SourceError> {
		let mut config = IndexMap::new();

		for (key, value) in process_variables() {
			let clean_key = match &self.prefix {
				Some(prefix) => match key.strip_prefix(prefix.as_str()) {
					Some(stripped) if !stripped.is_empty() => stripped,
					_ => continue,
				},
				None => key.as_str(),
			};

			config.insert(to_camel_case(clean_key), parse_env_value(value));
		}

		Ok(config)
	}

	fn priority(&self) -> u8 {
		100
	}

	fn description(&self) -> String {
		match &self.prefix {
			Some(prefix) => format!("Environment variables (prefix: {})", prefix),
			None => "Environment variables".to_string(),
		}
	}
}

/// Process environment variables whose name and value are valid UTF-8.
///
/// Other entries are skipped with a debug trace.
pub fn process_variables() -> impl Iterator<Item = (String, String)> {
	std::env::vars_os().filter_map(|(key, value)| match (key.into_string(), value.into_string()) {
		(Ok(key), Ok(value)) => Some((key, value)),
		(key, _) => {
			tracing::debug!(
				variable = %key.unwrap_or_else(|raw| raw.to_string_lossy().into_owned()),
				"skipping non UTF-8 environment variable"
			);
			None
		}
	})
}

/// `HTTP_VERSION` -> `httpVersion`
pub fn to_camel_case(name: &str) -> String {
	let mut out = String::with_capacity(name.len());
	for (i, word) in name.split('_').filter(|w| !w.is_empty()).enumerate() {
		let lower = word.to_lowercase();
		if i == 0 {
			out.push_str(&lower);
			continue;
		}
		let mut chars = lower.chars();
		if let Some(first) = chars.next() {
			out.extend(first.to_uppercase());
			out.push_str(chars.as_str());
		}
	}
	out
}

fn parse_env_value(value: String) -> Value {
	if let Ok(num) = value.parse::<i64>() {
		Value::Number(num.into())
	} else if let Ok(b) = value.trim().to_lowercase().parse::<bool>() {
		Value::Bool(b)
	} else {
		Value::String(value)
	}
}

/// TOML file configuration source
pub struct TomlFileSource {
	path: PathBuf,
}

impl TomlFileSource {
	/// Create a new TOML file configuration source
	///
	/// # Examples
	///
	/// ```
	/// use slimwire_conf::sources::TomlFileSource;
	/// use std::path::PathBuf;
	///
	/// let source = TomlFileSource::new(PathBuf::from("settings.toml"));
	/// ```
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}
}

impl ConfigSource for TomlFileSource {
	fn load(&self) -> Result<IndexMap<String, Value>, SourceError> {
		if !self.path.exists() {
			return Ok(IndexMap::new());
		}

		let content = fs::read_to_string(&self.path)?;
		let toml_value: toml::Value = toml::from_str(&content)?;
		let json_value = serde_json::to_value(toml_value)?;

		into_map(json_value)
	}

	fn priority(&self) -> u8 {
		50
	}

	fn description(&self) -> String {
		format!("TOML file: {}", self.path.display())
	}
}

/// JSON file configuration source
pub struct JsonFileSource {
	path: PathBuf,
}

impl JsonFileSource {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}
}

impl ConfigSource for JsonFileSource {
	fn load(&self) -> Result<IndexMap<String, Value>, SourceError> {
		if !self.path.exists() {
			return Ok(IndexMap::new());
		}

		let content = fs::read_to_string(&self.path)?;
		let json_value: Value = serde_json::from_str(&content)?;

		into_map(json_value)
	}

	fn priority(&self) -> u8 {
		50
	}

	fn description(&self) -> String {
		format!("JSON file: {}", self.path.display())
	}
}

fn into_map(value: Value) -> Result<IndexMap<String, Value>, SourceError> {
	match value {
		Value::Object(map) => Ok(map.into_iter().collect()),
		_ => Err(SourceError::Parse("Expected object at root".to_string())),
	}
}

/// Default values configuration source
pub struct DefaultSource {
	values: IndexMap<String, Value>,
}

impl DefaultSource {
	/// Create a new default values configuration source
	///
	/// # Examples
	///
	/// ```
	/// use slimwire_conf::sources::DefaultSource;
	/// use serde_json::Value;
	///
	/// let source = DefaultSource::new()
	///     .with_value("displayErrorDetails", Value::Bool(true))
	///     .with_value("responseChunkSize", Value::Number(8192.into()));
	/// ```
	pub fn new() -> Self {
		Self {
			values: IndexMap::new(),
		}
	}

	pub fn with_value(mut self, key: impl Into<String>, value: Value) -> Self {
		self.values.insert(key.into(), value);
		self
	}

	pub fn with_values(mut self, values: IndexMap<String, Value>) -> Self {
		self.values.extend(values);
		self
	}
}

impl Default for DefaultSource {
	fn default() -> Self {
		Self::new()
	}
}

impl ConfigSource for DefaultSource {
	fn load(&self) -> Result<IndexMap<String, Value>, SourceError> {
		Ok(self.values.clone())
	}

	fn priority(&self) -> u8 {
		0
	}

	fn description(&self) -> String {
		"Default values".to_string()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;
	use serial_test::serial;
	use std::io::Write;
	use tempfile::NamedTempFile;

	#[rstest]
	#[case("HTTP_VERSION", "httpVersion")]
	#[case("RESPONSE_CHUNK_SIZE", "responseChunkSize")]
	#[case("DETERMINE_ROUTE_BEFORE_APP_MIDDLEWARE", "determineRouteBeforeAppMiddleware")]
	#[case("DEBUG", "debug")]
	#[case("__ODD__NAME_", "oddName")]
	fn test_to_camel_case(#[case] input: &str, #[case] expected: &str) {
		assert_eq!(to_camel_case(input), expected);
	}

	#[rstest]
	#[case("4096", json!(4096))]
	#[case("true", json!(true))]
	#[case("FALSE", json!(false))]
	#[case("1.1", json!("1.1"))]
	#[case("append", json!("append"))]
	fn test_parse_env_value(#[case] raw: &str, #[case] expected: Value) {
		assert_eq!(parse_env_value(raw.to_string()), expected);
	}

	#[cfg(unix)]
	#[rstest]
	#[serial(env)]
	fn test_env_source_skips_non_utf8_variables() {
		use std::ffi::OsStr;
		use std::os::unix::ffi::OsStrExt;

		// Arrange
		unsafe {
			std::env::set_var("SLIMWIRE_SRC_BYTES", OsStr::from_bytes(&[0x66, 0xff, 0x6f]));
			std::env::set_var("SLIMWIRE_SRC_HTTP_VERSION", "2");
		}

		// Act
		let result = EnvSource::new().with_prefix("SLIMWIRE_SRC_").load();

		// Assert
		unsafe {
			std::env::remove_var("SLIMWIRE_SRC_BYTES");
			std::env::remove_var("SLIMWIRE_SRC_HTTP_VERSION");
		}
		let values = result.unwrap();
		assert_eq!(values.get("httpVersion"), Some(&json!(2)));
		assert!(!values.contains_key("bytes"));
	}

	#[rstest]
	fn test_toml_source_loads_table() {
		// Arrange
		let mut file = NamedTempFile::new().unwrap();
		writeln!(
			file,
			"httpVersion = \"2\"\nresponseChunkSize = 8192\nrouterCacheFile = \"/tmp/routes\""
		)
		.unwrap();

		// Act
		let values = TomlFileSource::new(file.path()).load().unwrap();

		// Assert
		assert_eq!(values["httpVersion"], json!("2"));
		assert_eq!(values["responseChunkSize"], json!(8192));
		assert_eq!(values["routerCacheFile"], json!("/tmp/routes"));
	}

	#[rstest]
	fn test_missing_file_is_empty() {
		let source = JsonFileSource::new("/nonexistent/slimwire/settings.json");
		assert!(source.load().unwrap().is_empty());
	}

	#[rstest]
	fn test_json_root_must_be_object() {
		let mut file = NamedTempFile::new().unwrap();
		write!(file, "[1, 2, 3]").unwrap();

		let result = JsonFileSource::new(file.path()).load();

		assert!(matches!(result, Err(SourceError::Parse(_))));
	}

	#[rstest]
	fn test_invalid_toml_is_reported() {
		let mut file = NamedTempFile::new().unwrap();
		write!(file, "httpVersion = ").unwrap();

		let result = TomlFileSource::new(file.path()).load();

		assert!(matches!(result, Err(SourceError::Toml(_))));
	}
}
