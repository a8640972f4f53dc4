//! Built-in micro-framework services
//!
//! Lightweight counterparts of the services a micro-framework application
//! expects to find in its container. Their behavior is driven by the
//! `settings` collection.

use indexmap::IndexMap;
use serde_json::Value;
use slimwire_conf::Collection;
use slimwire_conf::sources::process_variables;
use slimwire_di::{Container, DiError, DiResult, ServiceValue};
use std::error::Error;
use std::path::PathBuf;

/// Server environment variables, in the CGI naming scheme.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Environment {
	variables: IndexMap<String, String>,
}

impl Environment {
	pub fn new(variables: IndexMap<String, String>) -> Self {
		Self { variables }
	}

	/// Captures the current process environment.
	///
	/// Variables whose name or value is not valid UTF-8 are left out.
	pub fn from_process() -> Self {
		process_variables().collect()
	}

	/// Builds an environment for tests: a plain local GET request,
	/// overridden by `overrides`.
	pub fn mock<K, V>(overrides: impl IntoIterator<Item = (K, V)>) -> Self
	where
		K: Into<String>,
		V: Into<String>,
	{
		let mut environment: Self = [
			("SERVER_PROTOCOL", "HTTP/1.1"),
			("REQUEST_METHOD", "GET"),
			("REQUEST_URI", "/"),
			("QUERY_STRING", ""),
			("SERVER_NAME", "localhost"),
			("SERVER_PORT", "80"),
			("HTTP_HOST", "localhost"),
			("HTTP_ACCEPT", "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
			("HTTP_USER_AGENT", "slimwire"),
			("REMOTE_ADDR", "127.0.0.1"),
		]
		.into_iter()
		.map(|(name, value)| (name.to_string(), value.to_string()))
		.collect();
		for (name, value) in overrides {
			environment.variables.insert(name.into(), value.into());
		}
		environment
	}

	pub fn get(&self, name: &str) -> Option<&str> {
		self.variables.get(name).map(String::as_str)
	}

	pub fn all(&self) -> &IndexMap<String, String> {
		&self.variables
	}
}

impl FromIterator<(String, String)> for Environment {
	fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
		Self {
			variables: iter.into_iter().collect(),
		}
	}
}

/// Incoming request as seen through the [`Environment`].
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
	method: String,
	uri: String,
	protocol_version: String,
	headers: IndexMap<String, String>,
}

impl Request {
	/// Builds the request described by `environment`.
	///
	/// `HTTP_*` variables become headers: `HTTP_ACCEPT_LANGUAGE` is exposed as
	/// `accept-language`.
	pub fn from_environment(environment: &Environment) -> Self {
		let headers = environment
			.all()
			.iter()
			.filter_map(|(name, value)| {
				let header = name.strip_prefix("HTTP_")?;
				Some((header.to_ascii_lowercase().replace('_', "-"), value.clone()))
			})
			.collect();
		let protocol_version = environment
			.get("SERVER_PROTOCOL")
			.and_then(|protocol| protocol.strip_prefix("HTTP/"))
			.unwrap_or("1.1");

		Self {
			method: environment
				.get("REQUEST_METHOD")
				.unwrap_or("GET")
				.to_ascii_uppercase(),
			uri: environment.get("REQUEST_URI").unwrap_or("/").to_string(),
			protocol_version: protocol_version.to_string(),
			headers,
		}
	}

	pub fn method(&self) -> &str {
		&self.method
	}

	pub fn uri(&self) -> &str {
		&self.uri
	}

	pub fn protocol_version(&self) -> &str {
		&self.protocol_version
	}

	/// Header lookup, case-insensitive.
	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers
			.get(&name.to_ascii_lowercase())
			.map(String::as_str)
	}

	pub fn headers(&self) -> &IndexMap<String, String> {
		&self.headers
	}
}

/// Outgoing response.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
	status: u16,
	protocol_version: String,
	headers: IndexMap<String, String>,
	body: String,
}

impl Response {
	pub const DEFAULT_CONTENT_TYPE: &'static str = "text/html; charset=UTF-8";

	pub fn new(protocol_version: impl Into<String>) -> Self {
		let mut headers = IndexMap::new();
		headers.insert(
			"Content-Type".to_string(),
			Self::DEFAULT_CONTENT_TYPE.to_string(),
		);
		Self {
			status: 200,
			protocol_version: protocol_version.into(),
			headers,
			body: String::new(),
		}
	}

	pub fn with_status(mut self, status: u16) -> Self {
		self.status = status;
		self
	}

	pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.headers.insert(name.into(), value.into());
		self
	}

	pub fn with_body(mut self, body: impl Into<String>) -> Self {
		self.body = body.into();
		self
	}

	pub fn status(&self) -> u16 {
		self.status
	}

	pub fn protocol_version(&self) -> &str {
		&self.protocol_version
	}

	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers.get(name).map(String::as_str)
	}

	pub fn body(&self) -> &str {
		&self.body
	}
}

/// Route registry settings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Router {
	cache_file: Option<PathBuf>,
}

impl Router {
	pub fn new(cache_file: Option<PathBuf>) -> Self {
		Self { cache_file }
	}

	/// Reads `routerCacheFile` from `settings`: `false`, `null` or a missing
	/// key disable caching, a string is the cache path.
	pub fn from_settings(settings: &Collection) -> DiResult<Self> {
		match settings.get("routerCacheFile") {
			None | Some(Value::Null) | Some(Value::Bool(false)) => Ok(Self::new(None)),
			Some(Value::String(path)) => Ok(Self::new(Some(PathBuf::from(path)))),
			Some(other) => Err(DiError::InvalidArgument(format!(
				"routerCacheFile must be a path or false, got {}",
				other
			))),
		}
	}

	pub fn cache_file(&self) -> Option<&PathBuf> {
		self.cache_file.as_ref()
	}
}

/// Route invocation strategy passing the request, the response and the
/// route arguments as separate parameters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestResponse;

impl RequestResponse {
	pub fn invoke<F>(
		&self,
		handler: F,
		request: &Request,
		response: Response,
		arguments: &IndexMap<String, String>,
	) -> Response
	where
		F: FnOnce(&Request, Response, &IndexMap<String, String>) -> Response,
	{
		handler(request, response, arguments)
	}
}

/// Renders unhandled application errors as 500 responses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ErrorHandler {
	display_error_details: bool,
}

impl ErrorHandler {
	pub fn new(display_error_details: bool) -> Self {
		Self {
			display_error_details,
		}
	}

	pub fn displays_error_details(&self) -> bool {
		self.display_error_details
	}

	pub fn handle(&self, response: Response, error: &dyn Error) -> Response {
		let mut body = String::from("Slim Application Error");
		if self.display_error_details {
			body.push_str(&format!("\n\n{}", error));
			let mut source = error.source();
			while let Some(cause) = source {
				body.push_str(&format!("\ncaused by: {}", cause));
				source = cause.source();
			}
		}
		response.with_status(500).with_body(body)
	}
}

/// Renders 404 responses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NotFoundHandler;

impl NotFoundHandler {
	pub fn handle(&self, response: Response) -> Response {
		response.with_status(404).with_body("Page Not Found")
	}
}

/// Renders 405 responses listing the allowed methods.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NotAllowedHandler;

impl NotAllowedHandler {
	pub fn handle(&self, response: Response, allowed: &[&str]) -> Response {
		let allowed = allowed.join(", ");
		response
			.with_status(405)
			.with_header("Allow", allowed.clone())
			.with_body(format!("Method not allowed. Must be one of: {}", allowed))
	}
}

/// Resolves `"service"` and `"service:method"` route targets against the
/// container.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallableResolver;

/// A resolved route target.
pub struct ResolvedCallable {
	pub service: ServiceValue,
	pub method: Option<String>,
}

impl CallableResolver {
	pub fn resolve(&self, container: &dyn Container, target: &str) -> DiResult<ResolvedCallable> {
		let (id, method) = match target.split_once(':') {
			Some((id, method)) if !method.is_empty() => (id, Some(method.to_string())),
			Some(_) => {
				return Err(DiError::InvalidArgument(format!(
					"callable '{}' names no method",
					target
				)));
			}
			None => (target, None),
		};
		let service = container.get(id)?;
		Ok(ResolvedCallable { service, method })
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;
	use slimwire_di::{ContainerBuilder, ContainerExt};

	#[rstest]
	fn test_request_from_mock_environment() {
		let environment = Environment::mock([
			("REQUEST_METHOD", "post"),
			("REQUEST_URI", "/users/1"),
			("HTTP_ACCEPT_LANGUAGE", "en"),
		]);

		let request = Request::from_environment(&environment);

		assert_eq!(request.method(), "POST");
		assert_eq!(request.uri(), "/users/1");
		assert_eq!(request.protocol_version(), "1.1");
		assert_eq!(request.header("Accept-Language"), Some("en"));
		assert_eq!(request.header("host"), Some("localhost"));
	}

	#[rstest]
	fn test_request_from_empty_environment() {
		let request = Request::from_environment(&Environment::default());

		assert_eq!(request.method(), "GET");
		assert_eq!(request.uri(), "/");
		assert!(request.headers().is_empty());
	}

	#[rstest]
	fn test_new_response_defaults() {
		let response = Response::new("2");

		assert_eq!(response.status(), 200);
		assert_eq!(response.protocol_version(), "2");
		assert_eq!(
			response.header("Content-Type"),
			Some(Response::DEFAULT_CONTENT_TYPE)
		);
		assert!(response.body().is_empty());
	}

	#[rstest]
	#[case(json!(false), None)]
	#[case(Value::Null, None)]
	#[case(json!("/tmp/routes.cache"), Some(PathBuf::from("/tmp/routes.cache")))]
	fn test_router_cache_file(#[case] value: Value, #[case] expected: Option<PathBuf>) {
		let settings: Collection = [("routerCacheFile".to_string(), value)].into_iter().collect();

		let router = Router::from_settings(&settings).unwrap();

		assert_eq!(router.cache_file(), expected.as_ref());
	}

	#[rstest]
	fn test_router_rejects_numeric_cache_file() {
		let settings: Collection = [("routerCacheFile".to_string(), json!(1))].into_iter().collect();

		assert!(matches!(
			Router::from_settings(&settings),
			Err(DiError::InvalidArgument(_))
		));
	}

	#[rstest]
	#[case(false, "Slim Application Error")]
	#[case(true, "Slim Application Error\n\nservice not found: db")]
	fn test_error_handler_details(#[case] display: bool, #[case] expected: &str) {
		let handler = ErrorHandler::new(display);
		let error = DiError::ServiceNotFound("db".to_string());

		let response = handler.handle(Response::new("1.1"), &error);

		assert_eq!(response.status(), 500);
		assert_eq!(response.body(), expected);
	}

	#[rstest]
	fn test_not_found_and_not_allowed_handlers() {
		let not_found = NotFoundHandler.handle(Response::new("1.1"));
		let not_allowed = NotAllowedHandler.handle(Response::new("1.1"), &["GET", "POST"]);

		assert_eq!(not_found.status(), 404);
		assert_eq!(not_allowed.status(), 405);
		assert_eq!(not_allowed.header("Allow"), Some("GET, POST"));
		assert_eq!(
			not_allowed.body(),
			"Method not allowed. Must be one of: GET, POST"
		);
	}

	#[rstest]
	fn test_request_response_strategy_forwards_arguments() {
		let request = Request::from_environment(&Environment::mock::<&str, &str>([]));
		let mut arguments = IndexMap::new();
		arguments.insert("name".to_string(), "world".to_string());

		let response = RequestResponse.invoke(
			|_, response, arguments| response.with_body(format!("hello {}", arguments["name"])),
			&request,
			Response::new("1.1"),
			&arguments,
		);

		assert_eq!(response.body(), "hello world");
	}

	#[rstest]
	#[case("greeter", None)]
	#[case("greeter:greet", Some("greet"))]
	fn test_callable_resolver(#[case] target: &str, #[case] method: Option<&str>) {
		let mut container = ContainerBuilder::new();
		container.set_service("greeter", "hello".to_string());

		let resolved = CallableResolver.resolve(&container, target).unwrap();

		assert_eq!(resolved.method.as_deref(), method);
		assert_eq!(
			resolved.service.downcast_ref::<String>().map(String::as_str),
			Some("hello")
		);
	}

	#[rstest]
	fn test_callable_resolver_rejects_empty_method() {
		let container = ContainerBuilder::new();

		let result = CallableResolver.resolve(&container, "greeter:");

		assert!(matches!(result, Err(DiError::InvalidArgument(_))));
	}
}
