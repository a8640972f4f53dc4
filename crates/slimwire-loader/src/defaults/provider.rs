//! Default services provider

use super::services::{
	CallableResolver, Environment, ErrorHandler, NotAllowedHandler, NotFoundHandler, Request,
	RequestResponse, Response, Router,
};
use indexmap::IndexMap;
use serde_json::Value;
use slimwire_conf::{Collection, SETTINGS_SERVICE};
use slimwire_di::{Container, ContainerExt, DiResult, ServiceValue};
use std::sync::Arc;

/// Builds a service from the container it is registered in.
pub type ServiceFactory = Arc<dyn Fn(&dyn Container) -> DiResult<ServiceValue> + Send + Sync>;

/// Source of named service factories.
pub trait ServicesProvider: Send + Sync {
	/// Factories keyed by service name, in registration order.
	fn services(&self) -> IndexMap<String, ServiceFactory>;
}

/// The micro-framework's built-in service set.
///
/// | Service | Type |
/// |---------|------|
/// | `environment` | [`Environment`] |
/// | `request` | [`Request`] |
/// | `response` | [`Response`] |
/// | `router` | [`Router`] |
/// | `foundHandler` | [`RequestResponse`] |
/// | `errorHandler` | [`ErrorHandler`] |
/// | `notFoundHandler` | [`NotFoundHandler`] |
/// | `notAllowedHandler` | [`NotAllowedHandler`] |
/// | `callableResolver` | [`CallableResolver`] |
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultServicesProvider;

fn settings(container: &dyn Container) -> DiResult<Arc<Collection>> {
	container.get_as::<Collection>(SETTINGS_SERVICE)
}

fn factory<F>(build: F) -> ServiceFactory
where
	F: Fn(&dyn Container) -> DiResult<ServiceValue> + Send + Sync + 'static,
{
	Arc::new(build)
}

impl ServicesProvider for DefaultServicesProvider {
	fn services(&self) -> IndexMap<String, ServiceFactory> {
		let mut services = IndexMap::new();
		services.insert(
			"environment".to_string(),
			factory(|_| Ok(Arc::new(Environment::from_process()))),
		);
		services.insert(
			"request".to_string(),
			factory(|container| {
				let environment = container.get_as::<Environment>("environment")?;
				Ok(Arc::new(Request::from_environment(&environment)))
			}),
		);
		services.insert(
			"response".to_string(),
			factory(|container| {
				let settings = settings(container)?;
				let protocol_version = match settings.get("httpVersion") {
					Some(Value::String(version)) => version.clone(),
					Some(Value::Null) | None => "1.1".to_string(),
					Some(other) => other.to_string(),
				};
				Ok(Arc::new(Response::new(protocol_version)))
			}),
		);
		services.insert(
			"router".to_string(),
			factory(|container| Ok(Arc::new(Router::from_settings(&*settings(container)?)?))),
		);
		services.insert(
			"foundHandler".to_string(),
			factory(|_| Ok(Arc::new(RequestResponse))),
		);
		services.insert(
			"errorHandler".to_string(),
			factory(|container| {
				let display = settings(container)?
					.get("displayErrorDetails")
					.and_then(Value::as_bool)
					.unwrap_or(false);
				Ok(Arc::new(ErrorHandler::new(display)))
			}),
		);
		services.insert(
			"notFoundHandler".to_string(),
			factory(|_| Ok(Arc::new(NotFoundHandler))),
		);
		services.insert(
			"notAllowedHandler".to_string(),
			factory(|_| Ok(Arc::new(NotAllowedHandler))),
		);
		services.insert(
			"callableResolver".to_string(),
			factory(|_| Ok(Arc::new(CallableResolver))),
		);
		services
	}
}
