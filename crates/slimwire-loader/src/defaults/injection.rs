//! Default services injection

use super::provider::{DefaultServicesProvider, ServicesProvider};
use crate::settings::existing_settings;
use crate::{InjectResult, ServiceInjection};
use serde_json::{Map, Value};
use slimwire_conf::{Collection, DEFAULT_SETTINGS, SETTINGS_SERVICE, merge_settings};
use slimwire_di::{Container, ContainerExt};
use std::fmt;
use std::sync::Arc;

/// Namespace used for published settings parameters unless told otherwise.
pub const DEFAULT_NAMESPACE: &str = "slim.settings";

/// Registers the framework settings and default services in a container.
///
/// Injecting into a container:
///
/// 1. reads the `settings` collection already registered, if any;
/// 2. merges it over the built-in defaults, existing values winning;
/// 3. publishes every merged key as the parameter `<namespace>.<key>`,
///    leaving parameters that are already set untouched;
/// 4. registers `settings` as a [`Collection`] built from `%<namespace>.<key>%`
///    references, so it reflects the parameter values current when it is
///    first fetched;
/// 5. registers each provider service whose name is not taken yet, by
///    calling its factory with the container.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use slimwire_di::{Container, ContainerBuilder};
/// use slimwire_loader::{DefaultServicesInjection, ServiceInjection};
///
/// let mut container = ContainerBuilder::new();
/// container
/// 	.parameter_bag_mut()
/// 	.set("app.settings.displayErrorDetails", json!(true));
///
/// DefaultServicesInjection::with_namespace("app.settings.")
/// 	.inject_services(&mut container)
/// 	.unwrap();
///
/// let parameters = container.parameter_bag();
/// assert_eq!(parameters.get("app.settings.displayErrorDetails").unwrap(), &json!(true));
/// assert_eq!(parameters.get("app.settings.httpVersion").unwrap(), &json!("1.1"));
/// ```
#[derive(Clone)]
pub struct DefaultServicesInjection {
	namespace: String,
	provider: Arc<dyn ServicesProvider>,
}

impl DefaultServicesInjection {
	/// Uses [`DEFAULT_NAMESPACE`] and the [`DefaultServicesProvider`].
	pub fn new() -> Self {
		Self::with_provider(DEFAULT_NAMESPACE, None)
	}

	pub fn with_namespace(namespace: impl AsRef<str>) -> Self {
		Self::with_provider(namespace, None)
	}

	/// Leading and trailing dots are stripped from `namespace`. Without a
	/// `provider`, [`default_provider`](Self::default_provider) is used.
	pub fn with_provider(
		namespace: impl AsRef<str>,
		provider: Option<Arc<dyn ServicesProvider>>,
	) -> Self {
		Self {
			namespace: namespace.as_ref().trim_matches('.').to_string(),
			provider: provider.unwrap_or_else(Self::default_provider),
		}
	}

	pub fn default_provider() -> Arc<dyn ServicesProvider> {
		Arc::new(DefaultServicesProvider)
	}

	pub fn namespace(&self) -> &str {
		&self.namespace
	}

	pub fn provider(&self) -> &Arc<dyn ServicesProvider> {
		&self.provider
	}

	/// Parameter name under which `key` is published.
	pub fn parameter_name(&self, key: &str) -> String {
		format!("{}.{}", self.namespace, key)
	}

	fn publish_settings(&self, container: &mut dyn Container) -> InjectResult<Map<String, Value>> {
		let existing = existing_settings(container)?;
		let effective = merge_settings(DEFAULT_SETTINGS, existing.all());

		let parameters = container.parameter_bag_mut();
		let mut references = Map::new();
		for (key, value) in effective {
			let name = self.parameter_name(&key);
			if !parameters.set_if_absent(name.clone(), value) {
				tracing::trace!(parameter = %name, "parameter already set, keeping it");
			}
			references.insert(key, Value::String(format!("%{}%", name)));
		}
		Ok(references)
	}
}

impl Default for DefaultServicesInjection {
	fn default() -> Self {
		Self::new()
	}
}

impl fmt::Debug for DefaultServicesInjection {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("DefaultServicesInjection")
			.field("namespace", &self.namespace)
			.finish_non_exhaustive()
	}
}

impl ServiceInjection for DefaultServicesInjection {
	fn inject_services(&self, container: &mut dyn Container) -> InjectResult<()> {
		let references = self.publish_settings(container)?;
		tracing::debug!(
			namespace = %self.namespace,
			settings = references.len(),
			"registering settings collection"
		);
		container
			.register_type::<Collection>(SETTINGS_SERVICE)
			.add_argument(Value::Object(references));

		for (name, factory) in self.provider.services() {
			if container.has(&name) {
				tracing::debug!(service = %name, "service already registered, skipping");
				continue;
			}
			let service = factory(&*container)?;
			container.set(&name, service);
		}
		Ok(())
	}
}
