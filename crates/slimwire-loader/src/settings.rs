//! Settings injection

use crate::{InjectResult, ServiceInjection};
use slimwire_conf::{Collection, SETTINGS_SERVICE, SettingsBuilder};
use slimwire_di::{Container, ContainerExt, DiError};

/// Returns the settings collection currently registered in `container`.
///
/// A missing `settings` service, or one that is not a [`Collection`], yields
/// an empty collection. Errors raised while building the service propagate.
pub(crate) fn existing_settings(container: &dyn Container) -> InjectResult<Collection> {
	if !container.has(SETTINGS_SERVICE) {
		return Ok(Collection::default());
	}
	match container.get_as::<Collection>(SETTINGS_SERVICE) {
		Ok(settings) => Ok((*settings).clone()),
		Err(DiError::ServiceTypeMismatch { .. }) => {
			tracing::debug!(
				service = SETTINGS_SERVICE,
				"registered settings service is not a collection, ignoring it"
			);
			Ok(Collection::default())
		}
		Err(error) => Err(error.into()),
	}
}

/// Loads settings from configuration sources into the `settings` service.
///
/// Loaded values are merged over any collection already registered. Run it
/// before [`DefaultServicesInjection`](crate::DefaultServicesInjection) to
/// have the loaded values take precedence over the framework defaults.
///
/// ```
/// use serde_json::json;
/// use slimwire_conf::SettingsBuilder;
/// use slimwire_conf::sources::DefaultSource;
/// use slimwire_di::{Container, ContainerBuilder};
/// use slimwire_loader::{ContainerManager, DefaultServicesInjection, SettingsInjection};
///
/// let settings = SettingsInjection::new(
/// 	SettingsBuilder::new().add_source(DefaultSource::new().with_value("httpVersion", json!("2"))),
/// );
/// let container = ContainerManager::new()
/// 	.resolve_container(
/// 		ContainerBuilder::new(),
/// 		&[&settings, &DefaultServicesInjection::new()],
/// 	)
/// 	.unwrap();
///
/// assert_eq!(
/// 	container.parameter_bag().get("slim.settings.httpVersion").unwrap(),
/// 	&json!("2")
/// );
/// ```
#[derive(Debug, Default)]
pub struct SettingsInjection {
	builder: SettingsBuilder,
}

impl SettingsInjection {
	pub fn new(builder: SettingsBuilder) -> Self {
		Self { builder }
	}

	pub fn builder(&self) -> &SettingsBuilder {
		&self.builder
	}
}

impl ServiceInjection for SettingsInjection {
	fn inject_services(&self, container: &mut dyn Container) -> InjectResult<()> {
		let loaded = self.builder.build()?;
		let mut settings = existing_settings(container)?;
		tracing::debug!(
			loaded = loaded.len(),
			existing = settings.len(),
			"storing settings collection"
		);
		settings.replace(loaded.into_inner());
		container.set_service(SETTINGS_SERVICE, settings);
		Ok(())
	}
}
