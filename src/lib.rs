//! # slimwire
//!
//! Container wiring for micro-framework applications.
//!
//! slimwire populates a service container at bootstrap: framework settings
//! are published as namespaced parameters, a `settings` service is registered
//! that reads those parameters when it is built, and the framework default
//! services are added unless the application already provides them.
//!
//! ## Feature Flags
//!
//! - `di` - Service container and parameter bag
//! - `conf` - Settings collection, framework defaults, configuration sources
//! - `loader` - Injection units, container resolution, default services
//! - `full` (default) - All of the above
//!
//! ## Quick Example
//!
//! ```rust
//! use slimwire::prelude::*;
//! use serde_json::json;
//!
//! let mut container = ContainerBuilder::new();
//! container
//! 	.parameter_bag_mut()
//! 	.set("slim.settings.displayErrorDetails", json!(true));
//!
//! let container = ContainerManager::new()
//! 	.resolve_container(container, &[&DefaultServicesInjection::new()])
//! 	.unwrap();
//!
//! let settings = container.get_as::<Collection>("settings").unwrap();
//! assert_eq!(settings.get("displayErrorDetails"), Some(&json!(true)));
//! assert_eq!(settings.get("httpVersion"), Some(&json!("1.1")));
//! ```

pub mod conf;
pub mod di;
pub mod loader;

// Re-export commonly used types
#[cfg(feature = "di")]
pub use slimwire_di::{
	Constructible, Constructor, Container, ContainerBuilder, ContainerExt, Definition, DiError,
	DiResult, ParameterBag, ServiceValue,
};

#[cfg(feature = "conf")]
pub use slimwire_conf::{Collection, ConfigSource, SETTINGS_SERVICE, SettingsBuilder, SourceError};

#[cfg(feature = "loader")]
pub use slimwire_loader::{
	ContainerManager, ContainerType, DefaultServicesInjection, DefaultServicesProvider,
	InjectError, InjectResult, InjectionLoader, ServiceInjection, ServicesProvider,
	SettingsInjection,
};

/// Prelude module for convenient imports
///
/// Import everything you need with:
/// ```rust
/// use slimwire::prelude::*;
/// ```
pub mod prelude {
	#[cfg(feature = "di")]
	pub use crate::{Container, ContainerBuilder, ContainerExt, DiError, DiResult};

	#[cfg(feature = "conf")]
	pub use crate::{Collection, SettingsBuilder};

	#[cfg(feature = "loader")]
	pub use crate::{
		ContainerManager, DefaultServicesInjection, InjectError, InjectResult, ServiceInjection,
		SettingsInjection,
	};
}
