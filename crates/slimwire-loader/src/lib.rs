//! # slimwire loader
//!
//! Pluggable injection units for slimwire containers.
//!
//! ## Features
//!
//! - **Injection units**: anything implementing [`ServiceInjection`], closures included
//! - **Resource loader**: [`InjectionLoader`] applies injection units to a bound container
//! - **Container resolution**: [`ContainerManager`] accepts a container or a
//!   container type and applies injection units to it in order
//! - **Framework defaults**: [`DefaultServicesInjection`] publishes the
//!   framework settings as parameters and registers the default services
//! - **Configuration**: [`SettingsInjection`] feeds layered settings sources
//!   into the `settings` service
//!
//! ## Example
//!
//! ```
//! use serde_json::json;
//! use slimwire_conf::Collection;
//! use slimwire_di::{Container, ContainerBuilder, ContainerExt};
//! use slimwire_loader::{ContainerManager, DefaultServicesInjection};
//!
//! let container = ContainerManager::new()
//! 	.resolve_container(ContainerBuilder::new(), &[&DefaultServicesInjection::new()])
//! 	.unwrap();
//!
//! let settings = container.get_as::<Collection>("settings").unwrap();
//! assert_eq!(settings.get("responseChunkSize"), Some(&json!(4096)));
//! ```

pub mod defaults;
pub mod error;
pub mod injection;
pub mod loader;
pub mod manager;
pub mod settings;

pub use defaults::{
	DEFAULT_NAMESPACE, DefaultServicesInjection, DefaultServicesProvider, ServiceFactory,
	ServicesProvider,
};
pub use error::{InjectError, InjectResult};
pub use injection::ServiceInjection;
pub use loader::{InjectionLoader, LoaderResource, ResourceLoader};
pub use manager::{
	ContainerArgument, ContainerManager, ContainerType, DefaultLoaderProvider, LoaderProvider,
};
pub use settings::SettingsInjection;
