//! Container resolution
//!
//! [`ContainerManager`] turns a container argument into a live container and
//! applies injection units to it, in order, through a loader obtained from
//! its [`LoaderProvider`].

use crate::loader::{InjectionLoader, LoaderResource, ResourceLoader};
use crate::{InjectError, InjectResult, ServiceInjection};
use slimwire_di::Container;
use std::any::{Any, type_name};
use std::fmt;

/// Reference to a container type, instantiated through its zero-argument
/// constructor.
pub struct ContainerType<C> {
	construct: fn() -> C,
}

impl<C: Default> ContainerType<C> {
	pub fn new() -> Self {
		Self {
			construct: C::default,
		}
	}
}

impl<C> ContainerType<C> {
	/// Fully qualified name of the referenced type.
	pub fn name(&self) -> &'static str {
		type_name::<C>()
	}

	/// Creates a fresh container.
	pub fn instantiate(&self) -> C {
		(self.construct)()
	}
}

impl<C: Default> Default for ContainerType<C> {
	fn default() -> Self {
		Self::new()
	}
}

impl<C> Clone for ContainerType<C> {
	fn clone(&self) -> Self {
		*self
	}
}

impl<C> Copy for ContainerType<C> {}

impl<C> fmt::Debug for ContainerType<C> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("ContainerType").field(&self.name()).finish()
	}
}

/// Container handed to [`ContainerManager::resolve_container`].
pub enum ContainerArgument<C> {
	/// A ready container, used as is.
	Instance(C),
	/// A container type to instantiate.
	Type(ContainerType<C>),
}

impl<C: Container + Default + 'static> ContainerArgument<C> {
	/// Interprets a dynamically typed argument.
	///
	/// Accepts a `C`, a `ContainerType<C>`, or the type name of `C` as a
	/// `String` or `&'static str`.
	pub fn from_any(value: Box<dyn Any + Send>) -> InjectResult<Self> {
		let value = match value.downcast::<C>() {
			Ok(container) => return Ok(Self::Instance(*container)),
			Err(value) => value,
		};
		let value = match value.downcast::<ContainerType<C>>() {
			Ok(container_type) => return Ok(Self::Type(*container_type)),
			Err(value) => value,
		};

		let expected = type_name::<C>();
		let named = if let Some(name) = value.downcast_ref::<String>() {
			name == expected
		} else if let Some(name) = value.downcast_ref::<&'static str>() {
			*name == expected
		} else {
			false
		};
		if named {
			Ok(Self::Type(ContainerType::new()))
		} else {
			Err(InjectError::InvalidContainerArgument { expected })
		}
	}
}

impl<C: Container> From<C> for ContainerArgument<C> {
	fn from(container: C) -> Self {
		Self::Instance(container)
	}
}

impl<C> From<ContainerType<C>> for ContainerArgument<C> {
	fn from(container_type: ContainerType<C>) -> Self {
		Self::Type(container_type)
	}
}

impl<C> fmt::Debug for ContainerArgument<C> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Instance(_) => f.debug_tuple("Instance").field(&type_name::<C>()).finish(),
			Self::Type(container_type) => f.debug_tuple("Type").field(container_type).finish(),
		}
	}
}

/// Supplies the loader used to apply injection units.
pub trait LoaderProvider {
	fn provide_loader<'c>(&self, container: &'c mut dyn Container) -> Box<dyn ResourceLoader + 'c>;
}

/// Provides an [`InjectionLoader`] bound to the container.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultLoaderProvider;

impl LoaderProvider for DefaultLoaderProvider {
	fn provide_loader<'c>(&self, container: &'c mut dyn Container) -> Box<dyn ResourceLoader + 'c> {
		Box::new(InjectionLoader::new(container))
	}
}

/// Resolves containers and applies injection units to them.
///
/// # Examples
///
/// ```
/// use slimwire_di::{Container, ContainerBuilder};
/// use slimwire_loader::{ContainerManager, ContainerType, DefaultServicesInjection};
///
/// let manager = ContainerManager::new();
/// let container: ContainerBuilder = manager
/// 	.resolve_container(
/// 		ContainerType::<ContainerBuilder>::new(),
/// 		&[&DefaultServicesInjection::new()],
/// 	)
/// 	.unwrap();
///
/// assert!(container.has("settings"));
/// assert!(container.has("router"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ContainerManager<P = DefaultLoaderProvider> {
	loader_provider: P,
}

impl ContainerManager {
	pub fn new() -> Self {
		Self::default()
	}
}

impl<P: LoaderProvider> ContainerManager<P> {
	/// Creates a manager that obtains its loaders from `loader_provider`.
	pub fn with_loader_provider(loader_provider: P) -> Self {
		Self { loader_provider }
	}

	pub fn loader_provider(&self) -> &P {
		&self.loader_provider
	}

	/// Resolves `container` and applies `injections` to it in order.
	///
	/// The first failing injection aborts the call. Injections applied
	/// before it are not rolled back.
	pub fn resolve_container<C: Container>(
		&self,
		container: impl Into<ContainerArgument<C>>,
		injections: &[&dyn ServiceInjection],
	) -> InjectResult<C> {
		let mut container = match container.into() {
			ContainerArgument::Instance(container) => container,
			ContainerArgument::Type(container_type) => {
				tracing::debug!(container = container_type.name(), "instantiating container");
				container_type.instantiate()
			}
		};
		self.inject_into(&mut container, injections)?;
		Ok(container)
	}

	/// Like [`resolve_container`](Self::resolve_container) for arguments whose
	/// type is only known at runtime.
	///
	/// An argument that is neither a `C` nor a reference to `C` fails with
	/// [`InjectError::InvalidContainerArgument`] before any loader is provided.
	pub fn resolve_container_any<C: Container + Default + 'static>(
		&self,
		container: Box<dyn Any + Send>,
		injections: &[&dyn ServiceInjection],
	) -> InjectResult<C> {
		let argument = ContainerArgument::<C>::from_any(container)?;
		self.resolve_container(argument, injections)
	}

	/// Applies `injections` to an existing container in order.
	pub fn inject_into(
		&self,
		container: &mut dyn Container,
		injections: &[&dyn ServiceInjection],
	) -> InjectResult<()> {
		let mut loader = self.loader_provider.provide_loader(container);
		for (position, injection) in injections.iter().enumerate() {
			tracing::debug!(position, injection = injection.name(), "applying injection");
			loader.load(LoaderResource::Injection(*injection))?;
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use slimwire_di::{ContainerBuilder, ContainerExt};

	fn mark(container: &mut dyn Container) -> InjectResult<()> {
		container.set_service("marked", ());
		Ok(())
	}

	#[rstest]
	fn test_type_argument_builds_fresh_container() {
		let manager = ContainerManager::new();

		let container: ContainerBuilder = manager
			.resolve_container(ContainerType::<ContainerBuilder>::new(), &[])
			.unwrap();

		assert!(container.service_ids().is_empty());
	}

	#[rstest]
	fn test_instance_argument_is_used_as_is() {
		// Arrange
		let manager = ContainerManager::new();
		let mut container = ContainerBuilder::new();
		container.set_service("existing", 1u8);

		// Act
		let resolved = manager.resolve_container(container, &[&mark]).unwrap();

		// Assert
		assert_eq!(resolved.service_ids(), vec!["existing", "marked"]);
	}

	#[rstest]
	#[case::type_name(Box::new(type_name::<ContainerBuilder>().to_string()) as Box<dyn Any + Send>)]
	#[case::static_type_name(Box::new(type_name::<ContainerBuilder>()) as Box<dyn Any + Send>)]
	#[case::container_type(Box::new(ContainerType::<ContainerBuilder>::new()) as Box<dyn Any + Send>)]
	fn test_any_type_references_are_instantiated(#[case] argument: Box<dyn Any + Send>) {
		let manager = ContainerManager::new();

		let container: ContainerBuilder = manager.resolve_container_any(argument, &[&mark]).unwrap();

		assert_eq!(container.service_ids(), vec!["marked"]);
	}

	#[rstest]
	#[case::unrelated_name(Box::new("std::string::String".to_string()) as Box<dyn Any + Send>)]
	#[case::integer(Box::new(7u64) as Box<dyn Any + Send>)]
	fn test_any_rejects_non_containers(#[case] argument: Box<dyn Any + Send>) {
		let manager = ContainerManager::new();

		let result = manager.resolve_container_any::<ContainerBuilder>(argument, &[&mark]);

		assert!(matches!(
			result,
			Err(InjectError::InvalidContainerArgument { expected })
				if expected == type_name::<ContainerBuilder>()
		));
	}

	#[rstest]
	fn test_container_type_debug_names_type() {
		let container_type = ContainerType::<ContainerBuilder>::new();
		assert_eq!(
			format!("{:?}", container_type),
			format!("ContainerType({:?})", type_name::<ContainerBuilder>())
		);
	}
}
