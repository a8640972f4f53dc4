//! Resource loading
//!
//! [`ResourceLoader`] is the generic loader contract; [`InjectionLoader`] is
//! the implementation bound to a container that accepts injection units.

use crate::{InjectError, InjectResult, ServiceInjection};
use slimwire_di::Container;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// A resource handed to a [`ResourceLoader`].
///
/// `Injection` carries the capability in its type. `Dynamic` wraps an
/// arbitrary value and is only loadable when it holds a
/// `Box<dyn ServiceInjection>` or an `Arc<dyn ServiceInjection>`.
#[derive(Clone, Copy)]
pub enum LoaderResource<'r> {
	Injection(&'r dyn ServiceInjection),
	Dynamic(&'r dyn Any),
}

impl<'r> LoaderResource<'r> {
	/// Returns the injection capability of this resource, if it has one.
	pub fn as_injection(&self) -> Option<&'r dyn ServiceInjection> {
		match *self {
			Self::Injection(injection) => Some(injection),
			Self::Dynamic(value) => {
				if let Some(boxed) = value.downcast_ref::<Box<dyn ServiceInjection>>() {
					Some(&**boxed)
				} else if let Some(shared) = value.downcast_ref::<Arc<dyn ServiceInjection>>() {
					Some(&**shared)
				} else {
					None
				}
			}
		}
	}
}

impl fmt::Debug for LoaderResource<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Injection(injection) => f
				.debug_tuple("Injection")
				.field(&injection.name())
				.finish(),
			Self::Dynamic(value) => f
				.debug_tuple("Dynamic")
				.field(&Any::type_id(*value))
				.finish(),
		}
	}
}

impl<'r, I: ServiceInjection> From<&'r I> for LoaderResource<'r> {
	fn from(injection: &'r I) -> Self {
		Self::Injection(injection)
	}
}

/// Generic resource loader contract.
pub trait ResourceLoader {
	/// Returns true if `resource` can be loaded by this loader.
	fn supports(&self, resource: &LoaderResource<'_>) -> bool;

	/// Loads `resource`.
	fn load(&mut self, resource: LoaderResource<'_>) -> InjectResult<()>;
}

/// Loader that applies injection units to a bound container.
pub struct InjectionLoader<'c> {
	container: &'c mut dyn Container,
}

impl<'c> InjectionLoader<'c> {
	pub fn new(container: &'c mut dyn Container) -> Self {
		Self { container }
	}

	pub fn container(&self) -> &dyn Container {
		&*self.container
	}

	/// Applies `injection` to the bound container.
	pub fn inject(&mut self, injection: &dyn ServiceInjection) -> InjectResult<()> {
		tracing::debug!(injection = injection.name(), "loading service injection");
		injection.inject_services(&mut *self.container)
	}
}

impl ResourceLoader for InjectionLoader<'_> {
	fn supports(&self, resource: &LoaderResource<'_>) -> bool {
		resource.as_injection().is_some()
	}

	fn load(&mut self, resource: LoaderResource<'_>) -> InjectResult<()> {
		let injection = resource.as_injection().ok_or_else(|| {
			InjectError::UnsupportedResource(format!(
				"{:?} does not implement ServiceInjection",
				resource
			))
		})?;
		self.inject(injection)
	}
}

impl fmt::Debug for InjectionLoader<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("InjectionLoader")
			.field("services", &self.container.service_ids())
			.finish()
	}
}
