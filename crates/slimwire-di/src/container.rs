//! Service container

use crate::definition::{Constructible, Constructor, Definition};
use crate::parameters::ParameterBag;
use crate::{DiError, DiResult};
use indexmap::{IndexMap, IndexSet};
use indexmap::map::Entry;
use parking_lot::RwLock;
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A constructed, type-erased service.
pub type ServiceValue = Arc<dyn Any + Send + Sync>;

/// Registry of named services and named parameters.
///
/// Services and parameters live in independent namespaces: a service called
/// `settings` and a parameter called `settings` never collide.
pub trait Container {
	/// Returns true if a definition or an instance is registered under `id`.
	fn has(&self, id: &str) -> bool;

	/// Returns the service registered under `id`, building it from its
	/// definition if needed.
	fn get(&self, id: &str) -> DiResult<ServiceValue>;

	/// Registers a deferred definition under `id`.
	///
	/// Any previous definition or instance for `id` is dropped.
	fn register(&mut self, id: &str, constructor: Constructor) -> &mut Definition;

	/// Stores a ready-made instance under `id`, dropping any definition.
	fn set(&mut self, id: &str, service: ServiceValue);

	/// Definition registered under `id`, if the service is deferred.
	fn definition(&self, id: &str) -> Option<&Definition>;

	/// Ids of every registered service, in the order they were first registered.
	fn service_ids(&self) -> Vec<String>;

	fn parameter_bag(&self) -> &ParameterBag;

	fn parameter_bag_mut(&mut self) -> &mut ParameterBag;
}

/// Typed helpers available on every [`Container`], including `dyn Container`.
pub trait ContainerExt: Container {
	/// Registers `T` as the service `id`, built through [`Constructible`].
	fn register_type<T: Constructible>(&mut self, id: &str) -> &mut Definition {
		self.register(id, Constructor::of::<T>())
	}

	/// Fetches a service and downcasts it to `T`.
	fn get_as<T: Any + Send + Sync>(&self, id: &str) -> DiResult<Arc<T>> {
		self.get(id)?
			.downcast::<T>()
			.map_err(|_| DiError::ServiceTypeMismatch {
				id: id.to_string(),
				expected: std::any::type_name::<T>(),
			})
	}

	/// Stores `service` under `id`.
	fn set_service<T: Any + Send + Sync>(&mut self, id: &str, service: T) {
		self.set(id, Arc::new(service));
	}
}

impl<C: Container + ?Sized> ContainerExt for C {}

/// In-memory [`Container`] implementation.
///
/// Definitions are built lazily on first [`get`](Container::get); shared
/// instances are cached behind a lock so lookups only need `&self`.
///
/// ```
/// use slimwire_di::{Container, ContainerBuilder, ContainerExt};
/// use serde_json::json;
///
/// let mut container = ContainerBuilder::new();
/// container.parameter_bag_mut().set("greeting", json!("hello"));
/// container.set_service("answer", 42u32);
///
/// assert!(container.has("answer"));
/// assert_eq!(*container.get_as::<u32>("answer").unwrap(), 42);
/// ```
#[derive(Default)]
pub struct ContainerBuilder {
	ids: IndexSet<String>,
	definitions: IndexMap<String, Definition>,
	services: IndexMap<String, ServiceValue>,
	instances: RwLock<HashMap<String, ServiceValue>>,
	parameters: ParameterBag,
}

impl ContainerBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a container seeded with parameters.
	pub fn with_parameters(parameters: ParameterBag) -> Self {
		Self {
			parameters,
			..Self::default()
		}
	}

	/// Returns true if `id` holds a ready instance, either stored with
	/// [`set`](Container::set) or built from its definition and cached.
	pub fn is_initialized(&self, id: &str) -> bool {
		self.services.contains_key(id) || self.instances.read().contains_key(id)
	}

	/// Removes a service, its definition and any cached instance.
	pub fn remove(&mut self, id: &str) -> bool {
		self.ids.shift_remove(id);
		let had_definition = self.definitions.shift_remove(id).is_some();
		let had_service = self.services.shift_remove(id).is_some();
		self.instances.get_mut().remove(id);
		had_definition || had_service
	}

	fn build(&self, id: &str, definition: &Definition) -> DiResult<ServiceValue> {
		let wrap = |source: DiError| DiError::Construction {
			id: id.to_string(),
			source: Box::new(source),
		};

		let arguments = definition
			.arguments()
			.iter()
			.map(|argument| self.parameters.resolve_value(argument))
			.collect::<DiResult<Vec<_>>>()
			.map_err(wrap)?;
		let service = definition
			.constructor()
			.construct(arguments)
			.map_err(wrap)?;

		tracing::trace!(
			service = %id,
			type_name = definition.type_name(),
			shared = definition.is_shared(),
			"built service from definition"
		);
		Ok(service)
	}
}

impl Container for ContainerBuilder {
	fn has(&self, id: &str) -> bool {
		self.definitions.contains_key(id) || self.services.contains_key(id)
	}

	fn get(&self, id: &str) -> DiResult<ServiceValue> {
		if let Some(service) = self.services.get(id) {
			return Ok(Arc::clone(service));
		}
		if let Some(service) = self.instances.read().get(id) {
			return Ok(Arc::clone(service));
		}

		let definition = self
			.definitions
			.get(id)
			.ok_or_else(|| DiError::ServiceNotFound(id.to_string()))?;
		let service = self.build(id, definition)?;
		if definition.is_shared() {
			self.instances
				.write()
				.insert(id.to_string(), Arc::clone(&service));
		}
		Ok(service)
	}

	fn register(&mut self, id: &str, constructor: Constructor) -> &mut Definition {
		self.services.shift_remove(id);
		self.instances.get_mut().remove(id);
		tracing::trace!(service = %id, type_name = constructor.type_name(), "registering definition");
		self.ids.insert(id.to_string());

		let definition = Definition::new(constructor);
		match self.definitions.entry(id.to_string()) {
			Entry::Occupied(mut entry) => {
				entry.insert(definition);
				entry.into_mut()
			}
			Entry::Vacant(entry) => entry.insert(definition),
		}
	}

	fn set(&mut self, id: &str, service: ServiceValue) {
		self.definitions.shift_remove(id);
		self.instances.get_mut().remove(id);
		tracing::trace!(service = %id, "setting service instance");
		self.ids.insert(id.to_string());
		self.services.insert(id.to_string(), service);
	}

	fn definition(&self, id: &str) -> Option<&Definition> {
		self.definitions.get(id)
	}

	fn service_ids(&self) -> Vec<String> {
		self.ids.iter().cloned().collect()
	}

	fn parameter_bag(&self) -> &ParameterBag {
		&self.parameters
	}

	fn parameter_bag_mut(&mut self) -> &mut ParameterBag {
		&mut self.parameters
	}
}

impl fmt::Debug for ContainerBuilder {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ContainerBuilder")
			.field("definitions", &self.definitions)
			.field("services", &self.services.keys().collect::<Vec<_>>())
			.field("parameters", &self.parameters)
			.finish()
	}
}
