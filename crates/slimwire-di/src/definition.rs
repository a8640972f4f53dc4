//! Deferred service definitions

use crate::{DiResult, ServiceValue};
use serde_json::Value;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// A type the container can build from a list of resolved arguments.
///
/// This is what "register a service by class" means here: the container keeps
/// the arguments and only calls `construct` once the service is requested.
///
/// ```
/// use slimwire_di::{Constructible, DiError, DiResult};
/// use serde_json::Value;
///
/// struct Greeter {
/// 	greeting: String,
/// }
///
/// impl Constructible for Greeter {
/// 	fn construct(arguments: Vec<Value>) -> DiResult<Self> {
/// 		match arguments.into_iter().next() {
/// 			Some(Value::String(greeting)) => Ok(Greeter { greeting }),
/// 			_ => Err(DiError::InvalidArgument("Greeter expects a string".into())),
/// 		}
/// 	}
/// }
/// ```
pub trait Constructible: Any + Send + Sync + Sized {
	fn construct(arguments: Vec<Value>) -> DiResult<Self>;
}

type ConstructFn = Arc<dyn Fn(Vec<Value>) -> DiResult<ServiceValue> + Send + Sync>;

/// Type-erased constructor stored in a [`Definition`].
#[derive(Clone)]
pub struct Constructor {
	type_name: &'static str,
	construct: ConstructFn,
}

impl Constructor {
	/// Constructor for a [`Constructible`] type.
	pub fn of<T: Constructible>() -> Self {
		Self {
			type_name: std::any::type_name::<T>(),
			construct: Arc::new(|arguments| {
				T::construct(arguments).map(|service| Arc::new(service) as ServiceValue)
			}),
		}
	}

	/// Constructor backed by an arbitrary function.
	pub fn from_fn<F>(type_name: &'static str, construct: F) -> Self
	where
		F: Fn(Vec<Value>) -> DiResult<ServiceValue> + Send + Sync + 'static,
	{
		Self {
			type_name,
			construct: Arc::new(construct),
		}
	}

	pub fn type_name(&self) -> &'static str {
		self.type_name
	}

	pub(crate) fn construct(&self, arguments: Vec<Value>) -> DiResult<ServiceValue> {
		(self.construct)(arguments)
	}
}

impl fmt::Debug for Constructor {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Constructor")
			.field("type_name", &self.type_name)
			.finish_non_exhaustive()
	}
}

/// How to build a service: a constructor plus its (still unresolved) arguments.
///
/// Arguments may contain `%name%` parameter references; they are resolved
/// when the service is first requested, not when the definition is created.
#[derive(Debug, Clone)]
pub struct Definition {
	constructor: Constructor,
	arguments: Vec<Value>,
	shared: bool,
}

impl Definition {
	pub fn new(constructor: Constructor) -> Self {
		Self {
			constructor,
			arguments: Vec::new(),
			shared: true,
		}
	}

	/// Appends a constructor argument.
	pub fn add_argument(&mut self, argument: Value) -> &mut Self {
		self.arguments.push(argument);
		self
	}

	/// Replaces all constructor arguments.
	pub fn set_arguments(&mut self, arguments: Vec<Value>) -> &mut Self {
		self.arguments = arguments;
		self
	}

	pub fn arguments(&self) -> &[Value] {
		&self.arguments
	}

	/// Whether the built instance is cached and reused (default `true`).
	pub fn set_shared(&mut self, shared: bool) -> &mut Self {
		self.shared = shared;
		self
	}

	pub fn is_shared(&self) -> bool {
		self.shared
	}

	pub fn type_name(&self) -> &'static str {
		self.constructor.type_name()
	}

	pub fn constructor(&self) -> &Constructor {
		&self.constructor
	}
}
