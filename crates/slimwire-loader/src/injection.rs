//! Injection capability

use crate::InjectResult;
use slimwire_di::Container;

/// A pluggable unit that populates a container with services and parameters.
///
/// Closures taking `&mut dyn Container` are injection units too:
///
/// ```
/// use slimwire_di::{Container, ContainerBuilder, ContainerExt};
/// use slimwire_loader::{InjectResult, ServiceInjection};
///
/// let seed_answer = |container: &mut dyn Container| -> InjectResult<()> {
/// 	container.set_service("answer", 42u32);
/// 	Ok(())
/// };
///
/// let mut container = ContainerBuilder::new();
/// seed_answer.inject_services(&mut container).unwrap();
/// assert!(container.has("answer"));
/// ```
pub trait ServiceInjection {
	/// Loads services into `container`.
	fn inject_services(&self, container: &mut dyn Container) -> InjectResult<()>;

	/// Name used in logs.
	fn name(&self) -> &'static str {
		std::any::type_name::<Self>()
	}
}

impl<F> ServiceInjection for F
where
	F: Fn(&mut dyn Container) -> InjectResult<()>,
{
	fn inject_services(&self, container: &mut dyn Container) -> InjectResult<()> {
		self(container)
	}
}
