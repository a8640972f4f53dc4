//! Framework default services
//!
//! [`DefaultServicesInjection`] publishes the framework settings and registers
//! the services produced by a [`ServicesProvider`], by default the
//! [`DefaultServicesProvider`].

pub mod injection;
pub mod provider;
pub mod services;

pub use injection::{DEFAULT_NAMESPACE, DefaultServicesInjection};
pub use provider::{DefaultServicesProvider, ServiceFactory, ServicesProvider};
