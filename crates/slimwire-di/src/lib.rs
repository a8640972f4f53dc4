//! # slimwire DI
//!
//! Builder-style service container for slimwire.
//!
//! ## Features
//!
//! - **Named services**: ready instances or deferred [`Definition`]s built on first use
//! - **Parameter bag**: named JSON values referenced from definitions as `%name%`
//! - **Late resolution**: definition arguments are resolved when the service is
//!   built, so a service sees the parameter values current at that time
//! - **Object safe**: injection code works against `&mut dyn Container`
//!
//! ## Example
//!
//! ```
//! use slimwire_di::{Constructible, Container, ContainerBuilder, ContainerExt, DiResult};
//! use serde_json::{Value, json};
//!
//! struct Banner(String);
//!
//! impl Constructible for Banner {
//! 	fn construct(arguments: Vec<Value>) -> DiResult<Self> {
//! 		Ok(Banner(arguments[0].as_str().unwrap_or_default().to_string()))
//! 	}
//! }
//!
//! let mut container = ContainerBuilder::new();
//! container
//! 	.register_type::<Banner>("banner")
//! 	.add_argument(json!("Welcome to %app.name%"));
//! container.parameter_bag_mut().set("app.name", json!("slimwire"));
//!
//! let banner = container.get_as::<Banner>("banner").unwrap();
//! assert_eq!(banner.0, "Welcome to slimwire");
//! ```

pub mod container;
pub mod definition;
pub mod error;
pub mod parameters;

pub use container::{Container, ContainerBuilder, ContainerExt, ServiceValue};
pub use definition::{Constructible, Constructor, Definition};
pub use error::{DiError, DiResult};
pub use parameters::ParameterBag;
