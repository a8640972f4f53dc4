//! Injection module.
//!
//! This module provides injection units, container resolution and the
//! framework default services.
//!
//! # Examples
//!
//! ```rust
//! # #[cfg(feature = "loader")]
//! use slimwire::loader::{ContainerManager, DefaultServicesInjection, ServiceInjection};
//! ```

#[cfg(feature = "loader")]
pub use slimwire_loader::*;
