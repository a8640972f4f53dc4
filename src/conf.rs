//! Settings module.
//!
//! This module provides the settings collection, the framework defaults
//! and layered configuration sources.
//!
//! # Examples
//!
//! ```rust,no_run
//! # #[cfg(feature = "conf")]
//! use slimwire::conf::sources::{EnvSource, TomlFileSource};
//! # #[cfg(feature = "conf")]
//! use slimwire::conf::{Collection, SettingsBuilder};
//! ```

#[cfg(feature = "conf")]
pub use slimwire_conf::*;
