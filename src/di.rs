//! Service container module.
//!
//! This module provides the builder-style container, deferred definitions
//! and the `%name%` parameter bag.
//!
//! # Examples
//!
//! ```rust
//! # #[cfg(feature = "di")]
//! use slimwire::di::{Container, ContainerBuilder, ContainerExt};
//! ```

#[cfg(feature = "di")]
pub use slimwire_di::*;
