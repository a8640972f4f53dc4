//! # slimwire configuration
//!
//! Settings for the slimwire container integration.
//!
//! ## Features
//!
//! - **Collection**: the ordered key/value bundle registered as the `settings` service
//! - **Framework defaults**: the built-in settings table and its merge rule
//! - **Layered sources**: defaults, TOML/JSON files and environment variables
//!   merged by priority (environment variables > config files > defaults)
//!
//! ## Example
//!
//! ```rust,no_run
//! use slimwire_conf::SettingsBuilder;
//! use slimwire_conf::sources::{EnvSource, TomlFileSource};
//!
//! let settings = SettingsBuilder::new()
//! 	.add_source(TomlFileSource::new("settings.toml"))
//! 	.add_source(EnvSource::new().with_prefix("SLIM_"))
//! 	.build()
//! 	.unwrap();
//!
//! println!("HTTP version: {:?}", settings.get("httpVersion"));
//! ```

pub mod builder;
pub mod collection;
pub mod defaults;
pub mod sources;

pub use builder::SettingsBuilder;
pub use collection::{Collection, SETTINGS_SERVICE};
pub use defaults::{DEFAULT_SETTINGS, DefaultValue, default_settings, merge_settings};
pub use sources::{ConfigSource, SourceError};
