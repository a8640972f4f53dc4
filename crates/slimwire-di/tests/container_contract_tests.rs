//! Integration tests for the container contract used by injection units.
//!
//! Everything here goes through `&mut dyn Container`, the way injection units
//! see the container.

use proptest::prelude::*;
use rstest::*;
use serde_json::{Value, json};
use slimwire_di::{
	Constructible, Container, ContainerBuilder, ContainerExt, DiError, DiResult, ParameterBag,
};

#[derive(Debug)]
struct Config(Value);

impl Constructible for Config {
	fn construct(arguments: Vec<Value>) -> DiResult<Self> {
		Ok(Config(arguments.into_iter().next().unwrap_or(Value::Null)))
	}
}

#[fixture]
fn container() -> ContainerBuilder {
	let mut container = ContainerBuilder::new();
	container.parameter_bag_mut().set("app.version", json!("1.1"));
	container.parameter_bag_mut().set("app.chunk", json!(4096));
	container
}

fn register_config(container: &mut dyn Container) {
	container.register_type::<Config>("config").add_argument(json!({
		"version": "%app.version%",
		"chunk": "%app.chunk%",
	}));
}

#[rstest]
fn deferred_reference_map_resolves_to_live_values(mut container: ContainerBuilder) {
	// Arrange
	register_config(&mut container);

	// Act
	container.parameter_bag_mut().set("app.chunk", json!(8192));
	let config = container.get_as::<Config>("config").unwrap();

	// Assert
	assert_eq!(config.0, json!({"version": "1.1", "chunk": 8192}));
}

#[rstest]
fn definition_keeps_reference_tokens(mut container: ContainerBuilder) {
	register_config(&mut container);

	let definition = container.definition("config").unwrap();

	assert_eq!(definition.arguments().len(), 1);
	assert_eq!(
		definition.arguments()[0],
		json!({"version": "%app.version%", "chunk": "%app.chunk%"})
	);
	assert!(definition.type_name().ends_with("Config"));
}

#[rstest]
fn dyn_container_sees_registrations(mut container: ContainerBuilder) {
	// Arrange
	let dynamic: &mut dyn Container = &mut container;

	// Act
	dynamic.set_service("router", "router-instance".to_string());
	register_config(dynamic);

	// Assert
	assert!(dynamic.has("router"));
	assert!(dynamic.has("config"));
	assert_eq!(dynamic.service_ids(), vec!["router", "config"]);
	assert_eq!(*dynamic.get_as::<String>("router").unwrap(), "router-instance");
}

#[rstest]
fn missing_parameter_surfaces_on_get(mut container: ContainerBuilder) {
	container
		.register_type::<Config>("config")
		.add_argument(json!("%app.missing%"));

	let error = container.get("config").unwrap_err();

	assert!(matches!(error, DiError::Construction { .. }));
	assert!(error.to_string().contains("app.missing"));
}

proptest! {
	#[test]
	fn set_if_absent_never_overwrites(
		name in "[a-z]{1,8}(\\.[a-z]{1,8}){0,2}",
		first in any::<i64>(),
		second in any::<i64>(),
	) {
		let mut bag = ParameterBag::new();
		prop_assert!(bag.set_if_absent(name.clone(), json!(first)));
		prop_assert!(!bag.set_if_absent(name.clone(), json!(second)));
		prop_assert_eq!(bag.get(&name).unwrap(), &json!(first));
		prop_assert_eq!(bag.len(), 1);
	}

	#[test]
	fn whole_reference_preserves_type(value in any::<i64>(), flag in any::<bool>()) {
		let mut bag = ParameterBag::new();
		bag.set("n", json!(value));
		bag.set("f", json!(flag));
		prop_assert_eq!(bag.resolve_value(&json!("%n%")).unwrap(), json!(value));
		prop_assert_eq!(bag.resolve_value(&json!("%f%")).unwrap(), json!(flag));
	}
}
