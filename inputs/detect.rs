use crate::{Accessor, Config, Kind, Value};
use itertools::Itertools;

/// The accessors an input will pass to its builder. Either may be missing when nothing in the collection answers a candidate method.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DetectedMethods {
	pub label: Option<Accessor>,
	pub value: Option<Accessor>,
}

/// Resolve the label and value accessors for `collection`. Explicit accessors always win, and each missing one is filled in from [`detect_common_display_methods`] independently of the other.
pub fn detect_collection_methods(
	label: Option<&Accessor>,
	value: Option<&Accessor>,
	collection: &[Value],
	config: &Config,
) -> DetectedMethods {
	let mut label = label.cloned();
	let mut value = value.cloned();
	if label.is_none() || value.is_none() {
		let common = detect_common_display_methods(collection, config);
		label = label.or(common.label);
		value = value.or(common.value);
	}
	tracing::debug!(label = ?label, value = ?value, "detected collection methods");
	DetectedMethods { label, value }
}

/// Guess the accessors from the kinds of the items.
///
/// Pairs are labeled by their first component and valued by their last. Basic values are stringified for both. Domain objects are sampled and probed with the candidate lists from `config`, first match wins.
pub fn detect_common_display_methods(collection: &[Value], config: &Config) -> DetectedMethods {
	let kinds = detect_collection_kinds(collection);
	if kinds.contains(&Kind::Array) {
		DetectedMethods {
			label: Some(Accessor::First),
			value: Some(Accessor::Last),
		}
	} else if includes_basic_kinds(&kinds) {
		DetectedMethods {
			label: Some(Accessor::ToS),
			value: Some(Accessor::ToS),
		}
	} else {
		let sample = collection
			.first()
			.filter(|item| !item.is_nil())
			.or_else(|| collection.last());
		match sample {
			Some(sample) => DetectedMethods {
				label: first_responding(sample, &config.collection_label_methods),
				value: first_responding(sample, &config.collection_value_methods),
			},
			None => DetectedMethods::default(),
		}
	}
}

/// The distinct kinds of the items, in order of first appearance.
pub fn detect_collection_kinds(collection: &[Value]) -> Vec<Kind> {
	collection.iter().map(Value::kind).unique().collect()
}

fn includes_basic_kinds(kinds: &[Kind]) -> bool {
	kinds.iter().any(|kind| match kind {
		Kind::Str | Kind::Int | Kind::Float | Kind::Bool | Kind::Nil | Kind::Symbol => true,
		Kind::Array | Kind::Object(_) => false,
	})
}

fn first_responding(sample: &Value, candidates: &[String]) -> Option<Accessor> {
	candidates
		.iter()
		.find(|candidate| sample.responds_to(candidate))
		.map(|candidate| Accessor::new(candidate))
}

#[cfg(test)]
fn user(id: i64, name: &str) -> Value {
	Value::object(crate::MapRecord::new("User").with("id", id).with("name", name))
}

#[test]
fn test_pairs_use_first_and_last() {
	let collection = vec![Value::from(("A", 1)), Value::from(("B", 2))];
	let methods = detect_collection_methods(None, None, &collection, &Config::default());
	assert_eq!(methods.label, Some(Accessor::First));
	assert_eq!(methods.value, Some(Accessor::Last));
}

#[test]
fn test_any_pair_wins_over_basic_values() {
	let collection = vec![Value::from("loose"), Value::from(("A", 1))];
	let methods = detect_common_display_methods(&collection, &Config::default());
	assert_eq!(methods.label, Some(Accessor::First));
	assert_eq!(methods.value, Some(Accessor::Last));
}

#[test]
fn test_basic_values_are_stringified() {
	let collection = vec![Value::from(1), Value::from(2), Value::from(3)];
	let methods = detect_collection_methods(None, None, &collection, &Config::default());
	assert_eq!(methods.label, Some(Accessor::ToS));
	assert_eq!(methods.value, Some(Accessor::ToS));
	let collection = vec![user(1, "Carlos"), Value::Symbol("guest".to_owned())];
	let methods = detect_common_display_methods(&collection, &Config::default());
	assert_eq!(methods.label, Some(Accessor::ToS));
}

#[test]
fn test_objects_are_probed_with_candidates() {
	let collection = vec![user(1, "Carlos"), user(2, "Jose")];
	let methods = detect_collection_methods(None, None, &collection, &Config::default());
	assert_eq!(methods.label, Some(Accessor::Method("name".to_owned())));
	assert_eq!(methods.value, Some(Accessor::Method("id".to_owned())));
}

#[test]
fn test_explicit_value_method_keeps_label_detection() {
	let collection = vec![user(1, "Carlos")];
	let value_method = Accessor::new("id");
	let methods = detect_collection_methods(None, Some(&value_method), &collection, &Config::default());
	assert_eq!(methods.value, Some(Accessor::Method("id".to_owned())));
	assert_eq!(methods.label, Some(Accessor::Method("name".to_owned())));
	let label_method = Accessor::new("title");
	let methods = detect_collection_methods(Some(&label_method), None, &collection, &Config::default());
	assert_eq!(methods.label, Some(Accessor::Method("title".to_owned())));
	assert_eq!(methods.value, Some(Accessor::Method("id".to_owned())));
}

#[test]
fn test_explicit_methods_skip_detection() {
	let label_method = Accessor::new("last");
	let value_method = Accessor::new("first");
	let collection = vec![Value::from(1)];
	let methods = detect_collection_methods(
		Some(&label_method),
		Some(&value_method),
		&collection,
		&Config::default(),
	);
	assert_eq!(methods.label, Some(Accessor::Last));
	assert_eq!(methods.value, Some(Accessor::First));
}

#[test]
fn test_unanswered_candidates_stay_unresolved() {
	let config = Config {
		collection_label_methods: vec!["title".to_owned()],
		collection_value_methods: vec!["uuid".to_owned()],
		..Config::default()
	};
	let collection = vec![user(1, "Carlos")];
	assert_eq!(
		detect_collection_methods(None, None, &collection, &config),
		DetectedMethods::default()
	);
}

#[test]
fn test_empty_collection_resolves_nothing() {
	assert_eq!(
		detect_collection_methods(None, None, &[], &Config::default()),
		DetectedMethods::default()
	);
}

#[test]
fn test_detect_collection_kinds() {
	let collection = vec![
		Value::from(1),
		Value::from("a"),
		Value::from(2),
		user(1, "Carlos"),
		user(2, "Jose"),
	];
	assert_eq!(
		detect_collection_kinds(&collection),
		vec![Kind::Int, Kind::Str, Kind::Object("User")]
	);
}
