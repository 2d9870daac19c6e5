use crate::value::float_to_s;
use crate::{Accessor, ControlKind, Value};
use html::{AttributeKey, AttributeValue};
use serde::{Deserialize, Deserializer};
use std::borrow::Cow;
use std::collections::BTreeMap;

/// The options a caller passes to a collection input. Unrecognized keys are kept in `extra` and handed to the builder untouched.
///
/// `label`, `label_html`, `hint`, `placeholder` and `error_html` belong to the wrapping input and are not read when rendering the collection control.
///
/// `prompt`, `include_blank`, `default` and `selected` record whether the key was given at all, so an explicit `null` is `Some(None)`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct InputOptions {
	pub label: Option<Label>,
	pub label_html: HtmlOptions,
	pub hint: Option<String>,
	pub placeholder: Option<String>,
	pub input_html: HtmlOptions,
	pub required: Option<bool>,
	#[serde(rename = "as")]
	pub kind: Option<ControlKind>,
	pub disabled: Option<Disabled>,
	pub error_html: HtmlOptions,
	pub collection: Option<Vec<Value>>,
	#[serde(deserialize_with = "given")]
	pub prompt: Option<Option<Prompt>>,
	pub priority: Option<Vec<Value>>,
	pub value_method: Option<Accessor>,
	pub label_method: Option<Accessor>,
	#[serde(deserialize_with = "given")]
	pub include_blank: Option<Option<bool>>,
	#[serde(deserialize_with = "given")]
	pub default: Option<Option<Value>>,
	#[serde(deserialize_with = "given")]
	pub selected: Option<Option<Value>>,
	#[serde(flatten)]
	pub extra: BTreeMap<String, serde_json::Value>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Label {
	/// `false` hides the label, `true` keeps the default one.
	Show(bool),
	Text(String),
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Prompt {
	/// `true` asks for the translated default prompt.
	Default(bool),
	Text(String),
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Disabled {
	/// Disable the whole control.
	All(bool),
	/// Disable only the choices with these values.
	Values(Vec<Value>),
	/// Disable the choice with this value.
	Value(Value),
}

/// HTML attributes given by the caller, ordered by name.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct HtmlOptions(BTreeMap<String, HtmlValue>);

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum HtmlValue {
	Bool(bool),
	Int(i64),
	Float(f64),
	Text(String),
	/// Nested attributes such as `data: {role: "picker"}`, rendered as `data-role="picker"`.
	Map(BTreeMap<String, HtmlValue>),
}

/// The options the input hands to the builder after post processing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CollectionOptions {
	pub include_blank: Option<bool>,
	pub prompt: Option<String>,
	pub selected: Option<Value>,
	pub disabled: Vec<Value>,
	pub priority: Vec<Value>,
	pub extra: BTreeMap<String, serde_json::Value>,
}

impl InputOptions {
	pub fn new() -> InputOptions {
		InputOptions::default()
	}

	pub fn from_json(options: &str) -> serde_json::Result<InputOptions> {
		serde_json::from_str(options)
	}

	pub fn given_prompt(&self) -> Option<&Prompt> {
		self.prompt.as_ref().and_then(Option::as_ref)
	}

	pub fn collection<I, T>(mut self, items: I) -> InputOptions
	where
		I: IntoIterator<Item = T>,
		T: Into<Value>,
	{
		self.collection = Some(items.into_iter().map(Into::into).collect());
		self
	}

	pub fn label_method(mut self, label_method: impl Into<Accessor>) -> InputOptions {
		self.label_method = Some(label_method.into());
		self
	}

	pub fn value_method(mut self, value_method: impl Into<Accessor>) -> InputOptions {
		self.value_method = Some(value_method.into());
		self
	}

	pub fn prompt(mut self, prompt: Prompt) -> InputOptions {
		self.prompt = Some(Some(prompt));
		self
	}

	pub fn include_blank(mut self, include_blank: bool) -> InputOptions {
		self.include_blank = Some(Some(include_blank));
		self
	}

	pub fn default_value(mut self, default: impl Into<Value>) -> InputOptions {
		self.default = Some(Some(default.into()));
		self
	}

	pub fn selected(mut self, selected: impl Into<Value>) -> InputOptions {
		self.selected = Some(Some(selected.into()));
		self
	}

	pub fn required(mut self, required: bool) -> InputOptions {
		self.required = Some(required);
		self
	}

	pub fn disabled(mut self, disabled: Disabled) -> InputOptions {
		self.disabled = Some(disabled);
		self
	}

	pub fn priority<I, T>(mut self, priority: I) -> InputOptions
	where
		I: IntoIterator<Item = T>,
		T: Into<Value>,
	{
		self.priority = Some(priority.into_iter().map(Into::into).collect());
		self
	}

	pub fn input_html(mut self, input_html: HtmlOptions) -> InputOptions {
		self.input_html = input_html;
		self
	}

	pub fn kind(mut self, kind: ControlKind) -> InputOptions {
		self.kind = Some(kind);
		self
	}

	/// Whether the caller already decided about a blank choice, or asked for a control where one makes no sense.
	pub fn skip_include_blank(&self) -> bool {
		self.prompt.is_some()
			|| self.include_blank.is_some()
			|| self.default.is_some()
			|| self.selected.is_some()
			|| self.input_html.is_truthy("multiple")
	}
}

impl HtmlOptions {
	pub fn new() -> HtmlOptions {
		HtmlOptions::default()
	}

	pub fn with(mut self, name: impl Into<String>, value: impl Into<HtmlValue>) -> HtmlOptions {
		self.insert(name, value);
		self
	}

	pub fn insert(&mut self, name: impl Into<String>, value: impl Into<HtmlValue>) {
		self.0.insert(name.into(), value.into());
	}

	pub fn remove(&mut self, name: &str) -> Option<HtmlValue> {
		self.0.remove(name)
	}

	pub fn get(&self, name: &str) -> Option<&HtmlValue> {
		self.0.get(name)
	}

	/// Present and not `false`.
	pub fn is_truthy(&self, name: &str) -> bool {
		match self.get(name) {
			Some(HtmlValue::Bool(value)) => *value,
			Some(_) => true,
			None => false,
		}
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &HtmlValue)> {
		self.0.iter().map(|(name, value)| (name.as_str(), value))
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Nested maps are flattened into dash separated names, with underscores in their keys dasherized.
	pub fn to_attributes(&self) -> Vec<(AttributeKey, AttributeValue)> {
		let mut attributes = Vec::new();
		for (name, value) in self.iter() {
			match value {
				HtmlValue::Bool(value) => {
					attributes.push((Cow::Owned(name.to_owned()), AttributeValue::from(*value)))
				}
				HtmlValue::Map(entries) => push_nested_attributes(&mut attributes, name, entries),
				value => attributes.push((Cow::Owned(name.to_owned()), value.to_string().into())),
			}
		}
		attributes
	}
}

fn push_nested_attributes(
	attributes: &mut Vec<(AttributeKey, AttributeValue)>,
	prefix: &str,
	entries: &BTreeMap<String, HtmlValue>,
) {
	for (key, value) in entries {
		let name = format!("{}-{}", prefix, key.replace('_', "-"));
		match value {
			HtmlValue::Map(entries) => push_nested_attributes(attributes, &name, entries),
			value => attributes.push((Cow::Owned(name), value.to_string().into())),
		}
	}
}

/// Keeps an explicit `null` distinguishable from a missing key.
fn given<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
	D: Deserializer<'de>,
	T: Deserialize<'de>,
{
	Option::<T>::deserialize(deserializer).map(Some)
}

impl std::fmt::Display for HtmlValue {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			HtmlValue::Bool(value) => write!(f, "{}", value),
			HtmlValue::Int(value) => write!(f, "{}", value),
			HtmlValue::Float(value) => write!(f, "{}", float_to_s(*value)),
			HtmlValue::Text(value) => write!(f, "{}", value),
			HtmlValue::Map(entries) => {
				let entries = entries
					.iter()
					.map(|(key, value)| format!("{}: {}", key, value))
					.collect::<Vec<_>>();
				write!(f, "{{{}}}", entries.join(", "))
			}
		}
	}
}

impl From<bool> for HtmlValue {
	fn from(value: bool) -> HtmlValue {
		HtmlValue::Bool(value)
	}
}

impl From<i32> for HtmlValue {
	fn from(value: i32) -> HtmlValue {
		HtmlValue::Int(value.into())
	}
}

impl From<i64> for HtmlValue {
	fn from(value: i64) -> HtmlValue {
		HtmlValue::Int(value)
	}
}

impl From<f64> for HtmlValue {
	fn from(value: f64) -> HtmlValue {
		HtmlValue::Float(value)
	}
}

impl From<&str> for HtmlValue {
	fn from(value: &str) -> HtmlValue {
		HtmlValue::Text(value.to_owned())
	}
}

impl From<String> for HtmlValue {
	fn from(value: String) -> HtmlValue {
		HtmlValue::Text(value)
	}
}

#[test]
fn test_skip_include_blank() {
	assert!(!InputOptions::new().skip_include_blank());
	assert!(InputOptions::new()
		.prompt(Prompt::Text("Pick one".to_owned()))
		.skip_include_blank());
	assert!(InputOptions::new().include_blank(false).skip_include_blank());
	assert!(InputOptions::new().default_value(true).skip_include_blank());
	assert!(InputOptions::new().selected(1).skip_include_blank());
	let multiple = HtmlOptions::new().with("multiple", true);
	assert!(InputOptions::new().input_html(multiple).skip_include_blank());
	let single = HtmlOptions::new().with("multiple", false);
	assert!(!InputOptions::new().input_html(single).skip_include_blank());
}

#[test]
fn test_input_options_from_json() {
	let options = InputOptions::from_json(
		r#"{
			"as": "radio_buttons",
			"collection": [["Admin", "admin"], ["Guest", "guest"]],
			"label_method": "first",
			"value_method": "name",
			"prompt": true,
			"disabled": ["guest"],
			"input_html": {"class": "roles", "multiple": true, "size": 3},
			"wrapper": "inline"
		}"#,
	)
	.unwrap();
	assert_eq!(options.kind, Some(ControlKind::RadioButtons));
	assert_eq!(options.collection.as_ref().map(Vec::len), Some(2));
	assert_eq!(options.label_method, Some(Accessor::First));
	assert_eq!(options.value_method, Some(Accessor::Method("name".to_owned())));
	assert_eq!(options.given_prompt(), Some(&Prompt::Default(true)));
	assert_eq!(
		options.disabled,
		Some(Disabled::Values(vec![Value::from("guest")]))
	);
	assert_eq!(options.input_html.get("size"), Some(&HtmlValue::Int(3)));
	assert!(options.input_html.is_truthy("multiple"));
	assert_eq!(
		options.extra,
		maplit::btreemap! { "wrapper".to_owned() => serde_json::Value::from("inline") }
	);
	assert!(options.label.is_none());
}

#[test]
fn test_html_options_to_attributes() {
	let attributes = HtmlOptions::new()
		.with("size", 4)
		.with("autofocus", true)
		.with("data-role", "picker")
		.to_attributes();
	let expected: Vec<(AttributeKey, AttributeValue)> = vec![
		(Cow::Borrowed("autofocus"), AttributeValue::Bool(Some(true))),
		(Cow::Borrowed("data-role"), "picker".into()),
		(Cow::Borrowed("size"), "4".into()),
	];
	assert_eq!(attributes, expected);
}

#[test]
fn test_null_options_count_as_given() {
	for key in &["prompt", "include_blank", "default", "selected"] {
		let options = InputOptions::from_json(&format!(r#"{{"{}": null}}"#, key)).unwrap();
		assert!(options.skip_include_blank(), "{} was given", key);
	}
	let options = InputOptions::from_json(r#"{"prompt": null}"#).unwrap();
	assert_eq!(options.prompt, Some(None));
	assert_eq!(options.given_prompt(), None);
	assert_eq!(options.include_blank, None);
}

#[test]
fn test_input_options_from_json_accepts_floats_nested_maps_and_single_disabled_values() {
	let options = InputOptions::from_json(
		r#"{
			"disabled": "admin",
			"input_html": {"step": 0.5, "data": {"role": "picker", "max_items": 2, "remote": true}}
		}"#,
	)
	.unwrap();
	assert_eq!(options.disabled, Some(Disabled::Value(Value::from("admin"))));
	assert_eq!(options.input_html.get("step"), Some(&HtmlValue::Float(0.5)));
	let expected: Vec<(AttributeKey, AttributeValue)> = vec![
		(Cow::Borrowed("data-max-items"), "2".into()),
		(Cow::Borrowed("data-remote"), "true".into()),
		(Cow::Borrowed("data-role"), "picker".into()),
		(Cow::Borrowed("step"), "0.5".into()),
	];
	assert_eq!(options.input_html.to_attributes(), expected);
	let options = InputOptions::from_json(r#"{"disabled": true}"#).unwrap();
	assert_eq!(options.disabled, Some(Disabled::All(true)));
}
