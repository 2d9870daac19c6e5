use crate::{
	detect_collection_methods, CollectionCall, CollectionOptions, ControlKind, DetectedMethods,
	Disabled, FormBuilder, HtmlOptions, InputOptions, Prompt, RenderContext, Result, Value,
};
use html::Node;
use once_cell::unsync::OnceCell;
use std::sync::Arc;

/// The cache name of the default boolean collection.
pub const BOOLEAN_COLLECTION: &str = "boolean_collection";

/// The collection used when none is given: `[["Yes", true], ["No", false]]`, with the labels translated through `simple_form.yes` and `simple_form.no`.
pub fn boolean_collection(context: &RenderContext<'_>) -> Arc<[Value]> {
	let translator = context.translator;
	context
		.cache
		.get_or_compute(translator.locale(), BOOLEAN_COLLECTION, || {
			vec![
				Value::from((translator.translate("simple_form.yes", "Yes"), true)),
				Value::from((translator.translate("simple_form.no", "No"), false)),
			]
		})
}

/// An input rendering one attribute as a select, a group of radio buttons or a group of check boxes.
pub struct CollectionInput<'a> {
	attribute_name: String,
	input_type: ControlKind,
	options: InputOptions,
	context: RenderContext<'a>,
	attribute_required: Option<bool>,
	collection: OnceCell<Arc<[Value]>>,
}

impl<'a> CollectionInput<'a> {
	/// The `as` option, when given, overrides `input_type`.
	pub fn new(
		attribute_name: impl Into<String>,
		input_type: ControlKind,
		options: InputOptions,
		context: RenderContext<'a>,
	) -> CollectionInput<'a> {
		CollectionInput {
			attribute_name: attribute_name.into(),
			input_type: options.kind.unwrap_or(input_type),
			options,
			context,
			attribute_required: None,
			collection: OnceCell::new(),
		}
	}

	/// Whether the attribute itself must be present, for example because of a presence validation.
	pub fn with_attribute_required(mut self, required: bool) -> CollectionInput<'a> {
		self.attribute_required = Some(required);
		self
	}

	pub fn attribute_name(&self) -> &str {
		&self.attribute_name
	}

	pub fn input_type(&self) -> ControlKind {
		self.input_type
	}

	pub fn input(&self, builder: &dyn FormBuilder) -> Result<Node> {
		let DetectedMethods { label, value } = self.detect_collection_methods();
		let options = self.input_options();
		let html_options = self.input_html_options();
		let call = CollectionCall {
			attribute_name: &self.attribute_name,
			collection: self.collection(),
			value_method: value.as_ref(),
			label_method: label.as_ref(),
			options: &options,
			html_options: &html_options,
		};
		self.input_type.dispatch(builder, call)
	}

	pub fn input_options(&self) -> CollectionOptions {
		let include_blank = if self.skip_include_blank() {
			self.options.include_blank.flatten()
		} else {
			Some(true)
		};
		let prompt = match self.options.given_prompt() {
			Some(Prompt::Text(prompt)) => Some(prompt.clone()),
			Some(Prompt::Default(true)) => Some(
				self.context
					.translator
					.translate("helpers.select.prompt", "Please select"),
			),
			Some(Prompt::Default(false)) | None => None,
		};
		let disabled = match &self.options.disabled {
			Some(Disabled::Values(values)) => values.clone(),
			Some(Disabled::Value(value)) => vec![value.clone()],
			Some(Disabled::All(_)) | None => Vec::new(),
		};
		CollectionOptions {
			include_blank,
			prompt,
			selected: self
				.options
				.selected
				.clone()
				.flatten()
				.or_else(|| self.options.default.clone().flatten()),
			disabled,
			priority: self.options.priority.clone().unwrap_or_default(),
			extra: self.options.extra.clone(),
		}
	}

	pub fn input_html_options(&self) -> HtmlOptions {
		let mut html_options = self.options.input_html.clone();
		if self.has_required() {
			html_options.insert("required", true);
		}
		if let Some(Disabled::All(true)) = self.options.disabled {
			html_options.insert("disabled", true);
		}
		html_options
	}

	/// The items to render, materialized once per input.
	pub fn collection(&self) -> &[Value] {
		self.collection.get_or_init(|| match &self.options.collection {
			Some(collection) => collection.clone().into(),
			None => boolean_collection(&self.context),
		})
	}

	/// Selects never carry the `required` attribute, other controls follow the usual rules.
	pub fn has_required(&self) -> bool {
		self.input_type != ControlKind::Select && self.base_has_required()
	}

	pub fn detect_collection_methods(&self) -> DetectedMethods {
		detect_collection_methods(
			self.options.label_method.as_ref(),
			self.options.value_method.as_ref(),
			self.collection(),
			self.context.config,
		)
	}

	fn base_has_required(&self) -> bool {
		self.options
			.required
			.or(self.attribute_required)
			.unwrap_or(self.context.config.required_by_default)
	}

	fn skip_include_blank(&self) -> bool {
		self.options.skip_include_blank()
	}
}

#[cfg(test)]
mod test_support {
	use crate::{CollectionCall, FormBuilder, MapRecord, Result, Value};
	use html::Node;
	use std::cell::RefCell;

	pub fn user(id: i64, name: &str) -> Value {
		Value::object(MapRecord::new("User").with("id", id).with("name", name))
	}

	/// Records which operation was called and the labels and values it would render.
	#[derive(Default)]
	pub struct RecordingBuilder {
		pub calls: RefCell<Vec<(&'static str, Vec<(String, String)>)>>,
	}

	impl RecordingBuilder {
		fn record(&self, method: &'static str, call: CollectionCall<'_>) -> Result<Node> {
			let pairs = call
				.collection
				.iter()
				.map(|item| -> Result<(String, String)> {
					let label = call.label_method.map(|m| m.apply(item)).transpose()?;
					let value = call.value_method.map(|m| m.apply(item)).transpose()?;
					Ok((
						label.map(|l| l.to_string()).unwrap_or_default(),
						value.map(|v| v.to_string()).unwrap_or_default(),
					))
				})
				.collect::<Result<Vec<_>>>()?;
			self.calls.borrow_mut().push((method, pairs));
			Ok(Node::Vec(Vec::new()))
		}
	}

	impl FormBuilder for RecordingBuilder {
		fn collection_select(&self, call: CollectionCall<'_>) -> Result<Node> {
			self.record("collection_select", call)
		}
		fn collection_radio_buttons(&self, call: CollectionCall<'_>) -> Result<Node> {
			self.record("collection_radio_buttons", call)
		}
		fn collection_check_boxes(&self, call: CollectionCall<'_>) -> Result<Node> {
			self.record("collection_check_boxes", call)
		}
	}
}

#[test]
fn test_boolean_collection_is_the_default() {
	use crate::{Config, I18nCache, Translations};
	let config = Config::default();
	let translations = Translations::new("en");
	let cache = I18nCache::default();
	let context = RenderContext::new(&config, &translations).with_cache(&cache);
	let expected = vec![Value::from(("Yes", true)), Value::from(("No", false))];
	for _ in 0..3 {
		let input = CollectionInput::new("active", ControlKind::Select, InputOptions::new(), context);
		assert_eq!(input.collection(), &expected[..]);
	}
	assert_eq!(cache.len(), 1);
}

#[test]
fn test_boolean_collection_is_translated_per_locale() {
	use crate::{Config, I18nCache, Translations};
	let config = Config::default();
	let cache = I18nCache::default();
	let english = Translations::new("en");
	let portuguese = Translations::new("pt-BR")
		.with("simple_form.yes", "Sim")
		.with("simple_form.no", "Não");
	let collection = boolean_collection(&RenderContext::new(&config, &portuguese).with_cache(&cache));
	assert_eq!(
		&collection[..],
		&[Value::from(("Sim", true)), Value::from(("Não", false))][..]
	);
	let collection = boolean_collection(&RenderContext::new(&config, &english).with_cache(&cache));
	assert_eq!(
		&collection[..],
		&[Value::from(("Yes", true)), Value::from(("No", false))][..]
	);
}

#[test]
fn test_include_blank_defaults_to_true() {
	use crate::{Config, Translations};
	let config = Config::default();
	let translations = Translations::new("en");
	let context = RenderContext::new(&config, &translations);
	let include_blank = |options: InputOptions| {
		CollectionInput::new("role", ControlKind::Select, options, context)
			.input_options()
			.include_blank
	};
	assert_eq!(include_blank(InputOptions::new()), Some(true));
	assert_eq!(
		include_blank(InputOptions::new().prompt(Prompt::Text("Choose".to_owned()))),
		None
	);
	assert_eq!(include_blank(InputOptions::new().include_blank(false)), Some(false));
	assert_eq!(include_blank(InputOptions::new().default_value("admin")), None);
	assert_eq!(include_blank(InputOptions::new().selected("admin")), None);
	let multiple = HtmlOptions::new().with("multiple", true);
	assert_eq!(include_blank(InputOptions::new().input_html(multiple)), None);
	for key in &["prompt", "include_blank", "default", "selected"] {
		let options = InputOptions::from_json(&format!(r#"{{"{}": null}}"#, key)).unwrap();
		assert_eq!(include_blank(options), None, "{} was given", key);
	}
}

#[test]
fn test_input_html_options() {
	use crate::{Config, HtmlValue, Translations};
	let config = Config::default();
	let translations = Translations::new("en");
	let context = RenderContext::new(&config, &translations);
	let options = InputOptions::from_json(
		r#"{"placeholder": "Pick a role", "disabled": true, "input_html": {"step": 0.5}}"#,
	)
	.unwrap();
	let input = CollectionInput::new("role", ControlKind::RadioButtons, options, context);
	let html_options = input.input_html_options();
	assert!(html_options.get("placeholder").is_none());
	assert_eq!(html_options.get("disabled"), Some(&HtmlValue::Bool(true)));
	assert_eq!(html_options.get("required"), Some(&HtmlValue::Bool(true)));
	assert_eq!(html_options.get("step"), Some(&HtmlValue::Float(0.5)));
	assert!(input.input_options().disabled.is_empty());
	let options = InputOptions::from_json(r#"{"disabled": "admin"}"#).unwrap();
	let input = CollectionInput::new("role", ControlKind::Select, options, context);
	assert_eq!(input.input_options().disabled, vec![Value::from("admin")]);
}

#[test]
fn test_prompt_and_selected_options() {
	use crate::{Config, Translations};
	let config = Config::default();
	let translations = Translations::new("en");
	let context = RenderContext::new(&config, &translations);
	let options = InputOptions::new().prompt(Prompt::Default(true)).default_value(2);
	let input = CollectionInput::new("role", ControlKind::Select, options, context);
	let options = input.input_options();
	assert_eq!(options.prompt.as_deref(), Some("Please select"));
	assert_eq!(options.selected, Some(Value::from(2)));
}

#[test]
fn test_pairs_render_first_as_label_and_last_as_value() {
	use self::test_support::RecordingBuilder;
	use crate::{Config, Translations};
	let config = Config::default();
	let translations = Translations::new("en");
	let context = RenderContext::new(&config, &translations);
	let options = InputOptions::new().collection(vec![("A", 1), ("B", 2)]);
	let input = CollectionInput::new("grade", ControlKind::RadioButtons, options, context);
	let builder = RecordingBuilder::default();
	input.input(&builder).unwrap();
	assert_eq!(
		builder.calls.into_inner(),
		vec![(
			"collection_radio_buttons",
			vec![
				("A".to_owned(), "1".to_owned()),
				("B".to_owned(), "2".to_owned()),
			]
		)]
	);
}

#[test]
fn test_basic_values_render_stringified() {
	use self::test_support::RecordingBuilder;
	use crate::{Accessor, Config, Translations};
	let config = Config::default();
	let translations = Translations::new("en");
	let context = RenderContext::new(&config, &translations);
	let options = InputOptions::new().collection(vec![1, 2, 3]);
	let input = CollectionInput::new("age", ControlKind::CheckBoxes, options, context);
	let methods = input.detect_collection_methods();
	assert_eq!(methods.label, Some(Accessor::ToS));
	assert_eq!(methods.value, Some(Accessor::ToS));
	let builder = RecordingBuilder::default();
	input.input(&builder).unwrap();
	let calls = builder.calls.into_inner();
	assert_eq!(calls[0].0, "collection_check_boxes");
	assert_eq!(calls[0].1[0], ("1".to_owned(), "1".to_owned()));
	assert_eq!(calls[0].1.len(), 3);
}

#[test]
fn test_domain_objects_use_name_and_id() {
	use self::test_support::{user, RecordingBuilder};
	use crate::{Accessor, Config, Translations};
	let config = Config::default();
	let translations = Translations::new("en");
	let context = RenderContext::new(&config, &translations);
	let options = InputOptions::new().collection(vec![user(1, "Carlos"), user(2, "Jose")]);
	let input = CollectionInput::new("author_id", ControlKind::Select, options, context);
	let methods = input.detect_collection_methods();
	assert_eq!(methods.label, Some(Accessor::new("name")));
	assert_eq!(methods.value, Some(Accessor::new("id")));
	let builder = RecordingBuilder::default();
	input.input(&builder).unwrap();
	assert_eq!(
		builder.calls.into_inner()[0].1,
		vec![
			("Carlos".to_owned(), "1".to_owned()),
			("Jose".to_owned(), "2".to_owned()),
		]
	);
}

#[test]
fn test_explicit_value_method_only() {
	use self::test_support::user;
	use crate::{Accessor, Config, Translations};
	let config = Config::default();
	let translations = Translations::new("en");
	let context = RenderContext::new(&config, &translations);
	let options = InputOptions::new()
		.collection(vec![user(1, "Carlos")])
		.value_method("id");
	let input = CollectionInput::new("author_id", ControlKind::Select, options, context);
	let methods = input.detect_collection_methods();
	assert_eq!(methods.value, Some(Accessor::new("id")));
	assert_eq!(methods.label, Some(Accessor::new("name")));
}

#[test]
fn test_select_is_never_required() {
	use crate::{Config, Translations};
	let config = Config::default();
	let translations = Translations::new("en");
	let context = RenderContext::new(&config, &translations);
	let select = CollectionInput::new(
		"role",
		ControlKind::Select,
		InputOptions::new().required(true),
		context,
	)
	.with_attribute_required(true);
	assert!(!select.has_required());
	assert!(select.input_html_options().get("required").is_none());
	let radio = CollectionInput::new(
		"role",
		ControlKind::RadioButtons,
		InputOptions::new().required(true),
		context,
	);
	assert!(radio.has_required());
	let radio = CollectionInput::new("role", ControlKind::RadioButtons, InputOptions::new(), context)
		.with_attribute_required(false);
	assert!(!radio.has_required());
	let check_boxes =
		CollectionInput::new("roles", ControlKind::CheckBoxes, InputOptions::new(), context);
	assert!(check_boxes.has_required());
	let optional = Config {
		required_by_default: false,
		..Config::default()
	};
	let check_boxes = CollectionInput::new(
		"roles",
		ControlKind::CheckBoxes,
		InputOptions::new(),
		RenderContext::new(&optional, &translations),
	);
	assert!(!check_boxes.has_required());
}

#[test]
fn test_as_option_overrides_input_type() {
	use crate::{Config, Translations};
	let config = Config::default();
	let translations = Translations::new("en");
	let context = RenderContext::new(&config, &translations);
	let options = InputOptions::new().kind(ControlKind::CheckBoxes);
	let input = CollectionInput::new("roles", ControlKind::Select, options, context);
	assert_eq!(input.input_type(), ControlKind::CheckBoxes);
}

#[test]
fn test_render_boolean_select() {
	use crate::{Config, HtmlFormBuilder, I18nCache, Translations};
	let config = Config::default();
	let translations = Translations::new("en");
	let cache = I18nCache::default();
	let context = RenderContext::new(&config, &translations).with_cache(&cache);
	let input = CollectionInput::new("active", ControlKind::Select, InputOptions::new(), context);
	let html = input
		.input(&HtmlFormBuilder::new("user"))
		.unwrap()
		.render_to_string();
	insta::assert_snapshot!(html, @r###"<select class="select" id="user_active" name="user[active]"><option value=""></option><option value="true">Yes</option><option value="false">No</option></select>"###);
}

#[test]
fn test_render_radio_buttons_for_domain_objects() {
	use self::test_support::user;
	use crate::{Config, HtmlFormBuilder, MapRecord, Translations};
	let config = Config::default();
	let translations = Translations::new("en");
	let context = RenderContext::new(&config, &translations);
	let options = InputOptions::new()
		.collection(vec![user(1, "Carlos"), user(2, "Jose")])
		.input_html(HtmlOptions::new().with("class", "inline"));
	let input = CollectionInput::new("author_id", ControlKind::RadioButtons, options, context);
	let post = MapRecord::new("Post").with("author_id", 2);
	let builder = HtmlFormBuilder::new("post").with_object(Arc::new(post));
	let html = input.input(&builder).unwrap().render_to_string();
	insta::assert_snapshot!(html, @r###"<span class="radio"><input class="radio_buttons inline" id="post_author_id_1" name="post[author_id]" type="radio" value="1" required /><label class="collection_radio_buttons" for="post_author_id_1">Carlos</label></span><span class="radio"><input checked class="radio_buttons inline" id="post_author_id_2" name="post[author_id]" type="radio" value="2" required /><label class="collection_radio_buttons" for="post_author_id_2">Jose</label></span>"###);
}

#[test]
fn test_render_check_boxes_from_json_options() {
	use crate::{Config, HtmlFormBuilder, Translations};
	let config = Config::default();
	let translations = Translations::new("en");
	let context = RenderContext::new(&config, &translations);
	let options = InputOptions::from_json(
		r#"{
			"collection": [{"id": 1, "title": "Ruby"}, {"id": 2, "title": "Rust"}],
			"selected": [2],
			"disabled": [1],
			"required": false
		}"#,
	)
	.unwrap();
	let input = CollectionInput::new("language_ids", ControlKind::CheckBoxes, options, context);
	let html = input
		.input(&HtmlFormBuilder::new("user"))
		.unwrap()
		.render_to_string();
	insta::assert_snapshot!(html, @r###"<input name="user[language_ids][]" type="hidden" value="" /><span class="checkbox"><input class="check_boxes" disabled id="user_language_ids_1" name="user[language_ids][]" type="checkbox" value="1" /><label class="collection_check_boxes" for="user_language_ids_1">Ruby</label></span><span class="checkbox"><input checked class="check_boxes" id="user_language_ids_2" name="user[language_ids][]" type="checkbox" value="2" /><label class="collection_check_boxes" for="user_language_ids_2">Rust</label></span>"###);
}

#[test]
fn test_render_select_with_priority() {
	use crate::{Config, HtmlFormBuilder, Translations};
	let config = Config::default();
	let translations = Translations::new("en");
	let context = RenderContext::new(&config, &translations);
	let options = InputOptions::new()
		.collection(vec!["Brazil", "Germany", "Portugal"])
		.priority(vec!["Portugal", "Brazil"])
		.selected("Germany");
	let input = CollectionInput::new("country", ControlKind::Select, options, context);
	let html = input
		.input(&HtmlFormBuilder::new("user"))
		.unwrap()
		.render_to_string();
	insta::assert_snapshot!(html, @r###"<select class="select" id="user_country" name="user[country]"><option value="Portugal">Portugal</option><option value="Brazil">Brazil</option><option value="" disabled>-------------</option><option selected value="Germany">Germany</option></select>"###);
}

#[test]
fn test_render_fails_when_no_accessor_is_found() {
	use self::test_support::user;
	use crate::{Config, HtmlFormBuilder, Translations};
	let config = Config {
		collection_label_methods: vec!["title".to_owned()],
		..Config::default()
	};
	let translations = Translations::new("en");
	let context = RenderContext::new(&config, &translations);
	let options = InputOptions::new().collection(vec![user(1, "Carlos")]);
	let input = CollectionInput::new("author_id", ControlKind::Select, options, context);
	let error = input.input(&HtmlFormBuilder::new("post")).err().unwrap();
	assert_eq!(
		error.to_string(),
		"no label method was given or detected for `author_id`"
	);
}
