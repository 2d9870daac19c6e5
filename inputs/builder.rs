use crate::{Accessor, CollectionOptions, Error, HtmlOptions, Record, Result, Role, Value};
use html::{html, Node};
use serde::Deserialize;
use simple_form_ui::{Choice, CollectionCheckBoxes, CollectionRadioButtons, CollectionSelect};
use std::sync::Arc;

/// The collection controls an input can render.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlKind {
	Select,
	RadioButtons,
	CheckBoxes,
}

/// Everything a builder needs to render one collection control.
#[derive(Clone, Copy, Debug)]
pub struct CollectionCall<'a> {
	pub attribute_name: &'a str,
	pub collection: &'a [Value],
	pub value_method: Option<&'a Accessor>,
	pub label_method: Option<&'a Accessor>,
	pub options: &'a CollectionOptions,
	pub html_options: &'a HtmlOptions,
}

/// Turns a resolved collection call into markup. There is one operation per [`ControlKind`].
pub trait FormBuilder {
	fn collection_select(&self, call: CollectionCall<'_>) -> Result<Node>;
	fn collection_radio_buttons(&self, call: CollectionCall<'_>) -> Result<Node>;
	fn collection_check_boxes(&self, call: CollectionCall<'_>) -> Result<Node>;
}

impl ControlKind {
	pub fn builder_method(self) -> &'static str {
		match self {
			ControlKind::Select => "collection_select",
			ControlKind::RadioButtons => "collection_radio_buttons",
			ControlKind::CheckBoxes => "collection_check_boxes",
		}
	}

	/// The css class every control of this kind carries.
	pub fn class(self) -> &'static str {
		match self {
			ControlKind::Select => "select",
			ControlKind::RadioButtons => "radio_buttons",
			ControlKind::CheckBoxes => "check_boxes",
		}
	}

	pub fn dispatch(self, builder: &dyn FormBuilder, call: CollectionCall<'_>) -> Result<Node> {
		tracing::debug!(
			method = self.builder_method(),
			attribute = call.attribute_name,
			"building collection input"
		);
		match self {
			ControlKind::Select => builder.collection_select(call),
			ControlKind::RadioButtons => builder.collection_radio_buttons(call),
			ControlKind::CheckBoxes => builder.collection_check_boxes(call),
		}
	}
}

/// Renders collection controls for one form object as HTML, naming fields `object[attribute]`.
#[derive(Clone, Debug)]
pub struct HtmlFormBuilder {
	object_name: String,
	object: Option<Arc<dyn Record>>,
}

impl HtmlFormBuilder {
	pub fn new(object_name: impl Into<String>) -> HtmlFormBuilder {
		HtmlFormBuilder {
			object_name: object_name.into(),
			object: None,
		}
	}

	/// Preselect choices from the current attribute values of `object`.
	pub fn with_object(mut self, object: Arc<dyn Record>) -> HtmlFormBuilder {
		self.object = Some(object);
		self
	}

	pub fn field_name(&self, attribute_name: &str) -> String {
		format!("{}[{}]", self.object_name, attribute_name)
	}

	pub fn field_id(&self, attribute_name: &str) -> String {
		let object_name = self
			.object_name
			.replace("][", "_")
			.replace('[', "_")
			.replace(']', "");
		format!("{}_{}", object_name, attribute_name)
	}

	fn checked_values(&self, call: &CollectionCall<'_>) -> Vec<String> {
		let current = call.options.selected.clone().or_else(|| {
			self.object
				.as_ref()
				.and_then(|object| object.call(call.attribute_name))
		});
		match current {
			Some(Value::Array(items)) => items.iter().map(Value::to_string).collect(),
			Some(value) => vec![value.to_string()],
			None => Vec::new(),
		}
	}

	fn choices(&self, call: &CollectionCall<'_>) -> Result<Vec<Choice>> {
		if call.collection.is_empty() {
			return Ok(Vec::new());
		}
		let label_method = call.label_method.ok_or_else(|| Error::UnresolvedAccessor {
			attribute: call.attribute_name.to_owned(),
			role: Role::Label,
		})?;
		let value_method = call.value_method.ok_or_else(|| Error::UnresolvedAccessor {
			attribute: call.attribute_name.to_owned(),
			role: Role::Value,
		})?;
		let checked = self.checked_values(call);
		let disabled = call
			.options
			.disabled
			.iter()
			.map(Value::to_string)
			.collect::<Vec<_>>();
		call.collection
			.iter()
			.map(|item| -> Result<Choice> {
				let text = label_method.apply(item)?.to_string();
				let value = value_method.apply(item)?.to_string();
				Ok(Choice {
					checked: checked.contains(&value),
					disabled: disabled.contains(&value),
					text,
					value,
				})
			})
			.collect()
	}

	fn class(kind: ControlKind, html_options: &HtmlOptions) -> String {
		match html_options.get("class") {
			Some(class) => format!("{} {}", kind.class(), class),
			None => kind.class().to_owned(),
		}
	}

	fn attributes(html_options: &HtmlOptions) -> simple_form_ui::Attributes {
		let mut html_options = html_options.clone();
		html_options.remove("class");
		html_options.remove("multiple");
		html_options.to_attributes()
	}
}

impl FormBuilder for HtmlFormBuilder {
	fn collection_select(&self, call: CollectionCall<'_>) -> Result<Node> {
		let priority_values = call
			.options
			.priority
			.iter()
			.map(Value::to_string)
			.collect::<Vec<_>>();
		let (mut priority, choices): (Vec<Choice>, Vec<Choice>) = self
			.choices(&call)?
			.into_iter()
			.partition(|choice| priority_values.contains(&choice.value));
		priority.sort_by_key(|choice| {
			priority_values
				.iter()
				.position(|value| *value == choice.value)
		});
		Ok(html! {
			<CollectionSelect
				attributes={HtmlFormBuilder::attributes(call.html_options)}
				choices={choices}
				class={HtmlFormBuilder::class(ControlKind::Select, call.html_options)}
				id={self.field_id(call.attribute_name)}
				include_blank={call.options.include_blank.unwrap_or(false)}
				multiple={call.html_options.is_truthy("multiple")}
				name={self.field_name(call.attribute_name)}
				priority={priority}
				prompt={call.options.prompt.clone()}
			/>
		})
	}

	fn collection_radio_buttons(&self, call: CollectionCall<'_>) -> Result<Node> {
		Ok(html! {
			<CollectionRadioButtons
				attributes={HtmlFormBuilder::attributes(call.html_options)}
				choices={self.choices(&call)?}
				class={HtmlFormBuilder::class(ControlKind::RadioButtons, call.html_options)}
				id={self.field_id(call.attribute_name)}
				name={self.field_name(call.attribute_name)}
			/>
		})
	}

	fn collection_check_boxes(&self, call: CollectionCall<'_>) -> Result<Node> {
		Ok(html! {
			<CollectionCheckBoxes
				attributes={HtmlFormBuilder::attributes(call.html_options)}
				choices={self.choices(&call)?}
				class={HtmlFormBuilder::class(ControlKind::CheckBoxes, call.html_options)}
				id={self.field_id(call.attribute_name)}
				name={self.field_name(call.attribute_name)}
			/>
		})
	}
}

#[test]
fn test_field_names() {
	let builder = HtmlFormBuilder::new("user");
	assert_eq!(builder.field_name("role"), "user[role]");
	assert_eq!(builder.field_id("role"), "user_role");
	let builder = HtmlFormBuilder::new("user[address]");
	assert_eq!(builder.field_id("country"), "user_address_country");
}

#[test]
fn test_choices_apply_accessors() {
	use crate::MapRecord;
	let builder = HtmlFormBuilder::new("user")
		.with_object(Arc::new(MapRecord::new("User").with("role", "guest")));
	let collection = vec![Value::from(("Admin", "admin")), Value::from(("Guest", "guest"))];
	let options = CollectionOptions {
		disabled: vec![Value::from("admin")],
		..CollectionOptions::default()
	};
	let html_options = HtmlOptions::new();
	let call = CollectionCall {
		attribute_name: "role",
		collection: &collection,
		value_method: Some(&Accessor::Last),
		label_method: Some(&Accessor::First),
		options: &options,
		html_options: &html_options,
	};
	let choices = builder.choices(&call).unwrap();
	assert_eq!(
		choices,
		vec![
			Choice {
				text: "Admin".to_owned(),
				value: "admin".to_owned(),
				checked: false,
				disabled: true,
			},
			Choice {
				text: "Guest".to_owned(),
				value: "guest".to_owned(),
				checked: true,
				disabled: false,
			},
		]
	);
}

#[test]
fn test_unresolved_accessor_fails_for_non_empty_collections() {
	let builder = HtmlFormBuilder::new("user");
	let collection = vec![Value::from(1)];
	let options = CollectionOptions::default();
	let html_options = HtmlOptions::new();
	let mut call = CollectionCall {
		attribute_name: "age",
		collection: &collection,
		value_method: Some(&Accessor::ToS),
		label_method: None,
		options: &options,
		html_options: &html_options,
	};
	let error = builder.collection_select(call).err().unwrap();
	assert_eq!(
		error.to_string(),
		"no label method was given or detected for `age`"
	);
	call.collection = &[];
	let html = builder.collection_select(call).unwrap().render_to_string();
	assert_eq!(html, r#"<select class="select" id="user_age" name="user[age]"></select>"#);
}
