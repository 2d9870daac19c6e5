use html::{AttributeKey, AttributeValue};

/// One entry of a collection control, already reduced to the text shown and the value submitted.
#[derive(Clone, Debug, PartialEq)]
pub struct Choice {
	pub text: String,
	pub value: String,
	pub checked: bool,
	pub disabled: bool,
}

impl Choice {
	pub fn new(text: impl Into<String>, value: impl Into<String>) -> Choice {
		Choice {
			text: text.into(),
			value: value.into(),
			checked: false,
			disabled: false,
		}
	}

	pub fn checked(mut self, checked: bool) -> Choice {
		self.checked = checked;
		self
	}
}

/// Extra attributes copied onto the control element, in order.
pub type Attributes = Vec<(AttributeKey, AttributeValue)>;

/// Build the id of a single radio button or check box from the control id and the choice value.
pub fn choice_id(base: &str, value: &str) -> String {
	let value = value
		.chars()
		.map(|c| if c.is_whitespace() { '_' } else { c })
		.filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-')
		.collect::<String>()
		.to_lowercase();
	format!("{}_{}", base, value)
}

#[test]
fn test_choice_id() {
	assert_eq!(choice_id("user_active", "true"), "user_active_true");
	assert_eq!(choice_id("user_role", "Site Admin!"), "user_role_site_admin");
	assert_eq!(choice_id("user_tags", ""), "user_tags_");
}
