use crate::{Error, Result, Value};
use serde::Deserialize;

/// How a label or value is extracted from each item of a collection.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum Accessor {
	/// The first component of a pair.
	First,
	/// The last component of a pair.
	Last,
	/// The item itself, stringified.
	ToS,
	/// A named method on a domain object.
	Method(String),
}

/// Which of the two accessors a message is about.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
	Label,
	Value,
}

impl Accessor {
	pub fn new(name: &str) -> Accessor {
		match name {
			"first" => Accessor::First,
			"last" => Accessor::Last,
			"to_s" => Accessor::ToS,
			name => Accessor::Method(name.to_owned()),
		}
	}

	pub fn name(&self) -> &str {
		match self {
			Accessor::First => "first",
			Accessor::Last => "last",
			Accessor::ToS => "to_s",
			Accessor::Method(name) => name,
		}
	}

	pub fn apply(&self, item: &Value) -> Result<Value> {
		item.call(self.name())
			.ok_or_else(|| Error::UndefinedAccessor {
				accessor: self.name().to_owned(),
				type_name: item.kind().to_string(),
			})
	}
}

impl From<&str> for Accessor {
	fn from(name: &str) -> Accessor {
		Accessor::new(name)
	}
}

impl From<String> for Accessor {
	fn from(name: String) -> Accessor {
		Accessor::new(&name)
	}
}

impl std::fmt::Display for Accessor {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.name())
	}
}

impl std::fmt::Display for Role {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Role::Label => write!(f, "label"),
			Role::Value => write!(f, "value"),
		}
	}
}

#[test]
fn test_apply() {
	use crate::MapRecord;
	let pair = Value::from(("A", 1));
	assert_eq!(Accessor::First.apply(&pair).unwrap(), Value::from("A"));
	assert_eq!(Accessor::Last.apply(&pair).unwrap(), Value::from(1));
	assert_eq!(Accessor::ToS.apply(&Value::from(3)).unwrap(), Value::from("3"));
	let user = Value::object(MapRecord::new("User").with("id", 9));
	assert_eq!(Accessor::new("id").apply(&user).unwrap(), Value::from(9));
	let error = Accessor::new("name").apply(&user).unwrap_err();
	assert_eq!(error.to_string(), "undefined method `name` for User");
	let error = Accessor::First.apply(&Value::from(3)).unwrap_err();
	assert_eq!(error.to_string(), "undefined method `first` for integer");
}
