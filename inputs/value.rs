use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;
use std::sync::Arc;

/// An item of a collection, or a value produced by calling an accessor on one.
#[derive(Clone, Debug)]
pub enum Value {
	Nil,
	Bool(bool),
	Int(i64),
	Float(f64),
	Str(String),
	Symbol(String),
	Array(Vec<Value>),
	Object(Arc<dyn Record>),
}

/// The kind of a [`Value`]. Objects are distinguished by their type name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
	Nil,
	Bool,
	Int,
	Float,
	Str,
	Symbol,
	Array,
	Object(&'static str),
}

/// A domain object whose methods can be probed by name.
///
/// Implementations answer only the methods they know and return `None` for everything else, which is how the input finds out whether an object responds to a candidate label or value method.
pub trait Record: std::fmt::Debug + Send + Sync {
	fn type_name(&self) -> &'static str;

	fn call(&self, method: &str) -> Option<Value>;

	fn responds_to(&self, method: &str) -> bool {
		self.call(method).is_some()
	}
}

/// A record backed by a map of field names to values. JSON objects deserialize to this.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MapRecord {
	type_name: &'static str,
	fields: BTreeMap<String, Value>,
}

impl MapRecord {
	pub fn new(type_name: &'static str) -> MapRecord {
		MapRecord {
			type_name,
			fields: BTreeMap::new(),
		}
	}

	pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> MapRecord {
		self.fields.insert(field.into(), value.into());
		self
	}
}

impl Record for MapRecord {
	fn type_name(&self) -> &'static str {
		self.type_name
	}

	fn call(&self, method: &str) -> Option<Value> {
		self.fields.get(method).cloned()
	}
}

impl Value {
	pub fn object(record: impl Record + 'static) -> Value {
		Value::Object(Arc::new(record))
	}

	pub fn kind(&self) -> Kind {
		match self {
			Value::Nil => Kind::Nil,
			Value::Bool(_) => Kind::Bool,
			Value::Int(_) => Kind::Int,
			Value::Float(_) => Kind::Float,
			Value::Str(_) => Kind::Str,
			Value::Symbol(_) => Kind::Symbol,
			Value::Array(_) => Kind::Array,
			Value::Object(record) => Kind::Object(record.type_name()),
		}
	}

	pub fn is_nil(&self) -> bool {
		matches!(self, Value::Nil)
	}

	/// Whether calling `method` on this value would succeed. Every value answers `to_s`, arrays answer `first` and `last`, and objects answer whatever their [`Record`] implementation does.
	pub fn responds_to(&self, method: &str) -> bool {
		match (self, method) {
			(_, "to_s") => true,
			(Value::Array(_), "first") | (Value::Array(_), "last") => true,
			(Value::Object(record), method) => record.responds_to(method),
			_ => false,
		}
	}

	pub fn call(&self, method: &str) -> Option<Value> {
		match (self, method) {
			(Value::Object(record), method) if record.responds_to(method) => record.call(method),
			(_, "to_s") => Some(Value::Str(self.to_string())),
			(Value::Array(items), "first") => Some(items.first().cloned().unwrap_or(Value::Nil)),
			(Value::Array(items), "last") => Some(items.last().cloned().unwrap_or(Value::Nil)),
			_ => None,
		}
	}

	/// The debugging representation used when an array is stringified.
	pub fn inspect(&self) -> String {
		match self {
			Value::Nil => "nil".to_owned(),
			Value::Str(value) => format!("{:?}", value),
			Value::Symbol(value) => format!(":{}", value),
			value => value.to_string(),
		}
	}
}

impl std::fmt::Display for Value {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Value::Nil => Ok(()),
			Value::Bool(value) => write!(f, "{}", value),
			Value::Int(value) => write!(f, "{}", value),
			Value::Float(value) => write!(f, "{}", float_to_s(*value)),
			Value::Str(value) | Value::Symbol(value) => write!(f, "{}", value),
			Value::Array(items) => {
				let items = items.iter().map(Value::inspect).collect::<Vec<_>>();
				write!(f, "[{}]", items.join(", "))
			}
			Value::Object(record) => match record.call("to_s") {
				Some(value) => write!(f, "{}", value),
				None => write!(f, "#<{}>", record.type_name()),
			},
		}
	}
}

/// Shortest round-trip digits, in fixed notation while the decimal exponent stays within -4..16 and as `1.5e+20` outside it. A fractional part is always written.
pub(crate) fn float_to_s(value: f64) -> String {
	if value.is_nan() {
		return "NaN".to_owned();
	}
	if value.is_infinite() {
		let infinity = if value > 0.0 { "Infinity" } else { "-Infinity" };
		return infinity.to_owned();
	}
	if value == 0.0 {
		let zero = if value.is_sign_negative() { "-0.0" } else { "0.0" };
		return zero.to_owned();
	}
	let scientific = format!("{:e}", value);
	let (mantissa, exponent) = match scientific.split_once('e') {
		Some((mantissa, exponent)) => (mantissa, exponent.parse::<i32>().unwrap_or(0)),
		None => (scientific.as_str(), 0),
	};
	let decimal_point = exponent + 1;
	if decimal_point > -4 && decimal_point <= 16 {
		let fixed = value.to_string();
		if fixed.contains('.') {
			fixed
		} else {
			format!("{}.0", fixed)
		}
	} else if mantissa.contains('.') {
		format!("{}e{:+03}", mantissa, exponent)
	} else {
		format!("{}.0e{:+03}", mantissa, exponent)
	}
}

impl std::fmt::Display for Kind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let name = match self {
			Kind::Nil => "nil",
			Kind::Bool => "boolean",
			Kind::Int => "integer",
			Kind::Float => "float",
			Kind::Str => "string",
			Kind::Symbol => "symbol",
			Kind::Array => "array",
			Kind::Object(type_name) => *type_name,
		};
		write!(f, "{}", name)
	}
}

impl PartialEq for Value {
	fn eq(&self, other: &Value) -> bool {
		match (self, other) {
			(Value::Nil, Value::Nil) => true,
			(Value::Bool(a), Value::Bool(b)) => a == b,
			(Value::Int(a), Value::Int(b)) => a == b,
			(Value::Float(a), Value::Float(b)) => a == b,
			(Value::Str(a), Value::Str(b)) => a == b,
			(Value::Symbol(a), Value::Symbol(b)) => a == b,
			(Value::Array(a), Value::Array(b)) => a == b,
			(Value::Object(a), Value::Object(b)) => {
				Arc::as_ptr(a) as *const () == Arc::as_ptr(b) as *const ()
			}
			_ => false,
		}
	}
}

impl From<bool> for Value {
	fn from(value: bool) -> Value {
		Value::Bool(value)
	}
}

impl From<i32> for Value {
	fn from(value: i32) -> Value {
		Value::Int(value.into())
	}
}

impl From<i64> for Value {
	fn from(value: i64) -> Value {
		Value::Int(value)
	}
}

impl From<f64> for Value {
	fn from(value: f64) -> Value {
		Value::Float(value)
	}
}

impl From<&str> for Value {
	fn from(value: &str) -> Value {
		Value::Str(value.to_owned())
	}
}

impl From<String> for Value {
	fn from(value: String) -> Value {
		Value::Str(value)
	}
}

impl<T> From<Option<T>> for Value
where
	T: Into<Value>,
{
	fn from(value: Option<T>) -> Value {
		value.map(Into::into).unwrap_or(Value::Nil)
	}
}

impl<T> From<Vec<T>> for Value
where
	T: Into<Value>,
{
	fn from(value: Vec<T>) -> Value {
		Value::Array(value.into_iter().map(Into::into).collect())
	}
}

impl<A, B> From<(A, B)> for Value
where
	A: Into<Value>,
	B: Into<Value>,
{
	fn from((a, b): (A, B)) -> Value {
		Value::Array(vec![a.into(), b.into()])
	}
}

impl From<serde_json::Value> for Value {
	fn from(value: serde_json::Value) -> Value {
		match value {
			serde_json::Value::Null => Value::Nil,
			serde_json::Value::Bool(value) => Value::Bool(value),
			serde_json::Value::Number(number) => match number.as_i64() {
				Some(value) => Value::Int(value),
				None => Value::Float(number.as_f64().unwrap_or(f64::NAN)),
			},
			serde_json::Value::String(value) => Value::Str(value),
			serde_json::Value::Array(items) => {
				Value::Array(items.into_iter().map(Value::from).collect())
			}
			serde_json::Value::Object(fields) => {
				let record = fields
					.into_iter()
					.fold(MapRecord::new("Record"), |record, (field, value)| {
						record.with(field, Value::from(value))
					});
				Value::object(record)
			}
		}
	}
}

impl<'de> Deserialize<'de> for Value {
	fn deserialize<D>(deserializer: D) -> Result<Value, D::Error>
	where
		D: Deserializer<'de>,
	{
		serde_json::Value::deserialize(deserializer).map(Value::from)
	}
}

#[test]
fn test_to_s() {
	assert_eq!(Value::Nil.to_string(), "");
	assert_eq!(Value::from(1).to_string(), "1");
	assert_eq!(Value::from(2.0).to_string(), "2.0");
	assert_eq!(Value::from(2.5).to_string(), "2.5");
	assert_eq!(Value::Symbol("admin".to_owned()).to_string(), "admin");
	assert_eq!(Value::from(("A", 1)).to_string(), r#"["A", 1]"#);
	assert_eq!(Value::object(MapRecord::new("User")).to_string(), "#<User>");
	let user = MapRecord::new("User").with("to_s", "Jose");
	assert_eq!(Value::object(user).to_string(), "Jose");
}

#[test]
fn test_float_to_s() {
	assert_eq!(Value::from(1e20).to_string(), "1.0e+20");
	assert_eq!(Value::from(1.5e20).to_string(), "1.5e+20");
	assert_eq!(Value::from(1e16).to_string(), "1.0e+16");
	assert_eq!(Value::from(1e15).to_string(), "1000000000000000.0");
	assert_eq!(Value::from(0.0001).to_string(), "0.0001");
	assert_eq!(Value::from(0.00001).to_string(), "1.0e-05");
	assert_eq!(Value::from(-2.5e-7).to_string(), "-2.5e-07");
	assert_eq!(Value::from(0.0).to_string(), "0.0");
	assert_eq!(Value::from(f64::INFINITY).to_string(), "Infinity");
}

#[test]
fn test_responds_to() {
	let user = Value::object(MapRecord::new("User").with("name", "Carlos").with("id", 7));
	assert!(user.responds_to("name"));
	assert!(user.responds_to("to_s"));
	assert!(!user.responds_to("title"));
	assert!(Value::from(("A", 1)).responds_to("first"));
	assert!(!Value::from("A").responds_to("first"));
	assert_eq!(user.call("id"), Some(Value::Int(7)));
	assert_eq!(Value::from(("A", 1)).call("last"), Some(Value::Int(1)));
	assert_eq!(Value::from(5).call("name"), None);
}

#[test]
fn test_from_json() {
	let value: Value = serde_json::from_str(r#"[["A", 1], 2.5, null, {"id": 3, "name": "C"}]"#).unwrap();
	let items = match value {
		Value::Array(items) => items,
		value => panic!("expected an array, got {:?}", value),
	};
	assert_eq!(items[0], Value::from(("A", 1)));
	assert_eq!(items[1], Value::Float(2.5));
	assert_eq!(items[2], Value::Nil);
	assert_eq!(items[3].kind(), Kind::Object("Record"));
	assert_eq!(items[3].call("name"), Some(Value::from("C")));
}
