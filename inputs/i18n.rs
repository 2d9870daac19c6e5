use anyhow::{format_err, Context, Result};
use std::collections::HashMap;

/// Looks up translated strings by dotted key for one locale.
pub trait Translate: Send + Sync {
	fn locale(&self) -> &str;

	fn lookup(&self, key: &str) -> Option<String>;

	fn translate(&self, key: &str, default: &str) -> String {
		self.lookup(key).unwrap_or_else(|| default.to_owned())
	}
}

/// An in memory table of translations for a single locale.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Translations {
	locale: String,
	entries: HashMap<String, String>,
}

impl Translations {
	pub fn new(locale: impl Into<String>) -> Translations {
		Translations {
			locale: locale.into(),
			entries: HashMap::new(),
		}
	}

	pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Translations {
		self.entries.insert(key.into(), value.into());
		self
	}

	/// Load the `locale` section of a nested locale file such as
	///
	/// ```yaml
	/// pt-BR:
	///   simple_form:
	///     "yes": Sim
	///     "no": Não
	/// ```
	///
	/// Nested keys are joined with dots, so the example yields `simple_form.yes` and `simple_form.no`.
	pub fn from_yaml_str(locale: &str, yaml: &str) -> Result<Translations> {
		let document: serde_yaml::Value =
			serde_yaml::from_str(yaml).context("failed to parse locale file")?;
		let section = document
			.get(locale)
			.ok_or_else(|| format_err!("no translations for locale {}", locale))?;
		let mut translations = Translations::new(locale);
		flatten("", section, &mut translations.entries);
		Ok(translations)
	}
}

fn flatten(prefix: &str, value: &serde_yaml::Value, entries: &mut HashMap<String, String>) {
	match value {
		serde_yaml::Value::Mapping(mapping) => {
			for (key, value) in mapping.iter() {
				let key = match scalar_to_string(key) {
					Some(key) => key,
					None => continue,
				};
				let key = if prefix.is_empty() {
					key
				} else {
					format!("{}.{}", prefix, key)
				};
				flatten(&key, value, entries);
			}
		}
		value => {
			if let Some(text) = scalar_to_string(value) {
				entries.insert(prefix.to_owned(), text);
			}
		}
	}
}

// Unquoted `yes` and `no` may come back as booleans.
fn scalar_to_string(value: &serde_yaml::Value) -> Option<String> {
	match value {
		serde_yaml::Value::String(value) => Some(value.clone()),
		serde_yaml::Value::Bool(true) => Some("yes".to_owned()),
		serde_yaml::Value::Bool(false) => Some("no".to_owned()),
		serde_yaml::Value::Number(value) => Some(value.to_string()),
		_ => None,
	}
}

impl Translate for Translations {
	fn locale(&self) -> &str {
		&self.locale
	}

	fn lookup(&self, key: &str) -> Option<String> {
		self.entries.get(key).cloned()
	}
}

#[test]
fn test_translate_falls_back_to_default() {
	let translations = Translations::new("en").with("simple_form.yes", "Yep");
	assert_eq!(translations.translate("simple_form.yes", "Yes"), "Yep");
	assert_eq!(translations.translate("simple_form.no", "No"), "No");
}

#[test]
fn test_translations_from_yaml() {
	let yaml = "
pt-BR:
  simple_form:
    \"yes\": Sim
    \"no\": Não
  helpers:
    select:
      prompt: Selecione
";
	let translations = Translations::from_yaml_str("pt-BR", yaml).unwrap();
	assert_eq!(translations.locale(), "pt-BR");
	assert_eq!(translations.lookup("simple_form.yes").as_deref(), Some("Sim"));
	assert_eq!(translations.lookup("simple_form.no").as_deref(), Some("Não"));
	assert_eq!(
		translations.lookup("helpers.select.prompt").as_deref(),
		Some("Selecione")
	);
	assert!(Translations::from_yaml_str("de", yaml).is_err());
}
