use crate::{I18nCache, Translate, GLOBAL_I18N_CACHE};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Settings shared by every input of a form.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
	/// Method names tried, in order, to find the label of a domain object.
	pub collection_label_methods: Vec<String>,
	/// Method names tried, in order, to find the value of a domain object.
	pub collection_value_methods: Vec<String>,
	/// Whether an input is required when neither the options nor the attribute say otherwise.
	pub required_by_default: bool,
}

impl Default for Config {
	fn default() -> Config {
		Config {
			collection_label_methods: ["to_label", "name", "title", "to_s"]
				.iter()
				.map(|name| name.to_string())
				.collect(),
			collection_value_methods: ["id", "to_s"].iter().map(|name| name.to_string()).collect(),
			required_by_default: true,
		}
	}
}

impl Config {
	pub fn from_yaml_str(config: &str) -> Result<Config> {
		serde_yaml::from_str(config).context("failed to parse simple_form config")
	}

	pub fn from_path(config_path: &Path) -> Result<Config> {
		let config = std::fs::read_to_string(config_path)
			.with_context(|| format!("failed to read config file {}", config_path.display()))?;
		Config::from_yaml_str(&config)
			.with_context(|| format!("failed to parse config file {}", config_path.display()))
	}
}

/// Everything an input borrows from its surroundings while it renders.
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
	pub config: &'a Config,
	pub translator: &'a dyn Translate,
	pub cache: &'a I18nCache,
}

impl<'a> RenderContext<'a> {
	pub fn new(config: &'a Config, translator: &'a dyn Translate) -> RenderContext<'a> {
		RenderContext {
			config,
			translator,
			cache: &GLOBAL_I18N_CACHE,
		}
	}

	pub fn with_cache(self, cache: &'a I18nCache) -> RenderContext<'a> {
		RenderContext { cache, ..self }
	}
}

#[test]
fn test_default_config() {
	let config = Config::default();
	assert_eq!(
		config.collection_label_methods,
		vec!["to_label", "name", "title", "to_s"]
	);
	assert_eq!(config.collection_value_methods, vec!["id", "to_s"]);
	assert!(config.required_by_default);
}

#[test]
fn test_config_from_yaml() {
	let config = Config::from_yaml_str(
		"collection_value_methods: [uuid, id]\nrequired_by_default: false\n",
	)
	.unwrap();
	assert_eq!(config.collection_value_methods, vec!["uuid", "id"]);
	assert_eq!(
		config.collection_label_methods,
		Config::default().collection_label_methods
	);
	assert!(!config.required_by_default);
	assert!(Config::from_yaml_str("required_by_default: [").is_err());
}

#[test]
fn test_config_from_missing_path() {
	let error = Config::from_path(Path::new("/nonexistent/simple_form.yml")).unwrap_err();
	assert!(error
		.to_string()
		.starts_with("failed to read config file /nonexistent/simple_form.yml"));
}
