use crate::Value;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// The cache used by inputs that are not given one explicitly.
pub static GLOBAL_I18N_CACHE: Lazy<I18nCache> = Lazy::new(I18nCache::default);

/// Memoizes collections that depend only on the current locale, such as the default boolean collection.
///
/// Entries are keyed by locale and cache name. Two callers racing on a missing entry both compute it, and the first one stored is kept.
#[derive(Debug, Default)]
pub struct I18nCache {
	entries: RwLock<HashMap<(String, &'static str), Arc<[Value]>>>,
}

impl I18nCache {
	pub fn get_or_compute<F>(&self, locale: &str, name: &'static str, compute: F) -> Arc<[Value]>
	where
		F: FnOnce() -> Vec<Value>,
	{
		let key = (locale.to_owned(), name);
		let cached = self
			.entries
			.read()
			.unwrap_or_else(PoisonError::into_inner)
			.get(&key)
			.cloned();
		if let Some(cached) = cached {
			return cached;
		}
		tracing::debug!(locale, name, "computing i18n cache entry");
		let computed: Arc<[Value]> = compute().into();
		let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
		entries.entry(key).or_insert(computed).clone()
	}

	pub fn invalidate(&self) {
		self.entries
			.write()
			.unwrap_or_else(PoisonError::into_inner)
			.clear();
	}

	pub fn invalidate_locale(&self, locale: &str) {
		self.entries
			.write()
			.unwrap_or_else(PoisonError::into_inner)
			.retain(|(entry_locale, _), _| entry_locale != locale);
	}

	pub fn len(&self) -> usize {
		self.entries
			.read()
			.unwrap_or_else(PoisonError::into_inner)
			.len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

#[test]
fn test_get_or_compute_memoizes_per_locale() {
	let cache = I18nCache::default();
	let mut calls = 0;
	let first = cache.get_or_compute("en", "greeting", || {
		calls += 1;
		vec![Value::from("Hello")]
	});
	let second = cache.get_or_compute("en", "greeting", || {
		calls += 1;
		vec![Value::from("Hi")]
	});
	assert_eq!(calls, 1);
	assert!(Arc::ptr_eq(&first, &second));
	let german = cache.get_or_compute("de", "greeting", || vec![Value::from("Hallo")]);
	assert_eq!(&german[..], &[Value::from("Hallo")][..]);
	assert_eq!(cache.len(), 2);
}

#[test]
fn test_invalidate() {
	let cache = I18nCache::default();
	cache.get_or_compute("en", "greeting", || vec![Value::from("Hello")]);
	cache.get_or_compute("de", "greeting", || vec![Value::from("Hallo")]);
	cache.invalidate_locale("en");
	assert_eq!(cache.len(), 1);
	let recomputed = cache.get_or_compute("en", "greeting", || vec![Value::from("Howdy")]);
	assert_eq!(&recomputed[..], &[Value::from("Howdy")][..]);
	cache.invalidate();
	assert!(cache.is_empty());
}
