use std::{
    collections::{HashMap, HashSet},
    sync::{Arc, Mutex},
};

/// Keyword annotations describing the end user, shared across every ad unit
/// that holds a clone of the handle. Create one per process (or per test)
/// and pass clones into each [`crate::AdUnit`].
#[derive(Clone, Default)]
pub struct UserKeywords {
    values: Arc<Mutex<HashSet<String>>>,
}

impl UserKeywords {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, value: &str) {
        self.lock().insert(value.to_string());
    }

    pub fn add_set(&self, values: &HashSet<String>) {
        self.lock().extend(values.iter().cloned());
    }

    /// No-op if the value is absent.
    pub fn remove(&self, value: &str) {
        self.lock().remove(value);
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Point-in-time snapshot; later mutations are not reflected.
    pub fn snapshot(&self) -> HashSet<String> {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashSet<String>> {
        self.values.lock().expect("user keywords lock poisoned")
    }
}

/// Targeting data scoped to one ad unit, plus the shared user-keyword
/// handle. Context data and context keywords are merged into every bid
/// request the owning unit sends.
pub struct Targeting {
    user_keywords: UserKeywords,
    context_data: HashMap<String, HashSet<String>>,
    context_keywords: HashSet<String>,
}

impl Targeting {
    pub fn new(user_keywords: UserKeywords) -> Self {
        Targeting {
            user_keywords,
            context_data: HashMap::new(),
            context_keywords: HashSet::new(),
        }
    }

    // The `key` parameter on the user-keyword operations is legacy: it is
    // accepted for API compatibility but values are deduplicated by value
    // alone.
    pub fn add_user_keyword(&self, _key: &str, value: &str) {
        self.user_keywords.add(value);
    }

    pub fn add_user_keywords(&self, _key: &str, values: &HashSet<String>) {
        self.user_keywords.add_set(values);
    }

    pub fn remove_user_keyword(&self, value: &str) {
        self.user_keywords.remove(value);
    }

    pub fn clear_user_keywords(&self) {
        self.user_keywords.clear();
    }

    pub fn user_keywords_set(&self) -> HashSet<String> {
        self.user_keywords.snapshot()
    }

    pub fn add_context_data(&mut self, key: &str, value: &str) {
        self.context_data
            .entry(key.to_string())
            .or_default()
            .insert(value.to_string());
    }

    /// Replaces the entire value set for `key`.
    pub fn update_context_data(&mut self, key: &str, values: HashSet<String>) {
        self.context_data.insert(key.to_string(), values);
    }

    /// Deletes the whole mapping for `key`; no-op if absent.
    pub fn remove_context_data(&mut self, key: &str) {
        self.context_data.remove(key);
    }

    pub fn clear_context_data(&mut self) {
        self.context_data.clear();
    }

    pub fn context_data_dictionary(&self) -> HashMap<String, HashSet<String>> {
        self.context_data.clone()
    }

    pub fn add_context_keyword(&mut self, value: &str) {
        self.context_keywords.insert(value.to_string());
    }

    pub fn add_context_keywords(&mut self, values: &HashSet<String>) {
        self.context_keywords.extend(values.iter().cloned());
    }

    pub fn remove_context_keyword(&mut self, value: &str) {
        self.context_keywords.remove(value);
    }

    pub fn clear_context_keywords(&mut self) {
        self.context_keywords.clear();
    }

    pub fn context_keywords_set(&self) -> HashSet<String> {
        self.context_keywords.clone()
    }
}
