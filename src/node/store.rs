use std::collections::HashMap;

/// StoreKeyMode picks how a logical key maps to a store key.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum StoreKeyMode {
    /// Every requester shares one key space.
    Shared,
    /// Keys are namespaced by requester id.
    PerRequester,
}

impl Default for StoreKeyMode {
    fn default() -> Self {
        StoreKeyMode::Shared
    }
}

impl StoreKeyMode {
    pub(crate) fn store_key(&self, requester_id: &str, key: &str) -> String {
        match self {
            StoreKeyMode::Shared => key.to_string(),
            StoreKeyMode::PerRequester => format!("{}$-${}", requester_id, key),
        }
    }
}

/// KvStore is only ever mutated from the node actor's apply step.
#[derive(Default)]
pub(crate) struct KvStore {
    entries: HashMap<String, String>,
}

impl KvStore {
    pub(crate) fn new() -> Self {
        KvStore::default()
    }

    pub(crate) fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    pub(crate) fn put(&mut self, key: String, value: String) {
        self.entries.insert(key, value);
    }

    pub(crate) fn delete(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Sorted for stable log output.
    pub(crate) fn snapshot(&self) -> Vec<(String, String)> {
        let mut entries: Vec<_> = self.entries.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
        entries.sort();
        entries
    }
}
