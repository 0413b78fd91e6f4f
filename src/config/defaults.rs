//! Fallback configuration values, keyed by dotted path.
//!
//! Defaults form the lowest-priority layer of the merge: a discovered
//! config file and then environment variables are applied over them.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

/// A set of default values under dotted keys such as
/// `"server.bind_address"`.
#[derive(Debug, Clone, Default)]
pub struct Defaults {
    values: BTreeMap<String, Value>,
}

impl Defaults {
    /// An empty default set.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in defaults for this service.
    pub fn standard() -> Self {
        let mut defaults = Self::new();
        defaults.set("api_name", "API");
        defaults.set("server.bind_address", "0.0.0.0:9090");
        defaults.set("server.read_timeout_secs", 5);
        defaults.set("server.write_timeout_secs", 10);
        defaults.set("server.idle_timeout_secs", 120);
        defaults.set("database.name", "");
        defaults.set("database.user", "");
        defaults.set("database.password", "");
        defaults
    }

    /// Install a fallback value under a dotted key. A later `set` for the
    /// same key replaces the earlier one.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    /// Expand the dotted keys into a nested JSON value tree.
    pub fn into_tree(self) -> Value {
        let mut root = Map::new();
        for (key, value) in self.values {
            insert_dotted(&mut root, &key, value);
        }
        Value::Object(root)
    }
}

fn insert_dotted(map: &mut Map<String, Value>, key: &str, value: Value) {
    match key.split_once('.') {
        None => {
            map.insert(key.to_string(), value);
        }
        Some((head, rest)) => {
            let entry = map
                .entry(head.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !entry.is_object() {
                *entry = Value::Object(Map::new());
            }
            if let Value::Object(child) = entry {
                insert_dotted(child, rest, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_key() {
        let mut defaults = Defaults::new();
        defaults.set("api_name", "API");
        let tree = defaults.into_tree();
        assert_eq!(tree["api_name"], "API");
    }

    #[test]
    fn dotted_keys_nest() {
        let mut defaults = Defaults::new();
        defaults.set("server.bind_address", ":9090");
        defaults.set("server.read_timeout_secs", 5);
        let tree = defaults.into_tree();
        assert_eq!(tree["server"]["bind_address"], ":9090");
        assert_eq!(tree["server"]["read_timeout_secs"], 5);
    }

    #[test]
    fn later_set_wins() {
        let mut defaults = Defaults::new();
        defaults.set("server.bind_address", ":9090");
        defaults.set("server.bind_address", ":8080");
        let tree = defaults.into_tree();
        assert_eq!(tree["server"]["bind_address"], ":8080");
    }

    #[test]
    fn scalar_replaced_by_group() {
        let mut defaults = Defaults::new();
        defaults.set("server", "oops");
        defaults.set("server.bind_address", ":9090");
        let tree = defaults.into_tree();
        assert_eq!(tree["server"]["bind_address"], ":9090");
    }

    #[test]
    fn standard_covers_all_sections() {
        let tree = Defaults::standard().into_tree();
        assert_eq!(tree["api_name"], "API");
        assert_eq!(tree["server"]["idle_timeout_secs"], 120);
        assert_eq!(tree["database"]["name"], "");
    }
}
