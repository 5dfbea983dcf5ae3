use crate::objects::Object;
use std::collections::BTreeMap;

/// PDF dictionary with keys kept in sorted order, so two writes of the same
/// document produce the same bytes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dictionary {
    entries: BTreeMap<String, Object>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Object>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Object> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = (&String, &Object)> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_dictionary() {
        let dict = Dictionary::new();
        assert!(dict.is_empty());
        assert_eq!(dict.len(), 0);
    }

    #[test]
    fn test_set_overwrites() {
        let mut dict = Dictionary::new();
        dict.set("Count", 1i64);
        dict.set("Count", 2i64);
        assert_eq!(dict.len(), 1);
        assert_eq!(dict.get("Count"), Some(&Object::Integer(2)));
    }

    #[test]
    fn test_entries_are_sorted() {
        let mut dict = Dictionary::new();
        dict.set("Type", Object::name("Page"));
        dict.set("Contents", Object::Null);
        dict.set("MediaBox", Object::Array(vec![]));

        let keys: Vec<&str> = dict.entries().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["Contents", "MediaBox", "Type"]);
    }
}
