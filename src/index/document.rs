use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};

/// One indexed document: a set of terms, numbered value slots, and an
/// opaque data payload (the message filename).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    pub terms: Vec<String>,              // Insertion order, no duplicates
    pub values: BTreeMap<u32, String>,   // Slot number -> stored value
    pub data: String,                    // Opaque payload
}

impl Document {
    pub fn new() -> Self {
        Document::default()
    }

    /// Add a fully formed term. Adding a term twice is a no-op.
    pub fn add_term(&mut self, term: &str) {
        if !self.terms.iter().any(|t| t == term) {
            self.terms.push(term.to_string());
        }
    }

    pub fn add_value(&mut self, slot: u32, value: &str) {
        self.values.insert(slot, value.to_string());
    }

    pub fn set_data(&mut self, data: &str) {
        self.data = data.to_string();
    }

    /// Stored value for a slot; empty string when unset.
    pub fn value(&self, slot: u32) -> &str {
        self.values.get(&slot).map(String::as_str).unwrap_or("")
    }

    /// Terms carrying the given prefix, with the prefix stripped,
    /// sorted.
    pub fn terms_with_prefix(&self, prefix: &str) -> Vec<String> {
        let mut matched: Vec<String> = self
            .terms
            .iter()
            .filter_map(|t| t.strip_prefix(prefix))
            .map(String::from)
            .collect();
        matched.sort();
        matched
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terms_deduplicate() {
        let mut doc = Document::new();
        doc.add_term("Ra@x");
        doc.add_term("Ra@x");
        doc.add_term("Rb@x");
        assert_eq!(doc.terms, vec!["Ra@x", "Rb@x"]);
    }

    #[test]
    fn missing_value_is_empty() {
        let doc = Document::new();
        assert_eq!(doc.value(1), "");
    }

    #[test]
    fn prefix_stripping_ignores_longer_prefixes() {
        let mut doc = Document::new();
        doc.add_term("Linbox");
        doc.add_term("Lunread");
        doc.add_term("Qid@x");
        assert_eq!(doc.terms_with_prefix("L"), vec!["inbox", "unread"]);
    }
}
