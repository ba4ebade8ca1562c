use std::path::Path;
use log::debug;
use crate::analysis::tokenizer::StandardTokenizer;
use crate::core::error::Result;
use crate::core::types::DocId;
use crate::index::document::Document;
use crate::index::sortable_timestamp;
use crate::index::store::IndexStore;
use crate::mime::{self, Mailbox, ParsedMessage};
use crate::schema::schema;
use crate::writer::threads::{resolve_threads, ThreadIdGen};

/// Builds and commits one index document per message file.
#[derive(Debug)]
pub struct Indexer {
    pub tokenizer: StandardTokenizer,
    pub idgen: ThreadIdGen,
    pub initial_labels: Vec<String>,
}

impl Indexer {
    pub fn new(initial_labels: Vec<String>) -> Self {
        Indexer {
            tokenizer: StandardTokenizer::default(),
            idgen: ThreadIdGen::new(),
            initial_labels,
        }
    }

    /// Ingest one message file. Nothing is committed unless every step
    /// succeeds; a failed call leaves the index unchanged.
    pub fn add_message(&mut self, store: &mut IndexStore, filename: &Path) -> Result<DocId> {
        let message = mime::parse_message_file(filename)?;

        let mut doc = Document::new();
        doc.set_data(&filename.to_string_lossy());

        for parent in &message.references {
            add_term(&mut doc, "ref", Some(parent));
        }

        let thread_ids = resolve_threads(
            store,
            &message.references,
            message.message_id.as_deref(),
            &mut self.idgen,
        );

        if let Some(message_id) = &message.message_id {
            add_term(&mut doc, "msgid", Some(message_id));
            doc.add_value(schema::VALUE_MESSAGE_ID, message_id);
        }

        // A message with neither an id nor any known relative gets no
        // thread membership at all; it stays reachable through
        // full-text and label queries.
        if !thread_ids.is_empty() {
            for thread_id in &thread_ids {
                add_term(&mut doc, "thread", Some(thread_id));
            }
            doc.add_value(schema::VALUE_THREAD, &thread_ids.join(","));
        }

        doc.add_value(schema::VALUE_DATE, &sortable_timestamp(message.date));

        self.add_text_terms(&mut doc, &message);

        for label in &self.initial_labels {
            add_term(&mut doc, "label", Some(label));
        }

        let id = store.add_document(doc)?;
        debug!("indexed {} as doc {}", filename.display(), id.value());

        Ok(id)
    }

    fn add_text_terms(&self, doc: &mut Document, message: &ParsedMessage) {
        if let Some(subject) = &message.subject {
            self.add_tokenized(doc, "subject", subject);
        }

        self.add_mailbox_terms(doc, &message.from, "from_name", "from_email");
        self.add_mailbox_terms(doc, &message.to, "to_name", "to_email");

        if let Some(body) = &message.body_text {
            self.add_tokenized(doc, "body", body);
        }
    }

    fn add_tokenized(&self, doc: &mut Document, field: &str, text: &str) {
        for word in self.tokenizer.tokenize(text) {
            add_term(doc, field, Some(&word));
        }
    }

    fn add_mailbox_terms(
        &self,
        doc: &mut Document,
        mailboxes: &[Mailbox],
        name_field: &str,
        email_field: &str,
    ) {
        for mailbox in mailboxes {
            if let Some(name) = &mailbox.name {
                self.add_tokenized(doc, name_field, name);
            }
            add_term(doc, email_field, mailbox.email.as_deref());
        }
    }
}

/// Prefix `value` for `field` and add the result to the document.
/// Absent values are a no-op. Terms longer than the cap are dropped,
/// never truncated.
pub fn add_term(doc: &mut Document, field: &str, value: Option<&str>) {
    let value = match value {
        Some(value) => value,
        None => return,
    };

    let term = format!("{}{}", schema::find_prefix(field), value);

    if term.len() <= schema::MAX_TERM {
        doc.add_term(&term);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_value_is_a_no_op() {
        let mut doc = Document::new();
        add_term(&mut doc, "msgid", None);
        assert!(doc.terms.is_empty());
    }

    #[test]
    fn term_carries_field_prefix() {
        let mut doc = Document::new();
        add_term(&mut doc, "msgid", Some("a@x"));
        add_term(&mut doc, "thread", Some("00000000000000000000000000000000"));
        assert_eq!(doc.terms[0], "Qa@x");
        assert_eq!(doc.terms[1], "H00000000000000000000000000000000");
    }

    #[test]
    fn overlong_term_is_dropped_not_truncated() {
        let mut doc = Document::new();
        let long_id = "x".repeat(300);
        add_term(&mut doc, "ref", Some(&long_id));
        assert!(doc.terms.is_empty());

        // Exactly at the cap (prefix included) still fits.
        let fitting = "x".repeat(schema::MAX_TERM - 1);
        add_term(&mut doc, "ref", Some(&fitting));
        assert_eq!(doc.terms.len(), 1);
        assert_eq!(doc.terms[0].len(), schema::MAX_TERM);
    }

    #[test]
    fn unknown_field_yields_unprefixed_term() {
        let mut doc = Document::new();
        add_term(&mut doc, "bogus", Some("value"));
        assert_eq!(doc.terms[0], "value");
    }
}
