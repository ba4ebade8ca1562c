use std::path::Path;
use parking_lot::RwLock;
use crate::analysis::tokenizer::StandardTokenizer;
use crate::core::error::{Error, ErrorKind, Result};
use crate::core::types::DocId;
use crate::index::document::Document;
use crate::index::parse_sortable_timestamp;
use crate::index::posting::intersect_sorted;
use crate::index::store::IndexStore;
use crate::mime;
use crate::query::parser::{parse_query, ParsedQuery};
use crate::schema::schema;

/// A query against an opened database. The string is interpreted by
/// the backend when messages are searched; creating a query never
/// fails.
pub struct Query<'d> {
    store: &'d RwLock<IndexStore>,
    query_string: String,
}

impl<'d> Query<'d> {
    pub fn new(store: &'d RwLock<IndexStore>, query_string: &str) -> Self {
        Query {
            store,
            query_string: query_string.to_string(),
        }
    }

    pub fn query_string(&self) -> &str {
        &self.query_string
    }

    /// Matching messages in the backend's default order (ascending
    /// doc id). The match set is fixed when the cursor is created;
    /// iteration is stable within one cursor only.
    pub fn search_messages(&self) -> Result<Messages<'d>> {
        let store = self.store.read();

        let doc_ids = match parse_query(&self.query_string, &StandardTokenizer::default()) {
            ParsedQuery::MatchAll => store.all_doc_ids(),
            ParsedQuery::Terms(terms) => {
                let mut terms = terms.iter();
                match terms.next() {
                    None => Vec::new(),
                    Some(first) => {
                        let mut ids = store.postlist(first).to_vec();
                        for term in terms {
                            if ids.is_empty() {
                                break;
                            }
                            ids = intersect_sorted(&ids, store.postlist(term));
                        }
                        ids
                    }
                }
            }
        };

        Ok(Messages {
            store: self.store,
            doc_ids,
            pos: 0,
        })
    }
}

/// Cursor over the messages matching a query.
pub struct Messages<'d> {
    store: &'d RwLock<IndexStore>,
    doc_ids: Vec<DocId>,
    pos: usize,
}

impl Messages<'_> {
    pub fn has_more(&self) -> bool {
        self.pos < self.doc_ids.len()
    }

    pub fn advance(&mut self) {
        if self.pos < self.doc_ids.len() {
            self.pos += 1;
        }
    }

    /// The message at the cursor position.
    pub fn get(&self) -> Result<Message> {
        let id = match self.doc_ids.get(self.pos) {
            Some(id) => *id,
            None => {
                return Err(Error::new(
                    ErrorKind::InvalidInput,
                    "message cursor is exhausted".to_string(),
                ));
            }
        };

        let store = self.store.read();
        let doc = store.get_document(id).ok_or_else(|| {
            Error::new(ErrorKind::Backend, format!("missing document {}", id.value()))
        })?;

        Ok(Message::from_document(doc))
    }

    pub fn len(&self) -> usize {
        self.doc_ids.len()
    }
}

/// One matched message, detached from the cursor. Headers are read
/// back from the message file on demand.
#[derive(Debug, Clone)]
pub struct Message {
    message_id: String,
    thread_ids: Vec<String>,
    filename: String,
    date: i64,
    tags: Vec<String>,
}

impl Message {
    fn from_document(doc: &Document) -> Self {
        let thread_ids = doc
            .value(schema::VALUE_THREAD)
            .split(',')
            .filter(|id| !id.is_empty())
            .map(String::from)
            .collect();

        Message {
            message_id: doc.value(schema::VALUE_MESSAGE_ID).to_string(),
            thread_ids,
            filename: doc.data.clone(),
            date: parse_sortable_timestamp(doc.value(schema::VALUE_DATE)).unwrap_or(0),
            tags: doc.terms_with_prefix(schema::find_prefix("label")),
        }
    }

    /// The message's id; empty when the source message had none.
    pub fn message_id(&self) -> &str {
        &self.message_id
    }

    /// Thread ids in discovery order, as stored.
    pub fn thread_ids(&self) -> &[String] {
        &self.thread_ids
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// POSIX timestamp of the message date.
    pub fn date(&self) -> i64 {
        self.date
    }

    /// Raw value of a header, re-read from the message file.
    pub fn header(&self, name: &str) -> Result<Option<String>> {
        mime::header_from_file(Path::new(&self.filename), name)
    }

    /// Cursor over the message's labels, sorted.
    pub fn tags(&self) -> Tags {
        Tags {
            items: self.tags.clone(),
            pos: 0,
        }
    }
}

/// Cursor over label terms.
pub struct Tags {
    items: Vec<String>,
    pos: usize,
}

impl Tags {
    pub fn has_more(&self) -> bool {
        self.pos < self.items.len()
    }

    pub fn advance(&mut self) {
        if self.pos < self.items.len() {
            self.pos += 1;
        }
    }

    pub fn get(&self) -> Option<&str> {
        self.items.get(self.pos).map(String::as_str)
    }
}
