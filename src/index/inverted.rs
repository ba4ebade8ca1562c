use std::collections::{BTreeMap, HashMap};
use crate::core::types::DocId;
use crate::index::document::Document;
use crate::index::posting::PostingList;

/// In-memory inverted index: term -> posting list, plus the document
/// table. Mutated only by applying log operations, so the on-disk log
/// and this structure always agree.
#[derive(Debug)]
pub struct InvertedIndex {
    pub postings: HashMap<String, PostingList>,
    pub docs: BTreeMap<DocId, Document>,
    next_id: u64,
}

static EMPTY_POSTINGS: &[DocId] = &[];

impl InvertedIndex {
    pub fn new() -> Self {
        InvertedIndex {
            postings: HashMap::new(),
            docs: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// The id the next applied document will receive.
    pub fn next_doc_id(&self) -> DocId {
        DocId(self.next_id)
    }

    /// Insert a document under `id`. Ids must arrive in ascending
    /// order; replay guarantees this.
    pub fn apply_add(&mut self, id: DocId, doc: Document) {
        for term in &doc.terms {
            self.postings
                .entry(term.clone())
                .or_insert_with(PostingList::new)
                .add(id);
        }

        self.docs.insert(id, doc);
        self.next_id = id.0 + 1;
    }

    /// Documents containing `term`, ascending by doc id. Unknown terms
    /// yield an empty list.
    pub fn postlist(&self, term: &str) -> &[DocId] {
        self.postings
            .get(term)
            .map(|list| list.doc_ids.as_slice())
            .unwrap_or(EMPTY_POSTINGS)
    }

    pub fn get_document(&self, id: DocId) -> Option<&Document> {
        self.docs.get(&id)
    }

    pub fn doc_count(&self) -> usize {
        self.docs.len()
    }

    pub fn all_doc_ids(&self) -> Vec<DocId> {
        self.docs.keys().copied().collect()
    }
}

impl Default for InvertedIndex {
    fn default() -> Self {
        InvertedIndex::new()
    }
}
