use std::fs;
use std::path::Path;
use log::error;
use crate::core::error::{Error, ErrorKind, Result};
use crate::core::types::DocId;
use crate::index::document::Document;
use crate::index::inverted::InvertedIndex;
use crate::storage::log::{Operation, RecordLog, SyncMode};

/// Durable index backend: the in-memory inverted index rebuilt from,
/// and kept in lockstep with, the on-disk record log. Exclusive
/// writer; appending the log record is the commit point.
#[derive(Debug)]
pub struct IndexStore {
    mem: InvertedIndex,
    log: RecordLog,
}

impl IndexStore {
    /// Open or create the index rooted at `index_dir`.
    pub fn open(index_dir: &Path, sync_mode: SyncMode) -> Result<Self> {
        fs::create_dir_all(index_dir).map_err(|err| {
            backend_error(format!("cannot create index at {}: {}", index_dir.display(), err))
        })?;

        let log_path = index_dir.join("log.bin");
        let (log, operations) = RecordLog::open(&log_path, sync_mode)
            .map_err(|err| backend_error(format!("cannot open {}: {}", log_path.display(), err)))?;

        let mut mem = InvertedIndex::new();
        for operation in operations {
            match operation {
                Operation::AddDocument { id, doc } => mem.apply_add(id, doc),
            }
        }

        Ok(IndexStore { mem, log })
    }

    /// Commit one document. All-or-nothing: if the log append fails
    /// the in-memory index is untouched and nothing is visible.
    pub fn add_document(&mut self, doc: Document) -> Result<DocId> {
        let id = self.mem.next_doc_id();
        let operation = Operation::AddDocument { id, doc };

        self.log
            .append(&operation)
            .map_err(|err| backend_error(format!("log append failed: {}", err)))?;

        match operation {
            Operation::AddDocument { id, doc } => self.mem.apply_add(id, doc),
        }

        Ok(id)
    }

    pub fn postlist(&self, term: &str) -> &[DocId] {
        self.mem.postlist(term)
    }

    pub fn get_document(&self, id: DocId) -> Option<&Document> {
        self.mem.get_document(id)
    }

    pub fn doc_count(&self) -> usize {
        self.mem.doc_count()
    }

    pub fn all_doc_ids(&self) -> Vec<DocId> {
        self.mem.all_doc_ids()
    }
}

fn backend_error(context: String) -> Error {
    error!("{}", context);
    Error::new(ErrorKind::Backend, context)
}
