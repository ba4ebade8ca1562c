use std::path::Path;
use parking_lot::{Mutex, RwLock};
use crate::core::config::Config;
use crate::core::error::Result;
use crate::core::types::DocId;
use crate::index::store::IndexStore;
use crate::query::messages::Query;
use crate::storage::layout::StorageLayout;
use crate::writer::indexer::Indexer;

/// An opened mail database. Owns the index backend; the handle is the
/// exclusive writer. Dropping the handle releases the backend.
#[derive(Debug)]
pub struct Database {
    layout: StorageLayout,
    store: RwLock<IndexStore>,
    indexer: Mutex<Indexer>,
}

impl Database {
    /// Initialize a database under an existing directory, then open
    /// it. Fails if the directory is missing, is not a directory, or
    /// already holds a database.
    pub fn create(path: &Path, config: Config) -> Result<Self> {
        let layout = StorageLayout::create(path)?;
        Self::open_with_layout(layout, config)
    }

    /// Open an existing database. The index itself is created on
    /// first open.
    pub fn open(path: &Path, config: Config) -> Result<Self> {
        let layout = StorageLayout::open(path)?;
        Self::open_with_layout(layout, config)
    }

    fn open_with_layout(layout: StorageLayout, config: Config) -> Result<Self> {
        let store = IndexStore::open(&layout.index_dir, config.log_sync)?;
        let indexer = Indexer::new(config.initial_labels);

        Ok(Database {
            layout,
            store: RwLock::new(store),
            indexer: Mutex::new(indexer),
        })
    }

    /// The originally supplied database path.
    pub fn path(&self) -> &Path {
        &self.layout.database_path
    }

    /// Ingest one message file. Commits atomically; on error the
    /// index is left exactly as it was.
    pub fn add_message(&self, filename: &Path) -> Result<DocId> {
        let mut indexer = self.indexer.lock();
        let mut store = self.store.write();
        indexer.add_message(&mut store, filename)
    }

    /// A query over this database; interpreted when searched.
    pub fn query(&self, query_string: &str) -> Query<'_> {
        Query::new(&self.store, query_string)
    }

    pub fn doc_count(&self) -> usize {
        self.store.read().doc_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ErrorKind;
    use tempfile::TempDir;

    #[test]
    fn create_then_reopen() {
        let dir = TempDir::new().unwrap();

        let db = Database::create(dir.path(), Config::default()).unwrap();
        assert_eq!(db.path(), dir.path());
        assert_eq!(db.doc_count(), 0);
        drop(db);

        let db = Database::open(dir.path(), Config::default()).unwrap();
        assert_eq!(db.doc_count(), 0);
    }

    #[test]
    fn open_without_create_fails() {
        let dir = TempDir::new().unwrap();
        let err = Database::open(dir.path(), Config::default()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::PathMissing);
    }

    #[test]
    fn add_message_propagates_unreadable_file() {
        let dir = TempDir::new().unwrap();
        let db = Database::create(dir.path(), Config::default()).unwrap();

        let err = db.add_message(Path::new("/no/such/message")).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Io);
        assert_eq!(db.doc_count(), 0);
    }
}
