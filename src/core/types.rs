use serde::{Serialize, Deserialize};

/// Backend document id. Assigned in insertion order, starting at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DocId(pub u64);

impl DocId {
    pub fn new(id: u64) -> Self {
        DocId(id)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl From<u64> for DocId {
    fn from(id: u64) -> Self {
        DocId(id)
    }
}
