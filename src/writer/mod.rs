pub mod indexer;
pub mod threads;
