use std::collections::HashSet;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use crate::index::document::Document;
use crate::index::store::IndexStore;
use crate::schema::schema;

/// Thread id generator. Owns its PRNG state; seeded once from OS
/// entropy. "128 bits of thread-id ought to be enough for anybody" --
/// no collision check is performed.
#[derive(Debug)]
pub struct ThreadIdGen {
    rng: StdRng,
}

impl ThreadIdGen {
    pub fn new() -> Self {
        ThreadIdGen {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic generator for tests.
    pub fn with_seed(seed: u64) -> Self {
        ThreadIdGen {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// 128 random bits as 32 lowercase hex digits.
    pub fn mint(&mut self) -> String {
        format!("{:032x}", self.rng.gen::<u128>())
    }
}

impl Default for ThreadIdGen {
    fn default() -> Self {
        ThreadIdGen::new()
    }
}

/// Thread ids for a new message, in discovery order: ids of existing
/// messages referencing `message_id` (children, ascending doc id),
/// then ids of each message in `parents` (header order), first
/// occurrence wins. If nothing matches and the message has an id, a
/// fresh thread id is minted; without an id the result is empty.
pub fn resolve_threads(
    store: &IndexStore,
    parents: &[String],
    message_id: Option<&str>,
    idgen: &mut ThreadIdGen,
) -> Vec<String> {
    let mut discovered = Vec::new();
    let mut seen = HashSet::new();

    if let Some(message_id) = message_id {
        let term = format!("{}{}", schema::find_prefix("ref"), message_id);
        for doc_id in store.postlist(&term) {
            if let Some(doc) = store.get_document(*doc_id) {
                insert_thread_ids(&mut discovered, &mut seen, doc);
            }
        }
    }

    for parent in parents {
        let term = format!("{}{}", schema::find_prefix("msgid"), parent);
        if let Some(doc_id) = store.postlist(&term).first() {
            if let Some(doc) = store.get_document(*doc_id) {
                insert_thread_ids(&mut discovered, &mut seen, doc);
            }
        }
    }

    if discovered.is_empty() && message_id.is_some() {
        discovered.push(idgen.mint());
    }

    discovered
}

fn insert_thread_ids(discovered: &mut Vec<String>, seen: &mut HashSet<String>, doc: &Document) {
    for id in doc.value(schema::VALUE_THREAD).split(',') {
        if !id.is_empty() && seen.insert(id.to_string()) {
            discovered.push(id.to_string());
        }
    }
}
