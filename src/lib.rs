pub mod core;
pub mod storage;
pub mod analysis;
pub mod schema;
pub mod index;
pub mod mime;
pub mod writer;
pub mod query;

/*
┌──────────────────────────────── MAILDEX STRUCT ARCHITECTURE ────────────────────────────────┐
│                                                                                              │
│  ┌──────────────────────── CORE ─────────────────────────┐                                  │
│  │ struct Database                                        │                                  │
│  │ • layout: StorageLayout      // .notmuch/xapian paths  │                                  │
│  │ • store: RwLock<IndexStore>  // index backend          │                                  │
│  │ • indexer: Mutex<Indexer>    // single writer          │                                  │
│  └────────────────────────────────────────────────────────┘                                  │
│                                                                                              │
│  ┌──────────────────────── WRITE PATH ───────────────────┐  ┌───────── READ PATH ─────────┐ │
│  │ struct Indexer                                         │  │ struct Query                │ │
│  │ • tokenizer: StandardTokenizer                         │  │ • query_string              │ │
│  │ • idgen: ThreadIdGen         // 128-bit thread ids     │  │ struct Messages (cursor)    │ │
│  │ • initial_labels: Vec<String>                          │  │ • has_more/advance/get      │ │
│  │ fn add_message()             // terms+values, commit   │  │ struct Message              │ │
│  │ fn resolve_threads()         // join via ref:/msgid:   │  │ • id/filename/date/tags     │ │
│  └────────────────────────────────────────────────────────┘  └─────────────────────────────┘ │
│                                                                                              │
│  ┌──────────────────────── BACKEND ──────────────────────┐                                  │
│  │ struct IndexStore                                      │                                  │
│  │ • mem: InvertedIndex         // term -> PostingList    │                                  │
│  │ • log: RecordLog             // append = commit point  │                                  │
│  └────────────────────────────────────────────────────────┘                                  │
│                                                                                              │
│  Database ──owns──> IndexStore ──replays──> RecordLog                                        │
│  Indexer ──reads──> IndexStore (thread join) ──commits──> IndexStore                         │
│  Query ──postlists──> IndexStore ──yields──> Messages ──> Message ──> Tags                   │
│                                                                                              │
└──────────────────────────────────────────────────────────────────────────────────────────────┘
*/
