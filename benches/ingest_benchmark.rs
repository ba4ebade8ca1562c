use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use std::fs;
use std::path::PathBuf;
use maildex::core::config::Config;
use maildex::core::database::Database;
use maildex::storage::log::SyncMode;
use tempfile::TempDir;

const MESSAGE_COUNT: usize = 100;

fn bench_config() -> Config {
    Config {
        log_sync: SyncMode::None,  // Measure indexing, not fsync
        ..Config::default()
    }
}

/// A small corpus where every other message replies to an earlier one,
/// so the thread resolver does real joins.
fn write_corpus(dir: &TempDir) -> Vec<PathBuf> {
    (0..MESSAGE_COUNT)
        .map(|i| {
            let reply_header = if i > 0 {
                format!("In-Reply-To: <m{}@bench>\n", i / 2)
            } else {
                String::new()
            };
            let contents = format!(
                "Message-ID: <m{}@bench>\n{}From: Sender {} <sender{}@bench>\nSubject: benchmark thread {}\nDate: Tue, 13 Oct 2009 07:{:02}:00 +0000\n\nmessage body number {}\n",
                i, reply_header, i, i, i / 4, i % 60, i
            );
            let path = dir.path().join(format!("m{}", i));
            fs::write(&path, contents).unwrap();
            path
        })
        .collect()
}

fn ingest_corpus(messages: &[PathBuf]) -> TempDir {
    let db_dir = TempDir::new().unwrap();
    let db = Database::create(db_dir.path(), bench_config()).unwrap();
    for path in messages {
        db.add_message(path).unwrap();
    }
    db_dir
}

fn ingest_benchmark(c: &mut Criterion) {
    let mail_dir = TempDir::new().unwrap();
    let messages = write_corpus(&mail_dir);

    c.bench_function("ingest_100_messages", |b| {
        b.iter_batched(
            || TempDir::new().unwrap(),
            |db_dir| {
                let db = Database::create(db_dir.path(), bench_config()).unwrap();
                for path in &messages {
                    db.add_message(path).unwrap();
                }
                db_dir
            },
            BatchSize::PerIteration,
        );
    });

    let indexed = ingest_corpus(&messages);
    c.bench_function("reopen_indexed_database", |b| {
        b.iter(|| {
            let db = Database::open(indexed.path(), bench_config()).unwrap();
            assert_eq!(db.doc_count(), MESSAGE_COUNT);
        });
    });

    let db = Database::open(indexed.path(), bench_config()).unwrap();
    c.bench_function("search_subject_term", |b| {
        b.iter(|| {
            let query = db.query("subject:benchmark");
            query.search_messages().unwrap().len()
        });
    });
}

criterion_group!(benches, ingest_benchmark);
criterion_main!(benches);
