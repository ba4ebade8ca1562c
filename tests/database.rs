use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use maildex::core::config::Config;
use maildex::core::database::Database;
use maildex::storage::log::SyncMode;
use tempfile::TempDir;

fn write_message(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

const SAMPLE: &str = "Message-ID: <coffee@x>\n\
From: Alice Example <alice@example.org>\n\
To: Bob Builder <bob@example.org>\n\
Subject: Coffee machine broken again\n\
Date: Tue, 13 Oct 2009 07:00:00 +0000\n\
\n\
The espresso machine on floor two is leaking.\n";

fn match_count(db: &Database, query: &str) -> usize {
    db.query(query).search_messages().unwrap().len()
}

#[test]
fn full_text_and_field_queries() {
    let dir = TempDir::new().unwrap();
    let db = Database::create(dir.path(), Config::default()).unwrap();
    db.add_message(&write_message(dir.path(), "m", SAMPLE)).unwrap();

    // Tokenized fields, case-folded.
    assert_eq!(match_count(&db, "subject:coffee"), 1);
    assert_eq!(match_count(&db, "subject:COFFEE"), 1);
    assert_eq!(match_count(&db, "from_name:alice"), 1);
    assert_eq!(match_count(&db, "to_name:builder"), 1);

    // Bare words search the body.
    assert_eq!(match_count(&db, "espresso"), 1);
    assert_eq!(match_count(&db, "leaking"), 1);
    assert_eq!(match_count(&db, "tea"), 0);

    // Exact-match fields are literal.
    assert_eq!(match_count(&db, "from_email:alice@example.org"), 1);
    assert_eq!(match_count(&db, "to_email:bob@example.org"), 1);
    assert_eq!(match_count(&db, "from_email:alice"), 0);

    // Clauses are combined with AND.
    assert_eq!(match_count(&db, "subject:coffee espresso"), 1);
    assert_eq!(match_count(&db, "subject:coffee tea"), 0);
}

#[test]
fn message_exposes_headers_date_and_tags() {
    let dir = TempDir::new().unwrap();
    let db = Database::create(dir.path(), Config::default()).unwrap();
    db.add_message(&write_message(dir.path(), "m", SAMPLE)).unwrap();

    let query = db.query("msgid:coffee@x");
    let messages = query.search_messages().unwrap();
    let message = messages.get().unwrap();

    assert_eq!(message.date(), 1255417200);
    assert_eq!(
        message.header("Subject").unwrap().as_deref(),
        Some("Coffee machine broken again")
    );
    assert_eq!(message.header("X-Missing").unwrap(), None);

    let mut tags = Vec::new();
    let mut cursor = message.tags();
    while cursor.has_more() {
        tags.push(cursor.get().unwrap().to_string());
        cursor.advance();
    }
    assert_eq!(tags, vec!["inbox", "unread"]);
}

#[test]
fn configured_labels_are_stamped() {
    let dir = TempDir::new().unwrap();
    let config = Config {
        initial_labels: vec!["archive".to_string()],
        ..Config::default()
    };
    let db = Database::create(dir.path(), config).unwrap();
    db.add_message(&write_message(dir.path(), "m", SAMPLE)).unwrap();

    assert_eq!(match_count(&db, "label:archive"), 1);
    assert_eq!(match_count(&db, "label:inbox"), 0);
}

#[test]
fn index_survives_reopen() {
    let dir = TempDir::new().unwrap();

    {
        let db = Database::create(dir.path(), Config::default()).unwrap();
        db.add_message(&write_message(dir.path(), "m", SAMPLE)).unwrap();
    }

    let db = Database::open(dir.path(), Config::default()).unwrap();
    assert_eq!(db.doc_count(), 1);
    assert_eq!(match_count(&db, "msgid:coffee@x"), 1);

    // Threading keeps working against the replayed index.
    let reply = "Message-ID: <reply@x>\nIn-Reply-To: <coffee@x>\nSubject: Re: Coffee\n\nFixed.\n";
    db.add_message(&write_message(dir.path(), "r", reply)).unwrap();

    let query = db.query("msgid:reply@x");
    let messages = query.search_messages().unwrap();
    let tid = messages.get().unwrap().thread_ids()[0].clone();
    assert_eq!(match_count(&db, &format!("thread:{}", tid)), 2);
}

#[test]
fn torn_write_does_not_corrupt_earlier_commits() {
    let dir = TempDir::new().unwrap();

    {
        let db = Database::create(dir.path(), Config::default()).unwrap();
        db.add_message(&write_message(dir.path(), "m", SAMPLE)).unwrap();
    }

    // Simulate a crash mid-append.
    let log_path = dir.path().join(".notmuch").join("xapian").join("log.bin");
    let mut file = fs::OpenOptions::new().append(true).open(&log_path).unwrap();
    file.write_all(&[0x07, 0x00, 0x00, 0x00, 0xaa]).unwrap();
    drop(file);

    let db = Database::open(dir.path(), Config::default()).unwrap();
    assert_eq!(db.doc_count(), 1);
    assert_eq!(match_count(&db, "msgid:coffee@x"), 1);

    // The truncated log accepts new commits.
    db.add_message(&write_message(dir.path(), "n", "Message-ID: <n@x>\nSubject: next\n\nok\n"))
        .unwrap();
    assert_eq!(db.doc_count(), 2);
}

#[test]
fn relaxed_sync_mode_still_indexes() {
    let dir = TempDir::new().unwrap();
    let config = Config {
        log_sync: SyncMode::None,
        ..Config::default()
    };
    let db = Database::create(dir.path(), config).unwrap();
    db.add_message(&write_message(dir.path(), "m", SAMPLE)).unwrap();
    assert_eq!(db.doc_count(), 1);
}
