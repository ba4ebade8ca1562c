use std::path::{Path, PathBuf};
use std::process;
use clap::{Arg, ArgMatches, Command};
use maildex::core::config::Config;
use maildex::core::database::Database;
use maildex::core::error::Result;
use maildex::mime;
use maildex::query::messages::Message;

fn main() {
    env_logger::init();

    let matches = Command::new("maildex")
        .about("Not much of a mail program (just index and search)")
        .subcommand_required(true)
        .subcommand(
            Command::new("create")
                .about("Initialize a database under an existing mail directory")
                .arg(Arg::new("database").required(true)),
        )
        .subcommand(
            Command::new("add")
                .about("Index one or more message files")
                .arg(Arg::new("database").required(true))
                .arg(Arg::new("message").required(true).num_args(1..)),
        )
        .subcommand(
            Command::new("search")
                .about("List messages matching a query")
                .arg(Arg::new("database").required(true))
                .arg(Arg::new("query").required(true)),
        )
        .subcommand(
            Command::new("show")
                .about("Show messages matching a query")
                .arg(Arg::new("database").required(true))
                .arg(Arg::new("query").required(true)),
        )
        .get_matches();

    let result = match matches.subcommand() {
        Some(("create", args)) => cmd_create(args),
        Some(("add", args)) => cmd_add(args),
        Some(("search", args)) => cmd_search(args),
        Some(("show", args)) => cmd_show(args),
        _ => unreachable!(),
    };

    if let Err(err) = result {
        eprintln!("Error: {}", err);
        process::exit(1);
    }
}

fn database_path(args: &ArgMatches) -> PathBuf {
    PathBuf::from(args.get_one::<String>("database").unwrap())
}

fn cmd_create(args: &ArgMatches) -> Result<()> {
    Database::create(&database_path(args), Config::default())?;
    Ok(())
}

fn cmd_add(args: &ArgMatches) -> Result<()> {
    let db = Database::open(&database_path(args), Config::default())?;

    for filename in args.get_many::<String>("message").unwrap() {
        db.add_message(Path::new(filename))?;
    }

    Ok(())
}

fn cmd_search(args: &ArgMatches) -> Result<()> {
    let db = Database::open(&database_path(args), Config::default())?;
    let query = db.query(args.get_one::<String>("query").unwrap());

    let mut messages = query.search_messages()?;
    while messages.has_more() {
        let message = messages.get()?;
        println!("id:{} {}", message.message_id(), message.filename());
        messages.advance();
    }

    Ok(())
}

fn cmd_show(args: &ArgMatches) -> Result<()> {
    let db = Database::open(&database_path(args), Config::default())?;
    let query = db.query(args.get_one::<String>("query").unwrap());

    let mut messages = query.search_messages()?;
    while messages.has_more() {
        show_message(&messages.get()?)?;
        messages.advance();
    }

    Ok(())
}

fn show_message(message: &Message) -> Result<()> {
    println!("\u{c}message{{ id:{} filename:{}", message.message_id(), message.filename());

    println!("\u{c}header{{");
    println!("{}", one_line_summary(message)?);
    if let Some(subject) = message.header("Subject")? {
        println!("{}", subject);
    }
    for name in ["From", "To", "Cc", "Bcc", "Date"] {
        if let Some(value) = message.header(name)? {
            println!("{}: {}", name, value);
        }
    }
    println!("\u{c}header}}");

    println!("\u{c}body{{");
    let parsed = mime::parse_message_file(Path::new(message.filename()))?;
    if let Some(body) = parsed.body_text {
        print!("{}", body);
        if !body.ends_with('\n') {
            println!();
        }
    }
    println!("\u{c}body}}");

    println!("\u{c}message}}");

    Ok(())
}

/// A nice, single-line summary of the message: sender and tags.
fn one_line_summary(message: &Message) -> Result<String> {
    let from = message.header("From")?.unwrap_or_default();

    let mut tags = Vec::new();
    let mut cursor = message.tags();
    while cursor.has_more() {
        if let Some(tag) = cursor.get() {
            tags.push(tag.to_string());
        }
        cursor.advance();
    }

    Ok(format!("{} ({})", from, tags.join(" ")))
}
