use std::fs;
use std::path::Path;
use mail_parser::{Address, HeaderName, HeaderValue, Message, MessageParser};
use crate::core::error::{Error, ErrorKind, Result};

/// The slice of a parsed message the indexer consumes. Everything is
/// owned so the raw buffer can be dropped as soon as parsing is done.
#[derive(Debug, Clone)]
pub struct ParsedMessage {
    pub message_id: Option<String>,
    /// Declared parent msg-ids: References first, then In-Reply-To,
    /// header order preserved, duplicates kept.
    pub references: Vec<String>,
    /// POSIX seconds; 0 when the Date header is absent or unparsable.
    pub date: i64,
    pub subject: Option<String>,
    pub from: Vec<Mailbox>,
    pub to: Vec<Mailbox>,
    pub body_text: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Mailbox {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Open and parse one message file.
pub fn parse_message_file(path: &Path) -> Result<ParsedMessage> {
    let raw = fs::read(path).map_err(|err| {
        Error::new(ErrorKind::Io, format!("error opening {}: {}", path.display(), err))
    })?;

    let message = MessageParser::default().parse(&raw).ok_or_else(|| {
        Error::new(ErrorKind::Parse, format!("cannot parse message {}", path.display()))
    })?;

    let mut references = Vec::new();
    collect_msg_ids(&message, HeaderName::References, &mut references);
    collect_msg_ids(&message, HeaderName::InReplyTo, &mut references);

    Ok(ParsedMessage {
        message_id: message.message_id().map(str::to_string),
        references,
        date: message.date().map(|d| d.to_timestamp()).unwrap_or(0),
        subject: message.subject().map(str::to_string),
        from: mailboxes(message.from()),
        to: mailboxes(message.to()),
        body_text: message.body_text(0).map(|body| body.to_string()),
    })
}

/// Raw value of the first header matching `name`, for the read-side
/// message cursor. The file is re-parsed on every call.
pub fn header_from_file(path: &Path, name: &str) -> Result<Option<String>> {
    let raw = fs::read(path).map_err(|err| {
        Error::new(ErrorKind::Io, format!("error opening {}: {}", path.display(), err))
    })?;

    let message = MessageParser::default().parse(&raw).ok_or_else(|| {
        Error::new(ErrorKind::Parse, format!("cannot parse message {}", path.display()))
    })?;

    for header in message.root_part().headers() {
        if header.name.as_str().eq_ignore_ascii_case(name) {
            let bytes = &raw[header.offset_start as usize..header.offset_end as usize];
            return Ok(Some(String::from_utf8_lossy(bytes).trim().to_string()));
        }
    }

    Ok(None)
}

fn collect_msg_ids(message: &Message, name: HeaderName<'_>, out: &mut Vec<String>) {
    for header in message.root_part().headers() {
        if header.name != name {
            continue;
        }
        match &header.value {
            HeaderValue::Text(id) => out.push(id.to_string()),
            HeaderValue::TextList(ids) => out.extend(ids.iter().map(|id| id.to_string())),
            _ => {}
        }
    }
}

fn mailboxes(address: Option<&Address>) -> Vec<Mailbox> {
    let mut out = Vec::new();

    let push = |out: &mut Vec<Mailbox>, addr: &mail_parser::Addr| {
        out.push(Mailbox {
            name: addr.name().map(str::to_string),
            email: addr.address().map(str::to_string),
        });
    };

    match address {
        Some(Address::List(list)) => {
            for addr in list {
                push(&mut out, addr);
            }
        }
        Some(Address::Group(groups)) => {
            for group in groups {
                for addr in &group.addresses {
                    push(&mut out, addr);
                }
            }
        }
        None => {}
    }

    out
}
