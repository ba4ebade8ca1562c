use crate::analysis::tokenizer::StandardTokenizer;
use crate::schema::schema;

/// A parsed query: either everything, or the AND of a term set.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedQuery {
    MatchAll,
    Terms(Vec<String>),
}

/// Translate a query string into index terms through the schema.
///
/// Clauses are whitespace-separated and combined with AND:
/// - `*` (alone) or an empty string matches all documents
/// - `field:value` resolves the field's prefix; tokenized fields
///   contribute one term per word, exact fields a single term
/// - a bare word searches the body
///
/// Unknown field names fall back to an unprefixed term.
pub fn parse_query(input: &str, tokenizer: &StandardTokenizer) -> ParsedQuery {
    let input = input.trim();
    if input.is_empty() || input == "*" {
        return ParsedQuery::MatchAll;
    }

    let mut terms = Vec::new();

    for clause in input.split_whitespace() {
        match clause.split_once(':') {
            Some((field, value)) if schema::is_tokenized(field) => {
                let prefix = schema::find_prefix(field);
                for word in tokenizer.tokenize(value) {
                    terms.push(format!("{}{}", prefix, word));
                }
            }
            Some((field, value)) => {
                terms.push(format!("{}{}", schema::find_prefix(field), value));
            }
            None => {
                let prefix = schema::find_prefix("body");
                for word in tokenizer.tokenize(clause) {
                    terms.push(format!("{}{}", prefix, word));
                }
            }
        }
    }

    ParsedQuery::Terms(terms)
}
