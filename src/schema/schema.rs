/// Term prefixes and value slot numbers shared by the indexer and the
/// query layer. The prefix values are chosen to be compatible with sup.
///
/// Tokenized fields are broken into words before indexing; exact-match
/// fields contribute their value as a single term.
pub const TOKENIZED_PREFIX: &[(&str, &str)] = &[
    ("subject", "S"),
    ("body", "B"),
    ("from_name", "FN"),
    ("to_name", "TN"),
    ("name", "N"),
    ("attachment", "A"),
];

pub const EXACT_PREFIX: &[(&str, &str)] = &[
    ("type", "K"),
    ("from_email", "FE"),
    ("to_email", "TE"),
    ("email", "E"),
    ("date", "D"),
    ("label", "L"),
    ("source_id", "I"),
    ("attachment_extension", "O"),
    ("msgid", "Q"),
    ("thread", "H"),
    ("ref", "R"),
];

/// Value slot numbers. These are persisted in every document and must
/// not be renumbered.
pub const VALUE_MESSAGE_ID: u32 = 0;
pub const VALUE_THREAD: u32 = 1;
pub const VALUE_DATE: u32 = 2;

/// The backend complains if we hand it a term longer than this
/// (prefix included). Overlong terms are dropped, never truncated.
pub const MAX_TERM: usize = 245;

/// Look up the prefix for a field name. Unknown names yield the empty
/// string, producing an unprefixed (low-quality) term.
pub fn find_prefix(name: &str) -> &'static str {
    for (field, prefix) in TOKENIZED_PREFIX {
        if *field == name {
            return prefix;
        }
    }

    for (field, prefix) in EXACT_PREFIX {
        if *field == name {
            return prefix;
        }
    }

    ""
}

/// Whether a field belongs to the tokenized class.
pub fn is_tokenized(name: &str) -> bool {
    TOKENIZED_PREFIX.iter().any(|(field, _)| *field == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixes_resolve() {
        assert_eq!(find_prefix("subject"), "S");
        assert_eq!(find_prefix("from_name"), "FN");
        assert_eq!(find_prefix("msgid"), "Q");
        assert_eq!(find_prefix("thread"), "H");
        assert_eq!(find_prefix("ref"), "R");
        assert_eq!(find_prefix("label"), "L");
    }

    #[test]
    fn unknown_field_falls_back_to_unprefixed() {
        assert_eq!(find_prefix("no_such_field"), "");
    }

    #[test]
    fn field_classes_are_disjoint() {
        for (field, _) in TOKENIZED_PREFIX {
            assert!(!EXACT_PREFIX.iter().any(|(f, _)| f == field));
        }
        assert!(is_tokenized("body"));
        assert!(!is_tokenized("thread"));
    }
}
