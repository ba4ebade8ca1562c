use unicode_segmentation::UnicodeSegmentation;

/// Standard Unicode tokenizer for the tokenized field class.
#[derive(Debug, Clone)]
pub struct StandardTokenizer {
    pub lowercase: bool,
    pub max_token_length: usize,
}

impl Default for StandardTokenizer {
    fn default() -> Self {
        StandardTokenizer {
            lowercase: true,
            max_token_length: 64,
        }
    }
}

impl StandardTokenizer {
    /// Split text into word tokens. Words longer than
    /// `max_token_length` bytes are skipped.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let text = if self.lowercase {
            text.to_lowercase()
        } else {
            text.to_string()
        };

        text.unicode_words()
            .filter(|word| word.len() <= self.max_token_length)
            .map(String::from)
            .collect()
    }
}
