use once_cell::sync::Lazy;
use regex::Regex;

static TOKEN_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^0-9\s]+|[0-9]+").expect("token pattern"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tokenizer {
    pub cleaned: String,
    pub tokens: Vec<String>,
}

impl Tokenizer {
    pub fn parse(input: &str) -> Self {
        let cleaned = input
            .chars()
            .map(|c| if c.is_ascii_punctuation() { ' ' } else { c })
            .collect::<String>()
            .to_lowercase();

        let tokens = TOKEN_PATTERN
            .find_iter(&cleaned)
            .map(|token| token.as_str().to_string())
            .collect();

        Self { cleaned, tokens }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// A token is either one run of digits or one run of anything else, never a
/// mix, so checking the bytes classifies the whole token.
pub fn is_digit_token(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit())
}

/// Token lengths are counted in characters, not bytes.
pub fn char_len(token: &str) -> usize {
    token.chars().count()
}
