mod analyzer;
mod kadaster;
mod tokens;

pub use crate::analyzer::QueryAnalyzer;
pub use crate::kadaster::{IndexLetter, KadastraleAanduiding};
pub use crate::tokens::{char_len, is_digit_token, Tokenizer};
