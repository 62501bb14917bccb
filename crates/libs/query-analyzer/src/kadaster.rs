use serde::Serialize;

use crate::tokens::{char_len, is_digit_token};

/// Index letter of a kadastrale aanduiding: A for an appartementsrecht,
/// G for a grondperceel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexLetter {
    A,
    G,
}

impl IndexLetter {
    pub fn as_str(&self) -> &'static str {
        match self {
            IndexLetter::A => "a",
            IndexLetter::G => "g",
        }
    }
}

/// A cadastral reference read field by field from the query, with `None`
/// for every part the query did not provide. The municipality is either a
/// five-character code or a name, never both.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct KadastraleAanduiding {
    pub gemeente_code: Option<String>,
    pub gemeente_naam: Option<String>,
    pub sectie: Option<String>,
    pub object_nummer: Option<String>,
    pub index_letter: Option<IndexLetter>,
    pub index_nummer: Option<String>,
}

impl KadastraleAanduiding {
    /// A three-character first token starts a municipality code spelled over
    /// two tokens ("asd" "15"); anything else is a municipality name. After
    /// the sectie and object number, a trailing "a"/"g" token carries an
    /// explicit index, while a bare digit token is the common shorthand:
    /// zero means the whole parcel (G 0), a positive value an appartement
    /// index (A n).
    pub fn parse(tokens: &[String]) -> Self {
        if tokens.len() < 2 {
            return Self::default();
        }

        let mut aanduiding = Self::default();
        let cursor;

        if char_len(&tokens[0]) == 3 {
            aanduiding.gemeente_code = Some(format!("{}{}", tokens[0], tokens[1]));
            cursor = 2;
        } else {
            aanduiding.gemeente_naam = Some(tokens[0].clone());
            cursor = 1;
        }

        aanduiding.sectie = tokens.get(cursor).cloned();
        aanduiding.object_nummer = tokens.get(cursor + 1).cloned();

        match tokens.get(cursor + 2).map(String::as_str) {
            Some("a") => {
                aanduiding.index_letter = Some(IndexLetter::A);
                aanduiding.index_nummer = tokens.get(cursor + 3).cloned();
            }
            Some("g") => {
                aanduiding.index_letter = Some(IndexLetter::G);
                aanduiding.index_nummer = tokens.get(cursor + 3).cloned();
            }
            Some(shorthand) if is_digit_token(shorthand) => {
                if shorthand.bytes().all(|b| b == b'0') {
                    aanduiding.index_letter = Some(IndexLetter::G);
                    aanduiding.index_nummer = Some("0".to_string());
                } else {
                    aanduiding.index_letter = Some(IndexLetter::A);
                    aanduiding.index_nummer = Some(shorthand.to_string());
                }
            }
            _ => {}
        }

        // Numbers that are not purely numeric carry no usable value.
        if aanduiding
            .object_nummer
            .as_deref()
            .map_or(false, |nummer| !is_digit_token(nummer))
        {
            aanduiding.object_nummer = None;
        }
        if aanduiding
            .index_nummer
            .as_deref()
            .map_or(false, |nummer| !is_digit_token(nummer))
        {
            aanduiding.index_nummer = None;
        }

        aanduiding
    }

    pub fn is_empty(&self) -> bool {
        self.gemeente_code.is_none()
            && self.gemeente_naam.is_none()
            && self.sectie.is_none()
            && self.object_nummer.is_none()
            && self.index_letter.is_none()
            && self.index_nummer.is_none()
    }

    /// An object number typed in full is exactly five digits.
    pub fn object_nummer_is_exact(&self) -> bool {
        self.object_nummer
            .as_deref()
            .map_or(false, |nummer| char_len(nummer) == 5)
    }

    /// An index number typed in full is exactly four digits.
    pub fn index_nummer_is_exact(&self) -> bool {
        self.index_nummer
            .as_deref()
            .map_or(false, |nummer| char_len(nummer) == 4)
    }
}
