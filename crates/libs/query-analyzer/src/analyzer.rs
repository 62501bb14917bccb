use crate::kadaster::KadastraleAanduiding;
use crate::tokens::{char_len, is_digit_token, Tokenizer};

/// Classifies a raw search string against the fixed set of query shapes.
///
/// Construction tokenizes once; every `is_*` check is a pure test over the
/// token vector, so one query can satisfy several shapes at the same time.
/// Each `get_*` extraction assumes the matching check holds.
#[derive(Debug, Clone)]
pub struct QueryAnalyzer {
    /// Cleaned, lowercased query text.
    pub query: String,
    /// Digit and non-digit token runs, in input order.
    pub tokens: Vec<String>,
    huisnummer_index: Option<usize>,
}

impl QueryAnalyzer {
    pub fn parse(query: &str) -> Self {
        let Tokenizer { cleaned, tokens } = Tokenizer::parse(query);

        let huisnummer_index = tokens
            .iter()
            .enumerate()
            .skip(1)
            .find(|(_, token)| is_digit_token(token))
            .map(|(index, _)| index);

        Self {
            query: cleaned,
            tokens,
            huisnummer_index,
        }
    }

    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    /// Position of the first numeric token after the leading token, if any.
    pub fn huisnummer_index(&self) -> Option<usize> {
        self.huisnummer_index
    }

    /// "1013" or "1013 aw": a postcode or the start of one.
    pub fn is_postcode_prefix(&self) -> bool {
        match self.tokens.as_slice() {
            [digits] => char_len(digits) == 4 && is_digit_token(digits),
            [digits, letters] => {
                char_len(digits) == 4
                    && is_digit_token(digits)
                    && char_len(letters) == 2
                    && !is_digit_token(letters)
            }
            _ => false,
        }
    }

    /// A full postcode followed by a house number and optional additions.
    pub fn is_postcode_huisnummer_prefix(&self) -> bool {
        match self.tokens.as_slice() {
            [digits, letters, huisnummer, ..] => {
                char_len(digits) == 4
                    && is_digit_token(digits)
                    && char_len(letters) == 2
                    && !is_digit_token(letters)
                    && is_digit_token(huisnummer)
            }
            _ => false,
        }
    }

    /// The start of a bouwblok code: up to two letters, optionally followed
    /// by the start of its two-digit number.
    pub fn is_bouwblok_prefix(&self) -> bool {
        match self.tokens.as_slice() {
            [letters] => char_len(letters) <= 2 && !is_digit_token(letters),
            [letters, digits] => {
                char_len(letters) == 2
                    && !is_digit_token(letters)
                    && char_len(digits) <= 2
                    && is_digit_token(digits)
            }
            _ => false,
        }
    }

    /// A complete bouwblok code: two letters plus two digits.
    pub fn is_bouwblok_exact(&self) -> bool {
        match self.tokens.as_slice() {
            [letters, digits] => {
                char_len(letters) == 2
                    && !is_digit_token(letters)
                    && char_len(digits) == 2
                    && is_digit_token(digits)
            }
            _ => false,
        }
    }

    /// "asd15 s 00045" (municipality code typed without an inner space) or
    /// "amsterdam s 45" (municipality name, short sectie).
    pub fn is_kadastraal_object_prefix(&self) -> bool {
        if self.tokens.len() < 2 {
            return false;
        }
        let first = &self.tokens[0];
        let second = &self.tokens[1];

        let code_form = char_len(first) == 3
            && !is_digit_token(first)
            && char_len(second) == 2
            && is_digit_token(second)
            && self.query.starts_with(&format!("{first}{second}"));

        // A purely numeric first token can open a postcode or an id, but
        // never a municipality name.
        let naam_form = !is_digit_token(first)
            && char_len(second) <= 2
            && !is_digit_token(second)
            && self.tokens.get(2).map_or(true, |token| is_digit_token(token));

        code_form || naam_form
    }

    /// A street name with a house number somewhere after it.
    pub fn is_straatnaam_huisnummer_prefix(&self) -> bool {
        if self.tokens.len() < 2 {
            return false;
        }
        // A leading multi-digit token reads as a postcode or an id, not as
        // the start of a street name.
        if is_digit_token(&self.tokens[0]) && char_len(&self.tokens[0]) > 1 {
            return false;
        }
        self.huisnummer_index.is_some()
    }

    /// A bare run of five to sixteen digits: the start of a landelijk id,
    /// which is sixteen digits in full. Four digits read as a postcode.
    pub fn is_landelijk_id_prefix(&self) -> bool {
        match self.tokens.as_slice() {
            [digits] => is_digit_token(digits) && (5..=16).contains(&char_len(digits)),
            _ => false,
        }
    }

    /// Postcode as typed, digit and letter groups space-separated.
    pub fn get_postcode(&self) -> String {
        debug_assert!(self.is_postcode_prefix());

        let take = self.tokens.len().min(2);
        self.tokens[..take].join(" ")
    }

    /// Concatenated postcode ("1016sz"), house number and normalized
    /// toevoeging, which is empty when the query stops at the number.
    pub fn get_postcode_huisnummer_toevoeging(&self) -> (String, i64, String) {
        debug_assert!(self.is_postcode_huisnummer_prefix());

        let postcode = format!("{}{}", self.tokens[0], self.tokens[1]);
        let huisnummer = parse_huisnummer(&self.tokens[2]);

        (postcode, huisnummer, self.toevoeging_after(2))
    }

    /// Street name tokens up to the house number, then the number and the
    /// normalized toevoeging behind it.
    pub fn get_straatnaam_huisnummer_toevoeging(&self) -> (String, i64, String) {
        debug_assert!(self.is_straatnaam_huisnummer_prefix());

        let index = self.huisnummer_index.expect("huisnummer token present");
        let straatnaam = self.tokens[..index].join(" ");
        let huisnummer = parse_huisnummer(&self.tokens[index]);

        (straatnaam, huisnummer, self.toevoeging_after(index))
    }

    /// The cleaned query; bouwblok codes are matched as typed.
    pub fn get_bouwblok(&self) -> String {
        debug_assert!(self.is_bouwblok_prefix() || self.is_bouwblok_exact());

        self.query.clone()
    }

    pub fn get_kadastrale_aanduiding(&self) -> KadastraleAanduiding {
        debug_assert!(self.is_kadastraal_object_prefix());

        KadastraleAanduiding::parse(&self.tokens)
    }

    pub fn get_landelijk_id(&self) -> String {
        debug_assert!(self.is_landelijk_id_prefix());

        self.tokens[0].clone()
    }

    /// Every token space-joined: the free-text reading of the query.
    pub fn get_straatnaam(&self) -> String {
        self.tokens.join(" ")
    }

    /// Suffix tokens after the house number at `index`, normalized the way
    /// additions are indexed: digit runs stay whole, letter runs are spelled
    /// out character by character ("a-1" becomes "a 1", "2RA" "2 r a").
    fn toevoeging_after(&self, index: usize) -> String {
        let mut parts: Vec<String> = Vec::new();
        for token in &self.tokens[index + 1..] {
            if is_digit_token(token) {
                parts.push(token.clone());
            } else {
                parts.extend(token.chars().map(|c| c.to_string()));
            }
        }
        parts.join(" ")
    }
}

/// House numbers beyond i64 clamp instead of failing the whole query.
fn parse_huisnummer(token: &str) -> i64 {
    token.parse().unwrap_or(i64::MAX)
}

#[cfg(test)]
mod test {
    use crate::analyzer::QueryAnalyzer;
    use crate::kadaster::IndexLetter;

    fn analyzer(query: &str) -> QueryAnalyzer {
        QueryAnalyzer::parse(query)
    }

    #[test]
    fn should_recognize_postcode_prefixes() {
        assert!(analyzer("1013").is_postcode_prefix());
        assert!(analyzer("1013 AW").is_postcode_prefix());
        assert!(analyzer("1013AW").is_postcode_prefix());
        assert!(analyzer("0001").is_postcode_prefix());

        assert!(!analyzer("10").is_postcode_prefix());
        assert!(!analyzer("101").is_postcode_prefix());
        assert!(!analyzer("10134").is_postcode_prefix());
        assert!(!analyzer("1013 AWX").is_postcode_prefix());
        assert!(!analyzer("1013 A").is_postcode_prefix());
        assert!(!analyzer("1013 12").is_postcode_prefix());
    }

    #[test]
    fn should_recognize_postcode_huisnummer() {
        assert!(analyzer("1016 SZ 228").is_postcode_huisnummer_prefix());
        assert!(analyzer("1016SZ228").is_postcode_huisnummer_prefix());
        assert!(analyzer("1016 SZ 228 a 1").is_postcode_huisnummer_prefix());
        assert!(analyzer("1013 AW 105").is_postcode_huisnummer_prefix());

        assert!(!analyzer("1016 SZ").is_postcode_huisnummer_prefix());
        assert!(!analyzer("1013 A 1").is_postcode_huisnummer_prefix());
        assert!(!analyzer("101 AW 1").is_postcode_huisnummer_prefix());
    }

    #[test]
    fn should_recognize_bouwblok_codes() {
        assert!(analyzer("A").is_bouwblok_prefix());
        assert!(analyzer("RN").is_bouwblok_prefix());
        assert!(analyzer("RN3").is_bouwblok_prefix());
        assert!(analyzer("RN35").is_bouwblok_prefix());

        assert!(!analyzer("RN357").is_bouwblok_prefix());
        assert!(!analyzer("3").is_bouwblok_prefix());
        assert!(!analyzer("35A").is_bouwblok_prefix());

        assert!(analyzer("RN35").is_bouwblok_exact());
        assert!(analyzer("AA12").is_bouwblok_exact());
        assert!(analyzer("CA 99").is_bouwblok_exact());
        assert!(analyzer("CA-99").is_bouwblok_exact());

        assert!(!analyzer("RN3").is_bouwblok_exact());
        assert!(!analyzer("12A").is_bouwblok_exact());
        assert!(!analyzer("A12").is_bouwblok_exact());
    }

    #[test]
    fn should_recognize_kadastraal_object() {
        assert!(analyzer("ASD15").is_kadastraal_object_prefix());
        assert!(analyzer("ASD15 S").is_kadastraal_object_prefix());
        assert!(analyzer("ASD15 S 00045").is_kadastraal_object_prefix());
        assert!(analyzer("ASD15 S 00045 G 0000").is_kadastraal_object_prefix());
        assert!(analyzer("Amsterdam s 45").is_kadastraal_object_prefix());
        assert!(analyzer("Amsterdam s").is_kadastraal_object_prefix());
        assert!(analyzer("Sloten G 00045").is_kadastraal_object_prefix());

        // The code form needs the code typed without an inner space.
        assert!(!analyzer("ASD 15 S 00045").is_kadastraal_object_prefix());
        assert!(!analyzer("ASDE15 S").is_kadastraal_object_prefix());
        assert!(!analyzer("Amsterdam 15S").is_kadastraal_object_prefix());
        assert!(!analyzer("Amsterdam s kerkstraat").is_kadastraal_object_prefix());
        assert!(!analyzer("Amsterdam").is_kadastraal_object_prefix());
    }

    #[test]
    fn should_not_read_postcodes_as_gemeente_namen() {
        assert!(!analyzer("1013 AW").is_kadastraal_object_prefix());
        assert!(!analyzer("1016 SZ 228 a 1").is_kadastraal_object_prefix());
        assert!(!analyzer("1013 AW 105").is_kadastraal_object_prefix());
    }

    #[test]
    fn should_recognize_straatnaam_huisnummer() {
        assert!(analyzer("Rozenstraat 228").is_straatnaam_huisnummer_prefix());
        assert!(analyzer("Rozenstraat 228 a-1").is_straatnaam_huisnummer_prefix());
        assert!(analyzer("Nieuwe achtergracht 105").is_straatnaam_huisnummer_prefix());
        assert!(analyzer("P C HOOFT 10").is_straatnaam_huisnummer_prefix());
        assert!(analyzer("1e Helmersstraat 104").is_straatnaam_huisnummer_prefix());

        assert!(!analyzer("Rozenstraat").is_straatnaam_huisnummer_prefix());
        assert!(!analyzer("Nieuwe achtergracht").is_straatnaam_huisnummer_prefix());
        assert!(!analyzer("1013WR 5").is_straatnaam_huisnummer_prefix());
        assert!(!analyzer("1016 SZ 228").is_straatnaam_huisnummer_prefix());
        assert!(!analyzer("Herengracht vijf").is_straatnaam_huisnummer_prefix());
    }

    #[test]
    fn should_locate_the_huisnummer_token() {
        let hooft = analyzer("P C HOOFT 10");
        assert_eq!(hooft.token_count(), 4);
        assert_eq!(hooft.huisnummer_index(), Some(3));

        assert_eq!(analyzer("Rozenstraat 228 a-1").huisnummer_index(), Some(1));
        // The leading token is never the house number.
        assert_eq!(analyzer("1e Helmersstraat 104").huisnummer_index(), Some(3));
        assert_eq!(analyzer("Herengracht vijf").huisnummer_index(), None);
    }

    #[test]
    fn should_recognize_landelijk_id() {
        assert!(analyzer("03630").is_landelijk_id_prefix());
        assert!(analyzer("0363010000543292").is_landelijk_id_prefix());

        assert!(!analyzer("1013").is_landelijk_id_prefix());
        assert!(!analyzer("03630100005432921").is_landelijk_id_prefix());
        assert!(!analyzer("03630 1").is_landelijk_id_prefix());
    }

    #[test]
    fn should_extract_postcode() {
        assert_eq!(analyzer("1013").get_postcode(), "1013");
        assert_eq!(analyzer("1013 AW").get_postcode(), "1013 aw");
        assert_eq!(analyzer("1013-AW").get_postcode(), "1013 aw");
    }

    #[test]
    fn should_extract_postcode_huisnummer_toevoeging() {
        let (postcode, huisnummer, toevoeging) =
            analyzer("1016 SZ 228 a 1").get_postcode_huisnummer_toevoeging();

        assert_eq!(postcode, "1016sz");
        assert_eq!(huisnummer, 228);
        assert_eq!(toevoeging, "a 1");
    }

    #[test]
    fn should_extract_straatnaam_huisnummer_toevoeging() {
        let (straatnaam, huisnummer, toevoeging) =
            analyzer("Rozenstraat 228 a-1").get_straatnaam_huisnummer_toevoeging();

        assert_eq!(straatnaam, "rozenstraat");
        assert_eq!(huisnummer, 228);
        assert_eq!(toevoeging, "a 1");
    }

    #[test]
    fn should_normalize_glued_toevoeging() {
        let (straatnaam, huisnummer, toevoeging) =
            analyzer("Nieuwe achtergracht 105-3HA2").get_straatnaam_huisnummer_toevoeging();

        assert_eq!(straatnaam, "nieuwe achtergracht");
        assert_eq!(huisnummer, 105);
        assert_eq!(toevoeging, "3 h a 2");
    }

    #[test]
    fn should_keep_street_tokens_before_the_number() {
        let (straatnaam, huisnummer, toevoeging) =
            analyzer("1e Helmersstraat 104-2").get_straatnaam_huisnummer_toevoeging();

        // "1e" splits into a digit and a letter run; both belong to the name.
        assert_eq!(straatnaam, "1 e helmersstraat");
        assert_eq!(huisnummer, 104);
        assert_eq!(toevoeging, "2");
    }

    #[test]
    fn should_clamp_oversized_huisnummer() {
        let (_, huisnummer, _) =
            analyzer("Rozenstraat 99999999999999999999").get_straatnaam_huisnummer_toevoeging();

        assert_eq!(huisnummer, i64::MAX);
    }

    #[test]
    fn should_extract_kadastrale_aanduiding() {
        let aanduiding = analyzer("ASD15 S 00045 G 0000").get_kadastrale_aanduiding();

        assert_eq!(aanduiding.gemeente_code, Some("asd15".to_string()));
        assert_eq!(aanduiding.sectie, Some("s".to_string()));
        assert_eq!(aanduiding.object_nummer, Some("00045".to_string()));
        assert_eq!(aanduiding.index_letter, Some(IndexLetter::G));
        assert_eq!(aanduiding.index_nummer, Some("0000".to_string()));
    }

    #[test]
    fn should_extract_bouwblok_and_landelijk_id() {
        assert_eq!(analyzer("CA-99").get_bouwblok(), "ca 99");
        assert_eq!(analyzer("03630").get_landelijk_id(), "03630");
    }

    #[test]
    fn free_text_reading_joins_tokens() {
        assert_eq!(
            analyzer("Plantage Muidergracht").get_straatnaam(),
            "plantage muidergracht"
        );
        assert_eq!(analyzer("'t Kalfje").get_straatnaam(), "t kalfje");
    }
}
