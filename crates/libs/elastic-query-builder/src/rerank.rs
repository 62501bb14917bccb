use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// House number and normalized toevoeging taken from the query; carried on
/// a request so the hits can be re-ordered after the search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HuisnummerToevoeging {
    pub huisnummer: i64,
    pub toevoeging: String,
}

impl HuisnummerToevoeging {
    pub fn new(huisnummer: i64, toevoeging: impl Into<String>) -> Self {
        Self {
            huisnummer,
            toevoeging: toevoeging.into(),
        }
    }

    /// The form additions are indexed in: house number first, then the
    /// normalized suffix ("228 a 1"); a bare number stays "228".
    pub fn match_key(&self) -> String {
        if self.toevoeging.is_empty() {
            self.huisnummer.to_string()
        } else {
            format!("{} {}", self.huisnummer, self.toevoeging)
        }
    }
}

/// What re-ranking needs from a hit: the indexed house number plus
/// toevoeging field, whatever the full document looks like.
pub trait ToevoegingHit {
    fn toevoeging(&self) -> &str;
}

/// Generic view of an address hit as the index returns it; unknown fields
/// are kept aside instead of dropped.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SearchHit {
    #[serde(default)]
    pub subtype: Option<String>,
    #[serde(default)]
    pub landelijk_id: Option<String>,
    #[serde(default)]
    pub huisnummer: Option<i64>,
    #[serde(default)]
    pub toevoeging: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ToevoegingHit for SearchHit {
    fn toevoeging(&self) -> &str {
        self.toevoeging.as_deref().unwrap_or("")
    }
}

/// Stable three band re-ordering: exact matches on the requested house
/// number plus toevoeging come first, then hits on the same house number
/// with the shortest suffix first, then everything else in the order the
/// index scored it.
pub fn reorder_by_huisnummer<T: ToevoegingHit>(hits: &mut [T], wanted: &HuisnummerToevoeging) {
    let exact = wanted.match_key();

    // The key allocates, so build it once per hit instead of per comparison.
    hits.sort_by_cached_key(|hit| {
        let toevoeging = hit.toevoeging();
        if toevoeging == exact {
            (0u8, 0, String::new())
        } else if leading_huisnummer(toevoeging) == Some(wanted.huisnummer) {
            (1, toevoeging.chars().count(), toevoeging.to_string())
        } else {
            (2, 0, String::new())
        }
    });
}

fn leading_huisnummer(toevoeging: &str) -> Option<i64> {
    let end = toevoeging
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(toevoeging.len());
    toevoeging[..end].parse().ok()
}
