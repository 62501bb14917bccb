use serde_json::{json, Value};

use query_analyzer::KadastraleAanduiding;

use crate::rerank::HuisnummerToevoeging;
use crate::settings::QuerySettings;

/// Prefix search on a postcode as typed ("1013", "1013 aw").
pub fn postcode_query(postcode: &str) -> Value {
    json!({
        "query": {
            "match_bool_prefix": {
                "postcode": { "query": postcode }
            }
        }
    })
}

/// Address lookup by full postcode and house number. The toevoeging clause
/// is optional so a bare house number still matches every addition.
pub fn postcode_huisnummer_query(
    postcode: &str,
    wanted: &HuisnummerToevoeging,
    settings: &QuerySettings,
) -> Value {
    json!({
        "query": {
            "bool": {
                "must": [
                    { "term": { "postcode": { "value": postcode } } },
                    {
                        "term": {
                            "huisnummer": {
                                "value": wanted.huisnummer,
                                "boost": settings.huisnummer_boost
                            }
                        }
                    }
                ],
                "should": [
                    {
                        "match_phrase_prefix": {
                            "toevoeging": {
                                "query": wanted.match_key(),
                                "boost": settings.toevoeging_boost
                            }
                        }
                    }
                ]
            }
        }
    })
}

fn straatnaam_huisnummer_clauses(
    straatnaam: &str,
    wanted: &HuisnummerToevoeging,
    settings: &QuerySettings,
) -> Value {
    json!({
        "bool": {
            "must": [
                {
                    "match_bool_prefix": {
                        "straatnaam": {
                            "query": straatnaam,
                            "boost": settings.straatnaam_boost
                        }
                    }
                },
                {
                    "term": {
                        "huisnummer": {
                            "value": wanted.huisnummer,
                            "boost": settings.huisnummer_boost
                        }
                    }
                }
            ],
            "should": [
                {
                    "match_phrase_prefix": {
                        "toevoeging": {
                            "query": wanted.match_key(),
                            "boost": settings.toevoeging_boost
                        }
                    }
                }
            ]
        }
    })
}

pub fn straatnaam_huisnummer_query(
    straatnaam: &str,
    wanted: &HuisnummerToevoeging,
    settings: &QuerySettings,
) -> Value {
    json!({ "query": straatnaam_huisnummer_clauses(straatnaam, wanted, settings) })
}

/// Variant that multiplies up hits whose indexed toevoeging equals the one
/// asked for, so "228 a 1" outranks "228 a 10" before any re-ranking.
pub fn straatnaam_huisnummer_exact_query(
    straatnaam: &str,
    wanted: &HuisnummerToevoeging,
    settings: &QuerySettings,
) -> Value {
    json!({
        "query": {
            "function_score": {
                "query": straatnaam_huisnummer_clauses(straatnaam, wanted, settings),
                "functions": [
                    {
                        "filter": {
                            "term": { "toevoeging.keyword": wanted.match_key() }
                        },
                        "weight": settings.exact_toevoeging_boost
                    }
                ],
                "boost_mode": "multiply"
            }
        }
    })
}

/// Complete bouwblok code; typed spaces are not part of the code.
pub fn bouwblok_exact_query(code: &str) -> Value {
    json!({
        "query": {
            "term": { "code": { "value": code.replace(' ', "") } }
        }
    })
}

pub fn bouwblok_prefix_query(code: &str) -> Value {
    json!({
        "query": {
            "prefix": { "code": { "value": code.replace(' ', "") } }
        }
    })
}

/// Field for field query over the parts of the aanduiding that were typed.
/// A five digit object number and a four digit index number are complete,
/// so they match as exact terms instead of prefixes.
pub fn kadastraal_object_query(aanduiding: &KadastraleAanduiding) -> Value {
    let mut must: Vec<Value> = Vec::new();

    if let Some(code) = &aanduiding.gemeente_code {
        must.push(json!({ "term": { "gemeente_code": { "value": code } } }));
    }
    if let Some(naam) = &aanduiding.gemeente_naam {
        must.push(json!({ "match_bool_prefix": { "gemeente_naam": { "query": naam } } }));
    }
    if let Some(sectie) = &aanduiding.sectie {
        must.push(json!({ "term": { "sectie": { "value": sectie } } }));
    }
    if let Some(nummer) = &aanduiding.object_nummer {
        if aanduiding.object_nummer_is_exact() {
            must.push(json!({ "term": { "object_nummer": { "value": nummer } } }));
        } else {
            must.push(json!({ "prefix": { "object_nummer": { "value": nummer } } }));
        }
    }
    if let Some(letter) = aanduiding.index_letter {
        must.push(json!({ "term": { "index_letter": { "value": letter.as_str() } } }));
    }
    if let Some(nummer) = &aanduiding.index_nummer {
        if aanduiding.index_nummer_is_exact() {
            must.push(json!({ "term": { "index_nummer": { "value": nummer } } }));
        } else {
            must.push(json!({ "prefix": { "index_nummer": { "value": nummer } } }));
        }
    }

    json!({
        "query": {
            "bool": { "must": must }
        }
    })
}

/// Landelijke ids share one prefix-indexed field across subtypes.
pub fn landelijk_id_query(id: &str) -> Value {
    json!({
        "query": {
            "prefix": { "landelijk_id": { "value": id } }
        }
    })
}

pub fn openbare_ruimte_query(text: &str) -> Value {
    json!({
        "query": {
            "match_bool_prefix": {
                "naam": { "query": text }
            }
        }
    })
}

pub fn adres_query(text: &str) -> Value {
    json!({
        "query": {
            "match_bool_prefix": {
                "adres": { "query": text }
            }
        }
    })
}

pub fn gebied_query(text: &str) -> Value {
    json!({
        "query": {
            "match_bool_prefix": {
                "naam": { "query": text }
            }
        }
    })
}

pub fn pandnaam_query(text: &str) -> Value {
    json!({
        "query": {
            "match_bool_prefix": {
                "pandnaam": { "query": text }
            }
        }
    })
}

pub fn kadastraal_subject_query(text: &str) -> Value {
    json!({
        "query": {
            "match_bool_prefix": {
                "naam": { "query": text }
            }
        }
    })
}
