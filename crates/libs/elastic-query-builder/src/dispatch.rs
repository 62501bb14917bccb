use serde::Serialize;
use serde_json::Value;

use query_analyzer::QueryAnalyzer;

use crate::doc_type::DocType;
use crate::dsl;
use crate::errors::{QueryBuilderError, Result};
use crate::filters::{Category, FeatureFlags};
use crate::rerank::HuisnummerToevoeging;
use crate::settings::QuerySettings;

/// Queries shorter than this are dropped before dispatch; a one character
/// prefix scan touches most of the index.
pub const MIN_QUERY_LENGTH: usize = 2;

/// Which recognizer produced a request.
#[derive(PartialEq, Eq, Copy, Clone, Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryShape {
    Postcode,
    PostcodeHuisnummer,
    BouwblokExact,
    BouwblokPrefix,
    KadastraalObject,
    LandelijkId,
    StraatnaamHuisnummer,
    OpenbareRuimte,
    Adres,
    Gebied,
    Pandnaam,
    KadastraalSubject,
}

/// One executable search: the DSL body, where to run it, and how to
/// post-process its hits.
#[derive(Debug, Clone, Serialize)]
pub struct QueryRequest {
    pub shape: QueryShape,
    pub categories: &'static [Category],
    pub doc_types: &'static [DocType],
    pub dsl: Value,
    /// Set when the hits should be re-ordered by house number afterwards.
    pub rerank: Option<HuisnummerToevoeging>,
}

#[derive(PartialEq, Eq, Copy, Clone, Debug)]
enum Predicate {
    PostcodePrefix,
    PostcodeHuisnummerPrefix,
    BouwblokPrefix,
    BouwblokExact,
    KadastraalObjectPrefix,
    StraatnaamHuisnummerPrefix,
    LandelijkIdPrefix,
}

impl Predicate {
    fn holds(&self, analyzer: &QueryAnalyzer) -> bool {
        match self {
            Predicate::PostcodePrefix => analyzer.is_postcode_prefix(),
            Predicate::PostcodeHuisnummerPrefix => analyzer.is_postcode_huisnummer_prefix(),
            Predicate::BouwblokPrefix => analyzer.is_bouwblok_prefix(),
            Predicate::BouwblokExact => analyzer.is_bouwblok_exact(),
            Predicate::KadastraalObjectPrefix => analyzer.is_kadastraal_object_prefix(),
            Predicate::StraatnaamHuisnummerPrefix => analyzer.is_straatnaam_huisnummer_prefix(),
            Predicate::LandelijkIdPrefix => analyzer.is_landelijk_id_prefix(),
        }
    }
}

type BuildQuery = fn(&QueryAnalyzer, &QuerySettings) -> QueryRequest;

struct Rule {
    labels: &'static [Category],
    predicate: Predicate,
    build: BuildQuery,
    /// Builder substituted when the matching feature flag is on.
    scored_variant: Option<BuildQuery>,
}

struct DefaultRule {
    label: Category,
    build: BuildQuery,
}

/// Ordered dispatch table; earlier rules produce earlier requests. Every
/// matching rule runs, a query is never claimed by a single shape.
static SPECIALIZED_RULES: &[Rule] = &[
    Rule {
        labels: &[Category::Gebieden],
        predicate: Predicate::BouwblokExact,
        build: build_bouwblok_exact,
        scored_variant: None,
    },
    Rule {
        labels: &[Category::Bag, Category::Nummeraanduiding],
        predicate: Predicate::PostcodeHuisnummerPrefix,
        build: build_postcode_huisnummer,
        scored_variant: None,
    },
    Rule {
        labels: &[Category::Bag, Category::Nummeraanduiding],
        predicate: Predicate::PostcodePrefix,
        build: build_postcode,
        scored_variant: None,
    },
    Rule {
        labels: &[Category::Brk],
        predicate: Predicate::KadastraalObjectPrefix,
        build: build_kadastraal_object,
        scored_variant: None,
    },
    Rule {
        labels: &[Category::Bag, Category::Nummeraanduiding, Category::Pand],
        predicate: Predicate::LandelijkIdPrefix,
        build: build_landelijk_id,
        scored_variant: None,
    },
    Rule {
        labels: &[Category::Bag, Category::Nummeraanduiding],
        predicate: Predicate::StraatnaamHuisnummerPrefix,
        build: build_straatnaam_huisnummer,
        scored_variant: Some(build_straatnaam_huisnummer_exact),
    },
    Rule {
        labels: &[Category::Gebieden],
        predicate: Predicate::BouwblokPrefix,
        build: build_bouwblok_prefix,
        scored_variant: None,
    },
];

/// Free text fallbacks, one per category, applied when nothing above fired.
static DEFAULT_RULES: &[DefaultRule] = &[
    DefaultRule {
        label: Category::Bag,
        build: build_openbare_ruimte,
    },
    DefaultRule {
        label: Category::Nummeraanduiding,
        build: build_adres,
    },
    DefaultRule {
        label: Category::Gebieden,
        build: build_gebied,
    },
    DefaultRule {
        label: Category::Pand,
        build: build_pandnaam,
    },
    DefaultRule {
        label: Category::Brk,
        build: build_kadastraal_subject,
    },
];

/// Picks and builds every query worth running for `query`.
///
/// `query` is the raw input as the user typed it; `analyzer` its parsed
/// form. An empty `categories` filter selects all rules; a non-empty filter
/// that matches no rule at all is an error rather than an empty search.
pub fn select_queries(
    query: &str,
    analyzer: &QueryAnalyzer,
    categories: &[Category],
    flags: FeatureFlags,
    settings: &QuerySettings,
) -> Result<Vec<QueryRequest>> {
    if query.trim().chars().count() < MIN_QUERY_LENGTH {
        tracing::debug!(query, "query below minimum length, nothing to dispatch");
        return Ok(Vec::new());
    }

    let specialized: Vec<&Rule> = SPECIALIZED_RULES
        .iter()
        .filter(|rule| matches_filter(rule.labels, categories))
        .collect();
    let defaults: Vec<&DefaultRule> = DEFAULT_RULES
        .iter()
        .filter(|rule| categories.is_empty() || categories.contains(&rule.label))
        .collect();

    if !categories.is_empty() && specialized.is_empty() && defaults.is_empty() {
        let labels: Vec<&str> = categories.iter().map(Category::as_str).collect();
        return Err(QueryBuilderError::InvalidCategory(labels.join(",")));
    }

    let mut requests: Vec<QueryRequest> = Vec::new();
    for rule in specialized {
        if !rule.predicate.holds(analyzer) {
            continue;
        }
        let build = match rule.scored_variant {
            Some(variant) if flags.exact_toevoeging_boost() => variant,
            _ => rule.build,
        };
        let mut request = build(analyzer, settings);
        request.categories = rule.labels;
        requests.push(request);
    }

    if requests.is_empty() {
        for rule in defaults {
            let mut request = (rule.build)(analyzer, settings);
            request.categories = std::slice::from_ref(&rule.label);
            requests.push(request);
        }
        tracing::debug!(query, "no specialized rule matched, free text fallback");
    } else {
        let shapes: Vec<QueryShape> = requests.iter().map(|request| request.shape).collect();
        tracing::debug!(query, ?shapes, "dispatched to specialized rules");
    }

    for request in &requests {
        tracing::trace!(shape = ?request.shape, dsl = %request.dsl, "built query dsl");
    }

    Ok(requests)
}

fn matches_filter(labels: &[Category], filter: &[Category]) -> bool {
    filter.is_empty() || labels.iter().any(|label| filter.contains(label))
}

fn build_postcode(analyzer: &QueryAnalyzer, _settings: &QuerySettings) -> QueryRequest {
    QueryRequest {
        shape: QueryShape::Postcode,
        categories: &[],
        doc_types: &[DocType::Nummeraanduiding, DocType::OpenbareRuimte],
        dsl: dsl::postcode_query(&analyzer.get_postcode()),
        rerank: None,
    }
}

fn build_postcode_huisnummer(analyzer: &QueryAnalyzer, settings: &QuerySettings) -> QueryRequest {
    let (postcode, huisnummer, toevoeging) = analyzer.get_postcode_huisnummer_toevoeging();
    let wanted = HuisnummerToevoeging::new(huisnummer, toevoeging);

    QueryRequest {
        shape: QueryShape::PostcodeHuisnummer,
        categories: &[],
        doc_types: &[DocType::Nummeraanduiding],
        dsl: dsl::postcode_huisnummer_query(&postcode, &wanted, settings),
        rerank: Some(wanted),
    }
}

fn build_bouwblok_exact(analyzer: &QueryAnalyzer, _settings: &QuerySettings) -> QueryRequest {
    QueryRequest {
        shape: QueryShape::BouwblokExact,
        categories: &[],
        doc_types: &[DocType::Bouwblok],
        dsl: dsl::bouwblok_exact_query(&analyzer.get_bouwblok()),
        rerank: None,
    }
}

fn build_bouwblok_prefix(analyzer: &QueryAnalyzer, _settings: &QuerySettings) -> QueryRequest {
    QueryRequest {
        shape: QueryShape::BouwblokPrefix,
        categories: &[],
        doc_types: &[DocType::Bouwblok],
        dsl: dsl::bouwblok_prefix_query(&analyzer.get_bouwblok()),
        rerank: None,
    }
}

fn build_kadastraal_object(analyzer: &QueryAnalyzer, _settings: &QuerySettings) -> QueryRequest {
    QueryRequest {
        shape: QueryShape::KadastraalObject,
        categories: &[],
        doc_types: &[DocType::KadastraalObject],
        dsl: dsl::kadastraal_object_query(&analyzer.get_kadastrale_aanduiding()),
        rerank: None,
    }
}

fn build_landelijk_id(analyzer: &QueryAnalyzer, _settings: &QuerySettings) -> QueryRequest {
    QueryRequest {
        shape: QueryShape::LandelijkId,
        categories: &[],
        doc_types: &[
            DocType::Nummeraanduiding,
            DocType::OpenbareRuimte,
            DocType::Pand,
        ],
        dsl: dsl::landelijk_id_query(&analyzer.get_landelijk_id()),
        rerank: None,
    }
}

fn build_straatnaam_huisnummer(analyzer: &QueryAnalyzer, settings: &QuerySettings) -> QueryRequest {
    let (straatnaam, huisnummer, toevoeging) = analyzer.get_straatnaam_huisnummer_toevoeging();
    let wanted = HuisnummerToevoeging::new(huisnummer, toevoeging);

    QueryRequest {
        shape: QueryShape::StraatnaamHuisnummer,
        categories: &[],
        doc_types: &[DocType::Nummeraanduiding],
        dsl: dsl::straatnaam_huisnummer_query(&straatnaam, &wanted, settings),
        rerank: Some(wanted),
    }
}

fn build_straatnaam_huisnummer_exact(
    analyzer: &QueryAnalyzer,
    settings: &QuerySettings,
) -> QueryRequest {
    let (straatnaam, huisnummer, toevoeging) = analyzer.get_straatnaam_huisnummer_toevoeging();
    let wanted = HuisnummerToevoeging::new(huisnummer, toevoeging);

    QueryRequest {
        shape: QueryShape::StraatnaamHuisnummer,
        categories: &[],
        doc_types: &[DocType::Nummeraanduiding],
        dsl: dsl::straatnaam_huisnummer_exact_query(&straatnaam, &wanted, settings),
        rerank: Some(wanted),
    }
}

fn build_openbare_ruimte(analyzer: &QueryAnalyzer, _settings: &QuerySettings) -> QueryRequest {
    QueryRequest {
        shape: QueryShape::OpenbareRuimte,
        categories: &[],
        doc_types: &[DocType::OpenbareRuimte],
        dsl: dsl::openbare_ruimte_query(&analyzer.get_straatnaam()),
        rerank: None,
    }
}

fn build_adres(analyzer: &QueryAnalyzer, _settings: &QuerySettings) -> QueryRequest {
    QueryRequest {
        shape: QueryShape::Adres,
        categories: &[],
        doc_types: &[DocType::Nummeraanduiding],
        dsl: dsl::adres_query(&analyzer.get_straatnaam()),
        rerank: None,
    }
}

fn build_gebied(analyzer: &QueryAnalyzer, _settings: &QuerySettings) -> QueryRequest {
    QueryRequest {
        shape: QueryShape::Gebied,
        categories: &[],
        doc_types: &[DocType::Gebied],
        dsl: dsl::gebied_query(&analyzer.get_straatnaam()),
        rerank: None,
    }
}

fn build_pandnaam(analyzer: &QueryAnalyzer, _settings: &QuerySettings) -> QueryRequest {
    QueryRequest {
        shape: QueryShape::Pandnaam,
        categories: &[],
        doc_types: &[DocType::Pand],
        dsl: dsl::pandnaam_query(&analyzer.get_straatnaam()),
        rerank: None,
    }
}

fn build_kadastraal_subject(analyzer: &QueryAnalyzer, _settings: &QuerySettings) -> QueryRequest {
    QueryRequest {
        shape: QueryShape::KadastraalSubject,
        categories: &[],
        doc_types: &[DocType::KadastraalSubject],
        dsl: dsl::kadastraal_subject_query(&analyzer.get_straatnaam()),
        rerank: None,
    }
}
