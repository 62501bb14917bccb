use serde::{Deserialize, Serialize};

/// Document subtypes the dispatcher can target, one index per subtype.
#[derive(PartialEq, Eq, Copy, Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DocType {
    Nummeraanduiding,
    OpenbareRuimte,
    Bouwblok,
    Gebied,
    Pand,
    KadastraalObject,
    KadastraalSubject,
}

impl DocType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocType::Nummeraanduiding => "nummeraanduiding",
            DocType::OpenbareRuimte => "openbare_ruimte",
            DocType::Bouwblok => "bouwblok",
            DocType::Gebied => "gebied",
            DocType::Pand => "pand",
            DocType::KadastraalObject => "kadastraal_object",
            DocType::KadastraalSubject => "kadastraal_subject",
        }
    }
}

pub fn root_doctype(index_root: &str, doc_type: DocType) -> String {
    format!("{index_root}_{}", doc_type.as_str())
}
