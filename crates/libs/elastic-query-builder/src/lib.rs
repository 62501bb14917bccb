pub mod dispatch;
pub mod doc_type;
pub mod dsl;
pub mod errors;
pub mod filters;
pub mod indices;
pub mod rerank;
pub mod settings;

pub use crate::dispatch::{select_queries, QueryRequest, QueryShape, MIN_QUERY_LENGTH};
pub use crate::errors::{QueryBuilderError, Result};
pub use crate::filters::{Category, FeatureFlags};
pub use crate::indices::build_es_indices_to_search;
pub use crate::rerank::{reorder_by_huisnummer, HuisnummerToevoeging, SearchHit, ToevoegingHit};
pub use crate::settings::QuerySettings;
