use crate::dispatch::QueryRequest;
use crate::doc_type::root_doctype;

/// Index names a request should run against, one per targeted subtype.
pub fn build_es_indices_to_search(index_root: &str, request: &QueryRequest) -> Vec<String> {
    request
        .doc_types
        .iter()
        .map(|doc_type| root_doctype(index_root, *doc_type))
        .collect()
}
