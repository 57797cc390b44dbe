use groundwork_core::config::FilterTerm;
use groundwork_core::MetadataFilters;

/// Metadata filter from the first vocabulary term found in `q` (lowercased).
pub fn extract_filters(q: &str, vocabulary: &[FilterTerm]) -> MetadataFilters {
    let mut filters = MetadataFilters::new();
    if let Some(term) = vocabulary.iter().find(|t| q.contains(t.term.as_str())) {
        filters.insert(term.key.clone(), term.value.clone());
    }
    filters
}
