use crate::models::{FieldDefinition, MatchingFields};

/// Keep the fields whose target stream is `target_stream_id`, the stream of
/// the page being resolved, and index their slugs and names by field id.
pub fn filter_matching(fields: &[FieldDefinition], target_stream_id: i64) -> MatchingFields {
    let mut matching = MatchingFields::default();

    for field in fields
        .iter()
        .filter(|field| field.choose_stream() == Some(target_stream_id))
    {
        matching.ids.push(field.id);
        matching.slug_by_id.insert(field.id, field.slug.clone());
        matching.name_by_id.insert(field.id, field.name.clone());
    }

    matching
}
