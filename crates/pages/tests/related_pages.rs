//! End-to-end resolution against the mock pool, checking what callers see:
//! the serialized shape of related sets and tolerance of blob encodings.

use std::sync::Arc;

use pagelinks_core::ResolverConfig;
use pagelinks_orm::testing::{MockDatabaseRow, MockPool};
use pagelinks_pages::RelatedPagesResolver;
use serde_json::json;

fn fields(blobs: &[(i64, &str, serde_json::Value)]) -> Vec<MockDatabaseRow> {
    blobs
        .iter()
        .map(|(id, slug, blob)| {
            MockDatabaseRow::new()
                .with_column("id", *id)
                .with_column("field_name", "Related")
                .with_column("field_slug", *slug)
                .with_column("field_namespace", "pages")
                .with_column("field_type", "relationship")
                .with_column("field_data", blob.clone())
        })
        .collect()
}

fn assignment(type_id: i64, field_id: i64) -> MockDatabaseRow {
    MockDatabaseRow::new()
        .with_column("type_id", type_id)
        .with_column("type_slug", "article")
        .with_column("type_title", "Article")
        .with_column("stream_id", 9)
        .with_column("stream_slug", "articles")
        .with_column("stream_prefix", "data_")
        .with_column("field_id", field_id)
}

fn page(id: i64, entry_id: i64) -> MockDatabaseRow {
    MockDatabaseRow::new()
        .with_column("id", id)
        .with_column("entry_id", entry_id)
        .with_column("type_id", 3)
        .with_column("title", "Launch notes")
        .with_column("uri", "news/launch-notes")
        .with_column("parent_id", serde_json::Value::Null)
}

fn resolver(pool: MockPool) -> RelatedPagesResolver {
    RelatedPagesResolver::new(Arc::new(pool), ResolverConfig::default()).unwrap()
}

#[tokio::test]
async fn test_related_sets_serialize_flat() {
    let pool = MockPool::new()
        .respond("FROM \"data_fields\"", fields(&[(7, "related", json!(r#"{"choose_stream":5}"#))]))
        .respond("FROM \"data_field_assignments\"", vec![assignment(3, 7)])
        .respond("FROM \"data_articles\"", vec![page(100, 12)]);

    let sets = resolver(pool)
        .get_related_pages(Some(42), Some(5))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(
        serde_json::to_value(&sets).unwrap(),
        json!([{
            "type_id": 3,
            "type_slug": "article",
            "type_title": "Article",
            "stream_id": 9,
            "stream_slug": "articles",
            "stream_prefix": "data_",
            "field_id": 7,
            "field_name": "Related",
            "field_slug": "related",
            "related_pages": [{
                "id": 100,
                "entry_id": 12,
                "type_id": 3,
                "title": "Launch notes",
                "uri": "news/launch-notes",
                "parent_id": null
            }]
        }])
    );
}

#[tokio::test]
async fn test_json_column_and_php_object_blobs_are_understood() {
    let php_object = r#"O:8:"stdClass":2:{s:13:"choose_stream";i:5;s:9:"max_items";i:3;}"#;
    let pool = MockPool::new()
        .respond(
            "FROM \"data_fields\"",
            fields(&[
                (7, "related", json!({ "choose_stream": 5 })),
                (8, "see_also", json!(php_object)),
            ]),
        )
        .respond("FROM \"data_field_assignments\"", vec![assignment(3, 7), assignment(3, 8)])
        .respond("FROM \"data_articles\"", vec![page(100, 12)]);

    let sets = resolver(pool)
        .get_related_pages(Some(42), Some(5))
        .await
        .unwrap()
        .unwrap();

    let slugs: Vec<&str> = sets.iter().map(|set| set.field_slug.as_str()).collect();
    assert_eq!(slugs, ["related", "see_also"]);
}

#[tokio::test]
async fn test_nothing_related_is_none_not_empty() {
    let pool = MockPool::new()
        .respond("FROM \"data_fields\"", fields(&[(7, "related", json!(r#"{"choose_stream":5}"#))]))
        .respond("FROM \"data_field_assignments\"", vec![assignment(3, 7)]);

    let result = resolver(pool.clone()).get_related_pages(Some(42), Some(5)).await.unwrap();

    assert!(result.is_none());
    assert_eq!(pool.query_count(), 3);
}
