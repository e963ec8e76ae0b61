//! Search integration tests.

#[cfg(test)]
mod tests {
    use tablestore_core::{InstanceId, TableStoreError};
    use tablestore_model::error::TransportErrorCode;
    use tablestore_model::options::RequestOptions;
    use tablestore_model::value::{Column, ColumnValue};

    use crate::{TEST_INSTANCE, client, create_test_table, pk};

    async fn seed(client: &tablestore_core::TableStoreClient) -> String {
        let instance = InstanceId::new(TEST_INSTANCE);
        let table = create_test_table(client, "search").await;
        for (id, city) in [(1, "Hangzhou"), (2, "Beijing"), (3, "Hangzhou")] {
            client
                .put_row(
                    &instance,
                    &table,
                    pk(id),
                    vec![Column::new("city", city), Column::new("score", id * 10)],
                    &RequestOptions::new(),
                )
                .await
                .unwrap();
        }
        table
    }

    #[tokio::test]
    async fn test_should_match_all_rows_without_attributes() {
        let (client, _) = client();
        let instance = InstanceId::new(TEST_INSTANCE);
        let table = seed(&client).await;

        let response = client
            .search(
                &instance,
                &table,
                "city_index",
                &RequestOptions::new().set("search_query", serde_json::json!({ "match_all": {} })),
            )
            .await
            .unwrap();
        assert_eq!(response.total_hits, Some(3));
        assert!(response.is_all_succeeded);
        assert!(response.rows.iter().all(|row| row.attributes.is_empty()));
    }

    #[tokio::test]
    async fn test_should_run_term_query_from_json_text() {
        let (client, _) = client();
        let instance = InstanceId::new(TEST_INSTANCE);
        let table = seed(&client).await;

        let response = client
            .search(
                &instance,
                &table,
                "city_index",
                &RequestOptions::new()
                    .set(
                        "search_query",
                        r#"{"term": {"field_name": "city", "term": "Hangzhou"}}"#,
                    )
                    .columns("columns_to_get", ["score"]),
            )
            .await
            .unwrap();
        assert_eq!(response.total_hits, Some(2));
        let scores: Vec<Option<&ColumnValue>> = response
            .rows
            .iter()
            .map(|row| row.attribute("score"))
            .collect();
        assert_eq!(
            scores,
            vec![Some(&ColumnValue::Integer(10)), Some(&ColumnValue::Integer(30))]
        );
    }

    #[tokio::test]
    async fn test_should_pass_through_unsupported_query_error() {
        let (client, _) = client();
        let instance = InstanceId::new(TEST_INSTANCE);
        let table = seed(&client).await;

        let result = client
            .search(
                &instance,
                &table,
                "city_index",
                &RequestOptions::new().set("search_query", serde_json::json!({ "fuzzy": {} })),
            )
            .await;
        assert!(matches!(
            result,
            Err(TableStoreError::Transport(e)) if e.code == TransportErrorCode::OTSParameterInvalid
        ));
    }

    #[tokio::test]
    async fn test_should_reject_malformed_query_text_before_sending() {
        let (client, transport) = client();
        let instance = InstanceId::new(TEST_INSTANCE);

        let result = client
            .search(
                &instance,
                "anything",
                "idx",
                &RequestOptions::new().set("search_query", "{not json"),
            )
            .await;
        assert!(matches!(
            result,
            Err(TableStoreError::InvalidOptionValue { ref key, .. }) if key == "search_query"
        ));
        assert!(transport.submitted().is_empty());
    }
}
