//! Table management integration tests.

#[cfg(test)]
mod tests {
    use tablestore_core::{InstanceId, TableStoreError};
    use tablestore_model::error::TransportErrorCode;
    use tablestore_model::options::{OptionValue, RequestOptions};
    use tablestore_model::types::{PrimaryKeySchema, PrimaryKeyType, StreamSpec};

    use crate::{TEST_INSTANCE, client, create_test_table, test_table_name};

    #[tokio::test]
    async fn test_should_create_describe_and_delete_table() {
        let (client, _) = client();
        let instance = InstanceId::new(TEST_INSTANCE);
        let table = create_test_table(&client, "lifecycle").await;

        let described = client.describe_table(&instance, &table).await.unwrap();
        assert_eq!(described.table_meta.table_name, table);
        assert_eq!(described.table_meta.primary_key.len(), 1);
        assert_eq!(described.table_meta.table_options.time_to_live, Some(-1));
        assert_eq!(described.table_meta.table_options.max_versions, Some(1));

        let listed = client.list_table(&instance).await.unwrap();
        assert!(listed.table_names.contains(&table));

        client.delete_table(&instance, &table).await.unwrap();
        let listed = client.list_table(&instance).await.unwrap();
        assert!(!listed.table_names.contains(&table));
    }

    #[tokio::test]
    async fn test_should_apply_create_options() {
        let (client, _) = client();
        let instance = InstanceId::new(TEST_INSTANCE);
        let table = test_table_name("options");

        let options = RequestOptions::new()
            .set("time_to_live", 86_400)
            .set("max_versions", 3)
            .set("reserved_throughput_read", 5)
            .set(
                "stream_spec",
                OptionValue::map([
                    ("is_enabled", OptionValue::Bool(true)),
                    ("expiration_time", OptionValue::Integer(24)),
                ]),
            )
            .set(
                "defined_columns",
                serde_json::json!([{ "Name": "score", "ColumnType": "DCT_DOUBLE" }]),
            );
        client
            .create_table(
                &instance,
                &table,
                vec![
                    PrimaryKeySchema::new("user", PrimaryKeyType::String),
                    PrimaryKeySchema::new("seq", PrimaryKeyType::Integer).auto_increment(),
                ],
                &options,
            )
            .await
            .unwrap();

        let meta = client
            .describe_table(&instance, &table)
            .await
            .unwrap()
            .table_meta;
        assert_eq!(meta.table_options.time_to_live, Some(86_400));
        assert_eq!(meta.table_options.max_versions, Some(3));
        assert_eq!(meta.reserved_throughput.read, 5);
        assert_eq!(meta.reserved_throughput.write, 0);
        assert_eq!(
            meta.stream_spec,
            Some(StreamSpec {
                is_enabled: true,
                expiration_time: Some(24),
            })
        );
        assert_eq!(meta.defined_columns.len(), 1);
        assert!(meta.primary_key[1].auto_increment);
    }

    #[tokio::test]
    async fn test_should_update_only_the_given_settings() {
        let (client, _) = client();
        let instance = InstanceId::new(TEST_INSTANCE);
        let table = create_test_table(&client, "update").await;

        let updated = client
            .update_table(
                &instance,
                &table,
                &RequestOptions::new()
                    .set("max_versions", 5)
                    .set("reserved_throughput_write", 2),
            )
            .await
            .unwrap();
        let meta = updated.table_meta.unwrap();
        assert_eq!(meta.table_options.max_versions, Some(5));
        assert_eq!(meta.table_options.time_to_live, Some(-1));
        assert_eq!(meta.reserved_throughput.write, 2);
    }

    #[tokio::test]
    async fn test_should_report_duplicate_table() {
        let (client, _) = client();
        let instance = InstanceId::new(TEST_INSTANCE);
        let table = create_test_table(&client, "dup").await;

        let result = client
            .create_table(
                &instance,
                &table,
                vec![PrimaryKeySchema::new("id", PrimaryKeyType::Integer)],
                &RequestOptions::new(),
            )
            .await;
        assert!(matches!(
            result,
            Err(TableStoreError::Transport(e)) if e.code == TransportErrorCode::OTSObjectAlreadyExist
        ));
    }

    #[tokio::test]
    async fn test_should_report_missing_table() {
        let (client, _) = client();
        let instance = InstanceId::new(TEST_INSTANCE);

        let result = client.describe_table(&instance, "no_such_table").await;
        assert!(matches!(
            result,
            Err(TableStoreError::Transport(e)) if e.code == TransportErrorCode::OTSObjectNotExist
        ));
    }

    #[tokio::test]
    async fn test_should_reject_malformed_stream_spec_before_sending() {
        let (client, transport) = client();
        let instance = InstanceId::new(TEST_INSTANCE);

        let result = client
            .update_table(
                &instance,
                "anything",
                &RequestOptions::new().set(
                    "stream_spec",
                    OptionValue::map([("enabled", OptionValue::Bool(true))]),
                ),
            )
            .await;
        assert!(matches!(
            result,
            Err(TableStoreError::InvalidOptionValue { ref key, .. }) if key == "stream_spec"
        ));
        assert!(transport.submitted().is_empty());
    }
}
