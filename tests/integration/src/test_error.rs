//! Error propagation and instance routing integration tests.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tablestore_core::{InstanceConfig, InstanceId, TableStoreConfig, TableStoreError};
    use tablestore_model::error::TransportErrorCode;
    use tablestore_model::options::RequestOptions;

    use crate::{MemoryTransport, TEST_INSTANCE, client, create_test_table, pk};

    #[tokio::test]
    async fn test_should_fail_for_unregistered_instance() {
        let (client, transport) = client();

        let result = client
            .get_row(&InstanceId::new("nowhere"), "t", pk(1), &RequestOptions::new())
            .await;
        assert!(matches!(
            result,
            Err(TableStoreError::UnknownInstance(ref name)) if name == "nowhere"
        ));
        assert!(transport.submitted().is_empty());
    }

    #[tokio::test]
    async fn test_should_pass_transport_errors_through_unchanged() {
        let (client, transport) = client();
        let instance = InstanceId::new(TEST_INSTANCE);

        transport.fail_next(TransportErrorCode::OTSServerBusy);
        let err = match client.list_table(&instance).await {
            Err(TableStoreError::Transport(err)) => err,
            other => panic!("expected transport error, got {other:?}"),
        };
        assert_eq!(err.code, TransportErrorCode::OTSServerBusy);
        assert_eq!(err.message, "injected failure");
        assert!(err.is_retryable());

        let err = TableStoreError::Transport(err);
        assert!(!err.is_caller_error());
        assert!(client.list_table(&instance).await.is_ok());
    }

    #[tokio::test]
    async fn test_should_route_by_instance() {
        let (client, primary) = client();
        let secondary = Arc::new(MemoryTransport::new());
        let config = TableStoreConfig::default();
        let _ = client.register(
            InstanceConfig::from_config("analytics", "http://analytics:8080", &config),
            secondary.clone(),
        );

        let table = create_test_table(&client, "routed").await;
        let analytics = InstanceId::new("analytics");
        let listed = client.list_table(&analytics).await.unwrap();
        assert!(listed.table_names.is_empty());

        assert_eq!(primary.instances_seen(), vec![InstanceId::new(TEST_INSTANCE)]);
        assert_eq!(secondary.instances_seen(), vec![analytics.clone()]);
        assert_eq!(primary.row_count(&table), Some(0));
        assert_eq!(secondary.row_count(&table), None);

        assert!(client.deregister(&analytics).is_some());
        assert!(matches!(
            client.list_table(&analytics).await,
            Err(TableStoreError::UnknownInstance(_))
        ));
    }

    #[tokio::test]
    async fn test_should_use_configured_default_instance() {
        let (client, _) = client();
        assert_eq!(client.default_instance(), InstanceId::new(TEST_INSTANCE));
        assert!(client.list_table(&client.default_instance()).await.is_ok());
    }

    #[tokio::test]
    async fn test_should_reject_bad_option_shapes_before_sending() {
        let (client, transport) = client();
        let instance = InstanceId::new(TEST_INSTANCE);

        let bad_range = client
            .get_row(
                &instance,
                "t",
                pk(1),
                &RequestOptions::new().set("time_range", "yesterday"),
            )
            .await;
        assert!(matches!(bad_range, Err(TableStoreError::InvalidTimeRange(_))));

        let bad_versions = client
            .get_row(
                &instance,
                "t",
                pk(1),
                &RequestOptions::new().set("max_versions", "many"),
            )
            .await;
        assert!(matches!(
            bad_versions,
            Err(TableStoreError::InvalidOptionValue { ref key, .. }) if key == "max_versions"
        ));

        let bad_return = client
            .put_row(
                &instance,
                "t",
                pk(1),
                vec![],
                &RequestOptions::new().symbol("return_type", "everything"),
            )
            .await;
        assert!(matches!(bad_return, Err(TableStoreError::InvalidReturnType(_))));
        assert!(bad_return.is_err_and(|e| e.is_caller_error()));

        assert!(transport.submitted().is_empty());
    }

    #[tokio::test]
    async fn test_should_ignore_options_unknown_to_the_operation() {
        let (client, transport) = client();
        let instance = InstanceId::new(TEST_INSTANCE);
        let table = create_test_table(&client, "unknown").await;

        client
            .delete_row(
                &instance,
                &table,
                pk(1),
                &RequestOptions::new()
                    .set("limit", 10)
                    .set("columns_to_get", "a"),
            )
            .await
            .unwrap();
        assert_eq!(transport.submitted().len(), 2);
    }
}
