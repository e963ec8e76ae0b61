//! Range scan integration tests.

#[cfg(test)]
mod tests {
    use tablestore_core::expression::{Bindings, compile, parse_filter};
    use tablestore_core::{InstanceId, TableStoreClient, TableStoreError};
    use tablestore_model::operations::TableStoreOperation;
    use tablestore_model::options::RequestOptions;
    use tablestore_model::value::{Column, PrimaryKey, PrimaryKeyColumn, PrimaryKeyValue, Row};

    use crate::{MemoryTransport, TEST_INSTANCE, client_with, create_test_table, pk};

    fn bound(value: PrimaryKeyValue) -> PrimaryKey {
        vec![PrimaryKeyColumn {
            name: "id".to_owned(),
            value,
        }]
    }

    fn ids(rows: &[Row]) -> Vec<i64> {
        rows.iter()
            .filter_map(|row| match row.primary_key[0].value {
                PrimaryKeyValue::Integer(n) => Some(n),
                _ => None,
            })
            .collect()
    }

    async fn seed(client: &TableStoreClient, prefix: &str, count: i64) -> String {
        let instance = InstanceId::new(TEST_INSTANCE);
        let table = create_test_table(client, prefix).await;
        let writes = (0..count).map(|i| {
            let table = table.clone();
            let instance = instance.clone();
            async move {
                client
                    .put_row(
                        &instance,
                        &table,
                        pk(i),
                        vec![Column::new("even", i % 2 == 0)],
                        &RequestOptions::new(),
                    )
                    .await
            }
        });
        for result in futures::future::join_all(writes).await {
            result.unwrap();
        }
        table
    }

    #[tokio::test]
    async fn test_should_return_one_page_with_continuation() {
        let (client, _) = client_with(MemoryTransport::new().with_page_size(10));
        let instance = InstanceId::new(TEST_INSTANCE);
        let table = seed(&client, "page", 25).await;

        let first = client
            .get_range(
                &instance,
                &table,
                bound(PrimaryKeyValue::InfMin),
                bound(PrimaryKeyValue::InfMax),
                &RequestOptions::new(),
            )
            .await
            .unwrap();
        assert_eq!(ids(&first.rows), (0..10).collect::<Vec<_>>());
        assert_eq!(first.next_start_primary_key, Some(pk(10)));

        let token = first.next_token.unwrap();
        let second = client
            .get_range(
                &instance,
                &table,
                token,
                bound(PrimaryKeyValue::InfMax),
                &RequestOptions::new(),
            )
            .await
            .unwrap();
        assert_eq!(ids(&second.rows), (10..20).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_should_iterate_whole_range_across_pages() {
        let (client, transport) = client_with(MemoryTransport::new().with_page_size(10));
        let instance = InstanceId::new(TEST_INSTANCE);
        let table = seed(&client, "iterate", 25).await;

        let all = client
            .iterate_all_range(
                &instance,
                &table,
                bound(PrimaryKeyValue::InfMin),
                bound(PrimaryKeyValue::InfMax),
                &RequestOptions::new(),
            )
            .await
            .unwrap();
        assert_eq!(ids(&all.rows), (0..25).collect::<Vec<_>>());
        assert_eq!(all.consumed.read, 25);
        assert!(all.next_start_primary_key.is_none());

        let scans = transport
            .submitted()
            .into_iter()
            .filter(|op| *op == TableStoreOperation::GetRange)
            .count();
        assert_eq!(scans, 3);
    }

    #[tokio::test]
    async fn test_should_stop_iteration_at_limit() {
        let (client, _) = client_with(MemoryTransport::new().with_page_size(10));
        let instance = InstanceId::new(TEST_INSTANCE);
        let table = seed(&client, "limit", 25).await;

        let all = client
            .iterate_all_range(
                &instance,
                &table,
                pk(3),
                bound(PrimaryKeyValue::InfMax),
                &RequestOptions::new().set("limit", 4),
            )
            .await
            .unwrap();
        assert_eq!(ids(&all.rows), vec![3, 4, 5, 6]);
    }

    #[tokio::test]
    async fn test_should_scan_backward() {
        let (client, _) = client_with(MemoryTransport::new());
        let instance = InstanceId::new(TEST_INSTANCE);
        let table = seed(&client, "backward", 6).await;

        let page = client
            .get_range(
                &instance,
                &table,
                pk(4),
                pk(1),
                &RequestOptions::new().symbol("direction", "backward"),
            )
            .await
            .unwrap();
        assert_eq!(ids(&page.rows), vec![4, 3, 2]);
    }

    #[tokio::test]
    async fn test_should_filter_scanned_rows() {
        let (client, _) = client_with(MemoryTransport::new());
        let instance = InstanceId::new(TEST_INSTANCE);
        let table = seed(&client, "scanfilter", 6).await;

        let even = compile(&parse_filter("even == true").unwrap(), &Bindings::new()).unwrap();
        let page = client
            .get_range(
                &instance,
                &table,
                bound(PrimaryKeyValue::InfMin),
                bound(PrimaryKeyValue::InfMax),
                &RequestOptions::new().set("filter", even),
            )
            .await
            .unwrap();
        assert_eq!(ids(&page.rows), vec![0, 2, 4]);
    }

    #[tokio::test]
    async fn test_should_reject_unknown_direction_before_sending() {
        let (client, transport) = client_with(MemoryTransport::new());
        let instance = InstanceId::new(TEST_INSTANCE);

        let result = client
            .get_range(
                &instance,
                "anything",
                pk(0),
                pk(9),
                &RequestOptions::new().symbol("direction", "sideways"),
            )
            .await;
        assert!(matches!(result, Err(TableStoreError::InvalidDirection(_))));
        assert!(transport.submitted().is_empty());
    }
}
