//! Batch read and write integration tests.

#[cfg(test)]
mod tests {
    use tablestore_core::{InstanceId, TableStoreError, batch};
    use tablestore_model::error::TransportErrorCode;
    use tablestore_model::options::{ColumnOperand, RequestOptions};
    use tablestore_model::value::{Column, ColumnValue};

    use crate::{TEST_INSTANCE, client, create_test_table, pk};

    #[tokio::test]
    async fn test_should_write_and_read_batch_across_tables() {
        let (client, _) = client();
        let instance = InstanceId::new(TEST_INSTANCE);
        let users = create_test_table(&client, "users").await;
        let orders = create_test_table(&client, "orders").await;
        let none = RequestOptions::new();

        client
            .put_row(&instance, &users, pk(3), vec![Column::new("name", "Cy")], &none)
            .await
            .unwrap();

        let response = client
            .batch_write(
                &instance,
                vec![
                    batch::table(
                        &users,
                        vec![
                            batch::write("put", pk(1), vec![Column::new("name", "Ann")], &none)
                                .unwrap(),
                            batch::write_update(
                                pk(2),
                                &RequestOptions::new()
                                    .set("put", vec![ColumnOperand::value("name", "Bo")]),
                            )
                            .unwrap(),
                            batch::write_delete(pk(3), &none).unwrap(),
                        ],
                    ),
                    batch::table(
                        &orders,
                        vec![batch::write_put(pk(100), vec![Column::new("total", 9.5)], &none).unwrap()],
                    ),
                ],
                &none,
            )
            .await
            .unwrap();
        assert_eq!(response.tables.len(), 2);
        assert!(response.tables.iter().flat_map(|t| &t.rows).all(|r| r.is_ok));

        let read = client
            .batch_get(
                &instance,
                vec![
                    batch::get(
                        &users,
                        vec![pk(1), pk(2), pk(3)],
                        &RequestOptions::new().columns("columns_to_get", ["name"]),
                    )
                    .unwrap(),
                    batch::get(&orders, vec![pk(100)], &none).unwrap(),
                ],
            )
            .await
            .unwrap();
        let user_rows = &read.tables[0].rows;
        assert_eq!(
            user_rows[0].row.as_ref().and_then(|r| r.attribute("name")),
            Some(&ColumnValue::from("Ann"))
        );
        assert_eq!(
            user_rows[1].row.as_ref().and_then(|r| r.attribute("name")),
            Some(&ColumnValue::from("Bo"))
        );
        assert!(user_rows[2].is_ok);
        assert!(user_rows[2].row.is_none());
        assert_eq!(
            read.tables[1].rows[0]
                .row
                .as_ref()
                .and_then(|r| r.attribute("total")),
            Some(&ColumnValue::Double(9.5))
        );
    }

    #[tokio::test]
    async fn test_should_report_per_row_failures() {
        let (client, _) = client();
        let instance = InstanceId::new(TEST_INSTANCE);
        let table = create_test_table(&client, "partial").await;
        let none = RequestOptions::new();
        client
            .put_row(&instance, &table, pk(1), vec![], &none)
            .await
            .unwrap();

        let insert_only = RequestOptions::new().symbol("condition", "expect_not_exist");
        let response = client
            .batch_write(
                &instance,
                vec![batch::table(
                    &table,
                    vec![
                        batch::write_put(pk(1), vec![], &insert_only).unwrap(),
                        batch::write_put(pk(2), vec![], &insert_only).unwrap(),
                    ],
                )],
                &none,
            )
            .await
            .unwrap();
        let rows = &response.tables[0].rows;
        assert!(!rows[0].is_ok);
        assert_eq!(
            rows[0].error_code.as_deref(),
            Some(TransportErrorCode::OTSConditionCheckFail.as_str())
        );
        assert!(rows[1].is_ok);
    }

    #[tokio::test]
    async fn test_should_roll_back_atomic_batch() {
        let (client, transport) = client();
        let instance = InstanceId::new(TEST_INSTANCE);
        let table = create_test_table(&client, "atomic").await;
        let none = RequestOptions::new();

        let must_exist = RequestOptions::new().symbol("condition", "expect_exist");
        let response = client
            .batch_write(
                &instance,
                vec![batch::table(
                    &table,
                    vec![
                        batch::write_put(pk(1), vec![Column::new("a", 1)], &none).unwrap(),
                        batch::write_delete(pk(2), &must_exist).unwrap(),
                    ],
                )],
                &RequestOptions::new().set("is_atomic", true),
            )
            .await
            .unwrap();
        assert!(response.tables[0].rows.iter().all(|r| !r.is_ok));
        assert_eq!(transport.row_count(&table), Some(0));
    }

    #[tokio::test]
    async fn test_should_report_missing_table_per_row() {
        let (client, _) = client();
        let instance = InstanceId::new(TEST_INSTANCE);

        let read = client
            .batch_get(
                &instance,
                vec![batch::get("no_such_table", vec![pk(1)], &RequestOptions::new()).unwrap()],
            )
            .await
            .unwrap();
        let row = &read.tables[0].rows[0];
        assert!(!row.is_ok);
        assert_eq!(
            row.error_code.as_deref(),
            Some(TransportErrorCode::OTSObjectNotExist.as_str())
        );
    }

    #[test]
    fn test_should_reject_unknown_write_kind() {
        let result = batch::write("merge", pk(1), vec![], &RequestOptions::new());
        assert!(matches!(
            result,
            Err(TableStoreError::InvalidOperationKind(ref k)) if k == "merge"
        ));
    }
}
