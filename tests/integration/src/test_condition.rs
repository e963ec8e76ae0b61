//! Conditional write integration tests.

#[cfg(test)]
mod tests {
    use tablestore_core::condition;
    use tablestore_core::expression::{Bindings, bindings, col, parse_filter, var};
    use tablestore_core::{InstanceId, TableStoreError};
    use tablestore_model::error::TransportErrorCode;
    use tablestore_model::options::{ColumnOperand, RequestOptions};
    use tablestore_model::value::{Column, ColumnValue};

    use crate::{TEST_INSTANCE, client, create_test_table, pk};

    fn is_condition_failure(result: &Result<impl std::fmt::Debug, TableStoreError>) -> bool {
        matches!(
            result,
            Err(TableStoreError::Transport(e)) if e.code == TransportErrorCode::OTSConditionCheckFail
        )
    }

    #[tokio::test]
    async fn test_should_refuse_second_insert_with_expect_not_exist() {
        let (client, _) = client();
        let instance = InstanceId::new(TEST_INSTANCE);
        let table = create_test_table(&client, "insert").await;
        let options = RequestOptions::new().symbol("condition", "expect_not_exist");

        client
            .put_row(&instance, &table, pk(1), vec![Column::new("v", 1)], &options)
            .await
            .unwrap();
        let second = client
            .put_row(&instance, &table, pk(1), vec![Column::new("v", 2)], &options)
            .await;
        assert!(is_condition_failure(&second));

        let row = client
            .get_row(&instance, &table, pk(1), &RequestOptions::new())
            .await
            .unwrap()
            .row
            .unwrap();
        assert_eq!(row.attribute("v"), Some(&ColumnValue::Integer(1)));
    }

    #[tokio::test]
    async fn test_should_refuse_update_of_missing_row_with_expect_exist() {
        let (client, transport) = client();
        let instance = InstanceId::new(TEST_INSTANCE);
        let table = create_test_table(&client, "exist").await;

        let result = client
            .update_row(
                &instance,
                &table,
                pk(9),
                &RequestOptions::new()
                    .set("condition", condition::build("expect_exist").unwrap())
                    .set("put", vec![ColumnOperand::value("a", 1)]),
            )
            .await;
        assert!(is_condition_failure(&result));
        assert_eq!(transport.row_count(&table), Some(0));
    }

    #[tokio::test]
    async fn test_should_apply_column_condition() {
        let (client, _) = client();
        let instance = InstanceId::new(TEST_INSTANCE);
        let table = create_test_table(&client, "column").await;
        client
            .put_row(
                &instance,
                &table,
                pk(1),
                vec![Column::new("version", 3)],
                &RequestOptions::new(),
            )
            .await
            .unwrap();

        // Optimistic lock: bump only if the stored version is the one we read.
        let guarded = |expected: i64| {
            condition::build_with(
                "expect_exist",
                &col("version").eq(var("expected")),
                &bindings([("expected", expected)]),
            )
            .unwrap()
        };

        let stale = client
            .update_row(
                &instance,
                &table,
                pk(1),
                &RequestOptions::new()
                    .set("condition", guarded(2))
                    .set("increment", vec![ColumnOperand::value("version", 1)]),
            )
            .await;
        assert!(is_condition_failure(&stale));

        client
            .update_row(
                &instance,
                &table,
                pk(1),
                &RequestOptions::new()
                    .set("condition", guarded(3))
                    .set("increment", vec![ColumnOperand::value("version", 1)]),
            )
            .await
            .unwrap();

        let row = client
            .get_row(&instance, &table, pk(1), &RequestOptions::new())
            .await
            .unwrap()
            .row
            .unwrap();
        assert_eq!(row.attribute("version"), Some(&ColumnValue::Integer(4)));
    }

    #[tokio::test]
    async fn test_should_honour_inline_ignore_if_missing() {
        let (client, _) = client();
        let instance = InstanceId::new(TEST_INSTANCE);
        let table = create_test_table(&client, "missingcol").await;
        client
            .put_row(&instance, &table, pk(1), vec![Column::new("a", 1)], &RequestOptions::new())
            .await
            .unwrap();

        let strict = condition::build_with(
            "ignore",
            &parse_filter("owner[ignore_if_missing: false] == \"ann\"").unwrap(),
            &Bindings::new(),
        )
        .unwrap();
        let result = client
            .delete_row(
                &instance,
                &table,
                pk(1),
                &RequestOptions::new().set("condition", strict),
            )
            .await;
        assert!(is_condition_failure(&result));

        let lenient = condition::build_with(
            "ignore",
            &parse_filter("owner[ignore_if_missing: true] == \"ann\"").unwrap(),
            &Bindings::new(),
        )
        .unwrap();
        client
            .delete_row(
                &instance,
                &table,
                pk(1),
                &RequestOptions::new().set("condition", lenient),
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_should_reject_unknown_existence_before_sending() {
        let (client, transport) = client();
        let instance = InstanceId::new(TEST_INSTANCE);

        let result = client
            .put_row(
                &instance,
                "anything",
                pk(1),
                vec![],
                &RequestOptions::new().symbol("condition", "expect_maybe"),
            )
            .await;
        assert!(matches!(
            result,
            Err(TableStoreError::InvalidExistence(ref s)) if s == "expect_maybe"
        ));
        assert!(transport.submitted().is_empty());
    }

    #[tokio::test]
    async fn test_should_reject_malformed_column_options() {
        let result = condition::build_with(
            "ignore",
            &parse_filter("age[ignore_if_missing: maybe] > 1").unwrap(),
            &Bindings::new(),
        );
        assert!(matches!(result, Err(TableStoreError::InvalidFilterExpression(_))));
    }
}
