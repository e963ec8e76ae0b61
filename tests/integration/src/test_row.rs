//! Single-row read and write integration tests.

#[cfg(test)]
mod tests {
    use tablestore_core::expression::{Bindings, bindings, col, compile, parse_filter, var};
    use tablestore_core::{InstanceId, TableStoreError};
    use tablestore_model::error::TransportErrorCode;
    use tablestore_model::options::{ColumnOperand, RequestOptions};
    use tablestore_model::types::{PrimaryKeySchema, PrimaryKeyType};
    use tablestore_model::value::{Column, ColumnValue, PrimaryKeyColumn, PrimaryKeyValue};

    use crate::{TEST_INSTANCE, client, create_test_table, pk, test_table_name};

    #[tokio::test]
    async fn test_should_put_and_get_row() {
        let (client, _) = client();
        let instance = InstanceId::new(TEST_INSTANCE);
        let table = create_test_table(&client, "putget").await;

        client
            .put_row(
                &instance,
                &table,
                pk(1),
                vec![Column::new("name", "Ann"), Column::new("age", 30)],
                &RequestOptions::new(),
            )
            .await
            .unwrap();

        let row = client
            .get_row(&instance, &table, pk(1), &RequestOptions::new())
            .await
            .unwrap()
            .row
            .unwrap();
        assert_eq!(row.primary_key, pk(1));
        assert_eq!(row.attribute("name"), Some(&ColumnValue::from("Ann")));
        assert_eq!(row.attribute("age"), Some(&ColumnValue::Integer(30)));
    }

    #[tokio::test]
    async fn test_should_return_none_for_missing_row() {
        let (client, _) = client();
        let instance = InstanceId::new(TEST_INSTANCE);
        let table = create_test_table(&client, "missing").await;

        let response = client
            .get_row(&instance, &table, pk(42), &RequestOptions::new())
            .await
            .unwrap();
        assert!(response.row.is_none());
    }

    #[tokio::test]
    async fn test_should_project_columns_to_get() {
        let (client, _) = client();
        let instance = InstanceId::new(TEST_INSTANCE);
        let table = create_test_table(&client, "project").await;
        client
            .put_row(
                &instance,
                &table,
                pk(1),
                vec![Column::new("a", 1), Column::new("b", 2), Column::new("c", 3)],
                &RequestOptions::new(),
            )
            .await
            .unwrap();

        let row = client
            .get_row(
                &instance,
                &table,
                pk(1),
                &RequestOptions::new().columns("columns_to_get", ["a", "c"]),
            )
            .await
            .unwrap()
            .row
            .unwrap();
        let names: Vec<&str> = row.attributes.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["a", "c"]);
    }

    #[tokio::test]
    async fn test_should_filter_row_with_compiled_expression() {
        let (client, _) = client();
        let instance = InstanceId::new(TEST_INSTANCE);
        let table = create_test_table(&client, "filter").await;
        client
            .put_row(
                &instance,
                &table,
                pk(1),
                vec![Column::new("age", 15), Column::new("city", "Hangzhou")],
                &RequestOptions::new(),
            )
            .await
            .unwrap();

        let adults = compile(
            &parse_filter("age >= min_age and city == \"Hangzhou\"").unwrap(),
            &bindings([("min_age", 18)]),
        )
        .unwrap();
        let response = client
            .get_row(
                &instance,
                &table,
                pk(1),
                &RequestOptions::new().set("filter", adults),
            )
            .await
            .unwrap();
        assert!(response.row.is_none());

        let teens = compile(&col("age").lt(var("max_age")), &bindings([("max_age", 18)])).unwrap();
        let response = client
            .get_row(
                &instance,
                &table,
                pk(1),
                &RequestOptions::new().set("filter", teens),
            )
            .await
            .unwrap();
        assert!(response.row.is_some());
    }

    #[tokio::test]
    async fn test_should_apply_update_operations() {
        let (client, _) = client();
        let instance = InstanceId::new(TEST_INSTANCE);
        let table = create_test_table(&client, "update").await;
        client
            .put_row(
                &instance,
                &table,
                pk(1),
                vec![
                    Column::new("visits", 10),
                    Column::new("nickname", "old"),
                    Column::new("tmp", true),
                ],
                &RequestOptions::new(),
            )
            .await
            .unwrap();

        let response = client
            .update_row(
                &instance,
                &table,
                pk(1),
                &RequestOptions::new()
                    .set("put", vec![ColumnOperand::value("nickname", "new")])
                    .set("increment", vec![ColumnOperand::value("visits", 5)])
                    .columns("delete_all", ["tmp"])
                    .symbol("return_type", "after_modify")
                    .columns("return_columns", ["visits"]),
            )
            .await
            .unwrap();
        let returned = response.row.unwrap();
        assert_eq!(returned.attribute("visits"), Some(&ColumnValue::Integer(15)));
        assert_eq!(returned.attribute("nickname"), None);

        let row = client
            .get_row(&instance, &table, pk(1), &RequestOptions::new())
            .await
            .unwrap()
            .row
            .unwrap();
        assert_eq!(row.attribute("nickname"), Some(&ColumnValue::from("new")));
        assert_eq!(row.attribute("visits"), Some(&ColumnValue::Integer(15)));
        assert_eq!(row.attribute("tmp"), None);
    }

    #[tokio::test]
    async fn test_should_create_row_on_update_of_missing_row() {
        let (client, transport) = client();
        let instance = InstanceId::new(TEST_INSTANCE);
        let table = create_test_table(&client, "upsert").await;

        client
            .update_row(
                &instance,
                &table,
                pk(7),
                &RequestOptions::new().set("increment", vec![ColumnOperand::value("n", 1)]),
            )
            .await
            .unwrap();
        assert_eq!(transport.row_count(&table), Some(1));
    }

    #[tokio::test]
    async fn test_should_delete_row_and_return_primary_key() {
        let (client, transport) = client();
        let instance = InstanceId::new(TEST_INSTANCE);
        let table = create_test_table(&client, "delete").await;
        client
            .put_row(&instance, &table, pk(1), vec![Column::new("a", 1)], &RequestOptions::new())
            .await
            .unwrap();

        let response = client
            .delete_row(
                &instance,
                &table,
                pk(1),
                &RequestOptions::new().symbol("return_type", "pk"),
            )
            .await
            .unwrap();
        let returned = response.row.unwrap();
        assert_eq!(returned.primary_key, pk(1));
        assert!(returned.attributes.is_empty());
        assert_eq!(transport.row_count(&table), Some(0));
    }

    #[tokio::test]
    async fn test_should_allocate_auto_increment_keys() {
        let (client, _) = client();
        let instance = InstanceId::new(TEST_INSTANCE);
        let table = test_table_name("autoinc");
        client
            .create_table(
                &instance,
                &table,
                vec![
                    PrimaryKeySchema::new("user", PrimaryKeyType::String),
                    PrimaryKeySchema::new("seq", PrimaryKeyType::Integer).auto_increment(),
                ],
                &RequestOptions::new(),
            )
            .await
            .unwrap();

        let mut allocated = Vec::new();
        for _ in 0..2 {
            let response = client
                .put_row(
                    &instance,
                    &table,
                    vec![
                        PrimaryKeyColumn::new("user", "ann"),
                        PrimaryKeyColumn {
                            name: "seq".to_owned(),
                            value: PrimaryKeyValue::AutoIncrement,
                        },
                    ],
                    vec![Column::new("msg", "hi")],
                    &RequestOptions::new().symbol("return_type", "pk"),
                )
                .await
                .unwrap();
            allocated.push(response.row.unwrap().primary_key[1].value.clone());
        }
        assert_eq!(
            allocated,
            vec![PrimaryKeyValue::Integer(1), PrimaryKeyValue::Integer(2)]
        );
    }

    #[tokio::test]
    async fn test_should_refuse_update_when_table_disallows_it() {
        let (client, _) = client();
        let instance = InstanceId::new(TEST_INSTANCE);
        let table = create_test_table(&client, "noupdate").await;
        client
            .update_table(
                &instance,
                &table,
                &RequestOptions::new().set("allow_update", false),
            )
            .await
            .unwrap();

        let result = client
            .update_row(
                &instance,
                &table,
                pk(1),
                &RequestOptions::new().set("put", vec![ColumnOperand::value("a", 1)]),
            )
            .await;
        assert!(matches!(
            result,
            Err(TableStoreError::Transport(e)) if e.code == TransportErrorCode::OTSParameterInvalid
        ));
    }

    #[tokio::test]
    async fn test_should_reject_unbound_filter_variable_before_sending() {
        let (_client, transport) = client();

        let result = compile(&parse_filter("age > min_age").unwrap(), &Bindings::new());
        assert!(matches!(
            result,
            Err(TableStoreError::UnboundVariable { ref name, .. }) if name == "min_age"
        ));
        assert!(transport.submitted().is_empty());
    }
}
