use crate::{
    db::{
        direction::Direction,
        schema::TableSchema,
        statement::{Clause, CompareOp, Delete, Insert, Select},
        store::{MemoryStore, Session, StoreError},
    },
    value::Value,
};

const ITEMS: TableSchema = TableSchema {
    name: "item",
    primary_key: &["sku"],
    views: &["item_by_group"],
};

fn store() -> MemoryStore {
    MemoryStore::new().with_table(ITEMS)
}

fn insert(store: &MemoryStore, sku: &str, group: &str, rank: i64) {
    store
        .execute(
            &Insert::into("item")
                .value("sku", sku)
                .value("group", group)
                .value("rank", rank)
                .into(),
        )
        .expect("insert should succeed");
}

#[test]
fn if_not_exists_keeps_first_row_and_reports_not_applied() {
    let store = store();
    let first = Insert::into("item")
        .value("sku", "a")
        .value("rank", 1_i64)
        .if_not_exists();
    let second = Insert::into("item")
        .value("sku", "a")
        .value("rank", 2_i64)
        .if_not_exists();

    let applied = store.execute(&first.into()).expect("first insert");
    let rejected = store.execute(&second.into()).expect("second insert");

    assert!(applied.was_applied());
    assert!(!rejected.was_applied());
    assert_eq!(rejected.rows()[0].get("rank"), &Value::Int(1));
    assert_eq!(store.row_count("item").expect("count"), 1);
}

#[test]
fn plain_insert_overwrites() {
    let store = store();
    insert(&store, "a", "g", 1);
    insert(&store, "a", "g", 9);

    let rows = store
        .execute(&Select::from("item").into())
        .expect("select")
        .into_rows();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get("rank"), &Value::Int(9));
}

#[test]
fn views_read_through_to_base_rows() {
    let store = store();
    insert(&store, "a", "red", 3);
    insert(&store, "b", "blue", 1);
    insert(&store, "c", "red", 2);

    let select = Select::from("item_by_group")
        .and(Clause::eq("group", "red"))
        .order_by("rank", Direction::Desc)
        .limit(5);
    let rows = store.execute(&select.into()).expect("select").into_rows();
    let skus = rows
        .iter()
        .map(|r| r.get("sku").as_text().unwrap_or_default().to_string())
        .collect::<Vec<_>>();

    assert_eq!(skus, ["a", "c"]);
}

#[test]
fn tuple_clause_compares_lexicographically() {
    let store = store();
    insert(&store, "a", "g", 1);
    insert(&store, "b", "g", 1);
    insert(&store, "c", "g", 2);

    let select = Select::from("item")
        .and(Clause::tuple(
            vec!["rank", "sku"],
            CompareOp::Gt,
            vec![Value::Int(1), Value::from("a")],
        ))
        .order_by("rank", Direction::Asc)
        .order_by("sku", Direction::Asc);
    let rows = store.execute(&select.into()).expect("select").into_rows();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].get("sku"), &Value::from("b"));
    assert_eq!(rows[1].get("sku"), &Value::from("c"));
}

#[test]
fn limit_truncates_after_sorting() {
    let store = store();
    for (sku, rank) in [("a", 3), ("b", 1), ("c", 2)] {
        insert(&store, sku, "g", rank);
    }

    let select = Select::from("item")
        .order_by("rank", Direction::Asc)
        .limit(2);
    let rows = store.execute(&select.into()).expect("select").into_rows();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].get("sku"), &Value::from("b"));
}

#[test]
fn delete_requires_full_primary_key() {
    let store = store();
    insert(&store, "a", "g", 1);

    let err = store
        .execute(&Delete::from("item").and(Clause::eq("group", "g")).into())
        .expect_err("partial key delete should fail");
    assert!(matches!(err, StoreError::InvalidStatement { .. }));

    store
        .execute(&Delete::from("item").and(Clause::eq("sku", "a")).into())
        .expect("delete by key");
    assert_eq!(store.row_count("item").expect("count"), 0);
}

#[test]
fn conditional_delete_checks_the_stored_row() {
    let store = store();
    insert(&store, "a", "g", 1);
    let by_key = || Delete::from("item").and(Clause::eq("sku", "a"));

    let stale = store
        .execute(&by_key().only_if(Clause::eq("rank", 2_i64)).into())
        .expect("stale delete");
    assert!(!stale.was_applied());
    assert_eq!(stale.rows()[0].get("rank"), &Value::Int(1));
    assert_eq!(store.row_count("item").expect("count"), 1);

    let current = store
        .execute(&by_key().only_if(Clause::eq("rank", 1_i64)).into())
        .expect("current delete");
    assert!(current.was_applied());
    assert_eq!(store.row_count("item").expect("count"), 0);

    let absent = store
        .execute(&by_key().if_exists().into())
        .expect("absent delete");
    assert!(!absent.was_applied());
    assert!(absent.rows().is_empty());
}

#[test]
fn writes_to_views_are_rejected() {
    let store = store();
    let err = store
        .execute(&Insert::into("item_by_group").value("sku", "a").into())
        .expect_err("view insert should fail");

    assert!(matches!(err, StoreError::InvalidStatement { .. }));
}

#[test]
fn insert_without_key_is_rejected() {
    let store = store();
    let err = store
        .execute(&Insert::into("item").value("rank", 1_i64).into())
        .expect_err("insert without key should fail");

    assert!(matches!(err, StoreError::InvalidStatement { .. }));
}

#[test]
fn offline_store_fails_every_statement() {
    let store = store();
    store.set_available(false);

    let err = store
        .execute(&Select::from("item").into())
        .expect_err("offline select should fail");
    assert!(matches!(err, StoreError::Unavailable { .. }));

    store.set_available(true);
    store
        .execute(&Select::from("item").into())
        .expect("select after recovery");
}
