use crate::{
    db::{
        direction::Direction,
        statement::{Clause, CompareOp, Delete, Insert, Select},
    },
    value::Value,
};
use std::cmp::Ordering;

#[test]
fn select_renders_clauses_order_and_limit() {
    let select = Select::from("component_desc_by_type_search_text")
        .and(Clause::eq("type", "ACTION"))
        .and(Clause::tuple(
            vec!["search_text", "id"],
            CompareOp::Gt,
            vec![Value::from("mail"), Value::Int(7)],
        ))
        .order_by("search_text", Direction::Asc)
        .order_by("id", Direction::Asc)
        .limit(11);

    assert_eq!(
        select.to_string(),
        "SELECT * FROM component_desc_by_type_search_text WHERE type = 'ACTION' \
         AND (search_text, id) > ('mail', 7) ORDER BY search_text ASC, id ASC LIMIT 11;"
    );
}

#[test]
fn insert_renders_if_not_exists() {
    let insert = Insert::into("component_descriptor")
        .value("clazz", "org.Foo")
        .value("name", "Foo")
        .if_not_exists();

    assert_eq!(
        insert.to_string(),
        "INSERT INTO component_descriptor(clazz,name) VALUES ('org.Foo','Foo') IF NOT EXISTS;"
    );
}

#[test]
fn delete_renders_where_list() {
    let delete = Delete::from("component_descriptor").and(Clause::eq("clazz", "org.Foo"));

    assert_eq!(
        delete.to_string(),
        "DELETE FROM component_descriptor WHERE clazz = 'org.Foo';"
    );
}

#[test]
fn delete_renders_conditions() {
    let guarded = Delete::from("component_descriptor")
        .and(Clause::eq("clazz", "org.Foo"))
        .only_if(Clause::eq("name", "Foo"));
    let existing = Delete::from("component_descriptor")
        .and(Clause::eq("clazz", "org.Foo"))
        .if_exists();

    assert_eq!(
        guarded.to_string(),
        "DELETE FROM component_descriptor WHERE clazz = 'org.Foo' IF name = 'Foo';"
    );
    assert_eq!(
        existing.to_string(),
        "DELETE FROM component_descriptor WHERE clazz = 'org.Foo' IF EXISTS;"
    );
    assert!(guarded.is_conditional());
    assert!(!Delete::from("component_descriptor").is_conditional());
}

#[test]
fn compare_op_accepts_matching_orderings() {
    assert!(CompareOp::Gte.accepts(Ordering::Equal));
    assert!(CompareOp::Gte.accepts(Ordering::Greater));
    assert!(!CompareOp::Gt.accepts(Ordering::Equal));
    assert!(CompareOp::Lte.accepts(Ordering::Less));
    assert!(!CompareOp::Lt.accepts(Ordering::Equal));
}

#[test]
fn equality_column_only_reports_single_column_equality() {
    assert_eq!(Clause::eq("type", "ACTION").equality_column(), Some("type"));
    assert_eq!(
        Clause::compare("id", CompareOp::Gt, Value::Int(1)).equality_column(),
        None
    );
}
