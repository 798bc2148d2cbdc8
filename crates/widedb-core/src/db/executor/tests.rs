use crate::{
    Error,
    config::DbConfig,
    db::{
        Db,
        cursor::{CursorError, PageCursor, TextCursor, TimeCursor},
        executor::{DeleteExecutor, LoadExecutor, SaveExecutor, SaveMode},
        query::Predicates,
        schema::{
            COMPONENT_DESCRIPTOR_BY_ID_VIEW, COMPONENT_DESCRIPTOR_SCHEMA,
            COMPONENT_DESCRIPTOR_TABLE, COMPONENT_DESCRIPTOR_TYPE_COLUMN,
        },
        statement::{Insert, Statement},
        store::{MemoryStore, ResultSet, Session, StoreError},
    },
    entity::{ComponentDescriptor, ComponentScope, ComponentType},
    test_support::Fixture,
    traits::EntityKind,
    types::Ulid,
};
use std::sync::{Arc, Mutex};

fn descriptor(name: &str) -> ComponentDescriptor {
    ComponentDescriptor::new(
        ComponentType::Action,
        ComponentScope::Tenant,
        name,
        format!("org.example.{name}"),
    )
}

fn actions() -> Predicates {
    Predicates::new().eq(COMPONENT_DESCRIPTOR_TYPE_COLUMN, ComponentType::Action)
}

fn seed(fixture: &Fixture, names: &[&str]) {
    let save = SaveExecutor::<ComponentDescriptor>::new(&fixture.db);
    for name in names {
        save.save(descriptor(name), SaveMode::InsertIfAbsent)
            .expect("seed save");
    }
}

#[test]
fn save_assigns_missing_id() {
    let fixture = Fixture::new();
    let outcome = SaveExecutor::new(&fixture.db)
        .save(descriptor("Mail"), SaveMode::InsertIfAbsent)
        .expect("save");

    assert!(outcome.created);
    assert!(outcome.entity.id.is_some());
}

#[test]
fn save_keeps_caller_id() {
    let fixture = Fixture::new();
    let id = Ulid::from_parts(1_000, 1);
    let mut entity = descriptor("Mail");
    entity.id = Some(id);

    let outcome = SaveExecutor::new(&fixture.db)
        .save(entity, SaveMode::Upsert)
        .expect("save");

    assert_eq!(outcome.entity.id, Some(id));
}

#[test]
fn conditional_save_reports_existing_row_without_overwriting() {
    let fixture = Fixture::new();
    let save = SaveExecutor::<ComponentDescriptor>::new(&fixture.db);

    let first = save.insert_if_absent(descriptor("Mail")).expect("first");
    let mut again = descriptor("Mail");
    again.name = "Renamed".to_string();
    let second = save.insert_if_absent(again).expect("second");

    assert!(first.created);
    assert!(!second.created);
    assert_eq!(fixture.metrics.snapshot().conditions_not_met, 1);

    let stored = LoadExecutor::<ComponentDescriptor>::new(&fixture.db)
        .find_by_natural_key(&"org.example.Mail".to_string())
        .expect("load")
        .expect("row should exist");
    assert_eq!(stored.name, "Mail");
    assert_eq!(stored.id, first.entity.id);
}

#[test]
fn upsert_overwrites_existing_row() {
    let fixture = Fixture::new();
    let save = SaveExecutor::<ComponentDescriptor>::new(&fixture.db);

    save.upsert(descriptor("Mail")).expect("first");
    let mut again = descriptor("Mail");
    again.actions = Some("send".to_string());
    save.upsert(again).expect("second");

    let stored = LoadExecutor::<ComponentDescriptor>::new(&fixture.db)
        .find_by_natural_key(&"org.example.Mail".to_string())
        .expect("load")
        .expect("row should exist");
    assert_eq!(stored.actions.as_deref(), Some("send"));
    assert_eq!(
        fixture
            .store
            .row_count(COMPONENT_DESCRIPTOR_TABLE)
            .expect("count"),
        1
    );
}

#[test]
fn page_returns_exactly_page_size_and_a_cursor_when_more_exist() {
    let fixture = Fixture::new();
    seed(&fixture, &["a", "b", "c", "d", "e"]);
    let load = LoadExecutor::<ComponentDescriptor>::new(&fixture.db);

    let page = load
        .text_page(&actions(), &TextCursor::first(2).expect("cursor"))
        .expect("page");
    let names = page.items().iter().map(|d| d.name.as_str()).collect::<Vec<_>>();

    assert_eq!(names, ["a", "b"]);
    let next = page.next_cursor().expect("more rows remain");
    assert_eq!(next.text_offset(), Some("b"));
    assert_eq!(next.id_offset(), page.items()[1].id);
}

#[test]
fn exact_multiple_ends_with_terminal_cursor() {
    let fixture = Fixture::new();
    seed(&fixture, &["a", "b", "c", "d"]);
    let load = LoadExecutor::<ComponentDescriptor>::new(&fixture.db);

    let first = load
        .text_page(&actions(), &TextCursor::first(2).expect("cursor"))
        .expect("page 1");
    let second = load
        .text_page(&actions(), first.next_cursor().expect("cursor 1"))
        .expect("page 2");

    assert_eq!(second.len(), 2);
    assert!(!second.has_more());
}

#[test]
fn empty_result_is_terminal() {
    let fixture = Fixture::new();
    let page = LoadExecutor::<ComponentDescriptor>::new(&fixture.db)
        .text_page(&actions(), &TextCursor::first(10).expect("cursor"))
        .expect("page");

    assert!(page.is_empty());
    assert!(page.next_cursor().is_none());
}

#[test]
fn oversized_page_is_rejected_before_any_store_call() {
    let fixture = Fixture::with_config(DbConfig {
        max_page_size: 50,
        ..DbConfig::default()
    });
    fixture.store.set_available(false);

    let err = LoadExecutor::<ComponentDescriptor>::new(&fixture.db)
        .page(&actions(), &TextCursor::first(51).expect("cursor").into())
        .expect_err("page size above max");

    assert!(matches!(
        err,
        Error::Cursor(CursorError::InvalidPageSize {
            page_size: 51,
            max: 50
        })
    ));
    assert_eq!(fixture.metrics.snapshot().load_calls, 0);
}

#[test]
fn storage_failure_surfaces_unchanged() {
    let fixture = Fixture::new();
    seed(&fixture, &["a"]);
    fixture.store.set_available(false);

    let err = LoadExecutor::<ComponentDescriptor>::new(&fixture.db)
        .page(&actions(), &TextCursor::first(5).expect("cursor").into())
        .expect_err("store offline");

    assert!(err.is_storage_unavailable());
    assert!(matches!(err, Error::Store(StoreError::Unavailable { .. })));
}

#[test]
fn time_cursor_on_text_views_is_unsupported() {
    let fixture = Fixture::new();
    let err = LoadExecutor::<ComponentDescriptor>::new(&fixture.db)
        .page(
            &actions(),
            &PageCursor::Time(TimeCursor::first(5, true).expect("cursor")),
        )
        .expect_err("descriptors have no time view");

    assert!(matches!(err, Error::Query(_)));
}

#[test]
fn delete_by_id_resolves_natural_key() {
    let fixture = Fixture::new();
    let saved = SaveExecutor::<ComponentDescriptor>::new(&fixture.db)
        .upsert(descriptor("Mail"))
        .expect("save");
    let id = saved.id.expect("id assigned");
    let delete = DeleteExecutor::<ComponentDescriptor>::new(&fixture.db);

    assert!(delete.delete_by_id(id).expect("delete"));
    assert!(!delete.delete_by_id(id).expect("delete again"));
    assert!(
        LoadExecutor::<ComponentDescriptor>::new(&fixture.db)
            .find_by_id(id)
            .expect("load")
            .is_none()
    );
}

#[test]
fn executors_report_to_the_metrics_sink() {
    let fixture = Fixture::new();
    seed(&fixture, &["a", "b", "c"]);
    LoadExecutor::<ComponentDescriptor>::new(&fixture.db)
        .text_page(&actions(), &TextCursor::first(2).expect("cursor"))
        .expect("page");
    DeleteExecutor::<ComponentDescriptor>::new(&fixture.db)
        .delete_by_natural_key(&"org.example.a".to_string())
        .expect("delete");

    let snapshot = fixture.metrics.snapshot();
    assert_eq!(snapshot.save_calls, 3);
    assert_eq!(snapshot.load_calls, 1);
    assert_eq!(snapshot.rows_loaded, 2);
    assert_eq!(snapshot.delete_calls, 1);
    assert_eq!(snapshot.rows_deleted, 1);
}

#[test]
fn deleting_an_absent_key_counts_no_rows() {
    let fixture = Fixture::new();
    let delete = DeleteExecutor::<ComponentDescriptor>::new(&fixture.db);

    assert!(
        !delete
            .delete_by_natural_key(&"org.example.missing".to_string())
            .expect("delete")
    );

    let snapshot = fixture.metrics.snapshot();
    assert_eq!(snapshot.delete_calls, 1);
    assert_eq!(snapshot.rows_deleted, 0);
}

///
/// RecreateAfterLookup
///
/// Session that re-creates the looked-up row under a new id right after
/// the id-view read, the way a concurrent writer could.
///

struct RecreateAfterLookup {
    inner: Arc<MemoryStore>,
    replacement: Mutex<Option<Insert>>,
}

impl Session for RecreateAfterLookup {
    fn execute(&self, statement: &Statement) -> Result<ResultSet, StoreError> {
        let result = self.inner.execute(statement)?;
        if let Statement::Select(select) = statement
            && select.table == COMPONENT_DESCRIPTOR_BY_ID_VIEW
            && let Some(insert) = self.replacement.lock().expect("lock").take()
        {
            self.inner.execute(&Statement::Insert(insert))?;
        }

        Ok(result)
    }
}

#[test]
fn delete_by_id_leaves_a_row_recreated_under_the_same_key() {
    let store = Arc::new(MemoryStore::new().with_table(COMPONENT_DESCRIPTOR_SCHEMA));
    let plain = Db::new(store.clone());
    let old = SaveExecutor::<ComponentDescriptor>::new(&plain)
        .upsert(descriptor("Mail"))
        .expect("save");
    let old_id = old.id.expect("id assigned");

    let new_id = Ulid::from_parts(9_999, 9);
    let mut recreated = descriptor("Mail");
    recreated.id = Some(new_id);
    let insert = recreated
        .to_values()
        .into_iter()
        .fold(Insert::into(COMPONENT_DESCRIPTOR_TABLE), |insert, (column, value)| {
            insert.value(column, value)
        });

    let racing = Db::new(Arc::new(RecreateAfterLookup {
        inner: store.clone(),
        replacement: Mutex::new(Some(insert)),
    }));
    let deleted = DeleteExecutor::<ComponentDescriptor>::new(&racing)
        .delete_by_id(old_id)
        .expect("delete");

    assert!(!deleted);
    let survivor = LoadExecutor::<ComponentDescriptor>::new(&plain)
        .find_by_id(new_id)
        .expect("load")
        .expect("recreated row survives");
    assert_eq!(survivor.clazz, "org.example.Mail");
    assert_eq!(store.row_count(COMPONENT_DESCRIPTOR_TABLE).expect("count"), 1);
}
