use crate::{
    Error,
    db::{
        Db,
        cursor::{PageCursor, TimeCursor},
        executor::{DeleteExecutor, LoadExecutor, SaveExecutor, SaveMode},
        query::Predicates,
        response::{Page, SaveOutcome},
        schema::{
            EVENT_ENTITY_ID_COLUMN, EVENT_ENTITY_TYPE_COLUMN, EVENT_TENANT_ID_COLUMN,
            EVENT_TYPE_COLUMN,
        },
    },
    entity::{EntityId, Event, EventKey},
    types::Ulid,
};

///
/// EventDao
///
/// Access object for events, paged by time within a tenant and entity.
///

#[derive(Clone, Debug)]
pub struct EventDao {
    db: Db,
}

impl EventDao {
    #[must_use]
    pub const fn new(db: Db) -> Self {
        Self { db }
    }

    fn load(&self) -> LoadExecutor<'_, Event> {
        LoadExecutor::new(&self.db)
    }

    /// Write the event, replacing any event with the same natural key.
    pub fn save(&self, event: Event) -> Result<Event, Error> {
        self.save_with(event, SaveMode::Upsert)
            .map(|outcome| outcome.entity)
    }

    /// Write the event only if its natural key is not yet stored.
    pub fn save_if_not_exists(&self, event: Event) -> Result<Option<Event>, Error> {
        self.save_with(event, SaveMode::InsertIfAbsent)
            .map(SaveOutcome::into_created)
    }

    pub fn save_with(&self, event: Event, mode: SaveMode) -> Result<SaveOutcome<Event>, Error> {
        tracing::debug!(
            tenant = %event.tenant_id,
            entity = %event.entity_id,
            event_type = %event.event_type,
            uid = %event.event_uid,
            ?mode,
            "save event"
        );
        let outcome = SaveExecutor::new(&self.db).save(event, mode)?;
        tracing::trace!(created = outcome.created, "save event result");

        Ok(outcome)
    }

    /// Point lookup by natural key.
    pub fn find_event(&self, key: &EventKey) -> Result<Option<Event>, Error> {
        tracing::debug!(?key, "search event by natural key");
        let found = self.load().find_by_natural_key(key)?;
        tracing::trace!(found = found.is_some(), event = ?found, "search result");

        Ok(found)
    }

    pub fn find_by_id(&self, id: Ulid) -> Result<Option<Event>, Error> {
        tracing::debug!(%id, "search event by id");
        self.load().find_by_id(id)
    }

    pub fn find_events_page(
        &self,
        tenant_id: Ulid,
        entity_id: EntityId,
        cursor: &TimeCursor,
    ) -> Result<Page<Event, TimeCursor>, Error> {
        tracing::trace!(%tenant_id, %entity_id, ?cursor, "find events");
        let predicates = entity_predicates(tenant_id, entity_id);
        let page = self.load().time_page(&predicates, cursor)?;
        tracing::trace!(items = page.len(), has_more = page.has_more(), "found events");

        Ok(page)
    }

    pub fn find_events_by_type_page(
        &self,
        tenant_id: Ulid,
        entity_id: EntityId,
        event_type: &str,
        cursor: &TimeCursor,
    ) -> Result<Page<Event, TimeCursor>, Error> {
        tracing::trace!(%tenant_id, %entity_id, event_type, ?cursor, "find events by type");
        let predicates = entity_predicates(tenant_id, entity_id).eq(EVENT_TYPE_COLUMN, event_type);
        let page = self.load().time_page(&predicates, cursor)?;
        tracing::trace!(items = page.len(), has_more = page.has_more(), "found events");

        Ok(page)
    }

    pub fn find_by_filter_page(
        &self,
        predicates: &Predicates,
        cursor: &PageCursor,
    ) -> Result<Page<Event>, Error> {
        tracing::trace!(?predicates, ?cursor, "find events by filter");
        self.load().page(predicates, cursor)
    }

    /// Continue a scan from a token returned by `Page::next_token`.
    pub fn find_page_by_token(
        &self,
        predicates: &Predicates,
        token: &[u8],
    ) -> Result<Page<Event>, Error> {
        self.load().page_from_token(predicates, token)
    }

    pub fn delete_by_id(&self, id: Ulid) -> Result<(), Error> {
        tracing::debug!(%id, "delete event by id");
        let deleted = DeleteExecutor::<Event>::new(&self.db).delete_by_id(id)?;
        tracing::debug!(deleted, "delete result");

        Ok(())
    }

    pub fn delete_by_natural_key(&self, key: &EventKey) -> Result<(), Error> {
        tracing::debug!(?key, "delete event by natural key");
        let deleted = DeleteExecutor::<Event>::new(&self.db).delete_by_natural_key(key)?;
        tracing::debug!(deleted, "delete result");

        Ok(())
    }
}

/// Equality predicates selecting one entity's events within a tenant.
#[must_use]
pub fn entity_predicates(tenant_id: Ulid, entity_id: EntityId) -> Predicates {
    Predicates::new()
        .eq(EVENT_TENANT_ID_COLUMN, tenant_id)
        .eq(EVENT_ENTITY_TYPE_COLUMN, entity_id.entity_type)
        .eq(EVENT_ENTITY_ID_COLUMN, entity_id.id)
}
