use crate::{
    Error,
    db::{
        Db,
        cursor::{PageCursor, TextCursor},
        executor::{DeleteExecutor, LoadExecutor, SaveExecutor, SaveMode},
        query::Predicates,
        response::{Page, SaveOutcome},
        schema::{COMPONENT_DESCRIPTOR_SCOPE_COLUMN, COMPONENT_DESCRIPTOR_TYPE_COLUMN},
    },
    entity::{ComponentDescriptor, ComponentScope, ComponentType},
    types::Ulid,
};

///
/// ComponentDescriptorDao
///
/// Access object for component descriptors. Descriptors are unique per
/// class; `save` creates at most one row per class even under concurrent
/// callers.
///

#[derive(Clone, Debug)]
pub struct ComponentDescriptorDao {
    db: Db,
}

impl ComponentDescriptorDao {
    #[must_use]
    pub const fn new(db: Db) -> Self {
        Self { db }
    }

    fn load(&self) -> LoadExecutor<'_, ComponentDescriptor> {
        LoadExecutor::new(&self.db)
    }

    /// Create the descriptor if its class is not yet stored.
    /// Returns `None` when a descriptor with the same class already exists.
    pub fn save(
        &self,
        descriptor: ComponentDescriptor,
    ) -> Result<Option<ComponentDescriptor>, Error> {
        self.save_with(descriptor, SaveMode::InsertIfAbsent)
            .map(SaveOutcome::into_created)
    }

    pub fn save_with(
        &self,
        descriptor: ComponentDescriptor,
        mode: SaveMode,
    ) -> Result<SaveOutcome<ComponentDescriptor>, Error> {
        tracing::debug!(clazz = %descriptor.clazz, ?mode, "save component descriptor");
        let outcome = SaveExecutor::new(&self.db).save(descriptor, mode)?;
        tracing::debug!(created = outcome.created, "save component descriptor result");

        Ok(outcome)
    }

    pub fn find_by_id(&self, id: Ulid) -> Result<Option<ComponentDescriptor>, Error> {
        tracing::debug!(%id, "search component descriptor by id");
        let found = self.load().find_by_id(id)?;
        tracing::trace!(found = found.is_some(), descriptor = ?found, "search result");

        Ok(found)
    }

    pub fn find_by_clazz(&self, clazz: &str) -> Result<Option<ComponentDescriptor>, Error> {
        tracing::debug!(clazz, "search component descriptor by clazz");
        let found = self.load().find_by_natural_key(&clazz.to_string())?;
        tracing::trace!(found = found.is_some(), descriptor = ?found, "search result");

        Ok(found)
    }

    pub fn find_by_type_page(
        &self,
        component_type: ComponentType,
        cursor: &TextCursor,
    ) -> Result<Page<ComponentDescriptor, TextCursor>, Error> {
        tracing::debug!(%component_type, ?cursor, "find component descriptors by type");
        let predicates = Predicates::new().eq(COMPONENT_DESCRIPTOR_TYPE_COLUMN, component_type);
        let page = self.load().text_page(&predicates, cursor)?;
        tracing::debug!(items = page.len(), has_more = page.has_more(), "search result");

        Ok(page)
    }

    pub fn find_by_scope_and_type_page(
        &self,
        scope: ComponentScope,
        component_type: ComponentType,
        cursor: &TextCursor,
    ) -> Result<Page<ComponentDescriptor, TextCursor>, Error> {
        tracing::debug!(%scope, %component_type, ?cursor, "find component descriptors by scope and type");
        let predicates = Predicates::new()
            .eq(COMPONENT_DESCRIPTOR_TYPE_COLUMN, component_type)
            .eq(COMPONENT_DESCRIPTOR_SCOPE_COLUMN, scope);
        let page = self.load().text_page(&predicates, cursor)?;
        tracing::debug!(items = page.len(), has_more = page.has_more(), "search result");

        Ok(page)
    }

    pub fn find_by_filter_page(
        &self,
        predicates: &Predicates,
        cursor: &PageCursor,
    ) -> Result<Page<ComponentDescriptor>, Error> {
        tracing::debug!(?predicates, ?cursor, "find component descriptors by filter");
        self.load().page(predicates, cursor)
    }

    /// Continue a scan from a token returned by `Page::next_token`.
    pub fn find_page_by_token(
        &self,
        predicates: &Predicates,
        token: &[u8],
    ) -> Result<Page<ComponentDescriptor>, Error> {
        self.load().page_from_token(predicates, token)
    }

    pub fn delete_by_id(&self, id: Ulid) -> Result<(), Error> {
        tracing::debug!(%id, "delete component descriptor by id");
        let deleted = DeleteExecutor::<ComponentDescriptor>::new(&self.db).delete_by_id(id)?;
        tracing::debug!(deleted, "delete result");

        Ok(())
    }

    pub fn delete_by_clazz(&self, clazz: &str) -> Result<(), Error> {
        tracing::debug!(clazz, "delete component descriptor by clazz");
        let deleted = DeleteExecutor::<ComponentDescriptor>::new(&self.db)
            .delete_by_natural_key(&clazz.to_string())?;
        tracing::debug!(deleted, "delete result");

        Ok(())
    }
}
