use crate::{
    Error,
    db::{
        Db,
        executor::LoadExecutor,
        schema::ID_COLUMN,
        statement::{Clause, Delete},
    },
    obs::sink::{ExecKind, Span},
    traits::EntityKind,
    types::Ulid,
};
use std::marker::PhantomData;

///
/// DeleteExecutor
///
/// Removes base-table rows by natural key. Views follow their base table
/// inside the store; nothing here touches them. Every delete is
/// conditional so the store reports whether a row was actually removed.
///

pub struct DeleteExecutor<'a, E: EntityKind> {
    db: &'a Db,
    _marker: PhantomData<E>,
}

impl<'a, E: EntityKind> DeleteExecutor<'a, E> {
    #[must_use]
    pub const fn new(db: &'a Db) -> Self {
        Self {
            db,
            _marker: PhantomData,
        }
    }

    /// Delete the row with `key`. Deleting an absent key is a no-op.
    /// Returns whether a row was removed.
    pub fn delete_by_natural_key(&self, key: &E::NaturalKey) -> Result<bool, Error> {
        self.execute(Self::by_key(key).if_exists())
    }

    /// Delete the row with `id`, resolving its natural key through the id view.
    ///
    /// The base-row delete only applies while that key still carries `id`,
    /// so a row re-created under the same key in between is left alone.
    /// Returns whether a row was removed.
    pub fn delete_by_id(&self, id: Ulid) -> Result<bool, Error> {
        let Some(entity) = LoadExecutor::<E>::new(self.db).find_by_id(id)? else {
            tracing::debug!(entity = E::PATH, %id, "delete by id: no row");
            return Ok(false);
        };

        let delete = Self::by_key(&entity.natural_key()).only_if(Clause::eq(ID_COLUMN, id));
        let deleted = self.execute(delete)?;
        if !deleted {
            tracing::debug!(entity = E::PATH, %id, "delete by id: key now holds another row");
        }

        Ok(deleted)
    }

    fn by_key(key: &E::NaturalKey) -> Delete {
        E::natural_key_clauses(key)
            .into_iter()
            .fold(Delete::from(E::SCHEMA.name), Delete::and)
    }

    fn execute(&self, delete: Delete) -> Result<bool, Error> {
        let mut span = Span::<E>::new(self.db.sink(), ExecKind::Delete);
        let applied = self.db.execute(&delete.into())?.was_applied();
        span.set_rows(u64::from(applied));

        Ok(applied)
    }
}
