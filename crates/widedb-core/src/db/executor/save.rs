use crate::{
    Error,
    db::{Db, response::SaveOutcome, statement::Insert},
    obs::sink::{ExecKind, MetricsEvent, Span},
    traits::EntityKind,
};
use std::marker::PhantomData;

///
/// SaveMode
///
/// `Upsert` overwrites any row with the same natural key.
/// `InsertIfAbsent` applies only when no such row exists.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum SaveMode {
    #[default]
    Upsert,
    InsertIfAbsent,
}

impl SaveMode {
    #[must_use]
    pub const fn from_require_absent(require_absent: bool) -> Self {
        if require_absent {
            Self::InsertIfAbsent
        } else {
            Self::Upsert
        }
    }

    #[must_use]
    pub const fn requires_absent(self) -> bool {
        matches!(self, Self::InsertIfAbsent)
    }
}

///
/// SaveExecutor
///
/// One write per call: assign an id when missing, issue a single insert,
/// and report whether the store applied it. There is no read before the
/// write; the store's per-key conditional apply decides the race.
///

pub struct SaveExecutor<'a, E: EntityKind> {
    db: &'a Db,
    _marker: PhantomData<E>,
}

impl<'a, E: EntityKind> SaveExecutor<'a, E> {
    #[must_use]
    pub const fn new(db: &'a Db) -> Self {
        Self {
            db,
            _marker: PhantomData,
        }
    }

    pub fn save(&self, mut entity: E, mode: SaveMode) -> Result<SaveOutcome<E>, Error> {
        let mut span = Span::<E>::new(self.db.sink(), ExecKind::Save);

        if entity.id().is_none() {
            entity.set_id(self.db.generate_id()?);
        }

        let mut insert = entity
            .to_values()
            .into_iter()
            .fold(Insert::into(E::SCHEMA.name), |insert, (column, value)| {
                insert.value(column, value)
            });
        if mode.requires_absent() {
            insert = insert.if_not_exists();
        }

        let result = self.db.execute(&insert.into())?;
        if !result.was_applied() {
            self.db.record(MetricsEvent::ConditionNotMet {
                entity_path: E::PATH,
            });
            tracing::debug!(
                entity = E::PATH,
                key = ?entity.natural_key(),
                "conditional insert not applied; row already exists"
            );

            return Ok(SaveOutcome::already_exists(entity));
        }
        span.set_rows(1);

        Ok(SaveOutcome::created(entity))
    }

    /// Write `entity` only if no row with its natural key exists.
    pub fn insert_if_absent(&self, entity: E) -> Result<SaveOutcome<E>, Error> {
        self.save(entity, SaveMode::InsertIfAbsent)
    }

    /// Write `entity`, replacing any row with the same natural key.
    pub fn upsert(&self, entity: E) -> Result<E, Error> {
        self.save(entity, SaveMode::Upsert).map(|outcome| outcome.entity)
    }
}
