//! Module: response
//! Responsibility: page and write-outcome payloads returned by access objects.
//! Does not own: query execution or cursor planning.

use crate::db::cursor::{CursorError, CursorSignature, CursorToken, PageCursor};

///
/// Page
///
/// One page of entities in scan order plus the cursor for the next page.
/// `next_cursor` is `None` exactly when the scan reached the end.
///

#[derive(Clone, Debug)]
pub struct Page<E, C = PageCursor> {
    items: Vec<E>,
    next_cursor: Option<C>,
    signature: CursorSignature,
}

impl<E, C> Page<E, C> {
    #[must_use]
    pub const fn new(items: Vec<E>, next_cursor: Option<C>, signature: CursorSignature) -> Self {
        Self {
            items,
            next_cursor,
            signature,
        }
    }

    #[must_use]
    pub const fn items(&self) -> &[E] {
        self.items.as_slice()
    }

    #[must_use]
    pub const fn next_cursor(&self) -> Option<&C> {
        self.next_cursor.as_ref()
    }

    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.next_cursor.is_some()
    }

    #[must_use]
    pub const fn signature(&self) -> CursorSignature {
        self.signature
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Consume this page and return `(items, next_cursor)`.
    #[must_use]
    pub fn into_parts(self) -> (Vec<E>, Option<C>) {
        (self.items, self.next_cursor)
    }
}

impl<E, C: Clone + Into<PageCursor>> Page<E, C> {
    /// Opaque token for the next page, bound to this page's query shape.
    pub fn next_token(&self) -> Result<Option<Vec<u8>>, CursorError> {
        self.next_cursor
            .as_ref()
            .map(|cursor| CursorToken::new(self.signature, cursor.clone().into()).encode())
            .transpose()
    }
}

///
/// SaveOutcome
///
/// Result of one write. When `created` is false the conditional insert
/// found an existing row; `entity` is the caller's value, not the stored one.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SaveOutcome<E> {
    pub entity: E,
    pub created: bool,
}

impl<E> SaveOutcome<E> {
    #[must_use]
    pub const fn created(entity: E) -> Self {
        Self {
            entity,
            created: true,
        }
    }

    #[must_use]
    pub const fn already_exists(entity: E) -> Self {
        Self {
            entity,
            created: false,
        }
    }

    /// The written entity, or `None` when the key already existed.
    #[must_use]
    pub fn into_created(self) -> Option<E> {
        self.created.then_some(self.entity)
    }
}
