use crate::{
    Error,
    db::{
        Db,
        cursor::{
            CursorSignature, CursorToken, PageCursor, TextCursor, TimeCursor,
            validate_page_size_max,
        },
        query::{Predicates, ViewOrder, plan_search, resolve_view},
        response::Page,
        schema::{ID_COLUMN, SEARCH_TEXT_COLUMN},
        statement::{Clause, Select},
        store::Row,
    },
    error::InternalError,
    obs::sink::{ExecKind, Span},
    traits::EntityKind,
    types::Ulid,
};
use std::marker::PhantomData;

///
/// LoadExecutor
///
/// Point lookups and cursor-paged scans over the base table and its views.
///

pub struct LoadExecutor<'a, E: EntityKind> {
    db: &'a Db,
    _marker: PhantomData<E>,
}

impl<'a, E: EntityKind> LoadExecutor<'a, E> {
    #[must_use]
    pub const fn new(db: &'a Db) -> Self {
        Self {
            db,
            _marker: PhantomData,
        }
    }

    // ======================================================================
    // Point lookups
    // ======================================================================

    /// Load the first row of `select`, if any.
    pub fn find_one(&self, select: Select) -> Result<Option<E>, Error> {
        let mut span = Span::<E>::new(self.db.sink(), ExecKind::Load);
        let rows = self.db.execute(&select.limit(1).into())?.into_rows();

        let entity = rows.first().map(E::from_row).transpose()?;
        span.set_rows(u64::from(entity.is_some()));

        Ok(entity)
    }

    pub fn find_by_id(&self, id: Ulid) -> Result<Option<E>, Error> {
        self.find_one(Select::from(E::ID_VIEW).and(Clause::eq(ID_COLUMN, id)))
    }

    pub fn find_by_natural_key(&self, key: &E::NaturalKey) -> Result<Option<E>, Error> {
        let select = E::natural_key_clauses(key)
            .into_iter()
            .fold(Select::from(E::SCHEMA.name), Select::and);

        self.find_one(select)
    }

    // ======================================================================
    // Paged search
    // ======================================================================

    /// Read one page from the view serving `predicates` in the cursor's order.
    pub fn page(&self, predicates: &Predicates, cursor: &PageCursor) -> Result<Page<E>, Error> {
        validate_page_size_max(cursor.page_size(), self.db.config().max_page_size)?;
        let plan = plan_search(E::PATH, E::VIEWS, predicates, cursor)?;
        let signature = CursorSignature::compute(plan.view, predicates);

        let mut span = Span::<E>::new(self.db.sink(), ExecKind::Load);
        let mut rows = self.db.execute(&plan.select.into())?.into_rows();

        // the select asked for one extra row; its presence means another page exists
        let page_size = usize::try_from(cursor.page_size()).unwrap_or(usize::MAX);
        let has_more = rows.len() > page_size;
        rows.truncate(page_size);

        let items = rows.iter().map(E::from_row).collect::<Result<Vec<_>, _>>()?;
        let next_cursor = match rows.last() {
            Some(last) if has_more => Some(next_cursor::<E>(cursor, last)?),
            _ => None,
        };
        span.set_rows(items.len() as u64);

        Ok(Page::new(items, next_cursor, signature))
    }

    pub fn text_page(
        &self,
        predicates: &Predicates,
        cursor: &TextCursor,
    ) -> Result<Page<E, TextCursor>, Error> {
        let (items, next, signature) = self
            .page(predicates, &PageCursor::Text(cursor.clone()))?
            .into_signed_parts();
        let next = match next {
            None => None,
            Some(PageCursor::Text(next)) => Some(next),
            Some(PageCursor::Time(_)) => {
                return Err(
                    InternalError::executor_invariant("text scan produced a time cursor").into(),
                );
            }
        };

        Ok(Page::new(items, next, signature))
    }

    pub fn time_page(
        &self,
        predicates: &Predicates,
        cursor: &TimeCursor,
    ) -> Result<Page<E, TimeCursor>, Error> {
        let (items, next, signature) = self
            .page(predicates, &PageCursor::Time(cursor.clone()))?
            .into_signed_parts();
        let next = match next {
            None => None,
            Some(PageCursor::Time(next)) => Some(next),
            Some(PageCursor::Text(_)) => {
                return Err(
                    InternalError::executor_invariant("time scan produced a text cursor").into(),
                );
            }
        };

        Ok(Page::new(items, next, signature))
    }

    /// Resume a scan from an opaque token issued by `Page::next_token`.
    pub fn page_from_token(&self, predicates: &Predicates, token: &[u8]) -> Result<Page<E>, Error> {
        let token = CursorToken::decode(token)?;
        let order = match token.cursor() {
            PageCursor::Text(_) => ViewOrder::SearchText,
            PageCursor::Time(_) => ViewOrder::Time,
        };
        let view = resolve_view(E::PATH, E::VIEWS, predicates, order)?;
        let cursor = token.verify(CursorSignature::compute(view, predicates))?;

        self.page(predicates, &cursor)
    }
}

impl<E, C> Page<E, C> {
    fn into_signed_parts(self) -> (Vec<E>, Option<C>, CursorSignature) {
        let signature = self.signature();
        let (items, next) = self.into_parts();

        (items, next, signature)
    }
}

// The next cursor resumes strictly after the last returned row.
fn next_cursor<E: EntityKind>(cursor: &PageCursor, last: &Row) -> Result<PageCursor, Error> {
    let id = last.ulid(E::PATH, ID_COLUMN)?;

    Ok(match cursor {
        PageCursor::Text(cursor) => {
            let search_text = last.text(E::PATH, SEARCH_TEXT_COLUMN)?;
            PageCursor::Text(cursor.next_after(search_text, id))
        }
        PageCursor::Time(cursor) => PageCursor::Time(cursor.next_after(id)),
    })
}
