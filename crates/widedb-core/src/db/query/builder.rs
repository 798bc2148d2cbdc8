use crate::{
    db::{
        cursor::{PageCursor, TextCursor, TimeCursor},
        direction::Direction,
        query::{Predicates, QueryError, ViewModel, ViewOrder},
        schema::{ID_COLUMN, SEARCH_TEXT_COLUMN},
        statement::{Clause, CompareOp, Select},
    },
    types::Ulid,
    value::Value,
};

///
/// SearchPlan
///
/// The view chosen for one page request and the select that reads it.
/// The select's limit is one past the page size so the executor can see
/// whether another page exists without a second round trip.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct SearchPlan {
    pub(crate) view: &'static ViewModel,
    pub(crate) select: Select,
}

/// Resolve the view for `predicates` and build the page select for `cursor`.
pub(crate) fn plan_search(
    entity_path: &'static str,
    views: &'static [ViewModel],
    predicates: &Predicates,
    cursor: &PageCursor,
) -> Result<SearchPlan, QueryError> {
    let order = match cursor {
        PageCursor::Text(_) => ViewOrder::SearchText,
        PageCursor::Time(_) => ViewOrder::Time,
    };
    let view = resolve_view(entity_path, views, predicates, order)?;
    let select = equality_select(view, predicates);

    let select = match cursor {
        PageCursor::Text(cursor) => text_select(select, cursor),
        PageCursor::Time(cursor) => time_select(select, cursor),
    };

    Ok(SearchPlan { view, select })
}

// Exactly one view may serve a column set; duplicates never match.
pub(crate) fn resolve_view(
    entity_path: &'static str,
    views: &'static [ViewModel],
    predicates: &Predicates,
    order: ViewOrder,
) -> Result<&'static ViewModel, QueryError> {
    let mut columns = predicates.columns();
    columns.sort_unstable();
    let distinct = columns.windows(2).all(|w| w[0] != w[1]);

    views
        .iter()
        .find(|view| distinct && view.serves(&columns, order))
        .ok_or_else(|| QueryError::UnsupportedFilterCombination {
            entity_path,
            columns: predicates.columns().iter().map(ToString::to_string).collect(),
            order,
        })
}

// Equality clauses in the view's key order.
fn equality_select(view: &ViewModel, predicates: &Predicates) -> Select {
    view.key_columns
        .iter()
        .filter_map(|column| predicates.get(column).map(|v| (*column, v.clone())))
        .fold(Select::from(view.name), |select, (column, value)| {
            select.and(Clause::eq(column, value))
        })
}

fn text_select(mut select: Select, cursor: &TextCursor) -> Select {
    match (cursor.text_offset(), cursor.id_offset()) {
        (Some(text), Some(id)) => {
            select = select.and(Clause::tuple(
                vec![SEARCH_TEXT_COLUMN, ID_COLUMN],
                CompareOp::Gt,
                vec![Value::from(text), Value::from(id)],
            ));
        }
        (Some(text), None) => {
            select = select.and(Clause::compare(SEARCH_TEXT_COLUMN, CompareOp::Gte, text));
        }
        // an id without text cannot position a text scan; start over
        (None, _) => {}
    }

    if let Some(prefix) = cursor.text_search() {
        select = select.and(Clause::compare(SEARCH_TEXT_COLUMN, CompareOp::Gte, prefix));
        if let Some(bound) = cursor.text_search_bound() {
            select = select.and(Clause::compare(SEARCH_TEXT_COLUMN, CompareOp::Lt, bound));
        }
    }

    select
        .order_by(SEARCH_TEXT_COLUMN, Direction::Asc)
        .order_by(ID_COLUMN, Direction::Asc)
        .limit(cursor.page_size().saturating_add(1))
}

// Bounds are inclusive; the id offset replaces the leading bound with a
// strict comparison while the trailing bound keeps applying.
fn time_select(mut select: Select, cursor: &TimeCursor) -> Select {
    let lower = cursor
        .start_ms()
        .map(|ms| Clause::compare(ID_COLUMN, CompareOp::Gte, Ulid::min_for_timestamp(ms)));
    let upper = cursor
        .end_ms()
        .map(|ms| Clause::compare(ID_COLUMN, CompareOp::Lte, Ulid::max_for_timestamp(ms)));

    let (leading, trailing, resume_op) = match cursor.direction() {
        Direction::Asc => (lower, upper, CompareOp::Gt),
        Direction::Desc => (upper, lower, CompareOp::Lt),
    };
    let leading = cursor
        .id_offset()
        .map(|id| Clause::compare(ID_COLUMN, resume_op, id))
        .or(leading);

    for clause in [leading, trailing].into_iter().flatten() {
        select = select.and(clause);
    }

    select
        .order_by(ID_COLUMN, cursor.direction())
        .limit(cursor.page_size().saturating_add(1))
}
