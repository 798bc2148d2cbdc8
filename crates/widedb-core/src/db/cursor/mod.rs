//! Module: cursor
//! Responsibility: resumable page positions for text- and time-ordered scans.
//! Does not own: statement construction or storage access.
//! Boundary: cursors are values; nothing here touches the store.

mod error;
mod signature;
mod token;

#[cfg(test)]
mod tests;

pub use error::CursorError;
pub use signature::CursorSignature;
pub use token::CursorToken;

use crate::{db::direction::Direction, types::Ulid};
use serde::{Deserialize, Serialize};

///
/// TextCursor
///
/// Resume point for a scan ordered by search text, tie-broken by id.
/// No offset means "start from the beginning"; an optional lower-cased
/// `text_search` prefix narrows the scan and is carried page to page.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(try_from = "TextCursorWire")]
pub struct TextCursor {
    page_size: u32,
    text_search: Option<String>,
    text_offset: Option<String>,
    id_offset: Option<Ulid>,
}

impl TextCursor {
    /// Build a cursor resuming after `(search_text, last_id)`.
    pub fn new(
        search_text: Option<String>,
        last_id: Option<Ulid>,
        page_size: u32,
    ) -> Result<Self, CursorError> {
        validate_page_size(page_size)?;

        Ok(Self {
            page_size,
            text_search: None,
            text_offset: search_text,
            id_offset: last_id,
        })
    }

    /// First page of an unfiltered text scan.
    pub fn first(page_size: u32) -> Result<Self, CursorError> {
        Self::new(None, None, page_size)
    }

    /// Restrict the scan to search texts starting with `prefix`.
    #[must_use]
    pub fn with_text_search(mut self, prefix: impl AsRef<str>) -> Self {
        let prefix = prefix.as_ref().to_lowercase();
        self.text_search = (!prefix.is_empty()).then_some(prefix);
        self
    }

    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    #[must_use]
    pub fn text_search(&self) -> Option<&str> {
        self.text_search.as_deref()
    }

    #[must_use]
    pub fn text_offset(&self) -> Option<&str> {
        self.text_offset.as_deref()
    }

    #[must_use]
    pub const fn id_offset(&self) -> Option<Ulid> {
        self.id_offset
    }

    /// Exclusive upper bound of the prefix range, if the prefix has one.
    #[must_use]
    pub fn text_search_bound(&self) -> Option<String> {
        self.text_search.as_deref().and_then(prefix_upper_bound)
    }

    /// Cursor for the page after a row with this search text and id.
    #[must_use]
    pub(crate) fn next_after(&self, search_text: String, id: Ulid) -> Self {
        Self {
            page_size: self.page_size,
            text_search: self.text_search.clone(),
            text_offset: Some(search_text),
            id_offset: Some(id),
        }
    }
}

///
/// TimeCursor
///
/// Resume point for a scan ordered by the timestamp embedded in the id.
/// Bounds are inclusive milliseconds; absent bounds are open.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(try_from = "TimeCursorWire")]
pub struct TimeCursor {
    page_size: u32,
    start_ms: Option<u64>,
    end_ms: Option<u64>,
    id_offset: Option<Ulid>,
    direction: Direction,
}

impl TimeCursor {
    pub fn new(
        start_ms: Option<u64>,
        end_ms: Option<u64>,
        last_id: Option<Ulid>,
        page_size: u32,
        ascending: bool,
    ) -> Result<Self, CursorError> {
        validate_page_size(page_size)?;

        Ok(Self {
            page_size,
            start_ms,
            end_ms,
            id_offset: last_id,
            direction: Direction::from_ascending(ascending),
        })
    }

    /// First page of an unbounded scan in the given direction.
    pub fn first(page_size: u32, ascending: bool) -> Result<Self, CursorError> {
        Self::new(None, None, None, page_size, ascending)
    }

    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    #[must_use]
    pub const fn start_ms(&self) -> Option<u64> {
        self.start_ms
    }

    #[must_use]
    pub const fn end_ms(&self) -> Option<u64> {
        self.end_ms
    }

    #[must_use]
    pub const fn id_offset(&self) -> Option<Ulid> {
        self.id_offset
    }

    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    #[must_use]
    pub const fn is_ascending(&self) -> bool {
        self.direction.is_ascending()
    }

    #[must_use]
    pub(crate) const fn next_after(&self, id: Ulid) -> Self {
        Self {
            page_size: self.page_size,
            start_ms: self.start_ms,
            end_ms: self.end_ms,
            id_offset: Some(id),
            direction: self.direction,
        }
    }
}

///
/// TextCursorWire
///
/// Decoded fields of a `TextCursor`, rebuilt through the constructors
/// so page-size checks and prefix normalization hold after decode.
///

#[derive(Deserialize)]
struct TextCursorWire {
    page_size: u32,
    text_search: Option<String>,
    text_offset: Option<String>,
    id_offset: Option<Ulid>,
}

impl TryFrom<TextCursorWire> for TextCursor {
    type Error = CursorError;

    fn try_from(wire: TextCursorWire) -> Result<Self, Self::Error> {
        let cursor = Self::new(wire.text_offset, wire.id_offset, wire.page_size)?;

        Ok(match wire.text_search {
            Some(prefix) => cursor.with_text_search(prefix),
            None => cursor,
        })
    }
}

///
/// TimeCursorWire
///

#[derive(Deserialize)]
struct TimeCursorWire {
    page_size: u32,
    start_ms: Option<u64>,
    end_ms: Option<u64>,
    id_offset: Option<Ulid>,
    direction: Direction,
}

impl TryFrom<TimeCursorWire> for TimeCursor {
    type Error = CursorError;

    fn try_from(wire: TimeCursorWire) -> Result<Self, Self::Error> {
        Self::new(
            wire.start_ms,
            wire.end_ms,
            wire.id_offset,
            wire.page_size,
            wire.direction.is_ascending(),
        )
    }
}

///
/// PageCursor
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum PageCursor {
    Text(TextCursor),
    Time(TimeCursor),
}

impl PageCursor {
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        match self {
            Self::Text(c) => c.page_size,
            Self::Time(c) => c.page_size,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Time(_) => "time",
        }
    }
}

impl From<TextCursor> for PageCursor {
    fn from(cursor: TextCursor) -> Self {
        Self::Text(cursor)
    }
}

impl From<TimeCursor> for PageCursor {
    fn from(cursor: TimeCursor) -> Self {
        Self::Time(cursor)
    }
}

/// Reject page sizes outside `1..=max`.
pub(crate) const fn validate_page_size_max(page_size: u32, max: u32) -> Result<(), CursorError> {
    if page_size == 0 || page_size > max {
        return Err(CursorError::InvalidPageSize { page_size, max });
    }

    Ok(())
}

const fn validate_page_size(page_size: u32) -> Result<(), CursorError> {
    validate_page_size_max(page_size, u32::MAX)
}

// Smallest string greater than every string with this prefix: bump the last
// char, dropping trailing `char::MAX`s that cannot be bumped. `None` when
// every char is `char::MAX`.
fn prefix_upper_bound(prefix: &str) -> Option<String> {
    let mut chars = prefix.chars();
    let last = chars.next_back()?;
    let head = chars.as_str();

    let Some(next) = (u32::from(last) + 1..=u32::from(char::MAX)).find_map(char::from_u32) else {
        return prefix_upper_bound(head);
    };

    let mut bound = head.to_string();
    bound.push(next);

    Some(bound)
}
