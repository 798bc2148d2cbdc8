use derive_more::Display;

///
/// ViewOrder
///
/// Ordering dimension a view clusters on after its key columns.
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum ViewOrder {
    /// `search_text` ascending, then `id` ascending.
    #[display("search-text")]
    SearchText,

    /// `id` (time-ordered) in either direction.
    #[display("time")]
    Time,
}

///
/// ViewModel
///
/// One denormalized view: the equality columns it is keyed by, in key
/// order, and the dimension it sorts on.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ViewModel {
    pub name: &'static str,
    pub key_columns: &'static [&'static str],
    pub order: ViewOrder,
}

impl ViewModel {
    #[must_use]
    pub const fn new(
        name: &'static str,
        key_columns: &'static [&'static str],
        order: ViewOrder,
    ) -> Self {
        Self {
            name,
            key_columns,
            order,
        }
    }

    /// Does this view serve exactly this column set, in any order?
    #[must_use]
    pub fn serves(&self, columns: &[&str], order: ViewOrder) -> bool {
        self.order == order
            && self.key_columns.len() == columns.len()
            && self.key_columns.iter().all(|k| columns.contains(k))
    }
}
