use serde::Deserialize;

///
/// DbConfig
///
/// Runtime knobs for the access layer. Loaded from TOML by the facade
/// crate; unknown keys are rejected there.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct DbConfig {
    /// Largest page size a cursor may request.
    pub max_page_size: u32,

    /// Log rendered statements at debug instead of trace.
    pub debug: bool,
}

impl DbConfig {
    pub const DEFAULT_MAX_PAGE_SIZE: u32 = 1000;
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            max_page_size: Self::DEFAULT_MAX_PAGE_SIZE,
            debug: false,
        }
    }
}
