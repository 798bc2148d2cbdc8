//! Table, view, and column names shared by the access objects.

///
/// TableSchema
///
/// Base table description: its primary key columns and the names of the
/// views the store derives from it.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TableSchema {
    pub name: &'static str,
    pub primary_key: &'static [&'static str],
    pub views: &'static [&'static str],
}

//
// Shared columns
//

pub const ID_COLUMN: &str = "id";
pub const SEARCH_TEXT_COLUMN: &str = "search_text";

//
// Component descriptors
//

pub const COMPONENT_DESCRIPTOR_TABLE: &str = "component_descriptor";
pub const COMPONENT_DESCRIPTOR_BY_TYPE_AND_SEARCH_TEXT_VIEW: &str =
    "component_desc_by_type_search_text";
pub const COMPONENT_DESCRIPTOR_BY_SCOPE_TYPE_AND_SEARCH_TEXT_VIEW: &str =
    "component_desc_by_scope_type_search_text";
pub const COMPONENT_DESCRIPTOR_BY_ID_VIEW: &str = "component_desc_by_id";

pub const COMPONENT_DESCRIPTOR_NAME_COLUMN: &str = "name";
pub const COMPONENT_DESCRIPTOR_CLASS_COLUMN: &str = "clazz";
pub const COMPONENT_DESCRIPTOR_TYPE_COLUMN: &str = "type";
pub const COMPONENT_DESCRIPTOR_SCOPE_COLUMN: &str = "scope";
pub const COMPONENT_DESCRIPTOR_CONFIGURATION_DESCRIPTOR_COLUMN: &str = "configuration_descriptor";
pub const COMPONENT_DESCRIPTOR_ACTIONS_COLUMN: &str = "actions";

pub const COMPONENT_DESCRIPTOR_SCHEMA: TableSchema = TableSchema {
    name: COMPONENT_DESCRIPTOR_TABLE,
    primary_key: &[COMPONENT_DESCRIPTOR_CLASS_COLUMN],
    views: &[
        COMPONENT_DESCRIPTOR_BY_TYPE_AND_SEARCH_TEXT_VIEW,
        COMPONENT_DESCRIPTOR_BY_SCOPE_TYPE_AND_SEARCH_TEXT_VIEW,
        COMPONENT_DESCRIPTOR_BY_ID_VIEW,
    ],
};

//
// Events
//

pub const EVENT_TABLE: &str = "event";
pub const EVENT_BY_ID_VIEW: &str = "event_by_id";
pub const EVENT_BY_TYPE_AND_ID_VIEW: &str = "event_by_type_and_id";
pub const EVENT_BY_GLOBAL_ID_VIEW: &str = "event_by_global_id";

pub const EVENT_TENANT_ID_COLUMN: &str = "tenant_id";
pub const EVENT_ENTITY_TYPE_COLUMN: &str = "entity_type";
pub const EVENT_ENTITY_ID_COLUMN: &str = "entity_id";
pub const EVENT_TYPE_COLUMN: &str = "event_type";
pub const EVENT_UID_COLUMN: &str = "event_uid";
pub const EVENT_BODY_COLUMN: &str = "body";

pub const EVENT_SCHEMA: TableSchema = TableSchema {
    name: EVENT_TABLE,
    primary_key: &[
        EVENT_TENANT_ID_COLUMN,
        EVENT_ENTITY_TYPE_COLUMN,
        EVENT_ENTITY_ID_COLUMN,
        EVENT_TYPE_COLUMN,
        EVENT_UID_COLUMN,
    ],
    views: &[
        EVENT_BY_ID_VIEW,
        EVENT_BY_TYPE_AND_ID_VIEW,
        EVENT_BY_GLOBAL_ID_VIEW,
    ],
};
