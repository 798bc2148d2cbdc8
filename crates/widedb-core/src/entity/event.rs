use crate::{
    db::{
        query::{ViewModel, ViewOrder},
        schema::{
            EVENT_BODY_COLUMN, EVENT_BY_GLOBAL_ID_VIEW, EVENT_BY_ID_VIEW,
            EVENT_BY_TYPE_AND_ID_VIEW, EVENT_ENTITY_ID_COLUMN, EVENT_ENTITY_TYPE_COLUMN,
            EVENT_SCHEMA, EVENT_TENANT_ID_COLUMN, EVENT_TYPE_COLUMN, EVENT_UID_COLUMN, ID_COLUMN,
            TableSchema,
        },
        statement::Clause,
        store::Row,
    },
    entity::parse_label,
    error::InternalError,
    traits::EntityKind,
    types::Ulid,
    value::Value,
};
use derive_more::Display;
use serde::{Deserialize, Serialize};

///
/// EntityType
///
/// Kind of the record an event is attached to.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityType {
    #[display("TENANT")]
    Tenant,
    #[display("CUSTOMER")]
    Customer,
    #[display("USER")]
    User,
    #[display("RULE")]
    Rule,
    #[display("PLUGIN")]
    Plugin,
    #[display("DASHBOARD")]
    Dashboard,
    #[display("ASSET")]
    Asset,
    #[display("DEVICE")]
    Device,
    #[display("ALARM")]
    Alarm,
}

impl EntityType {
    const LABELS: [(Self, &'static str); 9] = [
        (Self::Tenant, "TENANT"),
        (Self::Customer, "CUSTOMER"),
        (Self::User, "USER"),
        (Self::Rule, "RULE"),
        (Self::Plugin, "PLUGIN"),
        (Self::Dashboard, "DASHBOARD"),
        (Self::Asset, "ASSET"),
        (Self::Device, "DEVICE"),
        (Self::Alarm, "ALARM"),
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        Self::LABELS[self as usize].1
    }
}

impl From<EntityType> for Value {
    fn from(ty: EntityType) -> Self {
        Self::Text(ty.label().to_string())
    }
}

///
/// EntityId
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[display("{entity_type}:{id}")]
pub struct EntityId {
    pub entity_type: EntityType,
    pub id: Ulid,
}

impl EntityId {
    #[must_use]
    pub const fn new(entity_type: EntityType, id: Ulid) -> Self {
        Self { entity_type, id }
    }
}

///
/// EventKey
///
/// Natural key of an event: one row per (tenant, entity, type, uid).
///

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct EventKey {
    pub tenant_id: Ulid,
    pub entity_id: EntityId,
    pub event_type: String,
    pub event_uid: String,
}

impl EventKey {
    #[must_use]
    pub fn new(
        tenant_id: Ulid,
        entity_id: EntityId,
        event_type: impl Into<String>,
        event_uid: impl Into<String>,
    ) -> Self {
        Self {
            tenant_id,
            entity_id,
            event_type: event_type.into(),
            event_uid: event_uid.into(),
        }
    }
}

///
/// Event
///
/// Immutable record of something that happened to an entity. The id is
/// time-ordered, so id order is creation-time order.
///

#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    pub id: Option<Ulid>,
    pub tenant_id: Ulid,
    pub entity_id: EntityId,
    pub event_type: String,
    pub event_uid: String,
    pub body: Option<serde_json::Value>,
}

impl Event {
    #[must_use]
    pub fn new(
        tenant_id: Ulid,
        entity_id: EntityId,
        event_type: impl Into<String>,
        event_uid: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            tenant_id,
            entity_id,
            event_type: event_type.into(),
            event_uid: event_uid.into(),
            body: None,
        }
    }

    #[must_use]
    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    #[must_use]
    pub fn with_id(mut self, id: Ulid) -> Self {
        self.id = Some(id);
        self
    }
}

impl EntityKind for Event {
    const PATH: &'static str = "widedb::entity::Event";
    const SCHEMA: TableSchema = EVENT_SCHEMA;
    const VIEWS: &'static [ViewModel] = &[
        ViewModel::new(
            EVENT_BY_ID_VIEW,
            &[
                EVENT_TENANT_ID_COLUMN,
                EVENT_ENTITY_TYPE_COLUMN,
                EVENT_ENTITY_ID_COLUMN,
            ],
            ViewOrder::Time,
        ),
        ViewModel::new(
            EVENT_BY_TYPE_AND_ID_VIEW,
            &[
                EVENT_TENANT_ID_COLUMN,
                EVENT_ENTITY_TYPE_COLUMN,
                EVENT_ENTITY_ID_COLUMN,
                EVENT_TYPE_COLUMN,
            ],
            ViewOrder::Time,
        ),
    ];
    const ID_VIEW: &'static str = EVENT_BY_GLOBAL_ID_VIEW;

    type NaturalKey = EventKey;

    fn id(&self) -> Option<Ulid> {
        self.id
    }

    fn set_id(&mut self, id: Ulid) {
        self.id = Some(id);
    }

    fn natural_key(&self) -> EventKey {
        EventKey::new(
            self.tenant_id,
            self.entity_id,
            self.event_type.as_str(),
            self.event_uid.as_str(),
        )
    }

    fn natural_key_clauses(key: &EventKey) -> Vec<Clause> {
        vec![
            Clause::eq(EVENT_TENANT_ID_COLUMN, key.tenant_id),
            Clause::eq(EVENT_ENTITY_TYPE_COLUMN, key.entity_id.entity_type),
            Clause::eq(EVENT_ENTITY_ID_COLUMN, key.entity_id.id),
            Clause::eq(EVENT_TYPE_COLUMN, key.event_type.as_str()),
            Clause::eq(EVENT_UID_COLUMN, key.event_uid.as_str()),
        ]
    }

    fn to_values(&self) -> Vec<(&'static str, Value)> {
        vec![
            (ID_COLUMN, self.id.into()),
            (EVENT_TENANT_ID_COLUMN, self.tenant_id.into()),
            (EVENT_ENTITY_TYPE_COLUMN, self.entity_id.entity_type.into()),
            (EVENT_ENTITY_ID_COLUMN, self.entity_id.id.into()),
            (EVENT_TYPE_COLUMN, self.event_type.as_str().into()),
            (EVENT_UID_COLUMN, self.event_uid.as_str().into()),
            (
                EVENT_BODY_COLUMN,
                self.body.as_ref().map(ToString::to_string).into(),
            ),
        ]
    }

    fn from_row(row: &Row) -> Result<Self, InternalError> {
        let entity_type = parse_label(
            Self::PATH,
            EVENT_ENTITY_TYPE_COLUMN,
            &row.text(Self::PATH, EVENT_ENTITY_TYPE_COLUMN)?,
            &EntityType::LABELS,
        )?;

        Ok(Self {
            id: Some(row.ulid(Self::PATH, ID_COLUMN)?),
            tenant_id: row.ulid(Self::PATH, EVENT_TENANT_ID_COLUMN)?,
            entity_id: EntityId::new(entity_type, row.ulid(Self::PATH, EVENT_ENTITY_ID_COLUMN)?),
            event_type: row.text(Self::PATH, EVENT_TYPE_COLUMN)?,
            event_uid: row.text(Self::PATH, EVENT_UID_COLUMN)?,
            body: row.json(Self::PATH, EVENT_BODY_COLUMN)?,
        })
    }
}
