use crate::{
    db::{
        query::{ViewModel, ViewOrder},
        schema::{
            COMPONENT_DESCRIPTOR_ACTIONS_COLUMN, COMPONENT_DESCRIPTOR_BY_ID_VIEW,
            COMPONENT_DESCRIPTOR_BY_SCOPE_TYPE_AND_SEARCH_TEXT_VIEW,
            COMPONENT_DESCRIPTOR_BY_TYPE_AND_SEARCH_TEXT_VIEW, COMPONENT_DESCRIPTOR_CLASS_COLUMN,
            COMPONENT_DESCRIPTOR_CONFIGURATION_DESCRIPTOR_COLUMN, COMPONENT_DESCRIPTOR_NAME_COLUMN,
            COMPONENT_DESCRIPTOR_SCHEMA, COMPONENT_DESCRIPTOR_SCOPE_COLUMN,
            COMPONENT_DESCRIPTOR_TYPE_COLUMN, ID_COLUMN, SEARCH_TEXT_COLUMN, TableSchema,
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
/// ComponentType
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComponentType {
    #[display("FILTER")]
    Filter,
    #[display("PROCESSOR")]
    Processor,
    #[display("ACTION")]
    Action,
    #[display("PLUGIN")]
    Plugin,
}

impl ComponentType {
    const LABELS: [(Self, &'static str); 4] = [
        (Self::Filter, "FILTER"),
        (Self::Processor, "PROCESSOR"),
        (Self::Action, "ACTION"),
        (Self::Plugin, "PLUGIN"),
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        Self::LABELS[self as usize].1
    }
}

impl From<ComponentType> for Value {
    fn from(ty: ComponentType) -> Self {
        Self::Text(ty.label().to_string())
    }
}

///
/// ComponentScope
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComponentScope {
    #[display("SYSTEM")]
    System,
    #[display("TENANT")]
    Tenant,
}

impl ComponentScope {
    const LABELS: [(Self, &'static str); 2] = [(Self::System, "SYSTEM"), (Self::Tenant, "TENANT")];

    #[must_use]
    pub const fn label(self) -> &'static str {
        Self::LABELS[self as usize].1
    }
}

impl From<ComponentScope> for Value {
    fn from(scope: ComponentScope) -> Self {
        Self::Text(scope.label().to_string())
    }
}

///
/// ComponentDescriptor
///
/// Plugin component metadata, unique per implementing class. Searchable
/// by lower-cased name within a type, or within a type and scope.
///

#[derive(Clone, Debug, PartialEq)]
pub struct ComponentDescriptor {
    pub id: Option<Ulid>,
    pub component_type: ComponentType,
    pub scope: ComponentScope,
    pub name: String,
    pub clazz: String,
    pub configuration_descriptor: Option<serde_json::Value>,
    pub actions: Option<String>,
}

impl ComponentDescriptor {
    #[must_use]
    pub fn new(
        component_type: ComponentType,
        scope: ComponentScope,
        name: impl Into<String>,
        clazz: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            component_type,
            scope,
            name: name.into(),
            clazz: clazz.into(),
            configuration_descriptor: None,
            actions: None,
        }
    }

    #[must_use]
    pub fn with_configuration_descriptor(mut self, descriptor: serde_json::Value) -> Self {
        self.configuration_descriptor = Some(descriptor);
        self
    }

    #[must_use]
    pub fn with_actions(mut self, actions: impl Into<String>) -> Self {
        self.actions = Some(actions.into());
        self
    }

    #[must_use]
    pub fn search_text(&self) -> String {
        self.name.to_lowercase()
    }
}

impl EntityKind for ComponentDescriptor {
    const PATH: &'static str = "widedb::entity::ComponentDescriptor";
    const SCHEMA: TableSchema = COMPONENT_DESCRIPTOR_SCHEMA;
    const VIEWS: &'static [ViewModel] = &[
        ViewModel::new(
            COMPONENT_DESCRIPTOR_BY_TYPE_AND_SEARCH_TEXT_VIEW,
            &[COMPONENT_DESCRIPTOR_TYPE_COLUMN],
            ViewOrder::SearchText,
        ),
        ViewModel::new(
            COMPONENT_DESCRIPTOR_BY_SCOPE_TYPE_AND_SEARCH_TEXT_VIEW,
            &[COMPONENT_DESCRIPTOR_TYPE_COLUMN, COMPONENT_DESCRIPTOR_SCOPE_COLUMN],
            ViewOrder::SearchText,
        ),
    ];
    const ID_VIEW: &'static str = COMPONENT_DESCRIPTOR_BY_ID_VIEW;

    type NaturalKey = String;

    fn id(&self) -> Option<Ulid> {
        self.id
    }

    fn set_id(&mut self, id: Ulid) {
        self.id = Some(id);
    }

    fn natural_key(&self) -> String {
        self.clazz.clone()
    }

    fn natural_key_clauses(clazz: &String) -> Vec<Clause> {
        vec![Clause::eq(COMPONENT_DESCRIPTOR_CLASS_COLUMN, clazz.as_str())]
    }

    fn to_values(&self) -> Vec<(&'static str, Value)> {
        vec![
            (ID_COLUMN, self.id.into()),
            (COMPONENT_DESCRIPTOR_NAME_COLUMN, self.name.as_str().into()),
            (COMPONENT_DESCRIPTOR_CLASS_COLUMN, self.clazz.as_str().into()),
            (COMPONENT_DESCRIPTOR_TYPE_COLUMN, self.component_type.into()),
            (COMPONENT_DESCRIPTOR_SCOPE_COLUMN, self.scope.into()),
            (
                COMPONENT_DESCRIPTOR_CONFIGURATION_DESCRIPTOR_COLUMN,
                self.configuration_descriptor
                    .as_ref()
                    .map(ToString::to_string)
                    .into(),
            ),
            (COMPONENT_DESCRIPTOR_ACTIONS_COLUMN, self.actions.clone().into()),
            (SEARCH_TEXT_COLUMN, self.search_text().into()),
        ]
    }

    fn from_row(row: &Row) -> Result<Self, InternalError> {
        let component_type = parse_label(
            Self::PATH,
            COMPONENT_DESCRIPTOR_TYPE_COLUMN,
            &row.text(Self::PATH, COMPONENT_DESCRIPTOR_TYPE_COLUMN)?,
            &ComponentType::LABELS,
        )?;
        let scope = parse_label(
            Self::PATH,
            COMPONENT_DESCRIPTOR_SCOPE_COLUMN,
            &row.text(Self::PATH, COMPONENT_DESCRIPTOR_SCOPE_COLUMN)?,
            &ComponentScope::LABELS,
        )?;

        Ok(Self {
            id: Some(row.ulid(Self::PATH, ID_COLUMN)?),
            component_type,
            scope,
            name: row.text(Self::PATH, COMPONENT_DESCRIPTOR_NAME_COLUMN)?,
            clazz: row.text(Self::PATH, COMPONENT_DESCRIPTOR_CLASS_COLUMN)?,
            configuration_descriptor: row
                .json(Self::PATH, COMPONENT_DESCRIPTOR_CONFIGURATION_DESCRIPTOR_COLUMN)?,
            actions: row.opt_text(Self::PATH, COMPONENT_DESCRIPTOR_ACTIONS_COLUMN)?,
        })
    }
}
