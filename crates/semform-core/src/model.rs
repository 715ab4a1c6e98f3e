use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Display;
use uuid::Uuid;

/// Dispatch key for a field slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DataType {
    Component,
    ComponentIdSet,
    ComponentIdList,
    DiTree,
    Float,
    Integer,
    Boolean,
    String,
    Other(String),
}

impl DataType {
    pub const RECOGNIZED: [DataType; 8] = [
        DataType::Component,
        DataType::ComponentIdSet,
        DataType::ComponentIdList,
        DataType::DiTree,
        DataType::Float,
        DataType::Integer,
        DataType::Boolean,
        DataType::String,
    ];

    pub fn id(&self) -> &str {
        match self {
            DataType::Component => "component_field",
            DataType::ComponentIdSet => "component_id_set_field",
            DataType::ComponentIdList => "component_id_list_field",
            DataType::DiTree => "ditree_field",
            DataType::Float => "float_field",
            DataType::Integer => "integer_field",
            DataType::Boolean => "boolean_field",
            DataType::String => "string_field",
            DataType::Other(id) => id,
        }
    }
}

impl From<&str> for DataType {
    fn from(id: &str) -> Self {
        match id.trim() {
            "component_field" => DataType::Component,
            "component_id_set_field" => DataType::ComponentIdSet,
            "component_id_list_field" => DataType::ComponentIdList,
            "ditree_field" => DataType::DiTree,
            "float_field" | "float" => DataType::Float,
            "integer_field" => DataType::Integer,
            "boolean_field" => DataType::Boolean,
            "string_field" | "string" => DataType::String,
            other => DataType::Other(other.to_string()),
        }
    }
}

impl From<String> for DataType {
    fn from(id: String) -> Self {
        DataType::from(id.as_str())
    }
}

impl From<DataType> for String {
    fn from(dt: DataType) -> Self {
        dt.id().to_string()
    }
}

impl Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub meaning: String,
    #[serde(default)]
    pub purpose: Option<String>,
    pub data_type: DataType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternVersion {
    pub public_id: Uuid,
    #[serde(default)]
    pub time: i64, // stamp time, epoch millis
    pub meaning: String,
    #[serde(default)]
    pub field_definitions: Vec<FieldDefinition>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemanticVersion {
    pub public_id: Uuid,
    pub pattern: Uuid,
    #[serde(default)]
    pub fields: Vec<serde_json::Value>,
}

/// One value of a semantic version paired with the slot that defines it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldRecord {
    pub index: usize,
    pub semantic: Uuid,
    pub definition: FieldDefinition,
    pub value: serde_json::Value,
}

impl FieldRecord {
    pub fn data_type(&self) -> &DataType {
        &self.definition.data_type
    }
}

/// Everything the host sends for one form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormPayload {
    pub semantic: Option<SemanticVersion>,
    #[serde(default)]
    pub patterns: Vec<PatternVersion>,
    #[serde(default)]
    pub descriptions: HashMap<Uuid, String>,
    #[serde(default)]
    pub read_only: bool,
}
