//! Stored domain records: rules and attribute definitions

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::expr::{Node, Value};

/// A named, stored boolean expression: source text plus its parsed AST.
/// Rules are immutable once created.
///
/// Field names serialize in the shape rules are persisted in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub name: String,
    #[serde(rename = "ruleString")]
    pub rule_string: String,
    pub ast: Node,
}

impl Rule {
    pub fn new(name: impl Into<String>, rule_string: impl Into<String>, ast: Node) -> Self {
        Self {
            name: name.into(),
            rule_string: rule_string.into(),
            ast,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Data types an attribute definition can declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataType {
    String,
    Number,
    Boolean,
}

/// A catalog entry describing a known data field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    #[serde(rename = "attributeName")]
    pub attribute_name: String,
    #[serde(rename = "dataType")]
    pub data_type: DataType,
    #[serde(rename = "allowedValues", default, skip_serializing_if = "Option::is_none")]
    pub allowed_values: Option<Vec<Value>>,
}

impl Attribute {
    pub fn new(attribute_name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            attribute_name: attribute_name.into(),
            data_type,
            allowed_values: None,
        }
    }
}
