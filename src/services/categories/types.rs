use crate::core::errors::BlueKaiError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Filter applied by `list_categories`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CategoryView {
    /// First- and second-party categories plus all marketplace categories
    Buyer,
    /// First-party categories in the owner's taxonomy
    Owner,
    /// Third-party categories in the marketplace
    Public,
}

impl CategoryView {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Buyer => "BUYER",
            Self::Owner => "OWNER",
            Self::Public => "PUBLIC",
        }
    }
}

impl fmt::Display for CategoryView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryView {
    type Err = BlueKaiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "BUYER" => Ok(Self::Buyer),
            "OWNER" => Ok(Self::Owner),
            "PUBLIC" => Ok(Self::Public),
            other => Err(BlueKaiError::InvalidParameters(format!(
                "Unknown category view: {}",
                other
            ))),
        }
    }
}

/// Category ids come back as numbers but are accepted as strings too
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryId {
    Number(u64),
    Text(String),
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// `{"id": ...}` reference to a parent category or partner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRef {
    pub id: u64,
}

/// A taxonomy category
///
/// Fields the service returns beyond the ones modelled here are kept in
/// `extra` and sent back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<CategoryId>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_category: Option<EntityRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partner: Option<EntityRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Category {
    /// A new category under `parent_id`, owned by `partner_id`
    pub fn new(name: impl Into<String>, parent_id: u64, partner_id: u64) -> Self {
        Self {
            id: None,
            name: name.into(),
            parent_category: Some(EntityRef { id: parent_id }),
            partner: Some(EntityRef { id: partner_id }),
            description: None,
            extra: Map::new(),
        }
    }
}
