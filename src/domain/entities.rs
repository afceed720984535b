//! Records as the backend returns them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub use clubsite_api_types::{ForumCategory, ForumPost, ForumPostDetail, ForumReply};

/// A generic resource row: a backend-assigned id plus schema-conforming attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: i64,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Record {
    pub fn new(id: i64, attributes: Map<String, Value>) -> Self {
        Self { id, attributes }
    }

    /// Attribute lookup that treats `null` as absent.
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name).filter(|value| !value.is_null())
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.attribute(name).and_then(Value::as_str)
    }
}
