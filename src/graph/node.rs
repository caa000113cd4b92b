use super::Properties;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const START: &str = "START";
pub const END: &str = "END";
pub const FAIL: &str = "FAIL";
pub const SYNC: &str = "SYNC";

/// Metadata key holding the human-friendly alias of a step.
pub const LABEL_KEY: &str = "label";

/// Structural role of a node, derived once from its name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum NodeRole {
    Start,
    End,
    Fail,
    Sync,
    #[default]
    Step,
}

impl NodeRole {
    /// Classifies a node name. Matching is exact and case-sensitive.
    pub fn of(name: &str) -> Self {
        match name {
            START => NodeRole::Start,
            END => NodeRole::End,
            FAIL => NodeRole::Fail,
            SYNC => NodeRole::Sync,
            _ => NodeRole::Step,
        }
    }
}

/// A vertex of the workflow graph: a task step or one of the reserved markers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "NodeRecord")]
pub struct Node {
    id: String,
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    properties: Option<Properties>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    metadata: Option<Properties>,
    #[serde(skip)]
    role: NodeRole,
}

/// Wire shape of a node; the role is recomputed on the way in.
#[derive(Deserialize)]
struct NodeRecord {
    id: String,
    name: String,
    #[serde(default)]
    properties: Option<Properties>,
    #[serde(default)]
    metadata: Option<Properties>,
}

impl From<NodeRecord> for Node {
    fn from(record: NodeRecord) -> Self {
        Node {
            role: NodeRole::of(&record.name),
            id: record.id,
            name: record.name,
            properties: record.properties,
            metadata: record.metadata,
        }
    }
}

impl Node {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        let name = name.into();
        Node {
            role: NodeRole::of(&name),
            id: id.into(),
            name,
            properties: None,
            metadata: None,
        }
    }

    pub fn with_properties(mut self, properties: Properties) -> Self {
        self.properties = Some(properties);
        self
    }

    pub fn with_metadata(mut self, metadata: Properties) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Sets the `label` metadata entry, keeping any other metadata.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.metadata
            .get_or_insert_with(Properties::new)
            .insert(LABEL_KEY, label);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> NodeRole {
        self.role
    }

    pub fn properties(&self) -> Option<&Properties> {
        self.properties.as_ref()
    }

    pub fn metadata(&self) -> Option<&Properties> {
        self.metadata.as_ref()
    }

    pub fn label(&self) -> Option<&str> {
        self.metadata.as_ref().and_then(|m| m.get(LABEL_KEY))
    }

    pub fn is_start(&self) -> bool {
        self.role == NodeRole::Start
    }

    pub fn is_end(&self) -> bool {
        self.role == NodeRole::End
    }

    pub fn is_fail(&self) -> bool {
        self.role == NodeRole::Fail
    }

    pub fn is_sync(&self) -> bool {
        self.role == NodeRole::Sync
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.label() {
            Some(label) => write!(f, "{}:{}:{}", self.id, label, self.name),
            None => write!(f, "{}:{}", self.id, self.name),
        }
    }
}
