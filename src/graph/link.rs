use super::Properties;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Link property key naming the exit status a transition is taken on.
pub const TRANSITION_NAME: &str = "transitionName";

/// The transition name matching "any other exit status".
pub const WILDCARD_TRANSITION: &str = "'*'";

/// A directed edge between two nodes, referenced by id.
///
/// Without a `transitionName` property the link is a plain flow edge. With one,
/// it is only taken when the upstream step exits with the matching status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub from: String,
    pub to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Properties>,
}

impl Link {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Link {
            from: from.into(),
            to: to.into(),
            properties: None,
        }
    }

    /// Creates a link taken only when `from` exits with `status`.
    pub fn transition(
        from: impl Into<String>,
        to: impl Into<String>,
        status: impl Into<String>,
    ) -> Self {
        let mut properties = Properties::new();
        properties.insert(TRANSITION_NAME, status);
        Link {
            from: from.into(),
            to: to.into(),
            properties: Some(properties),
        }
    }

    pub fn has_transition_set(&self) -> bool {
        self.properties
            .as_ref()
            .is_some_and(|p| p.contains_key(TRANSITION_NAME))
    }

    pub fn transition_name(&self) -> Option<&str> {
        self.properties.as_ref().and_then(|p| p.get(TRANSITION_NAME))
    }

    pub fn is_wildcard_transition(&self) -> bool {
        self.transition_name() == Some(WILDCARD_TRANSITION)
    }

    /// True when the link carries no properties at all. An empty map counts as none.
    pub fn has_no_properties(&self) -> bool {
        self.properties.as_ref().is_none_or(|p| p.is_empty())
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.transition_name() {
            Some(name) => write!(f, "{}:{}-{}", name, self.from, self.to),
            None => write!(f, "{}-{}", self.from, self.to),
        }
    }
}
