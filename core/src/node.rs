use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Leaf node: a named piece of reusable text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Prompt {
    pub id: Uuid,
    pub name: String,
    pub content: String,
}

impl Prompt {
    #[must_use]
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            content: content.into(),
        }
    }
}

/// Container node. Children keep insertion order; display order is
/// computed separately (see `sorted_for_display`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Folder {
    pub id: Uuid,
    pub name: String,
    pub children: Vec<Node>,
}

impl Folder {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            children: Vec::new(),
        }
    }
}

/// A prompt or a folder. Externally tagged on the wire, so the persisted
/// form is `{"prompt": {...}}` or `{"folder": {...}}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Node {
    Prompt(Prompt),
    Folder(Folder),
}

impl Node {
    /// The id of the contained variant. Ids are assigned once at creation
    /// and never change.
    #[must_use]
    pub fn id(&self) -> Uuid {
        match self {
            Node::Prompt(prompt) => prompt.id,
            Node::Folder(folder) => folder.id,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Node::Prompt(prompt) => &prompt.name,
            Node::Folder(folder) => &folder.name,
        }
    }

    #[must_use]
    pub fn is_folder(&self) -> bool {
        matches!(self, Node::Folder(_))
    }
}

/// The top-level collection, persisted as a single unit.
pub type Forest = Vec<Node>;

/// Display ordering for one sibling level: folders before prompts, then
/// alphabetical by name within each group. Ties keep insertion order
/// (the sort is stable). Storage order is untouched.
#[must_use]
pub fn sorted_for_display(nodes: &[Node]) -> Vec<&Node> {
    let mut out: Vec<&Node> = nodes.iter().collect();
    out.sort_by(|a, b| match (a, b) {
        (Node::Folder(_), Node::Prompt(_)) => Ordering::Less,
        (Node::Prompt(_), Node::Folder(_)) => Ordering::Greater,
        _ => a.name().cmp(b.name()),
    });
    out
}
