//! Parsed workflow documents
//!
//! A workflow file is parsed into an untyped tree of [`Node`]s. Only the shape of the
//! tree matters to the extractor, so scalars keep just enough to tell strings apart
//! from everything else.

use serde::Deserialize;
use serde_yaml::{Deserializer, Value};
use std::collections::BTreeMap;

use crate::error::DocumentError;

/// One node of a parsed workflow tree
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Null,
    Bool(bool),
    /// Numbers keep their textual form
    Number(String),
    String(String),
    Sequence(Vec<Node>),
    Mapping(BTreeMap<String, Node>),
}

impl Node {
    /// The string payload, if this node is a string scalar
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::String(s) => Some(s),
            _ => None,
        }
    }

    /// Whether this node can contain other nodes
    pub fn is_container(&self) -> bool {
        matches!(self, Node::Sequence(_) | Node::Mapping(_))
    }
}

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Node::Null,
            Value::Bool(b) => Node::Bool(b),
            Value::Number(n) => Node::Number(n.to_string()),
            Value::String(s) => Node::String(s),
            Value::Sequence(items) => Node::Sequence(items.into_iter().map(Node::from).collect()),
            Value::Mapping(mapping) => Node::Mapping(
                mapping
                    .into_iter()
                    .filter_map(|(key, value)| mapping_key(key).map(|k| (k, Node::from(value))))
                    .collect(),
            ),
            Value::Tagged(tagged) => Node::from(tagged.value),
        }
    }
}

/// Mapping keys become strings; null and complex keys are dropped.
fn mapping_key(key: Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Tagged(tagged) => mapping_key(tagged.value),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) => None,
    }
}

/// One parsed workflow file
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowDocument {
    root: Node,
}

impl WorkflowDocument {
    /// Parse workflow YAML text.
    ///
    /// Empty text is a valid, empty document. Only the first document of a
    /// multi-document stream is read; anything after the next `---` is ignored.
    pub fn parse(text: &str) -> Result<Self, DocumentError> {
        let value = match Deserializer::from_str(text).next() {
            Some(document) => Value::deserialize(document)?,
            None => Value::Null,
        };
        Ok(Self::from_node(Node::from(value)))
    }

    /// Wrap an already-built tree
    pub fn from_node(root: Node) -> Self {
        Self { root }
    }

    /// Root of the tree
    pub fn root(&self) -> &Node {
        &self.root
    }
}
