//! Reference extraction
//!
//! Walks a whole document tree, at any depth, and yields every string stored under a
//! `uses` key. The walk is total: documents of any shape produce zero or more
//! matches and never an error.

use super::document::{Node, WorkflowDocument};
use super::reference::ActionReference;

/// Mapping key that introduces an action reference
pub const USES_KEY: &str = "uses";

enum Pending<'a> {
    Visit(&'a Node),
    Found(&'a str),
}

/// Depth-first iterator over raw `uses` strings.
///
/// Built with an explicit stack, so document depth is bounded only by memory.
pub struct RawReferences<'a> {
    stack: Vec<Pending<'a>>,
}

impl<'a> RawReferences<'a> {
    fn new(root: &'a Node) -> Self {
        Self {
            stack: vec![Pending::Visit(root)],
        }
    }
}

impl<'a> Iterator for RawReferences<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(pending) = self.stack.pop() {
            match pending {
                Pending::Found(raw) => return Some(raw),
                Pending::Visit(Node::Mapping(entries)) => {
                    for (key, value) in entries.iter().rev() {
                        match value.as_str() {
                            Some(raw) if key == USES_KEY => self.stack.push(Pending::Found(raw)),
                            _ if value.is_container() => self.stack.push(Pending::Visit(value)),
                            _ => {}
                        }
                    }
                }
                Pending::Visit(Node::Sequence(items)) => {
                    self.stack
                        .extend(items.iter().rev().filter(|n| n.is_container()).map(Pending::Visit));
                }
                Pending::Visit(_) => {}
            }
        }
        None
    }
}

/// Raw `uses` strings found anywhere under `root`
pub fn raw_references(root: &Node) -> RawReferences<'_> {
    RawReferences::new(root)
}

/// Well-formed action references found in a document.
///
/// Malformed values (no `@`, empty name or version) are dropped silently.
pub fn extract_references(document: &WorkflowDocument) -> impl Iterator<Item = ActionReference> + '_ {
    raw_references(document.root()).filter_map(ActionReference::parse)
}
