//! # Workflow Module
//!
//! Turns workflow files into action references.
//!
//! - [`document`] - Untyped document tree parsed from workflow YAML
//! - [`extract`] - Depth-first search for `uses` fields
//! - [`reference`] - `name@version` splitting into [`ActionReference`]
//!
//! ## Examples
//!
//! ```rust
//! use actionlens::workflow::{extract_references, WorkflowDocument};
//!
//! let doc = WorkflowDocument::parse(
//!     "jobs:\n  build:\n    steps:\n      - uses: actions/checkout@v4\n",
//! )
//! .unwrap();
//!
//! let refs: Vec<_> = extract_references(&doc).collect();
//! assert_eq!(refs.len(), 1);
//! assert_eq!(refs[0].name, "actions/checkout");
//! ```

pub mod document;
pub mod extract;
pub mod reference;

pub use document::{Node, WorkflowDocument};
pub use extract::{extract_references, raw_references, USES_KEY};
pub use reference::ActionReference;
