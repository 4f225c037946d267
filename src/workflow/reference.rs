//! Action references and the `name@version` splitter

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

lazy_static! {
    /// `name@version`, split on the first `@`. The name never contains `@`.
    static ref USES_PATTERN: Regex = Regex::new(r"^([^@]+)@(.+)$").unwrap();
}

/// One external action invoked from a workflow step.
///
/// Two references denote the same usage iff both the name and the version are equal.
/// Ordering is by name, then by version, using byte-wise comparison.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ActionReference {
    /// Action name (e.g., `actions/checkout`)
    pub name: String,
    /// Requested version, tag, branch or SHA (e.g., `v4`)
    pub version: String,
}

impl ActionReference {
    /// Create a reference from already-split parts
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }

    /// Split a raw `uses` value into a reference.
    ///
    /// Returns `None` when there is no `@`, or when either side of the first `@`
    /// is empty. Everything after the first `@` is the version, verbatim.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use actionlens::workflow::ActionReference;
    ///
    /// let reference = ActionReference::parse("actions/checkout@v4").unwrap();
    /// assert_eq!(reference.name, "actions/checkout");
    /// assert_eq!(reference.version, "v4");
    ///
    /// assert!(ActionReference::parse("actions/checkout").is_none());
    /// assert!(ActionReference::parse("@v4").is_none());
    /// ```
    pub fn parse(raw: &str) -> Option<Self> {
        let captures = USES_PATTERN.captures(raw)?;
        Some(Self::new(&captures[1], &captures[2]))
    }
}

impl fmt::Display for ActionReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_marketplace_action() {
        let reference = ActionReference::parse("actions/checkout@v4").unwrap();
        assert_eq!(reference, ActionReference::new("actions/checkout", "v4"));
    }

    #[test]
    fn test_parse_without_separator() {
        assert!(ActionReference::parse("actions/checkout").is_none());
        assert!(ActionReference::parse("./.github/actions/build").is_none());
    }

    #[test]
    fn test_parse_empty_sides() {
        assert!(ActionReference::parse("@v4").is_none());
        assert!(ActionReference::parse("actions/checkout@").is_none());
        assert!(ActionReference::parse("@").is_none());
        assert!(ActionReference::parse("").is_none());
    }

    #[test]
    fn test_parse_splits_on_first_separator_only() {
        let reference =
            ActionReference::parse("octo-org/shared/.github/workflows/ci.yml@refs/heads/rel@2")
                .unwrap();
        assert_eq!(reference.name, "octo-org/shared/.github/workflows/ci.yml");
        assert_eq!(reference.version, "refs/heads/rel@2");
    }

    #[test]
    fn test_parse_version_with_sha() {
        let reference = ActionReference::parse(
            "actions/setup-node@8f152de45cc393bb48ce5d89d36b731f54556e65",
        )
        .unwrap();
        assert_eq!(reference.version.len(), 40);
    }

    #[test]
    fn test_parse_version_with_newline_is_rejected() {
        assert!(ActionReference::parse("actions/checkout@v4\nextra").is_none());
    }

    #[test]
    fn test_display_round_trips_text() {
        let reference = ActionReference::new("docker/build-push-action", "v5");
        assert_eq!(reference.to_string(), "docker/build-push-action@v5");
    }

    #[test]
    fn test_ordering_by_name_then_version() {
        let mut refs = vec![
            ActionReference::new("b/x", "v1"),
            ActionReference::new("a/y", "v2"),
            ActionReference::new("a/y", "v10"),
        ];
        refs.sort();
        assert_eq!(
            refs,
            vec![
                ActionReference::new("a/y", "v10"),
                ActionReference::new("a/y", "v2"),
                ActionReference::new("b/x", "v1"),
            ]
        );
    }
}
