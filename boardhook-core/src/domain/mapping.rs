//! Transition-to-column mapping
//!
//! Configuration-sourced table from logical transition to board column
//! display name. A transition absent from the table means "nothing is wired
//! up for this" and is always a no-op, never an error.

use std::collections::HashMap;

use serde::Deserialize;

use crate::domain::transition::Transition;

/// Configured transition -> column-name table
///
/// Deserializes from the `[transitions]` table of the config file, e.g.
///
/// ```toml
/// [transitions]
/// issue_reopened = "In Progress"
/// pr_merged = "Done"
/// ```
///
/// Keys must be transition names; an unknown key is a configuration error
/// surfaced at startup, not at delivery time.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct ColumnMapping(HashMap<Transition, String>);

impl ColumnMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Column display name configured for `transition`, if any
    pub fn column_for(&self, transition: Transition) -> Option<&str> {
        self.0.get(&transition).map(String::as_str)
    }

    pub fn insert(&mut self, transition: Transition, column: impl Into<String>) {
        self.0.insert(transition, column.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl FromIterator<(Transition, String)> for ColumnMapping {
    fn from_iter<I: IntoIterator<Item = (Transition, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_transition_is_none() {
        let mapping = ColumnMapping::new();
        assert!(mapping.is_empty());
        assert_eq!(mapping.column_for(Transition::IssueReopened), None);
    }

    #[test]
    fn test_configured_transition_resolves() {
        let mut mapping = ColumnMapping::new();
        mapping.insert(Transition::IssueReopened, "In Progress");
        assert_eq!(
            mapping.column_for(Transition::IssueReopened),
            Some("In Progress")
        );
        assert_eq!(mapping.column_for(Transition::PrMerged), None);
    }

    #[test]
    fn test_deserializes_from_config_keys() {
        let mapping: ColumnMapping = serde_json::from_value(serde_json::json!({
            "issue_closed": "Closed",
            "pr_review_requested": "Review"
        }))
        .unwrap();
        assert_eq!(mapping.len(), 2);
        assert_eq!(mapping.column_for(Transition::IssueClosed), Some("Closed"));
        assert_eq!(
            mapping.column_for(Transition::PrReviewRequested),
            Some("Review")
        );
    }

    #[test]
    fn test_unknown_key_is_an_error() {
        let result: Result<ColumnMapping, _> =
            serde_json::from_value(serde_json::json!({"issue_resolved": "Done"}));
        assert!(result.is_err());
    }
}
