//! Webhook payload model
//!
//! Partial serde view over GitHub webhook event JSON. Only the fields the
//! classifier needs are modelled; everything GitHub sends beyond these is
//! ignored. Fields that are not present on every event type are `Option` —
//! in particular, a ping delivery carries no `repository` at all.

use serde::Deserialize;

/// Inbound webhook payload
///
/// Shape shared by the `issues`, `pull_request` and `create` events. The
/// payload is deserialized from the exact bytes that were signature-checked;
/// it is never re-serialized.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookPayload {
    pub action: Option<String>,
    pub repository: Option<Repository>,
    pub issue: Option<Issue>,
    pub pull_request: Option<PullRequest>,
    pub sender: Option<Sender>,
    /// Present on `create` events only ("branch" or "tag")
    pub ref_type: Option<String>,
    /// The created ref name on `create` events
    #[serde(rename = "ref")]
    pub git_ref: Option<String>,
}

impl WebhookPayload {
    /// The issue or pull request number this delivery is about.
    ///
    /// Reads `issue.number` first, falling back to `pull_request.number`.
    /// `None` for deliveries that concern neither (e.g. `create`).
    pub fn issue_number(&self) -> Option<u64> {
        self.issue
            .as_ref()
            .map(|i| i.number)
            .or_else(|| self.pull_request.as_ref().map(|pr| pr.number))
    }
}

/// Repository the event originated from
#[derive(Debug, Clone, Deserialize)]
pub struct Repository {
    pub id: u64,
    /// "owner/repo"
    pub full_name: String,
}

/// Issue reference inside a payload
#[derive(Debug, Clone, Deserialize)]
pub struct Issue {
    pub number: u64,
}

/// Pull request reference inside a payload
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequest {
    pub number: u64,
    #[serde(default)]
    pub merged: bool,
    #[serde(default)]
    pub requested_reviewers: Vec<Sender>,
}

/// A GitHub user reference (sender, reviewer, ...)
#[derive(Debug, Clone, Deserialize)]
pub struct Sender {
    pub login: String,
}

/// Extracts an issue number from a branch name.
///
/// A branch relates to an issue when its name starts with a non-empty run of
/// ASCII digits immediately followed by `-`, e.g. `123-fix-bug` relates to
/// issue 123. `fix-bug`, `-fix` and a bare `123` do not match.
pub fn issue_from_branch(branch: &str) -> Option<u64> {
    let (prefix, _) = branch.split_once('-')?;
    if prefix.is_empty() || !prefix.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    prefix.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_from_branch_numeric_prefix() {
        assert_eq!(issue_from_branch("123-fix-bug"), Some(123));
        assert_eq!(issue_from_branch("7-x"), Some(7));
        // Trailing dash with nothing after it still names the issue
        assert_eq!(issue_from_branch("123-"), Some(123));
    }

    #[test]
    fn test_issue_from_branch_rejects_non_numeric() {
        assert_eq!(issue_from_branch("fix-bug"), None);
        assert_eq!(issue_from_branch("12a-fix"), None);
        // A sign character is not a digit even though u64::from_str takes it
        assert_eq!(issue_from_branch("+5-fix"), None);
        assert_eq!(issue_from_branch("-fix"), None);
        assert_eq!(issue_from_branch("123"), None);
        assert_eq!(issue_from_branch(""), None);
    }

    #[test]
    fn test_issue_number_prefers_issue_over_pull_request() {
        let payload: WebhookPayload = serde_json::from_value(serde_json::json!({
            "issue": {"number": 42},
            "pull_request": {"number": 9}
        }))
        .unwrap();
        assert_eq!(payload.issue_number(), Some(42));
    }

    #[test]
    fn test_issue_number_falls_back_to_pull_request() {
        let payload: WebhookPayload = serde_json::from_value(serde_json::json!({
            "pull_request": {"number": 9}
        }))
        .unwrap();
        assert_eq!(payload.issue_number(), Some(9));
    }

    #[test]
    fn test_ping_delivery_has_no_repository() {
        // GitHub's initial delivery carries zen/hook_id but no repository
        let payload: WebhookPayload =
            serde_json::from_value(serde_json::json!({"zen": "Keep it logically awesome."}))
                .unwrap();
        assert!(payload.repository.is_none());
        assert_eq!(payload.issue_number(), None);
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let payload: WebhookPayload = serde_json::from_value(serde_json::json!({
            "action": "closed",
            "repository": {"id": 1, "full_name": "octo/repo", "private": false},
            "issue": {"number": 3, "title": "broken"},
            "organization": {"login": "octo"}
        }))
        .unwrap();
        assert_eq!(payload.repository.as_ref().unwrap().full_name, "octo/repo");
        assert_eq!(payload.issue_number(), Some(3));
    }
}
