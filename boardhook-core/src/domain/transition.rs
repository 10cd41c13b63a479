//! Transition classifier
//!
//! Maps an inbound event (event name + action + payload details) to at most
//! one board transition. This table is the heart of the relay; both entry
//! points (server and CLI) go through it, so it exists exactly once.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::event::{WebhookPayload, issue_from_branch};

/// Logical board transitions
///
/// Each variant names a lifecycle moment that can be wired to a board column
/// through the configuration file. The snake_case string forms
/// (`issue_reopened`, `pr_merged`, ...) are the configuration keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transition {
    IssueReopened,
    IssueClosed,
    PrOpened,
    PrReopened,
    PrReviewRequested,
    PrMerged,
    PrClosed,
    NewBranch,
}

impl Transition {
    /// Configuration-key form of the transition name
    pub fn as_str(self) -> &'static str {
        match self {
            Transition::IssueReopened => "issue_reopened",
            Transition::IssueClosed => "issue_closed",
            Transition::PrOpened => "pr_opened",
            Transition::PrReopened => "pr_reopened",
            Transition::PrReviewRequested => "pr_review_requested",
            Transition::PrMerged => "pr_merged",
            Transition::PrClosed => "pr_closed",
            Transition::NewBranch => "new_branch",
        }
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of classifying a delivery: move this issue's card, and maybe
/// assign someone to the issue afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardMove {
    pub transition: Transition,
    pub issue_number: u64,
    /// Login to assign to the issue once the card has moved.
    /// Only produced for the new-branch transition.
    pub assignee: Option<String>,
}

/// Classifies a delivery into at most one [`CardMove`].
///
/// Returns `None` when the event/action combination is not in the table, or
/// when the payload lacks the details the matching row needs (no issue
/// number, branch name without a numeric prefix, no sender to assign).
/// "Nothing to do" is an ordinary value here, never an error.
pub fn classify(event_name: &str, payload: &WebhookPayload) -> Option<CardMove> {
    let action = payload.action.as_deref();

    match event_name {
        "issues" => {
            let transition = match action? {
                "reopened" => Transition::IssueReopened,
                "closed" => Transition::IssueClosed,
                _ => return None,
            };
            Some(CardMove {
                transition,
                issue_number: payload.issue_number()?,
                assignee: None,
            })
        }
        "pull_request" => {
            let pr = payload.pull_request.as_ref()?;
            let transition = match action? {
                // An opened PR that already names reviewers goes straight
                // to the review column
                "opened" if !pr.requested_reviewers.is_empty() => Transition::PrReviewRequested,
                "opened" => Transition::PrOpened,
                "reopened" => Transition::PrReopened,
                "review_requested" => Transition::PrReviewRequested,
                "closed" if pr.merged => Transition::PrMerged,
                "closed" => Transition::PrClosed,
                _ => return None,
            };
            Some(CardMove {
                transition,
                issue_number: pr.number,
                assignee: None,
            })
        }
        "create" => {
            if payload.ref_type.as_deref() != Some("branch") {
                return None;
            }
            let issue_number = issue_from_branch(payload.git_ref.as_deref()?)?;
            let sender = payload.sender.as_ref()?;
            Some(CardMove {
                transition: Transition::NewBranch,
                issue_number,
                assignee: Some(sender.login.clone()),
            })
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(value: serde_json::Value) -> WebhookPayload {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_issue_reopened_and_closed() {
        let reopened = payload(serde_json::json!({
            "action": "reopened",
            "issue": {"number": 42}
        }));
        let mv = classify("issues", &reopened).unwrap();
        assert_eq!(mv.transition, Transition::IssueReopened);
        assert_eq!(mv.issue_number, 42);
        assert_eq!(mv.assignee, None);

        let closed = payload(serde_json::json!({
            "action": "closed",
            "issue": {"number": 42}
        }));
        let mv = classify("issues", &closed).unwrap();
        assert_eq!(mv.transition, Transition::IssueClosed);
    }

    #[test]
    fn test_issue_other_actions_are_not_interesting() {
        let assigned = payload(serde_json::json!({
            "action": "assigned",
            "issue": {"number": 42}
        }));
        assert_eq!(classify("issues", &assigned), None);
    }

    #[test]
    fn test_pr_opened_without_reviewers() {
        let opened = payload(serde_json::json!({
            "action": "opened",
            "pull_request": {"number": 5, "requested_reviewers": []}
        }));
        let mv = classify("pull_request", &opened).unwrap();
        assert_eq!(mv.transition, Transition::PrOpened);
        assert_eq!(mv.issue_number, 5);
    }

    #[test]
    fn test_pr_opened_with_reviewers_goes_to_review() {
        let opened = payload(serde_json::json!({
            "action": "opened",
            "pull_request": {
                "number": 5,
                "requested_reviewers": [{"login": "carol"}]
            }
        }));
        let mv = classify("pull_request", &opened).unwrap();
        assert_eq!(mv.transition, Transition::PrReviewRequested);
    }

    #[test]
    fn test_pr_reopened_maps_to_its_own_transition() {
        let reopened = payload(serde_json::json!({
            "action": "reopened",
            "pull_request": {"number": 5}
        }));
        let mv = classify("pull_request", &reopened).unwrap();
        assert_eq!(mv.transition, Transition::PrReopened);
    }

    #[test]
    fn test_pr_review_requested() {
        let review = payload(serde_json::json!({
            "action": "review_requested",
            "pull_request": {"number": 5}
        }));
        let mv = classify("pull_request", &review).unwrap();
        assert_eq!(mv.transition, Transition::PrReviewRequested);
    }

    #[test]
    fn test_pr_closed_splits_on_merged() {
        let merged = payload(serde_json::json!({
            "action": "closed",
            "pull_request": {"number": 5, "merged": true}
        }));
        assert_eq!(
            classify("pull_request", &merged).unwrap().transition,
            Transition::PrMerged
        );

        let abandoned = payload(serde_json::json!({
            "action": "closed",
            "pull_request": {"number": 5, "merged": false}
        }));
        assert_eq!(
            classify("pull_request", &abandoned).unwrap().transition,
            Transition::PrClosed
        );
    }

    #[test]
    fn test_branch_create_carries_assignee() {
        let created = payload(serde_json::json!({
            "ref_type": "branch",
            "ref": "123-fix-bug",
            "sender": {"login": "alice"}
        }));
        let mv = classify("create", &created).unwrap();
        assert_eq!(mv.transition, Transition::NewBranch);
        assert_eq!(mv.issue_number, 123);
        assert_eq!(mv.assignee.as_deref(), Some("alice"));
    }

    #[test]
    fn test_branch_without_issue_prefix_is_ignored() {
        let created = payload(serde_json::json!({
            "ref_type": "branch",
            "ref": "fix-bug",
            "sender": {"login": "alice"}
        }));
        assert_eq!(classify("create", &created), None);
    }

    #[test]
    fn test_tag_create_is_ignored() {
        let created = payload(serde_json::json!({
            "ref_type": "tag",
            "ref": "123-v1.0",
            "sender": {"login": "alice"}
        }));
        assert_eq!(classify("create", &created), None);
    }

    #[test]
    fn test_branch_create_without_sender_is_ignored() {
        let created = payload(serde_json::json!({
            "ref_type": "branch",
            "ref": "123-fix"
        }));
        assert_eq!(classify("create", &created), None);
    }

    #[test]
    fn test_unknown_event_and_missing_action() {
        let push = payload(serde_json::json!({"action": "created"}));
        assert_eq!(classify("push", &push), None);

        let actionless = payload(serde_json::json!({"issue": {"number": 1}}));
        assert_eq!(classify("issues", &actionless), None);
    }

    #[test]
    fn test_transition_config_key_names() {
        assert_eq!(Transition::IssueReopened.to_string(), "issue_reopened");
        assert_eq!(Transition::PrReviewRequested.as_str(), "pr_review_requested");
        assert_eq!(Transition::NewBranch.as_str(), "new_branch");

        // serde forms match the config keys
        let parsed: Transition = serde_json::from_str("\"pr_merged\"").unwrap();
        assert_eq!(parsed, Transition::PrMerged);
        assert_eq!(
            serde_json::to_string(&Transition::PrReopened).unwrap(),
            "\"pr_reopened\""
        );
    }
}
