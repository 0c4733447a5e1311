//! Parse advisor responses into structured values
//!
//! The advisor is free text on the wire. A comment is accepted only when it
//! is a short single answer; an assessment must be a JSON object matching
//! `PolicyAssessment`. Anything else is rejected and the caller falls back.

use crate::core::error::{PoliticsError, Result};
use serde::{Deserialize, Serialize};

/// Comments of this many characters or more are discarded
pub const MAX_COMMENT_CHARS: usize = 100;

/// Structured advisor take on a decision
///
/// The stat fields are advisory only; the simulation never applies them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyAssessment {
    pub decision_effect: String,
    pub approval_change: i32,
    pub power_change: i32,
    pub standing_change: i32,
    pub advisor_comment: String,
}

impl PolicyAssessment {
    pub fn fallback() -> Self {
        Self {
            decision_effect: "Outcome recorded.".into(),
            approval_change: 0,
            power_change: 0,
            standing_change: 0,
            advisor_comment: "Keeping it steady for now.".into(),
        }
    }
}

/// Trim a raw comment and keep it if it is non-empty and short
pub fn accept_comment(raw: &str) -> Option<String> {
    let comment = raw.trim();
    let len = comment.chars().count();
    if len > 0 && len < MAX_COMMENT_CHARS {
        Some(comment.to_string())
    } else {
        None
    }
}

/// Remove markdown code fences around a response
pub fn strip_code_fences(response: &str) -> String {
    response
        .replace("```json\n", "")
        .replace("```json", "")
        .replace("```\n", "")
        .replace("```", "")
        .trim()
        .to_string()
}

/// Parse an assessment; the cleaned text must itself be a JSON object
pub fn parse_assessment(response: &str) -> Result<PolicyAssessment> {
    let cleaned = strip_code_fences(response);
    if cleaned.is_empty() {
        return Err(PoliticsError::AdvisorError("Empty response".into()));
    }
    if !cleaned.starts_with('{') {
        return Err(PoliticsError::AdvisorError(format!(
            "Response is not a JSON object: {}",
            cleaned.chars().take(100).collect::<String>()
        )));
    }
    serde_json::from_str(&cleaned).map_err(|e| {
        PoliticsError::AdvisorError(format!("Failed to parse assessment: {} - Response: {}", e, cleaned))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accept_comment_bounds() {
        assert_eq!(accept_comment("  Bold move.  \n").as_deref(), Some("Bold move."));
        assert_eq!(accept_comment("   "), None);
        assert_eq!(accept_comment(&"x".repeat(99)).map(|c| c.len()), Some(99));
        assert_eq!(accept_comment(&"x".repeat(100)), None);
    }

    #[test]
    fn test_parse_assessment_plain() {
        let response = r#"{"decision_effect":"Reform passes.","approval_change":7,"power_change":2,"standing_change":5,"advisor_comment":"Votes earned."}"#;
        let assessment = parse_assessment(response).unwrap();
        assert_eq!(assessment.approval_change, 7);
        assert_eq!(assessment.advisor_comment, "Votes earned.");
    }

    #[test]
    fn test_parse_assessment_with_fences() {
        let response = "```json\n{\"decision_effect\":\"x\",\"approval_change\":-6,\"power_change\":-10,\"standing_change\":3,\"advisor_comment\":\"y\"}\n```";
        let assessment = parse_assessment(response).unwrap();
        assert_eq!(assessment.power_change, -10);
    }

    #[test]
    fn test_parse_assessment_rejects_prose() {
        assert!(parse_assessment("Sure! Here is my answer: {}").is_err());
        assert!(parse_assessment("").is_err());
    }

    #[test]
    fn test_parse_assessment_rejects_wrong_shape() {
        let response = r#"{"decision_effect":"x","approval_change":1.5}"#;
        assert!(matches!(parse_assessment(response), Err(PoliticsError::AdvisorError(_))));
    }

    #[test]
    fn test_fallback_assessment() {
        let fallback = PolicyAssessment::fallback();
        assert_eq!(fallback.decision_effect, "Outcome recorded.");
        assert_eq!(fallback.approval_change + fallback.power_change + fallback.standing_change, 0);
    }
}
