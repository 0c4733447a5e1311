//! Advisor commentary on resolved policies
//!
//! Every failure mode (no endpoint configured, timeout, non-2xx, empty,
//! over-long or malformed output) degrades to a fallback. Callers never
//! see an advisor error.

use crate::core::random::RandomSource;
use crate::core::types::{Difficulty, MiniGameOutcome};
use crate::llm::client::LlmClient;
use crate::llm::parser::{accept_comment, parse_assessment, PolicyAssessment};
use crate::state::stats::Stats;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const FALLBACK_COMMENTS: [&str; 5] = [
    "Interesting choice. Let's see how this plays out.",
    "The people have spoken... sort of.",
    "Bold move. History will be the judge.",
    "Well, that's one way to govern.",
    "Democracy in action, for better or worse.",
];

pub fn fallback_comment(rng: &mut dyn RandomSource) -> &'static str {
    FALLBACK_COMMENTS[rng.index(FALLBACK_COMMENTS.len())]
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentRequest {
    pub policy_id: String,
    pub difficulty: Difficulty,
    pub approved: bool,
    pub misses: u32,
}

impl CommentRequest {
    pub fn new(policy_id: &str, difficulty: Difficulty, outcome: &MiniGameOutcome) -> Self {
        Self {
            policy_id: policy_id.to_string(),
            difficulty,
            approved: outcome.approved,
            misses: outcome.misses,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentRequest {
    pub policy: String,
    pub approved: bool,
    pub stats: Stats,
}

fn outcome_word(approved: bool) -> &'static str {
    if approved {
        "approved"
    } else {
        "rejected"
    }
}

pub fn comment_prompt(request: &CommentRequest) -> String {
    format!(
        "You are a witty political advisor. A policy decision was just made. \
         Respond with ONE short, clever comment (max 15 words, no emojis).\n\n\
         Policy: {}\nDifficulty: {}\nOutcome: {}\nPerformance: {} mistakes\n\nComment:",
        request.policy_id,
        request.difficulty.as_str(),
        outcome_word(request.approved),
        request.misses
    )
}

pub fn assessment_prompt(request: &AssessmentRequest) -> String {
    let stats = serde_json::json!({
        "approval": request.stats.approval,
        "power": request.stats.power,
        "standing": request.stats.standing,
    });
    format!(
        "{}\n\nNow respond for:\nPolicy: {}, Outcome: {}, Stats: {}\n\n\
         Return ONLY the JSON object, no markdown, no code fences, no additional text.",
        ASSESSMENT_SYSTEM_PROMPT,
        request.policy,
        outcome_word(request.approved),
        stats
    )
}

/// Optional LLM-backed advisor
pub struct Advisor {
    client: Option<LlmClient>,
}

impl Advisor {
    /// Advisor that always falls back
    pub fn offline() -> Self {
        Self { client: None }
    }

    pub fn new(client: LlmClient) -> Self {
        Self { client: Some(client) }
    }

    /// Use the endpoint named in the environment, or run offline
    pub fn from_env(timeout: Duration) -> Self {
        match LlmClient::from_env() {
            Ok(client) => {
                tracing::info!(model = client.model(), format = ?client.api_format(), "Advisor online");
                Self::new(client.with_timeout(timeout))
            }
            Err(e) => {
                tracing::info!("Advisor offline: {}", e);
                Self::offline()
            }
        }
    }

    pub fn is_online(&self) -> bool {
        self.client.is_some()
    }

    /// Fetch a one-line comment; `None` means use a fallback line
    pub async fn comment(&self, request: &CommentRequest) -> Option<String> {
        let client = self.client.as_ref()?;
        match client.complete("", &comment_prompt(request), false).await {
            Ok(raw) => {
                let accepted = accept_comment(&raw);
                if accepted.is_none() {
                    tracing::warn!(len = raw.len(), "Advisor comment discarded");
                }
                accepted
            }
            Err(e) => {
                tracing::warn!("Advisor unavailable, using fallback comment: {}", e);
                None
            }
        }
    }

    /// Fetch a structured assessment, falling back on any failure
    pub async fn assess(&self, request: &AssessmentRequest) -> PolicyAssessment {
        let Some(client) = self.client.as_ref() else {
            return PolicyAssessment::fallback();
        };
        let response = match client.complete("", &assessment_prompt(request), true).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("Advisor assessment failed: {}", e);
                return PolicyAssessment::fallback();
            }
        };
        match parse_assessment(&response) {
            Ok(assessment) => assessment,
            Err(e) => {
                tracing::warn!("{}", e);
                PolicyAssessment::fallback()
            }
        }
    }
}

const ASSESSMENT_SYSTEM_PROMPT: &str = r#"You are a political advisor. A policy decision has been made. Return ONLY valid JSON matching this exact schema:

{
  "decision_effect": "string (short sentence describing the outcome)",
  "approval_change": "integer (-10 to +10)",
  "power_change": "integer (-15 to +15)",
  "standing_change": "integer (-10 to +10)",
  "advisor_comment": "string (witty one-liner, no emojis)"
}

Examples:

Policy: Infrastructure Deal, Outcome: approved, Stats: {approval: 50, power: 50, standing: 50}
{"decision_effect":"The infrastructure bill passes with bipartisan support.","approval_change":8,"power_change":-5,"standing_change":6,"advisor_comment":"Building bridges, literally and politically."}

Policy: Military Spending, Outcome: rejected, Stats: {approval: 45, power: 60, standing: 55}
{"decision_effect":"Defense hawks are furious about the budget cut.","approval_change":-6,"power_change":-10,"standing_change":3,"advisor_comment":"Peace through... budget constraints?"}

Policy: Criminal Justice Reform, Outcome: approved, Stats: {approval: 55, power: 48, standing: 52}
{"decision_effect":"Reform passes, progressive base energized.","approval_change":7,"power_change":2,"standing_change":5,"advisor_comment":"Justice delayed is justice denied, but justice delivered is votes earned."}"#;
