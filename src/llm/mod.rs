pub mod advisor;
pub mod client;
pub mod parser;

pub use advisor::{fallback_comment, Advisor, AssessmentRequest, CommentRequest, FALLBACK_COMMENTS};
pub use client::{ApiFormat, LlmClient};
pub use parser::{accept_comment, parse_assessment, PolicyAssessment};
