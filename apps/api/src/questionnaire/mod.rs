// Interview questionnaire generation.
// Implements: form intake and validation, document preparation, prompt
// assembly, and the completion call. All LLM calls go through llm_client.

use std::fmt;

pub mod form;
pub mod generator;
pub mod handlers;

/// Which of the two optional uploads a file or error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentRole {
    Resume,
    JobPosting,
}

impl DocumentRole {
    pub fn extraction_failed_message(self) -> &'static str {
        match self {
            DocumentRole::Resume => "이력서 파일 처리 중 오류가 발생했습니다.",
            DocumentRole::JobPosting => "채용공고 파일 처리 중 오류가 발생했습니다.",
        }
    }
}

impl fmt::Display for DocumentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentRole::Resume => f.write_str("resume"),
            DocumentRole::JobPosting => f.write_str("job posting"),
        }
    }
}
