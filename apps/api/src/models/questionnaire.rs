use serde::{Deserialize, Serialize};

/// A question shared by every candidate for the role, with follow-ups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub question: String,
    #[serde(default)]
    pub follow_ups: Vec<String>,
}

/// A question tailored to the uploaded résumé.
/// `resume_source` cites the résumé passage the question was drawn from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndividualQuestion {
    pub question: String,
    #[serde(default)]
    pub follow_ups: Vec<String>,
    #[serde(default)]
    pub resume_source: String,
}

/// The questionnaire exactly as the model returned it.
/// Only the shape is checked; field contents are never validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionnaireOutput {
    pub common_questions: Vec<Question>,
    #[serde(default)]
    pub individual_questions: Vec<IndividualQuestion>,
}

pub const POSITIONS: &[&str] = &[
    "경영·전략",
    "제품·서비스 기획",
    "연구·개발 (R&D) / 엔지니어링",
    "생산·운영 / 프로젝트 딜리버리",
    "품질·안전 / 규제 대응",
    "영업·BizDev",
    "마케팅·브랜드",
    "고객지원·CX",
    "재무·회계",
    "인사·총무 / 조직문화",
    "IT 인프라·보안",
    "법무·컴플라이언스",
];

pub const EXPERIENCES: &[&str] = &["신입", "경력"];

pub const COMPANY_TYPES: &[&str] = &["공기업", "사기업", "공공기관"];
