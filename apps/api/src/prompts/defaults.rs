//! Initial prompt document, written once when the store is empty. After that
//! the admin editor owns the content.

use crate::models::questionnaire::{COMPANY_TYPES, EXPERIENCES, POSITIONS};
use crate::prompts::bundle::{FragmentMap, PromptBundle, PromptVariants};

const INTERVIEWER_ROLE: &str = "당신은 15년 경력의 전문 면접관입니다. \
    아래 정보를 바탕으로 지원자에게 던질 면접 질문을 작성하세요.";

const CANDIDATE_PROFILE: &str = "###직무\n{position}\n\n\
    ###경력\n{experience}\n\n\
    ###기업형태\n{companyType}\n\n\
    ###주요 업무\n{mainTasks}\n\n\
    ###조직 특성\n{organizationalFocus}";

const QUESTION_SHAPE: &str = r#"{
  "commonQuestions": [
    {"question": "질문", "followUps": ["꼬리 질문 1", "꼬리 질문 2"]}
  ],
  "individualQuestions": [
    {"question": "질문", "followUps": ["꼬리 질문 1"], "resumeSource": "근거가 된 이력서 문장"}
  ]
}"#;

fn base_prompts() -> PromptVariants {
    PromptVariants {
        no_resume_no_job_posting: format!(
            "{INTERVIEWER_ROLE}\n\n[이력서 없음 · 채용공고 없음]\n\
             입력된 직무 정보만으로 공통 질문을 작성하세요.\n\n{CANDIDATE_PROFILE}"
        ),
        resume_no_job_posting: format!(
            "{INTERVIEWER_ROLE}\n\n[이력서 있음 · 채용공고 없음]\n\
             직무 정보로 공통 질문을, 이력서로 개인 맞춤 질문을 작성하세요.\n\n\
             {CANDIDATE_PROFILE}\n\n###이력서\n{{resume}}"
        ),
        no_resume_job_posting: format!(
            "{INTERVIEWER_ROLE}\n\n[이력서 없음 · 채용공고 있음]\n\
             채용공고의 자격 요건과 우대 사항을 중심으로 공통 질문을 작성하세요.\n\n\
             {CANDIDATE_PROFILE}\n\n###채용공고\n{{jobPosting}}"
        ),
        resume_job_posting: format!(
            "{INTERVIEWER_ROLE}\n\n[이력서 있음 · 채용공고 있음]\n\
             채용공고 요건과 이력서 경험을 연결하는 질문을 작성하세요.\n\n\
             {CANDIDATE_PROFILE}\n\n###이력서\n{{resume}}\n\n###채용공고\n{{jobPosting}}"
        ),
    }
}

fn output_formats() -> PromptVariants {
    let common_only = format!(
        "반드시 아래 JSON 형식으로만 응답하세요. 공통 질문 10개를 작성하고 \
         individualQuestions는 빈 배열로 두세요.\n{QUESTION_SHAPE}"
    );
    let with_individual = format!(
        "반드시 아래 JSON 형식으로만 응답하세요. 공통 질문 7개와 이력서 기반 \
         개인 질문 5개를 작성하고, 각 개인 질문의 resumeSource에 근거 문장을 인용하세요.\n\
         {QUESTION_SHAPE}"
    );

    PromptVariants {
        no_resume_no_job_posting: common_only.clone(),
        resume_no_job_posting: with_individual.clone(),
        no_resume_job_posting: common_only,
        resume_job_posting: with_individual,
    }
}

fn fragments(keys: &[&str], describe: impl Fn(&str) -> String) -> FragmentMap {
    let mut map = FragmentMap::default();
    for key in keys {
        map.insert(*key, describe(*key));
    }
    map
}

pub fn default_bundle() -> PromptBundle {
    PromptBundle {
        base_prompts: base_prompts(),
        output_formats: output_formats(),
        position_prompts: fragments(POSITIONS, |p| {
            format!("{p} 직무의 핵심 역량과 실무 경험을 검증하는 질문을 포함하세요.")
        }),
        experience_prompts: fragments(EXPERIENCES, |e| match e {
            "신입" => "신입 지원자입니다. 학습 능력, 태도, 잠재력을 확인하세요.".to_string(),
            _ => "경력 지원자입니다. 구체적인 성과와 문제 해결 사례를 확인하세요.".to_string(),
        }),
        company_type_prompts: fragments(COMPANY_TYPES, |c| {
            format!("{c}의 조직 문화와 가치관에 맞는지 확인하는 질문을 포함하세요.")
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompts::assembler::{
        assemble_prompt, PromptInput, JOB_POSTING_PLACEHOLDER, RESUME_PLACEHOLDER,
    };
    use crate::prompts::bundle::PromptCase;

    #[test]
    fn test_every_vocabulary_entry_has_a_fragment() {
        let bundle = default_bundle();
        assert_eq!(bundle.position_prompts.len(), POSITIONS.len());
        assert_eq!(bundle.experience_prompts.len(), EXPERIENCES.len());
        assert_eq!(bundle.company_type_prompts.len(), COMPANY_TYPES.len());
        assert!(bundle.position_prompts.lookup("영업·BizDev").contains("영업·BizDev"));
    }

    #[test]
    fn test_templates_only_reference_documents_they_receive() {
        let bases = default_bundle().base_prompts;
        let none = bases.get(PromptCase::NoResumeNoJobPosting);
        assert!(!none.contains(RESUME_PLACEHOLDER) && !none.contains(JOB_POSTING_PLACEHOLDER));
        assert!(!bases
            .get(PromptCase::ResumeNoJobPosting)
            .contains(JOB_POSTING_PLACEHOLDER));
        assert!(!bases
            .get(PromptCase::NoResumeJobPosting)
            .contains(RESUME_PLACEHOLDER));
    }

    #[test]
    fn test_default_prompt_leaves_no_placeholders() {
        let bundle = default_bundle();
        let prompt = assemble_prompt(
            &bundle,
            &PromptInput {
                position: "IT 인프라·보안",
                experience: "경력",
                company_type: "사기업",
                main_tasks: "클라우드 보안 운영",
                organizational_focus: "빠른 실행",
                resume_text: "AWS 보안 아키텍처 설계 5년",
                job_posting_text: "ISMS 인증 경험 우대",
            },
        );
        assert!(prompt.contains("[이력서 있음 · 채용공고 있음]"));
        assert!(prompt.contains("AWS 보안 아키텍처 설계 5년"));
        for token in ["{position}", "{experience}", "{companyType}", "{mainTasks}", "{resume}"] {
            assert!(!prompt.contains(token), "{token} left in prompt");
        }
    }
}
