// Instruction texts sent with image attachments. The system prompt carries the
// real instructions; these only tell the model what the attached images are.

pub const RESUME_AND_JOB_POSTING_IMAGES: &str =
    "첨부된 이미지들은 지원자의 이력서와 채용공고입니다. 이 내용을 분석하여 맞춤형 질문을 생성해주세요.";

pub const RESUME_IMAGE: &str =
    "첨부된 이미지는 지원자의 이력서입니다. 이 이력서 내용을 분석하여 개인 맞춤형 질문을 생성해주세요.";

pub const JOB_POSTING_IMAGE: &str =
    "첨부된 이미지는 채용공고입니다. 이 채용공고 내용을 분석하여 적절한 질문을 생성해주세요.";
