//! Prompt assembly: picks the template pair for the submission's document case
//! and fills its placeholders.

use crate::prompts::bundle::{PromptBundle, PromptCase};

pub const POSITION_PLACEHOLDER: &str = "{position}";
pub const EXPERIENCE_PLACEHOLDER: &str = "{experience}";
pub const COMPANY_TYPE_PLACEHOLDER: &str = "{companyType}";
pub const MAIN_TASKS_PLACEHOLDER: &str = "{mainTasks}";
pub const ORGANIZATIONAL_FOCUS_PLACEHOLDER: &str = "{organizationalFocus}";
pub const RESUME_PLACEHOLDER: &str = "{resume}";
pub const JOB_POSTING_PLACEHOLDER: &str = "{jobPosting}";

/// Form fields and extracted document text for one submission.
#[derive(Debug, Clone, Default)]
pub struct PromptInput<'a> {
    pub position: &'a str,
    pub experience: &'a str,
    pub company_type: &'a str,
    pub main_tasks: &'a str,
    pub organizational_focus: &'a str,
    pub resume_text: &'a str,
    pub job_posting_text: &'a str,
}

impl PromptInput<'_> {
    pub fn case(&self) -> PromptCase {
        PromptCase::from_presence(
            !self.resume_text.trim().is_empty(),
            !self.job_posting_text.trim().is_empty(),
        )
    }
}

/// Builds the system prompt: filled base template, a blank line, then the
/// output format for the same case.
///
/// `{resume}` and `{jobPosting}` are only replaced when that document has
/// text. Templates for the cases without a document are expected not to use
/// the token; if one does, it is left in the prompt as written.
///
/// Substituted values are emitted verbatim: placeholder tokens inside form
/// fields, fragments or document text are never expanded.
pub fn assemble_prompt(bundle: &PromptBundle, input: &PromptInput<'_>) -> String {
    let case = input.case();
    let prompt = fill_placeholders(bundle.base_prompts.get(case), bundle, input);
    format!("{prompt}\n\n{}", bundle.output_formats.get(case))
}

/// Single left-to-right pass over the template. Each `{...}` token with a
/// value is replaced; anything else is copied through.
fn fill_placeholders(template: &str, bundle: &PromptBundle, input: &PromptInput<'_>) -> String {
    let mut filled = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        filled.push_str(&rest[..open]);
        let token = rest[open..]
            .find('}')
            .map(|close| &rest[open..=open + close]);

        match token.and_then(|token| placeholder_value(token, bundle, input).map(|v| (token, v))) {
            Some((token, value)) => {
                filled.push_str(value);
                rest = &rest[open + token.len()..];
            }
            None => {
                filled.push('{');
                rest = &rest[open + 1..];
            }
        }
    }

    filled.push_str(rest);
    filled
}

fn placeholder_value<'a>(
    token: &str,
    bundle: &'a PromptBundle,
    input: &PromptInput<'a>,
) -> Option<&'a str> {
    let value = match token {
        POSITION_PLACEHOLDER => bundle.position_prompts.lookup(input.position),
        EXPERIENCE_PLACEHOLDER => bundle.experience_prompts.lookup(input.experience),
        COMPANY_TYPE_PLACEHOLDER => bundle.company_type_prompts.lookup(input.company_type),
        MAIN_TASKS_PLACEHOLDER => input.main_tasks,
        ORGANIZATIONAL_FOCUS_PLACEHOLDER => input.organizational_focus,
        RESUME_PLACEHOLDER if !input.resume_text.trim().is_empty() => input.resume_text,
        JOB_POSTING_PLACEHOLDER if !input.job_posting_text.trim().is_empty() => {
            input.job_posting_text
        }
        _ => return None,
    };
    Some(value)
}
