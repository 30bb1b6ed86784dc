use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Which documents accompany a submission. Selects both the base prompt and the
/// output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptCase {
    NoResumeNoJobPosting,
    ResumeNoJobPosting,
    NoResumeJobPosting,
    ResumeJobPosting,
}

impl PromptCase {
    pub fn from_presence(has_resume: bool, has_job_posting: bool) -> Self {
        match (has_resume, has_job_posting) {
            (false, false) => PromptCase::NoResumeNoJobPosting,
            (true, false) => PromptCase::ResumeNoJobPosting,
            (false, true) => PromptCase::NoResumeJobPosting,
            (true, true) => PromptCase::ResumeJobPosting,
        }
    }
}

/// One template per [`PromptCase`]. Keys match the stored document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PromptVariants {
    pub no_resume_no_job_posting: String,
    pub resume_no_job_posting: String,
    pub no_resume_job_posting: String,
    pub resume_job_posting: String,
}

impl PromptVariants {
    pub fn get(&self, case: PromptCase) -> &str {
        match case {
            PromptCase::NoResumeNoJobPosting => &self.no_resume_no_job_posting,
            PromptCase::ResumeNoJobPosting => &self.resume_no_job_posting,
            PromptCase::NoResumeJobPosting => &self.no_resume_job_posting,
            PromptCase::ResumeJobPosting => &self.resume_job_posting,
        }
    }
}

/// Category name → prompt fragment. Unknown categories resolve to the empty
/// string so an unrecognised form value simply contributes nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FragmentMap(BTreeMap<String, String>);

impl FragmentMap {
    pub fn lookup(&self, key: &str) -> &str {
        self.0.get(key).map(String::as_str).unwrap_or_default()
    }

    pub fn insert(&mut self, key: impl Into<String>, fragment: impl Into<String>) {
        self.0.insert(key.into(), fragment.into());
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FragmentMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Every template the assembler draws from, decoded from the prompt document.
///
/// Missing sections decode as empty; keys the assembler does not know are
/// ignored here but stay in the stored document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PromptBundle {
    pub base_prompts: PromptVariants,
    pub output_formats: PromptVariants,
    pub position_prompts: FragmentMap,
    pub experience_prompts: FragmentMap,
    pub company_type_prompts: FragmentMap,
}
