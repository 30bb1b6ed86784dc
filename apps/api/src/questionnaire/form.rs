//! Multipart intake for `POST /api/generate`.

use axum::extract::multipart::{Field, Multipart};
use bytes::BytesMut;
use tracing::debug;

use crate::errors::AppError;
use crate::extraction::{DocumentKind, UploadedFile};
use crate::questionnaire::DocumentRole;

/// Per-file upload limit (10MB).
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Request body limit for the generate route: two full-size files plus the
/// text fields and multipart framing. File parts stop reading as soon as they
/// pass `MAX_UPLOAD_BYTES`, so an oversized file is reported with the 10MB
/// message before this limit is reached.
pub const MAX_REQUEST_BYTES: usize = 2 * MAX_UPLOAD_BYTES + 1024 * 1024;

/// One submission of the questionnaire form.
#[derive(Debug, Clone, Default)]
pub struct GenerateForm {
    pub position: String,
    pub experience: String,
    pub company_type: String,
    pub main_tasks: String,
    pub organizational_focus: String,
    pub resume: Option<UploadedFile>,
    pub job_posting: Option<UploadedFile>,
}

impl GenerateForm {
    /// Reads every part of the multipart body. Empty file parts count as
    /// "not uploaded"; unknown fields are ignored.
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = GenerateForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::MalformedForm(e.to_string()))?
        {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "position" => form.position = read_text(field).await?,
                "experience" => form.experience = read_text(field).await?,
                "companyType" => form.company_type = read_text(field).await?,
                "mainTasks" => form.main_tasks = read_text(field).await?,
                "organizationalFocus" => form.organizational_focus = read_text(field).await?,
                "resume" => form.resume = read_file(DocumentRole::Resume, field).await?,
                "jobPosting" => {
                    form.job_posting = read_file(DocumentRole::JobPosting, field).await?
                }
                other => debug!("Ignoring unknown form field '{other}'"),
            }
        }

        Ok(form)
    }

    /// Checks everything that can be rejected before extraction or the
    /// completion call: file size, file type, then required fields.
    ///
    /// The descriptive fields are only required when no job posting is
    /// uploaded, since the posting itself describes the role.
    pub fn validate(&self) -> Result<(), AppError> {
        for (document, file) in self.documents() {
            if file.len() > MAX_UPLOAD_BYTES {
                return Err(AppError::FileTooLarge {
                    document,
                    size: file.len(),
                });
            }
            if file.kind() == DocumentKind::Unsupported {
                return Err(AppError::UnsupportedFileType {
                    document,
                    mime: file.mime(),
                });
            }
        }

        if self.job_posting.is_none() {
            let required = [
                &self.position,
                &self.experience,
                &self.company_type,
                &self.main_tasks,
            ];
            if required.iter().any(|value| value.trim().is_empty()) {
                return Err(AppError::MissingRequiredFields);
            }
        }

        Ok(())
    }

    /// Uploaded documents, résumé first.
    pub fn documents(&self) -> impl Iterator<Item = (DocumentRole, &UploadedFile)> {
        [
            (DocumentRole::Resume, self.resume.as_ref()),
            (DocumentRole::JobPosting, self.job_posting.as_ref()),
        ]
        .into_iter()
        .filter_map(|(role, file)| file.map(|f| (role, f)))
    }
}

async fn read_text(field: Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::MalformedForm(e.to_string()))
}

/// Streams a file part into memory, giving up once it passes the upload limit.
async fn read_file(
    document: DocumentRole,
    mut field: Field<'_>,
) -> Result<Option<UploadedFile>, AppError> {
    let file_name = field.file_name().map(str::to_owned);
    let content_type = field.content_type().map(str::to_owned);

    let mut buffer = BytesMut::new();
    while let Some(chunk) = field
        .chunk()
        .await
        .map_err(|e| AppError::MalformedForm(e.to_string()))?
    {
        buffer.extend_from_slice(&chunk);
        if buffer.len() > MAX_UPLOAD_BYTES {
            return Err(AppError::FileTooLarge {
                document,
                size: buffer.len(),
            });
        }
    }

    let file = UploadedFile::new(file_name, content_type, buffer.freeze());
    Ok((!file.is_empty()).then_some(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn filled() -> GenerateForm {
        GenerateForm {
            position: "재무·회계".to_string(),
            experience: "신입".to_string(),
            company_type: "공공기관".to_string(),
            main_tasks: "결산 및 세무 신고".to_string(),
            organizational_focus: String::new(),
            resume: None,
            job_posting: None,
        }
    }

    fn file(mime: &str, len: usize) -> UploadedFile {
        UploadedFile::new(
            Some("upload".to_string()),
            Some(mime.to_string()),
            Bytes::from(vec![0u8; len]),
        )
    }

    #[test]
    fn test_filled_form_without_documents_is_valid() {
        assert!(filled().validate().is_ok());
    }

    #[test]
    fn test_blank_main_tasks_without_job_posting_is_rejected() {
        let mut form = filled();
        form.main_tasks = "   ".to_string();
        assert!(matches!(
            form.validate(),
            Err(AppError::MissingRequiredFields)
        ));
    }

    #[test]
    fn test_job_posting_waives_required_fields() {
        let form = GenerateForm {
            job_posting: Some(file("application/pdf", 16)),
            ..GenerateForm::default()
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_organizational_focus_is_optional() {
        let mut form = filled();
        form.organizational_focus = String::new();
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_oversized_file_is_rejected() {
        let mut form = filled();
        form.resume = Some(file("application/pdf", MAX_UPLOAD_BYTES + 1));
        assert!(matches!(
            form.validate(),
            Err(AppError::FileTooLarge {
                document: DocumentRole::Resume,
                ..
            })
        ));

        form.resume = Some(file("application/pdf", MAX_UPLOAD_BYTES));
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_unsupported_file_is_rejected() {
        let mut form = filled();
        form.job_posting = Some(file("text/html", 10));
        assert!(matches!(
            form.validate(),
            Err(AppError::UnsupportedFileType {
                document: DocumentRole::JobPosting,
                ..
            })
        ));
    }

    #[test]
    fn test_documents_are_listed_resume_first() {
        let mut form = filled();
        form.job_posting = Some(file("image/png", 1));
        form.resume = Some(file("image/jpeg", 1));
        let roles: Vec<_> = form.documents().map(|(role, _)| role).collect();
        assert_eq!(roles, vec![DocumentRole::Resume, DocumentRole::JobPosting]);
    }
}
