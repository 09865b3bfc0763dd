//! Resume skill extraction: PDF text → chunks → embeddings → top-k retrieval
//! → schema-constrained generation → cleaned skill list.

pub mod chunker;
pub mod handlers;
pub mod pdf;
pub mod pipeline;
pub mod prompts;
pub mod retriever;
pub mod skills;

use thiserror::Error;

use crate::errors::AppError;
use crate::llm_client::LlmError;

#[derive(Debug, Error)]
pub enum ResumeError {
    #[error("uploaded resume is empty")]
    Empty,

    #[error("uploaded file is not a PDF")]
    NotPdf,

    #[error("failed to read PDF: {0}")]
    Unreadable(String),

    #[error("resume contains no extractable text")]
    NoText,

    #[error(transparent)]
    Llm(#[from] LlmError),
}

impl From<ResumeError> for AppError {
    fn from(err: ResumeError) -> Self {
        match err {
            ResumeError::Llm(e) => AppError::Llm(format!("Skill extraction failed: {e}")),
            other => AppError::UnprocessableEntity(other.to_string()),
        }
    }
}
