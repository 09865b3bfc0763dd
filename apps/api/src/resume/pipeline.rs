use bytes::Bytes;
use tracing::info;

use crate::config::Config;
use crate::llm_client::prompts::string_list_schema;
use crate::llm_client::{Embedder, TextGenerator};
use crate::resume::chunker::TextChunker;
use crate::resume::pdf::{extract_text, validate_pdf_bytes};
use crate::resume::prompts::{build_skill_prompt, SKILLS_RETRIEVAL_QUERY};
use crate::resume::retriever::InMemoryVectorStore;
use crate::resume::skills::{parse_skills_output, SkillsReport};
use crate::resume::ResumeError;

#[derive(Debug, Clone, Copy)]
pub struct ResumeSettings {
    pub chunk_words: usize,
    pub chunk_overlap: usize,
    pub retrieval_k: usize,
}

impl From<&Config> for ResumeSettings {
    fn from(config: &Config) -> Self {
        Self {
            chunk_words: config.resume_chunk_words,
            chunk_overlap: config.resume_chunk_overlap,
            retrieval_k: config.resume_retrieval_k,
        }
    }
}

/// Extracts the skills listed in a PDF resume.
pub async fn extract_skills(
    pdf: Bytes,
    generator: &dyn TextGenerator,
    embedder: &dyn Embedder,
    settings: ResumeSettings,
) -> Result<SkillsReport, ResumeError> {
    validate_pdf_bytes(&pdf)?;
    let text = tokio::task::spawn_blocking(move || extract_text(&pdf))
        .await
        .map_err(|e| ResumeError::Unreadable(format!("PDF extraction task failed: {e}")))??;

    extract_skills_from_text(&text, generator, embedder, settings).await
}

/// Retrieval and generation half of the pipeline, on already-extracted text.
pub async fn extract_skills_from_text(
    text: &str,
    generator: &dyn TextGenerator,
    embedder: &dyn Embedder,
    settings: ResumeSettings,
) -> Result<SkillsReport, ResumeError> {
    let chunks = TextChunker::new(settings.chunk_words, settings.chunk_overlap).chunk(text);
    if chunks.is_empty() {
        return Err(ResumeError::NoText);
    }
    let chunk_count = chunks.len();

    let store = InMemoryVectorStore::from_chunks(chunks, embedder).await?;
    let retrieved = store
        .retrieve(SKILLS_RETRIEVAL_QUERY, settings.retrieval_k, embedder)
        .await?;
    let context = retrieved.join("\n\n");

    let prompt = build_skill_prompt(&context);
    let schema = string_list_schema("skills");
    let raw = generator.generate(&prompt, Some(&schema)).await?;
    let report = parse_skills_output(&raw)?;

    info!(
        "Extracted {} skills from {} of {} resume chunks",
        report.skills.len(),
        retrieved.len(),
        chunk_count
    );
    Ok(report)
}
