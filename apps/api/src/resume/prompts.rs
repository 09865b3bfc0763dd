use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;

/// Fixed retrieval query used to pick resume chunks.
pub const SKILLS_RETRIEVAL_QUERY: &str = "Extract all skills from the resume.";

/// Prompt template for skill extraction. `{context}` is replaced with the
/// retrieved chunks; `{json_only}` with the shared JSON-only instruction.
pub const SKILL_EXTRACTION_PROMPT: &str = r#"Extract only the individual skills listed in the resume.
Do NOT include section headers like "Computational tools", "Other skills", or "Design software".
Do NOT add explanations, bullet points, or extra text.
Return ONLY a valid JSON object in this format:
{
    "skills": ["skill1", "skill2", "skill3", ...]
}

Context:
{context}

{json_only}"#;

pub fn build_skill_prompt(context: &str) -> String {
    SKILL_EXTRACTION_PROMPT
        .replace("{json_only}", JSON_ONLY_INSTRUCTION)
        .replace("{context}", context)
}
