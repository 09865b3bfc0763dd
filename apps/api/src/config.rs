use anyhow::{bail, Context, Result};

/// Application configuration loaded from environment variables.
/// Every variable has a local-development default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub ollama_url: String,
    pub llm_model: String,
    pub embedding_model: String,
    pub port: u16,
    pub rust_log: String,
    pub recommend_top_n: usize,
    pub resume_retrieval_k: usize,
    pub resume_chunk_words: usize,
    pub resume_chunk_overlap: usize,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let config = Config {
            database_url: env_or("DATABASE_URL", "postgres://localhost:5432/gighub"),
            ollama_url: env_or("OLLAMA_URL", "http://localhost:11434"),
            llm_model: env_or("LLM_MODEL", "llama2"),
            embedding_model: env_or("EMBEDDING_MODEL", "nomic-embed-text"),
            port: parse_env("PORT", 8080)?,
            rust_log: env_or("RUST_LOG", "info"),
            recommend_top_n: parse_env("RECOMMEND_TOP_N", 5)?,
            resume_retrieval_k: parse_env("RESUME_RETRIEVAL_K", 10)?,
            resume_chunk_words: parse_env("RESUME_CHUNK_WORDS", 200)?,
            resume_chunk_overlap: parse_env("RESUME_CHUNK_OVERLAP", 20)?,
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", 10 * 1024 * 1024)?,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.resume_chunk_words == 0 {
            bail!("RESUME_CHUNK_WORDS must be greater than zero");
        }
        if self.resume_chunk_overlap >= self.resume_chunk_words {
            bail!(
                "RESUME_CHUNK_OVERLAP ({}) must be smaller than RESUME_CHUNK_WORDS ({})",
                self.resume_chunk_overlap,
                self.resume_chunk_words
            );
        }
        if self.resume_retrieval_k == 0 {
            bail!("RESUME_RETRIEVAL_K must be greater than zero");
        }
        if self.recommend_top_n == 0 {
            bail!("RECOMMEND_TOP_N must be greater than zero");
        }
        Ok(())
    }
}

#[cfg(test)]
impl Default for Config {
    fn default() -> Self {
        Config {
            database_url: "postgres://localhost:5432/gighub".to_string(),
            ollama_url: "http://localhost:11434".to_string(),
            llm_model: "llama2".to_string(),
            embedding_model: "nomic-embed-text".to_string(),
            port: 8080,
            rust_log: "info".to_string(),
            recommend_top_n: 5,
            resume_retrieval_k: 10,
            resume_chunk_words: 200,
            resume_chunk_overlap: 20,
            max_upload_bytes: 10 * 1024 * 1024,
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}
