//! One-shot commands: run a single operation and print its JSON result to stdout.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use bytes::Bytes;
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::json;

use crate::config::Config;
use crate::db::create_pool;
use crate::errors::AppError;
use crate::llm_client::OllamaClient;
use crate::recommend::freelancers::recommend_freelancers_for_job;
use crate::recommend::jobs::recommend_jobs_for_freelancer;
use crate::recommend::{parse_id, resolve_top_n};
use crate::resume::pipeline::{extract_skills, ResumeSettings};
use crate::store::{MarketplaceStore, PgMarketplaceStore};

#[derive(Debug, Parser)]
#[command(name = "gighub-api", version, about = "GigHub recommendations and resume skill extraction")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP API (default)
    Serve,
    /// Print the jobs best matching a freelancer's profile
    RecommendJobs {
        freelancer_id: String,
        #[arg(long)]
        top_n: Option<usize>,
    },
    /// Print the freelancers best matching a job's required skills
    RecommendFreelancers {
        job_id: String,
        #[arg(long)]
        top_n: Option<usize>,
    },
    /// Print the skills extracted from a PDF resume
    ExtractSkills { pdf_path: PathBuf },
}

/// Runs a one-shot command. Returns the process exit code.
pub async fn run_command(command: Command, config: &Config) -> i32 {
    let result = match command {
        Command::Serve => Err(AppError::Validation(
            "serve is not a one-shot command".to_string(),
        )),
        Command::RecommendJobs {
            freelancer_id,
            top_n,
        } => recommend_jobs(config, &freelancer_id, top_n).await,
        Command::RecommendFreelancers { job_id, top_n } => {
            recommend_freelancers(config, &job_id, top_n).await
        }
        Command::ExtractSkills { pdf_path } => skills_from_file(config, pdf_path).await,
    };
    finish(result)
}

/// Reports a configuration that failed to load. Returns the process exit code.
pub fn config_failure(err: &anyhow::Error) -> i32 {
    finish(Err(AppError::Config(format!("{err:#}"))))
}

fn finish(result: Result<String, AppError>) -> i32 {
    match result {
        Ok(output) => {
            println!("{output}");
            0
        }
        Err(err) => {
            tracing::error!("Command failed: {err}");
            println!("{}", error_json(&err));
            1
        }
    }
}

fn error_json(err: &AppError) -> String {
    let value = json!({
        "error": err.to_string(),
        "code": err.code(),
        "details": err.details(),
    });
    serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string())
}

fn to_pretty_json<T: Serialize>(value: &T) -> Result<String, AppError> {
    serde_json::to_string_pretty(value)
        .context("Failed to serialize output")
        .map_err(AppError::Internal)
}

async fn connect_store(config: &Config) -> Result<Arc<dyn MarketplaceStore>, AppError> {
    let pool = create_pool(&config.database_url)
        .await
        .map_err(|e| match e.downcast::<sqlx::Error>() {
            Ok(db_err) => AppError::Database(db_err),
            Err(other) => AppError::Internal(other),
        })?;
    Ok(Arc::new(PgMarketplaceStore::new(pool)))
}

async fn recommend_jobs(
    config: &Config,
    freelancer_id: &str,
    top_n: Option<usize>,
) -> Result<String, AppError> {
    let freelancer_id = parse_id(freelancer_id, "freelancer")?;
    let top_n = resolve_top_n(top_n, config.recommend_top_n)?;
    let store = connect_store(config).await?;
    let result = recommend_jobs_for_freelancer(store.as_ref(), freelancer_id, top_n).await?;
    to_pretty_json(&result)
}

async fn recommend_freelancers(
    config: &Config,
    job_id: &str,
    top_n: Option<usize>,
) -> Result<String, AppError> {
    let job_id = parse_id(job_id, "job")?;
    let top_n = resolve_top_n(top_n, config.recommend_top_n)?;
    let store = connect_store(config).await?;
    let result = recommend_freelancers_for_job(store.as_ref(), job_id, top_n).await?;
    to_pretty_json(&result)
}

async fn skills_from_file(config: &Config, pdf_path: PathBuf) -> Result<String, AppError> {
    let bytes = tokio::fs::read(&pdf_path).await.map_err(|e| {
        AppError::Validation(format!(
            "The file '{}' could not be read: {e}",
            pdf_path.display()
        ))
    })?;

    let client = OllamaClient::new(&config.ollama_url, &config.llm_model, &config.embedding_model)
        .map_err(|e| AppError::Llm(e.to_string()))?;
    tracing::info!(
        "Extracting skills from {} with {} / {}",
        pdf_path.display(),
        client.model(),
        client.embedding_model()
    );

    let report = extract_skills(
        Bytes::from(bytes),
        &client,
        &client,
        ResumeSettings::from(config),
    )
    .await?;
    to_pretty_json(&report)
}
