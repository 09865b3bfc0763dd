use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::recommend::freelancers::{recommend_freelancers_for_job, FreelancerRecommendations};
use crate::recommend::jobs::{recommend_jobs_for_freelancer, JobRecommendations};
use crate::recommend::{parse_id, resolve_top_n};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct TopNQuery {
    pub top_n: Option<usize>,
}

/// GET /api/v1/freelancers/:id/recommended-jobs
pub async fn handle_recommended_jobs(
    State(state): State<AppState>,
    Path(id): Path<String>,
    query: Result<Query<TopNQuery>, QueryRejection>,
) -> Result<Json<JobRecommendations>, AppError> {
    let Query(params) = query?;
    let freelancer_id = parse_id(&id, "freelancer")?;
    let top_n = resolve_top_n(params.top_n, state.config.recommend_top_n)?;
    let result = recommend_jobs_for_freelancer(state.store.as_ref(), freelancer_id, top_n).await?;
    Ok(Json(result))
}

/// GET /api/v1/jobs/:id/recommended-freelancers
pub async fn handle_recommended_freelancers(
    State(state): State<AppState>,
    Path(id): Path<String>,
    query: Result<Query<TopNQuery>, QueryRejection>,
) -> Result<Json<FreelancerRecommendations>, AppError> {
    let Query(params) = query?;
    let job_id = parse_id(&id, "job")?;
    let top_n = resolve_top_n(params.top_n, state.config.recommend_top_n)?;
    let result = recommend_freelancers_for_job(state.store.as_ref(), job_id, top_n).await?;
    Ok(Json(result))
}
