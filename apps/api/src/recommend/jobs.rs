//! Jobs recommended to a freelancer.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::freelancer::FreelancerRow;
use crate::models::job::{JobRow, Pay};
use crate::store::MarketplaceStore;
use crate::text::similarity::{min_max_normalize, rank_documents, top_n, RankOptions};
use crate::text::tfidf::StopWords;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FreelancerSummary {
    pub id: Uuid,
    pub name: String,
    pub major: String,
    pub college: String,
    /// Comma-joined skill names.
    pub skills: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRecommendation {
    pub job_id: Uuid,
    pub title: String,
    pub company: String,
    pub category: String,
    /// Comma-joined required skill names.
    pub required_skills: String,
    pub experience_level: String,
    pub pay: Pay,
    pub location: String,
    pub duration: i32,
    /// Min-max normalized within the returned list.
    pub match_score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRecommendations {
    pub freelancer: FreelancerSummary,
    pub recommendations: Vec<JobRecommendation>,
}

/// `"{skills} {major} {first experience title}"`
pub fn freelancer_document(freelancer: &FreelancerRow) -> String {
    format!(
        "{} {} {}",
        freelancer.skill_names().join(", "),
        freelancer.major_or_empty(),
        freelancer.headline_title()
    )
}

/// `"{required skills} {category} {experience} {description}"`
pub fn job_document(job: &JobRow) -> String {
    format!(
        "{} {} {} {}",
        job.required_skill_names().join(", "),
        job.category_or_empty(),
        job.experience_or_empty(),
        job.description_or_empty()
    )
}

pub async fn recommend_jobs_for_freelancer(
    store: &dyn MarketplaceStore,
    freelancer_id: Uuid,
    limit: usize,
) -> Result<JobRecommendations, AppError> {
    let students = store.list_students().await?;
    if students.is_empty() {
        return Err(AppError::NotFound(
            "No students found in the database".to_string(),
        ));
    }
    let jobs = store.list_jobs().await?;
    if jobs.is_empty() {
        return Err(AppError::NotFound("No jobs found in the database".to_string()));
    }

    let freelancer = students
        .iter()
        .find(|s| s.id == freelancer_id)
        .ok_or_else(|| {
            AppError::NotFound(format!("Freelancer with ID {freelancer_id} not found"))
        })?;

    let query = freelancer_document(freelancer);
    let corpus: Vec<String> = jobs.iter().map(job_document).collect();
    let options = RankOptions {
        stop_words: StopWords::English,
    };

    let ranked = rank_documents(&corpus, &query, &options);
    let top = top_n(&ranked, limit, |_| true);
    let raw_scores: Vec<f64> = top.iter().map(|s| s.score).collect();
    let scores = min_max_normalize(&raw_scores);
    debug!("Raw job scores for freelancer {freelancer_id}: {raw_scores:?}");

    let recommendations = top
        .iter()
        .zip(scores)
        .map(|(scored, match_score)| {
            let job = &jobs[scored.index];
            JobRecommendation {
                job_id: job.id,
                title: job.title.clone(),
                company: job.company.clone(),
                category: job.category_or_empty().to_string(),
                required_skills: job.required_skill_names().join(", "),
                experience_level: job.experience_or_empty().to_string(),
                pay: job.pay(),
                location: job.location.clone().unwrap_or_default(),
                duration: job.duration.unwrap_or(0),
                match_score,
            }
        })
        .collect::<Vec<_>>();

    info!(
        "Recommended {} of {} jobs to freelancer {freelancer_id}",
        recommendations.len(),
        jobs.len()
    );

    Ok(JobRecommendations {
        freelancer: FreelancerSummary {
            id: freelancer.id,
            name: freelancer.name.clone(),
            major: freelancer.major_or_empty().to_string(),
            college: freelancer.college_or_empty().to_string(),
            skills: freelancer.skill_names().join(", "),
        },
        recommendations,
    })
}
