//! Freelancers recommended for a job.

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::freelancer::FreelancerRow;
use crate::store::MarketplaceStore;
use crate::text::similarity::{rank_documents, top_n, RankOptions};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FreelancerRecommendation {
    pub student_id: Uuid,
    pub name: String,
    pub major: String,
    pub college: String,
    pub skills: Vec<String>,
    pub experience_level: String,
    pub gpa: f64,
    /// Raw cosine similarity against the job's required skills.
    pub match_score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FreelancerRecommendations {
    pub recommendations: Vec<FreelancerRecommendation>,
}

/// Skill names joined by single spaces.
pub fn skills_document(skills: &[String]) -> String {
    skills.join(" ")
}

pub async fn recommend_freelancers_for_job(
    store: &dyn MarketplaceStore,
    job_id: Uuid,
    limit: usize,
) -> Result<FreelancerRecommendations, AppError> {
    let job = store
        .find_job(job_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Job not found".to_string()))?;

    let students = store.list_students().await?;
    if students.is_empty() {
        return Err(AppError::NotFound(
            "No students found in the database".to_string(),
        ));
    }

    let student_skills: Vec<Vec<String>> =
        students.iter().map(FreelancerRow::skill_names).collect();
    let corpus: Vec<String> = student_skills.iter().map(|s| skills_document(s)).collect();
    let query = skills_document(&job.required_skill_names());

    // IDF spans every student; the experience filter only applies afterwards.
    let ranked = rank_documents(&corpus, &query, &RankOptions::default());
    let required_level = job.experience_or_empty();
    let top = top_n(&ranked, limit, |scored| {
        required_level.is_empty()
            || students[scored.index].experience_level_or_empty() == required_level
    });

    let recommendations: Vec<FreelancerRecommendation> = top
        .iter()
        .map(|scored| {
            let student = &students[scored.index];
            FreelancerRecommendation {
                student_id: student.id,
                name: student.name.clone(),
                major: student.major_or_empty().to_string(),
                college: student.college_or_empty().to_string(),
                skills: student_skills[scored.index].clone(),
                experience_level: student.experience_level_or_empty().to_string(),
                gpa: student.gpa.unwrap_or(0.0),
                match_score: scored.score,
            }
        })
        .collect();

    info!(
        "Recommended {} of {} students for job {job_id} (level filter: {:?})",
        recommendations.len(),
        students.len(),
        required_level
    );

    Ok(FreelancerRecommendations { recommendations })
}
