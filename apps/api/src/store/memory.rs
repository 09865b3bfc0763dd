//! In-memory `MarketplaceStore` plus row builders for tests.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::types::Json;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::freelancer::{ExperienceEntry, FreelancerRow};
use crate::models::job::JobRow;
use crate::models::SkillValue;
use crate::store::MarketplaceStore;

#[derive(Default)]
pub struct InMemoryStore {
    pub students: Mutex<Vec<FreelancerRow>>,
    pub jobs: Mutex<Vec<JobRow>>,
}

impl InMemoryStore {
    pub fn new(students: Vec<FreelancerRow>, jobs: Vec<JobRow>) -> Self {
        Self {
            students: Mutex::new(students),
            jobs: Mutex::new(jobs),
        }
    }
}

#[async_trait]
impl MarketplaceStore for InMemoryStore {
    async fn list_students(&self) -> Result<Vec<FreelancerRow>, AppError> {
        Ok(self.students.lock().unwrap().clone())
    }

    async fn list_jobs(&self) -> Result<Vec<JobRow>, AppError> {
        Ok(self.jobs.lock().unwrap().clone())
    }

    async fn find_student(&self, id: Uuid) -> Result<Option<FreelancerRow>, AppError> {
        Ok(self
            .students
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id == id)
            .cloned())
    }

    async fn find_job(&self, id: Uuid) -> Result<Option<JobRow>, AppError> {
        Ok(self.jobs.lock().unwrap().iter().find(|j| j.id == id).cloned())
    }

    async fn save_resume_skills(
        &self,
        id: Uuid,
        resume_url: Option<&str>,
        skills: &[String],
    ) -> Result<bool, AppError> {
        let mut students = self.students.lock().unwrap();
        match students.iter_mut().find(|s| s.id == id) {
            Some(student) => {
                student.resume_skills = skills.to_vec();
                if let Some(url) = resume_url {
                    student.resume_url = Some(url.to_string());
                }
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

pub fn skill(name: &str) -> SkillValue {
    SkillValue::Structured {
        name: name.to_string(),
        level: Some("Intermediate".to_string()),
    }
}

pub fn make_student(name: &str, skills: &[&str], experience_level: Option<&str>) -> FreelancerRow {
    FreelancerRow {
        id: Uuid::new_v4(),
        name: name.to_string(),
        major: Some("Computer Science".to_string()),
        college: Some("State University".to_string()),
        skills: Json(skills.iter().map(|s| skill(s)).collect()),
        experience: Json(vec![ExperienceEntry {
            title: "Intern".to_string(),
            ..ExperienceEntry::default()
        }]),
        experience_level: experience_level.map(String::from),
        gpa: Some(3.5),
        resume_url: None,
        resume_skills: vec![],
        created_at: Utc::now(),
    }
}

pub fn make_job(title: &str, skills: &[&str], experience: Option<&str>, description: &str) -> JobRow {
    JobRow {
        id: Uuid::new_v4(),
        title: title.to_string(),
        company: "Acme".to_string(),
        category: Some("Software Engineering".to_string()),
        description: Some(description.to_string()),
        required_skills: Json(skills.iter().map(|s| skill(s)).collect()),
        experience: experience.map(String::from),
        pay_amount: Some(500.0),
        pay_type: Some("fixed".to_string()),
        location: Some("Remote".to_string()),
        job_type: Some("remote".to_string()),
        duration: Some(4),
        status: "Open".to_string(),
        created_at: Utc::now(),
    }
}
