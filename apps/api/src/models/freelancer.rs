use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::{null_as_empty, skill_names, SkillValue};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExperienceEntry {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default)]
    pub employer: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// A `users` row with role `student`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FreelancerRow {
    pub id: Uuid,
    pub name: String,
    pub major: Option<String>,
    pub college: Option<String>,
    pub skills: Json<Vec<SkillValue>>,
    pub experience: Json<Vec<ExperienceEntry>>,
    pub experience_level: Option<String>,
    pub gpa: Option<f64>,
    pub resume_url: Option<String>,
    pub resume_skills: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl FreelancerRow {
    pub fn skill_names(&self) -> Vec<String> {
        skill_names(&self.skills.0)
    }

    /// Title of the first experience entry, used as the freelancer's headline level.
    pub fn headline_title(&self) -> &str {
        self.experience
            .0
            .first()
            .map(|e| e.title.as_str())
            .unwrap_or("")
    }

    pub fn major_or_empty(&self) -> &str {
        self.major.as_deref().unwrap_or("")
    }

    pub fn college_or_empty(&self) -> &str {
        self.college.as_deref().unwrap_or("")
    }

    pub fn experience_level_or_empty(&self) -> &str {
        self.experience_level.as_deref().unwrap_or("")
    }
}
