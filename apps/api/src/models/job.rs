use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::{skill_names, SkillValue};

/// A `jobs` row.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobRow {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub category: Option<String>,
    pub description: Option<String>,
    pub required_skills: Json<Vec<SkillValue>>,
    /// Beginner | Intermediate | Advanced | Expert
    pub experience: Option<String>,
    pub pay_amount: Option<f64>,
    pub pay_type: Option<String>,
    pub location: Option<String>,
    pub job_type: Option<String>,
    pub duration: Option<i32>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pay {
    pub amount: f64,
    #[serde(rename = "type")]
    pub pay_type: String,
}

impl JobRow {
    pub fn required_skill_names(&self) -> Vec<String> {
        skill_names(&self.required_skills.0)
    }

    pub fn pay(&self) -> Pay {
        Pay {
            amount: self.pay_amount.unwrap_or(0.0),
            pay_type: self
                .pay_type
                .clone()
                .unwrap_or_else(|| "fixed".to_string()),
        }
    }

    pub fn category_or_empty(&self) -> &str {
        self.category.as_deref().unwrap_or("")
    }

    pub fn description_or_empty(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    pub fn experience_or_empty(&self) -> &str {
        self.experience.as_deref().unwrap_or("")
    }
}
