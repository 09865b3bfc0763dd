pub mod freelancer;
pub mod job;

use serde::{Deserialize, Deserializer, Serialize};

/// A skill as stored on profiles and job postings.
///
/// Older profiles store bare strings; newer ones store `{name, level}` objects.
/// A `null` entry reads as an unnamed skill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SkillValue {
    Structured {
        #[serde(default, deserialize_with = "null_as_empty")]
        name: String,
        #[serde(default)]
        level: Option<String>,
    },
    Plain(String),
    Missing,
}

/// Reads a JSON string, treating `null` as the empty string.
pub(crate) fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl SkillValue {
    pub fn name(&self) -> &str {
        match self {
            SkillValue::Structured { name, .. } => name,
            SkillValue::Plain(name) => name,
            SkillValue::Missing => "",
        }
    }
}

/// Non-empty skill names, in stored order.
pub fn skill_names(skills: &[SkillValue]) -> Vec<String> {
    skills
        .iter()
        .map(|s| s.name().trim())
        .filter(|n| !n.is_empty())
        .map(String::from)
        .collect()
}
