use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Written into `end_date` when an entry is still ongoing.
pub const PRESENT: &str = "Present";

/// One persisted resume document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resume {
    pub id: Uuid,
    pub owner_id: String,
    pub name: String,
    #[serde(default)]
    pub profile: Profile,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Resume {
    /// A freshly created resume: name and owner only, empty profile.
    pub fn new(owner_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_id: owner_id.into(),
            name: name.into(),
            profile: Profile::default(),
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    pub fn summary(&self) -> ResumeSummary {
        ResumeSummary {
            id: self.id,
            name: self.name.clone(),
        }
    }

    pub fn is_owned_by(&self, owner_id: &str) -> bool {
        self.owner_id == owner_id
    }
}

/// Dashboard card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeSummary {
    pub id: Uuid,
    pub name: String,
}

/// The editable body of a resume. Every field defaults so that partially
/// written documents still load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Profile {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub linkedin: String,
    pub github: String,
    pub portfolio: String,
    pub address: String,
    pub job_title: String,
    pub summary: String,
    pub experiences: Vec<Experience>,
    pub projects: Vec<Project>,
    pub education: Vec<Education>,
    pub skills: Vec<Skill>,
    pub languages: Vec<Language>,
}

impl Profile {
    /// Reads a flat field by its wire name.
    pub fn field(&self, name: &str) -> Option<&str> {
        let value = match name {
            "fullName" => &self.full_name,
            "email" => &self.email,
            "phone" => &self.phone,
            "linkedin" => &self.linkedin,
            "github" => &self.github,
            "portfolio" => &self.portfolio,
            "address" => &self.address,
            "jobTitle" => &self.job_title,
            "summary" => &self.summary,
            _ => return None,
        };
        Some(value.as_str())
    }

    /// Writes a flat field by its wire name. Returns false for unknown names.
    pub fn set_field(&mut self, name: &str, value: String) -> bool {
        let slot = match name {
            "fullName" => &mut self.full_name,
            "email" => &mut self.email,
            "phone" => &mut self.phone,
            "linkedin" => &mut self.linkedin,
            "github" => &mut self.github,
            "portfolio" => &mut self.portfolio,
            "address" => &mut self.address,
            "jobTitle" => &mut self.job_title,
            "summary" => &mut self.summary,
            _ => return false,
        };
        *slot = value;
        true
    }
}

/// Wire names of the flat profile fields, in form order.
pub const PROFILE_FIELDS: &[&str] = &[
    "fullName",
    "email",
    "phone",
    "linkedin",
    "github",
    "portfolio",
    "address",
    "jobTitle",
    "summary",
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Experience {
    pub company: String,
    pub role: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub is_present: bool,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    pub project_name: String,
    pub deploy_link: String,
    pub repository_link: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Education {
    pub institution: String,
    pub degree: String,
    pub field_of_study: String,
    pub start_date: String,
    pub end_date: String,
    pub is_present: bool,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Skill {
    pub name: String,
    pub proficiency: u8,
}

impl Default for Skill {
    fn default() -> Self {
        Self {
            name: String::new(),
            proficiency: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Language {
    pub name: String,
    pub proficiency: u8,
}

impl Default for Language {
    fn default() -> Self {
        Self {
            name: String::new(),
            proficiency: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_document_fills_defaults() {
        let profile: Profile =
            serde_json::from_str(r#"{"fullName":"Ada","skills":[{"name":"Rust"}]}"#).unwrap();
        assert_eq!(profile.full_name, "Ada");
        assert!(profile.experiences.is_empty());
        assert_eq!(profile.skills[0].proficiency, 1);
    }

    #[test]
    fn test_wire_names_are_camel_case() {
        let exp = Experience {
            start_date: "2020-01".into(),
            is_present: true,
            ..Default::default()
        };
        let json = serde_json::to_value(&exp).unwrap();
        assert_eq!(json["startDate"], "2020-01");
        assert_eq!(json["isPresent"], true);
    }

    #[test]
    fn test_set_field_by_wire_name() {
        let mut profile = Profile::default();
        assert!(profile.set_field("jobTitle", "Engineer".into()));
        assert_eq!(profile.field("jobTitle"), Some("Engineer"));
        assert!(!profile.set_field("experiences", "x".into()));
        assert_eq!(profile.field("nope"), None);
    }

    #[test]
    fn test_new_resume_is_empty() {
        let resume = Resume::new("user_1", "cv");
        assert!(resume.is_owned_by("user_1"));
        assert_eq!(resume.profile, Profile::default());
        assert!(resume.updated_at.is_none());
    }
}
