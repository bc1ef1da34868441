//! Field and entry validation for the resume editor.
//!
//! Every rule here is advisory: it blocks a save issued through this
//! service, but the store itself accepts whatever document it is handed.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::models::resume::{
    Education, Experience, Language, Profile, Project, Skill, PROFILE_FIELDS,
};

/// Per-field error messages keyed by wire field name.
pub type FieldErrors = BTreeMap<String, String>;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern"));
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9]{10,15}$").expect("phone pattern"));
static LINKEDIN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://(www\.)?linkedin\.com/.*$").expect("linkedin pattern")
});
static GITHUB_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://(www\.)?github\.com/.*$").expect("github pattern"));
static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://.*$").expect("url pattern"));

pub const PROFICIENCY_RANGE: std::ops::RangeInclusive<u8> = 1..=5;

/// Checks a new resume name against the configured character limit.
pub fn validate_resume_name(name: &str, max_chars: usize) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Please enter some text first.".to_string());
    }
    if name.chars().count() > max_chars {
        return Err(format!("The name must not exceed {max_chars} characters."));
    }
    Ok(())
}

/// Live check for one flat profile field. `None` means the value is fine.
///
/// The three link fields are optional and only checked when non-empty.
pub fn validate_field(field: &str, value: &str) -> Option<String> {
    let message = match field {
        "fullName" => required(value, "Full name is required"),
        "email" => matches(&EMAIL_RE, value, "Invalid email address"),
        "phone" => matches(&PHONE_RE, value, "Phone must be 10-15 digits"),
        "linkedin" => optional_link(&LINKEDIN_RE, value, "Invalid LinkedIn URL"),
        "github" => optional_link(&GITHUB_RE, value, "Invalid GitHub URL"),
        "portfolio" => optional_link(&URL_RE, value, "Invalid portfolio URL"),
        "address" => required(value, "Address is required"),
        "jobTitle" => required(value, "Job title is required"),
        "summary" => required(value, "Summary is required"),
        _ => None,
    };
    message.map(str::to_string)
}

fn required(value: &str, message: &'static str) -> Option<&'static str> {
    value.trim().is_empty().then_some(message)
}

fn matches(re: &Regex, value: &str, message: &'static str) -> Option<&'static str> {
    (!re.is_match(value)).then_some(message)
}

fn optional_link(re: &Regex, value: &str, message: &'static str) -> Option<&'static str> {
    if value.is_empty() {
        None
    } else {
        matches(re, value, message)
    }
}

/// Runs every flat field of the profile and collects the failures.
pub fn validate_profile(profile: &Profile) -> FieldErrors {
    PROFILE_FIELDS
        .iter()
        .filter_map(|&name| {
            let value = profile.field(name)?;
            validate_field(name, value).map(|msg| (name.to_string(), msg))
        })
        .collect()
}

pub fn validate_experience(exp: &Experience) -> Result<(), String> {
    if exp.company.is_empty() || exp.role.is_empty() || exp.start_date.is_empty() {
        return Err("Please fill required fields (Company, Role, Start Date)".to_string());
    }
    Ok(())
}

pub fn validate_education(edu: &Education) -> Result<(), String> {
    if edu.institution.is_empty() || edu.degree.is_empty() || edu.start_date.is_empty() {
        return Err("Please fill required fields (Institution, Degree, Start Date)".to_string());
    }
    Ok(())
}

pub fn validate_project(project: &Project) -> Result<(), String> {
    if project.project_name.is_empty() || project.repository_link.is_empty() {
        return Err("Please fill required fields (Project Name and Repository Link)".to_string());
    }
    Ok(())
}

pub fn validate_skill(skill: &Skill) -> Result<(), String> {
    if skill.name.is_empty() {
        return Err("Please select a skill".to_string());
    }
    validate_proficiency(skill.proficiency)
}

pub fn validate_language(language: &Language) -> Result<(), String> {
    if language.name.is_empty() {
        return Err("Please select a language".to_string());
    }
    validate_proficiency(language.proficiency)
}

fn validate_proficiency(level: u8) -> Result<(), String> {
    if !PROFICIENCY_RANGE.contains(&level) {
        return Err("Proficiency must be between 1 and 5".to_string());
    }
    Ok(())
}
