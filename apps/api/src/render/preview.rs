//! Resume preview content, independent of output format.
//!
//! Both the HTML preview and the PDF export render from a `PreviewDocument`
//! so that placeholders, section order and labels agree between the two.

use crate::catalog;
use crate::models::resume::{Education, Experience, Profile, Project};

#[derive(Debug, Clone, PartialEq)]
pub struct PreviewDocument {
    pub full_name: String,
    pub job_title: String,
    /// Email, phone, address; blanks are skipped.
    pub contacts: Vec<String>,
    pub links: Vec<Link>,
    pub sections: Vec<PreviewSection>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub label: &'static str,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PreviewSection {
    pub title: &'static str,
    pub items: Vec<PreviewItem>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeterTone {
    Blue,
    Green,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PreviewItem {
    Paragraph(String),
    Entry(EntryBlock),
    Meter {
        label: String,
        level: String,
        /// Filled fraction out of five.
        proficiency: u8,
        tone: MeterTone,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryBlock {
    pub title: String,
    pub subtitle: Option<String>,
    pub period: Option<String>,
    pub links: Vec<Link>,
    pub bullets: Vec<String>,
    pub body: Option<String>,
}

pub const SUMMARY: &str = "PROFESSIONAL SUMMARY";
pub const EXPERIENCE: &str = "WORK EXPERIENCE";
pub const PROJECTS: &str = "PROJECTS";
pub const EDUCATION: &str = "EDUCATION";
pub const SKILLS: &str = "TECHNICAL SKILLS";
pub const LANGUAGES: &str = "LANGUAGES";

fn or<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.is_empty() {
        placeholder
    } else {
        value
    }
}

fn period(start: &str, end: &str, is_present: bool) -> String {
    let end = if is_present { "Present" } else { or(end, "End Date") };
    format!("{} - {}", or(start, "Start Date"), end)
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn experience_block(exp: &Experience) -> EntryBlock {
    EntryBlock {
        title: or(&exp.role, "Your Position").to_string(),
        subtitle: Some(format!(
            "{} | {}",
            or(&exp.company, "Company Name"),
            or(&exp.location, "Location")
        )),
        period: Some(period(&exp.start_date, &exp.end_date, exp.is_present)),
        bullets: exp.description.split('\n').map(str::to_string).collect(),
        ..Default::default()
    }
}

fn project_block(project: &Project) -> EntryBlock {
    let mut links = Vec::new();
    if !project.deploy_link.is_empty() {
        links.push(Link {
            label: "Live Demo",
            url: project.deploy_link.clone(),
        });
    }
    if !project.repository_link.is_empty() {
        links.push(Link {
            label: "Source Code",
            url: project.repository_link.clone(),
        });
    }
    EntryBlock {
        title: or(&project.project_name, "Project Name").to_string(),
        links,
        body: Some(project.description.clone()),
        ..Default::default()
    }
}

fn education_block(edu: &Education) -> EntryBlock {
    EntryBlock {
        title: or(&edu.institution, "Institution Name").to_string(),
        subtitle: Some(format!(
            "{}, {}",
            or(&edu.degree, "Degree"),
            or(&edu.field_of_study, "Field of Study")
        )),
        period: Some(period(&edu.start_date, &edu.end_date, edu.is_present)),
        body: (!edu.description.is_empty()).then(|| edu.description.clone()),
        ..Default::default()
    }
}

/// Lays out a profile in preview order, omitting empty sections.
pub fn build_preview(profile: &Profile) -> PreviewDocument {
    let contacts = [&profile.email, &profile.phone, &profile.address]
        .into_iter()
        .filter(|v| !v.is_empty())
        .cloned()
        .collect();

    let links = [
        ("LinkedIn", &profile.linkedin),
        ("GitHub", &profile.github),
        ("Portfolio", &profile.portfolio),
    ]
    .into_iter()
    .filter(|(_, url)| !url.is_empty())
    .map(|(label, url)| Link {
        label,
        url: url.clone(),
    })
    .collect();

    let mut sections = Vec::new();
    if !profile.summary.is_empty() {
        sections.push(PreviewSection {
            title: SUMMARY,
            items: vec![PreviewItem::Paragraph(profile.summary.clone())],
        });
    }
    push_section(&mut sections, EXPERIENCE, &profile.experiences, |e| {
        PreviewItem::Entry(experience_block(e))
    });
    push_section(&mut sections, PROJECTS, &profile.projects, |p| {
        PreviewItem::Entry(project_block(p))
    });
    push_section(&mut sections, EDUCATION, &profile.education, |e| {
        PreviewItem::Entry(education_block(e))
    });
    push_section(&mut sections, SKILLS, &profile.skills, |s| PreviewItem::Meter {
        label: s.name.clone(),
        level: format!("{}/5", s.proficiency),
        proficiency: s.proficiency.min(5),
        tone: MeterTone::Blue,
    });
    push_section(&mut sections, LANGUAGES, &profile.languages, |l| {
        PreviewItem::Meter {
            label: capitalize(&l.name),
            level: catalog::language_level(l.proficiency).to_string(),
            proficiency: l.proficiency.min(5),
            tone: MeterTone::Green,
        }
    });

    PreviewDocument {
        full_name: or(&profile.full_name, "FULL NAME").to_string(),
        job_title: or(&profile.job_title, "PROFESSIONAL TITLE").to_string(),
        contacts,
        links,
        sections,
    }
}

fn push_section<T>(
    sections: &mut Vec<PreviewSection>,
    title: &'static str,
    entries: &[T],
    item: impl Fn(&T) -> PreviewItem,
) {
    if entries.is_empty() {
        return;
    }
    sections.push(PreviewSection {
        title,
        items: entries.iter().map(item).collect(),
    });
}
