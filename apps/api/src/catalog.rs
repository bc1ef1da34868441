//! Option lists offered by the editor's skill and language pickers.

use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct CatalogOption {
    pub value: &'static str,
    pub label: &'static str,
}

const fn opt(value: &'static str, label: &'static str) -> CatalogOption {
    CatalogOption { value, label }
}

pub static SKILL_OPTIONS: &[CatalogOption] = &[
    opt("javascript", "JavaScript"),
    opt("typescript", "TypeScript"),
    opt("react", "React"),
    opt("nextjs", "Next.js"),
    opt("nodejs", "Node.js"),
    opt("python", "Python"),
    opt("java", "Java"),
    opt("csharp", "C#"),
    opt("php", "PHP"),
    opt("html", "HTML"),
    opt("css", "CSS"),
    opt("sass", "SASS"),
    opt("tailwind", "Tailwind CSS"),
    opt("bootstrap", "Bootstrap"),
    opt("mongodb", "MongoDB"),
    opt("mysql", "MySQL"),
    opt("postgresql", "PostgreSQL"),
    opt("firebase", "Firebase"),
    opt("aws", "AWS"),
    opt("docker", "Docker"),
    opt("git", "Git"),
    opt("figma", "Figma"),
    opt("photoshop", "Photoshop"),
    opt("illustrator", "Illustrator"),
    opt("xd", "Adobe XD"),
];

pub static LANGUAGE_OPTIONS: &[CatalogOption] = &[
    opt("english", "english"),
    opt("russion", "russion"),
    opt("uzbek", "uzbek"),
];

/// Labels for skill proficiency 1..=5 as shown in the picker.
pub const SKILL_LEVELS: [&str; 5] = ["Beginner", "Intermediate", "Proficient", "Advanced", "Expert"];

/// Labels for language proficiency 1..=5 as shown in the preview.
pub const LANGUAGE_LEVELS: [&str; 5] = ["Beginner", "Basic", "Intermediate", "Fluent", "Native"];

/// Anything outside 2..=5 reads as "Beginner".
pub fn language_level(proficiency: u8) -> &'static str {
    level(&LANGUAGE_LEVELS, proficiency)
}

fn level(labels: &[&'static str; 5], proficiency: u8) -> &'static str {
    match proficiency {
        2..=5 => labels[usize::from(proficiency) - 1],
        _ => labels[0],
    }
}

/// Label for a picker value, e.g. `nextjs` -> `Next.js`.
pub fn skill_label(value: &str) -> Option<&'static str> {
    SKILL_OPTIONS
        .iter()
        .find(|o| o.value == value)
        .map(|o| o.label)
}

#[derive(Debug, Serialize)]
pub struct Catalog {
    pub skills: &'static [CatalogOption],
    pub languages: &'static [CatalogOption],
    pub skill_levels: [&'static str; 5],
    pub language_levels: [&'static str; 5],
}

pub fn catalog() -> Catalog {
    Catalog {
        skills: SKILL_OPTIONS,
        languages: LANGUAGE_OPTIONS,
        skill_levels: SKILL_LEVELS,
        language_levels: LANGUAGE_LEVELS,
    }
}
