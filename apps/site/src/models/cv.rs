use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Highest value a skill level may take.
pub const MAX_SKILL_LEVEL: u8 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LanguageLevel {
    Basic,
    Conversational,
    Professional,
    Fluent,
    Native,
}

impl LanguageLevel {
    pub const ALL: [LanguageLevel; 5] = [
        LanguageLevel::Basic,
        LanguageLevel::Conversational,
        LanguageLevel::Professional,
        LanguageLevel::Fluent,
        LanguageLevel::Native,
    ];

    /// Translation key of the level label.
    pub fn label_key(self) -> &'static str {
        match self {
            LanguageLevel::Basic => "language_levels.basic",
            LanguageLevel::Conversational => "language_levels.conversational",
            LanguageLevel::Professional => "language_levels.professional",
            LanguageLevel::Fluent => "language_levels.fluent",
            LanguageLevel::Native => "language_levels.native",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HierarchyMode {
    Client,
    Colleague,
    Manager,
    ReportsTo,
}

impl HierarchyMode {
    pub fn key(self) -> &'static str {
        match self {
            HierarchyMode::Client => "hierarchy.client",
            HierarchyMode::Colleague => "hierarchy.colleague",
            HierarchyMode::Manager => "hierarchy.manager",
            HierarchyMode::ReportsTo => "hierarchy.reports_to",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    pub level: u8, // 0 – 100
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    pub name_key: String,
    pub level: LanguageLevel,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmploymentPosition {
    pub title_key: String,
    pub start_date: String, // ISO date (YYYY-MM-DD)
    pub end_date: Option<String>, // None → present
    pub description_keys: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyHistory {
    pub company: String,
    pub positions: Vec<EmploymentPosition>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Education {
    pub institution: String,
    pub degree_key: String,
    pub start_date: String,
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Certification {
    pub title: String,
    pub issued_by: String,
    pub issued_date: String,
    pub certificate_image: String,
    pub certificate_link: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    pub description_key: String,
    pub url: Option<String>,
    #[serde(default)]
    pub tech_stack: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub name: String,
    pub surname: String,
    pub job_position: String,
    pub post_date: String,
    pub hierarchy_mode: HierarchyMode,
    pub comment_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileLink {
    pub url: String,
    pub handle: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactInfo {
    pub name: String,
    /// Name used inside recommendation sentences ("{name} was my client").
    pub short_name: String,
    pub job_title: String,
    pub tech_stack: String,
    pub profile_image: String,
    pub linkedin: ProfileLink,
    pub github: ProfileLink,
    pub email: String,
    pub address: String,
    pub country: String,
    pub nationality: String,
}

/// The whole CV document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CvProfile {
    pub contact: ContactInfo,
    pub summary_key: String,
    pub skills: Vec<Skill>,
    pub languages: Vec<Language>,
    pub companies: Vec<CompanyHistory>,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub certifications: Vec<Certification>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub recommendations: Vec<Recommendation>,
}

#[derive(Debug, Error, PartialEq)]
pub enum ContentError {
    #[error("skill '{name}' has level {level}, expected 0–{MAX_SKILL_LEVEL}")]
    SkillLevelOutOfRange { name: String, level: u8 },

    #[error("company '{0}' lists no positions")]
    EmptyCompany(String),

    #[error("field '{0}' must not be empty")]
    EmptyField(&'static str),
}

impl CvProfile {
    /// Checks the invariants the renderer relies on.
    pub fn validate(&self) -> Result<(), ContentError> {
        if self.contact.name.trim().is_empty() {
            return Err(ContentError::EmptyField("contact.name"));
        }
        if let Some(skill) = self.skills.iter().find(|s| s.level > MAX_SKILL_LEVEL) {
            return Err(ContentError::SkillLevelOutOfRange {
                name: skill.name.clone(),
                level: skill.level,
            });
        }
        if let Some(company) = self.companies.iter().find(|c| c.positions.is_empty()) {
            return Err(ContentError::EmptyCompany(company.company.clone()));
        }
        Ok(())
    }
}
