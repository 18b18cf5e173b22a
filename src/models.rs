//! Request, response and domain models for the API.
//!
//! All models use serde for serialization/deserialization. Wire names are
//! camelCase to match the frontend. Localized fields carry `{ru, en}` pairs.

use serde::{Deserialize, Serialize};

/// A `{ru, en}` text pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalizedString {
    pub ru: String,
    pub en: String,
}

/// Either a plain string or a `{ru, en}` pair. Older portfolio entries were
/// created before localization, so both shapes are accepted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Localized {
    Text(String),
    Pair(LocalizedString),
}

// ============================================================================
// Project Models
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub title: Localized,
    pub description: Localized,
    pub tech_stack: Vec<String>,
    pub year: i32,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
}

/// Payload for creating a project (id is assigned server-side).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPayload {
    pub title: Option<Localized>,
    pub description: Option<Localized>,
    pub tech_stack: Option<Vec<String>>,
    pub year: Option<i32>,
    pub status: Option<String>,
    pub url: Option<String>,
    pub images: Option<Vec<String>>,
}

// ============================================================================
// Skill Models
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillCategory {
    Frontend,
    Backend,
    Tooling,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillLevel {
    Beginner,
    Middle,
    Advanced,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub id: String,
    pub name: String,
    pub category: SkillCategory,
    pub level: SkillLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_core: Option<bool>,
}

/// Payload for creating or patching a skill.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillPayload {
    pub name: Option<String>,
    pub category: Option<SkillCategory>,
    pub level: Option<SkillLevel>,
    pub is_core: Option<bool>,
}

// ============================================================================
// Profile Models
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Socials {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telegram: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AboutTexts {
    pub ru: Vec<String>,
    pub en: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub name: String,
    pub role: LocalizedString,
    pub description: LocalizedString,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    pub about_texts: AboutTexts,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub socials: Option<Socials>,
}

impl Default for Profile {
    fn default() -> Self {
        Profile {
            name: String::new(),
            role: LocalizedString {
                ru: String::new(),
                en: String::new(),
            },
            description: LocalizedString {
                ru: String::new(),
                en: String::new(),
            },
            photo_url: None,
            about_texts: AboutTexts {
                ru: Vec::new(),
                en: Vec::new(),
            },
            socials: None,
        }
    }
}

/// Partial profile update.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePayload {
    pub name: Option<String>,
    pub role: Option<LocalizedString>,
    pub description: Option<LocalizedString>,
    pub photo_url: Option<String>,
    pub about_texts: Option<AboutTexts>,
    pub socials: Option<Socials>,
}

// ============================================================================
// Status Models
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Availability {
    Available,
    Busy,
    #[serde(rename = "Not taking projects")]
    NotTakingProjects,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ru: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub en: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Status {
    pub status: Availability,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<StatusMessage>,
}

impl Default for Status {
    fn default() -> Self {
        Status {
            status: Availability::Available,
            message: None,
        }
    }
}

/// Partial status update.
#[derive(Debug, Deserialize)]
pub struct StatusPayload {
    pub status: Option<Availability>,
    pub message: Option<StatusMessage>,
}

// ============================================================================
// Auth Models
// ============================================================================

/// Login request body. Fields are optional so that a missing field yields a
/// 400 with our error shape instead of a deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

// ============================================================================
// Contact Models
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ContactRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}
