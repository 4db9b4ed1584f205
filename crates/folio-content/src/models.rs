//! Typed shapes of the per-domain content documents.
//!
//! Field names are camelCase on disk. Every struct derives `Serialize` and
//! `Deserialize` so the same value flows from the JSON file to the HTTP layer
//! without an intermediate representation.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Hero
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroData {
    pub name: String,
    pub subtitle: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_alt: Option<String>,
}

// ---------------------------------------------------------------------------
// Bio
// ---------------------------------------------------------------------------

/// Stored as a bare JSON array; array order is render order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BioData {
    pub blocks: Vec<BioBlock>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BioBlock {
    Text { content: String },
    Image { src: String, alt: String },
}

// ---------------------------------------------------------------------------
// Career & awards
// ---------------------------------------------------------------------------

/// Conventional career categories. Storage accepts any string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CareerPreset {
    Work,
    Education,
    Activity,
}

/// Conventional award categories. Storage accepts any string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AwardPreset {
    Award,
    Certification,
    Competition,
}

/// Free-text category tag for a career entry.
///
/// Any string is accepted and round-trips verbatim; [`CareerKind::preset`]
/// recognises the conventional categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CareerKind(pub String);

impl CareerKind {
    pub fn preset(&self) -> Option<CareerPreset> {
        match self.0.trim().to_ascii_lowercase().as_str() {
            "work" => Some(CareerPreset::Work),
            "education" => Some(CareerPreset::Education),
            "activity" => Some(CareerPreset::Activity),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Free-text category tag for an award entry. Same contract as [`CareerKind`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AwardKind(pub String);

impl AwardKind {
    pub fn preset(&self) -> Option<AwardPreset> {
        match self.0.trim().to_ascii_lowercase().as_str() {
            "award" => Some(AwardPreset::Award),
            "certification" => Some(AwardPreset::Certification),
            "competition" => Some(AwardPreset::Competition),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Memory {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerItem {
    pub period: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: CareerKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memories: Option<Vec<Memory>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CareerData {
    pub items: Vec<CareerItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AwardItem {
    pub period: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: AwardKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organizer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AwardsData {
    pub items: Vec<AwardItem>,
}

// ---------------------------------------------------------------------------
// Contact
// ---------------------------------------------------------------------------

/// Icon tag for a contact link.
///
/// Names the UI knows how to draw get a variant; anything else is passed
/// through untouched as [`ContactIcon::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ContactIcon {
    Github,
    Linkedin,
    Twitter,
    Instagram,
    Youtube,
    Mail,
    Website,
    Other(String),
}

impl ContactIcon {
    pub fn as_str(&self) -> &str {
        match self {
            ContactIcon::Github => "github",
            ContactIcon::Linkedin => "linkedin",
            ContactIcon::Twitter => "twitter",
            ContactIcon::Instagram => "instagram",
            ContactIcon::Youtube => "youtube",
            ContactIcon::Mail => "mail",
            ContactIcon::Website => "website",
            ContactIcon::Other(raw) => raw,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, ContactIcon::Other(_))
    }
}

impl From<String> for ContactIcon {
    fn from(raw: String) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "github" => ContactIcon::Github,
            "linkedin" => ContactIcon::Linkedin,
            "twitter" => ContactIcon::Twitter,
            "instagram" => ContactIcon::Instagram,
            "youtube" => ContactIcon::Youtube,
            "mail" => ContactIcon::Mail,
            "website" => ContactIcon::Website,
            _ => ContactIcon::Other(raw),
        }
    }
}

impl From<ContactIcon> for String {
    fn from(icon: ContactIcon) -> Self {
        match icon {
            ContactIcon::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ContactIcon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactLink {
    pub name: String,
    pub href: String,
    pub icon: ContactIcon,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactData {
    pub links: Vec<ContactLink>,
    pub form_url: String,
}

// ---------------------------------------------------------------------------
// Hometown
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRef {
    pub src: String,
    pub alt: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HometownData {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge_label: Option<String>,
    pub description: String,
    pub images: Vec<ImageRef>,
}

// ---------------------------------------------------------------------------
// Values
// ---------------------------------------------------------------------------

/// Closed set: the values section only has artwork for these three.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValuesIcon {
    Shield,
    Code,
    Users,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuesItem {
    pub icon: ValuesIcon,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuesData {
    pub motto: String,
    pub motto_description: String,
    pub items: Vec<ValuesItem>,
    pub career_short_term: String,
    pub career_long_term: String,
}
