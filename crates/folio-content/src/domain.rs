//! Content domains and collection kinds, and the files that back them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One self-contained category of site content, backed by a single JSON
/// document under the content root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentDomain {
    Hero,
    Bio,
    Career,
    Awards,
    Contact,
    Hometown,
    Values,
}

impl ContentDomain {
    pub const ALL: [ContentDomain; 7] = [
        ContentDomain::Hero,
        ContentDomain::Bio,
        ContentDomain::Career,
        ContentDomain::Awards,
        ContentDomain::Contact,
        ContentDomain::Hometown,
        ContentDomain::Values,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ContentDomain::Hero => "hero",
            ContentDomain::Bio => "bio",
            ContentDomain::Career => "career",
            ContentDomain::Awards => "awards",
            ContentDomain::Contact => "contact",
            ContentDomain::Hometown => "hometown",
            ContentDomain::Values => "values",
        }
    }

    /// File name of the backing document, relative to the content root.
    pub fn file_name(self) -> &'static str {
        match self {
            ContentDomain::Hero => "hero.json",
            ContentDomain::Bio => "bio.json",
            ContentDomain::Career => "career.json",
            ContentDomain::Awards => "awards.json",
            ContentDomain::Contact => "contact.json",
            ContentDomain::Hometown => "hometown.json",
            ContentDomain::Values => "values.json",
        }
    }
}

impl fmt::Display for ContentDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown content domain: {0}")]
pub struct UnknownDomain(pub String);

impl FromStr for ContentDomain {
    type Err = UnknownDomain;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContentDomain::ALL
            .into_iter()
            .find(|d| d.name() == s)
            .ok_or_else(|| UnknownDomain(s.to_string()))
    }
}

/// Admin-editable collections: many entries per file, addressed by slug.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    Post,
    Tag,
    Project,
}

impl CollectionKind {
    pub fn name(self) -> &'static str {
        match self {
            CollectionKind::Post => "post",
            CollectionKind::Tag => "tag",
            CollectionKind::Project => "project",
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            CollectionKind::Post => "posts.json",
            CollectionKind::Tag => "tags.json",
            CollectionKind::Project => "projects.json",
        }
    }
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
