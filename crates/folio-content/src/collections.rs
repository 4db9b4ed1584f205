//! Slug-addressed collections edited from the admin UI: blog posts, tags
//! and projects.
//!
//! Each collection is one JSON array file under the content root. A missing
//! file is an empty collection. Every write rewrites the whole file; there is
//! a single operator and no locking.

use std::fs;
use std::io;

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::CollectionKind;
use crate::error::{Result, StoreError};
use crate::store::{to_pretty_json, write_atomic, ContentStore};

// ---------------------------------------------------------------------------
// Models
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub slug: String,
    pub title: String,
    /// Publication date, `YYYY-MM-DD`.
    pub date: NaiveDate,
    #[serde(default)]
    pub summary: String,
    /// Tag slugs.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Markdown source.
    pub body: String,
    #[serde(default)]
    pub draft: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub slug: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub slug: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub tech: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub featured: bool,
}

// ---------------------------------------------------------------------------
// Entry trait
// ---------------------------------------------------------------------------

/// A collection member addressed by its slug.
pub trait Entry: Serialize + DeserializeOwned + Clone {
    const KIND: CollectionKind;

    fn slug(&self) -> &str;

    /// Field checks beyond the slug.
    fn check(&self) -> std::result::Result<(), String>;
}

impl Entry for BlogPost {
    const KIND: CollectionKind = CollectionKind::Post;

    fn slug(&self) -> &str {
        &self.slug
    }

    fn check(&self) -> std::result::Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("title is empty".into());
        }
        if let Some(bad) = self.tags.iter().find(|t| validate_slug(t).is_err()) {
            return Err(format!("tag `{bad}` is not a valid slug"));
        }
        Ok(())
    }
}

impl Entry for Tag {
    const KIND: CollectionKind = CollectionKind::Tag;

    fn slug(&self) -> &str {
        &self.slug
    }

    fn check(&self) -> std::result::Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name is empty".into());
        }
        Ok(())
    }
}

impl Entry for Project {
    const KIND: CollectionKind = CollectionKind::Project;

    fn slug(&self) -> &str {
        &self.slug
    }

    fn check(&self) -> std::result::Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("title is empty".into());
        }
        Ok(())
    }
}

/// Slugs are lowercase ASCII letters, digits and single inner hyphens.
pub fn validate_slug(slug: &str) -> std::result::Result<(), String> {
    if slug.is_empty() {
        return Err("slug is empty".into());
    }
    if slug.starts_with('-') || slug.ends_with('-') || slug.contains("--") {
        return Err(format!("slug `{slug}` has a misplaced hyphen"));
    }
    if !slug
        .bytes()
        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
    {
        return Err(format!(
            "slug `{slug}` may only contain lowercase letters, digits and hyphens"
        ));
    }
    Ok(())
}

fn validate_entry<E: Entry>(entry: &E) -> Result<()> {
    validate_slug(entry.slug())
        .and_then(|()| entry.check())
        .map_err(|reason| StoreError::Invalid {
            what: E::KIND.to_string(),
            reason,
        })
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

impl ContentStore {
    /// All entries of a collection, in stored order.
    pub fn list<E: Entry>(&self) -> Result<Vec<E>> {
        let path = self.path_of(E::KIND.file_name());
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        serde_json::from_slice(&bytes).map_err(|source| StoreError::MalformedCollection {
            kind: E::KIND,
            source,
        })
    }

    pub fn get<E: Entry>(&self, slug: &str) -> Result<E> {
        self.list::<E>()?
            .into_iter()
            .find(|e| e.slug() == slug)
            .ok_or_else(|| not_found::<E>(slug))
    }

    /// Append a new entry. The slug must be unused.
    pub fn insert<E: Entry>(&self, entry: E) -> Result<E> {
        validate_entry(&entry)?;

        let mut entries = self.list::<E>()?;
        if entries.iter().any(|e| e.slug() == entry.slug()) {
            return Err(StoreError::Conflict {
                kind: E::KIND,
                slug: entry.slug().to_string(),
            });
        }

        entries.push(entry.clone());
        self.write_collection(&entries)?;

        info!(kind = %E::KIND, slug = entry.slug(), "Created entry");
        Ok(entry)
    }

    /// Replace the entry at `slug` in place. The replacement may carry a new
    /// slug as long as no other entry already uses it.
    pub fn update<E: Entry>(&self, slug: &str, entry: E) -> Result<E> {
        validate_entry(&entry)?;

        let mut entries = self.list::<E>()?;
        let index = entries
            .iter()
            .position(|e| e.slug() == slug)
            .ok_or_else(|| not_found::<E>(slug))?;

        let renamed_onto_other = entries
            .iter()
            .enumerate()
            .any(|(i, e)| i != index && e.slug() == entry.slug());
        if renamed_onto_other {
            return Err(StoreError::Conflict {
                kind: E::KIND,
                slug: entry.slug().to_string(),
            });
        }

        entries[index] = entry.clone();
        self.write_collection(&entries)?;

        info!(kind = %E::KIND, slug, new_slug = entry.slug(), "Updated entry");
        Ok(entry)
    }

    pub fn remove<E: Entry>(&self, slug: &str) -> Result<E> {
        let mut entries = self.list::<E>()?;
        let index = entries
            .iter()
            .position(|e| e.slug() == slug)
            .ok_or_else(|| not_found::<E>(slug))?;

        let removed = entries.remove(index);
        self.write_collection(&entries)?;

        info!(kind = %E::KIND, slug, "Deleted entry");
        Ok(removed)
    }

    fn write_collection<E: Entry>(&self, entries: &[E]) -> Result<()> {
        let bytes = to_pretty_json(entries)?;
        write_atomic(&self.path_of(E::KIND.file_name()), &bytes)?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Blog helpers
    // ------------------------------------------------------------------

    /// Posts newest first. Drafts are skipped unless `include_drafts`.
    pub fn posts(&self, include_drafts: bool) -> Result<Vec<BlogPost>> {
        let mut posts: Vec<BlogPost> = self
            .list::<BlogPost>()?
            .into_iter()
            .filter(|p| include_drafts || !p.draft)
            .collect();
        posts.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.slug.cmp(&b.slug)));
        Ok(posts)
    }

    /// Published posts carrying `tag`, newest first.
    pub fn posts_tagged(&self, tag: &str) -> Result<Vec<BlogPost>> {
        let mut posts = self.posts(false)?;
        posts.retain(|p| p.tags.iter().any(|t| t == tag));
        Ok(posts)
    }

    /// A single post as the public site sees it: drafts do not exist.
    pub fn published_post(&self, slug: &str) -> Result<BlogPost> {
        let post = self.get::<BlogPost>(slug)?;
        if post.draft {
            return Err(not_found::<BlogPost>(slug));
        }
        Ok(post)
    }
}

fn not_found<E: Entry>(slug: &str) -> StoreError {
    StoreError::NotFound {
        kind: E::KIND,
        slug: slug.to_string(),
    }
}
