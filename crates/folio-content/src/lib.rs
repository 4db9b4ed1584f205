//! # folio-content
//!
//! Typed access to the site's JSON content.
//!
//! Each content domain (hero, bio, career, awards, contact, hometown, values)
//! is one document under a content root, exposed through its own accessor on
//! [`ContentStore`]. Documents are parsed into strongly-typed models and
//! validated at the load boundary; anything that does not fit surfaces as a
//! [`ContentLoadError`] naming the domain. The admin-editable collections
//! (blog posts, tags, projects) live alongside them.

pub mod collections;
pub mod domain;
pub mod models;
pub mod store;
pub mod upload;
pub mod validate;

mod error;

pub use collections::{BlogPost, Entry, Project, Tag};
pub use domain::{CollectionKind, ContentDomain, UnknownDomain};
pub use error::{ContentLoadError, LoadCause, Result, StoreError};
pub use models::*;
pub use store::{ContentStore, Document};
pub use upload::{image_extension, is_allowed_image_file};
