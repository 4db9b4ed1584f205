//! File-backed content store.
//!
//! [`ContentStore`] owns the content root. Every domain document lives in a
//! fixed file under that root and is read fresh on each accessor call; there
//! is no in-memory copy to go stale between an admin edit and the next page
//! render. Writes go through a temp file and a rename so a reader never
//! observes a half-written document.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};

use crate::domain::ContentDomain;
use crate::error::{ContentLoadError, LoadCause, Result, StoreError};
use crate::models::{
    AwardsData, BioData, CareerData, ContactData, HeroData, HometownData, ValuesData,
};
use crate::validate::Validate;

/// A typed document bound to the domain whose file backs it.
pub trait Document: Serialize + DeserializeOwned + Validate {
    const DOMAIN: ContentDomain;
}

impl Document for HeroData {
    const DOMAIN: ContentDomain = ContentDomain::Hero;
}
impl Document for BioData {
    const DOMAIN: ContentDomain = ContentDomain::Bio;
}
impl Document for CareerData {
    const DOMAIN: ContentDomain = ContentDomain::Career;
}
impl Document for AwardsData {
    const DOMAIN: ContentDomain = ContentDomain::Awards;
}
impl Document for ContactData {
    const DOMAIN: ContentDomain = ContentDomain::Contact;
}
impl Document for HometownData {
    const DOMAIN: ContentDomain = ContentDomain::Hometown;
}
impl Document for ValuesData {
    const DOMAIN: ContentDomain = ContentDomain::Values;
}

/// Handle to the content root directory.
#[derive(Debug, Clone)]
pub struct ContentStore {
    root: PathBuf,
}

impl ContentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub(crate) fn path_of(&self, file_name: &str) -> PathBuf {
        self.root.join(file_name)
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn hero(&self) -> std::result::Result<HeroData, ContentLoadError> {
        self.load()
    }

    pub fn bio(&self) -> std::result::Result<BioData, ContentLoadError> {
        self.load()
    }

    pub fn career(&self) -> std::result::Result<CareerData, ContentLoadError> {
        self.load()
    }

    pub fn awards(&self) -> std::result::Result<AwardsData, ContentLoadError> {
        self.load()
    }

    pub fn contact(&self) -> std::result::Result<ContactData, ContentLoadError> {
        self.load()
    }

    pub fn hometown(&self) -> std::result::Result<HometownData, ContentLoadError> {
        self.load()
    }

    pub fn values(&self) -> std::result::Result<ValuesData, ContentLoadError> {
        self.load()
    }

    /// Read, parse and validate the document for `D`.
    pub fn load<D: Document>(&self) -> std::result::Result<D, ContentLoadError> {
        let domain = D::DOMAIN;
        let path = self.path_of(domain.file_name());

        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(ContentLoadError::new(domain, LoadCause::Missing));
            }
            Err(e) => return Err(ContentLoadError::new(domain, e)),
        };

        let doc: D =
            serde_json::from_slice(&bytes).map_err(|e| ContentLoadError::new(domain, e))?;
        doc.validate()
            .map_err(|reason| ContentLoadError::new(domain, LoadCause::Invalid(reason)))?;

        debug!(domain = %domain, size = bytes.len(), "Loaded content document");
        Ok(doc)
    }

    /// Load a domain through its typed accessor and hand it back as JSON.
    pub fn read_json(&self, domain: ContentDomain) -> Result<serde_json::Value> {
        let value = match domain {
            ContentDomain::Hero => serde_json::to_value(self.hero()?)?,
            ContentDomain::Bio => serde_json::to_value(self.bio()?)?,
            ContentDomain::Career => serde_json::to_value(self.career()?)?,
            ContentDomain::Awards => serde_json::to_value(self.awards()?)?,
            ContentDomain::Contact => serde_json::to_value(self.contact()?)?,
            ContentDomain::Hometown => serde_json::to_value(self.hometown()?)?,
            ContentDomain::Values => serde_json::to_value(self.values()?)?,
        };
        Ok(value)
    }

    // ------------------------------------------------------------------
    // Writes
    // ------------------------------------------------------------------

    /// Validate and persist a domain document, replacing the previous one.
    pub fn save<D: Document>(&self, doc: &D) -> Result<()> {
        let domain = D::DOMAIN;
        doc.validate().map_err(|reason| StoreError::Invalid {
            what: domain.to_string(),
            reason,
        })?;

        let bytes = to_pretty_json(doc)?;
        write_atomic(&self.path_of(domain.file_name()), &bytes)?;

        info!(domain = %domain, size = bytes.len(), "Saved content document");
        Ok(())
    }

    /// Parse an untyped value as `domain`'s document type, then [`save`](Self::save) it.
    pub fn save_json(&self, domain: ContentDomain, value: serde_json::Value) -> Result<()> {
        match domain {
            ContentDomain::Hero => self.save(&parse_as::<HeroData>(value)?),
            ContentDomain::Bio => self.save(&parse_as::<BioData>(value)?),
            ContentDomain::Career => self.save(&parse_as::<CareerData>(value)?),
            ContentDomain::Awards => self.save(&parse_as::<AwardsData>(value)?),
            ContentDomain::Contact => self.save(&parse_as::<ContactData>(value)?),
            ContentDomain::Hometown => self.save(&parse_as::<HometownData>(value)?),
            ContentDomain::Values => self.save(&parse_as::<ValuesData>(value)?),
        }
    }
}

fn parse_as<D: Document>(value: serde_json::Value) -> Result<D> {
    serde_json::from_value(value).map_err(|e| StoreError::Invalid {
        what: D::DOMAIN.to_string(),
        reason: e.to_string(),
    })
}

pub(crate) fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    let mut bytes = serde_json::to_vec_pretty(value)?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// Write `bytes` to `path` via a sibling temp file and a rename.
pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }

    let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
    tmp_name.push(".tmp");
    let tmp = path.with_file_name(tmp_name);

    fs::write(&tmp, bytes)?;
    fs::rename(&tmp, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn test_store() -> (ContentStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = ContentStore::new(dir.path());
        (store, dir)
    }

    fn write_raw(store: &ContentStore, domain: ContentDomain, body: &str) {
        fs::write(store.path_of(domain.file_name()), body).unwrap();
    }

    fn sample_hero() -> HeroData {
        HeroData {
            name: "Ada Lovelace".into(),
            subtitle: "Engineer".into(),
            description: "Writes programs for engines that do not exist yet.".into(),
            image: Some("/images/ada.jpg".into()),
            image_alt: Some("Portrait".into()),
        }
    }

    fn sample_values() -> ValuesData {
        ValuesData {
            motto: "Leave it better".into(),
            motto_description: "Small steady improvements".into(),
            items: vec![
                ValuesItem {
                    icon: ValuesIcon::Shield,
                    title: "Integrity".into(),
                    description: "Say what you do".into(),
                },
                ValuesItem {
                    icon: ValuesIcon::Users,
                    title: "Together".into(),
                    description: "Teams over heroes".into(),
                },
            ],
            career_short_term: "Ship the thing".into(),
            career_long_term: "Teach the thing".into(),
        }
    }

    fn sample_bio() -> BioData {
        BioData {
            blocks: vec![
                BioBlock::Text {
                    content: "I grew up by the sea.".into(),
                },
                BioBlock::Image {
                    src: "/images/sea.jpg".into(),
                    alt: "Sea".into(),
                },
            ],
        }
    }

    fn sample_career() -> CareerData {
        CareerData {
            items: vec![CareerItem {
                period: "2019 - 2023".into(),
                title: "Backend engineer".into(),
                description: "APIs".into(),
                kind: CareerKind("work".into()),
                image: None,
                memories: Some(vec![Memory {
                    image: None,
                    text: "First on-call".into(),
                }]),
            }],
        }
    }

    fn sample_awards() -> AwardsData {
        AwardsData {
            items: vec![AwardItem {
                period: "2021".into(),
                title: "Open source award".into(),
                kind: AwardKind("Recognition".into()),
                organizer: Some("Foundation".into()),
                description: None,
                result: None,
                url: Some("https://example.org".into()),
            }],
        }
    }

    fn sample_contact() -> ContactData {
        ContactData {
            links: vec![
                ContactLink {
                    name: "GitHub".into(),
                    href: "https://github.com/ada".into(),
                    icon: ContactIcon::Github,
                },
                ContactLink {
                    name: "Fediverse".into(),
                    href: "https://social.example/@ada".into(),
                    icon: ContactIcon::Other("mastodon".into()),
                },
            ],
            form_url: "https://forms.example/contact".into(),
        }
    }

    fn sample_hometown() -> HometownData {
        HometownData {
            title: "Seaside".into(),
            badge: Some("Since 1990".into()),
            badge_label: None,
            description: "Small town".into(),
            images: vec![ImageRef {
                src: "/images/town.jpg".into(),
                alt: "Town".into(),
            }],
        }
    }

    fn save_all_samples(store: &ContentStore) {
        store.save(&sample_hero()).unwrap();
        store.save(&sample_bio()).unwrap();
        store.save(&sample_career()).unwrap();
        store.save(&sample_awards()).unwrap();
        store.save(&sample_contact()).unwrap();
        store.save(&sample_hometown()).unwrap();
        store.save(&sample_values()).unwrap();
    }

    #[test]
    fn accessor_reads_are_idempotent() {
        let (store, _dir) = test_store();
        save_all_samples(&store);

        assert_eq!(store.hero().unwrap(), store.hero().unwrap());
        assert_eq!(store.bio().unwrap(), store.bio().unwrap());
        assert_eq!(store.career().unwrap(), store.career().unwrap());
        assert_eq!(store.awards().unwrap(), store.awards().unwrap());
        assert_eq!(store.contact().unwrap(), store.contact().unwrap());
        assert_eq!(store.hometown().unwrap(), store.hometown().unwrap());
        assert_eq!(store.values().unwrap(), store.values().unwrap());
    }

    #[test]
    fn saved_documents_round_trip() {
        let (store, _dir) = test_store();
        save_all_samples(&store);

        assert_eq!(store.hero().unwrap(), sample_hero());
        assert_eq!(store.bio().unwrap(), sample_bio());
        assert_eq!(store.career().unwrap(), sample_career());
        assert_eq!(store.awards().unwrap(), sample_awards());
        assert_eq!(store.contact().unwrap(), sample_contact());
        assert_eq!(store.hometown().unwrap(), sample_hometown());
        assert_eq!(store.values().unwrap(), sample_values());
    }

    #[test]
    fn blank_career_and_award_types_load() {
        let (store, _dir) = test_store();
        write_raw(
            &store,
            ContentDomain::Career,
            r#"[{"period": "2020", "title": "Studio", "description": "", "type": ""}]"#,
        );
        write_raw(
            &store,
            ContentDomain::Awards,
            r#"[{"period": "2021", "title": "Prize", "type": ""}]"#,
        );

        let career = store.career().unwrap();
        assert_eq!(career.items[0].kind, CareerKind(String::new()));
        let awards = store.awards().unwrap();
        assert_eq!(awards.items[0].kind, AwardKind(String::new()));
    }

    #[test]
    fn missing_document_is_a_typed_error() {
        let (store, _dir) = test_store();
        let err = store.contact().unwrap_err();
        assert_eq!(err.domain, ContentDomain::Contact);
        assert!(matches!(err.cause, LoadCause::Missing));
    }

    #[test]
    fn malformed_json_is_reported_with_domain() {
        let (store, _dir) = test_store();
        write_raw(&store, ContentDomain::Bio, "[{\"type\": \"text\", ");

        let err = store.bio().unwrap_err();
        assert_eq!(err.domain, ContentDomain::Bio);
        assert!(matches!(err.cause, LoadCause::Malformed(_)));
    }

    #[test]
    fn wrong_shape_is_malformed_not_cast() {
        let (store, _dir) = test_store();
        write_raw(
            &store,
            ContentDomain::Values,
            &json!({
                "motto": "m",
                "mottoDescription": "d",
                "items": [{ "icon": "Heart", "title": "t", "description": "d" }],
                "careerShortTerm": "s",
                "careerLongTerm": "l",
            })
            .to_string(),
        );

        let err = store.values().unwrap_err();
        assert!(matches!(err.cause, LoadCause::Malformed(_)));
    }

    #[test]
    fn blank_required_field_fails_validation_on_load() {
        let (store, _dir) = test_store();
        write_raw(
            &store,
            ContentDomain::Hero,
            &json!({ "name": "Ada", "subtitle": "", "description": "" }).to_string(),
        );

        let err = store.hero().unwrap_err();
        match err.cause {
            LoadCause::Invalid(reason) => assert_eq!(reason, "description is empty"),
            other => panic!("unexpected cause: {other:?}"),
        }
    }

    #[test]
    fn invalid_document_is_not_written() {
        let (store, _dir) = test_store();
        store.save(&sample_hero()).unwrap();

        let mut broken = sample_hero();
        broken.name = String::new();
        assert!(matches!(
            store.save(&broken),
            Err(StoreError::Invalid { .. })
        ));
        assert_eq!(store.hero().unwrap(), sample_hero());
    }

    #[test]
    fn save_json_parses_into_domain_type() {
        let (store, _dir) = test_store();
        store
            .save_json(
                ContentDomain::Career,
                json!([{
                    "period": "2024",
                    "title": "Studio",
                    "description": "Freelance",
                    "type": "work",
                }]),
            )
            .unwrap();

        let career = store.career().unwrap();
        assert_eq!(career.items[0].kind.preset(), Some(CareerPreset::Work));

        let err = store
            .save_json(ContentDomain::Hero, json!({ "name": "no description" }))
            .unwrap_err();
        assert!(matches!(err, StoreError::Invalid { what, .. } if what == "hero"));
    }

    #[test]
    fn read_json_serves_only_valid_documents() {
        let (store, _dir) = test_store();
        store.save(&sample_values()).unwrap();

        let value = store.read_json(ContentDomain::Values).unwrap();
        assert_eq!(value["items"][1]["icon"], "Users");
        assert_eq!(value["careerLongTerm"], "Teach the thing");

        assert!(matches!(
            store.read_json(ContentDomain::Hometown),
            Err(StoreError::Load(_))
        ));
    }

    #[test]
    fn save_creates_root_and_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let store = ContentStore::new(dir.path().join("nested/content"));
        store.save(&sample_hero()).unwrap();

        let names: Vec<_> = fs::read_dir(store.root())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, vec!["hero.json".to_string()]);
    }
}
