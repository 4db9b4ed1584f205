//! Load-boundary checks for content documents.
//!
//! Parsing proves the shape; these checks cover what the types cannot say
//! (required text that must not be blank). The first violation wins and is
//! reported with a path into the document, e.g. `items[2].title is empty`.
//! Career and award `type` tags are free text and are never checked here.

use crate::models::{
    AwardsData, BioBlock, BioData, CareerData, ContactData, HeroData, HometownData, ValuesData,
};

pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

fn require(value: &str, path: impl FnOnce() -> String) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("{} is empty", path()))
    } else {
        Ok(())
    }
}

impl Validate for HeroData {
    fn validate(&self) -> Result<(), String> {
        require(&self.name, || "name".into())?;
        require(&self.description, || "description".into())
    }
}

impl Validate for BioData {
    fn validate(&self) -> Result<(), String> {
        for (i, block) in self.blocks.iter().enumerate() {
            match block {
                BioBlock::Text { content } => require(content, || format!("[{i}].content"))?,
                BioBlock::Image { src, .. } => require(src, || format!("[{i}].src"))?,
            }
        }
        Ok(())
    }
}

impl Validate for CareerData {
    fn validate(&self) -> Result<(), String> {
        for (i, item) in self.items.iter().enumerate() {
            require(&item.period, || format!("[{i}].period"))?;
            require(&item.title, || format!("[{i}].title"))?;
        }
        Ok(())
    }
}

impl Validate for AwardsData {
    fn validate(&self) -> Result<(), String> {
        for (i, item) in self.items.iter().enumerate() {
            require(&item.period, || format!("[{i}].period"))?;
            require(&item.title, || format!("[{i}].title"))?;
        }
        Ok(())
    }
}

impl Validate for ContactData {
    fn validate(&self) -> Result<(), String> {
        for (i, link) in self.links.iter().enumerate() {
            require(&link.name, || format!("links[{i}].name"))?;
            require(&link.href, || format!("links[{i}].href"))?;
        }
        Ok(())
    }
}

impl Validate for HometownData {
    fn validate(&self) -> Result<(), String> {
        require(&self.title, || "title".into())?;
        for (i, image) in self.images.iter().enumerate() {
            require(&image.src, || format!("images[{i}].src"))?;
        }
        Ok(())
    }
}

impl Validate for ValuesData {
    fn validate(&self) -> Result<(), String> {
        require(&self.motto, || "motto".into())?;
        for (i, item) in self.items.iter().enumerate() {
            require(&item.title, || format!("items[{i}].title"))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        AwardItem, AwardKind, CareerItem, CareerKind, ImageRef, ValuesIcon, ValuesItem,
    };

    #[test]
    fn hero_requires_description() {
        let hero = HeroData {
            name: "Ada".into(),
            subtitle: String::new(),
            description: "   ".into(),
            image: None,
            image_alt: None,
        };
        assert_eq!(hero.validate().unwrap_err(), "description is empty");
    }

    #[test]
    fn bio_reports_block_index() {
        let bio = BioData {
            blocks: vec![
                BioBlock::Text {
                    content: "ok".into(),
                },
                BioBlock::Image {
                    src: String::new(),
                    alt: "missing".into(),
                },
            ],
        };
        assert_eq!(bio.validate().unwrap_err(), "[1].src is empty");
    }

    #[test]
    fn award_with_free_text_type_is_valid() {
        let awards = AwardsData {
            items: vec![AwardItem {
                period: "2023".into(),
                title: "Hackathon".into(),
                kind: AwardKind("Scholarship".into()),
                organizer: None,
                description: None,
                result: Some("1st".into()),
                url: None,
            }],
        };
        assert!(awards.validate().is_ok());
    }

    #[test]
    fn blank_career_and_award_types_are_accepted() {
        let career = CareerData {
            items: vec![CareerItem {
                period: "2020".into(),
                title: "Studio".into(),
                description: String::new(),
                kind: CareerKind(String::new()),
                image: None,
                memories: None,
            }],
        };
        assert!(career.validate().is_ok());

        let awards = AwardsData {
            items: vec![AwardItem {
                period: "2021".into(),
                title: "Prize".into(),
                kind: AwardKind("  ".into()),
                organizer: None,
                description: None,
                result: None,
                url: None,
            }],
        };
        assert!(awards.validate().is_ok());
    }

    #[test]
    fn values_item_title_required() {
        let values = ValuesData {
            motto: "Ship it".into(),
            motto_description: String::new(),
            items: vec![ValuesItem {
                icon: ValuesIcon::Code,
                title: String::new(),
                description: "x".into(),
            }],
            career_short_term: String::new(),
            career_long_term: String::new(),
        };
        assert_eq!(values.validate().unwrap_err(), "items[0].title is empty");
    }

    #[test]
    fn hometown_image_src_required() {
        let hometown = HometownData {
            title: "Busan".into(),
            badge: None,
            badge_label: None,
            description: String::new(),
            images: vec![ImageRef {
                src: String::new(),
                alt: "harbour".into(),
            }],
        };
        assert_eq!(hometown.validate().unwrap_err(), "images[0].src is empty");
    }
}
