// src/resources/banner.rs

use serde_json::{Map, Value};
use validator::Validate;

use super::{Draft, Resource, not_blank};
use crate::api::{Payload, Upload};
use crate::error::AdminError;
use crate::models::banner::Banner;

pub struct BannerResource;

/// Banner form: a title and an image, required when creating.
#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct BannerDraft {
    #[validate(length(max = 200), custom(function = not_blank))]
    pub title: String,

    pub image: Option<Upload>,

    /// URL of the image already stored, when editing.
    pub image_url: Option<String>,
}

impl Draft for BannerDraft {
    fn check(&self, creating: bool) -> Result<(), AdminError> {
        self.validate()?;
        if creating && self.image.is_none() {
            return Err(AdminError::Validation("Banner image is required".to_string()));
        }
        Ok(())
    }

    fn payload(&self, _creating: bool) -> Result<Payload, AdminError> {
        let mut object = Map::new();
        object.insert("title".to_string(), Value::String(self.title.trim().to_string()));
        let files = self.image.iter().cloned().collect();
        Ok(Payload::from_object(object, files))
    }
}

impl Resource for BannerResource {
    type Item = Banner;
    type Draft = BannerDraft;

    fn segment(&self) -> &str {
        "banner"
    }

    fn label(&self) -> String {
        "banners".to_string()
    }

    fn create_path(&self) -> String {
        "banner/add".to_string()
    }

    fn blank_draft(&self) -> BannerDraft {
        BannerDraft::default()
    }

    fn draft_from(&self, item: &Banner) -> BannerDraft {
        BannerDraft {
            title: item.title.clone(),
            image: None,
            image_url: item.image.clone(),
        }
    }
}
