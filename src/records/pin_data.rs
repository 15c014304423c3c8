use serde::Serialize;

use super::{Record, normalize_field};

/// Detail-page enrichment of one pin
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PinData {
    name: String,
    website: String,
    stars: u32,
    follower_count: String,
    image: String,
}

impl PinData {
    #[must_use]
    pub fn new(name: &str, website: &str, stars: u32, follower_count: &str, image: &str) -> Self {
        Self {
            name: normalize_field("name", name),
            website: normalize_field("website", website),
            stars,
            follower_count: normalize_field("follower_count", follower_count),
            image: normalize_field("image", image),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn website(&self) -> &str {
        &self.website
    }

    #[must_use]
    pub fn stars(&self) -> u32 {
        self.stars
    }

    #[must_use]
    pub fn follower_count(&self) -> &str {
        &self.follower_count
    }

    #[must_use]
    pub fn image(&self) -> &str {
        &self.image
    }
}

impl Record for PinData {
    fn natural_key(&self) -> &str {
        &self.name
    }
}
