use serde::Serialize;

use super::{Record, normalize_field};

/// One search-result card
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchData {
    name: String,
    url: String,
    image: String,
}

impl SearchData {
    #[must_use]
    pub fn new(name: &str, url: &str, image: &str) -> Self {
        Self {
            name: normalize_field("name", name),
            url: normalize_field("url", url),
            image: normalize_field("image", image),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub fn image(&self) -> &str {
        &self.image
    }
}

impl Record for SearchData {
    fn natural_key(&self) -> &str {
        &self.name
    }
}
