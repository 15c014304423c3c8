use async_trait::async_trait;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use super::selectors::{
    CLOSEUP_DETAILS, CLOSEUP_IMAGE, CLOSEUP_IMAGE_IMG, CREATOR_NAME_INNER, CREATOR_PROFILE_NAME,
    FOLLOWER_COUNT, RATING_STAR_FULL, WEBSITE_LINK,
};
use crate::errors::PageError;
use crate::fetcher::Extractor;
use crate::records::PinData;
use crate::session::ChromeSession;
use crate::session::element_wait::{
    attribute, child, children, required_attribute, text, wait_for_element,
};
use crate::utils::NOT_AVAILABLE;

/// Extracts the creator details from a loaded pin page
///
/// The details panel, follower block and creator name are required; website
/// and image fall back to `"n/a"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PinDetails;

#[async_trait]
impl Extractor<ChromeSession> for PinDetails {
    type Output = PinData;

    async fn extract(&self, session: &mut ChromeSession) -> Result<PinData, PageError> {
        let wait = session.options().implicit_wait;
        let page = session.page();

        let main_card = wait_for_element(page, CLOSEUP_DETAILS, wait).await?;

        let website = match children(&main_card, WEBSITE_LINK).await.first() {
            Some(span) => format!("https://{}", text(span).await?.trim()),
            None => NOT_AVAILABLE.to_string(),
        };

        let stars = u32::try_from(children(&main_card, RATING_STAR_FULL).await.len())
            .unwrap_or(u32::MAX);

        let profile_info = child(&main_card, FOLLOWER_COUNT).await?;
        let account_div = child(&profile_info, CREATOR_PROFILE_NAME).await?;
        let name_div = children(&account_div, CREATOR_NAME_INNER)
            .await
            .into_iter()
            .next()
            .ok_or_else(|| PageError::ElementNotFound {
                selector: format!("{CREATOR_PROFILE_NAME} {CREATOR_NAME_INNER}"),
            })?;
        let account_name = required_attribute(&name_div, CREATOR_NAME_INNER, "title").await?;

        let follower_count = parse_follower_count(&text(&profile_info).await?, &account_name);

        // The image panel sits outside the details card
        let image_container = page
            .find_elements(CLOSEUP_IMAGE)
            .await
            .unwrap_or_default()
            .into_iter()
            .next();
        let image = match image_container {
            Some(container) => {
                let img = child(&container, CLOSEUP_IMAGE_IMG).await?;
                attribute(&img, "src")
                    .await?
                    .unwrap_or_else(|| NOT_AVAILABLE.to_string())
            }
            None => NOT_AVAILABLE.to_string(),
        };

        debug!("Extracted pin details for account '{}'", account_name);
        Ok(PinData::new(
            &account_name,
            &website,
            stars,
            &follower_count,
            &image,
        ))
    }
}

static FOLLOWERS_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s*\bfollowers?\b").expect("FOLLOWERS_SUFFIX: hardcoded regex is valid")
});

/// Follower count from the follower block text
///
/// The block renders the account name followed by `"<n> followers"` (or
/// `"1 follower"`); both the name and the suffix are removed.
#[must_use]
pub fn parse_follower_count(block_text: &str, account_name: &str) -> String {
    let without_name = if account_name.is_empty() {
        block_text.to_string()
    } else {
        block_text.replace(account_name, "")
    };
    FOLLOWERS_SUFFIX
        .replace_all(&without_name, "")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_account_name_and_suffix() {
        assert_eq!(
            parse_follower_count("Grill Master\n12.3k followers", "Grill Master"),
            "12.3k"
        );
    }

    #[test]
    fn empty_account_name_leaves_text() {
        assert_eq!(parse_follower_count("310 followers", ""), "310");
    }

    #[test]
    fn singular_suffix_is_removed() {
        assert_eq!(parse_follower_count("Solo Cook 1 follower", "Solo Cook"), "1");
    }

    #[test]
    fn missing_count_is_empty() {
        // Normalization turns this into "No follower_count"
        assert_eq!(parse_follower_count("Grill Master", "Grill Master"), "");
    }
}
