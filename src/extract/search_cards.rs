use async_trait::async_trait;
use chromiumoxide::element::Element;
use tracing::debug;

use super::selectors::{CARD_IMAGE, CARD_LINK, SEARCH_CARD};
use crate::errors::PageError;
use crate::fetcher::Extractor;
use crate::records::SearchData;
use crate::session::ChromeSession;
use crate::session::element_wait::{attribute, child, required_attribute, wait_for_elements};
use crate::utils::pin_url_from_href;

/// Extracts every result card from a loaded search page
///
/// A page without cards yields an empty list. A card missing its link or
/// image fails the whole attempt.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchCards;

#[async_trait]
impl Extractor<ChromeSession> for SearchCards {
    type Output = Vec<SearchData>;

    async fn extract(&self, session: &mut ChromeSession) -> Result<Vec<SearchData>, PageError> {
        let wait = session.options().implicit_wait;
        let cards = wait_for_elements(session.page(), SEARCH_CARD, wait).await?;
        debug!("found div cards: {}", cards.len());

        let mut results = Vec::with_capacity(cards.len());
        for card in &cards {
            results.push(read_card(card).await?);
        }
        Ok(results)
    }
}

async fn read_card(card: &Element) -> Result<SearchData, PageError> {
    let link = child(card, CARD_LINK).await?;
    let title = attribute(&link, "aria-label").await?.unwrap_or_default();
    let href = required_attribute(&link, CARD_LINK, "href").await?;

    let img = child(card, CARD_IMAGE).await?;
    let src = attribute(&img, "src").await?.unwrap_or_default();

    Ok(SearchData::new(&title, &pin_url_from_href(&href), &src))
}
