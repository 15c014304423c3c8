//! Page extractors for the chromiumoxide backend
//!
//! Selectors target the server-rendered markup served with JavaScript
//! disabled; the client-rendered DOM uses different attributes.

mod pin_details;
mod search_cards;

pub use pin_details::{PinDetails, parse_follower_count};
pub use search_cards::SearchCards;

/// CSS selectors used by the extractors
pub mod selectors {
    /// One result card on the search page
    pub const SEARCH_CARD: &str = "div[data-grid-item]";
    pub const CARD_LINK: &str = "a";
    pub const CARD_IMAGE: &str = "img";

    /// Details panel on a pin page; its absence fails the attempt
    pub const CLOSEUP_DETAILS: &str = "div[data-test-id='CloseupDetails']";
    pub const WEBSITE_LINK: &str = "span[style='text-decoration: underline;']";
    pub const RATING_STAR_FULL: &str = "div[data-test-id='rating-star-full']";
    pub const FOLLOWER_COUNT: &str = "div[data-test-id='follower-count']";
    pub const CREATOR_PROFILE_NAME: &str = "div[data-test-id='creator-profile-name']";
    pub const CREATOR_NAME_INNER: &str = "div";
    pub const CLOSEUP_IMAGE: &str = "div[data-test-id='pin-closeup-image']";
    pub const CLOSEUP_IMAGE_IMG: &str = "img";
}
