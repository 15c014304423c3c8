//! Live Chrome tests
//!
//! Require a local Chrome/Chromium (or network access for the managed
//! download). Run with `cargo test -- --ignored`.

use kodegen_tools_pinscrape::session::SessionOptions;
use kodegen_tools_pinscrape::{
    BrowserSession, ChromeSessionFactory, Extractor, Fetcher, PinDetails, RetryPolicy,
    SearchCards, SessionFactory,
};
use std::time::Duration;

fn fast_options() -> SessionOptions {
    SessionOptions {
        implicit_wait: Duration::from_secs(2),
        ..SessionOptions::default()
    }
}

fn data_url(html: &str) -> String {
    format!("data:text/html,{}", html.replace(' ', "%20"))
}

#[tokio::test]
#[ignore = "requires Chrome"]
async fn test_session_loads_and_releases() {
    let factory = ChromeSessionFactory::new(fast_options());
    let mut session = factory.open().await.unwrap();

    session.load(&data_url("<p>hello</p>")).await.unwrap();
    assert!(session.page().url().await.unwrap().is_some());
    session.release().await;
}

#[tokio::test]
#[ignore = "requires Chrome"]
async fn test_search_cards_from_server_markup() {
    let html = r#"<div data-grid-item="true"><a aria-label="Smoked Ribs" href="/pin/555/">x</a><img src="https://i.pinimg.com/ribs.jpg"></div><div data-grid-item="true"><a aria-label="Wings" href="/pin/556/">y</a><img src="https://i.pinimg.com/wings.jpg"></div>"#;

    let fetcher = Fetcher::new(
        ChromeSessionFactory::new(fast_options()),
        RetryPolicy::new(0, Duration::ZERO),
    );
    let cards = fetcher.fetch(&data_url(html), &SearchCards).await.unwrap();

    assert_eq!(cards.len(), 2);
    assert_eq!(cards[0].name(), "Smoked Ribs");
    assert_eq!(cards[0].url(), "https://pinterest.com/pin/555/");
    assert_eq!(cards[1].image(), "https://i.pinimg.com/wings.jpg");
}

#[tokio::test]
#[ignore = "requires Chrome"]
async fn test_pin_details_from_server_markup() {
    let html = r#"<div data-test-id="CloseupDetails"><span style="text-decoration: underline;">grillco.com</span><div data-test-id="rating-star-full"></div><div data-test-id="rating-star-full"></div><div data-test-id="follower-count"><div data-test-id="creator-profile-name"><div title="Grill Co">Grill Co</div></div> 4.5k followers</div></div><div data-test-id="pin-closeup-image"><img src="https://i.pinimg.com/big.jpg"></div>"#;

    let factory = ChromeSessionFactory::new(fast_options());
    let mut session = factory.open().await.unwrap();
    session.load(&data_url(html)).await.unwrap();
    let pin = PinDetails.extract(&mut session).await;
    session.release().await;

    let pin = pin.unwrap();
    assert_eq!(pin.name(), "Grill Co");
    assert_eq!(pin.website(), "https://grillco.com");
    assert_eq!(pin.stars(), 2);
    assert_eq!(pin.follower_count(), "4.5k");
    assert_eq!(pin.image(), "https://i.pinimg.com/big.jpg");
}

#[tokio::test]
#[ignore = "requires Chrome"]
async fn test_missing_details_panel_exhausts_retries() {
    let fetcher = Fetcher::new(
        ChromeSessionFactory::new(fast_options()),
        RetryPolicy::new(1, Duration::ZERO),
    );
    let err = fetcher
        .fetch(&data_url("<p>not a pin</p>"), &PinDetails)
        .await
        .unwrap_err();
    assert_eq!(err.attempts(), 2);
}
