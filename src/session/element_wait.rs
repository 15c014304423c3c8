//! Element lookups with an implicit wait
//!
//! Page-level queries poll until the selector matches or the wait runs out.
//! Child lookups inside an already-located element do not wait.

use chromiumoxide::element::Element;
use chromiumoxide::page::Page;
use std::time::{Duration, Instant};
use tracing::debug;

use crate::errors::PageError;
use crate::utils::constants::ELEMENT_POLL_INTERVAL_MS;

/// All elements matching `selector`, waiting up to `wait` for at least one
///
/// No match within the wait is not an error: an empty result page is still a
/// successfully loaded page.
pub async fn wait_for_elements(
    page: &Page,
    selector: &str,
    wait: Duration,
) -> Result<Vec<Element>, PageError> {
    let start = Instant::now();
    let poll_interval = Duration::from_millis(ELEMENT_POLL_INTERVAL_MS);

    loop {
        let last_error = match page.find_elements(selector).await {
            Ok(found) if !found.is_empty() => {
                debug!(
                    "Found {} '{}' elements after {:?}",
                    found.len(),
                    selector,
                    start.elapsed()
                );
                return Ok(found);
            }
            Ok(_) => None,
            Err(e) => Some(e),
        };

        if start.elapsed() >= wait {
            return match last_error {
                Some(e) => Err(PageError::from(e)),
                None => {
                    debug!("No '{}' elements after {:?}", selector, wait);
                    Ok(Vec::new())
                }
            };
        }

        tokio::time::sleep(poll_interval).await;
    }
}

/// The first element matching `selector`; required
pub async fn wait_for_element(
    page: &Page,
    selector: &str,
    wait: Duration,
) -> Result<Element, PageError> {
    let start = Instant::now();
    let poll_interval = Duration::from_millis(ELEMENT_POLL_INTERVAL_MS);

    loop {
        match page.find_element(selector).await {
            Ok(element) => return Ok(element),
            Err(_) if start.elapsed() >= wait => {
                return Err(PageError::ElementNotFound {
                    selector: selector.to_string(),
                });
            }
            Err(_) => tokio::time::sleep(poll_interval).await,
        }
    }
}

/// Required child element
pub async fn child(parent: &Element, selector: &str) -> Result<Element, PageError> {
    parent
        .find_element(selector)
        .await
        .map_err(|_| PageError::ElementNotFound {
            selector: selector.to_string(),
        })
}

/// Optional child elements; a failed lookup counts as no match
pub async fn children(parent: &Element, selector: &str) -> Vec<Element> {
    parent.find_elements(selector).await.unwrap_or_default()
}

/// Attribute value, `None` when absent
pub async fn attribute(element: &Element, name: &str) -> Result<Option<String>, PageError> {
    element.attribute(name).await.map_err(PageError::from)
}

/// Required attribute value
pub async fn required_attribute(
    element: &Element,
    selector: &str,
    name: &str,
) -> Result<String, PageError> {
    attribute(element, name)
        .await?
        .ok_or_else(|| PageError::MissingAttribute {
            selector: selector.to_string(),
            attribute: name.to_string(),
        })
}

/// Rendered text, empty when the element has none
pub async fn text(element: &Element) -> Result<String, PageError> {
    Ok(element.inner_text().await?.unwrap_or_default())
}
