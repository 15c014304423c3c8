//! Timeout wrapper for page operations
//!
//! Navigation and load waits can hang on slow DNS, streaming responses or
//! pages that never fire their load event; every such await goes through here.

use std::future::Future;
use std::time::Duration;

use crate::errors::PageError;

/// Run `operation` with an explicit deadline
///
/// # Returns
/// * `Ok(T)` - Operation completed in time
/// * `Err(PageError::Timeout)` - Deadline reached first
/// * `Err(_)` - Operation's own error, passed through
pub async fn with_page_timeout<F, T>(
    operation: F,
    timeout: Duration,
    operation_name: &str,
) -> Result<T, PageError>
where
    F: Future<Output = Result<T, PageError>>,
{
    match tokio::time::timeout(timeout, operation).await {
        Ok(result) => result,
        Err(_) => Err(PageError::Timeout {
            operation: operation_name.to_string(),
            secs: timeout.as_secs(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn slow_operation_times_out() {
        let result: Result<(), PageError> = with_page_timeout(
            async {
                tokio::time::sleep(Duration::from_millis(200)).await;
                Ok(())
            },
            Duration::from_millis(10),
            "Page navigation",
        )
        .await;

        match result {
            Err(PageError::Timeout { operation, .. }) => assert_eq!(operation, "Page navigation"),
            other => panic!("expected timeout, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn inner_error_passes_through() {
        let result: Result<(), PageError> = with_page_timeout(
            async {
                Err(PageError::ElementNotFound {
                    selector: "div".to_string(),
                })
            },
            Duration::from_secs(1),
            "Page load",
        )
        .await;

        assert!(matches!(result, Err(PageError::ElementNotFound { .. })));
    }
}
