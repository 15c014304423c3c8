//! Bounded fan-out over rows, with and without real fetches

use kodegen_tools_pinscrape::{Fetcher, RetryPolicy, fan_out};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

mod common;
use common::{ScriptedFactory, UrlDetails};

#[tokio::test]
async fn test_failures_are_isolated_and_concurrency_bounded() {
    let live = Arc::new(AtomicUsize::new(0));
    let peak = Arc::new(AtomicUsize::new(0));

    let rows: Vec<u32> = (0..10).collect();
    let report = fan_out(rows, 3, |row| {
        let live = Arc::clone(&live);
        let peak = Arc::clone(&peak);
        async move {
            let now = live.fetch_add(1, Ordering::SeqCst) + 1;
            peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            live.fetch_sub(1, Ordering::SeqCst);

            if row == 3 || row == 7 {
                Err(format!("row {row} always fails"))
            } else {
                Ok(row)
            }
        }
    })
    .await;

    assert_eq!(report.succeeded.len(), 8);
    assert_eq!(report.failed.len(), 2);
    assert_eq!(report.total(), 10);

    let mut failed: Vec<&str> = report.failed.iter().map(|f| f.row.as_str()).collect();
    failed.sort_unstable();
    assert_eq!(failed, vec!["3", "7"]);
    assert!(report.failed[0].error.contains("always fails"));

    assert!(peak.load(Ordering::SeqCst) <= 3);
    assert!(peak.load(Ordering::SeqCst) >= 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_fetch_workers_each_own_their_sessions() {
    let factory = ScriptedFactory::new()
        .failing_url("/pin/3/")
        .failing_url("/pin/7/")
        .with_load_delay(Duration::from_millis(10));
    let state = factory.state.clone();
    let fetcher = Arc::new(Fetcher::new(factory, RetryPolicy::new(1, Duration::ZERO)));

    let urls: Vec<String> = (0..10)
        .map(|i| format!("https://pinterest.com/pin/{i}/"))
        .collect();

    let report = fan_out(urls, 3, |url| {
        let fetcher = Arc::clone(&fetcher);
        async move { fetcher.fetch(&url, &UrlDetails).await }
    })
    .await;

    assert_eq!(report.succeeded.len(), 8);
    assert_eq!(report.failed.len(), 2);

    // 8 single attempts + 2 rows * 2 attempts
    assert_eq!(state.opens(), 12);
    assert_eq!(state.releases(), 12);
    assert!(state.max_live() <= 3);
    assert_eq!(state.live(), 0);
}
