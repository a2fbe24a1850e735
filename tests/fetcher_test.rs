mod common;

use std::sync::atomic::Ordering;
use std::sync::Arc;

use chrono::Duration;
use common::{at, date, MockAvailabilitySource};

use bay_booking_core::domain::services::fetcher::AvailabilityFetcher;
use bay_booking_core::error::AppError;

fn fetcher_with(source: Arc<MockAvailabilitySource>) -> AvailabilityFetcher {
    AvailabilityFetcher::new(source, Duration::seconds(300), Duration::minutes(5))
}

#[tokio::test]
async fn test_repeat_fetch_is_served_from_cache() {
    let day = date(2026, 9, 10);
    let source = Arc::new(MockAvailabilitySource::new().with_day(day, &[(9, true), (10, false)]));
    let fetcher = fetcher_with(source.clone());
    let now = at(date(2026, 9, 1), 12, 0);

    let first = fetcher.fetch_day(day, None, now).await.unwrap();
    let second = fetcher.fetch_day(day, None, now).await.unwrap();
    assert_eq!(first.len(), 2);
    assert_eq!(second.len(), 2);
    assert_eq!(source.call_count(), 1);
}

#[tokio::test]
async fn test_cache_expires_after_ttl() {
    let day = date(2026, 9, 10);
    let source = Arc::new(MockAvailabilitySource::new().with_day(day, &[(9, true)]));
    let fetcher = fetcher_with(source.clone());
    let now = at(date(2026, 9, 1), 12, 0);

    fetcher.fetch_day(day, None, now).await.unwrap();
    fetcher
        .fetch_day(day, None, now + Duration::seconds(299))
        .await
        .unwrap();
    assert_eq!(source.call_count(), 1);

    fetcher
        .fetch_day(day, None, now + Duration::seconds(301))
        .await
        .unwrap();
    assert_eq!(source.call_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_fetches_for_same_day_coalesce() {
    let day = date(2026, 9, 10);
    let source = Arc::new(
        MockAvailabilitySource::new()
            .with_day(day, &[(9, true)])
            .with_delay(50),
    );
    let fetcher = Arc::new(fetcher_with(source.clone()));
    let now = at(date(2026, 9, 1), 12, 0);

    let a = {
        let fetcher = fetcher.clone();
        tokio::spawn(async move { fetcher.fetch_day(day, None, now).await })
    };
    let b = {
        let fetcher = fetcher.clone();
        tokio::spawn(async move { fetcher.fetch_day(day, None, now).await })
    };

    assert!(a.await.unwrap().is_ok());
    assert!(b.await.unwrap().is_ok());
    assert_eq!(source.call_count(), 1, "requests must be de-duplicated");
}

#[tokio::test]
async fn test_edit_mode_exclusion_uses_its_own_cache_key() {
    let day = date(2026, 9, 10);
    let source = Arc::new(MockAvailabilitySource::new().with_day(day, &[(9, true)]));
    let fetcher = fetcher_with(source.clone());
    let now = at(date(2026, 9, 1), 12, 0);

    fetcher.fetch_day(day, None, now).await.unwrap();
    fetcher.fetch_day(day, Some("booking-1"), now).await.unwrap();
    fetcher.fetch_day(day, Some("booking-1"), now).await.unwrap();
    assert_eq!(source.call_count(), 2);
}

#[tokio::test]
async fn test_failed_fetch_surfaces_error_and_is_not_cached() {
    let day = date(2026, 9, 10);
    let source = Arc::new(MockAvailabilitySource::new().with_day(day, &[(9, true)]));
    let fetcher = fetcher_with(source.clone());
    let now = at(date(2026, 9, 1), 12, 0);

    source.fail.store(true, Ordering::SeqCst);
    let err = fetcher.fetch_day(day, None, now).await.unwrap_err();
    assert!(err.is_fetch_failure());
    assert!(
        !matches!(err, AppError::NotFound(_)),
        "a failed fetch is not an empty day"
    );

    // Recovery: the error must not be replayed from cache.
    source.fail.store(false, Ordering::SeqCst);
    let slots = fetcher.fetch_day(day, None, now).await.unwrap();
    assert_eq!(slots.len(), 1);
    assert_eq!(source.call_count(), 2);
}

#[tokio::test]
async fn test_past_slots_dropped_only_for_today() {
    let today = date(2026, 9, 10);
    let entries = [(9, true), (14, true), (15, true)];
    let source = Arc::new(
        MockAvailabilitySource::new()
            .with_day(today, &entries)
            .with_day(date(2026, 9, 20), &entries),
    );
    let fetcher = fetcher_with(source.clone());
    let now = at(today, 13, 58);

    // Today: 09:00 is long past and 14:00 is inside the 5-minute buffer.
    let slots = fetcher.fetch_day(today, None, now).await.unwrap();
    assert_eq!(slots.hours().collect::<Vec<_>>(), vec![15]);

    // A future day keeps every reported hour.
    let slots = fetcher
        .fetch_day(date(2026, 9, 20), None, now)
        .await
        .unwrap();
    assert_eq!(slots.hours().collect::<Vec<_>>(), vec![9, 14, 15]);
}

#[tokio::test]
async fn test_window_carries_day_identity_for_stale_guard() {
    let selected = date(2026, 9, 10);
    let source = Arc::new(
        MockAvailabilitySource::new()
            .with_day(selected, &[(9, true)])
            .with_day(date(2026, 9, 11), &[(10, true)]),
    );
    let fetcher = fetcher_with(source.clone());
    let now = at(date(2026, 9, 1), 12, 0);

    let window = fetcher.fetch_window(selected, None, now).await.unwrap();
    assert_eq!(window.requested_for, selected);
    assert!(window.is_relevant_for(selected));
    // The user has moved to another day by the time this response lands.
    assert!(!window.is_relevant_for(date(2026, 9, 12)));

    assert_eq!(window.current.hours().collect::<Vec<_>>(), vec![9]);
    assert_eq!(window.next.hours().collect::<Vec<_>>(), vec![10]);
}

#[tokio::test]
async fn test_invalidate_forces_refetch() {
    let day = date(2026, 9, 10);
    let source = Arc::new(MockAvailabilitySource::new().with_day(day, &[(9, true)]));
    let fetcher = fetcher_with(source.clone());
    let now = at(date(2026, 9, 1), 12, 0);

    fetcher.fetch_day(day, None, now).await.unwrap();
    fetcher.invalidate().await;
    fetcher.fetch_day(day, None, now).await.unwrap();
    assert_eq!(source.call_count(), 2);
}
