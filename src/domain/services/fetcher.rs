use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use tokio::sync::{Mutex, OnceCell};
use tracing::{debug, info, warn};

use crate::domain::models::slot::{DaySlots, SlotWindow};
use crate::domain::ports::AvailabilitySource;
use crate::error::AppError;

type CacheKey = (NaiveDate, Option<String>);

struct CacheEntry {
    cell: Arc<OnceCell<DaySlots>>,
    inserted_at: NaiveDateTime,
}

/// Retrieves and normalizes per-day availability, caching formatted results
/// per `(date, exclude_booking)` for a bounded freshness window and coalescing
/// concurrent requests for the same key into one source call.
pub struct AvailabilityFetcher {
    source: Arc<dyn AvailabilitySource>,
    cache: Mutex<HashMap<CacheKey, CacheEntry>>,
    cache_ttl: Duration,
    past_buffer: Duration,
}

impl AvailabilityFetcher {
    pub fn new(source: Arc<dyn AvailabilitySource>, cache_ttl: Duration, past_buffer: Duration) -> Self {
        Self {
            source,
            cache: Mutex::new(HashMap::new()),
            cache_ttl,
            past_buffer,
        }
    }

    /// Fetches the normalized hourly slots for one day. `now` is the caller's
    /// clock; when `date` is today, slots already past (plus the forward
    /// buffer) are dropped regardless of the server's `available` flag.
    pub async fn fetch_day(
        &self,
        date: NaiveDate,
        exclude_booking: Option<&str>,
        now: NaiveDateTime,
    ) -> Result<DaySlots, AppError> {
        let key: CacheKey = (date, exclude_booking.map(str::to_string));

        let cell = {
            let mut cache = self.cache.lock().await;
            match cache.get(&key) {
                Some(entry) if now - entry.inserted_at < self.cache_ttl => entry.cell.clone(),
                _ => {
                    let cell = Arc::new(OnceCell::new());
                    cache.insert(
                        key.clone(),
                        CacheEntry {
                            cell: cell.clone(),
                            inserted_at: now,
                        },
                    );
                    cell
                }
            }
        };

        let exclude = key.1.clone();
        let result = cell
            .get_or_try_init(|| async {
                debug!("Fetching availability for {} (exclude: {:?})", date, exclude);
                let day_start = date.and_hms_opt(0, 0, 0).ok_or(AppError::Internal)?;
                let day_end = date.and_hms_opt(23, 59, 59).ok_or(AppError::Internal)?;
                let records = self
                    .source
                    .fetch_range(day_start, day_end, exclude.as_deref())
                    .await?;
                info!("Loaded {} availability records for {}", records.len(), date);
                Ok::<_, AppError>(DaySlots::from_records(date, &records))
            })
            .await;

        match result {
            Ok(slots) => {
                let mut slots = slots.clone();
                if date == now.date() {
                    let before = slots.len();
                    slots = slots.without_past(now, self.past_buffer);
                    if slots.len() < before {
                        debug!("Filtered {} past slots for {}", before - slots.len(), date);
                    }
                }
                Ok(slots)
            }
            Err(e) => {
                // A failed fetch must not poison the cache; the next call
                // retries instead of replaying the error.
                warn!("Availability fetch for {} failed: {}", date, e);
                let mut cache = self.cache.lock().await;
                if let Some(entry) = cache.get(&key) {
                    if Arc::ptr_eq(&entry.cell, &cell) {
                        cache.remove(&key);
                    }
                }
                Err(e)
            }
        }
    }

    /// Fetches the selected day plus the day after it, since ranges may cross
    /// midnight. The returned window carries `requested_for` so callers can
    /// discard it if the selection has moved on by the time it arrives.
    pub async fn fetch_window(
        &self,
        selected: NaiveDate,
        exclude_booking: Option<&str>,
        now: NaiveDateTime,
    ) -> Result<SlotWindow, AppError> {
        let following = selected
            .succ_opt()
            .ok_or_else(|| AppError::Validation(format!("Date out of range: {}", selected)))?;

        let current = self.fetch_day(selected, exclude_booking, now).await?;
        let next = self.fetch_day(following, exclude_booking, now).await?;

        Ok(SlotWindow {
            requested_for: selected,
            current,
            next,
            fetched_at: now,
        })
    }

    /// Drops every cached day, forcing the next fetch to hit the source.
    pub async fn invalidate(&self) {
        self.cache.lock().await.clear();
    }
}
