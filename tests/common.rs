#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use tokio::time::{sleep, Duration as TokioDuration};

use bay_booking_core::domain::models::booking::BookingSubmission;
use bay_booking_core::domain::models::slot::{AvailabilityRecord, DaySlots, SlotWindow};
use bay_booking_core::domain::ports::{AvailabilitySource, BookingSink};
use bay_booking_core::error::AppError;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn at(day: NaiveDate, hour: u32, minute: u32) -> NaiveDateTime {
    day.and_hms_opt(hour, minute, 0).unwrap()
}

pub fn record(day: NaiveDate, hour: u32, available: bool) -> AvailabilityRecord {
    AvailabilityRecord {
        start: at(day, hour, 0),
        end: at(day, hour, 0) + Duration::hours(1),
        available,
    }
}

pub fn day_slots(day: NaiveDate, entries: &[(u32, bool)]) -> DaySlots {
    let records: Vec<_> = entries
        .iter()
        .map(|&(hour, available)| record(day, hour, available))
        .collect();
    DaySlots::from_records(day, &records)
}

/// Builds a two-day window directly, bypassing the fetcher, for classifier
/// and selection tests.
pub fn window(
    day: NaiveDate,
    current: &[(u32, bool)],
    next: &[(u32, bool)],
    fetched_at: NaiveDateTime,
) -> SlotWindow {
    SlotWindow {
        requested_for: day,
        current: day_slots(day, current),
        next: day_slots(day.succ_opt().unwrap(), next),
        fetched_at,
    }
}

/// Availability source backed by an in-memory map, recording how often it is
/// hit. An optional delay simulates a slow network.
pub struct MockAvailabilitySource {
    pub days: Mutex<HashMap<NaiveDate, Vec<(u32, bool)>>>,
    pub occupied: Mutex<Vec<NaiveDateTime>>,
    pub calls: AtomicUsize,
    pub fail: std::sync::atomic::AtomicBool,
    pub delay_ms: u64,
}

impl MockAvailabilitySource {
    pub fn new() -> Self {
        Self {
            days: Mutex::new(HashMap::new()),
            occupied: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
            fail: std::sync::atomic::AtomicBool::new(false),
            delay_ms: 0,
        }
    }

    pub fn with_day(self, day: NaiveDate, entries: &[(u32, bool)]) -> Self {
        self.days.lock().unwrap().insert(day, entries.to_vec());
        self
    }

    pub fn with_delay(mut self, ms: u64) -> Self {
        self.delay_ms = ms;
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AvailabilitySource for MockAvailabilitySource {
    async fn fetch_range(
        &self,
        start: NaiveDateTime,
        _end: NaiveDateTime,
        _exclude_booking: Option<&str>,
    ) -> Result<Vec<AvailabilityRecord>, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.delay_ms > 0 {
            sleep(TokioDuration::from_millis(self.delay_ms)).await;
        }
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::Fetch("mock source down".to_string()));
        }
        let day = start.date();
        let entries = self
            .days
            .lock()
            .unwrap()
            .get(&day)
            .cloned()
            .unwrap_or_default();
        Ok(entries
            .into_iter()
            .map(|(hour, available)| record(day, hour, available))
            .collect())
    }

    async fn occupied_slots(&self, _booking_id: &str) -> Result<Vec<NaiveDateTime>, AppError> {
        Ok(self.occupied.lock().unwrap().clone())
    }
}

/// Booking sink that records every submission it receives.
pub struct MockBookingSink {
    pub submissions: Mutex<Vec<BookingSubmission>>,
}

impl MockBookingSink {
    pub fn new() -> Self {
        Self {
            submissions: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl BookingSink for MockBookingSink {
    async fn submit(&self, submission: &BookingSubmission) -> Result<(), AppError> {
        self.submissions.lock().unwrap().push(submission.clone());
        Ok(())
    }
}
