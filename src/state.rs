use std::sync::Arc;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use tracing::info;

use crate::config::Config;
use crate::domain::models::booking::{BookingDetails, BookingSubmission};
use crate::domain::models::selection::SelectedRange;
use crate::domain::models::slot::{DayContext, SlotRef, SlotWindow};
use crate::domain::ports::{AvailabilitySource, BookingSink};
use crate::domain::services::fetcher::AvailabilityFetcher;
use crate::error::AppError;

/// Shared engine wiring: the availability fetcher (with its cache) and the
/// booking sink, constructed once per application session.
#[derive(Clone)]
pub struct EngineState {
    pub config: Config,
    pub source: Arc<dyn AvailabilitySource>,
    pub fetcher: Arc<AvailabilityFetcher>,
    pub booking_sink: Arc<dyn BookingSink>,
}

impl EngineState {
    pub fn new(
        config: Config,
        source: Arc<dyn AvailabilitySource>,
        booking_sink: Arc<dyn BookingSink>,
    ) -> Self {
        let fetcher = Arc::new(AvailabilityFetcher::new(
            source.clone(),
            Duration::seconds(config.cache_ttl_secs),
            Duration::minutes(config.past_buffer_mins),
        ));
        Self {
            config,
            source,
            fetcher,
            booking_sink,
        }
    }

    /// Loads the two-day window for a selected day. The caller must check
    /// `window.is_relevant_for(selected)` before applying a response that
    /// raced with a day change.
    pub async fn load_window(
        &self,
        selected: NaiveDate,
        exclude_booking: Option<&str>,
        now: NaiveDateTime,
    ) -> Result<SlotWindow, AppError> {
        self.fetcher.fetch_window(selected, exclude_booking, now).await
    }

    /// Maps the occupied hours of the booking under edit onto slot references
    /// within the displayed window. Hours outside the window are dropped.
    pub async fn pre_selected_slots(
        &self,
        booking_id: &str,
        selected: NaiveDate,
    ) -> Result<Vec<SlotRef>, AppError> {
        let occupied = self.source.occupied_slots(booking_id).await?;
        let following = selected
            .succ_opt()
            .ok_or_else(|| AppError::Validation(format!("Date out of range: {}", selected)))?;

        Ok(occupied
            .into_iter()
            .filter_map(|instant| {
                let hour = chrono::Timelike::hour(&instant.time());
                if instant.date() == selected {
                    Some(SlotRef::new(DayContext::Current, hour))
                } else if instant.date() == following {
                    Some(SlotRef::new(DayContext::Next, hour))
                } else {
                    None
                }
            })
            .collect())
    }

    /// Hands a validated, contiguous range over for submission.
    pub async fn submit(
        &self,
        range: &SelectedRange,
        details: &BookingDetails,
    ) -> Result<BookingSubmission, AppError> {
        let submission = BookingSubmission::new(range, details);
        info!(
            "Submitting booking {} on {} ({})",
            submission.request_id, submission.date, details.time_range
        );
        self.booking_sink.submit(&submission).await?;
        Ok(submission)
    }
}
