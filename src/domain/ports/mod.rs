use crate::domain::models::booking::BookingSubmission;
use crate::domain::models::slot::AvailabilityRecord;
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDateTime;

#[async_trait]
pub trait AvailabilitySource: Send + Sync {
    /// Server-known intervals for `[start, end]`. When `exclude_booking` is
    /// set, availability is computed as though that booking did not occupy
    /// the calendar (edit mode).
    async fn fetch_range(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
        exclude_booking: Option<&str>,
    ) -> Result<Vec<AvailabilityRecord>, AppError>;

    /// Hour starts currently occupied by an existing booking, used to seed
    /// the edit-mode pre-selection.
    async fn occupied_slots(&self, booking_id: &str) -> Result<Vec<NaiveDateTime>, AppError>;
}

#[async_trait]
pub trait BookingSink: Send + Sync {
    async fn submit(&self, submission: &BookingSubmission) -> Result<(), AppError>;
}
