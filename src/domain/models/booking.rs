use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::models::plan::PricingPlan;
use crate::domain::models::selection::SelectedRange;
use crate::domain::models::slot::DayContext;

/// Finalized selection ready for submission. Immutable once created;
/// discarded when the user returns to editing the range.
#[derive(Debug, Serialize, Clone)]
pub struct BookingDetails {
    pub date: NaiveDate,
    pub time_range: String,
    pub duration_hours: f64,
    pub plan: PricingPlan,
    pub total_price: f64,
}

/// Payload handed to the booking sink. The sink owns network submission,
/// auth, and customer notification.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct BookingSubmission {
    pub request_id: Uuid,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub start_context: DayContext,
    pub end_context: DayContext,
    pub plan_id: String,
    pub total_price: f64,
}

impl BookingSubmission {
    pub fn new(range: &SelectedRange, details: &BookingDetails) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            date: range.date,
            start_time: range.start.label(),
            end_time: range.end.label(),
            start_context: range.start.context,
            end_context: range.end.context,
            plan_id: details.plan.id.to_string(),
            total_price: details.total_price,
        }
    }
}
