use chrono::NaiveDateTime;

use crate::domain::models::booking::BookingDetails;
use crate::domain::models::plan::PricingPlan;
use crate::domain::models::selection::SelectedRange;

/// An ancillary cart line unrelated to the booking itself (shampoo,
/// microfiber, etc.).
#[derive(Debug, Clone)]
pub struct CartItem {
    pub name: String,
    pub unit_price: f64,
    pub quantity: u32,
}

impl CartItem {
    pub fn line_total(&self) -> f64 {
        self.unit_price * self.quantity as f64
    }
}

/// Elapsed hours between two instants. Ranges may span midnight, so this
/// works on instants rather than naive hour subtraction.
pub fn duration_hours(start: NaiveDateTime, end: NaiveDateTime) -> f64 {
    (end - start).num_minutes() as f64 / 60.0
}

/// Hourly rate x duration plus cart line totals. None when no plan is chosen
/// or the duration is zero or negative; the caller must keep submission
/// disabled in that case.
pub fn compute_total(
    plan: Option<&PricingPlan>,
    duration: f64,
    cart: &[CartItem],
) -> Option<f64> {
    let plan = plan?;
    if duration <= 0.0 {
        return None;
    }
    let cart_total: f64 = cart.iter().map(CartItem::line_total).sum();
    Some(plan.hourly_rate * duration + cart_total)
}

/// Assembles the booking summary shown before submission.
pub fn build_details(
    range: &SelectedRange,
    plan: Option<&PricingPlan>,
    cart: &[CartItem],
) -> Option<BookingDetails> {
    let plan = plan?;
    let duration = duration_hours(range.start_instant(), range.end_instant());
    let total_price = compute_total(Some(plan), duration, cart)?;
    Some(BookingDetails {
        date: range.date,
        time_range: range.time_range_label(),
        duration_hours: duration,
        plan: *plan,
        total_price,
    })
}
