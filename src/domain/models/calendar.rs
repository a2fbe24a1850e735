use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One cell of the 6x7 month grid. Regenerated wholesale when the displayed
/// month changes, never mutated in place.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub is_current_month: bool,
    pub is_today: bool,
    pub is_available: bool,
}

/// A built month grid together with the (year, month) it was built for, so
/// callers can skip rebuilding when the visible month has not changed.
#[derive(Debug, Clone)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub days: Vec<CalendarDay>,
}

impl MonthGrid {
    pub fn matches(&self, year: i32, month: u32) -> bool {
        self.year == year && self.month == month
    }
}
