use chrono::{Datelike, Duration, NaiveDate};

use crate::domain::models::calendar::{CalendarDay, MonthGrid};
use crate::error::AppError;

pub const GRID_CELLS: usize = 42;

/// Builds the 6x7 month grid: leading days from the previous month (never
/// selectable), all days of the requested month (selectable from `today` on),
/// and trailing days from the next month until 42 cells are filled.
pub fn build_month(year: i32, month: u32, today: NaiveDate) -> Result<MonthGrid, AppError> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| AppError::Validation(format!("Invalid month: {}-{}", year, month)))?;

    // Weeks start Monday; Sunday counts as weekday 7.
    let leading = first.weekday().num_days_from_monday() as i64;
    let grid_start = first - Duration::days(leading);

    let mut days = Vec::with_capacity(GRID_CELLS);
    for offset in 0..GRID_CELLS as i64 {
        let date = grid_start + Duration::days(offset);
        let is_current_month = date.year() == year && date.month() == month;
        let is_available = if is_current_month {
            date >= today
        } else {
            // Leading cells exist only for alignment; trailing cells belong
            // to the following month and stay selectable.
            date > first
        };
        days.push(CalendarDay {
            date,
            is_current_month,
            is_today: date == today,
            is_available,
        });
    }

    Ok(MonthGrid { year, month, days })
}

/// Rebuilds the grid only when the visible month has actually changed, so a
/// re-render does not churn the grid and reset transient UI state.
pub fn ensure_month(
    cached: Option<MonthGrid>,
    year: i32,
    month: u32,
    today: NaiveDate,
) -> Result<MonthGrid, AppError> {
    match cached {
        Some(grid) if grid.matches(year, month) => Ok(grid),
        _ => build_month(year, month, today),
    }
}
