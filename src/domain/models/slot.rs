use chrono::{Duration, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::AppError;

pub const HOURS_PER_DAY: u32 = 24;

/// Exclusive upper bound of the last hour of a day ("24:00"). Never rendered
/// as a bookable cell; only valid as the end of a range crossing midnight.
pub const DAY_END_HOUR: u32 = 24;

/// Which of the two displayed days a slot belongs to. Ranges may cross
/// midnight, so every slot reference carries its day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayContext {
    Current,
    Next,
}

impl DayContext {
    /// Offset of this day's hour 0 in the unified two-day timeline.
    pub fn timeline_offset(self) -> u32 {
        match self {
            DayContext::Current => 0,
            DayContext::Next => HOURS_PER_DAY,
        }
    }
}

/// A slot identified by day context and starting hour (0..=24, where 24 is
/// the day-end sentinel).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotRef {
    pub context: DayContext,
    pub hour: u32,
}

impl SlotRef {
    pub fn new(context: DayContext, hour: u32) -> Self {
        Self { context, hour }
    }

    pub fn current(hour: u32) -> Self {
        Self::new(DayContext::Current, hour)
    }

    pub fn next(hour: u32) -> Self {
        Self::new(DayContext::Next, hour)
    }

    /// Position in the unified timeline: current-day hours map to 0..=24,
    /// next-day hours to 24..=48. The current day's sentinel (24:00) and the
    /// next day's 00:00 share index 24 on purpose: they are the same instant.
    pub fn timeline_index(self) -> u32 {
        self.context.timeline_offset() + self.hour
    }

    pub fn is_day_end(self) -> bool {
        self.hour == DAY_END_HOUR
    }

    pub fn label(self) -> String {
        format!("{:02}:00", self.hour)
    }

    /// Parses an "HH:MM" label into a slot reference for the given day.
    pub fn parse(label: &str, context: DayContext) -> Result<Self, AppError> {
        let (h, m) = label
            .split_once(':')
            .ok_or_else(|| AppError::Validation(format!("Invalid slot label: {}", label)))?;
        let hour: u32 = h
            .parse()
            .map_err(|_| AppError::Validation(format!("Invalid slot label: {}", label)))?;
        if m != "00" || hour > DAY_END_HOUR {
            return Err(AppError::Validation(format!("Invalid slot label: {}", label)));
        }
        Ok(Self::new(context, hour))
    }

    /// Resolves the slot's wall-clock instant given the displayed day.
    /// Hour 24 resolves to midnight of the following calendar day.
    pub fn instant(self, current_day: NaiveDate) -> NaiveDateTime {
        let mut date = current_day;
        if self.context == DayContext::Next {
            date += Duration::days(1);
        }
        if self.is_day_end() {
            date += Duration::days(1);
            date.and_hms_opt(0, 0, 0).unwrap_or_default()
        } else {
            date.and_hms_opt(self.hour, 0, 0).unwrap_or_default()
        }
    }
}

/// One availability record as reported by the backend for a day window.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AvailabilityRecord {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub available: bool,
}

/// One hour-long candidate booking unit of a single day.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SlotInterval {
    pub formatted_time: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub available: bool,
}

impl SlotInterval {
    pub fn from_record(record: &AvailabilityRecord) -> Self {
        let start = record
            .start
            .with_minute(0)
            .and_then(|t| t.with_second(0))
            .unwrap_or(record.start);
        Self {
            formatted_time: start.format("%H:%M").to_string(),
            start,
            end: start + Duration::hours(1),
            available: record.available,
        }
    }
}

/// Why a slot is not bookable. A gap (hour absent from server data) and an
/// explicit booking render differently but block selection identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotStatus {
    Available,
    Booked,
    Gap,
}

/// Normalized hourly availability for one calendar day. The server may report
/// only a subset of hours; absent hours are schedule gaps.
#[derive(Debug, Clone)]
pub struct DaySlots {
    pub date: NaiveDate,
    slots: BTreeMap<u32, SlotInterval>,
}

impl DaySlots {
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            slots: BTreeMap::new(),
        }
    }

    /// Maps raw records into hourly slots keyed by truncated hour. Records
    /// outside the day or on a non-hour boundary are truncated to their hour;
    /// a later record for the same hour wins.
    pub fn from_records(date: NaiveDate, records: &[AvailabilityRecord]) -> Self {
        let mut slots = BTreeMap::new();
        for record in records {
            if record.start.date() != date {
                continue;
            }
            let interval = SlotInterval::from_record(record);
            slots.insert(interval.start.hour(), interval);
        }
        Self { date, slots }
    }

    /// Drops every slot whose start has already elapsed (with a forward
    /// buffer). Applied only when the day is today.
    pub fn without_past(mut self, now: NaiveDateTime, buffer: Duration) -> Self {
        let cutoff = now + buffer;
        self.slots.retain(|_, slot| slot.start > cutoff);
        self
    }

    pub fn status(&self, hour: u32) -> SlotStatus {
        match self.slots.get(&hour) {
            Some(slot) if slot.available => SlotStatus::Available,
            Some(_) => SlotStatus::Booked,
            None => SlotStatus::Gap,
        }
    }

    pub fn is_available(&self, hour: u32) -> bool {
        self.status(hour) == SlotStatus::Available
    }

    pub fn get(&self, hour: u32) -> Option<&SlotInterval> {
        self.slots.get(&hour)
    }

    pub fn hours(&self) -> impl Iterator<Item = u32> + '_ {
        self.slots.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Availability for the selected day and the day after it, tagged with the
/// day it was requested for so callers can discard responses that arrive
/// after the user has moved to a different day.
#[derive(Debug, Clone)]
pub struct SlotWindow {
    pub requested_for: NaiveDate,
    pub current: DaySlots,
    pub next: DaySlots,
    pub fetched_at: NaiveDateTime,
}

impl SlotWindow {
    pub fn day(&self, context: DayContext) -> &DaySlots {
        match context {
            DayContext::Current => &self.current,
            DayContext::Next => &self.next,
        }
    }

    /// Day-identity guard: true iff this window still matches the day the
    /// user currently has selected.
    pub fn is_relevant_for(&self, selected: NaiveDate) -> bool {
        self.requested_for == selected
    }
}
