use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::models::slot::{DayContext, SlotRef};

/// The user's in-progress range choice. Fully replaced on every valid
/// transition, never merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionState {
    #[default]
    Empty,
    StartChosen {
        start: SlotRef,
    },
    RangeComplete {
        start: SlotRef,
        end: SlotRef,
    },
}

impl SelectionState {
    pub fn start(&self) -> Option<SlotRef> {
        match self {
            SelectionState::Empty => None,
            SelectionState::StartChosen { start }
            | SelectionState::RangeComplete { start, .. } => Some(*start),
        }
    }

    pub fn end(&self) -> Option<SlotRef> {
        match self {
            SelectionState::RangeComplete { end, .. } => Some(*end),
            _ => None,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, SelectionState::RangeComplete { .. })
    }

    pub fn start_time(&self) -> Option<String> {
        self.start().map(SlotRef::label)
    }

    pub fn end_time(&self) -> Option<String> {
        self.end().map(SlotRef::label)
    }

    pub fn start_context(&self) -> Option<DayContext> {
        self.start().map(|s| s.context)
    }

    pub fn end_context(&self) -> Option<DayContext> {
        self.end().map(|e| e.context)
    }
}

/// A validated, contiguous reservation range, possibly spanning two days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedRange {
    pub date: NaiveDate,
    pub start: SlotRef,
    pub end: SlotRef,
}

impl SelectedRange {
    pub fn start_instant(&self) -> NaiveDateTime {
        self.start.instant(self.date)
    }

    pub fn end_instant(&self) -> NaiveDateTime {
        self.end.instant(self.date)
    }

    /// Display label such as "10:00 - 12:00", with a day marker when the end
    /// falls on the following day.
    pub fn time_range_label(&self) -> String {
        let end_label = if self.end.is_day_end() {
            "24:00".to_string()
        } else {
            self.end.label()
        };
        if self.start.context == DayContext::Current && self.end.context == DayContext::Next {
            format!("{} - {} (+1)", self.start.label(), end_label)
        } else {
            format!("{} - {}", self.start.label(), end_label)
        }
    }
}

/// Ephemeral user-facing warning. Replaced (and its timer restarted) by any
/// newer warning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub message: String,
    pub issued_at: NaiveDateTime,
    pub ttl: Duration,
}

impl Warning {
    pub fn new(message: impl Into<String>, issued_at: NaiveDateTime, ttl: Duration) -> Self {
        Self {
            message: message.into(),
            issued_at,
            ttl,
        }
    }

    pub fn is_expired(&self, now: NaiveDateTime) -> bool {
        now - self.issued_at >= self.ttl
    }
}

/// Result of feeding one slot click to the selection engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    StartSelected(SlotRef),
    /// Re-click of the current start: selection toggled off.
    Cleared,
    RangeCompleted(SelectedRange),
    /// Click rejected with a user-visible warning (boundary chosen as start).
    Rejected(String),
    /// Invalid click with no feedback: past, unavailable, or failing the
    /// end-validity rules. State is untouched.
    Ignored,
}
