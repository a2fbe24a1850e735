use std::collections::HashSet;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::domain::models::selection::SelectionState;
use crate::domain::models::slot::{
    DayContext, SlotRef, SlotStatus, SlotWindow, DAY_END_HOUR, HOURS_PER_DAY,
};

/// Render-time predicates for one slot, computed in a single pass so the
/// presentation layer reads one struct per cell.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SlotView {
    pub slot: SlotRef,
    pub available: bool,
    pub booked: bool,
    pub gap: bool,
    pub boundary: bool,
    pub can_be_start: bool,
    pub can_be_end: bool,
    pub in_selected_range: bool,
    pub before_start: bool,
    pub after_first_unavailable: bool,
    pub past: bool,
    pub pre_selected: bool,
}

/// Computes per-slot predicates over the two displayed days. All ordering
/// questions are answered on the unified timeline index (current-day hours
/// 0..=24, next-day hours 24..=48) instead of per-day branching.
pub struct SlotClassifier<'a> {
    window: &'a SlotWindow,
    selection: &'a SelectionState,
    pre_selected: &'a HashSet<SlotRef>,
    today: NaiveDate,
    now: NaiveDateTime,
    past_buffer: Duration,
}

impl<'a> SlotClassifier<'a> {
    pub fn new(
        window: &'a SlotWindow,
        selection: &'a SelectionState,
        pre_selected: &'a HashSet<SlotRef>,
        today: NaiveDate,
        now: NaiveDateTime,
        past_buffer: Duration,
    ) -> Self {
        Self {
            window,
            selection,
            pre_selected,
            today,
            now,
            past_buffer,
        }
    }

    /// Availability at a unified timeline index. Index 24 is the next day's
    /// 00:00 (the current day's 24:00 sentinel is the same instant and has no
    /// index of its own); index 48, the next day's sentinel, is never free.
    fn timeline_available(&self, index: u32) -> bool {
        if index < HOURS_PER_DAY {
            self.is_available(SlotRef::current(index))
        } else if index < 2 * HOURS_PER_DAY {
            self.is_available(SlotRef::next(index - HOURS_PER_DAY))
        } else {
            false
        }
    }

    pub fn is_pre_selected(&self, slot: SlotRef) -> bool {
        self.pre_selected.contains(&slot)
    }

    /// Edit-mode carve-out wins: the booking being edited must not block its
    /// own re-selection.
    pub fn is_available(&self, slot: SlotRef) -> bool {
        if self.is_pre_selected(slot) {
            return true;
        }
        if slot.is_day_end() {
            return false;
        }
        self.window.day(slot.context).is_available(slot.hour)
    }

    pub fn is_booked(&self, slot: SlotRef) -> bool {
        !slot.is_day_end()
            && !self.is_pre_selected(slot)
            && self.window.day(slot.context).status(slot.hour) == SlotStatus::Booked
    }

    pub fn is_gap(&self, slot: SlotRef) -> bool {
        !self.is_pre_selected(slot)
            && (slot.is_day_end()
                || self.window.day(slot.context).status(slot.hour) == SlotStatus::Gap)
    }

    /// Covers both explicit bookings and schedule gaps; the two causes render
    /// differently but block selection identically.
    pub fn is_unavailable(&self, slot: SlotRef) -> bool {
        !self.is_available(slot)
    }

    /// Exclusive upper edge of a free block: unavailable itself but preceded
    /// by an available hour on the same day. Eligible as an end, never as a
    /// start. The sentinel 24:00 is a boundary whenever 23:00 is free.
    pub fn is_boundary(&self, slot: SlotRef) -> bool {
        if self.is_available(slot) || slot.hour == 0 {
            return false;
        }
        self.is_available(SlotRef::new(slot.context, slot.hour - 1))
    }

    pub fn is_past(&self, slot: SlotRef) -> bool {
        if slot.context != DayContext::Current || self.window.requested_for != self.today {
            return false;
        }
        slot.instant(self.window.requested_for) <= self.now + self.past_buffer
    }

    /// Plain availability; boundaries are never valid starts, nor is the
    /// sentinel, nor anything already past.
    pub fn can_be_start(&self, slot: SlotRef) -> bool {
        !slot.is_day_end() && self.is_available(slot) && !self.is_past(slot)
    }

    /// End-validity against the already-chosen start, evaluated on the
    /// unified timeline: the candidate must lie strictly after the start,
    /// every real slot strictly between them must be available, and the
    /// candidate itself must be available or a boundary.
    pub fn can_be_end(&self, slot: SlotRef) -> bool {
        match self.selection.start() {
            // Irrelevant without a start; an end cannot be chosen yet.
            None => self.is_available(slot),
            Some(start) => self.is_valid_end_for(start, slot),
        }
    }

    pub(crate) fn is_valid_end_for(&self, start: SlotRef, candidate: SlotRef) -> bool {
        let s = start.timeline_index();
        let e = candidate.timeline_index();
        if e <= s {
            // Time may not run backward, including next-day starts with
            // current-day candidates.
            return false;
        }
        // Crossing midnight requires the whole current-day remainder free;
        // on the unified timeline that is just part of the in-between scan.
        for index in (s + 1)..e {
            if !self.timeline_available(index) {
                return false;
            }
        }
        self.is_available(candidate) || self.is_boundary(candidate)
    }

    /// Highlight band between the resolved endpoints: strict when both lie on
    /// the current day, inclusive once the range touches the next day.
    pub fn in_selected_range(&self, slot: SlotRef) -> bool {
        let (Some(start), Some(end)) = (self.selection.start(), self.selection.end()) else {
            return false;
        };
        let i = slot.timeline_index();
        let s = start.timeline_index();
        let e = end.timeline_index();
        if start.context == DayContext::Current && end.context == DayContext::Current {
            s < i && i < e
        } else {
            s <= i && i <= e
        }
    }

    /// Grays out slots that precede the chosen start while an end is still
    /// being picked.
    pub fn is_before_start(&self, slot: SlotRef) -> bool {
        match self.selection {
            SelectionState::StartChosen { start } => {
                slot.timeline_index() < start.timeline_index()
            }
            _ => false,
        }
    }

    /// Grays out slots past the first unavailable hour after the chosen
    /// start, which the end-validation would reject anyway. A start in the
    /// last hour of its day is exempt so next-day slots stay reachable.
    pub fn is_after_first_unavailable(&self, slot: SlotRef) -> bool {
        let SelectionState::StartChosen { start } = self.selection else {
            return false;
        };
        if start.hour >= HOURS_PER_DAY - 1 {
            return false;
        }
        let day_end = start.context.timeline_offset() + DAY_END_HOUR;
        let first_unavailable = ((start.timeline_index() + 1)..day_end)
            .find(|&index| !self.timeline_available(index));
        match first_unavailable {
            Some(u) => slot.timeline_index() > u,
            None => false,
        }
    }

    /// All predicates for one slot.
    pub fn classify(&self, slot: SlotRef) -> SlotView {
        SlotView {
            slot,
            available: self.is_available(slot),
            booked: self.is_booked(slot),
            gap: self.is_gap(slot),
            boundary: self.is_boundary(slot),
            can_be_start: self.can_be_start(slot),
            can_be_end: self.can_be_end(slot),
            in_selected_range: self.in_selected_range(slot),
            before_start: self.is_before_start(slot),
            after_first_unavailable: self.is_after_first_unavailable(slot),
            past: self.is_past(slot),
            pre_selected: self.is_pre_selected(slot),
        }
    }

    /// Views for the 24 rendered hours of one day. The 24:00 sentinel is not
    /// rendered; callers classify it directly when offering "book through
    /// midnight".
    pub fn views_for(&self, context: DayContext) -> Vec<SlotView> {
        (0..HOURS_PER_DAY)
            .map(|hour| self.classify(SlotRef::new(context, hour)))
            .collect()
    }
}
