use std::collections::HashSet;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use tracing::{debug, info};

use crate::config::Config;
use crate::domain::models::selection::{ClickOutcome, SelectedRange, SelectionState, Warning};
use crate::domain::models::slot::{SlotRef, SlotWindow};
use crate::domain::services::classifier::SlotClassifier;

/// Drives the Empty -> StartChosen -> RangeComplete state machine over slot
/// clicks. Invalid clicks never mutate state and never error; the only
/// user-visible feedback is an ephemeral warning.
pub struct SelectionEngine {
    state: SelectionState,
    pre_selected: HashSet<SlotRef>,
    warning: Option<Warning>,
    warning_ttl: Duration,
    past_buffer: Duration,
}

impl SelectionEngine {
    pub fn new(config: &Config) -> Self {
        Self {
            state: SelectionState::Empty,
            pre_selected: HashSet::new(),
            warning: None,
            warning_ttl: Duration::seconds(config.warning_ttl_secs),
            past_buffer: Duration::minutes(config.past_buffer_mins),
        }
    }

    /// Seeds the edit-mode carve-out: hours occupied by the booking being
    /// edited always classify as available.
    pub fn with_pre_selected(mut self, slots: impl IntoIterator<Item = SlotRef>) -> Self {
        self.pre_selected = slots.into_iter().collect();
        self
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn pre_selected(&self) -> &HashSet<SlotRef> {
        &self.pre_selected
    }

    /// The completed range, if both endpoints are set.
    pub fn selected_range(&self, window: &SlotWindow) -> Option<SelectedRange> {
        match self.state {
            SelectionState::RangeComplete { start, end } => Some(SelectedRange {
                date: window.requested_for,
                start,
                end,
            }),
            _ => None,
        }
    }

    pub fn classifier<'a>(
        &'a self,
        window: &'a SlotWindow,
        today: NaiveDate,
        now: NaiveDateTime,
    ) -> SlotClassifier<'a> {
        SlotClassifier::new(
            window,
            &self.state,
            &self.pre_selected,
            today,
            now,
            self.past_buffer,
        )
    }

    /// Feeds one slot click through the state machine.
    pub fn click(
        &mut self,
        slot: SlotRef,
        window: &SlotWindow,
        today: NaiveDate,
        now: NaiveDateTime,
    ) -> ClickOutcome {
        let outcome = self.evaluate_click(slot, window, today, now);
        match &outcome {
            ClickOutcome::StartSelected(s) => {
                info!("Range start selected: {:?} {}", s.context, s.label());
                self.state = SelectionState::StartChosen { start: *s };
            }
            ClickOutcome::Cleared => {
                info!("Selection toggled off");
                self.state = SelectionState::Empty;
            }
            ClickOutcome::RangeCompleted(range) => {
                info!(
                    "Range completed: {} on {}",
                    range.time_range_label(),
                    range.date
                );
                self.state = SelectionState::RangeComplete {
                    start: range.start,
                    end: range.end,
                };
            }
            ClickOutcome::Rejected(message) => {
                debug!("Click rejected: {}", message);
                self.warning = Some(Warning::new(message.clone(), now, self.warning_ttl));
            }
            ClickOutcome::Ignored => {
                debug!("Ignored click on {:?} {}", slot.context, slot.label());
            }
        }
        outcome
    }

    fn evaluate_click(
        &self,
        slot: SlotRef,
        window: &SlotWindow,
        today: NaiveDate,
        now: NaiveDateTime,
    ) -> ClickOutcome {
        let classifier = self.classifier(window, today, now);

        match self.state {
            SelectionState::StartChosen { start } => {
                if slot == start {
                    return ClickOutcome::Cleared;
                }
                if classifier.is_valid_end_for(start, slot) {
                    return ClickOutcome::RangeCompleted(SelectedRange {
                        date: window.requested_for,
                        start,
                        end: slot,
                    });
                }
                ClickOutcome::Ignored
            }
            // A click on a completed range starts over, discarding the old
            // range first.
            SelectionState::Empty | SelectionState::RangeComplete { .. } => {
                if classifier.can_be_start(slot) {
                    return ClickOutcome::StartSelected(slot);
                }
                if classifier.is_boundary(slot) && !classifier.is_past(slot) {
                    return ClickOutcome::Rejected(
                        "This slot can only be selected as an end time".to_string(),
                    );
                }
                ClickOutcome::Ignored
            }
        }
    }

    /// Unconditional return to Empty from any state.
    pub fn reset(&mut self) {
        debug!("Selection reset");
        self.state = SelectionState::Empty;
    }

    /// The current warning, if it has not yet expired. A newer warning
    /// replaces the old one and restarts its timer.
    pub fn active_warning(&self, now: NaiveDateTime) -> Option<&Warning> {
        self.warning.as_ref().filter(|w| !w.is_expired(now))
    }

    pub fn clear_warning(&mut self) {
        self.warning = None;
    }
}
