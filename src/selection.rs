use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::grid::CalendarMonth;
use crate::{CalendarDay, DAYS_PER_WEEK, LABEL_SEPARATOR};

/// Which way the most recent range extension moved relative to the
/// prior anchor: toward earlier dates or toward later ones.
/// Consumed by presentation code to decide which edge of a week row
/// the highlight enters from; inert otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Backward,
    Forward,
}

/// The current day-range selection: nothing, a single anchor day, or a
/// closed range with both ends populated.
///
/// A selection is a plain value. [`DateRangeSelection::select_day`]
/// consumes the current value and returns the next one; the caller owns
/// storage and publication. Whenever `end_date` is present, `start_date`
/// is present too and `start_date <= end_date`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRangeSelection {
    start_date: Option<CalendarDay>,
    end_date: Option<CalendarDay>,
    last_direction: Option<Direction>,
}

impl DateRangeSelection {
    /// The empty selection
    pub const fn empty() -> Self {
        Self {
            start_date: None,
            end_date: None,
            last_direction: None,
        }
    }

    /// Returns the selection start, if any
    pub const fn start_date(&self) -> Option<CalendarDay> {
        self.start_date
    }

    /// Returns the selection end, if any
    pub const fn end_date(&self) -> Option<CalendarDay> {
        self.end_date
    }

    /// Which way the last range extension moved, if any extension happened
    pub const fn last_direction(&self) -> Option<Direction> {
        self.last_direction
    }

    /// Applies a click on `clicked` and returns the next selection.
    ///
    /// Empty selections anchor at the clicked day. An anchored selection
    /// closes into a range around the anchor, or stays put when the
    /// anchor itself is clicked again. A closed range is discarded and
    /// the procedure re-applied against the cleared selection, so the
    /// clicked day becomes a fresh anchor while the direction computed
    /// during the discard is carried over.
    ///
    /// Total for every `CalendarDay` in every state; the result always
    /// satisfies `start_date <= end_date` when both are present.
    #[must_use]
    pub fn select_day(self, clicked: CalendarDay) -> Self {
        match (self.start_date, self.end_date) {
            // Nothing selected: the clicked day becomes the anchor.
            // Any direction left over from a prior discard is kept.
            (None, None) => Self {
                start_date: Some(clicked),
                end_date: None,
                last_direction: self.last_direction,
            },
            // Closed range: discard it, remembering which side of the old
            // start the click landed on, then re-run against the cleared
            // selection. The recursion is deliberate: the direction set
            // here must survive into the new anchor state.
            (Some(start), Some(_)) => {
                let direction = if clicked < start {
                    Direction::Backward
                } else {
                    Direction::Forward
                };
                let cleared = Self {
                    start_date: None,
                    end_date: None,
                    last_direction: Some(direction),
                };
                cleared.select_day(clicked)
            }
            // Anchored: close the range around the anchor, or no-op on
            // the anchor itself.
            (Some(anchor), None) => Self::close_around(self, anchor, clicked),
            // End without start violates the selection invariant; no
            // transition sequence produces it. Handled symmetrically to
            // the anchored case with the end date as the anchor.
            (None, Some(anchor)) => {
                debug_assert!(false, "selection has an end date but no start date");
                Self::close_around(self, anchor, clicked)
            }
        }
    }

    fn close_around(self, anchor: CalendarDay, clicked: CalendarDay) -> Self {
        match clicked.cmp(&anchor) {
            Ordering::Less => Self {
                start_date: Some(clicked),
                end_date: Some(anchor),
                last_direction: Some(Direction::Backward),
            },
            Ordering::Greater => Self {
                start_date: Some(anchor),
                end_date: Some(clicked),
                last_direction: Some(Direction::Forward),
            },
            Ordering::Equal => self,
        }
    }

    /// Number of days in the selection, as a fraction-friendly float:
    /// 0 when empty, 1 for a lone anchor, the inclusive day count for a
    /// closed range. Float because callers scale highlight widths by it.
    pub fn num_selected_days(&self) -> f32 {
        let Some(start) = self.start_date else {
            return 0.0;
        };
        match self.end_date {
            None => 1.0,
            Some(end) => (start.days_until(&end) + 1) as f32,
        }
    }

    /// Whether `day` falls inside the current selection
    pub fn is_selected(&self, day: CalendarDay) -> bool {
        let Some(start) = self.start_date else {
            return false;
        };
        if day == start {
            return true;
        }
        match self.end_date {
            None => false,
            Some(end) => start <= day && day <= end,
        }
    }

    /// Whether the selection intersects the closed interval
    /// `[start, end]`. A selection whose start coincides with `start`
    /// or whose end coincides with `end` counts as touching even when
    /// the rest of the interval misses.
    pub fn overlaps(&self, start: CalendarDay, end: CalendarDay) -> bool {
        let Some(sel_start) = self.start_date else {
            return false;
        };
        if sel_start == start || self.end_date == Some(end) {
            return true;
        }
        match self.end_date {
            None => start <= sel_start && sel_start <= end,
            Some(sel_end) => !(end < sel_start || start > sel_end),
        }
    }

    /// How many of the 7 days starting at `week_start` are both selected
    /// and part of `month`. Sizes the per-row highlight bar in a month
    /// grid, where edge weeks spill into neighboring months.
    pub fn selected_count_in_week(&self, week_start: CalendarDay, month: CalendarMonth) -> u32 {
        std::iter::successors(Some(week_start), |day| day.succ())
            .take(DAYS_PER_WEEK as usize)
            .filter(|day| self.is_selected(*day) && month.contains(*day))
            .count() as u32
    }

    /// Human-readable summary of the selection: empty when nothing is
    /// selected, `"Jan 05"` for a lone anchor, `"Jan 05 - Jan 10"` for
    /// a closed range.
    pub fn label(&self) -> String {
        let Some(start) = self.start_date else {
            return String::new();
        };
        let mut label = start.short_label();
        if let Some(end) = self.end_date {
            label.push_str(LABEL_SEPARATOR);
            label.push_str(&end.short_label());
        }
        label
    }
}
