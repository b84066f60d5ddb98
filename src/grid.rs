use serde::{Deserialize, Serialize};

use crate::prelude::*;
use crate::types::{Day, Month, Year};
use crate::{CalendarDay, DateError, DAYS_PER_WEEK, DECEMBER, WINDOW_YEARS};

/// Identity of a single month in a specific year.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize,
)]
#[display(fmt = "{:04}-{:02}", "year.get()", "month.get()")]
pub struct CalendarMonth {
    year: Year,
    month: Month,
}

impl CalendarMonth {
    /// Creates a month identity from already-validated components
    pub const fn new(year: Year, month: Month) -> Self {
        Self { year, month }
    }

    /// Creates a month identity from raw components, validating each
    ///
    /// # Errors
    /// Returns the first failing component's `DateError`.
    pub fn from_ym(year: u16, month: u8) -> Result<Self, DateError> {
        Ok(Self {
            year: Year::new(year)?,
            month: Month::new(month)?,
        })
    }

    /// Returns the year component (as u16 for convenience)
    pub const fn year(&self) -> u16 {
        self.year.get()
    }

    /// Returns the month component (as u8 for convenience)
    pub const fn month(&self) -> u8 {
        self.month.get()
    }

    /// Returns the Year type
    pub const fn year_typed(&self) -> Year {
        self.year
    }

    /// Whether `day` belongs to this month
    pub const fn contains(&self, day: CalendarDay) -> bool {
        day.year() == self.year.get() && day.month() == self.month.get()
    }

    /// First day of the month
    pub const fn first_day(&self) -> CalendarDay {
        CalendarDay::new(self.year, self.month, Day::FIRST)
    }

    /// Last day of the month
    pub const fn last_day(&self) -> CalendarDay {
        let day = Day::last(self.year.get(), self.month.get());
        CalendarDay::new(self.year, self.month, day)
    }

    /// Number of days in the month
    pub const fn len(&self) -> u8 {
        self.last_day().day()
    }

    /// A month always holds at least 28 days; present for clippy's
    /// `len`/`is_empty` pairing.
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// The following month, or `None` past `MAX_YEAR`
    pub fn succ(self) -> Option<Self> {
        if self.month.get() == DECEMBER {
            Some(Self {
                year: self.year.checked_add(1)?,
                month: Month::JANUARY,
            })
        } else {
            Some(Self {
                year: self.year,
                month: Month::new(self.month.get() + 1).ok()?,
            })
        }
    }

    /// The week rows covering this month, in order. The first row starts
    /// on the Monday on or before the 1st, so edge rows spill into the
    /// neighboring months.
    pub fn weeks(&self) -> Vec<Week> {
        let first = self.first_day();
        let last = self.last_day();

        let mut start = first;
        for _ in 0..first.weekday_index() {
            match start.pred() {
                Some(prev) => start = prev,
                None => break,
            }
        }

        let mut weeks = Vec::new();
        let mut cursor = Some(start);
        while let Some(week_start) = cursor {
            if week_start > last {
                break;
            }
            weeks.push(Week {
                start: week_start,
                month: *self,
            });
            cursor = week_start.checked_add_days(DAYS_PER_WEEK as u16);
        }
        weeks
    }
}

/// One row of a month grid: 7 consecutive days starting on a Monday,
/// tagged with the month whose grid it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Week {
    start: CalendarDay,
    month: CalendarMonth,
}

impl Week {
    /// First day of the row (may precede the month it renders)
    pub const fn start(&self) -> CalendarDay {
        self.start
    }

    /// The month this row belongs to
    pub const fn month(&self) -> CalendarMonth {
        self.month
    }

    /// The days of the row, in order. Short of 7 only when the row runs
    /// off the end of the representable calendar.
    pub fn days(&self) -> impl Iterator<Item = CalendarDay> {
        std::iter::successors(Some(self.start), |day| day.succ()).take(DAYS_PER_WEEK as usize)
    }
}

/// Error type for calendar window construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WindowError {
    /// Start year is after end year.
    #[error("Invalid calendar window: start year ({start}) is after end year ({end})")]
    InvalidWindow { start: Year, end: Year },

    /// Error validating a year component.
    #[error(transparent)]
    Date(#[from] DateError),
}

/// An inclusive span of whole years whose months feed a calendar grid.
/// The selector itself is agnostic to the window; this is the generator
/// a picker uses to enumerate what it renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarWindow {
    start_year: Year,
    end_year: Year,
}

impl CalendarWindow {
    /// Creates a window spanning `start_year..=end_year`.
    ///
    /// # Errors
    /// Returns `WindowError::InvalidWindow` if `start_year > end_year`.
    pub fn new(start_year: Year, end_year: Year) -> Result<Self, WindowError> {
        if start_year > end_year {
            return Err(WindowError::InvalidWindow {
                start: start_year,
                end: end_year,
            });
        }
        Ok(Self {
            start_year,
            end_year,
        })
    }

    /// The default picker window: `year` January 1st through two years
    /// later December 31st.
    ///
    /// # Errors
    /// Returns `WindowError` if the window would run past `MAX_YEAR`.
    pub fn from_year(year: Year) -> Result<Self, WindowError> {
        let end_year = year
            .checked_add(WINDOW_YEARS)
            .ok_or(DateError::InvalidYear(
                year.get().saturating_add(WINDOW_YEARS),
            ))?;
        Self::new(year, end_year)
    }

    /// Returns the first year of the window
    pub const fn start_year(&self) -> Year {
        self.start_year
    }

    /// Returns the last year of the window (inclusive)
    pub const fn end_year(&self) -> Year {
        self.end_year
    }

    /// Enumerates every month of the window in chronological order
    pub fn months(&self) -> impl Iterator<Item = CalendarMonth> {
        let end_year = self.end_year;
        std::iter::successors(
            Some(CalendarMonth::new(self.start_year, Month::JANUARY)),
            |month| month.succ(),
        )
        .take_while(move |month| month.year_typed() <= end_year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(year: u16, month: u8, day: u8) -> CalendarDay {
        CalendarDay::from_ymd(year, month, day).unwrap()
    }

    fn year(value: u16) -> Year {
        Year::new(value).unwrap()
    }

    #[test]
    fn test_month_identity() {
        let month = CalendarMonth::from_ym(2024, 6).unwrap();
        assert_eq!(month.year(), 2024);
        assert_eq!(month.month(), 6);
        assert_eq!(month.to_string(), "2024-06");
    }

    #[test]
    fn test_month_from_ym_validation() {
        assert!(matches!(
            CalendarMonth::from_ym(2024, 13),
            Err(DateError::InvalidMonth(13))
        ));
        assert!(matches!(
            CalendarMonth::from_ym(0, 6),
            Err(DateError::InvalidYear(0))
        ));
    }

    #[test]
    fn test_month_bounds() {
        let feb = CalendarMonth::from_ym(2024, 2).unwrap();
        assert_eq!(feb.first_day(), d(2024, 2, 1));
        assert_eq!(feb.last_day(), d(2024, 2, 29));
        assert_eq!(feb.len(), 29);

        let feb = CalendarMonth::from_ym(2023, 2).unwrap();
        assert_eq!(feb.last_day(), d(2023, 2, 28));
    }

    #[test]
    fn test_month_contains() {
        let june = CalendarMonth::from_ym(2024, 6).unwrap();
        assert!(june.contains(d(2024, 6, 1)));
        assert!(june.contains(d(2024, 6, 30)));
        assert!(!june.contains(d(2024, 5, 31)));
        assert!(!june.contains(d(2023, 6, 15)));
    }

    #[test]
    fn test_month_succ() {
        let nov = CalendarMonth::from_ym(2024, 11).unwrap();
        assert_eq!(nov.succ(), CalendarMonth::from_ym(2024, 12).ok());

        let dec = CalendarMonth::from_ym(2024, 12).unwrap();
        assert_eq!(dec.succ(), CalendarMonth::from_ym(2025, 1).ok());

        let last = CalendarMonth::from_ym(9999, 12).unwrap();
        assert_eq!(last.succ(), None);
    }

    #[test]
    fn test_weeks_start_on_monday() {
        let june = CalendarMonth::from_ym(2024, 6).unwrap();
        let weeks = june.weeks();
        // June 2024 starts on a Saturday; the grid opens on Mon May 27
        assert_eq!(weeks[0].start(), d(2024, 5, 27));
        for week in &weeks {
            assert_eq!(week.start().weekday_index(), 0);
            assert_eq!(week.month(), june);
        }
    }

    #[test]
    fn test_weeks_cover_month_exactly_once() {
        let june = CalendarMonth::from_ym(2024, 6).unwrap();
        let weeks = june.weeks();
        assert_eq!(weeks.len(), 5);

        let in_month: Vec<CalendarDay> = weeks
            .iter()
            .flat_map(Week::days)
            .filter(|day| june.contains(*day))
            .collect();
        assert_eq!(in_month.len(), 30);
        assert_eq!(in_month[0], d(2024, 6, 1));
        assert_eq!(in_month[29], d(2024, 6, 30));
    }

    #[test]
    fn test_weeks_six_row_month() {
        // September 2024 starts on a Sunday and has 30 days: 6 rows
        let sep = CalendarMonth::from_ym(2024, 9).unwrap();
        assert_eq!(sep.weeks().len(), 6);
    }

    #[test]
    fn test_week_days_iterate_seven() {
        let june = CalendarMonth::from_ym(2024, 6).unwrap();
        let week = june.weeks()[0];
        let days: Vec<CalendarDay> = week.days().collect();
        assert_eq!(days.len(), 7);
        assert_eq!(days[0], d(2024, 5, 27));
        assert_eq!(days[6], d(2024, 6, 2));
    }

    #[test]
    fn test_window_new_validation() {
        assert!(CalendarWindow::new(year(2024), year(2026)).is_ok());
        assert!(CalendarWindow::new(year(2024), year(2024)).is_ok());

        let result = CalendarWindow::new(year(2026), year(2024));
        assert!(matches!(result, Err(WindowError::InvalidWindow { .. })));
    }

    #[test]
    fn test_window_from_year() {
        let window = CalendarWindow::from_year(year(2024)).unwrap();
        assert_eq!(window.start_year().get(), 2024);
        assert_eq!(window.end_year().get(), 2026);
    }

    #[test]
    fn test_window_from_year_at_limit() {
        assert!(CalendarWindow::from_year(year(9997)).is_ok());
        let result = CalendarWindow::from_year(year(9998));
        assert!(matches!(result, Err(WindowError::Date(_))));
    }

    #[test]
    fn test_window_months() {
        let window = CalendarWindow::from_year(year(2024)).unwrap();
        let months: Vec<CalendarMonth> = window.months().collect();
        assert_eq!(months.len(), 36);
        assert_eq!(months[0], CalendarMonth::from_ym(2024, 1).unwrap());
        assert_eq!(months[35], CalendarMonth::from_ym(2026, 12).unwrap());
    }

    #[test]
    fn test_window_months_single_year() {
        let window = CalendarWindow::new(year(2024), year(2024)).unwrap();
        assert_eq!(window.months().count(), 12);
    }

    #[test]
    fn test_window_serde() {
        let window = CalendarWindow::from_year(year(2024)).unwrap();
        let json = serde_json::to_string(&window).unwrap();
        let parsed: CalendarWindow = serde_json::from_str(&json).unwrap();
        assert_eq!(window, parsed);
    }
}
