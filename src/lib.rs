mod consts;
mod grid;
mod prelude;
mod selection;
mod types;

pub use consts::*;
pub use grid::{CalendarMonth, CalendarWindow, Week, WindowError};
pub use selection::{DateRangeSelection, Direction};
pub use types::{Day, Month, Year};

use crate::prelude::*;
use std::str::FromStr;
use types::{days_in_month, is_leap_year};

/// A concrete calendar date.
/// Totally ordered by (year, month, day); carries no meaning beyond
/// identity and ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{:04}-{:02}-{:02}", "year.get()", "month.get()", "day.get()")]
pub struct CalendarDay {
    year: types::Year,
    month: types::Month,
    day: types::Day,
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum DateError {
    #[display(fmt = "Invalid date format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Invalid year: {} (must be 1-{})", "_0", MAX_YEAR)]
    InvalidYear(u16),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(u8),
    #[display(fmt = "Invalid day {day} for month {year}-{month:02}")]
    InvalidDay { month: u8, day: u8, year: u16 },
    #[display(fmt = "Empty date string")]
    EmptyInput,
}

impl std::error::Error for DateError {}

impl CalendarDay {
    /// Creates a date from already-validated components
    pub const fn new(year: types::Year, month: types::Month, day: types::Day) -> Self {
        Self { year, month, day }
    }

    /// Creates a date from raw components, validating each
    ///
    /// # Errors
    /// Returns the first failing component's `DateError`.
    pub fn from_ymd(year: u16, month: u8, day: u8) -> Result<Self, DateError> {
        let year_nz = types::Year::new(year)?;
        let month_nz = types::Month::new(month)?;
        let day_nz = types::Day::new(day, year, month)?;
        Ok(Self {
            year: year_nz,
            month: month_nz,
            day: day_nz,
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

    /// Returns the day-of-month component (as u8 for convenience)
    pub const fn day(&self) -> u8 {
        self.day.get()
    }

    /// Returns the Year type
    pub const fn year_typed(&self) -> types::Year {
        self.year
    }

    /// Returns the Month type
    pub const fn month_typed(&self) -> types::Month {
        self.month
    }

    /// Days elapsed since 0001-01-01 in the proleptic Gregorian calendar.
    /// 0001-01-01 is ordinal 0.
    pub const fn ordinal(&self) -> u32 {
        let y = self.year.get() as u32 - 1;
        let mut days = y * 365 + y / 4 - y / 100 + y / 400;
        days += DAYS_BEFORE_MONTH[self.month.get() as usize] as u32;
        if self.month.get() > FEBRUARY && is_leap_year(self.year.get()) {
            days += 1;
        }
        days + self.day.get() as u32 - 1
    }

    /// Day of week as an index: 0 = Monday .. 6 = Sunday.
    /// Ordinal 0 (0001-01-01) is a Monday.
    pub const fn weekday_index(&self) -> u8 {
        (self.ordinal() % DAYS_PER_WEEK as u32) as u8
    }

    /// The next calendar day, or `None` past `MAX_YEAR`
    pub fn succ(self) -> Option<Self> {
        let (y, m, d) = (self.year.get(), self.month.get(), self.day.get());
        if d < days_in_month(y, m) {
            return Self::from_ymd(y, m, d + 1).ok();
        }
        // roll to first of next month (respects MAX_YEAR limit)
        if m == DECEMBER {
            if y >= MAX_YEAR {
                None
            } else {
                Self::from_ymd(y + 1, JANUARY, MIN_DAY).ok()
            }
        } else {
            Self::from_ymd(y, m + 1, MIN_DAY).ok()
        }
    }

    /// The previous calendar day, or `None` before 0001-01-01
    pub fn pred(self) -> Option<Self> {
        let (y, m, d) = (self.year.get(), self.month.get(), self.day.get());
        if d > MIN_DAY {
            return Self::from_ymd(y, m, d - 1).ok();
        }
        if m == JANUARY {
            if y == 1 {
                None
            } else {
                Self::from_ymd(y - 1, DECEMBER, DAYS_IN_MONTH[DECEMBER as usize]).ok()
            }
        } else {
            Self::from_ymd(y, m - 1, days_in_month(y, m - 1)).ok()
        }
    }

    /// The date `days` days later, or `None` past `MAX_YEAR`
    pub fn checked_add_days(self, days: u16) -> Option<Self> {
        let mut day = self;
        for _ in 0..days {
            day = day.succ()?;
        }
        Some(day)
    }

    /// Inclusive-exclusive distance in days to a later date.
    /// Saturates at 0 when `later` precedes `self`.
    pub const fn days_until(&self, later: &Self) -> u32 {
        later.ordinal().saturating_sub(self.ordinal())
    }

    /// Short presentation label, e.g. `"Jan 05"`
    pub fn short_label(&self) -> String {
        format!(
            "{} {:02}",
            MONTH_ABBREV[self.month.get() as usize],
            self.day.get()
        )
    }
}

impl FromStr for CalendarDay {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(DateError::EmptyInput);
        }

        // Strict ISO format: YYYY-MM-DD only
        let parts: Vec<&str> = trimmed.split(DATE_SEPARATOR).map(|p| p.trim()).collect();
        if parts.len() != 3 {
            return Err(DateError::InvalidFormat(format!(
                "Expected YYYY{sep}MM{sep}DD, found {} {sep} separators",
                parts.len() - 1,
                sep = DATE_SEPARATOR,
            )));
        }

        let year = parse_u16(parts[0])?;
        let month = parse_u8(parts[1])?;
        let day = parse_u8(parts[2])?;

        Self::from_ymd(year, month, day)
    }
}

/// Helper to parse u16 with better error messages
fn parse_u16(s: &str) -> Result<u16, DateError> {
    s.parse::<u16>()
        .map_err(|_| DateError::InvalidFormat(s.to_owned()))
}

/// Helper to parse u8 with better error messages
fn parse_u8(s: &str) -> Result<u8, DateError> {
    s.parse::<u8>()
        .map_err(|_| DateError::InvalidFormat(s.to_owned()))
}

impl TryFrom<(u16, u8, u8)> for CalendarDay {
    type Error = DateError;

    fn try_from(value: (u16, u8, u8)) -> Result<Self, Self::Error> {
        Self::from_ymd(value.0, value.1, value.2)
    }
}

impl serde::Serialize for CalendarDay {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for CalendarDay {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
