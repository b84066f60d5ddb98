/// Maximum valid year (inclusive)
pub const MAX_YEAR: u16 = 9999;

/// Maximum valid month (December)
pub const MAX_MONTH: u8 = 12;

/// First day of month, used for month starts
pub const MIN_DAY: u8 = 1;

/// Month number for January
pub const JANUARY: u8 = 1;
/// Month number for February
pub const FEBRUARY: u8 = 2;
/// Month number for December
pub const DECEMBER: u8 = 12;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Days in a calendar week row
pub const DAYS_PER_WEEK: u8 = 7;

/// Extra years covered by the default picker window beyond its first year
pub const WINDOW_YEARS: u16 = 2;

/// Maximum days in each month (index 0 is unused, months are 1-indexed)
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [u8; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // January
    28, // February (non-leap, adjusted by is_leap_year check)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Days elapsed before each month in a non-leap year
/// (index 0 unused; leap years add one from March onward)
pub(crate) const DAYS_BEFORE_MONTH: [u16; 13] =
    [0, 0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

/// Three-letter month labels used by selection labels (index 0 unused)
pub const MONTH_ABBREV: [&str; 13] = [
    "", "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: u16 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: u16 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: u16 = 400;

/// Date component separator (ISO 8601 format)
pub const DATE_SEPARATOR: char = '-';
/// Separator between the two ends of a selection label
pub const LABEL_SEPARATOR: &str = " - ";
