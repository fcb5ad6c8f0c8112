use crate::PartError;
use crate::consts::{MAX_DAY, MAX_HOUR_12, MAX_MONTH, MAX_YEAR, MINUTES_PER_HOUR, MINUTE_STEP};
use crate::convert::{meridiem_of, round_up_time, to_12_hr, to_24_hr};
use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::{NonZeroU8, NonZeroU16};
use std::str::FromStr;

/// An hour on a 12-hour clock face, guaranteed to be in `1..=12`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Hour(NonZeroU8);

impl Hour {
    /// Creates a new Hour, validating that it's non-zero and <= `MAX_HOUR_12`
    ///
    /// # Errors
    /// Returns `PartError::InvalidHour` if the value is 0 or > 12.
    pub fn new(value: u8) -> Result<Self, PartError> {
        let non_zero = NonZeroU8::new(value).ok_or(PartError::InvalidHour(value))?;
        if value > MAX_HOUR_12 {
            return Err(PartError::InvalidHour(value));
        }
        Ok(Self(non_zero))
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl TryFrom<u8> for Hour {
    type Error = PartError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Hour> for u8 {
    fn from(hour: Hour) -> Self {
        hour.0.get()
    }
}

impl fmt::Display for Hour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A minute on the dropdown grid: a multiple of `MINUTE_STEP` below 60
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Minute(u8);

impl Minute {
    /// # Errors
    /// Returns `PartError::InvalidMinute` if the value is >= 60 or off the five-minute grid.
    pub fn new(value: u8) -> Result<Self, PartError> {
        if value >= MINUTES_PER_HOUR || value % MINUTE_STEP != 0 {
            return Err(PartError::InvalidMinute(value));
        }
        Ok(Self(value))
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Minute {
    type Error = PartError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Minute> for u8 {
    fn from(minute: Minute) -> Self {
        minute.0
    }
}

impl fmt::Display for Minute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The am/pm half of a 12-hour time
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Meridiem {
    Am,
    Pm,
}

impl Meridiem {
    /// Value submitted by the dropdown (`am` / `pm`)
    pub const fn value(self) -> &'static str {
        match self {
            Self::Am => "am",
            Self::Pm => "pm",
        }
    }

    /// Label shown in the dropdown (`AM` / `PM`)
    pub const fn label(self) -> &'static str {
        match self {
            Self::Am => "AM",
            Self::Pm => "PM",
        }
    }
}

impl FromStr for Meridiem {
    type Err = PartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "am" => Ok(Self::Am),
            "pm" => Ok(Self::Pm),
            _ => Err(PartError::InvalidMeridiem(s.to_owned())),
        }
    }
}

impl fmt::Display for Meridiem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

/// A month value guaranteed to be in the range `1..=MAX_MONTH` (1..=12)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Month(NonZeroU8);

impl Month {
    /// Creates a new Month, validating that it's non-zero and <= `MAX_MONTH`
    ///
    /// # Errors
    /// Returns `PartError::InvalidMonth` if the value is 0 or > `MAX_MONTH`.
    pub fn new(value: u8) -> Result<Self, PartError> {
        let non_zero = NonZeroU8::new(value).ok_or(PartError::InvalidMonth(value))?;
        if value > MAX_MONTH {
            return Err(PartError::InvalidMonth(value));
        }
        Ok(Self(non_zero))
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }

    /// Full English month name, as shown in the month dropdown
    pub fn name(self) -> &'static str {
        chrono::Month::try_from(self.get()).map_or("", |m| m.name())
    }
}

impl TryFrom<u8> for Month {
    type Error = PartError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Month> for u8 {
    fn from(month: Month) -> Self {
        month.0.get()
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A day-of-month in `1..=31`.
/// Not checked against the month: Feb 30 is a valid part and only fails
/// once the parts are assembled into a real date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Day(NonZeroU8);

impl Day {
    /// # Errors
    /// Returns `PartError::InvalidDay` if the value is 0 or > 31.
    pub fn new(value: u8) -> Result<Self, PartError> {
        let non_zero = NonZeroU8::new(value).ok_or(PartError::InvalidDay(value))?;
        if value > MAX_DAY {
            return Err(PartError::InvalidDay(value));
        }
        Ok(Self(non_zero))
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl TryFrom<u8> for Day {
    type Error = PartError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Day> for u8 {
    fn from(day: Day) -> Self {
        day.0.get()
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A year value guaranteed to be in the range `1..=MAX_YEAR` (1..=9999)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct Year(NonZeroU16);

impl Year {
    /// Creates a new Year, validating that it's non-zero and <= `MAX_YEAR`
    ///
    /// # Errors
    /// Returns `PartError::InvalidYear` if the value is 0 or > `MAX_YEAR`.
    pub fn new(value: u16) -> Result<Self, PartError> {
        let non_zero = NonZeroU16::new(value).ok_or(PartError::InvalidYear(value))?;
        if value > MAX_YEAR {
            return Err(PartError::InvalidYear(value));
        }
        Ok(Self(non_zero))
    }

    /// Converts a chrono year, rejecting anything outside `1..=MAX_YEAR`
    ///
    /// # Errors
    /// Returns `PartError::InvalidYear` for negative or too-large years.
    pub fn from_chrono(value: i32) -> Result<Self, PartError> {
        let value = u16::try_from(value).map_err(|_| PartError::InvalidYear(0))?;
        Self::new(value)
    }

    #[inline]
    pub const fn get(self) -> u16 {
        self.0.get()
    }
}

impl TryFrom<u16> for Year {
    type Error = PartError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Year> for u16 {
    fn from(year: Year) -> Self {
        year.0.get()
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The hour/minute/meridiem selection of a split time input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeParts {
    pub hour: Hour,
    pub minute: Minute,
    pub meridiem: Meridiem,
}

impl TimeParts {
    /// # Errors
    /// Returns the first part that is out of range.
    pub fn new(hour: u8, minute: u8, meridiem: Meridiem) -> Result<Self, PartError> {
        Ok(Self {
            hour: Hour::new(hour)?,
            minute: Minute::new(minute)?,
            meridiem,
        })
    }

    /// Splits a wall-clock time, rounding it up to the next five-minute mark.
    /// 23:56 rounds to 12:00 am (the carried day is dropped).
    pub fn from_time(time: NaiveTime) -> Self {
        let (rounded, _) = round_up_time(time);
        Self::from_rounded(rounded)
    }

    /// Splits a time already on the five-minute grid
    pub(crate) fn from_rounded(time: NaiveTime) -> Self {
        let hour24 = time.hour() as u8;
        // chrono guarantees hour < 24, so every lookup below is in range
        let hour = to_12_hr(hour24).and_then(|h| Hour::new(h).ok()).unwrap_or(Hour(NonZeroU8::MIN));
        let minute = Minute::new(time.minute() as u8).unwrap_or(Minute(0));
        let meridiem = meridiem_of(hour24).unwrap_or(Meridiem::Am);
        Self {
            hour,
            minute,
            meridiem,
        }
    }

    /// Wall-clock time on a 24-hour clock
    pub fn to_time(self) -> Option<NaiveTime> {
        let hour24 = to_24_hr(self.hour.get(), self.meridiem)?;
        NaiveTime::from_hms_opt(u32::from(hour24), u32::from(self.minute.get()), 0)
    }

    /// Ordered sub-values used to pre-select `hours`, `minutes`, `ampm`
    pub fn to_form_values(self) -> [String; 3] {
        [
            self.hour.to_string(),
            self.minute.to_string(),
            self.meridiem.value().to_owned(),
        ]
    }
}

/// The month/day/year selection of a split date input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateParts {
    pub month: Month,
    pub day: Day,
    pub year: Year,
}

impl DateParts {
    /// # Errors
    /// Returns the first part that is out of range.
    pub fn new(month: u8, day: u8, year: u16) -> Result<Self, PartError> {
        Ok(Self {
            month: Month::new(month)?,
            day: Day::new(day)?,
            year: Year::new(year)?,
        })
    }

    /// # Errors
    /// Returns `PartError::InvalidYear` for dates outside `1..=9999`.
    pub fn from_date(date: NaiveDate) -> Result<Self, PartError> {
        Ok(Self {
            month: Month::new(date.month() as u8)?,
            day: Day::new(date.day() as u8)?,
            year: Year::from_chrono(date.year())?,
        })
    }

    /// Calendar date, or `None` for combinations such as Feb 30
    pub fn to_date(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(
            i32::from(self.year.get()),
            u32::from(self.month.get()),
            u32::from(self.day.get()),
        )
    }

    /// Ordered sub-values used to pre-select `months`, `days`, `years`
    pub fn to_form_values(self) -> [String; 3] {
        [
            self.month.to_string(),
            self.day.to_string(),
            self.year.to_string(),
        ]
    }
}
