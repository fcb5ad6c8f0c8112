//! Default values for split inputs at render time.
//!
//! When a form edits an existing record, its stored values are shown;
//! otherwise the inputs start at "now". The clock and the display zone are
//! passed in explicitly.

use crate::widget::TimeInput;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use chrono_tz::Tz;
use std::collections::BTreeMap;
use tracing::debug;

/// Source of the current instant
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// The system wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock stopped at one instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// An existing record whose fields pre-fill the form
pub trait Record {
    /// Stored instant of a datetime field
    fn timestamp(&self, field: &str) -> Option<DateTime<Utc>>;

    /// Stored wall-clock time of a time field
    fn time_of_day(&self, _field: &str) -> Option<NaiveTime> {
        None
    }
}

/// A value a split selector can pre-select
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitialValue {
    DateTime(DateTime<Tz>),
    Time(NaiveTime),
}

impl InitialValue {
    /// The instant, for datetime selectors
    pub fn as_instant(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::DateTime(dt) => Some(dt.with_timezone(&Utc)),
            Self::Time(_) => None,
        }
    }

    /// The local calendar date, for date selectors
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::DateTime(dt) => Some(dt.date_naive()),
            Self::Time(_) => None,
        }
    }

    /// Input for time selectors; both variants carry a time of day
    pub fn as_time_input(&self) -> TimeInput {
        match self {
            Self::DateTime(dt) => TimeInput::Instant(dt.with_timezone(&Utc)),
            Self::Time(time) => TimeInput::Local(*time),
        }
    }
}

/// Initial values keyed by field name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Initial {
    values: BTreeMap<String, InitialValue>,
}

impl Initial {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: &str) -> Option<&InitialValue> {
        self.values.get(field)
    }

    pub fn insert(&mut self, field: impl Into<String>, value: InitialValue) {
        self.values.insert(field.into(), value);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &InitialValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    fn set(&mut self, field: &str, value: Option<InitialValue>) {
        match value {
            Some(value) => {
                self.values.insert(field.to_owned(), value);
            }
            None => {
                self.values.remove(field);
            }
        }
    }

    /// Pre-fills a datetime field from `record`, or with "now" when there
    /// is no record. Either way the value is shown in `tz`. A record whose
    /// field is empty leaves the input blank.
    #[must_use]
    pub fn with_datetime(
        mut self,
        field: &str,
        record: Option<&dyn Record>,
        clock: &dyn Clock,
        tz: Tz,
    ) -> Self {
        let instant = match record {
            Some(record) => record.timestamp(field),
            None => Some(clock.now()),
        };
        debug!(field, from_record = record.is_some(), ?instant, "initial datetime");
        self.set(
            field,
            instant.map(|instant| InitialValue::DateTime(instant.with_timezone(&tz))),
        );
        self
    }

    #[must_use]
    pub fn with_datetimes(
        self,
        fields: &[&str],
        record: Option<&dyn Record>,
        clock: &dyn Clock,
        tz: Tz,
    ) -> Self {
        fields
            .iter()
            .fold(self, |initial, field| initial.with_datetime(field, record, clock, tz))
    }

    /// Pre-fills a time field from `record`, or with the current
    /// wall-clock time in `tz` when there is no record.
    #[must_use]
    pub fn with_time(
        mut self,
        field: &str,
        record: Option<&dyn Record>,
        clock: &dyn Clock,
        tz: Tz,
    ) -> Self {
        let time = match record {
            Some(record) => record.time_of_day(field),
            None => Some(clock.now().with_timezone(&tz).time()),
        };
        debug!(field, from_record = record.is_some(), ?time, "initial time");
        self.set(field, time.map(InitialValue::Time));
        self
    }

    #[must_use]
    pub fn with_times(
        self,
        fields: &[&str],
        record: Option<&dyn Record>,
        clock: &dyn Clock,
        tz: Tz,
    ) -> Self {
        fields
            .iter()
            .fold(self, |initial, field| initial.with_time(field, record, clock, tz))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Year;
    use crate::widget::{SplitDateSelector, SplitDateTimeSelector, SplitTimeSelector, SplitWidget};
    use crate::window::YearWindow;
    use chrono::TimeZone;
    use chrono_tz::America::New_York;

    struct Entry {
        started: Option<DateTime<Utc>>,
        alarm:   Option<NaiveTime>,
    }

    impl Record for Entry {
        fn timestamp(&self, field: &str) -> Option<DateTime<Utc>> {
            match field {
                "started" => self.started,
                _ => None,
            }
        }

        fn time_of_day(&self, field: &str) -> Option<NaiveTime> {
            match field {
                "alarm" => self.alarm,
                _ => None,
            }
        }
    }

    fn clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2026, 10, 18, 16, 42, 0).unwrap())
    }

    fn window() -> YearWindow {
        YearWindow::new(Year::new(2025).unwrap(), Year::new(2026).unwrap()).unwrap()
    }

    #[test]
    fn test_datetime_defaults_to_now() {
        let initial = Initial::new().with_datetime("started", None, &clock(), New_York);
        let value = initial.get("started").unwrap();
        assert_eq!(value.as_instant(), Some(clock().0));
        assert_eq!(value.as_date(), NaiveDate::from_ymd_opt(2026, 10, 18));
    }

    #[test]
    fn test_datetime_prefers_record() {
        let started = Utc.with_ymd_and_hms(2025, 3, 2, 3, 0, 0).unwrap();
        let entry = Entry {
            started: Some(started),
            alarm:   None,
        };
        let initial = Initial::new().with_datetime("started", Some(&entry), &clock(), New_York);
        let value = initial.get("started").unwrap();
        assert_eq!(value.as_instant(), Some(started));
        // 03:00 UTC is the previous evening in New York
        assert_eq!(value.as_date(), NaiveDate::from_ymd_opt(2025, 3, 1));
    }

    #[test]
    fn test_empty_record_field_is_blank() {
        let entry = Entry {
            started: None,
            alarm:   None,
        };
        let initial = Initial::new()
            .with_datetime("started", None, &clock(), New_York)
            .with_datetime("started", Some(&entry), &clock(), New_York);
        assert_eq!(initial.get("started"), None);
    }

    #[test]
    fn test_time_defaults_to_local_now() {
        let initial = Initial::new().with_times(&["alarm", "wake"], None, &clock(), New_York);
        let expected = NaiveTime::from_hms_opt(12, 42, 0).unwrap();
        assert_eq!(initial.get("alarm"), Some(&InitialValue::Time(expected)));
        assert_eq!(initial.get("wake"), Some(&InitialValue::Time(expected)));
    }

    #[test]
    fn test_time_prefers_record() {
        let alarm = NaiveTime::from_hms_opt(6, 30, 0).unwrap();
        let entry = Entry {
            started: None,
            alarm:   Some(alarm),
        };
        let initial = Initial::new().with_time("alarm", Some(&entry), &clock(), New_York);
        assert_eq!(initial.get("alarm"), Some(&InitialValue::Time(alarm)));
    }

    #[test]
    fn test_other_fields_untouched() {
        let mut initial = Initial::new();
        initial.insert("title", InitialValue::Time(NaiveTime::MIN));
        let initial = initial.with_datetimes(&["started"], None, &clock(), New_York);
        assert_eq!(initial.iter().count(), 2);
        assert_eq!(initial.get("title"), Some(&InitialValue::Time(NaiveTime::MIN)));
    }

    #[test]
    fn test_initial_feeds_selectors() {
        let window = window();
        let initial = Initial::new().with_datetime("started", None, &clock(), New_York);
        let value = initial.get("started").unwrap();

        let datetime = SplitDateTimeSelector::new(&window).decompose(value.as_instant().as_ref(), New_York);
        let expected: Vec<Option<String>> = ["10", "18", "2026", "12", "45", "pm"]
            .iter()
            .map(|v| Some((*v).to_owned()))
            .collect();
        assert_eq!(datetime, expected);

        let date = SplitDateSelector::new(&window).decompose(value.as_date().as_ref(), New_York);
        assert_eq!(date, expected[..3]);

        let time = SplitTimeSelector::new().decompose(Some(&value.as_time_input()), New_York);
        assert_eq!(time, expected[3..]);
    }
}
