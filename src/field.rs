//! Recomposition of submitted dropdown parts into one value.
//!
//! Parts are validated against their option lists, joined into a fixed
//! textual pattern and parsed back with chrono. All failures are
//! [`FieldError`] values meant to be shown next to the input.

use crate::choices::ChoiceKind;
use crate::consts::{DATE_FORMAT, DATETIME_FORMAT, TIME_FORMAT};
use crate::widget::{SplitDateSelector, SplitDateTimeSelector, SplitTimeSelector};
use crate::window::YearWindow;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use chrono_tz::Tz;
use tracing::debug;

/// Validation failure of a split input, shown inline next to the field
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    /// Every part is blank on a required field.
    #[error("This field is required.")]
    Required,

    /// Some parts are blank and some are not.
    #[error("Enter a complete value.")]
    Incomplete,

    /// The wrong number of parts was submitted.
    #[error("Expected {expected} values, got {actual}.")]
    PartCount { expected: usize, actual: usize },

    /// A part is not one of its dropdown's options.
    #[error("Select a valid choice. {value} is not one of the available choices.")]
    InvalidChoice { part: ChoiceKind, value: String },

    /// The assembled text is not a real date or time (e.g. Feb 30).
    #[error("Enter a valid date/time: {input}")]
    InvalidDate { input: String },

    /// The local time falls in a daylight-saving gap.
    #[error("{local} does not exist in {tz}")]
    NonexistentTime { local: NaiveDateTime, tz: Tz },
}

/// A form field made of several dropdowns that compress into one value
pub trait SplitField {
    type Output;

    /// Part kinds, in submission order
    fn kinds(&self) -> &'static [ChoiceKind];

    /// Years offered by the widget; `None` for fields without a year part
    fn window(&self) -> Option<&YearWindow>;

    fn required(&self) -> bool;

    /// Assembles fully validated, non-blank parts into the output value
    ///
    /// # Errors
    /// Returns `FieldError::InvalidDate` or `FieldError::NonexistentTime`.
    fn compress(&self, parts: &[&str], tz: Tz) -> Result<Self::Output, FieldError>;

    /// Validates submitted parts and compresses them.
    ///
    /// All parts blank yields `Ok(None)` unless the field is required;
    /// a partial fill is always an error.
    ///
    /// # Errors
    /// Returns the first `FieldError` encountered.
    fn clean(&self, parts: &[Option<String>], tz: Tz) -> Result<Option<Self::Output>, FieldError> {
        let kinds = self.kinds();
        if parts.len() != kinds.len() {
            return Err(FieldError::PartCount {
                expected: kinds.len(),
                actual:   parts.len(),
            });
        }

        let filled: Vec<&str> = parts
            .iter()
            .filter_map(|part| part.as_deref().map(str::trim).filter(|p| !p.is_empty()))
            .collect();
        if filled.is_empty() {
            return if self.required() {
                Err(FieldError::Required)
            } else {
                Ok(None)
            };
        }
        if filled.len() != kinds.len() {
            debug!(filled = filled.len(), expected = kinds.len(), "partially filled split input");
            return Err(FieldError::Incomplete);
        }

        for (kind, value) in kinds.iter().zip(&filled) {
            if !kind.accepts(value, self.window()) {
                debug!(part = %kind, value, "submitted value is not an available choice");
                return Err(FieldError::InvalidChoice {
                    part:  *kind,
                    value: (*value).to_owned(),
                });
            }
        }

        self.compress(&filled, tz).map(Some)
    }
}

const fn part_count(expected: usize, parts: &[&str]) -> FieldError {
    FieldError::PartCount {
        expected,
        actual: parts.len(),
    }
}

fn parse_failure(input: String) -> FieldError {
    debug!(%input, "assembled value does not parse");
    FieldError::InvalidDate { input }
}

/// Attaches `tz` to a local datetime; ambiguous times take the earlier instant
fn localize(local: NaiveDateTime, tz: Tz) -> Result<DateTime<Tz>, FieldError> {
    tz.from_local_datetime(&local)
        .earliest()
        .ok_or(FieldError::NonexistentTime { local, tz })
}

macro_rules! split_field_common {
    ($field:ty, $widget:ty) => {
        impl $field {
            pub const fn new(window: YearWindow) -> Self {
                Self {
                    window,
                    required: true,
                }
            }

            /// Accepts an all-blank submission as "no value"
            #[must_use]
            pub const fn optional(mut self) -> Self {
                self.required = false;
                self
            }

            /// The matching dropdown widget
            pub fn widget(&self) -> $widget {
                <$widget>::new(&self.window)
            }
        }
    };
}

/// Month / day / year parts compressing into a calendar date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitDateField {
    window:   YearWindow,
    required: bool,
}

split_field_common!(SplitDateField, SplitDateSelector);

impl SplitDateField {
    /// Cleans to local midnight of the submitted date in `tz`
    ///
    /// # Errors
    /// As [`SplitField::clean`], plus `NonexistentTime` when midnight is skipped.
    pub fn clean_aware(
        &self,
        parts: &[Option<String>],
        tz: Tz,
    ) -> Result<Option<DateTime<Tz>>, FieldError> {
        self.clean(parts, tz)?
            .map(|date| localize(date.and_time(NaiveTime::MIN), tz))
            .transpose()
    }
}

impl SplitField for SplitDateField {
    type Output = NaiveDate;

    fn kinds(&self) -> &'static [ChoiceKind] {
        &ChoiceKind::DATE
    }

    fn window(&self) -> Option<&YearWindow> {
        Some(&self.window)
    }

    fn required(&self) -> bool {
        self.required
    }

    fn compress(&self, parts: &[&str], _tz: Tz) -> Result<NaiveDate, FieldError> {
        let [month, day, year] = parts else {
            return Err(part_count(3, parts));
        };
        let input = format!("{month}/{day}/{year}");
        NaiveDate::parse_from_str(&input, DATE_FORMAT).map_err(|_| parse_failure(input))
    }
}

/// Hour / minute / am-pm parts compressing into a wall-clock time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitTimeField {
    required: bool,
}

impl SplitTimeField {
    pub const fn new() -> Self {
        Self { required: true }
    }

    /// Accepts an all-blank submission as "no value"
    #[must_use]
    pub const fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// The matching dropdown widget
    #[allow(clippy::unused_self)]
    pub fn widget(&self) -> SplitTimeSelector {
        SplitTimeSelector::new()
    }
}

impl Default for SplitTimeField {
    fn default() -> Self {
        Self::new()
    }
}

impl SplitField for SplitTimeField {
    type Output = NaiveTime;

    fn kinds(&self) -> &'static [ChoiceKind] {
        &ChoiceKind::TIME
    }

    fn window(&self) -> Option<&YearWindow> {
        None
    }

    fn required(&self) -> bool {
        self.required
    }

    fn compress(&self, parts: &[&str], _tz: Tz) -> Result<NaiveTime, FieldError> {
        let [hour, minute, ampm] = parts else {
            return Err(part_count(3, parts));
        };
        let input = format!("{hour}:{minute} {ampm}");
        NaiveTime::parse_from_str(&input, TIME_FORMAT).map_err(|_| parse_failure(input))
    }
}

/// All six parts compressing into a zoned datetime
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitDateTimeField {
    window:   YearWindow,
    required: bool,
}

split_field_common!(SplitDateTimeField, SplitDateTimeSelector);

const DATETIME_KINDS: [ChoiceKind; 6] = [
    ChoiceKind::Months,
    ChoiceKind::Days,
    ChoiceKind::Years,
    ChoiceKind::Hours,
    ChoiceKind::Minutes,
    ChoiceKind::AmPm,
];

impl SplitField for SplitDateTimeField {
    type Output = DateTime<Tz>;

    fn kinds(&self) -> &'static [ChoiceKind] {
        &DATETIME_KINDS
    }

    fn window(&self) -> Option<&YearWindow> {
        Some(&self.window)
    }

    fn required(&self) -> bool {
        self.required
    }

    fn compress(&self, parts: &[&str], tz: Tz) -> Result<DateTime<Tz>, FieldError> {
        let [month, day, year, hour, minute, ampm] = parts else {
            return Err(part_count(DATETIME_KINDS.len(), parts));
        };
        let input = format!("{month}/{day}/{year} {hour}:{minute} {ampm}");
        let local =
            NaiveDateTime::parse_from_str(&input, DATETIME_FORMAT).map_err(|_| parse_failure(input))?;
        localize(local, tz)
    }
}
