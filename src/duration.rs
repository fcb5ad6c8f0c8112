//! A "time spent" input pair: a whole-number amount and a unit.
//!
//! Both inputs are optional, but only together: filling one without the
//! other marks both as invalid.

use crate::choices::ChoiceOption;
use crate::consts::{INVALID_TIME_SPENT, MIN_TIME_AMOUNT, TIME_AMOUNT_FIELD, TIME_METRIC_FIELD};
use crate::prelude::*;
use crate::widget::escape_html;
use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt::{self, Write};
use std::num::NonZeroU32;
use std::str::FromStr;
use tracing::debug;

/// Unit of a time-spent amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum TimeUnit {
    #[display(fmt = "min")]
    #[serde(rename = "min")]
    Minutes,
    #[display(fmt = "hour")]
    #[serde(rename = "hour")]
    Hours,
}

impl TimeUnit {
    pub const ALL: [Self; 2] = [Self::Minutes, Self::Hours];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Minutes => "Minutes",
            Self::Hours => "Hours",
        }
    }

    /// Unit options preceded by the blank placeholder
    pub fn choices() -> Vec<ChoiceOption> {
        std::iter::once(ChoiceOption::blank())
            .chain(
                Self::ALL
                    .into_iter()
                    .map(|unit| ChoiceOption::new(unit.to_string(), unit.label())),
            )
            .collect()
    }
}

impl FromStr for TimeUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "min" => Ok(Self::Minutes),
            "hour" => Ok(Self::Hours),
            other => Err(format!(
                "Select a valid choice. {other} is not one of the available choices."
            )),
        }
    }
}

/// A validated amount of time spent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeSpent {
    pub amount: NonZeroU32,
    pub unit:   TimeUnit,
}

impl TimeSpent {
    pub fn as_duration(self) -> TimeDelta {
        let amount = i64::from(self.amount.get());
        match self.unit {
            TimeUnit::Minutes => TimeDelta::minutes(amount),
            TimeUnit::Hours => TimeDelta::hours(amount),
        }
    }
}

/// Per-field error messages of a form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors(BTreeMap<&'static str, Vec<String>>);

impl FormErrors {
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_default().push(message.into());
    }

    fn replace(&mut self, field: &'static str, message: &str) {
        self.0.insert(field, vec![message.to_owned()]);
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

impl std::error::Error for FormErrors {}

/// The submitted, uncleaned duration pair
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DurationForm {
    pub time_amount: Option<String>,
    pub time_metric: Option<String>,
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

impl DurationForm {
    pub fn new(time_amount: Option<&str>, time_metric: Option<&str>) -> Self {
        Self {
            time_amount: time_amount.map(str::to_owned),
            time_metric: time_metric.map(str::to_owned),
        }
    }

    /// Reads `time_amount` and `time_metric` out of submitted form data
    pub fn from_data(data: &HashMap<String, String>) -> Self {
        Self {
            time_amount: data.get(TIME_AMOUNT_FIELD).cloned(),
            time_metric: data.get(TIME_METRIC_FIELD).cloned(),
        }
    }

    fn clean_amount(&self, errors: &mut FormErrors) -> Option<NonZeroU32> {
        let raw = non_blank(self.time_amount.as_deref())?;
        let Ok(amount) = raw.parse::<i64>() else {
            errors.add(TIME_AMOUNT_FIELD, "Enter a whole number.");
            return None;
        };
        if amount < MIN_TIME_AMOUNT {
            errors.add(
                TIME_AMOUNT_FIELD,
                format!("Ensure this value is greater than or equal to {MIN_TIME_AMOUNT}."),
            );
            return None;
        }
        let Some(amount) = u32::try_from(amount).ok().and_then(NonZeroU32::new) else {
            errors.add(TIME_AMOUNT_FIELD, "Enter a whole number.");
            return None;
        };
        Some(amount)
    }

    fn clean_metric(&self, errors: &mut FormErrors) -> Option<TimeUnit> {
        let raw = non_blank(self.time_metric.as_deref())?;
        match raw.parse() {
            Ok(unit) => Some(unit),
            Err(message) => {
                errors.add(TIME_METRIC_FIELD, message);
                None
            }
        }
    }

    /// Validates the pair.
    ///
    /// Both empty is `Ok(None)`. Exactly one usable value marks both fields
    /// with "Invalid Time Spent".
    ///
    /// # Errors
    /// Returns every field's messages.
    pub fn clean(&self) -> Result<Option<TimeSpent>, FormErrors> {
        let mut errors = FormErrors::default();
        let amount = self.clean_amount(&mut errors);
        let unit = self.clean_metric(&mut errors);

        let spent = match (amount, unit) {
            (Some(amount), Some(unit)) => Some(TimeSpent { amount, unit }),
            (None, None) => None,
            _ => {
                debug!(?amount, ?unit, "duration pair partially filled");
                errors.replace(TIME_AMOUNT_FIELD, INVALID_TIME_SPENT);
                errors.replace(TIME_METRIC_FIELD, INVALID_TIME_SPENT);
                None
            }
        };

        if errors.is_empty() {
            Ok(spent)
        } else {
            Err(errors)
        }
    }

    /// Renders the amount input followed by the unit dropdown
    pub fn render(&self) -> String {
        let mut html = format!(
            r#"<input type="number" name="{TIME_AMOUNT_FIELD}" min="{MIN_TIME_AMOUNT}""#
        );
        if let Some(amount) = non_blank(self.time_amount.as_deref()) {
            // writing into a String cannot fail
            let _ = write!(html, r#" value="{}""#, escape_html(amount));
        }
        html.push_str(">\n");

        let selected = non_blank(self.time_metric.as_deref()).unwrap_or_default();
        let _ = writeln!(html, r#"<select name="{TIME_METRIC_FIELD}">"#);
        for option in TimeUnit::choices() {
            let marker = if option.value == selected {
                r#" selected="selected""#
            } else {
                ""
            };
            let _ = writeln!(
                html,
                r#"<option value="{}"{marker}>{}</option>"#,
                option.value, option.label
            );
        }
        html.push_str("</select>");
        html
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_filled_passes() {
        let form = DurationForm::new(Some("1"), Some("hour"));
        let spent = form.clean().unwrap().unwrap();
        assert_eq!(spent.amount.get(), 1);
        assert_eq!(spent.unit, TimeUnit::Hours);
        assert_eq!(spent.as_duration(), TimeDelta::hours(1));
    }

    #[test]
    fn test_neither_filled_passes() {
        assert_eq!(DurationForm::new(None, None).clean(), Ok(None));
        assert_eq!(DurationForm::new(Some(""), Some(" ")).clean(), Ok(None));
    }

    #[test]
    fn test_only_amount_fails_on_both_fields() {
        let errors = DurationForm::new(Some("30"), None).clean().unwrap_err();
        assert_eq!(errors.get("time_amount"), Some(&["Invalid Time Spent".to_owned()][..]));
        assert_eq!(errors.get("time_metric"), Some(&["Invalid Time Spent".to_owned()][..]));
    }

    #[test]
    fn test_only_metric_fails_on_both_fields() {
        let errors = DurationForm::new(None, Some("min")).clean().unwrap_err();
        assert_eq!(errors.get("time_amount"), Some(&["Invalid Time Spent".to_owned()][..]));
        assert_eq!(errors.get("time_metric"), Some(&["Invalid Time Spent".to_owned()][..]));
    }

    #[test]
    fn test_amount_below_minimum() {
        let errors = DurationForm::new(Some("0"), None).clean().unwrap_err();
        assert_eq!(
            errors.get("time_amount"),
            Some(&["Ensure this value is greater than or equal to 1.".to_owned()][..])
        );
        assert_eq!(errors.get("time_metric"), None);
    }

    #[test]
    fn test_invalid_amount_with_unit_becomes_partial() {
        let errors = DurationForm::new(Some("abc"), Some("min")).clean().unwrap_err();
        assert_eq!(errors.get("time_amount"), Some(&["Invalid Time Spent".to_owned()][..]));
        assert_eq!(errors.get("time_metric"), Some(&["Invalid Time Spent".to_owned()][..]));
    }

    #[test]
    fn test_unknown_unit() {
        let errors = DurationForm::new(None, Some("day")).clean().unwrap_err();
        assert_eq!(
            errors.get("time_metric"),
            Some(&["Select a valid choice. day is not one of the available choices.".to_owned()][..])
        );
    }

    #[test]
    fn test_minutes_duration() {
        let spent = DurationForm::new(Some("45"), Some("min")).clean().unwrap().unwrap();
        assert_eq!(spent.as_duration(), TimeDelta::minutes(45));
    }

    #[test]
    fn test_from_data() {
        let data: HashMap<String, String> = [("time_amount", "2"), ("time_metric", "hour")]
            .into_iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        let form = DurationForm::from_data(&data);
        assert_eq!(form, DurationForm::new(Some("2"), Some("hour")));
    }

    #[test]
    fn test_errors_display() {
        let errors = DurationForm::new(Some("3"), None).clean().unwrap_err();
        assert_eq!(
            errors.to_string(),
            "time_amount: Invalid Time Spent; time_metric: Invalid Time Spent"
        );
    }

    #[test]
    fn test_render() {
        let html = DurationForm::new(Some("2"), Some("hour")).render();
        assert!(html.starts_with(r#"<input type="number" name="time_amount" min="1" value="2">"#));
        assert!(html.contains(r#"<select name="time_metric">"#));
        assert!(html.contains(r#"<option value="hour" selected="selected">Hours</option>"#));
        assert!(html.contains(r#"<option value="min">Minutes</option>"#));
    }

    #[test]
    fn test_unit_serde() {
        assert_eq!(serde_json::to_string(&TimeUnit::Minutes).unwrap(), r#""min""#);
        let unit: TimeUnit = serde_json::from_str(r#""hour""#).unwrap();
        assert_eq!(unit, TimeUnit::Hours);
    }
}
