//! Static option lists backing each dropdown.
//!
//! Every list starts with the blank placeholder `("", "---")`.

use crate::consts::{
    BLANK_LABEL, BLANK_VALUE, MAX_DAY, MAX_HOUR_12, MAX_MONTH, MINUTE_PAD_BELOW, MINUTE_STEP,
    MINUTES_PER_HOUR, SELECT_CLASS_SUFFIX,
};
use crate::prelude::*;
use crate::types::{Meridiem, Month};
use crate::window::YearWindow;
use serde::{Deserialize, Serialize};

/// A `(value, label)` pair rendered as one `<option>`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChoiceOption {
    pub value: String,
    pub label: String,
}

impl ChoiceOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }

    /// The `("", "---")` placeholder
    pub fn blank() -> Self {
        Self::new(BLANK_VALUE, BLANK_LABEL)
    }

    pub fn is_blank(&self) -> bool {
        self.value == BLANK_VALUE
    }
}

fn with_blank(options: impl IntoIterator<Item = ChoiceOption>) -> Vec<ChoiceOption> {
    std::iter::once(ChoiceOption::blank()).chain(options).collect()
}

/// Months 1-12 labelled with their English names
pub fn months() -> Vec<ChoiceOption> {
    with_blank((1..=MAX_MONTH).filter_map(|m| {
        let month = Month::new(m).ok()?;
        Some(ChoiceOption::new(m.to_string(), month.name()))
    }))
}

/// Days 1-31, regardless of month
pub fn days() -> Vec<ChoiceOption> {
    with_blank((1..=MAX_DAY).map(|d| ChoiceOption::new(d.to_string(), d.to_string())))
}

/// Every year in the window, ascending
pub fn years(window: &YearWindow) -> Vec<ChoiceOption> {
    with_blank(
        window
            .years()
            .map(|y| ChoiceOption::new(y.to_string(), y.to_string())),
    )
}

/// Hours 1-12
pub fn hours() -> Vec<ChoiceOption> {
    with_blank((1..=MAX_HOUR_12).map(|h| ChoiceOption::new(h.to_string(), h.to_string())))
}

/// Minutes in five-minute steps; labels under ten are zero-padded ("05")
pub fn minutes() -> Vec<ChoiceOption> {
    with_blank((0..MINUTES_PER_HOUR).step_by(usize::from(MINUTE_STEP)).map(|m| {
        let label = if m < MINUTE_PAD_BELOW {
            format!("{m:02}")
        } else {
            m.to_string()
        };
        ChoiceOption::new(m.to_string(), label)
    }))
}

/// `am` / `pm`, labelled upper-case
pub fn ampm() -> Vec<ChoiceOption> {
    with_blank(
        [Meridiem::Am, Meridiem::Pm]
            .into_iter()
            .map(|m| ChoiceOption::new(m.value(), m.label())),
    )
}

/// One dropdown of a split input, mapped to its enumerator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChoiceKind {
    #[display(fmt = "months")]
    Months,
    #[display(fmt = "days")]
    Days,
    #[display(fmt = "years")]
    Years,
    #[display(fmt = "hours")]
    Hours,
    #[display(fmt = "minutes")]
    Minutes,
    #[display(fmt = "ampm")]
    AmPm,
}

impl ChoiceKind {
    /// Parts of a split date, in submission order
    pub const DATE: [Self; 3] = [Self::Months, Self::Days, Self::Years];
    /// Parts of a split time, in submission order
    pub const TIME: [Self; 3] = [Self::Hours, Self::Minutes, Self::AmPm];

    /// CSS class of the rendered `<select>` (`hours-select`)
    pub fn css_class(self) -> String {
        format!("{self}{SELECT_CLASS_SUFFIX}")
    }

    /// The option list for this part when it does not depend on the year
    /// window, i.e. for every kind but `Years`
    pub fn fixed_options(self) -> Option<Vec<ChoiceOption>> {
        match self {
            Self::Months => Some(months()),
            Self::Days => Some(days()),
            Self::Years => None,
            Self::Hours => Some(hours()),
            Self::Minutes => Some(minutes()),
            Self::AmPm => Some(ampm()),
        }
    }

    /// The option list for this part
    pub fn options(self, window: &YearWindow) -> Vec<ChoiceOption> {
        self.fixed_options().unwrap_or_else(|| years(window))
    }

    /// Whether `value` is one of the non-blank options for this part.
    /// Without a window no year is accepted.
    pub fn accepts(self, value: &str, window: Option<&YearWindow>) -> bool {
        let options = match window {
            Some(window) => self.options(window),
            None => self.fixed_options().unwrap_or_default(),
        };
        options
            .iter()
            .any(|option| !option.is_blank() && option.value == value)
    }
}
