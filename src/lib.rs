//! Split date, time and datetime dropdown inputs for HTML forms.
//!
//! A stored value is decomposed into one sub-value per dropdown
//! (month/day/year, hour/minute/am-pm) for rendering, and the submitted
//! sub-values are compressed back into a single value on submit. Minutes
//! are offered in five-minute steps; datetimes are shown and read in an
//! explicit timezone.
//!
//! ```
//! use split_select::{SplitField, SplitTimeField, SplitWidget, TimeInput};
//! use chrono::NaiveTime;
//! use chrono_tz::Tz;
//!
//! let field = SplitTimeField::new();
//!
//! let stored = TimeInput::from(NaiveTime::from_hms_opt(20, 3, 0).unwrap());
//! let parts = field.widget().decompose(Some(&stored), Tz::UTC);
//! assert_eq!(parts, vec![Some("8".to_owned()), Some("5".to_owned()), Some("pm".to_owned())]);
//!
//! let cleaned = field.clean(&parts, Tz::UTC)?;
//! assert_eq!(cleaned, NaiveTime::from_hms_opt(20, 5, 0));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod choices;
mod config;
mod consts;
pub mod convert;
mod duration;
mod field;
mod initial;
mod prelude;
mod types;
mod widget;
mod window;

pub use choices::{ChoiceKind, ChoiceOption};
pub use config::{ConfigError, FormConfig};
pub use consts::*;
pub use convert::{meridiem_of, round_to_five_minutes, to_12_hr, to_24_hr};
pub use duration::{DurationForm, FormErrors, TimeSpent, TimeUnit};
pub use field::{FieldError, SplitDateField, SplitDateTimeField, SplitField, SplitTimeField};
pub use initial::{Clock, FixedClock, Initial, InitialValue, Record, SystemClock};
pub use types::{DateParts, Day, Hour, Meridiem, Minute, Month, TimeParts, Year};
pub use widget::{
    PartValues, Select, SplitDateSelector, SplitDateTimeSelector, SplitTimeSelector, SplitWidget,
    TimeInput, escape_html, part_name,
};
pub use window::{WindowError, YearWindow};

use crate::prelude::*;

/// A dropdown part outside its allowed range
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum PartError {
    #[display(fmt = "Invalid hour: {} (must be 1-{})", "_0", MAX_HOUR_12)]
    InvalidHour(u8),
    #[display(fmt = "Invalid minute: {} (must be a multiple of {} below {})", "_0", MINUTE_STEP, MINUTES_PER_HOUR)]
    InvalidMinute(u8),
    #[display(fmt = "Invalid meridiem: {_0} (must be am or pm)")]
    InvalidMeridiem(String),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(u8),
    #[display(fmt = "Invalid day: {} (must be 1-{})", "_0", MAX_DAY)]
    InvalidDay(u8),
    #[display(fmt = "Invalid year: {} (must be 1-{})", "_0", MAX_YEAR)]
    InvalidYear(u16),
}

impl std::error::Error for PartError {}
