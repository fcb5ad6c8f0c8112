//! Form configuration: display timezone, year window and markup options.

use crate::consts::{DEFAULT_YEARS_BACK, DEFAULT_YEARS_FORWARD};
use crate::initial::Clock;
use crate::types::Year;
use crate::widget::SplitDateTimeSelector;
use crate::window::{WindowError, YearWindow};
use chrono::{Datelike, NaiveDate};
use chrono_tz::Tz;
use serde::Deserialize;
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid form configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Window(#[from] WindowError),
}

/// Settings shared by every split input of a form.
///
/// ```toml
/// timezone = "America/New_York"
/// years_back = 2
/// group_separator = '</div><div class="control-group">'
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormConfig {
    /// Zone values are displayed in and submitted values are attached to
    pub timezone:        Tz,
    pub years_back:      u16,
    pub years_forward:   u16,
    /// When set, the year dropdown runs from this year through the current one
    pub epoch_year:      Option<u16>,
    /// Markup placed between the date and time dropdowns of a datetime input
    pub group_separator: Option<String>,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            timezone:        Tz::UTC,
            years_back:      DEFAULT_YEARS_BACK,
            years_forward:   DEFAULT_YEARS_FORWARD,
            epoch_year:      None,
            group_separator: None,
        }
    }
}

impl FormConfig {
    /// # Errors
    /// Returns `ConfigError::Parse` for malformed TOML, unknown keys or an
    /// unknown timezone name.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        info!(
            timezone = %config.timezone,
            years_back = config.years_back,
            years_forward = config.years_forward,
            epoch_year = ?config.epoch_year,
            "loaded form configuration"
        );
        Ok(config)
    }

    /// The year dropdown's window as of `today`
    ///
    /// # Errors
    /// Returns `ConfigError::Window` if the bounds are not valid years or the
    /// epoch lies after `today`.
    pub fn year_window(&self, today: NaiveDate) -> Result<YearWindow, ConfigError> {
        let current = Year::from_chrono(today.year()).map_err(WindowError::from)?;
        let window = match self.epoch_year {
            Some(epoch) => YearWindow::since(Year::new(epoch).map_err(WindowError::from)?, current)?,
            None => YearWindow::around(current, self.years_back, self.years_forward)?,
        };
        Ok(window)
    }

    /// The year window as of the clock's current date in the configured zone
    ///
    /// # Errors
    /// As [`FormConfig::year_window`].
    pub fn year_window_now(&self, clock: &dyn Clock) -> Result<YearWindow, ConfigError> {
        self.year_window(clock.now().with_timezone(&self.timezone).date_naive())
    }

    /// A datetime selector with the configured group separator
    pub fn datetime_selector(&self, window: &YearWindow) -> SplitDateTimeSelector {
        let selector = SplitDateTimeSelector::new(window);
        match &self.group_separator {
            Some(separator) => selector.with_group_separator(separator.clone()),
            None => selector,
        }
    }
}
