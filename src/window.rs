use crate::{PartError, prelude::*, types::Year};

/// The inclusive span of years offered by the year dropdown.
/// The start year must be less than or equal to the end year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display(fmt = "{start}/{end}")]
pub struct YearWindow {
    start: Year,
    end:   Year,
}

/// Error type for year window construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WindowError {
    /// Start year is after end year.
    #[error("Invalid year window: start ({start}) is after end ({end})")]
    InvalidRange { start: Year, end: Year },

    /// A bound is not a representable year.
    #[error(transparent)]
    Part(#[from] PartError),
}

impl YearWindow {
    /// Creates a new window with validation.
    ///
    /// # Errors
    /// Returns `WindowError::InvalidRange` if start > end.
    pub fn new(start: Year, end: Year) -> Result<Self, WindowError> {
        if start > end {
            return Err(WindowError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// `back` years before `current` through `forward` years after it.
    ///
    /// # Errors
    /// Returns `WindowError::Part` if a bound leaves `1..=9999`.
    pub fn around(current: Year, back: u16, forward: u16) -> Result<Self, WindowError> {
        let start = current
            .get()
            .checked_sub(back)
            .ok_or(PartError::InvalidYear(0))?;
        let end = current.get().saturating_add(forward);
        Self::new(Year::new(start)?, Year::new(end)?)
    }

    /// A fixed epoch year through `current`.
    ///
    /// # Errors
    /// Returns `WindowError::InvalidRange` if the epoch is in the future.
    pub fn since(epoch: Year, current: Year) -> Result<Self, WindowError> {
        Self::new(epoch, current)
    }

    pub const fn start(&self) -> Year {
        self.start
    }

    pub const fn end(&self) -> Year {
        self.end
    }

    /// Checks if the window offers a given year
    pub fn contains(&self, year: Year) -> bool {
        self.start <= year && year <= self.end
    }

    /// Number of years offered
    pub const fn len(&self) -> usize {
        (self.end.get() - self.start.get()) as usize + 1
    }

    /// A window always offers at least one year
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// The offered years in ascending order
    pub fn years(&self) -> impl Iterator<Item = u16> {
        self.start.get()..=self.end.get()
    }
}
