/// Value of the placeholder option that precedes every real choice
pub const BLANK_VALUE: &str = "";
/// Label of the placeholder option
pub const BLANK_LABEL: &str = "---";

/// Maximum valid year (inclusive)
pub const MAX_YEAR: u16 = 9999;

/// Maximum valid month (December)
pub const MAX_MONTH: u8 = 12;

/// Largest day number offered; calendar validity is checked only on compress
pub const MAX_DAY: u8 = 31;

/// Largest hour on a 12-hour clock face
pub const MAX_HOUR_12: u8 = 12;

/// Hours in a day, for 24-hour arithmetic
pub const HOURS_PER_DAY: u8 = 24;

/// Minutes in an hour
pub const MINUTES_PER_HOUR: u8 = 60;

/// Granularity of the minute dropdown
pub const MINUTE_STEP: u8 = 5;

/// Minute labels below this value are zero-padded ("05")
pub const MINUTE_PAD_BELOW: u8 = 10;

/// Suffix appended to a part name to form its CSS class (`hours-select`)
pub const SELECT_CLASS_SUFFIX: &str = "-select";

/// Separator between a multi-part input's name and its part index (`name_0`)
pub const PART_SEPARATOR: char = '_';

/// Textual pattern a submitted date is assembled into before parsing
pub const DATE_FORMAT: &str = "%m/%d/%Y";
/// Textual pattern a submitted time is assembled into before parsing
pub const TIME_FORMAT: &str = "%I:%M %p";
/// Textual pattern a submitted datetime is assembled into before parsing
pub const DATETIME_FORMAT: &str = "%m/%d/%Y %I:%M %p";

/// Default number of years before the current one offered by the year dropdown
pub const DEFAULT_YEARS_BACK: u16 = 1;
/// Default number of years after the current one offered by the year dropdown
pub const DEFAULT_YEARS_FORWARD: u16 = 0;

/// Error attached to both duration inputs when only one of them is filled
pub const INVALID_TIME_SPENT: &str = "Invalid Time Spent";

/// Smallest accepted duration amount
pub const MIN_TIME_AMOUNT: i64 = 1;

/// Field names of the duration pair
pub const TIME_AMOUNT_FIELD: &str = "time_amount";
pub const TIME_METRIC_FIELD: &str = "time_metric";
