//! Dropdown rendering and value decomposition.
//!
//! A split selector owns one [`Select`] per part. On render it decomposes
//! the stored value into one sub-value per part and marks the matching
//! `<option>` as selected. Parts are named `{name}_0`, `{name}_1`, ...

use crate::choices::{ChoiceKind, ChoiceOption};
use crate::consts::PART_SEPARATOR;
use crate::convert::{round_down_instant, round_up_instant};
use crate::types::{DateParts, TimeParts, Year};
use crate::window::YearWindow;
use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc};
use chrono_tz::Tz;
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt::Write;
use tracing::debug;

/// Sub-values for each part; `None` means nothing selected
pub type PartValues = Vec<Option<String>>;

/// Escapes text for use inside HTML attributes and element content
pub fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }
    let mut escaped = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            other => escaped.push(other),
        }
    }
    Cow::Owned(escaped)
}

/// Name of part `index` of the multi-part input `name`
pub fn part_name(name: &str, index: usize) -> String {
    format!("{name}{PART_SEPARATOR}{index}")
}

/// A single `<select>` over one part's options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Select {
    kind:    ChoiceKind,
    options: Vec<ChoiceOption>,
}

impl Select {
    pub fn new(kind: ChoiceKind, window: &YearWindow) -> Self {
        Self {
            kind,
            options: kind.options(window),
        }
    }

    /// A dropdown whose options do not depend on a year window; `None` for
    /// `Years`
    pub fn fixed(kind: ChoiceKind) -> Option<Self> {
        Some(Self {
            kind,
            options: kind.fixed_options()?,
        })
    }

    pub const fn kind(&self) -> ChoiceKind {
        self.kind
    }

    pub fn options(&self) -> &[ChoiceOption] {
        &self.options
    }

    /// Renders the dropdown; the option equal to `selected` (or the blank
    /// option when nothing is selected) is marked `selected="selected"`.
    pub fn render(&self, name: &str, selected: Option<&str>, id: Option<&str>) -> String {
        let selected = selected.unwrap_or_default();
        let mut html = String::new();
        // writing into a String cannot fail
        let _ = write!(
            html,
            r#"<select class="{}" name="{}""#,
            self.kind.css_class(),
            escape_html(name)
        );
        if let Some(id) = id {
            let _ = write!(html, r#" id="{}""#, escape_html(id));
        }
        html.push_str(">\n");
        for option in &self.options {
            let marker = if option.value == selected {
                r#" selected="selected""#
            } else {
                ""
            };
            let _ = writeln!(
                html,
                r#"<option value="{}"{marker}>{}</option>"#,
                escape_html(&option.value),
                escape_html(&option.label)
            );
        }
        html.push_str("</select>");
        html
    }
}

fn render_selects(
    selects: &[Select],
    name: &str,
    values: &[Option<String>],
    id: Option<&str>,
    first_index: usize,
) -> String {
    selects
        .iter()
        .enumerate()
        .map(|(offset, select)| {
            let index = first_index + offset;
            let selected = values.get(offset).and_then(Option::as_deref);
            let part_id = id.map(|id| part_name(id, index));
            select.render(&part_name(name, index), selected, part_id.as_deref())
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// A group of dropdowns that together edit one value
pub trait SplitWidget {
    type Value;

    /// The dropdowns, in part order
    fn selects(&self) -> &[Select];

    /// Splits `value` into one sub-value per part, localized into `tz`.
    /// An absent value yields one `None` per part.
    fn decompose(&self, value: Option<&Self::Value>, tz: Tz) -> PartValues;

    /// Renders every part with the given sub-values pre-selected
    fn render_values(&self, name: &str, values: &[Option<String>], id: Option<&str>) -> String {
        render_selects(self.selects(), name, values, id, 0)
    }

    /// Decomposes `value` and renders it
    fn render(&self, name: &str, value: Option<&Self::Value>, tz: Tz, id: Option<&str>) -> String {
        let values = self.decompose(value, tz);
        self.render_values(name, &values, id)
    }

    /// Collects `name_0 .. name_{n-1}` from submitted form data.
    /// Missing keys come back as `None`.
    fn value_from_data(&self, data: &HashMap<String, String>, name: &str) -> PartValues {
        (0..self.selects().len())
            .map(|index| data.get(&part_name(name, index)).cloned())
            .collect()
    }

    fn placeholders(&self) -> PartValues {
        vec![None; self.selects().len()]
    }
}

/// Month / day / year dropdowns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitDateSelector {
    selects: Vec<Select>,
}

impl SplitDateSelector {
    pub fn new(window: &YearWindow) -> Self {
        Self {
            selects: ChoiceKind::DATE
                .iter()
                .map(|kind| Select::new(*kind, window))
                .collect(),
        }
    }
}

impl SplitWidget for SplitDateSelector {
    type Value = NaiveDate;

    fn selects(&self) -> &[Select] {
        &self.selects
    }

    /// A calendar date has no zone, so `tz` is not consulted
    fn decompose(&self, value: Option<&NaiveDate>, _tz: Tz) -> PartValues {
        let Some(date) = value else {
            return self.placeholders();
        };
        match DateParts::from_date(*date) {
            Ok(parts) => parts.to_form_values().into_iter().map(Some).collect(),
            Err(err) => {
                debug!(%date, %err, "date cannot be split into dropdown parts");
                self.placeholders()
            }
        }
    }
}

/// A time to pre-select in a split time input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeInput {
    /// Wall-clock time without a zone, shown as-is
    Local(NaiveTime),
    /// An instant, shown as local time in the target zone
    Instant(DateTime<Utc>),
}

impl From<NaiveTime> for TimeInput {
    fn from(time: NaiveTime) -> Self {
        Self::Local(time)
    }
}

impl From<DateTime<Utc>> for TimeInput {
    fn from(instant: DateTime<Utc>) -> Self {
        Self::Instant(instant)
    }
}

impl TimeInput {
    /// Wall-clock time in `tz`
    pub fn local_time(self, tz: Tz) -> NaiveTime {
        match self {
            Self::Local(time) => time,
            Self::Instant(instant) => instant.with_timezone(&tz).time(),
        }
    }
}

/// Hour / minute / am-pm dropdowns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitTimeSelector {
    selects: Vec<Select>,
}

impl SplitTimeSelector {
    pub fn new() -> Self {
        Self {
            selects: ChoiceKind::TIME.iter().filter_map(|kind| Select::fixed(*kind)).collect(),
        }
    }
}

impl Default for SplitTimeSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl SplitWidget for SplitTimeSelector {
    type Value = TimeInput;

    fn selects(&self) -> &[Select] {
        &self.selects
    }

    fn decompose(&self, value: Option<&TimeInput>, tz: Tz) -> PartValues {
        let Some(input) = value else {
            return self.placeholders();
        };
        let parts = TimeParts::from_time(input.local_time(tz));
        parts.to_form_values().into_iter().map(Some).collect()
    }
}

/// Date dropdowns followed by time dropdowns, sharing one input name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitDateTimeSelector {
    window:          YearWindow,
    date:            SplitDateSelector,
    time:            SplitTimeSelector,
    selects:         Vec<Select>,
    group_separator: Option<String>,
}

impl SplitDateTimeSelector {
    pub fn new(window: &YearWindow) -> Self {
        let date = SplitDateSelector::new(window);
        let time = SplitTimeSelector::new();
        let selects = date.selects().iter().chain(time.selects()).cloned().collect();
        Self {
            window: *window,
            date,
            time,
            selects,
            group_separator: None,
        }
    }

    /// Markup inserted between the date and time dropdowns
    #[must_use]
    pub fn with_group_separator(mut self, separator: impl Into<String>) -> Self {
        self.group_separator = Some(separator.into());
        self
    }

    pub const fn date(&self) -> &SplitDateSelector {
        &self.date
    }

    pub const fn time(&self) -> &SplitTimeSelector {
        &self.time
    }

    /// Rounds up onto the minute grid, or down when rounding up would carry
    /// into a year the dropdown does not offer
    fn round_for_display(&self, local: &DateTime<Tz>) -> Option<DateTime<Tz>> {
        let up = round_up_instant(local)?;
        let offered = Year::from_chrono(up.year()).is_ok_and(|year| self.window.contains(year));
        if offered {
            return Some(up);
        }
        debug!(%local, window = %self.window, "rounding up leaves the year window, rounding down");
        round_down_instant(local)
    }
}

impl SplitWidget for SplitDateTimeSelector {
    type Value = DateTime<Utc>;

    fn selects(&self) -> &[Select] {
        &self.selects
    }

    fn decompose(&self, value: Option<&DateTime<Utc>>, tz: Tz) -> PartValues {
        let Some(instant) = value else {
            return self.placeholders();
        };
        let Some(rounded) = self.round_for_display(&instant.with_timezone(&tz)) else {
            debug!(%instant, "datetime cannot be rounded to the five-minute grid");
            return self.placeholders();
        };
        let rounded = rounded.naive_local();
        let date_values = self.date.decompose(Some(&rounded.date()), tz);
        if date_values.iter().any(Option::is_none) {
            return self.placeholders();
        }
        let time_values = self
            .time
            .decompose(Some(&TimeInput::Local(rounded.time())), tz);
        date_values.into_iter().chain(time_values).collect()
    }

    fn render_values(&self, name: &str, values: &[Option<String>], id: Option<&str>) -> String {
        let split = self.date.selects().len().min(values.len());
        let (date_values, time_values) = values.split_at(split);
        let date_html = render_selects(self.date.selects(), name, date_values, id, 0);
        let time_html = render_selects(
            self.time.selects(),
            name,
            time_values,
            id,
            self.date.selects().len(),
        );
        match &self.group_separator {
            Some(separator) => format!("{date_html}\n{separator}\n{time_html}"),
            None => format!("{date_html}\n{time_html}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Year;
    use chrono::TimeZone;

    fn window() -> YearWindow {
        YearWindow::new(Year::new(2025).unwrap(), Year::new(2026).unwrap()).unwrap()
    }

    fn some(values: &[&str]) -> PartValues {
        values.iter().map(|v| Some((*v).to_owned())).collect()
    }

    #[test]
    fn test_select_render_blank() {
        let select = Select::fixed(ChoiceKind::Hours).unwrap();
        let html = select.render("hours", None, None);
        assert!(html.starts_with(r#"<select class="hours-select" name="hours">"#));
        assert!(html.contains(r#"<option value="" selected="selected">---</option>"#));
        assert!(html.contains(r#"<option value="12">12</option>"#));
        assert!(html.ends_with("</select>"));
    }

    #[test]
    fn test_select_render_selected() {
        let select = Select::new(ChoiceKind::Minutes, &window());
        let html = select.render("minutes", Some("5"), Some("id_minutes"));
        assert!(html.contains(r#"id="id_minutes""#));
        assert!(html.contains(r#"<option value="5" selected="selected">05</option>"#));
        assert!(html.contains(r#"<option value="">---</option>"#));
        assert_eq!(html.matches("selected=").count(), 1);
    }

    #[test]
    fn test_select_render_escapes_name() {
        let select = Select::new(ChoiceKind::AmPm, &window());
        let html = select.render(r#"a"b"#, None, None);
        assert!(html.contains(r#"name="a&quot;b""#));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("plain"), "plain");
        assert_eq!(escape_html("<a & 'b'>"), "&lt;a &amp; &#x27;b&#x27;&gt;");
    }

    #[test]
    fn test_decompose_none_yields_placeholders() {
        let window = window();
        assert_eq!(SplitDateSelector::new(&window).decompose(None, Tz::UTC), vec![None; 3]);
        assert_eq!(SplitTimeSelector::new().decompose(None, Tz::UTC), vec![None; 3]);
        assert_eq!(
            SplitDateTimeSelector::new(&window).decompose(None, Tz::UTC),
            vec![None; 6]
        );
    }

    #[test]
    fn test_time_render_names_parts() {
        let widget = SplitTimeSelector::new();
        let html = widget.render("time-select", None, Tz::UTC, None);
        assert!(html.contains(r#"<select class="hours-select" name="time-select_0""#));
        assert!(html.contains(r#"<select class="minutes-select" name="time-select_1""#));
        assert!(html.contains(r#"<select class="ampm-select" name="time-select_2""#));
    }

    #[test]
    fn test_time_decompose_local_is_not_shifted() {
        let widget = SplitTimeSelector::new();
        let time = TimeInput::Local(NaiveTime::from_hms_opt(14, 22, 0).unwrap());
        assert_eq!(
            widget.decompose(Some(&time), chrono_tz::America::New_York),
            some(&["2", "25", "pm"])
        );
    }

    #[test]
    fn test_time_decompose_instant_is_localized() {
        let widget = SplitTimeSelector::new();
        let instant = Utc.with_ymd_and_hms(2026, 1, 15, 14, 0, 0).unwrap();
        assert_eq!(
            widget.decompose(Some(&TimeInput::from(instant)), chrono_tz::America::New_York),
            some(&["9", "0", "am"])
        );
    }

    #[test]
    fn test_time_render_selects_decomposed_value() {
        let widget = SplitTimeSelector::new();
        let time = TimeInput::Local(NaiveTime::from_hms_opt(20, 3, 0).unwrap());
        let html = widget.render("t", Some(&time), Tz::UTC, Some("id_t"));
        assert!(html.contains(r#"<option value="8" selected="selected">8</option>"#));
        assert!(html.contains(r#"<option value="5" selected="selected">05</option>"#));
        assert!(html.contains(r#"<option value="pm" selected="selected">PM</option>"#));
        assert!(html.contains(r#"id="id_t_2""#));
    }

    #[test]
    fn test_date_decompose() {
        let widget = SplitDateSelector::new(&window());
        let date = NaiveDate::from_ymd_opt(2026, 3, 9).unwrap();
        assert_eq!(widget.decompose(Some(&date), Tz::UTC), some(&["3", "9", "2026"]));
    }

    #[test]
    fn test_datetime_decompose_localizes_and_rounds() {
        let widget = SplitDateTimeSelector::new(&window());
        // 04:58 UTC is 23:58 the previous evening in New York, rounding into the next day
        let instant = Utc.with_ymd_and_hms(2026, 1, 16, 4, 58, 0).unwrap();
        assert_eq!(
            widget.decompose(Some(&instant), chrono_tz::America::New_York),
            some(&["1", "16", "2026", "12", "0", "am"])
        );
    }

    #[test]
    fn test_datetime_decompose_rounds_past_dst_gap() {
        let widget = SplitDateTimeSelector::new(&window());
        let tz = chrono_tz::America::New_York;
        // 01:57 EST, three minutes before the clocks skip 02:00-02:59
        let instant = Utc.with_ymd_and_hms(2026, 3, 8, 6, 57, 0).unwrap();
        assert_eq!(
            widget.decompose(Some(&instant), tz),
            some(&["3", "8", "2026", "3", "0", "am"])
        );
    }

    #[test]
    fn test_datetime_decompose_stays_in_year_window() {
        let widget = SplitDateTimeSelector::new(&window());
        // rounding up would show Jan 1 2027, which the year dropdown lacks
        let instant = Utc.with_ymd_and_hms(2026, 12, 31, 23, 58, 0).unwrap();
        assert_eq!(
            widget.decompose(Some(&instant), Tz::UTC),
            some(&["12", "31", "2026", "11", "55", "pm"])
        );
        // inside the window the carry into the next year is kept
        let instant = Utc.with_ymd_and_hms(2025, 12, 31, 23, 58, 0).unwrap();
        assert_eq!(
            widget.decompose(Some(&instant), Tz::UTC),
            some(&["1", "1", "2026", "12", "0", "am"])
        );
    }

    #[test]
    fn test_fixed_select_needs_no_window() {
        assert_eq!(Select::fixed(ChoiceKind::Years), None);
        assert_eq!(
            Select::fixed(ChoiceKind::Minutes),
            Some(Select::new(ChoiceKind::Minutes, &window()))
        );
    }

    #[test]
    fn test_datetime_render_with_separator() {
        let widget = SplitDateTimeSelector::new(&window())
            .with_group_separator(r#"</div><div class="control-group">"#);
        let instant = Utc.with_ymd_and_hms(2026, 7, 4, 9, 30, 0).unwrap();
        let html = widget.render("timestamp", Some(&instant), Tz::UTC, Some("id_timestamp"));

        let separator = html.find("control-group").unwrap();
        let hours = html.find(r#"<select class="hours-select" name="timestamp_3" id="id_timestamp_3">"#).unwrap();
        let years = html.find(r#"name="timestamp_2""#).unwrap();
        assert!(years < separator && separator < hours);
        assert!(html.contains(r#"<option value="7" selected="selected">July</option>"#));
        assert!(html.contains(r#"<option value="30" selected="selected">30</option>"#));
    }

    #[test]
    fn test_value_from_data() {
        let widget = SplitTimeSelector::new();
        let data: HashMap<String, String> = [("t_0", "8"), ("t_2", "pm"), ("other", "x")]
            .into_iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        assert_eq!(
            widget.value_from_data(&data, "t"),
            vec![Some("8".to_owned()), None, Some("pm".to_owned())]
        );
    }
}
