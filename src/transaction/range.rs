//! Date ranges for filtering transactions by the day they happened on.
//!
//! Transactions are stored as timestamps, so a range of days is converted to
//! the half-open interval `[start 00:00, day after end 00:00)` in UTC. This
//! includes every transaction on the end day, whatever its time of day.

use time::{
    Date, OffsetDateTime, PrimitiveDateTime, format_description::BorrowedFormatItem,
    macros::format_description,
};

use crate::Error;

/// The format of dates in query parameters, e.g. "2024-01-05".
pub const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// An optional start and end day, both inclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    /// The first day to include.
    pub start: Option<Date>,
    /// The last day to include.
    pub end: Option<Date>,
}

impl DateRange {
    /// Parse a range from optional `YYYY-MM-DD` query parameters.
    ///
    /// Missing and empty strings leave that side of the range open.
    ///
    /// # Errors
    /// Returns [Error::InvalidDate] if either date is not a valid `YYYY-MM-DD` date.
    pub fn parse(start: Option<&str>, end: Option<&str>) -> Result<Self, Error> {
        let parse_optional = |text: Option<&str>| {
            text.filter(|text| !text.trim().is_empty())
                .map(parse_date)
                .transpose()
        };

        Ok(Self {
            start: parse_optional(start)?,
            end: parse_optional(end)?,
        })
    }

    /// The earliest timestamp in the range, inclusive.
    pub fn lower_bound(&self) -> Option<OffsetDateTime> {
        self.start.map(|start| start.midnight().assume_utc())
    }

    /// The first timestamp after the range, exclusive.
    pub fn upper_bound(&self) -> Option<OffsetDateTime> {
        self.end.map(end_of_day_exclusive_bound)
    }

    /// Whether `timestamp` falls within the range.
    #[cfg(test)]
    pub(crate) fn contains(&self, timestamp: OffsetDateTime) -> bool {
        let after_start = self
            .lower_bound()
            .is_none_or(|lower_bound| timestamp >= lower_bound);
        let before_end = self
            .upper_bound()
            .is_none_or(|upper_bound| timestamp < upper_bound);

        after_start && before_end
    }
}

/// Get the exclusive upper bound for a range that ends on `date`, i.e.
/// midnight UTC at the start of the following day.
///
/// Comparing with `<` against this bound includes every timestamp on `date`,
/// unlike comparing with `<=` against `date` at 23:59:59 which drops the last
/// fraction of a second.
///
/// The last representable date has no following day and maps to the largest
/// representable timestamp.
pub fn end_of_day_exclusive_bound(date: Date) -> OffsetDateTime {
    match date.next_day() {
        Some(next_day) => next_day.midnight().assume_utc(),
        None => PrimitiveDateTime::MAX.assume_utc(),
    }
}

/// Parse a `YYYY-MM-DD` date, ignoring surrounding whitespace.
///
/// # Errors
/// Returns [Error::InvalidDate] if `text` is not a valid date.
pub(crate) fn parse_date(text: &str) -> Result<Date, Error> {
    Date::parse(text.trim(), DATE_FORMAT).map_err(|_| Error::InvalidDate(text.to_owned()))
}

#[cfg(test)]
mod tests {
    use time::{
        Date, Duration,
        macros::{date, datetime},
    };

    use crate::Error;

    use super::{DateRange, end_of_day_exclusive_bound, parse_date};

    #[test]
    fn bound_is_midnight_of_next_day() {
        assert_eq!(
            end_of_day_exclusive_bound(date!(2024 - 01 - 05)),
            datetime!(2024-01-06 00:00 UTC)
        );
    }

    #[test]
    fn bound_rolls_over_month_and_year() {
        assert_eq!(
            end_of_day_exclusive_bound(date!(2024 - 02 - 29)),
            datetime!(2024-03-01 00:00 UTC)
        );
        assert_eq!(
            end_of_day_exclusive_bound(date!(2023 - 12 - 31)),
            datetime!(2024-01-01 00:00 UTC)
        );
    }

    #[test]
    fn bound_includes_last_instant_of_day() {
        let bound = end_of_day_exclusive_bound(date!(2024 - 01 - 05));
        let last_instant = datetime!(2024-01-05 23:59:59.999 UTC);

        assert!(last_instant < bound);
        assert!(bound - last_instant == Duration::milliseconds(1));
    }

    #[test]
    fn bound_for_last_representable_date_does_not_panic() {
        let bound = end_of_day_exclusive_bound(Date::MAX);

        assert!(bound > Date::MAX.midnight().assume_utc());
    }

    #[test]
    fn range_includes_whole_end_day() {
        let range = DateRange {
            start: Some(date!(2024 - 01 - 01)),
            end: Some(date!(2024 - 01 - 05)),
        };

        assert!(range.contains(datetime!(2024-01-01 00:00 UTC)));
        assert!(range.contains(datetime!(2024-01-05 00:00 UTC)));
        assert!(range.contains(datetime!(2024-01-05 18:30 UTC)));
        assert!(!range.contains(datetime!(2024-01-06 00:00 UTC)));
        assert!(!range.contains(datetime!(2023-12-31 23:59:59 UTC)));
    }

    #[test]
    fn open_range_contains_everything() {
        let range = DateRange::default();

        assert!(range.contains(datetime!(1970-01-01 00:00 UTC)));
        assert!(range.contains(datetime!(2999-12-31 23:59 UTC)));
    }

    #[test]
    fn parse_range_treats_empty_strings_as_missing() {
        let range = DateRange::parse(Some(""), Some("2024-01-05")).unwrap();

        assert_eq!(
            range,
            DateRange {
                start: None,
                end: Some(date!(2024 - 01 - 05)),
            }
        );
    }

    #[test]
    fn parse_range_rejects_malformed_dates() {
        assert_eq!(
            DateRange::parse(Some("2024-13-01"), None),
            Err(Error::InvalidDate("2024-13-01".to_owned()))
        );
        assert_eq!(
            DateRange::parse(None, Some("yesterday")),
            Err(Error::InvalidDate("yesterday".to_owned()))
        );
    }

    #[test]
    fn parse_date_requires_iso_format() {
        assert_eq!(parse_date("2024-01-05"), Ok(date!(2024 - 01 - 05)));
        assert!(parse_date("2024/01/05").is_err());
    }
}
