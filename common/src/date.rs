//! Calendar date utilities.

use std::{cmp::Ordering, fmt, marker::PhantomData};

use derive_more::{Debug, Display, Error};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use time::{format_description::BorrowedFormatItem, macros::format_description};

/// Untyped calendar date.
pub type Date = DateOf;

/// [ISO 8601] (`YYYY-MM-DD`) format of a [`Date`].
///
/// [ISO 8601]: https://wikipedia.org/wiki/ISO_8601
const ISO8601: &[BorrowedFormatItem<'_>] =
    format_description!("[year]-[month]-[day]");

/// Calendar date with a day granularity (no time-of-day component).
#[derive(Debug)]
pub struct DateOf<Of: ?Sized = ()> {
    /// Inner representation of the date.
    inner: time::Date,

    /// Type parameter describing the kind of date.
    #[debug(skip)]
    _of: PhantomData<Of>,
}

impl<Of: ?Sized> DateOf<Of> {
    /// Creates a new [`Date`] representing the current calendar day.
    ///
    /// UTC is the reference timezone: all day-granularity comparisons (such
    /// as "not in the past" checks) judge against the UTC calendar day, not
    /// the local day of the caller or of the business.
    #[must_use]
    pub fn today() -> Self {
        Self {
            inner: time::OffsetDateTime::now_utc().date(),
            _of: PhantomData,
        }
    }

    /// Creates a new [`Date`] from the provided [ISO 8601] (`YYYY-MM-DD`)
    /// string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid [ISO 8601] date.
    ///
    /// [ISO 8601]: https://wikipedia.org/wiki/ISO_8601
    pub fn from_iso8601(input: &str) -> Result<Self, ParseError> {
        time::Date::parse(input, ISO8601)
            .map(|inner| Self {
                inner,
                _of: PhantomData,
            })
            .map_err(ParseError)
    }

    /// Returns the [`Date`] as an [ISO 8601] (`YYYY-MM-DD`) string.
    ///
    /// [ISO 8601]: https://wikipedia.org/wiki/ISO_8601
    #[expect(clippy::missing_panics_doc, reason = "infallible")]
    #[must_use]
    pub fn to_iso8601(&self) -> String {
        self.inner
            .format(ISO8601)
            .unwrap_or_else(|e| panic!("cannot format `Date` as ISO 8601: {e}"))
    }

    /// Returns the number of whole days from the `earlier` [`Date`] to this
    /// one.
    ///
    /// Negative if this [`Date`] is before the `earlier` one.
    #[must_use]
    pub fn days_since<OtherOf: ?Sized>(
        &self,
        earlier: DateOf<OtherOf>,
    ) -> i64 {
        (self.inner - earlier.inner).whole_days()
    }

    /// Coerces one kind of [`Date`] into another.
    #[must_use]
    pub fn coerce<NewOf: ?Sized>(self) -> DateOf<NewOf> {
        DateOf {
            inner: self.inner,
            _of: PhantomData,
        }
    }
}

/// Error of parsing a [`Date`] from a string.
#[derive(Clone, Copy, Debug, Display, Error)]
#[display("invalid `Date`: {_0}")]
pub struct ParseError(time::error::Parse);

impl<Of: ?Sized> Copy for DateOf<Of> {}
impl<Of: ?Sized> Clone for DateOf<Of> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Of: ?Sized> Eq for DateOf<Of> {}
impl<Of: ?Sized> PartialEq for DateOf<Of> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<Of: ?Sized> Ord for DateOf<Of> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.inner.cmp(&other.inner)
    }
}
impl<Of: ?Sized> PartialOrd for DateOf<Of> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<Of: ?Sized> fmt::Display for DateOf<Of> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

impl<Of: ?Sized> From<time::Date> for DateOf<Of> {
    fn from(inner: time::Date) -> Self {
        Self {
            inner,
            _of: PhantomData,
        }
    }
}

impl<Of: ?Sized> From<DateOf<Of>> for time::Date {
    fn from(date: DateOf<Of>) -> Self {
        date.inner
    }
}

impl<Of: ?Sized> Serialize for DateOf<Of> {
    fn serialize<S: Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
        ser.serialize_str(&self.to_iso8601())
    }
}

impl<'de, Of: ?Sized> Deserialize<'de> for DateOf<Of> {
    fn deserialize<D: Deserializer<'de>>(de: D) -> Result<Self, D::Error> {
        let s = String::deserialize(de)?;
        Self::from_iso8601(&s).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod spec {
    use time::macros::date;

    use super::Date;

    #[test]
    fn parses_and_formats_iso8601() {
        let d = Date::from_iso8601("2025-06-01").unwrap();
        assert_eq!(time::Date::from(d), date!(2025 - 06 - 01));
        assert_eq!(d.to_iso8601(), "2025-06-01");

        assert!(Date::from_iso8601("2025-6-1").is_err());
        assert!(Date::from_iso8601("2025-13-01").is_err());
        assert!(Date::from_iso8601("not a date").is_err());
    }

    #[test]
    fn counts_whole_days() {
        let check_in = Date::from_iso8601("2025-06-01").unwrap();
        let check_out = Date::from_iso8601("2025-06-03").unwrap();

        assert_eq!(check_out.days_since(check_in), 2);
        assert_eq!(check_in.days_since(check_out), -2);
        assert_eq!(check_in.days_since(check_in), 0);
    }
}
