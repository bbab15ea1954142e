//! [`Inquiry`] definitions.

use std::{str::FromStr, sync::LazyLock};

#[cfg(doc)]
use common::DateTime;
use common::{unit, DateOf, DateTimeOf};
use derive_more::{AsRef, Display, From, Into};
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{quote::Quote, room};

/// [`Date`] a guest checks in.
///
/// [`Date`]: common::Date
pub type CheckInDate = DateOf<unit::Arrival>;

/// [`Date`] a guest checks out.
///
/// [`Date`]: common::Date
pub type CheckOutDate = DateOf<unit::Departure>;

/// Finalized reservation inquiry, as handed to the submission collaborator.
///
/// A snapshot of a valid [`Draft`] together with the [`Quote`] derived from
/// it. Not a binding booking: the pension confirms availability out-of-band.
///
/// [`Draft`]: super::Draft
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Inquiry {
    /// ID of this [`Inquiry`].
    pub id: Id,

    /// [`GuestName`] of the inquiring guest.
    pub guest_name: GuestName,

    /// [`Phone`] of the inquiring guest.
    pub phone: Phone,

    /// [`Email`] of the inquiring guest.
    pub email: Email,

    /// [`CheckInDate`] of the requested stay.
    pub check_in: CheckInDate,

    /// [`CheckOutDate`] of the requested stay.
    pub check_out: CheckOutDate,

    /// Number of guests staying.
    pub guests: GuestCount,

    /// ID of the requested [`Room`].
    ///
    /// [`Room`]: super::Room
    pub room: room::Id,

    /// Free-text [`Message`] of the guest.
    pub message: Option<Message>,

    /// [`Quote`] derived from the requested stay.
    pub quote: Quote,

    /// [`DateTime`] when this [`Inquiry`] was received.
    #[serde(with = "common::datetime::serde::rfc3339")]
    pub received_at: ReceptionDateTime,
}

/// ID of an [`Inquiry`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    derive_more::FromStr,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Name of an inquiring guest.
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, Into, PartialEq, Serialize,
)]
#[as_ref(str, String)]
#[serde(into = "String", try_from = "String")]
pub struct GuestName(String);

impl GuestName {
    /// Creates a new [`GuestName`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        Self::check(&name).then_some(Self(name))
    }

    /// Checks whether the given `name` is a valid [`GuestName`].
    fn check(name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        name.trim() == name && !name.is_empty() && name.len() <= 512
    }
}

impl FromStr for GuestName {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `GuestName`")
    }
}

impl TryFrom<String> for GuestName {
    type Error = &'static str;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s).ok_or("invalid `GuestName`")
    }
}

/// Email address of an inquiring guest.
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, Into, PartialEq, Serialize,
)]
#[as_ref(str, String)]
#[serde(into = "String", try_from = "String")]
pub struct Email(String);

impl Email {
    /// Creates a new [`Email`] if the given `address` is valid.
    #[must_use]
    pub fn new(address: impl Into<String>) -> Option<Self> {
        let address = address.into();
        Self::check(&address).then_some(Self(address))
    }

    /// Checks whether the given `address` is a valid [`Email`].
    pub(crate) fn check(address: impl AsRef<str>) -> bool {
        /// Regular expression checking [`Email`] format: a `local@domain.tld`
        /// shape with no whitespace and a dotted domain.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex")
        });

        REGEX.is_match(address.as_ref())
    }
}

impl FromStr for Email {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Email`")
    }
}

impl TryFrom<String> for Email {
    type Error = &'static str;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s).ok_or("invalid `Email`")
    }
}

/// Phone number of an inquiring guest.
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, Into, PartialEq, Serialize,
)]
#[as_ref(str, String)]
#[serde(into = "String", try_from = "String")]
pub struct Phone(String);

impl Phone {
    /// Creates a new [`Phone`] if the given `number` is valid.
    #[must_use]
    pub fn new(number: impl Into<String>) -> Option<Self> {
        let number = number.into();
        Self::check(&number).then_some(Self(number))
    }

    /// Checks whether the given `number` is a valid [`Phone`].
    pub(crate) fn check(number: impl AsRef<str>) -> bool {
        /// Regular expression checking [`Phone`] format: digits, spaces,
        /// hyphens, parentheses and plus signs only.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^[0-9\s\-+()]+$").expect("valid regex")
        });

        REGEX.is_match(number.as_ref())
    }
}

impl FromStr for Phone {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Phone`")
    }
}

impl TryFrom<String> for Phone {
    type Error = &'static str;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s).ok_or("invalid `Phone`")
    }
}

/// Number of guests of an [`Inquiry`].
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    Eq,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[serde(into = "u8", try_from = "u8")]
pub struct GuestCount(u8);

impl GuestCount {
    /// Minimum number of guests of a single stay.
    pub const MIN: u8 = 1;

    /// Maximum number of guests of a single stay.
    ///
    /// The per-[`Room`] capacity bound is checked separately.
    ///
    /// [`Room`]: super::Room
    pub const MAX: u8 = 10;

    /// Creates a new [`GuestCount`] if the given `guests` number is valid.
    #[must_use]
    pub fn new(guests: u8) -> Option<Self> {
        ((Self::MIN..=Self::MAX).contains(&guests)).then_some(Self(guests))
    }
}

impl TryFrom<u8> for GuestCount {
    type Error = &'static str;

    fn try_from(guests: u8) -> Result<Self, Self::Error> {
        Self::new(guests).ok_or("invalid `GuestCount`")
    }
}

/// Free-text message attached to an [`Inquiry`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq, Serialize)]
#[as_ref(str, String)]
#[serde(transparent)]
pub struct Message(String);

impl Message {
    /// Maximum length of a [`Message`], in bytes.
    pub const MAX_LEN: usize = 2000;

    /// Creates a new [`Message`] from the given `text`.
    ///
    /// [`None`] is returned when the `text` is empty after trimming or
    /// exceeds [`Message::MAX_LEN`].
    #[must_use]
    pub fn new(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        (!text.trim().is_empty() && text.len() <= Self::MAX_LEN)
            .then_some(Self(text))
    }
}

/// [`DateTime`] when an [`Inquiry`] was received.
pub type ReceptionDateTime = DateTimeOf<(Inquiry, unit::Creation)>;

#[cfg(test)]
mod spec {
    use super::{Email, GuestCount, GuestName, Phone};

    #[test]
    fn email_requires_local_at_dotted_domain() {
        assert!(Email::new("a@b.com").is_some());
        assert!(Email::new("kim.minji@pension.co.kr").is_some());

        assert!(Email::new("").is_none());
        assert!(Email::new("plain").is_none());
        assert!(Email::new("a@b").is_none());
        assert!(Email::new("a b@c.com").is_none());
        assert!(Email::new("a@b c.com").is_none());
    }

    #[test]
    fn phone_allows_digits_and_separators() {
        assert!(Phone::new("010-1234-5678").is_some());
        assert!(Phone::new("+82 33 123 4567").is_some());
        assert!(Phone::new("(033) 123-4567").is_some());

        assert!(Phone::new("").is_none());
        assert!(Phone::new("call me").is_none());
        assert!(Phone::new("010-1234-567a").is_none());
    }

    #[test]
    fn guest_name_must_be_trimmed_and_non_empty() {
        assert!(GuestName::new("Kim").is_some());

        assert!(GuestName::new("").is_none());
        assert!(GuestName::new(" Kim").is_none());
        assert!(GuestName::new("Kim ").is_none());
    }

    #[test]
    fn contact_newtypes_convert_back_into_strings() {
        let name = GuestName::new("Kim").unwrap();
        assert_eq!(String::from(name), "Kim");

        let email = Email::new("a@b.com").unwrap();
        assert_eq!(String::from(email), "a@b.com");

        let phone = Phone::new("010-1234-5678").unwrap();
        assert_eq!(String::from(phone), "010-1234-5678");
    }

    #[test]
    fn guest_count_is_bounded() {
        assert!(GuestCount::new(GuestCount::MIN).is_some());
        assert!(GuestCount::new(GuestCount::MAX).is_some());

        assert!(GuestCount::new(0).is_none());
        assert!(GuestCount::new(GuestCount::MAX + 1).is_none());
    }
}
