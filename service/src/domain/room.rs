//! [`Room`] definitions.

use std::{str::FromStr, sync::LazyLock};

use common::{define_kind, Money};
use derive_more::{AsRef, Display, Into};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Bookable room type of the pension.
///
/// Immutable reference data: loaded once at startup and never mutated.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    /// ID of this [`Room`].
    pub id: Id,

    /// [`Name`] of this [`Room`].
    pub name: Name,

    /// Marketing subtitle of this [`Room`].
    pub subtitle: String,

    /// Nightly price of this [`Room`].
    pub price_per_night: Money,

    /// Minimum stay in nights.
    pub min_stay: u8,

    /// Maximum guest [`Capacity`] of this [`Room`].
    pub max_guests: Capacity,

    /// Size of this [`Room`] in square meters.
    pub size_sqm: u16,

    /// [`Category`] of this [`Room`].
    pub category: Category,

    /// [`Season`]s this [`Room`] is offered in.
    pub available_seasons: Vec<Season>,

    /// Indicator whether this [`Room`] is currently offered at all.
    pub is_available: bool,

    /// Indicator whether this [`Room`] is featured on the landing page.
    pub is_featured: bool,
}

impl Room {
    /// Indicates whether this [`Room`] is offered in the given [`Season`].
    #[must_use]
    pub fn is_offered_in(&self, season: Season) -> bool {
        self.available_seasons.contains(&season)
    }
}

/// ID of a [`Room`].
///
/// A stable kebab-case slug (e.g. `forest-suite`).
#[derive(
    AsRef,
    Clone,
    Debug,
    Deserialize,
    Display,
    Eq,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
#[as_ref(str, String)]
#[serde(into = "String", try_from = "String")]
pub struct Id(String);

impl Id {
    /// Creates a new [`Id`] if the given `slug` is valid.
    #[must_use]
    pub fn new(slug: impl Into<String>) -> Option<Self> {
        let slug = slug.into();
        Self::check(&slug).then_some(Self(slug))
    }

    /// Checks whether the given `slug` is a valid [`Id`].
    fn check(slug: impl AsRef<str>) -> bool {
        /// Regular expression checking [`Id`] invariants:
        /// - Must be lowercase alphanumeric words joined with single hyphens;
        /// - Must be between 1 and 64 characters long.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("valid regex")
        });

        let slug = slug.as_ref();
        slug.len() <= 64 && REGEX.is_match(slug)
    }
}

impl FromStr for Id {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `room::Id`")
    }
}

impl TryFrom<String> for Id {
    type Error = &'static str;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s).ok_or("invalid `room::Id`")
    }
}

/// Name of a [`Room`].
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, Into, PartialEq, Serialize,
)]
#[as_ref(str, String)]
#[serde(into = "String", try_from = "String")]
pub struct Name(String);

impl Name {
    /// Creates a new [`Name`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        Self::check(&name).then_some(Self(name))
    }

    /// Checks whether the given `name` is a valid [`Name`].
    fn check(name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        name.trim() == name && !name.is_empty() && name.len() <= 128
    }
}

impl FromStr for Name {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `room::Name`")
    }
}

impl TryFrom<String> for Name {
    type Error = &'static str;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s).ok_or("invalid `room::Name`")
    }
}

/// Maximum number of guests a [`Room`] accommodates.
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
pub struct Capacity(u8);

impl Capacity {
    /// Maximum supported [`Capacity`] of a single [`Room`].
    pub const MAX: u8 = 16;

    /// Creates a new [`Capacity`] if the given `guests` number is valid.
    #[must_use]
    pub fn new(guests: u8) -> Option<Self> {
        ((1..=Self::MAX).contains(&guests)).then_some(Self(guests))
    }
}

impl PartialEq<u8> for Capacity {
    fn eq(&self, other: &u8) -> bool {
        self.0 == *other
    }
}

impl PartialOrd<u8> for Capacity {
    fn partial_cmp(&self, other: &u8) -> Option<std::cmp::Ordering> {
        Some(self.0.cmp(other))
    }
}

impl TryFrom<u8> for Capacity {
    type Error = &'static str;

    fn try_from(guests: u8) -> Result<Self, Self::Error> {
        Self::new(guests).ok_or("invalid `room::Capacity`")
    }
}

define_kind! {
    #[doc = "Category of a [`Room`]."]
    enum Category {
        #[doc = "Standard room."]
        Standard = 1,

        #[doc = "Standard room with extended amenities."]
        StandardPlus = 2,

        #[doc = "Premium room."]
        Premium = 3,
    }
}

define_kind! {
    #[doc = "Season a [`Room`] may be offered in."]
    enum Season {
        #[doc = "Spring season."]
        Spring = 1,

        #[doc = "Summer season."]
        Summer = 2,

        #[doc = "Autumn season."]
        Autumn = 3,

        #[doc = "Winter season."]
        Winter = 4,
    }
}

#[cfg(test)]
mod spec {
    use super::{Capacity, Id};

    #[test]
    fn id_accepts_kebab_case_slugs() {
        assert!(Id::new("forest-suite").is_some());
        assert!(Id::new("garden-deluxe").is_some());
        assert!(Id::new("a1").is_some());

        assert!(Id::new("").is_none());
        assert!(Id::new("Forest-Suite").is_none());
        assert!(Id::new("forest suite").is_none());
        assert!(Id::new("forest--suite").is_none());
        assert!(Id::new("-forest").is_none());
        assert!(Id::new("forest-").is_none());
    }

    #[test]
    fn capacity_is_bounded() {
        assert!(Capacity::new(1).is_some());
        assert!(Capacity::new(Capacity::MAX).is_some());

        assert!(Capacity::new(0).is_none());
        assert!(Capacity::new(Capacity::MAX + 1).is_none());
    }
}
