//! Room [`Catalog`]-related implementations.

use std::{collections::HashSet, sync::Arc};

use common::{
    money::Currency,
    operations::{By, Select},
    Money,
};
use derive_more::{Display, Error as StdError};
use rust_decimal::Decimal;
use tracerr::Traced;

use crate::{
    domain::{
        room::{self, Capacity, Category, Season},
        Room,
    },
    query::rooms,
};

/// Read-only room catalog operation.
pub use common::Handler as Catalog;

/// [`Catalog`] error.
#[derive(Debug, Display, StdError)]
pub enum Error {
    /// [`Catalog`] contains no [`Room`]s at all.
    #[display("room catalog is empty")]
    Empty,

    /// [`room::Id`] occurs more than once.
    #[display("`{_0}` room ID is duplicated")]
    DuplicateId(#[error(not(source))] room::Id),

    /// [`Room`] carries a non-positive nightly price.
    #[display("`{_0}` room has a non-positive nightly price")]
    NonPositivePrice(#[error(not(source))] room::Id),
}

/// In-memory [`Catalog`] of [`Room`]s.
///
/// Loaded once at startup and never mutated afterwards, so it is shared
/// freely between tasks without locking.
#[derive(Clone, Debug)]
pub struct InMemory {
    /// Ordered [`Room`] records of this catalog.
    rooms: Arc<Vec<Room>>,
}

impl InMemory {
    /// Creates a new [`InMemory`] catalog from the given [`Room`] list,
    /// preserving its order.
    ///
    /// # Errors
    ///
    /// Returns an error if the list is empty, contains duplicate IDs, or a
    /// non-positive nightly price.
    pub fn new(rooms: Vec<Room>) -> Result<Self, Traced<Error>> {
        if rooms.is_empty() {
            return Err(tracerr::new!(Error::Empty));
        }

        let mut seen = HashSet::new();
        for room in &rooms {
            if !seen.insert(room.id.clone()) {
                return Err(tracerr::new!(Error::DuplicateId(room.id.clone())));
            }
            if !room.price_per_night.is_positive() {
                return Err(tracerr::new!(Error::NonPositivePrice(
                    room.id.clone(),
                )));
            }
        }

        Ok(Self {
            rooms: Arc::new(rooms),
        })
    }

    /// Creates a new [`InMemory`] catalog seeded with the three pension
    /// rooms.
    #[expect(clippy::missing_panics_doc, reason = "infallible")]
    #[must_use]
    pub fn with_pension_rooms() -> Self {
        use Season::{Autumn, Spring, Summer, Winter};

        /// Builds a seed [`Room`] record.
        #[expect(clippy::too_many_arguments, reason = "still readable")]
        fn seed(
            id: &str,
            name: &str,
            subtitle: &str,
            price: i64,
            min_stay: u8,
            max_guests: u8,
            size_sqm: u16,
            category: Category,
            available_seasons: Vec<Season>,
            is_featured: bool,
        ) -> Room {
            Room {
                id: room::Id::new(id).expect("valid slug"),
                name: room::Name::new(name).expect("valid name"),
                subtitle: subtitle.into(),
                price_per_night: Money {
                    amount: Decimal::from(price),
                    currency: Currency::Krw,
                },
                min_stay,
                max_guests: Capacity::new(max_guests).expect("valid capacity"),
                size_sqm,
                category,
                available_seasons,
                is_available: true,
                is_featured,
            }
        }

        Self::new(vec![
            seed(
                "forest-suite",
                "Forest Suite",
                "Premium Forest Experience",
                180_000,
                1,
                4,
                85,
                Category::Premium,
                vec![Spring, Summer, Autumn, Winter],
                true,
            ),
            seed(
                "mountain-view",
                "Mountain View",
                "Scenic Mountain Escape",
                140_000,
                1,
                3,
                65,
                Category::StandardPlus,
                vec![Spring, Summer, Autumn, Winter],
                true,
            ),
            seed(
                "garden-deluxe",
                "Garden Deluxe",
                "Serene Garden Sanctuary",
                120_000,
                1,
                2,
                55,
                Category::Standard,
                vec![Spring, Summer, Autumn],
                false,
            ),
        ])
        .expect("valid seed rooms")
    }

    /// Returns the [`Room`] records of this catalog.
    #[must_use]
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }
}

impl Catalog<Select<By<Option<Room>, room::Id>>> for InMemory {
    type Ok = Option<Room>;
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Room>, room::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Ok(self.rooms.iter().find(|r| r.id == id).cloned())
    }
}

impl Catalog<Select<rooms::Filter>> for InMemory {
    type Ok = Vec<Room>;
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Select(filter): Select<rooms::Filter>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self
            .rooms
            .iter()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod spec {
    use common::{
        operations::{By, Select},
        Handler as _,
    };

    use crate::{
        domain::{room::Season, Room},
        query::rooms,
    };

    use super::InMemory;

    #[tokio::test]
    async fn resolves_rooms_by_id() {
        let catalog = InMemory::with_pension_rooms();

        let room: Option<Room> = catalog
            .execute(Select(By::new("garden-deluxe".parse().unwrap())))
            .await
            .unwrap();
        assert_eq!(
            AsRef::<str>::as_ref(&room.unwrap().name),
            "Garden Deluxe",
        );

        let missing: Option<Room> = catalog
            .execute(Select(By::new("lake-house".parse().unwrap())))
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn lists_rooms_in_catalog_order() {
        let catalog = InMemory::with_pension_rooms();

        let rooms = catalog
            .execute(Select(rooms::Filter::default()))
            .await
            .unwrap();

        let ids = rooms
            .iter()
            .map(|r| r.id.as_ref())
            .collect::<Vec<&str>>();
        assert_eq!(ids, ["forest-suite", "mountain-view", "garden-deluxe"]);
    }

    #[tokio::test]
    async fn filters_rooms_by_season_and_featuring() {
        let catalog = InMemory::with_pension_rooms();

        let winter = catalog
            .execute(Select(rooms::Filter {
                season: Some(Season::Winter),
                ..rooms::Filter::default()
            }))
            .await
            .unwrap();
        assert_eq!(winter.len(), 2, "garden-deluxe closes for winter");

        let featured = catalog
            .execute(Select(rooms::Filter {
                featured: Some(true),
                ..rooms::Filter::default()
            }))
            .await
            .unwrap();
        assert_eq!(featured.len(), 2);
    }

    #[test]
    fn rejects_invalid_catalogs() {
        let rooms = InMemory::with_pension_rooms().rooms().to_vec();

        assert!(InMemory::new(vec![]).is_err());

        let mut duplicated = rooms.clone();
        duplicated.push(rooms[0].clone());
        assert!(InMemory::new(duplicated).is_err());
    }
}
