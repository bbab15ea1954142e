//! [`Room`] list queries.

use common::operations::Select;
use serde::Deserialize;
use tracerr::Traced;

use crate::{
    domain::{
        room::{Category, Season},
        Room,
    },
    infra::catalog,
    Service,
};

use super::Query;

/// Queries the ordered [`Room`] list of the catalog.
#[derive(Clone, Copy, Debug, Default)]
pub struct List {
    /// [`Filter`] to narrow the list down with.
    pub filter: Filter,
}

/// Filter of a [`Room`] [`List`] query.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Filter {
    /// [`Category`] to narrow down to.
    pub category: Option<Category>,

    /// [`Season`] the [`Room`]s must be offered in.
    pub season: Option<Season>,

    /// Featured flag to narrow down to.
    pub featured: Option<bool>,

    /// Availability flag to narrow down to.
    pub available: Option<bool>,
}

impl Filter {
    /// Indicates whether the given [`Room`] passes this [`Filter`].
    #[must_use]
    pub fn matches(&self, room: &Room) -> bool {
        self.category.map_or(true, |c| room.category == c)
            && self.season.map_or(true, |s| room.is_offered_in(s))
            && self.featured.map_or(true, |f| room.is_featured == f)
            && self.available.map_or(true, |a| room.is_available == a)
    }
}

impl<C, S> Query<List> for Service<C, S>
where
    C: catalog::Catalog<
        Select<Filter>,
        Ok = Vec<Room>,
        Err = Traced<catalog::Error>,
    >,
{
    type Ok = Vec<Room>;
    type Err = Traced<catalog::Error>;

    async fn execute(&self, List { filter }: List) -> Result<Self::Ok, Self::Err> {
        self.catalog()
            .execute(Select(filter))
            .await
            .map_err(tracerr::wrap!())
    }
}
