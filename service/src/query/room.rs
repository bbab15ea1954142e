//! [`Query`] collection related to a single [`Room`].

use common::operations::By;

use crate::domain::{room, Room};
#[cfg(doc)]
use crate::Query;

use super::CatalogQuery;

/// Queries a [`Room`] by its [`room::Id`].
pub type ById = CatalogQuery<By<Option<Room>, room::Id>>;
