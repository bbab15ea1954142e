//! `Room` catalog endpoints.

use axum::{
    extract::{Path, Query},
    Extension, Json,
};
use service::{
    domain::{room, Room},
    query, Query as _,
};

use crate::{define_error, error::AsError as _, Error};

define_error! {
    enum NotFoundError {
        #[code = "ROOM_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Room` with the provided ID does not exist"]
        RoomNotExists,
    }
}

/// Responds with the ordered catalog [`Room`] list, narrowed down by the
/// query-string [`Filter`].
///
/// [`Filter`]: query::rooms::Filter
pub async fn list(
    Extension(service): Extension<crate::Service>,
    Query(filter): Query<query::rooms::Filter>,
) -> Result<Json<Vec<Room>>, Error> {
    service
        .execute(query::rooms::List { filter })
        .await
        .map(Json)
        .map_err(|e| e.into_error())
}

/// Responds with the catalog [`Room`] with the provided ID.
pub async fn by_id(
    Extension(service): Extension<crate::Service>,
    Path(id): Path<room::Id>,
) -> Result<Json<Room>, Error> {
    service
        .execute(query::room::ById::by(id))
        .await
        .map_err(|e| e.into_error())?
        .map(Json)
        .ok_or_else(|| NotFoundError::RoomNotExists.into())
}
