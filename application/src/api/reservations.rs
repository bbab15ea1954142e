//! Reservation wizard endpoints.

use axum::{extract::Path, Extension, Json};
use serde::Deserialize;
use service::{
    command,
    domain::Action,
    query,
    session::{self, Step},
    Command as _, Query as _,
};

use crate::{
    define_error,
    error::{AsError, Error},
};

define_error! {
    enum NotFoundError {
        #[code = "SESSION_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Session` with the provided ID does not exist"]
        SessionNotExists,
    }
}

/// Creates a new reservation [`Session`] and responds with its [`View`].
///
/// [`Session`]: session::Session
/// [`View`]: query::session::View
pub async fn create(
    Extension(service): Extension<crate::Service>,
) -> Result<Json<query::session::View>, Error> {
    let session = service
        .execute(command::CreateSession)
        .await
        .unwrap_or_else(|e| match e {});
    view(&service, session.id).await
}

/// Responds with the [`View`] of the [`Session`] with the provided ID.
///
/// [`Session`]: session::Session
/// [`View`]: query::session::View
pub async fn by_id(
    Extension(service): Extension<crate::Service>,
    Path(id): Path<session::Id>,
) -> Result<Json<query::session::View>, Error> {
    view(&service, id).await
}

/// Applies one draft [`Action`] to the [`Session`] with the provided ID.
///
/// [`Session`]: session::Session
pub async fn update(
    Extension(service): Extension<crate::Service>,
    Path(id): Path<session::Id>,
    Json(action): Json<Action>,
) -> Result<Json<query::session::View>, Error> {
    _ = service
        .execute(command::UpdateDraft {
            session: id,
            action,
        })
        .await
        .map_err(|e| e.into_error())?;
    view(&service, id).await
}

/// Validates the current wizard step of the [`Session`] with the provided ID
/// and advances it on success.
///
/// A failed validation pass is reflected in the responded [`View`], not in
/// the status code.
///
/// [`Session`]: session::Session
/// [`View`]: query::session::View
pub async fn next(
    Extension(service): Extension<crate::Service>,
    Path(id): Path<session::Id>,
) -> Result<Json<query::session::View>, Error> {
    _ = service
        .execute(command::AdvanceStep { session: id })
        .await
        .map_err(|e| e.into_error())?;
    view(&service, id).await
}

/// Moves the [`Session`] with the provided ID back to the previous wizard
/// step.
///
/// [`Session`]: session::Session
pub async fn prev(
    Extension(service): Extension<crate::Service>,
    Path(id): Path<session::Id>,
) -> Result<Json<query::session::View>, Error> {
    _ = service
        .execute(command::RetreatStep { session: id })
        .await
        .map_err(|e| e.into_error())?;
    view(&service, id).await
}

/// Request body of the [`step`] endpoint.
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct SetStepRequest {
    /// Wizard [`Step`] to jump to.
    pub step: Step,
}

/// Jumps the [`Session`] with the provided ID directly to the given wizard
/// step.
///
/// [`Session`]: session::Session
pub async fn step(
    Extension(service): Extension<crate::Service>,
    Path(id): Path<session::Id>,
    Json(SetStepRequest { step }): Json<SetStepRequest>,
) -> Result<Json<query::session::View>, Error> {
    _ = service
        .execute(command::SetStep { session: id, step })
        .await
        .map_err(|e| e.into_error())?;
    view(&service, id).await
}

/// Submits the draft of the [`Session`] with the provided ID as a finalized
/// inquiry.
///
/// [`Session`]: session::Session
pub async fn submit(
    Extension(service): Extension<crate::Service>,
    Path(id): Path<session::Id>,
) -> Result<Json<query::session::View>, Error> {
    _ = service
        .execute(command::SubmitInquiry { session: id })
        .await
        .map_err(|e| e.into_error())?;
    view(&service, id).await
}

/// Restores the [`Session`] with the provided ID to its initial state.
///
/// [`Session`]: session::Session
pub async fn reset(
    Extension(service): Extension<crate::Service>,
    Path(id): Path<session::Id>,
) -> Result<Json<query::session::View>, Error> {
    _ = service
        .execute(command::ResetSession { session: id })
        .await
        .map_err(|e| e.into_error())?;
    view(&service, id).await
}

/// Responds with the [`View`] of the given [`Session`].
///
/// [`Session`]: session::Session
/// [`View`]: query::session::View
async fn view(
    service: &crate::Service,
    id: session::Id,
) -> Result<Json<query::session::View>, Error> {
    service
        .execute(query::session::ById(id))
        .await
        .map(Json)
        .map_err(|e| e.into_error())
}

impl AsError for query::session::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Catalog(e) => e.try_as_error(),
            Self::SessionNotExists(_) => {
                Some(NotFoundError::SessionNotExists.into())
            }
        }
    }
}

impl AsError for command::update_draft::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::SessionNotExists(_) => {
                Some(NotFoundError::SessionNotExists.into())
            }
        }
    }
}

impl AsError for command::advance_step::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::SessionNotExists(_) => {
                Some(NotFoundError::SessionNotExists.into())
            }
        }
    }
}

impl AsError for command::retreat_step::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::SessionNotExists(_) => {
                Some(NotFoundError::SessionNotExists.into())
            }
        }
    }
}

impl AsError for command::set_step::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::SessionNotExists(_) => {
                Some(NotFoundError::SessionNotExists.into())
            }
        }
    }
}

impl AsError for command::reset_session::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::SessionNotExists(_) => {
                Some(NotFoundError::SessionNotExists.into())
            }
        }
    }
}

impl AsError for command::submit_inquiry::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum SubmitError {
                #[code = "ALREADY_SUBMITTING"]
                #[status = CONFLICT]
                #[message = "Another submission of this `Session` is already \
                             in flight"]
                AlreadySubmitting,

                #[code = "SUBMISSION_TIMEOUT"]
                #[status = GATEWAY_TIMEOUT]
                #[message = "Inquiry submission timed out"]
                Timeout,
            }
        }

        match self {
            Self::AlreadySubmitting(_) => {
                Some(SubmitError::AlreadySubmitting.into())
            }
            Self::Catalog(e) => e.try_as_error(),
            Self::Invalid(fields) => Some(Error {
                code: "VALIDATION_FAILED",
                status_code: http::StatusCode::UNPROCESSABLE_ENTITY,
                message: "Draft failed validation".to_owned(),
                fields: Some(fields.clone()),
                backtrace: None,
            }),
            Self::SessionNotExists(_) => {
                Some(NotFoundError::SessionNotExists.into())
            }
            Self::Submission(e) => e.try_as_error(),
            Self::Timeout(_) => Some(SubmitError::Timeout.into()),
        }
    }
}
