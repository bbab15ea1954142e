//! [`Session`] view queries.

use common::operations::{By, Select};
use derive_more::{Display, Error as StdError, From};
use serde::Serialize;
use tracerr::Traced;

use crate::{
    domain::{room, Draft, Inquiry, Quote, Room},
    infra::catalog,
    session::{self, Step},
    validate::Errors,
    Service,
};

use super::Query;

/// Queries the [`View`] of a [`Session`] by its [`session::Id`].
///
/// [`Session`]: session::Session
#[derive(Clone, Copy, Debug, From)]
pub struct ById(pub session::Id);

/// Presentation-facing snapshot of a [`Session`].
///
/// [`Session`]: session::Session
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct View {
    /// ID of the [`Session`].
    ///
    /// [`Session`]: session::Session
    pub id: session::Id,

    /// Current wizard [`Step`].
    pub step: Step,

    /// [`Draft`] being filled in.
    pub draft: Draft,

    /// Validation [`Errors`] of the latest failed pass.
    pub errors: Errors,

    /// [`Quote`] derived from the latest [`Draft`].
    ///
    /// [`None`] until a catalog room is selected.
    pub quote: Option<Quote>,

    /// Indicator whether a submission call is in flight.
    pub submitting: bool,

    /// Successfully submitted [`Inquiry`], if any.
    pub submitted: Option<Inquiry>,
}

impl<C, S> Query<ById> for Service<C, S>
where
    C: catalog::Catalog<
        Select<By<Option<Room>, room::Id>>,
        Ok = Option<Room>,
        Err = Traced<catalog::Error>,
    >,
{
    type Ok = View;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, ById(id): ById) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let session = self
            .sessions()
            .get(id)
            .await
            .ok_or(E::SessionNotExists(id))
            .map_err(tracerr::wrap!())?;

        // Derived state: always recomputed from the latest draft, never
        // stored.
        let quote = match &session.draft.room {
            Some(room_id) => self
                .catalog()
                .execute(Select(By::new(room_id.clone())))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?
                .map(|room| Quote::compute(&session.draft, &room)),
            None => None,
        };

        Ok(View {
            id: session.id,
            step: session.step,
            draft: session.draft,
            errors: session.errors,
            quote,
            submitting: session.submitting,
            submitted: session.submitted,
        })
    }
}

/// Error of [`ById`] [`Query`] execution.
#[derive(Debug, Display, From, StdError)]
pub enum ExecutionError {
    /// [`Catalog`] error.
    ///
    /// [`Catalog`]: catalog::Catalog
    #[display("`Catalog` operation failed: {_0}")]
    Catalog(catalog::Error),

    /// [`Session`] doesn't exist.
    ///
    /// [`Session`]: session::Session
    #[display("`Session(id: {_0})` does not exist")]
    #[from(ignore)]
    SessionNotExists(#[error(not(source))] session::Id),
}
