//! [`Command`] for updating a single [`Draft`] field.

use derive_more::{Display, Error as StdError};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::Draft;
use crate::{
    domain::Action,
    session::{self, Session},
    Service,
};

use super::Command;

/// [`Command`] for applying one [`Action`] to the [`Draft`] of a
/// [`Session`].
///
/// Clears the error entry of the updated field only; other fields' errors
/// stay untouched.
#[derive(Clone, Debug)]
pub struct UpdateDraft {
    /// ID of the [`Session`] to update.
    pub session: session::Id,

    /// [`Action`] to apply.
    pub action: Action,
}

impl<C, S> Command<UpdateDraft> for Service<C, S> {
    type Ok = Session;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: UpdateDraft) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateDraft { session, action } = cmd;

        self.sessions()
            .with(session, |s| {
                s.apply(action);
                s.clone()
            })
            .await
            .ok_or(E::SessionNotExists(session))
            .map_err(tracerr::wrap!())
    }
}

/// Error of [`UpdateDraft`] [`Command`] execution.
#[derive(Clone, Copy, Debug, Display, StdError)]
pub enum ExecutionError {
    /// [`Session`] doesn't exist.
    #[display("`Session(id: {_0})` does not exist")]
    SessionNotExists(#[error(not(source))] session::Id),
}
