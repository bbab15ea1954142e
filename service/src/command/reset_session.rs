//! [`Command`] for resetting a [`Session`].

use derive_more::{Display, Error as StdError};
use tracerr::Traced;

use crate::{
    session::{self, Session},
    Service,
};

use super::Command;

/// [`Command`] for restoring a [`Session`] to its initial state: empty
/// draft, initial step, no errors, nothing submitted.
///
/// The [`session::Id`] survives the reset.
#[derive(Clone, Copy, Debug)]
pub struct ResetSession {
    /// ID of the [`Session`] to reset.
    pub session: session::Id,
}

impl<C, S> Command<ResetSession> for Service<C, S> {
    type Ok = Session;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: ResetSession) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let ResetSession { session } = cmd;

        self.sessions()
            .with(session, |s| {
                s.reset();
                s.clone()
            })
            .await
            .ok_or(E::SessionNotExists(session))
            .map_err(tracerr::wrap!())
    }
}

/// Error of [`ResetSession`] [`Command`] execution.
#[derive(Clone, Copy, Debug, Display, StdError)]
pub enum ExecutionError {
    /// [`Session`] doesn't exist.
    #[display("`Session(id: {_0})` does not exist")]
    SessionNotExists(#[error(not(source))] session::Id),
}
