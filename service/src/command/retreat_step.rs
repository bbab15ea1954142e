//! [`Command`] for retreating the wizard by one step.

use derive_more::{Display, Error as StdError};
use tracerr::Traced;

use crate::{
    session::{self, Session},
    Service,
};

use super::Command;

/// [`Command`] for moving a [`Session`] back to the previous wizard step.
///
/// Never validates; clamped at the initial step.
#[derive(Clone, Copy, Debug)]
pub struct RetreatStep {
    /// ID of the [`Session`] to retreat.
    pub session: session::Id,
}

impl<C, S> Command<RetreatStep> for Service<C, S> {
    type Ok = Session;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: RetreatStep) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let RetreatStep { session } = cmd;

        self.sessions()
            .with(session, |s| {
                s.retreat();
                s.clone()
            })
            .await
            .ok_or(E::SessionNotExists(session))
            .map_err(tracerr::wrap!())
    }
}

/// Error of [`RetreatStep`] [`Command`] execution.
#[derive(Clone, Copy, Debug, Display, StdError)]
pub enum ExecutionError {
    /// [`Session`] doesn't exist.
    #[display("`Session(id: {_0})` does not exist")]
    SessionNotExists(#[error(not(source))] session::Id),
}
