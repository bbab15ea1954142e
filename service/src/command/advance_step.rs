//! [`Command`] for advancing the wizard by one step.

use common::Date;
use derive_more::{Display, Error as StdError};
use tracerr::Traced;

use crate::{
    session::{self, Session},
    Service,
};

use super::Command;

/// [`Command`] for validating the current wizard step of a [`Session`] and
/// advancing to the next one on success.
///
/// A failed validation pass is not an error of this [`Command`]: the
/// step-scoped errors are stored on the [`Session`] and the step stays put.
#[derive(Clone, Copy, Debug)]
pub struct AdvanceStep {
    /// ID of the [`Session`] to advance.
    pub session: session::Id,
}

impl<C, S> Command<AdvanceStep> for Service<C, S> {
    type Ok = Session;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: AdvanceStep) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let AdvanceStep { session } = cmd;

        self.sessions()
            .with(session, |s| {
                _ = s.advance(Date::today());
                s.clone()
            })
            .await
            .ok_or(E::SessionNotExists(session))
            .map_err(tracerr::wrap!())
    }
}

/// Error of [`AdvanceStep`] [`Command`] execution.
#[derive(Clone, Copy, Debug, Display, StdError)]
pub enum ExecutionError {
    /// [`Session`] doesn't exist.
    #[display("`Session(id: {_0})` does not exist")]
    SessionNotExists(#[error(not(source))] session::Id),
}
