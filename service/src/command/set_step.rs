//! [`Command`] for jumping the wizard to a specific step.

use derive_more::{Display, Error as StdError};
use tracerr::Traced;

use crate::{
    session::{self, Session, Step},
    Service,
};

use super::Command;

/// [`Command`] for jumping a [`Session`] directly to the given wizard
/// [`Step`].
///
/// No validation gate is enforced at the transition itself.
#[derive(Clone, Copy, Debug)]
pub struct SetStep {
    /// ID of the [`Session`] to move.
    pub session: session::Id,

    /// Wizard [`Step`] to jump to.
    pub step: Step,
}

impl<C, S> Command<SetStep> for Service<C, S> {
    type Ok = Session;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: SetStep) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let SetStep { session, step } = cmd;

        self.sessions()
            .with(session, |s| {
                s.set_step(step);
                s.clone()
            })
            .await
            .ok_or(E::SessionNotExists(session))
            .map_err(tracerr::wrap!())
    }
}

/// Error of [`SetStep`] [`Command`] execution.
#[derive(Clone, Copy, Debug, Display, StdError)]
pub enum ExecutionError {
    /// [`Session`] doesn't exist.
    #[display("`Session(id: {_0})` does not exist")]
    SessionNotExists(#[error(not(source))] session::Id),
}
