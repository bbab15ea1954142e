//! [`Command`] for creating a new [`Session`].

use std::convert::Infallible;

use crate::session::Session;
use crate::Service;

use super::Command;

/// [`Command`] for creating a new empty [`Session`] at the initial wizard
/// step.
#[derive(Clone, Copy, Debug, Default)]
pub struct CreateSession;

impl<C, S> Command<CreateSession> for Service<C, S> {
    type Ok = Session;
    type Err = Infallible;

    async fn execute(&self, _: CreateSession) -> Result<Self::Ok, Self::Err> {
        let session = Session::new();
        self.sessions().insert(session.clone()).await;
        Ok(session)
    }
}
