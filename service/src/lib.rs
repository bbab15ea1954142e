//! Service contains the business logic of the reservation inquiry flow.

#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod command;
pub mod domain;
pub mod infra;
pub mod query;
pub mod session;
pub mod task;
pub mod validate;

use std::{error::Error, time::Duration};

use common::operations::{By, Start};
use derive_more::{Debug, Display, Error as StdError};

#[cfg(doc)]
use crate::infra::{Catalog, Submission};

pub use self::{command::Command, query::Query, task::Task};

/// [`Service`] configuration.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    /// Timeout of a single submission collaborator call.
    ///
    /// An elapsed timeout counts as a retryable submission failure.
    pub submit_timeout: Duration,

    /// [`task::CleanStaleSessions`] configuration.
    pub clean_stale_sessions: task::clean_stale_sessions::Config,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            submit_timeout: Duration::from_secs(10),
            clean_stale_sessions: task::clean_stale_sessions::Config::default(),
        }
    }
}

/// Domain service of the reservation inquiry flow.
#[derive(Clone, Debug)]
pub struct Service<C, S> {
    /// Configuration of this [`Service`].
    config: Config,

    /// [`Catalog`] of this [`Service`].
    catalog: C,

    /// [`Submission`] collaborator of this [`Service`].
    submission: S,

    /// [`session::Registry`] of this [`Service`].
    sessions: session::Registry,
}

impl<C, S> Service<C, S> {
    /// Creates a new [`Service`] with the provided parameters.
    pub fn new(
        config: Config,
        catalog: C,
        submission: S,
    ) -> (Self, task::Background)
    where
        Self: Task<
                Start<
                    By<
                        task::CleanStaleSessions<Self>,
                        task::clean_stale_sessions::Config,
                    >,
                >,
                Ok = (),
                Err: Error,
            > + Clone
            + 'static,
    {
        let this = Service {
            config,
            catalog,
            submission,
            sessions: session::Registry::default(),
        };

        let mut bg = task::Background::default();
        let svc = this.clone();
        bg.spawn(async move {
            svc.execute(Start(By::new(svc.config().clean_stale_sessions)))
                .await
        });

        (this, bg)
    }

    /// Returns [`Config`] of this [`Service`].
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns [`Catalog`] of this [`Service`].
    #[must_use]
    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Returns [`Submission`] collaborator of this [`Service`].
    #[must_use]
    pub fn submission(&self) -> &S {
        &self.submission
    }

    /// Returns [`session::Registry`] of this [`Service`].
    #[must_use]
    pub fn sessions(&self) -> &session::Registry {
        &self.sessions
    }
}

/// Shortcut for the error of starting a [`Task`].
type TaskStartError<Svc, T, Args> = <Svc as Task<Start<By<T, Args>>>>::Err;

/// Error of starting a [`Service`].
#[derive(Debug, Display, StdError)]
pub enum StartupError<Svc>
where
    Svc: Task<
        Start<
            By<
                task::CleanStaleSessions<Svc>,
                task::clean_stale_sessions::Config,
            >,
        >,
    >,
{
    /// [`task::CleanStaleSessions`] failed to start.
    CleanStaleSessionsTask(
        TaskStartError<
            Svc,
            task::CleanStaleSessions<Svc>,
            task::clean_stale_sessions::Config,
        >,
    ),
}
