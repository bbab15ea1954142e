//! [`CleanStaleSessions`] [`Task`].

use std::{convert::Infallible, error::Error, time};

use common::operations::{By, Perform, Start};
use smart_default::SmartDefault;
use tokio::time::interval;
use tracing as log;

#[cfg(doc)]
use crate::session::Session;
use crate::{session::TouchDateTime, Service};

use super::Task;

/// Configuration for [`CleanStaleSessions`] [`Task`].
#[derive(Clone, Copy, Debug, SmartDefault)]
pub struct Config {
    /// Interval between [`Session`]s cleaning.
    #[default(time::Duration::from_secs(60))]
    pub interval: time::Duration,

    /// Timeout after which a [`Session`] is considered abandoned.
    #[default(time::Duration::from_secs(30 * 60))]
    pub timeout: time::Duration,
}

/// [`Task`] for evicting abandoned [`Session`]s.
///
/// A [`Session`] with a submission call in flight is never evicted,
/// regardless of how long ago it was interacted with.
#[derive(Clone, Copy, Debug)]
pub struct CleanStaleSessions<S> {
    /// [`Config`] of this [`Task`].
    config: Config,

    /// [`Service`] instance.
    service: S,
}

impl<C, S> Task<Start<By<CleanStaleSessions<Self>, Config>>> for Service<C, S>
where
    CleanStaleSessions<Service<C, S>>:
        Task<Perform<()>, Ok = (), Err: Error> + 'static,
    Self: Clone,
{
    type Ok = ();
    type Err = Infallible;

    async fn execute(
        &self,
        Start(by): Start<By<CleanStaleSessions<Self>, Config>>,
    ) -> Result<Self::Ok, Self::Err> {
        let config = by.into_inner();
        let task = CleanStaleSessions {
            config,
            service: self.clone(),
        };

        let mut interval = interval(task.config.interval);
        loop {
            let _ = interval.tick().await;
            _ = task.execute(Perform(())).await.map_err(|e| {
                log::error!("`task::CleanStaleSessions` failed: {e}");
            });
        }
    }
}

impl<C, S> Task<Perform<()>> for CleanStaleSessions<Service<C, S>> {
    type Ok = ();
    type Err = Infallible;

    async fn execute(&self, _: Perform<()>) -> Result<Self::Ok, Self::Err> {
        let deadline = TouchDateTime::now() - self.config.timeout;
        let evicted = self.service.sessions().evict_idle(deadline).await;
        if evicted > 0 {
            log::info!("evicted {evicted} stale session(s)");
        }
        Ok(())
    }
}

#[cfg(test)]
mod spec {
    use common::operations::Perform;

    use crate::{
        infra::{catalog::InMemory, submission::Simulated},
        session::{Session, TouchDateTime},
        Config as ServiceConfig, Service, Task as _,
    };

    use super::{CleanStaleSessions, Config};

    #[tokio::test]
    async fn evicts_abandoned_sessions_only() {
        let (service, _background) = Service::new(
            ServiceConfig::default(),
            InMemory::with_pension_rooms(),
            Simulated::new(std::time::Duration::ZERO, false),
        );

        let mut stale = Session::new();
        let stale_id = stale.id;
        stale.touched_at = TouchDateTime::UNIX_EPOCH;
        service.sessions().insert(stale).await;

        let fresh = Session::new();
        let fresh_id = fresh.id;
        service.sessions().insert(fresh).await;

        let task = CleanStaleSessions {
            config: Config::default(),
            service: service.clone(),
        };
        task.execute(Perform(())).await.unwrap();

        assert!(service.sessions().get(stale_id).await.is_none());
        assert!(service.sessions().get(fresh_id).await.is_some());
    }
}
