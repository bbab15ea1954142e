//! [`Submission`] collaborator implementations.

use std::time::Duration;

use common::operations::Perform;
use derive_more::{Display, Error as StdError};
use tracerr::Traced;
use tracing as log;

use crate::domain::Inquiry;

/// Submission collaborator operation.
///
/// Accepts a finalized [`Inquiry`] and delivers it to the pension staff.
/// Opaque to the rest of the service: failures are retryable by
/// resubmission.
pub use common::Handler as Submission;

/// [`Submission`] error.
#[derive(Clone, Copy, Debug, Display, StdError)]
pub enum Error {
    /// Delivery channel rejected the [`Inquiry`].
    #[display("submission channel rejected the inquiry")]
    Rejected,
}

/// Stand-in [`Submission`] collaborator imitating a delivery channel with a
/// fixed network delay.
///
/// The real pension forwards inquiries out-of-band (phone callback), so the
/// deliverable channel is simulated: configurable delay, plus a failure
/// toggle for exercising the retry path.
#[derive(Clone, Copy, Debug)]
pub struct Simulated {
    /// Artificial delivery delay.
    delay: Duration,

    /// Indicator whether every delivery should fail.
    fail: bool,
}

impl Simulated {
    /// Creates a new [`Simulated`] submission collaborator.
    #[must_use]
    pub const fn new(delay: Duration, fail: bool) -> Self {
        Self { delay, fail }
    }
}

impl Submission<Perform<Inquiry>> for Simulated {
    type Ok = ();
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Perform(inquiry): Perform<Inquiry>,
    ) -> Result<Self::Ok, Self::Err> {
        tokio::time::sleep(self.delay).await;

        if self.fail {
            return Err(tracerr::new!(Error::Rejected));
        }

        log::info!(
            inquiry = %inquiry.id,
            room = %inquiry.room,
            check_in = %inquiry.check_in,
            check_out = %inquiry.check_out,
            "reservation inquiry delivered",
        );
        Ok(())
    }
}

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use common::{operations::Perform, Handler as _};

    use crate::{
        domain::{inquiry, Quote},
        infra::catalog::InMemory,
    };

    use super::Simulated;

    fn inquiry() -> inquiry::Inquiry {
        let room = InMemory::with_pension_rooms().rooms()[0].clone();
        inquiry::Inquiry {
            id: inquiry::Id::new(),
            guest_name: inquiry::GuestName::new("Kim").unwrap(),
            phone: inquiry::Phone::new("010-1234-5678").unwrap(),
            email: inquiry::Email::new("a@b.com").unwrap(),
            check_in: common::Date::from_iso8601("2099-06-01")
                .unwrap()
                .coerce(),
            check_out: common::Date::from_iso8601("2099-06-03")
                .unwrap()
                .coerce(),
            guests: inquiry::GuestCount::new(2).unwrap(),
            room: room.id,
            message: None,
            quote: Quote::zero(common::money::Currency::Krw),
            received_at: inquiry::ReceptionDateTime::now(),
        }
    }

    #[tokio::test]
    async fn delivers_when_not_failing() {
        let sink = Simulated::new(Duration::ZERO, false);

        assert!(sink.execute(Perform(inquiry())).await.is_ok());
    }

    #[tokio::test]
    async fn rejects_when_failing() {
        let sink = Simulated::new(Duration::ZERO, true);

        assert!(sink.execute(Perform(inquiry())).await.is_err());
    }
}
