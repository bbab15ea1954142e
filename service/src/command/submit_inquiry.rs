//! [`Command`] for submitting a reservation [`Inquiry`].

use std::time::Duration;

use common::{
    operations::{By, Perform, Select},
    Date,
};
use derive_more::{Display, Error as StdError, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{
        inquiry::{Email, GuestCount, GuestName, Message, Phone},
        room, Draft, Inquiry, Quote, Room,
    },
    infra::{catalog, submission},
    session::{self, Step},
    validate::{self, Errors, Field},
    Service,
};

use super::Command;

/// [`Command`] for submitting the [`Draft`] of a [`Session`] as a finalized
/// [`Inquiry`].
///
/// Validates the whole draft, resolves the selected room against the
/// catalog, derives the [`Quote`], and performs the submission collaborator
/// call bounded by the configured timeout. Any failure past validation
/// leaves the [`Session`] editable and resubmittable with the draft intact.
///
/// [`Session`]: session::Session
#[derive(Clone, Copy, Debug)]
pub struct SubmitInquiry {
    /// ID of the [`Session`] to submit.
    ///
    /// [`Session`]: session::Session
    pub session: session::Id,
}

impl<C, S> Command<SubmitInquiry> for Service<C, S>
where
    C: catalog::Catalog<
        Select<By<Option<Room>, room::Id>>,
        Ok = Option<Room>,
        Err = Traced<catalog::Error>,
    >,
    S: submission::Submission<
        Perform<Inquiry>,
        Ok = (),
        Err = Traced<submission::Error>,
    >,
{
    type Ok = Inquiry;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: SubmitInquiry) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let SubmitInquiry { session } = cmd;

        let draft = self
            .sessions()
            .get(session)
            .await
            .ok_or(E::SessionNotExists(session))
            .map_err(tracerr::wrap!())
            .map(|s| s.draft)?;

        // Invalid drafts perform no submission call at all.
        let errors = validate::draft(&draft, Date::today());
        if !errors.is_empty() {
            return Err(self.refuse(session, errors).await);
        }

        let room = match &draft.room {
            Some(id) => self
                .catalog()
                .execute(Select(By::new(id.clone())))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?,
            None => None,
        };
        // A dangling room reference is a correctable validation error, not a
        // crash.
        let Some(room) = room else {
            let mut errors = Errors::default();
            errors.insert(Field::Room, "Selected room is no longer offered");
            return Err(self.refuse(session, errors).await);
        };

        let inquiry = match finalize(&draft, &room) {
            Ok(inquiry) => inquiry,
            Err(errors) => return Err(self.refuse(session, errors).await),
        };

        // Re-entry guard: exactly one submission call may be in flight per
        // session.
        let engaged = self
            .sessions()
            .with(session, |s| {
                if s.submitting {
                    return false;
                }
                s.submitting = true;
                s.touch();
                true
            })
            .await
            .ok_or(E::SessionNotExists(session))
            .map_err(tracerr::wrap!())?;
        if !engaged {
            return Err(tracerr::new!(E::AlreadySubmitting(session)));
        }

        let timeout = self.config().submit_timeout;
        let delivery = match tokio::time::timeout(
            timeout,
            self.submission().execute(Perform(inquiry.clone())),
        )
        .await
        {
            Ok(done) => done.map_err(tracerr::map_from_and_wrap!(=> E)),
            Err(_elapsed) => Err(tracerr::new!(E::Timeout(timeout))),
        };

        match delivery {
            Ok(()) => {
                _ = self
                    .sessions()
                    .with(session, |s| {
                        s.submitted = Some(inquiry.clone());
                        s.step = Step::Confirmation;
                        s.submitting = false;
                        s.errors = Errors::default();
                        s.touch();
                    })
                    .await;
                Ok(inquiry)
            }
            Err(e) => {
                // Back to a retryable non-submitting state, draft intact.
                _ = self
                    .sessions()
                    .with(session, |s| {
                        s.submitting = false;
                        s.touch();
                    })
                    .await;
                log::warn!(session = %session, "inquiry submission failed: {e}");
                Err(e)
            }
        }
    }
}

impl<C, S> Service<C, S> {
    /// Records the given validation [`Errors`] on the session and shapes
    /// them into an [`ExecutionError`].
    async fn refuse(
        &self,
        session: session::Id,
        errors: Errors,
    ) -> Traced<ExecutionError> {
        _ = self
            .sessions()
            .with(session, |s| {
                s.errors = errors.clone();
                s.touch();
            })
            .await;
        tracerr::new!(ExecutionError::Invalid(errors))
    }
}

/// Shapes a validated [`Draft`] into the finalized [`Inquiry`] payload.
///
/// The whole-draft validation pass has already succeeded at this point, so
/// the typed constructors are expected to accept; any residual refusal (e.g.
/// an over-long name, or more guests than the room accommodates) is
/// collected and reported the same way as any other validation failure.
fn finalize(draft: &Draft, room: &Room) -> Result<Inquiry, Errors> {
    use crate::domain::inquiry::ReceptionDateTime;

    let mut errors = Errors::default();

    let guest_name = GuestName::new(draft.name.trim());
    if guest_name.is_none() {
        errors.insert(Field::Name, "Please enter a valid name");
    }

    let phone = Phone::new(draft.phone.trim());
    if phone.is_none() {
        errors.insert(Field::Phone, "Please enter a valid phone number");
    }

    let email = Email::new(draft.email.trim());
    if email.is_none() {
        errors.insert(Field::Email, "Please enter a valid email address");
    }

    let guests = GuestCount::new(draft.guests);
    if guests.is_none() {
        errors.insert(
            Field::Guests,
            format!(
                "Guest count must be between {} and {}",
                GuestCount::MIN,
                GuestCount::MAX,
            ),
        );
    } else if room.max_guests < draft.guests {
        errors.insert(
            Field::Guests,
            format!("`{}` accommodates up to {} guests", room.name, room.max_guests),
        );
    }

    let (Some(check_in), Some(check_out)) = (draft.check_in, draft.check_out)
    else {
        errors.insert(Field::Dates, "Please select both stay dates");
        return Err(errors);
    };

    if !errors.is_empty() {
        return Err(errors);
    }

    let (Some(guest_name), Some(phone), Some(email), Some(guests)) =
        (guest_name, phone, email, guests)
    else {
        return Err(errors);
    };

    Ok(Inquiry {
        id: crate::domain::inquiry::Id::new(),
        guest_name,
        phone,
        email,
        check_in,
        check_out,
        guests,
        room: room.id.clone(),
        message: Message::new(draft.message.clone()),
        quote: Quote::compute(draft, room),
        received_at: ReceptionDateTime::now(),
    })
}

/// Error of [`SubmitInquiry`] [`Command`] execution.
#[derive(Debug, Display, From, StdError)]
pub enum ExecutionError {
    /// Another submission call of the same session is already in flight.
    #[display("`Session(id: {_0})` is already submitting")]
    #[from(ignore)]
    AlreadySubmitting(#[error(not(source))] session::Id),

    /// [`Catalog`] error.
    ///
    /// [`Catalog`]: catalog::Catalog
    #[display("`Catalog` operation failed: {_0}")]
    Catalog(catalog::Error),

    /// [`Draft`] failed validation; no submission call was performed.
    #[display("draft failed validation")]
    #[from(ignore)]
    Invalid(#[error(not(source))] Errors),

    /// [`Session`] doesn't exist.
    ///
    /// [`Session`]: session::Session
    #[display("`Session(id: {_0})` does not exist")]
    #[from(ignore)]
    SessionNotExists(#[error(not(source))] session::Id),

    /// Submission collaborator refused the [`Inquiry`].
    #[display("submission failed: {_0}")]
    Submission(submission::Error),

    /// Submission call exceeded the configured timeout.
    #[display("submission timed out after {_0:?}")]
    #[from(ignore)]
    Timeout(#[error(not(source))] Duration),
}

#[cfg(test)]
mod spec {
    use std::{
        sync::{
            atomic::{AtomicBool, AtomicUsize, Ordering},
            Arc,
        },
        time::Duration,
    };

    use common::{operations::Perform, Date, Handler};
    use tracerr::Traced;

    use crate::{
        domain::{Draft, Inquiry},
        infra::{catalog::InMemory, submission},
        session::Step,
        validate::Field,
        Config, Service,
    };

    use super::{ExecutionError, SubmitInquiry};

    /// Submission stub counting delivery attempts.
    #[derive(Clone, Debug, Default)]
    struct Sink {
        calls: Arc<AtomicUsize>,
        fail: Arc<AtomicBool>,
        delay: Duration,
    }

    impl Handler<Perform<Inquiry>> for Sink {
        type Ok = ();
        type Err = Traced<submission::Error>;

        async fn execute(
            &self,
            _: Perform<Inquiry>,
        ) -> Result<Self::Ok, Self::Err> {
            _ = self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            if self.fail.load(Ordering::SeqCst) {
                return Err(tracerr::new!(submission::Error::Rejected));
            }
            Ok(())
        }
    }

    fn service(sink: Sink) -> Service<InMemory, Sink> {
        let (service, _background) = Service::new(
            Config::default(),
            InMemory::with_pension_rooms(),
            sink,
        );
        service
    }

    fn valid_draft() -> Draft {
        Draft {
            name: "Kim".into(),
            phone: "010-1234-5678".into(),
            email: "a@b.com".into(),
            check_in: Some(Date::from_iso8601("2099-06-01").unwrap().coerce()),
            check_out: Some(
                Date::from_iso8601("2099-06-03").unwrap().coerce(),
            ),
            guests: 2,
            room: Some("garden-deluxe".parse().unwrap()),
            message: String::new(),
        }
    }

    async fn session_with_draft(
        service: &Service<InMemory, Sink>,
        draft: Draft,
    ) -> crate::session::Id {
        let session = service
            .execute(crate::command::CreateSession)
            .await
            .unwrap();
        _ = service
            .sessions()
            .with(session.id, |s| s.draft = draft)
            .await
            .unwrap();
        session.id
    }

    #[tokio::test]
    async fn submits_a_valid_draft_and_confirms() {
        let sink = Sink::default();
        let service = service(sink.clone());
        let id = session_with_draft(&service, valid_draft()).await;

        let inquiry =
            service.execute(SubmitInquiry { session: id }).await.unwrap();

        assert_eq!(inquiry.quote.nights, 2);
        assert_eq!(inquiry.quote.total.to_string(), "240000KRW");
        assert_eq!(sink.calls.load(Ordering::SeqCst), 1);

        let session = service.sessions().get(id).await.unwrap();
        assert_eq!(session.step, Step::Confirmation);
        assert!(!session.submitting);
        assert!(session.submitted.is_some());
    }

    #[tokio::test]
    async fn empty_draft_performs_no_submission_call() {
        let sink = Sink::default();
        let service = service(sink.clone());
        let id = session_with_draft(&service, Draft::default()).await;

        let err = service
            .execute(SubmitInquiry { session: id })
            .await
            .unwrap_err();

        let ExecutionError::Invalid(errors) = err.as_ref() else {
            panic!("expected `Invalid`, got: {err}");
        };
        assert!(errors.get(Field::Name).is_some());
        assert!(errors.get(Field::Phone).is_some());
        assert!(errors.get(Field::Email).is_some());
        assert!(errors.get(Field::CheckIn).is_some());
        assert!(errors.get(Field::CheckOut).is_some());
        assert_eq!(sink.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn dangling_room_reference_is_a_validation_error() {
        let sink = Sink::default();
        let service = service(sink.clone());
        let mut draft = valid_draft();
        draft.room = Some("lake-house".parse().unwrap());
        let id = session_with_draft(&service, draft).await;

        let err = service
            .execute(SubmitInquiry { session: id })
            .await
            .unwrap_err();

        let ExecutionError::Invalid(errors) = err.as_ref() else {
            panic!("expected `Invalid`, got: {err}");
        };
        assert!(errors.get(Field::Room).is_some());
        assert_eq!(sink.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn over_capacity_guest_count_is_a_validation_error() {
        let sink = Sink::default();
        let service = service(sink.clone());
        let mut draft = valid_draft();
        draft.guests = 5; // Garden Deluxe sleeps 2.
        let id = session_with_draft(&service, draft).await;

        let err = service
            .execute(SubmitInquiry { session: id })
            .await
            .unwrap_err();

        let ExecutionError::Invalid(errors) = err.as_ref() else {
            panic!("expected `Invalid`, got: {err}");
        };
        assert!(errors.get(Field::Guests).is_some());
        assert_eq!(sink.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn failed_delivery_keeps_the_draft_and_allows_retry() {
        let sink = Sink::default();
        sink.fail.store(true, Ordering::SeqCst);
        let service = service(sink.clone());
        let id = session_with_draft(&service, valid_draft()).await;

        let err = service
            .execute(SubmitInquiry { session: id })
            .await
            .unwrap_err();
        assert!(
            matches!(err.as_ref(), ExecutionError::Submission(_)),
            "expected `Submission`, got: {err}",
        );

        let session = service.sessions().get(id).await.unwrap();
        assert!(!session.submitting);
        assert!(session.submitted.is_none());
        assert_eq!(session.draft, valid_draft());

        // Retry with the same draft once the collaborator recovers.
        sink.fail.store(false, Ordering::SeqCst);
        assert!(service.execute(SubmitInquiry { session: id }).await.is_ok());
        assert_eq!(sink.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn timed_out_delivery_is_a_retryable_failure() {
        let sink = Sink {
            delay: Duration::from_secs(60),
            ..Sink::default()
        };
        let (service, _background) = Service::new(
            Config {
                submit_timeout: Duration::from_millis(50),
                ..Config::default()
            },
            InMemory::with_pension_rooms(),
            sink.clone(),
        );
        let id = session_with_draft(&service, valid_draft()).await;

        let err = service
            .execute(SubmitInquiry { session: id })
            .await
            .unwrap_err();
        assert!(
            matches!(err.as_ref(), ExecutionError::Timeout(_)),
            "expected `Timeout`, got: {err}",
        );
        assert_eq!(sink.calls.load(Ordering::SeqCst), 1);

        let session = service.sessions().get(id).await.unwrap();
        assert!(!session.submitting);
        assert!(session.submitted.is_none());
        assert_eq!(session.draft, valid_draft());
    }

    #[tokio::test]
    async fn duplicate_submit_is_rejected_while_in_flight() {
        let sink = Sink::default();
        let service = service(sink.clone());
        let id = session_with_draft(&service, valid_draft()).await;

        _ = service
            .sessions()
            .with(id, |s| s.submitting = true)
            .await
            .unwrap();

        let err = service
            .execute(SubmitInquiry { session: id })
            .await
            .unwrap_err();
        assert!(
            matches!(err.as_ref(), ExecutionError::AlreadySubmitting(_)),
            "expected `AlreadySubmitting`, got: {err}",
        );
        assert_eq!(sink.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn reset_after_success_restores_the_empty_draft() {
        let sink = Sink::default();
        let service = service(sink.clone());
        let id = session_with_draft(&service, valid_draft()).await;

        _ = service.execute(SubmitInquiry { session: id }).await.unwrap();
        let session = service
            .execute(crate::command::ResetSession { session: id })
            .await
            .unwrap();

        assert_eq!(session.draft, Draft::default());
        assert_eq!(session.step, Step::Room);
        assert!(session.submitted.is_none());
    }
}
