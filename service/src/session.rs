//! Reservation wizard [`Session`] definitions.

use std::{collections::HashMap, sync::Arc};

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, Date, DateTimeOf};
use derive_more::{Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::{
    domain::{Action, Draft, Inquiry},
    validate::{self, Errors, Field},
};

define_kind! {
    #[doc = "Step of the reservation wizard."]
    enum Step {
        #[doc = "Room selection."]
        Room = 1,

        #[doc = "Stay dates and guest count."]
        Dates = 2,

        #[doc = "Contact information."]
        Contact = 3,

        #[doc = "Terminal confirmation display."]
        Confirmation = 4,
    }
}

impl Step {
    /// Returns the [`Step`] following this one.
    ///
    /// Clamped at [`Step::Confirmation`]: advancing past the terminal step is
    /// a no-op.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Room => Self::Dates,
            Self::Dates => Self::Contact,
            Self::Contact | Self::Confirmation => Self::Confirmation,
        }
    }

    /// Returns the [`Step`] preceding this one.
    ///
    /// Clamped at [`Step::Room`]: retreating before the initial step is a
    /// no-op.
    #[must_use]
    pub const fn prev(self) -> Self {
        match self {
            Self::Room | Self::Dates => Self::Room,
            Self::Contact => Self::Dates,
            Self::Confirmation => Self::Contact,
        }
    }
}

/// Single guest's pass through the reservation wizard.
///
/// Owns its [`Draft`] exclusively: there is exactly one logical writer per
/// [`Session`] at any time.
#[derive(Clone, Debug)]
pub struct Session {
    /// ID of this [`Session`].
    pub id: Id,

    /// [`Draft`] being filled in.
    pub draft: Draft,

    /// Current wizard [`Step`].
    pub step: Step,

    /// Validation [`Errors`] of the latest failed pass.
    pub errors: Errors,

    /// Indicator whether a submission call is currently in flight.
    ///
    /// Gates re-entry: a second submission attempt while `true` is rejected.
    pub submitting: bool,

    /// Successfully submitted [`Inquiry`], if any.
    pub submitted: Option<Inquiry>,

    /// [`DateTime`] when this [`Session`] was last interacted with.
    pub touched_at: TouchDateTime,
}

impl Session {
    /// Creates a new empty [`Session`] at the initial wizard [`Step`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: Id::new(),
            draft: Draft::default(),
            step: Step::Room,
            errors: Errors::default(),
            submitting: false,
            submitted: None,
            touched_at: TouchDateTime::now(),
        }
    }

    /// Applies the given [`Action`] to the [`Draft`] of this [`Session`],
    /// clearing the error entry of the updated field only.
    ///
    /// Either date update also clears the cross-field [`Field::Dates`] entry,
    /// since the ordering rule depends on both.
    pub fn apply(&mut self, action: Action) {
        if let Some(field) = action.field() {
            self.errors.clear(field);
            if matches!(field, Field::CheckIn | Field::CheckOut) {
                self.errors.clear(Field::Dates);
            }
        }
        self.draft.apply(action);
        self.touch();
    }

    /// Validates the current [`Step`] and advances to the next one on
    /// success.
    ///
    /// On failure stores the step-scoped [`Errors`] (replacing any previous
    /// pass wholesale) and stays. Returns whether the advance happened.
    pub fn advance(&mut self, today: Date) -> bool {
        let errors = validate::step(self.step, &self.draft, today);
        let ok = errors.is_empty();

        self.errors = errors;
        if ok {
            self.step = self.step.next();
        }
        self.touch();

        ok
    }

    /// Retreats to the previous [`Step`], never validating.
    pub fn retreat(&mut self) {
        self.step = self.step.prev();
        self.touch();
    }

    /// Jumps directly to the given [`Step`].
    ///
    /// No validation gate is enforced at the transition itself; validation is
    /// a separate, explicitly invoked operation.
    pub fn set_step(&mut self, step: Step) {
        self.step = step;
        self.touch();
    }

    /// Restores this [`Session`] to its initial state, keeping its ID.
    pub fn reset(&mut self) {
        *self = Self {
            id: self.id,
            ..Self::new()
        };
    }

    /// Marks this [`Session`] as interacted with right now.
    pub fn touch(&mut self) {
        self.touched_at = TouchDateTime::now();
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// ID of a [`Session`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// [`DateTime`] when a [`Session`] was last interacted with.
pub type TouchDateTime = DateTimeOf<Session>;

/// In-memory registry of live [`Session`]s.
///
/// The sole owner of all [`Session`] state: every mutation happens under its
/// lock, so field updates are applied in the order received and validation
/// always observes the latest applied draft.
#[derive(Clone, Debug, Default)]
pub struct Registry(Arc<Mutex<HashMap<Id, Session>>>);

impl Registry {
    /// Registers the given [`Session`].
    pub async fn insert(&self, session: Session) {
        _ = self.0.lock().await.insert(session.id, session);
    }

    /// Runs the given function over the [`Session`] with the given [`Id`].
    ///
    /// [`None`] is returned when no such [`Session`] exists.
    pub async fn with<R>(
        &self,
        id: Id,
        f: impl FnOnce(&mut Session) -> R,
    ) -> Option<R> {
        self.0.lock().await.get_mut(&id).map(f)
    }

    /// Returns a snapshot of the [`Session`] with the given [`Id`].
    pub async fn get(&self, id: Id) -> Option<Session> {
        self.0.lock().await.get(&id).cloned()
    }

    /// Removes every [`Session`] not interacted with since the given
    /// deadline, keeping the ones with a submission call in flight.
    ///
    /// Returns the number of removed [`Session`]s.
    pub async fn evict_idle(&self, deadline: TouchDateTime) -> usize {
        let mut sessions = self.0.lock().await;
        let before = sessions.len();
        sessions.retain(|_, s| s.submitting || s.touched_at >= deadline);
        before - sessions.len()
    }
}

#[cfg(test)]
mod spec {
    use common::Date;

    use crate::{
        domain::Action,
        validate::{Errors, Field},
    };

    use super::{Registry, Session, Step, TouchDateTime};

    #[test]
    fn next_clamps_at_confirmation() {
        assert_eq!(Step::Room.next(), Step::Dates);
        assert_eq!(Step::Dates.next(), Step::Contact);
        assert_eq!(Step::Contact.next(), Step::Confirmation);
        assert_eq!(Step::Confirmation.next(), Step::Confirmation);
    }

    #[test]
    fn prev_clamps_at_room() {
        assert_eq!(Step::Confirmation.prev(), Step::Contact);
        assert_eq!(Step::Contact.prev(), Step::Dates);
        assert_eq!(Step::Dates.prev(), Step::Room);
        assert_eq!(Step::Room.prev(), Step::Room);
    }

    #[test]
    fn apply_clears_only_the_updated_fields_error() {
        let mut session = Session::new();
        session.errors.insert(Field::Name, "Please enter your name");
        session
            .errors
            .insert(Field::Email, "Please enter your email address");

        session.apply(Action::Name("Kim".into()));

        assert!(session.errors.get(Field::Name).is_none());
        assert!(session.errors.get(Field::Email).is_some());
    }

    #[test]
    fn date_updates_clear_the_cross_field_entry() {
        let mut session = Session::new();
        session.errors.insert(
            Field::Dates,
            "Check-out date must be after check-in date",
        );

        session.apply(Action::CheckOut(None));

        assert!(session.errors.get(Field::Dates).is_none());
    }

    #[test]
    fn advance_gates_on_the_current_step() {
        let mut session = Session::new();

        assert!(!session.advance(Date::today()), "no room selected");
        assert_eq!(session.step, Step::Room);
        assert!(session.errors.get(Field::Room).is_some());

        session.apply(Action::Room(Some("garden-deluxe".parse().unwrap())));
        assert!(session.advance(Date::today()));
        assert_eq!(session.step, Step::Dates);
        assert!(session.errors.is_empty());
    }

    #[test]
    fn reset_restores_the_initial_state_keeping_the_id() {
        let mut session = Session::new();
        let id = session.id;
        session.apply(Action::Name("Kim".into()));
        session.step = Step::Contact;
        session.errors.insert(Field::Email, "nope");

        session.reset();

        assert_eq!(session.id, id);
        assert_eq!(session.draft, Default::default());
        assert_eq!(session.step, Step::Room);
        assert_eq!(session.errors, Errors::default());
        assert!(!session.submitting);
        assert!(session.submitted.is_none());
    }

    #[tokio::test]
    async fn registry_evicts_idle_sessions_but_not_submitting_ones() {
        let registry = Registry::default();

        let mut idle = Session::new();
        let idle_id = idle.id;
        idle.touched_at = TouchDateTime::UNIX_EPOCH;
        registry.insert(idle).await;

        let mut in_flight = Session::new();
        let in_flight_id = in_flight.id;
        in_flight.touched_at = TouchDateTime::UNIX_EPOCH;
        in_flight.submitting = true;
        registry.insert(in_flight).await;

        let fresh = Session::new();
        let fresh_id = fresh.id;
        registry.insert(fresh).await;

        let evicted = registry
            .evict_idle(TouchDateTime::now() - std::time::Duration::from_secs(60))
            .await;

        assert_eq!(evicted, 1);
        assert!(registry.get(idle_id).await.is_none());
        assert!(registry.get(in_flight_id).await.is_some());
        assert!(registry.get(fresh_id).await.is_some());
    }
}
