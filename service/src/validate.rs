//! Canonical validation rules of a reservation [`Draft`].
//!
//! One rule table serves both granularities: [`step`] gates a single wizard
//! screen, while [`draft`] is the union of all step subsets and guards the
//! whole form right before submission.

use std::collections::BTreeMap;

use common::Date;
use serde::Serialize;
use strum::Display;

use crate::{
    domain::{
        inquiry::{Email, GuestCount, Phone},
        Draft,
    },
    session::Step,
};

/// Field of a [`Draft`] an error message can be attached to.
#[derive(
    Clone,
    Copy,
    Debug,
    Display,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum Field {
    /// Room selection.
    Room,

    /// Check-in date.
    CheckIn,

    /// Check-out date.
    CheckOut,

    /// Cross-field date ordering slot.
    ///
    /// The check-in/check-out ordering rule depends on two inputs, so its
    /// violation is reported here rather than against either date alone.
    Dates,

    /// Number of guests.
    Guests,

    /// Guest name.
    Name,

    /// Guest email address.
    Email,

    /// Guest phone number.
    Phone,
}

/// Mapping from [`Field`]s to human-readable error messages.
///
/// An empty mapping signals a valid input. Built fresh on every validation
/// pass and never merged with stale entries of fields that passed.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Errors(BTreeMap<Field, String>);

impl Errors {
    /// Indicates whether no rule was violated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of violated rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns the error message attached to the given [`Field`], if any.
    #[must_use]
    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    /// Attaches an error message to the given [`Field`].
    ///
    /// A later message for the same [`Field`] wins.
    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        _ = self.0.insert(field, message.into());
    }

    /// Removes the error entry of the given [`Field`] only, leaving other
    /// entries untouched.
    pub fn clear(&mut self, field: Field) {
        _ = self.0.remove(&field);
    }

    /// Extends this mapping with all entries of the `other` one.
    pub fn extend(&mut self, other: Self) {
        self.0.extend(other.0);
    }
}

/// Validates the subset of the given [`Draft`] relevant to the given wizard
/// [`Step`].
///
/// Pure: evaluates every rule of the subset (no short-circuiting) and
/// reports all violations together. `today` is the calendar day the check-in
/// date is compared against, at day granularity.
#[must_use]
pub fn step(step: Step, draft: &Draft, today: Date) -> Errors {
    let mut errors = Errors::default();

    match step {
        Step::Room => {
            if draft.room.is_none() {
                errors.insert(Field::Room, "Please select a room");
            }
        }

        Step::Dates => {
            match draft.check_in {
                None => errors
                    .insert(Field::CheckIn, "Please select a check-in date"),
                Some(check_in) if check_in.coerce() < today => errors.insert(
                    Field::CheckIn,
                    "Check-in date cannot be in the past",
                ),
                Some(_) => {}
            }

            if draft.check_out.is_none() {
                errors
                    .insert(Field::CheckOut, "Please select a check-out date");
            }

            if let (Some(check_in), Some(check_out)) =
                (draft.check_in, draft.check_out)
            {
                if check_out.days_since(check_in) <= 0 {
                    errors.insert(
                        Field::Dates,
                        "Check-out date must be after check-in date",
                    );
                }
            }

            if GuestCount::new(draft.guests).is_none() {
                errors.insert(
                    Field::Guests,
                    format!(
                        "Guest count must be between {} and {}",
                        GuestCount::MIN,
                        GuestCount::MAX,
                    ),
                );
            }
        }

        Step::Contact => {
            if draft.name.trim().is_empty() {
                errors.insert(Field::Name, "Please enter your name");
            }

            if draft.email.trim().is_empty() {
                errors.insert(Field::Email, "Please enter your email address");
            } else if !Email::check(&draft.email) {
                errors.insert(
                    Field::Email,
                    "Please enter a valid email address",
                );
            }

            if draft.phone.trim().is_empty() {
                errors.insert(Field::Phone, "Please enter your phone number");
            } else if !Phone::check(&draft.phone) {
                errors
                    .insert(Field::Phone, "Please enter a valid phone number");
            }
        }

        // Terminal display step: nothing left to check.
        Step::Confirmation => {}
    }

    errors
}

/// Validates the whole [`Draft`], as a submission attempt does.
///
/// The union of the [`Step::Room`], [`Step::Dates`] and [`Step::Contact`]
/// subsets over the same rule table.
#[must_use]
pub fn draft(draft: &Draft, today: Date) -> Errors {
    let mut errors = step(Step::Room, draft, today);
    errors.extend(step(Step::Dates, draft, today));
    errors.extend(step(Step::Contact, draft, today));
    errors
}

#[cfg(test)]
mod spec {
    use common::{Date, DateOf};

    use crate::{domain::Draft, session::Step};

    use super::{draft as validate_draft, step as validate_step, Field};

    fn date(s: &str) -> DateOf {
        DateOf::from_iso8601(s).unwrap()
    }

    fn valid_draft() -> Draft {
        Draft {
            name: "Kim".into(),
            phone: "010-1234-5678".into(),
            email: "a@b.com".into(),
            check_in: Some(date("2025-06-01").coerce()),
            check_out: Some(date("2025-06-03").coerce()),
            guests: 2,
            room: Some("garden-deluxe".parse().unwrap()),
            message: String::new(),
        }
    }

    #[test]
    fn accepts_a_complete_valid_draft() {
        let errors = validate_draft(&valid_draft(), date("2025-06-01"));

        assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    }

    #[test]
    fn empty_draft_reports_every_missing_field_together() {
        let errors = validate_draft(&Draft::default(), Date::today());

        assert!(errors.get(Field::Name).is_some());
        assert!(errors.get(Field::Phone).is_some());
        assert!(errors.get(Field::Email).is_some());
        assert!(errors.get(Field::CheckIn).is_some());
        assert!(errors.get(Field::CheckOut).is_some());
        assert!(errors.get(Field::Room).is_some());
        assert!(errors.get(Field::Guests).is_none(), "1 guest is valid");
    }

    #[test]
    fn missing_contact_fields_are_reported_exactly() {
        let mut draft = valid_draft();
        draft.name = "   ".into();
        draft.phone = String::new();
        draft.email = String::new();

        let errors = validate_draft(&draft, date("2025-06-01"));

        assert_eq!(errors.len(), 3);
        assert!(errors.get(Field::Name).is_some());
        assert!(errors.get(Field::Phone).is_some());
        assert!(errors.get(Field::Email).is_some());
    }

    #[test]
    fn malformed_contact_fields_are_rejected() {
        let mut draft = valid_draft();
        draft.email = "not-an-email".into();
        draft.phone = "call me maybe".into();

        let errors = validate_draft(&draft, date("2025-06-01"));

        assert_eq!(
            errors.get(Field::Email),
            Some("Please enter a valid email address"),
        );
        assert_eq!(
            errors.get(Field::Phone),
            Some("Please enter a valid phone number"),
        );
    }

    #[test]
    fn reversed_dates_violate_the_ordering_rule() {
        let mut draft = valid_draft();
        draft.check_in = Some(date("2025-06-03").coerce());
        draft.check_out = Some(date("2025-06-01").coerce());

        let errors = validate_draft(&draft, date("2025-06-01"));

        assert!(errors.get(Field::Dates).is_some());
    }

    #[test]
    fn equal_dates_violate_the_ordering_rule() {
        let mut draft = valid_draft();
        draft.check_out = Some(date("2025-06-01").coerce());

        let errors = validate_draft(&draft, date("2025-06-01"));

        assert!(errors.get(Field::Dates).is_some());
    }

    #[test]
    fn future_stay_raises_no_date_error() {
        let errors = validate_draft(&valid_draft(), date("2025-05-20"));

        assert!(errors.get(Field::CheckIn).is_none());
        assert!(errors.get(Field::CheckOut).is_none());
        assert!(errors.get(Field::Dates).is_none());
    }

    #[test]
    fn past_check_in_is_rejected() {
        let errors = validate_draft(&valid_draft(), date("2025-06-02"));

        assert_eq!(
            errors.get(Field::CheckIn),
            Some("Check-in date cannot be in the past"),
        );
    }

    #[test]
    fn guest_count_bounds_are_inclusive() {
        let mut draft = valid_draft();

        draft.guests = 10;
        assert!(validate_draft(&draft, date("2025-06-01"))
            .get(Field::Guests)
            .is_none());

        draft.guests = 11;
        assert!(validate_draft(&draft, date("2025-06-01"))
            .get(Field::Guests)
            .is_some());

        draft.guests = 0;
        assert!(validate_draft(&draft, date("2025-06-01"))
            .get(Field::Guests)
            .is_some());
    }

    #[test]
    fn steps_scope_their_rule_subsets() {
        let empty = Draft::default();
        let today = Date::today();

        let room = validate_step(Step::Room, &empty, today);
        assert_eq!(room.len(), 1);
        assert!(room.get(Field::Room).is_some());

        let dates = validate_step(Step::Dates, &empty, today);
        assert!(dates.get(Field::CheckIn).is_some());
        assert!(dates.get(Field::CheckOut).is_some());
        assert!(dates.get(Field::Name).is_none());

        let contact = validate_step(Step::Contact, &empty, today);
        assert!(contact.get(Field::Name).is_some());
        assert!(contact.get(Field::Room).is_none());

        assert!(validate_step(Step::Confirmation, &empty, today).is_empty());
    }
}
