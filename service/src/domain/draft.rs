//! [`Draft`] definitions.

use serde::{Deserialize, Serialize};
use smart_default::SmartDefault;

use crate::validate::Field;

use super::{
    inquiry::{CheckInDate, CheckOutDate},
    room,
};

/// In-progress, not-yet-submitted reservation inquiry.
///
/// Holds raw user input: contact fields stay plain strings until validation,
/// so a guest can type freely and correct mistakes. [`Draft::default`] is the
/// canonical empty draft and the reset target.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize, SmartDefault)]
#[serde(default, rename_all = "camelCase")]
pub struct Draft {
    /// Name of the guest, as typed.
    pub name: String,

    /// Phone number of the guest, as typed.
    pub phone: String,

    /// Email address of the guest, as typed.
    pub email: String,

    /// Selected check-in date, if any.
    pub check_in: Option<CheckInDate>,

    /// Selected check-out date, if any.
    pub check_out: Option<CheckOutDate>,

    /// Number of guests staying.
    #[default = 1]
    pub guests: u8,

    /// Selected [`Room`] ID, if any.
    ///
    /// A foreign key into the room catalog, not owned by the [`Draft`]:
    /// resolution happens at validation/submission time.
    ///
    /// [`Room`]: super::Room
    pub room: Option<room::Id>,

    /// Free-text message of the guest, as typed.
    pub message: String,
}

impl Draft {
    /// Applies the given [`Action`] to this [`Draft`].
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::Name(v) => self.name = v,
            Action::Phone(v) => self.phone = v,
            Action::Email(v) => self.email = v,
            Action::CheckIn(v) => self.check_in = v,
            Action::CheckOut(v) => self.check_out = v,
            Action::Guests(v) => self.guests = v,
            Action::Room(v) => self.room = v,
            Action::Message(v) => self.message = v,
        }
    }
}

/// Single-field update of a [`Draft`].
///
/// One variant per meaningful field transition, so an invalid field name is
/// a compile-time impossibility rather than a runtime no-op.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(content = "value", rename_all = "camelCase", tag = "field")]
pub enum Action {
    /// Sets the guest name.
    Name(String),

    /// Sets the guest phone number.
    Phone(String),

    /// Sets the guest email address.
    Email(String),

    /// Sets or clears the check-in date.
    CheckIn(Option<CheckInDate>),

    /// Sets or clears the check-out date.
    CheckOut(Option<CheckOutDate>),

    /// Sets the number of guests.
    Guests(u8),

    /// Sets or clears the selected room.
    Room(Option<room::Id>),

    /// Sets the free-text message.
    Message(String),
}

impl Action {
    /// Returns the [`Field`] whose error entry this [`Action`] invalidates.
    ///
    /// [`None`] for fields that carry no validation rules of their own.
    #[must_use]
    pub fn field(&self) -> Option<Field> {
        match self {
            Self::Name(_) => Some(Field::Name),
            Self::Phone(_) => Some(Field::Phone),
            Self::Email(_) => Some(Field::Email),
            Self::CheckIn(_) => Some(Field::CheckIn),
            Self::CheckOut(_) => Some(Field::CheckOut),
            Self::Guests(_) => Some(Field::Guests),
            Self::Room(_) => Some(Field::Room),
            Self::Message(_) => None,
        }
    }
}

#[cfg(test)]
mod spec {
    use super::{Action, Draft};

    #[test]
    fn empty_draft_defaults_to_one_guest() {
        let draft = Draft::default();

        assert_eq!(draft.guests, 1);
        assert!(draft.name.is_empty());
        assert!(draft.check_in.is_none());
        assert!(draft.room.is_none());
    }

    #[test]
    fn apply_replaces_a_single_field() {
        let mut draft = Draft::default();

        draft.apply(Action::Name("Kim".into()));
        assert_eq!(draft.name, "Kim");

        draft.apply(Action::Guests(4));
        assert_eq!(draft.guests, 4);
        assert_eq!(draft.name, "Kim");
    }
}
