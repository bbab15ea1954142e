//! [`Quote`] definitions.

use common::{money::Currency, Money};
use serde::Serialize;

use super::{Draft, Room};

/// Derived nights/price figures of a [`Draft`].
///
/// Recomputed from scratch on every relevant input change; not a binding
/// price.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// Number of nights of the requested stay.
    pub nights: u32,

    /// Total price of the requested stay.
    pub total: Money,
}

impl Quote {
    /// Creates a zero [`Quote`] in the given [`Currency`].
    #[must_use]
    pub const fn zero(currency: Currency) -> Self {
        Self {
            nights: 0,
            total: Money::zero(currency),
        }
    }

    /// Computes the [`Quote`] of the given [`Draft`] against the given
    /// [`Room`].
    ///
    /// Pure and idempotent. Yields the zero [`Quote`] when either date is
    /// missing or the dates are not in strictly increasing order: the total
    /// is never negative.
    #[must_use]
    pub fn compute(draft: &Draft, room: &Room) -> Self {
        let currency = room.price_per_night.currency;

        let (Some(check_in), Some(check_out)) =
            (draft.check_in, draft.check_out)
        else {
            return Self::zero(currency);
        };

        let Ok(nights) = u32::try_from(check_out.days_since(check_in)) else {
            return Self::zero(currency);
        };
        if nights == 0 {
            return Self::zero(currency);
        }

        Self {
            nights,
            total: room.price_per_night * nights,
        }
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use common::{money::Currency, Date, Money};

    use crate::domain::{Draft, Room};

    use super::Quote;

    fn garden_deluxe() -> Room {
        crate::infra::catalog::InMemory::with_pension_rooms()
            .rooms()
            .iter()
            .find(|r| AsRef::<str>::as_ref(&r.id) == "garden-deluxe")
            .cloned()
            .unwrap()
    }

    fn draft(check_in: &str, check_out: &str) -> Draft {
        Draft {
            check_in: Some(Date::from_iso8601(check_in).unwrap().coerce()),
            check_out: Some(Date::from_iso8601(check_out).unwrap().coerce()),
            ..Draft::default()
        }
    }

    #[test]
    fn two_nights_in_garden_deluxe_cost_240000_krw() {
        let quote =
            Quote::compute(&draft("2025-06-01", "2025-06-03"), &garden_deluxe());

        assert_eq!(quote.nights, 2);
        assert_eq!(quote.total, Money::from_str("240000KRW").unwrap());
    }

    #[test]
    fn is_idempotent() {
        let d = draft("2025-06-01", "2025-06-08");
        let room = garden_deluxe();

        assert_eq!(Quote::compute(&d, &room), Quote::compute(&d, &room));
    }

    #[test]
    fn reversed_or_equal_dates_yield_zero() {
        let room = garden_deluxe();

        let reversed =
            Quote::compute(&draft("2025-06-03", "2025-06-01"), &room);
        assert_eq!(reversed, Quote::zero(Currency::Krw));

        let same = Quote::compute(&draft("2025-06-01", "2025-06-01"), &room);
        assert_eq!(same, Quote::zero(Currency::Krw));
    }

    #[test]
    fn missing_dates_yield_zero() {
        let room = garden_deluxe();

        assert_eq!(
            Quote::compute(&Draft::default(), &room),
            Quote::zero(Currency::Krw),
        );
    }
}
