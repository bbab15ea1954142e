//! Marker types.

/// Marker type describing an entity creation.
#[derive(Clone, Copy, Debug)]
pub struct Creation;

/// Marker type describing a guest arrival (check-in).
#[derive(Clone, Copy, Debug)]
pub struct Arrival;

/// Marker type describing a guest departure (check-out).
#[derive(Clone, Copy, Debug)]
pub struct Departure;
