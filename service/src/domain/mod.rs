//! Domain definitions.

pub mod draft;
pub mod inquiry;
pub mod quote;
pub mod room;

pub use self::{
    draft::{Action, Draft},
    inquiry::Inquiry,
    quote::Quote,
    room::Room,
};
