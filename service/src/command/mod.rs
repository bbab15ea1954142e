//! [`Command`] definition.

pub mod advance_step;
pub mod create_session;
pub mod reset_session;
pub mod retreat_step;
pub mod set_step;
pub mod submit_inquiry;
pub mod update_draft;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    advance_step::AdvanceStep, create_session::CreateSession,
    reset_session::ResetSession, retreat_step::RetreatStep, set_step::SetStep,
    submit_inquiry::SubmitInquiry, update_draft::UpdateDraft,
};
