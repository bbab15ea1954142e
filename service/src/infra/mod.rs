//! Infrastructure layer.

pub mod catalog;
pub mod submission;

pub use self::{
    catalog::{Catalog, InMemory},
    submission::{Simulated, Submission},
};
