mod admin;
mod common;
mod contact;
mod gallery;
mod hotel;
mod page;
mod tour;
mod translation;

pub use admin::*;
pub use common::*;
pub use contact::*;
pub use gallery::*;
pub use hotel::*;
pub use page::*;
pub use tour::*;
pub use translation::*;

/// Entities are published by default, matching the original admin workflow.
pub(crate) fn default_published() -> bool {
    true
}
