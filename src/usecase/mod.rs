//! Usecase layer: application workflows + events.

pub mod compute;
pub mod event;
pub mod report;
pub mod stats;
pub mod validate;
