//! Domain services shared across handlers.

pub mod sessions;

pub use sessions::{SessionService, TranscriptView};
