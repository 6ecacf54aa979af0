//! Transcript retention policy engine for CareScribe
//!
//! Raw visit transcripts are clinical conversations and must become
//! unavailable once their retention window elapses; generated charts are
//! never touched by retention. The engine deliberately persists no "deleted"
//! flag and keeps no timer state: remaining lifetime is a pure function of
//! wall-clock time, recomputed on every read, and enforcement is lazy (on
//! access) plus a periodic sweep that scrubs segment storage so expired
//! content is unreachable even by direct lookup.
//!
//! Policy resolution order: session-level override, then hospital policy,
//! then the system default of 24 hours. Windows are clamped to a configured
//! maximum of 30 days; a window of 0 hours means "delete immediately after
//! generation".

pub mod countdown;
pub mod error;
pub mod policy;
pub mod sweep;

pub use countdown::{format_countdown, is_expired, seconds_until_deletion, EXPIRED_LABEL};
pub use error::{RetentionError, RetentionResult};
pub use policy::{resolve_retention_hours, RetentionPolicy, DEFAULT_RETENTION_HOURS, MAX_RETENTION_HOURS};
pub use sweep::{run_sweep, TranscriptScrubber};
