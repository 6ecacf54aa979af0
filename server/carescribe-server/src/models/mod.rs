//! Domain entities of the session/transcription/chart subsystem.

pub mod chart;
pub mod hospital;
pub mod patient;
pub mod session;
pub mod user;

pub use chart::{Chart, ChartEdit, ChartStatus};
pub use hospital::Hospital;
pub use patient::{Gender, Patient, PatientStatus};
pub use session::{
    RecordingSession, SessionStatus, Speaker, Transcription, TranscriptionSegment, Vitals,
};
pub use user::{Keyword, User};

/// Central default-rendering policy for optional display fields.
///
/// Every embedded display field that may be absent renders through this one
/// helper instead of scattering `"-"` literals through consumers.
pub fn or_dash(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn or_dash_covers_missing_and_blank() {
        assert_eq!(or_dash(Some("knee pain")), "knee pain");
        assert_eq!(or_dash(Some("  ")), "-");
        assert_eq!(or_dash(None), "-");
    }
}
