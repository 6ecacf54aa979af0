use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{RetentionError, RetentionResult};

/// System default retention window for transcripts.
pub const DEFAULT_RETENTION_HOURS: u32 = 24;

/// Upper bound on configurable windows: 30 days.
pub const MAX_RETENTION_HOURS: u32 = 30 * 24;

/// Per-hospital transcript retention policy.
///
/// Applies to transcriptions only, never to generated charts. A window of 0
/// hours deletes the transcript immediately after chart generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetentionPolicy {
    /// Hospital this policy belongs to; `None` is the system default policy.
    pub hospital_id: Option<Uuid>,
    pub retention_hours: u32,
}

impl RetentionPolicy {
    pub fn system_default() -> Self {
        Self {
            hospital_id: None,
            retention_hours: DEFAULT_RETENTION_HOURS,
        }
    }

    pub fn for_hospital(hospital_id: Uuid, retention_hours: u32) -> RetentionResult<Self> {
        if retention_hours > MAX_RETENTION_HOURS {
            return Err(RetentionError::WindowTooLarge(retention_hours));
        }
        Ok(Self {
            hospital_id: Some(hospital_id),
            retention_hours,
        })
    }
}

/// Resolve the effective retention window for a session.
///
/// Resolution order: session-level override, then hospital policy, then the
/// system default. The result is clamped to [`MAX_RETENTION_HOURS`] so a
/// misconfigured source can never extend retention past the hard bound.
pub fn resolve_retention_hours(
    session_override: Option<u32>,
    hospital_policy: Option<&RetentionPolicy>,
) -> u32 {
    session_override
        .or(hospital_policy.map(|p| p.retention_hours))
        .unwrap_or(DEFAULT_RETENTION_HOURS)
        .min(MAX_RETENTION_HOURS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_applies_when_nothing_is_configured() {
        assert_eq!(resolve_retention_hours(None, None), DEFAULT_RETENTION_HOURS);
    }

    #[test]
    fn hospital_policy_beats_default() {
        let policy = RetentionPolicy::for_hospital(Uuid::new_v4(), 48).unwrap();
        assert_eq!(resolve_retention_hours(None, Some(&policy)), 48);
    }

    #[test]
    fn session_override_beats_hospital_policy() {
        let policy = RetentionPolicy::for_hospital(Uuid::new_v4(), 48).unwrap();
        assert_eq!(resolve_retention_hours(Some(1), Some(&policy)), 1);
        assert_eq!(resolve_retention_hours(Some(0), Some(&policy)), 0);
    }

    #[test]
    fn resolution_clamps_to_maximum() {
        assert_eq!(
            resolve_retention_hours(Some(MAX_RETENTION_HOURS + 1), None),
            MAX_RETENTION_HOURS
        );
    }

    #[test]
    fn oversized_hospital_window_is_rejected() {
        assert!(matches!(
            RetentionPolicy::for_hospital(Uuid::new_v4(), MAX_RETENTION_HOURS + 1),
            Err(RetentionError::WindowTooLarge(_))
        ));
    }
}
