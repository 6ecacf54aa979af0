//! Shared multi-tenant store.
//!
//! Entity tables behind `tokio::sync::RwLock`ed maps. Two invariants live at
//! this level rather than in application code:
//!
//! - at most one transcription per session: the transcription table is keyed
//!   by session id, so a duplicate attach fails on entry occupancy
//! - patient chart numbers are unique within a hospital
//!
//! The store also implements the retention sweep seam: scrubbing happens
//! under the table's write lock, so a racing read sees either the full
//! transcript or a scrubbed one, never partial segments.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashboard_engine::VisitRecord;
use retention_engine::{
    is_expired, resolve_retention_hours, RetentionPolicy, RetentionResult, TranscriptScrubber,
};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::models::{
    Chart, ChartEdit, Hospital, Keyword, Patient, RecordingSession, Transcription, User,
};

#[derive(Default)]
pub struct MemoryStore {
    hospitals: RwLock<HashMap<Uuid, Hospital>>,
    users: RwLock<HashMap<Uuid, User>>,
    patients: RwLock<HashMap<Uuid, Patient>>,
    sessions: RwLock<HashMap<Uuid, RecordingSession>>,
    /// Keyed by session id - the at-most-one-per-session constraint.
    transcriptions: RwLock<HashMap<Uuid, Transcription>>,
    /// Keyed by session id (1:1 with sessions).
    charts: RwLock<HashMap<Uuid, Chart>>,
    chart_edits: RwLock<Vec<ChartEdit>>,
    /// Hospital retention policies, keyed by hospital id.
    policies: RwLock<HashMap<Uuid, RetentionPolicy>>,
    keywords: RwLock<HashMap<Uuid, Keyword>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Hospitals and users
    // ------------------------------------------------------------------

    pub async fn insert_hospital(&self, hospital: Hospital) {
        self.hospitals.write().await.insert(hospital.id, hospital);
    }

    pub async fn get_hospital(&self, id: Uuid) -> ApiResult<Hospital> {
        self.hospitals
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| ApiError::not_found("hospital"))
    }

    pub async fn insert_user(&self, user: User) {
        self.users.write().await.insert(user.id, user);
    }

    pub async fn get_user(&self, id: Uuid) -> ApiResult<User> {
        self.users
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| ApiError::not_found("user"))
    }

    pub async fn update_user<F>(&self, id: Uuid, apply: F) -> ApiResult<User>
    where
        F: FnOnce(&mut User),
    {
        let mut users = self.users.write().await;
        let user = users.get_mut(&id).ok_or_else(|| ApiError::not_found("user"))?;
        apply(user);
        Ok(user.clone())
    }

    // ------------------------------------------------------------------
    // Patients
    // ------------------------------------------------------------------

    /// Insert a patient, enforcing chart-number uniqueness per hospital.
    pub async fn insert_patient(&self, patient: Patient) -> ApiResult<Patient> {
        let mut patients = self.patients.write().await;
        let duplicate = patients.values().any(|p| {
            p.hospital_id == patient.hospital_id && p.chart_number == patient.chart_number
        });
        if duplicate {
            return Err(ApiError::conflict(format!(
                "Chart number '{}' already exists in this hospital",
                patient.chart_number
            )));
        }
        patients.insert(patient.id, patient.clone());
        Ok(patient)
    }

    pub async fn get_patient(&self, id: Uuid) -> ApiResult<Patient> {
        self.patients
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| ApiError::not_found("patient"))
    }

    pub async fn update_patient<F>(&self, id: Uuid, apply: F) -> ApiResult<Patient>
    where
        F: FnOnce(&mut Patient) -> ApiResult<()>,
    {
        let mut patients = self.patients.write().await;
        let patient = patients
            .get_mut(&id)
            .ok_or_else(|| ApiError::not_found("patient"))?;
        apply(patient)?;
        Ok(patient.clone())
    }

    /// Hard delete; the transition guard lives on the model.
    pub async fn delete_patient(&self, id: Uuid) -> ApiResult<()> {
        let mut patients = self.patients.write().await;
        let patient = patients
            .get(&id)
            .ok_or_else(|| ApiError::not_found("patient"))?;
        patient.ensure_deletable()?;
        patients.remove(&id);
        Ok(())
    }

    pub async fn list_patients(&self, hospital_id: Uuid) -> Vec<Patient> {
        let mut listed: Vec<Patient> = self
            .patients
            .read()
            .await
            .values()
            .filter(|p| p.hospital_id == hospital_id)
            .cloned()
            .collect();
        listed.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        listed
    }

    // ------------------------------------------------------------------
    // Sessions
    // ------------------------------------------------------------------

    pub async fn insert_session(&self, session: RecordingSession) {
        self.sessions.write().await.insert(session.id, session);
    }

    pub async fn get_session(&self, id: Uuid) -> ApiResult<RecordingSession> {
        self.sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| ApiError::not_found("session"))
    }

    pub async fn update_session<F>(&self, id: Uuid, apply: F) -> ApiResult<RecordingSession>
    where
        F: FnOnce(&mut RecordingSession) -> ApiResult<()>,
    {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(&id)
            .ok_or_else(|| ApiError::not_found("session"))?;
        apply(session)?;
        Ok(session.clone())
    }

    pub async fn list_sessions(
        &self,
        hospital_id: Uuid,
        patient_id: Option<Uuid>,
        limit: usize,
    ) -> Vec<RecordingSession> {
        let mut listed: Vec<RecordingSession> = self
            .sessions
            .read()
            .await
            .values()
            .filter(|s| s.hospital_id == hospital_id)
            .filter(|s| patient_id.map_or(true, |p| s.patient_id == p))
            .cloned()
            .collect();
        listed.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        listed.truncate(limit);
        listed
    }

    /// Visit records for the aggregation engine: clone out of the read guard
    /// so the computation never blocks writers.
    pub async fn visit_records(&self, hospital_id: Uuid) -> Vec<VisitRecord> {
        self.sessions
            .read()
            .await
            .values()
            .filter(|s| s.hospital_id == hospital_id)
            .map(|s| VisitRecord {
                created_at: s.created_at,
                duration_seconds: s.duration_seconds,
                diagnosis: s.diagnosis.clone(),
            })
            .collect()
    }

    // ------------------------------------------------------------------
    // Transcriptions
    // ------------------------------------------------------------------

    /// Attach a transcription. Entry occupancy is the uniqueness constraint:
    /// concurrent duplicate attaches lose with `Conflict`, never overwrite.
    pub async fn attach_transcription(&self, transcription: Transcription) -> ApiResult<()> {
        let mut transcriptions = self.transcriptions.write().await;
        if transcriptions.contains_key(&transcription.session_id) {
            return Err(ApiError::conflict(
                "Session already has a transcription attached",
            ));
        }
        transcriptions.insert(transcription.session_id, transcription);
        Ok(())
    }

    pub async fn get_transcription(&self, session_id: Uuid) -> Option<Transcription> {
        self.transcriptions.read().await.get(&session_id).cloned()
    }

    /// Drop segment content for one transcription, keeping the tombstone so
    /// "expired" stays distinguishable from "never attached".
    pub async fn scrub_transcription(&self, session_id: Uuid) {
        if let Some(t) = self.transcriptions.write().await.get_mut(&session_id) {
            t.segments = None;
        }
    }

    /// Effective retention window for a session: override, then hospital
    /// policy, then default.
    pub async fn retention_hours_for(&self, session: &RecordingSession) -> u32 {
        let policies = self.policies.read().await;
        resolve_retention_hours(
            session.retention_hours_override,
            policies.get(&session.hospital_id),
        )
    }

    // ------------------------------------------------------------------
    // Charts
    // ------------------------------------------------------------------

    pub async fn put_chart(&self, chart: Chart) {
        self.charts.write().await.insert(chart.session_id, chart);
    }

    /// Atomically claim chart generation for a session.
    ///
    /// Allowed only when no chart exists or the previous attempt failed; a
    /// `ready` chart must be changed through section edits and a `pending`
    /// one means another generation is in flight. On retry the original
    /// chart id is kept so the edit log stays coherent.
    pub async fn begin_chart_generation(&self, mut chart: Chart) -> ApiResult<Chart> {
        use crate::models::ChartStatus;

        let mut charts = self.charts.write().await;
        if let Some(existing) = charts.get(&chart.session_id) {
            match existing.status {
                ChartStatus::Ready => {
                    return Err(ApiError::conflict(
                        "Chart already generated; edit sections instead of regenerating",
                    ))
                }
                ChartStatus::Pending => {
                    return Err(ApiError::conflict("Chart generation already in progress"))
                }
                ChartStatus::Failed => chart.id = existing.id,
            }
        }
        charts.insert(chart.session_id, chart.clone());
        Ok(chart)
    }

    pub async fn get_chart(&self, session_id: Uuid) -> Option<Chart> {
        self.charts.read().await.get(&session_id).cloned()
    }

    pub async fn find_chart_by_id(&self, chart_id: Uuid) -> Option<Chart> {
        self.charts
            .read()
            .await
            .values()
            .find(|c| c.id == chart_id)
            .cloned()
    }

    pub async fn update_chart<F>(&self, session_id: Uuid, apply: F) -> ApiResult<Chart>
    where
        F: FnOnce(&mut Chart) -> ApiResult<()>,
    {
        let mut charts = self.charts.write().await;
        let chart = charts
            .get_mut(&session_id)
            .ok_or_else(|| ApiError::not_found("chart"))?;
        apply(chart)?;
        Ok(chart.clone())
    }

    pub async fn push_chart_edit(&self, edit: ChartEdit) {
        self.chart_edits.write().await.push(edit);
    }

    pub async fn chart_edits(&self, chart_id: Uuid) -> Vec<ChartEdit> {
        self.chart_edits
            .read()
            .await
            .iter()
            .filter(|e| e.chart_id == chart_id)
            .cloned()
            .collect()
    }

    // ------------------------------------------------------------------
    // Retention policies
    // ------------------------------------------------------------------

    pub async fn set_retention_policy(&self, policy: RetentionPolicy) -> ApiResult<()> {
        let hospital_id = policy
            .hospital_id
            .ok_or_else(|| ApiError::validation("Retention policy requires a hospital id"))?;
        self.policies.write().await.insert(hospital_id, policy);
        Ok(())
    }

    pub async fn get_retention_policy(&self, hospital_id: Uuid) -> Option<RetentionPolicy> {
        self.policies.read().await.get(&hospital_id).cloned()
    }

    // ------------------------------------------------------------------
    // Keywords
    // ------------------------------------------------------------------

    /// Insert a custom vocabulary term, unique per user.
    pub async fn insert_keyword(&self, keyword: Keyword) -> ApiResult<Keyword> {
        let mut keywords = self.keywords.write().await;
        let duplicate = keywords
            .values()
            .any(|k| k.user_id == keyword.user_id && k.term == keyword.term);
        if duplicate {
            return Err(ApiError::conflict(format!(
                "Keyword '{}' already registered for this user",
                keyword.term
            )));
        }
        keywords.insert(keyword.id, keyword.clone());
        Ok(keyword)
    }

    pub async fn list_keywords(&self, user_id: Uuid) -> Vec<Keyword> {
        let mut listed: Vec<Keyword> = self
            .keywords
            .read()
            .await
            .values()
            .filter(|k| k.user_id == user_id)
            .cloned()
            .collect();
        listed.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        listed
    }

    pub async fn delete_keyword(&self, id: Uuid) -> ApiResult<()> {
        self.keywords
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| ApiError::not_found("keyword"))
    }
}

#[async_trait]
impl TranscriptScrubber for MemoryStore {
    async fn scrub_expired(&self, now: DateTime<Utc>) -> RetentionResult<usize> {
        use crate::models::SessionStatus;

        // Snapshot each session's effective window first; only the
        // transcription write lock is held while scrubbing. A zero-hour
        // window means "delete immediately after generation", so those
        // transcripts are spared until their chart is ready.
        let windows: HashMap<Uuid, (u32, bool)> = {
            let sessions = self.sessions.read().await;
            let policies = self.policies.read().await;
            sessions
                .iter()
                .map(|(id, session)| {
                    let hours = resolve_retention_hours(
                        session.retention_hours_override,
                        policies.get(&session.hospital_id),
                    );
                    let chart_ready = session.status == SessionStatus::ChartReady;
                    (*id, (hours, chart_ready))
                })
                .collect()
        };

        let mut transcriptions = self.transcriptions.write().await;
        let mut scrubbed = 0;
        for transcription in transcriptions.values_mut() {
            if transcription.segments.is_none() {
                continue;
            }
            let (hours, chart_ready) = windows
                .get(&transcription.session_id)
                .copied()
                .unwrap_or((retention_engine::DEFAULT_RETENTION_HOURS, false));
            if hours == 0 && !chart_ready {
                continue;
            }
            if is_expired(transcription.created_at, hours, now) {
                transcription.segments = None;
                scrubbed += 1;
            }
        }
        Ok(scrubbed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Speaker, TranscriptionSegment};
    use chrono::Duration;

    fn transcription(session_id: Uuid, created_at: DateTime<Utc>) -> Transcription {
        Transcription {
            id: Uuid::new_v4(),
            session_id,
            created_at,
            segments: Some(vec![TranscriptionSegment {
                speaker: Speaker::Doctor,
                text: "take a deep breath".to_string(),
                timestamp: created_at,
            }]),
        }
    }

    #[tokio::test]
    async fn second_attach_conflicts() {
        let store = MemoryStore::new();
        let session_id = Uuid::new_v4();
        store
            .attach_transcription(transcription(session_id, Utc::now()))
            .await
            .unwrap();
        let err = store
            .attach_transcription(transcription(session_id, Utc::now()))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Conflict { .. }));
    }

    #[tokio::test]
    async fn sweep_scrubs_only_expired_transcripts() {
        let store = MemoryStore::new();
        let now = Utc::now();
        let fresh = Uuid::new_v4();
        let stale = Uuid::new_v4();
        store.attach_transcription(transcription(fresh, now)).await.unwrap();
        store
            .attach_transcription(transcription(stale, now - Duration::hours(25)))
            .await
            .unwrap();

        // No sessions exist for these ids; default 24h window applies.
        let scrubbed = store.scrub_expired(now).await.unwrap();
        assert_eq!(scrubbed, 1);

        let stale_record = store.get_transcription(stale).await.unwrap();
        assert!(stale_record.segments.is_none());
        let fresh_record = store.get_transcription(fresh).await.unwrap();
        assert!(fresh_record.segments.is_some());

        // Tombstone still distinguishes "expired" from "never attached".
        assert!(store.get_transcription(Uuid::new_v4()).await.is_none());
    }

    #[tokio::test]
    async fn duplicate_chart_numbers_rejected_per_hospital() {
        use crate::models::{Gender, PatientStatus};
        use chrono::NaiveDate;

        let store = MemoryStore::new();
        let hospital_a = Uuid::new_v4();
        let hospital_b = Uuid::new_v4();
        let patient = |hospital_id| Patient {
            id: Uuid::new_v4(),
            hospital_id,
            name: "P".into(),
            gender: Gender::Other,
            birth_date: NaiveDate::from_ymd_opt(1980, 1, 1).unwrap(),
            phone: None,
            address: None,
            allergies: None,
            notes: None,
            chart_number: "C-100".into(),
            status: PatientStatus::Active,
            visit_count: 0,
            last_visit_at: None,
            created_at: Utc::now(),
        };

        store.insert_patient(patient(hospital_a)).await.unwrap();
        // Same chart number in another hospital is fine.
        store.insert_patient(patient(hospital_b)).await.unwrap();
        // Same chart number in the same hospital conflicts.
        let err = store.insert_patient(patient(hospital_a)).await.unwrap_err();
        assert!(matches!(err, ApiError::Conflict { .. }));
    }
}
