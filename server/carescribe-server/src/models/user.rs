use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A clinician account. Created at signup, mutated via settings, never
/// hard-deleted in this subsystem (account lifecycle lives upstream).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub hospital_id: Uuid,
    pub display_name: String,
    pub specialty: String,
    /// Preferred AI note style ("concise", "narrative", ...).
    pub ai_style: Option<String>,
    pub notify_chart_ready: bool,
    pub notify_product_updates: bool,
    pub created_at: DateTime<Utc>,
}

/// Custom vocabulary term for transcription, unique per user.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Keyword {
    pub id: Uuid,
    pub user_id: Uuid,
    pub term: String,
    pub created_at: DateTime<Utc>,
}
