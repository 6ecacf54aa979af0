use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use template_catalog::TemplateSection;
use utoipa::ToSchema;
use uuid::Uuid;

/// Chart generation state. `failed` charts are retryable; `ready` charts can
/// only change through explicit section edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ChartStatus {
    Pending,
    Ready,
    Failed,
}

/// The structured clinical note generated for one session.
///
/// The section list is snapshotted from the template at generation time, so
/// later template edits never rewrite historical charts. Never deleted by the
/// retention engine.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Chart {
    pub id: Uuid,
    pub session_id: Uuid,
    pub template_id: Uuid,
    /// Section descriptors captured at generation time, in template order.
    pub sections: Vec<TemplateSection>,
    /// Section key -> note text. Sections without content are simply absent.
    pub contents: HashMap<String, String>,
    pub status: ChartStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Chart {
    pub fn has_section(&self, key: &str) -> bool {
        self.sections.iter().any(|s| s.key == key)
    }
}

/// Append-only record of one manual section edit.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChartEdit {
    pub chart_id: Uuid,
    pub section_key: String,
    pub edited_by: Uuid,
    pub edited_at: DateTime<Utc>,
}
