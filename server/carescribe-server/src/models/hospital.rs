use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Tenant root: every patient and session resolves to exactly one hospital.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Hospital {
    pub id: Uuid,
    pub name: String,
    /// Free-form facility type ("clinic", "general_hospital", ...).
    pub hospital_type: String,
}
