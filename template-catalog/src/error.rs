use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Template not found: {0}")]
    NotFound(Uuid),

    #[error("Duplicate section key '{key}' in template '{template}'")]
    DuplicateSection { template: String, key: String },

    #[error("Template '{0}' declares no sections")]
    EmptyTemplate(String),
}

pub type CatalogResult<T> = Result<T, CatalogError>;
