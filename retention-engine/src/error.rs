use thiserror::Error;

#[derive(Error, Debug)]
pub enum RetentionError {
    #[error("Scrub failed: {0}")]
    Scrub(String),

    #[error("Invalid retention window: {0} hours exceeds the configured maximum")]
    WindowTooLarge(u32),
}

pub type RetentionResult<T> = Result<T, RetentionError>;
