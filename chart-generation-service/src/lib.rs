//! Chart Generation Service for CareScribe
//!
//! The boundary to the external AI collaborator that turns a visit transcript
//! into structured chart text, one entry per template section. The service
//! never performs summarization itself; it frames the request (section list,
//! transcript segments, note style), bounds the provider call with a timeout,
//! and maps provider failures to retryable errors.
//!
//! **Privacy**: only transcript *text* crosses this boundary. Raw audio is
//! deleted upstream immediately after transcription and never reaches this
//! crate in any form — a stricter-than-text rule that is not configurable.
//!
//! # Providers
//!
//! - **Mock** - deterministic output, for development and tests (default)
//! - **Http** - JSON POST to a self-hosted or contracted generation endpoint
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use chart_generation_service::{ChartGenerationService, GenerationConfig};
//!
//! # async fn example(request: chart_generation_service::GenerationRequest)
//! # -> Result<(), Box<dyn std::error::Error>> {
//! let config = GenerationConfig::from_env()?;
//! let service = ChartGenerationService::new(config)?;
//! let result = service.generate(request).await?;
//! println!("Sections generated: {}", result.contents.len());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod generation;
pub mod providers;
pub mod service;

pub use config::*;
pub use error::*;
pub use generation::*;
pub use service::*;
