use std::sync::Arc;

use anyhow::Result;
use chart_generation_service::{ChartGenerationService, GenerationConfig};
use dashboard_engine::StatsConfig;
use template_catalog::TemplateCatalog;

use crate::storage::MemoryStore;

/// Main CareScribe server state
#[derive(Clone)]
pub struct CareScribeServer {
    /// Server configuration
    pub config: ServerConfig,
    /// Shared multi-tenant store
    pub store: Arc<MemoryStore>,
    /// Chart template catalog
    pub catalog: Arc<TemplateCatalog>,
    /// External chart generation boundary
    pub generator: Arc<ChartGenerationService>,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server name
    pub name: String,
    /// Assumed manual charting minutes per visit, for the time-saved metric
    pub baseline_charting_minutes: f64,
    /// Externally measured model accuracy, passed through to the dashboard
    pub accuracy_percent: f64,
    /// Retention sweep cadence in seconds
    pub sweep_interval_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: "CareScribe".to_string(),
            baseline_charting_minutes: 15.0,
            accuracy_percent: 98.0,
            sweep_interval_secs: 60,
        }
    }
}

impl CareScribeServer {
    /// Create a new CareScribe server instance
    pub fn new(config: ServerConfig, generation: GenerationConfig) -> Result<Self> {
        let generator = ChartGenerationService::new(generation)?;
        Ok(Self {
            config,
            store: Arc::new(MemoryStore::new()),
            catalog: Arc::new(TemplateCatalog::with_builtins()),
            generator: Arc::new(generator),
        })
    }

    /// Dashboard tuning derived from server configuration
    pub fn stats_config(&self) -> StatsConfig {
        StatsConfig {
            baseline_charting_minutes: self.config.baseline_charting_minutes,
            accuracy_percent: self.config.accuracy_percent,
        }
    }
}
