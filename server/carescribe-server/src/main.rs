use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use chart_generation_service::GenerationConfig;
use chrono::Utc;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uuid::Uuid;

use carescribe_server::models::{Hospital, User};
use carescribe_server::{create_app, CareScribeServer, ServerConfig};

/// CareScribe HTTP Server
#[derive(Parser, Debug)]
#[command(name = "carescribe-server")]
#[command(about = "AI medical charting API server")]
struct Args {
    /// Server bind address
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Server port
    #[arg(short, long, default_value = "8080")]
    port: u16,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Retention sweep cadence in seconds
    #[arg(long, default_value = "60")]
    sweep_interval_secs: u64,

    /// Seed a demo hospital and clinician at startup
    #[arg(long)]
    seed_demo: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    info!("Starting CareScribe HTTP Server");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));
    info!("Bind address: {}:{}", args.host, args.port);

    let generation = GenerationConfig::from_env().context("Chart generation configuration")?;
    let config = ServerConfig {
        sweep_interval_secs: args.sweep_interval_secs,
        ..ServerConfig::default()
    };
    let server = CareScribeServer::new(config, generation)?;

    if args.seed_demo {
        seed_demo_data(&server).await;
    }

    // Periodic retention sweep; transcript reads also enforce expiry lazily.
    let sweep_interval = Duration::from_secs(server.config.sweep_interval_secs);
    let scrubber: Arc<dyn retention_engine::TranscriptScrubber> = server.store.clone();
    tokio::spawn(retention_engine::run_sweep(scrubber, sweep_interval));

    let app = create_app(server);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .with_context(|| format!("Invalid bind address {}:{}", args.host, args.port))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("CareScribe server running on http://{}", addr);
    info!("Health check available at: http://{}/health", addr);
    info!("API v1 available at: http://{}/api/v1", addr);

    axum::serve(listener, app).await.context("HTTP server error")?;
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "carescribe_server=debug,tower_http=debug,info"
    } else {
        "carescribe_server=info,warn"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Seed a hospital and a clinician so the API is explorable out of the box.
async fn seed_demo_data(server: &CareScribeServer) {
    let hospital_id = Uuid::new_v4();
    let user_id = Uuid::new_v4();

    server
        .store
        .insert_hospital(Hospital {
            id: hospital_id,
            name: "Demo Clinic".to_string(),
            hospital_type: "clinic".to_string(),
        })
        .await;
    server
        .store
        .insert_user(User {
            id: user_id,
            hospital_id,
            display_name: "Dr. Demo".to_string(),
            specialty: "internal_medicine".to_string(),
            ai_style: None,
            notify_chart_ready: true,
            notify_product_updates: false,
            created_at: Utc::now(),
        })
        .await;

    info!(hospital_id = %hospital_id, user_id = %user_id, "Seeded demo hospital and clinician");
}
