//! # Reflink Server
//!
//! Main entry point for the Reflink referral link service.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use reflink_config::{AppConfig, ConfigLoader, ObservabilityConfig};
use reflink_core::{ReflinkError, ReflinkResult};
use reflink_rest::{create_router, AppState};
use reflink_server::{
    di::{build_module, InfrastructureResolver, ServiceResolver},
    startup::{print_banner, print_startup_info},
};
use reflink_service::metrics::register_metrics;
use tokio::signal;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config.observability);
    print_banner();

    info!("Starting Reflink Server...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));
    info!("Environment: {}", config.app.environment);

    if let Err(e) = run(config).await {
        error!("Application error: {}", e);
        std::process::exit(1);
    }
}

fn load_config() -> ReflinkResult<AppConfig> {
    Ok(ConfigLoader::from_default_location()?.into_config())
}

async fn run(config: AppConfig) -> ReflinkResult<()> {
    let metrics = if config.observability.metrics_enabled {
        init_metrics()
    } else {
        None
    };

    let module = build_module(&config).await?;
    let database = module.database_pool();

    let mut app_state = AppState::new(
        module.link_service(),
        module.user_service(),
        module.payment_service(),
        database.clone(),
    );
    if let Some(handle) = metrics {
        app_state = app_state.with_metrics(handle);
    }

    let router = create_router(app_state, &config.server, &config.observability);

    let addr = config.server.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| ReflinkError::Internal(format!("Failed to bind REST: {}", e)))?;

    let metrics_path = config
        .observability
        .metrics_enabled
        .then_some(config.observability.metrics_path.as_str());
    print_startup_info(&addr, metrics_path);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ReflinkError::Internal(format!("REST server error: {}", e)))?;

    database.close().await;
    info!("Server shutdown complete");
    Ok(())
}

fn init_logging(observability: &ObservabilityConfig) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "{},tower_http=debug,sqlx=warn",
            observability.log_level
        ))
    });

    let registry = tracing_subscriber::registry().with(filter);

    if observability.log_format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .init();
    }
}

fn init_metrics() -> Option<PrometheusHandle> {
    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            register_metrics();
            Some(handle)
        }
        Err(e) => {
            warn!("Failed to install Prometheus recorder: {}", e);
            None
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install terminate handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            info!("Received terminate signal, initiating graceful shutdown...");
        }
    }
}
