//! VizEval HTTP server entrypoint.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::signal;

use vizeval::config::Config;
use vizeval::evaluator::{EvaluatorRegistry, MedicalEvaluator};
use vizeval::queue::EvaluationQueue;
use vizeval::repository::{EvaluationRepository, MemoryRepository, RestRepository};
use vizeval::service::EvaluationService;
use vizeval_server::gateway::{HandlerState, create_router_with_state};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if std::env::args().any(|arg| arg == "--health-check") {
        std::process::exit(run_health_check());
    }

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    config.validate()?;
    let addr: SocketAddr = config.socket_addr().parse()?;

    tracing::info!(
        bind_addr = %config.bind_addr,
        port = config.port,
        "VizEval starting"
    );

    let repository: Arc<dyn EvaluationRepository> =
        match (&config.rest_url, &config.rest_service_key) {
            (Some(url), Some(key)) => {
                tracing::info!(url = %url, "using REST repository backend");
                Arc::new(RestRepository::new(url.clone(), key.clone()))
            }
            _ => {
                tracing::info!("using in-memory repository backend");
                Arc::new(MemoryRepository::new())
            }
        };

    let registry = Arc::new(EvaluatorRegistry::with_builtins());
    registry.register(Arc::new(MedicalEvaluator::new(config.medical_model.clone())));

    let queue = Arc::new(EvaluationQueue::new());
    let service = Arc::new(EvaluationService::new(
        Arc::clone(&registry),
        Arc::clone(&repository),
        queue,
    ));
    let worker = service.start(config.poll_interval);

    let state = HandlerState::new(Arc::clone(&service), repository, registry);
    let app = create_router_with_state(state);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("stopping evaluation worker");
    service.stop();
    let _ = worker.await;

    tracing::info!("VizEval shutdown complete");
    Ok(())
}

fn run_health_check() -> i32 {
    let port = std::env::var("VIZEVAL_PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(8000);

    let url = format!("http://127.0.0.1:{}/healthz", port);

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("failed to build runtime");

    rt.block_on(async {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(1))
            .build()
            .expect("failed to build client");

        match client.get(&url).send().await {
            Ok(res) if res.status().is_success() => 0,
            _ => 1,
        }
    })
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
