//! Test server harness.
//!
//! Spawns the full stack - in-memory repository, built-in registry, queue,
//! service with a fast-polling worker, and the Axum router on a real
//! listener - so tests drive the HTTP surface end to end without external
//! dependencies.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use vizeval::evaluator::EvaluatorRegistry;
use vizeval::queue::EvaluationQueue;
use vizeval::repository::MemoryRepository;
use vizeval::service::EvaluationService;
use vizeval_server::gateway::{HandlerState, create_router_with_state};

/// Fast poll so drain-dependent tests converge quickly.
pub const TEST_POLL_INTERVAL: Duration = Duration::from_millis(10);

pub struct TestServer {
    pub addr: SocketAddr,
    pub service: Arc<EvaluationService>,
    pub repository: Arc<MemoryRepository>,
    pub registry: Arc<EvaluatorRegistry>,
    worker: Option<JoinHandle<()>>,
    shutdown_tx: Option<oneshot::Sender<()>>,
    _server_handle: JoinHandle<()>,
}

impl TestServer {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Stops the worker (waiting for any in-flight item) and the listener.
    pub async fn shutdown(mut self) {
        self.service.stop();
        if let Some(worker) = self.worker.take() {
            let _ = worker.await;
        }
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.service.stop();
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

pub async fn spawn_test_server() -> std::io::Result<TestServer> {
    let repository = Arc::new(MemoryRepository::new());
    let registry = Arc::new(EvaluatorRegistry::with_builtins());
    let queue = Arc::new(EvaluationQueue::new());
    let service = Arc::new(EvaluationService::new(
        Arc::clone(&registry),
        repository.clone(),
        queue,
    ));
    let worker = service.start(TEST_POLL_INTERVAL);

    let state = HandlerState::new(
        Arc::clone(&service),
        repository.clone(),
        Arc::clone(&registry),
    );
    let app = create_router_with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    let server_handle = tokio::spawn(async move {
        let _ = axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await;
    });

    Ok(TestServer {
        addr,
        service,
        repository,
        registry,
        worker: Some(worker),
        shutdown_tx: Some(shutdown_tx),
        _server_handle: server_handle,
    })
}
