//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use uuid::Uuid;
use xml_audit_gateway::audit::{Clock, IdGenerator, RecordFactory, TransactionService, WritePolicy};
use xml_audit_gateway::config::{GatewayConfig, StoreBackend};
use xml_audit_gateway::store::{MemoryStore, ObjectStore, StoreError};
use xml_audit_gateway::{HttpServer, Shutdown};

/// One `put` as seen by [`ScriptedStore`].
#[derive(Debug, Clone)]
pub struct PutCall {
    pub key: String,
    pub body: Bytes,
    pub content_type: String,
}

/// Memory-backed store that records every call and fails on demand.
#[derive(Default)]
pub struct ScriptedStore {
    pub objects: MemoryStore,
    calls: Mutex<Vec<PutCall>>,
    fail_prefixes: Mutex<Vec<String>>,
}

impl ScriptedStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Fail every subsequent put whose key starts with `prefix`.
    pub fn fail_on(&self, prefix: &str) {
        self.fail_prefixes.lock().unwrap().push(prefix.to_string());
    }

    pub fn calls(&self) -> Vec<PutCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_with_prefix(&self, prefix: &str) -> Vec<PutCall> {
        self.calls()
            .into_iter()
            .filter(|c| c.key.starts_with(prefix))
            .collect()
    }
}

#[async_trait]
impl ObjectStore for ScriptedStore {
    async fn put(&self, key: &str, body: Bytes, content_type: &str) -> Result<(), StoreError> {
        self.calls.lock().unwrap().push(PutCall {
            key: key.to_string(),
            body: body.clone(),
            content_type: content_type.to_string(),
        });
        let failing = self
            .fail_prefixes
            .lock()
            .unwrap()
            .iter()
            .any(|p| key.starts_with(p.as_str()));
        if failing {
            return Err(StoreError::Unavailable(format!("injected failure for {}", key)));
        }
        self.objects.put(key, body, content_type).await
    }
}

/// Store whose every put stalls for `delay` before succeeding.
pub struct StallingStore {
    pub delay: Duration,
    pub objects: MemoryStore,
}

impl StallingStore {
    pub fn new(delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            delay,
            objects: MemoryStore::new(),
        })
    }
}

#[async_trait]
impl ObjectStore for StallingStore {
    async fn put(&self, key: &str, body: Bytes, content_type: &str) -> Result<(), StoreError> {
        tokio::time::sleep(self.delay).await;
        self.objects.put(key, body, content_type).await
    }
}

/// Start an S3-compatible endpoint that accepts PUTs but never answers in time.
pub async fn spawn_hung_s3_endpoint() -> SocketAddr {
    use axum::{routing::put, Router};

    let app = Router::new().route(
        "/{*path}",
        put(|| async {
            tokio::time::sleep(Duration::from_secs(30)).await;
            ""
        }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    addr
}

/// Clock frozen at a single instant.
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Sequential UUIDs: 00000000-0000-0000-0000-000000000001, ...
#[derive(Default)]
pub struct SequentialIds(Mutex<u128>);

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> Uuid {
        let mut n = self.0.lock().unwrap();
        *n += 1;
        Uuid::from_u128(*n)
    }
}

/// A running gateway bound to an ephemeral port.
pub struct TestGateway {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub handle: tokio::task::JoinHandle<Result<(), std::io::Error>>,
}

impl TestGateway {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

pub fn test_config() -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config.store.backend = StoreBackend::Memory;
    config
}

/// Start a gateway over `store` with the system clock and random ids.
pub async fn spawn_gateway(store: Arc<dyn ObjectStore>, policy: WritePolicy) -> TestGateway {
    let service = TransactionService::new(store, RecordFactory::default(), policy);
    spawn_with_service(test_config(), service).await
}

/// Start a gateway around a pre-built service.
pub async fn spawn_with_service(config: GatewayConfig, service: TransactionService) -> TestGateway {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::default();
    let server = HttpServer::with_service(config, service);
    let server_shutdown = shutdown.subscribe();
    let handle = tokio::spawn(async move { server.run(listener, server_shutdown).await });

    // Listener is already bound; give the accept loop a moment.
    tokio::time::sleep(Duration::from_millis(20)).await;

    TestGateway {
        addr,
        shutdown,
        handle,
    }
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
