use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use shopfront_api::app::{build_app, services::AppServices};
use shopfront_catalog::{CatalogStore, DelaySampler};
use shopfront_remote::proto::product_server::Product;
use shopfront_remote::server::{self, StaticCatalogService};
use shopfront_remote::{
    Empty, ProductListResponse, ProductRequest, ProductResponse, RemoteCatalog,
    RemoteCatalogClient, RemoteConfig, RemoteError,
};
use tonic::{Request, Response, Status};

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(services: Arc<AppServices>, request_timeout: Duration) -> Self {
        // Same router as prod, bound to an ephemeral port.
        let app = build_app(services, request_timeout);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// In-process remote catalog on an ephemeral port.
struct TestRemote {
    port: u16,
    stop: CancellationToken,
}

impl TestRemote {
    async fn spawn() -> Self {
        Self::spawn_service(StaticCatalogService).await
    }

    async fn spawn_service<S: Product>(service: S) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let stop = CancellationToken::new();
        let signal = stop.clone();
        tokio::spawn(async move {
            server::serve(service, listener, async move { signal.cancelled().await })
                .await
                .unwrap();
        });
        Self { port, stop }
    }

    fn config(&self) -> RemoteConfig {
        RemoteConfig::new("127.0.0.1", self.port)
    }

    async fn connect(&self) -> Arc<dyn RemoteCatalog> {
        self.connect_with(self.config().with_rpc_timeout(Duration::from_secs(2))).await
    }

    async fn connect_with(&self, cfg: RemoteConfig) -> Arc<dyn RemoteCatalog> {
        Arc::new(RemoteCatalogClient::connect(&cfg).await.unwrap())
    }
}

impl Drop for TestRemote {
    fn drop(&mut self) {
        self.stop.cancel();
    }
}

/// Remote stand-in with a canned bulk answer.
struct CannedRemote {
    answer: Result<Vec<ProductResponse>, RemoteError>,
}

#[async_trait]
impl RemoteCatalog for CannedRemote {
    async fn get_product_by_id(&self, id: i32) -> Result<ProductResponse, RemoteError> {
        self.answer
            .clone()?
            .into_iter()
            .find(|p| p.id == id)
            .ok_or_else(|| RemoteError::unavailable(format!("NotFound: product {id}")))
    }

    async fn get_all_products(&self) -> Result<Vec<ProductResponse>, RemoteError> {
        self.answer.clone()
    }

    fn close(&self) {}
}

/// Accepts calls but never answers within a test's lifetime.
struct StalledCatalog;

#[tonic::async_trait]
impl Product for StalledCatalog {
    async fn get_product(
        &self,
        _request: Request<ProductRequest>,
    ) -> Result<Response<ProductResponse>, Status> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Err(Status::deadline_exceeded("stalled"))
    }

    async fn get_products(
        &self,
        _request: Request<Empty>,
    ) -> Result<Response<ProductListResponse>, Status> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok(Response::new(ProductListResponse { products: vec![] }))
    }
}

fn test_store() -> Arc<CatalogStore> {
    Arc::new(CatalogStore::seeded(DelaySampler::seeded(11)))
}

fn local_only() -> Arc<AppServices> {
    Arc::new(AppServices::new(test_store(), None))
}

fn with_remote(remote: Arc<dyn RemoteCatalog>) -> Arc<AppServices> {
    Arc::new(AppServices::new(test_store(), Some(remote)))
}

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[tokio::test]
async fn local_health_is_always_up() {
    let srv = TestServer::spawn(local_only(), DEFAULT_TIMEOUT).await;

    let res = reqwest::get(srv.url("/actuator/health")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), "UP");
}

#[tokio::test]
async fn list_products_returns_full_catalog_after_injected_latency() {
    let srv = TestServer::spawn(local_only(), DEFAULT_TIMEOUT).await;

    let started = Instant::now();
    let res = reqwest::get(srv.url("/api/products")).await.unwrap();
    let elapsed = started.elapsed();

    assert_eq!(res.status(), StatusCode::OK);
    assert!(elapsed >= Duration::from_millis(100), "responded after {elapsed:?}");
    assert!(elapsed < Duration::from_secs(3), "responded after {elapsed:?}");

    let body: Value = res.json().await.unwrap();
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 200);
    assert_eq!(items[0]["id"], 1);
    assert_eq!(items[0]["name"], "Product 1");
    assert_eq!(items[0]["category"], "Category B");
    assert_eq!(items[1]["category"], "Category A");
    assert_eq!(items[199]["id"], 200);
}

#[tokio::test]
async fn get_product_by_id_found_missing_and_malformed() {
    let srv = TestServer::spawn(local_only(), DEFAULT_TIMEOUT).await;
    let client = reqwest::Client::new();

    let first: Value = client.get(srv.url("/api/products/5")).send().await.unwrap().json().await.unwrap();
    let second: Value = client.get(srv.url("/api/products/5")).send().await.unwrap().json().await.unwrap();
    assert_eq!(first, second);
    assert_eq!(first["id"], 5);
    assert_eq!(first["name"], "Product 5");
    let price = first["price"].as_f64().unwrap();
    assert!((10.0..=100.0).contains(&price));

    let res = client.get(srv.url("/api/products/99999")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "not_found");

    let res = client.get(srv.url("/api/products/abc")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delayed_list_is_abandoned_when_request_times_out() {
    let srv = TestServer::spawn(local_only(), Duration::from_secs(1)).await;

    let started = Instant::now();
    let res = reqwest::get(srv.url("/api/products-delayed")).await.unwrap();

    assert_eq!(res.status(), StatusCode::REQUEST_TIMEOUT);
    assert!(started.elapsed() < Duration::from_secs(5));

    // The store is untouched by the abandoned read.
    let res = reqwest::get(srv.url("/api/products/200")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn remote_routes_forward_and_translate() {
    let remote = TestRemote::spawn().await;
    let srv = TestServer::spawn(with_remote(remote.connect().await), DEFAULT_TIMEOUT).await;
    let client = reqwest::Client::new();

    let res = client.get(srv.url("/api/grpc/products")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(
        body,
        serde_json::json!([
            {"id": 1, "name": "Product 1", "price": 50.0, "description": "First product"},
            {"id": 2, "name": "Product 2", "price": 75.0, "description": "Second product"},
        ])
    );

    let body: Value = client
        .get(srv.url("/api/grpc/products/7"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["id"], 7);
    assert_eq!(body["name"], "Sample Product");
    assert_eq!(body["price"], 99.99);
    assert_eq!(body["description"], "This is a sample product");

    let res = client.get(srv.url("/api/grpc/health")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), "UP");
}

#[tokio::test]
async fn remote_health_is_up_for_an_empty_catalog() {
    let remote = Arc::new(CannedRemote { answer: Ok(vec![]) });
    let srv = TestServer::spawn(with_remote(remote), DEFAULT_TIMEOUT).await;

    let res = reqwest::get(srv.url("/api/grpc/health")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), "UP");
}

#[tokio::test]
async fn unavailable_remote_reports_down_and_fails_data_routes() {
    let remote = Arc::new(CannedRemote {
        answer: Err(RemoteError::unavailable("Unavailable: connection refused")),
    });
    let srv = TestServer::spawn(with_remote(remote), DEFAULT_TIMEOUT).await;
    let client = reqwest::Client::new();

    let res = client.get(srv.url("/api/grpc/health")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), "DOWN");

    let res = client.get(srv.url("/api/grpc/products")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_GATEWAY);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "remote_unavailable");

    let res = client.get(srv.url("/api/grpc/products/1")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_GATEWAY);

    // No fallback to the local store.
    let res = client.get(srv.url("/api/products/1")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn stalled_remote_health_reports_down_before_the_request_times_out() {
    let remote = TestRemote::spawn_service(StalledCatalog).await;
    // No per-RPC deadline: only the probe timeout bounds the call.
    let client = remote.connect_with(remote.config()).await;
    let services = Arc::new(
        AppServices::new(test_store(), Some(client)).with_probe_timeout(Duration::from_millis(300)),
    );
    let srv = TestServer::spawn(services, Duration::from_secs(5)).await;

    let started = Instant::now();
    let res = reqwest::get(srv.url("/api/grpc/health")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), "DOWN");
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn stalled_remote_data_routes_fail_as_bad_gateway() {
    let remote = TestRemote::spawn_service(StalledCatalog).await;
    let client = remote
        .connect_with(remote.config().with_rpc_timeout(Duration::from_millis(300)))
        .await;
    let srv = TestServer::spawn(with_remote(client), Duration::from_secs(5)).await;
    let http = reqwest::Client::new();

    let res = http.get(srv.url("/api/grpc/products")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_GATEWAY);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "remote_unavailable");

    let res = http.get(srv.url("/api/grpc/products/3")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn closed_client_reports_down_and_client_closed() {
    let remote = TestRemote::spawn().await;
    let services = with_remote(remote.connect().await);
    let srv = TestServer::spawn(Arc::clone(&services), DEFAULT_TIMEOUT).await;
    let client = reqwest::Client::new();

    services.shutdown();

    let res = client.get(srv.url("/api/grpc/products")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "client_closed");

    let res = client.get(srv.url("/api/grpc/health")).send().await.unwrap();
    assert_eq!(res.text().await.unwrap(), "DOWN");
}

#[tokio::test]
async fn remote_routes_are_absent_when_disabled() {
    let srv = TestServer::spawn(local_only(), DEFAULT_TIMEOUT).await;

    let res = reqwest::get(srv.url("/api/grpc/health")).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}
