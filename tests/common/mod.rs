//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::IntoResponse,
    Router,
};
use dev_router::config::{AllowedHosts, DevServerConfig, ProxyRule};
use dev_router::{HttpServer, Shutdown};
use tokio::net::TcpListener;

/// Header the echo backend stamps on every response.
pub const BACKEND_HEADER: &str = "x-backend";

#[derive(Clone)]
struct EchoState {
    name: &'static str,
    hits: Arc<AtomicUsize>,
}

/// A running echo backend.
pub struct EchoBackend {
    pub addr: SocketAddr,
    pub hits: Arc<AtomicUsize>,
}

impl EchoBackend {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

/// Start a backend that answers `"<METHOD> <URI>\n<BODY>"`.
///
/// POST requests get `201 Created`, everything else `200 OK`. The Host
/// and Authorization headers it received are echoed back in `x-echo-host`
/// and `x-echo-authorization`.
pub async fn start_echo_backend(name: &'static str) -> EchoBackend {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let hits = Arc::new(AtomicUsize::new(0));

    let app = Router::new().fallback(echo).with_state(EchoState {
        name,
        hits: hits.clone(),
    });
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    EchoBackend { addr, hits }
}

async fn echo(
    State(state): State<EchoState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    state.hits.fetch_add(1, Ordering::SeqCst);

    let status = if method == Method::POST {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    let echoed = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string()
    };

    (
        status,
        [
            (BACKEND_HEADER, state.name.to_string()),
            ("x-echo-host", echoed(header::HOST)),
            ("x-echo-authorization", echoed(header::AUTHORIZATION)),
        ],
        format!("{} {}\n{}", method, uri, String::from_utf8_lossy(&body)),
    )
}

/// An address nothing is listening on.
pub async fn closed_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

fn scratch_dir() -> &'static Path {
    Path::new(env!("CARGO_TARGET_TMPDIR"))
}

/// Asset root with an index page and one script, under the target dir.
pub fn asset_root() -> PathBuf {
    let root = scratch_dir().join(format!("dev-router-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(root.join("assets")).unwrap();
    std::fs::write(root.join("index.html"), "<div id=\"root\"></div>").unwrap();
    std::fs::write(root.join("assets/app.js"), "console.log('app')").unwrap();
    root
}

/// The project's proxy table, pointed at `upstream`.
pub fn project_config(upstream: &str) -> DevServerConfig {
    let mut config = DevServerConfig::default();
    config.server.host = false;
    config.server.port = 0;
    config.server.strict_port = true;
    config.server.allowed_hosts = AllowedHosts::List(vec![".".to_string()]);
    config.server.root = asset_root();
    config.server.proxy = vec![
        ProxyRule::new("/clientid", upstream),
        ProxyRule::new("/orders", upstream),
        ProxyRule::new("^/capture/.+", upstream),
    ];
    config
}

/// A dev server running in the background.
pub struct TestServer {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    root: PathBuf,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.trigger();
        // Servers in one test may share a root; whichever drops first removes it.
        if self.root.starts_with(scratch_dir()) {
            let _ = std::fs::remove_dir_all(&self.root);
        }
    }
}

/// Bind and run a dev server; returns once the listener is bound.
pub async fn start_dev_server(config: DevServerConfig) -> TestServer {
    let listener = dev_router::net::bind(&config.server).await.unwrap();
    let addr = listener.local_addr().unwrap();
    let root = config.server.root.clone();
    let server = HttpServer::new(config).unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    TestServer {
        addr,
        shutdown,
        root,
    }
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
