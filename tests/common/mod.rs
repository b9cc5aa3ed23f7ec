//! In-process HTTP/1.1 server for integration tests
//!
//! Serves canned responses keyed by request target (path plus query) and
//! records every request it sees. One response per connection.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use url::Url;

use feature_fetcher::app::RemoteConfig;

/// A request as the server saw it
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub target: String,
    pub authorization: Option<String>,
    pub accept: Option<String>,
    pub user_agent: Option<String>,
}

#[derive(Clone)]
struct CannedResponse {
    status: u16,
    body: Vec<u8>,
}

/// Builder for the routes a `TestServer` answers
#[derive(Default)]
pub struct Routes {
    routes: HashMap<String, CannedResponse>,
}

impl Routes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `target` with `status` and `body`
    pub fn respond(mut self, target: &str, status: u16, body: impl Into<Vec<u8>>) -> Self {
        self.routes.insert(
            target.to_string(),
            CannedResponse {
                status,
                body: body.into(),
            },
        );
        self
    }

    /// Contents listing for `path` below `features` of `acme/features` at `main`
    pub fn listing(self, path: &str, entries: &[(&str, &str)]) -> Self {
        let body = serde_json::to_vec(
            &entries
                .iter()
                .map(|(name, kind)| {
                    serde_json::json!({
                        "name": name,
                        "path": format!("features/{}/{}", path, name),
                        "sha": "0000000000000000000000000000000000000000",
                        "type": kind,
                    })
                })
                .collect::<Vec<_>>(),
        )
        .unwrap();
        self.respond(&listing_target(path), 200, body)
    }

    /// Raw file of `feature` at `file`
    pub fn raw(self, feature: &str, file: &str, body: impl Into<Vec<u8>>) -> Self {
        self.respond(&raw_target(feature, file), 200, body)
    }
}

/// Request target of a contents listing (`""` = the catalog)
pub fn listing_target(path: &str) -> String {
    if path.is_empty() {
        "/repos/acme/features/contents/features?ref=main".to_string()
    } else {
        format!("/repos/acme/features/contents/features/{}?ref=main", path)
    }
}

/// Request target of a raw file
pub fn raw_target(feature: &str, file: &str) -> String {
    format!("/raw/acme/features/main/features/{}/{}", feature, file)
}

pub struct TestServer {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    handle: JoinHandle<()>,
}

impl TestServer {
    pub async fn start(routes: Routes) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let routes = Arc::new(routes.routes);
        let requests = Arc::new(Mutex::new(Vec::new()));

        let recorded = Arc::clone(&requests);
        let handle = tokio::spawn(async move {
            while let Ok((socket, _)) = listener.accept().await {
                let routes = Arc::clone(&routes);
                let recorded = Arc::clone(&recorded);
                tokio::spawn(async move {
                    serve_connection(socket, &routes, &recorded).await;
                });
            }
        });

        Self {
            addr,
            requests,
            handle,
        }
    }

    pub fn base_url(&self) -> Url {
        Url::parse(&format!("http://{}", self.addr)).unwrap()
    }

    /// Remote description pointing both bases at this server
    pub fn remote(&self) -> RemoteConfig {
        RemoteConfig {
            owner: "acme".to_string(),
            repo: "features".to_string(),
            branch: "main".to_string(),
            features_dir: "features".to_string(),
            api_base_url: self.base_url(),
            raw_base_url: self.base_url().join("raw/").unwrap(),
            token: None,
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn targets(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.target).collect()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn serve_connection(
    mut socket: TcpStream,
    routes: &HashMap<String, CannedResponse>,
    recorded: &Mutex<Vec<RecordedRequest>>,
) {
    let mut buffer = Vec::new();
    let mut chunk = [0u8; 1024];
    while !buffer.windows(4).any(|w| w == b"\r\n\r\n") {
        match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => return,
            Ok(n) => buffer.extend_from_slice(&chunk[..n]),
        }
    }

    let head = String::from_utf8_lossy(&buffer).to_string();
    let mut lines = head.lines();
    let target = lines
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/")
        .to_string();

    let mut headers = HashMap::new();
    for line in lines {
        if let Some((name, value)) = line.split_once(':') {
            headers.insert(name.trim().to_ascii_lowercase(), value.trim().to_string());
        }
    }

    recorded.lock().unwrap().push(RecordedRequest {
        target: target.clone(),
        authorization: headers.get("authorization").cloned(),
        accept: headers.get("accept").cloned(),
        user_agent: headers.get("user-agent").cloned(),
    });

    let response = routes.get(&target).cloned().unwrap_or(CannedResponse {
        status: 404,
        body: br#"{"message":"Not Found"}"#.to_vec(),
    });

    let head = format!(
        "HTTP/1.1 {} {}\r\nContent-Length: {}\r\nContent-Type: application/octet-stream\r\nConnection: close\r\n\r\n",
        response.status,
        reason_phrase(response.status),
        response.body.len()
    );
    let _ = socket.write_all(head.as_bytes()).await;
    let _ = socket.write_all(&response.body).await;
    let _ = socket.shutdown().await;
}

fn reason_phrase(status: u16) -> &'static str {
    match status {
        200 => "OK",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Unknown",
    }
}
