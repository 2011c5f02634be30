//! Local HTTP server and client helpers for the integration tests.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::time::Duration;

use apigauge::http_probe::transport::HttpTransport;
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;

async fn handle(req: Request<Incoming>) -> Result<Response<String>, Infallible> {
    let response = match req.uri().path() {
        "/hardened" => Response::builder()
            .status(StatusCode::OK)
            .header("strict-transport-security", "max-age=63072000")
            .header("content-security-policy", "default-src 'self'")
            .header("x-content-type-options", "nosniff")
            .header("x-frame-options", "DENY")
            .body("{}".to_string()),
        "/nosniff" => Response::builder()
            .status(StatusCode::OK)
            .header("x-content-type-options", "nosniff")
            .body("{}".to_string()),
        "/private" => {
            let authorized = req
                .headers()
                .get("authorization")
                .is_some_and(|v| v == "Bearer letmein");
            let status = if authorized {
                StatusCode::OK
            } else {
                StatusCode::UNAUTHORIZED
            };
            Response::builder().status(status).body(String::new())
        }
        _ => Response::builder()
            .status(StatusCode::NOT_FOUND)
            .body(String::new()),
    };
    Ok(response.expect("valid response"))
}

/// Starts a server on an ephemeral port and returns its address.
pub async fn start_test_server() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            tokio::spawn(async move {
                let _ = http1::Builder::new()
                    .serve_connection(TokioIo::new(stream), service_fn(handle))
                    .await;
            });
        }
    });
    addr
}

/// An address nothing is listening on.
pub async fn closed_port() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

/// HTTP transport that ignores proxy settings from the environment.
pub fn local_transport() -> HttpTransport {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(5))
        .no_proxy()
        .build()
        .unwrap();
    HttpTransport::from_client(client)
}
