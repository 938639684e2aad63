//! HTTP front end of the dashboard.
//!
//! Routes:
//! - `GET /` renders the dashboard page
//! - `GET /api/summary` returns the same data as JSON
//!
//! `HEAD` is answered like `GET` with the body left out.
//!
//! Routing is a plain function from method and path to a `Reply`, so it can
//! be tested without a socket. `serve` wires it into hyper.

use std::convert::Infallible;
use std::future::Future;
use std::sync::Arc;

use data_loader::CatalogIndex;
use http_body_util::Full;
use hyper::body::{Bytes, Incoming};
use hyper::header::{HeaderValue, ALLOW, CONTENT_TYPE};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;
use tracing::{debug, error, info, warn};

use crate::dashboard::{render_dashboard, DashboardSummary};

const HTML: &str = "text/html; charset=utf-8";
const JSON: &str = "application/json";
const TEXT: &str = "text/plain; charset=utf-8";

/// State shared by every connection
#[derive(Debug)]
pub struct AppState {
    pub index: Arc<CatalogIndex>,
    pub top_n: usize,
}

impl AppState {
    pub fn new(index: Arc<CatalogIndex>, top_n: usize) -> Self {
        Self { index, top_n }
    }

    fn summary(&self) -> DashboardSummary {
        DashboardSummary::build(&self.index, self.top_n)
    }
}

/// A response before it is handed to hyper
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: StatusCode,
    pub content_type: &'static str,
    pub body: String,
}

impl Reply {
    fn new(status: StatusCode, content_type: &'static str, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type,
            body: body.into(),
        }
    }

    fn text(status: StatusCode, body: &str) -> Self {
        Self::new(status, TEXT, body)
    }

    /// Convert into a hyper response
    pub fn into_response(self) -> Response<Full<Bytes>> {
        let allow_get = self.status == StatusCode::METHOD_NOT_ALLOWED;
        let mut response = Response::new(Full::new(Bytes::from(self.body)));
        *response.status_mut() = self.status;
        let headers = response.headers_mut();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(self.content_type));
        if allow_get {
            headers.insert(ALLOW, HeaderValue::from_static("GET, HEAD"));
        }
        response
    }
}

/// Map a request line to a reply
pub fn route(state: &AppState, method: &Method, path: &str) -> Reply {
    let known = matches!(path, "/" | "/api/summary");
    if !known {
        return Reply::text(StatusCode::NOT_FOUND, "Not Found");
    }
    let head = *method == Method::HEAD;
    if *method != Method::GET && !head {
        return Reply::text(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed");
    }

    let summary = state.summary();
    let rendered = match path {
        "/" => render_dashboard(&summary).map(|page| Reply::new(StatusCode::OK, HTML, page)),
        _ => summary.to_json().map(|json| Reply::new(StatusCode::OK, JSON, json)),
    };

    let mut reply = rendered.unwrap_or_else(|e| {
        error!("Failed to render {}: {}", path, e);
        Reply::text(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
    });
    if head {
        reply.body.clear();
    }
    reply
}

async fn handle(state: Arc<AppState>, request: Request<Incoming>) -> Result<Response<Full<Bytes>>, Infallible> {
    let reply = route(&state, request.method(), request.uri().path());
    debug!(
        "{} {} -> {}",
        request.method(),
        request.uri().path(),
        reply.status.as_u16()
    );
    Ok(reply.into_response())
}

/// Accept connections until `shutdown` resolves
///
/// Each connection is served on its own task. Connections already in
/// flight are left to finish on their own.
pub async fn serve<F>(listener: TcpListener, state: Arc<AppState>, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()>,
{
    info!("Dashboard listening on http://{}", listener.local_addr()?);
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                info!("Shutting down");
                return Ok(());
            }
            accepted = listener.accept() => {
                let (stream, peer) = match accepted {
                    Ok(conn) => conn,
                    Err(e) => {
                        warn!("Failed to accept connection: {}", e);
                        continue;
                    }
                };

                let state = Arc::clone(&state);
                tokio::spawn(async move {
                    let service = service_fn(move |request| handle(Arc::clone(&state), request));
                    if let Err(e) = http1::Builder::new()
                        .serve_connection(TokioIo::new(stream), service)
                        .await
                    {
                        debug!("Connection from {} ended with error: {}", peer, e);
                    }
                });
            }
        }
    }
}
