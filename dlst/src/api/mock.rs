//! In-memory [`Transport`] with canned replies, for tests.

use super::errors::{ApiError, ApiResult};
use super::transport::{HttpRequest, HttpResponse, Method, Transport};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Debug, Clone)]
enum Reply {
    Respond(HttpResponse),
    Unreachable,
    /// Never completes
    Hold,
}

/// Records every request and answers from a route table keyed by method and
/// absolute URL. Unknown routes answer 404.
#[derive(Debug, Default)]
pub struct MockTransport {
    routes: Mutex<HashMap<(Method, String), Reply>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `method url` with `status` and `body` from now on.
    pub fn reply(&self, method: Method, url: &str, status: u16, body: Value) {
        self.route(method, url, Reply::Respond(HttpResponse { status, body }));
    }

    /// Fail `method url` as if the server could not be reached.
    pub fn unreachable(&self, method: Method, url: &str) {
        self.route(method, url, Reply::Unreachable);
    }

    /// Leave `method url` pending forever.
    pub fn hold(&self, method: Method, url: &str) {
        self.route(method, url, Reply::Hold);
    }

    fn route(&self, method: Method, url: &str, reply: Reply) {
        self.routes
            .lock()
            .expect("mock routes lock poisoned")
            .insert((method, url.to_string()), reply);
    }

    /// Every request sent so far, in order.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests
            .lock()
            .expect("mock requests lock poisoned")
            .clone()
    }

    pub fn count(&self, method: Method, url: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.method == method && r.url == url)
            .count()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> ApiResult<HttpResponse> {
        let reply = self
            .routes
            .lock()
            .expect("mock routes lock poisoned")
            .get(&(request.method, request.url.clone()))
            .cloned();
        self.requests
            .lock()
            .expect("mock requests lock poisoned")
            .push(request);

        match reply {
            Some(Reply::Respond(response)) => Ok(response),
            Some(Reply::Unreachable) => Err(ApiError::transport(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "connection refused",
            ))),
            Some(Reply::Hold) => std::future::pending().await,
            None => Ok(HttpResponse {
                status: 404,
                body: Value::Null,
            }),
        }
    }
}
