//! Test support utilities shared across unit and integration tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde_json::json;

use crate::transport::{
    HttpRequest, HttpResponse, HttpTransport, Method, TransportError, TransportFuture,
};

/// Scripted HTTP transport that returns pre-seeded responses in FIFO order.
///
/// Every request is recorded so tests can assert on URLs, credentials and
/// call counts without a network.
#[derive(Clone, Debug, Default)]
pub struct ScriptedTransport {
    responses: Arc<Mutex<VecDeque<Result<HttpResponse, TransportError>>>>,
    requests: Arc<Mutex<Vec<HttpRequest>>>,
}

fn locked<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl ScriptedTransport {
    /// Creates a transport with no queued responses.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a response with the given status and body.
    pub fn push_response(&self, status: u16, body: impl Into<String>) {
        self.push(HttpResponse::new(status, body));
    }

    /// Queues a fully built response.
    pub fn push(&self, response: HttpResponse) {
        locked(&self.responses).push_back(Ok(response));
    }

    /// Queues a transport failure for the next request.
    pub fn push_unreachable(&self) {
        locked(&self.responses).push_back(Err(TransportError::Request {
            url: String::from("scripted"),
            message: String::from("simulated connection refused"),
        }));
    }

    /// Returns a snapshot of all requests recorded so far.
    #[must_use]
    pub fn requests(&self) -> Vec<HttpRequest> {
        locked(&self.requests).clone()
    }

    /// Returns the URLs of recorded requests in order.
    #[must_use]
    pub fn urls(&self) -> Vec<String> {
        locked(&self.requests)
            .iter()
            .map(|request| request.url.clone())
            .collect()
    }

    /// Counts recorded `GET` requests whose URL ends with `suffix`.
    #[must_use]
    pub fn count_gets_ending_with(&self, suffix: &str) -> usize {
        locked(&self.requests)
            .iter()
            .filter(|request| request.method == Method::Get && request.url.ends_with(suffix))
            .count()
    }

    /// Returns the number of responses still queued.
    #[must_use]
    pub fn pending(&self) -> usize {
        locked(&self.responses).len()
    }
}

impl HttpTransport for ScriptedTransport {
    fn send(&self, request: HttpRequest) -> TransportFuture<'_> {
        let url = request.url.clone();
        locked(&self.requests).push(request);
        let next = locked(&self.responses).pop_front();
        Box::pin(async move {
            next.unwrap_or_else(|| {
                Err(TransportError::Request {
                    url,
                    message: String::from("no scripted response available"),
                })
            })
        })
    }
}

/// Produces a Keystone v3 token response exposing one block-storage endpoint.
#[must_use]
pub fn keystone_token_response(token: &str, volume_endpoint: &str) -> HttpResponse {
    let body = json!({
        "token": {
            "catalog": [
                {
                    "type": "identity",
                    "name": "keystone",
                    "endpoints": [
                        {"interface": "public", "region": "RegionOne", "url": "https://keystone.example:5000/v3"}
                    ]
                },
                {
                    "type": "volumev3",
                    "name": "cinderv3",
                    "endpoints": [
                        {"interface": "internal", "region": "RegionOne", "url": "http://10.0.0.5:8776/v3/internal"},
                        {"interface": "public", "region": "RegionOne", "url": volume_endpoint}
                    ]
                }
            ]
        }
    });
    HttpResponse::new(201, body.to_string()).with_header("X-Subject-Token", token)
}

/// Produces a Cinder `volumes/detail` payload; `true` marks an attached volume.
#[must_use]
pub fn json_cinder_volumes(volumes: &[(&str, bool)]) -> String {
    let items = volumes
        .iter()
        .map(|(id, attached)| {
            let attachments = if *attached {
                json!([{"server_id": "srv-1", "attachment_id": "att-1", "device": "/dev/vdb"}])
            } else {
                json!([])
            };
            json!({"id": id, "status": "available", "attachments": attachments})
        })
        .collect::<Vec<_>>();
    json!({ "volumes": items }).to_string()
}

/// Renders a ScaleIO volume ID the way the gateway returns it (a JSON string).
#[must_use]
pub fn json_scaleio_id(id: &str) -> String {
    json!(id).to_string()
}
