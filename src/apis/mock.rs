/// In-memory transport for tests
///
/// Routes match on a URL substring and are tried in insertion order, so
/// register specific routes before general ones. Unrouted URLs fail like a
/// refused connection.
use crate::apis::client::{HttpTransport, TransportResponse};
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::time::Duration;
use url::Url;

#[derive(Debug, Clone)]
pub enum MockReply {
    Body(u16, String),
    Fail(String),
    Delayed(Duration, Box<MockReply>),
}

/// Successful envelope around `data`
pub fn ok(data: Value) -> MockReply {
    MockReply::Body(200, json!({"success": true, "data": data}).to_string())
}

#[derive(Default)]
pub struct MockTransport {
    routes: Vec<(String, MockReply)>,
    requested: Mutex<Vec<String>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(mut self, pattern: &str, reply: MockReply) -> Self {
        self.routes.push((pattern.to_string(), reply));
        self
    }

    pub fn calls(&self) -> usize {
        self.requested.lock().len()
    }

    pub fn calls_matching(&self, pattern: &str) -> usize {
        self.requested
            .lock()
            .iter()
            .filter(|url| url.contains(pattern))
            .count()
    }

    pub fn requested_urls(&self) -> Vec<String> {
        self.requested.lock().clone()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn get(&self, url: &Url) -> Result<TransportResponse, String> {
        let url = url.as_str().to_string();
        self.requested.lock().push(url.clone());

        let reply = self
            .routes
            .iter()
            .find(|(pattern, _)| url.contains(pattern.as_str()))
            .map(|(_, reply)| reply.clone());

        let mut reply = match reply {
            Some(reply) => reply,
            None => return Err(format!("Connection refused: {}", url)),
        };

        loop {
            match reply {
                MockReply::Body(status, body) => return Ok(TransportResponse { status, body }),
                MockReply::Fail(message) => return Err(message),
                MockReply::Delayed(delay, inner) => {
                    tokio::time::sleep(delay).await;
                    reply = *inner;
                }
            }
        }
    }
}
