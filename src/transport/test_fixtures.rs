//! Shared test fixtures for anything that talks through an [`HttpClient`].

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{HttpClient, HttpRequest, HttpResponse, TransportError};

/// Mock transport that replays a scripted sequence of outcomes.
///
/// Every request is counted and captured. Running past the end of the
/// script yields a connection error so a test fails loudly instead of
/// hanging.
#[derive(Debug, Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
    requests: Mutex<Vec<HttpRequest>>,
    call_count: AtomicUsize,
}

impl MockTransport {
    pub fn new(responses: Vec<Result<HttpResponse, TransportError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
            call_count: AtomicUsize::new(0),
        }
    }

    /// A transport answering each request with the next `(status, body)` pair.
    pub fn with_json(replies: &[(u16, &str)]) -> Self {
        Self::new(
            replies
                .iter()
                .map(|(status, body)| Ok(json_response(*status, body)))
                .collect(),
        )
    }

    pub fn failing(error: TransportError) -> Self {
        Self::new(vec![Err(error)])
    }

    pub fn calls(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    pub fn captured_requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl HttpClient for MockTransport {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(req);
        self.responses.lock().unwrap().pop_front().unwrap_or_else(|| {
            Err(TransportError::Connection(Box::new(std::io::Error::other(
                "mock transport script exhausted",
            ))))
        })
    }
}

pub fn json_response(status: u16, body: &str) -> HttpResponse {
    HttpResponse::new(
        http::StatusCode::from_u16(status).unwrap(),
        http::HeaderMap::new(),
        body.as_bytes().to_vec(),
    )
}
