//! Tests for the transport seam and its request/response values.

use super::{HttpClient, HttpRequest, HttpResponse, TransportError};

fn api_url() -> url::Url {
    url::Url::parse("https://tasks.example.com/api/v1/tasks").unwrap()
}

mod http_request {
    use super::*;

    #[test]
    fn new_creates_request_without_headers_or_body() {
        let req = HttpRequest::new(http::Method::PATCH, api_url());

        assert_eq!(req.method, http::Method::PATCH);
        assert_eq!(req.url, api_url());
        assert!(req.headers.is_empty());
        assert!(req.body.is_none());
    }

    #[test]
    fn with_body_sets_body() {
        let body = br#"{"title":"write docs"}"#.to_vec();
        let req = HttpRequest::new(http::Method::POST, api_url()).with_body(body.clone());

        assert_eq!(req.body, Some(body));
    }

    #[test]
    fn with_header_replaces_earlier_value() {
        let req = HttpRequest::new(http::Method::GET, api_url())
            .with_header(
                http::header::AUTHORIZATION,
                http::HeaderValue::from_static("Bearer old"),
            )
            .with_header(
                http::header::AUTHORIZATION,
                http::HeaderValue::from_static("Bearer new"),
            );

        let values: Vec<_> = req
            .headers
            .get_all(http::header::AUTHORIZATION)
            .iter()
            .collect();
        assert_eq!(values, ["Bearer new"]);
    }
}

mod http_response {
    use super::*;

    #[test]
    fn is_success_covers_whole_2xx_range() {
        for code in [200, 201, 204, 299] {
            let status = http::StatusCode::from_u16(code).unwrap();
            let resp = HttpResponse::new(status, http::HeaderMap::new(), vec![]);
            assert!(resp.is_success(), "Expected {code} to be success");
        }
    }

    #[test]
    fn is_success_rejects_everything_else() {
        for code in [100, 301, 304, 400, 404, 429, 500, 503] {
            let status = http::StatusCode::from_u16(code).unwrap();
            let resp = HttpResponse::new(status, http::HeaderMap::new(), vec![]);
            assert!(!resp.is_success(), "Expected {code} to not be success");
        }
    }

    #[test]
    fn body_lossy_replaces_invalid_utf8() {
        let resp = HttpResponse::new(
            http::StatusCode::OK,
            http::HeaderMap::new(),
            vec![b'o', b'k', 0xFF],
        );

        assert_eq!(resp.body_lossy(), "ok\u{FFFD}");
    }
}

mod transport_error {
    use super::*;
    use std::error::Error;

    #[test]
    fn connection_error_preserves_source() {
        let error = TransportError::Connection(Box::new(std::io::Error::other("refused")));

        assert!(error.to_string().contains("Task server unreachable"));
        assert!(error.source().unwrap().to_string().contains("refused"));
    }

    #[test]
    fn timeout_has_no_source() {
        let error = TransportError::Timeout;

        assert_eq!(error.to_string(), "Task server did not answer in time");
        assert!(error.source().is_none());
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TransportError>();
    }
}

mod shared_transport {
    use super::*;
    use crate::transport::test_fixtures::{MockTransport, json_response};
    use std::sync::Arc;

    #[tokio::test]
    async fn arc_delegates_to_inner_transport() {
        let inner = Arc::new(MockTransport::new(vec![
            Ok(json_response(200, "[]")),
            Ok(json_response(201, "{}")),
        ]));
        let first = Arc::clone(&inner);
        let second = Arc::clone(&inner);

        first
            .request(HttpRequest::new(http::Method::GET, api_url()))
            .await
            .unwrap();
        let resp = second
            .request(HttpRequest::new(http::Method::POST, api_url()))
            .await
            .unwrap();

        assert_eq!(resp.status, http::StatusCode::CREATED);
        assert_eq!(inner.calls(), 2);
    }

    #[tokio::test]
    async fn failing_transport_surfaces_error() {
        let transport = MockTransport::failing(TransportError::Timeout);

        let result = transport
            .request(HttpRequest::new(http::Method::GET, api_url()))
            .await;

        assert!(matches!(result, Err(TransportError::Timeout)));
    }
}
