//! Tests for `ReqwestClient`.

use super::{HttpClient, HttpRequest, ReqwestClient, TransportError};

mod reqwest_client {
    use super::*;

    #[test]
    fn from_client_accepts_custom_client() {
        let custom = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .unwrap();
        let client = ReqwestClient::from_client(custom);

        assert!(format!("{client:?}").contains("ReqwestClient"));
    }

    #[test]
    fn client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ReqwestClient>();
    }

    #[tokio::test]
    async fn request_to_unbound_port_returns_connection_error() {
        // Bind then drop to get a local port nobody listens on.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = ReqwestClient::from_client(
            reqwest::Client::builder().no_proxy().build().unwrap(),
        );
        let url = url::Url::parse(&format!("http://{addr}/projects")).unwrap();

        let result = client.request(HttpRequest::new(http::Method::GET, url)).await;

        assert!(matches!(result, Err(TransportError::Connection(_))));
    }

    #[tokio::test]
    async fn request_round_trips_against_local_server() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = axum::Router::new().route(
            "/echo",
            axum::routing::post(|body: String| async move { (http::StatusCode::CREATED, body) }),
        );
        tokio::spawn(async move { axum::serve(listener, app).await });

        let client = ReqwestClient::from_client(
            reqwest::Client::builder().no_proxy().build().unwrap(),
        );
        let url = url::Url::parse(&format!("http://{addr}/echo")).unwrap();
        let req = HttpRequest::new(http::Method::POST, url).with_body(b"ping".to_vec());

        let resp = client.request(req).await.unwrap();

        assert_eq!(resp.status, http::StatusCode::CREATED);
        assert_eq!(resp.body_lossy(), "ping");
    }
}
