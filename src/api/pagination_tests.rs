//! Tests for page-numbered fetching.

use serde::Deserialize;

use super::{ApiClient, ApiError, Paginator, fetch_all_pages, page_endpoint};
use crate::transport::test_fixtures::MockTransport;

#[derive(Debug, PartialEq, Deserialize)]
struct Item {
    id: u32,
}

fn client(replies: &[(u16, &str)]) -> ApiClient<MockTransport> {
    ApiClient::new(
        "https://tasks.example.com/api/v1",
        "abc",
        MockTransport::with_json(replies),
    )
    .unwrap()
}

fn requested_paths(client: &ApiClient<MockTransport>) -> Vec<String> {
    client
        .transport()
        .captured_requests()
        .iter()
        .map(|r| {
            let url = &r.url;
            match url.query() {
                Some(q) => format!("{}?{q}", url.path()),
                None => url.path().to_string(),
            }
        })
        .collect()
}

mod page_endpoint {
    use super::*;

    #[test]
    fn appends_query_to_bare_endpoint() {
        assert_eq!(page_endpoint("/items", 1), "/items?page=1");
    }

    #[test]
    fn extends_existing_query() {
        assert_eq!(
            page_endpoint("/tasks/all?filter=done", 3),
            "/tasks/all?filter=done&page=3"
        );
    }
}

mod fetch_all_pages {
    use super::*;

    #[tokio::test]
    async fn concatenates_pages_until_empty() {
        let client = client(&[(200, r#"[{"id":1},{"id":2}]"#), (200, "[]")]);

        let items: Vec<Item> = fetch_all_pages(&client, "/items").await.unwrap();

        assert_eq!(items, vec![Item { id: 1 }, Item { id: 2 }]);
        assert_eq!(
            requested_paths(&client),
            vec!["/api/v1/items?page=1", "/api/v1/items?page=2"]
        );
    }

    #[tokio::test]
    async fn preserves_order_across_pages() {
        let client = client(&[
            (200, r#"[{"id":3},{"id":1}]"#),
            (200, r#"[{"id":2}]"#),
            (200, r#"[{"id":9},{"id":4}]"#),
            (200, "[]"),
        ]);

        let items: Vec<Item> = fetch_all_pages(&client, "/items").await.unwrap();

        let ids: Vec<u32> = items.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![3, 1, 2, 9, 4]);
        assert_eq!(client.transport().calls(), 4);
    }

    #[tokio::test]
    async fn empty_first_page_returns_nothing() {
        let client = client(&[(200, "[]")]);

        let items: Vec<Item> = fetch_all_pages(&client, "/items").await.unwrap();

        assert!(items.is_empty());
        assert_eq!(client.transport().calls(), 1);
    }

    #[tokio::test]
    async fn duplicates_across_pages_are_kept() {
        let client = client(&[(200, r#"[{"id":1}]"#), (200, r#"[{"id":1}]"#), (200, "[]")]);

        let items: Vec<Item> = fetch_all_pages(&client, "/items").await.unwrap();

        assert_eq!(items, vec![Item { id: 1 }, Item { id: 1 }]);
    }

    #[tokio::test]
    async fn error_on_later_page_is_returned() {
        let client = client(&[(200, r#"[{"id":1}]"#), (500, "boom")]);

        let err = fetch_all_pages::<_, Item>(&client, "/items")
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(http::StatusCode::INTERNAL_SERVER_ERROR));
        assert_eq!(client.transport().calls(), 2);
    }
}

mod paginator {
    use super::*;

    #[tokio::test]
    async fn page_limit_stops_before_next_request() {
        let client = client(&[(200, r#"[{"id":1}]"#), (200, r#"[{"id":2}]"#)]);
        let paginator = Paginator::new(&client, "/items").with_max_pages(2);

        let err = paginator.fetch_all::<Item>().await.unwrap_err();

        assert!(matches!(err, ApiError::PageLimit { max_pages: 2 }));
        assert_eq!(client.transport().calls(), 2);
    }

    #[tokio::test]
    async fn page_limit_allows_terminating_sequence() {
        let client = client(&[(200, r#"[{"id":1}]"#), (200, "[]")]);
        let paginator = Paginator::new(&client, "/items").with_max_pages(2);

        let items = paginator.fetch_all::<Item>().await.unwrap();

        assert_eq!(items, vec![Item { id: 1 }]);
    }

    #[test]
    fn defaults_to_unbounded() {
        let client = client(&[]);

        assert_eq!(Paginator::new(&client, "/items").max_pages(), None);
    }
}
