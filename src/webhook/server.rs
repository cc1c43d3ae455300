//! HTTP endpoint receiving webhook callbacks.

use std::any::Any;
use std::marker::PhantomData;
use std::sync::Arc;

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::post;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

use super::{EventHandler, Normalizer};

struct IngestState<E, H> {
    normalizer: Normalizer,
    handler: H,
    // fn() -> E keeps the state Send + Sync whatever E is.
    _event: PhantomData<fn() -> E>,
}

/// Builds a router that accepts webhook callbacks on `path`.
///
/// Only `POST` is routed; any other method gets `405 Method Not Allowed`.
/// Responses:
/// - `200 {"status":"ok","events":<n>}` once every event was handled
/// - `400 {"status":"error","error":"<message>"}` for a malformed body or
///   a handler error
/// - `500` with the same envelope when the handler failed with a developer
///   error (see [`super::WebhookError::http_status`])
///
/// # Panics
///
/// If `path` does not start with `/` (axum rejects the route).
pub fn webhook_router<E, H>(path: &str, normalizer: Normalizer, handler: H) -> Router
where
    E: DeserializeOwned + Send + 'static,
    H: EventHandler<E> + 'static,
{
    let state = Arc::new(IngestState {
        normalizer,
        handler,
        _event: PhantomData,
    });

    Router::new()
        .route(path, post(ingest::<E, H>))
        .with_state(state)
}

async fn ingest<E, H>(
    State(state): State<Arc<IngestState<E, H>>>,
    body: Bytes,
) -> (StatusCode, Json<Value>)
where
    E: DeserializeOwned + Send + 'static,
    H: EventHandler<E> + 'static,
{
    match state
        .normalizer
        .for_each_event::<E, H>(&body, &state.handler)
        .await
    {
        Ok(events) => {
            tracing::info!(events, "Webhook processed");
            (StatusCode::OK, Json(json!({ "status": "ok", "events": events })))
        }
        Err(error) => {
            let status = error.http_status();
            if status.is_server_error() {
                tracing::error!(%error, "Webhook processing failed");
            } else {
                tracing::warn!(%error, "Webhook rejected");
            }
            (
                status,
                Json(json!({ "status": "error", "error": error.to_string() })),
            )
        }
    }
}

/// Serves `router` on `listener` until Ctrl+C or SIGTERM.
///
/// Every request is traced at INFO. A handler that panics produces
/// `500 {"status":"error","error":"<message>"}` instead of a dropped
/// connection. In-flight requests finish before the function returns.
///
/// # Errors
///
/// Returns the I/O error that stopped the server.
pub async fn serve(listener: TcpListener, router: Router) -> std::io::Result<()> {
    let app = router
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        );

    tracing::info!(addr = ?listener.local_addr().ok(), "Webhook server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!(panic = message, "Webhook handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "status": "error",
            "error": format!("handler panicked: {message}"),
        })),
    )
        .into_response()
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received Ctrl+C, shutting down gracefully"),
        () = terminate => tracing::info!("Received SIGTERM, shutting down gracefully"),
    }
}
