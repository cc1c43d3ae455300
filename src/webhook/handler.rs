//! Caller-supplied event handling.

use std::future::Future;

use super::BoxError;

/// Receives normalized events, one call per event.
///
/// Returning an error stops dispatch of the remaining events in the same
/// webhook body; the error reaches the caller unchanged.
///
/// Any `Fn(E) -> impl Future<Output = Result<(), Err>>` closure is a
/// handler, so most code never implements this trait by hand:
///
/// ```
/// use taskhook::webhook::{WebhookEvent, for_each_event};
///
/// # async fn example() -> Result<(), taskhook::webhook::WebhookError> {
/// let body = br#"{"event_name":"task.created","time":"2024-01-01T00:00:00Z","data":{}}"#;
/// let count = for_each_event(body, &|event: WebhookEvent| async move {
///     println!("{}", event.event_name);
///     Ok::<(), std::io::Error>(())
/// })
/// .await?;
/// assert_eq!(count, 1);
/// # Ok(())
/// # }
/// ```
pub trait EventHandler<E>: Send + Sync {
    /// Handles one event.
    ///
    /// # Errors
    ///
    /// Any error; it is surfaced as [`super::WebhookError::Callback`].
    fn handle(&self, event: E) -> impl Future<Output = Result<(), BoxError>> + Send;
}

impl<E, F, Fut, Err> EventHandler<E> for F
where
    F: Fn(E) -> Fut + Send + Sync,
    Fut: Future<Output = Result<(), Err>> + Send,
    Err: Into<BoxError>,
{
    fn handle(&self, event: E) -> impl Future<Output = Result<(), BoxError>> + Send {
        let pending = self(event);
        async move { pending.await.map_err(Into::into) }
    }
}
