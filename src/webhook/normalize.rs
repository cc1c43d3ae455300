//! Wire-shape detection and event extraction.

use std::io::Read;

use serde::de::{DeserializeOwned, Error as _};
use serde_json::{Map, Value};

use super::{EventHandler, WebhookError};

/// Envelope key used by integrations that wrap the event in a string field.
pub const DEFAULT_ENVELOPE_KEY: &str = "body";

/// The layout a webhook body arrived in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireShape {
    /// A JSON object whose envelope key holds the event as a JSON string.
    Enveloped,
    /// The body is the event object itself.
    Direct,
    /// An array of arrays of JSON-encoded events.
    Batched,
}

/// Detects the wire shape of a webhook body and extracts its events.
#[derive(Debug, Clone)]
pub struct Normalizer {
    envelope_key: String,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Normalizer {
    /// Creates a normalizer using [`DEFAULT_ENVELOPE_KEY`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            envelope_key: DEFAULT_ENVELOPE_KEY.to_string(),
        }
    }

    /// Sets the object key checked for the enveloped shape.
    #[must_use]
    pub fn with_envelope_key(mut self, key: impl Into<String>) -> Self {
        self.envelope_key = key.into();
        self
    }

    /// Returns the envelope key.
    #[must_use]
    pub fn envelope_key(&self) -> &str {
        &self.envelope_key
    }

    /// Classifies `body` and returns its events.
    ///
    /// Shapes are tried in order (enveloped, direct, batched) and the first
    /// that parses wins. An enveloped string that is not an event falls
    /// through to the direct shape. For the batched shape only the outer
    /// structure is checked here; each inner string is parsed when the
    /// iterator reaches it.
    ///
    /// # Errors
    ///
    /// Returns [`WebhookError::Deserialization`] if the body is not JSON,
    /// or is an object that parses neither as an envelope nor as an event,
    /// or is neither an object nor an array of arrays of strings.
    pub fn normalize<E: DeserializeOwned>(&self, body: &[u8]) -> Result<Events<E>, WebhookError> {
        let value: Value =
            serde_json::from_slice(body).map_err(|e| WebhookError::deserialization(e, body))?;

        let events = match value {
            Value::Object(map) => self.normalize_object(map, body)?,
            Value::Array(outer) => normalize_batched(outer, body)?,
            _ => {
                return Err(WebhookError::deserialization(
                    serde_json::Error::custom(
                        "expected a JSON object or an array of arrays of JSON strings",
                    ),
                    body,
                ));
            }
        };

        tracing::debug!(shape = ?events.shape(), "Webhook body normalized");
        Ok(events)
    }

    fn normalize_object<E: DeserializeOwned>(
        &self,
        map: Map<String, Value>,
        body: &[u8],
    ) -> Result<Events<E>, WebhookError> {
        if let Some(Value::String(inner)) = map.get(&self.envelope_key) {
            match serde_json::from_str::<E>(inner) {
                Ok(event) => return Ok(Events::single(WireShape::Enveloped, event)),
                Err(e) => tracing::debug!(
                    key = %self.envelope_key,
                    error = %e,
                    "Envelope does not hold an event, trying direct shape"
                ),
            }
        }

        serde_json::from_value::<E>(Value::Object(map))
            .map(|event| Events::single(WireShape::Direct, event))
            .map_err(|e| WebhookError::deserialization(e, body))
    }

    /// Normalizes `body` and hands each event to `handler` in order.
    ///
    /// Returns the number of events handled.
    ///
    /// # Errors
    ///
    /// - [`WebhookError::Deserialization`] if no shape matches, or an
    ///   embedded batched event is malformed (events before it were handled).
    /// - [`WebhookError::Callback`] with the handler's own error; the
    ///   remaining events are not dispatched.
    pub async fn for_each_event<E, H>(
        &self,
        body: &[u8],
        handler: &H,
    ) -> Result<usize, WebhookError>
    where
        E: DeserializeOwned + Send,
        H: EventHandler<E>,
    {
        let events = self.normalize::<E>(body)?;
        let shape = events.shape();
        let mut handled = 0;

        for event in events {
            let event = event?;
            if let Err(e) = handler.handle(event).await {
                tracing::warn!(?shape, handled, error = %e, "Webhook handler failed");
                return Err(WebhookError::Callback(e));
            }
            handled += 1;
        }

        tracing::debug!(?shape, handled, "Webhook events dispatched");
        Ok(handled)
    }

    /// Reads `reader` to the end, releases it, then dispatches as
    /// [`Normalizer::for_each_event`] does.
    ///
    /// # Errors
    ///
    /// [`WebhookError::Read`] if the stream fails, otherwise as
    /// [`Normalizer::for_each_event`].
    pub async fn consume<R, E, H>(&self, reader: R, handler: &H) -> Result<usize, WebhookError>
    where
        R: Read,
        E: DeserializeOwned + Send,
        H: EventHandler<E>,
    {
        let body = read_to_end(reader)?;
        self.for_each_event(&body, handler).await
    }
}

/// Takes the reader by value so it is dropped before any parsing happens,
/// whatever the outcome of the read.
fn read_to_end<R: Read>(mut reader: R) -> Result<Vec<u8>, WebhookError> {
    let mut body = Vec::new();
    reader.read_to_end(&mut body)?;
    Ok(body)
}

fn normalize_batched<E>(outer: Vec<Value>, body: &[u8]) -> Result<Events<E>, WebhookError> {
    let mut encoded = Vec::new();

    for batch in outer {
        let Value::Array(batch) = batch else {
            return Err(shape_mismatch("expected every batch to be an array", body));
        };
        for item in batch {
            let Value::String(item) = item else {
                return Err(shape_mismatch(
                    "expected every batched event to be a JSON string",
                    body,
                ));
            };
            encoded.push(item);
        }
    }

    Ok(Events {
        shape: WireShape::Batched,
        pending: Pending::Encoded(encoded.into_iter()),
    })
}

fn shape_mismatch(reason: &'static str, body: &[u8]) -> WebhookError {
    WebhookError::deserialization(serde_json::Error::custom(reason), body)
}

/// Events extracted from one webhook body.
///
/// A consuming iterator: it yields each event once, in wire order, and
/// cannot be restarted.
#[derive(Debug)]
pub struct Events<E> {
    shape: WireShape,
    pending: Pending<E>,
}

#[derive(Debug)]
enum Pending<E> {
    Parsed(Option<E>),
    Encoded(std::vec::IntoIter<String>),
}

impl<E> Events<E> {
    const fn single(shape: WireShape, event: E) -> Self {
        Self {
            shape,
            pending: Pending::Parsed(Some(event)),
        }
    }

    /// Returns the detected wire shape.
    #[must_use]
    pub const fn shape(&self) -> WireShape {
        self.shape
    }
}

impl<E: DeserializeOwned> Iterator for Events<E> {
    type Item = Result<E, WebhookError>;

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.pending {
            Pending::Parsed(event) => event.take().map(Ok),
            Pending::Encoded(encoded) => encoded.next().map(|raw| {
                serde_json::from_str(&raw)
                    .map_err(|e| WebhookError::deserialization(e, raw.as_bytes()))
            }),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.pending {
            Pending::Parsed(event) => {
                let n = usize::from(event.is_some());
                (n, Some(n))
            }
            Pending::Encoded(encoded) => encoded.size_hint(),
        }
    }
}

/// Normalizes `body` with the default envelope key.
///
/// # Errors
///
/// See [`Normalizer::normalize`].
pub fn normalize<E: DeserializeOwned>(body: &[u8]) -> Result<Events<E>, WebhookError> {
    Normalizer::new().normalize(body)
}

/// Dispatches every event in `body` to `handler` with the default envelope key.
///
/// # Errors
///
/// See [`Normalizer::for_each_event`].
pub async fn for_each_event<E, H>(body: &[u8], handler: &H) -> Result<usize, WebhookError>
where
    E: DeserializeOwned + Send,
    H: EventHandler<E>,
{
    Normalizer::new().for_each_event(body, handler).await
}

/// Reads `reader` fully and dispatches its events with the default envelope key.
///
/// # Errors
///
/// See [`Normalizer::consume`].
pub async fn consume<R, E, H>(reader: R, handler: &H) -> Result<usize, WebhookError>
where
    R: Read,
    E: DeserializeOwned + Send,
    H: EventHandler<E>,
{
    Normalizer::new().consume(reader, handler).await
}
