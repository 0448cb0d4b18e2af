//! Request observation hook.

/// An outgoing request as seen by a [`RequestObserver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutgoingRequest<'a> {
    /// HTTP method.
    pub method: &'a str,
    /// Fully-qualified request URI.
    pub uri: &'a str,
    /// Content type of the body, if any.
    pub content_type: Option<&'a str>,
    /// Encoded body, if any.
    pub body: Option<&'a str>,
}

/// Callback invoked before every request a [`Client`](crate::Client) sends.
///
/// Independent of the `tracing` events the client emits; use it to capture
/// payloads programmatically.
pub trait RequestObserver: Send + Sync {
    /// Called once per outgoing request, before it is sent.
    fn on_request(&self, request: &OutgoingRequest<'_>);
}

impl<F> RequestObserver for F
where
    F: Fn(&OutgoingRequest<'_>) + Send + Sync,
{
    fn on_request(&self, request: &OutgoingRequest<'_>) {
        self(request)
    }
}
