//! Backend Traits
//!
//! The tarot API as the pipeline sees it: a request description, an explicit
//! cancellation token, and a transport that turns the two into a JSON body.
//!
//! # Design Philosophy
//!
//! The [`ApiTransport`] trait keeps the coordinator independent of HTTP. The
//! production implementation is [`HttpBackend`](super::HttpBackend); tests
//! script responses and arrival order with in-memory transports.

use std::fmt;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::watch;

use crate::error::TransportError;
use crate::model::SpreadKind;

/// HTTP method of an API call
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    /// Read-only call
    Get,
    /// Call with a JSON body
    Post,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => f.write_str("GET"),
            Self::Post => f.write_str("POST"),
        }
    }
}

/// One call to the tarot API
///
/// Paths are kept as segments below `/api` so identifiers are encoded as a
/// single path segment no matter what they contain.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    /// HTTP method
    pub method: Method,
    /// Path segments below `/api`
    pub segments: Vec<String>,
    /// Query-string pairs
    pub query: Vec<(String, String)>,
    /// JSON body for POST calls
    pub body: Option<Value>,
}

impl ApiRequest {
    fn get<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            method: Method::Get,
            segments: segments.into_iter().map(Into::into).collect(),
            query: Vec::new(),
            body: None,
        }
    }

    /// `GET /api/status`
    #[must_use]
    pub fn status() -> Self {
        Self::get(["status"])
    }

    /// `GET /api/tarot/daily` or `GET /api/tarot/spread/{kind}`
    #[must_use]
    pub fn spread(kind: SpreadKind) -> Self {
        match kind {
            SpreadKind::Daily => Self::get(["tarot", "daily"]),
            other => Self::get(["tarot", "spread", other.as_str()]),
        }
    }

    /// `POST /api/tarot/interpret` with `{"question": ...}`
    #[must_use]
    pub fn interpret(question: &str) -> Self {
        Self {
            method: Method::Post,
            segments: vec!["tarot".to_string(), "interpret".to_string()],
            query: Vec::new(),
            body: Some(serde_json::json!({ "question": question })),
        }
    }

    /// `GET /api/tarot/search?q=...`
    #[must_use]
    pub fn search(query: &str) -> Self {
        let mut request = Self::get(["tarot", "search"]);
        request.query.push(("q".to_string(), query.to_string()));
        request
    }

    /// `GET /api/tarot/card/{id}`
    #[must_use]
    pub fn card(id: &str) -> Self {
        Self::get(["tarot", "card", id])
    }

    /// Unencoded path for logs, e.g. `/api/tarot/card/ar01`
    #[must_use]
    pub fn path(&self) -> String {
        let mut path = String::from("/api");
        for segment in &self.segments {
            path.push('/');
            path.push_str(segment);
        }
        path
    }
}

impl fmt::Display for ApiRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path())?;
        for (i, (key, value)) in self.query.iter().enumerate() {
            let sep = if i == 0 { '?' } else { '&' };
            write!(f, "{sep}{key}={value}")?;
        }
        Ok(())
    }
}

// ============================================================================
// Cancellation
// ============================================================================

/// Fires the paired [`CancelToken`]
#[derive(Debug)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

impl CancelHandle {
    /// Signal cancellation; idempotent
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }
}

/// Cancellation signal handed to a transport call
///
/// Dropping the [`CancelHandle`] without calling `cancel` means the call is
/// never cancelled.
#[derive(Clone, Debug)]
pub struct CancelToken {
    rx: watch::Receiver<bool>,
}

impl CancelToken {
    /// Create a connected handle/token pair
    #[must_use]
    pub fn pair() -> (CancelHandle, Self) {
        let (tx, rx) = watch::channel(false);
        (CancelHandle { tx }, Self { rx })
    }

    /// A token that can never fire
    #[must_use]
    pub fn never() -> Self {
        Self::pair().1
    }

    /// Whether cancellation has been signalled
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolve once cancellation is signalled; pends forever otherwise
    pub async fn cancelled(&self) {
        let mut rx = self.rx.clone();
        let fired = rx.wait_for(|cancelled| *cancelled).await.map(|_| ());
        if fired.is_err() {
            // handle dropped without cancelling
            std::future::pending::<()>().await;
        }
    }
}

// ============================================================================
// Transport
// ============================================================================

/// Transport to the tarot API
///
/// Implementations must stop work and return [`TransportError::Cancelled`]
/// promptly once `cancel` fires. Any non-2xx answer is an error.
#[async_trait]
pub trait ApiTransport: Send + Sync {
    /// Transport name for logs (e.g. "HTTP")
    fn name(&self) -> &str;

    /// Perform one call and return the decoded JSON body
    async fn fetch(&self, request: &ApiRequest, cancel: &CancelToken)
        -> Result<Value, TransportError>;

    /// Check whether the backend answers `/api/status`
    async fn health_check(&self) -> bool {
        self.fetch(&ApiRequest::status(), &CancelToken::never())
            .await
            .is_ok()
    }
}

#[async_trait]
impl<T: ApiTransport + ?Sized> ApiTransport for std::sync::Arc<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn fetch(
        &self,
        request: &ApiRequest,
        cancel: &CancelToken,
    ) -> Result<Value, TransportError> {
        (**self).fetch(request, cancel).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_request_paths() {
        assert_eq!(ApiRequest::status().path(), "/api/status");
        assert_eq!(ApiRequest::spread(SpreadKind::Daily).path(), "/api/tarot/daily");
        assert_eq!(
            ApiRequest::spread(SpreadKind::Celtic).path(),
            "/api/tarot/spread/celtic"
        );
        assert_eq!(ApiRequest::card("ar01").path(), "/api/tarot/card/ar01");
        assert_eq!(
            ApiRequest::search("amor").to_string(),
            "GET /api/tarot/search?q=amor"
        );
    }

    #[test]
    fn test_interpret_body() {
        let request = ApiRequest::interpret("Vou mudar de emprego?");
        assert_eq!(request.method, Method::Post);
        assert_eq!(
            request.body,
            Some(serde_json::json!({"question": "Vou mudar de emprego?"}))
        );
    }

    #[tokio::test]
    async fn test_cancel_token_fires() {
        let (handle, token) = CancelToken::pair();
        assert!(!token.is_cancelled());

        let waiter = tokio::spawn({
            let token = token.clone();
            async move { token.cancelled().await }
        });
        handle.cancel();

        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("cancelled() should resolve")
            .unwrap();
        assert!(token.is_cancelled());
    }

    #[tokio::test]
    async fn test_dropped_handle_never_cancels() {
        let token = CancelToken::never();
        let result = tokio::time::timeout(Duration::from_millis(50), token.cancelled()).await;
        assert!(result.is_err(), "never() token must not resolve");
        assert!(!token.is_cancelled());
    }
}
