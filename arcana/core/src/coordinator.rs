//! Request Coordinator
//!
//! Serializes API calls so that only the most recently issued one can affect
//! what the user sees.
//!
//! # Last Request Wins
//!
//! Issuing a call fires the cancel token of the call before it. The transport
//! abandons the superseded request, and even if its response still arrives the
//! coordinator reports it as [`Outcome::Cancelled`]: a call is only allowed to
//! settle as success or failure while its generation is the current one.
//!
//! # Loading Indicator
//!
//! Every call holds a [`LoadingGuard`] for as long as its future lives. The
//! indicator is on while any guard exists and is cleared by `Drop`, so it is
//! reset on success, failure, cancellation, and when the future is dropped.

use parking_lot::Mutex;
use serde_json::Value;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::backend::{ApiRequest, ApiTransport, CancelHandle, CancelToken};
use crate::error::TransportError;

// ============================================================================
// Outcome
// ============================================================================

/// How a coordinated call settled
#[derive(Debug)]
pub enum Outcome<T> {
    /// The call completed and is still the current one
    Success(T),
    /// A newer call superseded this one; nothing should be shown
    Cancelled,
    /// The call failed; the caller shows the error view
    Failed(FailureReason),
}

impl<T> Outcome<T> {
    /// Whether the call was superseded
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// The payload, if the call succeeded
    #[must_use]
    pub fn success(self) -> Option<T> {
        match self {
            Self::Success(value) => Some(value),
            _ => None,
        }
    }
}

/// Why a call failed, kept for logs
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FailureReason {
    /// The request that failed, e.g. `GET /api/tarot/card/ar01`
    pub request: String,
    /// HTTP status, when the backend answered
    pub status: Option<u16>,
    /// Error description
    pub message: String,
}

impl FailureReason {
    fn new(request: &ApiRequest, error: &TransportError) -> Self {
        let status = match error {
            TransportError::Status { status, .. } => Some(*status),
            _ => None,
        };
        Self {
            request: request.to_string(),
            status,
            message: error.to_string(),
        }
    }
}

impl std::fmt::Display for FailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.request, self.message)
    }
}

// ============================================================================
// Loading Indicator
// ============================================================================

#[derive(Debug)]
struct LoadingState {
    in_flight: Mutex<usize>,
    tx: watch::Sender<bool>,
}

impl LoadingState {
    fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self {
            in_flight: Mutex::new(0),
            tx,
        }
    }
}

/// Keeps the loading indicator on while alive
#[derive(Debug)]
pub struct LoadingGuard<'a> {
    state: &'a LoadingState,
}

impl<'a> LoadingGuard<'a> {
    fn enter(state: &'a LoadingState) -> Self {
        let mut in_flight = state.in_flight.lock();
        *in_flight += 1;
        if *in_flight == 1 {
            state.tx.send_replace(true);
        }
        Self { state }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        let mut in_flight = self.state.in_flight.lock();
        *in_flight = in_flight.saturating_sub(1);
        if *in_flight == 0 {
            self.state.tx.send_replace(false);
        }
    }
}

// ============================================================================
// Coordinator
// ============================================================================

#[derive(Debug, Default)]
struct Slot {
    /// Generation of the most recently issued call
    generation: u64,
    /// Cancel handle of that call while it is outstanding
    handle: Option<CancelHandle>,
}

/// Owns the single "current call" slot and the loading indicator
#[derive(Debug)]
pub struct RequestCoordinator<T> {
    transport: T,
    slot: Mutex<Slot>,
    loading: LoadingState,
}

impl<T: ApiTransport> RequestCoordinator<T> {
    /// Create a coordinator over a transport
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            slot: Mutex::new(Slot::default()),
            loading: LoadingState::new(),
        }
    }

    /// The underlying transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Whether any call is in flight
    pub fn is_loading(&self) -> bool {
        *self.loading.tx.borrow()
    }

    /// Subscribe to loading indicator changes
    pub fn subscribe_loading(&self) -> watch::Receiver<bool> {
        self.loading.tx.subscribe()
    }

    /// Issue a call, superseding any outstanding one
    pub async fn execute(&self, request: ApiRequest) -> Outcome<Value> {
        let (handle, token) = CancelToken::pair();
        let generation = {
            let mut slot = self.slot.lock();
            if let Some(previous) = slot.handle.take() {
                debug!(superseded = slot.generation, "Cancelling outstanding request");
                previous.cancel();
            }
            slot.generation += 1;
            slot.handle = Some(handle);
            slot.generation
        };

        let _loading = LoadingGuard::enter(&self.loading);
        info!(
            request = %request,
            generation,
            transport = self.transport.name(),
            "Issuing API request"
        );

        let result = self.transport.fetch(&request, &token).await;

        let current = {
            let mut slot = self.slot.lock();
            let current = slot.generation == generation;
            if current {
                slot.handle = None;
            }
            current
        };

        if !current {
            debug!(request = %request, generation, "Discarding superseded response");
            return Outcome::Cancelled;
        }

        match result {
            Ok(body) => Outcome::Success(body),
            Err(e) if e.is_cancelled() => Outcome::Cancelled,
            Err(e) => {
                let reason = FailureReason::new(&request, &e);
                warn!(request = %request, error = %e, "API request failed");
                Outcome::Failed(reason)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SpreadKind;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Arc;
    use tokio::sync::oneshot;

    type Reply = Result<Value, TransportError>;

    /// Each call parks until the test releases it
    #[derive(Default)]
    struct GatedTransport {
        gates: Mutex<Vec<oneshot::Sender<Reply>>>,
        honor_cancel: bool,
    }

    impl GatedTransport {
        fn ignoring_cancel() -> Self {
            Self::default()
        }

        fn honoring_cancel() -> Self {
            Self {
                honor_cancel: true,
                ..Self::default()
            }
        }

        fn calls(&self) -> usize {
            self.gates.lock().len()
        }

        fn release(&self, index: usize, reply: Reply) {
            let gate = std::mem::replace(&mut self.gates.lock()[index], oneshot::channel().0);
            let _ = gate.send(reply);
        }
    }

    #[async_trait]
    impl ApiTransport for GatedTransport {
        fn name(&self) -> &str {
            "gated"
        }

        async fn fetch(&self, _request: &ApiRequest, cancel: &CancelToken) -> Reply {
            let (tx, rx) = oneshot::channel();
            self.gates.lock().push(tx);
            let reply = async {
                rx.await
                    .unwrap_or_else(|_| Err(TransportError::Request("gate dropped".to_string())))
            };
            if self.honor_cancel {
                tokio::select! {
                    biased;
                    () = cancel.cancelled() => Err(TransportError::Cancelled),
                    r = reply => r,
                }
            } else {
                reply.await
            }
        }
    }

    async fn wait_for_calls(transport: &GatedTransport, n: usize) {
        while transport.calls() < n {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn test_success_clears_loading() {
        let transport = Arc::new(GatedTransport::ignoring_cancel());
        let coordinator = Arc::new(RequestCoordinator::new(Arc::clone(&transport)));

        let call = tokio::spawn({
            let coordinator = Arc::clone(&coordinator);
            async move { coordinator.execute(ApiRequest::status()).await }
        });
        wait_for_calls(&transport, 1).await;
        assert!(coordinator.is_loading());

        transport.release(0, Ok(json!({"status": "ok"})));
        let outcome = call.await.unwrap();

        assert_eq!(outcome.success(), Some(json!({"status": "ok"})));
        assert!(!coordinator.is_loading());
    }

    #[tokio::test]
    async fn test_failure_is_reported_with_status() {
        let transport = Arc::new(GatedTransport::ignoring_cancel());
        let coordinator = Arc::new(RequestCoordinator::new(Arc::clone(&transport)));

        let call = tokio::spawn({
            let coordinator = Arc::clone(&coordinator);
            async move { coordinator.execute(ApiRequest::card("ar01")).await }
        });
        wait_for_calls(&transport, 1).await;
        transport.release(
            0,
            Err(TransportError::Status {
                status: 500,
                reason: "Internal Server Error".to_string(),
            }),
        );

        match call.await.unwrap() {
            Outcome::Failed(reason) => {
                assert_eq!(reason.status, Some(500));
                assert_eq!(reason.request, "GET /api/tarot/card/ar01");
            }
            other => panic!("expected failure, got {other:?}"),
        }
        assert!(!coordinator.is_loading());
    }

    #[tokio::test]
    async fn test_late_response_of_superseded_call_is_cancelled() {
        let transport = Arc::new(GatedTransport::ignoring_cancel());
        let coordinator = Arc::new(RequestCoordinator::new(Arc::clone(&transport)));

        let first = tokio::spawn({
            let coordinator = Arc::clone(&coordinator);
            async move { coordinator.execute(ApiRequest::search("amor")).await }
        });
        wait_for_calls(&transport, 1).await;
        let second = tokio::spawn({
            let coordinator = Arc::clone(&coordinator);
            async move { coordinator.execute(ApiRequest::search("morte")).await }
        });
        wait_for_calls(&transport, 2).await;

        // B answers first, A's response still arrives afterwards
        transport.release(1, Ok(json!({"query": "morte"})));
        transport.release(0, Ok(json!({"query": "amor"})));

        assert_eq!(second.await.unwrap().success(), Some(json!({"query": "morte"})));
        assert!(first.await.unwrap().is_cancelled());
        assert!(!coordinator.is_loading());
    }

    #[tokio::test]
    async fn test_superseding_fires_cancel_token() {
        let transport = Arc::new(GatedTransport::honoring_cancel());
        let coordinator = Arc::new(RequestCoordinator::new(Arc::clone(&transport)));

        let first = tokio::spawn({
            let coordinator = Arc::clone(&coordinator);
            async move { coordinator.execute(ApiRequest::spread(SpreadKind::Celtic)).await }
        });
        wait_for_calls(&transport, 1).await;
        let second = tokio::spawn({
            let coordinator = Arc::clone(&coordinator);
            async move { coordinator.execute(ApiRequest::status()).await }
        });

        // A resolves without anyone releasing its gate
        assert!(first.await.unwrap().is_cancelled());
        assert!(coordinator.is_loading(), "B is still in flight");

        wait_for_calls(&transport, 2).await;
        transport.release(1, Ok(json!({})));
        assert!(second.await.unwrap().success().is_some());
        assert!(!coordinator.is_loading());
    }

    #[tokio::test]
    async fn test_dropped_future_clears_loading() {
        let transport = Arc::new(GatedTransport::ignoring_cancel());
        let coordinator = RequestCoordinator::new(Arc::clone(&transport));
        let mut loading = coordinator.subscribe_loading();

        {
            let mut call = tokio_test::task::spawn(coordinator.execute(ApiRequest::status()));
            tokio_test::assert_pending!(call.poll());
            assert!(coordinator.is_loading());
            assert!(*loading.borrow_and_update());
        }

        assert!(!coordinator.is_loading());
        assert!(loading.has_changed().unwrap());
        assert!(!*loading.borrow());
    }

    #[tokio::test]
    async fn test_identical_calls_are_not_deduplicated() {
        let transport = Arc::new(GatedTransport::ignoring_cancel());
        let coordinator = Arc::new(RequestCoordinator::new(Arc::clone(&transport)));

        for i in 0..2 {
            let call = tokio::spawn({
                let coordinator = Arc::clone(&coordinator);
                async move { coordinator.execute(ApiRequest::status()).await }
            });
            wait_for_calls(&transport, i + 1).await;
            transport.release(i, Ok(json!({"n": i})));
            assert_eq!(call.await.unwrap().success(), Some(json!({"n": i})));
        }
        assert_eq!(transport.calls(), 2);
    }
}
