//! Dispatcher - runs each request on its own worker task
//!
//! The caller gets control back immediately. The worker owns the request,
//! waits on the transport (bounded by the fixed timeout) and sends exactly one
//! [`DispatchOutcome`] into the app's channel. It never touches app state.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::constants::REQUEST_TIMEOUT_SECS;
use crate::error::AppError;
use crate::messages::DispatchOutcome;
use crate::models::{RequestSpec, ResponseEnvelope};
use crate::network::client::{Transport, TransportError};

pub struct Dispatcher<T: Transport> {
    transport: Arc<T>,
    timeout: Duration,
    outcome_tx: mpsc::UnboundedSender<DispatchOutcome>,
}

impl<T: Transport> Clone for Dispatcher<T> {
    fn clone(&self) -> Self {
        Dispatcher {
            transport: Arc::clone(&self.transport),
            timeout: self.timeout,
            outcome_tx: self.outcome_tx.clone(),
        }
    }
}

impl<T: Transport> Dispatcher<T> {
    pub fn new(transport: T, outcome_tx: mpsc::UnboundedSender<DispatchOutcome>) -> Self {
        Dispatcher {
            transport: Arc::new(transport),
            timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
            outcome_tx,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Fire a request. Must be called from within a Tokio runtime.
    pub fn dispatch(&self, id: u64, spec: RequestSpec) -> JoinHandle<()> {
        let transport = Arc::clone(&self.transport);
        let outcome_tx = self.outcome_tx.clone();
        let timeout = self.timeout;

        tokio::spawn(async move {
            tracing::info!(id, url = %spec.url, method = spec.method.as_str(), "Executing request");
            let result = execute(transport.as_ref(), &spec, timeout).await;
            match &result {
                Ok(envelope) => {
                    tracing::info!(id, status = envelope.status_code, elapsed_ms = envelope.elapsed_ms, "Request completed")
                }
                Err(e) => tracing::warn!(id, error = %e, "Request failed"),
            }
            // Receiver gone means the app has shut down; nothing left to notify
            let _ = outcome_tx.send(DispatchOutcome { id, result });
        })
    }
}

/// Run the transport under the timeout and wrap the result
pub async fn execute<T: Transport + ?Sized>(
    transport: &T,
    spec: &RequestSpec,
    timeout: Duration,
) -> Result<ResponseEnvelope, AppError> {
    let start = Instant::now();
    let response = match tokio::time::timeout(timeout, transport.request(spec, timeout)).await {
        Ok(Ok(response)) => response,
        Ok(Err(e)) => return Err(network_error(e)),
        Err(_elapsed) => return Err(AppError::Network("timeout".to_string())),
    };
    let elapsed_ms = start.elapsed().as_millis() as u64;

    Ok(ResponseEnvelope::new(
        response.status_code,
        response.headers,
        response.text,
        elapsed_ms,
    ))
}

fn network_error(e: TransportError) -> AppError {
    match e {
        TransportError::Timeout => AppError::Network("timeout".to_string()),
        other => AppError::Network(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Auth, HeaderMap, HttpMethod};
    use crate::network::client::TransportResponse;
    use async_trait::async_trait;
    use tokio::sync::mpsc::error::TryRecvError;

    struct DelayedTransport {
        delay: Duration,
        text: &'static str,
    }

    #[async_trait]
    impl Transport for DelayedTransport {
        async fn request(
            &self,
            _spec: &RequestSpec,
            _timeout: Duration,
        ) -> Result<TransportResponse, TransportError> {
            tokio::time::sleep(self.delay).await;
            Ok(TransportResponse {
                status_code: 200,
                headers: HeaderMap::from([("content-type".to_string(), "application/json".to_string())]),
                text: self.text.to_string(),
            })
        }
    }

    struct NeverTransport;

    #[async_trait]
    impl Transport for NeverTransport {
        async fn request(
            &self,
            _spec: &RequestSpec,
            _timeout: Duration,
        ) -> Result<TransportResponse, TransportError> {
            std::future::pending().await
        }
    }

    struct RefusingTransport;

    #[async_trait]
    impl Transport for RefusingTransport {
        async fn request(
            &self,
            _spec: &RequestSpec,
            _timeout: Duration,
        ) -> Result<TransportResponse, TransportError> {
            Err(TransportError::Connect("connection refused".to_string()))
        }
    }

    struct TimingOutTransport;

    #[async_trait]
    impl Transport for TimingOutTransport {
        async fn request(
            &self,
            _spec: &RequestSpec,
            _timeout: Duration,
        ) -> Result<TransportResponse, TransportError> {
            Err(TransportError::Timeout)
        }
    }

    fn spec() -> RequestSpec {
        RequestSpec {
            url: "http://localhost:8080/stats".to_string(),
            method: HttpMethod::GET,
            headers: HeaderMap::new(),
            body: None,
            auth: Auth::None,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_dispatch_returns_before_transport_completes() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let dispatcher = Dispatcher::new(
            DelayedTransport { delay: Duration::from_millis(500), text: r#"{"hits": 3}"# },
            tx,
        );

        let start = tokio::time::Instant::now();
        let _handle = dispatcher.dispatch(1, spec());
        assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));

        let outcome = rx.recv().await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(500));
        assert_eq!(outcome.id, 1);
        let envelope = outcome.result.unwrap();
        assert_eq!(envelope.status_code, 200);
        assert_eq!(envelope.parsed_body, Some(serde_json::json!({"hits": 3})));
    }

    #[tokio::test(start_paused = true)]
    async fn test_never_completing_transport_times_out() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let dispatcher = Dispatcher::new(NeverTransport, tx);
        assert_eq!(dispatcher.timeout(), Duration::from_secs(30));

        let start = tokio::time::Instant::now();
        dispatcher.dispatch(7, spec());
        let outcome = rx.recv().await.unwrap();

        assert_eq!(outcome.id, 7);
        assert_eq!(outcome.result, Err(AppError::Network("timeout".to_string())));
        assert!(start.elapsed() >= Duration::from_secs(30));
    }

    #[tokio::test]
    async fn test_transport_failure_is_network_error() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let dispatcher = Dispatcher::new(RefusingTransport, tx);
        dispatcher.dispatch(2, spec());

        let outcome = rx.recv().await.unwrap();
        assert!(!outcome.is_success());
        assert_eq!(
            outcome.result,
            Err(AppError::Network("Connection failed: connection refused".to_string()))
        );
    }

    #[tokio::test]
    async fn test_transport_timeout_is_reported_as_timeout() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let dispatcher = Dispatcher::new(TimingOutTransport, tx);
        dispatcher.dispatch(4, spec());

        let outcome = rx.recv().await.unwrap();
        assert_eq!(outcome.id, 4);
        let err = outcome.result.unwrap_err();
        assert_eq!(err, AppError::Network("timeout".to_string()));
        assert_eq!(err.user_message(), "Request timed out (30s).");
    }

    #[tokio::test(start_paused = true)]
    async fn test_outcomes_arrive_in_completion_order() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let slow = Dispatcher::new(DelayedTransport { delay: Duration::from_secs(2), text: "slow" }, tx.clone());
        let fast = Dispatcher::new(DelayedTransport { delay: Duration::from_secs(1), text: "fast" }, tx);

        slow.dispatch(1, spec());
        fast.dispatch(2, spec());

        let first = rx.recv().await.unwrap();
        let second = rx.recv().await.unwrap();
        assert_eq!(first.id, 2);
        assert_eq!(second.id, 1);
        assert_eq!(second.result.unwrap().raw_text, "slow");
    }
}
