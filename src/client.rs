//! Transport client adapter.
//!
//! Owns at most one live service proxy and converts between the wire
//! schema and the client data model. Transport failures are caught at
//! every call boundary and reported as connectivity error codes; they
//! never propagate to callers.

use std::sync::Arc;

use crate::{
    decode,
    service::{GraphConnector, GraphService},
    AuthResponse, ErrorCode, ExecutionResponse,
};

pub(crate) struct GraphClient {
    connector: Arc<dyn GraphConnector>,
    service: Option<Arc<dyn GraphService>>,
}

impl GraphClient {
    pub(crate) fn new(connector: Arc<dyn GraphConnector>) -> Self {
        Self {
            connector,
            service: None,
        }
    }

    /// Dials the endpoint and replaces the held proxy. Any failure is
    /// reported as `false`; nothing survives a failed attempt.
    pub(crate) async fn open(&mut self, address: &str, port: u16, timeout_ms: u64) -> bool {
        self.close();
        match self.connector.connect(address, port, timeout_ms).await {
            Ok(service) => {
                tracing::debug!(address, port, "transport channel established");
                self.service = Some(service);
                true
            }
            Err(err) => {
                tracing::warn!(address, port, error = %err, "failed to open transport channel");
                false
            }
        }
    }

    /// Immediate channel shutdown; no-op when nothing is open.
    pub(crate) fn close(&mut self) {
        if let Some(service) = self.service.take() {
            service.close_now();
        }
    }

    pub(crate) async fn authenticate(&self, username: &str, password: &str) -> AuthResponse {
        let Some(service) = &self.service else {
            return AuthResponse::from_code(ErrorCode::Disconnected);
        };
        match service.authenticate(username, password).await {
            Ok(resp) => decode::auth_response(resp),
            Err(err) => {
                tracing::debug!(error = %err, "authenticate rpc failed");
                AuthResponse::from_code(ErrorCode::RpcFailure)
            }
        }
    }

    pub(crate) async fn execute(&self, session_id: i64, statement: &str) -> ExecutionResponse {
        let Some(service) = &self.service else {
            return ExecutionResponse::from_code(ErrorCode::Disconnected);
        };
        match service.execute(session_id, statement).await {
            Ok(resp) => decode::execution_response(resp),
            Err(err) => {
                tracing::debug!(error = %err, "execute rpc failed");
                ExecutionResponse::from_code(ErrorCode::RpcFailure)
            }
        }
    }

    /// Non-blocking execution. The callback fires exactly once with the
    /// translated response, on whatever thread the runtime completes
    /// the call on. With no proxy held it fires synchronously, right
    /// here, with the same `Disconnected` response the blocking path
    /// reports.
    pub(crate) fn execute_cb<F>(&self, session_id: i64, statement: &str, callback: F)
    where
        F: FnOnce(ExecutionResponse) + Send + 'static,
    {
        let Some(service) = &self.service else {
            callback(ExecutionResponse::from_code(ErrorCode::Disconnected));
            return;
        };
        let service = Arc::clone(service);
        let statement = statement.to_owned();
        tokio::spawn(async move {
            let resp = match service.execute(session_id, &statement).await {
                Ok(resp) => decode::execution_response(resp),
                Err(err) => {
                    tracing::debug!(error = %err, "async execute rpc failed");
                    ExecutionResponse::from_code(ErrorCode::RpcFailure)
                }
            };
            callback(resp);
        });
    }

    /// Statement execution with the result left as the server's JSON
    /// rendering, passed through verbatim. Failures detected locally
    /// are reported as a JSON error document instead.
    pub(crate) async fn execute_json(&self, session_id: i64, statement: &str) -> String {
        let Some(service) = &self.service else {
            return error_json(ErrorCode::Disconnected);
        };
        match service.execute_json(session_id, statement).await {
            Ok(raw) => raw,
            Err(err) => {
                tracing::debug!(error = %err, "execute_json rpc failed");
                error_json(ErrorCode::RpcFailure)
            }
        }
    }

    pub(crate) fn execute_json_cb<F>(&self, session_id: i64, statement: &str, callback: F)
    where
        F: FnOnce(String) + Send + 'static,
    {
        let Some(service) = &self.service else {
            callback(error_json(ErrorCode::Disconnected));
            return;
        };
        let service = Arc::clone(service);
        let statement = statement.to_owned();
        tokio::spawn(async move {
            let raw = match service.execute_json(session_id, &statement).await {
                Ok(raw) => raw,
                Err(err) => {
                    tracing::debug!(error = %err, "async execute_json rpc failed");
                    error_json(ErrorCode::RpcFailure)
                }
            };
            callback(raw);
        });
    }

    /// Best-effort session invalidation; the outcome is not observable.
    pub(crate) async fn signout(&self, session_id: i64) {
        if let Some(service) = &self.service {
            if let Err(err) = service.signout(session_id).await {
                tracing::debug!(error = %err, session_id, "signout rpc failed");
            }
        }
    }

    /// Detached clone of the live proxy, for fire-and-forget work that
    /// must outlive the borrow (drop-time signout).
    pub(crate) fn service_handle(&self) -> Option<Arc<dyn GraphService>> {
        self.service.clone()
    }
}

/// Mirrors the server's `errors` envelope for failures this layer
/// detects before or instead of a remote call.
pub(crate) fn error_json(code: ErrorCode) -> String {
    serde_json::json!({
        "errors": [{ "code": code.as_i32(), "message": code.to_string() }]
    })
    .to_string()
}
