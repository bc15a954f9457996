//! Public connection handle.

use std::sync::Arc;

use crate::{
    client::GraphClient,
    service::{GraphConnector, GraphService},
    AuthResponse, ErrorCode, ExecutionResponse,
};

/// Reserved session id meaning "no session"; the server rejects it for
/// anything but the pre-authentication liveness probe.
pub const NO_SESSION_ID: i64 = -1;

#[derive(Clone, Debug)]
struct Endpoint {
    address: String,
    port: u16,
    timeout_ms: u64,
}

/// One client-to-server channel.
///
/// A `Connection` exclusively owns its transport adapter: it is not
/// `Clone`, moving it transfers the channel, and dropping it closes the
/// channel. Concurrent use requires external synchronization; pooled
/// deployments hand each caller its own connection.
pub struct Connection {
    client: GraphClient,
    endpoint: Option<Endpoint>,
}

impl Connection {
    /// A closed connection that will dial through `connector`.
    pub fn new(connector: Arc<dyn GraphConnector>) -> Self {
        Self {
            client: GraphClient::new(connector),
            endpoint: None,
        }
    }

    /// Establishes the transport channel. Returns `false` on any
    /// failure; a failed attempt leaves the connection closed.
    pub async fn open(&mut self, address: &str, port: u16, timeout_ms: u64) -> bool {
        let opened = self.client.open(address, port, timeout_ms).await;
        if opened {
            self.endpoint = Some(Endpoint {
                address: address.to_owned(),
                port,
                timeout_ms,
            });
        }
        opened
    }

    /// Re-dials the endpoint of the last successful [`open`](Self::open).
    pub async fn reopen(&mut self) -> bool {
        match self.endpoint.clone() {
            Some(endpoint) => {
                self.client
                    .open(&endpoint.address, endpoint.port, endpoint.timeout_ms)
                    .await
            }
            None => false,
        }
    }

    /// Closes the channel immediately; safe to call when nothing is
    /// open.
    pub fn close(&mut self) {
        self.client.close();
    }

    pub async fn authenticate(&self, username: &str, password: &str) -> AuthResponse {
        self.client.authenticate(username, password).await
    }

    pub async fn execute(&self, session_id: i64, statement: &str) -> ExecutionResponse {
        self.client.execute(session_id, statement).await
    }

    /// Non-blocking execution; see the adapter contract: the callback
    /// fires exactly once, synchronously when disconnected.
    pub fn execute_cb<F>(&self, session_id: i64, statement: &str, callback: F)
    where
        F: FnOnce(ExecutionResponse) + Send + 'static,
    {
        self.client.execute_cb(session_id, statement, callback);
    }

    pub async fn execute_json(&self, session_id: i64, statement: &str) -> String {
        self.client.execute_json(session_id, statement).await
    }

    pub fn execute_json_cb<F>(&self, session_id: i64, statement: &str, callback: F)
    where
        F: FnOnce(String) + Send + 'static,
    {
        self.client.execute_json_cb(session_id, statement, callback);
    }

    pub async fn signout(&self, session_id: i64) {
        self.client.signout(session_id).await;
    }

    /// Liveness probe built from a trivial statement with the reserved
    /// no-session id. The transport counts as alive whenever the server
    /// answers with anything structured: a session or semantic
    /// rejection still proves the round trip.
    pub async fn ping(&self) -> bool {
        let resp = self.execute(NO_SESSION_ID, "YIELD 1").await;
        !matches!(resp.code, ErrorCode::RpcFailure | ErrorCode::Disconnected)
    }

    /// Openness is operational, not local state: a connection is open
    /// iff it answers a [`ping`](Self::ping).
    pub async fn is_open(&self) -> bool {
        self.ping().await
    }

    pub(crate) fn service_handle(&self) -> Option<Arc<dyn GraphService>> {
        self.client.service_handle()
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        self.client.close();
    }
}
