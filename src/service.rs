//! Contract of the consumed RPC service proxy.
//!
//! The socket, framing, and serialization layers live outside this
//! crate. Whatever stub speaks the wire protocol is handed in as a
//! [`GraphService`] through a [`GraphConnector`]; the client code here
//! only ever sees these traits and the [`wire`](crate::wire) schema.

use std::sync::Arc;

use async_trait::async_trait;

use crate::{wire, TransportError};

/// A live proxy bound to one server channel.
///
/// Every call may fail with a [`TransportError`]; the adapter catches
/// those at each boundary and reports connectivity error codes, so a
/// transport failure never escapes to callers of this crate.
#[async_trait]
pub trait GraphService: Send + Sync {
    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<wire::AuthResponse, TransportError>;

    async fn execute(
        &self,
        session_id: i64,
        statement: &str,
    ) -> Result<wire::ExecutionResponse, TransportError>;

    /// Like `execute`, but the server renders the result as a JSON
    /// document which is returned verbatim.
    async fn execute_json(
        &self,
        session_id: i64,
        statement: &str,
    ) -> Result<String, TransportError>;

    async fn signout(&self, session_id: i64) -> Result<(), TransportError>;

    /// Shuts the channel down immediately, without draining in-flight
    /// calls.
    fn close_now(&self);
}

/// Dials the service and hands back a live proxy.
#[async_trait]
pub trait GraphConnector: Send + Sync {
    async fn connect(
        &self,
        address: &str,
        port: u16,
        timeout_ms: u64,
    ) -> Result<Arc<dyn GraphService>, TransportError>;
}
