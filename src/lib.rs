//! `plexus-client` is an async RPC client for the Plexus graph
//! database.
//!
//! The crate owns the connection/session lifecycle and the
//! wire-to-client response translation:
//! - [`Connection`] — transport handle with an operational liveness
//!   probe ([`Connection::ping`])
//! - [`Session`] — authenticated handle that returns its connection to
//!   a [`ConnectionPool`] collaborator on release
//! - [`wire`] — the schema spoken by a [`GraphService`] proxy
//!
//! The RPC stub itself (sockets, framing, serialization) is supplied
//! from outside through a [`GraphConnector`]; this crate ships no
//! socket code. Remote failures surface as [`ErrorCode`] values on the
//! response types, never as errors at the call site.

mod client;
mod connection;
mod decode;
mod error;
mod session;
mod types;
mod value;

pub mod service;
pub mod wire;

pub use connection::{Connection, NO_SESSION_ID};
pub use error::{ErrorCode, TransportError};
pub use service::{GraphConnector, GraphService};
pub use session::{ConnectionPool, Session};
pub use types::{
    AuthResponse, DataSet, ExecutionResponse, Pair, PlanDescription, PlanNodeBranchInfo,
    PlanNodeDescription, ProfilingStats, Row,
};
pub use value::Value;
