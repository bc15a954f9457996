use std::fmt;

/// Result code reported by every remote operation.
///
/// This is the client-facing taxonomy: wire-level codes are translated
/// into exactly one of these values and never exposed directly. The
/// numeric discriminants match the codes the server publishes, so they
/// are stable across the JSON and typed surfaces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ErrorCode {
    Succeeded = 0,
    Disconnected = -1,
    FailToConnect = -2,
    RpcFailure = -3,
    BadUsernamePassword = -4,
    SessionInvalid = -5,
    SessionTimeout = -6,
    SyntaxError = -7,
    ExecutionError = -8,
    StatementEmpty = -9,
    UserNotFound = -10,
    BadPermission = -11,
    SemanticError = -12,
    Unknown = -13,
}

impl ErrorCode {
    pub fn is_success(self) -> bool {
        self == Self::Succeeded
    }

    /// True for codes that mean the transport itself is unusable, as
    /// opposed to the server rejecting a particular call.
    pub fn is_connectivity_error(self) -> bool {
        matches!(
            self,
            Self::Disconnected | Self::FailToConnect | Self::RpcFailure
        )
    }

    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Succeeded => "SUCCEEDED",
            Self::Disconnected => "E_DISCONNECTED",
            Self::FailToConnect => "E_FAIL_TO_CONNECT",
            Self::RpcFailure => "E_RPC_FAILURE",
            Self::BadUsernamePassword => "E_BAD_USERNAME_PASSWORD",
            Self::SessionInvalid => "E_SESSION_INVALID",
            Self::SessionTimeout => "E_SESSION_TIMEOUT",
            Self::SyntaxError => "E_SYNTAX_ERROR",
            Self::ExecutionError => "E_EXECUTION_ERROR",
            Self::StatementEmpty => "E_STATEMENT_EMPTY",
            Self::UserNotFound => "E_USER_NOT_FOUND",
            Self::BadPermission => "E_BAD_PERMISSION",
            Self::SemanticError => "E_SEMANTIC_ERROR",
            Self::Unknown => "E_UNKNOWN",
        };
        f.write_str(name)
    }
}

/// Failure raised by the underlying RPC proxy.
///
/// These never cross the public API: the adapter catches them at every
/// call boundary and reports a connectivity [`ErrorCode`] instead.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The endpoint could not be dialed within the connect timeout.
    #[error("failed to connect to {address}:{port}: {reason}")]
    Connect {
        address: String,
        port: u16,
        reason: String,
    },
    /// An established channel failed mid-call.
    #[error("rpc call failed: {0}")]
    Rpc(String),
    /// The channel was shut down and can no longer carry calls.
    #[error("channel closed")]
    ChannelClosed,
}
