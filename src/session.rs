//! Session handle bound to one authenticated session id.

use std::sync::Weak;

use crate::{client::error_json, Connection, ErrorCode, ExecutionResponse};

/// Pool collaborator that reclaims connections released by sessions.
///
/// The pool itself lives outside this crate; a [`Session`] only keeps a
/// weak back-reference and signals through it when its connection can
/// be reassigned.
pub trait ConnectionPool: Send + Sync {
    fn give_back(&self, connection: Connection);
}

/// One authenticated session over an exclusively owned [`Connection`].
///
/// Sessions are move-only: ownership transfers, it is never duplicated,
/// so a session can release its connection at most once. Dropping a
/// bound session releases it implicitly; [`release`](Self::release) is
/// the explicit, awaitable variant. Credentials are retained for
/// [`retry_connect`](Self::retry_connect).
pub struct Session {
    session_id: i64,
    connection: Option<Connection>,
    pool: Weak<dyn ConnectionPool>,
    username: String,
    password: String,
}

impl Session {
    pub fn new(
        session_id: i64,
        connection: Connection,
        pool: Weak<dyn ConnectionPool>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            session_id,
            connection: Some(connection),
            pool,
            username: username.into(),
            password: password.into(),
        }
    }

    /// A session is valid while it holds a server-assigned id. Callers
    /// should check this before executing: a released or failed handle
    /// would send the reserved id and be rejected server-side.
    pub fn valid(&self) -> bool {
        self.session_id > 0
    }

    pub fn session_id(&self) -> i64 {
        self.session_id
    }

    pub async fn execute(&self, statement: &str) -> ExecutionResponse {
        match &self.connection {
            Some(connection) => connection.execute(self.session_id, statement).await,
            None => ExecutionResponse::from_code(ErrorCode::Disconnected),
        }
    }

    pub fn execute_cb<F>(&self, statement: &str, callback: F)
    where
        F: FnOnce(ExecutionResponse) + Send + 'static,
    {
        match &self.connection {
            Some(connection) => connection.execute_cb(self.session_id, statement, callback),
            None => callback(ExecutionResponse::from_code(ErrorCode::Disconnected)),
        }
    }

    pub async fn execute_json(&self, statement: &str) -> String {
        match &self.connection {
            Some(connection) => connection.execute_json(self.session_id, statement).await,
            None => error_json(ErrorCode::Disconnected),
        }
    }

    pub fn execute_json_cb<F>(&self, statement: &str, callback: F)
    where
        F: FnOnce(String) + Send + 'static,
    {
        match &self.connection {
            Some(connection) => connection.execute_json_cb(self.session_id, statement, callback),
            None => callback(error_json(ErrorCode::Disconnected)),
        }
    }

    pub async fn ping(&self) -> bool {
        match &self.connection {
            Some(connection) => connection.ping().await,
            None => false,
        }
    }

    /// Recovers a session whose transport died: re-dials the remembered
    /// endpoint and re-authenticates with the retained credentials.
    /// Binds the fresh session id on success; leaves the handle invalid
    /// on failure.
    pub async fn retry_connect(&mut self) -> ErrorCode {
        let Some(connection) = self.connection.as_mut() else {
            return ErrorCode::Disconnected;
        };
        connection.close();
        if !connection.reopen().await {
            self.session_id = -1;
            return ErrorCode::FailToConnect;
        }
        let resp = connection.authenticate(&self.username, &self.password).await;
        self.session_id = match (resp.code, resp.session_id) {
            (ErrorCode::Succeeded, Some(id)) => id,
            _ => -1,
        };
        resp.code
    }

    /// Releases the session: best-effort signout, then the connection
    /// goes back to the pool. Releasing twice is a no-op and notifies
    /// the pool exactly once.
    pub async fn release(&mut self) {
        let Some(connection) = self.connection.take() else {
            return;
        };
        if self.session_id > 0 {
            connection.signout(self.session_id).await;
        }
        self.session_id = -1;
        if let Some(pool) = self.pool.upgrade() {
            pool.give_back(connection);
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        let Some(connection) = self.connection.take() else {
            return;
        };
        if self.session_id > 0 {
            // Signout cannot be awaited in drop; detach it onto the
            // ambient runtime when one exists.
            if let Some(service) = connection.service_handle() {
                let session_id = self.session_id;
                match tokio::runtime::Handle::try_current() {
                    Ok(handle) => {
                        handle.spawn(async move {
                            let _ = service.signout(session_id).await;
                        });
                    }
                    Err(_) => {
                        tracing::debug!(session_id, "no runtime at drop, session not signed out");
                    }
                }
            }
        }
        self.session_id = -1;
        if let Some(pool) = self.pool.upgrade() {
            pool.give_back(connection);
        }
    }
}
